// Domain layer - Pure snapshot and timeline models
pub mod activity;
pub mod character;
pub mod range;
pub mod session;
pub mod snapshot;
pub mod timeline;
