//! Aligns irregularly sampled character stat snapshots onto a shared time
//! axis, classifies observed versus interpolated stretches and derives play
//! sessions from activity gaps.
//!
//! The pure pipeline lives in [`domain`]; the remaining layers wire it to the
//! tracker backend and an HTTP surface.
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

pub use domain::range::{resolve_range, RangeKey, ResolvedRange};
pub use domain::session::{compute_sessions, Session};
pub use domain::timeline::{build_timeline, Timeline};
