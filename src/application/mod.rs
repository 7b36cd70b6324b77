// Application layer - Use cases over the character repository
pub mod character_repository;
pub mod character_service;
pub mod dashboard_service;
