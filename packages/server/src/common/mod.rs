// Common types and utilities shared across the application

pub mod credential;
pub mod utils;

pub use credential::Credential;
