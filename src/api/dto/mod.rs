//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization (camelCase on
//! the wire) and validator for input size limits.

pub mod health;
pub mod short_url;
pub mod shorten;
pub mod update_url;
