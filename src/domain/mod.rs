//! Domain layer: entities and repository contracts.
//!
//! - [`entities`] - core data structures
//! - [`repositories`] - data access traits implemented by the infrastructure layer
//!
//! The domain layer has no dependency on HTTP or storage details. Business rules
//! live in [`crate::application::services`].

pub mod entities;
pub mod repositories;
