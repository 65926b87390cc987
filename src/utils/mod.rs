//! Utility functions shared across layers.
//!
//! - [`slug_generator`] - random slug generation
//! - [`url_validator`] - target URL validation

pub mod slug_generator;
pub mod url_validator;
