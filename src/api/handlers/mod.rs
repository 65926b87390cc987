//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod my_urls;
pub mod redirect;
pub mod shorten;

pub use health::health_handler;
pub use my_urls::{delete_my_url_handler, list_my_urls_handler, update_my_url_handler};
pub use redirect::redirect_handler;
pub use shorten::shorten_handler;
