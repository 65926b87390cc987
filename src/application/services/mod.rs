//! Business logic services for the application layer.

pub mod alias_policy;
pub mod auth_service;
pub mod ownership_service;
pub mod redirect_service;
pub mod shorten_service;

pub use alias_policy::AliasPolicy;
pub use auth_service::AuthService;
pub use ownership_service::OwnershipService;
pub use redirect_service::RedirectService;
pub use shorten_service::ShortenService;
