pub mod auth;
pub mod response;

pub use auth::{require_identity, VerifiedIdentity};
pub use response::{ApiResponse, ApiResult};
