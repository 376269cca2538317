pub mod claims;
pub mod errors;
pub mod handler;
pub mod service;

pub use claims::AccessClaims;
pub use claims::ExpiringClaims;
pub use claims::RefreshClaims;
pub use claims::ACCESS_TOKEN_TTL_MINUTES;
pub use claims::REFRESH_TOKEN_TTL_DAYS;
pub use errors::JwtError;
pub use handler::JwtHandler;
pub use service::JwtTokenService;
pub use service::TokenService;
