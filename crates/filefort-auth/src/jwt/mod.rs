//! JWT token encoding, decoding, and claims.

pub mod claims;
pub mod decoder;
pub mod encoder;
pub mod error;

pub use claims::Claims;
pub use decoder::{JwtDecoder, bearer_token};
pub use encoder::{IssuedToken, JwtEncoder};
pub use error::TokenError;
