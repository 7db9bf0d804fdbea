//! Authentication adapters.
//!
//! - `BcryptHasher` - `PasswordHasher` backed by bcrypt
//! - `SessionTokenSigner` - HMAC-SHA256 tokens binding a client to its session

mod bcrypt_hasher;
mod session_token;

pub use bcrypt_hasher::BcryptHasher;
pub use session_token::{SessionTokenSigner, TokenError};
