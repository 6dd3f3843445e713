//! Authentication primitives for the account service:
//! - Password hashing (Argon2id)
//! - Signed session tokens (HS256 JWTs with a fixed time-to-live)
//!
//! Both components are pure CPU work over immutable state, so they can be
//! shared across any number of request tasks without locking.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::default();
//! let hash = hasher.hash("secret1").unwrap();
//! assert!(hasher.verify("secret1", &hash));
//! ```
//!
//! ## Session Tokens
//! ```
//! use std::collections::HashMap;
//!
//! use auth::TokenCodec;
//! use chrono::{Duration, Utc};
//!
//! let codec = TokenCodec::new(b"secret_key_at_least_32_bytes_long!", Duration::hours(24));
//! let token = codec.issue("ann@x.com", HashMap::new(), Utc::now()).unwrap();
//! let claims = codec.decode(&token).unwrap();
//! assert_eq!(claims.sub, "ann@x.com");
//! assert!(codec.is_valid(&token, "ann@x.com", Utc::now()));
//! ```

pub mod password;
pub mod token;

// Re-export commonly used items
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::Claims;
pub use token::TokenCodec;
pub use token::TokenError;
pub use token::ROLE_CLAIM;
pub use token::USER_ID_CLAIM;
