pub mod claims;
pub mod codec;
pub mod errors;

pub use claims::Claims;
pub use claims::ROLE_CLAIM;
pub use claims::USER_ID_CLAIM;
pub use codec::TokenCodec;
pub use errors::TokenError;
