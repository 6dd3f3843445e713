use thiserror::Error;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for PersonName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NameError {
    #[error("name is blank")]
    Blank,

    #[error("name is shorter than {min} characters")]
    TooShort { min: usize },
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for Role parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoleError {
    #[error("Unknown role: {0}")]
    Unknown(String),
}

/// User-correctable input problem, addressable by field.
///
/// Messages are surfaced verbatim to the client.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("First name is required")]
    FirstNameRequired,

    #[error("First name must be at least {min} characters")]
    FirstNameTooShort { min: usize },

    #[error("Last name is required")]
    LastNameRequired,

    #[error("Last name must be at least {min} characters")]
    LastNameTooShort { min: usize },

    #[error("Email must be valid")]
    InvalidEmail,

    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },
}

impl ValidationError {
    /// The request field this error addresses.
    pub fn field(&self) -> &'static str {
        match self {
            Self::FirstNameRequired | Self::FirstNameTooShort { .. } => "firstName",
            Self::LastNameRequired | Self::LastNameTooShort { .. } => "lastName",
            Self::InvalidEmail => "email",
            Self::PasswordTooShort { .. } => "password",
        }
    }

    pub fn first_name(err: NameError) -> Self {
        match err {
            NameError::Blank => Self::FirstNameRequired,
            NameError::TooShort { min } => Self::FirstNameTooShort { min },
        }
    }

    pub fn last_name(err: NameError) -> Self {
        match err {
            NameError::Blank => Self::LastNameRequired,
            NameError::TooShort { min } => Self::LastNameTooShort { min },
        }
    }
}

/// Top-level error for registration and authentication operations
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Email already registered")]
    EmailAlreadyRegistered,

    // Deliberately generic so callers cannot probe which emails exist
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token error: {0}")]
    Token(#[from] auth::TokenError),

    #[error("Password error: {0}")]
    Password(#[from] auth::PasswordError),

    #[error("Repository error: {0}")]
    Repository(String),
}
