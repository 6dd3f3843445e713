use std::collections::HashMap;
use std::sync::Arc;

use auth::PasswordHasher;
use auth::TokenCodec;
use auth::ROLE_CLAIM;
use auth::USER_ID_CLAIM;
use chrono::Utc;

use crate::domain::user::models::Credentials;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::IssuedToken;
use crate::domain::user::models::PersonName;
use crate::domain::user::models::RegisterRequest;
use crate::domain::user::models::Role;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::AuthError;
use crate::user::errors::ValidationError;
use crate::user::ports::UserRepository;

const MIN_PASSWORD_LENGTH: usize = 6;

/// Domain service orchestrating registration and login.
///
/// Validation runs before any store access; the store is the only mutating
/// collaborator and only `register` writes to it.
pub struct AuthenticationService<R>
where
    R: UserRepository,
{
    repository: Arc<R>,
    password_hasher: PasswordHasher,
    token_codec: Arc<TokenCodec>,
}

impl<R> AuthenticationService<R>
where
    R: UserRepository,
{
    /// Create a new authentication service with injected dependencies.
    pub fn new(
        repository: Arc<R>,
        password_hasher: PasswordHasher,
        token_codec: Arc<TokenCodec>,
    ) -> Self {
        Self {
            repository,
            password_hasher,
            token_codec,
        }
    }

    /// Register a new user and issue a session token.
    ///
    /// Checks run in order: first name, last name, email syntax, password
    /// length, then email uniqueness against the store. New users get the
    /// `User` role and a freshly hashed password; the plaintext is never
    /// persisted.
    ///
    /// # Errors
    /// * `Validation` - an input field failed its check
    /// * `EmailAlreadyRegistered` - the email is already taken
    /// * `Password` / `Token` - hashing or token issuance failed
    /// * `Repository` - store operation failed
    pub async fn register(&self, request: RegisterRequest) -> Result<IssuedToken, AuthError> {
        let first_name =
            PersonName::new(request.first_name).map_err(ValidationError::first_name)?;
        let last_name = PersonName::new(request.last_name).map_err(ValidationError::last_name)?;
        let email = EmailAddress::new(request.email).map_err(|_| ValidationError::InvalidEmail)?;

        if request.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(ValidationError::PasswordTooShort {
                min: MIN_PASSWORD_LENGTH,
            }
            .into());
        }

        if self
            .repository
            .find_by_email(email.as_str())
            .await?
            .is_some()
        {
            return Err(AuthError::EmailAlreadyRegistered);
        }

        let password_hash = self.password_hasher.hash(&request.password)?;

        let user = User {
            id: UserId::new(),
            first_name,
            last_name,
            email,
            password_hash,
            role: Role::User,
            created_at: Utc::now(),
        };

        let saved = self.repository.save(user).await?;
        tracing::info!(user_id = %saved.id, "User registered");

        self.issue_token(&saved)
    }

    /// Verify credentials and issue a session token.
    ///
    /// Unknown email and wrong password are indistinguishable to the caller.
    ///
    /// # Errors
    /// * `InvalidCredentials` - no such user or the password does not match
    /// * `Token` - token issuance failed
    /// * `Repository` - store operation failed
    pub async fn authenticate(&self, credentials: Credentials) -> Result<IssuedToken, AuthError> {
        let user = self
            .repository
            .find_by_email(&credentials.email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !self
            .password_hasher
            .verify(&credentials.password, &user.password_hash)
        {
            return Err(AuthError::InvalidCredentials);
        }

        self.issue_token(&user)
    }

    fn issue_token(&self, user: &User) -> Result<IssuedToken, AuthError> {
        let mut extra = HashMap::new();
        extra.insert(
            USER_ID_CLAIM.to_string(),
            serde_json::json!(user.id.to_string()),
        );
        extra.insert(ROLE_CLAIM.to_string(), serde_json::json!(user.role.as_str()));

        let token = self
            .token_codec
            .issue(user.email.as_str(), extra, Utc::now())?;

        Ok(IssuedToken { token })
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use chrono::Duration;
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;

    const TEST_SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    // Define mocks in the test module using mockall
    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError>;
            async fn save(&self, user: User) -> Result<User, AuthError>;
        }
    }

    fn service(repository: MockTestUserRepository) -> AuthenticationService<MockTestUserRepository> {
        AuthenticationService::new(
            Arc::new(repository),
            PasswordHasher::default(),
            Arc::new(TokenCodec::new(TEST_SECRET, Duration::hours(24))),
        )
    }

    fn register_request() -> RegisterRequest {
        RegisterRequest {
            first_name: "Ann".to_string(),
            last_name: "Lee".to_string(),
            email: "ann@x.com".to_string(),
            password: "secret1".to_string(),
        }
    }

    fn stored_user(password: &str) -> User {
        User {
            id: UserId::new(),
            first_name: PersonName::new("Ann".to_string()).unwrap(),
            last_name: PersonName::new("Lee".to_string()).unwrap(),
            email: EmailAddress::new("ann@x.com".to_string()).unwrap(),
            password_hash: PasswordHasher::default().hash(password).unwrap(),
            role: Role::User,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_register_success_issues_token_bound_to_email() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .withf(|email| email == "ann@x.com")
            .times(1)
            .returning(|_| Ok(None));

        repository
            .expect_save()
            .withf(|user| {
                user.email.as_str() == "ann@x.com"
                    && user.role == Role::User
                    && user.password_hash != "secret1"
                    && user.password_hash.starts_with("$argon2")
            })
            .times(1)
            .returning(|user| Ok(user));

        let service = service(repository);
        let issued = service
            .register(register_request())
            .await
            .expect("Registration failed");

        let codec = TokenCodec::new(TEST_SECRET, Duration::hours(24));
        let claims = codec.decode(&issued.token).expect("Failed to decode token");
        assert_eq!(claims.sub, "ann@x.com");
        assert!(claims.user_id().is_some());
        assert_eq!(claims.role(), Some("User"));
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(Some(stored_user("secret1"))));
        repository.expect_save().times(0);

        let service = service(repository);
        let result = service.register(register_request()).await;

        assert!(matches!(result, Err(AuthError::EmailAlreadyRegistered)));
    }

    #[tokio::test]
    async fn test_register_duplicate_email_lost_race_maps_from_store() {
        let mut repository = MockTestUserRepository::new();

        // A concurrent registration slips in between lookup and save; the
        // store's uniqueness constraint reports the conflict.
        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_save()
            .times(1)
            .returning(|_| Err(AuthError::EmailAlreadyRegistered));

        let service = service(repository);
        let result = service.register(register_request()).await;

        assert!(matches!(result, Err(AuthError::EmailAlreadyRegistered)));
    }

    #[tokio::test]
    async fn test_register_blank_first_name_fails_before_store() {
        let mut repository = MockTestUserRepository::new();
        repository.expect_find_by_email().times(0);
        repository.expect_save().times(0);

        let service = service(repository);
        let result = service
            .register(RegisterRequest {
                first_name: "".to_string(),
                ..register_request()
            })
            .await;

        match result {
            Err(AuthError::Validation(err)) => {
                assert_eq!(err, ValidationError::FirstNameRequired);
                assert_eq!(err.to_string(), "First name is required");
                assert_eq!(err.field(), "firstName");
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_register_blank_last_name_fails_before_store() {
        let mut repository = MockTestUserRepository::new();
        repository.expect_find_by_email().times(0);
        repository.expect_save().times(0);

        let service = service(repository);
        let result = service
            .register(RegisterRequest {
                last_name: " ".to_string(),
                ..register_request()
            })
            .await;

        match result {
            Err(AuthError::Validation(err)) => {
                assert_eq!(err, ValidationError::LastNameRequired);
                assert_eq!(err.to_string(), "Last name is required");
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_register_invalid_email_fails_before_store() {
        let mut repository = MockTestUserRepository::new();
        repository.expect_find_by_email().times(0);
        repository.expect_save().times(0);

        let service = service(repository);
        let result = service
            .register(RegisterRequest {
                email: "not-an-email".to_string(),
                ..register_request()
            })
            .await;

        assert!(matches!(
            result,
            Err(AuthError::Validation(ValidationError::InvalidEmail))
        ));
    }

    #[tokio::test]
    async fn test_register_short_password_fails_before_store() {
        let mut repository = MockTestUserRepository::new();
        repository.expect_find_by_email().times(0);
        repository.expect_save().times(0);

        let service = service(repository);
        let result = service
            .register(RegisterRequest {
                password: "short".to_string(),
                ..register_request()
            })
            .await;

        assert!(matches!(
            result,
            Err(AuthError::Validation(ValidationError::PasswordTooShort {
                min: 6
            }))
        ));
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .withf(|email| email == "ann@x.com")
            .times(1)
            .returning(|_| Ok(Some(stored_user("secret1"))));

        let service = service(repository);
        let issued = service
            .authenticate(Credentials {
                email: "ann@x.com".to_string(),
                password: "secret1".to_string(),
            })
            .await
            .expect("Authentication failed");

        let codec = TokenCodec::new(TEST_SECRET, Duration::hours(24));
        let claims = codec.decode(&issued.token).expect("Failed to decode token");
        assert_eq!(claims.sub, "ann@x.com");
    }

    #[tokio::test]
    async fn test_authenticate_wrong_password() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(Some(stored_user("secret1"))));

        let service = service(repository);
        let result = service
            .authenticate(Credentials {
                email: "ann@x.com".to_string(),
                password: "wrong".to_string(),
            })
            .await;

        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_authenticate_unknown_email() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        let service = service(repository);
        let result = service
            .authenticate(Credentials {
                email: "nobody@x.com".to_string(),
                password: "secret1".to_string(),
            })
            .await;

        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_authenticate_malformed_stored_hash_is_rejected() {
        let mut repository = MockTestUserRepository::new();

        repository.expect_find_by_email().times(1).returning(|_| {
            let mut user = stored_user("secret1");
            user.password_hash = "corrupted".to_string();
            Ok(Some(user))
        });

        let service = service(repository);
        let result = service
            .authenticate(Credentials {
                email: "ann@x.com".to_string(),
                password: "secret1".to_string(),
            })
            .await;

        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }
}
