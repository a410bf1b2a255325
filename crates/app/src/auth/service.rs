//! Auth service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::{debug, info};

use crate::{
    auth::{
        AuthServiceError, JwtKeys, MIN_PASSWORD_LEN, NewRegistration, Principal, Session,
        hash_password, verify_password,
    },
    database::Db,
    domain::users::{
        data::NewUser,
        records::{Role, UserRecord, UserUuid, VerificationStatus},
        repository::PgUsersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    db: Db,
    keys: JwtKeys,
    users: PgUsersRepository,
}

impl PgAuthService {
    #[must_use]
    pub fn new(db: Db, keys: JwtKeys) -> Self {
        Self {
            db,
            keys,
            users: PgUsersRepository::new(),
        }
    }

    fn session_for(&self, user: UserRecord) -> Result<Session, AuthServiceError> {
        let issued = self.keys.issue(user.uuid, user.role, Timestamp::now())?;

        Ok(Session {
            token: issued.token,
            expires_at: issued.expires_at,
            user,
        })
    }
}

fn validate_registration(registration: &NewRegistration) -> Result<NewUser, AuthServiceError> {
    let email = registration.email.trim().to_lowercase();

    if email.is_empty() || !email.contains('@') {
        return Err(AuthServiceError::InvalidRegistration(
            "a valid email is required",
        ));
    }

    if registration.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthServiceError::InvalidRegistration(
            "password must be at least 8 characters",
        ));
    }

    let name = registration.name.trim().to_string();

    if name.is_empty() {
        return Err(AuthServiceError::InvalidRegistration("name is required"));
    }

    if matches!(registration.role, Role::Admin) {
        return Err(AuthServiceError::InvalidRegistration(
            "role must be customer or partner",
        ));
    }

    Ok(NewUser {
        uuid: UserUuid::new(),
        email,
        password_hash: String::new(),
        name,
        phone: registration.phone.clone(),
        role: registration.role,
        verification_status: VerificationStatus::Unverified,
    })
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn register(&self, registration: NewRegistration) -> Result<Session, AuthServiceError> {
        let mut user = validate_registration(&registration)?;

        user.password_hash = hash_password(&registration.password)?;

        let mut tx = self.db.begin().await?;

        let created = self.users.create_user(&mut tx, &user).await?;

        tx.commit().await?;

        info!(user = %created.uuid, role = %created.role, "user registered");

        self.session_for(created)
    }

    async fn login(&self, email: &str, password: &str) -> Result<Session, AuthServiceError> {
        let mut tx = self.db.begin().await?;

        let Some(credentials) = self.users.find_credentials(&mut tx, email).await? else {
            debug!("login for unknown email");

            return Err(AuthServiceError::InvalidCredentials);
        };

        verify_password(password, &credentials.password_hash)?;

        if credentials.suspended_at.is_some() {
            return Err(AuthServiceError::Suspended);
        }

        let user = self.users.get_user(&mut tx, credentials.uuid).await?;

        tx.commit().await?;

        self.session_for(user)
    }

    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Principal, AuthServiceError> {
        let claims = self.keys.verify(bearer_token, Timestamp::now())?;

        let mut tx = self.db.begin().await?;

        let user = self
            .users
            .find_user(&mut tx, UserUuid::from_uuid(claims.sub))
            .await?
            .ok_or(AuthServiceError::Unauthenticated)?;

        tx.commit().await?;

        if user.is_suspended() {
            return Err(AuthServiceError::Suspended);
        }

        Ok(Principal {
            user_uuid: user.uuid,
            role: user.role,
        })
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create a customer or partner account and sign a session for it.
    async fn register(&self, registration: NewRegistration) -> Result<Session, AuthServiceError>;

    /// Exchange email and password for a session.
    async fn login(&self, email: &str, password: &str) -> Result<Session, AuthServiceError>;

    /// Resolve a bearer token to the current caller. The role is read from
    /// storage, not from the token.
    async fn authenticate_bearer(&self, bearer_token: &str)
    -> Result<Principal, AuthServiceError>;
}
