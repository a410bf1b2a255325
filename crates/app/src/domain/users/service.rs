//! Users service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::users::{
        data::{NewUser, ProfileUpdate, UserFilter},
        errors::UsersServiceError,
        records::{Role, UserRecord, UserUuid, VerificationStatus},
        repository::PgUsersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgUsersService {
    db: Db,
    repository: PgUsersRepository,
}

impl PgUsersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgUsersRepository::new(),
        }
    }
}

#[async_trait]
impl UsersService for PgUsersService {
    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.repository.get_user(&mut tx, user).await?;

        tx.commit().await?;

        Ok(record)
    }

    async fn create_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError> {
        if user.name.trim().is_empty() || !user.email.contains('@') {
            return Err(UsersServiceError::InvalidData);
        }

        let mut tx = self.db.begin().await?;

        let created = self.repository.create_user(&mut tx, &user).await?;

        tx.commit().await?;

        info!(user = %created.uuid, role = %created.role, "user created");

        Ok(created)
    }

    async fn update_profile(
        &self,
        user: UserUuid,
        update: ProfileUpdate,
    ) -> Result<UserRecord, UsersServiceError> {
        let update = ProfileUpdate {
            name: update.name.map(|name| name.trim().to_string()),
            ..update
        };

        if update.name.as_deref().is_some_and(str::is_empty) {
            return Err(UsersServiceError::InvalidData);
        }

        let mut tx = self.db.begin().await?;

        let updated = self.repository.update_profile(&mut tx, user, &update).await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn request_verification(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let Some(updated) = self.repository.request_verification(&mut tx, user).await? else {
            // Distinguish a missing user from one in the wrong state.
            self.repository.get_user(&mut tx, user).await?;

            return Err(UsersServiceError::InvalidStatus);
        };

        tx.commit().await?;

        info!(user = %user, "verification requested");

        Ok(updated)
    }

    async fn list_users(&self, filter: UserFilter) -> Result<Vec<UserRecord>, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let users = self.repository.list_users(&mut tx, filter).await?;

        tx.commit().await?;

        Ok(users)
    }

    async fn set_verification_status(
        &self,
        user: UserUuid,
        status: VerificationStatus,
    ) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .set_verification_status(&mut tx, user, status)
            .await?;

        tx.commit().await?;

        info!(user = %user, status = %status, "verification status changed");

        Ok(updated)
    }

    async fn set_suspended(
        &self,
        user: UserUuid,
        suspended: bool,
    ) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let Some(updated) = self.repository.set_suspended(&mut tx, user, suspended).await? else {
            self.repository.get_user(&mut tx, user).await?;

            return Err(UsersServiceError::Forbidden);
        };

        tx.commit().await?;

        info!(user = %user, suspended, "suspension changed");

        Ok(updated)
    }

    async fn set_role(&self, email: &str, role: Role) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self.repository.set_role_by_email(&mut tx, email, role).await?;

        tx.commit().await?;

        info!(user = %updated.uuid, role = %role, "role changed");

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Retrieve a single user.
    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError>;

    /// Insert a user with an already-hashed password. Used by the operator CLI.
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError>;

    /// Update the caller's own profile fields.
    async fn update_profile(
        &self,
        user: UserUuid,
        update: ProfileUpdate,
    ) -> Result<UserRecord, UsersServiceError>;

    /// Ask an admin to verify this account.
    async fn request_verification(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError>;

    /// List users, newest first.
    async fn list_users(&self, filter: UserFilter) -> Result<Vec<UserRecord>, UsersServiceError>;

    async fn set_verification_status(
        &self,
        user: UserUuid,
        status: VerificationStatus,
    ) -> Result<UserRecord, UsersServiceError>;

    /// Suspend or reinstate a user. Admin accounts cannot be suspended.
    async fn set_suspended(
        &self,
        user: UserUuid,
        suspended: bool,
    ) -> Result<UserRecord, UsersServiceError>;

    /// Change the role of the user with the given email.
    async fn set_role(&self, email: &str, role: Role) -> Result<UserRecord, UsersServiceError>;
}
