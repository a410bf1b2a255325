//! Users Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::{
    columns::{try_get_amount, try_get_enum, try_get_optional_timestamp, try_get_timestamp},
    users::{
        data::{NewUser, ProfileUpdate, UserFilter},
        records::{Role, UserCredentials, UserRecord, UserUuid, VerificationStatus},
    },
};

const CREATE_USER_SQL: &str = include_str!("sql/create_user.sql");
const FIND_CREDENTIALS_SQL: &str = include_str!("sql/find_credentials.sql");
const GET_USER_SQL: &str = include_str!("sql/get_user.sql");
const UPDATE_PROFILE_SQL: &str = include_str!("sql/update_profile.sql");
const REQUEST_VERIFICATION_SQL: &str = include_str!("sql/request_verification.sql");
const SET_VERIFICATION_STATUS_SQL: &str = include_str!("sql/set_verification_status.sql");
const SET_SUSPENDED_SQL: &str = include_str!("sql/set_suspended.sql");
const SET_ROLE_BY_EMAIL_SQL: &str = include_str!("sql/set_role_by_email.sql");
const LIST_USERS_SQL: &str = include_str!("sql/list_users.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgUsersRepository;

impl PgUsersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: &NewUser,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(CREATE_USER_SQL)
            .bind(user.uuid.into_uuid())
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(&user.name)
            .bind(user.phone.as_deref())
            .bind(user.role.as_str())
            .bind(user.verification_status.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_credentials(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        email: &str,
    ) -> Result<Option<UserCredentials>, sqlx::Error> {
        query_as::<Postgres, UserCredentials>(FIND_CREDENTIALS_SQL)
            .bind(email)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn get_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(GET_USER_SQL)
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Option<UserRecord>, sqlx::Error> {
        query_as::<Postgres, UserRecord>(GET_USER_SQL)
            .bind(user.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn update_profile(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        update: &ProfileUpdate,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(UPDATE_PROFILE_SQL)
            .bind(user.into_uuid())
            .bind(update.name.as_deref())
            .bind(update.phone.as_deref())
            .bind(update.address.as_deref())
            .bind(update.bio.as_deref())
            .fetch_one(&mut **tx)
            .await
    }

    /// Moves an unverified or rejected user to pending. Returns `None` when
    /// the user is in any other state.
    pub(crate) async fn request_verification(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Option<UserRecord>, sqlx::Error> {
        query_as::<Postgres, UserRecord>(REQUEST_VERIFICATION_SQL)
            .bind(user.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn set_verification_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        status: VerificationStatus,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(SET_VERIFICATION_STATUS_SQL)
            .bind(user.into_uuid())
            .bind(status.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    /// Returns `None` when the user does not exist or is an admin.
    pub(crate) async fn set_suspended(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        suspended: bool,
    ) -> Result<Option<UserRecord>, sqlx::Error> {
        query_as::<Postgres, UserRecord>(SET_SUSPENDED_SQL)
            .bind(user.into_uuid())
            .bind(suspended)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn set_role_by_email(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        email: &str,
        role: Role,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(SET_ROLE_BY_EMAIL_SQL)
            .bind(email)
            .bind(role.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_users(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: UserFilter,
    ) -> Result<Vec<UserRecord>, sqlx::Error> {
        query_as::<Postgres, UserRecord>(LIST_USERS_SQL)
            .bind(filter.role.map(Role::as_str))
            .bind(filter.verification_status.map(VerificationStatus::as_str))
            .bind(filter.page.limit_i64())
            .bind(filter.page.offset_i64())
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for UserRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: UserUuid::from_uuid(row.try_get("uuid")?),
            email: row.try_get("email")?,
            name: row.try_get("name")?,
            phone: row.try_get("phone")?,
            address: row.try_get("address")?,
            bio: row.try_get("bio")?,
            role: try_get_enum(row, "role")?,
            verification_status: try_get_enum(row, "verification_status")?,
            wallet_balance: try_get_amount(row, "wallet_balance")?,
            suspended_at: try_get_optional_timestamp(row, "suspended_at")?,
            created_at: try_get_timestamp(row, "created_at")?,
            updated_at: try_get_timestamp(row, "updated_at")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for UserCredentials {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: UserUuid::from_uuid(row.try_get("uuid")?),
            role: try_get_enum(row, "role")?,
            password_hash: row.try_get("password_hash")?,
            suspended_at: try_get_optional_timestamp(row, "suspended_at")?,
        })
    }
}
