//! Ledger Repository
//!
//! Every balance change goes through [`PgLedgerRepository::post`], which
//! writes the new balance and its ledger entry inside the caller's
//! transaction. Callers must hold the wallet lock from
//! [`PgLedgerRepository::lock_wallet`] first.

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{
    columns::{amount_to_i64, try_get_amount, try_get_enum, try_get_timestamp},
    pagination::Page,
    users::records::{UserRecord, UserUuid},
    wallet::{
        data::TransactionFilter,
        records::{LedgerEntryKind, LedgerEntryRecord, LedgerEntryStatus, TransactionUuid},
    },
};

const LOCK_WALLET_SQL: &str = include_str!("sql/lock_wallet.sql");
const SET_BALANCE_SQL: &str = include_str!("sql/set_balance.sql");
const INSERT_ENTRY_SQL: &str = include_str!("sql/insert_entry.sql");
const FIND_BY_IDEMPOTENCY_KEY_SQL: &str = include_str!("sql/find_by_idempotency_key.sql");
const GET_ENTRY_SQL: &str = include_str!("sql/get_entry.sql");
const LOCK_ENTRY_SQL: &str = include_str!("sql/lock_entry.sql");
const SET_ENTRY_STATUS_SQL: &str = include_str!("sql/set_entry_status.sql");
const LIST_ENTRIES_SQL: &str = include_str!("sql/list_entries.sql");

/// A single balance movement to be written to the ledger.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Posting<'a> {
    pub kind: LedgerEntryKind,
    pub amount: u64,
    pub status: LedgerEntryStatus,
    pub reference_uuid: Option<Uuid>,
    pub counterparty_uuid: Option<UserUuid>,
    pub description: &'a str,
    pub idempotency_key: Option<&'a str>,
}

impl<'a> Posting<'a> {
    pub(crate) fn completed(kind: LedgerEntryKind, amount: u64, description: &'a str) -> Self {
        Self {
            kind,
            amount,
            status: LedgerEntryStatus::Completed,
            reference_uuid: None,
            counterparty_uuid: None,
            description,
            idempotency_key: None,
        }
    }

    pub(crate) fn with_reference(mut self, reference: Uuid) -> Self {
        self.reference_uuid = Some(reference);
        self
    }

    pub(crate) fn with_counterparty(mut self, counterparty: UserUuid) -> Self {
        self.counterparty_uuid = Some(counterparty);
        self
    }

    pub(crate) fn with_idempotency_key(mut self, key: Option<&'a str>) -> Self {
        self.idempotency_key = key;
        self
    }

    pub(crate) fn pending(mut self) -> Self {
        self.status = LedgerEntryStatus::Pending;
        self
    }
}

#[derive(Debug, Error)]
pub(crate) enum PostingError {
    #[error("insufficient wallet balance")]
    InsufficientFunds,

    #[error("wallet balance would overflow")]
    BalanceOverflow,

    #[error(transparent)]
    Sql(#[from] sqlx::Error),
}

/// Balance after applying `kind` for `amount` to `balance`.
pub(crate) fn next_balance(
    balance: u64,
    kind: LedgerEntryKind,
    amount: u64,
) -> Result<u64, PostingError> {
    let next = if kind.is_credit() {
        balance
            .checked_add(amount)
            .ok_or(PostingError::BalanceOverflow)?
    } else {
        balance
            .checked_sub(amount)
            .ok_or(PostingError::InsufficientFunds)?
    };

    if i64::try_from(next).is_err() {
        return Err(PostingError::BalanceOverflow);
    }

    Ok(next)
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgLedgerRepository;

impl PgLedgerRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Fetch the user owning a wallet and hold its row lock until the
    /// transaction ends.
    pub(crate) async fn lock_wallet(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(LOCK_WALLET_SQL)
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Apply `posting` to a locked wallet, updating `wallet` in place.
    pub(crate) async fn post(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        wallet: &mut UserRecord,
        posting: Posting<'_>,
    ) -> Result<LedgerEntryRecord, PostingError> {
        let balance = next_balance(wallet.wallet_balance, posting.kind, posting.amount)?;

        query(SET_BALANCE_SQL)
            .bind(wallet.uuid.into_uuid())
            .bind(amount_to_i64("wallet_balance", balance)?)
            .execute(&mut **tx)
            .await?;

        let entry = query_as::<Postgres, LedgerEntryRecord>(INSERT_ENTRY_SQL)
            .bind(TransactionUuid::new().into_uuid())
            .bind(wallet.uuid.into_uuid())
            .bind(posting.kind.as_str())
            .bind(amount_to_i64("amount", posting.amount)?)
            .bind(posting.status.as_str())
            .bind(amount_to_i64("balance_after", balance)?)
            .bind(posting.reference_uuid)
            .bind(posting.counterparty_uuid.map(UserUuid::into_uuid))
            .bind(posting.description)
            .bind(posting.idempotency_key)
            .fetch_one(&mut **tx)
            .await?;

        wallet.wallet_balance = balance;

        Ok(entry)
    }

    pub(crate) async fn find_by_idempotency_key(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        key: &str,
    ) -> Result<Option<LedgerEntryRecord>, sqlx::Error> {
        query_as::<Postgres, LedgerEntryRecord>(FIND_BY_IDEMPOTENCY_KEY_SQL)
            .bind(user.into_uuid())
            .bind(key)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn get_entry(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        entry: TransactionUuid,
    ) -> Result<LedgerEntryRecord, sqlx::Error> {
        query_as::<Postgres, LedgerEntryRecord>(GET_ENTRY_SQL)
            .bind(entry.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn lock_entry(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        entry: TransactionUuid,
    ) -> Result<LedgerEntryRecord, sqlx::Error> {
        query_as::<Postgres, LedgerEntryRecord>(LOCK_ENTRY_SQL)
            .bind(entry.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn set_entry_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        entry: TransactionUuid,
        status: LedgerEntryStatus,
    ) -> Result<LedgerEntryRecord, sqlx::Error> {
        query_as::<Postgres, LedgerEntryRecord>(SET_ENTRY_STATUS_SQL)
            .bind(entry.into_uuid())
            .bind(status.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_entries(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        page: Page,
    ) -> Result<Vec<LedgerEntryRecord>, sqlx::Error> {
        self.list_all(
            tx,
            &TransactionFilter {
                user: Some(user),
                page,
                ..TransactionFilter::default()
            },
        )
        .await
    }

    pub(crate) async fn list_all(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: &TransactionFilter,
    ) -> Result<Vec<LedgerEntryRecord>, sqlx::Error> {
        query_as::<Postgres, LedgerEntryRecord>(LIST_ENTRIES_SQL)
            .bind(filter.user.map(UserUuid::into_uuid))
            .bind(filter.kind.map(LedgerEntryKind::as_str))
            .bind(filter.status.map(LedgerEntryStatus::as_str))
            .bind(filter.page.limit_i64())
            .bind(filter.page.offset_i64())
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for LedgerEntryRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: TransactionUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            kind: try_get_enum(row, "kind")?,
            amount: try_get_amount(row, "amount")?,
            status: try_get_enum(row, "status")?,
            balance_after: try_get_amount(row, "balance_after")?,
            reference_uuid: row.try_get("reference_uuid")?,
            counterparty_uuid: row
                .try_get::<Option<Uuid>, _>("counterparty_uuid")?
                .map(UserUuid::from_uuid),
            description: row.try_get("description")?,
            idempotency_key: row.try_get("idempotency_key")?,
            created_at: try_get_timestamp(row, "created_at")?,
            updated_at: try_get_timestamp(row, "updated_at")?,
        })
    }
}
