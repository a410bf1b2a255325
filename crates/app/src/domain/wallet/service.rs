//! Wallet service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::info;

use crate::{
    database::Db,
    domain::{
        pagination::Page,
        users::records::{UserRecord, UserUuid},
        wallet::{
            data::{MAX_NOTE_LEN, Transfer, TransactionFilter},
            errors::WalletServiceError,
            records::{LedgerEntryKind, LedgerEntryRecord, LedgerEntryStatus, TransactionUuid},
            repository::{PgLedgerRepository, Posting},
        },
    },
};

fn normalize_key(key: Option<String>) -> Option<String> {
    key.map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
}

/// What an idempotent request would post, compared against a stored entry.
#[derive(Debug, Clone, Copy)]
struct Replay {
    kind: LedgerEntryKind,
    amount: u64,
    counterparty: Option<UserUuid>,
}

impl Replay {
    const fn own(kind: LedgerEntryKind, amount: u64) -> Self {
        Self {
            kind,
            amount,
            counterparty: None,
        }
    }

    fn matches(&self, entry: &LedgerEntryRecord) -> bool {
        entry.kind == self.kind
            && entry.amount == self.amount
            && entry.counterparty_uuid == self.counterparty
    }
}

#[derive(Debug, Clone)]
pub struct PgWalletService {
    db: Db,
    ledger: PgLedgerRepository,
}

impl PgWalletService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            ledger: PgLedgerRepository::new(),
        }
    }

    /// Previously posted entry for `key`, if the request is a replay.
    ///
    /// A key already spent on a different request (another kind, amount or
    /// counterparty) is a [`WalletServiceError::DuplicateRequest`].
    async fn replayed(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        key: Option<&str>,
        request: Replay,
    ) -> Result<Option<LedgerEntryRecord>, WalletServiceError> {
        let Some(key) = key else {
            return Ok(None);
        };

        match self.ledger.find_by_idempotency_key(tx, user, key).await? {
            Some(existing) if request.matches(&existing) => Ok(Some(existing)),
            Some(_) => Err(WalletServiceError::DuplicateRequest),
            None => Ok(None),
        }
    }

    /// Lock both wallets of a transfer in UUID order.
    async fn lock_pair(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        sender: UserUuid,
        recipient: UserUuid,
    ) -> Result<(UserRecord, UserRecord), WalletServiceError> {
        let lock = |user: UserUuid, error: sqlx::Error| {
            if matches!(error, sqlx::Error::RowNotFound) && user == recipient {
                WalletServiceError::RecipientNotFound
            } else {
                WalletServiceError::from(error)
            }
        };

        let (first, second) = if sender < recipient {
            (sender, recipient)
        } else {
            (recipient, sender)
        };

        let first_wallet = self
            .ledger
            .lock_wallet(tx, first)
            .await
            .map_err(|error| lock(first, error))?;

        let second_wallet = self
            .ledger
            .lock_wallet(tx, second)
            .await
            .map_err(|error| lock(second, error))?;

        if first == sender {
            Ok((first_wallet, second_wallet))
        } else {
            Ok((second_wallet, first_wallet))
        }
    }
}

#[async_trait]
impl WalletService for PgWalletService {
    async fn balance(&self, user: UserUuid) -> Result<u64, WalletServiceError> {
        let mut tx = self.db.begin().await?;

        let wallet = self.ledger.lock_wallet(&mut tx, user).await?;

        tx.commit().await?;

        Ok(wallet.wallet_balance)
    }

    async fn list_transactions(
        &self,
        user: UserUuid,
        page: Page,
    ) -> Result<Vec<LedgerEntryRecord>, WalletServiceError> {
        let mut tx = self.db.begin().await?;

        let entries = self.ledger.list_entries(&mut tx, user, page).await?;

        tx.commit().await?;

        Ok(entries)
    }

    async fn list_all_transactions(
        &self,
        filter: TransactionFilter,
    ) -> Result<Vec<LedgerEntryRecord>, WalletServiceError> {
        let mut tx = self.db.begin().await?;

        let entries = self.ledger.list_all(&mut tx, &filter).await?;

        tx.commit().await?;

        Ok(entries)
    }

    async fn get_transaction(
        &self,
        transaction: TransactionUuid,
    ) -> Result<LedgerEntryRecord, WalletServiceError> {
        let mut tx = self.db.begin().await?;

        let entry = self.ledger.get_entry(&mut tx, transaction).await?;

        tx.commit().await?;

        Ok(entry)
    }

    async fn deposit(
        &self,
        user: UserUuid,
        amount: u64,
        idempotency_key: Option<String>,
    ) -> Result<LedgerEntryRecord, WalletServiceError> {
        if amount == 0 {
            return Err(WalletServiceError::InvalidAmount);
        }

        let key = normalize_key(idempotency_key);

        let mut tx = self.db.begin().await?;

        let mut wallet = self.ledger.lock_wallet(&mut tx, user).await?;

        let replay = Replay::own(LedgerEntryKind::Deposit, amount);

        if let Some(existing) = self.replayed(&mut tx, user, key.as_deref(), replay).await? {
            tx.commit().await?;

            return Ok(existing);
        }

        let entry = self
            .ledger
            .post(
                &mut tx,
                &mut wallet,
                Posting::completed(LedgerEntryKind::Deposit, amount, "Wallet deposit")
                    .with_idempotency_key(key.as_deref()),
            )
            .await?;

        tx.commit().await?;

        info!(user = %user, transaction = %entry.uuid, amount, "deposit posted");

        Ok(entry)
    }

    async fn request_withdrawal(
        &self,
        user: UserUuid,
        amount: u64,
        idempotency_key: Option<String>,
    ) -> Result<LedgerEntryRecord, WalletServiceError> {
        if amount == 0 {
            return Err(WalletServiceError::InvalidAmount);
        }

        let key = normalize_key(idempotency_key);

        let mut tx = self.db.begin().await?;

        let mut wallet = self.ledger.lock_wallet(&mut tx, user).await?;

        if !wallet.may_transact() {
            return Err(WalletServiceError::NotVerified);
        }

        let replay = Replay::own(LedgerEntryKind::Withdrawal, amount);

        if let Some(existing) = self.replayed(&mut tx, user, key.as_deref(), replay).await? {
            tx.commit().await?;

            return Ok(existing);
        }

        let entry = self
            .ledger
            .post(
                &mut tx,
                &mut wallet,
                Posting::completed(LedgerEntryKind::Withdrawal, amount, "Withdrawal request")
                    .pending()
                    .with_idempotency_key(key.as_deref()),
            )
            .await?;

        tx.commit().await?;

        info!(user = %user, transaction = %entry.uuid, amount, "withdrawal requested");

        Ok(entry)
    }

    async fn process_withdrawal(
        &self,
        transaction: TransactionUuid,
        approve: bool,
    ) -> Result<LedgerEntryRecord, WalletServiceError> {
        let mut tx = self.db.begin().await?;

        let withdrawal = self.ledger.lock_entry(&mut tx, transaction).await?;

        if withdrawal.kind != LedgerEntryKind::Withdrawal
            || withdrawal.status != LedgerEntryStatus::Pending
        {
            return Err(WalletServiceError::InvalidStatus);
        }

        let processed = if approve {
            self.ledger
                .set_entry_status(&mut tx, transaction, LedgerEntryStatus::Completed)
                .await?
        } else {
            let mut wallet = self.ledger.lock_wallet(&mut tx, withdrawal.user_uuid).await?;

            self.ledger
                .post(
                    &mut tx,
                    &mut wallet,
                    Posting::completed(
                        LedgerEntryKind::Refund,
                        withdrawal.amount,
                        "Withdrawal rejected",
                    )
                    .with_reference(transaction.into_uuid()),
                )
                .await?;

            self.ledger
                .set_entry_status(&mut tx, transaction, LedgerEntryStatus::Failed)
                .await?
        };

        tx.commit().await?;

        info!(transaction = %transaction, approve, "withdrawal processed");

        Ok(processed)
    }

    async fn transfer_funds(
        &self,
        sender: UserUuid,
        transfer: Transfer,
    ) -> Result<LedgerEntryRecord, WalletServiceError> {
        if transfer.amount == 0 {
            return Err(WalletServiceError::InvalidAmount);
        }

        if transfer.recipient == sender {
            return Err(WalletServiceError::SelfTransfer);
        }

        let note = transfer
            .note
            .as_deref()
            .map(str::trim)
            .filter(|note| !note.is_empty())
            .unwrap_or("Wallet transfer");

        if note.chars().count() > MAX_NOTE_LEN {
            return Err(WalletServiceError::InvalidNote);
        }

        let key = normalize_key(transfer.idempotency_key.clone());

        let mut tx = self.db.begin().await?;

        let (mut from, mut to) = self.lock_pair(&mut tx, sender, transfer.recipient).await?;

        if !from.may_transact() {
            return Err(WalletServiceError::NotVerified);
        }

        let replay = Replay {
            kind: LedgerEntryKind::TransferOut,
            amount: transfer.amount,
            counterparty: Some(transfer.recipient),
        };

        if let Some(existing) = self.replayed(&mut tx, sender, key.as_deref(), replay).await? {
            tx.commit().await?;

            return Ok(existing);
        }

        let reference = TransactionUuid::new().into_uuid();

        let sent = self
            .ledger
            .post(
                &mut tx,
                &mut from,
                Posting::completed(LedgerEntryKind::TransferOut, transfer.amount, note)
                    .with_reference(reference)
                    .with_counterparty(to.uuid)
                    .with_idempotency_key(key.as_deref()),
            )
            .await?;

        self.ledger
            .post(
                &mut tx,
                &mut to,
                Posting::completed(LedgerEntryKind::TransferIn, transfer.amount, note)
                    .with_reference(reference)
                    .with_counterparty(from.uuid),
            )
            .await?;

        tx.commit().await?;

        info!(
            sender = %sender,
            recipient = %transfer.recipient,
            amount = transfer.amount,
            "funds transferred"
        );

        Ok(sent)
    }
}

#[automock]
#[async_trait]
pub trait WalletService: Send + Sync {
    async fn balance(&self, user: UserUuid) -> Result<u64, WalletServiceError>;

    /// A user's own ledger, newest first.
    async fn list_transactions(
        &self,
        user: UserUuid,
        page: Page,
    ) -> Result<Vec<LedgerEntryRecord>, WalletServiceError>;

    async fn list_all_transactions(
        &self,
        filter: TransactionFilter,
    ) -> Result<Vec<LedgerEntryRecord>, WalletServiceError>;

    async fn get_transaction(
        &self,
        transaction: TransactionUuid,
    ) -> Result<LedgerEntryRecord, WalletServiceError>;

    /// Credit the wallet. Replaying an idempotency key returns the original
    /// entry without moving money.
    async fn deposit(
        &self,
        user: UserUuid,
        amount: u64,
        idempotency_key: Option<String>,
    ) -> Result<LedgerEntryRecord, WalletServiceError>;

    /// Debit the wallet now and leave a pending withdrawal for review.
    async fn request_withdrawal(
        &self,
        user: UserUuid,
        amount: u64,
        idempotency_key: Option<String>,
    ) -> Result<LedgerEntryRecord, WalletServiceError>;

    /// Approve or reject a pending withdrawal. Rejection credits the amount
    /// back with a refund entry.
    async fn process_withdrawal(
        &self,
        transaction: TransactionUuid,
        approve: bool,
    ) -> Result<LedgerEntryRecord, WalletServiceError>;

    /// Move funds between two wallets, returning the sender's entry.
    async fn transfer_funds(
        &self,
        sender: UserUuid,
        transfer: Transfer,
    ) -> Result<LedgerEntryRecord, WalletServiceError>;
}
