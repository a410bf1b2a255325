//! Order item lifecycle.
//!
//! ```text
//! pending_approval ──► accepted ──► shipped ──► delivered ──► returned ──► completed
//!        │                                          │
//!        ├──► rejected                              └──► completed (purchases)
//!        └──► cancelled
//! ```

use std::{fmt, str::FromStr};

use thiserror::Error;

use crate::domain::{columns::UnknownVariant, products::records::ItemKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderItemStatus {
    PendingApproval,
    Accepted,
    Rejected,
    Cancelled,
    Shipped,
    Delivered,
    Returned,
    Completed,
}

impl OrderItemStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PendingApproval => "pending_approval",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Cancelled => "cancelled",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Returned => "returned",
            Self::Completed => "completed",
        }
    }

    /// No further transitions leave this status.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Rejected | Self::Cancelled | Self::Completed)
    }

    /// Whether reaching this status hands the buyer's money back.
    #[must_use]
    pub const fn refunds_buyer(self) -> bool {
        matches!(self, Self::Rejected | Self::Cancelled)
    }

    /// Statuses that keep a rental window booked.
    pub const HOLDING_CALENDAR: [Self; 4] = [
        Self::PendingApproval,
        Self::Accepted,
        Self::Shipped,
        Self::Delivered,
    ];
}

impl FromStr for OrderItemStatus {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending_approval" => Ok(Self::PendingApproval),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            "cancelled" => Ok(Self::Cancelled),
            "shipped" => Ok(Self::Shipped),
            "delivered" => Ok(Self::Delivered),
            "returned" => Ok(Self::Returned),
            "completed" => Ok(Self::Completed),
            _ => Err(UnknownVariant::new("order item status", value)),
        }
    }
}

impl fmt::Display for OrderItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the acting user relates to an order item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Party {
    Buyer,
    Partner,
    Admin,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TransitionError {
    #[error("cannot move an item from {from} to {to}")]
    Illegal {
        from: OrderItemStatus,
        to: OrderItemStatus,
    },

    #[error("not allowed to move this item to {0}")]
    NotPermitted(OrderItemStatus),
}

/// Parties that may move an item of `kind` from `from` to `to`, excluding
/// admins. `None` when the move is not part of the lifecycle.
const fn permitted(
    from: OrderItemStatus,
    to: OrderItemStatus,
    kind: ItemKind,
) -> Option<&'static [Party]> {
    use OrderItemStatus::{
        Accepted, Cancelled, Completed, Delivered, PendingApproval, Rejected, Returned, Shipped,
    };

    match (from, to, kind) {
        (PendingApproval, Accepted | Rejected, _) | (Accepted, Shipped, _) => {
            Some(&[Party::Partner])
        }
        (PendingApproval, Cancelled, _) => Some(&[Party::Buyer]),
        (Shipped, Delivered, _)
        | (Delivered, Returned, ItemKind::Rental)
        | (Delivered, Completed, ItemKind::Purchase) => Some(&[Party::Partner, Party::Buyer]),
        (Returned, Completed, ItemKind::Rental) => Some(&[Party::Partner]),
        _ => None,
    }
}

/// Check that `party` may move an item of `kind` from `from` to `to`.
///
/// # Errors
///
/// Returns [`TransitionError::Illegal`] for moves outside the lifecycle and
/// [`TransitionError::NotPermitted`] when `party` may not make the move.
pub fn check_transition(
    from: OrderItemStatus,
    to: OrderItemStatus,
    kind: ItemKind,
    party: Party,
) -> Result<(), TransitionError> {
    let parties = permitted(from, to, kind).ok_or(TransitionError::Illegal { from, to })?;

    if party == Party::Admin || parties.contains(&party) {
        Ok(())
    } else {
        Err(TransitionError::NotPermitted(to))
    }
}

/// Order status derived from its items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl OrderStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Summarise a set of item statuses.
    #[must_use]
    pub fn derive<I>(items: I) -> Self
    where
        I: IntoIterator<Item = OrderItemStatus>,
    {
        let mut any_pending = false;
        let mut all_terminal = true;
        let mut any_completed = false;

        for status in items {
            any_pending |= status == OrderItemStatus::PendingApproval;
            all_terminal &= status.is_terminal();
            any_completed |= status == OrderItemStatus::Completed;
        }

        if any_pending {
            Self::Pending
        } else if all_terminal && any_completed {
            Self::Completed
        } else if all_terminal {
            Self::Cancelled
        } else {
            Self::InProgress
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
