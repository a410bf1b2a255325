//! Order Records

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{
        orders::status::{OrderItemStatus, OrderStatus},
        products::records::{ItemKind, ProductUuid},
        rentals::RentalWindow,
        users::records::UserUuid,
    },
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Order Item UUID
pub type OrderItemUuid = TypedUuid<OrderItemRecord>;

/// Where an order ships to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub line1: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,

    pub city: String,
    pub postal_code: String,
    pub country: String,
}

impl ShippingAddress {
    /// Name of the first required field left blank, if any.
    #[must_use]
    pub fn missing_field(&self) -> Option<&'static str> {
        [
            ("line1", &self.line1),
            ("city", &self.city),
            ("postal_code", &self.postal_code),
            ("country", &self.country),
        ]
        .into_iter()
        .find_map(|(field, value)| value.trim().is_empty().then_some(field))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    pub user_uuid: UserUuid,
    pub total: u64,
    pub shipping_address: ShippingAddress,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItemRecord {
    pub uuid: OrderItemUuid,
    pub order_uuid: OrderUuid,
    pub product_uuid: ProductUuid,
    pub partner_uuid: UserUuid,
    pub kind: ItemKind,
    pub size: Option<String>,
    pub rental_window: Option<RentalWindow>,
    pub rental_days: Option<u32>,
    pub price: u64,
    pub status: OrderItemStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An order together with its items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub order: OrderRecord,
    pub items: Vec<OrderItemRecord>,
}

impl Order {
    #[must_use]
    pub fn status(&self) -> OrderStatus {
        OrderStatus::derive(self.items.iter().map(|item| item.status))
    }

    /// Whether `user` is the partner behind any item of this order.
    #[must_use]
    pub fn involves_partner(&self, user: UserUuid) -> bool {
        self.items.iter().any(|item| item.partner_uuid == user)
    }

    /// This order as `partner` sees it: only their own lines, totalled.
    #[must_use]
    pub fn for_partner(mut self, partner: UserUuid) -> Self {
        self.items.retain(|item| item.partner_uuid == partner);
        self.order.total = self.items.iter().map(|item| item.price).sum();

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(order: OrderUuid, partner: UserUuid, price: u64) -> OrderItemRecord {
        OrderItemRecord {
            uuid: OrderItemUuid::new(),
            order_uuid: order,
            product_uuid: ProductUuid::new(),
            partner_uuid: partner,
            kind: ItemKind::Purchase,
            size: None,
            rental_window: None,
            rental_days: None,
            price,
            status: OrderItemStatus::PendingApproval,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn partner_view_keeps_only_their_lines() {
        let uuid = OrderUuid::new();
        let mine = UserUuid::new();
        let theirs = UserUuid::new();

        let order = Order {
            order: OrderRecord {
                uuid,
                user_uuid: UserUuid::new(),
                total: 7_000,
                shipping_address: ShippingAddress::default(),
                created_at: Timestamp::UNIX_EPOCH,
                updated_at: Timestamp::UNIX_EPOCH,
            },
            items: vec![
                line(uuid, mine, 2_000),
                line(uuid, theirs, 4_000),
                line(uuid, mine, 1_000),
            ],
        };

        let view = order.for_partner(mine);

        assert_eq!(view.items.len(), 2);
        assert!(view.items.iter().all(|item| item.partner_uuid == mine));
        assert_eq!(view.order.total, 3_000);
    }

    #[test]
    fn blank_address_fields_are_reported() {
        let address = ShippingAddress {
            line1: "1 Bond Street".to_string(),
            line2: None,
            city: " ".to_string(),
            postal_code: "W1".to_string(),
            country: "GB".to_string(),
        };

        assert_eq!(address.missing_field(), Some("city"));
    }

    #[test]
    fn address_round_trips_through_json() -> testresult::TestResult {
        let json = r#"{"line1":"1 Bond Street","city":"London","postal_code":"W1","country":"GB"}"#;

        let address: ShippingAddress = serde_json::from_str(json)?;

        assert_eq!(address.line2, None);
        assert_eq!(address.missing_field(), None);
        assert_eq!(serde_json::to_string(&address)?, json);

        Ok(())
    }
}
