//! Order Handlers

pub(crate) mod all;
pub(crate) mod create;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod partner_items;
pub(crate) mod update_status;

#[cfg(test)]
mod tests {
    use jiff::{Timestamp, civil::date};

    use stylus_app::domain::{
        orders::{
            records::{Order, OrderItemRecord, OrderItemUuid, OrderRecord, OrderUuid, ShippingAddress},
            status::OrderItemStatus,
        },
        products::records::{ItemKind, ProductUuid},
        rentals::RentalWindow,
    };

    use crate::test_helpers::{CUSTOMER_UUID, PARTNER_UUID};

    pub(super) fn make_item(order: OrderUuid, status: OrderItemStatus) -> OrderItemRecord {
        OrderItemRecord {
            uuid: OrderItemUuid::new(),
            order_uuid: order,
            product_uuid: ProductUuid::new(),
            partner_uuid: PARTNER_UUID,
            kind: ItemKind::Rental,
            size: Some("M".to_string()),
            rental_window: RentalWindow::new(date(2030, 6, 1), date(2030, 6, 3)).ok(),
            rental_days: Some(3),
            price: 4_500,
            status,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    /// A single-item order placed by the customer.
    pub(super) fn make_order(uuid: OrderUuid) -> Order {
        Order {
            order: OrderRecord {
                uuid,
                user_uuid: CUSTOMER_UUID,
                total: 4_500,
                shipping_address: ShippingAddress {
                    line1: "1 Bond Street".to_string(),
                    line2: None,
                    city: "London".to_string(),
                    postal_code: "W1S 1AA".to_string(),
                    country: "GB".to_string(),
                },
                created_at: Timestamp::UNIX_EPOCH,
                updated_at: Timestamp::UNIX_EPOCH,
            },
            items: vec![make_item(uuid, OrderItemStatus::PendingApproval)],
        }
    }
}
