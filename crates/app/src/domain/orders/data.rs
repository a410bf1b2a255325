//! Order Data

use crate::domain::{
    orders::{records::ShippingAddress, status::OrderItemStatus},
    pagination::Page,
};

/// Checkout request: the cart contents become the order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkout {
    pub shipping_address: ShippingAddress,
}

/// Filter for a partner's incoming order items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PartnerItemFilter {
    pub status: Option<OrderItemStatus>,
    pub page: Page,
}
