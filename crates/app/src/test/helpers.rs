//! Test Helpers

use std::sync::atomic::{AtomicU32, Ordering};

use jiff::ToSpan;

use crate::domain::{
    carts::{data::NewCartItem, records::CartItemUuid},
    products::{
        data::NewProduct,
        records::{ItemKind, ProductUuid},
    },
    rentals::{RentalWindow, today_utc},
    users::{
        data::NewUser,
        records::{Role, UserUuid, VerificationStatus},
    },
};

static NEXT_USER: AtomicU32 = AtomicU32::new(0);

/// A user with a unique email. The password hash is a placeholder.
pub(crate) fn new_user(role: Role, verification_status: VerificationStatus) -> NewUser {
    let n = NEXT_USER.fetch_add(1, Ordering::Relaxed);

    NewUser {
        uuid: UserUuid::new(),
        email: format!("{role}-{n}@example.com"),
        password_hash: "not-a-real-hash".to_string(),
        name: format!("Test {role} {n}"),
        phone: None,
        role,
        verification_status,
    }
}

/// Rental-only listing at 1,500 per day.
pub(crate) fn new_product(name: &str) -> NewProduct {
    NewProduct {
        uuid: ProductUuid::new(),
        name: name.to_string(),
        description: format!("{name} in excellent condition"),
        brand: "Maison Test".to_string(),
        category: "dresses".to_string(),
        sizes: vec!["S".to_string(), "M".to_string()],
        images: Vec::new(),
        rental_price_per_day: Some(1_500),
        sale_price: 60_000,
        is_for_rent: true,
        is_for_sale: false,
    }
}

pub(crate) fn rental_item(product: ProductUuid, window: RentalWindow) -> NewCartItem {
    NewCartItem {
        uuid: CartItemUuid::new(),
        product_uuid: product,
        kind: ItemKind::Rental,
        size: None,
        rental_window: Some(window),
    }
}

pub(crate) fn purchase_item(product: ProductUuid) -> NewCartItem {
    NewCartItem {
        uuid: CartItemUuid::new(),
        product_uuid: product,
        kind: ItemKind::Purchase,
        size: None,
        rental_window: None,
    }
}

/// A window of `days` days starting `days_ahead` days from today.
pub(crate) fn window_from_today(days_ahead: i64, days: i64) -> RentalWindow {
    let start = today_utc()
        .checked_add(days_ahead.days())
        .expect("start date in range");

    let end = start
        .checked_add((days - 1).days())
        .expect("end date in range");

    RentalWindow::new(start, end).expect("window should be valid")
}
