//! Stylus Domain Concerns

pub mod admin;
pub mod carts;
pub(crate) mod columns;
pub mod orders;
pub mod pagination;
pub mod products;
pub mod rentals;
pub mod reviews;
pub mod users;
pub mod wallet;
pub mod wishlist;
