//! Command implementations.

pub mod cart;
pub mod catalog;
pub mod shipping;

pub use cart::CartArgs;
pub use catalog::{CollectionArgs, ProductArgs, SearchArgs};
pub use shipping::ShippingArgs;
