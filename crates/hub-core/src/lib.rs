//! # hub-core
//!
//! Domain types for Automation Hub: the static product catalog and the
//! user model shared by the server and the payments crate.
//!
//! Products are immutable and defined at deploy time; there is no runtime
//! creation or mutation. Users are created by an external auth system and
//! mutated only once, to attach the payment-platform customer reference.

mod catalog;
mod error;
mod user;

pub use catalog::{BillingInterval, Catalog, Product, ProductKind, format_price, interval_label};
pub use error::{CoreError, Result};
pub use user::{AuthUser, MemoryUserStore, UserStore};
