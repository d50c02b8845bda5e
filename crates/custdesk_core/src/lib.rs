//! Customer detail and picker data access for the order-management UI.
//!
//! Loads a customer with its distinct historical billing/shipping addresses,
//! merges the customer's alternative shipping address into the shipping list,
//! and searches customers for the type-ahead picker.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::address::{
    dedup_fields, AddressField, AddressKind, AlternativeShippingAddress, OrderAddress,
    ShippingAddress,
};
pub use model::customer::{Customer, CustomerDetail, CustomerId};
pub use repo::customer_repo::{
    CustomerRepository, RepoError, RepoResult, SqliteCustomerRepository,
};
pub use search::customer_search::{CustomerSearchHit, SearchFilter};
pub use service::address_merge::{
    address_difference, is_same_address, merge_alternative_shipping,
};
pub use service::customer_service::CustomerService;

/// Minimal health-check API for CLI smoke checks.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
