//! Customer read models.
//!
//! # Responsibility
//! - Define the customer record as loaded with its joined metadata.
//! - Define the detail record that carries the aggregated address lists.
//!
//! # Invariants
//! - Records are read-only snapshots; nothing here writes back to storage.

use super::address::{
    AddressLines, AlternativeShippingAddress, BillingContact, OrderAddress, Region, RegionRefs,
    ShippingAddress,
};
use serde::Serialize;

/// Store-assigned customer identifier.
pub type CustomerId = i64;

/// Payment method assigned to a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentMethod {
    pub id: i64,
    pub name: String,
    pub description: String,
}

/// Reference to a shop or language sub-shop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShopRef {
    pub id: i64,
    pub name: String,
}

/// Stored payment data (bank account details) of a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentData {
    pub id: i64,
    pub payment_mean_id: i64,
    pub payment_mean_name: String,
    pub account_holder: Option<String>,
    pub bank_name: Option<String>,
    pub iban: Option<String>,
    pub bic: Option<String>,
}

/// Customer default billing address as fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillingAddressRow {
    pub id: i64,
    pub lines: AddressLines,
    pub region: RegionRefs,
    pub contact: BillingContact,
}

impl BillingAddressRow {
    pub fn flatten(self) -> BillingAddress {
        BillingAddress {
            id: self.id,
            lines: self.lines,
            region: self.region.flatten(),
            contact: self.contact,
        }
    }
}

/// Customer default billing address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BillingAddress {
    pub id: i64,
    #[serde(flatten)]
    pub lines: AddressLines,
    #[serde(flatten)]
    pub region: Region,
    #[serde(flatten)]
    pub contact: BillingContact,
}

/// One customer with billing, shipping, payment and shop metadata joined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Customer {
    pub id: CustomerId,
    pub number: Option<String>,
    pub email: String,
    pub active: bool,
    pub salutation: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub customer_group: String,
    pub first_login: Option<String>,
    pub last_login: Option<String>,
    pub payment: Option<PaymentMethod>,
    pub shop: Option<ShopRef>,
    pub language_sub_shop: Option<ShopRef>,
    pub billing: Option<BillingAddress>,
    pub shipping: Option<AlternativeShippingAddress>,
    pub payment_data: Vec<PaymentData>,
}

/// Customer detail for the order-management view.
///
/// Serializes as the customer fields followed by both address lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerDetail {
    #[serde(flatten)]
    pub customer: Customer,
    /// Distinct historical billing addresses.
    pub billing_addresses: Vec<OrderAddress>,
    /// Distinct historical shipping addresses, plus the alternative address
    /// when it matches none of them.
    pub shipping_addresses: Vec<ShippingAddress>,
}
