//! Address records for customers and their historical orders.
//!
//! # Responsibility
//! - Define the raw rows produced by address queries (nested lookups).
//! - Define the flattened records handed to callers (display names).
//! - Expose addresses as field maps for field-set equality checks.
//!
//! # Invariants
//! - Raw `*Row` types are only produced by repositories; callers only ever
//!   see the flattened records.
//! - Flattening renames an order address `id` to `order_address_id` so it
//!   cannot be confused with a customer id.
//! - Billing dedup fields are the shipping dedup fields plus phone and vat id.

use super::customer::CustomerId;
use serde::Serialize;
use std::collections::BTreeMap;

/// Which order address table an aggregation reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressKind {
    Billing,
    Shipping,
}

impl AddressKind {
    /// Table holding per-order addresses of this kind.
    pub fn order_table(self) -> &'static str {
        match self {
            Self::Billing => "order_billing_addresses",
            Self::Shipping => "order_shipping_addresses",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Billing => "billing",
            Self::Shipping => "shipping",
        }
    }
}

/// Address column that participates in historical address deduplication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AddressField {
    Company,
    CountryId,
    StateId,
    Salutation,
    ZipCode,
    Department,
    FirstName,
    LastName,
    Street,
    City,
    Phone,
    VatId,
}

impl AddressField {
    /// Column name in the order address tables.
    pub fn column(self) -> &'static str {
        match self {
            Self::Company => "company",
            Self::CountryId => "country_id",
            Self::StateId => "state_id",
            Self::Salutation => "salutation",
            Self::ZipCode => "zip_code",
            Self::Department => "department",
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::Street => "street",
            Self::City => "city",
            Self::Phone => "phone",
            Self::VatId => "vat_id",
        }
    }
}

const COMMON_DEDUP_FIELDS: [AddressField; 10] = [
    AddressField::Company,
    AddressField::CountryId,
    AddressField::StateId,
    AddressField::Salutation,
    AddressField::ZipCode,
    AddressField::Department,
    AddressField::FirstName,
    AddressField::LastName,
    AddressField::Street,
    AddressField::City,
];

const BILLING_DEDUP_FIELDS: [AddressField; 2] = [AddressField::Phone, AddressField::VatId];

/// Returns the fields that must all match for two order addresses of `kind`
/// to collapse into one historical entry.
pub fn dedup_fields(kind: AddressKind) -> Vec<AddressField> {
    let mut fields = COMMON_DEDUP_FIELDS.to_vec();
    if kind == AddressKind::Billing {
        fields.extend(BILLING_DEDUP_FIELDS);
    }
    fields
}

/// Id/name pair of a lookup entity (country, state) as joined by a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lookup {
    pub id: i64,
    pub name: String,
}

/// Name and location lines shared by every address shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AddressLines {
    pub company: Option<String>,
    pub department: Option<String>,
    pub salutation: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub street: Option<String>,
    pub zip_code: Option<String>,
    pub city: Option<String>,
}

/// Country/state references before flattening.
///
/// A lookup is `None` exactly when the address has no country/state key;
/// foreign keys keep joined keys from dangling.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionRefs {
    pub country: Option<Lookup>,
    pub state: Option<Lookup>,
}

impl RegionRefs {
    /// Splits nested lookups into id and display-name fields.
    pub fn flatten(self) -> Region {
        let (country_id, country) = split_lookup(self.country);
        let (state_id, state) = split_lookup(self.state);
        Region {
            country_id,
            country,
            state_id,
            state,
        }
    }
}

fn split_lookup(lookup: Option<Lookup>) -> (Option<i64>, Option<String>) {
    lookup.map_or((None, None), |lookup| (Some(lookup.id), Some(lookup.name)))
}

/// Country/state references flattened to display names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Region {
    pub country_id: Option<i64>,
    pub country: Option<String>,
    pub state_id: Option<i64>,
    pub state: Option<String>,
}

/// Billing-only contact fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BillingContact {
    pub phone: Option<String>,
    pub vat_id: Option<String>,
}

/// One collapsed historical order address as returned by the aggregation
/// query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderAddressRow {
    pub id: i64,
    pub order_id: i64,
    pub customer_id: CustomerId,
    pub lines: AddressLines,
    pub region: RegionRefs,
    /// `Some` for billing rows only.
    pub contact: Option<BillingContact>,
}

impl OrderAddressRow {
    /// Reshapes a raw row into the caller-facing record.
    pub fn flatten(self) -> OrderAddress {
        OrderAddress {
            order_address_id: self.id,
            order_id: self.order_id,
            customer_id: self.customer_id,
            lines: self.lines,
            region: self.region.flatten(),
            contact: self.contact,
        }
    }
}

/// Historical address used on at least one of the customer's orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderAddress {
    pub order_address_id: i64,
    pub order_id: i64,
    pub customer_id: CustomerId,
    #[serde(flatten)]
    pub lines: AddressLines,
    #[serde(flatten)]
    pub region: Region,
    #[serde(flatten)]
    pub contact: Option<BillingContact>,
}

/// The customer's configured alternative shipping address as fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlternativeShippingRow {
    pub id: i64,
    pub customer_id: CustomerId,
    pub lines: AddressLines,
    pub region: RegionRefs,
}

impl AlternativeShippingRow {
    pub fn flatten(self) -> AlternativeShippingAddress {
        AlternativeShippingAddress {
            id: self.id,
            customer_id: self.customer_id,
            lines: self.lines,
            region: self.region.flatten(),
        }
    }
}

/// Current alternative shipping destination, independent of any order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlternativeShippingAddress {
    pub id: i64,
    pub customer_id: CustomerId,
    #[serde(flatten)]
    pub lines: AddressLines,
    #[serde(flatten)]
    pub region: Region,
}

/// Entry of a customer's merged shipping address list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ShippingAddress {
    Order(OrderAddress),
    Alternative(AlternativeShippingAddress),
}

/// Scalar value of one address field, used for field-set comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Null,
    Integer(i64),
    Text(String),
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<Option<i64>> for FieldValue {
    fn from(value: Option<i64>) -> Self {
        value.map_or(Self::Null, Self::Integer)
    }
}

impl From<&Option<String>> for FieldValue {
    fn from(value: &Option<String>) -> Self {
        value
            .as_ref()
            .map_or(Self::Null, |text| Self::Text(text.clone()))
    }
}

/// Field name to value map of one address record.
pub type AddressFieldMap = BTreeMap<&'static str, FieldValue>;

/// Exposes an address record as the fields a caller would see.
///
/// Key sets differ between shapes: historical addresses carry
/// `order_address_id`/`order_id`, the alternative address carries `id`, and
/// only billing rows carry `phone`/`vat_id`.
pub trait AddressFields {
    fn address_fields(&self) -> AddressFieldMap;
}

impl AddressLines {
    fn insert_into(&self, fields: &mut AddressFieldMap) {
        fields.insert("company", (&self.company).into());
        fields.insert("department", (&self.department).into());
        fields.insert("salutation", (&self.salutation).into());
        fields.insert("first_name", (&self.first_name).into());
        fields.insert("last_name", (&self.last_name).into());
        fields.insert("street", (&self.street).into());
        fields.insert("zip_code", (&self.zip_code).into());
        fields.insert("city", (&self.city).into());
    }
}

impl Region {
    fn insert_into(&self, fields: &mut AddressFieldMap) {
        fields.insert("country_id", self.country_id.into());
        fields.insert("country", (&self.country).into());
        fields.insert("state_id", self.state_id.into());
        fields.insert("state", (&self.state).into());
    }
}

impl AddressFields for OrderAddress {
    fn address_fields(&self) -> AddressFieldMap {
        let mut fields = AddressFieldMap::new();
        fields.insert("order_address_id", self.order_address_id.into());
        fields.insert("order_id", self.order_id.into());
        fields.insert("customer_id", self.customer_id.into());
        self.lines.insert_into(&mut fields);
        self.region.insert_into(&mut fields);
        if let Some(contact) = &self.contact {
            fields.insert("phone", (&contact.phone).into());
            fields.insert("vat_id", (&contact.vat_id).into());
        }
        fields
    }
}

impl AddressFields for AlternativeShippingAddress {
    fn address_fields(&self) -> AddressFieldMap {
        let mut fields = AddressFieldMap::new();
        fields.insert("id", self.id.into());
        fields.insert("customer_id", self.customer_id.into());
        self.lines.insert_into(&mut fields);
        self.region.insert_into(&mut fields);
        fields
    }
}

impl AddressFields for ShippingAddress {
    fn address_fields(&self) -> AddressFieldMap {
        match self {
            Self::Order(address) => address.address_fields(),
            Self::Alternative(address) => address.address_fields(),
        }
    }
}
