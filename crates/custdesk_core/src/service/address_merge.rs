//! Merge of the alternative shipping address into historical addresses.
//!
//! # Invariants
//! - Two addresses are the same when their field maps differ only in
//!   identifier fields (`id`, `order_id`, `order_address_id`).
//! - A field present in only one record counts as a difference.
//! - The merged list never holds the alternative address next to a
//!   historical address that is the same under the rule above.

use crate::model::address::{
    AddressFields, AlternativeShippingAddress, OrderAddress, ShippingAddress,
};
use std::collections::BTreeSet;

/// Fields excluded from address equality.
pub const IDENTIFIER_FIELDS: [&str; 3] = ["id", "order_id", "order_address_id"];

/// Returns the names of all fields whose values differ between `left` and
/// `right`, including fields present in only one of them.
pub fn address_difference<L, R>(left: &L, right: &R) -> BTreeSet<&'static str>
where
    L: AddressFields + ?Sized,
    R: AddressFields + ?Sized,
{
    let left = left.address_fields();
    let right = right.address_fields();

    left.keys()
        .chain(right.keys())
        .copied()
        .filter(|name| left.get(name) != right.get(name))
        .collect()
}

/// Returns whether `left` and `right` describe the same address, ignoring
/// identifier fields.
pub fn is_same_address<L, R>(left: &L, right: &R) -> bool
where
    L: AddressFields + ?Sized,
    R: AddressFields + ?Sized,
{
    address_difference(left, right)
        .iter()
        .all(|name| IDENTIFIER_FIELDS.contains(name))
}

/// Builds the shipping list shown for a customer.
///
/// Historical addresses are kept in order; the alternative address is
/// appended unless one of them is the same address.
pub fn merge_alternative_shipping(
    history: Vec<OrderAddress>,
    alternative: Option<AlternativeShippingAddress>,
) -> Vec<ShippingAddress> {
    let duplicate = alternative.as_ref().is_some_and(|alternative| {
        history
            .iter()
            .any(|address| is_same_address(address, alternative))
    });

    let mut merged = history
        .into_iter()
        .map(ShippingAddress::Order)
        .collect::<Vec<_>>();
    if let Some(alternative) = alternative.filter(|_| !duplicate) {
        merged.push(ShippingAddress::Alternative(alternative));
    }
    merged
}
