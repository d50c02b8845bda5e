//! Read models for customers and their addresses.
//!
//! # Responsibility
//! - Define the records returned to order-management callers.
//! - Keep raw query rows and flattened records as separate types.
//!
//! # Invariants
//! - Every customer is identified by a store-assigned `CustomerId`.
//! - Country and state references reach callers as display names.

pub mod address;
pub mod customer;
