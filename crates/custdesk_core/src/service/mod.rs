//! Customer use-case services.
//!
//! # Responsibility
//! - Compose repository reads into the customer detail and picker use-cases.
//! - Own the alternative shipping address merge rule.
//!
//! # Invariants
//! - Services depend on the `CustomerRepository` contract only, never on a
//!   concrete connection.

pub mod address_merge;
pub mod customer_service;
