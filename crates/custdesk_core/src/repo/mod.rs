//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the read-only data access contract the customer service depends
//!   on.
//! - Isolate SQLite query construction from result shaping and merging.
//!
//! # Invariants
//! - Repositories never write application rows.
//! - "Not found" is an empty result, not an error.

pub mod customer_repo;
