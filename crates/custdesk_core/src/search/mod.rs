//! Customer picker search.
//!
//! # Responsibility
//! - Turn a free-text token into the search filter bound by the repository.
//! - Shape raw search rows into type-ahead hits.
//!
//! # Invariants
//! - Blank tokens never reach the store.

pub mod customer_search;
