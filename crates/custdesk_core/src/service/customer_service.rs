//! Customer use-case service.
//!
//! # Responsibility
//! - Assemble the customer detail view: customer, historical billing and
//!   shipping addresses, and the merged alternative shipping address.
//! - Provide the customer picker search.
//!
//! # Invariants
//! - The repository is injected by the caller; the service holds no
//!   connection or global state of its own.
//! - Search tokens are never written to logs verbatim.

use crate::model::address::{AddressKind, OrderAddress, OrderAddressRow};
use crate::model::customer::{CustomerDetail, CustomerId};
use crate::repo::customer_repo::{CustomerRepository, RepoResult};
use crate::search::customer_search::{CustomerSearchHit, CustomerSearchRow, SearchFilter};
use crate::service::address_merge::merge_alternative_shipping;
use log::{debug, info};
use std::time::Instant;

/// Use-case service for customer detail and picker search.
pub struct CustomerService<R: CustomerRepository> {
    repo: R,
}

impl<R: CustomerRepository> CustomerService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Loads the customer detail for `id`.
    ///
    /// Returns `Ok(None)` when no customer has this id. Store failures are
    /// returned unchanged.
    pub fn customer_detail(&self, id: CustomerId) -> RepoResult<Option<CustomerDetail>> {
        let started_at = Instant::now();
        let Some(customer) = self.repo.find_customer(id)? else {
            debug!("event=customer_load module=service status=not_found customer_id={id}");
            return Ok(None);
        };

        let billing_addresses = self.historical_addresses(id, AddressKind::Billing)?;
        let shipping_history = self.historical_addresses(id, AddressKind::Shipping)?;
        // The loader already attached the alternative address.
        let shipping_addresses =
            merge_alternative_shipping(shipping_history, customer.shipping.clone());

        info!(
            "event=customer_load module=service status=ok customer_id={} billing_count={} shipping_count={} duration_ms={}",
            id,
            billing_addresses.len(),
            shipping_addresses.len(),
            started_at.elapsed().as_millis()
        );

        Ok(Some(CustomerDetail {
            customer,
            billing_addresses,
            shipping_addresses,
        }))
    }

    /// Searches customers for the picker.
    ///
    /// Matches the exact `"first last"` name, or the token as a substring of
    /// billing company, shipping company, customer number or email. Results
    /// are ordered by customer number. Blank terms return an empty list.
    pub fn search_customers(&self, term: &str) -> RepoResult<Vec<CustomerSearchHit>> {
        let Some(filter) = SearchFilter::from_term(term) else {
            return Ok(Vec::new());
        };

        let started_at = Instant::now();
        let hits = self
            .repo
            .search_customers(&filter)?
            .into_iter()
            .map(CustomerSearchRow::annotate)
            .collect::<Vec<_>>();

        info!(
            "event=customer_search module=service status=ok term_chars={} hits={} duration_ms={}",
            filter.token().chars().count(),
            hits.len(),
            started_at.elapsed().as_millis()
        );
        Ok(hits)
    }

    fn historical_addresses(
        &self,
        id: CustomerId,
        kind: AddressKind,
    ) -> RepoResult<Vec<OrderAddress>> {
        let rows = self.repo.order_addresses(id, kind)?;
        debug!(
            "event=address_aggregate module=service status=ok customer_id={} kind={} rows={}",
            id,
            kind.as_str(),
            rows.len()
        );
        Ok(rows.into_iter().map(OrderAddressRow::flatten).collect())
    }
}
