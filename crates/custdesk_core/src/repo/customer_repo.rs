//! Customer repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Load one customer with its joined billing, shipping, payment and shop
//!   metadata.
//! - Aggregate distinct historical order addresses per address kind.
//! - Run the customer picker search query.
//!
//! # Invariants
//! - Every query is read-only; no write path exists in this module.
//! - Missing customers and missing alternative addresses are `Ok(None)`,
//!   never errors.
//! - Raw rows leave this module unflattened except where a loader composes
//!   them into a `Customer`.

use crate::db::DbError;
use crate::model::address::{
    dedup_fields, AddressKind, AddressLines, AlternativeShippingRow, BillingContact, Lookup,
    OrderAddressRow, RegionRefs,
};
use crate::model::customer::{
    BillingAddressRow, Customer, CustomerId, PaymentData, PaymentMethod, ShopRef,
};
use crate::search::customer_search::{CustomerSearchRow, SearchFilter};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const CUSTOMER_SELECT_SQL: &str = "SELECT
    cu.id,
    cu.number,
    cu.email,
    cu.active,
    cu.salutation,
    cu.first_name,
    cu.last_name,
    cu.customer_group,
    cu.first_login,
    cu.last_login,
    pm.id AS payment_id,
    pm.name AS payment_name,
    pm.description AS payment_description,
    sh.id AS shop_id,
    sh.name AS shop_name,
    ls.id AS language_shop_id,
    ls.name AS language_shop_name
FROM customers cu
LEFT JOIN payment_means pm ON pm.id = cu.payment_id
LEFT JOIN shops sh ON sh.id = cu.shop_id
LEFT JOIN shops ls ON ls.id = cu.language_shop_id
WHERE cu.id = ?1;";

const BILLING_SELECT_SQL: &str = "SELECT
    a.id,
    a.company,
    a.department,
    a.salutation,
    a.first_name,
    a.last_name,
    a.street,
    a.zip_code,
    a.city,
    a.phone,
    a.vat_id,
    a.country_id,
    c.name AS country_name,
    a.state_id,
    s.name AS state_name
FROM customer_billing_addresses a
LEFT JOIN countries c ON c.id = a.country_id
LEFT JOIN country_states s ON s.id = a.state_id
WHERE a.customer_id = ?1;";

const ALTERNATIVE_SHIPPING_SELECT_SQL: &str = "SELECT
    a.id,
    a.customer_id,
    a.company,
    a.department,
    a.salutation,
    a.first_name,
    a.last_name,
    a.street,
    a.zip_code,
    a.city,
    a.country_id,
    c.name AS country_name,
    a.state_id,
    s.name AS state_name
FROM customer_shipping_addresses a
LEFT JOIN countries c ON c.id = a.country_id
LEFT JOIN country_states s ON s.id = a.state_id
WHERE a.customer_id = ?1;";

const PAYMENT_DATA_SELECT_SQL: &str = "SELECT
    pd.id,
    pd.payment_mean_id,
    pm.name AS payment_mean_name,
    pd.account_holder,
    pd.bank_name,
    pd.iban,
    pd.bic
FROM customer_payment_data pd
JOIN payment_means pm ON pm.id = pd.payment_mean_id
WHERE pd.customer_id = ?1
ORDER BY pd.id ASC;";

const CUSTOMER_SEARCH_SQL: &str = "SELECT
    cu.id,
    cu.number,
    cu.email,
    cu.first_name,
    cu.last_name,
    b.company AS billing_company,
    sa.company AS shipping_company
FROM customers cu
LEFT JOIN customer_billing_addresses b ON b.customer_id = cu.id
LEFT JOIN customer_shipping_addresses sa ON sa.customer_id = cu.id
WHERE (cu.first_name || ' ' || cu.last_name) = ?1 COLLATE NOCASE
   OR b.company LIKE ?2 ESCAPE '\\'
   OR sa.company LIKE ?2 ESCAPE '\\'
   OR cu.number LIKE ?2 ESCAPE '\\'
   OR cu.email LIKE ?2 ESCAPE '\\'
GROUP BY cu.id
ORDER BY cu.number ASC, cu.id ASC;";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for customer and address queries.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted customer data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Read-only data access used by the customer service.
pub trait CustomerRepository {
    /// Loads one customer with billing, shipping, payment and shop joined.
    fn find_customer(&self, id: CustomerId) -> RepoResult<Option<Customer>>;
    /// Returns distinct order addresses of `kind`, collapsed over
    /// [`dedup_fields`].
    fn order_addresses(
        &self,
        id: CustomerId,
        kind: AddressKind,
    ) -> RepoResult<Vec<OrderAddressRow>>;
    /// Returns the customer's alternative shipping address, if configured.
    fn alternative_shipping_address(
        &self,
        id: CustomerId,
    ) -> RepoResult<Option<AlternativeShippingRow>>;
    /// Runs the picker search for a prepared filter.
    fn search_customers(&self, filter: &SearchFilter) -> RepoResult<Vec<CustomerSearchRow>>;
}

/// SQLite-backed customer repository.
pub struct SqliteCustomerRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCustomerRepository<'conn> {
    /// Wraps a migrated connection.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn billing_address(&self, id: CustomerId) -> RepoResult<Option<BillingAddressRow>> {
        let mut stmt = self.conn.prepare(BILLING_SELECT_SQL)?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(BillingAddressRow {
                id: row.get("id")?,
                lines: parse_address_lines(row)?,
                region: parse_region(row)?,
                contact: parse_billing_contact(row)?,
            }));
        }

        Ok(None)
    }

    fn payment_data(&self, id: CustomerId) -> RepoResult<Vec<PaymentData>> {
        let mut stmt = self.conn.prepare(PAYMENT_DATA_SELECT_SQL)?;
        let mut rows = stmt.query([id])?;
        let mut entries = Vec::new();

        while let Some(row) = rows.next()? {
            entries.push(PaymentData {
                id: row.get("id")?,
                payment_mean_id: row.get("payment_mean_id")?,
                payment_mean_name: row.get("payment_mean_name")?,
                account_holder: row.get("account_holder")?,
                bank_name: row.get("bank_name")?,
                iban: row.get("iban")?,
                bic: row.get("bic")?,
            });
        }

        Ok(entries)
    }
}

impl CustomerRepository for SqliteCustomerRepository<'_> {
    fn find_customer(&self, id: CustomerId) -> RepoResult<Option<Customer>> {
        let mut stmt = self.conn.prepare(CUSTOMER_SELECT_SQL)?;
        let mut rows = stmt.query([id])?;
        let Some(row) = rows.next()? else {
            return Ok(None);
        };
        let mut customer = parse_customer_row(row)?;
        drop(rows);

        customer.billing = self.billing_address(id)?.map(BillingAddressRow::flatten);
        customer.shipping = self
            .alternative_shipping_address(id)?
            .map(AlternativeShippingRow::flatten);
        customer.payment_data = self.payment_data(id)?;

        Ok(Some(customer))
    }

    fn order_addresses(
        &self,
        id: CustomerId,
        kind: AddressKind,
    ) -> RepoResult<Vec<OrderAddressRow>> {
        let sql = order_address_sql(kind);
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([id])?;
        let mut addresses = Vec::new();

        while let Some(row) = rows.next()? {
            let contact = match kind {
                AddressKind::Billing => Some(parse_billing_contact(row)?),
                AddressKind::Shipping => None,
            };
            addresses.push(OrderAddressRow {
                id: row.get("id")?,
                order_id: row.get("order_id")?,
                customer_id: row.get("customer_id")?,
                lines: parse_address_lines(row)?,
                region: parse_region(row)?,
                contact,
            });
        }

        Ok(addresses)
    }

    fn alternative_shipping_address(
        &self,
        id: CustomerId,
    ) -> RepoResult<Option<AlternativeShippingRow>> {
        let mut stmt = self.conn.prepare(ALTERNATIVE_SHIPPING_SELECT_SQL)?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(AlternativeShippingRow {
                id: row.get("id")?,
                customer_id: row.get("customer_id")?,
                lines: parse_address_lines(row)?,
                region: parse_region(row)?,
            }));
        }

        Ok(None)
    }

    fn search_customers(&self, filter: &SearchFilter) -> RepoResult<Vec<CustomerSearchRow>> {
        let mut stmt = self.conn.prepare(CUSTOMER_SEARCH_SQL)?;
        let mut rows = stmt.query(params![filter.exact_name(), filter.contains_pattern()])?;
        let mut hits = Vec::new();

        while let Some(row) = rows.next()? {
            hits.push(CustomerSearchRow {
                id: row.get("id")?,
                number: row.get("number")?,
                email: row.get("email")?,
                first_name: row.get("first_name")?,
                last_name: row.get("last_name")?,
                billing_company: row.get("billing_company")?,
                shipping_company: row.get("shipping_company")?,
            });
        }

        Ok(hits)
    }
}

/// Builds the aggregation query for order addresses of `kind`.
///
/// Rows identical across every dedup field collapse into one group. The group
/// representative is the row with the highest id: SQLite takes bare columns
/// from the row that produced `MAX(a.id)`.
pub fn order_address_sql(kind: AddressKind) -> String {
    let group_by = dedup_fields(kind)
        .into_iter()
        .map(|field| format!("a.{}", field.column()))
        .collect::<Vec<_>>()
        .join(", ");
    let contact_columns = match kind {
        AddressKind::Billing => "\n    a.phone,\n    a.vat_id,",
        AddressKind::Shipping => "",
    };

    format!(
        "SELECT
    MAX(a.id) AS id,
    a.order_id,
    a.customer_id,
    a.company,
    a.department,
    a.salutation,
    a.first_name,
    a.last_name,
    a.street,
    a.zip_code,
    a.city,{contact_columns}
    a.country_id,
    c.name AS country_name,
    a.state_id,
    s.name AS state_name
FROM {table} a
LEFT JOIN countries c ON c.id = a.country_id
LEFT JOIN country_states s ON s.id = a.state_id
WHERE a.customer_id = ?1
GROUP BY {group_by}
ORDER BY MAX(a.id) ASC;",
        table = kind.order_table(),
    )
}

fn parse_customer_row(row: &Row<'_>) -> RepoResult<Customer> {
    let active = match row.get::<_, i64>("active")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid active value `{other}` in customers.active"
            )));
        }
    };

    let payment = match row.get::<_, Option<i64>>("payment_id")? {
        Some(id) => Some(PaymentMethod {
            id,
            name: row.get("payment_name")?,
            description: row.get("payment_description")?,
        }),
        None => None,
    };

    Ok(Customer {
        id: row.get("id")?,
        number: row.get("number")?,
        email: row.get("email")?,
        active,
        salutation: row.get("salutation")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        customer_group: row.get("customer_group")?,
        first_login: row.get("first_login")?,
        last_login: row.get("last_login")?,
        payment,
        shop: parse_shop_ref(row, "shop_id", "shop_name")?,
        language_sub_shop: parse_shop_ref(row, "language_shop_id", "language_shop_name")?,
        billing: None,
        shipping: None,
        payment_data: Vec::new(),
    })
}

fn parse_shop_ref(
    row: &Row<'_>,
    id_column: &str,
    name_column: &str,
) -> RepoResult<Option<ShopRef>> {
    let id = row.get::<_, Option<i64>>(id_column)?;
    let name = row.get::<_, Option<String>>(name_column)?;
    Ok(id.zip(name).map(|(id, name)| ShopRef { id, name }))
}

fn parse_address_lines(row: &Row<'_>) -> RepoResult<AddressLines> {
    Ok(AddressLines {
        company: row.get("company")?,
        department: row.get("department")?,
        salutation: row.get("salutation")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        street: row.get("street")?,
        zip_code: row.get("zip_code")?,
        city: row.get("city")?,
    })
}

fn parse_region(row: &Row<'_>) -> RepoResult<RegionRefs> {
    Ok(RegionRefs {
        country: lookup(row, "country_id", "country_name")?,
        state: lookup(row, "state_id", "state_name")?,
    })
}

fn parse_billing_contact(row: &Row<'_>) -> RepoResult<BillingContact> {
    Ok(BillingContact {
        phone: row.get("phone")?,
        vat_id: row.get("vat_id")?,
    })
}

fn lookup(row: &Row<'_>, id_column: &str, name_column: &str) -> RepoResult<Option<Lookup>> {
    let id = row.get::<_, Option<i64>>(id_column)?;
    let name = row.get::<_, Option<String>>(name_column)?;
    match (id, name) {
        (Some(id), Some(name)) => Ok(Some(Lookup { id, name })),
        (None, _) => Ok(None),
        (Some(id), None) => Err(RepoError::InvalidData(format!(
            "dangling lookup key `{id}` in {id_column}"
        ))),
    }
}
