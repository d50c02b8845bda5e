//! Fixture helpers shared by integration tests.
//!
//! Rows are inserted with plain SQL; the crate itself has no write path.

#![allow(dead_code)]

use rusqlite::{params, Connection};

pub const GERMANY: i64 = 2;
pub const AUSTRIA: i64 = 5;
pub const NRW: i64 = 3;
pub const DEFAULT_SHOP: i64 = 1;
pub const ENGLISH_SHOP: i64 = 2;
pub const INVOICE: i64 = 4;
pub const DEBIT: i64 = 2;

/// Address columns shared by all address tables.
#[derive(Debug, Clone)]
pub struct AddressFixture {
    pub company: Option<&'static str>,
    pub department: Option<&'static str>,
    pub salutation: &'static str,
    pub first_name: &'static str,
    pub last_name: &'static str,
    pub street: &'static str,
    pub zip_code: &'static str,
    pub city: &'static str,
    pub phone: Option<&'static str>,
    pub vat_id: Option<&'static str>,
    pub country_id: Option<i64>,
    pub state_id: Option<i64>,
}

impl AddressFixture {
    pub fn john_doe() -> Self {
        Self {
            company: Some("Doe Trading"),
            department: None,
            salutation: "mr",
            first_name: "John",
            last_name: "Doe",
            street: "Ebbinghoff 10",
            zip_code: "48624",
            city: "Schöppingen",
            phone: Some("05555 / 555555"),
            vat_id: Some("DE123456789"),
            country_id: Some(GERMANY),
            state_id: Some(NRW),
        }
    }

    pub fn with_street(mut self, street: &'static str) -> Self {
        self.street = street;
        self
    }
}

/// Inserts countries, states, shops and payment means.
pub fn seed_lookups(conn: &Connection) {
    conn.execute_batch(
        "INSERT INTO countries (id, name, iso) VALUES (2, 'Germany', 'DE'), (5, 'Austria', 'AT');
         INSERT INTO country_states (id, country_id, name, short_code)
             VALUES (3, 2, 'Nordrhein-Westfalen', 'NW');
         INSERT INTO shops (id, main_id, name) VALUES (1, NULL, 'Demo shop'), (2, 1, 'English');
         INSERT INTO payment_means (id, name, description)
             VALUES (2, 'debit', 'Debit'), (4, 'invoice', 'Invoice');",
    )
    .unwrap();
}

pub fn insert_customer(
    conn: &Connection,
    id: i64,
    number: &str,
    email: &str,
    first_name: &str,
    last_name: &str,
) {
    conn.execute(
        "INSERT INTO customers (
            id, number, email, active, salutation, first_name, last_name,
            customer_group, payment_id, shop_id, language_shop_id, first_login, last_login
        ) VALUES (?1, ?2, ?3, 1, 'mr', ?4, ?5, 'EK', ?6, ?7, ?8, '2024-01-05', '2024-06-01 10:00:00');",
        params![id, number, email, first_name, last_name, INVOICE, DEFAULT_SHOP, ENGLISH_SHOP],
    )
    .unwrap();
}

pub fn insert_customer_billing(conn: &Connection, customer_id: i64, address: &AddressFixture) {
    conn.execute(
        "INSERT INTO customer_billing_addresses (
            customer_id, company, department, salutation, first_name, last_name,
            street, zip_code, city, phone, vat_id, country_id, state_id
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13);",
        params![
            customer_id,
            address.company,
            address.department,
            address.salutation,
            address.first_name,
            address.last_name,
            address.street,
            address.zip_code,
            address.city,
            address.phone,
            address.vat_id,
            address.country_id,
            address.state_id,
        ],
    )
    .unwrap();
}

pub fn insert_alternative_shipping(conn: &Connection, customer_id: i64, address: &AddressFixture) {
    conn.execute(
        "INSERT INTO customer_shipping_addresses (
            customer_id, company, department, salutation, first_name, last_name,
            street, zip_code, city, country_id, state_id
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11);",
        params![
            customer_id,
            address.company,
            address.department,
            address.salutation,
            address.first_name,
            address.last_name,
            address.street,
            address.zip_code,
            address.city,
            address.country_id,
            address.state_id,
        ],
    )
    .unwrap();
}

pub fn insert_order(conn: &Connection, id: i64, customer_id: i64) {
    conn.execute(
        "INSERT INTO orders (id, number, customer_id, ordered_at) VALUES (?1, ?2, ?3, '2024-03-01');",
        params![id, format!("ORD-{id}"), customer_id],
    )
    .unwrap();
}

/// Inserts a billing address for order `order_id`; returns the row id.
pub fn insert_order_billing(
    conn: &Connection,
    order_id: i64,
    customer_id: i64,
    address: &AddressFixture,
) -> i64 {
    conn.execute(
        "INSERT INTO order_billing_addresses (
            order_id, customer_id, company, department, salutation, first_name, last_name,
            street, zip_code, city, phone, vat_id, country_id, state_id
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14);",
        params![
            order_id,
            customer_id,
            address.company,
            address.department,
            address.salutation,
            address.first_name,
            address.last_name,
            address.street,
            address.zip_code,
            address.city,
            address.phone,
            address.vat_id,
            address.country_id,
            address.state_id,
        ],
    )
    .unwrap();
    conn.last_insert_rowid()
}

/// Inserts a shipping address for order `order_id`; returns the row id.
pub fn insert_order_shipping(
    conn: &Connection,
    order_id: i64,
    customer_id: i64,
    address: &AddressFixture,
) -> i64 {
    conn.execute(
        "INSERT INTO order_shipping_addresses (
            order_id, customer_id, company, department, salutation, first_name, last_name,
            street, zip_code, city, country_id, state_id
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12);",
        params![
            order_id,
            customer_id,
            address.company,
            address.department,
            address.salutation,
            address.first_name,
            address.last_name,
            address.street,
            address.zip_code,
            address.city,
            address.country_id,
            address.state_id,
        ],
    )
    .unwrap();
    conn.last_insert_rowid()
}
