mod common;

use common::{
    insert_alternative_shipping, insert_customer, insert_customer_billing, insert_order,
    insert_order_billing, insert_order_shipping, seed_lookups, AddressFixture, AUSTRIA, DEBIT,
    DEFAULT_SHOP, ENGLISH_SHOP, INVOICE,
};
use custdesk_core::db::open_db_in_memory;
use custdesk_core::{
    CustomerRepository, CustomerService, RepoError, ShippingAddress, SqliteCustomerRepository,
};
use rusqlite::{params, Connection};

fn store() -> Connection {
    let conn = open_db_in_memory().unwrap();
    seed_lookups(&conn);
    insert_customer(&conn, 1, "20001", "john@example.com", "John", "Doe");
    conn
}

#[test]
fn unknown_customer_is_none() {
    let conn = store();
    let service = CustomerService::new(SqliteCustomerRepository::new(&conn));

    assert!(service.customer_detail(404).unwrap().is_none());
    assert!(SqliteCustomerRepository::new(&conn)
        .find_customer(404)
        .unwrap()
        .is_none());
}

#[test]
fn loader_joins_payment_shop_billing_and_payment_data() {
    let conn = store();
    insert_customer_billing(&conn, 1, &AddressFixture::john_doe());
    conn.execute(
        "INSERT INTO customer_payment_data (customer_id, payment_mean_id, account_holder, bank_name, iban, bic)
         VALUES (?1, ?2, 'John Doe', 'Demo Bank', 'DE02120300000000202051', 'BYLADEM1001');",
        params![1, DEBIT],
    )
    .unwrap();

    let repo = SqliteCustomerRepository::new(&conn);
    let customer = repo.find_customer(1).unwrap().unwrap();

    assert_eq!(customer.number.as_deref(), Some("20001"));
    assert_eq!(customer.email, "john@example.com");
    assert!(customer.active);
    assert_eq!(customer.customer_group, "EK");
    let payment = customer.payment.as_ref().unwrap();
    assert_eq!(payment.id, INVOICE);
    assert_eq!(payment.name, "invoice");
    assert_eq!(customer.shop.as_ref().unwrap().id, DEFAULT_SHOP);
    let language = customer.language_sub_shop.as_ref().unwrap();
    assert_eq!(language.id, ENGLISH_SHOP);
    assert_eq!(language.name, "English");

    let billing = customer.billing.as_ref().unwrap();
    assert_eq!(billing.lines.company.as_deref(), Some("Doe Trading"));
    assert_eq!(billing.region.country.as_deref(), Some("Germany"));
    assert_eq!(billing.contact.vat_id.as_deref(), Some("DE123456789"));
    assert!(customer.shipping.is_none());

    assert_eq!(customer.payment_data.len(), 1);
    assert_eq!(customer.payment_data[0].payment_mean_name, "debit");
    assert_eq!(customer.payment_data[0].bic.as_deref(), Some("BYLADEM1001"));
}

#[test]
fn customer_without_orders_gets_only_alternative_shipping_address() {
    let conn = store();
    insert_alternative_shipping(&conn, 1, &AddressFixture::john_doe());

    let service = CustomerService::new(SqliteCustomerRepository::new(&conn));
    let detail = service.customer_detail(1).unwrap().unwrap();

    assert!(detail.billing_addresses.is_empty());
    assert_eq!(detail.shipping_addresses.len(), 1);
    match &detail.shipping_addresses[0] {
        ShippingAddress::Alternative(address) => {
            assert_eq!(address.customer_id, 1);
            assert_eq!(address.lines.street.as_deref(), Some("Ebbinghoff 10"));
            assert_eq!(address.region.state.as_deref(), Some("Nordrhein-Westfalen"));
        }
        other => panic!("expected alternative address, got {other:?}"),
    }
}

#[test]
fn alternative_address_matching_history_is_not_duplicated() {
    let conn = store();
    let home = AddressFixture::john_doe();
    insert_order(&conn, 1, 1);
    insert_order(&conn, 2, 1);
    insert_order_shipping(&conn, 1, 1, &home.clone().with_street("Hauptstraße 1"));
    insert_order_shipping(&conn, 2, 1, &home);
    insert_alternative_shipping(&conn, 1, &home);

    let service = CustomerService::new(SqliteCustomerRepository::new(&conn));
    let detail = service.customer_detail(1).unwrap().unwrap();

    assert_eq!(detail.shipping_addresses.len(), 2);
    assert!(detail
        .shipping_addresses
        .iter()
        .all(|address| matches!(address, ShippingAddress::Order(_))));
    // The loader still reports the configured alternative address itself.
    assert!(detail.customer.shipping.is_some());
}

#[test]
fn distinct_alternative_address_is_appended_after_history() {
    let conn = store();
    let home = AddressFixture::john_doe();
    insert_order(&conn, 1, 1);
    insert_order_shipping(&conn, 1, 1, &home);
    insert_order_billing(&conn, 1, 1, &home);
    insert_alternative_shipping(&conn, 1, &home.clone().with_street("Neue Straße 7"));

    let service = CustomerService::new(SqliteCustomerRepository::new(&conn));
    let detail = service.customer_detail(1).unwrap().unwrap();

    assert_eq!(detail.billing_addresses.len(), 1);
    assert_eq!(detail.shipping_addresses.len(), 2);
    assert!(matches!(
        detail.shipping_addresses[0],
        ShippingAddress::Order(_)
    ));
    assert!(matches!(
        detail.shipping_addresses[1],
        ShippingAddress::Alternative(_)
    ));
}

#[test]
fn alternative_address_in_other_country_is_kept() {
    let conn = store();
    let home = AddressFixture::john_doe();
    insert_order(&conn, 1, 1);
    insert_order_shipping(&conn, 1, 1, &home);
    let mut abroad = home.clone();
    abroad.country_id = Some(AUSTRIA);
    abroad.state_id = None;
    insert_alternative_shipping(&conn, 1, &abroad);

    let service = CustomerService::new(SqliteCustomerRepository::new(&conn));
    let detail = service.customer_detail(1).unwrap().unwrap();

    assert_eq!(detail.shipping_addresses.len(), 2);
    match &detail.shipping_addresses[1] {
        ShippingAddress::Alternative(address) => {
            assert_eq!(address.lines.street.as_deref(), Some("Ebbinghoff 10"));
            assert_eq!(address.region.country_id, Some(AUSTRIA));
            assert_eq!(address.region.country.as_deref(), Some("Austria"));
            assert_eq!(address.region.state, None);
        }
        other => panic!("expected alternative address, got {other:?}"),
    }
}

#[test]
fn detail_serializes_customer_fields_with_address_lists() {
    let conn = store();
    let home = AddressFixture::john_doe();
    insert_order(&conn, 1, 1);
    insert_order_billing(&conn, 1, 1, &home);
    insert_alternative_shipping(&conn, 1, &home);

    let service = CustomerService::new(SqliteCustomerRepository::new(&conn));
    let detail = service.customer_detail(1).unwrap().unwrap();
    let json = serde_json::to_value(&detail).unwrap();

    assert_eq!(json["id"], 1);
    assert_eq!(json["number"], "20001");
    assert_eq!(json["billing_addresses"][0]["phone"], "05555 / 555555");
    assert_eq!(json["billing_addresses"][0]["order_id"], 1);
    assert!(json["billing_addresses"][0].get("id").is_none());
    assert_eq!(json["shipping_addresses"][0]["street"], "Ebbinghoff 10");
    assert!(json["shipping_addresses"][0].get("order_address_id").is_none());
    assert!(json["shipping_addresses"][0].get("phone").is_none());
}

#[test]
fn corrupted_active_flag_is_reported_as_invalid_data() {
    let conn = store();
    conn.execute_batch(
        "PRAGMA ignore_check_constraints = ON;
         UPDATE customers SET active = 7 WHERE id = 1;",
    )
    .unwrap();

    let repo = SqliteCustomerRepository::new(&conn);
    let err = repo.find_customer(1).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(message) if message.contains("active")));
}
