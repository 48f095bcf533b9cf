use std::sync::Arc;
use std::thread;

use chrono::{NaiveDate, Utc};
use comercia_core::audit::AuditContext;
use comercia_core::clock::SystemClock;
use comercia_core::config::CoreConfig;
use comercia_core::domain::{DeliveryStatus, OrderKind, OrderStatus, QuoteStatus};
use comercia_core::services::{
    AddQuoteLineRequest, CreateDeliveryRequest, CreateFromQuoteRequest, CreateQuoteRequest,
    DeliveryService, MarkDeliveredRequest, OrderService, QuoteService,
};
use comercia_core::store::Entity;
use comercia_core::uow::Store;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn audit(user_id: i64) -> AuditContext {
    AuditContext::new(user_id, Arc::new(SystemClock))
}

// --- Quote -> Order -> Delivery ---

#[test]
fn quote_to_order_to_delivery_flow() {
    let store = Store::new();
    let config = CoreConfig::default();

    let uow = store.begin(audit(1));
    let quote = QuoteService::new(uow.store())
        .create(
            CreateQuoteRequest {
                company_id: 10,
                issuing_staff_id: 1,
                currency_code: "CLP".to_string(),
                quote_date: date(2025, 1, 10),
                valid_until: Some(date(2025, 2, 10)),
                tax_percentage: dec!(19),
                number: None,
                prefix: Some("AKG".to_string()),
            },
            &uow,
            &config,
        )
        .unwrap();
    assert_eq!(quote.number, "C-AKG-2025-0001");
    assert_eq!(quote.status, QuoteStatus::Draft);

    let quote_service = QuoteService::new(uow.store());
    quote_service
        .add_product(
            quote.id(),
            AddQuoteLineRequest { product_id: 100, quantity: dec!(2), unit_price: dec!(100), discount_percentage: None },
            &uow,
        )
        .unwrap();
    let quote = quote_service
        .add_product(
            quote.id(),
            AddQuoteLineRequest { product_id: 101, quantity: dec!(1), unit_price: dec!(50), discount_percentage: None },
            &uow,
        )
        .unwrap();

    assert_eq!(quote.totals.subtotal, dec!(250));
    assert_eq!(quote.totals.tax_amount, dec!(47.50));
    assert_eq!(quote.totals.total, dec!(297.50));

    let quote = quote_service.set_status(quote.id(), QuoteStatus::Accepted, &uow).unwrap();
    assert_eq!(quote.status, QuoteStatus::Accepted);

    let order_service = OrderService::new(uow.store());
    let order = order_service
        .create_from_quote(
            quote.id(),
            CreateFromQuoteRequest {
                issuing_staff_id: 1,
                order_date: date(2025, 1, 12),
                promised_date: Some(date(2025, 1, 20)),
                kind: OrderKind::Sales,
                is_export: false,
                prefix: None,
            },
            &uow,
            &config,
        )
        .unwrap();

    assert_eq!(order.number, "O-2025-0001");
    assert_eq!(order.quote_id, Some(quote.id()));
    assert_eq!(order.totals.total, dec!(297.50));
    assert_eq!(order_service.lines_of(order.id()).len(), 2);

    let delivery_service = DeliveryService::new(uow.store());
    let delivery = delivery_service
        .create(CreateDeliveryRequest { order_id: order.id(), delivery_date: date(2025, 1, 18), prefix: None }, &uow, &config)
        .unwrap();
    assert_eq!(delivery.status, DeliveryStatus::Pending);

    let delivered = delivery_service
        .mark_delivered(
            delivery.id(),
            MarkDeliveredRequest {
                signature_name: "J. Perez".to_string(),
                signature_id: "12.345.678-5".to_string(),
                notes: Some("left at front desk".to_string()),
                today: date(2025, 1, 19),
            },
            &uow,
        )
        .unwrap();
    assert_eq!(delivered.status, DeliveryStatus::Delivered);
    assert!(!delivered.is_late(date(2025, 1, 20)));

    let order = order_service.mark_completed(order.id(), date(2025, 1, 19), &uow).unwrap();
    assert_eq!(order.status, OrderStatus::Completed);

    uow.commit().unwrap();
}

#[test]
fn quote_number_is_unique_across_companies_even_when_caller_supplied() {
    let store = Store::new();
    let config = CoreConfig::default();
    let uow = store.begin(audit(1));
    let quote_service = QuoteService::new(uow.store());

    quote_service
        .create(
            CreateQuoteRequest {
                company_id: 1,
                issuing_staff_id: 1,
                currency_code: "CLP".to_string(),
                quote_date: date(2025, 1, 10),
                valid_until: None,
                tax_percentage: dec!(19),
                number: Some("C-CUSTOM-0001".to_string()),
                prefix: None,
            },
            &uow,
            &config,
        )
        .unwrap();

    let duplicate = quote_service.create(
        CreateQuoteRequest {
            company_id: 2,
            issuing_staff_id: 1,
            currency_code: "CLP".to_string(),
            quote_date: date(2025, 1, 11),
            valid_until: None,
            tax_percentage: dec!(19),
            number: Some("C-CUSTOM-0001".to_string()),
            prefix: None,
        },
        &uow,
        &config,
    );
    assert!(duplicate.is_err());
}

#[test]
fn order_rejects_promised_date_before_order_date() {
    let store = Store::new();
    let config = CoreConfig::default();
    let uow = store.begin(audit(1));

    let quote = QuoteService::new(uow.store())
        .create(
            CreateQuoteRequest {
                company_id: 1,
                issuing_staff_id: 1,
                currency_code: "CLP".to_string(),
                quote_date: date(2025, 1, 1),
                valid_until: None,
                tax_percentage: dec!(19),
                number: None,
                prefix: None,
            },
            &uow,
            &config,
        )
        .unwrap();

    let result = OrderService::new(uow.store()).create_from_quote(
        quote.id(),
        CreateFromQuoteRequest {
            issuing_staff_id: 1,
            order_date: date(2025, 1, 10),
            promised_date: Some(date(2025, 1, 5)),
            kind: OrderKind::Sales,
            is_export: false,
            prefix: None,
        },
        &uow,
        &config,
    );
    assert!(result.is_err());
    uow.rollback();
}

// --- Sequence generator concurrency (S1/S2) ---

#[test]
fn concurrent_uows_issue_gap_free_numbers_for_the_same_bucket() {
    let store = Arc::new(Store::new());
    let config = Arc::new(CoreConfig::default());

    let handles: Vec<_> = (0i64..5)
        .map(|i| {
            let store = store.clone();
            let config = config.clone();
            thread::spawn(move || {
                let uow = store.begin(audit(i));
                let number = uow.generate_number(&config, "quote", 2025, Some("AKG")).unwrap();
                uow.commit().unwrap();
                number
            })
        })
        .collect();

    let mut numbers: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    numbers.sort();
    assert_eq!(
        numbers,
        vec![
            "C-AKG-2025-0001".to_string(),
            "C-AKG-2025-0002".to_string(),
            "C-AKG-2025-0003".to_string(),
            "C-AKG-2025-0004".to_string(),
            "C-AKG-2025-0005".to_string(),
        ]
    );
}

#[test]
fn rolled_back_unit_of_work_frees_its_number_for_reuse() {
    let store = Store::new();
    let config = CoreConfig::default();

    let uow_a = store.begin(audit(1));
    let first = uow_a.generate_number(&config, "order", 2025, None).unwrap();
    uow_a.rollback();

    let uow_b = store.begin(audit(2));
    let second = uow_b.generate_number(&config, "order", 2025, None).unwrap();
    assert_eq!(first, second);
    uow_b.commit().unwrap();
}
