//! Quote lifecycle service (§4.4.1).

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::domain::{AuditFields, Quote, QuoteProduct, QuoteStatus, Totals};
use crate::error::{CoreError, CoreResult};
use crate::repository::{Page, Repository};
use crate::store::InMemoryStore;
use crate::uow::UnitOfWork;
use crate::CoreConfig;

use super::totals;

/// Request to create a quote. `number: None` always means "allocate me a
/// number" — the reference system's empty-string/`"STRING"` sentinel is
/// rejected at this boundary (see REDESIGN FLAGS).
pub struct CreateQuoteRequest {
    pub company_id: i64,
    pub issuing_staff_id: i64,
    pub currency_code: String,
    pub quote_date: NaiveDate,
    pub valid_until: Option<NaiveDate>,
    pub tax_percentage: Decimal,
    pub number: Option<String>,
    /// Typically the company's trigram, used as the sequence bucket prefix.
    pub prefix: Option<String>,
}

pub struct AddQuoteLineRequest {
    pub product_id: i64,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub discount_percentage: Option<Decimal>,
}

pub struct QuoteService<'a> {
    store: &'a InMemoryStore,
}

impl<'a> QuoteService<'a> {
    pub fn new(store: &'a InMemoryStore) -> Self {
        QuoteService { store }
    }

    fn quotes(&self) -> Repository<'a, Quote> {
        Repository::new(&self.store.quotes)
    }

    fn lines(&self) -> Repository<'a, QuoteProduct> {
        Repository::new(&self.store.quote_products)
    }

    pub fn get(&self, quote_id: i64) -> CoreResult<Quote> {
        self.quotes().get(quote_id)
    }

    pub fn lines_of(&self, quote_id: i64) -> Vec<QuoteProduct> {
        self.lines().find(|l| l.quote_id == quote_id, Page::default())
    }

    pub fn create(&self, request: CreateQuoteRequest, uow: &UnitOfWork, config: &CoreConfig) -> CoreResult<Quote> {
        if let Some(until) = request.valid_until {
            if until < request.quote_date {
                return Err(CoreError::invalid("valid_until", "must be on or after quote_date"));
            }
        }

        let number = match request.number {
            Some(n) if !n.trim().is_empty() => n,
            _ => uow.generate_number(config, "quote", request.quote_date.year(), request.prefix.as_deref())?,
        };
        self.reserve_number(&number)?;

        let quote = Quote {
            audit: AuditFields::new(uow.audit.now(), uow.audit.user_id()),
            number,
            company_id: request.company_id,
            issuing_staff_id: request.issuing_staff_id,
            currency_code: request.currency_code,
            status: QuoteStatus::Draft,
            quote_date: request.quote_date,
            valid_until: request.valid_until,
            totals: Totals::zero(request.tax_percentage),
        };
        self.quotes().create(quote, &uow.audit)
    }

    pub fn add_product(&self, quote_id: i64, request: AddQuoteLineRequest, uow: &UnitOfWork) -> CoreResult<Quote> {
        let next_sequence = self.lines_of(quote_id).len() as i64 + 1;
        let subtotal = totals::line_subtotal(request.quantity, request.unit_price, request.discount_percentage);

        let line = QuoteProduct {
            audit: AuditFields::new(uow.audit.now(), uow.audit.user_id()),
            quote_id,
            product_id: request.product_id,
            sequence: next_sequence,
            quantity: request.quantity,
            unit_price: request.unit_price,
            discount_percentage: request.discount_percentage,
            subtotal,
        };
        self.lines().create(line, &uow.audit)?;
        self.recalculate_totals(quote_id, uow)
    }

    pub fn remove_product(&self, quote_id: i64, line_id: i64, uow: &UnitOfWork) -> CoreResult<Quote> {
        self.lines().delete(line_id)?;
        self.recalculate_totals(quote_id, uow)
    }

    /// Sum line subtotals and recompute `subtotal`/`tax_amount`/`total`
    /// (§4.4 "Totals calculation").
    pub fn recalculate_totals(&self, quote_id: i64, uow: &UnitOfWork) -> CoreResult<Quote> {
        let mut quote = self.quotes().get(quote_id)?;
        let subtotal: Decimal = self.lines_of(quote_id).iter().map(|l| l.subtotal).sum();
        quote.totals = totals::recompute(subtotal, quote.totals.tax_percentage);
        self.quotes().update(quote, &uow.audit)
    }

    pub fn set_status(&self, quote_id: i64, status: QuoteStatus, uow: &UnitOfWork) -> CoreResult<Quote> {
        let mut quote = self.quotes().get(quote_id)?;
        quote.status = status;
        self.quotes().update(quote, &uow.audit)
    }

    /// Document number globally unique within its family (§4.4, §6
    /// "the document-number columns"), enforced at storage the same way
    /// `CompanyRepository` reserves `trigram`.
    fn reserve_number(&self, number: &str) -> CoreResult<()> {
        let mut index = self.store.quote_number_index.lock().unwrap_or_else(|e| e.into_inner());
        if !index.insert(number.to_string()) {
            return Err(CoreError::conflict(format!("quote number already in use: {number}"))
                .with_detail("number", number));
        }
        Ok(())
    }
}
