//! Order lifecycle service (§4.4.2).

use chrono::{Datelike, NaiveDate};

use crate::domain::{AuditFields, Order, OrderKind, OrderProduct, OrderStatus};
use crate::error::{CoreError, CoreResult};
use crate::repository::{Page, Repository};
use crate::store::{Entity, InMemoryStore};
use crate::uow::UnitOfWork;
use crate::CoreConfig;

pub struct CreateFromQuoteRequest {
    pub issuing_staff_id: i64,
    pub order_date: NaiveDate,
    pub promised_date: Option<NaiveDate>,
    pub kind: OrderKind,
    pub is_export: bool,
    pub prefix: Option<String>,
}

pub struct OrderService<'a> {
    store: &'a InMemoryStore,
}

impl<'a> OrderService<'a> {
    pub fn new(store: &'a InMemoryStore) -> Self {
        OrderService { store }
    }

    fn orders(&self) -> Repository<'a, Order> {
        Repository::new(&self.store.orders)
    }

    fn lines(&self) -> Repository<'a, OrderProduct> {
        Repository::new(&self.store.order_products)
    }

    fn quotes(&self) -> Repository<'a, crate::domain::Quote> {
        Repository::new(&self.store.quotes)
    }

    fn quote_lines(&self) -> Repository<'a, crate::domain::QuoteProduct> {
        Repository::new(&self.store.quote_products)
    }

    pub fn get(&self, order_id: i64) -> CoreResult<Order> {
        self.orders().get(order_id)
    }

    pub fn lines_of(&self, order_id: i64) -> Vec<OrderProduct> {
        self.lines().find(|l| l.order_id == order_id, Page::default())
    }

    /// Clone a quote's header and line items into a new order, assign a
    /// fresh order number, and link back via `quote_id` (§4.4.2
    /// `create_from_quote`).
    pub fn create_from_quote(
        &self,
        quote_id: i64,
        request: CreateFromQuoteRequest,
        uow: &UnitOfWork,
        config: &CoreConfig,
    ) -> CoreResult<Order> {
        if let Some(promised) = request.promised_date {
            if promised < request.order_date {
                return Err(CoreError::invalid("promised_date", "must be on or after order_date"));
            }
        }

        let quote = self.quotes().get(quote_id)?;
        let quote_lines = self.quote_lines().find(|l| l.quote_id == quote_id, Page::default());

        let number = uow.generate_number(config, "order", request.order_date.year(), request.prefix.as_deref())?;
        self.reserve_number(&number)?;

        let order = Order {
            audit: AuditFields::new(uow.audit.now(), uow.audit.user_id()),
            number,
            company_id: quote.company_id,
            issuing_staff_id: request.issuing_staff_id,
            currency_code: quote.currency_code.clone(),
            status: OrderStatus::Pending,
            kind: request.kind,
            is_export: request.is_export,
            quote_id: Some(quote_id),
            order_date: request.order_date,
            promised_date: request.promised_date,
            completed_date: None,
            totals: quote.totals.clone(),
        };
        let saved = self.orders().create(order, &uow.audit)?;

        for line in &quote_lines {
            let order_line = OrderProduct {
                audit: AuditFields::new(uow.audit.now(), uow.audit.user_id()),
                order_id: saved.id(),
                product_id: line.product_id,
                sequence: line.sequence,
                quantity: line.quantity,
                unit_price: line.unit_price,
                discount_percentage: line.discount_percentage,
                subtotal: line.subtotal,
            };
            self.lines().create(order_line, &uow.audit)?;
        }

        Ok(saved)
    }

    pub fn mark_completed(&self, order_id: i64, today: NaiveDate, uow: &UnitOfWork) -> CoreResult<Order> {
        let mut order = self.orders().get(order_id)?;
        order.status = OrderStatus::Completed;
        order.completed_date = Some(today);
        self.orders().update(order, &uow.audit)
    }

    pub fn mark_cancelled(&self, order_id: i64, uow: &UnitOfWork) -> CoreResult<Order> {
        let mut order = self.orders().get(order_id)?;
        order.status = OrderStatus::Cancelled;
        self.orders().update(order, &uow.audit)
    }

    /// `promised_date` in the past and not completed (§4.4.2 "Overdue").
    pub fn find_overdue(&self, today: NaiveDate) -> Vec<Order> {
        self.orders().find(|o| o.is_overdue(today), Page::default())
    }

    /// Document number globally unique within its family (§4.4, §6).
    fn reserve_number(&self, number: &str) -> CoreResult<()> {
        let mut index = self.store.order_number_index.lock().unwrap_or_else(|e| e.into_inner());
        if !index.insert(number.to_string()) {
            return Err(CoreError::conflict(format!("order number already in use: {number}"))
                .with_detail("number", number));
        }
        Ok(())
    }
}
