//! Invoice lifecycle service (§4.4.4) — domestic SII and export invoices.
//! Both enforce uniqueness and totals; tax-authority encoding is out of
//! scope for the core.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::domain::{AuditFields, InvoiceExport, InvoicePaymentStatus, InvoiceSii};
use crate::error::{CoreError, CoreResult};
use crate::repository::Repository;
use crate::store::InMemoryStore;
use crate::uow::UnitOfWork;
use crate::CoreConfig;

pub struct CreateInvoiceRequest {
    pub company_id: i64,
    pub order_id: Option<i64>,
    pub currency_code: String,
    pub invoice_date: NaiveDate,
    pub subtotal: Decimal,
    pub tax_percentage: Decimal,
    pub prefix: Option<String>,
}

pub struct InvoiceService<'a> {
    store: &'a InMemoryStore,
}

impl<'a> InvoiceService<'a> {
    pub fn new(store: &'a InMemoryStore) -> Self {
        InvoiceService { store }
    }

    fn domestic(&self) -> Repository<'a, InvoiceSii> {
        Repository::new(&self.store.invoices_sii)
    }

    fn export(&self) -> Repository<'a, InvoiceExport> {
        Repository::new(&self.store.invoices_export)
    }

    pub fn get_domestic(&self, id: i64) -> CoreResult<InvoiceSii> {
        self.domestic().get(id)
    }

    pub fn get_export(&self, id: i64) -> CoreResult<InvoiceExport> {
        self.export().get(id)
    }

    pub fn create_domestic(
        &self,
        request: CreateInvoiceRequest,
        uow: &UnitOfWork,
        config: &CoreConfig,
    ) -> CoreResult<InvoiceSii> {
        let totals = super::totals::recompute(request.subtotal, request.tax_percentage);
        let number =
            uow.generate_number(config, "invoice_sii", request.invoice_date.year(), request.prefix.as_deref())?;
        self.reserve_domestic_number(&number)?;
        let invoice = InvoiceSii {
            audit: AuditFields::new(uow.audit.now(), uow.audit.user_id()),
            invoice_number: number,
            company_id: request.company_id,
            order_id: request.order_id,
            currency_code: request.currency_code,
            invoice_date: request.invoice_date,
            payment_status: InvoicePaymentStatus::Unpaid,
            totals,
        };
        self.domestic().create(invoice, &uow.audit)
    }

    pub fn create_export(
        &self,
        request: CreateInvoiceRequest,
        destination_country_code: String,
        uow: &UnitOfWork,
        config: &CoreConfig,
    ) -> CoreResult<InvoiceExport> {
        let totals = super::totals::recompute(request.subtotal, request.tax_percentage);
        let number =
            uow.generate_number(config, "invoice_export", request.invoice_date.year(), request.prefix.as_deref())?;
        self.reserve_export_number(&number)?;
        let invoice = InvoiceExport {
            audit: AuditFields::new(uow.audit.now(), uow.audit.user_id()),
            invoice_number: number,
            company_id: request.company_id,
            order_id: request.order_id,
            currency_code: request.currency_code,
            invoice_date: request.invoice_date,
            payment_status: InvoicePaymentStatus::Unpaid,
            destination_country_code,
            totals,
        };
        self.export().create(invoice, &uow.audit)
    }

    pub fn mark_domestic_paid(&self, id: i64, uow: &UnitOfWork) -> CoreResult<InvoiceSii> {
        let mut invoice = self.domestic().get(id)?;
        invoice.payment_status = InvoicePaymentStatus::Paid;
        self.domestic().update(invoice, &uow.audit)
    }

    pub fn mark_export_paid(&self, id: i64, uow: &UnitOfWork) -> CoreResult<InvoiceExport> {
        let mut invoice = self.export().get(id)?;
        invoice.payment_status = InvoicePaymentStatus::Paid;
        self.export().update(invoice, &uow.audit)
    }

    /// Document number globally unique within its family (§4.4, §6). The
    /// two invoice families are sibling entities with separate number
    /// buckets and separate storage indexes.
    fn reserve_domestic_number(&self, number: &str) -> CoreResult<()> {
        let mut index = self.store.invoice_sii_number_index.lock().unwrap_or_else(|e| e.into_inner());
        if !index.insert(number.to_string()) {
            return Err(CoreError::conflict(format!("invoice number already in use: {number}"))
                .with_detail("number", number));
        }
        Ok(())
    }

    fn reserve_export_number(&self, number: &str) -> CoreResult<()> {
        let mut index = self.store.invoice_export_number_index.lock().unwrap_or_else(|e| e.into_inner());
        if !index.insert(number.to_string()) {
            return Err(CoreError::conflict(format!("invoice number already in use: {number}"))
                .with_detail("number", number));
        }
        Ok(())
    }
}
