//! Delivery order lifecycle service (§4.4.3).

use chrono::{Datelike, NaiveDate};

use crate::domain::{AuditFields, DeliveryOrder, DeliveryStatus};
use crate::error::{CoreError, CoreResult};
use crate::repository::{Page, Repository};
use crate::store::InMemoryStore;
use crate::uow::UnitOfWork;
use crate::CoreConfig;

pub struct CreateDeliveryRequest {
    pub order_id: i64,
    pub delivery_date: NaiveDate,
    pub prefix: Option<String>,
}

pub struct MarkDeliveredRequest {
    pub signature_name: String,
    pub signature_id: String,
    pub notes: Option<String>,
    pub today: NaiveDate,
}

pub struct DeliveryService<'a> {
    store: &'a InMemoryStore,
}

impl<'a> DeliveryService<'a> {
    pub fn new(store: &'a InMemoryStore) -> Self {
        DeliveryService { store }
    }

    fn deliveries(&self) -> Repository<'a, DeliveryOrder> {
        Repository::new(&self.store.delivery_orders)
    }

    pub fn get(&self, delivery_id: i64) -> CoreResult<DeliveryOrder> {
        self.deliveries().get(delivery_id)
    }

    pub fn create(&self, request: CreateDeliveryRequest, uow: &UnitOfWork, config: &CoreConfig) -> CoreResult<DeliveryOrder> {
        let number =
            uow.generate_number(config, "delivery", request.delivery_date.year(), request.prefix.as_deref())?;
        self.reserve_number(&number)?;
        let delivery = DeliveryOrder {
            audit: AuditFields::new(uow.audit.now(), uow.audit.user_id()),
            number,
            order_id: request.order_id,
            status: DeliveryStatus::Pending,
            delivery_date: request.delivery_date,
            actual_delivery_date: None,
            signature_name: None,
            signature_id: None,
            signature_datetime: None,
            notes: None,
        };
        self.deliveries().create(delivery, &uow.audit)
    }

    /// `mark_delivered(signature_name, signature_id, notes)` (§4.4.3).
    pub fn mark_delivered(
        &self,
        delivery_id: i64,
        request: MarkDeliveredRequest,
        uow: &UnitOfWork,
    ) -> CoreResult<DeliveryOrder> {
        let mut delivery = self.deliveries().get(delivery_id)?;
        delivery.status = DeliveryStatus::Delivered;
        delivery.actual_delivery_date = Some(request.today);
        delivery.signature_name = Some(request.signature_name);
        delivery.signature_id = Some(request.signature_id);
        delivery.signature_datetime = Some(uow.audit.now());
        if let Some(notes) = request.notes {
            delivery.notes = Some(match delivery.notes.take() {
                Some(existing) if !existing.is_empty() => format!("{existing}\n{notes}"),
                _ => notes,
            });
        }
        self.deliveries().update(delivery, &uow.audit)
    }

    pub fn mark_cancelled(&self, delivery_id: i64, uow: &UnitOfWork) -> CoreResult<DeliveryOrder> {
        let mut delivery = self.deliveries().get(delivery_id)?;
        delivery.status = DeliveryStatus::Cancelled;
        self.deliveries().update(delivery, &uow.audit)
    }

    pub fn find_late(&self, today: NaiveDate) -> Vec<DeliveryOrder> {
        self.deliveries().find(|d| d.is_late(today), Page::default())
    }

    /// Document number globally unique within its family (§4.4, §6).
    fn reserve_number(&self, number: &str) -> CoreResult<()> {
        let mut index = self.store.delivery_number_index.lock().unwrap_or_else(|e| e.into_inner());
        if !index.insert(number.to_string()) {
            return Err(CoreError::conflict(format!("delivery number already in use: {number}"))
                .with_detail("number", number));
        }
        Ok(())
    }
}
