use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use super::{Entity, SequenceLockStore};
use crate::domain::{
    Address, Company, CompanyRut, Contact, DeliveryOrder, InvoiceExport, InvoiceSii, Note, Order,
    OrderProduct, PaymentCondition, Plant, Principal, Product, ProductComponent, Quote,
    QuoteProduct, Service,
};
use crate::error::{CoreError, CoreResult};

/// A generic in-memory row collection with monotonic id assignment.
/// Mirrors the shape of a single RDBMS table; the uniqueness and
/// relational invariants layered on top live in the repository layer.
pub struct Table<T> {
    rows: HashMap<i64, T>,
    next_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Table { rows: HashMap::new(), next_id: 1 }
    }
}

impl<T: Entity> Table<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: i64) -> Option<T> {
        self.rows.get(&id).cloned()
    }

    pub fn get_many(&self, ids: &[i64]) -> Vec<T> {
        ids.iter().filter_map(|id| self.rows.get(id).cloned()).collect()
    }

    pub fn exists(&self, id: i64) -> bool {
        self.rows.contains_key(&id)
    }

    pub fn count(&self) -> usize {
        self.rows.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.rows.values()
    }

    pub fn insert(&mut self, mut entity: T) -> T {
        let id = self.next_id;
        self.next_id += 1;
        entity.set_id(id);
        self.rows.insert(id, entity.clone());
        entity
    }

    pub fn update(&mut self, entity: T) -> CoreResult<T> {
        let id = entity.id();
        if !self.rows.contains_key(&id) {
            return Err(CoreError::not_found(T::kind(), id));
        }
        self.rows.insert(id, entity.clone());
        Ok(entity)
    }

    pub fn delete(&mut self, id: i64) -> CoreResult<()> {
        self.rows.remove(&id).map(|_| ()).ok_or_else(|| CoreError::not_found(T::kind(), id))
    }
}

/// In-memory reference implementation of the outbound store (§4.6, §6).
/// Suitable for unit/integration tests and single-process embedding.
#[derive(Default)]
pub struct InMemoryStore {
    pub principals: Mutex<Table<Principal>>,
    pub companies: Mutex<Table<Company>>,
    pub company_ruts: Mutex<Table<CompanyRut>>,
    pub plants: Mutex<Table<Plant>>,
    pub contacts: Mutex<Table<Contact>>,
    pub services: Mutex<Table<Service>>,
    pub addresses: Mutex<Table<Address>>,
    pub notes: Mutex<Table<Note>>,
    pub products: Mutex<Table<Product>>,
    pub product_components: Mutex<Table<ProductComponent>>,
    pub quotes: Mutex<Table<Quote>>,
    pub quote_products: Mutex<Table<QuoteProduct>>,
    pub orders: Mutex<Table<Order>>,
    pub order_products: Mutex<Table<OrderProduct>>,
    pub delivery_orders: Mutex<Table<DeliveryOrder>>,
    pub invoices_sii: Mutex<Table<InvoiceSii>>,
    pub invoices_export: Mutex<Table<InvoiceExport>>,
    pub payment_conditions: Mutex<Table<PaymentCondition>>,
    pub sequences: SequenceLockStore,

    /// Uniqueness indexes maintained alongside the tables above, standing
    /// in for the RDBMS unique constraints named in §6.
    pub trigram_index: Mutex<HashSet<String>>,
    pub rut_index: Mutex<HashSet<String>>,
    pub product_reference_index: Mutex<HashSet<String>>,
    pub service_name_index: Mutex<HashSet<String>>,
    pub payment_condition_code_index: Mutex<HashSet<String>>,

    /// One uniqueness index per document family, backing "document number
    /// globally unique within its family" (§4.4, §6 "the document-number
    /// columns").
    pub quote_number_index: Mutex<HashSet<String>>,
    pub order_number_index: Mutex<HashSet<String>>,
    pub delivery_number_index: Mutex<HashSet<String>>,
    pub invoice_sii_number_index: Mutex<HashSet<String>>,
    pub invoice_export_number_index: Mutex<HashSet<String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}
