use crate::audit::AuditContext;
use crate::domain::Product;
use crate::error::{CoreError, CoreResult};
use crate::store::{Entity, InMemoryStore};

use super::{Page, Repository};

/// Product repository: CRUD plus `reference` uniqueness and the
/// cross-language `search` finder (§4.6: "`product.search(q)` across
/// reference + es/en/fr designations").
pub struct ProductRepository<'a> {
    inner: Repository<'a, Product>,
    store: &'a InMemoryStore,
}

impl<'a> ProductRepository<'a> {
    pub fn new(store: &'a InMemoryStore) -> Self {
        ProductRepository { inner: Repository::new(&store.products), store }
    }

    pub fn get(&self, id: i64) -> CoreResult<Product> {
        self.inner.get(id)
    }

    pub fn exists(&self, id: i64) -> bool {
        self.inner.exists(id)
    }

    /// Case-insensitive substring search across `reference` and the
    /// es/en/fr designations; never mutates.
    pub fn search(&self, query: &str, page: Page) -> Vec<Product> {
        let needle = query.to_lowercase();
        self.inner.find(
            |p| {
                p.reference.to_lowercase().contains(&needle)
                    || p.designation_es.to_lowercase().contains(&needle)
                    || p.designation_en.as_deref().is_some_and(|d| d.to_lowercase().contains(&needle))
                    || p.designation_fr.as_deref().is_some_and(|d| d.to_lowercase().contains(&needle))
            },
            page,
        )
    }

    pub fn create(&self, product: Product, audit: &AuditContext) -> CoreResult<Product> {
        self.reserve_reference(&product.reference)?;
        self.inner.create(product, audit)
    }

    pub fn update(&self, product: Product, audit: &AuditContext) -> CoreResult<Product> {
        let previous = self.inner.get(product.id())?;
        if previous.reference != product.reference {
            self.reserve_reference(&product.reference)?;
            self.release_reference(&previous.reference);
        }
        self.inner.update(product, audit)
    }

    fn reserve_reference(&self, reference: &str) -> CoreResult<()> {
        let mut index = self.store.product_reference_index.lock().unwrap_or_else(|e| e.into_inner());
        if !index.insert(reference.to_string()) {
            return Err(CoreError::conflict(format!("product reference already in use: {reference}"))
                .with_detail("reference", reference));
        }
        Ok(())
    }

    fn release_reference(&self, reference: &str) {
        self.store.product_reference_index.lock().unwrap_or_else(|e| e.into_inner()).remove(reference);
    }

    pub fn soft_delete(&self, id: i64, audit: &AuditContext) -> CoreResult<Product> {
        self.inner.soft_delete(id, audit)
    }
}
