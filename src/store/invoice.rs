//! Invoice records created through the protected resource API.

use serde::Serialize;
use std::sync::{
    Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard,
    atomic::{AtomicI64, Ordering},
};

/// A line item on an invoice. Validated by the API before it gets here.
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceItem {
    pub name: String,
    pub quantity: i64,
    pub price: f64,
}

/// A stored invoice. `total` is computed by the API at creation time.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: i64,
    pub number: String,
    pub client: String,
    pub invoice_date: String,
    pub due_date: String,
    pub items: Vec<InvoiceItem>,
    pub total: f64,
}

/// Store for invoices, in creation order.
#[derive(Clone)]
pub struct InvoiceStore {
    inner: Arc<InvoiceStoreInner>,
}

struct InvoiceStoreInner {
    invoices: RwLock<Vec<Invoice>>,
    next_id: AtomicI64,
}

impl Default for InvoiceStore {
    fn default() -> Self {
        Self {
            inner: Arc::new(InvoiceStoreInner {
                invoices: RwLock::new(Vec::new()),
                next_id: AtomicI64::new(1),
            }),
        }
    }
}

impl InvoiceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a validated invoice, assigning the next sequential id and the
    /// matching display number.
    pub fn create(
        &self,
        client: String,
        invoice_date: String,
        due_date: String,
        items: Vec<InvoiceItem>,
        total: f64,
    ) -> Invoice {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let invoice = Invoice {
            id,
            number: format!("INV-{:04}", id),
            client,
            invoice_date,
            due_date,
            items,
            total,
        };

        self.write().push(invoice.clone());
        invoice
    }

    /// All invoices, oldest first.
    pub fn list(&self) -> Vec<Invoice> {
        self.read().clone()
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Invoice>> {
        self.inner
            .invoices
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Invoice>> {
        self.inner
            .invoices
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
