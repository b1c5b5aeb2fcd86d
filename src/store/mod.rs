//! In-memory application state.
//!
//! All state is process-lifetime and lost on restart: registered users, the
//! refresh token ledger, and created invoices. The handle is cheap to clone;
//! every clone sees the same collections.

mod invoice;
mod token;
mod user;

pub use invoice::{Invoice, InvoiceItem, InvoiceStore};
pub use token::RefreshTokenStore;
pub use user::{User, UserStore};

/// Cloneable handle to the in-memory stores.
#[derive(Clone, Default)]
pub struct Store {
    users: UserStore,
    refresh_tokens: RefreshTokenStore,
    invoices: InvoiceStore,
}

impl Store {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn users(&self) -> &UserStore {
        &self.users
    }

    pub fn refresh_tokens(&self) -> &RefreshTokenStore {
        &self.refresh_tokens
    }

    pub fn invoices(&self) -> &InvoiceStore {
        &self.invoices
    }
}
