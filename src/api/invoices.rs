//! Protected invoice endpoints.
//!
//! - GET `/` - List all invoices, echoing the caller's identity
//! - POST `/` - Validate and create an invoice
//!
//! Both routes sit behind the bearer auth gate. The identity is echoed in
//! responses but not used for scoping; every caller sees every invoice.

use axum::{Json, Router, extract::State, response::IntoResponse, routing::get};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::error::ApiError;
use crate::auth::ApiAuth;
use crate::impl_has_auth_state;
use crate::jwt::JwtConfig;
use crate::store::{Invoice, InvoiceItem, Store};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Clone)]
pub struct InvoicesState {
    pub store: Store,
    pub jwt: Arc<JwtConfig>,
}

impl_has_auth_state!(InvoicesState);

pub fn router(state: InvoicesState) -> Router {
    Router::new()
        .route("/", get(list_invoices).post(create_invoice))
        .with_state(state)
}

#[derive(Serialize)]
struct IdentityEcho {
    id: i64,
    username: String,
}

#[derive(Serialize)]
struct ListInvoicesResponse {
    message: &'static str,
    user: IdentityEcho,
    items: Vec<Invoice>,
}

async fn list_invoices(
    State(state): State<InvoicesState>,
    ApiAuth(user): ApiAuth,
) -> impl IntoResponse {
    Json(ListInvoicesResponse {
        message: "Protected data",
        user: IdentityEcho {
            id: user.id(),
            username: user.username().to_string(),
        },
        items: state.store.invoices().list(),
    })
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateInvoiceRequest {
    #[serde(default)]
    client: String,
    #[serde(default)]
    invoice_date: String,
    #[serde(default)]
    due_date: String,
    #[serde(default)]
    items: Vec<NewInvoiceItem>,
}

#[derive(Deserialize)]
struct NewInvoiceItem {
    #[serde(default)]
    name: String,
    #[serde(default)]
    quantity: i64,
    #[serde(default)]
    price: f64,
}

#[derive(Serialize)]
struct CreateInvoiceResponse {
    message: &'static str,
    invoice: Invoice,
}

async fn create_invoice(
    State(state): State<InvoicesState>,
    ApiAuth(_user): ApiAuth,
    Json(payload): Json<CreateInvoiceRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let client = payload.client.trim();
    if client.is_empty() {
        return Err(ApiError::bad_request("Client is required"));
    }

    let invoice_date = parse_date(&payload.invoice_date, "invoiceDate")?;
    let due_date = parse_date(&payload.due_date, "dueDate")?;

    if due_date < invoice_date {
        return Err(ApiError::bad_request(
            "Due date cannot be before the invoice date",
        ));
    }

    if payload.items.is_empty() {
        return Err(ApiError::bad_request("At least one item is required"));
    }

    let mut total = 0.0;
    let mut items = Vec::with_capacity(payload.items.len());
    for item in &payload.items {
        let name = item.name.trim();
        if name.is_empty() {
            return Err(ApiError::bad_request("Item name is required"));
        }
        if item.quantity <= 0 {
            return Err(ApiError::bad_request("Item quantity must be positive"));
        }
        if item.price <= 0.0 {
            return Err(ApiError::bad_request("Item price must be positive"));
        }

        total += item.quantity as f64 * item.price;
        items.push(InvoiceItem {
            name: name.to_string(),
            quantity: item.quantity,
            price: item.price,
        });
    }

    let invoice = state.store.invoices().create(
        client.to_string(),
        invoice_date.format(DATE_FORMAT).to_string(),
        due_date.format(DATE_FORMAT).to_string(),
        items,
        total,
    );

    Ok(Json(CreateInvoiceResponse {
        message: "Invoice created",
        invoice,
    }))
}

fn parse_date(value: &str, field: &str) -> Result<NaiveDate, ApiError> {
    if value.is_empty() {
        return Err(ApiError::bad_request(format!("{} is required", field)));
    }

    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| ApiError::bad_request(format!("{} must be a valid YYYY-MM-DD date", field)))
}
