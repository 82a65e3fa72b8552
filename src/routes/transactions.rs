//! Admin CRUD for client transactions.

use crate::auth::{RequireAdmin, RequireStaff};
use crate::db::AgencyDb;
use crate::error::ApiError;
use crate::models::{DataResponse, MessageResponse, Transaction};
use chrono::{DateTime, Utc};
use rocket::response::status;
use rocket::serde::json::Json;
use rocket_db_pools::{Connection, sqlx};
use rocket_okapi::okapi::schemars::JsonSchema;
use rocket_okapi::openapi;
use serde::Deserialize;

#[derive(Debug, Deserialize, JsonSchema)]
pub struct TransactionPayload {
    pub client_id: i32,
    pub project_id: Option<i32>,
    pub amount_cents: i64,
    pub currency: String,
    pub status: String,
    pub notes: Option<String>,
    pub occurred_at: Option<DateTime<Utc>>,
}

const TRANSACTION_COLUMNS: &str =
    "id, client_id, project_id, amount_cents, currency, status, notes, occurred_at, created_at";

/// List transactions, most recent first.
#[openapi(tag = "Transactions")]
#[get("/transactions")]
pub async fn list_transactions(
    _staff: RequireStaff,
    mut db: Connection<AgencyDb>,
) -> Result<Json<DataResponse<Vec<Transaction>>>, ApiError> {
    let transactions: Vec<Transaction> = sqlx::query_as(&format!(
        "SELECT {TRANSACTION_COLUMNS} FROM transactions ORDER BY occurred_at DESC"
    ))
    .fetch_all(&mut **db)
    .await?;

    Ok(Json(DataResponse { data: transactions }))
}

/// Get a single transaction by id.
#[openapi(tag = "Transactions")]
#[get("/transactions/<id>")]
pub async fn get_transaction(
    id: i32,
    _staff: RequireStaff,
    mut db: Connection<AgencyDb>,
) -> Result<Json<Transaction>, ApiError> {
    let transaction: Transaction = sqlx::query_as(&format!(
        "SELECT {TRANSACTION_COLUMNS} FROM transactions WHERE id = $1"
    ))
    .bind(id)
    .fetch_one(&mut **db)
    .await
    .map_err(|err| match err {
        sqlx::Error::RowNotFound => ApiError::NotFound(format!("Transaction {} not found", id)),
        other => ApiError::from(other),
    })?;

    Ok(Json(transaction))
}

/// Record a transaction. The client reference must exist; a dangling id
/// surfaces as a 400 rather than a 500.
#[openapi(tag = "Transactions")]
#[post("/transactions", data = "<payload>")]
pub async fn create_transaction(
    payload: Json<TransactionPayload>,
    _staff: RequireStaff,
    mut db: Connection<AgencyDb>,
) -> Result<status::Created<Json<Transaction>>, ApiError> {
    if payload.currency.trim().is_empty() || payload.status.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "currency and status are required".to_string(),
        ));
    }

    let transaction: Transaction = sqlx::query_as(&format!(
        r#"INSERT INTO transactions (client_id, project_id, amount_cents, currency, status, notes, occurred_at)
           VALUES ($1, $2, $3, $4, $5, $6, $7)
           RETURNING {TRANSACTION_COLUMNS}"#
    ))
    .bind(payload.client_id)
    .bind(payload.project_id)
    .bind(payload.amount_cents)
    .bind(payload.currency.trim())
    .bind(payload.status.trim())
    .bind(payload.notes.as_deref())
    .bind(payload.occurred_at.unwrap_or_else(Utc::now))
    .fetch_one(&mut **db)
    .await
    .map_err(|err| match &err {
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23503") => {
            ApiError::BadRequest("client_id or project_id does not exist".to_string())
        }
        _ => ApiError::from(err),
    })?;

    Ok(status::Created::new("").body(Json(transaction)))
}

/// Delete a transaction. Admin only.
#[openapi(tag = "Transactions")]
#[delete("/transactions/<id>")]
pub async fn delete_transaction(
    id: i32,
    _admin: RequireAdmin,
    mut db: Connection<AgencyDb>,
) -> Result<Json<MessageResponse>, ApiError> {
    let result = sqlx::query("DELETE FROM transactions WHERE id = $1")
        .bind(id)
        .execute(&mut **db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound(format!("Transaction {} not found", id)));
    }

    Ok(Json(MessageResponse {
        message: format!("Transaction {} deleted", id),
    }))
}
