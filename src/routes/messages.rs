//! Admin inbox for contact messages submitted through the public site.

use crate::auth::{RequireAdmin, RequireStaff};
use crate::db::AgencyDb;
use crate::error::ApiError;
use crate::models::{ContactMessage, DataResponse, MessageResponse};
use rocket::serde::json::Json;
use rocket_db_pools::{Connection, sqlx};
use rocket_okapi::openapi;

const MESSAGE_COLUMNS: &str = "id, name, email, subject, body, read, created_at";

/// List contact messages, newest first, unread first.
#[openapi(tag = "Messages")]
#[get("/messages")]
pub async fn list_messages(
    _staff: RequireStaff,
    mut db: Connection<AgencyDb>,
) -> Result<Json<DataResponse<Vec<ContactMessage>>>, ApiError> {
    let messages: Vec<ContactMessage> = sqlx::query_as(&format!(
        "SELECT {MESSAGE_COLUMNS} FROM contact_messages ORDER BY read ASC, created_at DESC"
    ))
    .fetch_all(&mut **db)
    .await?;

    Ok(Json(DataResponse { data: messages }))
}

/// Fetch one message and mark it read.
#[openapi(tag = "Messages")]
#[get("/messages/<id>")]
pub async fn get_message(
    id: i32,
    _staff: RequireStaff,
    mut db: Connection<AgencyDb>,
) -> Result<Json<ContactMessage>, ApiError> {
    let message: ContactMessage = sqlx::query_as(&format!(
        r#"UPDATE contact_messages
           SET read = true
           WHERE id = $1
           RETURNING {MESSAGE_COLUMNS}"#
    ))
    .bind(id)
    .fetch_one(&mut **db)
    .await
    .map_err(|err| match err {
        sqlx::Error::RowNotFound => ApiError::NotFound(format!("Message {} not found", id)),
        other => ApiError::from(other),
    })?;

    Ok(Json(message))
}

/// Delete a message. Admin only.
#[openapi(tag = "Messages")]
#[delete("/messages/<id>")]
pub async fn delete_message(
    id: i32,
    _admin: RequireAdmin,
    mut db: Connection<AgencyDb>,
) -> Result<Json<MessageResponse>, ApiError> {
    let result = sqlx::query("DELETE FROM contact_messages WHERE id = $1")
        .bind(id)
        .execute(&mut **db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound(format!("Message {} not found", id)));
    }

    Ok(Json(MessageResponse {
        message: format!("Message {} deleted", id),
    }))
}
