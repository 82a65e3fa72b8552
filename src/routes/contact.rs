//! Contact form submission endpoint for the public site.

use crate::db::AgencyDb;
use crate::error::ApiError;
use crate::models::ContactMessage;
use rocket::response::status;
use rocket::serde::json::Json;
use rocket_db_pools::{Connection, sqlx};
use rocket_okapi::okapi::schemars::JsonSchema;
use rocket_okapi::openapi;
use serde::Deserialize;

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub body: String,
}

/// Store a contact message. Validation is presence-only; the message lands
/// in the admin inbox unread.
#[openapi(tag = "Contact")]
#[post("/contact", data = "<payload>")]
pub async fn submit_contact(
    payload: Json<ContactRequest>,
    mut db: Connection<AgencyDb>,
) -> Result<status::Created<Json<ContactMessage>>, ApiError> {
    let name = payload.name.trim();
    let email = payload.email.trim();
    let body = payload.body.trim();

    if name.is_empty() || email.is_empty() || body.is_empty() {
        return Err(ApiError::BadRequest(
            "name, email, and body are required".to_string(),
        ));
    }

    let message: ContactMessage = sqlx::query_as(
        r#"INSERT INTO contact_messages (name, email, subject, body)
           VALUES ($1, $2, $3, $4)
           RETURNING id, name, email, subject, body, read, created_at"#,
    )
    .bind(name)
    .bind(email)
    .bind(payload.subject.as_deref().map(str::trim))
    .bind(body)
    .fetch_one(&mut **db)
    .await?;

    log::info!("contact message {} received from '{}'", message.id, email);

    Ok(status::Created::new("").body(Json(message)))
}
