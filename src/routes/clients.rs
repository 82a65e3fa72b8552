//! Admin CRUD for agency clients.

use crate::auth::{RequireAdmin, RequireStaff};
use crate::db::AgencyDb;
use crate::error::ApiError;
use crate::models::{Client, DataResponse, MessageResponse};
use rocket::response::status;
use rocket::serde::json::Json;
use rocket_db_pools::{Connection, sqlx};
use rocket_okapi::okapi::schemars::JsonSchema;
use rocket_okapi::openapi;
use serde::Deserialize;

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ClientPayload {
    pub name: String,
    pub company: Option<String>,
    pub email: String,
    pub phone: Option<String>,
}

impl ClientPayload {
    fn validate(&self) -> Result<(), ApiError> {
        if self.name.trim().is_empty() || self.email.trim().is_empty() {
            return Err(ApiError::BadRequest(
                "name and email are required".to_string(),
            ));
        }
        Ok(())
    }
}

/// List all clients, most recent first.
#[openapi(tag = "Clients")]
#[get("/clients")]
pub async fn list_clients(
    _staff: RequireStaff,
    mut db: Connection<AgencyDb>,
) -> Result<Json<DataResponse<Vec<Client>>>, ApiError> {
    let clients: Vec<Client> = sqlx::query_as(
        r#"SELECT id, name, company, email, phone, created_at
           FROM clients
           ORDER BY created_at DESC"#,
    )
    .fetch_all(&mut **db)
    .await?;

    Ok(Json(DataResponse { data: clients }))
}

/// Get a single client by id.
#[openapi(tag = "Clients")]
#[get("/clients/<id>")]
pub async fn get_client(
    id: i32,
    _staff: RequireStaff,
    mut db: Connection<AgencyDb>,
) -> Result<Json<Client>, ApiError> {
    let client: Client = sqlx::query_as(
        r#"SELECT id, name, company, email, phone, created_at
           FROM clients
           WHERE id = $1"#,
    )
    .bind(id)
    .fetch_one(&mut **db)
    .await
    .map_err(|err| match err {
        sqlx::Error::RowNotFound => ApiError::NotFound(format!("Client {} not found", id)),
        other => ApiError::from(other),
    })?;

    Ok(Json(client))
}

/// Create a client.
#[openapi(tag = "Clients")]
#[post("/clients", data = "<payload>")]
pub async fn create_client(
    payload: Json<ClientPayload>,
    _staff: RequireStaff,
    mut db: Connection<AgencyDb>,
) -> Result<status::Created<Json<Client>>, ApiError> {
    payload.validate()?;

    let client: Client = sqlx::query_as(
        r#"INSERT INTO clients (name, company, email, phone)
           VALUES ($1, $2, $3, $4)
           RETURNING id, name, company, email, phone, created_at"#,
    )
    .bind(payload.name.trim())
    .bind(payload.company.as_deref())
    .bind(payload.email.trim())
    .bind(payload.phone.as_deref())
    .fetch_one(&mut **db)
    .await?;

    Ok(status::Created::new("").body(Json(client)))
}

/// Update a client.
#[openapi(tag = "Clients")]
#[put("/clients/<id>", data = "<payload>")]
pub async fn update_client(
    id: i32,
    payload: Json<ClientPayload>,
    _staff: RequireStaff,
    mut db: Connection<AgencyDb>,
) -> Result<Json<Client>, ApiError> {
    payload.validate()?;

    let client: Client = sqlx::query_as(
        r#"UPDATE clients
           SET name = $1, company = $2, email = $3, phone = $4
           WHERE id = $5
           RETURNING id, name, company, email, phone, created_at"#,
    )
    .bind(payload.name.trim())
    .bind(payload.company.as_deref())
    .bind(payload.email.trim())
    .bind(payload.phone.as_deref())
    .bind(id)
    .fetch_one(&mut **db)
    .await
    .map_err(|err| match err {
        sqlx::Error::RowNotFound => ApiError::NotFound(format!("Client {} not found", id)),
        other => ApiError::from(other),
    })?;

    Ok(Json(client))
}

/// Delete a client. Admin only.
#[openapi(tag = "Clients")]
#[delete("/clients/<id>")]
pub async fn delete_client(
    id: i32,
    _admin: RequireAdmin,
    mut db: Connection<AgencyDb>,
) -> Result<Json<MessageResponse>, ApiError> {
    let result = sqlx::query("DELETE FROM clients WHERE id = $1")
        .bind(id)
        .execute(&mut **db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound(format!("Client {} not found", id)));
    }

    Ok(Json(MessageResponse {
        message: format!("Client {} deleted", id),
    }))
}
