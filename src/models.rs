use chrono::{DateTime, Utc};
use rocket_db_pools::sqlx::FromRow;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ===== Admin Resource Models =====

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, FromRow)]
pub struct Client {
    pub id: i32,
    pub name: String,
    pub company: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, FromRow)]
pub struct Project {
    pub id: i32,
    pub client_id: Option<i32>,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub tech_stack: Option<String>,
    pub image_url: Option<String>,
    pub published: bool,
    pub created_at: Option<DateTime<Utc>>,
}

/// Monetary amounts are stored in cents to keep arithmetic exact.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, FromRow)]
pub struct Transaction {
    pub id: i32,
    pub client_id: i32,
    pub project_id: Option<i32>,
    pub amount_cents: i64,
    pub currency: String,
    pub status: String,
    pub notes: Option<String>,
    pub occurred_at: DateTime<Utc>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, FromRow)]
pub struct ContactMessage {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub body: String,
    pub read: bool,
    pub created_at: Option<DateTime<Utc>>,
}

// ===== Marketing Site Content =====

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, FromRow)]
pub struct Service {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub icon: Option<String>,
    pub display_order: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, FromRow)]
pub struct TeamMember {
    pub id: i32,
    pub name: String,
    pub role_title: String,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub display_order: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, FromRow)]
pub struct Testimonial {
    pub id: i32,
    pub author: String,
    pub company: Option<String>,
    pub quote: String,
    pub display_order: i32,
}

// ===== Generic Response Wrappers =====

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DataResponse<T> {
    pub data: T,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MessageResponse {
    pub message: String,
}
