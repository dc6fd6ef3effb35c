use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const DEFAULT_ROLE: &str = "USER";

/// Stored user record. `password` holds the bcrypt hash, never plain text.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            password: password_hash,
            role: DEFAULT_ROLE.to_string(),
            created_at: Utc::now(),
        }
    }
}

/// User as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub evaluation: String,
}

/// Property details submitted for appraisal, already validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDetails {
    pub address: String,
    pub area: f64,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub parking_spots: Option<i32>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    pub id: Uuid,
    #[serde(flatten)]
    pub property: PropertyDetails,
    pub result: EvaluationResult,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Evaluation {
    pub fn new(property: PropertyDetails, evaluation: String, user_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            property,
            result: EvaluationResult { evaluation },
            user_id,
            created_at: Utc::now(),
        }
    }
}
