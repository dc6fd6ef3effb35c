use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

use crate::db::models::{Evaluation, EvaluationResult, PropertyDetails, User};
use crate::db::Store;
use crate::Result;

const USER_COLUMNS: &str = "id, name, email, password, role, created_at";

pub struct DbOperations {
    pool: Arc<PgPool>,
}

impl DbOperations {
    pub async fn new_with_options(
        url: &str,
        max_connections: u32,
        acquire_timeout: Duration,
    ) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(acquire_timeout)
            .connect(url)
            .await?;

        Ok(Self { pool: Arc::new(pool) })
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(self.pool.as_ref()).await?;
        info!("Database migrations applied");
        Ok(())
    }
}

#[async_trait]
impl Store for DbOperations {
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE email = $1",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(user)
    }

    async fn create_user(&self, user: &User) -> Result<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (id, name, email, password, role, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password)
        .bind(&user.role)
        .bind(user.created_at)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(user)
    }

    async fn create_evaluation(&self, evaluation: &Evaluation) -> Result<Evaluation> {
        let property = &evaluation.property;
        let row = sqlx::query_as::<_, EvaluationRow>(
            r#"
            INSERT INTO evaluations
                (id, address, area, bedrooms, bathrooms, parking_spots, description, result, user_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id, address, area, bedrooms, bathrooms, parking_spots, description, result, user_id, created_at
            "#,
        )
        .bind(evaluation.id)
        .bind(&property.address)
        .bind(property.area)
        .bind(property.bedrooms)
        .bind(property.bathrooms)
        .bind(property.parking_spots)
        .bind(&property.description)
        .bind(Json(&evaluation.result))
        .bind(evaluation.user_id)
        .bind(evaluation.created_at)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

#[derive(Debug, FromRow)]
struct EvaluationRow {
    id: Uuid,
    address: String,
    area: f64,
    bedrooms: Option<i32>,
    bathrooms: Option<i32>,
    parking_spots: Option<i32>,
    description: Option<String>,
    result: Json<EvaluationResult>,
    user_id: Uuid,
    created_at: DateTime<Utc>,
}

impl From<EvaluationRow> for Evaluation {
    fn from(row: EvaluationRow) -> Self {
        Self {
            id: row.id,
            property: PropertyDetails {
                address: row.address,
                area: row.area,
                bedrooms: row.bedrooms,
                bathrooms: row.bathrooms,
                parking_spots: row.parking_spots,
                description: row.description,
            },
            result: row.result.0,
            user_id: row.user_id,
            created_at: row.created_at,
        }
    }
}
