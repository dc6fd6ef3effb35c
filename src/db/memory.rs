use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::db::models::{Evaluation, User};
use crate::db::Store;
use crate::error::{AppError, DatabaseError};
use crate::Result;

/// In-process store selected with a `memory://` database URL.
///
/// Enforces the same constraints as the Postgres schema: unique emails and
/// evaluations referencing an existing user. Contents are lost on restart.
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<String, User>>,
    evaluations: RwLock<Vec<Evaluation>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn evaluations_for(&self, user_id: Uuid) -> Vec<Evaluation> {
        self.evaluations
            .read()
            .await
            .iter()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect()
    }

    pub async fn evaluation_count(&self) -> usize {
        self.evaluations.read().await.len()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self.users.read().await.get(email).cloned())
    }

    async fn create_user(&self, user: &User) -> Result<User> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.email) {
            return Err(AppError::DatabaseError(DatabaseError::Duplicate));
        }
        users.insert(user.email.clone(), user.clone());
        Ok(user.clone())
    }

    async fn create_evaluation(&self, evaluation: &Evaluation) -> Result<Evaluation> {
        let owner_exists = self
            .users
            .read()
            .await
            .values()
            .any(|u| u.id == evaluation.user_id);
        if !owner_exists {
            return Err(AppError::DatabaseError(DatabaseError::QueryError(format!(
                "evaluation references unknown user {}",
                evaluation.user_id
            ))));
        }

        self.evaluations.write().await.push(evaluation.clone());
        Ok(evaluation.clone())
    }
}
