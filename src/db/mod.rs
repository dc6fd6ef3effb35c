//! Database module for the valuation server
//!
//! Persistence sits behind the [`Store`] trait: [`DbOperations`] talks to
//! Postgres, [`MemoryStore`] keeps records in process for development and
//! tests.

pub mod memory;
pub mod models;
pub mod operations;

use async_trait::async_trait;

use crate::Result;

pub use memory::MemoryStore;
pub use models::{Evaluation, EvaluationResult, PropertyDetails, PublicUser, User};
pub use operations::DbOperations;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Store: Send + Sync {
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Inserts a user. Fails with `DatabaseError::Duplicate` when the email
    /// is already taken.
    async fn create_user(&self, user: &User) -> Result<User>;

    /// Inserts an evaluation. The owning user must exist.
    async fn create_evaluation(&self, evaluation: &Evaluation) -> Result<Evaluation>;

    async fn close(&self) {}
}
