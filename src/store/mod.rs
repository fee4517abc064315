//! Persistence seam.
//!
//! Handlers talk to [`Store`]; [`PgStore`] backs it with Postgres and
//! [`MemoryStore`] keeps everything in process for local runs and tests.
//! Every write is a single insert, so no operation needs a transaction.

mod memory;
mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{
    ChatEntry, Feedback, NewChatEntry, NewFeedback, NewSoilAnalysis, NewUser, Page, SoilAnalysis,
    User,
};

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("email already registered")]
    DuplicateEmail,

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait Store: Send + Sync {
    /// Fails with [`StoreError::DuplicateEmail`] when the (lower-cased) email is taken.
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn user_exists(&self, user_id: i64) -> Result<bool, StoreError>;

    async fn insert_soil_analysis(
        &self,
        analysis: NewSoilAnalysis,
    ) -> Result<SoilAnalysis, StoreError>;

    /// Newest first.
    async fn list_soil_analyses(
        &self,
        user_id: i64,
        page: Page,
    ) -> Result<Vec<SoilAnalysis>, StoreError>;

    async fn insert_chat(&self, entry: NewChatEntry) -> Result<ChatEntry, StoreError>;

    /// Newest first.
    async fn list_chats(&self, user_id: i64, page: Page) -> Result<Vec<ChatEntry>, StoreError>;

    async fn insert_feedback(&self, feedback: NewFeedback) -> Result<Feedback, StoreError>;

    /// Newest first; `search` matches name, email or message, ignoring case.
    async fn list_feedback(
        &self,
        page: Page,
        search: Option<&str>,
    ) -> Result<Vec<Feedback>, StoreError>;
}
