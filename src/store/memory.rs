use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::{Store, StoreError};
use crate::models::{
    ChatEntry, Feedback, NewChatEntry, NewFeedback, NewSoilAnalysis, NewUser, Page, SoilAnalysis,
    User,
};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    soil: Vec<SoilAnalysis>,
    chats: Vec<ChatEntry>,
    feedback: Vec<Feedback>,
}

/// Process-local store with the same ordering and uniqueness rules as Postgres.
/// Ids are 1-based positions, mirroring `BIGSERIAL`.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn next_id(len: usize) -> i64 {
    i64::try_from(len).map_or(i64::MAX, |n| n + 1)
}

/// Sorts newest first and slices out one page.
fn paginate<T: Clone>(
    mut rows: Vec<&T>,
    page: Page,
    key: impl Fn(&T) -> (DateTime<Utc>, i64),
) -> Vec<T> {
    rows.sort_by(|a, b| key(b).cmp(&key(a)));
    let offset = usize::try_from(page.offset).unwrap_or(0);
    let limit = usize::try_from(page.limit).unwrap_or(0);
    rows.into_iter().skip(offset).take(limit).cloned().collect()
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::DuplicateEmail);
        }
        let row = User {
            id: next_id(tables.users.len()),
            email: user.email,
            password_hash: user.password_hash,
            name: user.name,
            phone_number: user.phone_number,
            location: user.location,
            language: user.language,
            created_at: Utc::now(),
        };
        tables.users.push(row.clone());
        Ok(row)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn user_exists(&self, user_id: i64) -> Result<bool, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().any(|u| u.id == user_id))
    }

    async fn insert_soil_analysis(
        &self,
        analysis: NewSoilAnalysis,
    ) -> Result<SoilAnalysis, StoreError> {
        let mut tables = self.tables.write().await;
        let row = SoilAnalysis {
            id: next_id(tables.soil.len()),
            user_id: analysis.user_id,
            image_url: analysis.image_url,
            soil_type: analysis.soil_type,
            recommendations: analysis.recommendations,
            crops: analysis.crops,
            analysis_date: analysis.analysis_date,
            created_at: Utc::now(),
        };
        tables.soil.push(row.clone());
        Ok(row)
    }

    async fn list_soil_analyses(
        &self,
        user_id: i64,
        page: Page,
    ) -> Result<Vec<SoilAnalysis>, StoreError> {
        let tables = self.tables.read().await;
        let rows = tables.soil.iter().filter(|r| r.user_id == user_id).collect();
        Ok(paginate(rows, page, |r| (r.created_at, r.id)))
    }

    async fn insert_chat(&self, entry: NewChatEntry) -> Result<ChatEntry, StoreError> {
        let mut tables = self.tables.write().await;
        let row = ChatEntry {
            id: next_id(tables.chats.len()),
            user_id: entry.user_id,
            message: entry.message,
            response: entry.response,
            language: entry.language,
            created_at: Utc::now(),
        };
        tables.chats.push(row.clone());
        Ok(row)
    }

    async fn list_chats(&self, user_id: i64, page: Page) -> Result<Vec<ChatEntry>, StoreError> {
        let tables = self.tables.read().await;
        let rows = tables.chats.iter().filter(|r| r.user_id == user_id).collect();
        Ok(paginate(rows, page, |r| (r.created_at, r.id)))
    }

    async fn insert_feedback(&self, feedback: NewFeedback) -> Result<Feedback, StoreError> {
        let mut tables = self.tables.write().await;
        let row = Feedback {
            id: next_id(tables.feedback.len()),
            user_id: feedback.user_id,
            name: feedback.name,
            email: feedback.email,
            message: feedback.message,
            rating: feedback.rating,
            created_at: Utc::now(),
        };
        tables.feedback.push(row.clone());
        Ok(row)
    }

    async fn list_feedback(
        &self,
        page: Page,
        search: Option<&str>,
    ) -> Result<Vec<Feedback>, StoreError> {
        let tables = self.tables.read().await;
        let needle = search.map(str::to_lowercase);
        let rows = tables
            .feedback
            .iter()
            .filter(|f| match &needle {
                None => true,
                Some(n) => {
                    contains_ignore_case(&f.name, n)
                        || contains_ignore_case(&f.email, n)
                        || contains_ignore_case(&f.message, n)
                }
            })
            .collect();
        Ok(paginate(rows, page, |f| (f.created_at, f.id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            email: email.into(),
            password_hash: "hash".into(),
            name: "Ramesh".into(),
            phone_number: "9876543210".into(),
            location: "Hubballi".into(),
            language: "kannada".into(),
        }
    }

    fn new_feedback(name: &str, message: &str) -> NewFeedback {
        NewFeedback {
            user_id: None,
            name: name.into(),
            email: "visitor@example.com".into(),
            message: message.into(),
            rating: 4,
        }
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let store = MemoryStore::new();
        let first = store.create_user(new_user("farmer@test.com")).await;
        assert!(first.is_ok());
        let second = store.create_user(new_user("farmer@test.com")).await;
        assert!(matches!(second, Err(StoreError::DuplicateEmail)));
    }

    #[tokio::test]
    async fn ids_follow_insertion_order() {
        let store = MemoryStore::new();
        let a = store.create_user(new_user("a@test.com")).await.expect("insert a");
        let b = store.create_user(new_user("b@test.com")).await.expect("insert b");
        assert_eq!((a.id, b.id), (1, 2));
        assert!(store.user_exists(2).await.expect("lookup"));
        assert!(!store.user_exists(3).await.expect("lookup"));
    }

    #[tokio::test]
    async fn chats_are_listed_newest_first_per_user() {
        let store = MemoryStore::new();
        for (user_id, message) in [(1, "one"), (2, "other"), (1, "two"), (1, "three")] {
            store
                .insert_chat(NewChatEntry {
                    user_id,
                    message: message.into(),
                    response: "reply".into(),
                    language: "kannada".into(),
                })
                .await
                .expect("insert chat");
        }
        let page = Page { limit: 2, offset: 0 };
        let rows = store.list_chats(1, page).await.expect("list");
        let messages: Vec<_> = rows.iter().map(|r| r.message.as_str()).collect();
        assert_eq!(messages, ["three", "two"]);

        let rest = store
            .list_chats(1, Page { limit: 10, offset: 2 })
            .await
            .expect("list");
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].message, "one");
    }

    #[tokio::test]
    async fn feedback_search_ignores_case() {
        let store = MemoryStore::new();
        store
            .insert_feedback(new_feedback("Lakshmi", "Great RICE tips"))
            .await
            .expect("insert");
        store
            .insert_feedback(new_feedback("Ramesh", "Weather was wrong"))
            .await
            .expect("insert");

        let hits = store
            .list_feedback(Page::default(), Some("rice"))
            .await
            .expect("list");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Lakshmi");

        let all = store.list_feedback(Page::default(), None).await.expect("list");
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "Ramesh");
    }
}
