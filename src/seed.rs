//! Demo farmer accounts for local setups.

use tracing::info;

use crate::{
    error::AppError,
    handlers::hash_password,
    models::{NewUser, DEFAULT_LANGUAGE},
    store::{Store, StoreError},
};

pub struct DemoUser {
    pub email: &'static str,
    pub password: &'static str,
    pub name: &'static str,
    pub phone_number: &'static str,
    pub location: &'static str,
}

pub const DEMO_USERS: [DemoUser; 2] = [
    DemoUser {
        email: "farmer@test.com",
        password: "farmer123",
        name: "ರಮೇಶ್ ಕುಮಾರ್ (Ramesh Kumar)",
        phone_number: "9876543210",
        location: "ಹುಬ್ಬಳ್ಳಿ (Hubballi)",
    },
    DemoUser {
        email: "test@farmer.com",
        password: "test123",
        name: "ಲಕ್ಷ್ಮಿ ದೇವಿ (Lakshmi Devi)",
        phone_number: "9876543211",
        location: "ಮೈಸೂರು (Mysore)",
    },
];

/// Inserts the demo accounts, leaving existing ones alone. Returns how many were created.
pub async fn seed_demo_users(store: &dyn Store, bcrypt_cost: u32) -> Result<usize, AppError> {
    let mut created = 0;
    for demo in &DEMO_USERS {
        let password_hash = hash_password(demo.password.to_owned(), bcrypt_cost).await?;
        let user = NewUser {
            email: demo.email.to_owned(),
            password_hash,
            name: demo.name.to_owned(),
            phone_number: demo.phone_number.to_owned(),
            location: demo.location.to_owned(),
            language: DEFAULT_LANGUAGE.to_owned(),
        };
        match store.create_user(user).await {
            Ok(row) => {
                info!(user_id = row.id, email = %row.email, "seeded demo user");
                created += 1;
            }
            Err(StoreError::DuplicateEmail) => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn seeding_twice_creates_each_user_once() {
        let store = MemoryStore::new();
        assert_eq!(seed_demo_users(&store, 4).await.expect("first seed"), 2);
        assert_eq!(seed_demo_users(&store, 4).await.expect("second seed"), 0);

        let farmer = store
            .find_user_by_email("farmer@test.com")
            .await
            .expect("lookup")
            .expect("seeded");
        assert!(bcrypt::verify("farmer123", &farmer.password_hash).expect("verify"));
    }
}
