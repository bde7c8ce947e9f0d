use fitquest_core::types::DbId;
use fitquest_db::models::user::CreateUser;
use fitquest_db::repositories::UserRepo;
use sqlx::PgPool;

/// Insert a user with a placeholder hash and return its id.
pub async fn seed_user(pool: &PgPool, username: &str, role: &str) -> DbId {
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@fitquest.test"),
            password_hash: "not-a-real-hash".to_string(),
            role: role.to_string(),
        },
    )
    .await
    .expect("user insert should succeed")
    .id
}
