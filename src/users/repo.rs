use sqlx::PgPool;
use time::OffsetDateTime;

use crate::users::repo_types::{User, UserStatus};

impl User {
    /// Record a fresh login session: auth hash, issue time, caller IP.
    /// Unconditional by primary key; an unknown id updates zero rows.
    pub async fn set_auth_session(
        db: &PgPool,
        user_id: i32,
        auth_hash: &str,
        now: OffsetDateTime,
        last_ip: Option<&str>,
    ) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET auth_hash = $2, auth_timestamp = $3, last_ip = $4
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .bind(auth_hash)
        .bind(now)
        .bind(last_ip)
        .execute(db)
        .await?;
        Ok(())
    }

    /// Create a user (registration). Failed-logon counter starts at 0 and
    /// last IP at NULL; returns the generated id.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        db: &PgPool,
        first_name: &str,
        last_name: &str,
        email: &str,
        user_status: UserStatus,
        password_hash: &str,
        auth_hash: Option<&str>,
        auth_timestamp: Option<OffsetDateTime>,
    ) -> anyhow::Result<i32> {
        let user_id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO users (first_name, last_name, email, user_status,
                               password_hash, auth_hash, auth_timestamp,
                               failed_logons, last_ip)
            VALUES ($1, $2, $3, $4, $5, $6, $7, 0, NULL)
            RETURNING user_id
            "#,
        )
        .bind(first_name)
        .bind(last_name)
        .bind(email)
        .bind(user_status.code())
        .bind(password_hash)
        .bind(auth_hash)
        .bind(auth_timestamp)
        .fetch_one(db)
        .await?;
        Ok(user_id)
    }

    /// Update name and email, stamping the update time. Silent no-op for an
    /// unknown id.
    pub async fn update_profile(
        db: &PgPool,
        user_id: i32,
        first_name: &str,
        last_name: &str,
        email: &str,
    ) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET first_name = $2, last_name = $3, email = $4, datetime_updated = now()
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .bind(first_name)
        .bind(last_name)
        .bind(email)
        .execute(db)
        .await?;
        Ok(())
    }

    /// Soft-delete: flags only, the row stays. Idempotent.
    pub async fn soft_delete(db: &PgPool, user_id: i32) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET is_active = FALSE, is_deleted = TRUE, datetime_updated = now()
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .execute(db)
        .await?;
        Ok(())
    }

    /// Bump the failed-logon counter and report the post-increment value.
    /// Single UPDATE so the increment is atomic in the database, never a
    /// local read-modify-write; `None` when the id matched no row.
    pub async fn increment_failed_logons(
        db: &PgPool,
        user_id: i32,
    ) -> anyhow::Result<Option<i32>> {
        let failed_logons = sqlx::query_scalar::<_, i32>(
            r#"
            UPDATE users
            SET failed_logons = failed_logons + 1
            WHERE user_id = $1
            RETURNING failed_logons
            "#,
        )
        .bind(user_id)
        .fetch_optional(db)
        .await?;
        Ok(failed_logons)
    }

    /// Lock the account. No check on the current status.
    pub async fn lock_account(db: &PgPool, user_id: i32) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET user_status = $2
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .bind(UserStatus::Locked.code())
        .execute(db)
        .await?;
        Ok(())
    }

    /// Find the holder of an active session token. Exact-string match,
    /// visible rows only.
    pub async fn find_by_auth_hash(db: &PgPool, auth_hash: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, first_name, last_name, email, user_status,
                   password_hash, auth_hash, auth_timestamp, failed_logons,
                   last_ip, is_active, is_deleted, datetime_updated
            FROM users
            WHERE auth_hash = $1 AND is_active AND NOT is_deleted
            "#,
        )
        .bind(auth_hash)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    pub async fn find_by_id(db: &PgPool, user_id: i32) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, first_name, last_name, email, user_status,
                   password_hash, auth_hash, auth_timestamp, failed_logons,
                   last_ip, is_active, is_deleted, datetime_updated
            FROM users
            WHERE user_id = $1 AND is_active AND NOT is_deleted
            "#,
        )
        .bind(user_id)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, first_name, last_name, email, user_status,
                   password_hash, auth_hash, auth_timestamp, failed_logons,
                   last_ip, is_active, is_deleted, datetime_updated
            FROM users
            WHERE email = $1 AND is_active AND NOT is_deleted
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    pub async fn list_all(db: &PgPool) -> anyhow::Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, first_name, last_name, email, user_status,
                   password_hash, auth_hash, auth_timestamp, failed_logons,
                   last_ip, is_active, is_deleted, datetime_updated
            FROM users
            WHERE is_active AND NOT is_deleted
            ORDER BY user_id
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(users)
    }
}
