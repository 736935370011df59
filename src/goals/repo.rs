use sqlx::PgPool;

use crate::goals::repo_types::Goal;

impl Goal {
    pub async fn list_all(db: &PgPool) -> anyhow::Result<Vec<Goal>> {
        let goals = sqlx::query_as::<_, Goal>(
            r#"
            SELECT goal_id, user_id, timespan, goal_content
            FROM goals
            ORDER BY goal_id
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(goals)
    }

    pub async fn find_by_id(db: &PgPool, goal_id: i32) -> anyhow::Result<Option<Goal>> {
        let goal = sqlx::query_as::<_, Goal>(
            r#"
            SELECT goal_id, user_id, timespan, goal_content
            FROM goals
            WHERE goal_id = $1
            "#,
        )
        .bind(goal_id)
        .fetch_optional(db)
        .await?;
        Ok(goal)
    }

    /// Insert a goal for a user; returns the generated id. A missing owner
    /// surfaces as a foreign-key store error.
    pub async fn create(
        db: &PgPool,
        user_id: i32,
        timespan: &str,
        goal_content: &str,
    ) -> anyhow::Result<i32> {
        let goal_id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO goals (user_id, timespan, goal_content)
            VALUES ($1, $2, $3)
            RETURNING goal_id
            "#,
        )
        .bind(user_id)
        .bind(timespan)
        .bind(goal_content)
        .fetch_one(db)
        .await?;
        Ok(goal_id)
    }

    /// Returns false when no row matched the id.
    pub async fn update(
        db: &PgPool,
        goal_id: i32,
        timespan: &str,
        goal_content: &str,
    ) -> anyhow::Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE goals
            SET timespan = $2, goal_content = $3
            WHERE goal_id = $1
            "#,
        )
        .bind(goal_id)
        .bind(timespan)
        .bind(goal_content)
        .execute(db)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Returns false when no row matched the id.
    pub async fn delete(db: &PgPool, goal_id: i32) -> anyhow::Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM goals
            WHERE goal_id = $1
            "#,
        )
        .bind(goal_id)
        .execute(db)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
