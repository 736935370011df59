use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Goal record in the database: a user-owned planning entry for a period
/// label such as "2024-W12" or "Q3".
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub goal_id: i32,
    pub user_id: i32,
    pub timespan: String,
    pub goal_content: String,
}
