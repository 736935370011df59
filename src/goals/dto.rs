use serde::Deserialize;

/// Request body for goal creation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGoalRequest {
    pub user_id: i32,
    pub timespan: String,
    pub goal_content: String,
}

/// Request body for goal update; the id comes from the path.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGoalRequest {
    pub timespan: String,
    pub goal_content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_parses_camel_case() {
        let req: CreateGoalRequest = serde_json::from_str(
            r#"{"userId":4,"timespan":"2024-W20","goalContent":"Read two books"}"#,
        )
        .unwrap();
        assert_eq!(req.user_id, 4);
        assert_eq!(req.timespan, "2024-W20");
        assert_eq!(req.goal_content, "Read two books");
    }

    #[test]
    fn update_request_rejects_missing_fields() {
        assert!(serde_json::from_str::<UpdateGoalRequest>(r#"{"timespan":"Q3"}"#).is_err());
    }
}
