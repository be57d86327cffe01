use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::errors::AppError;
use crate::models::role_assignment::RoleCategory;

/// Access mode the caller is asking for. Absent means a general read request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestContext {
    AllWork,
    AvailableTasks,
}

/// Task lifecycle states a search may filter on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CftTaskState {
    Assigned,
    Unassigned,
    Completed,
    Cancelled,
    Terminated,
}

impl CftTaskState {
    /// Single-character signature code. Total: every state abbreviates.
    pub fn abbreviation(self) -> char {
        match self {
            CftTaskState::Assigned => 'A',
            CftTaskState::Unassigned => 'U',
            CftTaskState::Completed => 'C',
            CftTaskState::Cancelled => 'X',
            CftTaskState::Terminated => 'T',
        }
    }
}

/// Filter criteria of one task search. Every list is optional; an empty list
/// leaves that dimension unconstrained.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct SearchRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<RequestContext>,
    #[serde(default)]
    #[schema(example = json!(["IA", "WA"]))]
    pub jurisdictions: Vec<String>,
    #[serde(default)]
    pub regions: Vec<String>,
    #[serde(default)]
    pub locations: Vec<String>,
    #[serde(default)]
    pub case_ids: Vec<String>,
    #[serde(default)]
    pub role_categories: Vec<RoleCategory>,
    #[serde(default)]
    #[schema(example = json!(["evidence"]))]
    pub work_types: Vec<String>,
    #[serde(default)]
    pub task_states: Vec<CftTaskState>,
}

impl SearchRequest {
    /// Verbatim filter values become signature fields, so they must not carry
    /// the field separator or the wildcard token.
    pub fn validate(&self) -> Result<(), AppError> {
        let verbatim_lists = [
            ("jurisdictions", &self.jurisdictions),
            ("regions", &self.regions),
            ("locations", &self.locations),
            ("case_ids", &self.case_ids),
            ("work_types", &self.work_types),
        ];

        for (field, values) in verbatim_lists {
            if let Some(bad) = values
                .iter()
                .find(|value| value.contains(':') || value.contains('*'))
            {
                return Err(AppError::bad_request(format!(
                    "{field} value {bad:?} must not contain ':' or '*'"
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_abbreviations_are_total() {
        assert_eq!(CftTaskState::Assigned.abbreviation(), 'A');
        assert_eq!(CftTaskState::Unassigned.abbreviation(), 'U');
        assert_eq!(CftTaskState::Completed.abbreviation(), 'C');
        assert_eq!(CftTaskState::Cancelled.abbreviation(), 'X');
        assert_eq!(CftTaskState::Terminated.abbreviation(), 'T');
    }

    #[test]
    fn default_request_is_unconstrained() {
        let request = SearchRequest::default();
        assert!(request.context.is_none());
        assert!(request.jurisdictions.is_empty());
        assert!(request.task_states.is_empty());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn deserializes_upstream_tokens() {
        let raw = r#"{
            "context": "AVAILABLE_TASKS",
            "jurisdictions": ["IA"],
            "role_categories": ["CTSC"],
            "task_states": ["UNASSIGNED"]
        }"#;

        let request: SearchRequest = serde_json::from_str(raw).expect("request must parse");
        assert_eq!(request.context, Some(RequestContext::AvailableTasks));
        assert_eq!(request.role_categories, vec![RoleCategory::Ctsc]);
        assert_eq!(request.task_states, vec![CftTaskState::Unassigned]);
        // omitted lists default to empty
        assert!(request.work_types.is_empty());
    }

    #[test]
    fn validate_rejects_separator_and_wildcard() {
        let request = SearchRequest {
            jurisdictions: vec!["IA:WA".to_string()],
            ..SearchRequest::default()
        };
        assert!(request.validate().is_err());

        let request = SearchRequest {
            work_types: vec!["*".to_string()],
            ..SearchRequest::default()
        };
        assert!(request.validate().is_err());

        let request = SearchRequest {
            work_types: vec!["evidence".to_string()],
            ..SearchRequest::default()
        };
        assert!(request.validate().is_ok());
    }
}
