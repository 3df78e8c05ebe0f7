use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::token_set::TokenSet;

/// Downstream Enigx tenant/project routing plus the credential used to push
/// fetched data into it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnigxConfig {
    pub tenant_id: String,
    pub project_id: String,
    pub bearer_token: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchMethod {
    #[default]
    Get,
    Post,
}

/// How the execution engine parses the fetched response body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchDataType {
    #[default]
    Json,
    File,
    Html,
}

/// Whether token entries are injected as HTTP headers or query parameters
/// when the task executes remotely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchTokenType {
    #[default]
    HeaderToken,
    QueryToken,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FetchAuthToken {
    #[serde(rename = "type")]
    pub token_type: FetchTokenType,
    pub token: TokenSet,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchConfig {
    pub method: FetchMethod,
    pub url: String,
    pub auth_token: FetchAuthToken,
    pub data_type: FetchDataType,
    /// The single HTTP status the execution engine treats as success.
    pub success_code: u16,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            method: FetchMethod::Get,
            url: String::new(),
            auth_token: FetchAuthToken::default(),
            data_type: FetchDataType::Json,
            success_code: 200,
        }
    }
}

/// Task family. Selecting a non-default family seeds the fetch config with a
/// template for that API; the fields stay freely editable afterwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    #[default]
    Normal,
    Rezponza,
}

/// Desired configuration of one task, as sent to the remote store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskConfig {
    pub user_id: Option<String>,
    pub task_name: String,
    pub task_type: TaskType,
    pub description: String,
    pub fetch_config: FetchConfig,
    pub enigx_config: EnigxConfig,
    /// Advisory cadence for the scheduler; does not itself start scheduling.
    pub interval_secs: u64,
    #[serde(default)]
    pub task_args: TokenSet,
}

impl TaskConfig {
    /// Fixed seed for a task being created from scratch.
    pub fn template(user_id: Option<String>) -> Self {
        Self {
            user_id,
            task_name: "New task".to_string(),
            task_type: TaskType::Normal,
            description: "This is a new task".to_string(),
            fetch_config: FetchConfig {
                method: FetchMethod::Get,
                url: "https://target.api.com/api/v1/endpoint".to_string(),
                auth_token: FetchAuthToken {
                    token_type: FetchTokenType::HeaderToken,
                    token: TokenSet::new(),
                },
                data_type: FetchDataType::Json,
                success_code: 200,
            },
            enigx_config: EnigxConfig::default(),
            interval_secs: 60,
            task_args: TokenSet::new(),
        }
    }
}

/// Fetch-config template applied when a task is switched to [`TaskType::Rezponza`].
pub fn rezponza_fetch_template() -> FetchConfig {
    FetchConfig {
        method: FetchMethod::Post,
        url: "https://api.rezponza.com/api/v2/export".to_string(),
        auth_token: FetchAuthToken {
            token_type: FetchTokenType::HeaderToken,
            token: [("X-Api-Key".to_string(), String::new())]
                .into_iter()
                .collect(),
        },
        data_type: FetchDataType::Json,
        success_code: 200,
    }
}

/// A persisted task as returned by the remote store: the configuration plus
/// server-owned identity and schedule state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskConfigRead {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub config: TaskConfig,
    #[serde(default)]
    pub is_scheduled: bool,
    #[serde(default)]
    pub next_run_time: Option<DateTime<Utc>>,
}

impl TaskConfigRead {
    /// Strips the server-owned fields, yielding the editable configuration.
    pub fn into_config(self) -> TaskConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enums_use_lowercase_wire_names() {
        assert_eq!(serde_json::to_string(&FetchMethod::Get).unwrap(), r#""get""#);
        assert_eq!(serde_json::to_string(&FetchDataType::Html).unwrap(), r#""html""#);
        assert_eq!(
            serde_json::to_string(&FetchTokenType::HeaderToken).unwrap(),
            r#""header_token""#
        );
        assert_eq!(
            serde_json::to_string(&TaskType::Rezponza).unwrap(),
            r#""rezponza""#
        );
    }

    #[test]
    fn task_config_read_round_trip() {
        // Parsed from text so token-map document order reaches the visitor.
        let raw = r#"{
            "_id": "abc123",
            "user_id": "u1",
            "task_name": "T",
            "task_type": "normal",
            "description": "d",
            "fetch_config": {
                "method": "get",
                "url": "https://x",
                "auth_token": {
                    "type": "header_token",
                    "token": {"b": "2", "a": "1"}
                },
                "data_type": "json",
                "success_code": 200
            },
            "enigx_config": {
                "tenant_id": "t",
                "project_id": "p",
                "bearer_token": "s"
            },
            "interval_secs": 60,
            "task_args": {},
            "is_scheduled": true,
            "next_run_time": "2025-01-02T03:04:05Z"
        }"#;

        let task: TaskConfigRead = serde_json::from_str(raw).unwrap();
        assert_eq!(task.id.as_deref(), Some("abc123"));
        assert!(task.is_scheduled);
        assert!(task.next_run_time.is_some());
        // Document order of the token map survives parsing.
        assert_eq!(task.config.fetch_config.auth_token.token.get(0), Some(("b", "2")));
        assert_eq!(task.config.fetch_config.auth_token.token.get(1), Some(("a", "1")));

        // Text round trip: token order is emitted as held in memory.
        let emitted = serde_json::to_string(&task).unwrap();
        let reparsed: TaskConfigRead = serde_json::from_str(&emitted).unwrap();
        assert_eq!(reparsed, task);
        assert_eq!(
            reparsed.config.fetch_config.auth_token.token.get(0),
            Some(("b", "2"))
        );
    }

    #[test]
    fn missing_read_fields_default() {
        let raw = serde_json::json!({
            "_id": null,
            "user_id": null,
            "task_name": "T",
            "task_type": "normal",
            "description": "",
            "fetch_config": {
                "method": "get",
                "url": "",
                "auth_token": {"type": "header_token", "token": {}},
                "data_type": "json",
                "success_code": 200
            },
            "enigx_config": {"tenant_id": "", "project_id": "", "bearer_token": ""},
            "interval_secs": 0
        });

        let task: TaskConfigRead = serde_json::from_value(raw).unwrap();
        assert!(task.id.is_none());
        assert!(!task.is_scheduled);
        assert!(task.next_run_time.is_none());
        assert!(task.config.task_args.is_empty());
    }

    #[test]
    fn rezponza_template_shape() {
        let fetch = rezponza_fetch_template();
        assert_eq!(fetch.method, FetchMethod::Post);
        assert_eq!(fetch.data_type, FetchDataType::Json);
        assert_eq!(fetch.success_code, 200);
        assert!(fetch.auth_token.token.contains_key("X-Api-Key"));
    }
}
