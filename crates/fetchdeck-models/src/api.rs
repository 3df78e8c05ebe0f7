use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Generic acknowledgment returned by mutating endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub message: String,
}

/// Error payload shape used by the remote service: `detail` is either a plain
/// string or, for validation failures, a list of per-field items.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<ErrorDetail>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    Text(String),
    Items(Vec<ValidationItem>),
    Other(Value),
}

impl ErrorDetail {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ErrorDetail::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn items(&self) -> Option<&[ValidationItem]> {
        match self {
            ErrorDetail::Items(items) => Some(items),
            _ => None,
        }
    }
}

/// One entry of a 422 validation detail list.
#[derive(Debug, Clone, Deserialize)]
pub struct ValidationItem {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub loc: Vec<LocSegment>,
    #[serde(default)]
    pub msg: String,
    #[serde(default)]
    pub input: Value,
}

impl ValidationItem {
    /// Flattens `loc` into a human-readable path: `body > task_name`.
    pub fn location(&self) -> String {
        let mut path = String::new();
        for (i, segment) in self.loc.iter().enumerate() {
            if i > 0 {
                path.push_str(" > ");
            }
            match segment {
                LocSegment::Key(key) => path.push_str(key),
                LocSegment::Index(index) => path.push_str(&index.to_string()),
            }
        }
        path
    }
}

/// A `loc` path segment: a field name or a positional index.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LocSegment {
    Key(String),
    Index(u64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_flattens_mixed_segments() {
        let item: ValidationItem = serde_json::from_str(
            r#"{"type": "missing", "loc": ["body", "items", 2, "name"], "msg": "Field required", "input": null}"#,
        )
        .unwrap();
        assert_eq!(item.location(), "body > items > 2 > name");
        assert_eq!(item.kind, "missing");
        assert_eq!(item.msg, "Field required");
        assert!(item.input.is_null());
    }

    #[test]
    fn detail_parses_both_shapes() {
        let text: ErrorBody = serde_json::from_str(r#"{"detail": "no such task"}"#).unwrap();
        assert_eq!(text.detail.unwrap().as_text(), Some("no such task"));

        let items: ErrorBody = serde_json::from_str(
            r#"{"detail": [{"type": "missing", "loc": ["body"], "msg": "m", "input": 1}]}"#,
        )
        .unwrap();
        assert_eq!(items.detail.unwrap().items().unwrap().len(), 1);
    }

    #[test]
    fn detail_tolerates_unknown_shapes() {
        let odd: ErrorBody = serde_json::from_str(r#"{"detail": {"code": 9}}"#).unwrap();
        let detail = odd.detail.unwrap();
        assert!(detail.as_text().is_none());
        assert!(detail.items().is_none());
    }
}
