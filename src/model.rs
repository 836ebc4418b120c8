use crate::format::Formattable;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Version requested when exporting an API policy.
pub const DEFAULT_API_POLICY_VERSION: &str = "v1";

/// Number of API policies listed when neither `--limit` nor `--all` is given.
pub const DEFAULT_POLICIES_DISPLAY_LIMIT: i64 = 25;

/// Identifies one API policy within an environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyIdentifier {
    name: String,
    version: String,
}

impl PolicyIdentifier {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    /// Identifier for `name` at [`DEFAULT_API_POLICY_VERSION`].
    pub fn with_default_version(name: impl Into<String>) -> Self {
        Self::new(name, DEFAULT_API_POLICY_VERSION)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}

impl fmt::Display for PolicyIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.version)
    }
}

/// One entry of the API policy list returned by the publisher API.
///
/// Properties this client does not know about are kept in `extra` so they
/// remain available to `--format` templates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiPolicy {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub applicable_flows: Vec<String>,
    #[serde(default)]
    pub supported_gateways: Vec<String>,
    #[serde(default)]
    pub supported_api_types: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiPolicyList {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub list: Vec<ApiPolicy>,
}

impl ApiPolicyList {
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }
}

impl Formattable for ApiPolicyList {
    const DEFAULT_TABLE_FORMAT: &'static str = "table {{.Id}}\t{{.Name}}\t{{.Version}}\t\
        {{.DisplayName}}\t{{.Category}}\t{{.ApplicableFlows}}\t{{.SupportedGateways}}\t\
        {{.SupportedApiTypes}}";
    type Row = ApiPolicy;

    fn rows(&self) -> &[ApiPolicy] {
        &self.list
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIST_RESPONSE: &str = r#"{
        "count": 2,
        "list": [
            {
                "id": "a1",
                "category": "Mediation",
                "name": "addHeader",
                "version": "v1",
                "displayName": "Add Header",
                "description": "Adds a header",
                "applicableFlows": ["request", "response"],
                "supportedGateways": ["Synapse"],
                "supportedApiTypes": ["HTTP"],
                "isAPISpecific": false
            },
            {
                "id": "b2",
                "category": "Security",
                "name": "jwtValidator",
                "displayName": "JWT Validator",
                "applicableFlows": ["request"],
                "supportedGateways": ["Synapse", "ChoreoConnect"],
                "supportedApiTypes": ["HTTP"],
                "isAPISpecific": true
            }
        ],
        "pagination": {"offset": 0, "limit": 25, "total": 2}
    }"#;

    #[test]
    fn test_policy_identifier_default_version() {
        let policy = PolicyIdentifier::with_default_version("AddHeader");
        assert_eq!(policy.name(), "AddHeader");
        assert_eq!(policy.version(), "v1");
        assert_eq!(policy.to_string(), "AddHeader:v1");
    }

    #[test]
    fn test_parse_list_response() {
        let list = ApiPolicyList::from_slice(LIST_RESPONSE.as_bytes()).unwrap();
        assert_eq!(list.count, 2);
        assert_eq!(list.list[0].display_name, "Add Header");
        assert_eq!(list.list[1].version, None);
        assert_eq!(list.list[0].extra.get("isAPISpecific"), Some(&Value::Bool(false)));
    }

    #[test]
    fn test_default_table() {
        let list = ApiPolicyList::from_slice(LIST_RESPONSE.as_bytes()).unwrap();
        let output = list.format(None).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("ID"));
        assert!(lines[0].contains("DISPLAY NAME"));
        assert!(lines[0].ends_with("SUPPORTED API TYPES"));
        assert!(lines[1].contains("addHeader"));
        assert!(lines[1].contains("request, response"));
        assert!(lines[2].contains("Synapse, ChoreoConnect"));
    }

    #[test]
    fn test_template_can_use_unknown_properties() {
        let list = ApiPolicyList::from_slice(LIST_RESPONSE.as_bytes()).unwrap();
        let output = list.format(Some("{{.Name}} {{.IsAPISpecific}}")).unwrap();
        assert_eq!(output, "addHeader false\njwtValidator true");
    }

    #[test]
    fn test_empty_list_prints_only_header() {
        let list = ApiPolicyList::from_slice(br#"{"count":0,"list":[]}"#).unwrap();
        let output = list.format(None).unwrap();
        assert_eq!(output.lines().count(), 1);
    }
}
