//! Program request/response types for the request/response endpoint.

use serde::Deserialize;

use super::common::null_as_default;

/// Request to create a new program.
///
/// Absent or `null` fields decode as empty strings; only a body that isn't a
/// JSON object of strings is rejected.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProgramRequest {
    /// The name for the new program. May be empty.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
}

/// Query parameters for `GET /api/program`.
///
/// Decoded from the raw pair list so a repeated `q` takes its first value
/// instead of failing as a duplicate field.
#[derive(Debug, Clone, Default)]
pub struct SearchParams {
    /// Raw search text.
    pub q: Option<String>,
}

impl SearchParams {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        SearchParams {
            q: pairs
                .into_iter()
                .find(|(key, _)| key == "q")
                .map(|(_, value)| value),
        }
    }

    /// The query text, if present and non-empty.
    pub fn query(&self) -> Option<&str> {
        self.q.as_deref().filter(|q| !q.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn description_defaults_to_empty() {
        let req: CreateProgramRequest = serde_json::from_str(r#"{"name":"Foo"}"#).unwrap();
        assert_eq!(req.name, "Foo");
        assert_eq!(req.description, "");
    }

    #[test]
    fn missing_or_null_name_is_empty() {
        let req: CreateProgramRequest = serde_json::from_str(r#"{"description":"x"}"#).unwrap();
        assert_eq!(req.name, "");
        let req: CreateProgramRequest = serde_json::from_str("{}").unwrap();
        assert_eq!((req.name.as_str(), req.description.as_str()), ("", ""));
        let req: CreateProgramRequest =
            serde_json::from_str(r#"{"name":null,"description":null}"#).unwrap();
        assert_eq!(req.name, "");
    }

    #[test]
    fn wrong_field_type_is_rejected() {
        assert!(serde_json::from_str::<CreateProgramRequest>(r#"{"name":5}"#).is_err());
        assert!(serde_json::from_str::<CreateProgramRequest>("[]").is_err());
    }

    #[test]
    fn first_q_wins() {
        let pairs = vec![
            ("page".to_string(), "2".to_string()),
            ("q".to_string(), "pasta".to_string()),
            ("q".to_string(), "quantum".to_string()),
        ];
        assert_eq!(SearchParams::from_pairs(pairs).query(), Some("pasta"));
        assert_eq!(SearchParams::from_pairs(Vec::new()).query(), None);
    }

    #[test]
    fn empty_query_is_absent() {
        let params = SearchParams { q: Some(String::new()) };
        assert_eq!(params.query(), None);
        assert_eq!(SearchParams::default().query(), None);
        let params = SearchParams { q: Some(" a ".into()) };
        assert_eq!(params.query(), Some(" a "));
    }
}
