//! Relationship request builder.
//!
//! Pure construction of (method, path, query, body) for node and relationship
//! operations. Path segments are appended in strict order:
//! `node / id / relation / related-type / related-id`, omitting anything
//! unset. Nothing here validates segment combinations; a malformed path
//! surfaces at the transport layer.

use serde_json::Value;

/// The closed set of operations the graph API supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Create,
    Update,
    Delete,
}

impl Method {
    pub fn http(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Create => reqwest::Method::POST,
            Self::Update => reqwest::Method::PUT,
            Self::Delete => reqwest::Method::DELETE,
        }
    }

    pub fn verb(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Create => "POST",
            Self::Update => "PUT",
            Self::Delete => "DELETE",
        }
    }

    /// Reads are idempotent and safe to retry at the transport layer.
    pub fn is_read(self) -> bool {
        matches!(self, Self::Get)
    }
}

/// Graph vertex types addressable in a request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    User,
    Group,
    Licence,
    Concept,
    /// Preference nodes exist only as relation targets (e.g. `email-digest`).
    Preference,
}

impl NodeType {
    pub fn segment(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Group => "group",
            Self::Licence => "licence",
            Self::Concept => "concept",
            Self::Preference => "preference",
        }
    }
}

/// Typed directed edge kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Member,
    Followed,
    Preference,
}

impl Relation {
    pub fn segment(self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Followed => "followed",
            Self::Preference => "preferred",
        }
    }
}

/// A fully built request, ready for the transport layer.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

fn query_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Build a request from its parts.
///
/// For [`Method::Get`], `data` is merged into the query string; for every
/// other method it becomes the JSON body.
#[allow(clippy::too_many_arguments)]
pub fn build_request(
    method: Method,
    node: NodeType,
    id: Option<&str>,
    relation: Option<Relation>,
    related: Option<NodeType>,
    related_id: Option<&str>,
    data: Option<Value>,
    params: Vec<(String, String)>,
) -> GraphRequest {
    let mut segments = vec![node.segment().to_string()];
    if let Some(id) = id {
        segments.push(id.to_string());
    }
    if let Some(relation) = relation {
        segments.push(relation.segment().to_string());
    }
    if let Some(related) = related {
        segments.push(related.segment().to_string());
    }
    if let Some(related_id) = related_id {
        segments.push(related_id.to_string());
    }

    let mut query = params;
    let body = match (&method, data) {
        (Method::Get, Some(Value::Object(map))) => {
            query.extend(map.iter().map(|(k, v)| (k.clone(), query_value(v))));
            None
        }
        (Method::Get, _) => None,
        (_, data) => data,
    };

    GraphRequest {
        method,
        path: segments.join("/"),
        query,
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_segments_in_strict_order() {
        let request = build_request(
            Method::Get,
            NodeType::Licence,
            Some("lic-1"),
            Some(Relation::Member),
            Some(NodeType::User),
            Some("user-1"),
            None,
            vec![],
        );
        assert_eq!(request.path, "licence/lic-1/member/user/user-1");
        assert!(request.body.is_none());
    }

    #[test]
    fn test_unset_segments_are_omitted() {
        let request = build_request(
            Method::Get,
            NodeType::User,
            Some("u1"),
            Some(Relation::Followed),
            Some(NodeType::Concept),
            None,
            None,
            vec![],
        );
        assert_eq!(request.path, "user/u1/followed/concept");

        let request = build_request(
            Method::Get,
            NodeType::Concept,
            None,
            None,
            None,
            None,
            None,
            vec![],
        );
        assert_eq!(request.path, "concept");
    }

    #[test]
    fn test_get_merges_data_into_query() {
        let request = build_request(
            Method::Get,
            NodeType::User,
            Some("u1"),
            Some(Relation::Followed),
            Some(NodeType::Concept),
            None,
            Some(json!({"page": 2, "limit": 500})),
            vec![("noEvent".to_string(), "true".to_string())],
        );
        assert!(request.body.is_none());
        assert!(request
            .query
            .contains(&("noEvent".to_string(), "true".to_string())));
        assert!(request
            .query
            .contains(&("page".to_string(), "2".to_string())));
        assert!(request
            .query
            .contains(&("limit".to_string(), "500".to_string())));
    }

    #[test]
    fn test_write_puts_data_in_body() {
        let data = json!({"ids": ["c1", "c2"]});
        let request = build_request(
            Method::Create,
            NodeType::User,
            Some("u1"),
            Some(Relation::Followed),
            Some(NodeType::Concept),
            None,
            Some(data.clone()),
            vec![],
        );
        assert_eq!(request.body, Some(data));
        assert_eq!(request.method.verb(), "POST");
    }

    #[test]
    fn test_method_mapping_is_exhaustive() {
        assert_eq!(Method::Get.http(), reqwest::Method::GET);
        assert_eq!(Method::Create.http(), reqwest::Method::POST);
        assert_eq!(Method::Update.http(), reqwest::Method::PUT);
        assert_eq!(Method::Delete.http(), reqwest::Method::DELETE);
        assert!(Method::Get.is_read());
        assert!(!Method::Delete.is_read());
    }
}
