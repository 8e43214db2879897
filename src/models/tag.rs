use serde::Deserialize;
use serde_json::Value as JsonValue;

pub const CREATE_EVENT: &str = "create";
pub const TAG_REF_TYPE: &str = "tag";

/// The subset of a GitHub `create` event payload needed to announce a tag.
///
/// `ref_type` has already been checked by [`classify`] when one of these exists.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TagCreationPayload {
    #[serde(rename = "ref")]
    pub git_ref: String,
    pub repository: RepositoryRef,
    pub sender: Account,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RepositoryRef {
    pub name: String,
    pub full_name: String,
    pub owner: Account,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Account {
    pub login: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventDecision {
    Ignore,
    CreateTag(TagCreationPayload),
}

#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error("Invalid JSON payload: {0}")]
    InvalidJson(serde_json::Error),
    #[error("Missing fields in tag creation payload: {0}")]
    MissingFields(serde_json::Error),
}

/// Decides whether a delivery is a tag creation worth acting on.
///
/// Only `create` deliveries have their body parsed; anything else is ignored
/// untouched.
pub fn classify(event_type: Option<&str>, body: &[u8]) -> Result<EventDecision, PayloadError> {
    if event_type != Some(CREATE_EVENT) {
        return Ok(EventDecision::Ignore);
    }

    let payload: JsonValue = serde_json::from_slice(body).map_err(PayloadError::InvalidJson)?;

    if payload["ref_type"].as_str() != Some(TAG_REF_TYPE) {
        return Ok(EventDecision::Ignore);
    }

    let tag = serde_json::from_value(payload).map_err(PayloadError::MissingFields)?;

    Ok(EventDecision::CreateTag(tag))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TAG_BODY: &str = r#"{
        "ref_type": "tag",
        "ref": "v1.0.0",
        "master_branch": "main",
        "repository": {
            "id": 42,
            "owner": { "login": "acme" },
            "name": "widgets",
            "full_name": "acme/widgets"
        },
        "sender": { "login": "bob" }
    }"#;

    #[test]
    fn test_tag_creation_is_matched() {
        let decision = classify(Some("create"), TAG_BODY.as_bytes()).unwrap();

        let EventDecision::CreateTag(tag) = decision else {
            panic!("expected a tag creation, got {decision:?}");
        };
        assert_eq!(tag.git_ref, "v1.0.0");
        assert_eq!(tag.repository.owner.login, "acme");
        assert_eq!(tag.repository.name, "widgets");
        assert_eq!(tag.repository.full_name, "acme/widgets");
        assert_eq!(tag.sender.login, "bob");
    }

    #[test]
    fn test_other_event_types_are_ignored_without_parsing() {
        assert_eq!(
            classify(Some("push"), b"not json at all").unwrap(),
            EventDecision::Ignore
        );
        assert_eq!(
            classify(Some("release"), TAG_BODY.as_bytes()).unwrap(),
            EventDecision::Ignore
        );
        assert_eq!(
            classify(None, TAG_BODY.as_bytes()).unwrap(),
            EventDecision::Ignore
        );
    }

    #[test]
    fn test_event_type_is_case_sensitive() {
        assert_eq!(
            classify(Some("Create"), TAG_BODY.as_bytes()).unwrap(),
            EventDecision::Ignore
        );
    }

    #[test]
    fn test_branch_creation_is_ignored() {
        let body = br#"{"ref_type":"branch","ref":"feature/x"}"#;

        assert_eq!(
            classify(Some("create"), body).unwrap(),
            EventDecision::Ignore
        );
    }

    #[test]
    fn test_missing_ref_type_is_ignored() {
        assert_eq!(
            classify(Some("create"), b"{}").unwrap(),
            EventDecision::Ignore
        );
    }

    #[test]
    fn test_malformed_json_on_create_is_an_error() {
        let err = classify(Some("create"), b"{not json").unwrap_err();

        assert!(matches!(err, PayloadError::InvalidJson(_)));
    }

    #[test]
    fn test_incomplete_tag_payload_is_an_error() {
        let body = br#"{"ref_type":"tag","ref":"v1.0.0","sender":{"login":"bob"}}"#;
        let err = classify(Some("create"), body).unwrap_err();

        assert!(matches!(err, PayloadError::MissingFields(_)));
    }
}
