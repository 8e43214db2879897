use serde::{Deserialize, Serialize};

use super::TagCreationPayload;

/// An issue to open on `owner/repo`. Serializes to the issues API body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueRequest {
    #[serde(skip)]
    pub owner: String,
    #[serde(skip)]
    pub repo: String,
    pub title: String,
    pub body: String,
}

/// The parts of GitHub's issue response worth logging.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatedIssue {
    pub number: u64,
    pub html_url: String,
}

impl IssueRequest {
    pub fn for_new_tag(tag: &TagCreationPayload) -> Self {
        IssueRequest {
            owner: tag.repository.owner.login.clone(),
            repo: tag.repository.name.clone(),
            title: format!("New Tag Created: {}", tag.git_ref),
            body: format!(
                "A new tag `{}` was created by @{} in the `{}` repository.",
                tag.git_ref, tag.sender.login, tag.repository.full_name
            ),
        }
    }
}
