pub mod issue;
pub mod tag;

pub use issue::{CreatedIssue, IssueRequest};
pub use tag::{classify, EventDecision, PayloadError, TagCreationPayload};
