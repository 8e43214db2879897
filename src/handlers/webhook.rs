use crate::config::Config;
use crate::models::{classify, EventDecision, IssueRequest, PayloadError, TagCreationPayload};
use crate::services::{GitHubError, IssueCreator};
use crate::utils::{verify_github_signature, SignatureError};
use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse, ResponseError};
use uuid::Uuid;

pub const SIGNATURE_HEADER: &str = "X-Hub-Signature-256";
pub const EVENT_HEADER: &str = "X-GitHub-Event";
pub const DELIVERY_HEADER: &str = "X-GitHub-Delivery";

#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    #[error(transparent)]
    Signature(#[from] SignatureError),
    #[error(transparent)]
    Payload(#[from] PayloadError),
    #[error("Failed to create GitHub issue: {0}")]
    IssueCreation(#[from] GitHubError),
}

impl ResponseError for WebhookError {
    fn status_code(&self) -> StatusCode {
        match self {
            WebhookError::Signature(_) => StatusCode::FORBIDDEN,
            WebhookError::Payload(_) | WebhookError::IssueCreation(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            WebhookError::Signature(e) => HttpResponse::Forbidden().json(serde_json::json!({
                "error": "Forbidden",
                "message": e.to_string()
            })),
            // Detail stays in the logs.
            WebhookError::Payload(_) | WebhookError::IssueCreation(_) => {
                HttpResponse::InternalServerError().body("Internal server error")
            }
        }
    }
}

/// `POST /webhook`: verify, filter, then file an issue for new tags.
pub async fn github_webhook(
    req: HttpRequest,
    body: web::Bytes,
    config: web::Data<Config>,
    issues: web::Data<dyn IssueCreator>,
) -> Result<HttpResponse, WebhookError> {
    let delivery = extract_delivery_id(&req)
        .map(|id| id.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    let event_type = header_str(&req, EVENT_HEADER);
    let signature = header_str(&req, SIGNATURE_HEADER).filter(|s| !s.is_empty());

    // Signature is checked against the body bytes exactly as received.
    verify_github_signature(&config.webhook_secret, &body, signature).map_err(|e| {
        log::warn!("Rejected webhook delivery {delivery}: {e}");
        e
    })?;

    let tag = match classify(event_type, &body) {
        Ok(EventDecision::CreateTag(tag)) => tag,
        Ok(EventDecision::Ignore) => {
            log::info!(
                "Ignored webhook event {} (delivery: {delivery})",
                event_type.unwrap_or("<none>")
            );
            return Ok(HttpResponse::Ok().body("Ignored event"));
        }
        Err(e) => {
            log::error!("Webhook processing error for delivery {delivery}: {e}");
            return Err(e.into());
        }
    };

    announce_tag(issues.get_ref(), &tag).await.map_err(|e| {
        log::error!("Webhook processing error for delivery {delivery}: {e}");
        e
    })?;

    log::info!(
        "Processed tag {} for {} (delivery: {delivery})",
        tag.git_ref,
        tag.repository.full_name
    );

    Ok(HttpResponse::Ok().body("Webhook processed successfully"))
}

async fn announce_tag(
    issues: &dyn IssueCreator,
    tag: &TagCreationPayload,
) -> Result<(), WebhookError> {
    let request = IssueRequest::for_new_tag(tag);
    issues.create_issue(&request).await?;

    Ok(())
}

fn header_str<'a>(req: &'a HttpRequest, name: &str) -> Option<&'a str> {
    req.headers().get(name).and_then(|h| h.to_str().ok())
}

fn extract_delivery_id(req: &HttpRequest) -> Option<Uuid> {
    header_str(req, DELIVERY_HEADER).and_then(|s| Uuid::parse_str(s).ok())
}
