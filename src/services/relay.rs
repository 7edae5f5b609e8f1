// src/services/relay.rs
use tracing::{error, info, instrument};

use crate::{error::AppError, message::ChatRequest, services::gemini::GeminiClient};

/// Context and question in the shape the model receives them.
pub fn combine_prompt(context: &str, message: &str) -> String {
    format!("{context}\n\nUser Query: {message}")
}

/// Forward one chat turn to the generative API.
///
/// Validation and credential checks happen before anything leaves the process.
/// Only an empty message is rejected; blank input is the sender's concern.
#[instrument(skip_all, fields(message_len = request.message.len(), context_len = request.context.len()))]
pub async fn relay(
    client: &GeminiClient,
    credential: Option<&str>,
    request: &ChatRequest,
) -> Result<String, AppError> {
    if request.message.is_empty() {
        return Err(AppError::Validation);
    }

    let Some(api_key) = credential.filter(|k| !k.is_empty()) else {
        error!("API key missing on server side");
        return Err(AppError::Configuration);
    };

    let prompt = combine_prompt(&request.context, &request.message);
    let reply = client.generate_content(api_key, &prompt).await?;

    info!(reply_len = reply.len(), "Relay completed");
    Ok(reply)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_uses_labeled_separator() {
        assert_eq!(
            combine_prompt("You are helpful.", "What is a deductible?"),
            "You are helpful.\n\nUser Query: What is a deductible?"
        );
        assert_eq!(combine_prompt("", "hi"), "\n\nUser Query: hi");
    }

    // Both checks fire before the client is touched, so an unroutable base URL is fine.
    #[tokio::test]
    async fn rejects_before_any_network_call() {
        let client = GeminiClient::new("http://127.0.0.1:1", "unused");

        let err = relay(&client, Some("key"), &ChatRequest::new("", "ctx"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation));

        let err = relay(&client, None, &ChatRequest::new("Hi", "ctx"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Configuration));

        let err = relay(&client, Some(""), &ChatRequest::new("Hi", "ctx"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Configuration));
    }
}
