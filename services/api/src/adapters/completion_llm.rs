//! services/api/src/adapters/completion_llm.rs
//!
//! This module contains the adapter for the generative-language completion API.
//! It implements the `CompletionService` port from the `core` crate by talking to
//! the service's OpenAI-compatible chat endpoint.

use std::sync::LazyLock;

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs, ResponseFormat, ResponseFormatJsonSchema,
    },
    Client,
};
use async_trait::async_trait;
use edustream_core::ports::{
    CompletionRequest, CompletionService, PortError, PortResult, ResponseSchema,
};
use regex::Regex;
use tracing::debug;

static CODE_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^\s*```[A-Za-z]*\s*\n(.*?)\n?\s*```\s*$").expect("code fence pattern is valid")
});

/// Some models wrap JSON in a Markdown code fence even when asked not to.
pub fn strip_code_fence(text: &str) -> String {
    match CODE_FENCE.captures(text).and_then(|c| c.get(1)) {
        Some(body) => body.as_str().trim().to_string(),
        None => text.trim().to_string(),
    }
}

fn json_schema_format(schema: &ResponseSchema) -> ResponseFormat {
    ResponseFormat::JsonSchema {
        json_schema: ResponseFormatJsonSchema {
            name: schema.name.clone(),
            description: None,
            schema: Some(schema.root.to_json_schema()),
            strict: None,
        },
    }
}

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `CompletionService` using an OpenAI-compatible LLM.
#[derive(Clone)]
pub struct OpenAiCompletionAdapter {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiCompletionAdapter {
    /// Creates a new `OpenAiCompletionAdapter`.
    pub fn new(client: Client<OpenAIConfig>, model: String) -> Self {
        Self { client, model }
    }
}

//=========================================================================================
// `CompletionService` Trait Implementation
//=========================================================================================

#[async_trait]
impl CompletionService for OpenAiCompletionAdapter {
    /// Sends the prompt as a single user message, constraining the reply to
    /// the requested JSON schema when one is given.
    async fn complete(&self, request: CompletionRequest) -> PortResult<String> {
        let message = ChatCompletionRequestUserMessageArgs::default()
            .content(request.prompt)
            .build()
            .map_err(|e| PortError::InvalidInput(e.to_string()))?;

        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(&self.model)
            .messages(vec![ChatCompletionRequestMessage::User(message)])
            .n(1);
        if let Some(schema) = &request.response_schema {
            args.response_format(json_schema_format(schema));
        }
        let chat_request = args
            .build()
            .map_err(|e| PortError::InvalidInput(e.to_string()))?;

        // Call the API and manually map the error if it occurs, which respects the orphan rule.
        let response = self
            .client
            .chat()
            .create(chat_request)
            .await
            .map_err(|e: OpenAIError| PortError::Transport(e.to_string()))?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                PortError::Schema("Completion response contained no text content.".to_string())
            })?;

        debug!(model = %self.model, chars = content.len(), "Completion received");
        Ok(strip_code_fence(&content))
    }
}

//=========================================================================================
// Fallback Adapter
//=========================================================================================

/// Used when no API key is configured: every request fails, so the assistant
/// answers with its fallbacks.
#[derive(Clone, Default)]
pub struct UnavailableCompletionAdapter;

#[async_trait]
impl CompletionService for UnavailableCompletionAdapter {
    async fn complete(&self, _request: CompletionRequest) -> PortResult<String> {
        Err(PortError::Unavailable(
            "no API key configured for the generative-language service".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edustream_core::ports::SchemaType;

    #[test]
    fn fenced_json_is_unwrapped() {
        let fenced = "```json\n[\"Rust\", \"Go\"]\n```";
        assert_eq!(strip_code_fence(fenced), r#"["Rust", "Go"]"#);
    }

    #[test]
    fn plain_text_is_only_trimmed() {
        assert_eq!(strip_code_fence("  A closure captures state.\n"), "A closure captures state.");
    }

    #[test]
    fn schema_is_sent_as_json_schema_format() {
        let schema = ResponseSchema::new("tags", SchemaType::array_of(SchemaType::String));

        match json_schema_format(&schema) {
            ResponseFormat::JsonSchema { json_schema } => {
                assert_eq!(json_schema.name, "tags");
                assert_eq!(json_schema.schema.unwrap()["type"], "array");
            }
            other => panic!("unexpected format {:?}", other),
        }
    }

    #[tokio::test]
    async fn unavailable_adapter_always_fails() {
        let result = UnavailableCompletionAdapter
            .complete(CompletionRequest { prompt: "hi".to_string(), response_schema: None })
            .await;
        assert!(matches!(result, Err(PortError::Unavailable(_))));
    }
}
