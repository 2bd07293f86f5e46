/// LLM Client — the single point of entry for all Claude API calls in Caliper.
///
/// ARCHITECTURAL RULE: No other module may call the Anthropic API directly.
/// All LLM interactions MUST go through this module.
///
/// Model: claude-sonnet-4-5 (hardcoded — do not make configurable to prevent drift)
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::extraction::schema::ToolDefinition;

pub mod prompts;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
/// The model used for all LLM calls in Caliper.
/// This is intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "claude-sonnet-4-5";
const MAX_TOKENS: u32 = 4096;
const MAX_RETRIES: u32 = 3;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("LLM returned no call to tool '{tool}'")]
    NoToolUse { tool: String },
}

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<AnthropicMessage<'a>>,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    tools: &'a [ToolDefinition],
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<ToolChoice<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Forces the model to answer via the named tool instead of free text.
#[derive(Debug, Serialize)]
struct ToolChoice<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    name: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LlmResponse {
    pub content: Vec<ContentBlock>,
    pub usage: Usage,
}

#[derive(Debug, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    pub text: Option<String>,
    pub name: Option<String>,
    pub input: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl LlmResponse {
    /// Extracts the parameters of the first `tool_use` block for the named
    /// tool, if the model produced one.
    pub fn tool_input(&self, tool_name: &str) -> Option<&Value> {
        self.content
            .iter()
            .find(|b| b.block_type == "tool_use" && b.name.as_deref() == Some(tool_name))
            .and_then(|b| b.input.as_ref())
    }
}

#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: AnthropicErrorBody,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorBody {
    message: String,
}

/// Seam between the extraction pipeline and the live API. Production code
/// uses `LlmClient`; tests substitute a stub that returns crafted payloads.
#[async_trait]
pub trait ToolInvoker: Send + Sync {
    /// Forces the given tool and returns its parameters payload. Fails when
    /// the model answers without calling the tool at all.
    async fn invoke_tool(
        &self,
        prompt: &str,
        system: &str,
        tool: &ToolDefinition,
    ) -> Result<Value, LlmError>;
}

/// The single LLM client used by all services in Caliper.
/// Wraps the Anthropic Messages API with retry logic and forced tool use.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
}

impl LlmClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }

    /// Makes a call with a tool palette, optionally forcing one tool.
    /// Retries on 429 (rate limit) and 5xx errors with exponential backoff.
    pub async fn call_with_tools(
        &self,
        prompt: &str,
        system: &str,
        tools: &[ToolDefinition],
        force_tool: Option<&str>,
    ) -> Result<LlmResponse, LlmError> {
        let request_body = AnthropicRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            system,
            messages: vec![AnthropicMessage {
                role: "user",
                content: prompt,
            }],
            tools,
            tool_choice: force_tool.map(|name| ToolChoice { kind: "tool", name }),
        };

        let mut last_error: Option<LlmError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s, 4s
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "LLM call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(ANTHROPIC_API_URL)
                .header("x-api-key", &self.api_key)
                .header("anthropic-version", ANTHROPIC_VERSION)
                .header("content-type", "application/json")
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("LLM API returned {}: {}", status, body);
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                // Try to parse error message
                let message = serde_json::from_str::<AnthropicError>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let llm_response: LlmResponse = response.json().await?;

            debug!(
                "LLM call succeeded: input_tokens={}, output_tokens={}",
                llm_response.usage.input_tokens, llm_response.usage.output_tokens
            );

            return Ok(llm_response);
        }

        Err(last_error.unwrap_or(LlmError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }
}

#[async_trait]
impl ToolInvoker for LlmClient {
    async fn invoke_tool(
        &self,
        prompt: &str,
        system: &str,
        tool: &ToolDefinition,
    ) -> Result<Value, LlmError> {
        let response = self
            .call_with_tools(prompt, system, std::slice::from_ref(tool), Some(&tool.name))
            .await?;

        response
            .tool_input(&tool.name)
            .cloned()
            .ok_or_else(|| LlmError::NoToolUse {
                tool: tool.name.clone(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_tool() -> ToolDefinition {
        ToolDefinition {
            name: "record_candidate_profile".to_string(),
            description: "Record an extracted candidate profile".to_string(),
            input_schema: json!({"type": "object"}),
        }
    }

    #[test]
    fn test_tool_input_finds_matching_tool_use_block() {
        let response: LlmResponse = serde_json::from_value(json!({
            "content": [
                {"type": "text", "text": "Recording the profile now."},
                {
                    "type": "tool_use",
                    "name": "record_candidate_profile",
                    "input": {"experience_level": "senior"}
                }
            ],
            "usage": {"input_tokens": 100, "output_tokens": 50}
        }))
        .unwrap();

        let input = response.tool_input("record_candidate_profile").unwrap();
        assert_eq!(input["experience_level"], "senior");
    }

    #[test]
    fn test_tool_input_ignores_other_tools_and_text() {
        let response: LlmResponse = serde_json::from_value(json!({
            "content": [
                {"type": "text", "text": "no tool call here"},
                {"type": "tool_use", "name": "some_other_tool", "input": {}}
            ],
            "usage": {"input_tokens": 10, "output_tokens": 5}
        }))
        .unwrap();

        assert!(response.tool_input("record_candidate_profile").is_none());
    }

    #[test]
    fn test_request_serializes_tools_and_forced_choice() {
        let tool = sample_tool();
        let request = AnthropicRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            system: "system",
            messages: vec![AnthropicMessage {
                role: "user",
                content: "resume text",
            }],
            tools: std::slice::from_ref(&tool),
            tool_choice: Some(ToolChoice {
                kind: "tool",
                name: &tool.name,
            }),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["tools"][0]["name"], "record_candidate_profile");
        assert_eq!(value["tool_choice"]["type"], "tool");
        assert_eq!(value["tool_choice"]["name"], "record_candidate_profile");
    }

    #[test]
    fn test_request_omits_tool_fields_when_unused() {
        let request = AnthropicRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            system: "system",
            messages: vec![],
            tools: &[],
            tool_choice: None,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("tools").is_none());
        assert!(value.get("tool_choice").is_none());
    }
}
