use crate::config::{LlmConfig, DEFAULT_MAX_TOOL_ITERATIONS};
use crate::error::LlmError;
use crate::message::{Completion, CompletionRequest, ToolCall, Usage};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;

/// A hosted text-generation model.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, LlmError>;

    /// Upper bound on round-trips in one tool loop.
    fn max_tool_iterations(&self) -> usize {
        DEFAULT_MAX_TOOL_ITERATIONS
    }
}

/// Client for any OpenAI-compatible `chat/completions` endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    http: reqwest::Client,
    config: LlmConfig,
}

impl OpenAiClient {
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| LlmError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    fn payload(&self, request: &CompletionRequest) -> Value {
        let messages: Vec<Value> = request.messages.iter().map(|m| m.to_json()).collect();

        let mut payload = json!({
            "model": self.config.model,
            "messages": messages,
            "temperature": self.config.temperature,
            "stream": false,
        });

        if let Some(max_tokens) = self.config.max_tokens {
            payload["max_tokens"] = json!(max_tokens);
        }

        if !request.tools.is_empty() {
            payload["tools"] = request.tools.iter().map(|t| t.to_json()).collect();
            payload["tool_choice"] = json!("auto");
        }

        if let Some(format) = &request.response_format {
            payload["response_format"] = format.to_json();
        }

        payload
    }
}

#[async_trait]
impl ChatModel for OpenAiClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, LlmError> {
        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );

        let mut builder = self.http.post(&url).json(&self.payload(request));
        // Local OpenAI-compatible servers usually run without a key.
        if !self.config.api_key.is_empty() {
            builder = builder.bearer_auth(&self.config.api_key);
        }

        tracing::debug!(
            model = %self.config.model,
            messages = request.messages.len(),
            tools = request.tools.len(),
            "sending chat completion"
        );

        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        parse_response(&body, &self.config.model)
    }

    fn max_tool_iterations(&self) -> usize {
        self.config.max_tool_iterations
    }
}

/// Parses a `chat/completions` response body.
pub fn parse_response(body: &str, default_model: &str) -> Result<Completion, LlmError> {
    let json: Value =
        serde_json::from_str(body).map_err(|e| LlmError::Parse(format!("Invalid JSON: {e}")))?;

    let first_choice = json["choices"]
        .as_array()
        .ok_or_else(|| LlmError::Parse("Missing 'choices' field".to_string()))?
        .first()
        .ok_or_else(|| LlmError::Parse("Empty choices array".to_string()))?;

    let message = &first_choice["message"];

    // Content is null when the model only calls tools.
    let content = message["content"].as_str().unwrap_or("").to_string();

    let finish_reason = first_choice["finish_reason"].as_str().map(str::to_string);

    let model = json["model"].as_str().unwrap_or(default_model).to_string();

    let usage = json.get("usage").filter(|u| u.is_object()).map(|u| Usage {
        prompt_tokens: u["prompt_tokens"].as_u64().unwrap_or(0) as u32,
        completion_tokens: u["completion_tokens"].as_u64().unwrap_or(0) as u32,
        total_tokens: u["total_tokens"].as_u64().unwrap_or(0) as u32,
    });

    let mut tool_calls = Vec::new();
    if let Some(calls) = message["tool_calls"].as_array() {
        for call in calls {
            if let (Some(id), Some(name), Some(arguments)) = (
                call["id"].as_str(),
                call["function"]["name"].as_str(),
                call["function"]["arguments"].as_str(),
            ) {
                let arguments: Value = serde_json::from_str(arguments).map_err(|e| {
                    LlmError::Parse(format!("Invalid tool call arguments: {e}"))
                })?;
                tool_calls.push(ToolCall {
                    id: id.to_string(),
                    name: name.to_string(),
                    arguments,
                });
            }
        }
    }

    Ok(Completion {
        content,
        tool_calls,
        finish_reason,
        model,
        usage,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_answer() {
        let body = r#"{
            "model": "gpt-4.1-mini-2025",
            "choices": [{"message": {"role": "assistant", "content": "Olá"}, "finish_reason": "stop"}],
            "usage": {"prompt_tokens": 12, "completion_tokens": 3, "total_tokens": 15}
        }"#;
        let completion = parse_response(body, "fallback").unwrap();
        assert_eq!(completion.content, "Olá");
        assert_eq!(completion.model, "gpt-4.1-mini-2025");
        assert_eq!(completion.finish_reason.as_deref(), Some("stop"));
        assert_eq!(completion.usage.unwrap().total_tokens, 15);
        assert!(completion.tool_calls.is_empty());
    }

    #[test]
    fn parses_tool_calls_with_null_content() {
        let body = r#"{
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [{
                        "id": "call_abc",
                        "type": "function",
                        "function": {"name": "save_word_pair", "arguments": "{\"source_word\":\"hello\",\"translated_word\":\"hola\"}"}
                    }]
                },
                "finish_reason": "tool_calls"
            }]
        }"#;
        let completion = parse_response(body, "fallback").unwrap();
        assert_eq!(completion.content, "");
        assert_eq!(completion.model, "fallback");
        assert!(completion.usage.is_none());
        assert_eq!(completion.tool_calls.len(), 1);
        assert_eq!(completion.tool_calls[0].name, "save_word_pair");
        assert_eq!(completion.tool_calls[0].arguments["translated_word"], "hola");
    }

    #[test]
    fn rejects_malformed_tool_arguments() {
        let body = r#"{"choices": [{"message": {"tool_calls": [{"id": "1", "function": {"name": "x", "arguments": "{not json"}}]}}]}"#;
        assert!(matches!(
            parse_response(body, "m"),
            Err(LlmError::Parse(_))
        ));
    }

    #[test]
    fn rejects_missing_choices() {
        assert!(matches!(
            parse_response(r#"{"error": "boom"}"#, "m"),
            Err(LlmError::Parse(_))
        ));
        assert!(matches!(
            parse_response(r#"{"choices": []}"#, "m"),
            Err(LlmError::Parse(_))
        ));
    }

    #[test]
    fn payload_includes_tools_and_schema() {
        let client = OpenAiClient::new(LlmConfig {
            max_tokens: Some(512),
            ..Default::default()
        })
        .unwrap();
        let request = CompletionRequest {
            messages: vec![crate::Message::user("hi")],
            tools: vec![crate::ToolDefinition {
                name: "t".into(),
                description: "d".into(),
                parameters: json!({"type": "object"}),
            }],
            response_format: Some(crate::ResponseFormat::JsonSchema {
                name: "Out".into(),
                schema: json!({"type": "object"}),
            }),
        };
        let payload = client.payload(&request);
        assert_eq!(payload["model"], "gpt-4.1-mini");
        assert_eq!(payload["max_tokens"], 512);
        assert_eq!(payload["tool_choice"], "auto");
        assert_eq!(payload["tools"][0]["function"]["name"], "t");
        assert_eq!(payload["response_format"]["type"], "json_schema");
        assert_eq!(payload["response_format"]["json_schema"]["name"], "Out");
    }
}
