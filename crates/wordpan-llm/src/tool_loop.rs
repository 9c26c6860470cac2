use crate::client::ChatModel;
use crate::error::LlmError;
use crate::message::{Completion, CompletionRequest, Message, Usage};
use crate::tool::{Tool, ToolError};
use serde_json::Value;
use std::sync::Arc;

/// Output of one executed tool call.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolOutput {
    pub name: String,
    pub arguments: Value,
    pub output: String,
}

/// Result of a completed tool loop.
#[derive(Debug, Clone)]
pub struct ToolRun {
    /// The final completion, the first one without tool calls.
    pub completion: Completion,
    /// Every tool output, in call order.
    pub tool_outputs: Vec<ToolOutput>,
    /// Usage summed over all round-trips.
    pub usage: Usage,
}

/// Sends `request`, executes requested tools, and feeds their results back
/// until the model answers without calling a tool.
///
/// Unknown tools and tool failures are reported back to the model as text so
/// it can recover; they never abort the loop.
pub async fn run_tool_loop(
    model: &dyn ChatModel,
    mut request: CompletionRequest,
    tools: &[Arc<dyn Tool>],
    max_iterations: usize,
) -> Result<ToolRun, LlmError> {
    request.tools = tools.iter().map(|t| t.definition()).collect();

    let mut tool_outputs = Vec::new();
    let mut usage = Usage::default();

    for iteration in 0..max_iterations.max(1) {
        let completion = model.complete(&request).await?;
        if let Some(u) = &completion.usage {
            usage.add(u);
        }

        if completion.tool_calls.is_empty() {
            return Ok(ToolRun {
                completion,
                tool_outputs,
                usage,
            });
        }

        tracing::debug!(
            iteration,
            calls = completion.tool_calls.len(),
            "model requested tool calls"
        );

        let content = (!completion.content.is_empty()).then(|| completion.content.clone());
        request.messages.push(Message::assistant_tool_calls(
            content,
            completion.tool_calls.clone(),
        ));

        for call in &completion.tool_calls {
            let output = match tools.iter().find(|t| t.name() == call.name) {
                Some(tool) => match tool.call(call.arguments.clone()).await {
                    Ok(output) => output,
                    Err(e) => {
                        tracing::warn!(tool = %call.name, "tool call failed: {}", e);
                        format!("Error: {e}")
                    }
                },
                None => {
                    tracing::warn!(tool = %call.name, "model called an unknown tool");
                    format!("Error: {}", ToolError::NotFound(call.name.clone()))
                }
            };

            tracing::info!(tool = %call.name, "tool executed");
            request
                .messages
                .push(Message::tool_result(&call.id, output.clone()));
            tool_outputs.push(ToolOutput {
                name: call.name.clone(),
                arguments: call.arguments.clone(),
                output,
            });
        }
    }

    Err(LlmError::ToolLoopExhausted(max_iterations))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::ToolCall;
    use crate::scripted::ScriptedModel;
    use crate::tool::required_str;
    use async_trait::async_trait;
    use serde_json::json;

    struct Echo;

    #[async_trait]
    impl Tool for Echo {
        fn name(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "Echoes its text argument"
        }

        fn parameters(&self) -> Value {
            json!({"type": "object", "properties": {"text": {"type": "string"}}, "required": ["text"]})
        }

        async fn call(&self, arguments: Value) -> Result<String, ToolError> {
            Ok(format!("echo: {}", required_str(&arguments, "text")?))
        }
    }

    fn call(name: &str, arguments: Value) -> ToolCall {
        ToolCall {
            id: format!("call_{name}"),
            name: name.to_string(),
            arguments,
        }
    }

    #[tokio::test]
    async fn executes_tools_then_returns_final_answer() {
        let model = ScriptedModel::new([
            Completion::tool_calls(vec![call("echo", json!({"text": "hola"}))]),
            Completion::text("done"),
        ]);
        let tools: Vec<Arc<dyn Tool>> = vec![Arc::new(Echo)];

        let run = run_tool_loop(
            &model,
            CompletionRequest::new(vec![Message::user("say hola")]),
            &tools,
            4,
        )
        .await
        .unwrap();

        assert_eq!(run.completion.content, "done");
        assert_eq!(run.tool_outputs.len(), 1);
        assert_eq!(run.tool_outputs[0].output, "echo: hola");

        let requests = model.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].tools.len(), 1);
        let follow_up = &requests[1].messages;
        assert_eq!(follow_up.len(), 3);
        assert_eq!(follow_up[2].tool_call_id.as_deref(), Some("call_echo"));
        assert_eq!(follow_up[2].content.as_deref(), Some("echo: hola"));
    }

    #[tokio::test]
    async fn unknown_tool_and_bad_arguments_are_reported_to_the_model() {
        let model = ScriptedModel::new([
            Completion::tool_calls(vec![
                call("missing", json!({})),
                call("echo", json!({"wrong": 1})),
            ]),
            Completion::text("recovered"),
        ]);
        let tools: Vec<Arc<dyn Tool>> = vec![Arc::new(Echo)];

        let run = run_tool_loop(&model, CompletionRequest::default(), &tools, 4)
            .await
            .unwrap();

        assert_eq!(run.completion.content, "recovered");
        assert!(run.tool_outputs[0].output.contains("Tool not found: missing"));
        assert!(run.tool_outputs[1].output.starts_with("Error:"));
    }

    #[tokio::test]
    async fn gives_up_after_iteration_budget() {
        let model = ScriptedModel::new([
            Completion::tool_calls(vec![call("echo", json!({"text": "1"}))]),
            Completion::tool_calls(vec![call("echo", json!({"text": "2"}))]),
        ]);
        let tools: Vec<Arc<dyn Tool>> = vec![Arc::new(Echo)];

        let err = run_tool_loop(&model, CompletionRequest::default(), &tools, 2)
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::ToolLoopExhausted(2)));
    }
}
