use crate::error::CrewError;
use crate::output::{parse_structured, StructuredOutput};
use crate::template::render;
use serde_json::{Map, Value};
use std::marker::PhantomData;
use std::sync::Arc;
use wordpan_llm::{
    run_tool_loop, ChatModel, CompletionRequest, Message, ResponseFormat, Tool, ToolOutput, Usage,
};

/// Named values interpolated into agent and task prompts.
pub type Inputs = Map<String, Value>;

/// Persona of the agent working a task.
#[derive(Debug, Clone, Copy)]
pub struct AgentSpec {
    pub role: &'static str,
    pub goal: &'static str,
    pub backstory: &'static str,
}

/// What the agent must produce.
#[derive(Debug, Clone, Copy)]
pub struct TaskSpec {
    pub description: &'static str,
    pub expected_output: &'static str,
}

/// Result of a crew run.
#[derive(Debug, Clone)]
pub struct CrewOutput<T> {
    /// The final answer text as returned by the model.
    pub raw: String,
    /// The answer parsed into `T`, when it parsed and validated.
    pub structured: Option<T>,
    pub tool_outputs: Vec<ToolOutput>,
    pub usage: Usage,
}

/// One agent, one task, optional tools, typed output.
pub struct Crew<T> {
    name: &'static str,
    agent: AgentSpec,
    task: TaskSpec,
    tools: Vec<Arc<dyn Tool>>,
    model: Arc<dyn ChatModel>,
    max_iterations: usize,
    _output: PhantomData<fn() -> T>,
}

impl<T: StructuredOutput> Crew<T> {
    pub fn new(
        name: &'static str,
        model: Arc<dyn ChatModel>,
        agent: AgentSpec,
        task: TaskSpec,
    ) -> Self {
        Self {
            name,
            agent,
            task,
            tools: Vec::new(),
            max_iterations: model.max_tool_iterations(),
            model,
            _output: PhantomData,
        }
    }

    pub fn with_tools(mut self, tools: Vec<Arc<dyn Tool>>) -> Self {
        self.tools = tools;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn system_prompt(&self, inputs: &Inputs) -> String {
        format!(
            "You are {}. {}\nYour personal goal is: {}",
            render(self.agent.role, inputs),
            render(self.agent.backstory, inputs),
            render(self.agent.goal, inputs),
        )
    }

    pub fn task_prompt(&self, inputs: &Inputs) -> String {
        format!(
            "Current Task: {}\n\n\
             This is the expected criteria for your final answer: {}\n\
             You MUST return the actual complete content as the final answer, not a summary.\n\n\
             Ensure your final answer is a single JSON object that strictly adheres to this JSON schema:\n{}",
            render(self.task.description, inputs),
            render(self.task.expected_output, inputs),
            T::schema(),
        )
    }

    /// Runs the task to completion.
    #[tracing::instrument(skip_all, fields(crew = self.name))]
    pub async fn kickoff(&self, inputs: &Inputs) -> Result<CrewOutput<T>, CrewError> {
        let request = CompletionRequest::new(vec![
            Message::system(self.system_prompt(inputs)),
            Message::user(self.task_prompt(inputs)),
        ])
        .with_response_format(ResponseFormat::JsonSchema {
            name: T::NAME.to_string(),
            schema: T::schema(),
        });

        let run = run_tool_loop(
            self.model.as_ref(),
            request,
            &self.tools,
            self.max_iterations,
        )
        .await
        .map_err(|source| CrewError::Llm {
            crew: self.name,
            source,
        })?;

        let raw = run.completion.content;
        let structured = parse_structured::<T>(&raw);

        tracing::info!(
            structured = structured.is_some(),
            tool_calls = run.tool_outputs.len(),
            total_tokens = run.usage.total_tokens,
            "crew finished"
        );

        Ok(CrewOutput {
            raw,
            structured,
            tool_outputs: run.tool_outputs,
            usage: run.usage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wordpan_llm::{Completion, ScriptedModel};
    use wordpan_types::TranslationOutput;

    const AGENT: AgentSpec = AgentSpec {
        role: "Translator",
        goal: "Translate for {user_context}",
        backstory: "You love languages.",
    };

    const TASK: TaskSpec = TaskSpec {
        description: "Translate the last message of {messages}",
        expected_output: "A translation",
    };

    fn inputs() -> Inputs {
        json!({"user_context": "a beginner", "messages": "hello"})
            .as_object()
            .cloned()
            .unwrap()
    }

    #[tokio::test]
    async fn kickoff_renders_prompts_and_parses_output() {
        let model = Arc::new(ScriptedModel::new([Completion::text(
            r#"{"content": "olá"}"#,
        )]));
        let crew: Crew<TranslationOutput> = Crew::new("test", model.clone(), AGENT, TASK);

        let output = crew.kickoff(&inputs()).await.unwrap();
        assert_eq!(output.structured.unwrap().content, "olá");

        let request = &model.requests()[0];
        let system = request.messages[0].content.as_deref().unwrap();
        assert!(system.starts_with("You are Translator."));
        assert!(system.contains("Translate for a beginner"));
        let task = request.messages[1].content.as_deref().unwrap();
        assert!(task.contains("Translate the last message of hello"));
        assert!(task.contains("\"content\""));
        assert!(matches!(
            request.response_format,
            Some(ResponseFormat::JsonSchema { ref name, .. }) if name == "TranslationOutput"
        ));
    }

    #[tokio::test]
    async fn unstructured_answer_keeps_raw_text() {
        let model = Arc::new(ScriptedModel::new([Completion::text("hello is olá")]));
        let crew: Crew<TranslationOutput> = Crew::new("test", model, AGENT, TASK);

        let output = crew.kickoff(&inputs()).await.unwrap();
        assert!(output.structured.is_none());
        assert_eq!(output.raw, "hello is olá");
    }

    #[tokio::test]
    async fn iteration_budget_is_enforced() {
        let model = Arc::new(ScriptedModel::new([Completion::tool_calls(vec![
            wordpan_llm::ToolCall {
                id: "call_1".into(),
                name: "save_word_pair".into(),
                arguments: json!({}),
            },
        ])]));
        let crew: Crew<TranslationOutput> =
            Crew::new("translation", model, AGENT, TASK).with_max_iterations(1);

        let err = crew.kickoff(&inputs()).await.unwrap_err();
        assert!(err.to_string().contains("did not finish within 1 iterations"));
    }

    #[tokio::test]
    async fn model_failure_names_the_crew() {
        let model = Arc::new(ScriptedModel::default());
        let crew: Crew<TranslationOutput> = Crew::new("translation", model, AGENT, TASK);

        let err = crew.kickoff(&inputs()).await.unwrap_err();
        assert!(err.to_string().starts_with("crew 'translation' failed"));
    }
}
