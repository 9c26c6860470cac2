use crate::crew::{AgentSpec, Crew, Inputs, TaskSpec};
use crate::error::CrewError;
use serde_json::Value;
use std::sync::Arc;
use wordpan_llm::ChatModel;
use wordpan_types::PhraseOutput;

const AGENT: AgentSpec = AgentSpec {
    role: "Phrase Writer",
    goal: "Write one short, natural phrase that practises the learner's words.",
    backstory: "You write example sentences for language learners: simple, vivid and tuned to \
                the learner's interests. What you know about the learner: {user_context}",
};

const TASK: TaskSpec = TaskSpec {
    description: "Write a single phrase that uses some of these words: {words}. \
                  Keep it short and natural, and report the words you actually used.",
    expected_output: "The phrase in phrase and the words it uses in words.",
};

pub fn random_phrase_crew(model: Arc<dyn ChatModel>) -> Crew<PhraseOutput> {
    Crew::new("random_phrase", model, AGENT, TASK)
}

/// A practice phrase built from `words`; an unparseable answer is returned
/// as the phrase with the input words.
pub async fn generate_random_phrase(
    model: Arc<dyn ChatModel>,
    words: &[String],
    user_context: &str,
) -> Result<PhraseOutput, CrewError> {
    let mut inputs = Inputs::new();
    inputs.insert(
        "words".into(),
        Value::Array(words.iter().cloned().map(Value::String).collect()),
    );
    inputs.insert("user_context".into(), Value::String(user_context.to_string()));

    let output = random_phrase_crew(model).kickoff(&inputs).await?;
    Ok(output.structured.unwrap_or_else(|| PhraseOutput {
        phrase: output.raw,
        words: words.to_vec(),
    }))
}
