use crate::crew::{AgentSpec, Crew, Inputs, TaskSpec};
use crate::error::CrewError;
use serde_json::Value;
use std::sync::Arc;
use wordpan_llm::ChatModel;
use wordpan_types::SimilarWordsOutput;

const AGENT: AgentSpec = AgentSpec {
    role: "Vocabulary Assistant",
    goal: "Suggest words related to a flashcard so the learner can grow the deck around it.",
    backstory: "You know which words learners tend to meet together and suggest the ones worth \
                learning next.",
};

const TASK: TaskSpec = TaskSpec {
    description: "The learner has the flashcard '{word1}' / '{word2}'. Suggest between 1 and 12 \
                  related words in the same language as '{word2}': synonyms, antonyms and words \
                  from the same topic.",
    expected_output: "A list of 1 to 12 related words in similar_words.",
};

pub fn similar_words_crew(model: Arc<dyn ChatModel>) -> Crew<SimilarWordsOutput> {
    Crew::new("similar_words", model, AGENT, TASK)
}

/// Related words for a pair; an unparseable answer becomes a single entry.
pub async fn suggest_similar_words(
    model: Arc<dyn ChatModel>,
    word1: &str,
    word2: &str,
) -> Result<SimilarWordsOutput, CrewError> {
    let mut inputs = Inputs::new();
    inputs.insert("word1".into(), Value::String(word1.to_string()));
    inputs.insert("word2".into(), Value::String(word2.to_string()));

    let output = similar_words_crew(model).kickoff(&inputs).await?;
    Ok(output.structured.unwrap_or_else(|| SimilarWordsOutput {
        similar_words: vec![output.raw],
    }))
}
