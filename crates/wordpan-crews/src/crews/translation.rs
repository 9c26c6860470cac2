use crate::crew::{AgentSpec, Crew, TaskSpec};
use std::sync::Arc;
use wordpan_llm::{ChatModel, Tool};
use wordpan_types::TranslationOutput;

const AGENT: AgentSpec = AgentSpec {
    role: "Translation Specialist",
    goal: "Give accurate, natural translations with a short explanation of usage and pronunciation.",
    backstory: "You are a professional translator who also teaches. You keep answers short and \
                practical and you care that learners keep the words they meet. \
                What you know about the learner: {user_context}",
};

const TASK: TaskSpec = TaskSpec {
    description: "Instruction from the router: {specialist_instruction}\n\n\
                  Conversation so far:\n{messages}\n\n\
                  Translate what the learner asked for. If you can use check_word_pair_in_deck, call it \
                  for the main pair first: when the pair is already in the deck say so and do not offer \
                  to save it; otherwise end by asking \"Would you like me to save this word to your \
                  flashcard deck?\". When the learner confirms a save, call save_word_pair and reply \
                  with its message only.",
    expected_output: "The reply to show the learner, in the content field.",
};

pub fn translation_crew(
    model: Arc<dyn ChatModel>,
    tools: Vec<Arc<dyn Tool>>,
) -> Crew<TranslationOutput> {
    Crew::new("translation", model, AGENT, TASK).with_tools(tools)
}
