use crate::crew::{AgentSpec, Crew, TaskSpec};
use std::sync::Arc;
use wordpan_llm::{ChatModel, Tool};
use wordpan_types::TutorMessage;

const AGENT: AgentSpec = AgentSpec {
    role: "Vocabulary Specialist",
    goal: "Introduce useful new words at the learner's level, each with a complete word card.",
    backstory: "You build learners' vocabularies one memorable word at a time, always with a natural \
                example sentence. What you know about the learner: {user_context}",
};

const TASK: TaskSpec = TaskSpec {
    description: "Instruction from the router: {specialist_instruction}\n\n\
                  Conversation so far:\n{messages}\n\n\
                  Suggest a new word and fill word_card with the word, its translation, an example \
                  sentence, a short explanation and the part of speech. If you can use \
                  check_word_pair_in_deck, call it first: when the pair is already in the deck say so; \
                  otherwise end with \"Would you like me to add this word to your flashcard deck?\". \
                  When the learner confirms a save, call save_word_pair and reply with its message only. \
                  Use intent new_vocabulary.",
    expected_output: "A tutor message from the assistant with content, intent and word_card.",
};

pub fn vocabulary_crew(
    model: Arc<dyn ChatModel>,
    tools: Vec<Arc<dyn Tool>>,
) -> Crew<TutorMessage> {
    Crew::new("vocabulary", model, AGENT, TASK).with_tools(tools)
}
