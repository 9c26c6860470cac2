use crate::crew::{AgentSpec, Crew, TaskSpec};
use std::sync::Arc;
use wordpan_llm::ChatModel;
use wordpan_types::TutorMessage;

const AGENT: AgentSpec = AgentSpec {
    role: "Language Tutor",
    goal: "Explain grammar, correct writing and share cultural context clearly and encouragingly.",
    backstory: "You are a patient tutor who corrects mistakes gently and explains the rule behind \
                each correction. What you know about the learner: {user_context}",
};

const TASK: TaskSpec = TaskSpec {
    description: "Instruction from the router: {specialist_instruction}\n\n\
                  Conversation so far:\n{messages}\n\n\
                  Answer the learner's latest message. Set intent to grammar_explanation, \
                  writing_correction, cultural_context or small_talk_language_related, whichever fits.",
    expected_output: "A tutor message from the assistant with content and intent.",
};

pub fn generic_crew(model: Arc<dyn ChatModel>) -> Crew<TutorMessage> {
    Crew::new("generic", model, AGENT, TASK)
}
