use thiserror::Error;
use wordpan_llm::LlmError;

#[derive(Error, Debug)]
pub enum CrewError {
    #[error("crew '{crew}' failed: {source}")]
    Llm {
        crew: &'static str,
        #[source]
        source: LlmError,
    },
}
