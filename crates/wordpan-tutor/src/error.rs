use thiserror::Error;
use wordpan_crews::CrewError;

#[derive(Error, Debug)]
pub enum TutorError {
    #[error(transparent)]
    Crew(#[from] CrewError),
}
