use cv_core::{ActorId, Step};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActorError {
    #[error("sample for actor {actor} at step {got} is out of sequence (expected step {expected})")]
    OutOfSequence {
        actor:    ActorId,
        expected: Step,
        got:      Step,
    },
}

pub type ActorResult<T> = Result<T, ActorError>;
