use thiserror::Error;

use crate::environment::prelude::{EnvironmentError, ValueKind};
use crate::utils::prelude::SrcSpan;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RuntimeErrorType {
    #[error(transparent)]
    Environment(#[from] EnvironmentError),
    #[error("the left hand side of an assignment must be an identifier")]
    InvalidAssignmentTarget,
    #[error("a value of type {found} cannot be called")]
    NotCallable { found: ValueKind },
    #[error("this function takes {expected} arguments but {got} were supplied")]
    ArityMismatch { expected: usize, got: usize },
    #[error("member expressions parse but have no evaluation semantics")]
    UnsupportedMemberExpr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeError {
    pub error: RuntimeErrorType,
    pub location: SrcSpan
}
