use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EnvironmentError {
    #[error("variable `{name}` is not declared in any enclosing scope")]
    UnresolvedName { name: String },
    #[error("variable `{name}` is already declared in this scope")]
    DuplicateDeclaration { name: String },
    #[error("cannot reassign `{name}` because it was declared constant")]
    ReassignToConstant { name: String },
}
