use crate::utils::prelude::SrcSpan;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LexicalErrorType {
    UnrecognizedCharacter { ch: char },
    InvalidNumber,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LexicalError {
    pub error: LexicalErrorType,
    pub location: SrcSpan
}

impl LexicalError {
    pub fn details(&self) -> (&'static str, Vec<String>) {
        match self.error {
            LexicalErrorType::UnrecognizedCharacter { ch } => {
                ("This character is not part of the language", vec![
                    format!("Found `{ch}`")
                ])
            },
            LexicalErrorType::InvalidNumber => {
                ("This number literal cannot be read", vec![])
            }
        }
    }
}
