use std::path::PathBuf;

use termcolor::Buffer;
use thiserror::Error;

use crate::{
    environment::prelude::EnvironmentError,
    eval::prelude::{RuntimeError, RuntimeErrorType},
    parser::prelude::{ParseError, ParseErrorType},
    utils::prelude::SrcSpan,
};
use super::diagnostic::{Diagnostic, Highlight, Level, Location};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("failed to parse source code")]
    Parse {
        path: PathBuf,
        src: String,
        error: ParseError
    },
    #[error("evaluation failed")]
    Runtime {
        path: PathBuf,
        src: String,
        error: RuntimeError
    },
    #[error("IO operation failed")]
    StdIo {
        err: std::io::ErrorKind
    }
}

impl Error {
    pub fn pretty_string(&self) -> String {
        let mut nocolor = Buffer::no_color();
        self.pretty(&mut nocolor);
        String::from_utf8(nocolor.into_inner()).expect("Error printing produced invalid utf8")
    }

    pub fn pretty(&self, buf: &mut Buffer) {
        use std::io::Write;

        for diagnostic in self.to_diagnostics() {
            diagnostic.write(buf);
            writeln!(buf).expect("write new line diagnostic");
        }
    }

    pub fn to_diagnostics(&self) -> Vec<Diagnostic> {
        match self {
            Error::Parse { path, src, error } => {
                let (label, extra) = error.details();
                let text = extra.join("\n");

                // An unexpected-eof span points past the last token; pin it
                // to the end of the source so the caret lands somewhere real.
                let span = if matches!(error.error, ParseErrorType::UnexpectedEof) {
                    SrcSpan {
                        start: src.len() as u32,
                        end: src.len() as u32,
                    }
                } else {
                    error.span
                };

                vec![Diagnostic {
                    title: "Syntax error".into(),
                    text,
                    level: Level::Error,
                    location: Some(Location {
                        src,
                        path: path.clone(),
                        highlight: Highlight {
                            text: Some(label.to_string()),
                            span,
                        },
                        context: vec![],
                    }),
                }]
            },
            Error::Runtime { path, src, error } => {
                let title = match &error.error {
                    RuntimeErrorType::Environment(error) => match error {
                        EnvironmentError::UnresolvedName { .. } => "Unknown variable",
                        EnvironmentError::DuplicateDeclaration { .. } => "Duplicate declaration",
                        EnvironmentError::ReassignToConstant { .. } => "Assignment to constant",
                    },
                    RuntimeErrorType::InvalidAssignmentTarget => "Invalid assignment target",
                    RuntimeErrorType::NotCallable { .. } => "Value is not callable",
                    RuntimeErrorType::ArityMismatch { .. } => "Wrong number of arguments",
                    RuntimeErrorType::UnsupportedMemberExpr => "Unsupported expression",
                };

                vec![Diagnostic {
                    title: title.into(),
                    text: format!("{}", error.error),
                    level: Level::Error,
                    location: Some(Location {
                        src,
                        path: path.clone(),
                        highlight: Highlight {
                            text: None,
                            span: error.location,
                        },
                        context: vec![],
                    }),
                }]
            },
            Error::StdIo { err } => {
                vec![Diagnostic {
                    title: "Standard IO error".into(),
                    text: format!("{err}"),
                    level: Level::Error,
                    location: None,
                }]
            }
        }
    }
}
