//! Error types for parsing, validation and composition

use std::io;
use std::path::PathBuf;

use ariadne::{Color, Label, Report, ReportKind, Source};
use chumsky::error::{Rich, RichPattern, RichReason};
use thiserror::Error;

use crate::ast::Position;
use crate::markup::lexer::Token;
use crate::markup::Span;

pub type Result<T> = std::result::Result<T, Error>;

/// A markup syntax error, located by byte span
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message} at {span:?}")]
pub struct SyntaxError {
    pub span: Span,
    pub message: String,
    pub expected: Vec<String>,
}

#[derive(Error, Debug)]
pub enum Error {
    /// The markup could not be parsed at all
    #[error("syntax errors in {file}: {}", format_syntax_errors(.errors))]
    Syntax {
        file: String,
        errors: Vec<SyntaxError>,
    },

    /// Wrong tag, wrong parent or a disallowed child
    #[error("{message} at {pos}")]
    Structural { message: String, pos: Position },

    #[error("<{tag}> requires a directive attribute ({expected}) at {pos}")]
    MissingDirective {
        tag: String,
        expected: String,
        pos: Position,
    },

    #[error("<{tag}> accepts a single directive attribute, found @{} at {pos}", .found.join(", @"))]
    MultipleAttributes {
        tag: String,
        found: Vec<String>,
        pos: Position,
    },

    #[error("<if> has more than one <else> at {pos}")]
    MultipleElse { pos: Position },

    /// An include leads back to a file that is already being resolved
    #[error("circular include of \"{path}\" from {file} ({}) at {pos}", .chain.join(" -> "))]
    CircularInclude {
        file: String,
        path: String,
        chain: Vec<String>,
        pos: Position,
    },

    #[error("cannot read included file {}: {source} at {pos}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
        pos: Position,
    },
}

impl Error {
    pub(crate) fn structural(message: impl Into<String>, pos: Position) -> Self {
        Error::Structural {
            message: message.into(),
            pos,
        }
    }

    /// Where the offending markup is, for every error but a syntax error
    pub fn position(&self) -> Option<&Position> {
        match self {
            Error::Syntax { .. } => None,
            Error::Structural { pos, .. }
            | Error::MissingDirective { pos, .. }
            | Error::MultipleAttributes { pos, .. }
            | Error::MultipleElse { pos }
            | Error::CircularInclude { pos, .. }
            | Error::FileRead { pos, .. } => Some(pos),
        }
    }

    /// Name of the file whose source [`Error::format`] expects
    pub fn file_name(&self) -> &str {
        match self {
            Error::Syntax { file, .. } => file,
            other => other
                .position()
                .map(|pos| pos.file_name.as_str())
                .unwrap_or_default(),
        }
    }

    /// Format the error with source context using ariadne
    ///
    /// `source` must be the text of [`Error::file_name`]. Errors without a
    /// known span fall back to their plain message.
    pub fn format(&self, source: &str) -> String {
        match self {
            Error::Syntax { file, errors } => errors
                .iter()
                .map(|e| {
                    let label = if e.expected.is_empty() {
                        e.message.clone()
                    } else {
                        format!("{}\nExpected: {}", e.message, e.expected.join(", "))
                    };
                    report(file, source, e.span.clone(), &e.message, &label)
                })
                .collect::<Vec<_>>()
                .join("\n"),
            other => match other.position().and_then(|pos| pos.span()) {
                Some(span) => {
                    let message = other.to_string();
                    report(other.file_name(), source, span, &message, &message)
                }
                None => other.to_string(),
            },
        }
    }
}

fn report(file: &str, source: &str, span: Span, message: &str, label: &str) -> String {
    let end = span.end.min(source.len());
    let span = span.start.min(end)..end;

    let mut buf = Vec::new();
    let written = Report::build(ReportKind::Error, file, span.start)
        .with_message(message)
        .with_label(
            Label::new((file, span))
                .with_message(label)
                .with_color(Color::Red),
        )
        .finish()
        .write((file, Source::from(source)), &mut buf);

    match written {
        Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
        Err(_) => message.to_string(),
    }
}

fn format_syntax_errors(errors: &[SyntaxError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl<'a> From<Rich<'a, Token>> for SyntaxError {
    fn from(err: Rich<'a, Token>) -> Self {
        let message = match err.reason() {
            RichReason::ExpectedFound { found, .. } => match found.as_deref() {
                Some(Token::Invalid(text)) => format!("Malformed markup {:?}", text),
                Some(tok) => format!("Unexpected {}", format_token(tok)),
                None => "Unexpected end of input".to_string(),
            },
            RichReason::Custom(msg) => msg.to_string(),
        };

        let expected: Vec<String> = err
            .expected()
            .filter_map(|e| match e {
                RichPattern::Token(tok) => Some(format_token(tok)),
                RichPattern::Label(label) => Some(label.to_string()),
                RichPattern::EndOfInput => Some("end of input".to_string()),
                RichPattern::Identifier(s) => Some(format!("'{}'", s)),
                RichPattern::Any => Some("any token".to_string()),
                RichPattern::SomethingElse => None,
            })
            .collect();

        SyntaxError {
            span: err.span().into_range(),
            message,
            expected,
        }
    }
}

/// Format a token for human-readable error messages
fn format_token(tok: &Token) -> String {
    match tok {
        Token::Text(_) => "text".to_string(),
        Token::Comment(_) => "comment".to_string(),
        Token::OpenTag(name) => format!("start tag <{}>", name),
        Token::AttrName(name) => format!("attribute '{}'", name),
        Token::AttrValue(_) => "attribute value".to_string(),
        Token::TagEnd => "'>'".to_string(),
        Token::SelfClose => "'/>'".to_string(),
        Token::CloseTag(name) => format!("end tag </{}>", name),
        Token::Invalid(text) => format!("{:?}", text),
    }
}
