pub(crate) mod lexer;

use std::mem;

use self::lexer::{ErrorKind, Lexer, Token, TokenType};
use crate::document::{Document, KeyValue, Section};
use crate::observer::ParseObserver;

type ParseResult<T> = Result<T, ParseError>;

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("{source_name}:{line}:{col} {msg}")]
pub struct ParseError {
    pub(crate) kind: ErrorKind,
    pub(crate) source_name: String,
    pub(crate) line: usize,
    pub(crate) col: usize,
    pub(crate) msg: String,
}

impl ParseError {
    #[cold]
    fn from_token(source_name: &str, kind: ErrorKind, token: Token<'_>) -> Self {
        ParseError {
            kind,
            source_name: source_name.to_owned(),
            line: token.position.line,
            col: token.position.column,
            msg: token.content.into_owned(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.col
    }

    pub fn message(&self) -> &str {
        &self.msg
    }
}

/// Parse `input` into a [`Document`].
///
/// Any malformed input fails the whole parse, there is no partial result.
pub fn parse(source_name: &str, input: &str) -> ParseResult<Document> {
    Parser::new(source_name, input).parse()
}

/// Folds the token stream of one input into a [`Document`].
pub struct Parser<'a> {
    source_name: &'a str,
    lexer: Lexer<'a>,
    observer: Option<&'a mut dyn ParseObserver>,
}

impl<'a> Parser<'a> {
    pub fn new(source_name: &'a str, input: &'a str) -> Self {
        Self {
            source_name,
            lexer: Lexer::new(source_name, input),
            observer: None,
        }
    }

    pub fn with_observer(mut self, observer: &'a mut dyn ParseObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn parse(mut self) -> ParseResult<Document> {
        if let Some(observer) = self.observer.as_deref_mut() {
            observer.parse_started(self.source_name);
        }

        let result = self.assemble();

        if let Some(observer) = self.observer.as_deref_mut() {
            observer.parse_finished(self.source_name, result.as_ref());
        }

        result
    }

    // A section only makes it into the document once it holds at least one
    // pair, except for the last one, which is always kept.
    fn assemble(&mut self) -> ParseResult<Document> {
        let mut doc = Document::new(self.source_name);
        let mut section = Section::default();
        let mut key = String::new();

        while let Some(token) = self.lexer.next() {
            if let Some(observer) = self.observer.as_deref_mut() {
                observer.token_scanned(&token);
            }

            match token.token_type {
                TokenType::Section => {
                    let previous = mem::replace(&mut section, Section::new(token.content));
                    if !previous.is_empty() {
                        doc.sections.push(previous);
                    }
                    key.clear();
                }
                TokenType::Key => key = token.content.into_owned(),
                TokenType::Value => {
                    section.push(KeyValue::new(mem::take(&mut key), token.content));
                }
                TokenType::LeftBracket | TokenType::RightBracket | TokenType::EqualSign => {}
                TokenType::EOF => break,
                TokenType::Error(kind) => {
                    return Err(ParseError::from_token(self.source_name, kind, token));
                }
            }
        }

        doc.sections.push(section);

        Ok(doc)
    }
}
