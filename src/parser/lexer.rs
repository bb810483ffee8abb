use std::borrow::Cow;
use std::iter::FusedIterator;

use log::trace;

const LEFT_BRACKET: char = '[';
const RIGHT_BRACKET: char = ']';
const EQUAL_SIGN: char = '=';
const NEWLINE: char = '\n';

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TokenType {
    LeftBracket, // [
    Section,
    RightBracket, // ]
    Key,
    EqualSign, // =
    Value,
    EOF,
    Error(ErrorKind),
}

impl TokenType {
    /// `true` if the lexer produces nothing after a token of this type
    pub fn is_terminal(&self) -> bool {
        matches!(self, TokenType::EOF | TokenType::Error(_))
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ErrorKind {
    /// `[` without a matching `]` before the end of input
    UnterminatedSection,
    /// input ended inside a key or a value, before `=` or a newline
    UnexpectedEndOfInput,
}

/// Location in the input, counted in characters rather than bytes.
///
/// `line` and `column` start at 1.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Position {
    pub(crate) byte: usize,
    pub(crate) offset: usize,
    pub(crate) line: usize,
    pub(crate) column: usize,
}

impl Default for Position {
    fn default() -> Self {
        Self {
            byte: 0,
            offset: 0,
            line: 1,
            column: 1,
        }
    }
}

impl Position {
    /// Character (not byte) index into the input
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    fn advance(&mut self, c: char) {
        self.byte += c.len_utf8();
        self.offset += 1;
        if c == NEWLINE {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token<'a> {
    pub(crate) token_type: TokenType,
    pub(crate) content: Cow<'a, str>,
    pub(crate) position: Position,
}

impl<'a> Token<'a> {
    pub(crate) fn new<C: Into<Cow<'a, str>>>(
        token_type: TokenType,
        content: C,
        position: Position,
    ) -> Self {
        Self {
            token_type,
            content: content.into(),
            position,
        }
    }

    pub fn token_type(&self) -> TokenType {
        self.token_type
    }

    /// Source text of the token, or the error message for `TokenType::Error`
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Where the token's text starts
    pub fn position(&self) -> Position {
        self.position
    }
}

/// What the lexer is looking for next.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
enum State {
    Begin,
    LeftBracket,
    SectionName,
    RightBracket,
    Key,
    EqualSign,
    Value,
    Halted,
}

/// `start` marks the beginning of the token being accumulated, `current` is
/// the scan head.
#[derive(Debug, Default, Clone, Copy)]
struct Cursor {
    start: Position,
    current: Position,
}

type Step<'a> = (State, Option<Token<'a>>);

/// Lazy token stream over a single input.
///
/// Every call to `next()` runs the state machine forward until exactly one
/// token is ready. The stream ends with either a `TokenType::EOF` or a
/// `TokenType::Error` token and yields `None` afterwards.
#[derive(Debug)]
pub struct Lexer<'a> {
    name: &'a str,
    input: &'a str,
    state: State,
    cursor: Cursor,
}

/// Start scanning `input`. `source_name` only shows up in diagnostics.
pub fn scan<'a>(source_name: &'a str, input: &'a str) -> Lexer<'a> {
    Lexer::new(source_name, input)
}

impl<'a> Lexer<'a> {
    pub fn new(source_name: &'a str, input: &'a str) -> Self {
        Self {
            name: source_name,
            input,
            state: State::Begin,
            cursor: Cursor::default(),
        }
    }

    pub fn source_name(&self) -> &'a str {
        self.name
    }

    fn peek(&self) -> Option<char> {
        self.input[self.cursor.current.byte..].chars().next()
    }

    fn bump(&mut self) {
        if let Some(c) = self.peek() {
            self.cursor.current.advance(c);
        }
    }

    /// Advances until `delimiter` is under the scan head.
    /// Returns `false` if the input ran out first.
    fn accumulate_until(&mut self, delimiter: char) -> bool {
        while let Some(c) = self.peek() {
            if c == delimiter {
                return true;
            }
            self.bump();
        }
        false
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.bump();
        }
        self.cursor.start = self.cursor.current;
    }

    fn emit(&mut self, token_type: TokenType) -> Token<'a> {
        let text = &self.input[self.cursor.start.byte..self.cursor.current.byte];
        let token = Token::new(token_type, text, self.cursor.start);
        self.cursor.start = self.cursor.current;
        token
    }

    fn emit_trimmed(&mut self, token_type: TokenType) -> Token<'a> {
        let text = &self.input[self.cursor.start.byte..self.cursor.current.byte];

        // the token starts at its first non-whitespace character
        let mut position = self.cursor.start;
        for c in text.chars().take_while(|c| c.is_whitespace()) {
            position.advance(c);
        }

        let token = Token::new(token_type, text.trim(), position);
        self.cursor.start = self.cursor.current;
        token
    }

    #[cold]
    fn error(&self, kind: ErrorKind, msg: String) -> Token<'a> {
        Token::new(TokenType::Error(kind), msg, self.cursor.start)
    }

    fn step(&mut self) -> Step<'a> {
        match self.state {
            State::Begin => self.lex_begin(),
            State::LeftBracket => self.lex_left_bracket(),
            State::SectionName => self.lex_section_name(),
            State::RightBracket => self.lex_right_bracket(),
            State::Key => self.lex_key(),
            State::EqualSign => self.lex_equal_sign(),
            State::Value => self.lex_value(),
            State::Halted => (State::Halted, None),
        }
    }

    fn lex_begin(&mut self) -> Step<'a> {
        self.skip_whitespace();

        match self.peek() {
            None => (State::Halted, Some(self.emit(TokenType::EOF))),
            Some(LEFT_BRACKET) => (State::LeftBracket, None),
            Some(_) => (State::Key, None),
        }
    }

    fn lex_left_bracket(&mut self) -> Step<'a> {
        self.bump();
        (State::SectionName, Some(self.emit(TokenType::LeftBracket)))
    }

    // the name is emitted before the closing bracket is consumed
    fn lex_section_name(&mut self) -> Step<'a> {
        if self.accumulate_until(RIGHT_BRACKET) {
            (State::RightBracket, Some(self.emit_trimmed(TokenType::Section)))
        } else {
            let token = self.error(
                ErrorKind::UnterminatedSection,
                format!("expected {RIGHT_BRACKET:?} as end of section header, but found EOF"),
            );
            (State::Halted, Some(token))
        }
    }

    fn lex_right_bracket(&mut self) -> Step<'a> {
        self.bump();
        (State::Begin, Some(self.emit(TokenType::RightBracket)))
    }

    fn lex_key(&mut self) -> Step<'a> {
        if self.accumulate_until(EQUAL_SIGN) {
            (State::EqualSign, Some(self.emit_trimmed(TokenType::Key)))
        } else {
            let token = self.error(
                ErrorKind::UnexpectedEndOfInput,
                format!("expected {EQUAL_SIGN:?} after key, but found EOF"),
            );
            (State::Halted, Some(token))
        }
    }

    fn lex_equal_sign(&mut self) -> Step<'a> {
        self.bump();
        (State::Value, Some(self.emit(TokenType::EqualSign)))
    }

    // values are kept verbatim up to (not including) the newline
    fn lex_value(&mut self) -> Step<'a> {
        if self.accumulate_until(NEWLINE) {
            (State::Begin, Some(self.emit(TokenType::Value)))
        } else {
            let token = self.error(
                ErrorKind::UnexpectedEndOfInput,
                "expected newline after value, but found EOF".into(),
            );
            (State::Halted, Some(token))
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        while self.state != State::Halted {
            let (state, token) = self.step();
            self.state = state;

            if let Some(token) = token {
                trace!(
                    "{}:{}:{} {:?} {:?}",
                    self.name,
                    token.position.line,
                    token.position.column,
                    token.token_type,
                    token.content
                );
                return Some(token);
            }
        }

        None
    }
}

impl FusedIterator for Lexer<'_> {}
