//! Scanner and parser for flat INI-style text.
//!
//! Input is a sequence of `[section]` headers and `key=value` lines. There are
//! no comments, quotes, escapes or line continuations. Section names and keys
//! are trimmed, values are kept verbatim up to the end of the line, and every
//! line (including the last) must end with a newline.
//!
//! ```
//! let doc = plain_ini::parse("app.ini", "[server]\nport=8080\n").unwrap();
//! assert_eq!(doc.lookup_last("server", "port"), Some("8080"));
//! ```
//!
//! Use [`scan`] to get at the token stream directly, and
//! [`Parser::with_observer`] to watch a parse while it runs.

mod document;
mod observer;
mod parser;

pub use self::document::{Document, KeyValue, Section};
pub use self::observer::{LogObserver, ParseObserver};
pub use self::parser::lexer::{scan, ErrorKind, Lexer, Position, Token, TokenType};
pub use self::parser::{parse, ParseError, Parser};
