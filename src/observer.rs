use log::{debug, trace, warn};

use crate::document::Document;
use crate::parser::lexer::Token;
use crate::parser::ParseError;

/// Hook into a running parse.
///
/// All methods default to doing nothing, implement only what you need.
pub trait ParseObserver {
    fn parse_started(&mut self, _source_name: &str) {}

    fn token_scanned(&mut self, _token: &Token<'_>) {}

    fn parse_finished(&mut self, _source_name: &str, _result: Result<&Document, &ParseError>) {}
}

/// Reports parser activity through the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl ParseObserver for LogObserver {
    fn parse_started(&mut self, source_name: &str) {
        debug!("Starting lexer and parser for {source_name:?}");
    }

    fn token_scanned(&mut self, token: &Token<'_>) {
        trace!("{:?} {:?}", token.token_type(), token.content());
    }

    fn parse_finished(&mut self, source_name: &str, result: Result<&Document, &ParseError>) {
        match result {
            Ok(doc) => debug!("Finished parsing {source_name:?}: {} section(s)", doc.len()),
            Err(e) => warn!("Failed parsing {source_name:?}: {e}"),
        }
    }
}
