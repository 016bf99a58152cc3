use crate::constants::{
    BEGIN_STATEMENT_DIRECTIVE, DIRECTIVE_PREFIX, END_STATEMENT_DIRECTIVE,
    NO_TRANSACTION_DIRECTIVE,
};
use crate::error::ParseError;
use tracing::warn;

/// Statements for one direction of a migration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedMigration {
    /// Whether the driver should wrap the statements in a transaction
    pub use_transaction: bool,

    /// Statements in source order, never empty
    pub statements: Vec<String>,
}

impl Default for ParsedMigration {
    fn default() -> Self {
        Self {
            use_transaction: true,
            statements: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Directive {
    NoTransaction,
    BeginStatement,
    EndStatement,
}

impl Directive {
    fn from_line(line: &str) -> Option<Self> {
        match line.trim().strip_prefix(DIRECTIVE_PREFIX)? {
            NO_TRANSACTION_DIRECTIVE => Some(Self::NoTransaction),
            BEGIN_STATEMENT_DIRECTIVE => Some(Self::BeginStatement),
            END_STATEMENT_DIRECTIVE => Some(Self::EndStatement),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Normal,
    InsideBlock,
}

/// Parse a migration body into executable statements.
///
/// Without directives the whole body is a single statement. With
/// `-- +migration NoTransaction` on the first substantive line the body is
/// split on `;` instead, except for text between `-- +migration
/// BeginStatement` and `-- +migration EndStatement`, which is always kept
/// as one statement.
pub fn parse_statements(sql: &str) -> Result<ParsedMigration, ParseError> {
    let mut parser = StatementParser::new();

    for (index, line) in sql.split_inclusive('\n').enumerate() {
        parser.feed(index + 1, line)?;
    }

    Ok(parser.finish())
}

struct StatementParser {
    parsed: ParsedMigration,
    buffer: String,
    state: State,
    block_start: usize,
}

impl StatementParser {
    fn new() -> Self {
        Self {
            parsed: ParsedMigration::default(),
            buffer: String::new(),
            state: State::Normal,
            block_start: 0,
        }
    }

    fn feed(&mut self, line_number: usize, line: &str) -> Result<(), ParseError> {
        match Directive::from_line(line) {
            Some(Directive::NoTransaction) => {
                if self.state == State::InsideBlock {
                    return Err(ParseError::NoTransactionInsideBlock { line: line_number });
                }
                if self.has_content() {
                    return Err(ParseError::MisplacedNoTransaction { line: line_number });
                }
                self.parsed.use_transaction = false;
            }
            Some(Directive::BeginStatement) => {
                self.flush_split();
                self.state = State::InsideBlock;
                self.block_start = line_number;
            }
            Some(Directive::EndStatement) => {
                let block = std::mem::take(&mut self.buffer);
                self.push_statement(&block);
                self.state = State::Normal;
            }
            None => self.buffer.push_str(line),
        }

        Ok(())
    }

    fn finish(mut self) -> ParsedMigration {
        if self.state == State::InsideBlock {
            warn!(
                "Statement block opened at line {} is never closed with {}{}",
                self.block_start, DIRECTIVE_PREFIX, END_STATEMENT_DIRECTIVE
            );
        }
        self.flush_split();
        self.parsed
    }

    fn has_content(&self) -> bool {
        !self.parsed.statements.is_empty() || !self.buffer.trim().is_empty()
    }

    /// Flush the buffer, splitting on `;` only when running outside a transaction
    fn flush_split(&mut self) {
        let buffer = std::mem::take(&mut self.buffer);

        if self.parsed.use_transaction {
            self.push_statement(&buffer);
        } else {
            for fragment in buffer.split_inclusive(';') {
                self.push_statement(fragment);
            }
        }
    }

    fn push_statement(&mut self, statement: &str) {
        let statement = statement.trim();
        if !statement.is_empty() {
            self.parsed.statements.push(statement.to_string());
        }
    }
}
