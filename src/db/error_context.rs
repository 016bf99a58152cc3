//! Readable reports for statements PostgreSQL rejected.

use sqlx::postgres::{PgDatabaseError, PgErrorPosition};
use std::fmt::Write as _;

const CONTEXT_LINES: usize = 3;

/// What PostgreSQL told us about a failed statement
#[derive(Debug, Clone, Default)]
pub struct SqlErrorContext {
    pub message: String,
    /// Line within the statement (from the reported character position)
    pub line_number: Option<usize>,
    pub detail: Option<String>,
    pub hint: Option<String>,
    /// e.g. the PL/pgSQL call stack
    pub context: Option<String>,
    /// SQLSTATE, e.g. "42P01" for undefined_table
    pub code: Option<String>,
}

impl SqlErrorContext {
    pub fn from_sqlx_error(error: &sqlx::Error, statement: &str) -> Self {
        if let Some(db_error) = error.as_database_error()
            && let Some(pg_error) = db_error.try_downcast_ref::<PgDatabaseError>()
        {
            let position = pg_error.position().map(|pos| match pos {
                PgErrorPosition::Original(p) => p,
                PgErrorPosition::Internal { position, .. } => position,
            });

            return Self {
                message: pg_error.message().to_string(),
                line_number: position.map(|p| position_to_line(statement, p)),
                detail: pg_error.detail().map(str::to_string),
                hint: pg_error.hint().map(str::to_string),
                context: pg_error.r#where().map(str::to_string),
                code: Some(pg_error.code().to_string()),
            };
        }

        Self {
            message: error.to_string(),
            ..Self::default()
        }
    }

    /// Render a report for statement `number` (1-based) of `migration`
    pub fn format(&self, migration: &str, number: usize, statement: &str) -> String {
        let mut msg = format!("SQL error in statement {} of {}", number, migration);

        if let Some(line) = self.line_number {
            let _ = write!(msg, " at line {}", line);
        }
        if let Some(code) = &self.code {
            let _ = write!(msg, " [{}]", code);
        }
        let _ = write!(msg, ":\n\n  {}\n", self.message);

        for (label, value) in [
            ("Detail", &self.detail),
            ("Hint", &self.hint),
            ("Context", &self.context),
        ] {
            if let Some(value) = value {
                let _ = write!(msg, "\n  {}: {}", label, value);
            }
        }

        if let Some(line) = self.line_number {
            let _ = write!(msg, "\n\n{}", format_line_context(statement, line));
        }

        msg
    }
}

/// Convert a 1-indexed character position to a line number
pub fn position_to_line(content: &str, position: usize) -> usize {
    content
        .chars()
        .take(position.saturating_sub(1))
        .filter(|c| *c == '\n')
        .count()
        + 1
}

/// Show the lines around `error_line`, marking it with `>`
pub fn format_line_context(content: &str, error_line: usize) -> String {
    let lines: Vec<&str> = content.lines().collect();
    let total_lines = lines.len();

    let error_idx = error_line.saturating_sub(1);
    let start_idx = error_idx.saturating_sub(CONTEXT_LINES).min(total_lines);
    let end_idx = (error_idx + CONTEXT_LINES + 1).min(total_lines);

    let mut result = String::new();

    if start_idx > 0 {
        let _ = writeln!(result, "  ... [{} lines above]", start_idx);
    }

    for (idx, line) in lines[start_idx..end_idx].iter().enumerate() {
        let line_num = start_idx + idx + 1;
        let marker = if line_num == error_line { ">" } else { " " };
        let _ = writeln!(result, "  {} {:4} | {}", marker, line_num, line);
    }

    if end_idx < total_lines {
        let _ = write!(result, "  ... [{} lines below]", total_lines - end_idx);
    }

    result
}
