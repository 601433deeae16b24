//! Small templating helper for SQL built inside trigger bodies.
//!
//! An inverse statement is assembled at trigger-fire time as a string
//! concatenation of fixed text and row expressions. Fixed text is always
//! emitted as an escaped string literal, identifiers are always
//! double-quoted, and row values only ever reach the output through
//! SQLite's `quote()`.

/// Double-quote an identifier, doubling embedded quotes.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Single-quote a string literal, doubling embedded quotes.
pub fn string_literal(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
    Text(String),
    Expr(String),
}

/// Builder for a `'…' || expr || '…'` concatenation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InverseSql {
    parts: Vec<Part>,
}

impl InverseSql {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append fixed SQL text. Adjacent text is merged into one literal.
    pub fn text(mut self, text: &str) -> Self {
        if let Some(Part::Text(last)) = self.parts.last_mut() {
            last.push_str(text);
        } else {
            self.parts.push(Part::Text(text.to_string()));
        }
        self
    }

    /// Append an SQL expression evaluated when the trigger fires.
    pub fn expr(mut self, expr: impl Into<String>) -> Self {
        self.parts.push(Part::Expr(expr.into()));
        self
    }

    /// Append the literal form of a column's pre-change value.
    pub fn old_value(self, column: &str) -> Self {
        self.expr(format!("quote(OLD.{})", quote_ident(column)))
    }

    pub fn render(&self) -> String {
        if self.parts.is_empty() {
            return string_literal("");
        }
        self.parts
            .iter()
            .map(|part| match part {
                Part::Text(text) => string_literal(text),
                Part::Expr(expr) => expr.clone(),
            })
            .collect::<Vec<_>>()
            .join(" || ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_identifiers_and_literals() {
        assert_eq!(quote_ident("plain"), "\"plain\"");
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
        assert_eq!(string_literal("it's"), "'it''s'");
    }

    #[test]
    fn merges_adjacent_text() {
        let sql = InverseSql::new()
            .text("DELETE FROM ")
            .text("\"t\" WHERE rowid=")
            .expr("NEW.rowid")
            .text(";")
            .render();
        assert_eq!(sql, "'DELETE FROM \"t\" WHERE rowid=' || NEW.rowid || ';'");
    }

    #[test]
    fn old_values_go_through_quote() {
        let sql = InverseSql::new().text("x=").old_value("col").render();
        assert_eq!(sql, "'x=' || quote(OLD.\"col\")");
    }

    #[test]
    fn renders_into_a_valid_expression() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        let expr = InverseSql::new()
            .text("UPDATE \"o'clock\" SET v=")
            .expr("quote('it''s')")
            .text(";")
            .render();
        let out: String = conn
            .query_row(&format!("SELECT {expr}"), [], |row| row.get(0))
            .unwrap();
        assert_eq!(out, "UPDATE \"o'clock\" SET v='it''s';");
    }
}
