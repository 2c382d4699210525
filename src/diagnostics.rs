use std::fmt;

use super::session::TranslationSession;
use super::Error;

/// A message stamped with the offset of the code unit that triggered it and
/// the full expression for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    message: String,
    position: usize,
    expression: String,
}

impl Diagnostic {
    pub fn new(message: impl Into<String>, position: usize, expression: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            position,
            expression: expression.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Zero-based UTF-16 code unit offset into [`Diagnostic::expression`].
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "at character {} in regular expression \"{}\": {}",
            self.position, self.expression, self.message
        )
    }
}

impl TranslationSession<'_> {
    fn diagnostic(&self, message: String) -> Diagnostic {
        let cursor = self.cursor();
        Diagnostic::new(
            message,
            cursor.pos().saturating_sub(1),
            String::from_utf16_lossy(cursor.units()),
        )
    }

    /// A fatal error positioned at the current unit.
    pub fn error(&self, key: &str) -> Error {
        Error::Syntax(self.diagnostic(key.to_string()))
    }

    /// Like [`TranslationSession::error`], with `arg` appended in parentheses.
    pub fn error_with(&self, key: &str, arg: &str) -> Error {
        Error::Syntax(self.diagnostic(format!("{key} ({arg})")))
    }

    /// Records a non-fatal diagnostic positioned at the current unit.
    pub fn warn(&mut self, key: &str) {
        let warning = self.diagnostic(key.to_string());
        log::debug!("Warning {warning}");
        self.push_warning(warning);
    }
}
