//! Translation of XML Schema and XPath regular expressions into native
//! regex syntax.
//!
//! ```
//! use schema_regex::{translate, GrammarVariant, TranslatorConfig};
//!
//! let config = TranslatorConfig::new(GrammarVariant::Xsd10);
//! let translation = translate("[a-c]{2,}", &config)?;
//! assert_eq!(translation.pattern(), "[a-c]{2,}");
//! # Ok::<(), schema_regex::Error>(())
//! ```

use std::error::Error as StdError;
use std::fmt;

pub mod atoms;
pub mod config;
pub mod cursor;
pub mod diagnostics;
pub mod native;
pub mod quantifier;
pub mod range;
pub mod session;
pub mod surrogate;

pub use atoms::{AtomTranslator, PassThroughAtomTranslator, SchemaAtomTranslator, TargetDialect};
pub use config::{GrammarVariant, TranslatorConfig};
pub use diagnostics::Diagnostic;
pub use native::{Captures, Match, NativeRegex, NativeRegexBuilder};
pub use range::Range;
pub use session::TranslationSession;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    Syntax(Diagnostic),
    InvalidFlags(String),
    Native(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax(diagnostic) => write!(f, "Error {diagnostic}"),
            Self::InvalidFlags(msg) => write!(f, "invalid regex flags: {msg}"),
            Self::Native(msg) => write!(f, "native regex error: {msg}"),
        }
    }
}

impl StdError for Error {}

impl Error {
    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            Self::Syntax(diagnostic) => Some(diagnostic),
            _ => None,
        }
    }
}

/// A successfully translated expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pattern: String,
    target: TargetDialect,
    variant: GrammarVariant,
    multi_line: bool,
    capture_count: u32,
    warnings: Vec<Diagnostic>,
}

impl Translation {
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn into_pattern(self) -> String {
        self.pattern
    }

    pub fn target(&self) -> TargetDialect {
        self.target
    }

    pub fn variant(&self) -> GrammarVariant {
        self.variant
    }

    pub fn multi_line(&self) -> bool {
        self.multi_line
    }

    /// Number of capturing groups in the source expression.
    pub fn capture_count(&self) -> u32 {
        self.capture_count
    }

    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }
}

/// Translates `expression` into `regex` / `fancy-regex` syntax.
pub fn translate(expression: &str, config: &TranslatorConfig) -> Result<Translation> {
    translate_with(expression, config, &SchemaAtomTranslator::RUST)
}

pub fn translate_with(
    expression: &str,
    config: &TranslatorConfig,
    atoms: &dyn AtomTranslator,
) -> Result<Translation> {
    let units: Vec<u16> = expression.encode_utf16().collect();
    translate_utf16(&units, config, atoms)
}

/// Translates an expression given as UTF-16 code units, which may contain
/// unpaired surrogates.
pub fn translate_utf16(
    units: &[u16],
    config: &TranslatorConfig,
    atoms: &dyn AtomTranslator,
) -> Result<Translation> {
    log::debug!(
        "translating {} code units for {:?} ({:?})",
        units.len(),
        atoms.target(),
        config.variant()
    );
    let (pattern, capture_count, warnings) = if config.literal() {
        let text = decode_literal(units)?;
        (atoms::escape(atoms.target(), &text).into_owned(), 0, Vec::new())
    } else {
        let mut session = TranslationSession::new(units, config, atoms);
        session.translate_top()?;
        session.into_parts()
    };
    log::debug!(
        "translated to {pattern:?} with {} warning(s)",
        warnings.len()
    );
    Ok(Translation {
        pattern,
        target: atoms.target(),
        variant: config.variant(),
        multi_line: config.multi_line(),
        capture_count,
        warnings,
    })
}

/// Decodes the text of a `q`-flagged expression, rejecting unpaired
/// surrogates at the offset the grammar driver would report.
fn decode_literal(units: &[u16]) -> Result<String> {
    let mut text = String::with_capacity(units.len());
    let mut offset = 0;
    for decoded in char::decode_utf16(units.iter().copied()) {
        match decoded {
            Ok(ch) => {
                text.push(ch);
                offset += ch.len_utf16();
            }
            Err(err) => {
                let position = if surrogate::is_high_surrogate(err.unpaired_surrogate()) {
                    offset + 1
                } else {
                    offset
                };
                return Err(Error::Syntax(Diagnostic::new(
                    "invalid surrogate pair",
                    position,
                    String::from_utf16_lossy(units),
                )));
            }
        }
    }
    Ok(text)
}
