//! Atom translators plugged into the grammar driver.
//!
//! The driver only knows branches, alternation and quantifiers. Everything
//! that counts as an atom (literals, classes, escapes, groups) is recognised
//! and rewritten by an [`AtomTranslator`] chosen per target engine.

mod blocks;
mod char_class;
mod passthrough;
mod render;
mod schema;

pub use passthrough::PassThroughAtomTranslator;
pub use render::escape;
pub use schema::SchemaAtomTranslator;

use super::session::TranslationSession;
use super::Result;

/// Native syntax family an atom translator writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetDialect {
    /// `regex` / `fancy-regex` syntax; classes range over scalar values.
    RustRegex,
    /// ECMAScript-style syntax without the `u` flag; classes range over
    /// 16-bit code units, so supplementary characters match as pairs.
    Utf16,
}

pub trait AtomTranslator {
    fn target(&self) -> TargetDialect;

    /// Translates one atom at the cursor, appending its native form.
    ///
    /// Returns `Ok(false)` without moving the cursor when no atom starts
    /// here. On success the cursor sits just past the atom.
    fn translate_atom(&self, session: &mut TranslationSession<'_>) -> Result<bool>;
}

/// Copies the scalar value at the cursor, joining a surrogate pair.
fn copy_scalar(session: &mut TranslationSession<'_>) -> Result<()> {
    let value = session.absorb_surrogate_pair()?;
    if let Some(ch) = char::from_u32(value) {
        session.push_char(ch);
    }
    session.advance();
    Ok(())
}
