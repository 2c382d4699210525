use std::collections::HashSet;

use super::atoms::AtomTranslator;
use super::config::TranslatorConfig;
use super::cursor::Cursor;
use super::diagnostics::Diagnostic;
use super::Result;

const STACK_RED_ZONE: usize = 64 * 1024;
const STACK_GROWTH: usize = 1024 * 1024;

/// Mutable state of one translation pass.
///
/// Owned exclusively by the call that translates one expression; atom
/// translators receive it by `&mut` and may re-enter the grammar driver for
/// nested groups.
pub struct TranslationSession<'a> {
    config: &'a TranslatorConfig,
    atoms: &'a dyn AtomTranslator,
    cursor: Cursor<'a>,
    output: String,
    current_capture: u32,
    captures: HashSet<u32>,
    warnings: Vec<Diagnostic>,
    depth: usize,
}

impl<'a> TranslationSession<'a> {
    pub fn new(
        units: &'a [u16],
        config: &'a TranslatorConfig,
        atoms: &'a dyn AtomTranslator,
    ) -> Self {
        Self {
            config,
            atoms,
            cursor: Cursor::new(units, config.fold_whitespace()),
            output: String::with_capacity(units.len() * 2),
            current_capture: 0,
            captures: HashSet::new(),
            warnings: Vec::new(),
            depth: 0,
        }
    }

    pub fn config(&self) -> &'a TranslatorConfig {
        self.config
    }

    pub fn cursor(&self) -> &Cursor<'a> {
        &self.cursor
    }

    pub fn cursor_mut(&mut self) -> &mut Cursor<'a> {
        &mut self.cursor
    }

    pub fn cur(&self) -> u16 {
        self.cursor.cur()
    }

    pub fn at(&self, ch: u8) -> bool {
        self.cursor.at(ch)
    }

    pub fn is_eos(&self) -> bool {
        self.cursor.is_eos()
    }

    pub fn advance(&mut self) {
        self.cursor.advance();
    }

    pub fn recede(&mut self) {
        self.cursor.recede();
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn push_str(&mut self, text: &str) {
        self.output.push_str(text);
    }

    pub fn push_char(&mut self, ch: char) {
        self.output.push(ch);
    }

    /// Appends the current unit verbatim and advances past it.
    ///
    /// Only meaningful for ASCII units; callers route anything else through
    /// [`TranslationSession::absorb_surrogate_pair`].
    pub fn copy_cur_char(&mut self) {
        if let Some(ch) = char::from_u32(u32::from(self.cursor.cur())) {
            self.output.push(ch);
        }
        self.cursor.advance();
    }

    pub fn expect(&self, ch: u8) -> Result<()> {
        if self.cursor.at(ch) {
            Ok(())
        } else {
            Err(self.error_with("expected", &char::from(ch).to_string()))
        }
    }

    /// Allocates the next capture index, in order of opening parenthesis.
    pub fn open_capture(&mut self) -> u32 {
        self.current_capture += 1;
        self.current_capture
    }

    pub fn close_capture(&mut self, index: u32) {
        self.captures.insert(index);
    }

    /// Highest capture index allocated so far.
    pub fn current_capture(&self) -> u32 {
        self.current_capture
    }

    pub fn is_capture_closed(&self, index: u32) -> bool {
        self.captures.contains(&index)
    }

    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    pub(crate) fn push_warning(&mut self, warning: Diagnostic) {
        self.warnings.push(warning);
    }

    pub(crate) fn into_parts(self) -> (String, u32, Vec<Diagnostic>) {
        (self.output, self.current_capture, self.warnings)
    }

    pub fn translate_top(&mut self) -> Result<()> {
        self.cursor.advance();
        self.translate_regexp()?;
        if !self.cursor.is_eos() {
            return Err(self.error("expected end of string"));
        }
        Ok(())
    }

    pub fn translate_regexp(&mut self) -> Result<()> {
        self.translate_branch()?;
        while self.cursor.at(b'|') {
            self.copy_cur_char();
            self.translate_branch()?;
        }
        Ok(())
    }

    pub fn translate_branch(&mut self) -> Result<()> {
        let atoms = self.atoms;
        while atoms.translate_atom(self)? {
            self.translate_quantifier()?;
        }
        Ok(())
    }

    /// Translates a parenthesised body, bounded by the configured depth.
    pub fn translate_nested_regexp(&mut self) -> Result<()> {
        if self.depth >= self.config.max_depth() {
            return Err(self.error("nesting too deep"));
        }
        self.depth += 1;
        let result = stacker::maybe_grow(STACK_RED_ZONE, STACK_GROWTH, || self.translate_regexp());
        self.depth -= 1;
        result
    }
}
