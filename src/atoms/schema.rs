use regex_syntax::hir::ClassUnicode;

use super::blocks::block_spans;
use super::char_class::{self, ClassPart};
use super::render;
use super::{AtomTranslator, TargetDialect};
use crate::session::TranslationSession;
use crate::Result;

/// Atoms of the XML Schema / XPath regex dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaAtomTranslator {
    target: TargetDialect,
}

impl SchemaAtomTranslator {
    pub const RUST: Self = Self::new(TargetDialect::RustRegex);
    pub const UTF16: Self = Self::new(TargetDialect::Utf16);

    pub const fn new(target: TargetDialect) -> Self {
        Self { target }
    }
}

/// A class member: a single character can end a range, a class cannot.
enum Member {
    Char(u32),
    Class(ClassUnicode),
}

impl Member {
    fn into_class(self) -> ClassUnicode {
        match self {
            Self::Char(value) => char_class::single(value),
            Self::Class(class) => class,
        }
    }
}

impl AtomTranslator for SchemaAtomTranslator {
    fn target(&self) -> TargetDialect {
        self.target
    }

    fn translate_atom(&self, session: &mut TranslationSession<'_>) -> Result<bool> {
        if session.is_eos() {
            return Ok(false);
        }
        let xpath = session.config().variant().is_xpath();
        match session.cursor().cur_ascii() {
            Some(b'?' | b'*' | b'+' | b')' | b'{' | b'}' | b'|' | b']') => return Ok(false),
            Some(b'(') => self.translate_group(session)?,
            Some(b'\\') => {
                session.advance();
                if xpath && matches!(session.cursor().cur_ascii(), Some(b'1'..=b'9')) {
                    self.translate_back_reference(session)?;
                } else {
                    let member = self.parse_escape(session)?;
                    self.emit_member(session, member);
                }
            }
            Some(b'[') => {
                let class = self.parse_char_class_expr(session)?;
                self.emit_class(session, &class);
            }
            Some(b'.') => {
                session.advance();
                let class = char_class::dot(session.config().dot_all());
                self.emit_class(session, &class);
            }
            Some(b'^' | b'$') if xpath => session.copy_cur_char(),
            _ => {
                let value = session.absorb_surrogate_pair()?;
                session.advance();
                self.emit_member(session, Member::Char(value));
            }
        }
        Ok(true)
    }
}

impl SchemaAtomTranslator {
    fn translate_group(&self, session: &mut TranslationSession<'_>) -> Result<()> {
        session.advance();
        if session.at(b'?') && session.config().variant().is_xpath30() {
            session.advance();
            session.expect(b':')?;
            session.advance();
            session.push_str("(?:");
            session.translate_nested_regexp()?;
            session.expect(b')')?;
            session.copy_cur_char();
            return Ok(());
        }
        let index = session.open_capture();
        session.push_char('(');
        session.translate_nested_regexp()?;
        session.expect(b')')?;
        session.close_capture(index);
        session.copy_cur_char();
        Ok(())
    }

    /// Digits are taken greedily while they still name an opened group.
    fn translate_back_reference(&self, session: &mut TranslationSession<'_>) -> Result<()> {
        let mut number = u32::from(session.cur() - u16::from(b'0'));
        loop {
            session.advance();
            let Some(digit @ b'0'..=b'9') = session.cursor().cur_ascii() else {
                break;
            };
            let extended = number * 10 + u32::from(digit - b'0');
            if extended > session.current_capture() {
                break;
            }
            number = extended;
        }
        if !session.is_capture_closed(number) {
            let reason = if number > session.current_capture() {
                "no such group"
            } else {
                "group not yet closed"
            };
            return Err(session.error_with("invalid backreference", &format!("\\{number}: {reason}")));
        }
        let mut out = String::new();
        render::push_back_reference(
            &mut out,
            self.target,
            number,
            session.config().case_blind(),
        );
        session.push_str(&out);
        Ok(())
    }

    /// Parses the escape whose letter is under the cursor, leaving the
    /// cursor past it.
    fn parse_escape(&self, session: &mut TranslationSession<'_>) -> Result<Member> {
        let Some(letter) = session.cursor().cur_ascii() else {
            return Err(session.error("invalid escape sequence"));
        };
        let member = match letter {
            b'n' => Member::Char(0x0A),
            b'r' => Member::Char(0x0D),
            b't' => Member::Char(0x09),
            b'\\' | b'|' | b'.' | b'-' | b'^' | b'?' | b'*' | b'+' | b'{' | b'}' | b'(' | b')'
            | b'[' | b']' => Member::Char(u32::from(letter)),
            b'$' if session.config().variant().is_xpath() => Member::Char(u32::from(letter)),
            b'p' | b'P' => return self.parse_category_escape(session, letter == b'P'),
            _ => match char_class::multi_char_escape(letter) {
                Some(part) => Member::Class(part.resolve(session.config().case_blind())),
                None => {
                    return Err(session.error_with(
                        "invalid escape sequence",
                        &format!("\\{}", char::from(letter)),
                    ));
                }
            },
        };
        session.advance();
        Ok(member)
    }

    /// `\p{Name}` or `\P{Name}`, cursor on the `p`.
    fn parse_category_escape(
        &self,
        session: &mut TranslationSession<'_>,
        negated: bool,
    ) -> Result<Member> {
        session.advance();
        session.expect(b'{')?;
        session.advance();
        let mut units = Vec::new();
        while !session.at(b'}') {
            if session.is_eos() {
                session.expect(b'}')?;
            }
            units.push(session.cur());
            session.advance();
        }
        let name = String::from_utf16_lossy(&units);
        let positive = match name.strip_prefix("Is") {
            Some(block) => self.block_class(session, block)?,
            None => match char_class::category(&name) {
                Some(class) => class,
                None => return Err(session.error_with("unknown category", &name)),
            },
        };
        session.advance();
        let case_blind = session.config().case_blind();
        Ok(Member::Class(ClassPart::new(positive, negated).resolve(case_blind)))
    }

    fn block_class(&self, session: &mut TranslationSession<'_>, block: &str) -> Result<ClassUnicode> {
        let variant = session.config().variant();
        let loose = variant.tolerates_unknown_blocks();
        if let Some(spans) = block_spans(block, loose) {
            return Ok(char_class::from_spans(&spans));
        }
        if !loose {
            return Err(session.error_with("unknown block name", block));
        }
        session.warn(&format!(
            "unknown block name ({block}); treated as matching any character"
        ));
        Ok(char_class::all_chars())
    }

    /// `[` ... `]` with the cursor on the opening bracket.
    fn parse_char_class_expr(&self, session: &mut TranslationSession<'_>) -> Result<ClassUnicode> {
        let outermost = !session.cursor().in_char_class();
        session.cursor_mut().set_in_char_class(true);
        session.advance();
        let class = self.parse_char_group(session)?;
        if outermost {
            session.cursor_mut().set_in_char_class(false);
        }
        session.advance();
        Ok(class)
    }

    /// Parses up to, not past, the closing `]`.
    fn parse_char_group(&self, session: &mut TranslationSession<'_>) -> Result<ClassUnicode> {
        let negated = session.at(b'^');
        if negated {
            session.advance();
        }
        if session.at(b']') {
            return Err(session.error("empty character class"));
        }
        let mut class = ClassUnicode::empty();
        let mut first = true;
        loop {
            if session.is_eos() {
                return Err(session.error_with("expected", "]"));
            }
            if session.at(b']') {
                break;
            }
            if session.at(b'-') {
                let next = session.cursor().peek();
                if !first && next == Some(u16::from(b'[')) {
                    break;
                }
                if !first && next != Some(u16::from(b']')) {
                    return Err(session.error("'-' not allowed here"));
                }
                session.advance();
                class.union(&char_class::single(u32::from(b'-')));
                first = false;
                continue;
            }
            let lower = self.parse_class_member(session)?;
            first = false;
            if !session.at(b'-') {
                class.union(&lower.into_class());
                continue;
            }
            session.advance();
            if session.at(b'[') {
                session.recede();
                class.union(&lower.into_class());
                break;
            }
            if session.at(b']') {
                class.union(&lower.into_class());
                class.union(&char_class::single(u32::from(b'-')));
                break;
            }
            let upper = self.parse_class_member(session)?;
            let (Member::Char(lo), Member::Char(hi)) = (lower, upper) else {
                return Err(session.error("the ends of a range must be single characters"));
            };
            if lo > hi {
                return Err(session.error("invalid range (start > end)"));
            }
            class.union(&char_class::from_spans(&[(lo, hi)]));
        }
        if session.config().case_blind() {
            class.case_fold_simple();
        }
        if negated {
            class.negate();
        }
        if session.at(b'-') {
            session.advance();
            let subtrahend = self.parse_char_class_expr(session)?;
            class.difference(&subtrahend);
            if !session.at(b']') {
                return Err(session.error_with("expected", "]"));
            }
        }
        Ok(class)
    }

    fn parse_class_member(&self, session: &mut TranslationSession<'_>) -> Result<Member> {
        match session.cursor().cur_ascii() {
            Some(b'\\') => {
                session.advance();
                self.parse_escape(session)
            }
            Some(b'[') => Err(session.error("'[' must be escaped")),
            Some(b'-') => Err(session.error("'-' not allowed here")),
            _ => {
                let value = session.absorb_surrogate_pair()?;
                session.advance();
                Ok(Member::Char(value))
            }
        }
    }

    fn emit_member(&self, session: &mut TranslationSession<'_>, member: Member) {
        match member {
            Member::Char(value) if session.config().case_blind() => {
                let mut class = char_class::single(value);
                class.case_fold_simple();
                if class.ranges().len() == 1 && class.ranges()[0].start() == class.ranges()[0].end() {
                    self.emit_literal(session, value);
                } else {
                    self.emit_class(session, &class);
                }
            }
            Member::Char(value) => self.emit_literal(session, value),
            Member::Class(class) => self.emit_class(session, &class),
        }
    }

    fn emit_literal(&self, session: &mut TranslationSession<'_>, value: u32) {
        let mut out = String::new();
        render::push_literal(&mut out, self.target, value);
        session.push_str(&out);
    }

    fn emit_class(&self, session: &mut TranslationSession<'_>, class: &ClassUnicode) {
        let expand = session.config().expand_complement_block_names();
        let mut out = String::new();
        render::push_class(&mut out, self.target, class, expand);
        session.push_str(&out);
    }
}
