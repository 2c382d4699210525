use super::{copy_scalar, AtomTranslator, TargetDialect};
use crate::session::TranslationSession;
use crate::Result;

/// Copies atoms that are already in `regex` syntax.
///
/// Useful for re-scanning translated output: the grammar driver still
/// validates quantifier bounds and group nesting while the text is kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassThroughAtomTranslator;

impl AtomTranslator for PassThroughAtomTranslator {
    fn target(&self) -> TargetDialect {
        TargetDialect::RustRegex
    }

    fn translate_atom(&self, session: &mut TranslationSession<'_>) -> Result<bool> {
        if session.is_eos() {
            return Ok(false);
        }
        match session.cursor().cur_ascii() {
            Some(b'?' | b'*' | b'+' | b')' | b'{' | b'}' | b'|') => return Ok(false),
            Some(b'(') => copy_group(session)?,
            Some(b'[') => copy_class(session)?,
            Some(b'\\') => copy_escape(session)?,
            Some(b'.' | b'^' | b'$') => session.copy_cur_char(),
            _ => copy_scalar(session)?,
        }
        Ok(true)
    }
}

fn copy_group(session: &mut TranslationSession<'_>) -> Result<()> {
    session.copy_cur_char();
    if session.at(b'?') {
        session.copy_cur_char();
        loop {
            match session.cursor().cur_ascii() {
                None if session.is_eos() => return Err(session.error_with("expected", ")")),
                // (?i) and friends set flags without a body.
                Some(b')') => {
                    session.copy_cur_char();
                    return Ok(());
                }
                Some(b':' | b'=' | b'!' | b'>') => {
                    session.copy_cur_char();
                    break;
                }
                Some(b'<') if matches!(session.cursor().peek(), Some(0x3D | 0x21)) => {
                    session.copy_cur_char();
                    session.copy_cur_char();
                    break;
                }
                _ => copy_scalar(session)?,
            }
        }
    } else {
        let index = session.open_capture();
        session.translate_nested_regexp()?;
        session.expect(b')')?;
        session.close_capture(index);
        session.copy_cur_char();
        return Ok(());
    }
    session.translate_nested_regexp()?;
    session.expect(b')')?;
    session.copy_cur_char();
    Ok(())
}

/// Copies a bracketed class verbatim, nested brackets included.
fn copy_class(session: &mut TranslationSession<'_>) -> Result<()> {
    let outermost = !session.cursor().in_char_class();
    session.cursor_mut().set_in_char_class(true);
    session.copy_cur_char();
    if session.at(b'^') {
        session.copy_cur_char();
    }
    if session.at(b']') {
        session.copy_cur_char();
    }
    let mut depth = 1usize;
    while depth > 0 {
        match session.cursor().cur_ascii() {
            None if session.is_eos() => return Err(session.error_with("expected", "]")),
            Some(b'\\') => copy_escape(session)?,
            Some(b'[') => {
                depth += 1;
                session.copy_cur_char();
            }
            Some(b']') => {
                depth -= 1;
                if depth == 0 && outermost {
                    session.cursor_mut().set_in_char_class(false);
                }
                session.copy_cur_char();
            }
            _ => copy_scalar(session)?,
        }
    }
    Ok(())
}

fn copy_escape(session: &mut TranslationSession<'_>) -> Result<()> {
    session.copy_cur_char();
    if session.is_eos() {
        return Err(session.error("invalid escape sequence"));
    }
    let letter = session.cursor().cur_ascii();
    copy_scalar(session)?;
    let fixed_width = match letter {
        Some(b'x') => 2,
        Some(b'u') => 4,
        Some(b'U') => 8,
        Some(b'p' | b'P') => 1,
        Some(b'1'..=b'9') => {
            while matches!(session.cursor().cur_ascii(), Some(b'0'..=b'9')) {
                session.copy_cur_char();
            }
            return Ok(());
        }
        _ => return Ok(()),
    };
    if session.at(b'{') {
        while !session.at(b'}') {
            if session.is_eos() {
                return session.expect(b'}');
            }
            copy_scalar(session)?;
        }
        session.copy_cur_char();
        return Ok(());
    }
    for _ in 0..fixed_width {
        if session.is_eos() {
            return Err(session.error("invalid escape sequence"));
        }
        copy_scalar(session)?;
    }
    Ok(())
}
