use std::borrow::Cow;
use std::fmt::Write as _;

use regex_syntax::hir::ClassUnicode;

use super::TargetDialect;
use super::char_class::to_ranges;
use crate::range::Range;
use crate::surrogate::{high_surrogate_ranges, low_surrogate_ranges, SUPPLEMENTARY_MIN};

const RUST_NEVER: &str = r"[^\x{0}-\x{10FFFF}]";
const UTF16_NEVER: &str = r"[^\u0000-\uFFFF]";
const UTF16_LOW_SURROGATES: &str = r"[\uDC00-\uDFFF]";

/// Escapes `value` so the target matches it literally.
pub fn escape(target: TargetDialect, value: &str) -> Cow<'_, str> {
    let mut out = String::with_capacity(value.len());
    let mut changed = false;

    for ch in value.chars() {
        let before = out.len();
        push_literal(&mut out, target, u32::from(ch));
        if out.len() - before != ch.len_utf8() || !out[before..].starts_with(ch) {
            changed = true;
        }
    }

    if changed {
        Cow::Owned(out)
    } else {
        Cow::Borrowed(value)
    }
}

pub(super) fn push_literal(out: &mut String, target: TargetDialect, value: u32) {
    let Some(ch) = char::from_u32(value) else {
        return;
    };
    match target {
        TargetDialect::RustRegex => {
            if regex_syntax::is_meta_character(ch) {
                out.push('\\');
                out.push(ch);
            } else if ch.is_control() {
                push_rust_hex(out, value);
            } else {
                out.push(ch);
            }
        }
        TargetDialect::Utf16 => {
            if value >= SUPPLEMENTARY_MIN {
                let mut units = [0u16; 2];
                ch.encode_utf16(&mut units);
                out.push_str("(?:");
                push_utf16_hex(out, units[0]);
                push_utf16_hex(out, units[1]);
                out.push(')');
            } else if is_utf16_meta(ch) {
                out.push('\\');
                out.push(ch);
            } else if ch.is_ascii_graphic() || ch == ' ' {
                out.push(ch);
            } else {
                push_utf16_hex(out, value as u16);
            }
        }
    }
}

/// `case_blind` makes the Rust form compare the captured text ignoring case.
pub(super) fn push_back_reference(
    out: &mut String,
    target: TargetDialect,
    number: u32,
    case_blind: bool,
) {
    let flags = match target {
        TargetDialect::RustRegex if case_blind => "i:",
        _ => ":",
    };
    let _ = write!(out, "(?{flags}\\{number})");
}

/// Renders `class` as one quantifiable native atom.
pub(super) fn push_class(
    out: &mut String,
    target: TargetDialect,
    class: &ClassUnicode,
    expand_complement: bool,
) {
    match target {
        TargetDialect::RustRegex => push_rust_class(out, class, expand_complement),
        TargetDialect::Utf16 => push_utf16_class(out, &to_ranges(class)),
    }
}

fn push_rust_class(out: &mut String, class: &ClassUnicode, expand_complement: bool) {
    if class.ranges().is_empty() {
        out.push_str(RUST_NEVER);
        return;
    }
    let ranges = to_ranges(class);
    if !expand_complement {
        let mut complement = class.clone();
        complement.negate();
        let complement = to_ranges(&complement);
        if !complement.is_empty() && complement.len() < ranges.len() {
            out.push_str("[^");
            push_rust_ranges(out, &complement);
            out.push(']');
            return;
        }
    }
    out.push('[');
    push_rust_ranges(out, &ranges);
    out.push(']');
}

fn push_rust_ranges(out: &mut String, ranges: &[Range]) {
    for range in ranges {
        push_rust_class_member(out, range.min());
        if range.max() > range.min() {
            out.push('-');
            push_rust_class_member(out, range.max());
        }
    }
}

fn push_rust_class_member(out: &mut String, value: u32) {
    match char::from_u32(value) {
        Some(ch) if ch.is_ascii_alphanumeric() => out.push(ch),
        _ => push_rust_hex(out, value),
    }
}

fn push_rust_hex(out: &mut String, value: u32) {
    let _ = write!(out, "\\x{{{value:X}}}");
}

/// BMP members go in one bracket; supplementary members become surrogate
/// pair alternatives.
fn push_utf16_class(out: &mut String, ranges: &[Range]) {
    let (bmp, supplementary) = split_at_bmp(ranges);
    let mut alternatives = Vec::new();

    if !bmp.is_empty() {
        let mut bracket = String::from("[");
        for range in &bmp {
            push_utf16_span(&mut bracket, range.min() as u16, range.max() as u16);
        }
        bracket.push(']');
        alternatives.push(bracket);
    }

    let highs = high_surrogate_ranges(&supplementary);
    if !highs.is_empty() {
        let mut pair = String::from("[");
        for high in &highs {
            push_utf16_span(&mut pair, high.min, high.max);
        }
        pair.push(']');
        pair.push_str(UTF16_LOW_SURROGATES);
        alternatives.push(pair);
    }

    for low in low_surrogate_ranges(&supplementary) {
        let mut pair = String::new();
        push_utf16_hex(&mut pair, low.high);
        if low.low_min == low.low_max {
            push_utf16_hex(&mut pair, low.low_min);
        } else {
            pair.push('[');
            push_utf16_span(&mut pair, low.low_min, low.low_max);
            pair.push(']');
        }
        alternatives.push(pair);
    }

    match alternatives.as_slice() {
        [] => out.push_str(UTF16_NEVER),
        [only] if supplementary.is_empty() => out.push_str(only),
        _ => {
            out.push_str("(?:");
            out.push_str(&alternatives.join("|"));
            out.push(')');
        }
    }
}

fn split_at_bmp(ranges: &[Range]) -> (Vec<Range>, Vec<Range>) {
    let mut bmp = Vec::new();
    let mut supplementary = Vec::new();
    for range in ranges {
        if range.min() < SUPPLEMENTARY_MIN {
            bmp.push(Range::new(range.min(), range.max().min(SUPPLEMENTARY_MIN - 1)));
        }
        if range.max() >= SUPPLEMENTARY_MIN {
            supplementary.push(Range::new(range.min().max(SUPPLEMENTARY_MIN), range.max()));
        }
    }
    (bmp, supplementary)
}

fn push_utf16_span(out: &mut String, min: u16, max: u16) {
    push_utf16_class_member(out, min);
    if max > min {
        out.push('-');
        push_utf16_class_member(out, max);
    }
}

fn push_utf16_class_member(out: &mut String, unit: u16) {
    match u8::try_from(unit) {
        Ok(byte) if byte.is_ascii_alphanumeric() => out.push(char::from(byte)),
        _ => push_utf16_hex(out, unit),
    }
}

fn push_utf16_hex(out: &mut String, unit: u16) {
    let _ = write!(out, "\\u{unit:04X}");
}

fn is_utf16_meta(ch: char) -> bool {
    matches!(
        ch,
        '\\' | '.' | '*' | '+' | '?' | '(' | ')' | '[' | ']' | '{' | '}' | '|' | '^' | '$' | '/'
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atoms::char_class::from_spans;

    fn rust_class(spans: &[(u32, u32)], expand: bool) -> String {
        let mut out = String::new();
        push_class(&mut out, TargetDialect::RustRegex, &from_spans(spans), expand);
        out
    }

    fn utf16_class(spans: &[(u32, u32)]) -> String {
        let mut out = String::new();
        push_class(&mut out, TargetDialect::Utf16, &from_spans(spans), true);
        out
    }

    #[test]
    fn rust_class_uses_hex_for_non_alphanumerics() {
        assert_eq!(rust_class(&[(0x61, 0x7A), (0x2D, 0x2D)], true), r"[\x{2D}a-z]");
    }

    #[test]
    fn rust_class_prefers_shorter_complement_unless_expanding() {
        let spans = [(0, 0x40), (0x42, 0x10FFFF)];
        assert_eq!(rust_class(&spans, false), "[^A]");
        assert_eq!(
            rust_class(&spans, true),
            r"[\x{0}-\x{40}B-\x{D7FF}\x{E000}-\x{10FFFF}]"
        );
    }

    #[test]
    fn empty_class_never_matches() {
        assert_eq!(rust_class(&[], false), RUST_NEVER);
        assert_eq!(utf16_class(&[]), UTF16_NEVER);
    }

    #[test]
    fn utf16_bmp_only_class_is_a_plain_bracket() {
        assert_eq!(utf16_class(&[(0x61, 0x63), (0xE9, 0xE9)]), r"[a-c\u00E9]");
    }

    #[test]
    fn utf16_supplementary_class_splits_into_pairs() {
        assert_eq!(
            utf16_class(&[(0x41, 0x41), (0x10005, 0x10800)]),
            r"(?:[A]|[\uD801][\uDC00-\uDFFF]|\uD800[\uDC05-\uDFFF]|\uD802\uDC00)"
        );
    }

    #[test]
    fn utf16_full_high_span_needs_no_low_alternative() {
        assert_eq!(
            utf16_class(&[(0x10000, 0x103FF)]),
            r"(?:[\uD800][\uDC00-\uDFFF])"
        );
    }

    #[test]
    fn literals_escape_per_target() {
        let mut out = String::new();
        push_literal(&mut out, TargetDialect::RustRegex, u32::from('-'));
        push_literal(&mut out, TargetDialect::RustRegex, u32::from('\u{e9}'));
        push_literal(&mut out, TargetDialect::RustRegex, 0x0A);
        assert_eq!(out, "\\-\u{e9}\\x{A}");

        let mut out = String::new();
        push_literal(&mut out, TargetDialect::Utf16, u32::from('$'));
        push_literal(&mut out, TargetDialect::Utf16, 0x1F600);
        push_literal(&mut out, TargetDialect::Utf16, 0xE9);
        assert_eq!(out, r"\$(?:\uD83D\uDE00)\u00E9");
    }

    #[test]
    fn case_blind_back_reference_sets_inline_flag() {
        let mut out = String::new();
        push_back_reference(&mut out, TargetDialect::RustRegex, 2, true);
        push_back_reference(&mut out, TargetDialect::RustRegex, 2, false);
        push_back_reference(&mut out, TargetDialect::Utf16, 2, true);
        assert_eq!(out, r"(?i:\2)(?:\2)(?:\2)");
    }

    #[test]
    fn escape_borrows_when_nothing_changes() {
        assert!(matches!(
            escape(TargetDialect::RustRegex, "plain text"),
            Cow::Borrowed(_)
        ));
        assert_eq!(escape(TargetDialect::RustRegex, "a.b*"), r"a\.b\*");
    }
}
