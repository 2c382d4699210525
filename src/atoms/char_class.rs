use regex_syntax::hir::{Class, ClassUnicode, ClassUnicodeRange, HirKind, Literal};

use crate::range::Range;

const SURROGATE_MIN: u32 = 0xD800;
const SURROGATE_MAX: u32 = 0xDFFF;

/// General categories usable in `\p{..}`.
static CATEGORIES: &[&str] = &[
    "L", "Lu", "Ll", "Lt", "Lm", "Lo", "M", "Mn", "Mc", "Me", "N", "Nd", "Nl", "No", "P", "Pc",
    "Pd", "Ps", "Pe", "Pi", "Pf", "Po", "Z", "Zs", "Zl", "Zp", "S", "Sm", "Sc", "Sk", "So", "C",
    "Cc", "Cf", "Co", "Cn",
];

static NAME_START_CHARS: &[(u32, u32)] = &[
    (0x3A, 0x3A),
    (0x41, 0x5A),
    (0x5F, 0x5F),
    (0x61, 0x7A),
    (0xC0, 0xD6),
    (0xD8, 0xF6),
    (0xF8, 0x2FF),
    (0x370, 0x37D),
    (0x37F, 0x1FFF),
    (0x200C, 0x200D),
    (0x2070, 0x218F),
    (0x2C00, 0x2FEF),
    (0x3001, 0xD7FF),
    (0xF900, 0xFDCF),
    (0xFDF0, 0xFFFD),
    (0x10000, 0xEFFFF),
];

static NAME_EXTRA_CHARS: &[(u32, u32)] = &[
    (0x2D, 0x2E),
    (0x30, 0x39),
    (0xB7, 0xB7),
    (0x300, 0x36F),
    (0x203F, 0x2040),
];

static SPACE_CHARS: &[(u32, u32)] = &[(0x09, 0x0A), (0x0D, 0x0D), (0x20, 0x20)];

/// A class in positive form plus whether it is meant complemented.
///
/// Case folding applies to the positive form before complementing.
#[derive(Debug, Clone)]
pub(super) struct ClassPart {
    pub(super) positive: ClassUnicode,
    pub(super) negated: bool,
}

impl ClassPart {
    pub(super) fn new(positive: ClassUnicode, negated: bool) -> Self {
        Self { positive, negated }
    }

    pub(super) fn resolve(mut self, case_blind: bool) -> ClassUnicode {
        if case_blind {
            self.positive.case_fold_simple();
        }
        if self.negated {
            self.positive.negate();
        }
        self.positive
    }
}

/// Builds a class from code point spans, dropping the surrogate gap which
/// no scalar value occupies.
pub(super) fn from_spans(spans: &[(u32, u32)]) -> ClassUnicode {
    let mut class = ClassUnicode::empty();
    for &(lo, hi) in spans {
        let lo = if (SURROGATE_MIN..=SURROGATE_MAX).contains(&lo) { SURROGATE_MAX + 1 } else { lo };
        let hi = if (SURROGATE_MIN..=SURROGATE_MAX).contains(&hi) { SURROGATE_MIN - 1 } else { hi };
        if lo > hi {
            continue;
        }
        if let (Some(start), Some(end)) = (char::from_u32(lo), char::from_u32(hi)) {
            class.push(ClassUnicodeRange::new(start, end));
        }
    }
    class
}

pub(super) fn single(value: u32) -> ClassUnicode {
    from_spans(&[(value, value)])
}

pub(super) fn all_chars() -> ClassUnicode {
    from_spans(&[(0, 0x10FFFF)])
}

/// `.`: everything but CR and LF, or everything with `dot_all`.
pub(super) fn dot(dot_all: bool) -> ClassUnicode {
    let mut class = from_spans(&[(0x0A, 0x0A), (0x0D, 0x0D)]);
    if dot_all {
        class = all_chars();
    } else {
        class.negate();
    }
    class
}

pub(super) fn is_category_name(name: &str) -> bool {
    CATEGORIES.contains(&name)
}

pub(super) fn category(name: &str) -> Option<ClassUnicode> {
    if !is_category_name(name) {
        return None;
    }
    let hir = regex_syntax::Parser::new()
        .parse(&format!("\\p{{{name}}}"))
        .ok()?;
    // Single-member categories come back as literals.
    match hir.kind() {
        HirKind::Class(Class::Unicode(class)) => Some(class.clone()),
        HirKind::Literal(Literal(bytes)) => {
            let text = std::str::from_utf8(bytes).ok()?;
            Some(ClassUnicode::new(
                text.chars().map(|ch| ClassUnicodeRange::new(ch, ch)),
            ))
        }
        _ => None,
    }
}

/// The class behind `\s \i \c \d \w` and their upper-case complements.
pub(super) fn multi_char_escape(letter: u8) -> Option<ClassPart> {
    let negated = letter.is_ascii_uppercase();
    let positive = match letter.to_ascii_lowercase() {
        b's' => from_spans(SPACE_CHARS),
        b'i' => from_spans(NAME_START_CHARS),
        b'c' => {
            let mut class = from_spans(NAME_START_CHARS);
            class.union(&from_spans(NAME_EXTRA_CHARS));
            class
        }
        b'd' => category("Nd")?,
        b'w' => {
            let mut excluded = category("P")?;
            excluded.union(&category("Z")?);
            excluded.union(&category("C")?);
            let mut class = all_chars();
            class.difference(&excluded);
            class
        }
        _ => return None,
    };
    Some(ClassPart::new(positive, negated))
}

/// The class as a sorted list of scalar value ranges.
///
/// A `char` range may straddle the surrogate block; it comes out as two
/// ranges so that no range holds a surrogate code point.
pub(super) fn to_ranges(class: &ClassUnicode) -> Vec<Range> {
    let mut out = Vec::with_capacity(class.ranges().len() + 1);
    for range in class.ranges() {
        let (start, end) = (u32::from(range.start()), u32::from(range.end()));
        if start < SURROGATE_MIN && end > SURROGATE_MAX {
            out.push(Range::new(start, SURROGATE_MIN - 1));
            out.push(Range::new(SURROGATE_MAX + 1, end));
        } else {
            out.push(Range::new(start, end));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contains(class: &ClassUnicode, ch: char) -> bool {
        class
            .ranges()
            .iter()
            .any(|range| range.start() <= ch && ch <= range.end())
    }

    #[test]
    fn spans_skip_surrogate_gap() {
        let class = from_spans(&[(0xD000, 0xE100)]);
        assert_eq!(
            to_ranges(&class),
            vec![Range::new(0xD000, 0xD7FF), Range::new(0xE000, 0xE100)]
        );
        assert!(to_ranges(&from_spans(&[(0xDC00, 0xDFFF)])).is_empty());
    }

    #[test]
    fn single_member_category_is_a_class() {
        let class = category("Zl").expect("Zl is a category");
        assert_eq!(to_ranges(&class), vec![Range::single(0x2028)]);
    }

    #[test]
    fn unknown_category_is_none() {
        assert!(category("Lx").is_none());
        assert!(category("Cs").is_none());
    }

    #[test]
    fn word_escape_excludes_punctuation_and_separators() {
        let word = multi_char_escape(b'w').expect("\\w").resolve(false);
        assert!(contains(&word, 'a'));
        assert!(contains(&word, '1'));
        assert!(!contains(&word, ','));
        assert!(!contains(&word, ' '));
    }

    #[test]
    fn upper_case_escape_is_complement() {
        let not_space = multi_char_escape(b'S').expect("\\S").resolve(false);
        assert!(!contains(&not_space, '\t'));
        assert!(contains(&not_space, 'x'));
    }

    #[test]
    fn name_chars_extend_name_start_chars() {
        let start = multi_char_escape(b'i').expect("\\i").resolve(false);
        let name = multi_char_escape(b'c').expect("\\c").resolve(false);
        assert!(!contains(&start, '-'));
        assert!(contains(&name, '-'));
        assert!(contains(&name, ':'));
    }

    #[test]
    fn dot_excludes_line_ends_unless_dot_all() {
        assert!(!contains(&dot(false), '\n'));
        assert!(!contains(&dot(false), '\r'));
        assert!(contains(&dot(false), '\u{1F600}'));
        assert!(contains(&dot(true), '\n'));
    }

    #[test]
    fn folding_happens_before_complement() {
        let class = ClassPart::new(single(u32::from('a')), true).resolve(true);
        assert!(!contains(&class, 'a'));
        assert!(!contains(&class, 'A'));
        assert!(contains(&class, 'b'));
    }
}
