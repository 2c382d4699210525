use super::*;

#[test]
fn single_char_escapes() {
    assert_eq!(pattern_of(GrammarVariant::Xsd10, r"\n\t\."), r"\x{A}\x{9}\.");
    assert_eq!(pattern_of(GrammarVariant::Xsd10, r"\{\}\|"), r"\{\}\|");
    assert_eq!(pattern_of(GrammarVariant::XPath20, r"\$"), r"\$");
}

#[test]
fn dollar_escape_is_xpath_only() {
    let diagnostic = syntax_error(translate_as(GrammarVariant::Xsd10, r"a\$"));
    assert_eq!(diagnostic.message(), r"invalid escape sequence (\$)");
    assert_eq!(diagnostic.position(), 2);
}

#[test]
fn unknown_and_dangling_escapes() {
    let diagnostic = syntax_error(translate_as(GrammarVariant::XPath30, r"\q"));
    assert_eq!(diagnostic.message(), r"invalid escape sequence (\q)");
    let diagnostic = syntax_error(translate_as(GrammarVariant::XPath30, "a\\"));
    assert_eq!(diagnostic.message(), "invalid escape sequence");
    assert_eq!(diagnostic.position(), 2);
}

#[test]
fn back_references_need_closed_groups() {
    assert_eq!(pattern_of(GrammarVariant::XPath20, r"(a)\1"), r"(a)(?:\1)");

    let diagnostic = syntax_error(translate_as(GrammarVariant::XPath20, r"\1(a)"));
    assert_eq!(diagnostic.message(), r"invalid backreference (\1: no such group)");

    let diagnostic = syntax_error(translate_as(GrammarVariant::XPath20, r"(a\1)"));
    assert_eq!(
        diagnostic.message(),
        r"invalid backreference (\1: group not yet closed)"
    );

    let diagnostic = syntax_error(translate_as(GrammarVariant::Xsd10, r"(a)\1"));
    assert_eq!(diagnostic.message(), r"invalid escape sequence (\1)");
}

#[test]
fn back_reference_digits_stop_at_group_count() {
    assert_eq!(pattern_of(GrammarVariant::XPath20, r"(a)\10"), r"(a)(?:\1)0");
    let groups = "(a)".repeat(12);
    assert_eq!(
        pattern_of(GrammarVariant::XPath20, &format!(r"{groups}\12")),
        format!(r"{groups}(?:\12)")
    );
}

#[test]
fn non_capturing_groups_are_xpath30_only() -> Result<()> {
    let translation = translate_as(GrammarVariant::XPath30, "(?:ab)+(c)")?;
    assert_eq!(translation.pattern(), "(?:ab)+(c)");
    assert_eq!(translation.capture_count(), 1);

    let diagnostic = syntax_error(translate_as(GrammarVariant::XPath20, "(?:ab)"));
    assert_eq!(diagnostic.message(), "expected ())");
    assert_eq!(diagnostic.position(), 1);

    let diagnostic = syntax_error(translate_as(GrammarVariant::XPath30, "(?ab)"));
    assert_eq!(diagnostic.message(), "expected (:)");
    Ok(())
}

#[test]
fn dot_all_widens_the_dot() -> Result<()> {
    let config = TranslatorConfig::from_flags(GrammarVariant::XPath20, "s")?;
    assert_eq!(
        translate(".", &config)?.pattern(),
        r"[\x{0}-\x{D7FF}\x{E000}-\x{10FFFF}]"
    );
    Ok(())
}

#[test]
fn rust_metacharacters_are_escaped_in_literals() {
    assert_eq!(pattern_of(GrammarVariant::Xsd10, "a#b&c~d"), r"a\#b\&c\~d");
    assert_eq!(pattern_of(GrammarVariant::Xsd10, "caf\u{e9}"), "caf\u{e9}");
}

#[test]
fn case_blind_back_reference_ignores_case() -> Result<()> {
    let config = TranslatorConfig::from_flags(GrammarVariant::XPath20, "i")?;
    let translation = translate(r"(a)\1", &config)?;
    assert_eq!(translation.pattern(), r"([Aa])(?i:\1)");

    let again = translate_with(translation.pattern(), &config, &PassThroughAtomTranslator)?;
    assert_eq!(again.pattern(), translation.pattern());
    Ok(())
}
