use super::*;

#[test]
fn bounds_in_range_pass_through() {
    assert_eq!(pattern_of(GrammarVariant::Xsd10, "a{3}"), "a{3}");
    assert_eq!(pattern_of(GrammarVariant::Xsd10, "a{0,7}"), "a{0,7}");
    assert_eq!(pattern_of(GrammarVariant::Xsd10, "a{007,8}"), "a{007,8}");
    assert_eq!(pattern_of(GrammarVariant::Xsd10, "a{4,4}"), "a{4,4}");
}

#[test]
fn inverted_range_fails_at_closing_brace() {
    let diagnostic = syntax_error(translate_as(GrammarVariant::Xsd10, "a{3,2}"));
    assert_eq!(diagnostic.message(), "invalid range in quantifier");
    assert_eq!(diagnostic.position(), 5);
}

#[test]
fn overflowing_bounds_are_clamped() {
    assert_eq!(
        pattern_of(GrammarVariant::Xsd10, "a{99999999999}"),
        "a{2147483647}"
    );
    assert_eq!(
        pattern_of(GrammarVariant::Xsd10, "a{2,99999999999}"),
        "a{2,2147483647}"
    );
    assert_eq!(
        pattern_of(GrammarVariant::Xsd10, "a{99999999999,}"),
        "a{2147483647,}"
    );
    assert_eq!(
        pattern_of(GrammarVariant::Xsd10, "a{2147483647,2147483648}"),
        "a{2147483647,2147483647}"
    );
}

#[test]
fn overflowing_lower_with_native_upper_fails() {
    let diagnostic = syntax_error(translate_as(GrammarVariant::Xsd10, "a{99999999999,5}"));
    assert_eq!(diagnostic.message(), "invalid range in quantifier");
}

#[test]
fn both_overflowing_compare_as_big_integers() {
    assert_eq!(
        pattern_of(GrammarVariant::Xsd10, "a{99999999998,99999999999}"),
        "a{2147483647,2147483647}"
    );
    let diagnostic = syntax_error(translate_as(
        GrammarVariant::Xsd10,
        "a{99999999999,99999999998}",
    ));
    assert_eq!(diagnostic.message(), "invalid range in quantifier");
}

#[test]
fn missing_digits_are_reported() {
    for (expression, position) in [("a{,3}", 2), ("a{}", 2), ("a{2", 3), ("a{2,", 4), ("a{1x}", 3)] {
        let diagnostic = syntax_error(translate_as(GrammarVariant::Xsd10, expression));
        assert_eq!(diagnostic.message(), "expected digit in quantifier", "{expression}");
        assert_eq!(diagnostic.position(), position, "{expression}");
    }
}

#[test]
fn lazy_suffix_only_for_xpath() {
    assert_eq!(pattern_of(GrammarVariant::XPath20, "a*?b{1,2}?"), "a*?b{1,2}?");
    let diagnostic = syntax_error(translate_as(GrammarVariant::Xsd11, "a*?"));
    assert_eq!(diagnostic.message(), "expected end of string");
    assert_eq!(diagnostic.position(), 2);
}

#[test]
fn quantifier_without_atom_ends_the_branch() {
    let diagnostic = syntax_error(translate_as(GrammarVariant::Xsd10, "*a"));
    assert_eq!(diagnostic.message(), "expected end of string");
    assert_eq!(diagnostic.position(), 0);
}
