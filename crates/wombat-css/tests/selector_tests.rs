//! Integration tests for selector parsing.

use wombat_common::warning::has_warned;
use wombat_css::selector::{
    AnPlusB, AttributeCase, AttributeMatch, ComplexSelector, MatchKind, NestingContext,
    PseudoArguments, PseudoType, QualifiedName, Relation, SelectorFlags, SimpleSelector,
    consume_selector, parse_complex_selector, parse_selector_list,
};
use wombat_css::token_stream::TokenStream;
use wombat_css::tokenizer::TokenType;
use wombat_css::{ErrorKind, SelectorError};

fn parse(input: &str) -> ComplexSelector {
    parse_complex_selector(input).unwrap()
}

fn only(input: &str) -> SimpleSelector {
    let selector = parse(input);
    assert_eq!(selector.len(), 1, "{input} should be a single simple selector");
    selector.selectors[0].clone()
}

fn pseudo_list(input: &str) -> Vec<ComplexSelector> {
    let simple = only(input);
    simple.pseudo_data().unwrap().selector_list().unwrap().to_vec()
}

fn nth(input: &str) -> AnPlusB {
    only(input).pseudo_data().unwrap().nth().unwrap().clone()
}

// --- Simple selectors ---

#[test]
fn test_type_selector() {
    let simple = only("div");
    assert_eq!(simple.match_kind, MatchKind::Tag);
    assert_eq!(simple.tag_name(), Some(&QualifiedName::new("div")));
    assert_eq!(simple.relation, Relation::None);
}

#[test]
fn test_id_selector() {
    let simple = only("#main-content");
    assert_eq!(simple.match_kind, MatchKind::Id);
    assert_eq!(simple.value(), Some("main-content"));
}

#[test]
fn test_id_must_be_identifier() {
    let err = parse_complex_selector("#123").unwrap_err();
    assert!(matches!(err, SelectorError::InvalidId { ref value, .. } if value == "123"));
    assert_eq!(err.kind(), ErrorKind::GrammarViolation);
}

#[test]
fn test_class_selector() {
    let simple = only(".highlight");
    assert_eq!(simple.match_kind, MatchKind::Class);
    assert_eq!(simple.value(), Some("highlight"));
}

#[test]
fn test_class_requires_name() {
    assert!(matches!(
        parse_complex_selector(". foo"),
        Err(SelectorError::Expected { .. })
    ));
    assert!(matches!(
        parse_complex_selector(".5"),
        Err(SelectorError::NoCompoundSelector { .. })
    ));
}

#[test]
fn test_compound_keeps_source_order() {
    let selector = parse("a#x.y[z]:hover");
    let kinds: Vec<MatchKind> = selector.selectors.iter().map(|s| s.match_kind).collect();
    assert_eq!(
        kinds,
        vec![
            MatchKind::Tag,
            MatchKind::Id,
            MatchKind::Class,
            MatchKind::Attribute(AttributeMatch::Set),
            MatchKind::PseudoClass,
        ]
    );
    assert!(selector.selectors.iter().all(|s| s.relation == Relation::None));
    assert_eq!(selector.flags, SelectorFlags::CONTAINS_PSEUDO);
}

// --- Universal selector and namespaces ---

#[test]
fn test_universal_alone() {
    let simple = only("*");
    assert_eq!(simple.match_kind, MatchKind::UniversalTag);
    assert_eq!(simple.tag_name(), Some(&QualifiedName::new("*")));
}

#[test]
fn test_universal_is_elided_in_compound() {
    assert_eq!(parse("*.foo"), parse(".foo"));
    assert_eq!(parse("*|*:hover"), parse(":hover"));
}

#[test]
fn test_universal_with_namespace_is_kept() {
    let selector = parse("svg|*.icon");
    assert_eq!(selector.len(), 2);
    assert_eq!(selector.selectors[0].match_kind, MatchKind::UniversalTag);
    assert_eq!(
        selector.selectors[0].tag_name(),
        Some(&QualifiedName::with_namespace("svg", "*"))
    );
}

#[test]
fn test_namespaced_type_selectors() {
    assert_eq!(
        only("svg|rect").tag_name(),
        Some(&QualifiedName::with_namespace("svg", "rect"))
    );
    assert_eq!(
        only("|rect").tag_name(),
        Some(&QualifiedName::with_namespace("", "rect"))
    );
    assert_eq!(
        only("*|rect").tag_name(),
        Some(&QualifiedName::with_namespace("*", "rect"))
    );
}

#[test]
fn test_namespace_bar_backtracks() {
    // `a|` followed by something that is not a name gives the `|` back.
    let err = parse_complex_selector("a|.b").unwrap_err();
    assert!(matches!(err, SelectorError::TrailingInput { ref found, .. } if found == "'|'"));
}

#[test]
fn test_empty_compound_fails() {
    let err = parse_complex_selector("").unwrap_err();
    assert!(matches!(err, SelectorError::NoCompoundSelector { .. }));
    assert!(matches!(
        parse_selector_list(", a"),
        Err(SelectorError::NoCompoundSelector { .. })
    ));
}

// --- Attribute selectors ---

#[test]
fn test_attribute_presence() {
    let simple = only("[href]");
    assert_eq!(simple.match_kind, MatchKind::Attribute(AttributeMatch::Set));
    let matcher = simple.attribute_matcher().unwrap();
    assert_eq!(matcher.name, "href");
    assert_eq!(matcher.value, "");
    assert_eq!(matcher.namespace, None);
}

#[test]
fn test_attribute_operators() {
    let cases = [
        ("[a=v]", AttributeMatch::Exact),
        ("[a~=v]", AttributeMatch::List),
        ("[a|=v]", AttributeMatch::Hyphen),
        ("[a^=v]", AttributeMatch::Begin),
        ("[a$=v]", AttributeMatch::End),
        ("[a*=v]", AttributeMatch::Contain),
    ];
    for (input, expected) in cases {
        let simple = only(input);
        assert_eq!(simple.match_kind, MatchKind::Attribute(expected), "{input}");
        assert_eq!(simple.attribute_matcher().unwrap().value, "v", "{input}");
    }
}

#[test]
fn test_attribute_empty_string_value_is_kept() {
    // `[a=""]` is valid CSS and stays an equality test, not a presence test.
    let simple = only("[a=\"\"]");
    assert_eq!(simple.match_kind, MatchKind::Attribute(AttributeMatch::Exact));
    assert_eq!(simple.attribute_matcher().unwrap().value, "");
    assert_eq!(simple.to_string(), "[a=\"\"]");

    let simple = only("[a^='' i]");
    assert_eq!(simple.match_kind, MatchKind::Attribute(AttributeMatch::Begin));
    assert_eq!(simple.attribute_matcher().unwrap().value, "");
    assert_eq!(simple.attribute_matcher().unwrap().case, AttributeCase::Insensitive);

    assert_ne!(only("[a=\"\"]"), only("[a]"));
}

#[test]
fn test_attribute_string_value_and_whitespace() {
    let simple = only("[ type = \"text\" ]");
    let matcher = simple.attribute_matcher().unwrap();
    assert_eq!(matcher.name, "type");
    assert_eq!(matcher.value, "text");
    assert_eq!(matcher.case, AttributeCase::Sensitive);
}

#[test]
fn test_attribute_case_flags() {
    let case = |input: &str| only(input).attribute_matcher().unwrap().case;
    assert_eq!(case("[a=b i]"), AttributeCase::Insensitive);
    assert_eq!(case("[a=b I]"), AttributeCase::Insensitive);
    assert_eq!(case("[a=b s]"), AttributeCase::AlwaysSensitive);
    assert_eq!(case("[a=b S]"), AttributeCase::AlwaysSensitive);
    assert_eq!(case("[a=b x]"), AttributeCase::Sensitive);
    assert_eq!(case("[a=\"b\"]"), AttributeCase::Sensitive);
}

#[test]
fn test_attribute_namespace() {
    let simple = only("[xlink|href]");
    let matcher = simple.attribute_matcher().unwrap();
    assert_eq!(matcher.namespace.as_deref(), Some("xlink"));
    assert_eq!(matcher.name, "href");

    let simple = only("[ns|lang|=en]");
    assert_eq!(simple.match_kind, MatchKind::Attribute(AttributeMatch::Hyphen));
    assert_eq!(simple.attribute_matcher().unwrap().namespace.as_deref(), Some("ns"));
}

#[test]
fn test_attribute_errors() {
    assert!(matches!(
        parse_complex_selector("[a=]"),
        Err(SelectorError::Expected { expected: "an attribute value", .. })
    ));
    assert!(matches!(
        parse_complex_selector("[a b]"),
        Err(SelectorError::Expected { expected: "an attribute match operator", .. })
    ));
    assert!(matches!(
        parse_complex_selector("[a=b i j]"),
        Err(SelectorError::TrailingInput { .. })
    ));
    assert!(matches!(
        parse_complex_selector("[*]"),
        Err(SelectorError::Expected { expected: "an attribute name", .. })
    ));
    assert_eq!(
        parse_complex_selector("[a=b c d]").unwrap_err().kind(),
        ErrorKind::TrailingInput
    );
}

#[test]
fn test_attribute_error_recovers_past_block() {
    let mut stream = TokenStream::new("[ 1invalid ] rest");
    let result = consume_selector(&mut stream, NestingContext::None, None);
    assert!(result.is_err());
    // The list skips to the next comma or `{`; here that is end of input.
    assert!(stream.peek().is_eof());
}

// --- Combinators ---

#[test]
fn test_child_combinator() {
    let selector = parse("p > span");
    assert_eq!(selector.len(), 2);
    assert_eq!(selector.selectors[0].tag_name(), Some(&QualifiedName::new("p")));
    assert_eq!(selector.selectors[0].relation, Relation::None);
    assert_eq!(selector.selectors[1].tag_name(), Some(&QualifiedName::new("span")));
    assert_eq!(selector.selectors[1].relation, Relation::Child);
    assert!(selector.flags.contains(SelectorFlags::CONTAINS_COMPLEX_SELECTOR));
}

#[test]
fn test_all_combinators() {
    let selector = parse("a b>c+d ~ e");
    let relations: Vec<Relation> = selector.selectors.iter().map(|s| s.relation).collect();
    assert_eq!(
        relations,
        vec![
            Relation::None,
            Relation::Descendant,
            Relation::Child,
            Relation::DirectAdjacent,
            Relation::IndirectAdjacent,
        ]
    );
    assert_eq!(selector.compounds().len(), 5);
}

#[test]
fn test_relation_only_on_first_of_compound() {
    let selector = parse("ul li.item:first-child");
    let compounds = selector.compounds();
    assert_eq!(compounds.len(), 2);
    assert_eq!(compounds[1].len(), 3);
    assert_eq!(compounds[1][0].relation, Relation::Descendant);
    assert_eq!(compounds[1][1].relation, Relation::None);
    assert_eq!(compounds[1][2].relation, Relation::None);
}

#[test]
fn test_dangling_combinator_fails() {
    assert!(matches!(
        parse_complex_selector("a >"),
        Err(SelectorError::Expected { .. })
    ));
    assert!(matches!(
        parse_selector_list("a +, b"),
        Err(SelectorError::Expected { .. })
    ));
}

#[test]
fn test_leading_combinator_fails_at_top_level() {
    assert!(matches!(
        parse_complex_selector("> a"),
        Err(SelectorError::NoCompoundSelector { .. })
    ));
}

// --- Selector lists ---

#[test]
fn test_selector_list() {
    let list = parse_selector_list("div, .class").unwrap();
    assert_eq!(list.len(), 2);
    assert!(list.iter().all(|selector| selector.flags.is_empty()));
    assert_eq!(list[0].selectors[0].match_kind, MatchKind::Tag);
    assert_eq!(list[1].selectors[0].match_kind, MatchKind::Class);
}

#[test]
fn test_list_stops_at_left_brace() {
    let mut stream = TokenStream::new("div, .class { color: red }");
    let list = consume_selector(&mut stream, NestingContext::None, None).unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(stream.peek_type(), TokenType::LeftBrace);
}

#[test]
fn test_whole_string_rejects_brace() {
    assert!(matches!(
        parse_selector_list("div {"),
        Err(SelectorError::TrailingInput { .. })
    ));
}

#[test]
fn test_invalid_member_fails_whole_list() {
    let mut stream = TokenStream::new("a, #1, b { }");
    let result = consume_selector(&mut stream, NestingContext::None, None);
    assert!(matches!(result, Err(SelectorError::InvalidId { .. })));
    // Recovery point: the comma after the bad member.
    assert_eq!(stream.peek_type(), TokenType::Comma);
}

#[test]
fn test_trailing_garbage_in_list() {
    let mut stream = TokenStream::new("a %, b");
    let err = consume_selector(&mut stream, NestingContext::None, None).unwrap_err();
    assert!(matches!(err, SelectorError::NoCompoundSelector { .. }));
    assert_eq!(stream.peek_type(), TokenType::Comma);

    let mut stream = TokenStream::new("a% {");
    let err = consume_selector(&mut stream, NestingContext::None, None).unwrap_err();
    assert!(matches!(err, SelectorError::TrailingInput { ref found, .. } if found == "'%'"));
    assert_eq!(stream.peek_type(), TokenType::LeftBrace);
}

#[test]
fn test_error_span_points_at_token() {
    let err = parse_complex_selector("div.foo:bogus").unwrap_err();
    assert!(matches!(err, SelectorError::UnknownPseudo { ref name, .. } if name == "bogus"));
    assert_eq!(err.span().start, 8);
    assert_eq!(err.span().end, 13);
}

// --- Pseudo-classes and pseudo-elements ---

#[test]
fn test_pseudo_class() {
    let simple = only(":hover");
    assert_eq!(simple.match_kind, MatchKind::PseudoClass);
    assert_eq!(simple.pseudo_type(), Some(PseudoType::Hover));
    assert_eq!(simple.pseudo_data().unwrap().name, "hover");
    assert_eq!(simple.pseudo_data().unwrap().arguments, PseudoArguments::None);
}

#[test]
fn test_pseudo_names_are_case_insensitive() {
    let simple = only(":HOVER");
    assert_eq!(simple.pseudo_type(), Some(PseudoType::Hover));
    assert_eq!(simple.pseudo_data().unwrap().name, "HOVER");
    assert_eq!(only(":Nth-Child(2)").pseudo_type(), Some(PseudoType::NthChild));
}

#[test]
fn test_pseudo_element() {
    let simple = only("::first-line");
    assert_eq!(simple.match_kind, MatchKind::PseudoElement);
    assert_eq!(simple.pseudo_type(), Some(PseudoType::FirstLine));
}

#[test]
fn test_legacy_pseudo_elements_accept_one_colon() {
    for name in ["before", "after", "first-line", "first-letter"] {
        let simple = only(&format!(":{name}"));
        assert_eq!(simple.match_kind, MatchKind::PseudoElement, "{name}");
    }
}

#[test]
fn test_colon_count_is_checked() {
    assert!(matches!(
        parse_complex_selector("::hover"),
        Err(SelectorError::WrongColonCount { colons: 2, .. })
    ));
    assert!(matches!(
        parse_complex_selector(":marker"),
        Err(SelectorError::WrongColonCount { colons: 1, .. })
    ));
}

#[test]
fn test_unknown_pseudo() {
    assert!(matches!(
        parse_complex_selector(":no-such-thing"),
        Err(SelectorError::UnknownPseudo { .. })
    ));
    // `hover` exists, but not as a function.
    assert!(matches!(
        parse_complex_selector(":hover(x)"),
        Err(SelectorError::UnknownPseudo { .. })
    ));
    // `is` exists, but only as a function.
    assert!(matches!(
        parse_complex_selector(":is"),
        Err(SelectorError::UnknownPseudo { .. })
    ));
}

#[test]
fn test_pseudo_requires_name() {
    assert!(matches!(
        parse_complex_selector(": hover"),
        Err(SelectorError::Expected { .. })
    ));
}

#[test]
fn test_vendor_pseudo() {
    let simple = only("::-webkit-scrollbar");
    assert_eq!(simple.match_kind, MatchKind::PseudoElement);
    assert_eq!(simple.pseudo_type(), Some(PseudoType::WebkitCustom));
    assert_eq!(simple.pseudo_data().unwrap().name, "-webkit-scrollbar");

    let simple = only(":-internal-list-box");
    assert_eq!(simple.match_kind, MatchKind::PseudoClass);
    assert_eq!(simple.pseudo_type(), Some(PseudoType::InternalCustom));

    assert!(matches!(
        parse_complex_selector(":-webkit-any(a)"),
        Err(SelectorError::UnknownPseudo { .. })
    ));
}

#[test]
fn test_vendor_pseudo_warns() {
    let _ = only(":-webkit-autofill-strong");
    assert!(has_warned(
        "Selectors",
        "treating '-webkit-autofill-strong' as an opaque vendor pseudo-selector"
    ));
}

#[test]
fn test_pseudo_sets_flag() {
    assert!(parse("a:hover").flags.contains(SelectorFlags::CONTAINS_PSEUDO));
    assert!(parse("a::before").flags.contains(SelectorFlags::CONTAINS_PSEUDO));
    assert!(!parse("a.b").flags.contains(SelectorFlags::CONTAINS_PSEUDO));
}

#[test]
fn test_scope_sets_flag() {
    let selector = parse(":scope > a");
    assert!(selector.flags.contains(SelectorFlags::CONTAINS_SCOPE_OR_PARENT));
    assert!(selector.flags.contains(SelectorFlags::CONTAINS_COMPLEX_SELECTOR));
}

// --- Selector-list pseudos ---

#[test]
fn test_is_not_where() {
    for (input, expected) in [
        (":is(.a, .b)", PseudoType::Is),
        (":not(.a, .b)", PseudoType::Not),
        (":where(.a, .b)", PseudoType::Where),
    ] {
        let simple = only(input);
        assert_eq!(simple.pseudo_type(), Some(expected));
        let list = simple.pseudo_data().unwrap().selector_list().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].selectors[0].value(), Some("a"));
        assert_eq!(list[1].selectors[0].value(), Some("b"));
    }
}

#[test]
fn test_nested_lists_with_whitespace() {
    let list = pseudo_list(":is( ul li , ol > li )");
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].len(), 2);
    assert_eq!(list[1].selectors[1].relation, Relation::Child);
}

#[test]
fn test_nested_flags_do_not_leak() {
    let selector = parse(":is(a b, :hover)");
    assert!(selector.flags.contains(SelectorFlags::CONTAINS_PSEUDO));
    assert!(!selector.flags.contains(SelectorFlags::CONTAINS_COMPLEX_SELECTOR));
    let inner = selector.selectors[0].pseudo_data().unwrap().selector_list().unwrap();
    assert!(inner[0].flags.contains(SelectorFlags::CONTAINS_COMPLEX_SELECTOR));

    let selector = parse(":is(:scope .a)");
    assert!(selector.flags.contains(SelectorFlags::CONTAINS_SCOPE_OR_PARENT));
}

#[test]
fn test_selector_list_pseudo_errors() {
    assert!(matches!(
        parse_complex_selector(":is()"),
        Err(SelectorError::NoCompoundSelector { .. })
    ));
    assert!(matches!(
        parse_complex_selector(":not(.a, #1)"),
        Err(SelectorError::InvalidId { .. })
    ));
    assert!(matches!(
        parse_complex_selector(":is(.a .b >)"),
        Err(SelectorError::Expected { .. })
    ));
}

#[test]
fn test_error_inside_pseudo_recovers_at_outer_list() {
    let mut stream = TokenStream::new(":is(.a, 5) .b, c {");
    let err = consume_selector(&mut stream, NestingContext::None, None).unwrap_err();
    assert!(matches!(err, SelectorError::NoCompoundSelector { .. }));
    assert_eq!(stream.peek_type(), TokenType::Comma);
}

#[test]
fn test_host_and_slotted_take_one_selector() {
    assert_eq!(pseudo_list(":host(.dark)").len(), 1);
    assert_eq!(pseudo_list(":host-context(body.x)").len(), 1);
    let slotted = only("::slotted(span)");
    assert_eq!(slotted.match_kind, MatchKind::PseudoElement);

    assert!(matches!(
        parse_complex_selector(":host(.a, .b)"),
        Err(SelectorError::WrongSelectorCount { count: 2, .. })
    ));
    assert!(matches!(
        parse_complex_selector("::slotted(a, b, c)"),
        Err(SelectorError::WrongSelectorCount { count: 3, .. })
    ));
}

#[test]
fn test_host_bare_and_functional() {
    let bare = only(":host");
    assert_eq!(bare.pseudo_type(), Some(PseudoType::Host));
    assert_eq!(bare.pseudo_data().unwrap().arguments, PseudoArguments::None);

    let cue = only("::cue");
    assert_eq!(cue.pseudo_type(), Some(PseudoType::Cue));
    assert_eq!(pseudo_list("::cue(b)").len(), 1);
}

// --- :has() ---

#[test]
fn test_has_relative_relations() {
    let cases = [
        (":has(.child)", Relation::RelativeDescendant),
        (":has(> .child)", Relation::RelativeChild),
        (":has(+ .child)", Relation::RelativeDirectAdjacent),
        (":has(~ .child)", Relation::RelativeIndirectAdjacent),
    ];
    let mut anchors = Vec::new();
    for (input, relation) in cases {
        let list = pseudo_list(input);
        assert_eq!(list.len(), 1, "{input}");
        let selector = &list[0];
        assert_eq!(selector.len(), 2, "{input}");
        assert!(selector.selectors[0].is_relative_anchor(), "{input}");
        assert_eq!(selector.selectors[0].relation, Relation::None, "{input}");
        assert_eq!(selector.selectors[1].relation, relation, "{input}");
        assert_eq!(selector.selectors[1].value(), Some("child"), "{input}");
        assert!(selector.is_relative());
        anchors.push(selector.selectors[0].clone());
    }
    assert!(anchors.windows(2).all(|pair| pair[0] == pair[1]));
    assert_eq!(anchors[0], SimpleSelector::relative_anchor());
}

#[test]
fn test_has_forces_complex_flag() {
    let selector = parse("a:has(.b)");
    assert!(selector.flags.contains(SelectorFlags::CONTAINS_COMPLEX_SELECTOR));
    assert!(selector.flags.contains(SelectorFlags::CONTAINS_PSEUDO));
}

#[test]
fn test_has_with_complex_arguments() {
    let list = pseudo_list(":has(> img + p, .x .y)");
    assert_eq!(list.len(), 2);
    let relations: Vec<Relation> = list[0].selectors.iter().map(|s| s.relation).collect();
    assert_eq!(
        relations,
        vec![
            Relation::None,
            Relation::RelativeChild,
            Relation::DirectAdjacent,
        ]
    );
    assert_eq!(list[1].selectors[1].relation, Relation::RelativeDescendant);
    assert_eq!(list[1].selectors[2].relation, Relation::Descendant);
}

#[test]
fn test_has_errors() {
    assert!(matches!(
        parse_complex_selector(":has()"),
        Err(SelectorError::NoCompoundSelector { .. })
    ));
    assert!(matches!(
        parse_complex_selector(":has(>)"),
        Err(SelectorError::NoCompoundSelector { .. })
    ));
}

// --- :nth-*() ---

#[test]
fn test_nth_keywords() {
    assert_eq!(nth(":nth-child(odd)"), AnPlusB::new(2, 1));
    assert_eq!(nth(":nth-child(even)"), AnPlusB::new(2, 0));
    assert_eq!(nth(":nth-child(EVEN)"), AnPlusB::new(2, 0));
    assert_eq!(nth(":nth-child(n)"), AnPlusB::new(1, 0));
    assert_eq!(nth(":nth-child(3)"), AnPlusB::new(0, 3));
}

#[test]
fn test_nth_forms() {
    let cases = [
        ("2n+1", (2, 1)),
        ("2n + 1", (2, 1)),
        ("2n+ 1", (2, 1)),
        ("2n -1", (2, -1)),
        ("2n-1", (2, -1)),
        ("2n- 1", (2, -1)),
        ("2n - 1", (2, -1)),
        ("-n+3", (-1, 3)),
        ("-n-3", (-1, -3)),
        ("+n", (1, 0)),
        ("+n+2", (1, 2)),
        ("N", (1, 0)),
        ("-2n", (-2, 0)),
        ("+5", (0, 5)),
        ("-5", (0, -5)),
        ("0n+0", (0, 0)),
        (" 3n ", (3, 0)),
        ("10N-7", (10, -7)),
    ];
    for (expression, (a, b)) in cases {
        let input = format!(":nth-of-type({expression})");
        assert_eq!(nth(&input), AnPlusB::new(a, b), "{expression}");
    }
}

#[test]
fn test_nth_malformed() {
    for expression in [
        "", "n+", "2n+-1", "+ n", "2.5n", "1.5", "x", "n-a", "(2n)", "2n 1", "odd 1", "3 4",
        "99999999999",
    ] {
        let input = format!(":nth-child({expression})");
        assert!(
            parse_complex_selector(&input).is_err(),
            "{expression} should not parse"
        );
    }
    assert!(matches!(
        parse_complex_selector(":nth-child((2n))"),
        Err(SelectorError::MalformedAnPlusB { .. })
    ));
}

#[test]
fn test_nth_child_of_selector() {
    let nth = nth(":nth-child(2n+1 of .item)");
    assert_eq!((nth.a, nth.b), (2, 1));
    let of = nth.of.unwrap();
    assert_eq!(of.len(), 1);
    assert_eq!(of[0].len(), 1);
    assert_eq!(of[0].selectors[0].match_kind, MatchKind::Class);
    assert_eq!(of[0].selectors[0].value(), Some("item"));
}

#[test]
fn test_nth_last_child_of_list() {
    let nth = nth(":nth-last-child(odd of li.a, li.b)");
    assert_eq!(nth.of.unwrap().len(), 2);
}

#[test]
fn test_of_not_allowed_for_type_forms() {
    assert!(matches!(
        parse_complex_selector(":nth-of-type(2n of .item)"),
        Err(SelectorError::OfNotAllowed { .. })
    ));
    assert!(matches!(
        parse_complex_selector(":nth-last-of-type(1 of p)"),
        Err(SelectorError::OfNotAllowed { .. })
    ));
}

#[test]
fn test_matches_index() {
    let odd = AnPlusB::new(2, 1);
    assert!(odd.matches_index(1));
    assert!(!odd.matches_index(2));
    assert!(odd.matches_index(7));

    let first_three = AnPlusB::new(-1, 3);
    assert!(first_three.matches_index(1));
    assert!(first_three.matches_index(3));
    assert!(!first_three.matches_index(4));

    let third = AnPlusB::new(0, 3);
    assert!(third.matches_index(3));
    assert!(!third.matches_index(6));
}

// --- Argument pseudos ---

#[test]
fn test_lang_argument_list() {
    let simple = only(":lang(en, \"fr-*\")");
    let data = simple.pseudo_data().unwrap();
    assert_eq!(
        data.arguments,
        PseudoArguments::ArgumentList(vec!["en".to_owned(), "fr-*".to_owned()])
    );
    assert_eq!(data.argument(), Some("en"));
}

#[test]
fn test_dir_single_argument() {
    let simple = only(":dir(rtl)");
    assert_eq!(simple.pseudo_data().unwrap().argument(), Some("rtl"));
    assert!(matches!(
        parse_complex_selector(":dir(ltr, rtl)"),
        Err(SelectorError::TrailingInput { .. })
    ));
    assert!(matches!(
        parse_complex_selector(":dir()"),
        Err(SelectorError::Expected { .. })
    ));
}

#[test]
fn test_state_and_highlight() {
    assert_eq!(only(":state(checked)").pseudo_data().unwrap().argument(), Some("checked"));
    let highlight = only("::highlight(search)");
    assert_eq!(highlight.match_kind, MatchKind::PseudoElement);
    assert_eq!(highlight.pseudo_data().unwrap().argument(), Some("search"));
}

#[test]
fn test_part_identifiers() {
    let simple = only("::part(label  icon)");
    assert_eq!(
        simple.pseudo_data().unwrap().arguments,
        PseudoArguments::Identifiers(vec!["label".to_owned(), "icon".to_owned()])
    );
    assert!(matches!(
        parse_complex_selector("::part()"),
        Err(SelectorError::Expected { .. })
    ));
    assert!(matches!(
        parse_complex_selector("::part(a, b)"),
        Err(SelectorError::Expected { .. })
    ));
}

#[test]
fn test_active_view_transition_type() {
    let simple = only(":active-view-transition-type(slide forward)");
    assert_eq!(
        simple.pseudo_data().unwrap().arguments,
        PseudoArguments::Identifiers(vec!["slide".to_owned(), "forward".to_owned()])
    );
}

#[test]
fn test_pseudo_block_recovery() {
    let mut stream = TokenStream::new(":lang(en fr) .b, c");
    let err = consume_selector(&mut stream, NestingContext::None, None).unwrap_err();
    assert!(matches!(err, SelectorError::TrailingInput { .. }));
    assert_eq!(stream.peek_type(), TokenType::Comma);
}

// --- Nesting ---

#[test]
fn test_nesting_selector_not_implemented() {
    let err = parse_complex_selector("& .child").unwrap_err();
    assert!(matches!(err, SelectorError::NotImplemented { .. }));
    assert_eq!(err.kind(), ErrorKind::Unimplemented);
}

#[test]
fn test_nesting_selector_with_parent_rule() {
    let parent = parse_selector_list(".card, #main").unwrap();
    let mut stream = TokenStream::new("&:hover {");
    let err = consume_selector(&mut stream, NestingContext::Nested, Some(&parent)).unwrap_err();
    assert!(matches!(err, SelectorError::NotImplemented { .. }));
    assert_eq!(stream.peek_type(), TokenType::LeftBrace);
    assert!(has_warned(
        "Selectors",
        "the nesting selector '&' (parent rule '.card, #main') is not supported"
    ));
}

#[test]
fn test_relative_selector_in_nested_rule() {
    let mut stream = TokenStream::new("> .foo {");
    let err = consume_selector(&mut stream, NestingContext::Nested, None).unwrap_err();
    assert!(matches!(err, SelectorError::NotImplemented { .. }));
    assert_eq!(stream.peek_type(), TokenType::LeftBrace);
    assert!(has_warned(
        "Selectors",
        "relative selectors in nested style rules are not supported"
    ));
}

#[test]
fn test_nested_context_parses_plain_selectors() {
    let mut stream = TokenStream::new(".foo > .bar {");
    let list = consume_selector(&mut stream, NestingContext::Nested, None).unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].len(), 2);
}

#[test]
fn test_complex_selector_rejects_list() {
    assert!(matches!(
        parse_complex_selector("a, b"),
        Err(SelectorError::TrailingInput { .. })
    ));
}

#[test]
fn test_with_relation_sets_only_the_relation() {
    let simple = SimpleSelector::class("note").with_relation(Relation::IndirectAdjacent);
    assert_eq!(simple.relation, Relation::IndirectAdjacent);
    assert_eq!(simple.match_kind, MatchKind::Class);
    assert_eq!(simple.value(), Some("note"));
    assert_eq!(parse("p ~ .note").selectors[1], simple);
}
