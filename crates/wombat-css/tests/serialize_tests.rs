//! Tests for selector serialization.

use wombat_css::selector::{AnPlusB, QualifiedName, SimpleSelector};
use wombat_css::serialize::{serialize_identifier, serialize_selector_list, serialize_string};
use wombat_css::{parse_complex_selector, parse_selector_list};

fn canonical(input: &str) -> String {
    parse_complex_selector(input).unwrap().to_string()
}

#[test]
fn test_identifier_escaping() {
    assert_eq!(serialize_identifier("foo-bar_9"), "foo-bar_9");
    assert_eq!(serialize_identifier("1a"), "\\31 a");
    assert_eq!(serialize_identifier("-1"), "-\\31 ");
    assert_eq!(serialize_identifier("-"), "\\-");
    assert_eq!(serialize_identifier("--x"), "--x");
    assert_eq!(serialize_identifier("a b"), "a\\ b");
    assert_eq!(serialize_identifier("a.b"), "a\\.b");
    assert_eq!(serialize_identifier("\u{0}"), "\u{FFFD}");
    assert_eq!(serialize_identifier("\u{7f}"), "\\7f ");
    assert_eq!(serialize_identifier("caf\u{e9}"), "caf\u{e9}");
}

#[test]
fn test_string_escaping() {
    assert_eq!(serialize_string("text"), "\"text\"");
    assert_eq!(serialize_string("say \"hi\""), "\"say \\\"hi\\\"\"");
    assert_eq!(serialize_string("a\\b"), "\"a\\\\b\"");
    assert_eq!(serialize_string("line\nbreak"), "\"line\\a break\"");
    assert_eq!(serialize_string(""), "\"\"");
}

#[test]
fn test_canonical_forms() {
    let cases = [
        ("div", "div"),
        ("*", "*"),
        ("*.foo", ".foo"),
        ("svg|*.icon", "svg|*.icon"),
        ("*|a", "*|a"),
        ("|a", "|a"),
        ("a   b", "a b"),
        ("a>b", "a > b"),
        ("a+b~c", "a + b ~ c"),
        ("a#x.y", "a#x.y"),
        ("[href]", "[href]"),
        ("[ type = text ]", "[type=\"text\"]"),
        ("[lang|=en I]", "[lang|=\"en\" i]"),
        ("[a$='b' s]", "[a$=\"b\" s]"),
        ("[xlink|href^=x]", "[xlink|href^=\"x\"]"),
        (":HOVER", ":HOVER"),
        (":before", "::before"),
        ("::-webkit-scrollbar", "::-webkit-scrollbar"),
        (":is(.a,.b)", ":is(.a, .b)"),
        (":not( a  b )", ":not(a b)"),
        (":has(.a)", ":has(.a)"),
        (":has(>.a + .b)", ":has(> .a + .b)"),
        (":has(~ .a, + .b)", ":has(~ .a, + .b)"),
        (":lang(en, \"fr-*\")", ":lang(en, \"fr-*\")"),
        (":dir(rtl)", ":dir(rtl)"),
        ("::part(a   b)", "::part(a b)"),
        ("#\\31 23", "#\\31 23"),
    ];
    for (input, expected) in cases {
        assert_eq!(canonical(input), expected, "{input}");
    }
}

#[test]
fn test_nth_forms() {
    let cases = [
        ("odd", "2n+1"),
        ("even", "2n"),
        ("n", "n"),
        ("-n+3", "-n+3"),
        ("+n-2", "n-2"),
        ("3", "3"),
        ("-5", "-5"),
        ("0n+7", "7"),
        ("0n", "0"),
        ("-2n - 1", "-2n-1"),
    ];
    for (input, expected) in cases {
        let selector = format!(":nth-child({input})");
        assert_eq!(canonical(&selector), format!(":nth-child({expected})"), "{input}");
    }
    assert_eq!(
        canonical(":nth-last-child(odd of li.a,li.b)"),
        ":nth-last-child(2n+1 of li.a, li.b)"
    );
}

#[test]
fn test_display_of_parts() {
    assert_eq!(QualifiedName::with_namespace("*", "*").to_string(), "*|*");
    assert_eq!(AnPlusB::new(-1, 0).to_string(), "-n");
    assert_eq!(SimpleSelector::class("1st").to_string(), ".\\31 st");
    assert_eq!(SimpleSelector::relative_anchor().to_string(), "");
}

#[test]
fn test_list_serialization() {
    let list = parse_selector_list("h1,h2 ,  h3").unwrap();
    assert_eq!(serialize_selector_list(&list), "h1, h2, h3");
}

#[test]
fn test_serialization_reparses_to_equal_selector() {
    let inputs = [
        "div.note > p:is(.a, .b)",
        "*|*:hover",
        "ns|a[ns|b~=\"c d\" i]",
        ":has(> img, + p ~ span)",
        ":nth-child(-n+3 of :not(.x))",
        "::slotted(span.a)",
        ":host-context(body.dark) .a",
        ":lang(\"\", en)",
        ".\\31 a#\\2d x",
        "a::first-line",
        "[data-x=\"\"]",
        ":where(ul, ol) li",
        "::highlight(\"two words\")",
    ];
    for input in inputs {
        let parsed = parse_complex_selector(input).unwrap();
        let reparsed = parse_complex_selector(&parsed.to_string()).unwrap();
        assert_eq!(parsed, reparsed, "{input} -> {parsed}");
    }
}

#[test]
fn test_model_serializes_to_json() {
    let selector = parse_complex_selector("a > .b").unwrap();
    let json = serde_json::to_value(&selector).unwrap();
    assert_eq!(json["selectors"][1]["relation"], "Child");
    assert_eq!(json["selectors"][1]["match_kind"], "Class");
    assert_eq!(json["selectors"][1]["data"]["Value"], "b");
}
