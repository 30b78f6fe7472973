use libgramcheck::{
    canonicalize, canonicalize_production, compare, enrich_links, Ebnf, EbnfKind, Grammar, Link,
    Mismatch, Production, ProductionName, Trivia,
};
use assert_matches::assert_matches;
use proptest::prelude::*;

fn expr_body(trivia: impl Fn(&str) -> Trivia) -> Ebnf {
    Ebnf::sequence(vec![
        Ebnf::reference("term").followed_by(trivia(" ")),
        Ebnf::zero_or_more(
            Ebnf::sequence(vec![
                Ebnf::terminal("+").followed_by(trivia(" ")),
                Ebnf::reference("term"),
            ])
            .unwrap(),
        ),
    ])
    .unwrap()
}

#[test]
fn expr_compares_equal_regardless_of_spacing() {
    let authority = Grammar::new(vec![Production::rule("expr", expr_body(|_| Trivia::default()))]);
    let copy = Grammar::new(vec![Production::rule(
        "expr",
        expr_body(|ws| Trivia::whitespace(ws).with_comment(" sum")),
    )]);

    assert_eq!(
        canonicalize_production(&authority.productions[0]),
        "expr: term ( '+' term )*;"
    );
    assert_eq!(
        canonicalize_production(&authority.productions[0]),
        canonicalize_production(&copy.productions[0]),
    );
    assert!(compare(&authority, &copy).is_match());
}

#[test]
fn start_is_exempt_but_foo_is_not() {
    let authority = Grammar::new(vec![
        Production::rule("foo", Ebnf::terminal("foo")),
        Production::rule("start", Ebnf::reference("foo")),
    ]);
    let copy = Grammar::new(vec![Production::rule("start", Ebnf::reference("foo"))]);

    let report = compare(&authority, &copy);
    assert_eq!(report.missing_in_copy, vec![ProductionName::new("foo")]);
    assert!(report.missing_in_authority.is_empty());
    assert!(report.mismatches.is_empty());
}

#[test]
fn reordered_alternatives_are_a_mismatch() {
    let ab = Ebnf::choice(vec![Ebnf::reference("a"), Ebnf::reference("b")]).unwrap();
    let ba = Ebnf::choice(vec![Ebnf::reference("b"), Ebnf::reference("a")]).unwrap();
    let report = compare(
        &Grammar::new(vec![Production::rule("x", ab)]),
        &Grammar::new(vec![Production::rule("x", ba)]),
    );
    assert_eq!(report.mismatches.len(), 1);
    assert_eq!(report.mismatches[0].authority, "x: a | b;");
    assert_eq!(report.mismatches[0].copy, "x: b | a;");
}

#[test]
fn production_order_is_not_a_difference() {
    let a = Production::rule("a", Ebnf::terminal("a"));
    let b = Production::rule("b", Ebnf::one_or_more(Ebnf::reference("a")));
    let report = compare(
        &Grammar::new(vec![a.clone(), b.clone()]),
        &Grammar::new(vec![Production::comment_only("moved"), b, a]),
    );
    assert!(report.is_match());
}

#[test]
fn only_the_first_duplicate_is_compared() {
    let authority = Grammar::new(vec![
        Production::rule("dup", Ebnf::terminal("x")),
        Production::rule("dup", Ebnf::terminal("ignored")),
    ]);
    let copy = Grammar::new(vec![Production::rule("dup", Ebnf::terminal("x"))]);
    assert!(compare(&authority, &copy).is_match());
}

#[test]
fn report_text() {
    let authority = Grammar::new(vec![
        Production::rule("start", Ebnf::reference("foo")),
        Production::rule("foo", Ebnf::terminal("a")),
        Production::rule("bar", Ebnf::extended_terminal("Lu")),
    ]);
    let copy = Grammar::new(vec![
        Production::rule("foo", Ebnf::terminal("b")),
        Production::rule("baz", Ebnf::zero_or_one(Ebnf::reference("foo"))),
    ]);

    let report = compare(&authority, &copy);
    assert_eq!(report.problem_count(), 3);
    insta::assert_snapshot!(report.to_string(), @r###"
    MISMATCH for 'foo'
    AUTHORITY:
    foo: 'a';
    COPY:
    foo: 'b';

    Copy doesn't contain 'bar'
    Authority doesn't contain 'baz'
    "###);
}

#[test]
fn links_come_from_the_copy() {
    let authority = Grammar::new(vec![
        Production::rule("a", Ebnf::terminal("a")),
        Production::rule("b", Ebnf::terminal("b")),
    ])
    .with_link("b", Link::new("stale.md", "b"));
    let copy = Grammar::new(vec![
        Production::rule("a", Ebnf::terminal("a")),
        Production::rule("b", Ebnf::terminal("b")),
    ])
    .with_link("a", Link::new("syntax.md#a", "a"));

    let enriched = enrich_links(authority, &copy);
    assert_eq!(
        enriched.link(&ProductionName::new("a")),
        Some(&Link::new("syntax.md#a", "a"))
    );
    assert_eq!(enriched.link(&ProductionName::new("b")), None);
    assert_eq!(enriched.productions.len(), 2);
}

#[test]
fn named_production_without_body() {
    let bodyless = Production {
        name: Some(ProductionName::new("x")),
        ..Production::default()
    };
    let authority = Grammar::new(vec![bodyless]);
    let copy = Grammar::new(vec![Production::rule("x", Ebnf::terminal("x"))]);

    let report = compare(&authority, &copy);
    assert_matches!(
        report.mismatches.as_slice(),
        [Mismatch { authority, copy, .. }] if authority.is_empty() && copy == "x: 'x';"
    );
    assert!(report.missing_in_copy.is_empty() && report.missing_in_authority.is_empty());
    assert!(compare(&authority, &authority).is_match());
}

#[test]
fn grammars_load_from_json() {
    let json = r#"{"productions": [
        {"comment": "Arithmetic"},
        {"name": "expr", "ebnf": {"kind": {"OneOrMoreOf": {"kind": {"Reference": "term"}}}}}
    ]}"#;
    let grammar: Grammar = serde_json::from_str(json).expect("valid grammar");
    assert_eq!(grammar.productions.len(), 2);
    assert_eq!(
        canonicalize_production(&grammar.productions[1]),
        "expr: term+;"
    );
}

fn strip_trivia(ebnf: &Ebnf) -> Ebnf {
    let kind = match ebnf.kind() {
        EbnfKind::OneOrMoreOf(child) => EbnfKind::OneOrMoreOf(Box::new(strip_trivia(child))),
        EbnfKind::ZeroOrMoreOf(child) => EbnfKind::ZeroOrMoreOf(Box::new(strip_trivia(child))),
        EbnfKind::ZeroOrOneOf(child) => EbnfKind::ZeroOrOneOf(Box::new(strip_trivia(child))),
        EbnfKind::Choice(children) => EbnfKind::Choice(children.iter().map(strip_trivia).collect()),
        EbnfKind::Sequence(children) => {
            EbnfKind::Sequence(children.iter().map(strip_trivia).collect())
        }
        leaf => leaf.clone(),
    };
    Ebnf::new(kind).unwrap()
}

fn arb_trivia() -> impl Strategy<Value = Trivia> {
    (
        prop_oneof![Just(""), Just(" "), Just("  ")],
        prop_oneof![Just(String::new()), "[a-z ]{1,6}"],
        any::<bool>(),
    )
        .prop_map(|(ws, comment, newline)| {
            let trivia = Trivia::whitespace(ws).with_comment(comment);
            if newline {
                trivia.with_newline()
            } else {
                trivia
            }
        })
}

fn with_trivia(node: impl Strategy<Value = Ebnf>) -> impl Strategy<Value = Ebnf> {
    (node, arb_trivia()).prop_map(|(ebnf, trivia)| ebnf.followed_by(trivia))
}

fn arb_ebnf() -> impl Strategy<Value = Ebnf> {
    let leaf = with_trivia(prop_oneof![
        "[a-z'\"]{1,4}".prop_map(|text| Ebnf::terminal(text)),
        "[A-Z][a-z]".prop_map(|text| Ebnf::extended_terminal(text)),
        "[a-z_]{1,6}".prop_map(|name| Ebnf::reference(&name)),
    ]);
    leaf.prop_recursive(4, 24, 4, |inner| {
        with_trivia(prop_oneof![
            inner.clone().prop_map(Ebnf::one_or_more),
            inner.clone().prop_map(Ebnf::zero_or_more),
            inner.clone().prop_map(Ebnf::zero_or_one),
            prop::collection::vec(inner.clone(), 1..4).prop_map(|xs| Ebnf::choice(xs).unwrap()),
            prop::collection::vec(inner, 1..4).prop_map(|xs| Ebnf::sequence(xs).unwrap()),
        ])
    })
}

fn arb_grammar() -> impl Strategy<Value = Grammar> {
    prop::collection::vec(("[a-z]{1,5}", arb_ebnf()), 0..6).prop_map(|rules| {
        rules
            .into_iter()
            .map(|(name, ebnf)| Production::rule(&name, ebnf))
            .collect()
    })
}

proptest! {
    #[test]
    fn canonical_form_ignores_trivia(ebnf in arb_ebnf()) {
        prop_assert_eq!(canonicalize(&ebnf), canonicalize(&ebnf.clone()));
        prop_assert_eq!(canonicalize(&ebnf), canonicalize(&strip_trivia(&ebnf)));
    }

    #[test]
    fn a_grammar_matches_itself(grammar in arb_grammar()) {
        let report = compare(&grammar, &grammar);
        prop_assert!(report.is_match(), "{}", report);
    }

    #[test]
    fn mismatch_iff_canonical_forms_differ(a in arb_ebnf(), b in arb_ebnf()) {
        let differ = canonicalize(&a) != canonicalize(&b);
        let report = compare(
            &Grammar::new(vec![Production::rule("n", a)]),
            &Grammar::new(vec![Production::rule("n", b)]),
        );
        prop_assert_eq!(report.mismatches.len() == 1, differ);
        prop_assert!(report.missing_in_copy.is_empty() && report.missing_in_authority.is_empty());
    }
}
