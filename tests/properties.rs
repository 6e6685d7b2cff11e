//! Property-based tests for the `aria-role` rule

use aria_role_lint::aria::{RoleEntry, RoleRegistry};
use aria_role_lint::config::LintConfig;
use aria_role_lint::lint::Linter;
use proptest::prelude::*;

fn linter() -> Linter<'static> {
    Linter::new(&LintConfig::default())
}

/// Identifiers that aren't JSX keywords (`null`, `true`, `false`)
fn identifier_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-zA-Z0-9_]{0,8}".prop_filter("keyword", |name| {
        !matches!(name.as_str(), "null" | "true" | "false")
    })
}

/// Role values that are only known at runtime
fn dynamic_value_strategy() -> impl Strategy<Value = String> {
    let literal = "[a-z ]{0,12}";
    prop_oneof![
        identifier_strategy(),
        (identifier_strategy(), literal).prop_map(|(name, lit)| format!("{} || \"{}\"", name, lit)),
        (identifier_strategy(), literal).prop_map(|(name, lit)| format!("{} ?? '{}'", name, lit)),
        (identifier_strategy(), identifier_strategy()).prop_map(|(a, b)| format!("{}.{}", a, b)),
        identifier_strategy().prop_map(|name| format!("{}()", name)),
        (identifier_strategy(), literal, literal)
            .prop_map(|(test, a, b)| format!("{} ? \"{}\" : \"{}\"", test, a, b)),
        (literal, identifier_strategy()).prop_map(|(lit, name)| format!("`{} ${{{}}}`", lit, name)),
    ]
}

/// Whitespace-separated role values built from bundled roles and junk tokens
fn role_value_strategy() -> impl Strategy<Value = String> {
    let roles: Vec<String> = RoleRegistry::bundled()
        .iter()
        .map(|entry| entry.name.clone())
        .collect();
    let token = prop_oneof![
        3 => prop::sample::select(roles),
        1 => "[a-z]{1,10}",
    ];
    (
        prop::collection::vec(token, 0..5),
        prop::sample::select(vec![" ", "  ", "\t", " \t "]),
    )
        .prop_map(|(tokens, separator)| tokens.join(separator))
}

fn expected_valid(value: &str) -> bool {
    let registry = RoleRegistry::bundled();
    let mut tokens = value.split_whitespace().peekable();
    tokens.peek().is_some() && tokens.all(|token| registry.is_concrete(token))
}

proptest! {
    #[test]
    fn dynamic_values_are_never_flagged(value in dynamic_value_strategy()) {
        let source = format!("<div role={{{}}} />", value);
        let diagnostics = linter().lint_source(&source).unwrap();
        prop_assert!(diagnostics.is_empty(), "{} was flagged", source);
    }

    #[test]
    fn string_values_follow_registry(value in role_value_strategy()) {
        let source = format!("<div role=\"{}\" />", value);
        let diagnostics = linter().lint_source(&source).unwrap();
        let expected = if expected_valid(&value) { 0 } else { 1 };
        prop_assert_eq!(diagnostics.len(), expected);
    }

    #[test]
    fn linting_is_idempotent(values in prop::collection::vec(role_value_strategy(), 1..6)) {
        let source: String = values
            .iter()
            .map(|value| format!("<p role=\"{}\" />\n", value))
            .collect();
        let linter = linter();
        prop_assert_eq!(
            linter.lint_source(&source).unwrap(),
            linter.lint_source(&source).unwrap()
        );
    }

    #[test]
    fn registry_order_does_not_matter(value in role_value_strategy()) {
        let entries: Vec<RoleEntry> = RoleRegistry::bundled().iter().cloned().collect();
        let reversed = RoleRegistry::from_entries(entries.into_iter().rev());
        let source = format!("<div role=\"{}\" />", value);

        let bundled = linter().lint_source(&source).unwrap();
        let config = LintConfig::default();
        let other = Linter::with_registry(&reversed, &config)
            .lint_source(&source)
            .unwrap();
        prop_assert_eq!(bundled, other);
    }
}
