/// Alternative spellings of connectives and the single-character operator each one
/// stands for. Applied in order; the three-character equivalence arrows must come
/// before the implication arrows they contain.
pub const OPERATOR_ALIASES: [(&str, char); 5] = [
    ("<->", '='),
    ("<=>", '='),
    ("->", '>'),
    ("=>", '>'),
    ("&", '^'),
];

/// Characters that make up a variable name.
pub fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Rewrites operator aliases into their canonical form and drops whitespace.
///
/// A run of whitespace between two identifier characters collapses to a single
/// space instead of vanishing, so `a b` stays two operands rather than becoming
/// the variable `ab`. Anything else is left untouched, unknown symbols are the
/// parser's problem.
pub fn normalize(expression: &str) -> String {
    let expression = OPERATOR_ALIASES
        .iter()
        .fold(expression.to_owned(), |expression, (alias, operator)| {
            expression.replace(alias, &operator.to_string())
        });

    let mut normalized = String::with_capacity(expression.len());
    let mut chars = expression.chars().peekable();

    while let Some(c) = chars.next() {
        if !c.is_whitespace() {
            normalized.push(c);
            continue;
        }

        while chars.next_if(|c| c.is_whitespace()).is_some() {}

        let after_identifier = normalized.chars().last().is_some_and(is_identifier_char);
        let before_identifier = chars.peek().is_some_and(|&c| is_identifier_char(c));

        if after_identifier && before_identifier {
            normalized.push(' ');
        }
    }

    normalized
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn rewrites_every_alias() {
        assert_eq!(normalize("a -> b"), "a>b");
        assert_eq!(normalize("a => b"), "a>b");
        assert_eq!(normalize("a <-> b"), "a=b");
        assert_eq!(normalize("a <=> b"), "a=b");
        assert_eq!(normalize("a & b & c"), "a^b^c");
    }

    #[test]
    fn strips_all_whitespace() {
        assert_eq!(normalize(" \t( a |\nb )\r\n"), "(a|b)");
    }

    #[test]
    fn keeps_a_separator_between_identifiers() {
        assert_eq!(normalize("a  b"), "a b");
        assert_eq!(normalize("foo\tbar ^ baz"), "foo bar^baz");
        assert_eq!(normalize("a ^ b"), "a^b");
    }

    #[test]
    fn leaves_unknown_symbols_alone() {
        assert_eq!(normalize("a + b % c"), "a+b%c");
        assert_eq!(normalize("a < b"), "a<b");
    }

    #[test]
    fn rewrites_repeated_aliases() {
        assert_eq!(normalize("a->b->c<=>d"), "a>b>c=d");
    }
}
