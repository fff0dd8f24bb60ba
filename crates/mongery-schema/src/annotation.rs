//! Entity marker detection and annotation parameter parsing.

use syn::{Attribute, Expr, ExprLit, Lit, Meta};

/// Doc-comment token that flags a struct for generation.
pub const ENTITY_MARKER: &str = "@Entity";

///
/// parse_parameters
///
/// Split the parenthesized argument list of one annotation occurrence into
/// plain strings, in source order. Quoted and bare arguments are returned the
/// same way: `@Entity(1, "2", 3)` yields `["1", "2", "3"]`.
///
/// A marker without a parenthesized list (or with an empty one) yields no
/// parameters. Embedded commas and quotes cannot be escaped.
///

#[must_use]
pub fn parse_parameters(text: &str) -> Vec<String> {
    let Some(open) = text.find('(') else {
        return Vec::new();
    };

    let rest = &text[open + 1..];
    let inner = rest.find(')').map_or(rest, |close| &rest[..close]);

    if inner.trim().is_empty() {
        return Vec::new();
    }

    inner
        .split(',')
        .map(|param| strip_quotes(param.trim()).to_string())
        .collect()
}

// strip_quotes
fn strip_quotes(param: &str) -> &str {
    for quote in ['"', '\'', '`'] {
        if let Some(inner) = param
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }

    param
}

/// Find the entity marker in a list of doc lines and parse its parameters.
///
/// Returns `None` when no line carries the marker. The first marked line
/// wins. A parameter list counts only when it directly follows the marker,
/// so prose such as `@Entity - orders (see docs)` has no parameters.
#[must_use]
pub fn find_marker<S: AsRef<str>>(lines: &[S]) -> Option<Vec<String>> {
    lines.iter().find_map(|line| {
        let line = line.as_ref();
        let pos = line.find(ENTITY_MARKER)?;
        let rest = line[pos + ENTITY_MARKER.len()..].trim_start();

        if rest.starts_with('(') {
            Some(parse_parameters(rest))
        } else {
            Some(Vec::new())
        }
    })
}

/// Collect the text of every `#[doc = "..."]` attribute, in order.
#[must_use]
pub fn doc_lines(attrs: &[Attribute]) -> Vec<String> {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| match &attr.meta {
            Meta::NameValue(nv) => match &nv.value {
                Expr::Lit(ExprLit {
                    lit: Lit::Str(lit), ..
                }) => Some(lit.value()),
                _ => None,
            },
            _ => None,
        })
        .collect()
}

/// Whether an item's attributes carry the entity marker.
#[must_use]
pub fn is_entity(attrs: &[Attribute]) -> bool {
    find_marker(&doc_lines(attrs)).is_some()
}

///
/// TESTS
///
