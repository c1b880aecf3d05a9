//! Positional placeholder translation.
//!
//! PostgreSQL writes positional parameters as `$1`, Oracle as `:1`. Before
//! parsing, every `$N` marker is disguised as a string literal carrying
//! [`SENTINEL`] so it survives the AST walk wherever a literal may appear.
//! After rendering, each disguised literal is turned into `:N`.

use crate::error::{ConvertError, ConvertResult};

/// Text that tags a string literal as a disguised placeholder.
pub const SENTINEL: &str = "--cvted-phs";

/// Rewrite `$N` markers into sentinel-tagged string literals.
///
/// A `$` starts a marker when it is followed by a digit, is not the first
/// character, is not preceded by a quote or an identifier character, and sits
/// outside quoted literals and quoted identifiers. Everything else is copied
/// unchanged.
pub fn dollar_to_sentinel(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 16);
    let mut chars = input.chars().peekable();
    let mut prev: Option<char> = None;
    let mut in_literal = false;
    let mut in_ident = false;

    while let Some(c) = chars.next() {
        match c {
            '\'' if !in_ident => in_literal = !in_literal,
            '"' if !in_literal => in_ident = !in_ident,
            '$' if !in_literal
                && !in_ident
                && may_precede_marker(prev)
                && chars.peek().is_some_and(char::is_ascii_digit) =>
            {
                out.push('\'');
                out.push_str(SENTINEL);
                while let Some(d) = chars.next_if(char::is_ascii_digit) {
                    out.push(d);
                    prev = Some(d);
                }
                out.push('\'');
                continue;
            }
            _ => {}
        }
        out.push(c);
        prev = Some(c);
    }

    out
}

fn may_precede_marker(prev: Option<char>) -> bool {
    match prev {
        None | Some('\'') => false,
        Some(p) => !(p.is_alphanumeric() || p == '_' || p == '$'),
    }
}

/// Rewrite sentinel-tagged literals into `:N` markers.
///
/// The quote before the sentinel and the quote after the digit run are
/// consumed. A sentinel that is not framed that way fails with
/// [`ConvertError::MalformedMarker`].
pub fn sentinel_to_target(input: &str) -> ConvertResult<String> {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    let mut base = 0;

    while let Some(pos) = rest.find(SENTINEL) {
        let offset = base + pos;
        let head = rest[..pos]
            .strip_suffix('\'')
            .ok_or(ConvertError::MalformedMarker { offset })?;
        let tail = &rest[pos + SENTINEL.len()..];
        let digits = tail.bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 || !tail[digits..].starts_with('\'') {
            return Err(ConvertError::MalformedMarker { offset });
        }

        out.push_str(head);
        out.push(':');
        out.push_str(&tail[..digits]);

        let advance = pos + SENTINEL.len() + digits + 1;
        base += advance;
        rest = &rest[advance..];
    }

    out.push_str(rest);
    Ok(out)
}

/// If `text` is a disguised marker (sentinel followed by digits), return the digits.
pub(crate) fn marker_position(text: &str) -> Option<&str> {
    let digits = text.strip_prefix(SENTINEL)?;
    (!digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())).then_some(digits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn disguises_markers() {
        assert_eq!(
            dollar_to_sentinel("select * from a where id = $1"),
            "select * from a where id = '--cvted-phs1'"
        );
        assert_eq!(
            dollar_to_sentinel("values($1,$12)"),
            "values('--cvted-phs1','--cvted-phs12')"
        );
    }

    #[test]
    fn leaves_non_markers_alone() {
        // first character
        assert_eq!(dollar_to_sentinel("$1"), "$1");
        // inside a literal
        assert_eq!(dollar_to_sentinel("x = 'cost $1'"), "x = 'cost $1'");
        // part of an identifier
        assert_eq!(dollar_to_sentinel("select a$1 from t"), "select a$1 from t");
        // quoted identifier
        assert_eq!(dollar_to_sentinel("select \"x $1\" from t"), "select \"x $1\" from t");
        // no digit
        assert_eq!(dollar_to_sentinel("x = $a"), "x = $a");
    }

    #[test]
    fn literal_state_resets_after_closing_quote() {
        assert_eq!(
            dollar_to_sentinel("x = 'it''s' and y = $2"),
            "x = 'it''s' and y = '--cvted-phs2'"
        );
    }

    #[test]
    fn restores_markers() {
        assert_eq!(
            sentinel_to_target("SELECT count(DISTINCT '--cvted-phs1') FROM b").unwrap(),
            "SELECT count(DISTINCT :1) FROM b"
        );
        assert_eq!(sentinel_to_target("no markers").unwrap(), "no markers");
    }

    #[test]
    fn malformed_runs_are_rejected() {
        let err = sentinel_to_target("x = --cvted-phs1'").unwrap_err();
        assert!(matches!(err, ConvertError::MalformedMarker { offset: 4 }));

        let err = sentinel_to_target("x = '--cvted-phs'").unwrap_err();
        assert!(err.is_malformed());

        let err = sentinel_to_target("x = '--cvted-phs12").unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn marker_position_detects_disguised_literals() {
        assert_eq!(marker_position("--cvted-phs3"), Some("3"));
        assert_eq!(marker_position("--cvted-phs"), None);
        assert_eq!(marker_position("--cvted-phs3x"), None);
        assert_eq!(marker_position("value"), None);
    }

    fn filler() -> impl Strategy<Value = String> {
        "[a-z (),=+*]{0,8}[ (,=+]"
    }

    proptest! {
        #[test]
        fn round_trip_renames_every_marker(
            head in filler(),
            parts in prop::collection::vec((1u32..500, filler()), 0..8),
        ) {
            let mut source = head.clone();
            let mut expected = head;
            for (n, fill) in &parts {
                source.push_str(&format!("${n}{fill}"));
                expected.push_str(&format!(":{n}{fill}"));
            }

            let disguised = dollar_to_sentinel(&source);
            prop_assert!(!disguised.contains('$'));
            prop_assert_eq!(sentinel_to_target(&disguised).unwrap(), expected);
        }

        #[test]
        fn text_without_markers_is_unchanged(text in "[^$]{0,64}") {
            prop_assert_eq!(dollar_to_sentinel(&text), text);
        }
    }
}
