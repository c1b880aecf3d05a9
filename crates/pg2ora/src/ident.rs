//! Identifier rendering for Oracle.
//!
//! PostgreSQL folds unquoted identifiers to lower case, Oracle folds them to
//! upper case. A name the parser hands us in simple lower-case form is
//! therefore written bare and Oracle resolves it the way PostgreSQL did.
//! Everything else has to be double-quoted:
//!
//! - Oracle reserved words are quoted in upper case, which is how Oracle
//!   would have stored the unquoted name.
//! - Names that were quoted in PostgreSQL (mixed case, spaces, ...) keep their
//!   exact spelling inside quotes.
//!
//! Names have one or two parts. The qualifier of a two-part name is a table
//! or alias and is only quoted when it cannot be written bare at all.

use crate::error::{ConvertResult, Unsupported};
use crate::reserved::is_reserved;
use std::fmt;

/// A part of an identifier, as it will be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentPart {
    /// Written as-is: matches `[a-z_][a-z0-9_$#]*`.
    Bare(String),
    /// Written inside double quotes.
    Quoted(String),
}

impl IdentPart {
    fn write_sql(&self, out: &mut String) {
        match self {
            IdentPart::Bare(s) => out.push_str(s),
            IdentPart::Quoted(s) => {
                out.push('"');
                out.push_str(s);
                out.push('"');
            }
        }
    }
}

/// A column, table or alias name ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub parts: Vec<IdentPart>,
}

impl Ident {
    /// Build an identifier from its already-split parts.
    ///
    /// Fails with [`Unsupported::Name`] for zero or more than two parts, and
    /// for parts that cannot be represented (empty, or containing `"` or NUL).
    pub fn from_parts<I, S>(parts: I) -> ConvertResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let raw: Vec<S> = parts.into_iter().collect();
        let joined = || {
            raw.iter()
                .map(|p| p.as_ref())
                .collect::<Vec<_>>()
                .join(".")
        };

        match raw.as_slice() {
            [name] => Ok(Self {
                parts: vec![classify(name.as_ref(), &joined)?],
            }),
            [qualifier, name] => {
                Ok(Self {
                    parts: vec![
                        qualifier_part(qualifier.as_ref(), &joined)?,
                        classify(name.as_ref(), &joined)?,
                    ],
                })
            }
            _ => Err(Unsupported::Name(joined()).into()),
        }
    }

    /// Build a single-part identifier.
    pub fn single(name: &str) -> ConvertResult<Self> {
        Self::from_parts([name])
    }

    /// The last part, without quotes.
    pub fn name(&self) -> &str {
        match self.parts.last() {
            Some(IdentPart::Bare(s) | IdentPart::Quoted(s)) => s,
            None => "",
        }
    }

    /// Render as SQL text.
    pub fn to_sql(&self) -> String {
        let mut out = String::new();
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                out.push('.');
            }
            part.write_sql(&mut out);
        }
        out
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}

/// Render a one- or two-part name.
pub fn render_name<S: AsRef<str>>(parts: &[S]) -> ConvertResult<String> {
    Ok(Ident::from_parts(parts)?.to_sql())
}

/// Render a table or alias name in qualifier position (`t` in `t.*`).
pub fn render_qualifier(name: &str) -> ConvertResult<String> {
    let mut out = String::new();
    qualifier_part(name, &|| name.to_string())?.write_sql(&mut out);
    Ok(out)
}

fn qualifier_part(part: &str, joined: &impl Fn() -> String) -> ConvertResult<IdentPart> {
    check_representable(part, joined)?;
    if is_simple(part) {
        Ok(IdentPart::Bare(part.to_string()))
    } else {
        Ok(IdentPart::Quoted(part.to_string()))
    }
}

fn classify(part: &str, joined: &impl Fn() -> String) -> ConvertResult<IdentPart> {
    check_representable(part, joined)?;
    if !is_simple(part) {
        return Ok(IdentPart::Quoted(part.to_string()));
    }
    if is_reserved(part) {
        return Ok(IdentPart::Quoted(part.to_ascii_uppercase()));
    }
    Ok(IdentPart::Bare(part.to_string()))
}

fn check_representable(part: &str, joined: &impl Fn() -> String) -> ConvertResult<()> {
    if part.is_empty() || part.contains('"') || part.contains('\0') {
        return Err(Unsupported::Name(joined()).into());
    }
    Ok(())
}

/// `[a-z_][a-z0-9_$#]*`
fn is_simple(part: &str) -> bool {
    let mut bytes = part.bytes();
    match bytes.next() {
        Some(b) if b == b'_' || b.is_ascii_lowercase() => {}
        _ => return false,
    }
    bytes.all(|b| {
        b == b'_' || b == b'$' || b == b'#' || b.is_ascii_lowercase() || b.is_ascii_digit()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConvertError;

    #[test]
    fn simple_names_stay_bare() {
        assert_eq!(render_name(&["title"]).unwrap(), "title");
        assert_eq!(render_name(&["field_1"]).unwrap(), "field_1");
        assert_eq!(render_name(&["a", "id"]).unwrap(), "a.id");
    }

    #[test]
    fn reserved_words_are_quoted_upper_case() {
        assert_eq!(render_name(&["level"]).unwrap(), "\"LEVEL\"");
        assert_eq!(render_name(&["t", "date"]).unwrap(), "t.\"DATE\"");
    }

    #[test]
    fn qualifier_is_not_checked_against_reserved_words() {
        assert_eq!(render_name(&["user", "id"]).unwrap(), "user.id");
    }

    #[test]
    fn qualifiers_alone() {
        assert_eq!(render_qualifier("user").unwrap(), "user");
        assert_eq!(render_qualifier("T1").unwrap(), "\"T1\"");
        assert!(render_qualifier("").is_err());
    }

    #[test]
    fn case_sensitive_names_keep_spelling() {
        assert_eq!(render_name(&["CamelCase"]).unwrap(), "\"CamelCase\"");
        assert_eq!(render_name(&["My Table", "x"]).unwrap(), "\"My Table\".x");
    }

    #[test]
    fn three_parts_are_rejected() {
        let err = render_name(&["s", "t", "c"]).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::Unsupported(Unsupported::Name(ref n)) if n == "s.t.c"
        ));
    }

    #[test]
    fn unrepresentable_parts_are_rejected() {
        assert!(render_name(&["a\"b"]).is_err());
        assert!(render_name(&["a\0"]).is_err());
        assert!(render_name(&[""]).is_err());
        assert!(render_name::<&str>(&[]).is_err());
    }

    #[test]
    fn name_returns_last_part() {
        let ident = Ident::from_parts(["t", "level"]).unwrap();
        assert_eq!(ident.name(), "LEVEL");
        assert_eq!(ident.to_string(), "t.\"LEVEL\"");
    }
}
