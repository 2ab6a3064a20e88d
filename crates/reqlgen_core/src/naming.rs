//! Naming-convention transforms between the host DSL (`snake_case` members) and the Java driver
//! (`dromedaryCase` methods).
//!
//! ## Notes
//! - Words are capitalized with the host language's title-casing rule: a cased letter is upper-cased when the
//!   character before it is not a cased letter and lower-cased otherwise. Digits are not cased, so `iso8601`
//!   titles to `Iso8601` and `x2y` to `X2Y`.
//! - A name that is already mixed case is left alone apart from its first letter.
//! - A trailing underscore survives the transform (`in_` becomes `In_` / `in_`).
//!
//! ## Examples
//! ```rust
//! use reqlgen_core::naming::{camel, dromedary};
//!
//! assert_eq!(camel("get_all"), "GetAll");
//! assert_eq!(dromedary("get_all"), "getAll");
//! assert_eq!(dromedary("eqJoin"), "eqJoin");
//! assert_eq!(dromedary("ISO8601"), "iso8601");
//! ```

/// Convert a member name to `CamelCase`.
pub fn camel(name: &str) -> String {
    if is_uniform_snake(name) {
        let mut out: String = name.split('_').map(title).collect();
        if name.ends_with('_') {
            out.push('_');
        }
        out
    } else {
        map_first(name, |c| c.to_uppercase().collect())
    }
}

/// Convert a member name to `dromedaryCase`.
pub fn dromedary(name: &str) -> String {
    map_first(&camel(name), |c| c.to_lowercase().collect())
}

/// Title-case one word.
pub fn title(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut prev_cased = false;
    for c in word.chars() {
        let cased = c.is_lowercase() || c.is_uppercase();
        if cased && !prev_cased {
            out.extend(c.to_uppercase());
        } else if cased {
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
        prev_cased = cased;
    }
    out
}

/// `^[A-Z][A-Z0-9_]*$` or `^[a-z][a-z0-9_]*$`.
fn is_uniform_snake(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_uppercase() => {
            chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
        }
        Some(first) if first.is_ascii_lowercase() => {
            chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        }
        _ => false,
    }
}

fn map_first(s: &str, f: impl Fn(char) -> String) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => {
            let mut out = f(first);
            out.push_str(chars.as_str());
            out
        }
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snake_members_become_dromedary() {
        let cases = [
            ("filter", "filter"),
            ("get_all", "getAll"),
            ("to_iso8601", "toIso8601"),
            ("eq_join", "eqJoin"),
            ("set_insert", "setInsert"),
            ("javascript", "javascript"),
            ("in_", "in_"),
        ];
        for (input, expected) in cases {
            assert_eq!(dromedary(input), expected, "{input}");
        }
    }

    #[test]
    fn mixed_case_is_preserved() {
        assert_eq!(dromedary("coerceTo"), "coerceTo");
        assert_eq!(camel("coerceTo"), "CoerceTo");
    }

    #[test]
    fn title_follows_cased_boundaries() {
        assert_eq!(title("x2y"), "X2Y");
        assert_eq!(title("HELLO"), "Hello");
        assert_eq!(title(""), "");
    }

    #[test]
    fn double_underscores_collapse() {
        assert_eq!(dromedary("a__b"), "aB");
    }

    #[test]
    fn leading_underscore_is_not_snake() {
        assert_eq!(dromedary("_private"), "_private");
    }
}
