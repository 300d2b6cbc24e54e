//! Environment key resolution.

use crate::field::FieldMetadata;

/// Converts a field name into an environment key.
///
/// Both `SomeValue` and `some_value` become `SOME_VALUE`. A run of capitals
/// is kept together as one word (`HTTPServer` → `HTTP_SERVER`), `-` is
/// treated like `_`, and a leading `r#` is dropped.
pub fn upper_snake_case(name: &str) -> String {
    let name = name.strip_prefix("r#").unwrap_or(name);
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c == '_' || c == '-' {
            if !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
            continue;
        }

        if c.is_uppercase() && i > 0 && !out.is_empty() && !out.ends_with('_') {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower) {
                out.push('_');
            }
        }

        out.extend(c.to_uppercase());
    }

    if out.ends_with('_') && !name.ends_with('_') {
        out.pop();
    }
    out
}

/// The key a field is looked up under.
///
/// An explicit `env` wins verbatim; otherwise the name is converted and the
/// prefix, if any, prepended.
pub fn resolve_key(name: &str, metadata: &FieldMetadata, prefix: Option<&str>) -> String {
    match metadata.env {
        Some(key) => key.to_string(),
        None => {
            let key = upper_snake_case(name);
            match prefix {
                Some(prefix) => format!("{prefix}{key}"),
                None => key,
            }
        }
    }
}
