//! Identifier casing for generated code.
//!
//! Schema keys arrive in every convention imaginable (`user_id`, `X-Request-ID`,
//! `first name`, `pets.json`). Everything here first splits a key into words and
//! then re-joins the words in the casing the target position needs.

use crate::field::Field;

const RUST_KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "union", "unsafe",
    "unsized", "use", "virtual", "where", "while", "yield",
];

// Keywords that cannot be written as raw identifiers.
const RESERVED_PATH_KEYWORDS: &[&str] = &["crate", "self", "Self", "super"];

/// Split a string into words.
///
/// Any non-alphanumeric character separates words, as does a lowercase-to-uppercase
/// transition. A run of capitals followed by a lowercase letter keeps the last capital
/// for the next word (`HTTPResponse` -> `HTTP`, `Response`). Digits stay attached to
/// the word they follow.
pub fn split_words(s: &str) -> Vec<String> {
    let chars: Vec<char> = s.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &ch) in chars.iter().enumerate() {
        if !ch.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if ch.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|c| c.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower)
            {
                words.push(std::mem::take(&mut current));
            }
        }

        current.push(ch);
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
    }
}

/// Convert a string to UpperCamelCase (PascalCase)
pub fn to_upper_camel_case(s: &str) -> String {
    split_words(s).iter().map(|word| capitalize(word)).collect()
}

/// Convert a string to snake_case
pub fn to_snake_case(s: &str) -> String {
    split_words(s)
        .iter()
        .map(|word| word.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// Convert a schema key into an exported type-position identifier.
///
/// Returns an empty string only for an empty key, which marks the array-root field.
pub fn to_identifier(key: &str) -> String {
    if key.is_empty() {
        return String::new();
    }

    let ident = to_upper_camel_case(key);
    match ident.chars().next() {
        None => "Field".to_string(),
        Some(first) if first.is_ascii_digit() => format!("N{ident}"),
        Some(_) => ident,
    }
}

/// Render an exported identifier as a struct member or function name.
pub fn to_field_ident(name: &str) -> String {
    let snake = to_snake_case(name);
    if snake.is_empty() {
        return "field".to_string();
    }
    if RESERVED_PATH_KEYWORDS.contains(&snake.as_str()) {
        return format!("{snake}_");
    }
    if RUST_KEYWORDS.contains(&snake.as_str()) {
        return format!("r#{snake}");
    }
    if snake.starts_with(|c: char| c.is_ascii_digit()) {
        return format!("n{snake}");
    }
    snake
}

/// Build the identifier prefix shared by every item generated for one operation.
///
/// The document title is camel-cased on its own, the path has its separators turned
/// into underscores and template braces dropped, the verb is appended, and the whole
/// concatenation is camel-cased once more.
pub fn operation_prefix(title: &str, path: &str, method: &str) -> String {
    let mut prefix = to_upper_camel_case(title);
    prefix.push_str(&path.replace('/', "_").replace(['{', '}'], ""));
    prefix.push('_');
    prefix.push_str(method);
    to_identifier(&prefix)
}

/// Make sibling names unique by numbering repeats in order of appearance.
///
/// `user_id` and `userId` both camel-case to `UserId`; the second becomes `UserId2`.
/// Uniqueness is checked on the emitted member identifier, so `ab` and `a-b`
/// (`Ab` and `AB`, both `ab` as members) collide as well.
pub fn dedupe_names(fields: &mut [Field]) {
    let mut seen: Vec<String> = Vec::with_capacity(fields.len());
    for field in fields.iter_mut() {
        if field.is_array_root() {
            continue;
        }
        let base = field.name.clone();
        let mut n = 2;
        while seen.contains(&to_field_ident(&field.name)) {
            field.name = format!("{base}{n}");
            n += 1;
        }
        seen.push(to_field_ident(&field.name));
    }
}
