//! Command Line Tokenizer
//!
//! Splits a raw input line into words. Quotes (`"` or `'`, not
//! distinguished) group whitespace into one word; `\` takes the next
//! character literally. Variable expansion runs on whole words afterwards.

use indexmap::IndexMap;

/// Split `input` into words. Empty words are never produced.
pub fn tokenize(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut escape_next = false;

    for c in input.chars() {
        if escape_next {
            current.push(c);
            escape_next = false;
        } else if c == '\\' {
            escape_next = true;
        } else if c == '"' || c == '\'' {
            in_quotes = !in_quotes;
        } else if c.is_whitespace() && !in_quotes {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
        } else {
            current.push(c);
        }
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Replace every word starting with `$` by the value of the variable it
/// names, or the empty string when unset. Expansion never happens mid-word.
pub fn expand_variables(words: Vec<String>, env: &IndexMap<String, String>) -> Vec<String> {
    words
        .into_iter()
        .map(|word| match word.strip_prefix('$') {
            Some(name) => env.get(name).cloned().unwrap_or_default(),
            None => word,
        })
        .collect()
}
