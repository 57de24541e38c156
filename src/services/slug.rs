// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Route identifier normalization.
//!
//! Turns a free-text route name into a lowercase ASCII identifier that is
//! safe to use both in URLs and as an archive file name.

/// Map a lowercase Slovak-alphabet letter to its unaccented ASCII form.
fn fold_diacritic(c: char) -> Option<char> {
    let folded = match c {
        'á' | 'ä' | 'â' | 'à' => 'a',
        'é' | 'è' | 'ê' => 'e',
        'í' | 'ì' => 'i',
        'ó' | 'ô' | 'ò' => 'o',
        'ú' | 'ù' => 'u',
        'ý' => 'y',
        'č' => 'c',
        'ď' => 'd',
        'ľ' => 'l',
        'ň' => 'n',
        'ŕ' => 'r',
        'š' => 's',
        'ť' => 't',
        'ž' => 'z',
        _ => return None,
    };
    Some(folded)
}

/// Normalize a display name into a route identifier.
///
/// The output contains only `[a-z0-9]` and single interior hyphens. Any run
/// of characters that are not letters or digits after diacritic folding
/// becomes one hyphen, and hyphens at either end are stripped. Empty input
/// (or input with no alphanumerics at all) yields an empty string.
pub fn normalize(display_name: &str) -> String {
    let mut id = String::with_capacity(display_name.len());
    let mut pending_hyphen = false;

    for c in display_name.chars().flat_map(char::to_lowercase) {
        let c = fold_diacritic(c).unwrap_or(c);
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_hyphen && !id.is_empty() {
                id.push('-');
            }
            pending_hyphen = false;
            id.push(c);
        } else {
            pending_hyphen = true;
        }
    }

    id
}
