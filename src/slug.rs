//! Display-name normalization.
//!
//! Statistics files are keyed by slug, so every identity comparison in the
//! engine funnels through `slugify`. The function is total: any string maps to
//! a (possibly empty) lowercase ASCII token, and re-slugifying a slug is a
//! no-op.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Turn a display name into a filesystem-safe slug.
///
/// NFKD-decomposes and drops combining marks, removes apostrophes, lowercases,
/// then collapses every run of characters outside `[a-z0-9]` into a single
/// hyphen with no leading or trailing hyphen.
pub fn slugify(input: &str) -> String {
    let stripped: String = input
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| !matches!(c, '\'' | '\u{2019}'))
        .collect();
    let lowered = stripped.trim().to_lowercase();

    let mut slug = String::with_capacity(lowered.len());
    let mut gap = false;
    for c in lowered.chars() {
        if c.is_ascii_alphanumeric() {
            if gap && !slug.is_empty() {
                slug.push('-');
            }
            gap = false;
            slug.push(c);
        } else {
            gap = true;
        }
    }
    slug
}
