//! Slug derivation and unique-slug probing.

use serde_json::json;
use std::future::Future;

use crate::error::AppError;

/// Upper bound on probe attempts before giving up with a conflict.
pub const MAX_SLUG_ATTEMPTS: u32 = 1000;

/// Derives a URL slug from a display name.
///
/// Lowercases, folds common Latin accents, keeps ASCII alphanumerics and
/// collapses every other run of characters into a single `-`.
///
/// ```
/// use catalog_admin::utils::slug::slugify;
///
/// assert_eq!(slugify("  Café & Té Orgánico "), "cafe-te-organico");
/// ```
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_dash = false;

    for c in input.chars().flat_map(char::to_lowercase) {
        let c = fold_accent(c);
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    slug
}

fn fold_accent(c: char) -> char {
    match c {
        'á' | 'à' | 'ä' | 'â' | 'ã' | 'å' => 'a',
        'é' | 'è' | 'ë' | 'ê' => 'e',
        'í' | 'ì' | 'ï' | 'î' => 'i',
        'ó' | 'ò' | 'ö' | 'ô' | 'õ' => 'o',
        'ú' | 'ù' | 'ü' | 'û' => 'u',
        'ñ' => 'n',
        'ç' => 'c',
        other => other,
    }
}

/// Returns the `attempt`-th candidate: `base`, `base-1`, `base-2`, ...
pub fn candidate(base: &str, attempt: u32) -> String {
    if attempt == 0 {
        base.to_string()
    } else {
        format!("{}-{}", base, attempt)
    }
}

/// Finds the first free slug for `name` by linear probing.
///
/// `fallback` is used as the base when the name has no sluggable characters.
/// `is_taken` is asked about each candidate in order.
///
/// # Errors
///
/// Propagates errors from `is_taken`; returns [`AppError::Conflict`] when
/// [`MAX_SLUG_ATTEMPTS`] candidates are all taken.
pub async fn resolve_unique<F, Fut>(
    name: &str,
    fallback: &str,
    mut is_taken: F,
) -> Result<String, AppError>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<bool, AppError>>,
{
    let mut base = slugify(name);
    if base.is_empty() {
        base = fallback.to_string();
    }

    for attempt in 0..MAX_SLUG_ATTEMPTS {
        let slug = candidate(&base, attempt);
        if !is_taken(slug.clone()).await? {
            return Ok(slug);
        }
    }

    Err(AppError::conflict(
        "Could not generate a unique slug",
        json!({ "base": base }),
    ))
}
