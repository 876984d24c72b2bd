//! String normalization helpers for catalog natural keys.

/// Normalize an arbitrary label into a URL-safe slug.
///
/// Lowercases, collapses any run of non-alphanumeric characters into a single
/// hyphen, and strips leading/trailing hyphens. Non-ASCII letters are dropped
/// rather than transliterated; source labels are ASCII in practice.
///
/// # Examples
/// ```
/// # use regatta_ingest::utils::slugify;
/// assert_eq!(slugify("Amalfi Coast"), "amalfi-coast");
/// assert_eq!(slugify("  Cote  d'Azur "), "cote-d-azur");
/// assert_eq!(slugify("greek-islands"), "greek-islands");
/// ```
#[must_use]
pub fn slugify(label: &str) -> String {
    let mut slug = String::with_capacity(label.len());
    let mut pending_hyphen = false;

    for ch in label.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// Turn a slug back into a display-friendly name ("greek-islands" -> "Greek Islands").
///
/// Used when a destination page yields no `<h1>` and the only name we have is
/// the slug derived from its URL.
#[must_use]
pub fn humanize_slug(slug: &str) -> String {
    slug.split('-')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
