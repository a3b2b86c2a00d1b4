use unicode_normalization::UnicodeNormalization;

/// Derives a URL-safe slug from free-form text.
///
/// The input is NFD-decomposed so accented letters contribute their base
/// character ("Café" → "cafe"). ASCII alphanumerics are kept lowercased,
/// and runs of whitespace and hyphens collapse to a single hyphen.
/// Everything else (punctuation such as `* + ~ . ( ) ' " ! : @`, symbols,
/// combining marks) is stripped without leaving a separator, so
/// "Don't Stop" becomes "dont-stop" rather than "don-t-stop". The result
/// matches `[a-z0-9]+(-[a-z0-9]+)*` or is empty when the input has no
/// alphanumeric content; callers must reject that case rather than
/// persist an empty slug.
pub fn generate_slug(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;

    for c in text.nfd() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        } else if c.is_whitespace() || c == '-' {
            pending_hyphen = true;
        }
    }

    slug
}

/// Probes `base`, `base-1`, `base-2`, … and returns the first candidate
/// for which `exists` reports false.
///
/// The resolver holds no state and does no I/O of its own; `exists` is
/// backed by the post store's slug lookup, and any probe failure
/// propagates unchanged. Excluding a post from its own collision check
/// on update is the caller's concern. The counter is unbounded, so a
/// pathological number of same-titled posts costs one lookup each.
pub fn resolve_unique_slug<E, F>(base: &str, mut exists: F) -> Result<String, E>
where
    F: FnMut(&str) -> Result<bool, E>,
{
    let mut candidate = base.to_string();
    let mut counter: u64 = 1;

    while exists(&candidate)? {
        candidate = format!("{}-{}", base, counter);
        counter += 1;
    }

    Ok(candidate)
}
