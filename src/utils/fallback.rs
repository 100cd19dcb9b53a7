/// Returns the first candidate that is present: not `None` and not empty.
/// Whitespace-only text counts as present.
///
/// Candidates are evaluated in order, so callers list the preferred field
/// first (`[display_name, raw_id]`).
pub fn first_present<'a, I>(candidates: I) -> Option<&'a str>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    candidates
        .into_iter()
        .flatten()
        .find(|s| !s.is_empty())
}

/// Like [`first_present`] but falls back to `default` when nothing is present.
pub fn present_or<'a, I>(candidates: I, default: &'a str) -> &'a str
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    first_present(candidates).unwrap_or(default)
}
