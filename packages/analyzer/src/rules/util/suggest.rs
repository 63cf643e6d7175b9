//! "Did you mean" suggestions.

/// The candidate closest to `name` by edit distance, if it is close enough.
/// The allowed distance is a third of the name's length, at least 2. Ties go
/// to the alphabetically first candidate.
pub fn suggest_similar<'a>(name: &str, candidates: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
    let needle = name.to_ascii_lowercase();
    let threshold = (needle.chars().count() / 3).max(2);

    candidates
        .into_iter()
        .filter(|candidate| !candidate.eq_ignore_ascii_case(name))
        .map(|candidate| (strsim::levenshtein(&needle, &candidate.to_ascii_lowercase()), candidate))
        .filter(|(distance, _)| *distance <= threshold)
        .min_by(|(a, name_a), (b, name_b)| a.cmp(b).then_with(|| name_a.cmp(name_b)))
        .map(|(_, candidate)| candidate)
}
