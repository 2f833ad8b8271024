use std::ops::Range;

/// Case-insensitive substring test against a lowercase keyword list.
pub(crate) fn contains_any(lowercase_haystack: &str, keywords: &[&str]) -> bool {
    keywords
        .iter()
        .any(|keyword| lowercase_haystack.contains(keyword))
}

/// True when a free-text field carries something other than a "none" marker.
pub(crate) fn has_content(lowercase_value: &str, none_marker: &str) -> bool {
    !lowercase_value.trim().is_empty() && !lowercase_value.contains(none_marker)
}

pub(crate) fn or_not_available(value: &str) -> &str {
    if value.trim().is_empty() {
        "N/A"
    } else {
        value
    }
}

pub(crate) fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

fn find_ignore_case(haystack: &str, needle: &str) -> Option<Range<usize>> {
    if needle.is_empty() {
        return None;
    }

    for (start, _) in haystack.char_indices() {
        let mut candidate = haystack[start..].char_indices();
        let mut end = start;
        let matched = needle.chars().all(|expected| match candidate.next() {
            Some((offset, actual)) if actual.to_lowercase().eq(expected.to_lowercase()) => {
                end = start + offset + actual.len_utf8();
                true
            }
            _ => false,
        });
        if matched {
            return Some(start..end);
        }
    }

    None
}

/// Replaces the first case-insensitive occurrence of `needle`, keeping the rest intact.
pub(crate) fn replace_first_ignore_case(text: &str, needle: &str, replacement: &str) -> String {
    match find_ignore_case(text, needle) {
        Some(range) => {
            let mut replaced = String::with_capacity(text.len() + replacement.len());
            replaced.push_str(&text[..range.start]);
            replaced.push_str(replacement);
            replaced.push_str(&text[range.end..]);
            replaced
        }
        None => text.to_string(),
    }
}
