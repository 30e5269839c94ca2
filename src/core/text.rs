/// Case-insensitive text scanning helpers for the log heuristics.
///
/// Log fields mix free-form English with arbitrary casing, so every
/// pattern match here folds ASCII case. Needles are always ASCII;
/// haystacks may contain multi-byte text, which is safe because an
/// ASCII byte can never match inside a UTF-8 continuation sequence.

/// Byte index of the first case-insensitive occurrence of `needle`.
pub fn find_ci(haystack: &str, needle: &str) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    let h = haystack.as_bytes();
    let n = needle.as_bytes();
    if n.len() > h.len() {
        return None;
    }
    (0..=h.len() - n.len()).find(|&i| h[i..i + n.len()].eq_ignore_ascii_case(n))
}

pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    find_ci(haystack, needle).is_some()
}

/// Everything after the first case-insensitive occurrence of `needle`,
/// or `None` if it never occurs.
pub fn after_ci<'a>(haystack: &'a str, needle: &str) -> Option<&'a str> {
    find_ci(haystack, needle).map(|i| &haystack[i + needle.len()..])
}

/// Remove the first case-insensitive occurrence of `needle`.
pub fn remove_first_ci(text: &str, needle: &str) -> String {
    match find_ci(text, needle) {
        Some(i) => {
            let mut out = String::with_capacity(text.len());
            out.push_str(&text[..i]);
            out.push_str(&text[i + needle.len()..]);
            out
        }
        None => text.to_string(),
    }
}

/// Remove every case-insensitive occurrence of `needle`.
pub fn remove_all_ci(text: &str, needle: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(i) = find_ci(rest, needle) {
        out.push_str(&rest[..i]);
        rest = &rest[i + needle.len()..];
    }
    out.push_str(rest);
    out
}

/// Split at the earliest case-insensitive occurrence of any needle.
/// Ties at the same position resolve to the first needle in the list.
pub fn split_once_any_ci<'a>(text: &'a str, needles: &[&str]) -> Option<(&'a str, &'a str)> {
    let mut best: Option<(usize, usize)> = None;
    for needle in needles {
        if let Some(i) = find_ci(text, needle) {
            if best.map_or(true, |(bi, _)| i < bi) {
                best = Some((i, needle.len()));
            }
        }
    }
    best.map(|(i, len)| (&text[..i], &text[i + len..]))
}

/// Split into segments on every case-insensitive occurrence of any
/// needle, scanning left to right. Mirrors splitting on a regex
/// alternation: at each position the first listed needle wins.
pub fn split_all_ci<'a>(text: &'a str, needles: &[&str]) -> Vec<&'a str> {
    let mut segments = Vec::new();
    let mut rest = text;
    'outer: loop {
        let bytes = rest.as_bytes();
        for i in 0..bytes.len() {
            for needle in needles {
                let n = needle.as_bytes();
                if i + n.len() <= bytes.len() && bytes[i..i + n.len()].eq_ignore_ascii_case(n) {
                    segments.push(&rest[..i]);
                    rest = &rest[i + n.len()..];
                    continue 'outer;
                }
            }
        }
        segments.push(rest);
        return segments;
    }
}

/// Replace whole-word, case-insensitive occurrences of `word`.
/// A word boundary is any non-alphanumeric ASCII byte or a text edge.
pub fn replace_word_ci(text: &str, word: &str, replacement: &str) -> String {
    if word.is_empty() {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    loop {
        match find_ci(rest, word) {
            Some(i) => {
                let before_ok = i == 0
                    || !rest.as_bytes()[i - 1].is_ascii_alphanumeric();
                let end = i + word.len();
                let after_ok = end == rest.len()
                    || !rest.as_bytes()[end].is_ascii_alphanumeric();
                out.push_str(&rest[..i]);
                if before_ok && after_ok {
                    out.push_str(replacement);
                } else {
                    out.push_str(&rest[i..end]);
                }
                rest = &rest[end..];
            }
            None => {
                out.push_str(rest);
                return out;
            }
        }
    }
}

/// Split into trimmed sentences on `.`, `!`, or `?`, dropping empties.
pub fn split_sentences(text: &str) -> Vec<&str> {
    text.split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}
