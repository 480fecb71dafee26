/// Truncate a string to at most `max` characters, without a suffix marker
pub fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

/// Convert a snake_case identifier into a space-separated title ("failure_retry" -> "Failure Retry")
pub fn title_case(snake: &str) -> String {
    snake
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars_counts_characters_not_bytes() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("short", 200), "short");
        assert_eq!(truncate_chars("", 3), "");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("failure_retry"), "Failure Retry");
        assert_eq!(title_case("debugging_loop"), "Debugging Loop");
        assert_eq!(title_case("single"), "Single");
        assert_eq!(title_case("__odd__"), "Odd");
    }
}
