//! Positional text splitting
//!
//! The body is cut once, at its first whitespace run. Nothing is inferred
//! about which part is a given name or a family name.

/// Split `text` at its first whitespace run
///
/// Returns the part before the run and everything after it. Without any
/// whitespace the whole string is the first part and the second is empty.
/// Trailing whitespace in the second part is kept as-is.
///
/// # Examples
///
/// ```
/// use surname_etl::core::transform::split::positional_split;
///
/// assert_eq!(positional_split("Anna  Ivanova"), ("Anna", "Ivanova"));
/// assert_eq!(positional_split("Solo"), ("Solo", ""));
/// ```
pub fn positional_split(text: &str) -> (&str, &str) {
    match text.find(char::is_whitespace) {
        Some(start) => (&text[..start], text[start..].trim_start()),
        None => (text, ""),
    }
}

/// Number of whitespace-delimited words in `text`
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("John Smith", "John", "Smith" ; "single space")]
    #[test_case("John   Smith", "John", "Smith" ; "whitespace run")]
    #[test_case("John\tSmith Jr", "John", "Smith Jr" ; "tab separator")]
    #[test_case("Solo", "Solo", "" ; "no whitespace")]
    #[test_case(" Leading", "", "Leading" ; "leading whitespace")]
    #[test_case("Trailing ", "Trailing", "" ; "trailing whitespace only")]
    #[test_case("Anna Maria ", "Anna", "Maria " ; "second part keeps trailing whitespace")]
    #[test_case("   ", "", "" ; "whitespace only")]
    #[test_case("", "", "" ; "empty")]
    #[test_case("Дмитрий Камелиев", "Дмитрий", "Камелиев" ; "cyrillic")]
    fn test_positional_split(text: &str, first: &str, second: &str) {
        assert_eq!(positional_split(text), (first, second));
    }

    #[test_case("", 0 ; "empty")]
    #[test_case("Ivanova", 1 ; "one word")]
    #[test_case("one two three", 3 ; "three words")]
    #[test_case("  one   two  ", 2 ; "padded")]
    #[test_case("one two three four", 4 ; "four words")]
    fn test_word_count(text: &str, expected: usize) {
        assert_eq!(word_count(text), expected);
    }
}
