//! Key and label normalization

/// Turn a label into a key-safe token.
///
/// Spaces and slashes become underscores; nothing else changes.
pub fn slugify(s: &str) -> String {
    s.replace([' ', '/'], "_")
}

/// Build a display label from a code by splitting on `sep` and capitalizing
/// each segment (`conference_item` -> `Conference Item`).
pub fn make_label(s: &str, sep: char) -> String {
    s.split(sep).map(capitalize).collect::<Vec<_>>().join(" ")
}

/// Upper-case the first character and lower-case the rest
fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Journal of Things"), "Journal_of_Things");
        assert_eq!(slugify("Input/Output Letters"), "Input_Output_Letters");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn test_make_label() {
        assert_eq!(make_label("conference_item", '_'), "Conference Item");
        assert_eq!(make_label("article", '_'), "Article");
        assert_eq!(make_label("BOOK_section", '_'), "Book Section");
    }

    #[test]
    fn test_make_label_keeps_empty_segments() {
        assert_eq!(make_label("", '_'), "");
        assert_eq!(make_label("a__b", '_'), "A  B");
    }
}
