//! Utility functions and helpers.

pub mod http;

/// Pick the singular or plural word form for a count.
pub fn pluralize<'a>(count: usize, singular: &'a str, plural: &'a str) -> &'a str {
    if count == 1 { singular } else { plural }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize(0, "story", "stories"), "stories");
        assert_eq!(pluralize(1, "story", "stories"), "story");
        assert_eq!(pluralize(2, "story", "stories"), "stories");
    }
}
