//! Text cleanup for player names and chat coming from the recording.

/// Strips non-graphic characters. Server plugins decorate chat with color
/// control bytes that would break substring matching.
pub fn remove_invisible_chars(s: &str) -> String {
    s.chars().filter(|c| !c.is_control() && *c != '\u{7f}').collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_control_bytes() {
        assert_eq!(remove_invisible_chars("\u{1}(T) want to stop"), "(T) want to stop");
    }

    #[test]
    fn keeps_plain_text() {
        assert_eq!(remove_invisible_chars("hello"), "hello");
    }
}
