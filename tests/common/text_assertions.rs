/// Assert that rendered text contains a fragment.
#[macro_export]
macro_rules! assert_text_contains {
    ($text:expr, $needle:expr) => {
        assert!(
            $text.contains($needle),
            "Expected rendered text to contain '{}', got:\n{}",
            $needle,
            $text
        );
    };
}

/// Assert that rendered text does not contain a fragment.
#[macro_export]
macro_rules! assert_text_not_contains {
    ($text:expr, $needle:expr) => {
        assert!(
            !$text.contains($needle),
            "Expected rendered text NOT to contain '{}', got:\n{}",
            $needle,
            $text
        );
    };
}

/// Index of the first line containing `needle`.
pub fn line_of(text: &str, needle: &str) -> Option<usize> {
    text.lines().position(|l| l.contains(needle))
}
