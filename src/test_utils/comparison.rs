/// Removes every whitespace character
pub fn squash_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Asserts that two renderings differ only in whitespace
///
/// # Panics
///
/// Panics if the renderings differ in anything but whitespace
pub fn assert_same_tokens(left: &str, right: &str, message: &str) {
    assert!(
        squash_whitespace(left) == squash_whitespace(right),
        "{}\nLeft: {:?}\nRight: {:?}",
        message,
        left,
        right
    );
}
