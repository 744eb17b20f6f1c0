//! Greedy word wrapping by character count.

/// Split `text` into lines of at most `max_line_width` characters.
///
/// Words are never split: a word longer than the budget sits alone on its
/// own line and overflows. Empty or whitespace-only text yields no lines.
pub fn wrap(text: &str, max_line_width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        let separator = usize::from(current_len > 0);

        if current_len > 0 && current_len + separator + word_len > max_line_width {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }

    if current_len > 0 {
        lines.push(current);
    }
    lines
}
