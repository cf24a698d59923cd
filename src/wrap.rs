/// Greedy word wrap at `width` columns.
///
/// Each input line is wrapped on its own, so blank lines and explicit line
/// breaks survive. Words are never cut: a word longer than `width` sits on a
/// line by itself. Trailing whitespace is trimmed from every output line.
pub fn wrap(text: &str, width: usize) -> String {
    let width = width.max(1);
    let mut out: Vec<String> = Vec::new();

    for line in text.lines() {
        let mut current = String::new();
        let mut current_len = 0;

        for word in line.split_whitespace() {
            let word_len = word.chars().count();
            if current_len == 0 {
                current.push_str(word);
                current_len = word_len;
            } else if current_len + 1 + word_len <= width {
                current.push(' ');
                current.push_str(word);
                current_len += 1 + word_len;
            } else {
                out.push(std::mem::take(&mut current));
                current.push_str(word);
                current_len = word_len;
            }
        }

        out.push(current);
    }

    out.join("\n")
}
