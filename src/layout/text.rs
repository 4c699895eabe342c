use super::TextBlock;

/// Approximate advance of one character, as a fraction of the font size.
pub(crate) fn char_width_factor(ch: char) -> f32 {
    match ch {
        ' ' => 0.31,
        'i' | 'j' | 'l' | 'I' | '\'' | '|' | '!' => 0.25,
        '.' | ',' | ':' | ';' | '(' | ')' | '[' | ']' => 0.32,
        'f' | 't' | 'r' => 0.34,
        'm' | 'w' => 0.84,
        'M' | 'W' => 0.93,
        '@' | '#' | '%' | '&' => 0.95,
        'A'..='Z' => 0.66,
        'a'..='z' | '0'..='9' => 0.57,
        ch if ch.is_ascii() => 0.57,
        // emoji, CJK and other wide glyphs
        ch if ch as u32 >= 0x2E80 => 1.0,
        _ => 0.6,
    }
}

pub(crate) fn text_width(text: &str, font_size: f32) -> f32 {
    text.chars()
        .filter(|ch| !ch.is_control() && *ch != '\u{fe0f}' && *ch != '\u{200d}')
        .map(char_width_factor)
        .sum::<f32>()
        * font_size
}

pub(crate) fn wrap_line(line: &str, max_width: f32, font_size: f32) -> Vec<String> {
    if max_width <= 0.0 || text_width(line, font_size) <= max_width {
        return vec![line.to_string()];
    }
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in line.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if text_width(&candidate, font_size) > max_width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        } else {
            current = candidate;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Splits `text` on newlines, wraps each line to `max_width` and measures the result.
pub(crate) fn measure_label(
    text: &str,
    font_size: f32,
    max_width: f32,
    line_height: f32,
) -> TextBlock {
    let mut lines: Vec<String> = text
        .split('\n')
        .flat_map(|line| wrap_line(line.trim(), max_width, font_size))
        .collect();
    if lines.is_empty() {
        lines.push(String::new());
    }
    let width = lines
        .iter()
        .map(|line| text_width(line, font_size))
        .fold(0.0, f32::max);
    let height = lines.len() as f32 * font_size * line_height;
    TextBlock {
        lines,
        width,
        height,
    }
}
