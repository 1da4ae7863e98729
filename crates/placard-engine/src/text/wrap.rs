//! Greedy line wrapping for mixed CJK / Latin text.
//!
//! Tokens are whitespace characters (one token each), CJK ideographs (one
//! token each) and maximal runs of everything else. Tokens are appended to
//! the current line while it still fits; a token that cannot fit even on an
//! empty line is packed character by character instead.

use super::Font;

/// CJK Unified Ideographs, Extension A, Extensions B–F and the
/// Compatibility Ideographs blocks.
pub fn is_cjk(ch: char) -> bool {
    matches!(
        ch as u32,
        0x4E00..=0x9FFF
            | 0x3400..=0x4DBF
            | 0x20000..=0x2A6DF
            | 0x2A700..=0x2B73F
            | 0x2B740..=0x2B81F
            | 0x2B820..=0x2CEAF
            | 0xF900..=0xFAFF
            | 0x2F800..=0x2FA1F
    )
}

/// Splits `text` into wrap tokens, borrowing from the input.
pub fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut run_start: Option<usize> = None;

    for (i, ch) in text.char_indices() {
        if ch.is_whitespace() || is_cjk(ch) {
            if let Some(start) = run_start.take() {
                tokens.push(&text[start..i]);
            }
            tokens.push(&text[i..i + ch.len_utf8()]);
        } else if run_start.is_none() {
            run_start = Some(i);
        }
    }
    if let Some(start) = run_start {
        tokens.push(&text[start..]);
    }
    tokens
}

/// Wraps `text` to `max_width` pixels as measured by `font`.
///
/// Every returned line measures `<= max_width`, except a line holding a
/// single character that is wider than `max_width` on its own.
pub fn wrap_text(text: &str, font: &Font, max_width: f32) -> Vec<String> {
    wrap_with(text, max_width, |s| font.text_width(s))
}

pub(crate) fn wrap_with(text: &str, max_width: f32, width: impl Fn(&str) -> f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    let flush = |line: &mut String, lines: &mut Vec<String>| {
        let trimmed = line.trim_end();
        if !trimmed.trim_start().is_empty() {
            lines.push(trimmed.to_string());
        }
        line.clear();
    };

    for token in tokenize(text) {
        let candidate = format!("{line}{token}");
        if width(&candidate) <= max_width {
            line = candidate;
            continue;
        }

        flush(&mut line, &mut lines);

        // The whitespace that forced the break is not carried to the next line.
        if token.chars().all(char::is_whitespace) {
            continue;
        }

        if width(token) <= max_width {
            line.push_str(token);
            continue;
        }

        for ch in token.chars() {
            line.push(ch);
            if width(&line) > max_width && line.chars().count() > 1 {
                line.pop();
                flush(&mut line, &mut lines);
                line.push(ch);
            }
        }
    }

    flush(&mut line, &mut lines);
    lines
}
