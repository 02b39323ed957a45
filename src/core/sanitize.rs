// src/core/sanitize.rs

/// Collapse whitespace runs (including NBSP) into one space and trim.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Numeric cell text: whitespace dropped entirely, so "1 234" reads as "1234".
pub fn numeric_text(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_ws_variants() {
        assert_eq!(normalize_ws("  a \t b\n"), "a b");
        assert_eq!(normalize_ws("\u{a0}BCN\u{a0}"), "BCN");
        assert_eq!(normalize_ws(""), "");
    }

    #[test]
    fn numeric_text_drops_spaces() {
        assert_eq!(numeric_text(" 1 234.5 "), "1234.5");
        assert_eq!(numeric_text("7"), "7");
    }
}
