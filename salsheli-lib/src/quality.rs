//! Data-quality heuristics for catalog text.

/// Characters cp1252 maps bytes 0x80..=0x9F to. They show up as the second
/// character when UTF-8 is decoded with that code page.
const CP1252_SPECIALS: &str = "€‚ƒ„…†‡ˆ‰Š‹ŒŽ‘’“”•–—˜™š›œžŸ";

/// Whether `text` looks like mojibake.
///
/// Flags the replacement character, CJK ideographs (UTF-8 decoded as GBK),
/// and the `Ã©`/`×©` pattern left by UTF-8 decoded as a single-byte code
/// page: a lead byte in `Â..=ô` followed by a continuation byte.
pub fn looks_garbled(text: &str) -> bool {
    let chars: Vec<char> = text.chars().collect();
    chars.iter().enumerate().any(|(i, &c)| {
        if c == '\u{FFFD}' || is_cjk(c) {
            return true;
        }
        if is_lead(c) {
            return chars.get(i + 1).is_some_and(|&next| is_continuation(next));
        }
        false
    })
}

fn is_cjk(c: char) -> bool {
    matches!(c, '\u{3400}'..='\u{4DBF}' | '\u{4E00}'..='\u{9FFF}')
}

fn is_lead(c: char) -> bool {
    matches!(c, '\u{00C2}'..='\u{00F4}')
}

fn is_continuation(c: char) -> bool {
    matches!(c, '\u{0080}'..='\u{00BF}') || CP1252_SPECIALS.contains(c)
}

#[cfg(test)]
#[path = "tests/quality_tests.rs"]
mod tests;
