//! Regex-literal style escaping.
//!
//! Giant URLs are pasted in escaped form and the metadata API returns escaped
//! JSON lines; both are decoded with the same rules before use.

use crate::error::{ProbeError, Result};

/// Decodes backslash escapes.
///
/// Recognized: `\a \b \t \r \v \f \n \e`, `\xHH`, `\uHHHH`, `\cX`, octal
/// `\0`..`\7` (up to three digits, truncated to one byte), and a backslash
/// before any non-word character, which yields that character. A backslash
/// before any other letter, digit or `_` is an error, as is a trailing `\`.
pub fn unescape(input: &str) -> Result<String> {
    if !input.contains('\\') {
        return Ok(input.to_string());
    }

    let mut out = String::with_capacity(input.len());
    let mut chars = input.char_indices().peekable();
    while let Some((pos, c)) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let (_, esc) = chars.next().ok_or_else(|| ProbeError::Unescape {
            offset: pos,
            reason: "trailing backslash".to_string(),
        })?;
        let decoded = match esc {
            'a' => '\u{07}',
            'b' => '\u{08}',
            't' => '\t',
            'r' => '\r',
            'v' => '\u{0B}',
            'f' => '\u{0C}',
            'n' => '\n',
            'e' => '\u{1B}',
            'x' => hex_escape(&mut chars, 2, pos)?,
            'u' => hex_escape(&mut chars, 4, pos)?,
            'c' => {
                let (_, ctl) = chars.next().ok_or_else(|| ProbeError::Unescape {
                    offset: pos,
                    reason: "missing control character after \\c".to_string(),
                })?;
                control_escape(ctl).ok_or_else(|| ProbeError::Unescape {
                    offset: pos,
                    reason: format!("unrecognized control character '{}'", ctl),
                })?
            }
            '0'..='7' => {
                let mut value = esc.to_digit(8).unwrap_or(0);
                for _ in 0..2 {
                    match chars.peek().and_then(|(_, d)| d.to_digit(8)) {
                        Some(d) => {
                            value = value * 8 + d;
                            chars.next();
                        }
                        None => break,
                    }
                }
                char::from((value & 0xFF) as u8)
            }
            other if is_word_char(other) => {
                return Err(ProbeError::Unescape {
                    offset: pos,
                    reason: format!("unrecognized escape sequence \\{}", other),
                });
            }
            other => other,
        };
        out.push(decoded);
    }
    Ok(out)
}

/// Escapes regex metacharacters and whitespace so that [`unescape`] restores
/// the input exactly.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '\\' | '*' | '+' | '?' | '|' | '{' | '[' | '(' | ')' | '^' | '$' | '.' | '#' | ' ' => {
                out.push('\\');
                out.push(c);
            }
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{0C}' => out.push_str("\\f"),
            _ => out.push(c),
        }
    }
    out
}

fn hex_escape(
    chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
    digits: usize,
    pos: usize,
) -> Result<char> {
    let mut value = 0u32;
    for _ in 0..digits {
        let d = chars
            .next()
            .and_then(|(_, c)| c.to_digit(16))
            .ok_or_else(|| ProbeError::Unescape {
                offset: pos,
                reason: format!("expected {} hex digits", digits),
            })?;
        value = value * 16 + d;
    }
    char::from_u32(value).ok_or_else(|| ProbeError::Unescape {
        offset: pos,
        reason: format!("\\u{:04X} is not a valid character", value),
    })
}

/// `\cX`: letters and `@[\]^_` map onto the C0 control range.
fn control_escape(c: char) -> Option<char> {
    let upper = c.to_ascii_uppercase();
    if ('@'..='_').contains(&upper) {
        char::from_u32(upper as u32 - '@' as u32)
    } else {
        None
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
