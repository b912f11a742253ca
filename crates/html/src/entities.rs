/// Decode a small, fixed set of HTML character references.
///
/// Named references: `&amp;`, `&lt;`, `&gt;`, `&quot;`, `&apos;`, `&nbsp;`.
/// Numeric references must be semicolon-terminated and name a valid Unicode
/// scalar value. Anything else is copied through unchanged.
pub(crate) fn decode_entities(s: &str) -> String {
    const NAMED: &[(&str, char)] = &[
        ("&amp;", '&'),
        ("&lt;", '<'),
        ("&gt;", '>'),
        ("&quot;", '"'),
        ("&apos;", '\''),
        ("&nbsp;", '\u{00A0}'),
    ];
    const MAX_HEX_DIGITS: usize = 6; // 0x10FFFF
    const MAX_DEC_DIGITS: usize = 7; // 1114111

    if memchr::memchr(b'&', s.as_bytes()).is_none() {
        return s.to_string();
    }

    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];

        if let Some((entity, ch)) = NAMED.iter().find(|(e, _)| tail.starts_with(e)) {
            out.push(*ch);
            rest = &tail[entity.len()..];
            continue;
        }

        let numeric = if let Some(digits) = tail
            .strip_prefix("&#x")
            .or_else(|| tail.strip_prefix("&#X"))
        {
            decode_numeric(digits, MAX_HEX_DIGITS, 16).map(|(ch, used)| (ch, used + 3))
        } else if let Some(digits) = tail.strip_prefix("&#") {
            decode_numeric(digits, MAX_DEC_DIGITS, 10).map(|(ch, used)| (ch, used + 2))
        } else {
            None
        };

        match numeric {
            Some((ch, consumed)) => {
                out.push(ch);
                rest = &tail[consumed..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Parses `digits;` and returns the character plus the byte length consumed
/// including the semicolon.
fn decode_numeric(digits: &str, max_digits: usize, radix: u32) -> Option<(char, usize)> {
    let end = digits
        .bytes()
        .take(max_digits + 1)
        .position(|b| b == b';')?;
    if end == 0 {
        return None;
    }
    let run = &digits[..end];
    if !run.bytes().all(|b| (b as char).is_digit(radix)) {
        return None;
    }
    let ch = u32::from_str_radix(run, radix).ok().and_then(char::from_u32)?;
    Some((ch, end + 1))
}

/// Escape character data for a text node.
pub fn escape_text(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{00A0}' => out.push_str("&nbsp;"),
            _ => out.push(ch),
        }
    }
}

/// Escape a double-quoted attribute value.
pub fn escape_attr(value: &str, out: &mut String) {
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\u{00A0}' => out.push_str("&nbsp;"),
            _ => out.push(ch),
        }
    }
}
