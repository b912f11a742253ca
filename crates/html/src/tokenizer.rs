//! Practical HTML tokenizer for hand-authored document sources.
//!
//! Tag and attribute names are ASCII `[A-Za-z0-9:_-]` and are interned lowercased.
//! `script` and `style` bodies are raw text. This is not the HTML5 state machine:
//! there is no parse-error recovery beyond skipping stray `<`.
use crate::entities::decode_entities;
use crate::types::{AtomId, AtomTable, Token, TokenStream};
use memchr::memchr;

const HTML_COMMENT_START: &str = "<!--";
const HTML_COMMENT_END: &str = "-->";

fn starts_with_ignore_ascii_case_at(haystack: &[u8], start: usize, needle: &[u8]) -> bool {
    haystack.len() >= start + needle.len()
        && haystack[start..start + needle.len()].eq_ignore_ascii_case(needle)
}

fn is_name_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'-' || c == b'_' || c == b':'
}

pub(crate) fn is_void_element(name: &str) -> bool {
    matches!(
        name,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

pub(crate) fn is_rawtext_element(name: &str) -> bool {
    matches!(name, "script" | "style")
}

/// Finds `</name` followed by optional ASCII whitespace and `>`.
/// Returns (start of the close tag, index just past `>`).
fn find_rawtext_close_tag(haystack: &str, name: &str) -> Option<(usize, usize)> {
    let bytes = haystack.as_bytes();
    let len = bytes.len();
    let mut i = 0;
    while i < len {
        let rel = memchr(b'<', &bytes[i..])?;
        i += rel;
        if i + 1 < len
            && bytes[i + 1] == b'/'
            && starts_with_ignore_ascii_case_at(bytes, i + 2, name.as_bytes())
        {
            let mut k = i + 2 + name.len();
            while k < len && bytes[k].is_ascii_whitespace() {
                k += 1;
            }
            if k < len && bytes[k] == b'>' {
                return Some((i, k + 1));
            }
        }
        i += 1;
    }
    None
}

/// Tokenizes into a token stream with interned tag/attribute names.
pub fn tokenize(input: &str) -> TokenStream {
    let mut out = Vec::new();
    let mut atoms = AtomTable::new();
    let bytes = input.as_bytes();
    let len = bytes.len();
    let mut i = 0;
    // Slices are only cut at ASCII structural bytes, so every endpoint is a char boundary.
    while i < len {
        if bytes[i] != b'<' {
            let start = i;
            i = memchr(b'<', &bytes[i..]).map_or(len, |rel| i + rel);
            let decoded = decode_entities(&input[start..i]);
            if !decoded.is_empty() {
                out.push(Token::Text(decoded));
            }
            continue;
        }

        if input[i..].starts_with(HTML_COMMENT_START) {
            let body_start = i + HTML_COMMENT_START.len();
            match input[body_start..].find(HTML_COMMENT_END) {
                Some(end) => {
                    out.push(Token::Comment(input[body_start..body_start + end].to_string()));
                    i = body_start + end + HTML_COMMENT_END.len();
                    continue;
                }
                None => {
                    out.push(Token::Comment(input[body_start..].to_string()));
                    break;
                }
            }
        }

        if starts_with_ignore_ascii_case_at(bytes, i, b"<!doctype") {
            let rest = &input[i + 2..];
            match rest.find('>') {
                Some(end) => {
                    out.push(Token::Doctype(rest[..end].trim().to_string()));
                    i += 2 + end + 1;
                    continue;
                }
                None => break,
            }
        }

        if i + 1 < len && bytes[i + 1] == b'/' {
            let start = i + 2;
            let mut j = start;
            while j < len && is_name_char(bytes[j]) {
                j += 1;
            }
            if j == start {
                // `</` not followed by a name is literal text.
                out.push(Token::Text("</".to_string()));
                i = start;
                continue;
            }
            let name = atoms.intern_ascii_lowercase(&input[start..j]);
            while j < len && bytes[j] != b'>' {
                j += 1;
            }
            out.push(Token::EndTag(name));
            i = (j + 1).min(len);
            continue;
        }

        let start = i + 1;
        let mut j = start;
        while j < len && is_name_char(bytes[j]) {
            j += 1;
        }
        if j == start {
            out.push(Token::Text("<".to_string()));
            i = start;
            continue;
        }
        let name = atoms.intern_ascii_lowercase(&input[start..j]);
        let (attributes, mut self_closing, k) = scan_attributes(input, j, &mut atoms);
        if is_void_element(atoms.resolve(name)) {
            self_closing = true;
        }
        out.push(Token::StartTag {
            name,
            attributes,
            self_closing,
        });
        i = k;

        let name_str = atoms.resolve(name);
        if is_rawtext_element(name_str) && !self_closing {
            log::trace!(target: "html.tokenizer", "rawtext body for <{name_str}> at {i}");
            match find_rawtext_close_tag(&input[i..], name_str) {
                Some((rel_start, rel_end)) => {
                    let raw = &input[i..i + rel_start];
                    if !raw.is_empty() {
                        out.push(Token::Text(raw.to_string()));
                    }
                    out.push(Token::EndTag(name));
                    i += rel_end;
                }
                None => {
                    // Missing close tag: the remainder is the body.
                    let raw = &input[i..];
                    if !raw.is_empty() {
                        out.push(Token::Text(raw.to_string()));
                    }
                    out.push(Token::EndTag(name));
                    break;
                }
            }
        }
    }
    TokenStream::new(out, atoms)
}

type Attributes = Vec<(AtomId, Option<String>)>;

/// Scans attributes starting right after the tag name.
/// Returns the attributes, the self-closing flag and the index just past `>`.
fn scan_attributes(input: &str, mut k: usize, atoms: &mut AtomTable) -> (Attributes, bool, usize) {
    let bytes = input.as_bytes();
    let len = bytes.len();
    let mut attributes = Vec::new();
    let mut self_closing = false;

    let skip_whitespace = |k: &mut usize| {
        while *k < len && bytes[*k].is_ascii_whitespace() {
            *k += 1;
        }
    };

    loop {
        skip_whitespace(&mut k);
        if k >= len {
            break;
        }
        if bytes[k] == b'>' {
            k += 1;
            break;
        }
        if bytes[k] == b'/' {
            if k + 1 < len && bytes[k + 1] == b'>' {
                self_closing = true;
                k += 2;
                break;
            }
            k += 1;
            continue;
        }
        let name_start = k;
        while k < len && is_name_char(bytes[k]) {
            k += 1;
        }
        if name_start == k {
            k += 1;
            continue;
        }
        let attribute_name = atoms.intern_ascii_lowercase(&input[name_start..k]);

        skip_whitespace(&mut k);
        let value = if k < len && bytes[k] == b'=' {
            k += 1;
            skip_whitespace(&mut k);
            if k < len && (bytes[k] == b'"' || bytes[k] == b'\'') {
                let quote = bytes[k];
                k += 1;
                let vstart = k;
                k = memchr(quote, &bytes[k..]).map_or(len, |rel| k + rel);
                let raw = &input[vstart..k];
                if k < len {
                    k += 1;
                }
                Some(decode_entities(raw))
            } else {
                let vstart = k;
                while k < len && !bytes[k].is_ascii_whitespace() && bytes[k] != b'>' {
                    if bytes[k] == b'/' && k + 1 < len && bytes[k + 1] == b'>' {
                        break;
                    }
                    k += 1;
                }
                Some(decode_entities(&input[vstart..k]))
            }
        } else {
            None
        };
        attributes.push((attribute_name, value));
    }
    (attributes, self_closing, k)
}
