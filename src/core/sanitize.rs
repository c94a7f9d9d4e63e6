//! Lenient JSON cleanup for VS Code theme files.
//!
//! Theme files are "JSON with comments": they may contain `//` and `/* */`
//! comments and trailing commas before a closing bracket. This module strips
//! those constructs so the result can be handed to `serde_json`. Everything
//! else, including every byte inside string literals, is copied unchanged.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Normal,
    InString,
    InLineComment,
    InBlockComment,
}

/// Strip comments and trailing commas, producing strict JSON.
///
/// The pass is idempotent: feeding the output back in returns it unchanged.
pub fn sanitize_json(input: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(input.len());
    let mut state = State::Normal;
    let mut escaped = false;
    // Set after a trailing comma is dropped; swallows the whitespace run that follows.
    let mut skipping_ws = false;
    let mut i = 0;

    while i < input.len() {
        let b = input[i];
        match state {
            State::InString => {
                out.push(b);
                if escaped {
                    escaped = false;
                } else if b == b'\\' {
                    escaped = true;
                } else if b == b'"' {
                    state = State::Normal;
                }
                i += 1;
            }
            State::InLineComment => {
                if b == b'\n' {
                    // The newline itself is ordinary whitespace.
                    state = State::Normal;
                } else {
                    i += 1;
                }
            }
            State::InBlockComment => {
                if b == b'*' && input.get(i + 1) == Some(&b'/') {
                    state = State::Normal;
                    i += 2;
                } else {
                    i += 1;
                }
            }
            State::Normal => {
                match b {
                    b'"' => {
                        skipping_ws = false;
                        out.push(b);
                        state = State::InString;
                    }
                    b'/' if input.get(i + 1) == Some(&b'/') => {
                        state = State::InLineComment;
                        i += 1;
                    }
                    b'/' if input.get(i + 1) == Some(&b'*') => {
                        state = State::InBlockComment;
                        i += 1;
                    }
                    b',' => {
                        if closes_after(input, i + 1) {
                            skipping_ws = true;
                        } else {
                            skipping_ws = false;
                            out.push(b);
                        }
                    }
                    _ if is_ws(b) => {
                        if !skipping_ws {
                            out.push(b);
                        }
                    }
                    _ => {
                        skipping_ws = false;
                        out.push(b);
                    }
                }
                i += 1;
            }
        }
    }

    out
}

/// Whether the next significant byte from `i` closes an object or array.
///
/// Whitespace, comments and further commas are skipped, so `[1, /* x */ ]`
/// and `[1,,]` both count as trailing.
fn closes_after(input: &[u8], mut i: usize) -> bool {
    while i < input.len() {
        match input[i] {
            b'}' | b']' => return true,
            b',' => i += 1,
            b if is_ws(b) => i += 1,
            b'/' if input.get(i + 1) == Some(&b'/') => {
                match input[i..].iter().position(|&c| c == b'\n') {
                    Some(offset) => i += offset,
                    None => return false,
                }
            }
            b'/' if input.get(i + 1) == Some(&b'*') => {
                match input[i + 2..].windows(2).position(|w| w == b"*/") {
                    Some(offset) => i += offset + 4,
                    None => return false,
                }
            }
            _ => return false,
        }
    }
    false
}

fn is_ws(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}
