// ============================================================
// LIST LITERAL GRAMMAR
// ============================================================
// Strict parser for bracketed lists of quoted strings, e.g. ['x', "y"].
// Only string literals are accepted; nothing is ever evaluated.

use std::fmt;

/// Why a cell's text is not a list of strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListLiteralError {
    /// Byte offset into the cell text.
    pub offset: usize,
    pub expected: &'static str,
}

impl fmt::Display for ListLiteralError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected {} at byte {}", self.expected, self.offset)
    }
}

impl std::error::Error for ListLiteralError {}

/// Parse `text` as a list-of-strings literal.
///
/// Grammar: `[` (string (`,` string)* `,`?)? `]`, with whitespace allowed
/// between tokens. Strings are single- or double-quoted and accept the
/// usual backslash escapes (`\n`, `\t`, `\xhh`, `\uhhhh`, octal, ...).
pub fn parse_list_literal(text: &str) -> Result<Vec<String>, ListLiteralError> {
    let mut parser = Parser { src: text, pos: 0 };
    let tags = parser.list()?;
    parser.skip_whitespace();
    if parser.pos != text.len() {
        return Err(parser.error("end of input"));
    }
    Ok(tags)
}

/// Render tags as a single-quoted list literal that `parse_list_literal`
/// reads back unchanged.
pub fn render_list_literal(tags: &[String]) -> String {
    let items: Vec<String> = tags.iter().map(|tag| quote(tag)).collect();
    format!("[{}]", items.join(", "))
}

fn quote(tag: &str) -> String {
    let delimiter = if tag.contains('\'') && !tag.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(tag.len() + 2);
    out.push(delimiter);
    for c in tag.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == delimiter => {
                out.push('\\');
                out.push(c);
            }
            c if (c as u32) < 0x20 || c as u32 == 0x7f => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push(delimiter);
    out
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.bump();
        }
    }

    fn error(&self, expected: &'static str) -> ListLiteralError {
        ListLiteralError {
            offset: self.pos,
            expected,
        }
    }

    fn list(&mut self) -> Result<Vec<String>, ListLiteralError> {
        self.skip_whitespace();
        if self.peek() != Some('[') {
            return Err(self.error("'['"));
        }
        self.bump();

        let mut items = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some(']') => {
                    self.bump();
                    return Ok(items);
                }
                Some('\'') | Some('"') => {
                    items.push(self.string()?);
                    self.skip_whitespace();
                    match self.peek() {
                        Some(',') => {
                            self.bump();
                        }
                        Some(']') => {
                            self.bump();
                            return Ok(items);
                        }
                        _ => return Err(self.error("',' or ']'")),
                    }
                }
                _ => return Err(self.error("a quoted string or ']'")),
            }
        }
    }

    fn string(&mut self) -> Result<String, ListLiteralError> {
        let delimiter = match self.bump() {
            Some(c @ ('\'' | '"')) => c,
            _ => return Err(self.error("a quote")),
        };

        let mut value = String::new();
        loop {
            match self.peek() {
                None | Some('\n') | Some('\r') => return Err(self.error("a closing quote")),
                Some(c) if c == delimiter => {
                    self.bump();
                    return Ok(value);
                }
                Some('\\') => {
                    self.bump();
                    self.escape(&mut value)?;
                }
                Some(c) => {
                    self.bump();
                    value.push(c);
                }
            }
        }
    }

    fn escape(&mut self, value: &mut String) -> Result<(), ListLiteralError> {
        let c = match self.bump() {
            Some(c) => c,
            None => return Err(self.error("an escape sequence")),
        };
        match c {
            '\\' | '\'' | '"' => value.push(c),
            'n' => value.push('\n'),
            't' => value.push('\t'),
            'r' => value.push('\r'),
            'a' => value.push('\u{07}'),
            'b' => value.push('\u{08}'),
            'f' => value.push('\u{0c}'),
            'v' => value.push('\u{0b}'),
            // escaped line break joins the two lines
            '\n' => {}
            'x' => value.push(self.hex_char(2)?),
            'u' => value.push(self.hex_char(4)?),
            'U' => value.push(self.hex_char(8)?),
            '0'..='7' => {
                let mut code = c.to_digit(8).unwrap_or(0);
                for _ in 0..2 {
                    match self.peek().and_then(|d| d.to_digit(8)) {
                        Some(d) => {
                            self.bump();
                            code = code * 8 + d;
                        }
                        None => break,
                    }
                }
                match char::from_u32(code) {
                    Some(decoded) => value.push(decoded),
                    None => return Err(self.error("a valid octal escape")),
                }
            }
            other => {
                value.push('\\');
                value.push(other);
            }
        }
        Ok(())
    }

    fn hex_char(&mut self, digits: usize) -> Result<char, ListLiteralError> {
        let mut code = 0u32;
        for _ in 0..digits {
            match self.peek().and_then(|d| d.to_digit(16)) {
                Some(d) => {
                    self.bump();
                    code = code * 16 + d;
                }
                None => return Err(self.error("a hex digit")),
            }
        }
        char::from_u32(code).ok_or_else(|| self.error("a valid unicode code point"))
    }
}
