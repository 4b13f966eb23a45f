//! Row lexer
//!
//! Scans one table row left to right and emits the tokens that matter for
//! splitting: backtick runs, pipes, and escaped backslashes. Everything else
//! is skipped. Positions are byte offsets; every token starts and ends on an
//! ASCII character, so they are always valid `str` slice boundaries.

/// Kind of a lexed token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A run of backticks, optionally preceded by a backslash.
    /// `len` counts the backticks only.
    BacktickRun { len: usize, escaped: bool },
    /// A pipe, optionally preceded by a backslash
    Pipe { escaped: bool },
    /// An escaped backslash (`\\`)
    Other,
}

/// A token with its byte range in the row (`end` is exclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
}

impl Token {
    fn new(kind: TokenKind, start: usize, end: usize) -> Self {
        Token { kind, start, end }
    }

    /// Byte offset of the last character of the token
    pub fn last(&self) -> usize {
        self.end - 1
    }
}

/// Tokenize a row
pub fn tokenize(row: &str) -> Vec<Token> {
    let bytes = row.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        match bytes[pos] {
            b'\\' => match bytes.get(pos + 1) {
                Some(b'\\') => {
                    tokens.push(Token::new(TokenKind::Other, pos, pos + 2));
                    pos += 2;
                }
                Some(b'`') => {
                    let len = run_length(bytes, pos + 1, b'`');
                    let end = pos + 1 + len;
                    tokens.push(Token::new(
                        TokenKind::BacktickRun { len, escaped: true },
                        pos,
                        end,
                    ));
                    pos = end;
                }
                Some(b'|') => {
                    tokens.push(Token::new(TokenKind::Pipe { escaped: true }, pos, pos + 2));
                    pos += 2;
                }
                // A lone backslash escapes nothing we care about
                _ => pos += 1,
            },
            b'`' => {
                let len = run_length(bytes, pos, b'`');
                tokens.push(Token::new(
                    TokenKind::BacktickRun {
                        len,
                        escaped: false,
                    },
                    pos,
                    pos + len,
                ));
                pos += len;
            }
            b'|' => {
                tokens.push(Token::new(TokenKind::Pipe { escaped: false }, pos, pos + 1));
                pos += 1;
            }
            _ => pos += 1,
        }
    }

    tokens
}

/// Count consecutive `byte`s starting at `start`
fn run_length(bytes: &[u8], start: usize, byte: u8) -> usize {
    bytes[start..].iter().take_while(|&&b| b == byte).count()
}
