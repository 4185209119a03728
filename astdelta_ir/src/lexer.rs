use crate::{Loc, ParseError, Span};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenKind {
    Ident,
    Number,
    Str,
    Punct,
}

#[derive(Debug, Clone)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub text: String,
    /// Cooked contents for string tokens, with quotes and escapes resolved.
    pub value: Option<String>,
    pub span: Span,
    pub loc: Loc,
}

#[derive(Debug)]
pub(crate) struct LexOutput {
    pub tokens: Vec<Token>,
    pub end_loc: Loc,
}

pub(crate) fn tokenize(source: &str) -> Result<LexOutput, ParseError> {
    Lexer::new(source).run()
}

struct Lexer<'a> {
    src: &'a str,
    chars: Vec<(usize, char)>,
    idx: usize,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            chars: src.char_indices().collect(),
            idx: 0,
            line: 1,
            column: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.idx).map(|&(_, c)| c)
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.idx + offset).map(|&(_, c)| c)
    }

    fn byte_pos(&self) -> usize {
        self.chars
            .get(self.idx)
            .map_or(self.src.len(), |&(byte, _)| byte)
    }

    fn loc(&self) -> Loc {
        Loc {
            line: self.line,
            column: self.column,
        }
    }

    fn bump(&mut self) -> Option<char> {
        let &(_, c) = self.chars.get(self.idx)?;
        self.idx += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn error_at(&self, loc: Loc, message: impl Into<String>) -> ParseError {
        ParseError {
            line: loc.line,
            column: loc.column,
            message: message.into(),
        }
    }

    fn run(mut self) -> Result<LexOutput, ParseError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_trivia()?;
            let Some(c) = self.peek() else {
                break;
            };

            let start = self.byte_pos();
            let loc = self.loc();

            if is_ident_start(c) {
                while self.peek().is_some_and(is_ident_continue) {
                    self.bump();
                }
                tokens.push(self.token(TokenKind::Ident, start, loc, None));
            } else if c.is_ascii_digit() {
                while self
                    .peek()
                    .is_some_and(|c| c.is_ascii_alphanumeric() || c == '.')
                {
                    self.bump();
                }
                tokens.push(self.token(TokenKind::Number, start, loc, None));
            } else if c == '"' || c == '\'' || c == '`' {
                let value = self.scan_string(c, loc)?;
                tokens.push(self.token(TokenKind::Str, start, loc, Some(value)));
            } else {
                self.scan_punct(c, loc)?;
                tokens.push(self.token(TokenKind::Punct, start, loc, None));
            }
        }

        Ok(LexOutput {
            tokens,
            end_loc: self.loc(),
        })
    }

    fn token(&self, kind: TokenKind, start: usize, loc: Loc, value: Option<String>) -> Token {
        let end = self.byte_pos();
        Token {
            kind,
            text: self.src[start..end].to_string(),
            value,
            span: Span { start, end },
            loc,
        }
    }

    fn skip_trivia(&mut self) -> Result<(), ParseError> {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.bump();
                }
                Some('/') if self.peek_at(1) == Some('/') => {
                    while self.peek().is_some_and(|c| c != '\n') {
                        self.bump();
                    }
                }
                Some('/') if self.peek_at(1) == Some('*') => {
                    let loc = self.loc();
                    self.bump();
                    self.bump();
                    loop {
                        match self.peek() {
                            Some('*') if self.peek_at(1) == Some('/') => {
                                self.bump();
                                self.bump();
                                break;
                            }
                            Some(_) => {
                                self.bump();
                            }
                            None => return Err(self.error_at(loc, "unterminated block comment")),
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn scan_string(&mut self, quote: char, loc: Loc) -> Result<String, ParseError> {
        self.bump();
        let mut value = String::new();

        loop {
            match self.peek() {
                None => return Err(self.error_at(loc, "unterminated string literal")),
                Some('\n') if quote != '`' => {
                    return Err(self.error_at(loc, "unterminated string literal"));
                }
                Some(c) if c == quote => {
                    self.bump();
                    return Ok(value);
                }
                Some('\\') => {
                    self.bump();
                    let Some(escaped) = self.bump() else {
                        return Err(self.error_at(loc, "unterminated string literal"));
                    };
                    value.push(match escaped {
                        'n' => '\n',
                        't' => '\t',
                        'r' => '\r',
                        other => other,
                    });
                }
                Some(c) => {
                    value.push(c);
                    self.bump();
                }
            }
        }
    }

    fn scan_punct(&mut self, c: char, loc: Loc) -> Result<(), ParseError> {
        const THREE: [&str; 3] = ["===", "!==", "..."];
        const TWO: [&str; 14] = [
            "=>", "==", "!=", "<=", ">=", "&&", "||", "++", "--", "+=", "-=", "*=", "/=", "**",
        ];
        const SINGLE: &str = "(){}[];,.<>=+-*/%!&|?:^~";

        let lookahead3: String = [self.peek(), self.peek_at(1), self.peek_at(2)]
            .into_iter()
            .flatten()
            .collect();
        if THREE.contains(&lookahead3.as_str()) {
            self.bump();
            self.bump();
            self.bump();
            return Ok(());
        }

        let lookahead2: String = [self.peek(), self.peek_at(1)].into_iter().flatten().collect();
        if TWO.contains(&lookahead2.as_str()) {
            self.bump();
            self.bump();
            return Ok(());
        }

        if SINGLE.contains(c) {
            self.bump();
            return Ok(());
        }

        Err(self.error_at(loc, format!("unexpected character `{c}`")))
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}
