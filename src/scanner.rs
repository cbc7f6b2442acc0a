use crate::{
    error::{Error, Result},
    token::{Token, TokenKind},
};
use peekmore::{PeekMore, PeekMoreIterator};
use phf::phf_map;
use std::{mem, str::Chars};

static KEYWORDS: phf::Map<&'static str, TokenKind> = phf_map! {
    "and" => TokenKind::And,
    "class" => TokenKind::Class,
    "else" => TokenKind::Else,
    "false" => TokenKind::False,
    "for" => TokenKind::For,
    "func" => TokenKind::Func,
    "if" => TokenKind::If,
    "none" => TokenKind::Nil,
    "print" => TokenKind::Print,
    "return" => TokenKind::Return,
    "true" => TokenKind::True,
    "var" => TokenKind::Var,
};

/// Single-pass scanner. Iterating yields every token (or lexical error) in
/// source order, without the trailing end-of-file marker; `scan_tokens`
/// appends it.
pub struct Scanner<'a> {
    src: PeekMoreIterator<Chars<'a>>,
    lexeme_buffer: String,
    line: usize,
}

impl <'a> Iterator for Scanner<'a> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Result<Token>> {
        loop {
            self.src.peek()?;

            let line = self.line;
            let kind = self.next_token_kind();
            let lexeme = mem::take(&mut self.lexeme_buffer);

            if let Some(kind) = kind {
                return Some(kind.map(|kind| Token { kind, lexeme, line }));
            }
        }
    }
}

impl <'a> Scanner<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src: src.chars().peekmore(),
            lexeme_buffer: String::new(),
            line: 1,
        }
    }

    pub fn scan_tokens(mut self) -> Vec<Result<Token>> {
        let mut tokens = self.by_ref().collect::<Vec<Result<Token>>>();
        tokens.push(Ok(Token::new(TokenKind::EndOfFile, "", self.line)));
        tokens
    }

    // `None` means the characters consumed produced no token (whitespace,
    // comments).
    fn next_token_kind(&mut self) -> Option<Result<TokenKind>> {
        let next_char = self.src.next()?;
        self.lexeme_buffer.push(next_char);

        use TokenKind::*;
        match next_char {
            '(' => Some(Ok(LeftParen)),
            ')' => Some(Ok(RightParen)),
            '{' => Some(Ok(LeftBrace)),
            '}' => Some(Ok(RightBrace)),
            ',' => Some(Ok(Comma)),
            '.' => Some(Ok(Dot)),
            '-' => Some(Ok(Minus)),
            '+' => Some(Ok(Plus)),
            ';' => Some(Ok(Semicolon)),
            '*' => Some(Ok(Star)),
            '!' => Some(Ok(if self.does_next_match('=') { BangEqual } else { Bang })),
            '=' => Some(Ok(if self.does_next_match('=') { EqualEqual } else { Equal })),
            '<' => Some(Ok(if self.does_next_match('=') { LessEqual } else { Less })),
            '>' => Some(Ok(if self.does_next_match('=') { GreaterEqual } else { Greater })),
            ':' => {
                if self.does_next_match(':') {
                    Some(Ok(DoubleColon))
                } else {
                    Some(Err(Error::lexical(self.line, "Unexpected character ':'.")))
                }
            },
            '/' => {
                if self.does_next_match('/') {
                    self.advance_until_match('\n');
                    None
                } else if self.does_next_match('*') {
                    self.skip_block_comment().err().map(Err)
                } else {
                    Some(Ok(Slash))
                }
            },
            ' ' | '\r' | '\t' => None,
            '\n' => {
                self.line += 1;
                None
            },
            '"' => Some(self.extract_string()),
            c if c.is_ascii_digit() => Some(self.extract_number()),
            c if can_start_identifier(&c) => Some(Ok(self.extract_identifier())),
            c => Some(Err(Error::lexical(self.line, format!("Unexpected character '{}'.", c)))),
        }
    }

    fn does_next_match(&mut self, c: char) -> bool {
        if self.src.peek() == Some(&c) {
            self.src.next();
            self.lexeme_buffer.push(c);
            true
        } else {
            false
        }
    }

    // Block comments nest; the opening `/*` has already been consumed.
    fn skip_block_comment(&mut self) -> Result<()> {
        let start_line = self.line;
        let mut depth = 1;

        while depth > 0 {
            let c = match self.src.next() {
                Some(c) => c,
                None => return Err(Error::lexical(start_line, "Unterminated comment.")),
            };
            let following = self.src.peek().copied();

            match (c, following) {
                ('\n', _) => self.line += 1,
                ('/', Some('*')) => {
                    self.src.next();
                    depth += 1;
                },
                ('*', Some('/')) => {
                    self.src.next();
                    depth -= 1;
                },
                _ => {},
            }
        }

        Ok(())
    }

    fn extract_string(&mut self) -> Result<TokenKind> {
        let start_line = self.line;
        let mut newline_count = 0;
        self.advance_until_match_for_each('"', |c| if c == '\n' { newline_count += 1 });
        self.line += newline_count;
        match self.src.next() {
            None => Err(Error::lexical(start_line, "Unterminated string.")),
            Some(q) => {
                self.lexeme_buffer.push(q);
                Ok(TokenKind::String(self.lexeme_buffer.trim_matches('"').to_string()))
            },
        }
    }

    fn extract_number(&mut self) -> Result<TokenKind> {
        self.advance_until(|n| !n.is_ascii_digit());

        // A trailing '.' is only part of the number when a digit follows it.
        let has_fraction = self.src.peek() == Some(&'.')
            && self.src.peek_nth(1).map_or(false, |c| c.is_ascii_digit());
        if has_fraction {
            self.does_next_match('.');
            self.advance_until(|n| !n.is_ascii_digit());
        }

        match self.lexeme_buffer.parse() {
            Err(_) => Err(Error::lexical(
                self.line,
                format!("Could not convert {} into a number.", self.lexeme_buffer)
            )),
            Ok(number) => Ok(TokenKind::Number(number)),
        }
    }

    fn extract_identifier(&mut self) -> TokenKind {
        self.advance_until(|n| !is_part_of_valid_identifier(n));

        KEYWORDS.get(self.lexeme_buffer.as_str())
            .cloned()
            .unwrap_or(TokenKind::Identifier)
    }

    fn advance_until_match(&mut self, c: char) {
        self.advance_until(|n| n == &c)
    }

    fn advance_until(&mut self, should_stop: impl Fn(&char) -> bool) {
        self.advance_until_for_each(should_stop, |_| {})
    }

    fn advance_until_match_for_each(
        &mut self,
        c: char,
        f: impl FnMut(char)
    ) {
        self.advance_until_for_each(|n| n == &c, f);
    }

    fn advance_until_for_each(
        &mut self,
        should_stop: impl Fn(&char) -> bool,
        mut f: impl FnMut(char)
    ) {
        while let Some(&next) = self.src.peek() {
            if should_stop(&next) { break }
            self.src.next();
            self.lexeme_buffer.push(next);
            f(next);
        }
    }
}

fn can_start_identifier(c: &char) -> bool {
    c.is_ascii_alphabetic() || c == &'_'
}

fn is_part_of_valid_identifier(c: &char) -> bool {
    can_start_identifier(c) || c.is_ascii_digit()
}
