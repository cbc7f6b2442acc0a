use std::result;
use std::fmt::{self, Display};
use std::io::{self, Write};

use crate::token::{Token, TokenKind};

pub type Result<T> = result::Result<T, Error>;

#[derive(Debug)]
#[non_exhaustive]
pub enum ErrorKind {
    Lexical { line: usize },
    Syntactic { token: Token },
    Runtime { token: Token },
    Unexpected,
    Io(io::Error),
}

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: String,
}

impl Error {
    pub fn lexical<S: Into<String>>(line: usize, message: S) -> Error {
        let kind = ErrorKind::Lexical { line };
        Error { kind, message: message.into() }
    }

    pub fn syntactic<S: Into<String>>(token: Token, message: S) -> Error {
        let kind = ErrorKind::Syntactic { token };
        Error { kind, message: message.into() }
    }

    pub fn runtime<S: Into<String>>(token: Token, message: S) -> Error {
        let kind = ErrorKind::Runtime { token };
        Error { kind, message: message.into() }
    }

    pub fn unexpected() -> Error {
        let kind = ErrorKind::Unexpected;
        Error { kind, message: "Unexpected end of input.".into() }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    pub fn is_runtime_error(&self) -> bool {
        match self.kind() {
            ErrorKind::Runtime { .. } => true,
            _ => false,
        }
    }

    pub fn line(&self) -> usize {
        use ErrorKind::*;
        match self.kind() {
            Unexpected | Io(_) => 0,
            Lexical { line } => *line,
            Syntactic { token } | Runtime { token } => token.line,
        }
    }

    /// Hands this error to a diagnostic sink. Runtime errors go through
    /// `Reporter::runtime_error`, everything else through `Reporter::error`.
    pub fn report<R: Reporter + ?Sized>(&self, reporter: &mut R) -> io::Result<()> {
        if self.is_runtime_error() {
            reporter.runtime_error(self.line(), self.message())
        } else {
            reporter.error(self.line(), self.loc().as_str(), self.message())
        }
    }

    fn loc(&self) -> String {
        match self.kind() {
            ErrorKind::Syntactic { token } => {
                if token.kind == TokenKind::EndOfFile {
                    " at end".to_string()
                } else {
                    format!(" at '{}'", token.lexeme)
                }
            },
            _ => "".to_string(),
        }
    }
}

impl std::error::Error for Error {}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_runtime_error() {
            write!(f, "[line {}] Runtime error: {}", self.line(), self.message)
        } else {
            write!(f, "[line {}] Error{}: {}", self.line(), self.loc(), self.message)
        }
    }
}

impl From<Error> for io::Error {
    fn from(e: Error) -> io::Error {
        use io::ErrorKind::*;
        io::Error::new(Other, e)
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Error {
        Error { kind: ErrorKind::Io(e), message: "IO error".into() }
    }
}

/// Diagnostic sink supplied by whoever drives the pipeline.
///
/// `location` is either empty, `" at end"` or `" at '<lexeme>'"`.
pub trait Reporter {
    fn error(&mut self, line: usize, location: &str, message: &str) -> io::Result<()>;
    fn runtime_error(&mut self, line: usize, message: &str) -> io::Result<()>;
}

/// Writes one line per diagnostic, in the same format as `Error`'s `Display`.
pub struct WriteReporter<W> {
    out: W,
}

impl <W: Write> WriteReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl <W: Write> Reporter for WriteReporter<W> {
    fn error(&mut self, line: usize, location: &str, message: &str) -> io::Result<()> {
        writeln!(self.out, "[line {}] Error{}: {}", line, location, message)
    }

    fn runtime_error(&mut self, line: usize, message: &str) -> io::Result<()> {
        writeln!(self.out, "[line {}] Runtime error: {}", line, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report_to_string(e: &Error) -> io::Result<String> {
        let mut reporter = WriteReporter::new(Vec::new());
        e.report(&mut reporter)?;
        Ok(String::from_utf8_lossy(&reporter.into_inner()).into_owned())
    }

    #[test]
    fn syntax_error_names_the_offending_lexeme() -> io::Result<()> {
        let e = Error::syntactic(Token::new(TokenKind::Semicolon, ";", 3), "Expect expression.");
        assert_eq!("[line 3] Error at ';': Expect expression.\n", report_to_string(&e)?);
        assert_eq!("[line 3] Error at ';': Expect expression.", e.to_string());
        Ok(())
    }

    #[test]
    fn syntax_error_at_eof_says_at_end() -> io::Result<()> {
        let e = Error::syntactic(Token::new(TokenKind::EndOfFile, "", 7), "Expect ';' after value.");
        assert_eq!("[line 7] Error at end: Expect ';' after value.\n", report_to_string(&e)?);
        Ok(())
    }

    #[test]
    fn lexical_error_has_no_location() -> io::Result<()> {
        let e = Error::lexical(2, "Unterminated string.");
        assert_eq!("[line 2] Error: Unterminated string.\n", report_to_string(&e)?);
        Ok(())
    }

    #[test]
    fn runtime_error_goes_to_the_runtime_channel() -> io::Result<()> {
        let e = Error::runtime(Token::new(TokenKind::Slash, "/", 4), "Division by Zero.");
        assert!(e.is_runtime_error());
        assert_eq!("[line 4] Runtime error: Division by Zero.\n", report_to_string(&e)?);
        Ok(())
    }
}
