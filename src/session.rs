use std::io::{self, BufRead, Write};

use crate::{
    error::Reporter,
    interpreter::Interpreter,
    parser::Parser,
    scanner::Scanner,
};

pub const PROMPT: &str = ">>> ";

/// How a single `Session::run` ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Success,
    SyntaxError,
    RuntimeError,
}

/// Runs source text through scan, parse and interpret, keeping one
/// interpreter (and so one set of global bindings) for every run.
pub struct Session<Out, R> {
    interpreter: Interpreter<Out>,
    reporter: R,
}

impl <Out: Write, R: Reporter> Session<Out, R> {
    pub fn new(out: Out, reporter: R) -> Self {
        Self {
            interpreter: Interpreter::new(out),
            reporter,
        }
    }

    /// Every scan and parse error in `source` is reported before anything
    /// runs; if there were any, nothing is interpreted.
    pub fn run(&mut self, source: &str) -> io::Result<Outcome> {
        let mut had_error = false;

        let mut tokens = Vec::new();
        for token in Scanner::new(source).scan_tokens() {
            match token {
                Ok(token) => tokens.push(token),
                Err(e) => {
                    had_error = true;
                    e.report(&mut self.reporter)?;
                },
            }
        }

        let mut statements = Vec::new();
        for statement in Parser::new(tokens.into_iter()).parse() {
            match statement {
                Ok(statement) => statements.push(statement),
                Err(e) => {
                    had_error = true;
                    e.report(&mut self.reporter)?;
                },
            }
        }

        if had_error {
            return Ok(Outcome::SyntaxError)
        }

        match self.interpreter.interpret(&statements) {
            Ok(()) => Ok(Outcome::Success),
            Err(e) => {
                e.report(&mut self.reporter)?;
                Ok(Outcome::RuntimeError)
            },
        }
    }

    /// Reads `input` line by line until it is exhausted, running each line
    /// with its terminator stripped. The prompt is written to the same output
    /// as the program. Errors are reported and never end the loop.
    pub fn run_prompt<In: BufRead>(&mut self, mut input: In) -> io::Result<()> {
        let mut buffer = String::new();

        loop {
            let out = self.interpreter.output_mut();
            write!(out, "{}", PROMPT)?;
            out.flush()?;

            buffer.clear();

            let num_bytes = input.read_line(&mut buffer)?;
            if num_bytes == 0 { break };

            self.run(buffer.trim_end_matches(&['\r', '\n'][..]))?;
        }

        Ok(())
    }

    pub fn output(&self) -> &Out {
        self.interpreter.output()
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Collected {
        syntax: Vec<(usize, String)>,
        runtime: Vec<(usize, String)>,
    }

    impl Reporter for Collected {
        fn error(&mut self, line: usize, location: &str, message: &str) -> io::Result<()> {
            self.syntax.push((line, format!("Error{}: {}", location, message)));
            Ok(())
        }

        fn runtime_error(&mut self, line: usize, message: &str) -> io::Result<()> {
            self.runtime.push((line, message.to_string()));
            Ok(())
        }
    }

    fn session() -> Session<Vec<u8>, Collected> {
        Session::new(Vec::new(), Collected::default())
    }

    fn printed(session: &Session<Vec<u8>, Collected>) -> String {
        String::from_utf8_lossy(session.output()).into_owned()
    }

    #[test]
    fn successful_run() -> io::Result<()> {
        let mut s = session();
        assert_eq!(Outcome::Success, s.run("var x :: number = 1; x = x + 1; print x;")?);
        assert_eq!("2\n", printed(&s));
        Ok(())
    }

    #[test]
    fn syntax_errors_suppress_interpretation() -> io::Result<()> {
        let mut s = session();
        assert_eq!(Outcome::SyntaxError, s.run("print 0;\n1 +;\nvar ;\nprint 1;")?);
        assert_eq!("", printed(&s));
        assert_eq!(
            vec![
                (2, "Error at ';': Expect expression.".to_string()),
                (3, "Error at ';': Expect variable name.".to_string()),
            ],
            s.reporter().syntax
        );
        assert!(s.reporter().runtime.is_empty());
        Ok(())
    }

    #[test]
    fn scan_and_parse_errors_are_reported_together() -> io::Result<()> {
        let mut s = session();
        assert_eq!(Outcome::SyntaxError, s.run("print @;\n\"open")?);
        assert_eq!(
            vec![
                (1, "Error: Unexpected character '@'.".to_string()),
                (2, "Error: Unterminated string.".to_string()),
                (1, "Error at ';': Expect expression.".to_string()),
            ],
            s.reporter().syntax
        );
        Ok(())
    }

    #[test]
    fn runtime_error_stops_the_remaining_statements() -> io::Result<()> {
        let mut s = session();
        assert_eq!(Outcome::RuntimeError, s.run("print 1;\nprint y;\nprint 2;")?);
        assert_eq!("1\n", printed(&s));
        assert_eq!(vec![(2, "Undefined variable 'y'.".to_string())], s.reporter().runtime);
        Ok(())
    }

    #[test]
    fn prompt_reports_missing_semicolon_on_the_typed_line() -> io::Result<()> {
        let mut s = session();
        s.run_prompt(&b"print 1\r\nprint 2;\n"[..])?;
        assert_eq!(">>> >>> 2\n>>> ", printed(&s));
        assert_eq!(
            vec![(1, "Error at end: Expect ';' after value.".to_string())],
            s.reporter().syntax
        );
        Ok(())
    }

    #[test]
    fn prompt_keeps_bindings_and_continues_after_errors() -> io::Result<()> {
        let mut s = session();
        s.run_prompt(&b"var n :: number = 4;\nprint m;\nn = n * 2;\nprint n;"[..])?;
        assert_eq!(">>> >>> >>> >>> 8\n>>> ", printed(&s));
        assert_eq!(vec![(1, "Undefined variable 'm'.".to_string())], s.reporter().runtime);
        Ok(())
    }

    #[test]
    fn bindings_persist_between_runs() -> io::Result<()> {
        let mut s = session();
        assert_eq!(Outcome::Success, s.run("var greeting :: string = \"hi\";")?);
        assert_eq!(Outcome::SyntaxError, s.run("print greeting")?);
        assert_eq!(Outcome::Success, s.run("print greeting + \"!\";")?);
        assert_eq!("hi!\n", printed(&s));
        Ok(())
    }
}
