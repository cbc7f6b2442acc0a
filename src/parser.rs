use std::iter::Peekable;

use crate::{
    error::{Error, Result},
    expr::*,
    stmt::{self, Stmt},
    token::*,
    value::Value,
};

const EQUALITY_TOKENS: &[&TokenKind] = &[
    &TokenKind::BangEqual,
    &TokenKind::EqualEqual,
];

const COMPARISON_TOKENS: &[&TokenKind] = &[
    &TokenKind::Greater,
    &TokenKind::GreaterEqual,
    &TokenKind::Less,
    &TokenKind::LessEqual,
];

const TERM_TOKENS: &[&TokenKind] = &[
    &TokenKind::Minus,
    &TokenKind::Plus,
];

const FACTOR_TOKENS: &[&TokenKind] = &[
    &TokenKind::Star,
    &TokenKind::Slash,
];

const UNARY_TOKENS: &[&TokenKind] = &[
    &TokenKind::Bang,
    &TokenKind::Minus,
];

pub struct Parser<T> {
    tokens: T,
    // Errors that were reported but did not abort the current declaration.
    reported: Vec<Error>,
}

impl <T: Iterator<Item = Token>> Parser<Peekable<T>> {
    pub fn new(tokens: T) -> Self {
        let tokens = tokens.peekable();
        Parser { tokens, reported: Vec::new() }
    }

    /// Parses declarations until end of input. A declaration that fails
    /// contributes only its `Err`; recovered errors are emitted just before
    /// the statement they were found in.
    pub fn parse(&mut self) -> Vec<Result<Stmt>> {
        let mut statements = Vec::new();
        while let Some(statement) = self.declaration() {
            statements.extend(self.reported.drain(..).map(Err));
            statements.push(statement);
        }
        statements
    }

    fn declaration(&mut self) -> Option<Result<Stmt>> {
        if self.is_at_end() { return None }

        let result = if self.match_single(&TokenKind::Var).is_some() {
            self.var_declaration()
        } else {
            self.statement()
        };

        if result.is_err() {
            self.synchronise();
        }

        Some(result)
    }

    fn var_declaration(&mut self) -> Result<Stmt> {
        let name = self.consume(&TokenKind::Identifier, "Expect variable name.")?;
        self.consume(&TokenKind::DoubleColon, "Expect '::' after variable name.")?;
        let annotation = self.consume(&TokenKind::Identifier, "Expect type annotation for variable.")?;

        let initializer = if self.match_single(&TokenKind::Equal).is_some() {
            Some(self.expression()?)
        } else {
            None
        };

        self.consume(&TokenKind::Semicolon, "Expect ';' after variable declaration.")?;
        Ok(stmt::Var { name, annotation, initializer }.into())
    }

    fn statement(&mut self) -> Result<Stmt> {
        if self.match_single(&TokenKind::Print).is_some() {
            self.print_statement()
        } else {
            self.expression_statement()
        }
    }

    fn print_statement(&mut self) -> Result<Stmt> {
        let expression = self.expression()?;
        self.consume(&TokenKind::Semicolon, "Expect ';' after value.")?;
        Ok(stmt::Print { expression }.into())
    }

    fn expression_statement(&mut self) -> Result<Stmt> {
        let expression = self.expression()?;
        self.consume(&TokenKind::Semicolon, "Expect ';' after expression.")?;
        Ok(stmt::Expression { expression }.into())
    }

    fn expression(&mut self) -> Result<Expr> {
        self.assignment()
    }

    fn assignment(&mut self) -> Result<Expr> {
        let expr = self.equality()?;
        if let Some(equals) = self.match_single(&TokenKind::Equal) {
            let value = Box::new(self.assignment()?);
            if let Expr::Variable(target) = expr {
                return Ok(Assign { name: target.name, value }.into())
            }
            // Reported, but the statement carries on with the left-hand side.
            self.reported.push(Error::syntactic(equals, "Invalid assignment target."));
        }
        Ok(expr)
    }

    fn equality(&mut self) -> Result<Expr> {
        self.match_binary_precedence_with_tokens(
            Self::comparison,
            EQUALITY_TOKENS
        )
    }

    fn comparison(&mut self) -> Result<Expr> {
        self.match_binary_precedence_with_tokens(
            Self::term,
            COMPARISON_TOKENS
        )
    }

    fn term(&mut self) -> Result<Expr> {
        self.match_binary_precedence_with_tokens(
            Self::factor,
            TERM_TOKENS
        )
    }

    fn factor(&mut self) -> Result<Expr> {
        self.match_binary_precedence_with_tokens(
            Self::unary,
            FACTOR_TOKENS
        )
    }

    fn unary(&mut self) -> Result<Expr> {
        if let Some(op) = self.match_any(UNARY_TOKENS) {
            let right = Box::new(self.unary()?);
            Ok(Unary { op, right }.into())
        } else {
            self.primary()
        }
    }

    fn primary(&mut self) -> Result<Expr> {
        let kind = self.tokens.peek().ok_or_else(Error::unexpected)?.kind.clone();

        let value = match kind {
            TokenKind::True => Value::Bool(true),
            TokenKind::False => Value::Bool(false),
            TokenKind::Nil => Value::Nil,
            TokenKind::Number(n) => Value::Number(n),
            TokenKind::String(s) => Value::String(s),
            TokenKind::Identifier => {
                let name = self.advance()?;
                return Ok(Variable { name }.into())
            },
            TokenKind::LeftParen => {
                self.advance()?;
                let expression = Box::new(self.expression()?);
                self.consume(&TokenKind::RightParen, "Expect ')' after expression.")?;
                return Ok(Grouping { expression }.into())
            },
            _ => return Err(self.error_at_next("Expect expression.")),
        };

        self.advance()?;
        Ok(Literal { value }.into())
    }

    fn is_at_end(&mut self) -> bool {
        self.tokens.peek()
            .map(|t| t.kind == TokenKind::EndOfFile)
            .unwrap_or(true)
    }

    // Never moves past the end-of-file marker.
    fn advance(&mut self) -> Result<Token> {
        if self.is_at_end() {
            return self.tokens.peek().cloned().ok_or_else(Error::unexpected)
        }
        self.tokens.next().ok_or_else(Error::unexpected)
    }

    fn check_next(&mut self, kind: &TokenKind) -> bool {
        self.tokens.peek()
            .map(|t| &t.kind == kind)
            .unwrap_or(false)
    }

    // The offending token is left in place so that synchronisation sees it.
    fn consume(&mut self, kind: &TokenKind, error_msg: &str) -> Result<Token> {
        if let Some(token) = self.match_single(kind) {
            Ok(token)
        } else {
            Err(self.error_at_next(error_msg))
        }
    }

    fn error_at_next(&mut self, message: &str) -> Error {
        match self.tokens.peek() {
            Some(t) => Error::syntactic(t.clone(), message),
            None => Error::unexpected(),
        }
    }

    fn match_binary_precedence_with_tokens(
        &mut self,
        parse: impl Fn(&mut Self) -> Result<Expr>,
        kinds: &[&TokenKind]
    ) -> Result<Expr> {
        let mut e = parse(self)?;

        while let Some(op) = self.match_any(kinds) {
            let right = Box::new(parse(self)?);
            e = Binary { left: Box::new(e), op, right }.into()
        }

        Ok(e)
    }

    fn match_single(&mut self, kind: &TokenKind) -> Option<Token> {
        if self.check_next(kind) {
            self.tokens.next()
        } else {
            None
        }
    }

    fn match_any(&mut self, kinds: &[&TokenKind]) -> Option<Token> {
        kinds.iter().find_map(|k| self.match_single(k))
    }

    // Skips to just past a ';' or to a token that can begin a declaration.
    fn synchronise(&mut self) {
        let mut previous = self.advance().ok();

        while !self.is_at_end() {
            if previous.as_ref().map(|t| &t.kind) == Some(&TokenKind::Semicolon) { return }

            use TokenKind::*;
            match self.tokens.peek().map(|t| &t.kind) {
                Some(Class) | Some(Func) | Some(Var)
                | Some(For) | Some(If) | Some(Return) => return,
                _ => {},
            }

            previous = self.advance().ok();
        }
    }
}
