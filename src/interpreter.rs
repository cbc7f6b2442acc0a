use std::io::Write;

use crate::{
    environment::Environment,
    error::{Error, Result},
    expr::{self, Expr},
    stmt::{self, Stmt},
    token::{Token, TokenKind},
    value::Value,
};

/// Divisors closer to zero than this are rejected by `/`.
pub const DIVISION_EPSILON: f64 = 1e-4;

/// Walks statements against one global environment, writing `print` output
/// to `out`. The environment persists across calls to `interpret`.
pub struct Interpreter<W> {
    out: W,
    environment: Environment,
}

impl <W: Write> Interpreter<W> {
    pub fn new(out: W) -> Self {
        Interpreter { out, environment: Environment::new() }
    }

    /// Executes `statements` in order. The first runtime error abandons the
    /// rest of the sequence; bindings made before it are kept.
    pub fn interpret(&mut self, statements: &[Stmt]) -> Result<()> {
        for statement in statements {
            self.execute(statement)?;
        }
        Ok(())
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn output_mut(&mut self) -> &mut W {
        &mut self.out
    }

    fn execute(&mut self, s: &Stmt) -> Result<()> {
        match s {
            Stmt::Expression(s) => self.execute_expression(s),
            Stmt::Print(s) => self.execute_print(s),
            Stmt::Var(s) => self.execute_var(s),
        }
    }

    fn execute_expression(&mut self, s: &stmt::Expression) -> Result<()> {
        self.evaluate(&s.expression)?;
        Ok(())
    }

    fn execute_print(&mut self, s: &stmt::Print) -> Result<()> {
        let value = self.evaluate(&s.expression)?;
        writeln!(self.out, "{}", value)?;
        Ok(())
    }

    fn execute_var(&mut self, s: &stmt::Var) -> Result<()> {
        let value = match &s.initializer {
            Some(e) => self.evaluate(e)?,
            None => Value::Nil,
        };
        self.environment.define(s.name.lexeme.as_str(), value);
        Ok(())
    }

    fn evaluate(&mut self, e: &Expr) -> Result<Value> {
        match e {
            Expr::Assign(e) => self.evaluate_assign(e),
            Expr::Binary(e) => self.evaluate_binary(e),
            Expr::Grouping(e) => self.evaluate(&e.expression),
            Expr::Literal(e) => Ok(e.value.clone()),
            Expr::Unary(e) => self.evaluate_unary(e),
            Expr::Variable(e) => self.environment.get(&e.name),
        }
    }

    fn evaluate_assign(&mut self, e: &expr::Assign) -> Result<Value> {
        let value = self.evaluate(&e.value)?;
        self.environment.assign(&e.name, &value)?;
        Ok(value)
    }

    fn evaluate_binary(&mut self, e: &expr::Binary) -> Result<Value> {
        let left = self.evaluate(e.left.as_ref())?;
        let right = self.evaluate(e.right.as_ref())?;

        use Value::{Number, String, Bool};
        match e.op.kind {
            TokenKind::Minus => compute_if_numbers(&e.op, left, right, |l, r| l - r),
            TokenKind::Plus => match (left, right) {
                (Number(left), Number(right)) => Ok(Number(left + right)),
                (String(mut left), String(right)) => {
                    left.push_str(right.as_str());
                    Ok(String(left))
                },
                _ => Err(Error::runtime(e.op.clone(), "Operands must be two numbers or two strings.")),
            },
            TokenKind::Slash => {
                let (left, right) = number_operands(&e.op, left, right)?;
                if right.abs() < DIVISION_EPSILON {
                    return Err(Error::runtime(e.op.clone(), "Division by Zero."))
                }
                Ok(Number(left / right))
            },
            TokenKind::Star => compute_if_numbers(&e.op, left, right, |l, r| l * r),
            TokenKind::Greater => compute_if_numbers(&e.op, left, right, |l, r| l > r),
            TokenKind::GreaterEqual | TokenKind::Less | TokenKind::LessEqual => Err(Error::runtime(
                e.op.clone(),
                format!("Operator '{}' is not supported.", e.op.lexeme)
            )),
            TokenKind::EqualEqual => Ok(Bool(left.is_equal(&right))),
            TokenKind::BangEqual => Ok(Bool(!left.is_equal(&right))),
            _ => unreachable!("Parser produced a binary expression with operator {:?}", e.op.kind),
        }
    }

    fn evaluate_unary(&mut self, e: &expr::Unary) -> Result<Value> {
        let right = self.evaluate(e.right.as_ref())?;

        use Value::*;
        match (&e.op.kind, right) {
            (TokenKind::Minus, Number(right)) => Ok(Number(-right)),
            (TokenKind::Minus, _) => Err(Error::runtime(e.op.clone(), "Operand must be a number.")),
            (TokenKind::Bang, right) => Ok(Bool(!right.is_truthy())),
            (kind, _) => unreachable!("Parser produced a unary expression with operator {:?}", kind),
        }
    }
}

fn number_operands(op: &Token, left: Value, right: Value) -> Result<(f64, f64)> {
    match (left, right) {
        (Value::Number(left), Value::Number(right)) => Ok((left, right)),
        _ => Err(Error::runtime(op.clone(), "Operands must be numbers.")),
    }
}

fn compute_if_numbers<T: Into<Value>>(
    op: &Token,
    left: Value,
    right: Value,
    f: impl Fn(f64, f64) -> T
) -> Result<Value> {
    let (left, right) = number_operands(op, left, right)?;
    Ok(f(left, right).into())
}
