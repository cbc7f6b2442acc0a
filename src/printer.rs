use crate::{
    expr::Expr,
    stmt::Stmt,
};

/// Renders a program one statement per line.
pub fn print_program(statements: &[Stmt]) -> String {
    statements.iter()
        .map(print_stmt)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn print_stmt(s: &Stmt) -> String {
    let mut printer = AstPrinter {};
    printer.stmt(s)
}

pub fn print_expr(e: &Expr) -> String {
    let mut printer = AstPrinter {};
    printer.expr(e)
}

struct AstPrinter;

impl AstPrinter {
    fn parenthesize(&mut self, name: &str, exprs: &[&Expr]) -> String {
        let mut s = String::new();
        s.push('(');
        s.push_str(name);

        for e in exprs.iter() {
            s.push(' ');
            s.push_str(self.expr(e).as_str());
        }

        s.push(')');
        s
    }

    fn stmt(&mut self, s: &Stmt) -> String {
        match s {
            Stmt::Expression(s) => format!("{};", self.expr(&s.expression)),
            Stmt::Print(s) => self.parenthesize("print", &[&s.expression]),
            Stmt::Var(s) => {
                let head = format!("var {} :: {}", s.name.lexeme, s.annotation.lexeme);
                match &s.initializer {
                    Some(init) => self.parenthesize(head.as_str(), &[init]),
                    None => self.parenthesize(head.as_str(), &[]),
                }
            },
        }
    }

    fn expr(&mut self, e: &Expr) -> String {
        match e {
            Expr::Assign(e) => {
                let name = format!("= {}", e.name.lexeme);
                self.parenthesize(name.as_str(), &[e.value.as_ref()])
            },
            Expr::Binary(e) => self.parenthesize(
                e.op.lexeme.as_str(),
                &[e.left.as_ref(), e.right.as_ref()]
            ),
            Expr::Grouping(e) => self.parenthesize(
                "group",
                &[e.expression.as_ref()]
            ),
            Expr::Literal(e) => e.value.to_string(),
            Expr::Unary(e) => self.parenthesize(
                e.op.lexeme.as_str(),
                &[e.right.as_ref()]
            ),
            Expr::Variable(e) => e.name.lexeme.clone(),
        }
    }
}
