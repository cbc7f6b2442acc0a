use crate::{
    expr::Expr,
    token::Token,
};

// `annotation` is the type name after `::`. It is kept for printing only.
generate_ast!(
    Stmt,
    [
        Expression => { expression: Expr };
        Print      => { expression: Expr };
        Var        => { name: Token, annotation: Token, initializer: Option<Expr> };
    ]
);
