use crate::{
    token::Token,
    value::Value,
};

generate_ast!(
    Expr,
    [
        Assign   => { name: Token, value: Box<Expr> };
        Binary   => { left: Box<Expr>, op: Token, right: Box<Expr> };
        Grouping => { expression: Box<Expr> };
        Literal  => { value: Value };
        Unary    => { op: Token, right: Box<Expr> };
        Variable => { name: Token };
    ]
);
