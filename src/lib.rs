#[macro_use]
mod ast;

mod environment;
pub mod error;
pub mod expr;
pub mod interpreter;
pub mod parser;
pub mod printer;
pub mod scanner;
pub mod session;
pub mod stmt;
pub mod token;
pub mod value;

pub use crate::error::{Error, Reporter, Result, WriteReporter};
pub use crate::session::{Outcome, Session};
