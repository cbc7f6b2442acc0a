use std::collections::HashMap;
use crate::{
    error::{Error, Result},
    token::Token,
    value::Value,
};

/// The single global scope. Bindings live as long as the owning interpreter.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Environment {
    values: HashMap<String, Value>,
}

impl Environment {
    pub(crate) fn new() -> Self {
        Self { values: HashMap::new() }
    }

    pub(crate) fn get(&self, name: &Token) -> Result<Value> {
        self.values.get(&name.lexeme)
            .cloned()
            .ok_or_else(|| undefined_var_error(name))
    }

    pub(crate) fn assign(&mut self, name: &Token, value: &Value) -> Result<()> {
        self.values.get_mut(&name.lexeme)
            .map(|v| *v = value.clone())
            .ok_or_else(|| undefined_var_error(name))
    }

    /// Redefining an existing name overwrites the old binding.
    pub(crate) fn define<S: Into<String>>(&mut self, name: S, value: Value) {
        self.values.insert(name.into(), value);
    }
}

fn undefined_var_error(name: &Token) -> Error {
    Error::runtime(
        name.clone(),
        format!("Undefined variable '{}'.", name.lexeme)
    )
}
