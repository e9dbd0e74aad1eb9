//! `Value::Lambda` (spec §3: "either a bound function pointer (name + arg
//! names) or a flat expression (args + body text). Executable against a
//! sub-evaluator"), grounded on the teacher's closure-over-scope pattern
//! in `runtime/execution_context.rs`.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Lambda {
    /// References an already-defined `UserFunction` by name.
    Bound { name: String, arg_names: Vec<String> },
    /// A backtick literal `` `args => expr` `` (spec §4.7), compiled to
    /// its argument names and the unevaluated body text.
    Flat { args: Vec<String>, body: String },
}

impl Lambda {
    pub fn arg_names(&self) -> &[String] {
        match self {
            Lambda::Bound { arg_names, .. } => arg_names,
            Lambda::Flat { args, .. } => args,
        }
    }

    pub fn arity(&self) -> usize {
        self.arg_names().len()
    }
}

impl fmt::Display for Lambda {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lambda::Bound { name, .. } => write!(f, "<lambda {name}>"),
            Lambda::Flat { args, body } => write!(f, "`{} => {}`", args.join(", "), body),
        }
    }
}
