//! User-defined functions (spec §4.6: "`(name, body: script text, args:
//! ordered names with optional defaults, declaring_scope, modifiers)`"),
//! grounded on the teacher's sub-evaluator spawning pattern in
//! `runtime/execution_context.rs`.

use std::collections::HashMap;

use crate::error::{CantusError, EvaluatorError};
use crate::scope::scope_name::ScopeName;
use crate::scope::var_store::Modifiers;
use crate::values::value_container::ValueContainer;

#[derive(Debug, Clone)]
pub struct ArgSpec {
    pub name: String,
    /// Unevaluated default-value expression text, evaluated lazily in the
    /// declaring scope only when the argument is omitted.
    pub default: Option<String>,
}

impl ArgSpec {
    pub fn required(name: impl Into<String>) -> Self {
        ArgSpec { name: name.into(), default: None }
    }

    pub fn with_default(name: impl Into<String>, default: impl Into<String>) -> Self {
        ArgSpec { name: name.into(), default: Some(default.into()) }
    }
}

#[derive(Debug, Clone)]
pub struct UserFunction {
    pub name: String,
    pub body: String,
    pub args: Vec<ArgSpec>,
    pub declaring_scope: ScopeName,
    pub modifiers: Modifiers,
}

impl UserFunction {
    pub fn new(
        name: String,
        body: String,
        args: Vec<ArgSpec>,
        declaring_scope: ScopeName,
        modifiers: Modifiers,
    ) -> Self {
        UserFunction { name, body, args, declaring_scope, modifiers }
    }

    /// Binds positional then keyword arguments against this function's
    /// parameter list (spec §4.6), evaluating defaults through the
    /// supplied callback only for parameters left unfilled.
    pub fn bind_arguments(
        &self,
        positional: Vec<ValueContainer>,
        keyword: &HashMap<String, ValueContainer>,
        mut eval_default: impl FnMut(&str) -> Result<ValueContainer, CantusError>,
    ) -> Result<Vec<(String, ValueContainer)>, CantusError> {
        if positional.len() > self.args.len() {
            return Err(EvaluatorError::WrongArity { expected: self.args.len(), found: positional.len() }.into());
        }
        let mut bound = Vec::with_capacity(self.args.len());
        let mut positional = positional.into_iter();
        for spec in &self.args {
            let value = if let Some(value) = positional.next() {
                value
            } else if let Some(value) = keyword.get(&spec.name) {
                value.clone()
            } else if let Some(default_text) = &spec.default {
                eval_default(default_text)?
            } else {
                return Err(EvaluatorError::WrongArity { expected: self.args.len(), found: bound.len() }.into());
            };
            bound.push((spec.name.clone(), value));
        }
        Ok(bound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bigdecimal::BigDecimal;
    use crate::values::value::Value;

    fn vc(n: i64) -> ValueContainer {
        ValueContainer::new_value(Value::Number(BigDecimal::from(n)))
    }

    #[test]
    fn binds_positional_then_default() {
        let f = UserFunction::new(
            "add".into(),
            "return a+b".into(),
            vec![ArgSpec::required("a"), ArgSpec::with_default("b", "1")],
            ScopeName::root("cantus"),
            Modifiers::public(),
        );
        let bound = f
            .bind_arguments(vec![vc(5)], &HashMap::new(), |text| {
                assert_eq!(text, "1");
                Ok(vc(1))
            })
            .unwrap();
        assert_eq!(bound.len(), 2);
        assert_eq!(bound[0].0, "a");
        assert_eq!(bound[1].0, "b");
    }

    #[test]
    fn missing_required_argument_is_wrong_arity() {
        let f = UserFunction::new(
            "add".into(),
            "return a+b".into(),
            vec![ArgSpec::required("a"), ArgSpec::required("b")],
            ScopeName::root("cantus"),
            Modifiers::public(),
        );
        let result = f.bind_arguments(vec![vc(1)], &HashMap::new(), |_| unreachable!());
        assert!(result.is_err());
    }
}
