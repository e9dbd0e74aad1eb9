//! `class <name>[(Parent1, Parent2, ...)]:` (spec §4.6), grounded on the
//! teacher's class-registration pattern in `runtime/definitions.rs`.

use std::collections::HashMap;
use std::rc::Rc;

use crate::error::{CantusError, MathError};
use crate::runtime::definitions::user_class::{FieldDecl, UserClass};
use crate::runtime::definitions::user_function::UserFunction;
use crate::scope::var_store::Modifiers;
use crate::statements::block::{render_source, Block};
use crate::statements::exec_code::StatementResult;
use crate::statements::handlers::{function_def, header_body};
use crate::statements::host::StatementHost;
use crate::statements::keyword_table;
use crate::values::core_values::lambda::Lambda;
use crate::values::value_container::ValueContainer;

fn parse_header(header: &str) -> (String, Vec<String>) {
    let header = header.trim();
    match header.find('(') {
        Some(open) => {
            let name = header[..open].trim().to_string();
            let close = header.rfind(')').unwrap_or(header.len());
            let parents = header[open + 1..close]
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
            (name, parents)
        }
        None => (header.to_string(), Vec::new()),
    }
}

/// Peels leading `public`/`private`/`static` keywords off a member header,
/// accumulating modifiers, down to the member's real keyword (`let` or
/// `function`).
fn peel_modifiers(text: &str, modifiers: Modifiers) -> (Modifiers, &str) {
    let Some((def, rest)) = keyword_table::leading_keyword(text) else {
        return (modifiers, text);
    };
    match def.word {
        "public" => peel_modifiers(rest, modifiers),
        "private" => peel_modifiers(rest, modifiers.with_private()),
        "static" => peel_modifiers(rest, modifiers.with_static()),
        _ => (modifiers, text),
    }
}

pub fn exec(header_rest: &str, body: &[Block], host: &mut dyn StatementHost, modifiers: Modifiers) -> Result<StatementResult, CantusError> {
    let (name, parent_names) = parse_header(header_body(header_rest));
    let parents: Vec<Rc<UserClass>> = parent_names
        .iter()
        .map(|p| host.lookup_user_class(p).ok_or_else(|| CantusError::from(MathError::Undefined)))
        .collect::<Result<_, _>>()?;

    let mut fields = Vec::new();
    let mut methods: HashMap<String, Rc<UserFunction>> = HashMap::new();
    let mut constructor: Option<Lambda> = None;

    for member in body {
        let (member_modifiers, rest_text) = peel_modifiers(&member.header.text, Modifiers::public());
        let Some((def, rest)) = keyword_table::leading_keyword(rest_text) else {
            continue;
        };
        match def.word {
            "let" => {
                let text = rest.trim();
                let (field_name, default) = match text.find(":=").or_else(|| text.find('=')) {
                    Some(pos) if text[pos..].starts_with(":=") => (text[..pos].trim(), Some(text[pos + 2..].trim().to_string())),
                    Some(pos) => (text[..pos].trim(), Some(text[pos + 1..].trim().to_string())),
                    None => (text, None),
                };
                fields.push(FieldDecl { name: field_name.to_string(), default, modifiers: member_modifiers });
            }
            "function" => {
                let (method_name, args) = function_def::parse_signature(header_body(rest))?;
                let method_body = render_source(&member.body);
                if method_name == "constructor" {
                    constructor = Some(Lambda::Flat {
                        args: args.into_iter().map(|a| a.name).collect(),
                        body: method_body,
                    });
                } else {
                    let function = UserFunction::new(method_name.clone(), method_body, args, host.current_scope(), member_modifiers);
                    methods.insert(method_name, Rc::new(function));
                }
            }
            _ => {}
        }
    }

    let class = Rc::new(UserClass::new(name, fields, methods, parents, constructor, host.current_scope()));
    host.define_user_class(Rc::clone(&class));
    let _ = modifiers;
    Ok(StatementResult::resume(ValueContainer::new_value(crate::statements::undefined_value())))
}
