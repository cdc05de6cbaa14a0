//! Turns the values a production captured into the node it stands for. Each
//! function checks the shape it is given; a wrong shape means the grammar is
//! wired wrong, and is reported as `Error::Shape`.

use crate::ast::{Ast, Binding, Def, OneCase};
use crate::parser::{Error, Result};
use std::rc::Rc;

fn mismatch(node: &'static str, captured: &Ast) -> Error {
    Error::Shape {
        node,
        captured: format!("{captured:?}"),
    }
}

/// The `N` values of a sequence that captured `N` things.
fn parts<const N: usize>(node: &'static str, captured: Ast) -> Result<[Ast; N]> {
    match captured {
        Ast::List(values) => {
            <[Ast; N]>::try_from(values).map_err(|values| mismatch(node, &Ast::List(values)))
        }
        other => Err(mismatch(node, &other)),
    }
}

fn text(node: &'static str, captured: Ast) -> Result<Rc<str>> {
    match captured {
        Ast::Text(text) => Ok(text),
        other => Err(mismatch(node, &other)),
    }
}

fn trimmed(node: &'static str, captured: Ast) -> Result<Rc<str>> {
    let text = text(node, captured)?;
    Ok(text.trim().into())
}

fn texts(node: &'static str, captured: Ast) -> Result<Vec<Rc<str>>> {
    match captured {
        Ast::List(values) => values.into_iter().map(|value| text(node, value)).collect(),
        other => Err(mismatch(node, &other)),
    }
}

/// Strips every line and drops the blank ones.
fn normalize_block(body: &str) -> Rc<str> {
    body.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
        .into()
}

pub fn module(captured: Ast) -> Result<Ast> {
    let [name, exposing] = parts("Module", captured)?;
    Ok(Ast::Module {
        name: text("Module", name)?,
        exposing: texts("Module", exposing)?,
    })
}

pub fn import(captured: Ast) -> Result<Ast> {
    let [module, clause] = parts("Import", captured)?;
    Ok(Ast::Import {
        module: trimmed("Import", module)?,
        clause: trimmed("Import", clause)?,
    })
}

pub fn type_decl(captured: Ast) -> Result<Ast> {
    let [head, body] = parts("TypeDecl", captured)?;
    Ok(Ast::TypeDecl {
        head: trimmed("TypeDecl", head)?,
        body: normalize_block(&text("TypeDecl", body)?),
    })
}

pub fn annotation(captured: Ast) -> Result<Ast> {
    Ok(Ast::Annotation(trimmed("Annotation", captured)?))
}

pub fn def(captured: Ast) -> Result<Ast> {
    let [name, params] = parts("Def", captured)?;
    Ok(Def {
        name: text("Def", name)?,
        params: texts("Def", params)?,
    }
    .into())
}

fn as_binding(captured: Ast) -> Result<Binding> {
    let [def, body] = parts("Binding", captured)?;
    match def {
        Ast::Def(def) => Ok(Binding {
            def,
            body: Box::new(body),
        }),
        other => Err(mismatch("Binding", &other)),
    }
}

pub fn binding(captured: Ast) -> Result<Ast> {
    Ok(as_binding(captured)?.into())
}

pub fn let_in(captured: Ast) -> Result<Ast> {
    let [bindings, body] = parts("Let", captured)?;
    let Ast::List(bindings) = bindings else {
        return Err(mismatch("Let", &bindings));
    };
    let bindings = bindings
        .into_iter()
        .map(|binding| match binding {
            Ast::Binding(binding) => Ok(binding),
            other => Err(mismatch("Let", &other)),
        })
        .collect::<Result<_>>()?;
    Ok(Ast::Let {
        bindings,
        body: Box::new(body),
    })
}

pub fn if_then_else(captured: Ast) -> Result<Ast> {
    let [cond, then, otherwise] = parts("If", captured)?;
    Ok(Ast::If(Box::new((cond, then, otherwise))))
}

pub fn case_of(captured: Ast) -> Result<Ast> {
    Ok(Ast::CaseOf {
        subject: trimmed("CaseOf", captured)?,
    })
}

pub fn pattern_def(captured: Ast) -> Result<Ast> {
    Ok(Ast::PatternDef {
        text: trimmed("PatternDef", captured)?,
    })
}

pub fn one_case(captured: Ast) -> Result<Ast> {
    let [pattern, body] = parts("OneCase", captured)?;
    let Ast::PatternDef { text: pattern } = pattern else {
        return Err(mismatch("OneCase", &pattern));
    };
    Ok(OneCase {
        pattern,
        body: Box::new(body),
    }
    .into())
}

pub fn case(captured: Ast) -> Result<Ast> {
    let [case_of, arms] = parts("Case", captured)?;
    let Ast::CaseOf { subject } = case_of else {
        return Err(mismatch("Case", &case_of));
    };
    let Ast::List(arms) = arms else {
        return Err(mismatch("Case", &arms));
    };
    let arms = arms
        .into_iter()
        .map(|arm| match arm {
            Ast::OneCase(arm) => Ok(arm),
            other => Err(mismatch("Case", &other)),
        })
        .collect::<Result<_>>()?;
    Ok(Ast::Case { subject, arms })
}

pub fn tuple(captured: Ast) -> Result<Ast> {
    Ok(Ast::Tuple {
        text: trimmed("Tuple", captured)?,
    })
}

pub fn call(captured: Ast) -> Result<Ast> {
    Ok(Ast::Call {
        tokens: texts("Call", captured)?,
    })
}

pub fn unparsed(captured: Ast) -> Result<Ast> {
    Ok(Ast::UnParsed {
        text: trimmed("UnParsed", captured)?,
    })
}
