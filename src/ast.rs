use std::rc::Rc;

use derive_more::{Display, From};
use functionality::Mutate;

fn join<T: std::fmt::Display>(items: &[T], sep: &str) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(sep)
}

/// The head of a definition: `update msg model =`
#[derive(Clone, Debug, Display, PartialEq, Eq)]
#[display("{name}{}", params.iter().map(|p| format!(" {p}")).collect::<String>())]
pub struct Def {
    pub name: Rc<str>,
    /// Bare names, or parenthesized groups kept as written: `(a, b)`.
    pub params: Vec<Rc<str>>,
}

#[derive(Clone, Debug, Display, PartialEq, Eq)]
#[display("{def} = {body}")]
pub struct Binding {
    pub def: Def,
    pub body: Box<Ast>,
}

/// One arm of a `case`: `pattern ->` and the body below it.
#[derive(Clone, Debug, Display, PartialEq, Eq)]
#[display("{pattern} -> {body}")]
pub struct OneCase {
    pub pattern: Rc<str>,
    pub body: Box<Ast>,
}

#[derive(Clone, Debug, Display, From, PartialEq, Eq)]
pub enum Ast {
    /// Matched, but means nothing. Sequences drop it.
    #[display("_")]
    Ignore,
    /// Text some scanner went over.
    #[display("{_0:?}")]
    Text(Rc<str>),
    /// The values of several captures, in order. `List(vec![])` is what a
    /// sequence that captured nothing produces.
    #[display("[{}]", join(_0, ", "))]
    List(Vec<Ast>),
    /// `module Main exposing (main, Msg(..))`. `exposing (..)` is the single
    /// item `..`.
    #[display("module {name} exposing ({})", exposing.join(", "))]
    Module {
        name: Rc<str>,
        exposing: Vec<Rc<str>>,
    },
    /// `import Dict exposing (Dict)`. The clause is the rest of the statement.
    #[display("import {module} {clause}")]
    Import { module: Rc<str>, clause: Rc<str> },
    /// The head is the rest of the `type` line. The body is not broken into
    /// constructors.
    #[display("type {head} {body:?}")]
    TypeDecl { head: Rc<str>, body: Rc<str> },
    /// `main : Program () Model Msg`
    #[display("{_0}")]
    Annotation(Rc<str>),
    #[from]
    Def(Def),
    #[from]
    Binding(Binding),
    #[display("let {} in {body}", join(bindings, "; "))]
    Let {
        bindings: Vec<Binding>,
        body: Box<Ast>,
    },
    /// if cond then x else y
    #[display("if {} then {} else {}", _0.0, _0.1, _0.2)]
    If(Box<(Ast, Ast, Ast)>),
    /// `case subject of`, without the arms.
    #[display("case {subject} of")]
    CaseOf { subject: Rc<str> },
    /// Everything before the `->` of an arm.
    #[display("{text} ->")]
    PatternDef { text: Rc<str> },
    #[from]
    OneCase(OneCase),
    #[display("case {subject} of {}", join(arms, "; "))]
    Case { subject: Rc<str>, arms: Vec<OneCase> },
    /// `(a, b)`, with the text inside the parentheses.
    #[display("({text})")]
    Tuple { text: Rc<str> },
    /// `f x (a, b)`
    #[display("{}", tokens.join(" "))]
    Call { tokens: Vec<Rc<str>> },
    /// Text no production understood, kept as it was.
    #[display("unparsed: {text}")]
    UnParsed { text: Rc<str> },
}

impl Ast {
    /// What a sequence of captures produces: the values that are not `Ignore`,
    /// unwrapped when there is exactly one.
    pub fn collapse(values: Vec<Ast>) -> Ast {
        let values = values.mutate(|v| v.retain(|value| !matches!(value, Ast::Ignore)));
        match <[Ast; 1]>::try_from(values) {
            Ok([value]) => value,
            Err(values) => Ast::List(values),
        }
    }

    /// What a repetition produces: always a list, without `Ignore`s.
    pub fn list(values: Vec<Ast>) -> Ast {
        Ast::List(values.mutate(|v| v.retain(|value| !matches!(value, Ast::Ignore))))
    }

    pub fn is_ignore(&self) -> bool {
        matches!(self, Ast::Ignore)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapse() {
        assert_eq!(Ast::collapse(vec![Ast::Ignore, Ast::Ignore]), Ast::List(vec![]));
        assert_eq!(
            Ast::collapse(vec![Ast::Ignore, Ast::Text("x".into())]),
            Ast::Text("x".into())
        );
        assert_eq!(
            Ast::collapse(vec![Ast::List(vec![]), Ast::Ignore]),
            Ast::List(vec![])
        );
    }

    #[test]
    fn display() {
        let binding = Binding {
            def: Def {
                name: "f".into(),
                params: vec!["x".into(), "(a, b)".into()],
            },
            body: Box::new(Ast::Call {
                tokens: vec!["g".into(), "x".into()],
            }),
        };
        assert_eq!(Ast::from(binding).to_string(), "f x (a, b) = g x");
    }
}
