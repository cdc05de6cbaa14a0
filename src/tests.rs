use crate::grammar::expr;
use crate::prelude::*;
use indoc::indoc;

fn tokens(tokens: &[&str]) -> Ast {
    Ast::Call {
        tokens: tokens.iter().map(|&token| token.into()).collect(),
    }
}

fn parse_expr(text: &str) -> Ast {
    let (_, ast) = expr().parse(Cursor::new(text)).unwrap().unwrap();
    ast
}

#[test]
fn binding_covers_the_whole_input() {
    let text = "x =\n    5";
    let document = parse(text).unwrap();
    assert_eq!(
        document.nodes,
        vec![Ast::Binding(Binding {
            def: Def {
                name: "x".into(),
                params: vec![],
            },
            body: Box::new(tokens(&["5"])),
        })],
    );
    assert_eq!(document.end.offset, text.len());
}

#[test]
fn if_then_else_on_separate_lines() {
    assert_eq!(
        parse_expr(indoc! {"
            if cond then
                true_val
            else
                false_val
        "}),
        Ast::If(Box::new((
            tokens(&["cond"]),
            tokens(&["true_val"]),
            tokens(&["false_val"]),
        ))),
    );
}

#[test]
fn case_arms_separated_by_a_blank_line() {
    assert_eq!(
        parse_expr(indoc! {"
            case fred of
                foo ->
                    f foo

                bar ->
                    f bar
        "}),
        Ast::Case {
            subject: "fred".into(),
            arms: vec![
                OneCase {
                    pattern: "foo".into(),
                    body: Box::new(tokens(&["f", "foo"])),
                },
                OneCase {
                    pattern: "bar".into(),
                    body: Box::new(tokens(&["f", "bar"])),
                },
            ],
        },
    );
}

#[test]
fn let_in() {
    assert_eq!(
        parse_expr("let\n    foo =\n        one\nin\nfoo"),
        Ast::Let {
            bindings: vec![Binding {
                def: Def {
                    name: "foo".into(),
                    params: vec![],
                },
                body: Box::new(tokens(&["one"])),
            }],
            body: Box::new(tokens(&["foo"])),
        },
    );
}

#[test]
fn type_declaration_body() {
    let document = parse(indoc! {"
        type Value =
            = Int
            | String
    "})
    .unwrap();
    assert_eq!(
        document.nodes,
        vec![Ast::TypeDecl {
            head: "Value =".into(),
            body: "= Int\n| String".into(),
        }],
    );
    assert!(document.is_complete());
}

#[test]
fn type_declaration_without_body() {
    let document = parse("type Foo").unwrap();
    assert_eq!(
        document.nodes,
        vec![Ast::TypeDecl {
            head: "Foo".into(),
            body: "".into(),
        }],
    );
    assert!(document.is_complete());
}

#[test]
fn whole_module() {
    let text = indoc! {"
        module Main exposing (main, Msg(..))

        import Html exposing (div, text)
        import Dict


        {-| The messages.
        -}
        type Msg
            = Increment
            | Decrement


        update : Msg -> Int -> Int
        update msg count =
            case msg of
                Increment ->
                    inc count

                Decrement ->
                    -- going down
                    dec count


        main =
            let
                start =
                    0
            in
            view (update Increment start)
    "};
    let document = parse_with(text, &Options::default().complete()).unwrap();
    let expected = vec![
        Ast::Module {
            name: "Main".into(),
            exposing: vec!["main".into(), "Msg(..)".into()],
        },
        Ast::Import {
            module: "Html".into(),
            clause: "exposing (div, text)".into(),
        },
        Ast::Import {
            module: "Dict".into(),
            clause: "".into(),
        },
        Ast::TypeDecl {
            head: "Msg".into(),
            body: "= Increment\n| Decrement".into(),
        },
        Ast::Annotation("update : Msg -> Int -> Int".into()),
        Ast::Binding(Binding {
            def: Def {
                name: "update".into(),
                params: vec!["msg".into(), "count".into()],
            },
            body: Box::new(Ast::Case {
                subject: "msg".into(),
                arms: vec![
                    OneCase {
                        pattern: "Increment".into(),
                        body: Box::new(tokens(&["inc", "count"])),
                    },
                    OneCase {
                        pattern: "Decrement".into(),
                        body: Box::new(tokens(&["dec", "count"])),
                    },
                ],
            }),
        }),
        Ast::Binding(Binding {
            def: Def {
                name: "main".into(),
                params: vec![],
            },
            body: Box::new(Ast::Let {
                bindings: vec![Binding {
                    def: Def {
                        name: "start".into(),
                        params: vec![],
                    },
                    body: Box::new(tokens(&["0"])),
                }],
                body: Box::new(tokens(&["view", "(update Increment start)"])),
            }),
        }),
    ];
    assert_eq!(document.nodes, expected);
}

#[test]
fn display_is_compact() {
    let document = parse("f x =\n    if a then b else c\n").unwrap();
    assert_eq!(document.nodes[0].to_string(), "f x = if a then b else c");
}
