//! This module is responsible for the grammar of the language: which text makes
//! up which node. Productions are functions that build a `Parser<Ast>`; the
//! building blocks come from `crate::parser`, and the nodes from `crate::build`.

use crate::ast::Ast;
use crate::build;
use crate::parser::*;

// --- Noise ---

pub fn line_comment() -> Parser<()> {
    keyword("--").then(line()).with_name("LineComment")
}

pub fn doc_comment() -> Parser<()> {
    chain([keyword("{-|"), until_including("-}")]).with_name("DocComment")
}

/// Does not nest.
pub fn block_comment() -> Parser<()> {
    chain([keyword("{-"), until_literal("-}"), keyword("-}")]).with_name("BlockComment")
}

fn comment() -> Parser<()> {
    Parser::one_of([doc_comment(), block_comment(), line_comment()])
}

/// `name : type`, with the lines nested under it.
fn annotation_extent() -> Parser<()> {
    chain([
        line_start(),
        token(),
        space_optional(),
        keyword(":"),
        space_required(),
        line(),
    ])
    .only_if(parse_block())
    .with_name("AnnotationExtent")
}

/// What an expression may be surrounded by without it meaning anything.
fn noise() -> Parser<()> {
    Parser::one_of([
        space_required(),
        comment(),
        keyword_block("module"),
        keyword_block("import"),
        annotation_extent(),
    ])
}

pub fn skip_noise() -> Parser<()> {
    noise().repeat().map(|_| ()).with_name("Noise")
}

// --- Module header, imports, types ---

/// `module Main exposing (main, Msg(..))`. `exposing (..)` gives the single
/// item `..`, which stands for everything.
pub fn module_header() -> Parser<Ast> {
    let item = grab(token().then(keyword("(..)").optional().map(|_| ())));
    let separator = chain([space_optional(), keyword(","), space_optional()]);
    sequence([
        skip(keyword("module")),
        skip(space_required()),
        grab(token()),
        skip(space_required()),
        skip(keyword("exposing")),
        skip(space_optional()),
        skip(keyword("(")),
        skip(space_optional()),
        item.separated_by(separator).map(Ast::List),
        skip(space_optional()),
        skip(keyword(")")),
    ])
    .transform(build::module)
    .with_name("Module")
}

pub fn import() -> Parser<Ast> {
    two_pass(
        keyword_block("import"),
        sequence([
            skip(keyword("import")),
            skip(space_required()),
            grab(token()),
            grab(until_end()),
        ]),
    )
    .transform(build::import)
    .with_name("Import")
}

pub fn annotation() -> Parser<Ast> {
    two_pass(annotation_extent(), grab(until_end()))
        .transform(build::annotation)
        .with_name("Annotation")
}

/// `type` or `type alias`. The first line is the head, and the lines nested
/// under it are the body.
pub fn type_decl() -> Parser<Ast> {
    two_pass(
        keyword_block("type"),
        sequence([
            skip(keyword("type")),
            skip(space_optional()),
            grab(line()),
            skip(space_optional()),
            grab(until_end()),
        ]),
    )
    .transform(build::type_decl)
    .with_name("TypeDecl")
}

// --- Definitions ---

/// A definition head, which must end its line with `=`.
pub fn def() -> Parser<Ast> {
    let param = sequence([
        grab(Parser::one_of([token(), paren_group()])),
        skip(space_optional()),
    ]);
    let head = sequence([grab(token()), skip(space_optional()), zero_or_more(param)]);
    sequence([
        two_pass(until_line_ends_with("="), head).transform(build::def),
        skip(keyword("=")),
        skip(line()),
        skip(space_optional()),
    ])
    .with_name("Def")
}

pub fn binding() -> Parser<Ast> {
    sequence([
        def(),
        skip(space_optional()),
        indented(nested_expr()),
        skip(space_optional()),
    ])
    .transform(build::binding)
    .with_name("Binding")
}

/// Once `let` has matched, its bindings must be there.
pub fn let_expr() -> Parser<Ast> {
    let bindings = one_or_more(sequence([skip(skip_noise()), binding()])).expect("let bindings");
    sequence([sub_block("let", bindings), sub_block("in", nested_expr())])
        .transform(build::let_in)
        .with_name("Let")
}

// --- If and case ---

pub fn if_expr() -> Parser<Ast> {
    let else_if = sequence([
        skip(space_optional()),
        skip(keyword("else")),
        skip(space_required()),
        Parser::lazy("If", if_expr),
    ]);
    let else_branch = Parser::one_of([else_if, sub_block("else", nested_expr())]);
    sequence([
        skip(keyword("if")),
        skip(space_required()),
        two_pass(until_keyword("then"), nested_expr()),
        skip(keyword("then")),
        two_pass(until_balanced("if", "else"), nested_expr()),
        else_branch,
    ])
    .transform(build::if_then_else)
    .with_name("If")
}

/// `content` over the text up to `kw`, where `kw` ends the line. Then the rest
/// of that line.
fn up_to_line_ending(kw: &'static str, content: Parser<Ast>) -> Parser<Ast> {
    sequence([
        two_pass(until_line_ends_with(kw), content),
        skip(keyword(kw)),
        skip(line()),
    ])
}

/// `case subject of`
pub fn case_of() -> Parser<Ast> {
    sequence([
        skip(keyword("case")),
        up_to_line_ending("of", grab(until_end())),
    ])
    .transform(build::case_of)
    .with_name("CaseOf")
}

/// `pattern ->`
pub fn pattern_def() -> Parser<Ast> {
    up_to_line_ending("->", grab(until_end()))
        .transform(build::pattern_def)
        .with_name("PatternDef")
}

pub fn one_case() -> Parser<Ast> {
    sequence([
        skip(skip_noise()),
        pattern_def(),
        skip(space_optional()),
        indented(nested_expr()),
    ])
    .transform(build::one_case)
    .with_name("OneCase")
}

pub fn case_expr() -> Parser<Ast> {
    sequence([
        case_of(),
        skip(space_optional()),
        indented(one_or_more(one_case())),
    ])
    .transform(build::case)
    .with_name("Case")
}

// --- Simple expressions ---

/// Parentheses around the whole expression.
pub fn tuple() -> Parser<Ast> {
    sequence([
        skip(keyword("(")),
        grab(until_char(')')),
        skip(keyword(")")),
        skip(space_optional()),
        skip(eof()),
    ])
    .transform(build::tuple)
    .with_name("Tuple")
}

/// Tokens and parenthesized groups, making up the whole expression.
pub fn call() -> Parser<Ast> {
    let argument = sequence([
        skip(space_optional()),
        grab(Parser::one_of([token(), paren_group()])),
    ]);
    sequence([one_or_more(argument), skip(space_optional()), skip(eof())])
        .transform(build::call)
        .with_name("Call")
}

pub fn unparsed() -> Parser<Ast> {
    grab(until_end())
        .transform(build::unparsed)
        .with_name("UnParsed")
}

// --- Entry points ---

/// An expression is parsed on its own: its extent was decided by whoever
/// delimited it, so the productions may assume they see all of it.
pub fn expr() -> Parser<Ast> {
    sequence([
        skip(skip_noise()),
        Parser::one_of([
            let_expr(),
            if_expr(),
            case_expr(),
            tuple(),
            call(),
            unparsed(),
        ]),
    ])
    .with_name("Expr")
}

fn nested_expr() -> Parser<Ast> {
    Parser::lazy("Expr", expr)
}

/// A top-level statement, or whitespace and comments as `Ast::Ignore`.
pub fn top_level_item() -> Parser<Ast> {
    Parser::one_of([
        skip(Parser::one_of([space_required(), comment()])),
        module_header(),
        skip(keyword_block("module")),
        import(),
        annotation(),
        type_decl(),
        binding(),
    ])
    .with_name("TopLevelItem")
}

/// A statement no production understood: its line and the block nested under
/// it, or only the rest of the line when it does not start one.
pub fn statement() -> Parser<Ast> {
    let block = grab(parse_block());
    let rest_of_line = grab(line());
    Parser::from_fn("Statement", move |cursor| {
        if cursor.at_line_start() {
            block.parse(cursor)
        } else {
            rest_of_line.parse(cursor)
        }
    })
    .transform(build::unparsed)
}
