//! Parses source text of an Elm-like language, where indentation decides what
//! belongs to what, into a list of top-level nodes.

/// `only_if!(pattern = parser.parse(cursor))` binds the match, or returns
/// `Ok(None)` from the enclosing function when there is none.
macro_rules! only_if {
    ($p:pat = $e:expr) => {
        let Some($p) = $e? else {
            return Ok(None);
        };
    };
}

/// Defines the Abstract Syntax Tree.
pub mod ast;
mod build;
/// Parsing whole documents.
pub mod driver;
pub mod grammar;
pub mod parser;

#[cfg(test)]
mod tests;

pub use driver::{Document, Options, parse, parse_with};

// Re-export
pub mod prelude {
    use super::*;
    pub use ast::{Ast, Binding, Def, OneCase};
    pub use driver::{Document, Options, parse, parse_with};
    pub use parser::{Cursor, Error, Parser};
}
