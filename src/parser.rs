//! This module is responsible for declaring the parser type, and ways to create
//! parsers. This modules does not include the grammar for the language. This is
//! just a library for creating parsers.

mod cursor;
mod layout;
#[allow(clippy::module_inception)]
mod parser;
mod primitives;

pub use cursor::Cursor;
pub use layout::*;
pub use parser::*;
pub use primitives::*;
