//! Parsing a whole document: top-level items, one after the other.

use crate::ast::Ast;
use crate::grammar;
use crate::parser::{Cursor, Error, Result, WINDOW};
use std::rc::Rc;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Options {
    /// Stop before this text, when it is where the next item would start.
    pub stop_marker: Option<Rc<str>>,
    /// Keep going past statements nothing understands, as `Ast::UnParsed`.
    pub recover: bool,
    /// Fail with `Error::Incomplete` instead of returning a partial document.
    pub require_complete: bool,
}

impl Options {
    pub fn stop_at(self, marker: &str) -> Self {
        Options {
            stop_marker: Some(marker.into()),
            ..self
        }
    }

    pub fn recovering(self) -> Self {
        Options {
            recover: true,
            ..self
        }
    }

    pub fn complete(self) -> Self {
        Options {
            require_complete: true,
            ..self
        }
    }
}

/// The top-level nodes, and where parsing stopped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document<'source> {
    pub nodes: Vec<Ast>,
    pub end: Cursor<'source>,
}

impl<'source> Document<'source> {
    pub fn is_complete(&self) -> bool {
        self.end.is_done()
    }

    /// The text that was not parsed.
    pub fn rest(&self) -> &'source str {
        self.end.rest()
    }

    pub fn check(self) -> Result<Self> {
        if self.is_complete() {
            return Ok(self);
        }
        Err(Error::Incomplete {
            line: self.end.line(),
            column: self.end.column(),
            window: self.end.window(WINDOW).to_string(),
        })
    }
}

pub fn parse(text: &str) -> Result<Document<'_>> {
    parse_with(text, &Options::default())
}

pub fn parse_with<'source>(text: &'source str, options: &Options) -> Result<Document<'source>> {
    let item = if options.recover {
        grammar::top_level_item().or(grammar::statement())
    } else {
        grammar::top_level_item()
    };
    let items = match &options.stop_marker {
        Some(marker) => item.repeat_until(Rc::clone(marker)),
        None => item.repeat(),
    };
    let start = Cursor::new(text);
    let (end, found) = items.parse(start)?.unwrap_or((start, vec![]));
    let nodes = found.into_iter().filter(|node| !node.is_ignore()).collect();
    let document = Document { nodes, end };
    if options.require_complete {
        document.check()
    } else {
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn empty_document() {
        let document = parse("").unwrap();
        assert!(document.nodes.is_empty());
        assert!(document.is_complete());
    }

    #[test]
    fn only_comments() {
        let document = parse("-- a\n{- b -}\n\n{-| c -}\n").unwrap();
        assert!(document.nodes.is_empty());
        assert!(document.is_complete());
    }

    #[test]
    fn stops_at_the_marker() {
        let text = indoc! {"
            import Dict
            STOP
            import Set
        "};
        let document = parse_with(text, &Options::default().stop_at("STOP")).unwrap();
        assert_eq!(document.nodes.len(), 1);
        assert_eq!(document.rest(), "STOP\nimport Set\n");
    }

    #[test]
    fn marker_inside_an_item_does_not_stop() {
        let text = "import Dict\n    STOP\nimport Set\n";
        let document = parse_with(text, &Options::default().stop_at("STOP")).unwrap();
        assert_eq!(document.nodes.len(), 2);
        assert!(document.is_complete());
    }

    #[test]
    fn stops_where_nothing_matches() {
        let text = "x = 5\ny =\n    6\n";
        let document = parse(text).unwrap();
        assert!(document.nodes.is_empty());
        assert_eq!(document.end.offset, 0);
        assert!(!document.is_complete());
    }

    #[test]
    fn recovers_past_unknown_statements() {
        let text = "x = 5\ny =\n    6\n";
        let document = parse_with(text, &Options::default().recovering()).unwrap();
        assert_eq!(document.nodes.len(), 2);
        assert_eq!(
            document.nodes[0],
            Ast::UnParsed {
                text: "x = 5".into()
            }
        );
        assert!(matches!(document.nodes[1], Ast::Binding(_)));
        assert!(document.is_complete());
    }

    #[test]
    fn incomplete_reports_where_it_stopped() {
        let text = "import Dict\nx = 5\n";
        let err = parse_with(text, &Options::default().complete()).unwrap_err();
        assert_eq!(
            err,
            Error::Incomplete {
                line: 2,
                column: 1,
                window: "x = 5\n".to_string(),
            }
        );
        assert_eq!(
            err.to_string(),
            "[2:1] parsing stopped before the end of the input, at \"x = 5\\n\""
        );
    }
}
