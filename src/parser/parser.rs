use super::cursor::Cursor;
use crate::ast::Ast;

use std::rc::Rc;
use thiserror::Error;

/// How much of the remaining text an error shows.
pub const WINDOW: usize = 50;

/// Errors that abort the whole parse. Not matching is not an error: parsers
/// report it with `Ok(None)`, and whoever called them tries something else.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("indentation was probed at offset {offset}, which is whitespace or the end of the text")]
    ProbeOnWhitespace { offset: usize },
    #[error("indentation was probed at offset {offset}, but {found:?} comes before it on the same line")]
    ProbeMidLine { offset: usize, found: char },
    #[error("expected {what} at offset {offset}, found {found:?}")]
    Expected {
        what: &'static str,
        offset: usize,
        found: String,
    },
    #[error("cannot build a {node} node out of {captured}")]
    Shape { node: &'static str, captured: String },
    #[error("[{line}:{column}] parsing stopped before the end of the input, at {window:?}")]
    Incomplete {
        line: usize,
        column: usize,
        window: String,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The outcome of running a parser. On a match, contains the cursor after the
/// match and the produced value.
pub type Parsed<'source, T> = Result<Option<(Cursor<'source>, T)>>;

type ParseFn<T> = dyn for<'source> Fn(Cursor<'source>) -> Parsed<'source, T>;

pub struct Parser<T> {
    name: String,
    parse: Rc<ParseFn<T>>,
}

// How a parser is used

impl<T> Parser<T> {
    pub fn parse<'source>(&self, cursor: Cursor<'source>) -> Parsed<'source, T> {
        (self.parse)(cursor)
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<T> Clone for Parser<T> {
    fn clone(&self) -> Self {
        Parser {
            name: self.name.clone(),
            parse: Rc::clone(&self.parse),
        }
    }
}

impl<T> std::fmt::Debug for Parser<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Parser").field("name", &self.name).finish()
    }
}

// Basic constructors

impl<T: 'static> Parser<T> {
    pub fn from_fn<Func>(name: impl Into<String>, func: Func) -> Self
    where
        Func: for<'source> Fn(Cursor<'source>) -> Parsed<'source, T> + 'static,
    {
        Parser {
            name: name.into(),
            parse: Rc::new(func),
        }
    }

    pub fn ret(value: T) -> Self
    where
        T: Clone,
    {
        Parser::from_fn("Ret", move |cursor| Ok(Some((cursor, value.clone()))))
    }

    pub fn fail() -> Self {
        Parser::from_fn("Fail", |_| Ok(None))
    }

    /// Builds the parser only when it runs. This is how productions refer to
    /// themselves.
    pub fn lazy(name: &'static str, build: fn() -> Parser<T>) -> Self {
        Parser::from_fn(format!("Lazy({name})"), move |cursor| {
            build().parse(cursor)
        })
    }

    pub fn with_name(self, name: impl Into<String>) -> Self {
        Parser {
            name: name.into(),
            ..self
        }
    }
}

// Combinators

impl<T: 'static> Parser<T> {
    pub fn map<U: 'static>(self, f: impl Fn(T) -> U + 'static) -> Parser<U> {
        let name = format!("Map({})", self.name);
        Parser::from_fn(name, move |cursor| {
            Ok(self.parse(cursor)?.map(|(end, value)| (end, f(value))))
        })
    }

    /// Like `map`, but the function may reject the value. A rejection is fatal:
    /// the value was produced by our own grammar, so it has the wrong shape only
    /// if the grammar is wired wrong.
    pub fn transform<U: 'static>(self, f: fn(T) -> Result<U>) -> Parser<U> {
        let name = format!("Transform({})", self.name);
        Parser::from_fn(name, move |cursor| {
            only_if!((end, value) = self.parse(cursor));
            Ok(Some((end, f(value)?)))
        })
    }

    /// Runs `self`, drops its value, and continues with `next`.
    pub fn then<U: 'static>(self, next: Parser<U>) -> Parser<U> {
        let name = format!("{} > {}", self.name, next.name);
        Parser::from_fn(name, move |cursor| {
            only_if!((cursor, _) = self.parse(cursor));
            next.parse(cursor)
        })
    }

    pub fn or(self, other: Parser<T>) -> Parser<T> {
        let name = format!("Or({} | {})", self.name, other.name);
        Parser::from_fn(name, move |cursor| match self.parse(cursor)? {
            Some(found) => Ok(Some(found)),
            // Notice that we pass the original cursor.
            None => other.parse(cursor),
        })
    }

    /// Tries the parsers strictly in order, each from the same cursor, and
    /// returns the first match. Order is priority: list specific grammars before
    /// general ones.
    pub fn one_of(parsers: impl IntoIterator<Item = Parser<T>>) -> Parser<T> {
        let mut ret = Parser::fail();
        let mut names = vec![];
        for parser in parsers {
            names.push(parser.name.clone());
            ret = ret.or(parser);
        }
        let name = format!("OneOf({})", names.join(" | "));
        ret.with_name(name)
    }

    pub fn optional(self) -> Parser<Option<T>> {
        let name = format!("Optional({})", self.name);
        Parser::from_fn(name, move |cursor| {
            Ok(Some(match self.parse(cursor)? {
                Some((end, value)) => (end, Some(value)),
                None => (cursor, None),
            }))
        })
    }

    /// Zero or more matches. Never consumes the attempt that failed.
    pub fn repeat(self) -> Parser<Vec<T>> {
        let name = format!("Repeat({})", self.name);
        Parser::from_fn(name, move |mut cursor| {
            let mut values = vec![];
            while let Some((next, value)) = self.parse(cursor)? {
                // A match that does not move would match forever.
                if next.offset == cursor.offset {
                    break;
                }
                values.push(value);
                cursor = next;
            }
            Ok(Some((cursor, values)))
        })
    }

    /// Like `repeat`, but also stops when `stop` is ahead.
    pub fn repeat_until(self, stop: impl Into<Rc<str>>) -> Parser<Vec<T>> {
        let stop: Rc<str> = stop.into();
        let name = format!("RepeatUntil({}, {stop})", self.name);
        let step = Parser::from_fn(self.name.clone(), move |cursor| {
            if cursor.peek(&stop) {
                return Ok(None);
            }
            self.parse(cursor)
        });
        step.repeat().with_name(name)
    }

    pub fn repeat_1(self) -> Parser<Vec<T>> {
        let name = format!("Repeat1({})", self.name);
        let repeat = self.repeat();
        Parser::from_fn(name, move |cursor| {
            Ok(repeat
                .parse(cursor)?
                .filter(|(_, values)| !values.is_empty()))
        })
    }

    /// One or more items, with `separator` between every two.
    pub fn separated_by(self, separator: Parser<()>) -> Parser<Vec<T>> {
        let name = format!("SeparatedBy({}, {})", self.name, separator.name);
        let rest = separator.then(self.clone()).repeat();
        Parser::from_fn(name, move |cursor| {
            only_if!((cursor, first) = self.parse(cursor));
            only_if!((cursor, mut more) = rest.parse(cursor));
            more.insert(0, first);
            Ok(Some((cursor, more)))
        })
    }

    /// Matches like `self` but does not consume anything.
    pub fn lookahead(self) -> Parser<T> {
        let name = format!("Lookahead({})", self.name);
        Parser::from_fn(name, move |cursor| {
            Ok(self.parse(cursor)?.map(|(_, value)| (cursor, value)))
        })
    }

    /// Runs `next` from the original cursor, but only where `self` matches.
    pub fn only_if<U: 'static>(self, next: Parser<U>) -> Parser<U> {
        self.lookahead().then(next)
    }

    /// Turns not matching into a fatal error. Use it where the input has
    /// committed to a production.
    pub fn expect(self, what: &'static str) -> Parser<T> {
        let name = format!("Expect({})", self.name);
        Parser::from_fn(name, move |cursor| match self.parse(cursor)? {
            Some(found) => Ok(Some(found)),
            None => Err(Error::Expected {
                what,
                offset: cursor.offset,
                found: cursor.window(WINDOW).to_string(),
            }),
        })
    }
}

// Scanners and captures

/// Runs scanners one after the other.
pub fn chain(scanners: impl IntoIterator<Item = Parser<()>>) -> Parser<()> {
    scanners
        .into_iter()
        .reduce(Parser::then)
        .unwrap_or_else(|| Parser::ret(()))
}

/// Matches like `scanner`, producing `Ast::Ignore`.
pub fn skip(scanner: Parser<()>) -> Parser<Ast> {
    let name = format!("Skip({})", scanner.name);
    scanner.map(|()| Ast::Ignore).with_name(name)
}

/// Matches like `scanner`, producing the text it went over.
pub fn grab(scanner: Parser<()>) -> Parser<Ast> {
    let name = format!("Grab({})", scanner.name);
    Parser::from_fn(name, move |cursor| {
        only_if!((end, ()) = scanner.parse(cursor));
        Ok(Some((end, Ast::Text(cursor.slice_to(end).into()))))
    })
}

/// Runs the steps in order. Their values are collapsed with `Ast::collapse`.
pub fn sequence(steps: impl IntoIterator<Item = Parser<Ast>>) -> Parser<Ast> {
    let steps: Vec<_> = steps.into_iter().collect();
    let names: Vec<_> = steps.iter().map(|step| step.name.as_str()).collect();
    let name = format!("Seq({})", names.join(", "));
    Parser::from_fn(name, move |mut cursor| {
        let mut values = Vec::with_capacity(steps.len());
        for step in &steps {
            only_if!((next, value) = step.parse(cursor));
            cursor = next;
            values.push(value);
        }
        Ok(Some((cursor, Ast::collapse(values))))
    })
}

pub fn zero_or_more(step: Parser<Ast>) -> Parser<Ast> {
    step.repeat().map(Ast::list)
}

pub fn one_or_more(step: Parser<Ast>) -> Parser<Ast> {
    step.repeat_1().map(Ast::list)
}

/// Delimits a span with `delimiter`, then parses that span on its own, from
/// offset 0, with `content`. The returned cursor is the end of the span, even
/// when `content` stopped earlier.
pub fn two_pass<T: 'static>(delimiter: Parser<()>, content: Parser<T>) -> Parser<T> {
    let name = format!("TwoPass({}, {})", delimiter.name, content.name);
    Parser::from_fn(name, move |cursor| {
        only_if!((end, ()) = delimiter.parse(cursor));
        let block = Cursor::new(cursor.slice_to(end));
        only_if!((_, value) = content.parse(block));
        Ok(Some((end, value)))
    })
}
