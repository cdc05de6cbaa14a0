use super::cursor::Cursor;
use super::parser::{Parser, chain};

/// Makes a scanner out of a function that finds where a match ends.
fn scanner<Func>(name: impl Into<String>, find_end: Func) -> Parser<()>
where
    Func: for<'source> Fn(Cursor<'source>) -> Option<Cursor<'source>> + 'static,
{
    Parser::from_fn(name, move |cursor| {
        Ok(find_end(cursor).map(|end| (end, ())))
    })
}

/// Skips to the first character that does not satisfy `pred`.
fn skip_while(cursor: Cursor, pred: impl Fn(char) -> bool) -> Cursor {
    let rest = cursor.rest();
    let n = rest.find(|c: char| !pred(c)).unwrap_or(rest.len());
    cursor.advance(n)
}

pub fn is_token_char(c: char) -> bool {
    !c.is_whitespace() && !"()[]=,".contains(c)
}

pub fn space_optional() -> Parser<()> {
    scanner("SpaceOptional", |cursor| {
        Some(skip_while(cursor, char::is_whitespace))
    })
}

pub fn space_required() -> Parser<()> {
    scanner("SpaceRequired", |cursor| {
        let end = skip_while(cursor, char::is_whitespace);
        (end.offset > cursor.offset).then_some(end)
    })
}

/// `kw` exactly. See `Cursor::matches_word` for the boundaries required around
/// alphanumeric keywords.
pub fn keyword(kw: &'static str) -> Parser<()> {
    scanner(format!("Keyword({kw})"), move |cursor| {
        cursor.matches_word(kw).then(|| cursor.advance(kw.len()))
    })
}

/// Up to, not including, the next `kw`.
pub fn until_literal(kw: &'static str) -> Parser<()> {
    scanner(format!("UntilLiteral({kw})"), move |cursor| {
        cursor.rest().find(kw).map(|i| cursor.advance(i))
    })
}

/// Up to, not including, the next occurrence of `kw` as a whole word.
pub fn until_keyword(kw: &'static str) -> Parser<()> {
    scanner(format!("UntilKeyword({kw})"), move |cursor| {
        cursor
            .rest()
            .char_indices()
            .map(|(i, _)| cursor.advance(i))
            .find(|here| here.matches_word(kw))
    })
}

/// Up to the next `close` term that does not pair with an `open` term after the
/// cursor. Finds the `else` of an `if` whose branch holds another `if`, also
/// inside parentheses.
pub fn until_balanced(open: &'static str, close: &'static str) -> Parser<()> {
    scanner(format!("UntilBalanced({open}, {close})"), move |cursor| {
        let mut depth = 0usize;
        for (i, _) in cursor.rest().char_indices() {
            let here = cursor.advance(i);
            if here.matches_term(open) {
                depth += 1;
            } else if here.matches_term(close) {
                if depth == 0 {
                    return Some(here);
                }
                depth -= 1;
            }
        }
        None
    })
}

pub fn until_char(c: char) -> Parser<()> {
    scanner(format!("UntilChar({c:?})"), move |cursor| {
        cursor.rest().find(c).map(|i| cursor.advance(i))
    })
}

pub fn until_including(kw: &'static str) -> Parser<()> {
    scanner(format!("UntilIncluding({kw})"), move |cursor| {
        cursor.rest().find(kw).map(|i| cursor.advance(i + kw.len()))
    })
}

/// Matches when the current line, ignoring trailing whitespace, ends with `kw`
/// after some whitespace. Stops right before `kw`.
pub fn until_line_ends_with(kw: &'static str) -> Parser<()> {
    scanner(format!("UntilLineEndsWith({kw})"), move |cursor| {
        let line = cursor.rest_of_line().trim_end();
        let before = line.strip_suffix(kw)?;
        let separated = before.chars().next_back().is_none_or(char::is_whitespace);
        separated.then(|| cursor.advance(before.len()))
    })
}

/// To the end of the line, not including the newline. The end of the text ends
/// a line too, so this never fails.
pub fn line() -> Parser<()> {
    scanner("Line", |cursor| {
        Some(cursor.advance(cursor.rest_of_line().len()))
    })
}

/// Everything that is left.
pub fn until_end() -> Parser<()> {
    scanner("UntilEnd", |cursor| Some(cursor.advance(cursor.rest().len())))
}

/// Matches without consuming when only indentation is before the cursor.
pub fn line_start() -> Parser<()> {
    scanner("LineStart", |cursor| cursor.at_line_start().then_some(cursor))
}

pub fn eof() -> Parser<()> {
    scanner("Eof", |cursor| cursor.is_done().then_some(cursor))
}

pub fn token() -> Parser<()> {
    scanner("Token", |cursor| {
        let end = skip_while(cursor, is_token_char);
        (end.offset > cursor.offset).then_some(end)
    })
}

/// `(`, anything up to the first `)`, and `)`. Does not nest.
pub fn paren_group() -> Parser<()> {
    chain([keyword("("), until_char(')'), keyword(")")]).with_name("ParenGroup")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn end(parser: Parser<()>, text: &str) -> Option<usize> {
        parser
            .parse(Cursor::new(text))
            .unwrap()
            .map(|(end, ())| end.offset)
    }

    #[test]
    fn spaces() {
        assert_eq!(end(space_optional(), "x"), Some(0));
        assert_eq!(end(space_optional(), " \n\tx"), Some(3));
        assert_eq!(end(space_required(), "x"), None);
        assert_eq!(end(space_required(), "  x"), Some(2));
    }

    #[test]
    fn keyword_respects_word_boundaries() {
        assert_eq!(end(keyword("import"), "import Dict"), Some(6));
        assert_eq!(end(keyword("import"), "important"), None);
        assert_eq!(end(keyword("in"), "in"), Some(2));
        assert_eq!(end(keyword("--"), "--comment"), Some(2));
    }

    #[test]
    fn until_scanners() {
        assert_eq!(end(until_literal("-}"), "doc -} x"), Some(4));
        assert_eq!(end(until_literal("-}"), "doc"), None);
        assert_eq!(end(until_including("-}"), "doc -} x"), Some(6));
        assert_eq!(end(until_char(')'), "a, b)"), Some(4));
        assert_eq!(end(until_keyword("then"), "x thenx then"), Some(8));
    }

    #[test]
    fn balanced_skips_nested_pairs() {
        let text = "\n if b then x else y\nelse z";
        assert_eq!(end(until_balanced("if", "else"), text), Some(21));
        assert_eq!(end(until_balanced("if", "else"), " x "), None);
        let grouped = " f (if b then x else y) else z";
        assert_eq!(end(until_balanced("if", "else"), grouped), Some(24));
    }

    #[test]
    fn line_ends_with_keyword() {
        assert_eq!(end(until_line_ends_with("="), "foo x =  \n  1"), Some(6));
        assert_eq!(end(until_line_ends_with("="), "x = 1\ny ="), None);
        assert_eq!(end(until_line_ends_with("of"), "case x of"), Some(7));
        assert_eq!(end(until_line_ends_with("of"), "case proof"), None);
        assert_eq!(end(until_line_ends_with("="), "a =="), None);
    }

    #[test]
    fn line_stops_before_newline() {
        assert_eq!(end(line(), "abc\ndef"), Some(3));
        assert_eq!(end(line(), "abc"), Some(3));
    }

    #[test]
    fn tokens() {
        assert_eq!(end(token(), "foo=1"), Some(3));
        assert_eq!(end(token(), "(x)"), None);
        assert_eq!(end(token(), "a.b c"), Some(3));
        assert_eq!(end(paren_group(), "(a, b) c"), Some(6));
    }

    #[test]
    fn end_of_text() {
        assert_eq!(end(eof(), ""), Some(0));
        assert_eq!(end(eof(), " "), None);
        assert_eq!(end(until_end(), "abc"), Some(3));
    }

    #[test]
    fn line_start_does_not_consume() {
        let at = |text, offset| {
            line_start()
                .parse(Cursor::at(text, offset))
                .unwrap()
                .map(|(end, ())| end.offset)
        };
        assert_eq!(at("  x", 2), Some(2));
        assert_eq!(at("a x", 2), None);
    }
}
