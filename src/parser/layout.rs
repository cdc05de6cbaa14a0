//! The layout rule: which lines belong to a block is decided by how far they
//! are indented, relative to a reference line.

use super::cursor::Cursor;
use super::parser::{Error, Parser, Result, two_pass};
use super::primitives::{keyword, line, line_start, space_optional};

/// Counts the whitespace before `pos`, back to the start of its line. `pos`
/// must be the first non-whitespace character of its line; anything else is a
/// bug in the caller, so it is an error rather than a non-match.
pub fn indent_level(text: &str, pos: usize) -> Result<usize> {
    match text[pos..].chars().next() {
        Some(c) if !c.is_whitespace() => (),
        _ => return Err(Error::ProbeOnWhitespace { offset: pos }),
    }
    let mut level = 0;
    for c in text[..pos].chars().rev() {
        if c == '\n' {
            break;
        }
        if !c.is_whitespace() {
            return Err(Error::ProbeMidLine {
                offset: pos,
                found: c,
            });
        }
        level += 1;
    }
    Ok(level)
}

/// Goes to the next newline, then past blank lines, to the first
/// non-whitespace character of the next line that has one. Or to the end.
pub fn readline(text: &str, pos: usize) -> usize {
    let line_end = text[pos..].find('\n').map_or(text.len(), |i| pos + i);
    text[line_end..]
        .find(|c: char| !c.is_whitespace())
        .map_or(text.len(), |i| line_end + i)
}

/// Goes past the line at `pos`, then past every following line for which
/// `keep_going` holds, given that line's level and `level`.
fn scan_lines(
    text: &str,
    pos: usize,
    level: usize,
    keep_going: fn(usize, usize) -> bool,
) -> Result<usize> {
    let mut pos = readline(text, pos);
    while pos < text.len() && keep_going(indent_level(text, pos)?, level) {
        pos = readline(text, pos);
    }
    Ok(pos)
}

/// Takes the cursor's line, then the lines that `keep_going` accepts against
/// the cursor's level. At the end of the text the span is empty.
fn scan_block<'source>(
    cursor: Cursor<'source>,
    keep_going: fn(usize, usize) -> bool,
) -> Result<Cursor<'source>> {
    if cursor.is_done() {
        return Ok(cursor);
    }
    let level = indent_level(cursor.text, cursor.offset)?;
    let end = scan_lines(cursor.text, cursor.offset, level, keep_going)?;
    Ok(Cursor::at(cursor.text, end))
}

/// The cursor's line and the lines indented further than it: a nested block.
pub fn parse_block() -> Parser<()> {
    Parser::from_fn("Block", |cursor| {
        let end = scan_block(cursor, |line, reference| line > reference)?;
        Ok(Some((end, ())))
    })
}

/// The cursor's line and the lines indented at least as far: a statement that
/// continues over several lines.
pub fn parse_my_level() -> Parser<()> {
    Parser::from_fn("MyLevel", |cursor| {
        let end = scan_block(cursor, |line, reference| line >= reference)?;
        Ok(Some((end, ())))
    })
}

/// From the cursor to the end of its line, then the lines indented further
/// than the line the cursor is on. The cursor may be in the middle of its line.
pub fn rest_of_block() -> Parser<()> {
    Parser::from_fn("RestOfBlock", |cursor| {
        let text = cursor.text;
        let start = cursor.line_start();
        let Some(indent) = Cursor::at(text, start)
            .rest_of_line()
            .find(|c: char| !c.is_whitespace())
        else {
            return Ok(Some((cursor.advance(cursor.rest_of_line().len()), ())));
        };
        let level = indent_level(text, start + indent)?;
        let end = scan_lines(text, cursor.offset, level, |line, reference| line > reference)?;
        Ok(Some((Cursor::at(text, end), ())))
    })
}

/// The cursor's line and the lines indented at least as far, parsed on their
/// own with `content`. The span starts at the beginning of the cursor's line, so
/// every line in it keeps its indentation.
pub fn indented<T: 'static>(content: Parser<T>) -> Parser<T> {
    let name = format!("Indented({})", content.name());
    let delimiter = parse_my_level();
    Parser::from_fn(name, move |cursor| {
        only_if!((end, ()) = delimiter.parse(cursor));
        let block = Cursor::new(&cursor.text[cursor.line_start()..end.offset]);
        only_if!((_, value) = content.parse(block));
        Ok(Some((end, value)))
    })
}

/// `kw`, then the body that belongs to it, parsed on its own with `content`.
///
/// A body starting on the keyword's line runs to the end of that line, and over
/// the lines nested under it. Otherwise the body starts on the next non-blank
/// line and runs over the lines indented at least as far as that one.
pub fn sub_block<T: 'static>(kw: &'static str, content: Parser<T>) -> Parser<T> {
    let name = format!("SubBlock({kw}, {})", content.name());
    let inline = two_pass(rest_of_block(), content.clone());
    let nested = line()
        .then(space_optional())
        .then(indented(content));
    let body = Parser::from_fn(name.clone(), move |cursor| {
        let rest = cursor.rest_of_line().trim();
        if rest.is_empty() || rest.starts_with("--") {
            nested.parse(cursor)
        } else {
            inline.parse(cursor)
        }
    });
    space_optional().then(keyword(kw)).then(body).with_name(name)
}

/// `kw`'s line and the block nested under it. Only matches when `kw` starts its
/// line.
pub fn keyword_block(kw: &'static str) -> Parser<()> {
    line_start()
        .then(keyword(kw))
        .only_if(parse_block())
        .with_name(format!("KeywordBlock({kw})"))
}
