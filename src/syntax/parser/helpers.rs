//! Lexical helpers shared by the parsers: trivia skipping, keywords,
//! identifiers and punctuation.

use crate::syntax::ast::Identifier;
use nom::branch::alt;
use nom::bytes::complete::{tag, take_until};
use nom::character::complete::{alpha1, alphanumeric0, alphanumeric1, multispace1, not_line_ending};
use nom::combinator::{map, not, recognize, value, verify};
use nom::multi::many0;
use nom::sequence::{pair, preceded, tuple};
use nom::IResult;

pub type PResult<'a, O> = IResult<&'a str, O>;

/// Reserved words; identifiers never collide with these.
pub const KEYWORDS: &[&str] = &[
    "and", "boolean", "class", "do", "else", "extends", "false", "if", "integer", "new", "none",
    "not", "or", "print", "return", "true", "while",
];

fn line_comment(input: &str) -> PResult<'_, ()> {
    value((), pair(tag("//"), not_line_ending))(input)
}

fn block_comment(input: &str) -> PResult<'_, ()> {
    value((), tuple((tag("/*"), take_until("*/"), tag("*/"))))(input)
}

/// Skip whitespace and comments. Always succeeds.
pub fn skip_trivia(input: &str) -> PResult<'_, ()> {
    value((), many0(alt((value((), multispace1), line_comment, block_comment))))(input)
}

/// Run `inner` after skipping leading trivia.
pub fn padded<'a, O, F>(inner: F) -> impl FnMut(&'a str) -> PResult<'a, O>
where
    F: FnMut(&'a str) -> PResult<'a, O>,
{
    preceded(skip_trivia, inner)
}

/// Match a punctuation token, trivia-insensitive.
pub fn symbol<'a>(token: &'static str) -> impl FnMut(&'a str) -> PResult<'a, &'a str> {
    padded(tag(token))
}

/// Match a reserved word, refusing to match a longer identifier that merely
/// starts with it (`doit` is not `do`).
pub fn keyword<'a>(word: &'static str) -> impl FnMut(&'a str) -> PResult<'a, &'a str> {
    padded(nom::sequence::terminated(tag(word), not(alphanumeric1)))
}

/// A Minnow identifier: a letter followed by letters or digits. Underscores
/// are not part of the lexicon, which keeps `Class_Method` labels unambiguous.
pub fn identifier(input: &str) -> PResult<'_, Identifier> {
    map(
        padded(verify(recognize(pair(alpha1, alphanumeric0)), |s: &str| {
            !KEYWORDS.contains(&s)
        })),
        Identifier::new,
    )(input)
}
