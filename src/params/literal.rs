//! Textual literal decoding.
//!
//! Query strings can only carry text, so list-valued parameters arrive as
//! strings such as `[1.0, 2.5]`, `('smithed', 'reconstructed')` or `42`.
//! This module parses that small literal grammar into a [`Literal`] tree.

use std::str::FromStr;

use nom::{
    branch::alt,
    bytes::complete::take_while,
    character::complete::{char, multispace0},
    combinator::{all_consuming, map, opt, verify},
    error::{make_error, ErrorKind},
    multi::separated_list0,
    number::complete::double,
    sequence::{delimited, preceded},
    IResult, Parser,
};

use crate::error::{Result, SpiceqlError};

/// A decoded literal value
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Integer or float, always held as f64
    Number(f64),
    /// Single- or double-quoted string
    Str(String),
    /// List or tuple
    List(Vec<Literal>),
}

impl Literal {
    /// Parse a complete literal, allowing surrounding whitespace.
    pub fn parse(text: &str) -> Result<Literal> {
        match all_consuming(delimited(multispace0, literal, multispace0)).parse(text) {
            Ok((_, lit)) => Ok(lit),
            Err(_) => Err(SpiceqlError::malformed(format!(
                "Could not parse {:?} as a literal value",
                text
            ))),
        }
    }
}

impl FromStr for Literal {
    type Err = SpiceqlError;

    fn from_str(s: &str) -> Result<Self> {
        Literal::parse(s)
    }
}

fn literal(input: &str) -> IResult<&str, Literal> {
    alt((list, tuple_literal, quoted, number)).parse(input)
}

/// `nan` and `inf` are not literals.
fn number(input: &str) -> IResult<&str, Literal> {
    map(verify(double, |v: &f64| v.is_finite()), Literal::Number).parse(input)
}

fn quoted(input: &str) -> IResult<&str, Literal> {
    let single = delimited(char('\''), take_while(|c: char| c != '\''), char('\''));
    let double_quoted = delimited(char('"'), take_while(|c: char| c != '"'), char('"'));
    map(alt((single, double_quoted)), |s: &str| {
        Literal::Str(s.to_string())
    })
    .parse(input)
}

/// Comma separated items with optional trailing comma. Returns the items and
/// whether a trailing comma was present.
fn items(input: &str) -> IResult<&str, (Vec<Literal>, bool)> {
    let (input, _) = multispace0(input)?;
    let (input, values) =
        separated_list0(delimited(multispace0, char(','), multispace0), literal).parse(input)?;
    let (input, trailing) = opt(preceded(multispace0, char(','))).parse(input)?;
    let (input, _) = multispace0(input)?;
    Ok((input, (values, trailing.is_some())))
}

fn list(input: &str) -> IResult<&str, Literal> {
    let (rest, (values, trailing)) = delimited(char('['), items, char(']')).parse(input)?;
    if values.is_empty() && trailing {
        return Err(nom::Err::Error(make_error(input, ErrorKind::Verify)));
    }
    Ok((rest, Literal::List(values)))
}

fn tuple_literal(input: &str) -> IResult<&str, Literal> {
    let (rest, (mut values, trailing)) = delimited(char('('), items, char(')')).parse(input)?;
    match (values.len(), trailing) {
        (0, true) => Err(nom::Err::Error(make_error(input, ErrorKind::Verify))),
        // `(x)` is just a parenthesised value
        (1, false) => Ok((rest, values.remove(0))),
        _ => Ok((rest, Literal::List(values))),
    }
}
