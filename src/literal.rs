/*
 * Copyright (c) 2025. Mark Barrett
 * This file is part of Ottl.
 * Ottl is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
 * Ottl is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details.
 * You should have received a copy of the GNU Affero General Public License along with Ottl. If not, see <https://www.gnu.org/licenses/>.
 */
//! Values given on the command line.
//!
//! Each operand is either a literal (`nil`, `true`, `-12`, `3.5`, `0x0ed2`, `"quoted"`,
//! `[1, "a"]`, `{key: 1}`) or a path into the record (`name`, `body`, `attributes["key"]`).
//! Anything else is taken as bare text, unless it starts like a literal that then fails to parse
//! or holds an integer too large for an `i64`.
use nom::branch::alt;
use nom::bytes::complete::{escaped_transform, is_not, tag, take_while1};
use nom::character::complete::{char, hex_digit1, multispace0};
use nom::combinator::{all_consuming, map, map_res, opt, value};
use nom::error::{Error, ErrorKind};
use nom::multi::separated_list0;
use nom::number::complete::recognize_float;
use nom::sequence::{delimited, preceded, separated_pair};
use nom::IResult;
use ottl_core::context::TransformContext;
use ottl_core::err;
use ottl_core::error::{OttlError, OttlResult};
use ottl_core::getter::{GetterRef, Literal, Path};
use ottl_core::value::Value;
use std::sync::Arc;

/// Prefixes that commit an operand to being a literal.
const STRICT_PREFIXES: [&str; 4] = ["\"", "[", "{", "0x"];

#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Literal(Value),
    Path(Path),
}

impl Operand {
    pub fn into_getter(self) -> GetterRef<TransformContext> {
        match self {
            Operand::Literal(v) => Arc::new(Literal(v)),
            Operand::Path(p) => Arc::new(p),
        }
    }

    pub fn into_literal(self) -> Option<Value> {
        if let Operand::Literal(v) = self { Some(v) } else { None }
    }
}

pub fn parse_operand(input: &str) -> OttlResult<Operand> {
    let strict = STRICT_PREFIXES.iter().any(|p| input.trim_start().starts_with(p));
    match all_consuming(ws(operand))(input) {
        Ok((_, operand)) => Ok(operand),
        Err(nom::Err::Failure(e)) => Err(invalid_value(input, e)),
        Err(nom::Err::Error(e)) if strict => Err(invalid_value(input, e)),
        Err(_) => Ok(Operand::Literal(Value::from(input))),
    }
}

fn invalid_value(input: &str, e: Error<&str>) -> OttlError {
    err!("Invalid value '{}': {:?} at '{}'", input, e.code, e.input)
}

/// Parses an operand that must be a literal, such as an attribute value.
pub fn parse_literal(input: &str) -> OttlResult<Value> {
    parse_operand(input)?
        .into_literal()
        .ok_or_else(|| err!("Expected a literal value but found the path '{}'", input.trim()))
}

fn ws<'a, O, F>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    delimited(multispace0, inner, multispace0)
}

fn operand(input: &str) -> IResult<&str, Operand> {
    alt((map(path, Operand::Path), map(literal, Operand::Literal)))(input)
}

fn path(input: &str) -> IResult<&str, Path> {
    alt((
        value(Path::Name, tag("name")),
        value(Path::Body, tag("body")),
        map(delimited(tag("attributes["), ws(quoted), char(']')), |key| Path::Attribute(key.into())),
    ))(input)
}

fn literal(input: &str) -> IResult<&str, Value> {
    alt((
        value(Value::Nil, tag("nil")),
        value(Value::Bool(true), tag("true")),
        value(Value::Bool(false), tag("false")),
        bytes,
        number,
        map(quoted, Value::from),
        list,
        map_literal,
    ))(input)
}

fn quoted(input: &str) -> IResult<&str, String> {
    let escape = alt((
        value("\\", tag("\\")),
        value("\"", tag("\"")),
        value("\n", tag("n")),
        value("\t", tag("t")),
    ));
    delimited(
        char('"'),
        map(opt(escaped_transform(is_not("\\\""), '\\', escape)), Option::unwrap_or_default),
        char('"'),
    )(input)
}

fn bytes(input: &str) -> IResult<&str, Value> {
    map_res(preceded(tag("0x"), hex_digit1), |digits: &str| hex::decode(digits).map(Value::Bytes))(
        input,
    )
}

/// Integers must fit in an `i64`. Out of range digits fail outright rather than falling back
/// to bare text.
fn number(input: &str) -> IResult<&str, Value> {
    let (rest, digits) = recognize_float(input)?;
    if digits.contains(['.', 'e', 'E']) {
        return match digits.parse::<f64>() {
            Ok(f) => Ok((rest, Value::Float(f))),
            Err(_) => Err(nom::Err::Error(Error::new(input, ErrorKind::Float))),
        };
    }
    match digits.parse::<i64>() {
        Ok(i) => Ok((rest, Value::Int(i))),
        Err(_) => Err(nom::Err::Failure(Error::new(input, ErrorKind::TooLarge))),
    }
}

fn list(input: &str) -> IResult<&str, Value> {
    map(delimited(char('['), separated_list0(char(','), ws(literal)), ws(char(']'))), Value::List)(
        input,
    )
}

fn map_literal(input: &str) -> IResult<&str, Value> {
    let key = alt((
        quoted,
        map(take_while1(|c: char| c.is_alphanumeric() || "_.-".contains(c)), String::from),
    ));
    let entry = separated_pair(ws(key), char(':'), ws(literal));
    map(delimited(char('{'), separated_list0(char(','), entry), ws(char('}'))), Value::map)(input)
}

#[cfg(test)]
mod tests {
    use crate::literal::{Operand, parse_literal, parse_operand};
    use ottl_core::getter::Path;
    use ottl_core::value::Value;

    fn lit(s: &str) -> Value {
        parse_literal(s).unwrap()
    }

    #[test]
    #[allow(clippy::approx_constant)]
    fn test_scalars() {
        assert_eq!(lit("nil"), Value::Nil);
        assert_eq!(lit("true"), Value::Bool(true));
        assert_eq!(lit("false"), Value::Bool(false));
        assert_eq!(lit("1"), Value::Int(1));
        assert_eq!(lit("-42"), Value::Int(-42));
        assert_eq!(lit("3.14159"), Value::Float(3.14159));
        assert_eq!(lit("1e3"), Value::Float(1000.0));
        assert_eq!(lit("0x0ed2"), Value::Bytes(vec![0x0e, 0xd2]));
        assert_eq!(lit(" 7 "), Value::Int(7));
        assert_eq!(lit("9223372036854775807"), Value::Int(i64::MAX));
        assert_eq!(lit("-9223372036854775808"), Value::Int(i64::MIN));

        let err = parse_operand("99999999999999999999").err().unwrap();
        assert!(err.to_string().starts_with("Invalid value '99999999999999999999'"));
        assert!(parse_operand("[1, 99999999999999999999]").is_err());
    }

    #[test]
    fn test_strings() {
        assert_eq!(lit("\"hello world\""), Value::from("hello world"));
        assert_eq!(lit("\"\""), Value::from(""));
        assert_eq!(lit(r#""say \"hi\"\n""#), Value::from("say \"hi\"\n"));
        assert_eq!(lit("hello"), Value::from("hello"));
        assert_eq!(lit("nilly"), Value::from("nilly"));
        assert_eq!(lit("12abc"), Value::from("12abc"));
        assert_eq!(lit("-"), Value::from("-"));
    }

    #[test]
    fn test_composites() {
        assert_eq!(
            lit("[1, \"a\", [true]]"),
            Value::List(vec![Value::Int(1), Value::from("a"), Value::List(vec![Value::Bool(true)])])
        );
        assert_eq!(lit("[]"), Value::List(vec![]));
        assert_eq!(
            lit("{key: \"value\", \"n.x\": 2}"),
            Value::map([("key", Value::from("value")), ("n.x", Value::Int(2))])
        );
        assert_eq!(lit("{}"), Value::Map(vec![]));
    }

    #[test]
    fn test_paths() {
        assert_eq!(parse_operand("name").unwrap(), Operand::Path(Path::Name));
        assert_eq!(parse_operand("body").unwrap(), Operand::Path(Path::Body));
        assert_eq!(
            parse_operand("attributes[\"http.method\"]").unwrap(),
            Operand::Path(Path::Attribute("http.method".into()))
        );
        assert!(parse_literal("body").is_err());
    }

    #[test]
    fn test_invalid_literals() {
        assert!(parse_operand("[1, 2").is_err());
        assert!(parse_operand("{key}").is_err());
        assert!(parse_operand("\"open").is_err());
        assert!(parse_operand("0x123").is_err());
    }
}
