/*
 * Copyright (c) 2025. Mark Barrett
 * This file is part of Ottl.
 * Ottl is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
 * Ottl is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details.
 * You should have received a copy of the GNU Affero General Public License along with Ottl. If not, see <https://www.gnu.org/licenses/>.
 */
use crate::err;
use crate::error::{ArgumentContextError, OttlError, OttlErrors, OttlResult};
use crate::expr::{Argument, Expr};
use crate::getter::{Getter, GetterRef};
use crate::value::Value;
use itertools::Itertools;
use smartstring::alias::String as SS;
use std::fmt;
use std::sync::Arc;

/// Binds `Concat(delimiter, [values...])`.
pub fn concat<C: 'static>(args: Vec<Argument<C>>) -> OttlResult<Expr<C>> {
    let [delimiter, values]: [Argument<C>; 2] = args.try_into().map_err(|args: Vec<_>| {
        err!(
            "Function 'concat' requires two arguments: a delimiter and a list of values, got {}",
            args.len()
        )
    })?;

    let mut errors = vec![];
    let delimiter = match delimiter {
        Argument::Str(s) => Some(s),
        other => {
            errors.push(invalid_argument(0, format!("expected a String, found {}", other.kind())));
            None
        }
    };
    let getters = match values {
        Argument::Getters(getters) => Some(getters),
        Argument::Getter(getter) => Some(vec![getter]),
        other => {
            errors.push(invalid_argument(1, format!("expected a Getter list, found {}", other.kind())));
            None
        }
    };

    match (delimiter, getters) {
        (Some(delimiter), Some(getters)) => Ok(Arc::new(Concat::new(delimiter, getters)?)),
        _ => Err(OttlErrors::new("Invalid arguments to 'concat'".to_string(), errors).into()),
    }
}

fn invalid_argument(position: usize, message: String) -> OttlError {
    err!(ArgumentContextError::new("concat", position, message); "Invalid call to 'concat'")
}

/// Joins the text form of each getter's value with a delimiter.
pub struct Concat<C> {
    delimiter: SS,
    getters: Vec<GetterRef<C>>,
}

impl<C> Concat<C> {
    /// Any delimiter and any number of getters are accepted.
    pub fn new<D: Into<SS>>(delimiter: D, getters: Vec<GetterRef<C>>) -> OttlResult<Self> {
        let delimiter = delimiter.into();
        debug!("Concat over {} values with delimiter {:?}", getters.len(), delimiter);
        Ok(Concat { delimiter, getters })
    }

    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    pub fn len(&self) -> usize {
        self.getters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.getters.is_empty()
    }

    /// Evaluates every getter in order and joins their fragments. Never fails: values with no
    /// text form leave an empty fragment between their delimiters.
    pub fn evaluate(&self, ctx: &C) -> String {
        self.getters
            .iter()
            .enumerate()
            .map(|(i, getter)| {
                let value = getter.get(ctx);
                if value.is_composite() {
                    trace!("Concat: value {} is a {}, leaving its fragment empty", i, value.kind());
                }
                Fragment(value)
            })
            .join(&self.delimiter)
    }
}

impl<C> Getter<C> for Concat<C> {
    fn get(&self, ctx: &C) -> Value {
        Value::Str(SS::from(self.evaluate(ctx)))
    }
}

impl<C> fmt::Debug for Concat<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Concat")
            .field("delimiter", &self.delimiter)
            .field("getters", &self.getters.len())
            .finish()
    }
}

/// The text a single value contributes to a concatenation.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment(pub Value);

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::Nil => f.write_str("<nil>"),
            Value::Str(s) => f.write_str(s),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(n) => fmt_float(*n, f),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Bytes(b) => f.write_str(&hex::encode(b)),
            Value::List(_) | Value::Map(_) => Ok(()),
        }
    }
}

/// Shortest representation that reads back to the same float. Decimal exponents outside
/// `[-4, 6)` switch to exponent form with a signed two digit exponent, e.g. `1e+06`, `1e-05`.
fn fmt_float(n: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if n.is_nan() {
        return f.write_str("NaN");
    }
    if n.is_infinite() {
        return f.write_str(if n > 0.0 { "+Inf" } else { "-Inf" });
    }

    let sci = format!("{:e}", n);
    let (mantissa, exp) = match sci.split_once('e') {
        Some((mantissa, exp)) => (mantissa, exp.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };
    if (-4..6).contains(&exp) {
        write!(f, "{}", n)
    } else {
        let sign = if exp < 0 { '-' } else { '+' };
        write!(f, "{}e{}{:02}", mantissa, sign, exp.abs())
    }
}
