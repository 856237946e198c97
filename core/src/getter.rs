/*
 * Copyright (c) 2025. Mark Barrett
 * This file is part of Ottl.
 * Ottl is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
 * Ottl is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details.
 * You should have received a copy of the GNU Affero General Public License along with Ottl. If not, see <https://www.gnu.org/licenses/>.
 */
use crate::context::TransformContext;
use crate::value::Value;
use smartstring::alias::String as SS;
use std::fmt;
use std::sync::Arc;

/// A deferred producer of a single value, bound to whatever the context is at evaluation time.
///
/// Getters must be reentrant: an expression holding them may be evaluated from several threads
/// at once.
pub trait Getter<C>: Send + Sync {
    fn get(&self, ctx: &C) -> Value;
}

/// Getters are shared between expressions rather than copied.
pub type GetterRef<C> = Arc<dyn Getter<C>>;

impl<C, F> Getter<C> for F
where
    F: Fn(&C) -> Value + Send + Sync,
{
    fn get(&self, ctx: &C) -> Value {
        self(ctx)
    }
}

/// Wraps a closure as a shareable getter.
pub fn getter<C, F>(f: F) -> GetterRef<C>
where
    F: Fn(&C) -> Value + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Always produces the same value, regardless of context.
#[derive(Debug, Clone, PartialEq)]
pub struct Literal(pub Value);

impl<C> Getter<C> for Literal {
    fn get(&self, _ctx: &C) -> Value {
        self.0.clone()
    }
}

/// A field of a `TransformContext`.
#[derive(Debug, Clone, PartialEq)]
pub enum Path {
    Name,
    Body,
    Attribute(SS),
}

impl Getter<TransformContext> for Path {
    fn get(&self, ctx: &TransformContext) -> Value {
        match self {
            Path::Name => Value::Str(SS::from(ctx.name())),
            Path::Body => ctx.body().clone(),
            Path::Attribute(key) => ctx.attribute(key).cloned().unwrap_or(Value::Nil),
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Path::Name => write!(f, "name"),
            Path::Body => write!(f, "body"),
            Path::Attribute(key) => write!(f, "attributes[\"{}\"]", key),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::context::TransformContext;
    use crate::getter::{Getter, Literal, Path, getter};
    use crate::value::Value;

    #[test]
    fn test_literal_ignores_context() {
        let lit = Literal(Value::Int(7));
        assert_eq!(Getter::<()>::get(&lit, &()), Value::Int(7));
        assert_eq!(lit.get(&TransformContext::new("a")), Value::Int(7));
    }

    #[test]
    fn test_closure_getter() {
        let g = getter(|ctx: &TransformContext| Value::from(ctx.name().len() as i64));
        assert_eq!(g.get(&TransformContext::new("span")), Value::Int(4));
    }

    #[test]
    fn test_paths() {
        let ctx = TransformContext::new("span")
            .with_body(vec![0x01u8, 0xff])
            .with_attribute("service.name", "checkout");

        assert_eq!(Path::Name.get(&ctx), Value::from("span"));
        assert_eq!(Path::Body.get(&ctx), Value::Bytes(vec![0x01, 0xff]));
        assert_eq!(Path::Attribute("service.name".into()).get(&ctx), Value::from("checkout"));
        assert_eq!(Path::Attribute("missing".into()).get(&ctx), Value::Nil);
    }

    #[test]
    fn test_path_display() {
        assert_eq!(Path::Attribute("k".into()).to_string(), "attributes[\"k\"]");
        assert_eq!(Path::Body.to_string(), "body");
    }
}
