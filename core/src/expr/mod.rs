/*
 * Copyright (c) 2025. Mark Barrett
 * This file is part of Ottl.
 * Ottl is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
 * Ottl is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details.
 * You should have received a copy of the GNU Affero General Public License along with Ottl. If not, see <https://www.gnu.org/licenses/>.
 */
pub mod functions;

use crate::err;
use crate::error::OttlResult;
use crate::getter::GetterRef;
use smartstring::alias::String as SS;
use std::fmt;

/// A bound function call, ready to be evaluated against contexts. Being a getter itself, it can
/// be passed as an argument to another call.
pub type Expr<C> = GetterRef<C>;

/// Builds an expression from the arguments of a call.
pub type Factory<C> = fn(Vec<Argument<C>>) -> OttlResult<Expr<C>>;

/// An argument to a function call, as resolved by the language layer.
pub enum Argument<C> {
    Str(SS),
    Getter(GetterRef<C>),
    Getters(Vec<GetterRef<C>>),
}

impl<C> Argument<C> {
    pub fn kind(&self) -> &'static str {
        match self {
            Argument::Str(_) => "String",
            Argument::Getter(_) => "Getter",
            Argument::Getters(_) => "Getter list",
        }
    }
}

impl<C> fmt::Debug for Argument<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Argument::Str(s) => write!(f, "Str({:?})", s),
            Argument::Getter(_) => write!(f, "Getter"),
            Argument::Getters(g) => write!(f, "Getters({})", g.len()),
        }
    }
}

/// The functions known to the language, looked up case insensitively by name.
pub struct FunctionRegistry<C> {
    functions: Vec<(&'static str, Factory<C>)>,
}

impl<C: 'static> FunctionRegistry<C> {
    pub fn new() -> Self {
        FunctionRegistry { functions: Vec::new() }
    }

    /// A registry with every built-in function.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register("Concat", functions::concat);
        registry
    }

    /// Registers a function, replacing any with the same name.
    pub fn register(&mut self, name: &'static str, factory: Factory<C>) {
        match self.functions.iter_mut().find(|(n, _)| n.eq_ignore_ascii_case(name)) {
            Some(existing) => *existing = (name, factory),
            None => self.functions.push((name, factory)),
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.functions.iter().map(|(name, _)| *name)
    }

    pub fn build(&self, name: &str, args: Vec<Argument<C>>) -> OttlResult<Expr<C>> {
        let (canonical, factory) = self
            .functions
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .ok_or_else(|| err!("Unknown function: '{}'", name))?;

        debug!("Binding {}() with arguments {:?}", canonical, args);
        factory(args)
    }
}

impl<C: 'static> Default for FunctionRegistry<C> {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use crate::context::TransformContext;
    use crate::expr::{Argument, FunctionRegistry};
    use crate::getter::{GetterRef, Literal};
    use crate::value::Value;
    use std::sync::Arc;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let registry = FunctionRegistry::<TransformContext>::standard();
        let lit: GetterRef<TransformContext> = Arc::new(Literal(Value::from("a")));
        let args = vec![Argument::Str("-".into()), Argument::Getters(vec![lit.clone(), lit])];
        let expr = registry.build("concat", args).unwrap();
        assert_eq!(expr.get(&TransformContext::default()), Value::from("a-a"));
    }

    #[test]
    fn test_unknown_function() {
        let registry = FunctionRegistry::<TransformContext>::standard();
        let err = registry.build("Split", vec![]).err().unwrap();
        assert_eq!(err.to_string(), "Unknown function: 'Split'");
    }

    #[test]
    fn test_names() {
        let mut registry = FunctionRegistry::<()>::standard();
        registry.register("CONCAT", crate::expr::functions::concat);
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["CONCAT"]);
    }

    #[test]
    fn test_argument_debug() {
        let arg = Argument::<()>::Getters(vec![]);
        assert_eq!(format!("{:?}", arg), "Getters(0)");
        assert_eq!(arg.kind(), "Getter list");
    }
}
