/*
 * Copyright (c) 2025. Mark Barrett
 * This file is part of Ottl.
 * Ottl is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
 * Ottl is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details.
 * You should have received a copy of the GNU Affero General Public License along with Ottl. If not, see <https://www.gnu.org/licenses/>.
 */
use crate::literal::{parse_literal, parse_operand};
use crate::{ExecCommand, IntoExecCommand};
use ottl_core::arguments::Arguments;
use ottl_core::context::TransformContext;
use ottl_core::err;
use ottl_core::error::OttlResult;
use ottl_core::expr::{Argument, Expr, FunctionRegistry};
use std::fmt;

#[derive(clap::Args, Debug)]
#[command(name = "concat", about = "Concatenate values with a delimiter")]
pub struct ConcatArguments {
    #[arg(
        short = 'd',
        long = "delimiter",
        value_name = "DELIMITER",
        help = "Inserted between each pair of values"
    )]
    delimiter: Option<String>,
    #[arg(long = "name", value_name = "NAME", default_value = "", help = "The record name")]
    name: String,
    #[arg(long = "body", value_name = "VALUE", help = "The record body, as a literal")]
    body: Option<String>,
    #[arg(
        short = 'a',
        long = "attribute",
        value_name = "KEY=VALUE",
        help = "Sets a record attribute to a literal value"
    )]
    attributes: Vec<String>,
    #[arg(
        value_name = "VALUE",
        allow_hyphen_values = true,
        help = "Literal values or record paths: name, body, attributes[\"key\"]"
    )]
    values: Vec<String>,
}

pub struct ConcatCommand {
    expr: Expr<TransformContext>,
    context: TransformContext,
}

impl fmt::Debug for ConcatCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConcatCommand").field("context", &self.context).finish()
    }
}

impl ConcatCommand {
    pub fn evaluate(&self) -> OttlResult<String> {
        let value = self.expr.get(&self.context);
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| err!("Function 'concat' produced a {}, not a String", value.kind()))
    }
}

impl IntoExecCommand for ConcatArguments {
    type Command = ConcatCommand;

    fn into_exec_cmd(
        self,
        registry: &FunctionRegistry<TransformContext>,
    ) -> OttlResult<Self::Command> {
        let delimiter =
            self.delimiter.unwrap_or_else(|| Arguments::get().default_delimiter().to_string());

        let mut context = TransformContext::new(self.name);
        if let Some(body) = self.body {
            context = context.with_body(parse_literal(&body)?);
        }
        for attribute in self.attributes {
            let (key, value) = attribute
                .split_once('=')
                .ok_or_else(|| err!("Attribute '{}' must be given as KEY=VALUE", attribute))?;
            let value = parse_literal(value).map_err(|e| err!(e; "Invalid attribute '{}'", key))?;
            context.set_attribute(key, value);
        }

        let getters = self
            .values
            .iter()
            .map(|v| parse_operand(v).map(|operand| operand.into_getter()))
            .collect::<OttlResult<Vec<_>>>()?;

        let expr = registry
            .build("concat", vec![Argument::Str(delimiter.into()), Argument::Getters(getters)])?;
        Ok(ConcatCommand { expr, context })
    }
}

impl ExecCommand for ConcatCommand {
    fn execute(&self) -> OttlResult<()> {
        println!("{}", self.evaluate()?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::IntoExecCommand;
    use crate::concat::ConcatArguments;
    use ottl_core::context::TransformContext;
    use ottl_core::expr::FunctionRegistry;

    fn args(delimiter: Option<&str>, attributes: &[&str], values: &[&str]) -> ConcatArguments {
        ConcatArguments {
            delimiter: delimiter.map(String::from),
            name: "span".to_string(),
            body: Some("0x0ed2".to_string()),
            attributes: attributes.iter().map(|s| s.to_string()).collect(),
            values: values.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn eval(args: ConcatArguments) -> String {
        let registry = FunctionRegistry::<TransformContext>::standard();
        args.into_exec_cmd(&registry).unwrap().evaluate().unwrap()
    }

    #[test]
    fn test_literals() {
        assert_eq!(eval(args(Some(" "), &[], &["hello", "world"])), "hello world");
        assert_eq!(eval(args(Some(""), &[], &["hello", "nil", "world"])), "hello<nil>world");
        assert_eq!(eval(args(Some("-"), &[], &["hello", "{key: \"value\"}", "world"])), "hello--world");
        assert_eq!(eval(args(Some("-"), &[], &[])), "");
    }

    #[test]
    fn test_paths() {
        let attrs = ["http.method=\"GET\"", "http.status=200"];
        let values = ["name", "attributes[\"http.method\"]", "attributes[\"http.status\"]", "body"];
        assert_eq!(eval(args(Some("|"), &attrs, &values)), "span|GET|200|0ed2");
    }

    #[test]
    fn test_default_delimiter() {
        assert_eq!(eval(args(None, &[], &["a", "b"])), "ab");
    }

    #[test]
    fn test_bad_attribute() {
        let registry = FunctionRegistry::<TransformContext>::standard();
        let err = args(None, &["novalue"], &[]).into_exec_cmd(&registry).err().unwrap();
        assert_eq!(err.to_string(), "Attribute 'novalue' must be given as KEY=VALUE");

        let err = args(None, &["k=[1"], &[]).into_exec_cmd(&registry).err().unwrap();
        assert!(err.to_string().starts_with("Invalid attribute 'k'"));
    }
}
