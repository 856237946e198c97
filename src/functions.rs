/*
 * Copyright (c) 2025. Mark Barrett
 * This file is part of Ottl.
 * Ottl is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
 * Ottl is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details.
 * You should have received a copy of the GNU Affero General Public License along with Ottl. If not, see <https://www.gnu.org/licenses/>.
 */
use crate::{ExecCommand, IntoExecCommand};
use ottl_core::context::TransformContext;
use ottl_core::error::OttlResult;
use ottl_core::expr::FunctionRegistry;

#[derive(clap::Args, Debug)]
#[command(name = "functions", about = "List the available functions")]
pub struct FunctionsArguments {}

#[derive(Debug)]
pub struct FunctionsCommand {
    names: Vec<&'static str>,
}

impl IntoExecCommand for FunctionsArguments {
    type Command = FunctionsCommand;

    fn into_exec_cmd(
        self,
        registry: &FunctionRegistry<TransformContext>,
    ) -> OttlResult<Self::Command> {
        let mut names: Vec<_> = registry.names().collect();
        names.sort_unstable();
        Ok(FunctionsCommand { names })
    }
}

impl ExecCommand for FunctionsCommand {
    fn execute(&self) -> OttlResult<()> {
        for name in &self.names {
            println!("{}", name);
        }
        Ok(())
    }
}
