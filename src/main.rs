/*
 * Copyright (c) 2025. Mark Barrett
 * This file is part of Ottl.
 * Ottl is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
 * Ottl is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details.
 * You should have received a copy of the GNU Affero General Public License along with Ottl. If not, see <https://www.gnu.org/licenses/>.
 */
mod concat;
mod functions;
mod literal;

#[macro_use]
extern crate log;

use crate::concat::ConcatArguments;
use crate::functions::FunctionsArguments;
use ansi_term::Colour;
use clap::{Parser, Subcommand};
use env_logger::Builder;
use env_logger::fmt::style::{AnsiColor, Color, RgbColor, Style};
use num_format::{SystemLocale, ToFormattedString};
use ottl_core::arguments::Arguments;
use ottl_core::context::TransformContext;
use ottl_core::error::{ArgumentContextError, OttlError, OttlResult};
use ottl_core::expr::FunctionRegistry;
use std::env;
use std::io::Write;
use std::process::exit;
use std::sync::LazyLock;
use std::time::SystemTime;

static START: LazyLock<SystemTime> = LazyLock::new(SystemTime::now);

#[derive(Parser, Debug)]
#[command(name = "ottl", version = "0.1.0")]
struct MainArguments {
    #[arg(short, long, help = "Output colors")]
    color: bool,
    #[arg(long = "no-color", help = "Disable output colors")]
    no_color: bool,
    #[arg(
        long = "default-delimiter",
        value_name = "DELIMITER",
        default_value = "",
        help = "The delimiter used when a command is not given one"
    )]
    default_delimiter: String,
    #[command(subcommand)]
    command: CommandArguments,
}

#[derive(Subcommand, Debug)]
enum CommandArguments {
    Concat(ConcatArguments),
    Functions(FunctionsArguments),
}

impl CommandArguments {
    pub fn exec(self, registry: &FunctionRegistry<TransformContext>) -> OttlResult<()> {
        match self {
            CommandArguments::Concat(args) => args.into_exec_cmd(registry)?.execute(),
            CommandArguments::Functions(args) => args.into_exec_cmd(registry)?.execute(),
        }
    }
}

/// Used to create a command from command arguments.
pub trait IntoExecCommand {
    type Command: ExecCommand;

    fn into_exec_cmd(
        self,
        registry: &FunctionRegistry<TransformContext>,
    ) -> OttlResult<Self::Command>;
}

pub trait ExecCommand {
    fn execute(&self) -> OttlResult<()>;
}

fn main() {
    let error_style = Style::default().fg_color(Some(Color::Ansi(AnsiColor::Red))).bold();
    let warn_style = Style::default().fg_color(Some(Color::Ansi(AnsiColor::Yellow))).bold();
    let info_style = Style::default().bold();
    let debug_style = Style::default();
    // Emulates 'faint' in the terminal. Half intensity, not knowing whether the user has a white or black background.
    let trace_style =
        Style::default().fg_color(Some(Color::Rgb(RgbColor::from((128u8, 128u8, 128u8)))));
    Builder::from_default_env()
        .format(move |buf, record| {
            let level_style = match record.level() {
                log::Level::Error => error_style,
                log::Level::Warn => warn_style,
                log::Level::Info => info_style,
                log::Level::Debug => debug_style,
                log::Level::Trace => trace_style,
            };
            writeln!(
                buf,
                "{:08} [{}] - {level_style}{}{level_style:#}",
                START.elapsed().map(|d| d.as_micros()).unwrap_or_default(),
                record.level(),
                record.args()
            )
        })
        .init();

    let main_args = MainArguments::parse();
    let mut args = Arguments::default();
    args.set_color(main_args.color);
    args.set_no_color(main_args.no_color);
    args.set_default_delimiter(main_args.default_delimiter);
    Arguments::set(args);

    let now = SystemTime::now();
    let registry = FunctionRegistry::standard();
    if let Err(e) = main_args.command.exec(&registry) {
        print_error(e);
        exit(1)
    }

    if let Ok(elapsed) = now.elapsed() {
        let nanos = elapsed.as_nanos() as u64;
        match SystemLocale::default() {
            Ok(locale) => info!("Command took {}ns", nanos.to_formatted_string(&locale)),
            Err(_) => info!("Command took {}ns", nanos),
        }
    }
}

fn print_error(mut e: OttlError) {
    e.prune_except_last::<ArgumentContextError>();

    let program = env::args().next().unwrap_or_else(|| "ottl".to_string());
    if Arguments::get().print_std_err_in_color() {
        eprint!("{}:", Colour::Red.bold().paint(program));
    } else {
        eprint!("{}:", program);
    }
    eprintln!(" {}", e);
}
