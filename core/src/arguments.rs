/*
 * Copyright (c) 2025. Mark Barrett
 * This file is part of Ottl.
 * Ottl is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
 * Ottl is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details.
 * You should have received a copy of the GNU Affero General Public License along with Ottl. If not, see <https://www.gnu.org/licenses/>.
 */
use smartstring::alias::String as SS;
use std::sync::OnceLock;

/// Process wide settings, fixed once at startup.
#[derive(Debug, Default)]
pub struct Arguments {
    pub color: bool,
    pub no_color: bool,
    default_delimiter: SS,
}

static ARGS: OnceLock<Arguments> = OnceLock::new();

impl Arguments {
    pub fn get() -> &'static Self {
        ARGS.get_or_init(Arguments::default)
    }

    /// Sets the arguments. This is called at the start of the program
    /// and invoking again will not allow them to be changed.
    pub fn set(args: Self) -> &'static Self {
        ARGS.get_or_init(|| args)
    }

    pub fn print_std_err_in_color(&self) -> bool {
        if self.no_color {
            return false;
        }
        atty::is(atty::Stream::Stderr) || self.color
    }

    pub fn set_color(&mut self, color: bool) {
        self.color = color
    }

    pub fn set_no_color(&mut self, no_color: bool) {
        self.no_color = no_color
    }

    /// The delimiter used by `concat` when the caller gives none.
    pub fn default_delimiter(&self) -> &str {
        &self.default_delimiter
    }

    pub fn set_default_delimiter<D: Into<SS>>(&mut self, delimiter: D) {
        self.default_delimiter = delimiter.into()
    }
}

#[cfg(test)]
mod tests {
    use crate::arguments::Arguments;

    #[test]
    fn test_no_color_wins() {
        let mut args = Arguments::default();
        args.set_color(true);
        args.set_no_color(true);
        assert!(!args.print_std_err_in_color());
    }

    #[test]
    fn test_default_delimiter() {
        let mut args = Arguments::default();
        assert_eq!(args.default_delimiter(), "");
        args.set_default_delimiter(", ");
        assert_eq!(args.default_delimiter(), ", ");
    }
}
