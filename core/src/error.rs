/*
 * Copyright (c) 2025. Mark Barrett
 * This file is part of Ottl.
 * Ottl is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
 * Ottl is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details.
 * You should have received a copy of the GNU Affero General Public License along with Ottl. If not, see <https://www.gnu.org/licenses/>.
 */
use std::error::Error;
use std::fmt;

pub type OttlResult<T> = Result<T, OttlError>;

#[derive(Debug)]
pub struct OttlError {
    msg: Box<dyn Error + Send + Sync>,
    source: Option<Box<dyn Error + Send + Sync>>,
}

impl OttlError {
    pub fn new<E: Into<Box<dyn Error + Send + Sync + 'static>>>(msg: E) -> Self {
        let msg = msg.into();
        match msg.downcast::<OttlErrors>() {
            Ok(mut errors) if errors.errors.len() == 1 => match errors.errors.pop() {
                Some(single) => single,
                None => Self { msg: errors, source: None },
            },
            Ok(errors) => Self { msg: errors, source: None },
            Err(msg) => Self { msg, source: None },
        }
    }

    pub fn with_source<S: Into<Box<dyn Error + Send + Sync + 'static>>>(self, source: S) -> Self {
        Self { msg: self.msg, source: Some(source.into()) }
    }

    /// Finds whether the error type appears in the error chain and returns the
    /// first instance of it.
    pub fn find<E: Error + 'static>(&self) -> Option<&E> {
        if let Some(err) = self.msg.downcast_ref::<E>() {
            return Some(err);
        }
        if let Some(source) = &self.source {
            if let Some(err) = source.downcast_ref::<E>() {
                return Some(err);
            }
        }

        if let Some(oe) = self.msg.downcast_ref::<OttlError>() {
            if let Some(found) = oe.find::<E>() {
                return Some(found);
            }
        }
        if let Some(oe) = self.source.as_ref().and_then(|s| s.downcast_ref::<OttlError>()) {
            return oe.find::<E>();
        }

        None
    }

    /// Drops every link of the chain that is an `E`, except the innermost one, so that
    /// repeated context (e.g. the same argument location wrapped at several binding
    /// levels) is only printed once.
    pub fn prune_except_last<E: Error + 'static>(&mut self) {
        let source_has = self
            .source
            .as_ref()
            .and_then(|s| s.downcast_ref::<OttlError>())
            .map(|s| s.find::<E>().is_some())
            .unwrap_or(false);

        if source_has {
            if self.msg.is::<E>() {
                if let Some(source) = self.source.take() {
                    self.msg = source;
                }
            }
            if let Some(source) = self.source.as_mut().and_then(|s| s.downcast_mut::<OttlError>()) {
                source.prune_except_last::<E>();
            }
            if let Some(msg) = self.msg.downcast_mut::<OttlError>() {
                msg.prune_except_last::<E>();
            }
        } else if let Some(msg) = self.msg.downcast_mut::<OttlError>() {
            msg.prune_except_last::<E>();
        }
    }
}

impl Error for OttlError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source.as_ref().map(|e| e.as_ref() as &dyn Error)
    }
}

impl fmt::Display for OttlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Write indents after newlines, if there isn't already an indent.
        let write_indented = |err: String, f: &mut fmt::Formatter<'_>| -> fmt::Result {
            let mut peekable = err.chars().peekable();
            while let Some(c) = peekable.next() {
                write!(f, "{}", c)?;
                if c == '\n' {
                    if peekable.peek() == Some(&' ') || peekable.peek() == Some(&'\u{21b3}') {
                        continue;
                    }
                    write!(f, "  ")?;
                }
            }
            Ok(())
        };

        write_indented(self.msg.to_string(), f)?;

        if let Some(source) = &self.source {
            writeln!(f)?;
            write!(f, "  \u{21b3} ")?;

            if source.downcast_ref::<OttlErrors>().is_some() {
                write!(f, "\n\u{2192} {}", source)?;
            } else {
                write_indented(source.to_string(), f)?;
            }
        }
        Ok(())
    }
}

impl From<OttlErrors> for OttlError {
    fn from(value: OttlErrors) -> Self {
        Self::new(value)
    }
}

/// Several errors collected under one heading, e.g. every argument of a call that failed to bind.
#[derive(Debug)]
pub struct OttlErrors {
    message: String,
    errors: Vec<OttlError>,
}

impl OttlErrors {
    pub fn new(message: String, errors: Vec<OttlError>) -> Self {
        Self { message, errors }
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Error for OttlErrors {}

impl fmt::Display for OttlErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.message)?;
        for err in self.errors.iter() {
            let err_str = err.to_string();
            write!(f, "\n\u{2192} {}", err_str.replace('\n', "\n  "))?;
        }
        Ok(())
    }
}

/// Locates a binding failure at a particular argument of a function call.
#[derive(Debug)]
pub struct ArgumentContextError {
    function: String,
    position: usize,
    message: String,
}

impl ArgumentContextError {
    pub fn new(function: &str, position: usize, message: String) -> Self {
        Self { function: function.to_string(), position, message }
    }

    pub fn function(&self) -> &str {
        &self.function
    }

    /// The zero based index of the offending argument.
    pub fn position(&self) -> usize {
        self.position
    }
}

impl fmt::Display for ArgumentContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(), argument {}: {}", self.function, self.position + 1, self.message)
    }
}

impl Error for ArgumentContextError {}

#[macro_export]
macro_rules! err {
    ($cause:expr; $msg:expr) => {{
        $crate::error::OttlError::new($msg).with_source($cause)
    }};
    ($cause:expr; $msg:expr, $($args:tt)*) => {{
        $crate::error::OttlError::new(format!($msg, $($args)*)).with_source($cause)
    }};
    ($msg:expr) => {{
        $crate::error::OttlError::new($msg)
    }};
    ($msg:expr, $($args:tt)*) => {{
        $crate::error::OttlError::new(format!($msg, $($args)*))
    }};
}
