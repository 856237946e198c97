/*
 * Copyright (c) 2025. Mark Barrett
 * This file is part of Ottl.
 * Ottl is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
 * Ottl is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details.
 * You should have received a copy of the GNU Affero General Public License along with Ottl. If not, see <https://www.gnu.org/licenses/>.
 */
use crate::value::Value;
use smallvec::SmallVec;
use smartstring::alias::String as SS;

/// A single telemetry record being transformed.
///
/// Functions never look inside the context themselves; only getters do. Any type can serve as a
/// context, this one exists for the built-in path getters and for the command line.
#[derive(Debug, Clone, Default)]
pub struct TransformContext {
    name: SS,
    body: Value,
    attributes: SmallVec<[(SS, Value); 4]>,
}

impl TransformContext {
    pub fn new<N: Into<SS>>(name: N) -> Self {
        TransformContext { name: name.into(), ..Default::default() }
    }

    pub fn with_body<V: Into<Value>>(mut self, body: V) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_attribute<K: Into<SS>, V: Into<Value>>(mut self, key: K, value: V) -> Self {
        self.set_attribute(key, value);
        self
    }

    /// Sets an attribute, replacing any existing value under the same key.
    pub fn set_attribute<K: Into<SS>, V: Into<Value>>(&mut self, key: K, value: V) {
        let key = key.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((key, value)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn body(&self) -> &Value {
        &self.body
    }

    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.iter().find(|(k, _)| k.as_str() == key).map(|(_, v)| v)
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v))
    }
}
