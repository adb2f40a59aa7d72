// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::borrow::Cow;

use bytes::Bytes;

/// Value stored in [`Parameters`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    /// Plain text value.
    Text(String),
    /// Raw bytes, typically the content of an uploaded file.
    ///
    /// Only the content is kept: multipart encoders use the parameter key
    /// as the file name.
    Blob(Bytes),
}

impl ParamValue {
    /// View the value as text; blobs are decoded lossily.
    pub fn as_str(&self) -> Cow<'_, str> {
        match self {
            ParamValue::Text(v) => Cow::Borrowed(v),
            ParamValue::Blob(v) => String::from_utf8_lossy(v),
        }
    }

    /// View the value as raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            ParamValue::Text(v) => v.as_bytes(),
            ParamValue::Blob(v) => v,
        }
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Text(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Text(v.to_string())
    }
}

impl From<&String> for ParamValue {
    fn from(v: &String) -> Self {
        ParamValue::Text(v.clone())
    }
}

impl From<Bytes> for ParamValue {
    fn from(v: Bytes) -> Self {
        ParamValue::Blob(v)
    }
}

impl From<Vec<u8>> for ParamValue {
    fn from(v: Vec<u8>) -> Self {
        ParamValue::Blob(Bytes::from(v))
    }
}

/// Parameters is an insertion ordered key/value bag with unique keys.
///
/// The same type backs the query, body and file collections of a
/// [`Request`](crate::Request). Setting an existing key replaces its value
/// in place. Insertion order is kept for iteration but never matters for
/// signing: every serializer sorts.
///
/// `Clone` produces a fully independent collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameters {
    entries: Vec<(String, ParamValue)>,
}

impl Parameters {
    /// Create an empty collection.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Set `key` to `value`, replacing the previous value if any.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        let key = key.into();
        let value = value.into();

        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Get the value of `key`.
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Remove `key`, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        let idx = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(idx).1)
    }

    /// Check whether `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of parameters.
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Check whether there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Export all pairs as strings, ready for encoding.
    pub fn export(&self) -> Vec<(String, String)> {
        self.entries
            .iter()
            .map(|(k, v)| (k.clone(), v.as_str().into_owned()))
            .collect()
    }

    /// Copy all pairs out; changes to the copy never reach this collection.
    pub fn array_copy(&self) -> Vec<(String, ParamValue)> {
        self.entries.clone()
    }
}

impl<K, V> FromIterator<(K, V)> for Parameters
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Parameters::new();
        params.extend(iter);
        params
    }
}

impl<K, V> Extend<(K, V)> for Parameters
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.set(k, v);
        }
    }
}

impl IntoIterator for Parameters {
    type Item = (String, ParamValue);
    type IntoIter = std::vec::IntoIter<(String, ParamValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
