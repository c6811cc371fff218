// Copyright 2026 BadCompany
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Call metadata model.
//!
//! The bridge converts the authentication callback's returned mapping
//! into an ordered sequence of key/value entries before handing them to
//! the transport. Keys follow the wire rules (lowercase ASCII tokens);
//! values must be representable as bytes.

use crate::buffer::ImmutableBuffer;
use crate::constants::wire;
use crate::errors::InvalidMetadataEntry;
use serde_json::{Map, Value};

/// One authentication metadata item: an ordered key/value pair of
/// shareable byte buffers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataEntry {
    pub key: ImmutableBuffer,
    pub value: ImmutableBuffer,
}

/// Ordered, validated metadata decoded from a callback result.
#[derive(Debug, Default)]
pub struct MetadataArray {
    entries: Vec<MetadataEntry>,
}

impl MetadataArray {
    /// Decodes a callback's mapping into ordered entries.
    ///
    /// A key mapped to a string yields one entry; a key mapped to a list
    /// of strings yields one entry per element under the same key, in
    /// list order. Any other value shape, or an illegal key, rejects the
    /// whole mapping.
    pub fn from_map(map: &Map<String, Value>) -> Result<Self, InvalidMetadataEntry> {
        let mut entries = Vec::new();
        for (key, value) in map {
            if !is_legal_key(key) {
                return Err(InvalidMetadataEntry::IllegalKey);
            }
            let key = ImmutableBuffer::from(key.as_str());
            match value {
                Value::String(s) => entries.push(MetadataEntry {
                    key,
                    value: ImmutableBuffer::from(s.as_str()),
                }),
                Value::Array(items) => {
                    for item in items {
                        let Value::String(s) = item else {
                            return Err(InvalidMetadataEntry::UnrepresentableValue);
                        };
                        entries.push(MetadataEntry {
                            key: key.share(),
                            value: ImmutableBuffer::from(s.as_str()),
                        });
                    }
                }
                _ => return Err(InvalidMetadataEntry::UnrepresentableValue),
            }
        }
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entries, in callback order.
    pub fn entries(&self) -> &[MetadataEntry] {
        &self.entries
    }
}

/// Wire legality for metadata keys: nonempty ASCII made of lowercase
/// letters, digits, `-`, `_` or `.`. Uppercase is illegal on the wire.
pub fn is_legal_key(key: &str) -> bool {
    !key.is_empty()
        && key.bytes().all(|b| {
            b.is_ascii_lowercase() || b.is_ascii_digit() || wire::KEY_EXTRA_BYTES.contains(&b)
        })
}
