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

//! Error taxonomy.
//!
//! Construction failures are terminal for the call that raised them and
//! are never retried. Protocol-level metadata failures travel in the
//! bridge response status instead of being thrown across the plugin
//! boundary.

use thiserror::Error;

/// Errors raised by credential construction.
#[derive(Error, Debug)]
pub enum CredentialsError {
    /// Malformed caller input (e.g. empty PEM material).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The credential core rejected the construction.
    #[error("failed to create {0}")]
    CreationFailed(&'static str),
}

/// Conditions fatal to one bridge call.
///
/// These propagate to the transport rather than being swallowed: an RPC
/// must not proceed with undefined authentication metadata. Everything
/// else the bridge reports through the response status codes.
#[derive(Error, Debug)]
pub enum MetadataError {
    /// The external authentication callback itself failed.
    #[error("authentication callback failed: {0}")]
    Callback(#[from] anyhow::Error),

    /// The callback returned something other than a key/value mapping.
    #[error("callback return value expected a mapping, got {0}")]
    InvalidCallbackResult(&'static str),
}

/// Reasons an individual key/value pair from the callback is unusable.
///
/// Surfaced as the INVALID_ARGUMENT response status, never thrown.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidMetadataEntry {
    /// The key violates the wire rules for metadata keys.
    #[error("metadata key is not legal on the wire")]
    IllegalKey,

    /// The value cannot be represented as bytes.
    #[error("metadata value is not representable as bytes")]
    UnrepresentableValue,
}
