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

//! The synchronous bridge between a metadata request and the external
//! authentication callback.
//!
//! The plugin calling convention is C-shaped: a registration record of
//! plain function pointers plus an opaque state cell, a fixed-capacity
//! output buffer, and status codes in the response instead of unwinding
//! across the boundary. Each invocation is an independent synchronous
//! transaction; there is no call-to-call state and no deferred
//! completion path.

use crate::constants::plugin::{MAX_SYNC_METADATA, TOO_MANY_ENTRIES};
use crate::errors::MetadataError;
use crate::metadata::{MetadataArray, MetadataEntry};
use crate::plugin::context::{
    AuthMetadataCallback, AuthMetadataContext, AuthMetadataRequest, PluginState,
};
use serde_json::Value;
use tracing::{debug, trace, warn};

/// Status of one synchronous metadata transaction, surfaced to the
/// transport in the response rather than thrown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataStatus {
    /// Entries were produced and copied out.
    Ok,
    /// The callback's mapping contained an unusable entry.
    InvalidArgument,
    /// The callback produced more entries than the sync buffer holds.
    Internal,
}

/// Fixed-capacity output of one bridge call.
///
/// Entries copied here carry their own buffer references and stay valid
/// after the bridge's working set is torn down.
#[derive(Debug)]
pub struct SyncMetadataResponse {
    entries: [Option<MetadataEntry>; MAX_SYNC_METADATA],
    num_entries: usize,
    status: MetadataStatus,
    error_details: Option<&'static str>,
}

impl SyncMetadataResponse {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: std::array::from_fn(|_| None),
            num_entries: 0,
            status: MetadataStatus::Ok,
            error_details: None,
        }
    }

    pub fn status(&self) -> MetadataStatus {
        self.status
    }

    pub fn num_entries(&self) -> usize {
        self.num_entries
    }

    pub fn error_details(&self) -> Option<&'static str> {
        self.error_details
    }

    /// The populated entries, in callback order.
    pub fn entries(&self) -> impl Iterator<Item = &MetadataEntry> {
        self.entries[..self.num_entries].iter().flatten()
    }

    pub(crate) fn into_entries(self) -> Vec<MetadataEntry> {
        let num_entries = self.num_entries;
        self.entries.into_iter().take(num_entries).flatten().collect()
    }
}

impl Default for SyncMetadataResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// Signature of the synchronous metadata entry point.
pub type GetMetadataFn = fn(
    &PluginState,
    AuthMetadataRequest<'_>,
    &mut SyncMetadataResponse,
) -> Result<(), MetadataError>;

/// Signature of the state-destruction entry point.
pub type DestroyStateFn = fn(Box<PluginState>);

/// Registration record for a plugin-backed call credential: the two
/// entry points plus the opaque state they operate on.
///
/// Ownership of the state passes to the credential core together with
/// this record; the core invokes `destroy` on it exactly once.
pub struct MetadataCredentialsPlugin {
    pub get_metadata: GetMetadataFn,
    pub destroy: DestroyStateFn,
    pub state: Box<PluginState>,
}

impl MetadataCredentialsPlugin {
    /// Binds the bridge entry points to a fresh state cell around the
    /// given callback.
    #[must_use]
    pub fn from_callback(callback: AuthMetadataCallback) -> Self {
        Self {
            get_metadata,
            destroy: destroy_state,
            state: PluginState::new(callback),
        }
    }
}

/// Entry point registered for plugin-backed credentials; one invocation
/// is one synchronous metadata transaction.
///
/// `Ok(())` means the transaction completed synchronously, including
/// the failure modes that travel in `response.status`. `Err` is reserved
/// for conditions fatal to the bridge call itself: a callback that
/// failed, or a callback result that is not a mapping. Those propagate
/// so the call cannot proceed with undefined authentication metadata.
pub fn get_metadata(
    state: &PluginState,
    request: AuthMetadataRequest<'_>,
    response: &mut SyncMetadataResponse,
) -> Result<(), MetadataError> {
    trace!(
        service_url = request.service_url,
        method_name = request.method_name,
        "metadata plugin invoked"
    );

    // The transport's context strings die with this call; the callback
    // gets an owned copy.
    let context = AuthMetadataContext::from_request(request);

    // May block for arbitrary external work (token fetch, disk, network).
    // No timeout, no cancellation: a hung callback hangs this call's
    // metadata-attach step.
    let result = (state.callback)(&context).map_err(MetadataError::Callback)?;

    let Some(map) = result.as_object() else {
        warn!(got = json_kind(&result), "authentication callback returned a non-mapping value");
        return Err(MetadataError::InvalidCallbackResult(json_kind(&result)));
    };

    response.num_entries = 0;
    response.status = MetadataStatus::Ok;
    response.error_details = None;

    let metadata = match MetadataArray::from_map(map) {
        Ok(metadata) => metadata,
        Err(invalid) => {
            warn!(%invalid, "authentication callback returned unusable metadata");
            response.status = MetadataStatus::InvalidArgument;
            return Ok(());
        }
    };

    if metadata.len() > MAX_SYNC_METADATA {
        // Overflow is reported, not truncated.
        response.status = MetadataStatus::Internal;
        response.error_details = Some(TOO_MANY_ENTRIES);
        return Ok(());
    }

    // Copy out before `metadata` is dropped: each clone retains the
    // entry's key and value buffers once, so the output outlives this
    // call's working set.
    response.num_entries = metadata.len();
    for (slot, entry) in response.entries.iter_mut().zip(metadata.entries()) {
        *slot = Some(entry.clone());
    }

    debug!(entries = response.num_entries, "metadata plugin completed");
    Ok(())
}

/// Frees the plugin state.
///
/// Invoked exactly once by the credential core when the owning
/// credential's last reference is released. It touches nothing else:
/// in-flight response buffers already carry independent references.
pub fn destroy_state(state: Box<PluginState>) {
    trace!("metadata plugin state destroyed");
    drop(state);
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a mapping",
    }
}
