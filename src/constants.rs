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

//! lilith-creds protocol constants - single source of truth for limits
//! and diagnostic strings.

/// Synchronous metadata plugin protocol
pub mod plugin {
    /// Metadata entries one plugin invocation may return synchronously.
    /// The capacity is fixed by the calling protocol; overflow is
    /// reported, never truncated.
    pub const MAX_SYNC_METADATA: usize = 4;
    /// Diagnostic carried with the INTERNAL status when a callback
    /// overflows the sync buffer.
    pub const TOO_MANY_ENTRIES: &str =
        "plugin credentials returned too many metadata entries";
}

/// Credential composition
pub mod compose {
    /// Flattened credentials a composite may carry before the core
    /// rejects the combination.
    pub const MAX_COMPOSITE_CREDS: usize = 16;
}

/// Metadata wire rules
pub mod wire {
    /// Bytes legal in a metadata key besides ASCII lowercase and digits.
    pub const KEY_EXTRA_BYTES: &[u8] = b"-_.";
}
