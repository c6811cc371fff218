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

//! Callback-facing request context and plugin state.

use anyhow::Result;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Per-call context as the transport presents it to the bridge. The
/// borrowed strings live only for the duration of the bridge call.
#[derive(Debug, Clone, Copy)]
pub struct AuthMetadataRequest<'a> {
    pub service_url: &'a str,
    pub method_name: &'a str,
}

/// Owned copy of the request context handed to the authentication
/// callback.
///
/// Copied by value because the transport's strings do not outlive the
/// bridge call the callback is invoked from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthMetadataContext {
    pub service_url: String,
    pub method_name: String,
}

impl AuthMetadataContext {
    pub(crate) fn from_request(request: AuthMetadataRequest<'_>) -> Self {
        Self {
            service_url: request.service_url.to_string(),
            method_name: request.method_name.to_string(),
        }
    }
}

/// The external authentication callback.
///
/// Invoked synchronously once per outgoing call with the call's context.
/// It must return a mapping of metadata keys to string values (or lists
/// of string values). The bridge blocks until it returns, with no
/// timeout and no cancellation. Concurrent calls on the same credential
/// may invoke it from multiple threads, so implementations must
/// tolerate concurrent invocation.
pub type AuthMetadataCallback =
    Arc<dyn Fn(&AuthMetadataContext) -> Result<Value> + Send + Sync>;

/// Per-plugin-credential closure: holds the callback for the lifetime of
/// the owning credential. Read-only after construction.
///
/// Ownership passes to the credential core at registration time; the
/// core frees the state exactly once through the plugin's destroy entry
/// point when the owning credential's last reference is released.
/// Application code never frees it directly.
pub struct PluginState {
    pub(crate) callback: AuthMetadataCallback,
}

impl PluginState {
    pub(crate) fn new(callback: AuthMetadataCallback) -> Box<Self> {
        Box::new(Self { callback })
    }
}

impl fmt::Debug for PluginState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginState").finish_non_exhaustive()
    }
}
