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

//! Call-level credentials.
//!
//! Authentication material attached to individual RPC calls: either
//! plugin-backed (metadata produced on demand by an external callback)
//! or a composite presenting several credentials' metadata together.

use super::raw::RawCallCredentials;
use crate::errors::{CredentialsError, MetadataError};
use crate::metadata::MetadataEntry;
use crate::plugin::bridge::{MetadataCredentialsPlugin, MetadataStatus};
use crate::plugin::context::{AuthMetadataCallback, AuthMetadataRequest};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// A call credential. Owns exactly one reference to its underlying
/// resource; move-only, released exactly once on drop.
pub struct CallCredentials {
    pub(crate) raw: Arc<RawCallCredentials>,
}

impl CallCredentials {
    /// Builds a plugin-backed credential around an authentication
    /// callback.
    ///
    /// The callback will be invoked synchronously for every outgoing
    /// call on a channel carrying this credential. Ownership of the
    /// plugin state passes to the credential core here; if construction
    /// fails the state is still released through the plugin's destroy
    /// entry point, never leaked.
    pub fn create_from_plugin(
        callback: AuthMetadataCallback,
    ) -> Result<CallCredentials, CredentialsError> {
        debug!("creating plugin-backed call credentials");
        let plugin = MetadataCredentialsPlugin::from_callback(callback);
        Ok(Self {
            raw: RawCallCredentials::from_plugin(plugin),
        })
    }

    /// Combines two credentials into one that presents both credentials'
    /// metadata at call time.
    ///
    /// The inputs remain usable; the composite's later release does not
    /// release them.
    pub fn create_composite(
        first: &CallCredentials,
        second: &CallCredentials,
    ) -> Result<CallCredentials, CredentialsError> {
        debug!("creating composite call credentials");
        let raw = RawCallCredentials::composite(&first.raw, &second.raw)
            .ok_or(CredentialsError::CreationFailed("call credentials composite"))?;
        Ok(Self { raw })
    }

    /// Produces this credential's authentication metadata for one
    /// outgoing call.
    ///
    /// Driven by the transport at the point it attaches call metadata;
    /// blocks until every underlying callback has returned.
    pub fn request_metadata(
        &self,
        service_url: &str,
        method_name: &str,
    ) -> Result<CallAuthMetadata, MetadataError> {
        self.raw.request_metadata(AuthMetadataRequest {
            service_url,
            method_name,
        })
    }
}

impl fmt::Debug for CallCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match *self.raw {
            RawCallCredentials::Plugin(_) => "plugin",
            RawCallCredentials::Composite(_) => "composite",
        };
        f.debug_struct("CallCredentials").field("kind", &kind).finish()
    }
}

/// Aggregated authentication metadata for one call.
///
/// Entries carry their own buffer references and remain valid for as
/// long as the caller holds them, independent of the credential.
#[derive(Debug)]
pub struct CallAuthMetadata {
    pub status: MetadataStatus,
    pub error_details: Option<&'static str>,
    pub entries: Vec<MetadataEntry>,
}

impl CallAuthMetadata {
    pub(crate) fn from_response(
        response: crate::plugin::bridge::SyncMetadataResponse,
    ) -> Self {
        Self {
            status: response.status(),
            error_details: response.error_details(),
            entries: response.into_entries(),
        }
    }
}
