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

//! Ref-counted credential core.
//!
//! The opaque resources behind the public credential types. Internal
//! sharing uses atomic ref-counts; every resource is released exactly
//! once, when its last reference drops. Plugin state is freed through
//! the plugin's registered destroy entry point, triggered here and never
//! by application code.

use super::call::CallAuthMetadata;
use crate::buffer::ImmutableBuffer;
use crate::constants::compose::MAX_COMPOSITE_CREDS;
use crate::errors::MetadataError;
use crate::plugin::bridge::{MetadataCredentialsPlugin, MetadataStatus, SyncMetadataResponse};
use crate::plugin::context::AuthMetadataRequest;
use std::sync::Arc;

/// Plugin-backed leaf. Holds the registration record from construction
/// until drop; drop hands the state back through the record's destroy
/// entry point, exactly once.
pub(crate) struct PluginCredential {
    plugin: Option<MetadataCredentialsPlugin>,
}

impl PluginCredential {
    fn new(plugin: MetadataCredentialsPlugin) -> Self {
        Self {
            plugin: Some(plugin),
        }
    }

    fn plugin(&self) -> &MetadataCredentialsPlugin {
        // Present from construction until drop.
        self.plugin.as_ref().expect("plugin record taken before drop")
    }
}

impl Drop for PluginCredential {
    fn drop(&mut self) {
        if let Some(plugin) = self.plugin.take() {
            let MetadataCredentialsPlugin { destroy, state, .. } = plugin;
            destroy(state);
        }
    }
}

/// Call-credential resource: a plugin leaf or a composite retaining its
/// children.
pub(crate) enum RawCallCredentials {
    Plugin(PluginCredential),
    Composite(Vec<Arc<RawCallCredentials>>),
}

impl RawCallCredentials {
    pub(crate) fn from_plugin(plugin: MetadataCredentialsPlugin) -> Arc<Self> {
        Arc::new(Self::Plugin(PluginCredential::new(plugin)))
    }

    /// Combines two credentials so both present metadata at call time.
    ///
    /// The composite retains its own references to the children; its
    /// release drops those references only, never the callers'. Rejected
    /// when the flattened chain would exceed the core's bound.
    pub(crate) fn composite(a: &Arc<Self>, b: &Arc<Self>) -> Option<Arc<Self>> {
        if a.weight() + b.weight() > MAX_COMPOSITE_CREDS {
            return None;
        }
        Some(Arc::new(Self::Composite(vec![
            Arc::clone(a),
            Arc::clone(b),
        ])))
    }

    /// Collects this credential's metadata for one call.
    ///
    /// A plugin leaf runs one bridge transaction through its registered
    /// entry point; a composite consults its children in order and
    /// concatenates their entries, with the first child reporting a
    /// non-OK status short-circuiting the walk. Fatal bridge errors
    /// propagate unchanged.
    pub(crate) fn request_metadata(
        &self,
        request: AuthMetadataRequest<'_>,
    ) -> Result<CallAuthMetadata, MetadataError> {
        match self {
            Self::Plugin(leaf) => {
                let plugin = leaf.plugin();
                let mut response = SyncMetadataResponse::new();
                (plugin.get_metadata)(&plugin.state, request, &mut response)?;
                Ok(CallAuthMetadata::from_response(response))
            }
            Self::Composite(children) => {
                let mut entries = Vec::new();
                for child in children {
                    let collected = child.request_metadata(request)?;
                    if collected.status != MetadataStatus::Ok {
                        return Ok(collected);
                    }
                    entries.extend(collected.entries);
                }
                Ok(CallAuthMetadata {
                    status: MetadataStatus::Ok,
                    error_details: None,
                    entries,
                })
            }
        }
    }

    /// Underlying credentials once composites are flattened.
    fn weight(&self) -> usize {
        match self {
            Self::Plugin(_) => 1,
            Self::Composite(children) => children.iter().map(|c| c.weight()).sum(),
        }
    }
}

/// TLS configuration carried by an SSL channel credential. Consumed by
/// the TLS layer at channel establishment; absent roots defer to the
/// process default store.
pub(crate) struct SslCredentials {
    pub(crate) root_certs: Option<ImmutableBuffer>,
    pub(crate) private_key: Option<ImmutableBuffer>,
    pub(crate) cert_chain: Option<ImmutableBuffer>,
}

/// Channel-credential resource.
pub(crate) enum RawChannelCredentials {
    DefaultTransport,
    Ssl(SslCredentials),
    Composite {
        channel: Arc<RawChannelCredentials>,
        call: Arc<RawCallCredentials>,
    },
}

impl RawChannelCredentials {
    /// Combines transport credentials with call credentials. Same
    /// retention and rejection rules as the call-side composite.
    pub(crate) fn composite(
        channel: &Arc<Self>,
        call: &Arc<RawCallCredentials>,
    ) -> Option<Arc<Self>> {
        if channel.weight() + call.weight() > MAX_COMPOSITE_CREDS {
            return None;
        }
        Some(Arc::new(Self::Composite {
            channel: Arc::clone(channel),
            call: Arc::clone(call),
        }))
    }

    /// Explicit PEM roots, resolved through composites to the transport
    /// half.
    pub(crate) fn ssl_root_certs(&self) -> Option<&ImmutableBuffer> {
        match self {
            Self::Ssl(ssl) => ssl.root_certs.as_ref(),
            Self::Composite { channel, .. } => channel.ssl_root_certs(),
            Self::DefaultTransport => None,
        }
    }

    pub(crate) fn has_key_cert_pair(&self) -> bool {
        match self {
            Self::Ssl(ssl) => ssl.private_key.is_some() && ssl.cert_chain.is_some(),
            Self::Composite { channel, .. } => channel.has_key_cert_pair(),
            Self::DefaultTransport => false,
        }
    }

    fn weight(&self) -> usize {
        match self {
            Self::DefaultTransport | Self::Ssl(_) => 1,
            Self::Composite { channel, call } => channel.weight() + call.weight(),
        }
    }
}
