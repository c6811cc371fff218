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

//! Channel-level credentials.
//!
//! Transport security configuration shared by every call on a channel,
//! plus the identity hash key callers use to decide whether two
//! credentials are interchangeable for caching.

use super::raw::{RawChannelCredentials, SslCredentials};
use crate::buffer::ImmutableBuffer;
use crate::creds::call::CallCredentials;
use crate::errors::CredentialsError;
use crate::roots::DefaultRootCertStore;
use sha2::{Digest, Sha256};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// A channel credential. Owns exactly one reference to its underlying
/// resource; move-only, released exactly once on drop.
pub struct ChannelCredentials {
    raw: Arc<RawChannelCredentials>,
    hash_key: String,
}

impl ChannelCredentials {
    /// Sets the process-wide default PEM trust anchors the TLS layer
    /// falls back to when a credential carries no explicit roots.
    pub fn set_default_roots_pem(certs: impl Into<ImmutableBuffer>) {
        DefaultRootCertStore::global().set(certs);
    }

    /// Platform default transport credentials. No key material, so the
    /// identity hash key is empty.
    pub fn create_default() -> Result<ChannelCredentials, CredentialsError> {
        debug!("creating default channel credentials");
        Ok(Self {
            raw: Arc::new(RawChannelCredentials::DefaultTransport),
            hash_key: String::new(),
        })
    }

    /// TLS credentials. All three inputs are optional: absent roots
    /// defer to the process default store at handshake time, and the
    /// identity hash key is derived from the key/cert pair only when
    /// both halves are present.
    pub fn create_ssl(
        root_certs: Option<ImmutableBuffer>,
        private_key: Option<ImmutableBuffer>,
        cert_chain: Option<ImmutableBuffer>,
    ) -> Result<ChannelCredentials, CredentialsError> {
        debug!(
            has_roots = root_certs.is_some(),
            has_key = private_key.is_some(),
            has_chain = cert_chain.is_some(),
            "creating SSL channel credentials"
        );
        for (name, material) in [
            ("root certificates", &root_certs),
            ("private key", &private_key),
            ("certificate chain", &cert_chain),
        ] {
            if material.as_ref().is_some_and(ImmutableBuffer::is_empty) {
                return Err(CredentialsError::InvalidArgument(format!(
                    "{name} must not be empty when provided"
                )));
            }
        }

        let hash_key = identity_hash_key(private_key.as_ref(), cert_chain.as_ref());
        let raw = RawChannelCredentials::Ssl(SslCredentials {
            root_certs,
            private_key,
            cert_chain,
        });
        Ok(Self {
            raw: Arc::new(raw),
            hash_key,
        })
    }

    /// Combines transport credentials with call credentials. The result
    /// inherits the input channel credential's identity hash key
    /// unchanged; both inputs remain usable.
    pub fn create_composite(
        channel: &ChannelCredentials,
        call: &CallCredentials,
    ) -> Result<ChannelCredentials, CredentialsError> {
        debug!("creating composite channel credentials");
        let raw = RawChannelCredentials::composite(&channel.raw, &call.raw).ok_or(
            CredentialsError::CreationFailed("channel credentials composite"),
        )?;
        Ok(Self {
            raw,
            hash_key: channel.hash_key.clone(),
        })
    }

    /// The explicit "no credentials" outcome.
    ///
    /// Not an error and not a default credential: an absent value
    /// callers must treat as its own sentinel.
    #[must_use]
    pub fn create_insecure() -> Option<ChannelCredentials> {
        None
    }

    /// Digest over the key material this credential was built from;
    /// empty when there was none.
    ///
    /// Byte-identical material produces identical keys, so equal keys
    /// mark credentials as interchangeable for caching without comparing
    /// raw secrets.
    pub fn hash_key(&self) -> &str {
        &self.hash_key
    }

    /// Explicit PEM roots carried by this credential, if any (composites
    /// answer for their transport half). `None` defers to the process
    /// default store.
    pub fn ssl_root_certs(&self) -> Option<&ImmutableBuffer> {
        self.raw.ssl_root_certs()
    }

    /// Whether the credential carries a client key/cert pair.
    pub fn has_key_cert_pair(&self) -> bool {
        self.raw.has_key_cert_pair()
    }
}

impl fmt::Debug for ChannelCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match *self.raw {
            RawChannelCredentials::DefaultTransport => "default",
            RawChannelCredentials::Ssl(_) => "ssl",
            RawChannelCredentials::Composite { .. } => "composite",
        };
        f.debug_struct("ChannelCredentials")
            .field("kind", &kind)
            .field("has_hash_key", &!self.hash_key.is_empty())
            .finish()
    }
}

/// Private key first, then the chain; both halves must be present for
/// the credential to have an identity at all.
fn identity_hash_key(
    private_key: Option<&ImmutableBuffer>,
    cert_chain: Option<&ImmutableBuffer>,
) -> String {
    let (Some(private_key), Some(cert_chain)) = (private_key, cert_chain) else {
        return String::new();
    };
    let mut hasher = Sha256::new();
    hasher.update(private_key.as_bytes());
    hasher.update(cert_chain.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::context::AuthMetadataContext;
    use serde_json::json;

    fn buf(s: &str) -> Option<ImmutableBuffer> {
        Some(ImmutableBuffer::from(s))
    }

    fn ssl(key: Option<&str>, chain: Option<&str>) -> ChannelCredentials {
        ChannelCredentials::create_ssl(
            None,
            key.map(ImmutableBuffer::from),
            chain.map(ImmutableBuffer::from),
        )
        .expect("ssl credentials")
    }

    fn bearer_plugin() -> CallCredentials {
        CallCredentials::create_from_plugin(Arc::new(|_: &AuthMetadataContext| {
            Ok(json!({"authorization": "Bearer abc"}))
        }))
        .expect("plugin credential")
    }

    #[test]
    fn identical_key_material_yields_equal_hash_keys() {
        let a = ssl(Some("key pem"), Some("chain pem"));
        let b = ssl(Some("key pem"), Some("chain pem"));
        assert!(!a.hash_key().is_empty());
        assert_eq!(a.hash_key(), b.hash_key());
    }

    #[test]
    fn differing_key_material_yields_different_hash_keys() {
        let a = ssl(Some("key pem"), Some("chain pem"));
        let b = ssl(Some("other key"), Some("chain pem"));
        let c = ssl(Some("key pem"), Some("other chain"));
        assert_ne!(a.hash_key(), b.hash_key());
        assert_ne!(a.hash_key(), c.hash_key());
        assert_ne!(b.hash_key(), c.hash_key());
    }

    #[test]
    fn missing_key_material_yields_the_empty_hash_key() {
        assert_eq!(ssl(None, None).hash_key(), "");
        assert_eq!(ssl(Some("key pem"), None).hash_key(), "");
        assert_eq!(ssl(None, Some("chain pem")).hash_key(), "");
        assert_eq!(
            ChannelCredentials::create_default().unwrap().hash_key(),
            ""
        );
    }

    #[test]
    fn composite_inherits_the_channel_hash_key() {
        let channel = ssl(Some("key pem"), Some("chain pem"));
        let composite =
            ChannelCredentials::create_composite(&channel, &bearer_plugin()).unwrap();
        assert_eq!(composite.hash_key(), channel.hash_key());
    }

    #[test]
    fn insecure_is_the_absent_sentinel() {
        assert!(ChannelCredentials::create_insecure().is_none());
    }

    #[test]
    fn empty_material_is_rejected() {
        let err =
            ChannelCredentials::create_ssl(buf(""), None, None).unwrap_err();
        assert!(matches!(err, CredentialsError::InvalidArgument(_)));
        let err = ChannelCredentials::create_ssl(None, buf(""), buf("chain")).unwrap_err();
        assert!(matches!(err, CredentialsError::InvalidArgument(_)));
    }

    #[test]
    fn explicit_roots_resolve_through_composites() {
        let channel = ChannelCredentials::create_ssl(buf("root pem"), None, None).unwrap();
        let composite =
            ChannelCredentials::create_composite(&channel, &bearer_plugin()).unwrap();
        assert_eq!(
            composite.ssl_root_certs().unwrap().as_bytes(),
            b"root pem"
        );
        assert!(ChannelCredentials::create_default()
            .unwrap()
            .ssl_root_certs()
            .is_none());
    }

    #[test]
    fn key_cert_pair_presence() {
        assert!(ssl(Some("key"), Some("chain")).has_key_cert_pair());
        assert!(!ssl(Some("key"), None).has_key_cert_pair());
        assert!(!ChannelCredentials::create_default().unwrap().has_key_cert_pair());
    }

    #[test]
    fn inputs_outlive_a_released_composite() {
        let channel = ssl(Some("key pem"), Some("chain pem"));
        let call = bearer_plugin();
        {
            let composite = ChannelCredentials::create_composite(&channel, &call).unwrap();
            drop(composite);
        }
        assert!(channel.has_key_cert_pair());
        let md = call.request_metadata("https://svc", "Get").unwrap();
        assert_eq!(md.entries.len(), 1);
    }
}
