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

//! Default root certificate store.
//!
//! A process-wide cache of the default PEM trust bundle. The native TLS
//! layer queries it through a function-pointer hook at handshake time;
//! application code writes it through
//! `ChannelCredentials::set_default_roots_pem`. Readers never block each
//! other; writes are rare and serialized.

use crate::buffer::ImmutableBuffer;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{OnceLock, PoisonError, RwLock};
use tracing::debug;

/// Result codes for the SSL roots override hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SslRootsOverrideResult {
    Ok,
    Fail,
}

/// Shape of the hook the native TLS layer registers at process init and
/// invokes at handshake time.
///
/// The hook writes a caller-owned copy of the bundle: the native
/// contract has the caller free the returned bytes on its own schedule,
/// independently of the store.
pub type SslRootsOverrideFn = fn(&mut Option<Vec<u8>>) -> SslRootsOverrideResult;

/// Process-wide default root certificate cache.
///
/// Lazily constructed on first access and alive for the rest of the
/// process; there is no teardown.
pub struct DefaultRootCertStore {
    certs: RwLock<Option<ImmutableBuffer>>,
    exclusive_writes: AtomicU64,
}

static STORE: OnceLock<DefaultRootCertStore> = OnceLock::new();

impl DefaultRootCertStore {
    fn new() -> Self {
        Self {
            certs: RwLock::new(None),
            exclusive_writes: AtomicU64::new(0),
        }
    }

    /// The singleton instance.
    pub fn global() -> &'static DefaultRootCertStore {
        STORE.get_or_init(Self::new)
    }

    /// Returns a shared reference to the current bundle, or `None` if no
    /// bundle has ever been set.
    pub fn get(&self) -> Option<ImmutableBuffer> {
        let guard = self.certs.read().unwrap_or_else(PoisonError::into_inner);
        guard.as_ref().map(ImmutableBuffer::share)
    }

    /// Replaces the stored bundle.
    ///
    /// Optimistic double-check: a set that matches the current contents
    /// byte-for-byte returns without taking the exclusive lock, so
    /// repeated identical sets never contend with handshake readers. The
    /// unlocked compare can race with another writer; the re-check under
    /// the exclusive lock settles it.
    pub fn set(&self, certs: impl Into<ImmutableBuffer>) {
        let certs = certs.into();

        if self.get().as_ref() == Some(&certs) {
            return;
        }

        let mut guard = self.certs.write().unwrap_or_else(PoisonError::into_inner);
        if guard.as_ref() == Some(&certs) {
            return;
        }

        debug!(len = certs.len(), "replacing default root certificates");
        self.exclusive_writes.fetch_add(1, Ordering::Relaxed);
        *guard = Some(certs);
    }

    /// Exclusive-lock writes performed so far.
    pub(crate) fn exclusive_writes(&self) -> u64 {
        self.exclusive_writes.load(Ordering::Relaxed)
    }

    /// The function pointer handed to the native TLS layer at process
    /// init; it resolves the default bundle at handshake time.
    pub fn override_hook() -> SslRootsOverrideFn {
        get_ssl_roots_override
    }
}

/// Hook body: copies the current bundle out to the caller.
fn get_ssl_roots_override(out: &mut Option<Vec<u8>>) -> SslRootsOverrideResult {
    roots_override_from(DefaultRootCertStore::global(), out)
}

fn roots_override_from(
    store: &DefaultRootCertStore,
    out: &mut Option<Vec<u8>>,
) -> SslRootsOverrideResult {
    match store.get() {
        Some(certs) => {
            // Independent copy, not the store's shared reference.
            *out = Some(certs.as_bytes().to_vec());
            SslRootsOverrideResult::Ok
        }
        None => {
            *out = None;
            SslRootsOverrideResult::Fail
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get_round_trips() {
        let store = DefaultRootCertStore::new();
        assert_eq!(store.get(), None);

        store.set("-----BEGIN CERTIFICATE-----\nAAAA\n-----END CERTIFICATE-----\n");
        let roots = store.get().unwrap();
        assert!(roots.as_str().unwrap().contains("BEGIN CERTIFICATE"));
    }

    #[test]
    fn identical_set_skips_the_exclusive_write() {
        let store = DefaultRootCertStore::new();
        store.set("bundle one");
        assert_eq!(store.exclusive_writes(), 1);

        // Byte-identical: no exclusive lock taken.
        store.set("bundle one");
        assert_eq!(store.exclusive_writes(), 1);

        store.set("bundle two");
        assert_eq!(store.exclusive_writes(), 2);
    }

    #[test]
    fn hook_fails_only_when_never_set() {
        let store = DefaultRootCertStore::new();
        let mut out = None;
        assert_eq!(roots_override_from(&store, &mut out), SslRootsOverrideResult::Fail);
        assert_eq!(out, None);

        store.set("pem bundle");
        assert_eq!(roots_override_from(&store, &mut out), SslRootsOverrideResult::Ok);
        assert_eq!(out.as_deref(), Some(b"pem bundle".as_slice()));

        // An empty bundle is still a set bundle.
        let store = DefaultRootCertStore::new();
        store.set("");
        let mut out = None;
        assert_eq!(roots_override_from(&store, &mut out), SslRootsOverrideResult::Ok);
        assert_eq!(out.as_deref(), Some(b"".as_slice()));
    }

    #[test]
    fn hook_hands_out_an_independent_copy() {
        let store = DefaultRootCertStore::new();
        store.set("first bundle");

        let mut out = None;
        roots_override_from(&store, &mut out);
        let copy = out.unwrap();

        // A later store update must not reach the caller's copy.
        store.set("second bundle");
        assert_eq!(copy, b"first bundle".to_vec());
    }

    #[test]
    fn global_is_a_singleton() {
        let a = DefaultRootCertStore::global() as *const DefaultRootCertStore;
        let b = DefaultRootCertStore::global() as *const DefaultRootCertStore;
        assert_eq!(a, b);
    }

    #[test]
    fn concurrent_readers_share_one_bundle() {
        let store = std::sync::Arc::new(DefaultRootCertStore::new());
        store.set("concurrent bundle");

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = std::sync::Arc::clone(&store);
                std::thread::spawn(move || store.get().unwrap())
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap().as_bytes(), b"concurrent bundle");
        }
    }
}
