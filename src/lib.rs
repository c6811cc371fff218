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

//! lilith-creds: credential composition and metadata plugin bridge.
//!
//! This library models channel-level and call-level authentication
//! credentials for a secure RPC transport, lets them be composited, and
//! bridges the transport's synchronous per-call metadata protocol to an
//! externally supplied authentication callback. It also maintains the
//! process-wide default root certificate store the TLS layer consults at
//! handshake time.
//!
//! The TLS handshake itself, certificate validation, and transport I/O
//! live outside this crate; it manages credential objects, their
//! composition, and the metadata-retrieval protocol only.

pub mod buffer;
pub mod constants;
pub mod creds;
pub mod errors;
pub mod metadata;
pub mod plugin;
pub mod roots;

mod verification;
