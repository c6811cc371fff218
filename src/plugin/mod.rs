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

//! Synchronous metadata plugin protocol.
//!
//! Once per outgoing call the transport asks a plugin-backed call
//! credential for authentication metadata. The bridge invokes the
//! externally supplied callback, validates its result, and copies it
//! into the fixed-capacity output buffer the protocol dictates, mapping
//! failures to status codes instead of unwinding across the boundary.

pub mod bridge;
pub mod context;
