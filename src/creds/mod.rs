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

//! Credential objects.
//!
//! Public channel- and call-credential types over the ref-counted
//! credential core. Each public value owns exactly one reference to its
//! underlying resource, move-only; composition retains inputs inside the
//! core, so releasing a composite never releases its inputs out from
//! under their owners.

pub mod call;
pub mod channel;
pub(crate) mod raw;
