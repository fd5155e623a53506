/*
 * Copyright 2018 Bitwise IO, Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 * -----------------------------------------------------------------------------
 */

//! Methods for interacting with ledger state.
//!
//! Ledger state is managed via the implementation of two traits: `Write` and `Read`. These
//! provide commit and read access, respectively, to an underlying storage mechanism. The
//! storage holds the current value of every key; it keeps no history.

pub mod error;
#[cfg(feature = "state-file")]
pub mod file;
pub mod hashmap;

pub use crate::state::error::{StateReadError, StateWriteError};
use std::collections::HashMap;

/// A write to be applied to state: store `value` under `key`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateChange {
    pub key: String,
    pub value: Vec<u8>,
}

impl StateChange {
    pub fn has_key(&self, key: &str) -> bool {
        self.key == key
    }
}

/// `state::Write` provides a way to write to a particular state storage system.
///
/// Implementations are expected to be thread-safe.
pub trait Write: Sync + Send {
    /// Persist the given changes, in order, to the underlying storage mechanism. Either every
    /// change is persisted or none is.
    ///
    /// # Errors
    ///
    /// Any issues with committing the changes will return a `StateWriteError`.
    fn commit(&self, state_changes: &[StateChange]) -> Result<(), StateWriteError>;
}

/// `state::Read` provides a way to retrieve state from a particular storage system.
///
/// Implementations are expected to be thread-safe.
pub trait Read: Sync + Send {
    /// Attempt to retrieve the given slice of keys.
    ///
    /// The results of the get will be returned in a `HashMap`. Only keys that were found will
    /// be in this map. Keys missing from the map can be assumed to be missing from the
    /// underlying storage system as well.
    ///
    /// # Errors
    ///
    /// `StateReadError` is returned if any issues occur while trying to fetch the values.
    fn get(&self, keys: &[String]) -> Result<HashMap<String, Vec<u8>>, StateReadError>;
}
