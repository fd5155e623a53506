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

//! Provides a simple, in-memory implementation of state backed by `std::collections::HashMap`.

use super::error::{StateReadError, StateWriteError};
use super::{Read, StateChange, Write};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// An in-memory implementation of state.
///
/// Clones share the same underlying map, so a clone handed to a processor observes every commit
/// made through the original.
#[derive(Debug, Clone, Default)]
pub struct HashMapState {
    state: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl HashMapState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently set.
    pub fn len(&self) -> usize {
        self.state.lock().expect("Couldn't lock state mutex!").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Write for HashMapState {
    fn commit(&self, state_changes: &[StateChange]) -> Result<(), StateWriteError> {
        let mut state = self.state.lock().expect("Couldn't lock state mutex!");
        for change in state_changes {
            state.insert(change.key.clone(), change.value.clone());
        }
        Ok(())
    }
}

impl Read for HashMapState {
    fn get(&self, keys: &[String]) -> Result<HashMap<String, Vec<u8>>, StateReadError> {
        let state = self.state.lock().expect("Couldn't lock state mutex!");
        Ok(keys
            .iter()
            .cloned()
            .filter_map(|k| state.get(&k).cloned().map(|v| (k, v)))
            .collect())
    }
}
