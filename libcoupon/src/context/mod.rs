/*
 * Copyright 2019 Bitwise IO, Inc.
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

//! A `TransactionContext` that reads through to state and buffers every write.
//!
//! One `Context` lives for exactly one invocation. Its writes are kept as `StateChange`s and are
//! visible to later reads through the same context; nothing reaches state until the owner takes
//! the changes and commits them.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::handler::{ContextError, TransactionContext};
use crate::state::{Read, StateChange};

pub struct Context<'a> {
    reader: &'a dyn Read,
    state_changes: RefCell<Vec<StateChange>>,
}

impl<'a> Context<'a> {
    pub fn new(reader: &'a dyn Read) -> Self {
        Context {
            reader,
            state_changes: RefCell::new(Vec::new()),
        }
    }

    /// Returns the value most recently set for `key` in this context, if any.
    pub fn get_state(&self, key: &str) -> Option<Vec<u8>> {
        self.state_changes
            .borrow()
            .iter()
            .rev()
            .find(|state_change| state_change.has_key(key))
            .map(|state_change| state_change.value.clone())
    }

    /// Checks to see if the key has been set within this context
    pub fn contains(&self, key: &str) -> bool {
        self.state_changes
            .borrow()
            .iter()
            .any(|state_change| state_change.has_key(key))
    }

    pub fn into_state_changes(self) -> Vec<StateChange> {
        self.state_changes.into_inner()
    }
}

impl<'a> TransactionContext for Context<'a> {
    fn get_state_entries(&self, keys: &[String]) -> Result<Vec<(String, Vec<u8>)>, ContextError> {
        let unset_keys = keys
            .iter()
            .filter(|key| !self.contains(key))
            .cloned()
            .collect::<Vec<String>>();

        let mut from_state: HashMap<String, Vec<u8>> = if unset_keys.is_empty() {
            HashMap::new()
        } else {
            self.reader
                .get(&unset_keys)
                .map_err(|err| ContextError::ReadError(Box::new(err)))?
        };

        Ok(keys
            .iter()
            .filter_map(|key| {
                self.get_state(key)
                    .or_else(|| from_state.remove(key))
                    .map(|value| (key.to_string(), value))
            })
            .collect())
    }

    fn set_state_entries(&self, entries: Vec<(String, Vec<u8>)>) -> Result<(), ContextError> {
        self.state_changes.borrow_mut().extend(
            entries
                .into_iter()
                .map(|(key, value)| StateChange { key, value }),
        );
        Ok(())
    }
}
