/*
 * Copyright 2017 Bitwise IO, Inc.
 * Copyright 2019 Cargill Incorporated
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

//! Traits for handling the execution of a coupon invocation.
//!
//! The TransactionHandler trait provides the interface for implementing contract logic. Handlers
//! must be stateless and deterministic. They are provided, along with the invocation itself, a
//! TransactionContext implementation which provides read and write access to the ledger.

mod error;

pub use crate::handler::error::{ApplyError, ContextError};
use crate::protocol::invocation::Invocation;

pub trait TransactionContext {
    /// get_state_entry queries the ledger for data stored under the key given. If the key is
    /// set, the data is returned.
    ///
    /// # Arguments
    ///
    /// * `key` - the ledger key to fetch
    fn get_state_entry(&self, key: &str) -> Result<Option<Vec<u8>>, ContextError> {
        Ok(self
            .get_state_entries(&[key.to_string()])?
            .into_iter()
            .map(|(_, val)| val)
            .next())
    }

    /// get_state_entries queries the ledger for data at each of the keys in the given list.
    /// Only the keys that have been set are returned.
    ///
    /// # Arguments
    ///
    /// * `keys` - the ledger keys to fetch
    fn get_state_entries(&self, keys: &[String]) -> Result<Vec<(String, Vec<u8>)>, ContextError>;

    /// set_state_entry requests that the provided key is set in the ledger to the given data.
    ///
    /// # Arguments
    ///
    /// * `key` - ledger key under which to store the data
    /// * `data` - the bytes to store
    fn set_state_entry(&self, key: String, data: Vec<u8>) -> Result<(), ContextError> {
        self.set_state_entries(vec![(key, data)])
    }

    /// set_state_entries requests that each key in the provided list be set in the ledger to
    /// its corresponding value.
    ///
    /// # Arguments
    ///
    /// * `entries` - pairs of ledger key and the bytes to store under it
    fn set_state_entries(&self, entries: Vec<(String, Vec<u8>)>) -> Result<(), ContextError>;
}

pub trait TransactionHandler: Send {
    /// family_name should return the name of the contract this handler implements,
    /// e.g. "coupon"
    fn family_name(&self) -> &str;

    /// family_versions should return a list of versions this handler can process, e.g. ["1.0"]
    fn family_versions(&self) -> &[String];

    /// Called once when the contract is instantiated on a ledger. The default does nothing.
    fn init(&self, _context: &mut dyn TransactionContext) -> Result<Vec<u8>, ApplyError> {
        Ok(Vec::new())
    }

    /// Apply is the single method where all the business logic for the contract is defined.
    /// It routes the invocation to the named operation and returns that operation's payload,
    /// which is empty for operations that only mutate the ledger.
    fn apply(
        &self,
        invocation: &Invocation,
        context: &mut dyn TransactionContext,
    ) -> Result<Vec<u8>, ApplyError>;
}
