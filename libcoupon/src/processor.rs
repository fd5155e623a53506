/*
 * Copyright 2021 Cargill Incorporated
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

//! Runs single invocations against a state backend.
//!
//! The processor gives each invocation a fresh [`Context`] over the state, applies the handler,
//! and commits the buffered writes only when the handler succeeds.

use crate::context::Context;
use crate::handler::{ApplyError, ContextError, TransactionHandler};
use crate::protocol::invocation::Invocation;
use crate::state::{Read, StateChange, Write};

/// A `TransactionResult` contains either the valid or invalid result of an invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionResult {
    Valid {
        /// Bytes returned by the operation; empty for operations that only write.
        payload: Vec<u8>,
        /// Writes committed to state by the invocation.
        state_changes: Vec<StateChange>,
    },
    Invalid {
        /// Human-readable reason explaining why the invocation failed
        error_message: String,
    },
}

pub struct TransactionProcessor<S>
where
    S: Read + Write,
{
    handler: Box<dyn TransactionHandler>,
    state: S,
}

impl<S> TransactionProcessor<S>
where
    S: Read + Write,
{
    pub fn new(handler: Box<dyn TransactionHandler>, state: S) -> Self {
        TransactionProcessor { handler, state }
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    /// Runs the handler's instantiation hook.
    pub fn init(&self) -> TransactionResult {
        self.execute("init", |handler, context| handler.init(context))
    }

    /// Dispatches one invocation.
    pub fn process(&self, invocation: &Invocation) -> TransactionResult {
        self.execute(invocation.function(), |handler, context| {
            handler.apply(invocation, context)
        })
    }

    fn execute<F>(&self, label: &str, apply: F) -> TransactionResult
    where
        F: FnOnce(&dyn TransactionHandler, &mut Context<'_>) -> Result<Vec<u8>, ApplyError>,
    {
        let mut context = Context::new(&self.state);

        let payload = match apply(&*self.handler, &mut context) {
            Ok(payload) => payload,
            Err(err) => {
                info!("{} failed: {}", label, err);
                return TransactionResult::Invalid {
                    error_message: err.to_string(),
                };
            }
        };

        let state_changes = context.into_state_changes();
        if let Err(err) = self.state.commit(&state_changes) {
            error!("Unable to commit {} result: {}", label, err);
            return TransactionResult::Invalid {
                error_message: ApplyError::from(ContextError::WriteError(Box::new(err)))
                    .to_string(),
            };
        }
        debug!("{} committed {} change(s)", label, state_changes.len());

        TransactionResult::Valid {
            payload,
            state_changes,
        }
    }
}
