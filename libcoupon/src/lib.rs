/*
 * Copyright 2018 Bitwise IO, Inc.
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

//! Coupon ledger transaction handlers.
//!
//! Coupons are four-field records (`number`, `amount`, `flag`, `owner`) stored under
//! caller-chosen keys in a key-value ledger. The [`families::coupon`] handler implements the
//! state transitions (create, query, consume, change owner, and the seed operation) against the
//! [`handler::TransactionContext`] ledger accessor supplied by the host.
//!
//! The [`state`], [`context`] and [`processor`] modules provide a host-side harness: ledger
//! backends, a context that buffers writes until a handler succeeds, and a processor that turns
//! one invocation into a [`processor::TransactionResult`].

pub mod context;
pub mod families;
pub mod handler;
pub mod processor;
pub mod protocol;
pub mod state;

#[macro_use]
extern crate log;
