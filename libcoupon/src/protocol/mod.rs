/*
 * Copyright 2019 Bitwise IO, Inc.
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

//! Native structs for coupon records and invocations, and their byte representations.

pub mod coupon;
pub mod invocation;

use std::error::Error as StdError;

#[derive(Debug)]
pub enum ProtocolError {
    SerializationError(String),
    DeserializationError(String),
    InvalidInvocation(String),
}

impl StdError for ProtocolError {}

impl std::fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            ProtocolError::SerializationError(ref s) => write!(f, "SerializationError: {}", s),
            ProtocolError::DeserializationError(ref s) => {
                write!(f, "DeserializationError: {}", s)
            }
            ProtocolError::InvalidInvocation(ref s) => write!(f, "InvalidInvocation: {}", s),
        }
    }
}

/// Decodes a native struct from the bytes stored in the ledger or received from the host.
pub trait FromBytes<T> {
    fn from_bytes(bytes: &[u8]) -> Result<T, ProtocolError>;
}

/// Encodes a native struct into the bytes stored in the ledger or sent to the host.
pub trait IntoBytes: Sized {
    fn into_bytes(self) -> Result<Vec<u8>, ProtocolError>;
}
