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
use std::error::Error;

#[derive(Debug)]
pub enum ApplyError {
    /// Returned when an operation receives the wrong number of arguments.
    ArgumentCount {
        function: String,
        expected: usize,
        actual: usize,
    },
    /// Returned when the invoked function name has no matching operation.
    UnknownFunction(String),
    /// Returned when reading from or writing to the ledger fails. The underlying error is
    /// carried unchanged.
    LedgerAccess(ContextError),
    /// Returned when the bytes stored under a key do not decode to a coupon.
    MalformedRecord(String),
    /// Returned when an operation requires an existing coupon and the key is unset.
    RecordNotFound(String),
    /// Returned when a flag value is outside the known set of flags.
    InvalidFlag(String),
    /// Returned when a flag change would move a coupon backwards or re-consume it.
    InvalidFlagTransition {
        key: String,
        from: String,
        to: String,
    },
    /// Returned when an operation is not permitted on a consumed coupon.
    CouponConsumed(String),
    /// Returned when an internal error occurs during processing.
    InternalError(String),
}

impl Error for ApplyError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ApplyError::LedgerAccess(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for ApplyError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            ApplyError::ArgumentCount {
                ref function,
                expected,
                actual,
            } => write!(
                f,
                "Incorrect number of arguments for {}. Expecting {}, received {}",
                function, expected, actual
            ),
            ApplyError::UnknownFunction(ref s) => write!(f, "Invalid function name: {}", s),
            ApplyError::LedgerAccess(ref err) => write!(f, "{}", err),
            ApplyError::MalformedRecord(ref s) => write!(f, "MalformedRecord: {}", s),
            ApplyError::RecordNotFound(ref s) => write!(f, "No coupon stored under key {}", s),
            ApplyError::InvalidFlag(ref s) => write!(f, "Invalid coupon flag: {:?}", s),
            ApplyError::InvalidFlagTransition {
                ref key,
                ref from,
                ref to,
            } => write!(
                f,
                "Coupon {} cannot change flag from {:?} to {:?}",
                key, from, to
            ),
            ApplyError::CouponConsumed(ref s) => write!(f, "Coupon {} is already consumed", s),
            ApplyError::InternalError(ref s) => write!(f, "InternalError: {}", s),
        }
    }
}

#[derive(Debug)]
pub enum ContextError {
    /// Returned when the ledger could not be read
    ReadError(Box<dyn Error>),
    /// Returned when the ledger could not be written
    WriteError(Box<dyn Error>),
}

impl Error for ContextError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ContextError::ReadError(err) => Some(&**err),
            ContextError::WriteError(err) => Some(&**err),
        }
    }
}

impl std::fmt::Display for ContextError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            ContextError::ReadError(ref err) => write!(f, "ReadError: {}", err),
            ContextError::WriteError(ref err) => write!(f, "WriteError: {}", err),
        }
    }
}

impl From<ContextError> for ApplyError {
    fn from(context_error: ContextError) -> Self {
        ApplyError::LedgerAccess(context_error)
    }
}
