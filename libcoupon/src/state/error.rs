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

use std::error::Error;
use std::fmt;

/// An error that may occur on state writes.
#[derive(Debug)]
pub enum StateWriteError {
    /// The existing contents of the storage could not be interpreted
    InvalidEntry(String),
    /// An error occurred with the underlying storage mechanism
    StorageError(Box<dyn Error>),
}

impl fmt::Display for StateWriteError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StateWriteError::InvalidEntry(msg) => write!(f, "Invalid Entry: {}", msg),
            StateWriteError::StorageError(err) => write!(f, "Storage Error: {}", err),
        }
    }
}

impl Error for StateWriteError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            StateWriteError::InvalidEntry(_) => None,
            StateWriteError::StorageError(err) => Some(err.as_ref()),
        }
    }
}

/// An error that may occur on state reads.
#[derive(Debug)]
pub enum StateReadError {
    /// The contents of the storage could not be interpreted
    InvalidEntry(String),
    /// An error occurred with the underlying storage mechanism
    StorageError(Box<dyn Error>),
}

impl fmt::Display for StateReadError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StateReadError::InvalidEntry(msg) => write!(f, "Invalid Entry: {}", msg),
            StateReadError::StorageError(err) => write!(f, "Storage Error: {}", err),
        }
    }
}

impl Error for StateReadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            StateReadError::InvalidEntry(_) => None,
            StateReadError::StorageError(err) => Some(err.as_ref()),
        }
    }
}

impl From<StateReadError> for StateWriteError {
    fn from(err: StateReadError) -> Self {
        match err {
            StateReadError::InvalidEntry(msg) => StateWriteError::InvalidEntry(msg),
            StateReadError::StorageError(err) => StateWriteError::StorageError(err),
        }
    }
}
