// Copyright 2018 Cargill Incorporated
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

use std::error::Error as StdError;

use coupon::protocol::ProtocolError;

#[derive(Debug)]
pub enum CliError {
    /// The user has provided invalid inputs; error string
    /// is appropriate for display to the user without additional context
    User(String),
    /// The invocation was processed and rejected
    Invalid(String),
    Io(std::io::Error),
    Protocol(ProtocolError),
    Logging(log::SetLoggerError),
}

impl StdError for CliError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            CliError::User(_) => None,
            CliError::Invalid(_) => None,
            CliError::Io(err) => Some(err),
            CliError::Protocol(err) => Some(err),
            CliError::Logging(err) => Some(err),
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            CliError::User(ref s) => write!(f, "Error: {}", s),
            CliError::Invalid(ref s) => write!(f, "Error: {}", s),
            CliError::Io(ref err) => write!(f, "IoError: {}", err),
            CliError::Protocol(ref err) => write!(f, "ProtocolError: {}", err),
            CliError::Logging(ref err) => write!(f, "LoggingError: {}", err),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}

impl From<ProtocolError> for CliError {
    fn from(e: ProtocolError) -> Self {
        CliError::Protocol(e)
    }
}

impl From<log::SetLoggerError> for CliError {
    fn from(e: log::SetLoggerError) -> Self {
        CliError::Logging(e)
    }
}
