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

use clap::ArgMatches;

use coupon::processor::{TransactionProcessor, TransactionResult};
use coupon::protocol::invocation::{Invocation, InvocationBuilder};
use coupon::protocol::FromBytes;
use coupon::state::{Read, Write};

use crate::error::CliError;

pub fn do_init<S: Read + Write>(processor: &TransactionProcessor<S>) -> Result<(), CliError> {
    report(processor.init())
}

pub fn do_invoke<S: Read + Write>(
    processor: &TransactionProcessor<S>,
    matches: &ArgMatches,
) -> Result<(), CliError> {
    let invocation = parse_invocation(matches)?;
    debug!(
        "Invoking {} with {} argument(s)",
        invocation.function(),
        invocation.args().len()
    );
    report(processor.process(&invocation))
}

fn parse_invocation(matches: &ArgMatches) -> Result<Invocation, CliError> {
    if let Some(ctor) = matches.value_of("ctor") {
        return Ok(Invocation::from_bytes(ctor.as_bytes())?);
    }

    let function = matches
        .value_of("function")
        .ok_or_else(|| CliError::User("A function name or --ctor is required".into()))?;
    let args: Vec<String> = matches
        .values_of("args")
        .map(|values| values.map(String::from).collect())
        .unwrap_or_default();

    InvocationBuilder::new()
        .with_function(function.into())
        .with_args(args)
        .build()
        .map_err(|err| CliError::User(err.to_string()))
}

/// Prints the payload of a valid result; an empty payload prints nothing.
fn report(result: TransactionResult) -> Result<(), CliError> {
    match result {
        TransactionResult::Valid { payload, .. } => {
            if !payload.is_empty() {
                println!("{}", String::from_utf8_lossy(&payload));
            }
            Ok(())
        }
        TransactionResult::Invalid { error_message } => Err(CliError::Invalid(error_message)),
    }
}
