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

#[macro_use]
extern crate clap;
#[macro_use]
extern crate log;

mod error;
mod invoke;

use clap::Arg;
use log::LevelFilter;

use coupon::families::coupon::CouponTransactionHandler;
use coupon::processor::TransactionProcessor;
use coupon::state::file::FileState;

const APP_NAME: &str = env!("CARGO_PKG_NAME");
const VERSION: &str = env!("CARGO_PKG_VERSION");
const DEFAULT_LEDGER: &str = "coupon-ledger.json";

fn run() -> Result<(), error::CliError> {
    // get_matches() exits with usage on a missing subcommand because of
    // SubcommandRequiredElseHelp.
    let mut app = clap_app!(coupon =>
        (name: APP_NAME)
        (version: VERSION)
        (about: "Runs coupon ledger invocations against a file-backed ledger")
        (@setting SubcommandRequiredElseHelp)
        (@arg verbose: -v --verbose +multiple "increase output verbosity")
        (@arg ledger: -l --ledger +takes_value "ledger file, created on first write")
        (@subcommand init =>
            (about: "run the contract's instantiation hook")
        )
        (@subcommand invoke =>
            (about: "dispatch one function to the coupon contract")
            (@arg ctor: -c --ctor +takes_value conflicts_with[function]
             "invocation as JSON, e.g. {\"Args\":[\"queryCoupon\",\"COUPON0\"]}")
            (@arg function: +takes_value required_unless[ctor] "function name")
            (@arg args: +takes_value +multiple "function arguments")
        )
    );

    app = app
        .arg(
            Arg::with_name("strict_flags")
                .long("strict-flags")
                .long_help("Only allow the 0 to 1 flag transition and refuse to transfer consumed coupons"),
        )
        .arg(
            Arg::with_name("strict_records")
                .long("strict-records")
                .long_help("Fail consume and transfer on unset keys or undecodable records"),
        );

    let matches = app.get_matches();

    let logger = simple_logger::SimpleLogger::new()
        // Switch to UTC timestamps, as local timestamps are not stable, by default. They are only
        // available if the compiler flag "unsound_local_offset" has been set.
        .with_utc_timestamps();
    let logger = match matches.occurrences_of("verbose") {
        0 => logger.with_level(LevelFilter::Warn),
        1 => logger.with_level(LevelFilter::Info),
        2 => logger.with_level(LevelFilter::Debug),
        _ => logger.with_level(LevelFilter::Trace),
    };
    logger.init()?;

    let ledger = matches.value_of("ledger").unwrap_or(DEFAULT_LEDGER);
    info!("Using ledger file {}", ledger);

    let handler = CouponTransactionHandler::new()
        .with_strict_flags(matches.is_present("strict_flags"))
        .with_strict_records(matches.is_present("strict_records"));
    if matches.is_present("strict_flags") || matches.is_present("strict_records") {
        warn!("Running with strict checks; results may differ from existing ledger contents");
    }

    let processor = TransactionProcessor::new(Box::new(handler), FileState::new(ledger));

    match matches.subcommand() {
        ("init", Some(_)) => invoke::do_init(&processor),
        ("invoke", Some(invoke_matches)) => invoke::do_invoke(&processor, invoke_matches),
        _ => Err(error::CliError::User("A subcommand is required".into())),
    }
}

fn main() {
    if let Err(e) = run() {
        println!("{}", e);
        std::process::exit(1);
    }
}
