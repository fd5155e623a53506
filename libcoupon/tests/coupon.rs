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

use coupon::families::coupon::{CouponTransactionHandler, SEED_COUPON_KEY};
use coupon::processor::{TransactionProcessor, TransactionResult};
use coupon::protocol::coupon::Coupon;
use coupon::protocol::invocation::Invocation;
use coupon::protocol::FromBytes;
#[cfg(feature = "state-file")]
use coupon::state::file::FileState;
use coupon::state::hashmap::HashMapState;
use coupon::state::{Read, Write};

#[cfg(feature = "state-file")]
use tempdir::TempDir;

fn processor<S: Read + Write>(state: S) -> TransactionProcessor<S> {
    TransactionProcessor::new(Box::new(CouponTransactionHandler::new()), state)
}

fn run<S: Read + Write>(processor: &TransactionProcessor<S>, args: &[&str]) -> TransactionResult {
    let invocation = Invocation::from_args(args.iter().map(|a| a.to_string()).collect())
        .expect("Unable to build invocation");
    processor.process(&invocation)
}

fn payload(result: TransactionResult) -> Vec<u8> {
    match result {
        TransactionResult::Valid { payload, .. } => payload,
        TransactionResult::Invalid { error_message } => {
            panic!("Expected a valid result, got: {}", error_message)
        }
    }
}

fn query<S: Read + Write>(processor: &TransactionProcessor<S>, key: &str) -> Vec<u8> {
    payload(run(processor, &["queryCoupon", key]))
}

fn query_coupon<S: Read + Write>(processor: &TransactionProcessor<S>, key: &str) -> Coupon {
    Coupon::from_bytes(&query(processor, key)).expect("Stored bytes are not a coupon")
}

#[test]
fn create_then_query_returns_fields() {
    let processor = processor(HashMapState::new());

    for &(key, number, amount, flag, owner) in [
        ("k1", "002", "50", "0", "alice"),
        ("k2", "", "", "", ""),
        ("k3", "X-9", "12.75", "1", "bob"),
    ]
    .iter()
    {
        payload(run(
            &processor,
            &["createCoupon", key, number, amount, flag, owner],
        ));
        let coupon = query_coupon(&processor, key);
        assert_eq!(coupon.number(), number);
        assert_eq!(coupon.amount(), amount);
        assert_eq!(coupon.flag(), flag);
        assert_eq!(coupon.owner(), owner);
    }
}

#[test]
fn seed_coupon() {
    let processor = processor(HashMapState::new());
    payload(run(&processor, &["initLedger"]));

    let coupon = query_coupon(&processor, SEED_COUPON_KEY);
    assert_eq!(coupon.number(), "001");
    assert_eq!(coupon.amount(), "100");
    assert_eq!(coupon.flag(), "0");
    assert_eq!(coupon.owner(), "hanshuang");
}

#[test]
fn change_owner_then_consume() {
    let processor = processor(HashMapState::new());
    payload(run(&processor, &["initLedger"]));
    let original = query_coupon(&processor, SEED_COUPON_KEY);

    payload(run(
        &processor,
        &["changeCouponOwner", SEED_COUPON_KEY, "lisi"],
    ));
    let transferred = query_coupon(&processor, SEED_COUPON_KEY);
    assert_eq!(transferred.owner(), "lisi");
    assert_eq!(
        transferred
            .clone()
            .into_builder()
            .with_owner("hanshuang".into())
            .build()
            .unwrap(),
        original
    );

    payload(run(&processor, &["consumeCoupon", SEED_COUPON_KEY, "1"]));
    let consumed = query_coupon(&processor, SEED_COUPON_KEY);
    assert_eq!(consumed.flag(), "1");
    assert_eq!(
        consumed.into_builder().with_flag("0".into()).build().unwrap(),
        transferred
    );
}

#[test]
fn wrong_argument_count_writes_nothing() {
    let state = HashMapState::new();
    let processor = processor(state.clone());
    payload(run(
        &processor,
        &["createCoupon", "k1", "002", "50", "0", "alice"],
    ));
    let before = query(&processor, "k1");

    for args in &[
        &["createCoupon", "k1", "003", "60", "0"][..],
        &["createCoupon", "k1", "003", "60", "0", "bob", "extra"][..],
    ] {
        match run(&processor, args) {
            TransactionResult::Invalid { error_message } => {
                assert!(error_message.starts_with("Incorrect number of arguments"))
            }
            res => panic!("Expected Invalid, got {:?}", res),
        }
    }

    assert_eq!(query(&processor, "k1"), before);
    assert_eq!(state.len(), 1);
}

#[test]
fn query_unwritten_key_is_empty() {
    let processor = processor(HashMapState::new());
    assert!(query(&processor, "never-written").is_empty());
}

#[test]
fn unknown_function_is_reported() {
    let state = HashMapState::new();
    let processor = processor(state.clone());

    match run(&processor, &["deleteCoupon", "k1"]) {
        TransactionResult::Invalid { error_message } => {
            assert_eq!(error_message, "Invalid function name: deleteCoupon")
        }
        res => panic!("Expected Invalid, got {:?}", res),
    }
    assert!(state.is_empty());
}

#[test]
fn repeated_create_is_idempotent() {
    let once = HashMapState::new();
    let twice = HashMapState::new();
    let args = ["createCoupon", "k1", "002", "50", "0", "alice"];

    payload(run(&processor(once.clone()), &args));
    let processor_twice = processor(twice.clone());
    payload(run(&processor_twice, &args));
    payload(run(&processor_twice, &args));

    let keys = ["k1".to_string()];
    assert_eq!(once.get(&keys).unwrap(), twice.get(&keys).unwrap());
    assert_eq!(once.len(), twice.len());
}

#[cfg(feature = "state-file")]
#[test]
fn file_ledger_survives_restart() {
    let temp_dir = TempDir::new("file_ledger_survives_restart").unwrap();
    let path = temp_dir.path().join("coupon-ledger.json");

    payload(run(&processor(FileState::new(&path)), &["initLedger"]));
    payload(run(
        &processor(FileState::new(&path)),
        &["consumeCoupon", SEED_COUPON_KEY, "1"],
    ));

    let coupon = query_coupon(&processor(FileState::new(&path)), SEED_COUPON_KEY);
    assert_eq!(coupon.flag(), "1");
    assert_eq!(coupon.owner(), "hanshuang");
}
