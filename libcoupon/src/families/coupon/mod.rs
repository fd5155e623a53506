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

//! The coupon contract.
//!
//! The following functions can be dispatched to the [`CouponTransactionHandler`]:
//!
//! initLedger - Write the seed coupon under `COUPON0`
//! createCoupon key number amount flag owner - Write a new coupon, replacing any existing one
//! queryCoupon key - Return the bytes stored under the key
//! consumeCoupon key flag - Replace the coupon's flag
//! changeCouponOwner key owner - Replace the coupon's owner

mod handler;

pub use handler::CouponTransactionHandler;

pub const COUPON_FAMILY_NAME: &str = "coupon";
pub const COUPON_VERSION: &str = "1.0";

/// Ledger key the seed coupon is written under by `initLedger`.
pub const SEED_COUPON_KEY: &str = "COUPON0";
