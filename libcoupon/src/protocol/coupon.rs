// Copyright 2021 Cargill Incorporated
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

//! The coupon record stored in the ledger.
//!
//! A coupon is serialized as a compact JSON object with the keys `number`, `amount`, `flag` and
//! `owner`, in that order. Field contents are opaque to this module: `amount` is never parsed and
//! `flag` is not restricted to the known values.
//!
//! Decoding only accepts a JSON object. Keys are matched case-insensitively, so `{"Owner":"bob"}`
//! sets the owner. Unknown keys are ignored, a `null` value leaves the field empty, and any other
//! non-string value is an error.

use std::error::Error as StdError;

use serde::Serialize;
use serde_json::Value;

use super::{FromBytes, IntoBytes, ProtocolError};

/// Flag value of a coupon that can still be redeemed.
pub const FLAG_ACTIVE: &str = "0";
/// Flag value of a coupon that has been redeemed.
pub const FLAG_CONSUMED: &str = "1";

/// Native implementation of a coupon record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Coupon {
    number: String,
    amount: String,
    flag: String,
    owner: String,
}

impl Coupon {
    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn flag(&self) -> &str {
        &self.flag
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn is_consumed(&self) -> bool {
        self.flag == FLAG_CONSUMED
    }

    /// Returns a builder pre-populated with this coupon's fields.
    pub fn into_builder(self) -> CouponBuilder {
        CouponBuilder::new()
            .with_number(self.number)
            .with_amount(self.amount)
            .with_flag(self.flag)
            .with_owner(self.owner)
    }
}

impl FromBytes<Coupon> for Coupon {
    fn from_bytes(bytes: &[u8]) -> Result<Coupon, ProtocolError> {
        let value: Value = serde_json::from_slice(bytes).map_err(|err| {
            ProtocolError::DeserializationError(format!("Unable to get Coupon from bytes: {}", err))
        })?;
        let entries = match value {
            Value::Object(entries) => entries,
            other => {
                return Err(ProtocolError::DeserializationError(format!(
                    "Unable to get Coupon from bytes: expected a JSON object, found {}",
                    other
                )))
            }
        };

        let mut coupon = Coupon::default();
        for (key, value) in entries {
            let field = match key.to_lowercase().as_str() {
                "number" => &mut coupon.number,
                "amount" => &mut coupon.amount,
                "flag" => &mut coupon.flag,
                "owner" => &mut coupon.owner,
                _ => continue,
            };
            match value {
                Value::String(text) => *field = text,
                Value::Null => (),
                other => {
                    return Err(ProtocolError::DeserializationError(format!(
                        "Unable to get Coupon from bytes: {} is not a string: {}",
                        key, other
                    )))
                }
            }
        }
        Ok(coupon)
    }
}

impl IntoBytes for Coupon {
    fn into_bytes(self) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(&self).map_err(|err| {
            ProtocolError::SerializationError(format!("Unable to get bytes from Coupon: {}", err))
        })
    }
}

#[derive(Debug)]
pub enum CouponBuildError {
    MissingField(String),
}

impl StdError for CouponBuildError {}

impl std::fmt::Display for CouponBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            CouponBuildError::MissingField(ref s) => write!(f, "MissingField: {}", s),
        }
    }
}

#[derive(Default, Clone)]
pub struct CouponBuilder {
    number: Option<String>,
    amount: Option<String>,
    flag: Option<String>,
    owner: Option<String>,
}

impl CouponBuilder {
    pub fn new() -> Self {
        CouponBuilder::default()
    }

    pub fn with_number(mut self, number: String) -> CouponBuilder {
        self.number = Some(number);
        self
    }

    pub fn with_amount(mut self, amount: String) -> CouponBuilder {
        self.amount = Some(amount);
        self
    }

    pub fn with_flag(mut self, flag: String) -> CouponBuilder {
        self.flag = Some(flag);
        self
    }

    pub fn with_owner(mut self, owner: String) -> CouponBuilder {
        self.owner = Some(owner);
        self
    }

    pub fn build(self) -> Result<Coupon, CouponBuildError> {
        let number = self
            .number
            .ok_or_else(|| CouponBuildError::MissingField("number".to_string()))?;

        let amount = self
            .amount
            .ok_or_else(|| CouponBuildError::MissingField("amount".to_string()))?;

        let flag = self
            .flag
            .ok_or_else(|| CouponBuildError::MissingField("flag".to_string()))?;

        let owner = self
            .owner
            .ok_or_else(|| CouponBuildError::MissingField("owner".to_string()))?;

        Ok(Coupon {
            number,
            amount,
            flag,
            owner,
        })
    }
}
