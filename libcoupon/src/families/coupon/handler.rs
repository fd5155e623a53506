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

use crate::handler::{ApplyError, TransactionContext, TransactionHandler};
use crate::protocol::coupon::{Coupon, CouponBuilder, FLAG_ACTIVE, FLAG_CONSUMED};
use crate::protocol::invocation::{CouponFunction, Invocation};
use crate::protocol::{FromBytes, IntoBytes};

use super::{COUPON_FAMILY_NAME, COUPON_VERSION, SEED_COUPON_KEY};

/// A transaction handler for the coupon contract.
///
/// By default the handler reproduces the behavior existing ledgers were written with: flags are
/// stored verbatim, and consuming or transferring an unset key writes a new, otherwise empty,
/// coupon. `with_strict_flags` and `with_strict_records` turn those cases into errors.
pub struct CouponTransactionHandler {
    family_name: String,
    versions: Vec<String>,
    strict_flags: bool,
    strict_records: bool,
}

impl Default for CouponTransactionHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl CouponTransactionHandler {
    pub fn new() -> Self {
        CouponTransactionHandler {
            family_name: COUPON_FAMILY_NAME.to_string(),
            versions: vec![COUPON_VERSION.to_owned()],
            strict_flags: false,
            strict_records: false,
        }
    }

    /// Restricts flags to "0" and "1", allows only the "0" to "1" transition, and refuses to
    /// transfer consumed coupons.
    pub fn with_strict_flags(mut self, strict_flags: bool) -> Self {
        self.strict_flags = strict_flags;
        self
    }

    /// Fails consume and transfer when the key is unset or holds bytes that are not a coupon.
    pub fn with_strict_records(mut self, strict_records: bool) -> Self {
        self.strict_records = strict_records;
        self
    }

    /// Writes the seed coupon under `COUPON0`, replacing whatever is stored there.
    pub fn init_ledger(&self, context: &mut dyn TransactionContext) -> Result<Vec<u8>, ApplyError> {
        let seed = CouponBuilder::new()
            .with_number("001".into())
            .with_amount("100".into())
            .with_flag(FLAG_ACTIVE.into())
            .with_owner("hanshuang".into())
            .build()
            .map_err(|err| ApplyError::InternalError(err.to_string()))?;

        save_coupon(SEED_COUPON_KEY, seed, context)?;
        info!("Seed coupon written under {}", SEED_COUPON_KEY);

        Ok(Vec::new())
    }

    /// Args: key, number, amount, flag, owner.
    pub fn create_coupon(
        &self,
        args: &[String],
        context: &mut dyn TransactionContext,
    ) -> Result<Vec<u8>, ApplyError> {
        check_arg_count(CouponFunction::CreateCoupon, args)?;
        let key = &args[0];

        if self.strict_flags {
            check_flag(&args[3])?;
        }

        let coupon = CouponBuilder::new()
            .with_number(args[1].clone())
            .with_amount(args[2].clone())
            .with_flag(args[3].clone())
            .with_owner(args[4].clone())
            .build()
            .map_err(|err| ApplyError::InternalError(err.to_string()))?;

        save_coupon(key, coupon, context)?;

        Ok(Vec::new())
    }

    /// Args: key. Returns the stored bytes unchanged; an unset key yields an empty payload.
    pub fn query_coupon(
        &self,
        args: &[String],
        context: &mut dyn TransactionContext,
    ) -> Result<Vec<u8>, ApplyError> {
        check_arg_count(CouponFunction::QueryCoupon, args)?;

        Ok(context.get_state_entry(&args[0])?.unwrap_or_default())
    }

    /// Args: key, flag.
    pub fn consume_coupon(
        &self,
        args: &[String],
        context: &mut dyn TransactionContext,
    ) -> Result<Vec<u8>, ApplyError> {
        check_arg_count(CouponFunction::ConsumeCoupon, args)?;
        let key = &args[0];
        let new_flag = &args[1];

        let coupon = self.load_coupon(key, context)?;

        if self.strict_flags {
            check_flag(new_flag)?;
            if coupon.flag() != FLAG_ACTIVE || new_flag != FLAG_CONSUMED {
                warn!(
                    "Invalid transaction: during consumeCoupon, {} cannot move from {:?} to {:?}",
                    key,
                    coupon.flag(),
                    new_flag
                );
                return Err(ApplyError::InvalidFlagTransition {
                    key: key.to_string(),
                    from: coupon.flag().to_string(),
                    to: new_flag.to_string(),
                });
            }
        }

        let coupon = coupon
            .into_builder()
            .with_flag(new_flag.clone())
            .build()
            .map_err(|err| ApplyError::InternalError(err.to_string()))?;

        save_coupon(key, coupon, context)?;

        Ok(Vec::new())
    }

    /// Args: key, owner.
    pub fn change_coupon_owner(
        &self,
        args: &[String],
        context: &mut dyn TransactionContext,
    ) -> Result<Vec<u8>, ApplyError> {
        check_arg_count(CouponFunction::ChangeCouponOwner, args)?;
        let key = &args[0];

        let coupon = self.load_coupon(key, context)?;

        if self.strict_flags && coupon.is_consumed() {
            warn!(
                "Invalid transaction: during changeCouponOwner, {} is consumed",
                key
            );
            return Err(ApplyError::CouponConsumed(key.to_string()));
        }

        let coupon = coupon
            .into_builder()
            .with_owner(args[1].clone())
            .build()
            .map_err(|err| ApplyError::InternalError(err.to_string()))?;

        save_coupon(key, coupon, context)?;

        Ok(Vec::new())
    }

    /// Reads the coupon under `key`. Outside strict-records mode an unset key or undecodable
    /// bytes yield a coupon with every field empty.
    fn load_coupon(
        &self,
        key: &str,
        context: &mut dyn TransactionContext,
    ) -> Result<Coupon, ApplyError> {
        match context.get_state_entry(key)? {
            Some(bytes) => match Coupon::from_bytes(&bytes) {
                Ok(coupon) => Ok(coupon),
                Err(err) if self.strict_records => {
                    Err(ApplyError::MalformedRecord(format!("{}: {}", key, err)))
                }
                Err(err) => {
                    warn!("Replacing undecodable coupon under {}: {}", key, err);
                    Ok(Coupon::default())
                }
            },
            None if self.strict_records => Err(ApplyError::RecordNotFound(key.to_string())),
            None => {
                debug!("No coupon under {}, starting from an empty record", key);
                Ok(Coupon::default())
            }
        }
    }
}

impl TransactionHandler for CouponTransactionHandler {
    /// Returns the name of the coupon contract.
    fn family_name(&self) -> &str {
        &self.family_name
    }

    /// Returns the list of versions that the `CouponTransactionHandler` can process.
    fn family_versions(&self) -> &[String] {
        &self.versions
    }

    /// Routes the invocation to the operation registered under its function name.
    ///
    /// # Arguments
    ///
    /// * `invocation` - The function name and arguments to be processed
    /// * `context` - The transaction context which provides access to reading and writing the
    ///               ledger
    fn apply(
        &self,
        invocation: &Invocation,
        context: &mut dyn TransactionContext,
    ) -> Result<Vec<u8>, ApplyError> {
        let function = CouponFunction::from_name(invocation.function()).ok_or_else(|| {
            warn!(
                "Invalid transaction: unknown function {}",
                invocation.function()
            );
            ApplyError::UnknownFunction(invocation.function().to_string())
        })?;
        debug!("Coupon invocation: {} {:?}", function, invocation.args());

        match function {
            CouponFunction::InitLedger => self.init_ledger(context),
            CouponFunction::CreateCoupon => self.create_coupon(invocation.args(), context),
            CouponFunction::QueryCoupon => self.query_coupon(invocation.args(), context),
            CouponFunction::ConsumeCoupon => self.consume_coupon(invocation.args(), context),
            CouponFunction::ChangeCouponOwner => {
                self.change_coupon_owner(invocation.args(), context)
            }
        }
    }
}

fn check_arg_count(function: CouponFunction, args: &[String]) -> Result<(), ApplyError> {
    if args.len() != function.arg_count() {
        warn!(
            "Invalid transaction: {} expects {} arguments, received {}",
            function,
            function.arg_count(),
            args.len()
        );
        return Err(ApplyError::ArgumentCount {
            function: function.name().to_string(),
            expected: function.arg_count(),
            actual: args.len(),
        });
    }
    Ok(())
}

fn check_flag(flag: &str) -> Result<(), ApplyError> {
    if flag == FLAG_ACTIVE || flag == FLAG_CONSUMED {
        Ok(())
    } else {
        Err(ApplyError::InvalidFlag(flag.to_string()))
    }
}

fn save_coupon(
    key: &str,
    coupon: Coupon,
    context: &mut dyn TransactionContext,
) -> Result<(), ApplyError> {
    let bytes = coupon
        .into_bytes()
        .map_err(|err| ApplyError::InternalError(err.to_string()))?;
    context.set_state_entry(key.to_string(), bytes)?;
    Ok(())
}
