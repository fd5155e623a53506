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

//! A function name plus positional string arguments, as handed over by the host dispatcher.

use std::error::Error as StdError;

use serde::{Deserialize, Serialize};

use super::{FromBytes, IntoBytes, ProtocolError};

/// The operations exposed by the coupon contract, keyed by their dispatch names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CouponFunction {
    InitLedger,
    CreateCoupon,
    QueryCoupon,
    ConsumeCoupon,
    ChangeCouponOwner,
}

impl CouponFunction {
    /// Looks up the operation registered under `name`. Names are case-sensitive.
    pub fn from_name(name: &str) -> Option<CouponFunction> {
        match name {
            "initLedger" => Some(CouponFunction::InitLedger),
            "createCoupon" => Some(CouponFunction::CreateCoupon),
            "queryCoupon" => Some(CouponFunction::QueryCoupon),
            "consumeCoupon" => Some(CouponFunction::ConsumeCoupon),
            "changeCouponOwner" => Some(CouponFunction::ChangeCouponOwner),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CouponFunction::InitLedger => "initLedger",
            CouponFunction::CreateCoupon => "createCoupon",
            CouponFunction::QueryCoupon => "queryCoupon",
            CouponFunction::ConsumeCoupon => "consumeCoupon",
            CouponFunction::ChangeCouponOwner => "changeCouponOwner",
        }
    }

    /// Number of positional arguments the operation requires, not counting the function name.
    pub fn arg_count(&self) -> usize {
        match self {
            CouponFunction::InitLedger => 0,
            CouponFunction::CreateCoupon => 5,
            CouponFunction::QueryCoupon => 1,
            CouponFunction::ConsumeCoupon => 2,
            CouponFunction::ChangeCouponOwner => 2,
        }
    }
}

impl std::fmt::Display for CouponFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    function: String,
    args: Vec<String>,
}

impl Invocation {
    pub fn function(&self) -> &str {
        &self.function
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Splits a flat argument list whose first element is the function name.
    pub fn from_args(mut args: Vec<String>) -> Result<Invocation, ProtocolError> {
        if args.is_empty() {
            return Err(ProtocolError::InvalidInvocation(
                "Invocation must name a function".to_string(),
            ));
        }
        let function = args.remove(0);
        Ok(Invocation { function, args })
    }
}

/// The constructor message sent by the host: either `{"Args": [function, args...]}` or
/// `{"function": function, "Args": [args...]}`.
#[derive(Serialize, Deserialize)]
struct ConstructorMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    function: Option<String>,
    #[serde(rename = "Args", alias = "args", default)]
    args: Vec<String>,
}

impl FromBytes<Invocation> for Invocation {
    fn from_bytes(bytes: &[u8]) -> Result<Invocation, ProtocolError> {
        let message: ConstructorMessage = serde_json::from_slice(bytes).map_err(|err| {
            ProtocolError::DeserializationError(format!(
                "Unable to get Invocation from bytes: {}",
                err
            ))
        })?;

        match message.function {
            Some(function) => Ok(Invocation {
                function,
                args: message.args,
            }),
            None => Invocation::from_args(message.args),
        }
    }
}

impl IntoBytes for Invocation {
    fn into_bytes(self) -> Result<Vec<u8>, ProtocolError> {
        let mut args = Vec::with_capacity(self.args.len() + 1);
        args.push(self.function);
        args.extend(self.args);
        serde_json::to_vec(&ConstructorMessage {
            function: None,
            args,
        })
        .map_err(|err| {
            ProtocolError::SerializationError(format!(
                "Unable to get bytes from Invocation: {}",
                err
            ))
        })
    }
}

#[derive(Debug)]
pub enum InvocationBuildError {
    MissingField(String),
}

impl StdError for InvocationBuildError {}

impl std::fmt::Display for InvocationBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            InvocationBuildError::MissingField(ref s) => write!(f, "MissingField: {}", s),
        }
    }
}

#[derive(Default, Clone)]
pub struct InvocationBuilder {
    function: Option<String>,
    args: Vec<String>,
}

impl InvocationBuilder {
    pub fn new() -> Self {
        InvocationBuilder::default()
    }

    pub fn with_function(mut self, function: String) -> InvocationBuilder {
        self.function = Some(function);
        self
    }

    pub fn with_args(mut self, args: Vec<String>) -> InvocationBuilder {
        self.args = args;
        self
    }

    pub fn build(self) -> Result<Invocation, InvocationBuildError> {
        let function = self
            .function
            .ok_or_else(|| InvocationBuildError::MissingField("function".to_string()))?;

        Ok(Invocation {
            function,
            args: self.args,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_table() {
        for function in &[
            CouponFunction::InitLedger,
            CouponFunction::CreateCoupon,
            CouponFunction::QueryCoupon,
            CouponFunction::ConsumeCoupon,
            CouponFunction::ChangeCouponOwner,
        ] {
            assert_eq!(CouponFunction::from_name(function.name()), Some(*function));
        }
        assert_eq!(CouponFunction::from_name("queryAllCoupon"), None);
        assert_eq!(CouponFunction::from_name("CreateCoupon"), None);
    }

    #[test]
    fn test_from_bytes_args_only() {
        let invocation =
            Invocation::from_bytes(br#"{"Args":["consumeCoupon","COUPON0","1"]}"#).unwrap();
        assert_eq!(invocation.function(), "consumeCoupon");
        assert_eq!(invocation.args(), &["COUPON0".to_string(), "1".to_string()]);
    }

    #[test]
    fn test_from_bytes_with_function() {
        let invocation =
            Invocation::from_bytes(br#"{"function":"queryCoupon","args":["COUPON0"]}"#).unwrap();
        assert_eq!(invocation.function(), "queryCoupon");
        assert_eq!(invocation.args(), &["COUPON0".to_string()]);
    }

    #[test]
    fn test_from_bytes_rejects_empty_args() {
        match Invocation::from_bytes(br#"{"Args":[]}"#) {
            Err(ProtocolError::InvalidInvocation(_)) => (),
            res => panic!("Expected InvalidInvocation, got {:?}", res),
        }
        assert!(Invocation::from_bytes(b"createCoupon").is_err());
    }

    #[test]
    fn test_into_bytes_uses_args_form() {
        let invocation = InvocationBuilder::new()
            .with_function("initLedger".into())
            .build()
            .unwrap();
        assert_eq!(invocation.into_bytes().unwrap(), br#"{"Args":["initLedger"]}"#.to_vec());
    }

    #[test]
    fn test_builder_requires_function() {
        assert!(InvocationBuilder::new()
            .with_args(vec!["COUPON0".into()])
            .build()
            .is_err());
    }
}
