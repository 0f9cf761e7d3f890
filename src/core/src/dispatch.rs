//! Routing of named invocations to balance transitions.

use crate::engine::PaymentContract;
use crate::errors::ContractError;
use crate::identity::Credential;
use crate::ledger::{EventSink, Ledger};
use crate::ownership::OwnershipResolver;
use crate::types::Response;
use std::fmt;
use tracing::warn;

/// Message of a successful query for a holder with no recorded balance.
pub const NO_BALANCE: &str = "no balance recorded";

/// The operations the payment contract exposes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Operation {
    /// Overwrite the caller's balance
    Add {
        /// The new balance, stored as given
        amount: String,
    },
    /// Take an amount from the caller's balance
    Debit {
        /// The amount to take
        amount: String,
        /// The asset paid for, carried by the debit event
        asset_ref: String,
    },
    /// Give an amount to the owner of an asset
    Credit {
        /// The asset whose owner is credited
        asset_key: String,
        /// The amount to give
        amount: String,
    },
    /// Read the caller's balance
    Query,
}

impl Operation {
    /// Parses a function name and its arguments.
    pub fn parse(function: &str, args: Vec<String>) -> Result<Self, ContractError> {
        match function {
            "add" => {
                let [amount] = take::<1>("add", args)?;
                Ok(Operation::Add { amount })
            }
            "debit" => {
                let [amount, asset_ref] = take::<2>("debit", args)?;
                Ok(Operation::Debit { amount, asset_ref })
            }
            "credit" => {
                let [asset_key, amount] = take::<2>("credit", args)?;
                Ok(Operation::Credit { asset_key, amount })
            }
            "query" => {
                take::<0>("query", args)?;
                Ok(Operation::Query)
            }
            other => Err(ContractError::UnknownFunction(other.to_string())),
        }
    }

    /// The function name of the operation.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Add { .. } => "add",
            Operation::Debit { .. } => "debit",
            Operation::Credit { .. } => "credit",
            Operation::Query => "query",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Add { amount } => write!(f, "Add {{ amount: {} }}", amount),
            Operation::Debit { amount, asset_ref } => {
                write!(f, "Debit {{ amount: {}, asset_ref: {} }}", amount, asset_ref)
            }
            Operation::Credit { asset_key, amount } => {
                write!(f, "Credit {{ asset_key: {}, amount: {} }}", asset_key, amount)
            }
            Operation::Query => write!(f, "Query"),
        }
    }
}

fn take<const N: usize>(
    function: &'static str,
    args: Vec<String>,
) -> Result<[String; N], ContractError> {
    let actual = args.len();
    <[String; N]>::try_from(args).map_err(|_| ContractError::Argument {
        function,
        expected: N,
        actual,
    })
}

impl<O: OwnershipResolver> PaymentContract<O> {
    /// Runs `function` for the caller presenting `creator` and builds the response.
    pub fn invoke<S: Ledger + EventSink + ?Sized>(
        &self,
        stub: &mut S,
        creator: &Credential,
        function: &str,
        args: Vec<String>,
    ) -> Response {
        match self.execute(stub, creator, function, args) {
            Ok(response) => response,
            Err(e) => {
                warn!(function, kind = e.kind(), "invocation failed: {}", e);
                Response::error(e.status(), e.to_string())
            }
        }
    }

    /// Runs `function` and returns its success response or the typed error.
    ///
    /// A query for a holder with no recorded balance succeeds with an empty
    /// payload and the message [`NO_BALANCE`], so it can be told apart from a
    /// balance that was set to the empty string.
    pub fn execute<S: Ledger + EventSink + ?Sized>(
        &self,
        stub: &mut S,
        creator: &Credential,
        function: &str,
        args: Vec<String>,
    ) -> Result<Response, ContractError> {
        match Operation::parse(function, args)? {
            Operation::Add { amount } => {
                let caller = creator.resolve()?;
                self.add(stub, &caller, &amount)?;
                Ok(Response::success(Vec::new()))
            }
            Operation::Debit { amount, asset_ref } => {
                let caller = creator.resolve()?;
                self.debit(stub, &caller, &amount, &asset_ref)?;
                Ok(Response::success(Vec::new()))
            }
            Operation::Credit { asset_key, amount } => {
                self.credit(stub, &asset_key, &amount)?;
                Ok(Response::success(Vec::new()))
            }
            Operation::Query => {
                let caller = creator.resolve()?;
                Ok(match self.query(stub, &caller)? {
                    Some(balance) => Response::success(balance),
                    None => Response {
                        message: NO_BALANCE.to_string(),
                        ..Response::success(Vec::new())
                    },
                })
            }
        }
    }
}
