//! Runs invocations inside transactions and commits the successful ones.

use crate::engine::PaymentContract;
use crate::errors::TxError;
use crate::identity::Credential;
use crate::ownership::OwnershipResolver;
use crate::tx::{StateStore, Transaction};
use crate::types::{CommittedEvent, Response, TxId};
use tracing::{info, info_span, warn};

/// The outcome of a submitted invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Receipt {
    /// The transaction id
    pub tx_id: TxId,
    /// The contract's response
    pub response: Response,
    /// Whether the transaction's effects were committed
    pub committed: bool,
    /// The committed event, if the invocation set one
    pub event: Option<CommittedEvent>,
}

/// Submits invocations of a [`PaymentContract`] against a [`StateStore`].
pub struct Executor<S, O> {
    store: S,
    contract: PaymentContract<O>,
}

impl<S: StateStore, O: OwnershipResolver> Executor<S, O> {
    /// Creates an executor over `store`.
    pub fn new(store: S, contract: PaymentContract<O>) -> Self {
        Self { store, contract }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The contract being executed.
    pub fn contract(&self) -> &PaymentContract<O> {
        &self.contract
    }

    /// Runs one invocation and commits it if the contract succeeded.
    ///
    /// A failed invocation is not an error here: its receipt carries the
    /// error response and nothing is committed. `Err` means the commit itself
    /// failed, for example on a read conflict.
    pub fn submit(
        &self,
        creator: &Credential,
        function: &str,
        args: Vec<String>,
    ) -> Result<Receipt, TxError> {
        let mut tx = Transaction::new(&self.store, creator);
        let tx_id = tx.tx_id().clone();

        let span = info_span!("tx", tx_id = %tx_id, function);
        let _enter = span.enter();

        let response = self.contract.invoke(&mut tx, creator, function, args);
        if !response.is_ok() {
            warn!(status = response.status, "invocation rejected, nothing committed");
            return Ok(Receipt {
                tx_id,
                response,
                committed: false,
                event: None,
            });
        }

        let event = tx.commit()?;
        info!(event = ?event.as_ref().map(|e| &e.name), "transaction committed");

        Ok(Receipt {
            tx_id,
            response,
            committed: true,
            event,
        })
    }
}
