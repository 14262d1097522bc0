//! Staged transaction sequencing
//!
//! A transaction runs through three stages, each exactly once and only from
//! the state the previous stage left behind:
//!
//! - `given` registers accounts, metadata and variables;
//! - `send` builds the `TransactionSpec` (amount, source, split plan);
//! - `condition` evaluates branch tags, runs the allocation evaluator and
//!   the ledger applier, and freezes the results.
//!
//! Calling a stage out of order is `FlowError::StateSequence`.

use rust_decimal::Decimal;
use strum_macros::Display;
use tracing::debug;

use moneyflow_core::{Account, CurrencyAmount, Value};
use moneyflow_dsl::{Destination, VariableStore};
use moneyflow_ledger::{apply, AccountStore, Evaluator, TransactionSpec};
use moneyflow_policy::{Expr, MetadataStore, PolicyEvaluator, TagSet};

use crate::error::FlowError;
use crate::input::FlowInput;
use crate::results::TransactionResults;

/// Flow progress marker. `Condition` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum FlowState {
    Initial,
    Given,
    Send,
    Condition,
}

/// Owns everything one transaction needs from setup to final balances.
#[derive(Debug, Default)]
pub struct TransactionFlow {
    state: FlowState,
    accounts: AccountStore,
    metadata: MetadataStore,
    variables: VariableStore,
    tags: TagSet,
    spec: Option<TransactionSpec>,
    results: Option<TransactionResults>,
}

impl Default for FlowState {
    fn default() -> Self {
        FlowState::Initial
    }
}

impl TransactionFlow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-load the given stage from an input snapshot and advance straight
    /// to `Given`. Requires at least one account; placeholder tokens are
    /// validated as they are loaded.
    pub fn with_input(input: FlowInput) -> Result<Self, FlowError> {
        if input.accounts.is_empty() {
            return Err(FlowError::EmptyInput);
        }

        let mut flow = Self::new();
        for account in input.accounts {
            flow.accounts.insert(account);
        }
        for (id, value) in input.metadata {
            flow.metadata.insert(id, value);
        }
        for (placeholder, value) in input.variables {
            flow.variables.insert(placeholder, value)?;
        }
        flow.state = FlowState::Given;
        Ok(flow)
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    /// Setup stage: register accounts, metadata and variables.
    pub fn given<F>(&mut self, setup: F) -> Result<&mut Self, FlowError>
    where
        F: FnOnce(&mut GivenStage<'_>) -> Result<(), FlowError>,
    {
        self.expect(FlowState::Initial, "given")?;
        let mut stage = GivenStage {
            accounts: &mut self.accounts,
            metadata: &mut self.metadata,
            variables: &mut self.variables,
        };
        setup(&mut stage)?;
        self.state = FlowState::Given;
        Ok(self)
    }

    /// Transfer stage: set amount, source and the split plan. The source
    /// id must resolve to a registered account.
    pub fn send<F>(&mut self, build: F) -> Result<&mut Self, FlowError>
    where
        F: FnOnce(&mut SendStage<'_>) -> Result<(), FlowError>,
    {
        self.expect(FlowState::Given, "send")?;
        let mut stage = SendStage {
            variables: &self.variables,
            amount: None,
            source: None,
            destination: None,
        };
        build(&mut stage)?;

        let amount = stage.amount.ok_or(FlowError::MissingField("amount"))?;
        let source_id = stage.source.ok_or(FlowError::MissingField("source"))?;
        let destination = stage
            .destination
            .ok_or(FlowError::MissingField("destination"))?;
        let source = self
            .accounts
            .get(&source_id)
            .cloned()
            .ok_or(FlowError::UnknownAccount(source_id))?;

        debug!(source = %source.id, amount = %amount, "transaction spec built");
        self.spec = Some(TransactionSpec::new(amount, source, destination));
        self.state = FlowState::Send;
        Ok(self)
    }

    /// Finalize stage: apply tag decisions, then evaluate and post the
    /// transaction. Returns the frozen results.
    pub fn condition<F>(&mut self, decide: F) -> Result<TransactionResults, FlowError>
    where
        F: FnOnce(&mut ConditionStage<'_>) -> Result<(), FlowError>,
    {
        self.expect(FlowState::Send, "condition")?;
        let mut stage = ConditionStage {
            metadata: &self.metadata,
            tags: &mut self.tags,
        };
        decide(&mut stage)?;

        // the send stage always leaves a spec behind
        let spec = self.spec.take().ok_or(FlowError::MissingField("spec"))?;
        let postings = Evaluator::evaluate(&spec, &self.tags)?;
        apply(&postings, &mut self.accounts)?;

        let results = TransactionResults::new(&postings, &self.accounts);
        self.results = Some(results.clone());
        self.state = FlowState::Condition;
        Ok(results)
    }

    /// The frozen results, available once `condition` has run.
    pub fn results(&self) -> Result<&TransactionResults, FlowError> {
        self.results.as_ref().ok_or(FlowError::NoResults)
    }

    fn expect(&self, required: FlowState, attempted: &'static str) -> Result<(), FlowError> {
        if self.state != required {
            return Err(FlowError::StateSequence {
                state: self.state,
                attempted,
            });
        }
        Ok(())
    }
}

/// Registers the world the transaction runs in.
pub struct GivenStage<'a> {
    accounts: &'a mut AccountStore,
    metadata: &'a mut MetadataStore,
    variables: &'a mut VariableStore,
}

impl GivenStage<'_> {
    pub fn account(&mut self, id: impl Into<String>, balance: CurrencyAmount) -> &mut Self {
        self.accounts
            .insert(Account::new(id, balance.value, balance.currency));
        self
    }

    pub fn account_with_overdraft(
        &mut self,
        id: impl Into<String>,
        balance: CurrencyAmount,
        limit: Decimal,
    ) -> &mut Self {
        self.accounts.insert(
            Account::new(id, balance.value, balance.currency).with_overdraft(limit),
        );
        self
    }

    pub fn metadata(&mut self, id: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.metadata.insert(id, value);
        self
    }

    pub fn variable(
        &mut self,
        placeholder: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<&mut Self, FlowError> {
        self.variables.insert(placeholder, value)?;
        Ok(self)
    }
}

/// Collects the transfer itself.
pub struct SendStage<'a> {
    variables: &'a VariableStore,
    amount: Option<CurrencyAmount>,
    source: Option<String>,
    destination: Option<Destination>,
}

impl SendStage<'_> {
    pub fn amount(&mut self, amount: CurrencyAmount) -> &mut Self {
        self.amount = Some(amount);
        self
    }

    pub fn source(&mut self, id: impl Into<String>) -> &mut Self {
        self.source = Some(id.into());
        self
    }

    pub fn destination(&mut self, destination: Destination) -> &mut Self {
        self.destination = Some(destination);
        self
    }

    /// Resolve a numeric `%%name%%` variable declared in the given stage.
    pub fn var_number(&self, placeholder: &str) -> Result<Decimal, FlowError> {
        Ok(self.variables.number(placeholder)?)
    }

    /// Resolve a text `%%name%%` variable declared in the given stage.
    pub fn var_text(&self, placeholder: &str) -> Result<String, FlowError> {
        Ok(self.variables.text(placeholder)?)
    }
}

/// Decides which tagged branches post.
pub struct ConditionStage<'a> {
    metadata: &'a MetadataStore,
    tags: &'a mut TagSet,
}

impl ConditionStage<'_> {
    pub fn param(&self, id: &str) -> Result<&Value, FlowError> {
        Ok(self.metadata.param(id)?)
    }

    /// Evaluate a condition expression against the metadata snapshot.
    pub fn eval(&self, expr: &Expr) -> Result<bool, FlowError> {
        Ok(PolicyEvaluator::eval_bool(expr, self.metadata)?)
    }

    pub fn apply_tag(&mut self, tag: impl Into<String>, enabled: bool) -> &mut Self {
        self.tags.apply(tag, enabled);
        self
    }
}
