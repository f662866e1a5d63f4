use commons::{ContractError, ContractResult, ContractTokenId, CustomContractError};
use concordium_cis2::TokenIdU64;
use concordium_std::*;
use core::ops::DerefMut;

use crate::{DEFAULT_MINT_FEE, DEFAULT_TRANSFER_FEE};

/// The token ledger: which address owns which token, and which addresses are
/// enabled as operators for an owner.
#[derive(Serial, DeserialWithState, StateClone)]
#[concordium(state_parameter = "S")]
pub struct Ledger<S: HasStateApi> {
    /// Current owner of every minted token.
    owners: StateMap<ContractTokenId, Address, S>,
    /// The addresses enabled as operators for each owner.
    operators: StateMap<Address, StateSet<Address, S>, S>,
}

impl<S: HasStateApi> Ledger<S> {
    /// Creates a ledger with no tokens and no operators.
    pub fn empty(state_builder: &mut StateBuilder<S>) -> Self {
        Self {
            owners: state_builder.new_map(),
            operators: state_builder.new_map(),
        }
    }

    /// Record a freshly issued token as owned by `owner`.
    pub fn mint(&mut self, token_id: ContractTokenId, owner: Address) -> ContractResult<()> {
        ensure!(
            self.owners.get(&token_id).is_none(),
            CustomContractError::TokenIdAlreadyExists.into()
        );
        self.owners.insert(token_id, owner);
        Ok(())
    }

    /// Current owner of the token.
    pub fn owner_of(&self, token_id: &ContractTokenId) -> ContractResult<Address> {
        self.owners
            .get(token_id)
            .map(|owner| *owner)
            .ok_or(ContractError::InvalidTokenId)
    }

    /// Move the token from `from` to `to` on behalf of `spender`. The spender
    /// must be the current owner or an enabled operator of the owner.
    pub fn transfer(
        &mut self,
        spender: &Address,
        from: &Address,
        to: Address,
        token_id: &ContractTokenId,
    ) -> ContractResult<()> {
        ensure!(
            spender == from || self.is_operator(from, spender),
            ContractError::Unauthorized
        );
        self.force_transfer(from, to, token_id)
    }

    /// Move the token from `from` to `to` without a spender check. `from` must
    /// still be the current owner.
    pub fn force_transfer(
        &mut self,
        from: &Address,
        to: Address,
        token_id: &ContractTokenId,
    ) -> ContractResult<()> {
        let owner = self.owner_of(token_id)?;
        ensure_eq!(owner, *from, ContractError::InsufficientFunds);
        self.owners.insert(*token_id, to);
        Ok(())
    }

    /// Add a new operator for the given owner.
    ///
    /// Succeeds even if the `operator` is already an operator for the `owner`.
    pub fn add_operator(
        &mut self,
        owner: &Address,
        operator: &Address,
        state_builder: &mut StateBuilder<S>,
    ) {
        self.operators
            .entry(*owner)
            .or_insert_with(|| state_builder.new_set())
            .deref_mut()
            .insert(*operator);
    }

    /// Remove an operator for the given owner.
    /// Succeeds even if the `operator` is _not_ an operator for the `owner`.
    pub fn remove_operator(&mut self, owner: &Address, operator: &Address) {
        self.operators
            .get_mut(owner)
            .map(|mut operators| operators.remove(operator));
    }

    /// Check if `address` is an operator for `owner`.
    pub fn is_operator(&self, owner: &Address, address: &Address) -> bool {
        self.operators
            .get(owner)
            .map(|operators| operators.contains(address))
            .unwrap_or(false)
    }
}

/// The contract state.
#[derive(Serial, DeserialWithState, StateClone)]
#[concordium(state_parameter = "S")]
pub struct State<S: HasStateApi> {
    /// The account allowed to mint and transfer for free, change the fees and
    /// the base URL, and withdraw the collected fees.
    pub admin: AccountAddress,
    /// Payment required for a public `mint` call.
    pub mint_fee: Amount,
    /// Payment required for a public `transfer` call.
    pub transfer_fee: Amount,
    /// Base URL for token metadata. Empty means no metadata.
    pub base_url: String,
    /// Fees collected from paid calls, not yet withdrawn.
    pub collected_fees: Amount,
    /// The identifier the next minted token will get.
    pub next_token_id: u64,
    /// Token ownership and operator bookkeeping.
    pub ledger: Ledger<S>,
}

impl<S: HasStateApi> State<S> {
    /// Creates the initial state with no tokens and the default fees.
    pub fn new(state_builder: &mut StateBuilder<S>, admin: AccountAddress) -> Self {
        Self {
            admin,
            mint_fee: DEFAULT_MINT_FEE,
            transfer_fee: DEFAULT_TRANSFER_FEE,
            base_url: String::new(),
            collected_fees: Amount::zero(),
            next_token_id: 0,
            ledger: Ledger::empty(state_builder),
        }
    }

    /// Authorization guard for the admin only entrypoints.
    pub fn ensure_admin(&self, sender: &Address) -> ContractResult<()> {
        ensure!(
            sender.matches_account(&self.admin),
            ContractError::Unauthorized
        );
        Ok(())
    }

    /// Take the next sequential token identifier.
    pub fn issue_token_id(&mut self) -> ContractTokenId {
        let token_id = TokenIdU64(self.next_token_id);
        self.next_token_id += 1;
        token_id
    }

    /// Add `payment` to the fees held by the contract.
    pub fn credit(&mut self, payment: Amount) {
        self.collected_fees += payment;
    }

    /// Empty the held fees, returning the amount to pay out.
    pub fn take_collected(&mut self) -> Amount {
        let collected = self.collected_fees;
        self.collected_fees = Amount::zero();
        collected
    }
}
