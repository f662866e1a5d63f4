use commons::{ContractError, ContractResult, ContractTokenAmount, ContractTokenId, CustomContractError};
use concordium_cis2::{
    Cis2Event, MetadataUrl, MintEvent, OnReceivingCis2Params, OperatorUpdate, Receiver,
    TokenMetadataEvent, TransferEvent, UpdateOperator, UpdateOperatorEvent,
};
use concordium_std::*;

use crate::build_token_url;
use crate::events::{CustomEvent, FeeKind};
use crate::external::{MintParams, TransferParams, ViewState};
use crate::state::State;

/// Initialize the contract with no tokens and the default fees. The account
/// deploying the contract becomes the admin.
#[init(contract = "PaidNFT")]
fn init<S: HasStateApi>(
    ctx: &impl HasInitContext,
    state_builder: &mut StateBuilder<S>,
) -> InitResult<State<S>> {
    Ok(State::new(state_builder, ctx.init_origin()))
}

/// Mint the next sequential token to `to`, logging the `Mint` and
/// `TokenMetadata` events.
fn mint_next<S: HasStateApi>(
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
    to: Address,
) -> ContractResult<ContractTokenId> {
    let state = host.state_mut();
    let token_id = state.issue_token_id();
    state.ledger.mint(token_id, to)?;
    let url = build_token_url(&state.base_url, &token_id);

    logger.log(&Cis2Event::Mint(MintEvent {
        token_id,
        amount: ContractTokenAmount::from(1),
        owner: to,
    }))?;
    logger.log(&Cis2Event::<ContractTokenId, ContractTokenAmount>::TokenMetadata(
        TokenMetadataEvent {
            token_id,
            metadata_url: MetadataUrl { url, hash: None },
        },
    ))?;
    Ok(token_id)
}

/// Mint the next token against payment of the mint fee.
///
/// The entire attached amount is kept by the contract, also when it exceeds
/// the fee.
///
/// It rejects if:
/// - It fails to parse the parameter.
/// - The attached payment is below the mint fee.
/// - Fails to log event.
#[receive(
    contract = "PaidNFT",
    name = "mint",
    parameter = "MintParams",
    enable_logger,
    mutable,
    payable
)]
fn mint<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    amount: Amount,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let params: MintParams = ctx.parameter_cursor().get()?;

    // The payment is checked before any state is touched.
    ensure!(
        amount >= host.state().mint_fee,
        CustomContractError::InsufficientPayment.into()
    );

    mint_next(host, logger, params.to)?;
    host.state_mut().credit(amount);
    Ok(())
}

/// Mint the next token free of charge. Admin only.
///
/// It rejects if:
/// - It fails to parse the parameter.
/// - The sender is not the admin.
/// - Fails to log event.
#[receive(
    contract = "PaidNFT",
    name = "mintByAdmin",
    parameter = "MintParams",
    enable_logger,
    mutable
)]
fn mint_by_admin<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let params: MintParams = ctx.parameter_cursor().get()?;
    host.state().ensure_admin(&ctx.sender())?;

    mint_next(host, logger, params.to)?;
    Ok(())
}

/// Log the `Transfer` event and invoke the receive hook when the receiver is
/// a contract. Ownership and fee bookkeeping must already be updated when
/// this runs.
fn finish_transfer<S: HasStateApi>(
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
    params: TransferParams,
) -> ContractResult<()> {
    let to_address = params.to.address();

    logger.log(&Cis2Event::Transfer(TransferEvent {
        token_id: params.token_id,
        amount: ContractTokenAmount::from(1),
        from: params.from,
        to: to_address,
    }))?;

    if let Receiver::Contract(address, function) = params.to {
        let parameter = OnReceivingCis2Params {
            token_id: params.token_id,
            amount: ContractTokenAmount::from(1),
            from: params.from,
            data: params.data,
        };
        host.invoke_contract(
            &address,
            &parameter,
            function.as_entrypoint_name(),
            Amount::zero(),
        )
        .map_err(CustomContractError::from)?;
    }
    Ok(())
}

/// Transfer a token against payment of the transfer fee.
///
/// The sender must be the owner of the token or an enabled operator of the
/// owner. The payment never replaces that check, it only opens the public
/// entrypoint. The entire attached amount is kept by the contract.
///
/// It rejects if:
/// - It fails to parse the parameter.
/// - The attached payment is below the transfer fee.
/// - The sender is neither the owner of the token nor an operator of the
///   owner.
/// - The token does not exist.
/// - The token is not owned by `from`.
/// - The receiving contract rejects the token.
/// - Fails to log event.
#[receive(
    contract = "PaidNFT",
    name = "transfer",
    parameter = "TransferParams",
    enable_logger,
    mutable,
    payable
)]
fn transfer<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    amount: Amount,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let params: TransferParams = ctx.parameter_cursor().get()?;
    let sender = ctx.sender();

    // The payment is checked before any state is touched.
    ensure!(
        amount >= host.state().transfer_fee,
        CustomContractError::InsufficientPayment.into()
    );

    let state = host.state_mut();
    state
        .ledger
        .transfer(&sender, &params.from, params.to.address(), &params.token_id)?;
    state.credit(amount);

    finish_transfer(host, logger, params)
}

/// Transfer a token free of charge, skipping the owner and operator check on
/// the sender. `from` must still own the token. Admin only.
///
/// It rejects if:
/// - It fails to parse the parameter.
/// - The sender is not the admin.
/// - The token does not exist.
/// - The token is not owned by `from`.
/// - The receiving contract rejects the token.
/// - Fails to log event.
#[receive(
    contract = "PaidNFT",
    name = "transferByAdmin",
    parameter = "TransferParams",
    enable_logger,
    mutable
)]
fn transfer_by_admin<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let params: TransferParams = ctx.parameter_cursor().get()?;
    host.state().ensure_admin(&ctx.sender())?;

    host.state_mut()
        .ledger
        .force_transfer(&params.from, params.to.address(), &params.token_id)?;

    finish_transfer(host, logger, params)
}

/// Enable or disable an address as an operator of the sender.
///
/// It rejects if:
/// - It fails to parse the parameter.
/// - Fails to log event.
#[receive(
    contract = "PaidNFT",
    name = "updateOperator",
    parameter = "UpdateOperator",
    enable_logger,
    mutable
)]
fn update_operator<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let param: UpdateOperator = ctx.parameter_cursor().get()?;
    let sender = ctx.sender();

    let (state, state_builder) = host.state_and_builder();
    match param.update {
        OperatorUpdate::Add => state.ledger.add_operator(&sender, &param.operator, state_builder),
        OperatorUpdate::Remove => state.ledger.remove_operator(&sender, &param.operator),
    }

    logger.log(
        &Cis2Event::<ContractTokenId, ContractTokenAmount>::UpdateOperator(UpdateOperatorEvent {
            owner: sender,
            operator: param.operator,
            update: param.update,
        }),
    )?;
    Ok(())
}

/// Set the fee required for public `mint` calls. Admin only.
///
/// It rejects if:
/// - It fails to parse the parameter.
/// - The sender is not the admin.
/// - Fails to log event.
#[receive(
    contract = "PaidNFT",
    name = "setMintFee",
    parameter = "Amount",
    enable_logger,
    mutable
)]
fn set_mint_fee<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let fee: Amount = ctx.parameter_cursor().get()?;
    let state = host.state_mut();
    state.ensure_admin(&ctx.sender())?;

    let previous = state.mint_fee;
    state.mint_fee = fee;

    logger.log(&CustomEvent::FeeUpdate {
        kind: FeeKind::Mint,
        from: previous,
        to: fee,
    })?;
    Ok(())
}

/// Set the fee required for public `transfer` calls. Admin only.
///
/// It rejects if:
/// - It fails to parse the parameter.
/// - The sender is not the admin.
/// - Fails to log event.
#[receive(
    contract = "PaidNFT",
    name = "setTransferFee",
    parameter = "Amount",
    enable_logger,
    mutable
)]
fn set_transfer_fee<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let fee: Amount = ctx.parameter_cursor().get()?;
    let state = host.state_mut();
    state.ensure_admin(&ctx.sender())?;

    let previous = state.transfer_fee;
    state.transfer_fee = fee;

    logger.log(&CustomEvent::FeeUpdate {
        kind: FeeKind::Transfer,
        from: previous,
        to: fee,
    })?;
    Ok(())
}

/// Set the base URL used to derive token metadata URLs. Admin only.
///
/// It rejects if:
/// - It fails to parse the parameter.
/// - The sender is not the admin.
/// - Fails to log event.
#[receive(
    contract = "PaidNFT",
    name = "setBaseUrl",
    parameter = "String",
    enable_logger,
    mutable
)]
fn set_base_url<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let url: String = ctx.parameter_cursor().get()?;
    let state = host.state_mut();
    state.ensure_admin(&ctx.sender())?;

    state.base_url = url.clone();

    logger.log(&CustomEvent::BaseUrlUpdate { url })?;
    Ok(())
}

/// Hand the admin role over to another account. Admin only.
///
/// It rejects if:
/// - It fails to parse the parameter.
/// - The sender is not the admin.
/// - Fails to log event.
#[receive(
    contract = "PaidNFT",
    name = "updateAdmin",
    parameter = "AccountAddress",
    enable_logger,
    mutable
)]
fn update_admin<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let new_admin: AccountAddress = ctx.parameter_cursor().get()?;
    let state = host.state_mut();
    state.ensure_admin(&ctx.sender())?;

    let previous = state.admin;
    state.admin = new_admin;

    logger.log(&CustomEvent::AdminUpdate {
        from: previous,
        to: new_admin,
    })?;
    Ok(())
}

/// Pay the collected fees out to the admin account. Admin only.
///
/// The fee counter is cleared before the funds move, so a reentrant call
/// during the payout observes an already emptied balance. Withdrawing a zero
/// balance succeeds without a transfer.
///
/// It rejects if:
/// - The sender is not the admin.
/// - The payout to the admin account fails.
/// - Fails to log event.
#[receive(contract = "PaidNFT", name = "withdraw", enable_logger, mutable)]
fn withdraw<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let state = host.state_mut();
    state.ensure_admin(&ctx.sender())?;

    let admin = state.admin;
    let collected = state.take_collected();
    if collected != Amount::zero() {
        host.invoke_transfer(&admin, collected)
            .map_err(CustomContractError::from)?;
    }

    logger.log(&CustomEvent::Withdraw {
        to: admin,
        amount: collected,
    })?;
    Ok(())
}

/// View the configuration and fee bookkeeping of the contract.
#[receive(contract = "PaidNFT", name = "view", return_value = "ViewState")]
fn view<S: HasStateApi>(
    _ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<ViewState> {
    let state = host.state();
    Ok(ViewState {
        admin: state.admin,
        mint_fee: state.mint_fee,
        transfer_fee: state.transfer_fee,
        base_url: state.base_url.clone(),
        collected_fees: state.collected_fees,
        minted_tokens: state.next_token_id,
    })
}

/// Current owner of a token.
///
/// It rejects if:
/// - It fails to parse the parameter.
/// - The token does not exist.
#[receive(
    contract = "PaidNFT",
    name = "ownerOf",
    parameter = "ContractTokenId",
    return_value = "Address"
)]
fn owner_of<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<Address> {
    let token_id: ContractTokenId = ctx.parameter_cursor().get()?;
    host.state().ledger.owner_of(&token_id)
}

/// Metadata URL of a token: the base URL appended with the token ID in
/// decimal, or the empty string when no base URL is configured.
///
/// It rejects if:
/// - It fails to parse the parameter.
/// - The token does not exist.
#[receive(
    contract = "PaidNFT",
    name = "tokenUrl",
    parameter = "ContractTokenId",
    return_value = "String"
)]
fn token_url<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<String> {
    let token_id: ContractTokenId = ctx.parameter_cursor().get()?;
    let state = host.state();
    ensure!(token_id.0 < state.next_token_id, ContractError::InvalidTokenId);
    Ok(build_token_url(&state.base_url, &token_id))
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use crate::{DEFAULT_MINT_FEE, DEFAULT_TRANSFER_FEE};
    use commons::test::{parse_and_check_mock, rejecting_mock};
    use concordium_cis2::{AdditionalData, TokenIdU64};
    use test_infrastructure::*;

    const ADMIN: AccountAddress = AccountAddress([0u8; 32]);
    const ALICE: AccountAddress = AccountAddress([1u8; 32]);
    const BOB: AccountAddress = AccountAddress([2u8; 32]);
    const ADDR_ADMIN: Address = Address::Account(ADMIN);
    const ADDR_ALICE: Address = Address::Account(ALICE);
    const ADDR_BOB: Address = Address::Account(BOB);

    const RECEIVER: ContractAddress = ContractAddress {
        index: 5,
        subindex: 0,
    };
    const HOOK: &str = "onReceivingCIS2";

    fn token(id: u64) -> ContractTokenId {
        TokenIdU64(id)
    }

    fn receive_ctx<'a>(sender: Address) -> TestReceiveContext<'a> {
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(sender);
        ctx
    }

    fn new_host() -> TestHost<State<TestStateApi>> {
        let mut ctx = TestInitContext::empty();
        ctx.set_init_origin(ADMIN);
        let mut state_builder = TestStateBuilder::new();
        let state = init(&ctx, &mut state_builder).expect_report("Init failed");
        TestHost::new(state, state_builder)
    }

    fn account_receiver(to: AccountAddress) -> Receiver {
        Receiver::Account(to)
    }

    fn contract_receiver() -> Receiver {
        Receiver::Contract(RECEIVER, OwnedEntrypointName::new_unchecked(HOOK.into()))
    }

    fn transfer_params(token_id: ContractTokenId, from: Address, to: Receiver) -> Vec<u8> {
        to_bytes(&TransferParams {
            token_id,
            from,
            to,
            data: AdditionalData::empty(),
        })
    }

    /// Mint a token through the admin path and return its ID.
    fn mint_for(host: &mut TestHost<State<TestStateApi>>, to: Address) -> ContractTokenId {
        let parameter = to_bytes(&MintParams { to });
        let mut ctx = receive_ctx(ADDR_ADMIN);
        ctx.set_parameter(&parameter);
        let mut logger = TestLogger::init();
        let next = host.state().next_token_id;
        mint_by_admin(&ctx, host, &mut logger).expect_report("Admin mint failed");
        token(next)
    }

    #[concordium_test]
    fn test_init() {
        let host = new_host();
        let state = host.state();
        claim_eq!(state.admin, ADMIN);
        claim_eq!(state.mint_fee, DEFAULT_MINT_FEE);
        claim_eq!(state.transfer_fee, DEFAULT_TRANSFER_FEE);
        claim_eq!(state.base_url, "");
        claim_eq!(state.collected_fees, Amount::zero());
        claim_eq!(state.next_token_id, 0);
    }

    #[concordium_test]
    fn test_mint_by_admin() {
        let mut host = new_host();
        let parameter = to_bytes(&MintParams { to: ADDR_ALICE });
        let mut ctx = receive_ctx(ADDR_ADMIN);
        ctx.set_parameter(&parameter);
        let mut logger = TestLogger::init();

        let result = mint_by_admin(&ctx, &mut host, &mut logger);
        claim_eq!(result, Ok(()));
        claim_eq!(host.state().ledger.owner_of(&token(0)), Ok(ADDR_ALICE));
        claim_eq!(host.state().next_token_id, 1);
        claim_eq!(host.state().collected_fees, Amount::zero());
        claim!(logger.logs.contains(&to_bytes(&Cis2Event::Mint(MintEvent {
            token_id: token(0),
            amount: ContractTokenAmount::from(1),
            owner: ADDR_ALICE,
        }))));
    }

    #[concordium_test]
    fn test_mint_by_admin_unauthorized() {
        let mut host = new_host();
        let parameter = to_bytes(&MintParams { to: ADDR_ALICE });
        let mut ctx = receive_ctx(ADDR_ALICE);
        ctx.set_parameter(&parameter);
        let mut logger = TestLogger::init();

        let result = mint_by_admin(&ctx, &mut host, &mut logger);
        claim_eq!(result, Err(ContractError::Unauthorized));
        claim_eq!(host.state().next_token_id, 0);
    }

    #[concordium_test]
    fn test_mint_underpaid() {
        let mut host = new_host();
        let parameter = to_bytes(&MintParams { to: ADDR_ALICE });
        let mut ctx = receive_ctx(ADDR_ALICE);
        ctx.set_parameter(&parameter);
        let mut logger = TestLogger::init();

        let underpaid = DEFAULT_MINT_FEE - Amount::from_micro_ccd(1);
        let result = mint(&ctx, &mut host, underpaid, &mut logger);
        claim_eq!(result, Err(CustomContractError::InsufficientPayment.into()));
        claim_eq!(host.state().next_token_id, 0);
        claim_eq!(host.state().collected_fees, Amount::zero());
    }

    #[concordium_test]
    fn test_mint_paid() {
        let mut host = new_host();
        let parameter = to_bytes(&MintParams { to: ADDR_ALICE });
        let mut ctx = receive_ctx(ADDR_ALICE);
        ctx.set_parameter(&parameter);
        let mut logger = TestLogger::init();

        let result = mint(&ctx, &mut host, DEFAULT_MINT_FEE, &mut logger);
        claim_eq!(result, Ok(()));
        claim_eq!(host.state().ledger.owner_of(&token(0)), Ok(ADDR_ALICE));
        claim_eq!(host.state().collected_fees, DEFAULT_MINT_FEE);

        // Overpaying is allowed and the full amount is kept.
        let overpaid = DEFAULT_MINT_FEE + Amount::from_ccd(5);
        let result = mint(&ctx, &mut host, overpaid, &mut logger);
        claim_eq!(result, Ok(()));
        claim_eq!(host.state().ledger.owner_of(&token(1)), Ok(ADDR_ALICE));
        claim_eq!(host.state().collected_fees, DEFAULT_MINT_FEE + overpaid);
    }

    #[concordium_test]
    fn test_sequential_token_ids() {
        let mut host = new_host();
        let first = mint_for(&mut host, ADDR_ALICE);

        let parameter = to_bytes(&MintParams { to: ADDR_BOB });
        let mut ctx = receive_ctx(ADDR_BOB);
        ctx.set_parameter(&parameter);
        let mut logger = TestLogger::init();
        mint(&ctx, &mut host, DEFAULT_MINT_FEE, &mut logger).expect_report("Paid mint failed");

        let third = mint_for(&mut host, ADDR_ALICE);

        claim_eq!(first, token(0));
        claim_eq!(host.state().ledger.owner_of(&token(1)), Ok(ADDR_BOB));
        claim_eq!(third, token(2));
        claim_eq!(host.state().next_token_id, 3);
    }

    #[concordium_test]
    fn test_set_fees() {
        let mut host = new_host();
        let fee = Amount::from_micro_ccd(1);
        let parameter = to_bytes(&fee);
        let mut ctx = receive_ctx(ADDR_ADMIN);
        ctx.set_parameter(&parameter);
        let mut logger = TestLogger::init();

        claim_eq!(set_mint_fee(&ctx, &mut host, &mut logger), Ok(()));
        claim_eq!(set_transfer_fee(&ctx, &mut host, &mut logger), Ok(()));
        claim_eq!(host.state().mint_fee, fee);
        claim_eq!(host.state().transfer_fee, fee);

        // A fee of a single micro CCD is enough once configured.
        let mint_parameter = to_bytes(&MintParams { to: ADDR_ALICE });
        let mut ctx = receive_ctx(ADDR_ALICE);
        ctx.set_parameter(&mint_parameter);
        claim_eq!(mint(&ctx, &mut host, fee, &mut logger), Ok(()));
        claim_eq!(host.state().collected_fees, fee);
    }

    #[concordium_test]
    fn test_set_fees_unauthorized() {
        let mut host = new_host();
        let parameter = to_bytes(&Amount::zero());
        let mut ctx = receive_ctx(ADDR_ALICE);
        ctx.set_parameter(&parameter);
        let mut logger = TestLogger::init();

        claim_eq!(
            set_mint_fee(&ctx, &mut host, &mut logger),
            Err(ContractError::Unauthorized)
        );
        claim_eq!(
            set_transfer_fee(&ctx, &mut host, &mut logger),
            Err(ContractError::Unauthorized)
        );
        claim_eq!(host.state().mint_fee, DEFAULT_MINT_FEE);
        claim_eq!(host.state().transfer_fee, DEFAULT_TRANSFER_FEE);
    }

    #[concordium_test]
    fn test_transfer_underpaid() {
        let mut host = new_host();
        let token_id = mint_for(&mut host, ADDR_ALICE);

        let parameter = transfer_params(token_id, ADDR_ALICE, account_receiver(BOB));
        let mut ctx = receive_ctx(ADDR_ALICE);
        ctx.set_parameter(&parameter);
        let mut logger = TestLogger::init();

        let result = transfer(&ctx, &mut host, Amount::zero(), &mut logger);
        claim_eq!(result, Err(CustomContractError::InsufficientPayment.into()));
        claim_eq!(host.state().ledger.owner_of(&token_id), Ok(ADDR_ALICE));
        claim_eq!(host.state().collected_fees, Amount::zero());
    }

    #[concordium_test]
    fn test_transfer_paid() {
        let mut host = new_host();
        let token_id = mint_for(&mut host, ADDR_ALICE);

        let parameter = transfer_params(token_id, ADDR_ALICE, account_receiver(BOB));
        let mut ctx = receive_ctx(ADDR_ALICE);
        ctx.set_parameter(&parameter);
        let mut logger = TestLogger::init();

        let result = transfer(&ctx, &mut host, DEFAULT_TRANSFER_FEE, &mut logger);
        claim_eq!(result, Ok(()));
        claim_eq!(host.state().ledger.owner_of(&token_id), Ok(ADDR_BOB));
        claim_eq!(host.state().collected_fees, DEFAULT_TRANSFER_FEE);
        claim!(logger.logs.contains(&to_bytes(&Cis2Event::Transfer(TransferEvent {
            token_id,
            amount: ContractTokenAmount::from(1),
            from: ADDR_ALICE,
            to: ADDR_BOB,
        }))));
    }

    #[concordium_test]
    fn test_transfer_payment_is_not_authorization() {
        let mut host = new_host();
        let token_id = mint_for(&mut host, ADDR_ALICE);

        // Bob pays the fee but neither owns the token nor is an operator.
        let parameter = transfer_params(token_id, ADDR_ALICE, account_receiver(BOB));
        let mut ctx = receive_ctx(ADDR_BOB);
        ctx.set_parameter(&parameter);
        let mut logger = TestLogger::init();

        let result = transfer(&ctx, &mut host, DEFAULT_TRANSFER_FEE, &mut logger);
        claim_eq!(result, Err(ContractError::Unauthorized));
        claim_eq!(host.state().ledger.owner_of(&token_id), Ok(ADDR_ALICE));
        claim_eq!(host.state().collected_fees, Amount::zero());
    }

    #[concordium_test]
    fn test_transfer_unknown_token() {
        let mut host = new_host();
        let parameter = transfer_params(token(42), ADDR_ALICE, account_receiver(BOB));
        let mut ctx = receive_ctx(ADDR_ALICE);
        ctx.set_parameter(&parameter);
        let mut logger = TestLogger::init();

        let result = transfer(&ctx, &mut host, DEFAULT_TRANSFER_FEE, &mut logger);
        claim_eq!(result, Err(ContractError::InvalidTokenId));
    }

    #[concordium_test]
    fn test_operator_can_transfer() {
        let mut host = new_host();
        let token_id = mint_for(&mut host, ADDR_ALICE);

        let parameter = to_bytes(&UpdateOperator {
            update: OperatorUpdate::Add,
            operator: ADDR_BOB,
        });
        let mut ctx = receive_ctx(ADDR_ALICE);
        ctx.set_parameter(&parameter);
        let mut logger = TestLogger::init();
        update_operator(&ctx, &mut host, &mut logger).expect_report("Operator update failed");
        claim!(host.state().ledger.is_operator(&ADDR_ALICE, &ADDR_BOB));

        let parameter = transfer_params(token_id, ADDR_ALICE, account_receiver(BOB));
        let mut ctx = receive_ctx(ADDR_BOB);
        ctx.set_parameter(&parameter);
        let result = transfer(&ctx, &mut host, DEFAULT_TRANSFER_FEE, &mut logger);
        claim_eq!(result, Ok(()));
        claim_eq!(host.state().ledger.owner_of(&token_id), Ok(ADDR_BOB));
    }

    #[concordium_test]
    fn test_remove_operator() {
        let mut host = new_host();
        let token_id = mint_for(&mut host, ADDR_ALICE);

        let mut logger = TestLogger::init();
        let add = to_bytes(&UpdateOperator {
            update: OperatorUpdate::Add,
            operator: ADDR_BOB,
        });
        let mut ctx = receive_ctx(ADDR_ALICE);
        ctx.set_parameter(&add);
        update_operator(&ctx, &mut host, &mut logger).expect_report("Operator update failed");

        let remove = to_bytes(&UpdateOperator {
            update: OperatorUpdate::Remove,
            operator: ADDR_BOB,
        });
        let mut ctx = receive_ctx(ADDR_ALICE);
        ctx.set_parameter(&remove);
        update_operator(&ctx, &mut host, &mut logger).expect_report("Operator update failed");
        claim!(!host.state().ledger.is_operator(&ADDR_ALICE, &ADDR_BOB));

        let parameter = transfer_params(token_id, ADDR_ALICE, account_receiver(BOB));
        let mut ctx = receive_ctx(ADDR_BOB);
        ctx.set_parameter(&parameter);
        let result = transfer(&ctx, &mut host, DEFAULT_TRANSFER_FEE, &mut logger);
        claim_eq!(result, Err(ContractError::Unauthorized));
    }

    #[concordium_test]
    fn test_transfer_by_admin() {
        let mut host = new_host();
        let token_id = mint_for(&mut host, ADDR_ALICE);

        let parameter = transfer_params(token_id, ADDR_ALICE, account_receiver(BOB));
        let mut ctx = receive_ctx(ADDR_ADMIN);
        ctx.set_parameter(&parameter);
        let mut logger = TestLogger::init();

        let result = transfer_by_admin(&ctx, &mut host, &mut logger);
        claim_eq!(result, Ok(()));
        claim_eq!(host.state().ledger.owner_of(&token_id), Ok(ADDR_BOB));
        claim_eq!(host.state().collected_fees, Amount::zero());
    }

    #[concordium_test]
    fn test_transfer_by_admin_wrong_from() {
        let mut host = new_host();
        let token_id = mint_for(&mut host, ADDR_ALICE);

        let parameter = transfer_params(token_id, ADDR_BOB, account_receiver(BOB));
        let mut ctx = receive_ctx(ADDR_ADMIN);
        ctx.set_parameter(&parameter);
        let mut logger = TestLogger::init();

        let result = transfer_by_admin(&ctx, &mut host, &mut logger);
        claim_eq!(result, Err(ContractError::InsufficientFunds));
        claim_eq!(host.state().ledger.owner_of(&token_id), Ok(ADDR_ALICE));
    }

    #[concordium_test]
    fn test_transfer_by_admin_unauthorized() {
        let mut host = new_host();
        let token_id = mint_for(&mut host, ADDR_ALICE);

        let parameter = transfer_params(token_id, ADDR_ALICE, account_receiver(BOB));
        let mut ctx = receive_ctx(ADDR_ALICE);
        ctx.set_parameter(&parameter);
        let mut logger = TestLogger::init();

        let result = transfer_by_admin(&ctx, &mut host, &mut logger);
        claim_eq!(result, Err(ContractError::Unauthorized));
        claim_eq!(host.state().ledger.owner_of(&token_id), Ok(ADDR_ALICE));
    }

    #[concordium_test]
    fn test_transfer_receive_hook_accepts() {
        let mut host = new_host();
        let token_id = mint_for(&mut host, ADDR_ALICE);
        host.setup_mock_entrypoint(
            RECEIVER,
            OwnedEntrypointName::new_unchecked(HOOK.into()),
            parse_and_check_mock::<OnReceivingCis2Params<ContractTokenId, ContractTokenAmount>, _>(
                move |params| {
                    params.token_id == token_id
                        && params.from == ADDR_ALICE
                        && params.amount == ContractTokenAmount::from(1)
                },
                (),
            ),
        );

        let parameter = transfer_params(token_id, ADDR_ALICE, contract_receiver());
        let mut ctx = receive_ctx(ADDR_ALICE);
        ctx.set_parameter(&parameter);
        let mut logger = TestLogger::init();

        let result = transfer(&ctx, &mut host, DEFAULT_TRANSFER_FEE, &mut logger);
        claim_eq!(result, Ok(()));
        claim_eq!(
            host.state().ledger.owner_of(&token_id),
            Ok(Address::Contract(RECEIVER))
        );
    }

    #[concordium_test]
    fn test_transfer_receive_hook_rejects() {
        let mut host = new_host();
        let token_id = mint_for(&mut host, ADDR_ALICE);
        host.setup_mock_entrypoint(
            RECEIVER,
            OwnedEntrypointName::new_unchecked(HOOK.into()),
            rejecting_mock(),
        );

        let parameter = transfer_params(token_id, ADDR_ALICE, contract_receiver());
        let mut ctx = receive_ctx(ADDR_ALICE);
        ctx.set_parameter(&parameter);
        let mut logger = TestLogger::init();

        let result = transfer(&ctx, &mut host, DEFAULT_TRANSFER_FEE, &mut logger);
        claim_eq!(result, Err(CustomContractError::ReceiverRejected.into()));
    }

    #[concordium_test]
    fn test_set_base_url_and_token_url() {
        let mut host = new_host();
        mint_for(&mut host, ADDR_ALICE);

        // No base URL configured yet.
        let token_parameter = to_bytes(&token(0));
        let mut ctx = receive_ctx(ADDR_ALICE);
        ctx.set_parameter(&token_parameter);
        claim_eq!(token_url(&ctx, &host), Ok(String::new()));

        let url_parameter = to_bytes(&"https://www.example.com/".to_string());
        let mut ctx = receive_ctx(ADDR_ADMIN);
        ctx.set_parameter(&url_parameter);
        let mut logger = TestLogger::init();
        claim_eq!(set_base_url(&ctx, &mut host, &mut logger), Ok(()));

        let mut ctx = receive_ctx(ADDR_ALICE);
        ctx.set_parameter(&token_parameter);
        claim_eq!(
            token_url(&ctx, &host),
            Ok("https://www.example.com/0".to_string())
        );

        // Never minted.
        let unknown_parameter = to_bytes(&token(1));
        let mut ctx = receive_ctx(ADDR_ALICE);
        ctx.set_parameter(&unknown_parameter);
        claim_eq!(token_url(&ctx, &host), Err(ContractError::InvalidTokenId));
    }

    #[concordium_test]
    fn test_set_base_url_unauthorized() {
        let mut host = new_host();
        let parameter = to_bytes(&"https://www.example.com/".to_string());
        let mut ctx = receive_ctx(ADDR_ALICE);
        ctx.set_parameter(&parameter);
        let mut logger = TestLogger::init();

        let result = set_base_url(&ctx, &mut host, &mut logger);
        claim_eq!(result, Err(ContractError::Unauthorized));
        claim_eq!(host.state().base_url, "");
    }

    #[concordium_test]
    fn test_owner_of_unknown_token() {
        let host = new_host();
        let parameter = to_bytes(&token(0));
        let mut ctx = receive_ctx(ADDR_ALICE);
        ctx.set_parameter(&parameter);

        claim_eq!(owner_of(&ctx, &host), Err(ContractError::InvalidTokenId));
    }

    #[concordium_test]
    fn test_withdraw() {
        let mut host = new_host();
        let parameter = to_bytes(&MintParams { to: ADDR_ALICE });
        let mut ctx = receive_ctx(ADDR_ALICE);
        ctx.set_parameter(&parameter);
        let mut logger = TestLogger::init();
        mint(&ctx, &mut host, DEFAULT_MINT_FEE, &mut logger).expect_report("Paid mint failed");
        host.set_self_balance(DEFAULT_MINT_FEE);

        let ctx = receive_ctx(ADDR_ADMIN);
        let result = withdraw(&ctx, &mut host, &mut logger);
        claim_eq!(result, Ok(()));
        claim_eq!(host.state().collected_fees, Amount::zero());
        claim_eq!(host.get_transfers(), [(ADMIN, DEFAULT_MINT_FEE)]);

        // A second withdraw has nothing to pay out and transfers nothing.
        let result = withdraw(&ctx, &mut host, &mut logger);
        claim_eq!(result, Ok(()));
        claim_eq!(host.get_transfers().len(), 1);
    }

    #[concordium_test]
    fn test_withdraw_unauthorized() {
        let mut host = new_host();
        let parameter = to_bytes(&MintParams { to: ADDR_ALICE });
        let mut ctx = receive_ctx(ADDR_ALICE);
        ctx.set_parameter(&parameter);
        let mut logger = TestLogger::init();
        mint(&ctx, &mut host, DEFAULT_MINT_FEE, &mut logger).expect_report("Paid mint failed");

        let ctx = receive_ctx(ADDR_ALICE);
        let result = withdraw(&ctx, &mut host, &mut logger);
        claim_eq!(result, Err(ContractError::Unauthorized));
        claim_eq!(host.state().collected_fees, DEFAULT_MINT_FEE);
        claim!(host.get_transfers().is_empty());
    }

    #[concordium_test]
    fn test_withdraw_transfer_failure() {
        let mut host = new_host();
        let parameter = to_bytes(&MintParams { to: ADDR_ALICE });
        let mut ctx = receive_ctx(ADDR_ALICE);
        ctx.set_parameter(&parameter);
        let mut logger = TestLogger::init();
        mint(&ctx, &mut host, DEFAULT_MINT_FEE, &mut logger).expect_report("Paid mint failed");

        // The self balance is deliberately left at zero so the payout fails.
        let ctx = receive_ctx(ADDR_ADMIN);
        let result = withdraw(&ctx, &mut host, &mut logger);
        claim_eq!(result, Err(CustomContractError::TransferFailed.into()));
        claim!(host.get_transfers().is_empty());
    }

    #[concordium_test]
    fn test_update_admin() {
        let mut host = new_host();
        let parameter = to_bytes(&ALICE);
        let mut ctx = receive_ctx(ADDR_ADMIN);
        ctx.set_parameter(&parameter);
        let mut logger = TestLogger::init();

        claim_eq!(update_admin(&ctx, &mut host, &mut logger), Ok(()));
        claim_eq!(host.state().admin, ALICE);

        // The old admin has lost the role.
        let fee_parameter = to_bytes(&Amount::zero());
        let mut ctx = receive_ctx(ADDR_ADMIN);
        ctx.set_parameter(&fee_parameter);
        claim_eq!(
            set_mint_fee(&ctx, &mut host, &mut logger),
            Err(ContractError::Unauthorized)
        );

        // The new admin has gained it.
        let mut ctx = receive_ctx(ADDR_ALICE);
        ctx.set_parameter(&fee_parameter);
        claim_eq!(set_mint_fee(&ctx, &mut host, &mut logger), Ok(()));
    }

    #[concordium_test]
    fn test_update_admin_unauthorized() {
        let mut host = new_host();
        let parameter = to_bytes(&ALICE);
        let mut ctx = receive_ctx(ADDR_ALICE);
        ctx.set_parameter(&parameter);
        let mut logger = TestLogger::init();

        let result = update_admin(&ctx, &mut host, &mut logger);
        claim_eq!(result, Err(ContractError::Unauthorized));
        claim_eq!(host.state().admin, ADMIN);
    }

    #[concordium_test]
    fn test_view() {
        let mut host = new_host();
        mint_for(&mut host, ADDR_ALICE);
        let ctx = receive_ctx(ADDR_ALICE);

        let result = view(&ctx, &host).expect_report("View failed");
        claim_eq!(
            result,
            ViewState {
                admin: ADMIN,
                mint_fee: DEFAULT_MINT_FEE,
                transfer_fee: DEFAULT_TRANSFER_FEE,
                base_url: String::new(),
                collected_fees: Amount::zero(),
                minted_tokens: 1,
            }
        );
    }
}
