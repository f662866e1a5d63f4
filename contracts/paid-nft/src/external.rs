use commons::ContractTokenId;
use concordium_cis2::{AdditionalData, Receiver};
use concordium_std::*;

/// Parameter for the `mint` and `mintByAdmin` entrypoints.
#[derive(Debug, Serialize, SchemaType)]
pub struct MintParams {
    /// Owner of the newly minted token.
    pub to: Address,
}

/// Parameter for the `transfer` and `transferByAdmin` entrypoints.
#[derive(Debug, Serialize, SchemaType)]
pub struct TransferParams {
    /// The token to transfer.
    pub token_id: ContractTokenId,
    /// The current owner of the token.
    pub from: Address,
    /// The receiver of the token.
    pub to: Receiver,
    /// Additional data to include in the receive hook invocation when the
    /// receiver is a contract.
    pub data: AdditionalData,
}

/// Return type of the `view` entrypoint.
#[derive(Debug, Serialize, SchemaType, PartialEq, Eq)]
pub struct ViewState {
    /// The current admin account.
    pub admin: AccountAddress,
    /// Payment required for a public `mint` call.
    pub mint_fee: Amount,
    /// Payment required for a public `transfer` call.
    pub transfer_fee: Amount,
    /// Base URL for token metadata.
    pub base_url: String,
    /// Fees collected from paid calls, not yet withdrawn.
    pub collected_fees: Amount,
    /// The number of tokens minted so far.
    pub minted_tokens: u64,
}
