use super::*;

pub type ContractResult<A> = Result<A, ContractError>;

/// Contract token ID type.
/// Token IDs are sequential counters starting at zero, so the fixed width
/// `u64` representation is used.
pub type ContractTokenId = TokenIdU64;

/// Every token is unique, so token amounts are only ever zero or one.
pub type ContractTokenAmount = TokenAmountU64;

/// Wrapping the custom errors in a type with CIS2 errors.
pub type ContractError = Cis2Error<CustomContractError>;
