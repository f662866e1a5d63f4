//! A fee gated NFT contract.
//!
//! A single admin account, fixed at init time, can mint and transfer tokens
//! free of charge, change the fees and the metadata base URL, hand the admin
//! role over and withdraw the collected fees. Everyone else mints and
//! transfers through `payable` entrypoints that require the attached CCD to
//! meet the configured fee. The full attached amount is kept by the contract,
//! also when it exceeds the fee.
//!
//! Token IDs are sequential counters: the first minted token gets ID 0, the
//! next ID 1 and so on, regardless of whether the admin or a paying account
//! minted it. Paying the transfer fee never replaces the owner or operator
//! check, it only opens the public entrypoint.
#![cfg_attr(not(feature = "std"), no_std)]

use commons::ContractTokenId;
use concordium_std::*;

pub mod contract;
pub mod events;
pub mod external;
pub mod state;

/// Payment required for a public `mint` call until the admin changes it.
pub const DEFAULT_MINT_FEE: Amount = Amount::from_micro_ccd(1_000_000);

/// Payment required for a public `transfer` call until the admin changes it.
pub const DEFAULT_TRANSFER_FEE: Amount = Amount::from_micro_ccd(1_000_000);

/// Build the metadata URL for a token: the base URL appended with the token ID
/// in decimal. An empty base URL means no metadata is configured and produces
/// an empty URL.
pub fn build_token_url(base_url: &str, token_id: &ContractTokenId) -> String {
    if base_url.is_empty() {
        return String::new();
    }
    let mut url = String::with_capacity(base_url.len() + 20);
    url.push_str(base_url);
    push_decimal(&mut url, token_id.0);
    url
}

/// Append the decimal digits of `value` to the string.
fn push_decimal(string: &mut String, mut value: u64) {
    // u64::MAX has 20 decimal digits.
    let mut digits = [0u8; 20];
    let mut len = 0;
    loop {
        digits[len] = b'0' + (value % 10) as u8;
        len += 1;
        value /= 10;
        if value == 0 {
            break;
        }
    }
    while len > 0 {
        len -= 1;
        string.push(digits[len] as char);
    }
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use concordium_cis2::TokenIdU64;

    #[concordium_test]
    fn token_url_formatting() {
        claim_eq!(build_token_url("", &TokenIdU64(7)), "");
        claim_eq!(build_token_url("https://x/", &TokenIdU64(0)), "https://x/0");
        claim_eq!(build_token_url("https://x/", &TokenIdU64(10)), "https://x/10");
        claim_eq!(
            build_token_url("https://x/", &TokenIdU64(12045)),
            "https://x/12045"
        );
        claim_eq!(
            build_token_url("https://x/", &TokenIdU64(u64::MAX)),
            "https://x/18446744073709551615"
        );
    }
}
