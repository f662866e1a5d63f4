//! Types, errors, event tags and test utilities shared by the PaidNFT
//! contracts.
#![cfg_attr(not(feature = "std"), no_std)]
pub use crate::{constants::*, errors::*, types::*};
use concordium_cis2::*;
use concordium_std::*;

mod constants;
mod errors;
pub mod test;
mod types;
