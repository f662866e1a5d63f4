use commons::{
    ADMIN_UPDATE_EVENT_TAG, BASE_URL_UPDATE_EVENT_TAG, FEE_UPDATE_EVENT_TAG, WITHDRAW_EVENT_TAG,
};
use concordium_std::*;

/// Which of the two fees a `FeeUpdate` event refers to.
#[derive(Debug, Serialize, SchemaType)]
pub enum FeeKind {
    Mint,
    Transfer,
}

/// Tagged custom events to be serialized to the event log, next to the
/// standard CIS2 events.
#[derive(Debug)]
pub enum CustomEvent {
    /// The admin changed one of the fees.
    FeeUpdate {
        kind: FeeKind,
        from: Amount,
        to: Amount,
    },
    /// The admin changed the metadata base URL.
    BaseUrlUpdate { url: String },
    /// The admin handed the role over to another account.
    AdminUpdate {
        from: AccountAddress,
        to: AccountAddress,
    },
    /// The collected fees were paid out to the admin.
    Withdraw { to: AccountAddress, amount: Amount },
}

impl Serial for CustomEvent {
    fn serial<W: Write>(&self, out: &mut W) -> Result<(), W::Err> {
        match self {
            CustomEvent::FeeUpdate { kind, from, to } => {
                out.write_u8(FEE_UPDATE_EVENT_TAG)?;
                kind.serial(out)?;
                from.serial(out)?;
                to.serial(out)
            }
            CustomEvent::BaseUrlUpdate { url } => {
                out.write_u8(BASE_URL_UPDATE_EVENT_TAG)?;
                url.serial(out)
            }
            CustomEvent::AdminUpdate { from, to } => {
                out.write_u8(ADMIN_UPDATE_EVENT_TAG)?;
                from.serial(out)?;
                to.serial(out)
            }
            CustomEvent::Withdraw { to, amount } => {
                out.write_u8(WITHDRAW_EVENT_TAG)?;
                to.serial(out)?;
                amount.serial(out)
            }
        }
    }
}
