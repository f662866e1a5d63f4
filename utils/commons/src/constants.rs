/// Tag for the Custom Fee Update event.
pub const FEE_UPDATE_EVENT_TAG: u8 = u8::MAX - 5;

/// Tag for the Custom Base URL Update event.
pub const BASE_URL_UPDATE_EVENT_TAG: u8 = u8::MAX - 6;

/// Tag for the Custom Admin Update event.
pub const ADMIN_UPDATE_EVENT_TAG: u8 = u8::MAX - 7;

/// Tag for the Custom Withdraw event.
pub const WITHDRAW_EVENT_TAG: u8 = u8::MAX - 8;
