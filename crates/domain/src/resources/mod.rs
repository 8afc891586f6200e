//! Payloads of the lost & found, events and account endpoints

mod account;
mod event;
mod lost;
mod validation;

pub use account::{Account, AccountKind, AccountUpdate, NewAccount};
pub use event::{EventUpdate, NewEvent, UniEvent};
pub use lost::{
    ClaimReceipt, ClaimSubmission, EVIDENCE_FIELD, LostItem, LostItemStatus, LostItemUpdate,
    NOTES_FIELD, NewLostItem,
};
