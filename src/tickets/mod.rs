//! Tickets: party information, reservation records and lifecycle transitions

pub mod lifecycle;
pub mod party;
pub mod record;

pub use lifecycle::{Receipt, ReceiptKind, TicketDesk};
pub use party::{Member, MemberForm, MemberInfo, Party, PartyForm, PartyInfo};
pub use record::{ReservationLog, ReservationRecord, ReservationStatus};
