// --- File: crates/slotbook_booking/src/lib.rs ---
pub mod doc;
pub mod handlers;
pub mod logic;
pub mod routes;
pub mod state;
#[cfg(test)]
mod test_support;

pub use routes::routes;
pub use state::BookingState;
