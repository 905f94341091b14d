// --- File: crates/slotbook_mail/src/lib.rs ---
pub mod error;
pub mod service;
pub mod template;

pub use error::MailError;
pub use service::{LogNotificationService, ResendNotificationService};
pub use template::{ConfirmationContext, ConfirmationRenderer, RenderedEmail};
