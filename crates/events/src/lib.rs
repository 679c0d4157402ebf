//! Marketplace event bus and email notifications.
//!
//! - [`EventBus`]: in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`MarketplaceEvent`]: the typed domain events handlers publish.
//! - [`templates`]: plain-text subjects and bodies per event.
//! - [`delivery`]: the SMTP transport behind the [`MailTransport`] seam.
//! - [`Notifier`]: background worker turning events into emails.

pub mod bus;
pub mod delivery;
pub mod notifier;
pub mod templates;

pub use bus::{EventBus, MarketplaceEvent};
pub use delivery::email::{EmailConfig, EmailError, MailTransport, SmtpMailer};
pub use notifier::Notifier;
pub use templates::{OutgoingEmail, Recipients};
