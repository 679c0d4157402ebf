//! Background worker turning [`MarketplaceEvent`]s into emails.
//!
//! Emails for one event are sent one after another. A failed send is logged
//! and the next email is attempted; nothing is retried and nothing is
//! reported back to the request that published the event.

use std::sync::Arc;

use tokio::sync::broadcast;

use crate::bus::MarketplaceEvent;
use crate::delivery::email::MailTransport;
use crate::templates::{self, Recipients};

pub struct Notifier {
    /// `None` when SMTP is not configured; emails are logged instead.
    transport: Option<Arc<dyn MailTransport>>,
    recipients: Recipients,
}

impl Notifier {
    pub fn new(transport: Option<Arc<dyn MailTransport>>, recipients: Recipients) -> Self {
        Self {
            transport,
            recipients,
        }
    }

    /// Run until the bus is dropped.
    pub async fn run(self, mut receiver: broadcast::Receiver<MarketplaceEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    self.handle(&event).await;
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Notifier lagged, some emails were not sent");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, notifier shutting down");
                    break;
                }
            }
        }
    }

    /// Render and send every email for `event`. Returns how many were sent.
    pub async fn handle(&self, event: &MarketplaceEvent) -> usize {
        let emails = templates::render(event, &self.recipients);
        let Some(transport) = &self.transport else {
            for email in &emails {
                tracing::info!(
                    event_type = event.event_type(),
                    to = %email.to,
                    subject = %email.subject,
                    "Email delivery disabled, skipping notification"
                );
            }
            return 0;
        };

        let mut sent = 0;
        for email in &emails {
            match transport.send(email).await {
                Ok(()) => sent += 1,
                Err(e) => {
                    tracing::error!(
                        event_type = event.event_type(),
                        to = %email.to,
                        error = %e,
                        "Failed to send notification email"
                    );
                }
            }
        }
        sent
    }
}
