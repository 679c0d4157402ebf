//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is shared via `Arc<EventBus>` across request handlers.
//! Publishing never blocks and never fails the caller.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use tokio::sync::broadcast;
use pgwale_core::types::DbId;

// ---------------------------------------------------------------------------
// Event payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct LandlordContact {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub business_name: Option<String>,
}

/// Listing details carried by listing and inquiry events.
///
/// `owner_*` is the landlord account when the listing has one, otherwise the
/// listing's own contact fields.
#[derive(Debug, Clone, Serialize)]
pub struct ListingSummary {
    pub id: DbId,
    pub title: String,
    pub area: String,
    pub monthly_rent: i32,
    pub room_type: String,
    pub gender_preference: String,
    pub available_rooms: Option<i32>,
    pub owner_name: String,
    pub owner_email: String,
    pub owner_phone: String,
    /// Contact email published on the listing itself.
    pub contact_email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct InquiryDetails {
    pub id: DbId,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub message: Option<String>,
    pub inquiry_type: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CashbackDetails {
    pub id: DbId,
    pub full_name: String,
    pub contact_info: String,
    pub pg_name: String,
    pub booking_date: NaiveDate,
    pub amount_paid: i32,
    pub booking_code: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactDetails {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: String,
}

// ---------------------------------------------------------------------------
// MarketplaceEvent
// ---------------------------------------------------------------------------

/// Something that happened which someone should hear about by email.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MarketplaceEvent {
    LandlordRegistered {
        landlord: LandlordContact,
    },
    LandlordLoggedIn {
        landlord: LandlordContact,
        at: DateTime<Utc>,
    },
    ListingSubmitted {
        listing: ListingSummary,
    },
    ListingApproved {
        listing: ListingSummary,
    },
    InquiryCreated {
        listing: ListingSummary,
        inquiry: InquiryDetails,
    },
    CashbackRequested {
        request: CashbackDetails,
    },
    ContactMessage {
        contact: ContactDetails,
    },
}

impl MarketplaceEvent {
    /// Dot-separated name used in logs.
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::LandlordRegistered { .. } => "landlord.registered",
            Self::LandlordLoggedIn { .. } => "landlord.logged_in",
            Self::ListingSubmitted { .. } => "listing.submitted",
            Self::ListingApproved { .. } => "listing.approved",
            Self::InquiryCreated { .. } => "inquiry.created",
            Self::CashbackRequested { .. } => "cashback.requested",
            Self::ContactMessage { .. } => "contact.message",
        }
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 256;

/// In-process fan-out event bus.
pub struct EventBus {
    sender: broadcast::Sender<MarketplaceEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed messages are dropped
    /// and slow receivers observe `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    pub fn publish(&self, event: MarketplaceEvent) {
        let event_type = event.event_type();
        // A send error only means there are zero receivers.
        if self.sender.send(event).is_err() {
            tracing::debug!(event_type, "No notification subscribers, event dropped");
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<MarketplaceEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
