//! Plain-text email rendering for marketplace events.
//!
//! Each event renders to zero or more [`OutgoingEmail`]s. Admin-bound mail
//! is skipped when no admin address is configured.

use std::fmt::Write;

use pgwale_core::text::format_inr;

use crate::bus::{
    CashbackDetails, ContactDetails, InquiryDetails, LandlordContact, ListingSummary,
    MarketplaceEvent,
};

const BRAND: &str = "PG Wale Bhaiya";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Addresses and links the templates need beyond the event itself.
#[derive(Debug, Clone)]
pub struct Recipients {
    pub admin_email: Option<String>,
    /// Public site root, without a trailing slash.
    pub site_url: String,
}

impl Recipients {
    fn admin(&self, subject: String, body: String) -> Option<OutgoingEmail> {
        self.admin_email.as_ref().map(|to| OutgoingEmail {
            to: to.clone(),
            subject,
            body,
        })
    }
}

fn email(to: &str, subject: String, body: String) -> OutgoingEmail {
    OutgoingEmail {
        to: to.to_string(),
        subject,
        body,
    }
}

/// Render every email an event should produce, in send order.
pub fn render(event: &MarketplaceEvent, recipients: &Recipients) -> Vec<OutgoingEmail> {
    let site = recipients.site_url.trim_end_matches('/');
    let mut out = Vec::new();

    match event {
        MarketplaceEvent::LandlordRegistered { landlord } => {
            out.extend(recipients.admin(
                format!("New Landlord Registration - {BRAND}"),
                landlord_block("A new landlord has registered.", landlord),
            ));
            out.push(email(
                &landlord.email,
                format!("Welcome to {BRAND} - Registration Successful"),
                format!(
                    "Hi {},\n\nThanks for registering with {BRAND}. Your account is pending \
                     verification; you can already add PG listings from your dashboard:\n\
                     {site}/landlord/dashboard\n\nTeam {BRAND}\n",
                    landlord.name
                ),
            ));
        }
        MarketplaceEvent::LandlordLoggedIn { landlord, at } => {
            let when = at.format("%d %b %Y %H:%M UTC");
            let mut body = landlord_block("A landlord has logged in.", landlord);
            let _ = writeln!(body, "Time: {when}");
            out.extend(recipients.admin(format!("Landlord Login Activity - {BRAND}"), body));
            out.push(email(
                &landlord.email,
                format!("Login Successful - {BRAND}"),
                format!(
                    "Hi {},\n\nYou signed in to {BRAND} at {when}. If this wasn't you, \
                     contact us immediately.\n\nTeam {BRAND}\n",
                    landlord.name
                ),
            ));
        }
        MarketplaceEvent::ListingSubmitted { listing } => {
            out.extend(recipients.admin(
                format!("New PG Submission - {BRAND}"),
                format!(
                    "A new PG listing is waiting for review.\n\n{}\nReview: {site}/admin\n",
                    listing_block(listing)
                ),
            ));
            out.push(email(
                &listing.owner_email,
                format!("PG Submission Received - {BRAND}"),
                format!(
                    "Hi {},\n\nWe received your listing \"{}\". Our team reviews new \
                     listings within 24-48 hours.\n\n{}\nTeam {BRAND}\n",
                    listing.owner_name,
                    listing.title,
                    listing_block(listing)
                ),
            ));
        }
        MarketplaceEvent::ListingApproved { listing } => {
            out.push(email(
                &listing.owner_email,
                format!("Your PG is Live - {BRAND}"),
                format!(
                    "Hi {},\n\nGood news: \"{}\" has been approved and is now visible to \
                     students.\n\nView it: {site}/pg/{}\n\nTeam {BRAND}\n",
                    listing.owner_name, listing.title, listing.id
                ),
            ));
        }
        MarketplaceEvent::InquiryCreated { listing, inquiry } => {
            out.push(email(
                &listing.contact_email,
                format!("New Inquiry for {} - {BRAND}", listing.title),
                inquiry_body(listing, inquiry),
            ));
        }
        MarketplaceEvent::CashbackRequested { request } => {
            out.extend(recipients.admin(
                format!("New Cashback Request Submitted - {BRAND}"),
                cashback_body(request),
            ));
        }
        MarketplaceEvent::ContactMessage { contact } => {
            out.extend(recipients.admin(
                format!(
                    "Contact Form: {} - {BRAND}",
                    contact.subject.as_deref().unwrap_or("General enquiry")
                ),
                contact_body(contact),
            ));
        }
    }

    out
}

fn landlord_block(intro: &str, landlord: &LandlordContact) -> String {
    let mut body = format!(
        "{intro}\n\nName: {}\nEmail: {}\nPhone: {}\n",
        landlord.name, landlord.email, landlord.phone
    );
    if let Some(business) = &landlord.business_name {
        let _ = writeln!(body, "Business: {business}");
    }
    body
}

fn listing_block(listing: &ListingSummary) -> String {
    let mut body = format!(
        "Title: {}\nLocation: {}\nRent: {}/month\nRoom type: {}\nFor: {}\n",
        listing.title,
        listing.area,
        format_inr(listing.monthly_rent.into()),
        listing.room_type,
        listing.gender_preference
    );
    if let Some(rooms) = listing.available_rooms {
        let _ = writeln!(body, "Available rooms: {rooms}");
    }
    let _ = writeln!(
        body,
        "Landlord: {} ({}, {})",
        listing.owner_name, listing.owner_email, listing.owner_phone
    );
    body
}

fn inquiry_body(listing: &ListingSummary, inquiry: &InquiryDetails) -> String {
    let mut body = format!(
        "Hi {},\n\nA student is interested in \"{}\".\n\nName: {}\nPhone: {}\n",
        listing.owner_name, listing.title, inquiry.name, inquiry.phone
    );
    if let Some(email) = &inquiry.email {
        let _ = writeln!(body, "Email: {email}");
    }
    let _ = writeln!(body, "Type: {}", inquiry.inquiry_type);
    if let Some(message) = &inquiry.message {
        let _ = write!(body, "\nMessage:\n{message}\n");
    }
    let _ = write!(body, "\nTeam {BRAND}\n");
    body
}

fn cashback_body(request: &CashbackDetails) -> String {
    format!(
        "Cashback request #{}\n\nName: {}\nContact: {}\nPG: {}\nBooking date: {}\n\
         Amount paid: {}\nBooking code: {}\n\nPlease review this request in the admin panel.\n",
        request.id,
        request.full_name,
        request.contact_info,
        request.pg_name,
        request.booking_date.format("%d %b %Y"),
        format_inr(request.amount_paid.into()),
        request.booking_code
    )
}

fn contact_body(contact: &ContactDetails) -> String {
    let mut body = format!("From: {} <{}>\n", contact.name, contact.email);
    if let Some(phone) = &contact.phone {
        let _ = writeln!(body, "Phone: {phone}");
    }
    let _ = write!(body, "\n{}\n", contact.message);
    body
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn recipients(admin: Option<&str>) -> Recipients {
        Recipients {
            admin_email: admin.map(str::to_string),
            site_url: "https://pgwale.example/".to_string(),
        }
    }

    fn listing() -> ListingSummary {
        ListingSummary {
            id: 42,
            title: "Green Valley PG".into(),
            area: "Law Gate".into(),
            monthly_rent: 125_000,
            room_type: "Single".into(),
            gender_preference: "Boys Only".into(),
            available_rooms: Some(3),
            owner_name: "Ravi".into(),
            owner_email: "ravi@example.com".into(),
            owner_phone: "+919876543210".into(),
            contact_email: "bookings@greenvalley.example".into(),
        }
    }

    #[test]
    fn submission_notifies_admin_then_owner() {
        let event = MarketplaceEvent::ListingSubmitted { listing: listing() };
        let emails = render(&event, &recipients(Some("admin@example.com")));
        assert_eq!(emails.len(), 2);
        assert_eq!(emails[0].to, "admin@example.com");
        assert_eq!(emails[1].to, "ravi@example.com");
        assert!(emails[0].body.contains("₹1,25,000/month"));
        assert!(emails[0].body.contains("https://pgwale.example/admin"));
    }

    #[test]
    fn admin_mail_skipped_without_address() {
        let event = MarketplaceEvent::ListingSubmitted { listing: listing() };
        let emails = render(&event, &recipients(None));
        assert_eq!(emails.len(), 1);
        assert_eq!(emails[0].to, "ravi@example.com");
    }

    #[test]
    fn approval_links_to_listing() {
        let event = MarketplaceEvent::ListingApproved { listing: listing() };
        let emails = render(&event, &recipients(Some("admin@example.com")));
        assert_eq!(emails.len(), 1);
        assert!(emails[0].body.contains("https://pgwale.example/pg/42"));
    }

    #[test]
    fn inquiry_goes_to_listing_contact_email() {
        let event = MarketplaceEvent::InquiryCreated {
            listing: listing(),
            inquiry: InquiryDetails {
                id: 1,
                name: "Aman".into(),
                phone: "+919812345678".into(),
                email: None,
                message: Some("Is food included?".into()),
                inquiry_type: "general".into(),
            },
        };
        let emails = render(&event, &recipients(Some("admin@example.com")));
        assert_eq!(emails.len(), 1);
        assert_eq!(emails[0].to, "bookings@greenvalley.example");
        assert!(emails[0].subject.contains("Green Valley PG"));
        assert!(emails[0].body.contains("Is food included?"));
        assert!(!emails[0].body.contains("Email:"));
    }

    #[test]
    fn cashback_formats_amount_and_date() {
        let event = MarketplaceEvent::CashbackRequested {
            request: CashbackDetails {
                id: 9,
                full_name: "Priya".into(),
                contact_info: "priya@example.com".into(),
                pg_name: "Green Valley PG".into(),
                booking_date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
                amount_paid: 9000,
                booking_code: "PGW-1001".into(),
            },
        };
        let emails = render(&event, &recipients(Some("admin@example.com")));
        assert_eq!(emails.len(), 1);
        assert!(emails[0].body.contains("₹9,000"));
        assert!(emails[0].body.contains("01 Jul 2025"));
    }
}
