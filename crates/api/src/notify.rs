//! Builders turning stored rows into event payloads.

use pgwale_db::models::cashback::CashbackRequest;
use pgwale_db::models::inquiry::Inquiry;
use pgwale_db::models::landlord::Landlord;
use pgwale_db::models::pg_listing::PgListing;
use pgwale_db::repositories::LandlordRepo;
use pgwale_db::DbPool;
use pgwale_events::bus::{CashbackDetails, InquiryDetails, LandlordContact, ListingSummary};

pub fn landlord_contact(landlord: &Landlord) -> LandlordContact {
    LandlordContact {
        id: landlord.id,
        name: landlord.name.clone(),
        email: landlord.email.clone(),
        phone: landlord.phone.clone(),
        business_name: landlord.business_name.clone(),
    }
}

/// Summary of `listing` addressed to its landlord account, or to the
/// listing's own contact details when it has no (resolvable) landlord.
pub async fn listing_summary(
    pool: &DbPool,
    listing: &PgListing,
) -> Result<ListingSummary, sqlx::Error> {
    let owner = match listing.landlord_id {
        Some(id) => LandlordRepo::find_by_id(pool, id).await?,
        None => None,
    };
    let (owner_name, owner_email, owner_phone) = match owner {
        Some(l) => (l.name, l.email, l.phone),
        None => (
            listing.contact_person.clone(),
            listing.email.clone(),
            listing.phone_number.clone(),
        ),
    };
    Ok(ListingSummary {
        id: listing.id,
        title: listing.title.clone(),
        area: listing.area.clone(),
        monthly_rent: listing.monthly_rent,
        room_type: listing.room_type.clone(),
        gender_preference: listing.gender_preference.clone(),
        available_rooms: listing.available_rooms,
        owner_name,
        owner_email,
        owner_phone,
        contact_email: listing.email.clone(),
    })
}

pub fn inquiry_details(inquiry: &Inquiry) -> InquiryDetails {
    InquiryDetails {
        id: inquiry.id,
        name: inquiry.name.clone(),
        phone: inquiry.phone.clone(),
        email: inquiry.email.clone(),
        message: inquiry.message.clone(),
        inquiry_type: inquiry.inquiry_type.clone(),
    }
}

pub fn cashback_details(request: &CashbackRequest) -> CashbackDetails {
    CashbackDetails {
        id: request.id,
        full_name: request.full_name.clone(),
        contact_info: request.contact_info.clone(),
        pg_name: request.pg_name.clone(),
        booking_date: request.booking_date,
        amount_paid: request.amount_paid,
        booking_code: request.booking_code.clone(),
    }
}
