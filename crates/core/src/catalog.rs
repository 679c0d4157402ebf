//! Published option lists for listings and landlord verification.

use crate::error::CoreError;

pub const AMENITIES: &[&str] = &[
    "WiFi",
    "AC",
    "TV",
    "Mess",
    "Parking",
    "Washing Machine",
    "Power Backup",
    "Refrigerator",
    "Security",
    "Geyser",
    "Gym",
    "Laundry",
    "Study Room",
    "Garden",
    "Swimming Pool",
    "CCTV",
    "24/7 Water",
    "Housekeeping",
    "Medical Facility",
    "Recreation Room",
    "Balcony",
    "Furnished",
    "Semi-Furnished",
    "Wardrobe",
    "Bed",
    "Mattress",
    "Fan",
    "Light",
    "Plug Points",
    "Intercom",
];

pub const ROOM_TYPES: &[&str] = &[
    "1 BHK", "2 BHK", "3 BHK", "Single", "Double", "Triple", "Sharing", "Private", "Studio",
];

pub const GENDER_PREFERENCES: &[&str] = &["Boys Only", "Girls Only", "Both", "Co-ed"];

pub const POPULAR_AREAS: &[&str] = &[
    "Law Gate",
    "Phagwara",
    "Deep Nagar",
    "Green Avenue",
    "Model Town",
    "Urban Estate",
    "Civil Lines",
    "Banga Road",
    "GT Road",
    "Railway Station Area",
    "Bus Stand Area",
    "College Road",
    "Main Market",
    "New Colony",
    "Old City",
    "Industrial Area",
    "Residential Area",
];

pub const DOCUMENT_TYPES: &[&str] = &[
    "Aadhaar Card",
    "PAN Card",
    "Voter ID",
    "Driving License",
    "Property Papers",
];

/// Room types may combine catalog entries with `/` (e.g. `Single/Double`).
pub fn validate_room_type(room_type: &str) -> Result<(), CoreError> {
    let all_known = room_type
        .split('/')
        .map(str::trim)
        .all(|part| ROOM_TYPES.iter().any(|known| known.eq_ignore_ascii_case(part)));
    if all_known {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid room type '{room_type}'. Must be one of: {ROOM_TYPES:?}"
        )))
    }
}

pub fn validate_gender_preference(preference: &str) -> Result<(), CoreError> {
    if GENDER_PREFERENCES.contains(&preference) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid gender preference '{preference}'. Must be one of: {GENDER_PREFERENCES:?}"
        )))
    }
}

/// Trim, drop blanks, and dedupe case-insensitively while keeping first-seen order.
///
/// Amenities outside [`AMENITIES`] are kept; landlords list extras freely.
pub fn normalize_amenities(amenities: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(amenities.len());
    for amenity in amenities {
        let trimmed = amenity.trim();
        if trimmed.is_empty() {
            continue;
        }
        if !out.iter().any(|seen| seen.eq_ignore_ascii_case(trimmed)) {
            out.push(trimmed.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combined_room_types_are_accepted() {
        assert!(validate_room_type("Single").is_ok());
        assert!(validate_room_type("Single/Double").is_ok());
        assert!(validate_room_type("double / triple").is_ok());
        assert!(validate_room_type("Penthouse").is_err());
        assert!(validate_room_type("Single/Castle").is_err());
    }

    #[test]
    fn gender_preference_is_exact() {
        assert!(validate_gender_preference("Boys Only").is_ok());
        assert!(validate_gender_preference("boys").is_err());
    }

    #[test]
    fn amenities_are_deduped_in_order() {
        let input = vec![
            " WiFi".to_string(),
            "Parking".to_string(),
            "wifi".to_string(),
            "".to_string(),
            "Meals".to_string(),
        ];
        assert_eq!(
            normalize_amenities(&input),
            vec!["WiFi".to_string(), "Parking".to_string(), "Meals".to_string()]
        );
    }
}
