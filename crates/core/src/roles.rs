//! Well-known role name constants carried in token claims.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_LANDLORD: &str = "landlord";

/// Returns `true` for roles allowed to manage listings.
pub fn is_listing_manager(role: &str) -> bool {
    role == ROLE_ADMIN || role == ROLE_LANDLORD
}
