pub mod admin;
pub mod cashback;
pub mod catalog;
pub mod contact;
pub mod health;
pub mod inquiry;
pub mod landlord;
pub mod pg;
pub mod search;
