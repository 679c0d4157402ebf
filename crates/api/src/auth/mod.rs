pub mod firebase;
pub mod jwt;
pub mod password;
