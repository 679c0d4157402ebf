//! External delivery channels for marketplace notifications.

pub mod email;
