//! API Routes

pub mod health;
pub mod phone;
pub mod qr;
pub mod sms;
pub mod upi;
pub mod url;
