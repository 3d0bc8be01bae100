mod accounts;
mod admin;
mod envelope;
mod mail;
mod mail_admin;

pub use accounts::*;
pub use admin::*;
pub use envelope::*;
pub use mail::*;
pub use mail_admin::*;
