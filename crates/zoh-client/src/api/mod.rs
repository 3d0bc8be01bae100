//! API endpoint modules.

mod accounts;
mod admin;
mod mail;
mod mail_admin;

pub use accounts::AccountsApi;
pub use admin::AdminApi;
pub use mail::MailApi;
pub use mail_admin::MailAdminApi;
