//! Remote collaborators: identity provider, SMS gateway, filter options

mod error;
pub mod filters;
mod http;
pub mod identity;
pub mod sms;

pub use error::ServiceError;
pub use filters::{FilterOption, FilterOptionsSource, HttpFilterOptions};
pub use identity::{HttpIdentityService, IdentityService};
pub use sms::{HttpSmsGateway, SmsGateway, SmsMessage, SmsReceipt};
