//! Payload string builders
//!
//! Helpers that format structured data into the text a scanner app
//! recognises. The output is ordinary text for [`crate::render`].

/// Contact cards
pub mod vcard;
/// `mailto:` links
pub mod mailto;
/// Wi-Fi join strings
pub mod wifi;

pub use mailto::build_mailto_payload;
pub use vcard::{Contact, build_vcard_payload};
pub use wifi::{WifiSecurity, build_wifi_payload};
