//! Payload construction
//!
//! Maps a [`Category`] plus the user's raw field values to the string that
//! ends up inside the QR code. Values are inserted verbatim: nothing is
//! percent-encoded or escaped, so a `;` in a WiFi password or a `&` in a
//! message body lands in the payload unchanged.

mod category;

pub use category::{Category, FieldSpec, InputKind};

use serde::{Deserialize, Serialize};

/// Raw field values captured for one category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    /// Network name, address, number, id, or free text
    pub primary: String,
    /// Password (wifi) or message body (sms, email); ignored elsewhere
    pub secondary: String,
}

impl FormState {
    /// Create a form state from both values
    pub fn new(primary: impl Into<String>, secondary: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            secondary: secondary.into(),
        }
    }

    /// Build the payload for this form under the given category
    pub fn payload(&self, category: Category) -> String {
        build_payload(category, &self.primary, &self.secondary)
    }
}

/// Build the canonical payload string for a category.
///
/// Total and side-effect free; an empty `primary` is allowed here, gating
/// on non-empty input is the caller's concern.
pub fn build_payload(category: Category, primary: &str, secondary: &str) -> String {
    match category {
        Category::Wifi => wifi_payload(primary, secondary),
        Category::Email => mailto_uri(primary, secondary),
        Category::Sms => sms_uri(primary, secondary),
        Category::Website => website_url(primary),
        Category::Phone => format!("tel:{primary}"),
        Category::Snapchat => format!("https://www.snapchat.com/add/{primary}"),
        Category::Facebook => format!("https://www.facebook.com/{primary}"),
        Category::Instagram => format!("https://www.instagram.com/{primary}"),
        Category::Text | Category::Youtube => primary.to_string(),
    }
}

/// `WIFI:` network configuration string; the security type is always WPA
pub fn wifi_payload(name: &str, password: &str) -> String {
    format!("WIFI:S:{name};T:WPA;P:{password};;")
}

/// `sms:` URI with a prefilled body
pub fn sms_uri(number: &str, message: &str) -> String {
    format!("sms:{number}?body={message}")
}

/// `mailto:` URI with a prefilled body
pub fn mailto_uri(address: &str, message: &str) -> String {
    format!("mailto:{address}?body={message}")
}

fn website_url(value: &str) -> String {
    // Anything starting with "http" passes through, including "https://".
    if value.starts_with("http") {
        value.to_string()
    } else {
        format!("https://{value}")
    }
}
