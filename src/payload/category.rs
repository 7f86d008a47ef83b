//! Content categories and the form fields each one collects

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Content type selected by the user; governs how the payload is built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// WiFi network credentials
    Wifi,
    /// Plain text
    Text,
    /// Phone number (`tel:`)
    Phone,
    /// YouTube video link
    Youtube,
    /// Email address with a message body (`mailto:`)
    Email,
    /// Phone number with a message body (`sms:`)
    Sms,
    /// Website address
    Website,
    /// Snapchat username
    Snapchat,
    /// Facebook profile id
    Facebook,
    /// Instagram username
    Instagram,
}

impl Category {
    /// Every category, in the order they are offered to the user
    pub const ALL: [Category; 10] = [
        Category::Wifi,
        Category::Text,
        Category::Phone,
        Category::Youtube,
        Category::Email,
        Category::Sms,
        Category::Website,
        Category::Snapchat,
        Category::Facebook,
        Category::Instagram,
    ];

    /// Lowercase identifier used on the command line and in serialized output
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Wifi => "wifi",
            Category::Text => "text",
            Category::Phone => "phone",
            Category::Youtube => "youtube",
            Category::Email => "email",
            Category::Sms => "sms",
            Category::Website => "website",
            Category::Snapchat => "snapchat",
            Category::Facebook => "facebook",
            Category::Instagram => "instagram",
        }
    }

    /// Human-facing name shown on the selection screen
    pub fn display_name(self) -> &'static str {
        match self {
            Category::Wifi => "WiFi",
            Category::Text => "Text",
            Category::Phone => "Phone Number",
            Category::Youtube => "YouTube Video",
            Category::Email => "Email",
            Category::Sms => "SMS",
            Category::Website => "Website",
            Category::Snapchat => "Snapchat",
            Category::Facebook => "Facebook",
            Category::Instagram => "Instagram",
        }
    }

    /// The field every category requires
    pub fn primary_field(self) -> FieldSpec {
        match self {
            Category::Wifi => FieldSpec::new("Enter WiFi Name", InputKind::Text),
            Category::Phone | Category::Sms => {
                FieldSpec::new("Enter Phone Number", InputKind::Phone)
            }
            Category::Email => FieldSpec::new("Enter Email Address", InputKind::Email),
            Category::Snapchat => FieldSpec::new("Enter snapchat ID", InputKind::Text),
            Category::Facebook => FieldSpec::new("Enter facebook ID", InputKind::Text),
            Category::Instagram => FieldSpec::new("Enter instagram ID", InputKind::Text),
            Category::Text => FieldSpec::new("Enter text", InputKind::Text),
            Category::Youtube => FieldSpec::new("Enter youtube", InputKind::Text),
            Category::Website => FieldSpec::new("Enter website", InputKind::Text),
        }
    }

    /// The optional second field (password or message body), if the category has one
    pub fn secondary_field(self) -> Option<FieldSpec> {
        match self {
            Category::Wifi => Some(FieldSpec::new("Enter WiFi Password", InputKind::Text)),
            Category::Sms | Category::Email => {
                Some(FieldSpec::new("Enter Message", InputKind::Text))
            }
            Category::Text
            | Category::Phone
            | Category::Youtube
            | Category::Website
            | Category::Snapchat
            | Category::Facebook
            | Category::Instagram => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim().to_ascii_lowercase();
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == wanted)
            .ok_or_else(|| Error::UnknownCategory(value.to_string()))
    }
}

/// Keyboard hint for a form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    /// Free text
    Text,
    /// Phone number pad
    Phone,
    /// Email address keyboard
    Email,
}

/// Label and input kind of a single form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    /// Placeholder shown in the empty input
    pub label: &'static str,
    /// Keyboard hint
    pub kind: InputKind,
}

impl FieldSpec {
    const fn new(label: &'static str, kind: InputKind) -> Self {
        Self { label, kind }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("WiFi".parse::<Category>().unwrap(), Category::Wifi);
        assert_eq!(" instagram ".parse::<Category>().unwrap(), Category::Instagram);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "tiktok".parse::<Category>().unwrap_err();
        assert!(matches!(err, Error::UnknownCategory(name) if name == "tiktok"));
    }

    #[test]
    fn test_names_round_trip_through_parse() {
        for category in Category::ALL {
            assert_eq!(category.to_string().parse::<Category>().unwrap(), category);
        }
    }

    #[test]
    fn test_secondary_fields() {
        let with_secondary: Vec<_> = Category::ALL
            .into_iter()
            .filter(|c| c.secondary_field().is_some())
            .collect();
        assert_eq!(
            with_secondary,
            vec![Category::Wifi, Category::Email, Category::Sms]
        );
        assert_eq!(Category::Sms.primary_field().kind, InputKind::Phone);
        assert_eq!(Category::Email.primary_field().kind, InputKind::Email);
    }
}
