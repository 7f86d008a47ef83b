//! Rendering of generation results and user-visible alerts

use crate::error::Error;
use crate::export::ExportedImage;
use crate::payload::Category;
use serde::Serialize;
use serde_json::{Map, Value, json};
use std::path::Path;

/// Combined structured and human-readable representation of a generated code
#[derive(Debug, Clone)]
pub struct RenderedGeneration {
    /// Structured JSON representation
    pub json: Value,
    /// Human-readable lines for terminal presentation
    pub human: Vec<String>,
}

/// Everything produced by one `generate` invocation
#[derive(Debug, Clone, Copy)]
pub struct Generation<'a> {
    /// Selected category
    pub category: Category,
    /// Payload encoded in the code
    pub payload: &'a str,
    /// Terminal rendering of the code, if requested
    pub terminal: Option<&'a str>,
    /// PNG written to an explicit path, if requested
    pub png_path: Option<&'a Path>,
    /// Gallery export, if requested and successful
    pub exported: Option<&'a ExportedImage>,
}

/// Render a generation into both JSON and human-readable forms.
pub fn render_generation(generation: &Generation<'_>) -> RenderedGeneration {
    let mut root = Map::new();
    root.insert(
        "category".to_string(),
        Value::String(generation.category.to_string()),
    );
    root.insert(
        "payload".to_string(),
        Value::String(generation.payload.to_string()),
    );
    root.insert(
        "payload_bytes".to_string(),
        Value::from(generation.payload.len()),
    );
    if let Some(path) = generation.png_path {
        root.insert(
            "png_path".to_string(),
            Value::String(path.display().to_string()),
        );
    }
    if let Some(exported) = generation.exported {
        root.insert(
            "exported".to_string(),
            json!({
                "path": exported.path.display().to_string(),
                "album": exported.album,
                "bytes": exported.bytes.len(),
            }),
        );
    }

    let mut human = Vec::new();
    if let Some(terminal) = generation.terminal {
        human.extend(terminal.lines().map(str::to_string));
        human.push(String::new());
    }
    human.push(format!("{} QR code", generation.category.display_name()));
    human.push(format!("  Payload: {}", generation.payload));
    if let Some(path) = generation.png_path {
        human.push(format!("  PNG written to {}", path.display()));
    }
    if let Some(exported) = generation.exported {
        human.push(format!(
            "  Saved to gallery album '{}': {}",
            exported.album,
            exported.path.display()
        ));
    }

    RenderedGeneration {
        json: Value::Object(root),
        human,
    }
}

/// Structured listing of every category and its fields
pub fn categories_value() -> Value {
    Value::Array(
        Category::ALL
            .iter()
            .map(|category| {
                json!({
                    "id": category.as_str(),
                    "name": category.display_name(),
                    "primary": category.primary_field(),
                    "secondary": category.secondary_field(),
                })
            })
            .collect(),
    )
}

/// Title and message shown to the user for a failed operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    /// Short heading
    pub title: &'static str,
    /// Explanation
    pub message: String,
}

/// Map an error to the alert the user sees
pub fn alert_for(err: &Error) -> Alert {
    match err {
        Error::PermissionDenied => Alert {
            title: "Permission Denied",
            message: "You need to allow storage access to save the QR code.".to_string(),
        },
        Error::MissingField(field) => Alert {
            title: "Error",
            message: missing_field_message(field),
        },
        Error::DispatchFailed { scheme, .. } => Alert {
            title: "Error",
            message: match *scheme {
                "sms" => "Unable to send SMS.".to_string(),
                "mailto" => "Unable to send email.".to_string(),
                other => format!("Unable to open {other}: link."),
            },
        },
        Error::WriteFailed(_) => Alert {
            title: "Save Failed",
            message: "The QR code could not be saved to the gallery.".to_string(),
        },
        other => Alert {
            title: "Error",
            message: other.to_string(),
        },
    }
}

fn missing_field_message(field: &str) -> String {
    match field {
        "phone number" => "Please provide a phone number and a message.".to_string(),
        "email address" => "Please provide an email address and a message.".to_string(),
        label => {
            let label = label.strip_prefix("Enter ").unwrap_or(label);
            format!("Please provide a value for {label}.")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_render_generation() {
        let exported = ExportedImage {
            path: PathBuf::from("/gallery/Download/qrcode.png"),
            album: "Download".to_string(),
            bytes: vec![0; 42],
        };
        let rendered = render_generation(&Generation {
            category: Category::Wifi,
            payload: "WIFI:S:HomeNet;T:WPA;P:secret;;",
            terminal: Some("##\n##"),
            png_path: None,
            exported: Some(&exported),
        });

        assert_eq!(rendered.json["category"], "wifi");
        assert_eq!(rendered.json["payload"], "WIFI:S:HomeNet;T:WPA;P:secret;;");
        assert_eq!(rendered.json["exported"]["bytes"], 42);
        assert!(rendered.json.get("png_path").is_none());
        assert_eq!(rendered.human[0], "##");
        assert!(rendered.human.iter().any(|l| l == "WiFi QR code"));
    }

    #[test]
    fn test_categories_value() {
        let value = categories_value();
        let list = value.as_array().unwrap();
        assert_eq!(list.len(), Category::ALL.len());
        assert_eq!(list[0]["id"], "wifi");
        assert_eq!(list[0]["secondary"]["label"], "Enter WiFi Password");
        assert!(list[1]["secondary"].is_null());
    }

    #[test]
    fn test_alerts() {
        assert_eq!(alert_for(&Error::PermissionDenied).title, "Permission Denied");
        assert_eq!(
            alert_for(&Error::MissingField("phone number".into())).message,
            "Please provide a phone number and a message."
        );
        assert_eq!(
            alert_for(&Error::MissingField("Enter WiFi Name".into())).message,
            "Please provide a value for WiFi Name."
        );
        let err = Error::DispatchFailed {
            scheme: "mailto",
            reason: "no handler".into(),
        };
        assert_eq!(alert_for(&err).message, "Unable to send email.");
    }
}
