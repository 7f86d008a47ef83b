//! Form session: category selection, field entry and generation

use crate::error::{Error, Result};
use crate::payload::{Category, FormState};

/// State of one generate flow.
///
/// The category is locked once selected; [`FormSession::reset`] returns to
/// the selection step with an empty form.
#[derive(Debug, Clone, Default)]
pub struct FormSession {
    category: Option<Category>,
    form: FormState,
    generated: Option<String>,
}

impl FormSession {
    /// Start a session with no category selected
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently selected category
    pub fn category(&self) -> Option<Category> {
        self.category
    }

    /// Current field values
    pub fn form(&self) -> &FormState {
        &self.form
    }

    /// Payload produced by the last successful [`generate`](Self::generate)
    pub fn payload(&self) -> Option<&str> {
        self.generated.as_deref()
    }

    /// Select the category for this session
    pub fn select(&mut self, category: Category) -> Result<()> {
        if let Some(current) = self.category {
            return Err(Error::CategoryLocked(current));
        }
        tracing::debug!(%category, "category selected");
        self.category = Some(category);
        Ok(())
    }

    /// Set the primary field (name, address, number, id or text)
    pub fn set_primary(&mut self, value: impl Into<String>) -> Result<()> {
        self.require_category()?;
        self.form.primary = value.into();
        self.generated = None;
        Ok(())
    }

    /// Set the secondary field; only wifi, sms and email have one
    pub fn set_secondary(&mut self, value: impl Into<String>) -> Result<()> {
        let category = self.require_category()?;
        if category.secondary_field().is_none() {
            return Err(Error::UnsupportedField(format!(
                "{category} has no secondary field"
            )));
        }
        self.form.secondary = value.into();
        self.generated = None;
        Ok(())
    }

    /// Whether generation is currently allowed
    pub fn can_generate(&self) -> bool {
        self.category.is_some() && !self.form.primary.is_empty()
    }

    /// Build and remember the payload for the current category and fields
    pub fn generate(&mut self) -> Result<&str> {
        let category = self.require_category()?;
        if self.form.primary.is_empty() {
            return Err(Error::MissingField(
                category.primary_field().label.to_string(),
            ));
        }

        let payload = self.form.payload(category);
        tracing::debug!(%category, length = payload.len(), "payload generated");
        Ok(self.generated.insert(payload).as_str())
    }

    /// Drop the category and all field values
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn require_category(&self) -> Result<Category> {
        self.category.ok_or(Error::NoCategory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_wifi() {
        let mut session = FormSession::new();
        session.select(Category::Wifi).unwrap();
        session.set_primary("HomeNet").unwrap();
        session.set_secondary("secret").unwrap();

        assert!(session.can_generate());
        assert_eq!(session.generate().unwrap(), "WIFI:S:HomeNet;T:WPA;P:secret;;");
        assert_eq!(session.payload(), Some("WIFI:S:HomeNet;T:WPA;P:secret;;"));
    }

    #[test]
    fn test_category_locked_until_reset() {
        let mut session = FormSession::new();
        session.select(Category::Sms).unwrap();

        let err = session.select(Category::Email).unwrap_err();
        assert!(matches!(err, Error::CategoryLocked(Category::Sms)));

        session.reset();
        assert!(session.category().is_none());
        session.select(Category::Email).unwrap();
        assert_eq!(session.category(), Some(Category::Email));
    }

    #[test]
    fn test_empty_primary_blocks_generation() {
        let mut session = FormSession::new();
        session.select(Category::Phone).unwrap();

        assert!(!session.can_generate());
        let err = session.generate().unwrap_err();
        assert!(matches!(err, Error::MissingField(label) if label == "Enter Phone Number"));
        assert!(session.payload().is_none());
    }

    #[test]
    fn test_fields_require_category() {
        let mut session = FormSession::new();
        assert!(matches!(session.set_primary("x"), Err(Error::NoCategory)));
        assert!(matches!(session.generate(), Err(Error::NoCategory)));
    }

    #[test]
    fn test_secondary_rejected_for_single_field_categories() {
        let mut session = FormSession::new();
        session.select(Category::Instagram).unwrap();
        assert!(matches!(
            session.set_secondary("nope"),
            Err(Error::UnsupportedField(_))
        ));
    }

    #[test]
    fn test_edit_clears_generated_payload() {
        let mut session = FormSession::new();
        session.select(Category::Website).unwrap();
        session.set_primary("example.com").unwrap();
        session.generate().unwrap();

        session.set_primary("example.org").unwrap();
        assert!(session.payload().is_none());
        assert_eq!(session.generate().unwrap(), "https://example.org");
    }
}
