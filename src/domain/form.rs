//! Submitted form data.
//!
//! A [`FormSubmission`] is the ephemeral field-name to value mapping consumed
//! once by an action. Fields may repeat (multi-value inputs such as skills)
//! and may carry file uploads. Empty text values are treated as absent, the
//! same way an untouched input would be.

use crate::domain::error::{JobBoardError, Result};

/// A file attached to a form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            bytes,
        }
    }

    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// Value of a single form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    File(FileUpload),
}

/// Field name to value mapping for one action invocation.
///
/// # Examples
///
/// ```
/// use jobboard::domain::FormSubmission;
///
/// let form = FormSubmission::new()
///     .with_text("email", "ada@example.com")
///     .with_text("password", "")
///     .with_text("skills", "rust")
///     .with_text("skills", "sql");
///
/// assert_eq!(form.text("email"), Some("ada@example.com"));
/// assert_eq!(form.text("password"), None);
/// assert_eq!(form.all_text("skills"), vec!["rust", "sql"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSubmission {
    fields: Vec<(String, FieldValue)>,
}

impl FormSubmission {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a text value, keeping earlier values for the same name.
    #[must_use]
    pub fn with_text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.append(name, FieldValue::Text(value.into()));
        self
    }

    /// Appends a file value.
    #[must_use]
    pub fn with_file(mut self, name: impl Into<String>, file: FileUpload) -> Self {
        self.append(name, FieldValue::File(file));
        self
    }

    pub fn append(&mut self, name: impl Into<String>, value: FieldValue) {
        self.fields.push((name.into(), value));
    }

    /// Returns the first non-empty text value for `name`.
    #[must_use]
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.iter().find_map(|(field, value)| match value {
            FieldValue::Text(text) if field == name && !text.is_empty() => Some(text.as_str()),
            _ => None,
        })
    }

    /// Returns every non-empty text value for `name`, in submission order.
    #[must_use]
    pub fn all_text(&self, name: &str) -> Vec<&str> {
        self.fields
            .iter()
            .filter_map(|(field, value)| match value {
                FieldValue::Text(text) if field == name && !text.is_empty() => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Returns the first non-empty file attached to `name`.
    #[must_use]
    pub fn file(&self, name: &str) -> Option<&FileUpload> {
        self.fields.iter().find_map(|(field, value)| match value {
            FieldValue::File(file) if field == name && !file.bytes.is_empty() => Some(file),
            _ => None,
        })
    }

    /// Fetches all `names` as text, failing with a validation error that
    /// lists every missing field.
    ///
    /// # Errors
    ///
    /// Returns [`JobBoardError::Validation`] prefixed with `message` when at
    /// least one field is absent or empty.
    pub fn require<const N: usize>(&self, names: [&str; N], message: &str) -> Result<[&str; N]> {
        let missing: Vec<&str> = names
            .iter()
            .copied()
            .filter(|name| self.text(name).is_none())
            .collect();

        if !missing.is_empty() {
            tracing::debug!(missing = ?missing, "form validation failed");
            return Err(JobBoardError::Validation(format!(
                "{message} (missing: {})",
                missing.join(", ")
            )));
        }

        Ok(names.map(|name| self.text(name).unwrap_or_default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorKind;

    #[test]
    fn require_lists_every_missing_field() {
        let form = FormSubmission::new().with_text("title", "Engineer").with_text("position", "");

        let err = form
            .require(["title", "position", "description"], "Please fill inputs.")
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(
            err.message(),
            "Please fill inputs. (missing: position, description)"
        );
    }

    #[test]
    fn require_returns_values_in_requested_order() {
        let form = FormSubmission::new()
            .with_text("password", "hunter2")
            .with_text("email", "ada@example.com");

        let [email, password] = form.require(["email", "password"], "missing").unwrap();
        assert_eq!(email, "ada@example.com");
        assert_eq!(password, "hunter2");
    }

    #[test]
    fn empty_file_counts_as_absent() {
        let form = FormSubmission::new().with_file("cv", FileUpload::new("cv.pdf", vec![]));
        assert!(form.file("cv").is_none());
    }
}
