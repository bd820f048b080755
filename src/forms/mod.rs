//! Edit forms for articles.
//!
//! Validation runs in two passes, the way an admin form does: every field is
//! cleaned on its own first, then the form as a whole is checked. Field
//! errors land in [`FormErrors`] under the field name; errors that concern
//! the record as a whole go to the non-field list.

mod article;
mod publication;

pub use article::*;
pub use publication::*;

use crate::services::slug::TemplateError;
use std::collections::BTreeMap;

/// Field name under which non-field errors are reported.
pub const NON_FIELD_ERRORS: &str = "__all__";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("This field is required.")]
    Required,
    #[error("Slug must not be empty.")]
    EmptySlug,
    #[error("Another article with this slug already exists")]
    DuplicateSlug,
    #[error("Select a valid choice. {0} is not one of the available choices.")]
    InvalidChoice(String),
    #[error("Enter a valid date/time.")]
    InvalidDate,
    #[error("Ensure this value has at most {max} characters (it has {actual}).")]
    TooLong { max: usize, actual: usize },
    #[error("Could not format slug: {0}")]
    Template(#[from] TemplateError),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    fields: BTreeMap<String, Vec<ValidationError>>,
    non_field: Vec<String>,
}

impl FormErrors {
    pub fn add(&mut self, field: &str, error: ValidationError) {
        self.fields.entry(field.to_string()).or_default().push(error);
    }

    pub fn add_non_field(&mut self, message: impl Into<String>) {
        self.non_field.push(message.into());
    }

    pub fn get(&self, field: &str) -> &[ValidationError] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has(&self, field: &str, error: &ValidationError) -> bool {
        self.get(field).contains(error)
    }

    pub fn non_field_errors(&self) -> &[String] {
        &self.non_field
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &[ValidationError])> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.non_field.is_empty()
    }
}

impl std::fmt::Display for FormErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for message in &self.non_field {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", NON_FIELD_ERRORS, message)?;
            first = false;
        }
        for (field, errors) in &self.fields {
            for error in errors {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{}: {}", field, error)?;
                first = false;
            }
        }
        Ok(())
    }
}

impl std::error::Error for FormErrors {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Widget {
    Select,
    Hidden,
}

/// A choice field as presented to an editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceField<T> {
    pub choices: Vec<(T, String)>,
    pub initial: Option<T>,
    pub widget: Widget,
}

impl<T: Clone> ChoiceField<T> {
    /// A field with a single choice preselects it and hides the widget.
    pub fn new(choices: Vec<(T, String)>, initial: Option<T>) -> Self {
        if let [(only, _)] = choices.as_slice() {
            let only = only.clone();
            return Self {
                choices,
                initial: Some(only),
                widget: Widget::Hidden,
            };
        }
        Self {
            choices,
            initial,
            widget: Widget::Select,
        }
    }

    pub fn hidden(mut self) -> Self {
        self.widget = Widget::Hidden;
        self
    }
}

fn clean_optional_text(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}
