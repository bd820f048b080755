use super::{FormErrors, ValidationError};
use crate::config::ArticleSettings;
use crate::models::PublicationDatesInput;
use crate::services::articles;
use crate::Database;
use anyhow::Result;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Parses a submitted timestamp. Empty input means "unset". Values without
/// an offset are taken as UTC.
pub fn parse_datetime(value: &str) -> Result<Option<DateTime<Utc>>, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(Some(dt.with_timezone(&Utc)));
    }
    for format in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(Some(naive.and_utc()));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(Some(naive.and_utc()));
        }
    }
    Err(ValidationError::InvalidDate)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanedDates {
    pub language: Option<String>,
    pub publication_date: Option<DateTime<Utc>>,
    pub publication_end_date: Option<DateTime<Utc>>,
}

/// Edits the scheduled publication window of an article. The two dates are
/// independent; no ordering between them is enforced.
pub struct PublicationDatesForm<'a> {
    settings: &'a ArticleSettings,
    data: PublicationDatesInput,
    cleaned: CleanedDates,
    errors: FormErrors,
}

impl<'a> PublicationDatesForm<'a> {
    pub fn new(settings: &'a ArticleSettings, data: PublicationDatesInput) -> Self {
        Self {
            settings,
            data,
            cleaned: CleanedDates::default(),
            errors: FormErrors::default(),
        }
    }

    pub fn is_valid(&mut self) -> bool {
        self.cleaned = CleanedDates::default();
        self.errors = FormErrors::default();

        match self.data.language.as_deref().map(str::trim) {
            None | Some("") => self.errors.add("language", ValidationError::Required),
            Some(code) if self.settings.languages.contains(code) => {
                self.cleaned.language = Some(code.to_string())
            }
            Some(code) => self
                .errors
                .add("language", ValidationError::InvalidChoice(code.to_string())),
        }

        match parse_datetime(self.data.publication_date.as_deref().unwrap_or("")) {
            Ok(dt) => self.cleaned.publication_date = dt,
            Err(e) => self.errors.add("publication_date", e),
        }
        match parse_datetime(self.data.publication_end_date.as_deref().unwrap_or("")) {
            Ok(dt) => self.cleaned.publication_end_date = dt,
            Err(e) => self.errors.add("publication_end_date", e),
        }

        if !self.errors.is_empty() {
            tracing::debug!("Publication dates form rejected: {}", self.errors);
        }
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn cleaned_data(&self) -> &CleanedDates {
        &self.cleaned
    }

    pub fn save(mut self, db: &Database, article_id: i64) -> Result<()> {
        if !self.is_valid() {
            return Err(self.errors.into());
        }
        articles::set_publication_dates(
            db,
            article_id,
            self.cleaned.publication_date,
            self.cleaned.publication_end_date,
        )
    }
}
