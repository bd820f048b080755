use super::{clean_optional_text, ChoiceField, FormErrors, ValidationError};
use crate::config::ArticleSettings;
use crate::models::{Article, ArticleInput, CleanedArticle};
use crate::services::{articles, pages, slug};
use crate::Database;
use anyhow::Result;
use chrono::{DateTime, Utc};
use rusqlite::Connection;

const TITLE_MAX_LENGTH: usize = 255;
const SLUG_MAX_LENGTH: usize = 255;

/// Values that survived cleaning. A field whose cleaning failed stays `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleanedData {
    pub language: Option<String>,
    pub tree: Option<i64>,
    pub template: Option<String>,
    pub login_required: bool,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub page_title: Option<String>,
    pub menu_title: Option<String>,
    pub meta_description: Option<String>,
    pub image: Option<String>,
}

/// Edit form for an article and its title in one language.
pub struct ArticleForm<'a> {
    settings: &'a ArticleSettings,
    instance: Option<&'a Article>,
    data: ArticleInput,
    now: DateTime<Utc>,
    initial_slug: Option<String>,
    cleaned: CleanedData,
    errors: FormErrors,
    validated: bool,
}

impl<'a> ArticleForm<'a> {
    pub fn new(
        settings: &'a ArticleSettings,
        instance: Option<&'a Article>,
        data: ArticleInput,
    ) -> Self {
        let now = instance.map(|a| a.creation_date).unwrap_or_else(Utc::now);
        Self {
            settings,
            instance,
            data,
            now,
            initial_slug: None,
            cleaned: CleanedData::default(),
            errors: FormErrors::default(),
            validated: false,
        }
    }

    /// Overrides the timestamp used for new articles. Existing articles
    /// always format against their creation date.
    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        if self.instance.is_none() {
            self.now = now;
        }
        self
    }

    /// The slug currently stored for this title. Kept verbatim when the
    /// submission carries no slug.
    pub fn with_initial_slug(mut self, slug: impl Into<String>) -> Self {
        self.initial_slug = Some(slug.into());
        self
    }

    pub fn data(&self) -> &ArticleInput {
        &self.data
    }

    /// Changing the submission discards earlier validation results.
    pub fn data_mut(&mut self) -> &mut ArticleInput {
        self.validated = false;
        &mut self.data
    }

    pub fn language_field(&self) -> ChoiceField<String> {
        let choices = self
            .settings
            .languages
            .iter()
            .map(|l| (l.code.clone(), l.label.clone()))
            .collect();
        ChoiceField::new(choices, self.settings.languages.first().map(|l| l.code.clone()))
            .hidden()
    }

    pub fn tree_field(&self, conn: &Connection) -> Result<ChoiceField<i64>> {
        let choices = pages::list_article_trees(conn, self.settings.site_id)?
            .into_iter()
            .map(|p| (p.id, p.title))
            .collect();
        Ok(ChoiceField::new(
            choices,
            self.instance.and_then(|a| a.tree_id),
        ))
    }

    /// Field-level slug cleaning: normalize, then render the stored form.
    /// Stored slugs are already rendered and pass through unchanged.
    pub fn clean_slug(&self) -> Result<String, ValidationError> {
        let Some(candidate) = self.data.title.slug.as_deref() else {
            return self.initial_slug.clone().ok_or(ValidationError::EmptySlug);
        };
        let normalized = slug::normalize(candidate);
        if normalized.is_empty() {
            return Err(ValidationError::EmptySlug);
        }
        let stored = self.settings.slug_format.render(self.now, &normalized)?;
        let length = stored.chars().count();
        if length > SLUG_MAX_LENGTH {
            return Err(ValidationError::TooLong {
                max: SLUG_MAX_LENGTH,
                actual: length,
            });
        }
        Ok(stored)
    }

    pub fn is_valid(&mut self, db: &Database) -> Result<bool> {
        let conn = db.get()?;
        self.full_clean(&conn)?;
        Ok(self.errors.is_empty())
    }

    pub fn full_clean(&mut self, conn: &Connection) -> Result<()> {
        self.cleaned = CleanedData::default();
        self.errors = FormErrors::default();
        self.clean_fields(conn)?;
        self.clean(conn)?;
        self.validated = true;
        if !self.errors.is_empty() {
            tracing::debug!("Article form rejected: {}", self.errors);
        }
        Ok(())
    }

    fn clean_fields(&mut self, conn: &Connection) -> Result<()> {
        match self.data.language.as_deref().map(str::trim) {
            None | Some("") => self.errors.add("language", ValidationError::Required),
            Some(code) if self.settings.languages.contains(code) => {
                self.cleaned.language = Some(code.to_string())
            }
            Some(code) => self
                .errors
                .add("language", ValidationError::InvalidChoice(code.to_string())),
        }

        if let Some(tree) = self.data.tree {
            let field = self.tree_field(conn)?;
            if field.choices.iter().any(|(id, _)| *id == tree) {
                self.cleaned.tree = Some(tree);
            } else {
                self.errors
                    .add("tree", ValidationError::InvalidChoice(tree.to_string()));
            }
        }

        match self.data.template.as_deref() {
            None | Some("") => {
                self.cleaned.template = self.settings.default_template().map(String::from)
            }
            Some(t) if self.settings.has_template(t) => self.cleaned.template = Some(t.to_string()),
            Some(t) => self
                .errors
                .add("template", ValidationError::InvalidChoice(t.to_string())),
        }

        self.cleaned.login_required = self.data.login_required;

        let title = self.data.title.title.trim();
        if title.is_empty() {
            self.errors.add("title", ValidationError::Required);
        } else if title.chars().count() > TITLE_MAX_LENGTH {
            self.errors.add(
                "title",
                ValidationError::TooLong {
                    max: TITLE_MAX_LENGTH,
                    actual: title.chars().count(),
                },
            );
        } else {
            self.cleaned.title = Some(title.to_string());
        }

        match self.clean_slug() {
            Ok(stored) => self.cleaned.slug = Some(stored),
            Err(e) => self.errors.add("slug", e),
        }

        let input = &self.data.title;
        self.cleaned.description = clean_optional_text(&input.description);
        self.cleaned.page_title = clean_optional_text(&input.page_title);
        self.cleaned.menu_title = clean_optional_text(&input.menu_title);
        self.cleaned.meta_description = clean_optional_text(&input.meta_description);
        self.cleaned.image = clean_optional_text(&input.image);
        Ok(())
    }

    /// Form-level cleaning: the slug must be unique within the tree for the
    /// selected language.
    fn clean(&mut self, conn: &Connection) -> Result<()> {
        let Some(language) = self.cleaned.language.as_deref() else {
            return Ok(());
        };
        let (Some(tree), Some(slug)) = (self.cleaned.tree, self.cleaned.slug.as_deref()) else {
            return Ok(());
        };

        let article_id = self.instance.map(|a| a.id);
        if !articles::is_valid_article_slug(conn, article_id, tree, language, slug)? {
            self.errors.add("slug", ValidationError::DuplicateSlug);
            self.cleaned.slug = None;
        }
        Ok(())
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn cleaned_data(&self) -> &CleanedData {
        &self.cleaned
    }

    /// Validates if needed, then stores the article and its title.
    pub fn save(mut self, db: &Database) -> Result<i64> {
        if !self.validated {
            let conn = db.get()?;
            self.full_clean(&conn)?;
        }
        if !self.errors.is_empty() {
            return Err(self.errors.into());
        }

        let cleaned = self.cleaned;
        let data = CleanedArticle {
            language: required(cleaned.language, "language")?,
            tree_id: cleaned.tree,
            template: required(cleaned.template, "template")?,
            login_required: cleaned.login_required,
            creation_date: self.now,
            title: required(cleaned.title, "title")?,
            slug: required(cleaned.slug, "slug")?,
            description: cleaned.description,
            page_title: cleaned.page_title,
            menu_title: cleaned.menu_title,
            meta_description: cleaned.meta_description,
            image: cleaned.image,
        };
        articles::save_article(db, self.instance.map(|a| a.id), &data)
    }
}

fn required(value: Option<String>, field: &str) -> Result<String> {
    value.ok_or_else(|| {
        let mut errors = FormErrors::default();
        errors.add(field, ValidationError::Required);
        errors.into()
    })
}
