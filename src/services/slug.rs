use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};
use slug::slugify;
use std::fmt::Write;

/// Rendering used when `{now}` carries no format spec.
const DEFAULT_NOW_FORMAT: &str = "%Y-%m-%d %H:%M:%S%:z";

/// Turns free-form input into a URL-safe slug: lowercase ASCII, runs of
/// anything else collapsed into a single `-`, no leading or trailing `-`.
pub fn normalize(input: &str) -> String {
    slugify(input)
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    #[error("unterminated '{{' at position {0}")]
    Unterminated(usize),
    #[error("single '}}' at position {0} must be written as '}}}}'")]
    StrayClosingBrace(usize),
    #[error("unknown field '{0}', expected 'slug' or 'now'")]
    UnknownField(String),
    #[error("field 'slug' does not take a format spec")]
    SlugSpec,
    #[error("invalid date format '{0}'")]
    InvalidDateFormat(String),
    #[error("template does not reference '{{slug}}'")]
    MissingSlug,
    #[error("failed to render slug template")]
    Render,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Slug,
    Now(Option<String>),
}

/// A parsed stored-slug template such as `{now:%Y-%m}-{slug}`.
///
/// Parsing happens once at configuration time, so rendering only fails if
/// the formatter itself reports an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlugFormat {
    source: String,
    segments: Vec<Segment>,
}

impl SlugFormat {
    pub fn parse(template: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = template.char_indices().peekable();

        while let Some((pos, c)) = chars.next() {
            match c {
                '{' if matches!(chars.peek(), Some((_, '{'))) => {
                    chars.next();
                    literal.push('{');
                }
                '}' if matches!(chars.peek(), Some((_, '}'))) => {
                    chars.next();
                    literal.push('}');
                }
                '}' => return Err(TemplateError::StrayClosingBrace(pos)),
                '{' => {
                    let mut field = String::new();
                    let mut closed = false;
                    for (_, fc) in chars.by_ref() {
                        if fc == '}' {
                            closed = true;
                            break;
                        }
                        field.push(fc);
                    }
                    if !closed {
                        return Err(TemplateError::Unterminated(pos));
                    }
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(parse_field(&field)?);
                }
                _ => literal.push(c),
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        if !segments.contains(&Segment::Slug) {
            return Err(TemplateError::MissingSlug);
        }

        Ok(Self {
            source: template.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn render(&self, now: DateTime<Utc>, slug: &str) -> Result<String, TemplateError> {
        let mut out = String::with_capacity(self.source.len() + slug.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Slug => out.push_str(slug),
                Segment::Now(spec) => {
                    let spec = spec.as_deref().unwrap_or(DEFAULT_NOW_FORMAT);
                    write!(out, "{}", now.format(spec)).map_err(|_| TemplateError::Render)?;
                }
            }
        }
        Ok(out)
    }
}

impl std::fmt::Display for SlugFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.source)
    }
}

fn parse_field(field: &str) -> Result<Segment, TemplateError> {
    let (name, spec) = match field.split_once(':') {
        Some((name, spec)) => (name, Some(spec)),
        None => (field, None),
    };

    match name.trim() {
        "slug" => match spec {
            Some(s) if !s.is_empty() => Err(TemplateError::SlugSpec),
            _ => Ok(Segment::Slug),
        },
        "now" => match spec {
            Some(s) if !s.is_empty() => {
                if StrftimeItems::new(s).any(|item| matches!(item, Item::Error)) {
                    return Err(TemplateError::InvalidDateFormat(s.to_string()));
                }
                Ok(Segment::Now(Some(s.to_string())))
            }
            _ => Ok(Segment::Now(None)),
        },
        other => Err(TemplateError::UnknownField(other.to_string())),
    }
}
