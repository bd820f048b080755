use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub code: String,
    pub label: String,
}

impl Language {
    pub fn new(code: &str, label: &str) -> Self {
        Self {
            code: code.to_string(),
            label: label.to_string(),
        }
    }
}

/// Ordered list of the languages content may be written in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Languages(Vec<Language>);

impl Languages {
    pub fn new(languages: Vec<Language>) -> Self {
        Self(languages)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.0.iter().any(|l| l.code == code)
    }

    pub fn first(&self) -> Option<&Language> {
        self.0.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Language> {
        self.0.iter()
    }
}
