//! Board view options and list query parameters

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::CategoryId;

/// Which half of the notes the board shows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Active,
    Archived,
}

impl ViewMode {
    #[must_use]
    pub const fn is_archived(self) -> bool {
        matches!(self, Self::Archived)
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Active => "active",
            Self::Archived => "archived",
        })
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "archived" => Ok(Self::Archived),
            other => Err(format!("unknown view '{other}' (expected active or archived)")),
        }
    }
}

/// Server-side sort order, sent verbatim as `sortBy`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOption {
    #[default]
    Newest,
    Oldest,
    Title,
    Updated,
}

impl SortOption {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::Title => "title",
            Self::Updated => "updated",
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "newest" => Ok(Self::Newest),
            "oldest" => Ok(Self::Oldest),
            "title" => Ok(Self::Title),
            "updated" => Ok(Self::Updated),
            other => Err(format!(
                "unknown sort '{other}' (expected newest, oldest, title or updated)"
            )),
        }
    }
}

/// Parameters for `GET /notes`; unset fields are left out of the request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub sort_by: Option<SortOption>,
    pub archived: Option<bool>,
    pub categories: Vec<String>,
    pub search: Option<String>,
}

impl NoteQuery {
    /// Single-row query used to read `totalElements` for counting.
    #[must_use]
    pub fn count(archived: bool, category: Option<&str>) -> Self {
        Self {
            page: Some(0),
            size: Some(1),
            archived: Some(archived),
            categories: category.map(|name| vec![name.to_string()]).unwrap_or_default(),
            ..Self::default()
        }
    }

    /// Query string pairs in the order the service documents them.
    #[must_use]
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(size) = self.size {
            pairs.push(("size", size.to_string()));
        }
        if let Some(sort_by) = self.sort_by {
            pairs.push(("sortBy", sort_by.as_str().to_string()));
        }
        if let Some(archived) = self.archived {
            pairs.push(("archived", archived.to_string()));
        }
        if !self.categories.is_empty() {
            pairs.push(("categories", self.categories.join(",")));
        }
        if let Some(search) = self.search.as_deref().filter(|search| !search.is_empty()) {
            pairs.push(("search", search.to_string()));
        }
        pairs
    }
}

/// Aggregate counts shown next to the views and categories
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteCounts {
    pub active: u64,
    pub archived: u64,
    /// Active notes per local category, keyed by category id
    pub by_category: HashMap<CategoryId, u64>,
}

impl NoteCounts {
    #[must_use]
    pub fn for_category(&self, id: &CategoryId) -> u64 {
        self.by_category.get(id).copied().unwrap_or(0)
    }
}
