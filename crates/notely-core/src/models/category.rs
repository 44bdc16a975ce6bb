//! Local categories
//!
//! Categories only live on the client. Notes reference them by name, so a
//! category can disappear while notes still carry its name.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier of a local category
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(String);

impl CategoryId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CategoryId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// The fixed palette a category can use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryColor {
    Personal,
    Work,
    Ideas,
    Tasks,
}

impl CategoryColor {
    pub const ALL: [Self; 4] = [Self::Personal, Self::Work, Self::Ideas, Self::Tasks];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Personal => "personal",
            Self::Work => "work",
            Self::Ideas => "ideas",
            Self::Tasks => "tasks",
        }
    }
}

impl fmt::Display for CategoryColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|color| color.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                format!("unknown category color '{wanted}' (expected personal, work, ideas or tasks)")
            })
    }
}

/// A local tag used to group notes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub color: CategoryColor,
}

impl Category {
    #[must_use]
    pub fn new(id: impl Into<CategoryId>, name: impl Into<String>, color: CategoryColor) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color,
        }
    }

    /// Whether `name` refers to this category, ignoring case
    #[must_use]
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

impl From<String> for CategoryId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Categories every board starts with.
#[must_use]
pub fn default_categories() -> Vec<Category> {
    vec![
        Category::new("1", "Personal", CategoryColor::Personal),
        Category::new("2", "Work", CategoryColor::Work),
        Category::new("3", "Ideas", CategoryColor::Ideas),
        Category::new("4", "Tasks", CategoryColor::Tasks),
    ]
}

/// Find the category a note's reference points at.
#[must_use]
pub fn find_by_name<'a>(categories: &'a [Category], name: &str) -> Option<&'a Category> {
    categories.iter().find(|category| category.matches_name(name))
}

/// Display color for a note's category reference, `None` when it dangles.
#[must_use]
pub fn color_for_name(categories: &[Category], name: &str) -> Option<CategoryColor> {
    find_by_name(categories, name).map(|category| category.color)
}
