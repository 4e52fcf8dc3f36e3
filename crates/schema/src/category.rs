//! Category vocabulary and the per-category subcategory registry.
//!
//! The registry is static data: every lookup is a `match` over the enum, so
//! there is nothing to initialise and nothing to lock.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Top-level classification bucket for a file.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Legal,
    Financial,
    Medical,
    School,
    Code,
    Media,
    Archives,
    Spreadsheets,
    Images,
    Documents,
    Work,
    Personal,
    Other,
}

impl Category {
    /// All categories in declaration order.
    pub const ALL: [Category; 13] = [
        Category::Legal,
        Category::Financial,
        Category::Medical,
        Category::School,
        Category::Code,
        Category::Media,
        Category::Archives,
        Category::Spreadsheets,
        Category::Images,
        Category::Documents,
        Category::Work,
        Category::Personal,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Legal => "Legal",
            Category::Financial => "Financial",
            Category::Medical => "Medical",
            Category::School => "School",
            Category::Code => "Code",
            Category::Media => "Media",
            Category::Archives => "Archives",
            Category::Spreadsheets => "Spreadsheets",
            Category::Images => "Images",
            Category::Documents => "Documents",
            Category::Work => "Work",
            Category::Personal => "Personal",
            Category::Other => "Other",
        }
    }

    /// Subcategories permitted under this category. Entries are unique
    /// within a category but may repeat across categories.
    pub fn subcategories(&self) -> &'static [&'static str] {
        match self {
            Category::Legal => &["Contracts", "Court-Documents", "Policies", "Licenses", "NDAs"],
            Category::Financial => &[
                "Invoices",
                "Tax-Returns",
                "Receipts",
                "Bank-Statements",
                "Budgets",
                "Payroll",
            ],
            Category::Medical => &[
                "Lab-Results",
                "Prescriptions",
                "Insurance-Claims",
                "Medical-Records",
                "Imaging",
            ],
            Category::School => &[
                "Assignments",
                "Lecture-Notes",
                "Syllabi",
                "Transcripts",
                "Research-Papers",
            ],
            Category::Code => &[
                "Source-Code",
                "Scripts",
                "Config-Files",
                "Documentation",
                "Notebooks",
            ],
            Category::Media => &["Video", "Audio", "Podcasts", "Music"],
            Category::Archives => &["Backups", "Compressed", "Exports"],
            Category::Spreadsheets => &["Data-Exports", "Reports", "Trackers", "Logs"],
            Category::Images => &["Photos", "Screenshots", "Vector-Art", "Icons", "Scans"],
            Category::Documents => &[
                "Reports",
                "Letters",
                "Manuals",
                "Presentations",
                "Notes",
                "Ebooks",
            ],
            Category::Work => &["Meeting-Notes", "Project-Files", "Communications", "Proposals"],
            Category::Personal => &["Photos", "Journal", "Travel", "Recipes", "Hobbies"],
            Category::Other => &[],
        }
    }

    pub fn permits(&self, subcategory: &str) -> bool {
        self.subcategories().contains(&subcategory)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    /// Exact, case-sensitive match on the category name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// Registry lookup: the subcategories permitted for `category`.
/// Empty for [`Category::Other`].
pub fn permitted_subcategories(category: Category) -> &'static [&'static str] {
    category.subcategories()
}

/// Whether `name` is a subcategory of at least one category.
pub fn is_known_subcategory(name: &str) -> bool {
    Category::ALL.iter().any(|c| c.permits(name))
}

/// Every category under which `name` is a legal subcategory.
pub fn categories_with_subcategory(name: &str) -> Vec<Category> {
    Category::ALL
        .iter()
        .copied()
        .filter(|c| c.permits(name))
        .collect()
}

pub(crate) fn category_names() -> String {
    Category::ALL
        .iter()
        .map(Category::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
