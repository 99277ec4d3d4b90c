//! Catalog filtering

use std::collections::BTreeSet;
use std::fmt;

use super::record::DocumentRecord;

/// Category constraint applied to the catalog for display
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum CategoryFilter {
    /// Synthetic member matching every category
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    pub const ALL: &'static str = "all";

    /// Parse a filter control value; `"all"` maps to [`CategoryFilter::All`]
    pub fn parse(value: &str) -> Self {
        if value == Self::ALL {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(value.to_string())
        }
    }

    pub fn matches(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => wanted == category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str(Self::ALL),
            CategoryFilter::Only(category) => f.write_str(category),
        }
    }
}

/// Records matching the search text and category, in catalog order
///
/// Search text matches case-insensitively against the display name or the
/// author. An empty search text matches everything.
pub fn filter(
    catalog: &[DocumentRecord],
    search_text: &str,
    category: &CategoryFilter,
) -> Vec<DocumentRecord> {
    let needle = search_text.to_lowercase();
    catalog
        .iter()
        .filter(|record| {
            let text_match = needle.is_empty()
                || record.name.to_lowercase().contains(&needle)
                || record.author.to_lowercase().contains(&needle);
            text_match && category.matches(&record.category)
        })
        .cloned()
        .collect()
}

/// Filter choices for the catalog: `All` first, then each category once, sorted
pub fn distinct_categories(catalog: &[DocumentRecord]) -> Vec<CategoryFilter> {
    let categories: BTreeSet<&str> = catalog.iter().map(|r| r.category.as_str()).collect();

    std::iter::once(CategoryFilter::All)
        .chain(
            categories
                .into_iter()
                .filter(|c| *c != CategoryFilter::ALL)
                .map(|c| CategoryFilter::Only(c.to_string())),
        )
        .collect()
}
