/// Record types produced by the crawl
///
/// Categories are discovered once per run; item records are appended to the
/// run aggregate as each category finishes.
use serde::Serialize;

/// Rating recorded when a listing entry carries no rating marker
pub const RATING_UNAVAILABLE: &str = "N/A";

/// A category discovered on the home page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRef {
    /// Display name, trimmed
    pub name: String,

    /// Absolute URL of the category's first listing page
    pub url: String,
}

impl CategoryRef {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// One entry of a listing page, before it is tagged with its category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub title: String,
    /// Currency text exactly as displayed (e.g. `£51.77`)
    pub price: String,
    /// Absolute detail-page URL
    pub link: String,
    /// Rating token (e.g. `Three`) or [`RATING_UNAVAILABLE`]
    pub rating: String,
}

impl ListingEntry {
    /// Tags this entry with the category it was listed under
    pub fn into_record(self, category: &str) -> ItemRecord {
        ItemRecord {
            category: category.to_string(),
            title: self.title,
            price: self.price,
            link: self.link,
            rating: self.rating,
        }
    }
}

/// One extracted catalog item, as written to the dataset
///
/// Field renames give the dataset header row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemRecord {
    #[serde(rename = "Categoria")]
    pub category: String,

    #[serde(rename = "Título")]
    pub title: String,

    #[serde(rename = "Preço")]
    pub price: String,

    #[serde(rename = "Link")]
    pub link: String,

    #[serde(rename = "Avaliação")]
    pub rating: String,
}
