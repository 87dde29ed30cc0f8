//! HTML parser for listing pages and the category menu
//!
//! This module handles parsing HTML content to extract:
//! - Item entries from a category listing page
//! - The "next page" pointer of a listing page
//! - The category menu of the home page

use crate::state::{ListingEntry, RATING_UNAVAILABLE};
use crate::url::LinkNormalizer;
use scraper::{ElementRef, Html, Selector};

/// Extracted information from one listing page
#[derive(Debug, Clone, Default)]
pub struct ListingPage {
    /// Well-formed entries, in page order
    pub entries: Vec<ListingEntry>,

    /// Number of entry elements present on the page, malformed ones included
    pub found: usize,

    /// Number of entries skipped because a mandatory field was missing
    pub malformed: usize,

    /// Raw href of the "next" pagination link, relative to the current page
    pub next_page: Option<String>,
}

impl ListingPage {
    /// Returns true if the page listed no entries at all
    pub fn is_empty(&self) -> bool {
        self.found == 0
    }
}

/// A category link read from the home page menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuLink {
    pub name: String,
    pub href: String,
}

/// Parses a category listing page
///
/// # Entry Extraction Rules
///
/// Each `article.product_pod` is one entry:
/// - title: `title` attribute of `h3 > a` (mandatory)
/// - link: `href` of the same anchor, normalized (mandatory)
/// - price: text of `p.price_color` (mandatory)
/// - rating: second class token of `p.star-rating`, `N/A` when absent
///
/// An entry missing a mandatory field is logged and skipped; the rest of the
/// page is still extracted.
///
/// # Example
///
/// ```
/// use shelf_sweep::crawler::parse_listing;
/// use shelf_sweep::url::LinkNormalizer;
///
/// let html = r#"<article class="product_pod">
///   <p class="star-rating Three"></p>
///   <h3><a href="../../../sharp_1/index.html" title="Sharp">Sharp</a></h3>
///   <p class="price_color">£10.00</p>
/// </article>"#;
/// let normalizer = LinkNormalizer::new("https://books.toscrape.com/catalogue/");
/// let page = parse_listing(html, &normalizer);
/// assert_eq!(page.entries[0].rating, "Three");
/// assert!(page.next_page.is_none());
/// ```
pub fn parse_listing(html: &str, normalizer: &LinkNormalizer) -> ListingPage {
    let document = Html::parse_document(html);
    let mut page = ListingPage {
        next_page: extract_next_page(&document),
        ..ListingPage::default()
    };

    let Ok(entry_selector) = Selector::parse("article.product_pod") else {
        return page;
    };

    for (index, element) in document.select(&entry_selector).enumerate() {
        page.found += 1;

        match extract_entry(element, normalizer) {
            Ok(entry) => {
                tracing::debug!(
                    "Collected item: {} | Price: {} | Rating: {}",
                    entry.title,
                    entry.price,
                    entry.rating
                );
                page.entries.push(entry);
            }
            Err(e) => {
                tracing::error!("Failed to extract item #{}: {}", index + 1, e);
                page.malformed += 1;
            }
        }
    }

    page
}

/// Extracts one entry from an `article.product_pod` element
fn extract_entry(element: ElementRef, normalizer: &LinkNormalizer) -> Result<ListingEntry, String> {
    let anchor = select_first(element, "h3 a").ok_or("missing title anchor")?;

    let title = anchor
        .value()
        .attr("title")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or("missing title attribute")?;

    let href = anchor
        .value()
        .attr("href")
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .ok_or_else(|| format!("missing link for '{}'", title))?;

    let price = select_first(element, "p.price_color")
        .map(element_text)
        .filter(|p| !p.is_empty())
        .ok_or_else(|| format!("missing price for '{}'", title))?;

    let rating = select_first(element, "p.star-rating")
        .and_then(|marker| {
            marker
                .value()
                .attr("class")
                .and_then(|classes| classes.split_whitespace().nth(1))
                .map(str::to_string)
        })
        .unwrap_or_else(|| RATING_UNAVAILABLE.to_string());

    Ok(ListingEntry {
        title: title.to_string(),
        price,
        link: normalizer.normalize(href),
        rating,
    })
}

/// Extracts the href of the `li.next` pagination link
fn extract_next_page(document: &Html) -> Option<String> {
    let selector = Selector::parse("li.next a[href]").ok()?;

    document
        .select(&selector)
        .next()
        .and_then(|element| element.value().attr("href"))
        .map(|href| href.trim().to_string())
        .filter(|href| !href.is_empty())
}

/// Parses the category menu of the home page
///
/// The first link of the menu points at the whole catalog rather than a
/// category and is discarded.
///
/// # Returns
///
/// * `Some(links)` - The menu was found (possibly with no categories)
/// * `None` - The page has no `div.side_categories` container
pub fn parse_category_menu(html: &str) -> Option<Vec<MenuLink>> {
    let document = Html::parse_document(html);
    let container_selector = Selector::parse("div.side_categories").ok()?;
    let link_selector = Selector::parse("a").ok()?;

    let container = document.select(&container_selector).next()?;

    let links = container
        .select(&link_selector)
        .skip(1)
        .filter_map(|element| {
            let name = element_text(element);
            match element.value().attr("href").map(str::trim) {
                Some(href) if !href.is_empty() && !name.is_empty() => Some(MenuLink {
                    name,
                    href: href.to_string(),
                }),
                _ => {
                    tracing::warn!("Skipping menu entry without name or link: '{}'", name);
                    None
                }
            }
        })
        .collect();

    Some(links)
}

fn select_first<'a>(element: ElementRef<'a>, selector: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(selector).ok()?;
    element.select(&selector).next()
}

/// Element text with runs of whitespace collapsed
fn element_text(element: ElementRef) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
