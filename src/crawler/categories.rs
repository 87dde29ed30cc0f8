//! Category enumeration from the home page menu

use crate::crawler::fetcher::{FetchResult, PageFetcher};
use crate::crawler::parser::parse_category_menu;
use crate::state::CategoryRef;
use crate::url::resolve_sibling;

/// Fetches the home page once and lists its categories
///
/// Category URLs are the menu hrefs resolved against the directory of
/// `home_url`. There is no retry: an unreachable home page, or one without
/// the category menu, is logged as an error and yields an empty list.
pub async fn enumerate_categories<F>(fetcher: &F, home_url: &str) -> Vec<CategoryRef>
where
    F: PageFetcher + ?Sized,
{
    let body = match fetcher.fetch(home_url).await {
        FetchResult::Success { body, .. } => body,
        FetchResult::NotFound => {
            tracing::error!("Home page not found: {}", home_url);
            return Vec::new();
        }
        FetchResult::Failed { error, .. } => {
            tracing::error!("Failed to fetch home page {}: {}", home_url, error);
            return Vec::new();
        }
    };

    let Some(links) = parse_category_menu(&body) else {
        tracing::error!("Category menu not found on {}", home_url);
        return Vec::new();
    };

    let categories: Vec<CategoryRef> = links
        .into_iter()
        .filter_map(|link| match resolve_sibling(home_url, &link.href) {
            Ok(url) => Some(CategoryRef::new(link.name, url.to_string())),
            Err(e) => {
                tracing::warn!("Skipping category '{}' with invalid link '{}': {}", link.name, link.href, e);
                None
            }
        })
        .collect();

    tracing::info!("{} categories found", categories.len());
    categories
}
