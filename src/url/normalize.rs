use url::Url;

/// Prefix used by item links on category listing pages
const CATEGORY_PREFIX: &str = "../../../";

/// Prefix used by item links on catalogue-level pages
const PARENT_PREFIX: &str = "../";

/// Resolves relative item links into absolute catalogue URLs
///
/// # Normalization Rules
///
/// Applied in order, first match wins:
///
/// 1. `../../../x` → catalogue base + `x`
/// 2. `../x` → catalogue base + `x`
/// 3. anything not starting with `http` → catalogue base + link
/// 4. absolute links are returned unchanged
///
/// The three-level prefix is tested before the one-level prefix; stripping
/// only `../` from a category-page link would leave `../../` behind.
#[derive(Debug, Clone)]
pub struct LinkNormalizer {
    catalogue_base: String,
}

impl LinkNormalizer {
    /// Creates a normalizer for the given catalogue base
    ///
    /// A trailing slash is added when missing.
    pub fn new(catalogue_base: &str) -> Self {
        let mut catalogue_base = catalogue_base.to_string();
        if !catalogue_base.ends_with('/') {
            catalogue_base.push('/');
        }
        Self { catalogue_base }
    }

    /// The base every relative link is resolved against
    pub fn catalogue_base(&self) -> &str {
        &self.catalogue_base
    }

    /// Normalizes a raw link found in listing markup
    ///
    /// # Examples
    ///
    /// ```
    /// use shelf_sweep::url::LinkNormalizer;
    ///
    /// let normalizer = LinkNormalizer::new("https://books.toscrape.com/catalogue/");
    /// assert_eq!(
    ///     normalizer.normalize("../../../tipping-the-velvet_999/index.html"),
    ///     "https://books.toscrape.com/catalogue/tipping-the-velvet_999/index.html"
    /// );
    /// ```
    pub fn normalize(&self, raw_link: &str) -> String {
        let raw_link = raw_link.trim();

        if let Some(rest) = raw_link.strip_prefix(CATEGORY_PREFIX) {
            format!("{}{}", self.catalogue_base, rest)
        } else if let Some(rest) = raw_link.strip_prefix(PARENT_PREFIX) {
            format!("{}{}", self.catalogue_base, rest)
        } else if !raw_link.starts_with("http") {
            format!("{}{}", self.catalogue_base, raw_link)
        } else {
            raw_link.to_string()
        }
    }
}

/// Resolves `href` against the directory of `base`
///
/// Everything in `base` after the last `/` is dropped before `href` is
/// appended, so `https://host/a/index.html` + `page-2.html` gives
/// `https://host/a/page-2.html`. Used both for category links found on the home
/// page and for "next page" links found on listing pages.
///
/// # Returns
///
/// * `Ok(Url)` - The resolved absolute URL
/// * `Err(url::ParseError)` - The concatenation is not a valid URL
pub fn resolve_sibling(base: &str, href: &str) -> Result<Url, url::ParseError> {
    let directory = match base.rfind('/') {
        Some(index) => &base[..=index],
        None => base,
    };
    Url::parse(&format!("{}{}", directory, href.trim()))
}
