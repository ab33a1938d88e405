// * Product Photo Filter
// * Pure predicate/ranking functions over candidate images. No I/O, never panics;
// * absence is represented by false/None.

use serde::{Deserialize, Serialize};
use url::Url;

// * Path segments that mark non-product imagery. Matched as whole segments only,
// * so /products/adapter.jpg is NOT caught by "ad".
const EXCLUDED_PATH_SEGMENTS: &[&str] = &["icons", "logo", "sprites", "avatars", "ad", "ads"];

// * Fragments that name tracking pixels and placeholders inside filenames
// * (1x1.gif, placeholder.png). Matched anywhere in the path.
const EXCLUDED_PATH_FRAGMENTS: &[&str] = &["1x1", "placeholder"];

// * Alt-text prefixes that mark page chrome rather than product imagery.
const EXCLUDED_ALT_PREFIXES: &[&str] = &["logo", "icon", "avatar", "spacer", "tracking"];

/// A candidate image found on a page. `url` is always absolute; unresolvable
/// candidates are dropped before this type is constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapedImage {
    pub url: String,
    pub alt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

/// Size and aspect-ratio thresholds for product-photo candidacy.
/// `ratio` is width divided by height.
#[derive(Debug, Clone)]
pub struct PhotoFilterCriteria {
    pub min_width: u32,
    pub min_height: u32,
    pub min_area: u64,
    pub min_ratio: f64,
    pub max_ratio: f64,
}

impl Default for PhotoFilterCriteria {
    fn default() -> Self {
        Self {
            min_width: 200,
            min_height: 150,
            min_area: 40_000,
            min_ratio: 0.4,
            max_ratio: 3.0,
        }
    }
}

// * True when the URL is empty, unparseable, or its path points at known
// * non-product imagery (icon/logo/sprite/avatar segments, tracking pixels,
// * placeholders, or any .svg).
pub fn is_excluded_by_url(url: &str) -> bool {
    if url.trim().is_empty() {
        return true;
    }

    let parsed = match Url::parse(url) {
        Ok(u) => u,
        Err(_) => return true,
    };

    let path = parsed.path().to_lowercase();

    if path.ends_with(".svg") {
        return true;
    }

    if EXCLUDED_PATH_FRAGMENTS.iter().any(|frag| path.contains(frag)) {
        return true;
    }

    path.split('/')
        .any(|segment| EXCLUDED_PATH_SEGMENTS.contains(&segment))
}

// * True when the trimmed alt text equals or starts with a chrome token.
// * Empty alt is never excluded: absence of evidence is not evidence of exclusion.
pub fn is_excluded_by_alt(alt: &str) -> bool {
    let trimmed = alt.trim().to_lowercase();
    if trimmed.is_empty() {
        return false;
    }

    EXCLUDED_ALT_PREFIXES
        .iter()
        .any(|prefix| trimmed.starts_with(prefix))
}

// * True automatically when either dimension is unknown (cannot measure, so
// * cannot reject on size). Otherwise every threshold must hold.
pub fn meets_minimum_size(image: &ScrapedImage, criteria: &PhotoFilterCriteria) -> bool {
    let (width, height) = match (image.width, image.height) {
        (Some(w), Some(h)) => (w, h),
        _ => return true,
    };

    if width < criteria.min_width || height < criteria.min_height {
        return false;
    }

    if u64::from(width) * u64::from(height) < criteria.min_area {
        return false;
    }

    let ratio = f64::from(width) / f64::from(height);
    ratio >= criteria.min_ratio && ratio <= criteria.max_ratio
}

// * A plausible product photo survives all three gates.
pub fn is_product_photo(image: &ScrapedImage, criteria: &PhotoFilterCriteria) -> bool {
    !is_excluded_by_url(&image.url)
        && !is_excluded_by_alt(&image.alt)
        && meets_minimum_size(image, criteria)
}

// * Filters candidates in original order and truncates to max_results.
pub fn filter_product_photos(
    images: &[ScrapedImage],
    criteria: &PhotoFilterCriteria,
    max_results: usize,
) -> Vec<ScrapedImage> {
    images
        .iter()
        .filter(|image| is_product_photo(image, criteria))
        .take(max_results)
        .cloned()
        .collect()
}

// * Picks the single best survivor: largest known area wins, first-encountered
// * wins ties; when no survivor has known dimensions, the first survivor.
pub fn select_best_photo<'a>(
    images: &'a [ScrapedImage],
    criteria: &PhotoFilterCriteria,
) -> Option<&'a ScrapedImage> {
    let survivors: Vec<&ScrapedImage> = images
        .iter()
        .filter(|image| is_product_photo(image, criteria))
        .collect();

    let mut best: Option<(&ScrapedImage, u64)> = None;
    for &image in &survivors {
        if let (Some(w), Some(h)) = (image.width, image.height) {
            let area = u64::from(w) * u64::from(h);
            match best {
                // * Strict comparison keeps the earlier image on equal area.
                Some((_, best_area)) if area <= best_area => {}
                _ => best = Some((image, area)),
            }
        }
    }

    best.map(|(image, _)| image)
        .or_else(|| survivors.first().copied())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(url: &str, alt: &str, width: Option<u32>, height: Option<u32>) -> ScrapedImage {
        ScrapedImage {
            url: url.to_string(),
            alt: alt.to_string(),
            width,
            height,
        }
    }

    #[test]
    fn test_url_exclusion_segments() {
        assert!(is_excluded_by_url("https://cdn.shop.com/icons/cart.png"));
        assert!(is_excluded_by_url("https://cdn.shop.com/logo/brand.png"));
        assert!(is_excluded_by_url("https://cdn.shop.com/sprites/all.png"));
        assert!(is_excluded_by_url("https://cdn.shop.com/avatars/u42.jpg"));
        assert!(is_excluded_by_url("https://cdn.shop.com/ads/banner.jpg"));
        assert!(!is_excluded_by_url("https://cdn.shop.com/products/widget.jpg"));
    }

    #[test]
    fn test_url_exclusion_is_whole_segment() {
        // * "ad" must not match as a substring
        assert!(!is_excluded_by_url("https://cdn.shop.com/products/adapter.jpg"));
        assert!(!is_excluded_by_url("https://cdn.shop.com/adventure/kit.jpg"));
    }

    #[test]
    fn test_url_exclusion_tracking_pixels() {
        assert!(is_excluded_by_url("https://t.shop.com/pixel/1x1.gif"));
        assert!(is_excluded_by_url("https://cdn.shop.com/img/placeholder.png"));
    }

    #[test]
    fn test_url_exclusion_svg() {
        assert!(is_excluded_by_url("https://cdn.shop.com/art/hero.svg"));
        assert!(is_excluded_by_url("https://cdn.shop.com/art/hero.svg?v=3"));
        assert!(!is_excluded_by_url("https://cdn.shop.com/art/hero.jpg?v=3"));
    }

    #[test]
    fn test_url_exclusion_malformed() {
        assert!(is_excluded_by_url(""));
        assert!(is_excluded_by_url("   "));
        assert!(is_excluded_by_url("/relative/only.jpg"));
        assert!(is_excluded_by_url("not a url"));
    }

    #[test]
    fn test_alt_exclusion() {
        assert!(is_excluded_by_alt("logo"));
        assert!(is_excluded_by_alt("  Logo of ACME  "));
        assert!(is_excluded_by_alt("Icon: cart"));
        assert!(is_excluded_by_alt("tracking pixel"));
        assert!(!is_excluded_by_alt(""));
        assert!(!is_excluded_by_alt("Red widget on a table"));
    }

    #[test]
    fn test_minimum_size_unknown_dimensions_pass() {
        let criteria = PhotoFilterCriteria::default();
        assert!(meets_minimum_size(
            &image("https://s.com/a.jpg", "", None, None),
            &criteria
        ));
        assert!(meets_minimum_size(
            &image("https://s.com/a.jpg", "", Some(10), None),
            &criteria
        ));
    }

    #[test]
    fn test_minimum_size_thresholds() {
        let criteria = PhotoFilterCriteria::default();
        let ok = image("https://s.com/a.jpg", "", Some(400), Some(300));
        assert!(meets_minimum_size(&ok, &criteria));

        // * Each axis failing alone rejects
        assert!(!meets_minimum_size(
            &image("https://s.com/a.jpg", "", Some(199), Some(300)),
            &criteria
        ));
        assert!(!meets_minimum_size(
            &image("https://s.com/a.jpg", "", Some(400), Some(149)),
            &criteria
        ));
        // * 210x160 passes width/height but 33600 < 40000 area
        assert!(!meets_minimum_size(
            &image("https://s.com/a.jpg", "", Some(210), Some(160)),
            &criteria
        ));
        // * 900x200 = 4.5 ratio, too wide
        assert!(!meets_minimum_size(
            &image("https://s.com/a.jpg", "", Some(900), Some(200)),
            &criteria
        ));
        // * 200x600 = 0.33 ratio, too tall
        assert!(!meets_minimum_size(
            &image("https://s.com/a.jpg", "", Some(200), Some(600)),
            &criteria
        ));
    }

    #[test]
    fn test_filter_caps_and_preserves_order() {
        let criteria = PhotoFilterCriteria::default();
        let images: Vec<ScrapedImage> = (0..8)
            .map(|i| {
                image(
                    &format!("https://s.com/products/{}.jpg", i),
                    "",
                    Some(400),
                    Some(300),
                )
            })
            .collect();

        let kept = filter_product_photos(&images, &criteria, 5);
        assert_eq!(kept.len(), 5);
        assert_eq!(kept[0].url, "https://s.com/products/0.jpg");
        assert_eq!(kept[4].url, "https://s.com/products/4.jpg");
    }

    #[test]
    fn test_filter_all_excluded() {
        let criteria = PhotoFilterCriteria::default();
        let images = vec![
            image("https://s.com/icons/a.png", "", Some(400), Some(300)),
            image("https://s.com/b.jpg", "logo", Some(400), Some(300)),
            image("https://s.com/c.jpg", "", Some(50), Some(50)),
        ];
        assert!(filter_product_photos(&images, &criteria, 5).is_empty());
    }

    #[test]
    fn test_select_best_by_area() {
        let criteria = PhotoFilterCriteria::default();
        let images = vec![
            image("https://s.com/small.jpg", "", Some(400), Some(300)),
            image("https://s.com/big.jpg", "", Some(1200), Some(900)),
            image("https://s.com/mid.jpg", "", Some(600), Some(500)),
        ];
        let best = select_best_photo(&images, &criteria).unwrap();
        assert_eq!(best.url, "https://s.com/big.jpg");
    }

    #[test]
    fn test_select_best_prefers_known_dimensions() {
        let criteria = PhotoFilterCriteria::default();
        let images = vec![
            image("https://s.com/unknown.jpg", "", None, None),
            image("https://s.com/known.jpg", "", Some(400), Some(300)),
        ];
        let best = select_best_photo(&images, &criteria).unwrap();
        assert_eq!(best.url, "https://s.com/known.jpg");
    }

    #[test]
    fn test_select_best_all_unknown_returns_first() {
        let criteria = PhotoFilterCriteria::default();
        let images = vec![
            image("https://s.com/first.jpg", "", None, None),
            image("https://s.com/second.jpg", "", None, None),
        ];
        let best = select_best_photo(&images, &criteria).unwrap();
        assert_eq!(best.url, "https://s.com/first.jpg");
    }

    #[test]
    fn test_select_best_tie_keeps_first() {
        let criteria = PhotoFilterCriteria::default();
        let images = vec![
            image("https://s.com/first.jpg", "", Some(600), Some(400)),
            image("https://s.com/second.jpg", "", Some(400), Some(600)),
        ];
        let best = select_best_photo(&images, &criteria).unwrap();
        assert_eq!(best.url, "https://s.com/first.jpg");
    }

    #[test]
    fn test_select_best_no_survivors() {
        let criteria = PhotoFilterCriteria::default();
        let images = vec![image("https://s.com/icons/a.png", "", Some(600), Some(400))];
        assert!(select_best_photo(&images, &criteria).is_none());
    }
}
