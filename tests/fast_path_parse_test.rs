use page_scout::engine::fast_path::parse_document;
use url::Url;

// * Test Suite for the fast path's static parse stage

fn base() -> Url {
    Url::parse("https://shop.example.com/products/widget").unwrap()
}

const PRODUCT_PAGE: &str = r#"<html>
<head>
    <title>Widget | Shop</title>
    <meta property="og:title" content="Ultra Widget">
    <meta property="og:description" content="The widget that widgets.">
    <meta property="og:image" content="/img/widget-hero.jpg">
</head>
<body>
    <header>Shop chrome</header>
    <nav>Home / Widgets</nav>
    <main>
        <h1>Ultra Widget</h1>
        <p>The Ultra Widget improves widgeting by a considerable margin over prior widgets.</p>
        <img src="/img/widget-front.jpg" alt="Widget front" width="800" height="600">
        <img src="logo.png" alt="logo" width="800" height="600">
        <img src="/icons/star.png" width="512" height="512">
        <img data-src="/img/widget-side.jpg" alt="Widget side">
    </main>
    <footer>Imprint</footer>
</body>
</html>"#;

#[test]
fn test_extracts_og_fields_first() {
    let extraction = parse_document(PRODUCT_PAGE, &base());
    let page = &extraction.page;

    assert_eq!(page.title, "Ultra Widget");
    assert_eq!(page.description, "The widget that widgets.");
    assert_eq!(
        page.og_image.as_deref(),
        Some("https://shop.example.com/img/widget-hero.jpg")
    );
    assert_eq!(page.tier, 1);
    assert!(!page.js_rendered);
    assert!(!extraction.needs_escalation);
}

#[test]
fn test_images_resolved_and_filtered() {
    let extraction = parse_document(PRODUCT_PAGE, &base());
    let urls: Vec<&str> = extraction
        .page
        .images
        .iter()
        .map(|i| i.url.as_str())
        .collect();

    // * logo alt and /icons/ path are rejected; data-src is honored
    assert_eq!(
        urls,
        vec![
            "https://shop.example.com/img/widget-front.jpg",
            "https://shop.example.com/img/widget-side.jpg",
        ]
    );

    let front = &extraction.page.images[0];
    assert_eq!(front.width, Some(800));
    assert_eq!(front.height, Some(600));

    let side = &extraction.page.images[1];
    assert_eq!(side.width, None);
    assert_eq!(side.height, None);
}

#[test]
fn test_body_text_skips_chrome() {
    let extraction = parse_document(PRODUCT_PAGE, &base());
    let body = &extraction.page.body_text;

    assert!(body.contains("improves widgeting"));
    assert!(!body.contains("Shop chrome"));
    assert!(!body.contains("Imprint"));
}

#[test]
fn test_title_falls_back_to_document_title() {
    let html = r#"<html><head><title>Plain Title</title></head>
        <body><p>Body text that is clearly long enough to matter here.</p></body></html>"#;
    let extraction = parse_document(html, &base());
    assert_eq!(extraction.page.title, "Plain Title");
}

#[test]
fn test_description_meta_then_paragraph_fallback() {
    let with_meta = r#"<html><head><title>T</title>
        <meta name="description" content="From the meta tag."></head>
        <body><p>A paragraph that is much longer than forty characters, easily.</p></body></html>"#;
    assert_eq!(
        parse_document(with_meta, &base()).page.description,
        "From the meta tag."
    );

    let without_meta = r#"<html><head><title>T</title></head>
        <body><p>Too short.</p>
        <p>A paragraph that is much longer than forty characters, easily.</p></body></html>"#;
    assert_eq!(
        parse_document(without_meta, &base()).page.description,
        "A paragraph that is much longer than forty characters, easily."
    );
}

#[test]
fn test_client_shell_flags_escalation() {
    let shell = r#"<html><head><title></title></head>
        <body><div id="root"></div><script src="/static/js/main.8f2c.js"></script></body></html>"#;
    let extraction = parse_document(shell, &base());

    assert!(extraction.needs_escalation);
    assert_eq!(extraction.page.title, "");
    assert_eq!(extraction.page.body_text, "");
}

#[test]
fn test_server_rendered_page_not_flagged() {
    let extraction = parse_document(PRODUCT_PAGE, &base());
    assert!(!extraction.needs_escalation);
}

#[test]
fn test_parse_is_deterministic() {
    let a = parse_document(PRODUCT_PAGE, &base());
    let b = parse_document(PRODUCT_PAGE, &base());
    assert_eq!(a.page, b.page);
    assert_eq!(a.needs_escalation, b.needs_escalation);
}

#[test]
fn test_empty_document_yields_empty_record() {
    let extraction = parse_document("", &base());
    let page = &extraction.page;

    assert_eq!(page.title, "");
    assert_eq!(page.description, "");
    assert!(page.og_image.is_none());
    assert!(page.images.is_empty());
    assert_eq!(page.body_text, "");
    assert_eq!(page.url, "https://shop.example.com/products/widget");
}
