use page_scout::refinery::photo_filter::{select_best_photo, PhotoFilterCriteria};
use page_scout::{scrape, ScraperOptions};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter("page_scout=debug,info")
        .with_target(false)
        .json()
        .init();

    let Some(url) = std::env::args().nth(1) else {
        eprintln!("usage: page-scout <url>");
        std::process::exit(2);
    };

    match scrape(&url, ScraperOptions::default()).await {
        Ok(page) => {
            if let Some(best) = select_best_photo(&page.images, &PhotoFilterCriteria::default()) {
                tracing::info!(url = %best.url, "best product photo");
            }
            println!("{}", page.to_json_pretty());
        }
        Err(e) => {
            tracing::error!(error = %e, "scrape failed");
            std::process::exit(1);
        }
    }
}
