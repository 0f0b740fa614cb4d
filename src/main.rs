mod classify;
mod crawler;
mod extract;
mod fetch;
mod store;

use std::time::Instant;

use clap::{Parser, Subcommand};
use tracing::warn;

use crate::extract::ExtractedRecord;

/// Most-read Wikipedia articles, crawled by the `most-read` subcommand.
const MOST_READ_ARTICLES: &[&str] = &[
    "https://en.wikipedia.org/wiki/Spider-Man:_Homecoming",
    "https://en.wikipedia.org/wiki/Independence_Day_(United_States)",
    "https://en.wikipedia.org/wiki/Omar_Khadr",
    "https://en.wikipedia.org/wiki/G20",
    "https://en.wikipedia.org/wiki/Deaths_in_2017",
    "https://en.wikipedia.org/wiki/Wonder_Woman_(2017_film)",
    "https://en.wikipedia.org/wiki/Hustler",
    "https://en.wikipedia.org/wiki/Transformers:_The_Last_Knight",
    "https://en.wikipedia.org/wiki/Goods_and_Services_Tax_(India)",
    "https://en.wikipedia.org/wiki/Israel",
];

#[derive(Parser)]
#[command(
    name = "page_clipper",
    about = "Clip headline, lead paragraph and image from web pages"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Crawl a single URL and persist the clipped record
    Crawl {
        url: String,
        /// CSS class of the content container (required for non-Wikipedia pages)
        #[arg(long)]
        content_class: Option<String>,
        /// CSS class of the image container (required for non-Wikipedia pages)
        #[arg(long)]
        image_class: Option<String>,
    },
    /// Crawl the built-in most-read Wikipedia article list
    MostRead,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let crawler = crawler::Crawler::new();

    match cli.command {
        Commands::Crawl {
            url,
            content_class,
            image_class,
        } => {
            let record = crawler
                .crawl(&url, content_class.as_deref(), image_class.as_deref())
                .await?;
            match record {
                Some(record) => print_record(&record),
                None => println!(
                    "No extractable content (missing container classes or content container)."
                ),
            }
        }
        Commands::MostRead => {
            let mut clipped = 0usize;
            for url in MOST_READ_ARTICLES {
                match crawler.crawl(url, None, None).await {
                    Ok(Some(record)) => {
                        clipped += 1;
                        println!("{}", record.headline);
                    }
                    Ok(None) => println!("(no content) {}", url),
                    Err(e) => warn!("Failed to crawl {}: {}", url, e),
                }
            }
            println!(
                "Clipped {} of {} articles.",
                clipped,
                MOST_READ_ARTICLES.len()
            );
        }
    }

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {:.1}s", elapsed.as_secs_f64());
    }

    Ok(())
}

fn print_record(record: &ExtractedRecord) {
    println!("headline:  {}", record.headline);
    println!("paragraph: {}", record.paragraph);
    println!("image_url: {}", record.image_url);
}
