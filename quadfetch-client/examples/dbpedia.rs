//! Fetch a DBpedia resource and print its quads
//!
//! ```sh
//! cargo run --example dbpedia
//! ```

use quadfetch_client::{FetchClient, Result};
use quadfetch_formats::FormatRegistry;
use quadfetch_graph::DefaultDatasetFactory;
use std::sync::Arc;
use url::Url;

#[tokio::main]
async fn main() -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let client = FetchClient::new(Arc::new(FormatRegistry::common()))
        .with_factory(Arc::new(DefaultDatasetFactory));

    let url = Url::parse("https://dbpedia.org/data/Amsterdam.ntriples")
        .expect("static URL is valid");

    tracing::info!(url = %url, "fetching resource");

    let mut response = client.get(url).await?;
    let dataset = response.dataset().await?;

    println!("{} quads", dataset.len());
    for quad in dataset.iter().take(10) {
        println!("{quad}");
    }

    Ok(())
}
