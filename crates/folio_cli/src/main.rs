use clap::{Parser, Subcommand};
use folio_cache::{CacheConfig, CacheKind};
use folio_client::ArticlesClient;
use folio_core::{page_numbers, ArticleSource, Error, KvCache, ListingQuery, Result};
use folio_web::Config;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

const PING_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(long, global = true)]
    debug: bool,
    /// Base URL of the articles API, overrides FOLIO_API_BASE
    #[arg(long, global = true)]
    api_base: Option<String>,
    /// Cache backend: memory, rest or redis
    #[arg(long, global = true)]
    cache: Option<CacheKind>,
    /// Cache URL, overrides FOLIO_CACHE_URL
    #[arg(long, global = true)]
    cache_url: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the articles pages and the analytics endpoint
    Serve {
        #[arg(long)]
        addr: Option<SocketAddr>,
    },
    /// Print the pagination markers for a page
    Pages { current: u32, total: u32 },
    /// Fetch and print one page of articles
    Articles {
        #[arg(long, default_value = "")]
        q: String,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        trending: bool,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Cache utilities
    Cache {
        #[command(subcommand)]
        command: CacheCommands,
    },
}

#[derive(Subcommand, Debug)]
enum CacheCommands {
    /// Write and read back a short-lived test key
    Ping,
}

impl Cli {
    fn config(&self) -> Result<Config> {
        let mut config = Config::from_env()?;
        if let Some(api_base) = &self.api_base {
            config.api_base = api_base.clone();
        }
        if let Some(kind) = self.cache {
            config.cache_kind = kind;
        }
        if let Some(url) = &self.cache_url {
            config.cache = config.cache.with_url(url);
        }
        Ok(config)
    }
}

/// One set/get round trip against the cache, bounded by `PING_TIMEOUT`.
async fn check_cache(cache: &Arc<dyn KvCache>) -> Result<String> {
    let result = match tokio::time::timeout(PING_TIMEOUT, cache.ping()).await {
        Ok(result) => result,
        Err(elapsed) => Err(Error::Cache(format!("Cache ping timed out: {}", elapsed))),
    };
    if let Err(e) = &result {
        error!("Cache ping failed: {}", e);
    }
    result
}

fn print_pages(current: u32, total: u32) {
    let markers: Vec<String> = page_numbers(current, total)
        .iter()
        .map(ToString::to_string)
        .collect();
    println!("{}", markers.join(" "));
}

async fn print_articles(config: &Config, query: &ListingQuery) -> Result<()> {
    let client = ArticlesClient::new(&config.api_base)?;
    let listing = client.fetch_listing(query).await?;

    if listing.items.is_empty() {
        println!("{}", folio_web::page::EMPTY_STATE);
        return Ok(());
    }
    for article in &listing.items {
        let trending = if article.is_trending { " [trending]" } else { "" };
        println!(
            "{}  {:<40} {} ({}){}",
            article.published_at.format("%Y-%m-%d"),
            article.title,
            article.slug,
            article.category,
            trending
        );
    }
    println!(
        "Page {} of {} ({} articles)",
        query.page, listing.total_pages, listing.total
    );
    Ok(())
}

async fn ping_cache(kind: CacheKind, cache_config: &CacheConfig) -> Result<()> {
    let cache = folio_cache::create_cache(kind, cache_config).await?;
    info!("💾 Checking cache connection ({:?})...", kind);
    let value = check_cache(&cache).await?;
    println!("{}", value);
    info!("✨ Cache reachable");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    folio_core::logging::init_logging(cli.debug);

    match &cli.command {
        Commands::Serve { addr } => {
            let mut config = cli.config()?;
            if let Some(addr) = addr {
                config.addr = *addr;
            }
            info!("🚀 Serving articles from {}", config.api_base);
            folio_web::serve(config).await?;
        }
        Commands::Pages { current, total } => print_pages(*current, *total),
        Commands::Articles {
            q,
            category,
            trending,
            page,
        } => {
            let config = cli.config()?;
            let query = ListingQuery {
                q: q.clone(),
                category: category.clone().unwrap_or_else(|| folio_core::listing::ALL.to_string()),
                trending: *trending,
                page: (*page).max(1),
            };
            print_articles(&config, &query).await?;
        }
        Commands::Cache {
            command: CacheCommands::Ping,
        } => {
            let config = cli.config()?;
            ping_cache(config.cache_kind, &config.cache).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use clap::CommandFactory;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_pages() {
        let cli = Cli::try_parse_from(["folio", "pages", "5", "10"]).unwrap();
        assert!(matches!(cli.command, Commands::Pages { current: 5, total: 10 }));
    }

    #[test]
    fn test_parse_serve_flags() {
        let cli = Cli::try_parse_from([
            "folio",
            "serve",
            "--addr",
            "0.0.0.0:8080",
            "--cache",
            "rest",
        ])
        .unwrap();
        assert_eq!(cli.cache, Some(CacheKind::Rest));
        match cli.command {
            Commands::Serve { addr } => assert_eq!(addr.map(|a| a.port()), Some(8080)),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_cache_backend_is_rejected() {
        assert!(Cli::try_parse_from(["folio", "--cache", "disk", "cache", "ping"]).is_err());
    }

    #[derive(Default)]
    struct UnreachableCache {
        attempts: AtomicUsize,
    }

    #[async_trait]
    impl KvCache for UnreachableCache {
        async fn get(&self, _key: &str) -> Result<Option<String>> {
            Ok(None)
        }

        async fn set(&self, _key: &str, _value: &str, _ttl: Option<Duration>) -> Result<()> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            Err(Error::Cache("connection refused".to_string()))
        }

        async fn incr(&self, _key: &str) -> Result<i64> {
            Err(Error::Cache("connection refused".to_string()))
        }
    }

    #[tokio::test]
    async fn test_failing_cache_is_pinged_once() {
        let unreachable = Arc::new(UnreachableCache::default());
        let cache: Arc<dyn KvCache> = unreachable.clone();

        assert!(matches!(check_cache(&cache).await, Err(Error::Cache(_))));
        assert_eq!(unreachable.attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_check_cache_against_memory() {
        let cache: Arc<dyn KvCache> = Arc::new(folio_cache::MemoryCache::new());
        assert_eq!(check_cache(&cache).await.unwrap(), "hello");
    }
}
