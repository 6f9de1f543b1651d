use clap::Parser;
use ng_client::{create_fetcher, init_logging, BrowseSession, ClientConfig};
use ng_core::{ArticleFetcher, Feed, PageView};
use ng_web::AppState;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HumanDuration(Duration);

impl FromStr for HumanDuration {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        const TOO_LARGE: &str = "Duration is too large";

        let mut total_seconds = 0u64;
        let mut current_number = String::new();
        let mut has_unit = false;

        for c in s.chars() {
            if c.is_ascii_digit() {
                current_number.push(c);
            } else if !current_number.is_empty() {
                let num = current_number
                    .parse::<u64>()
                    .map_err(|_| TOO_LARGE.to_string())?;
                let seconds = match c {
                    's' => Some(num),
                    'm' => num.checked_mul(60),
                    'h' => num.checked_mul(3600),
                    _ => return Err(format!("Invalid duration unit: {}", c)),
                };
                total_seconds = seconds
                    .and_then(|secs| total_seconds.checked_add(secs))
                    .ok_or_else(|| TOO_LARGE.to_string())?;
                current_number.clear();
                has_unit = true;
            } else if !c.is_whitespace() {
                return Err(format!("Invalid character in duration: {}", c));
            }
        }

        // A bare number is seconds
        if !current_number.is_empty() {
            total_seconds = current_number
                .parse::<u64>()
                .ok()
                .and_then(|secs| total_seconds.checked_add(secs))
                .ok_or_else(|| TOO_LARGE.to_string())?;
            has_unit = true;
        }

        if !has_unit {
            return Err("Duration must include a number".to_string());
        }

        Ok(HumanDuration(Duration::from_secs(total_seconds)))
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Browse news feeds page by page", long_about = None)]
pub struct Cli {
    #[arg(long, env = "NEWS_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
    #[arg(long, env = "NEWS_API_BASE_URL", default_value = ng_client::config::DEFAULT_BASE_URL)]
    base_url: String,
    /// Country for top headlines
    #[arg(long, default_value = ng_core::types::DEFAULT_COUNTRY)]
    country: String,
    #[arg(long, default_value_t = ng_core::DEFAULT_PAGE_SIZE)]
    page_size: usize,
    /// Articles requested from the news service per call
    #[arg(long, default_value_t = ng_client::config::DEFAULT_FETCH_SIZE)]
    fetch_size: usize,
    /// How long fetched results stay fresh (e.g. 30s, 5m, 1h)
    #[arg(long, default_value = "5m")]
    cache_ttl: HumanDuration,
    #[arg(long, default_value = "info")]
    log_level: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Show top headlines
    Top {
        /// Page to show, starting at 0
        #[arg(long)]
        page: Option<u64>,
    },
    /// Show articles about a topic
    Topic {
        topic: String,
        #[arg(long)]
        page: Option<u64>,
    },
    /// List the topic tabs
    Topics,
    /// Serve the JSON API
    Serve {
        #[arg(long, default_value = "127.0.0.1:3000")]
        addr: SocketAddr,
    },
}

impl Cli {
    fn client_config(&self) -> ClientConfig {
        ClientConfig {
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
            country: self.country.clone(),
            page_size: self.page_size,
            fetch_size: self.fetch_size,
            cache_ttl: self.cache_ttl.0,
            ..ClientConfig::default()
        }
    }
}

fn print_page(view: &PageView) {
    println!("📰 {}", view.feed);
    for card in &view.articles {
        println!("- {}", card.title);
        println!("  Author: {}", card.author);
        println!("  Date: {}", card.published);
        println!("  {}", card.url);
    }
    if view.page_count == 0 {
        println!("No articles found");
    } else {
        println!(
            "page {}/{} ({} results)",
            view.page + 1,
            view.page_count,
            view.total_results
        );
    }
}

async fn browse(config: &ClientConfig, feed: Feed, page: Option<u64>) -> anyhow::Result<()> {
    let fetcher = create_fetcher(config)?;
    let mut session = BrowseSession::from_config(fetcher, feed, config)?;
    let view = match page {
        Some(page) => session.go_to_page(page).await?,
        None => session.open().await?,
    };
    print_page(&view);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);
    let config = cli.client_config();

    match cli.command {
        Commands::Top { page } => browse(&config, config.feed(None), page).await?,
        Commands::Topic { ref topic, page } => {
            browse(&config, config.feed(Some(topic.as_str())), page).await?
        }
        Commands::Topics => {
            for topic in &config.topics {
                println!("{}", topic);
            }
        }
        Commands::Serve { addr } => {
            let fetcher = create_fetcher(&config)?;
            info!(
                "🦗 Serving {} with a {}s cache",
                fetcher.name(),
                config.cache_ttl.as_secs()
            );
            ng_web::serve(AppState { fetcher, config }, addr).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_human_duration() {
        assert_eq!("5m".parse::<HumanDuration>().unwrap().0, Duration::from_secs(300));
        assert_eq!("1h30m".parse::<HumanDuration>().unwrap().0, Duration::from_secs(5400));
        assert_eq!("45".parse::<HumanDuration>().unwrap().0, Duration::from_secs(45));
        assert!("".parse::<HumanDuration>().is_err());
        assert!("5x".parse::<HumanDuration>().is_err());
        assert!("m".parse::<HumanDuration>().is_err());
    }

    #[test]
    fn test_human_duration_too_large() {
        let too_large = Err("Duration is too large".to_string());
        assert_eq!("99999999999999999h".parse::<HumanDuration>(), too_large);
        assert_eq!("307445734561825861m".parse::<HumanDuration>(), too_large);
        assert_eq!("99999999999999999999s".parse::<HumanDuration>(), too_large);
        assert_eq!(
            "18446744073709551615s 1s".parse::<HumanDuration>(),
            too_large
        );
        assert_eq!(
            "18446744073709551615".parse::<HumanDuration>().unwrap().0,
            Duration::from_secs(u64::MAX)
        );
    }

    #[test]
    fn test_cli_builds_config() {
        let cli = Cli::parse_from([
            "ng",
            "--api-key",
            "key",
            "--country",
            "us",
            "--cache-ttl",
            "30s",
            "topic",
            "bitcoin",
            "--page",
            "2",
        ]);
        let config = cli.client_config();
        assert_eq!(config.api_key.as_deref(), Some("key"));
        assert_eq!(config.cache_ttl, Duration::from_secs(30));
        assert_eq!(config.feed(None), Feed::top_headlines("us"));
        assert!(matches!(
            cli.command,
            Commands::Topic { ref topic, page: Some(2) } if topic == "bitcoin"
        ));
    }
}
