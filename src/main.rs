// src/main.rs

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io;
use std::path::PathBuf;
use tracing::error;

use trendscrape::{
    GoogleClient, HttpFetcher, ScraperConfig, ToneAnalyzer, WordList, article_domain,
    flatten_tones, logging,
};

#[derive(Parser)]
#[command(name = "trendscrape")]
#[command(version, about = "Scrape Google Correlate, News and Trends", long_about = None)]
struct Cli {
    /// TOML file layered over the defaults and under TRENDSCRAPE__* variables.
    #[arg(short, long, value_name = "FILE", env = "TRENDSCRAPE_CONFIG")]
    config: Option<PathBuf>,

    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Terms whose search history correlates with TERM.
    Correlate {
        term: String,
        #[arg(long, default_value_t = 0.0)]
        min_percent: f64,
    },
    /// Article links from Google News between START and END (YYYY-MM-DD).
    News {
        term: String,
        start: String,
        end: String,
    },
    /// Dictionary words from the paragraphs of an article.
    Article { url: String },
    /// The site an article belongs to.
    Domain { url: String },
    /// Monthly search interest since 2004.
    Frequency {
        term: String,
        /// Print each month as a start/end date window.
        #[arg(long)]
        ranges: bool,
        #[arg(long)]
        csv: bool,
    },
    /// Tone scores for a piece of text.
    Tones { text: String },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose);

    if let Err(e) = run(cli).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = ScraperConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    match cli.command {
        Commands::Correlate { term, min_percent } => {
            let client = build_client(&config, WordList::default())?;
            let terms = client.correlated_terms(&term, min_percent).await?;
            println!("\nFound {} correlated terms for '{}':", terms.len(), term);
            for t in terms {
                println!("  - [{:.4}] {}", t.score, t.text);
            }
        }
        Commands::News { term, start, end } => {
            let client = build_client(&config, WordList::default())?;
            let links = client.news_links(&term, &start, &end).await?;
            println!("\nFound {} articles for '{}':", links.len(), term);
            for link in links {
                println!("  - {}", link);
            }
        }
        Commands::Article { url } => {
            let lexicon = WordList::load(&config.lexicon_path)?;
            let client = build_client(&config, lexicon)?;
            let article = client.article(&url).await?;
            println!("[Lang: {}] {}", article.language, article.text());
        }
        Commands::Domain { url } => {
            println!("{}", article_domain(&url)?);
        }
        Commands::Frequency { term, ranges, csv } => {
            let client = build_client(&config, WordList::default())?;
            if ranges {
                let rows = client.frequency_ranges(&term).await?;
                if csv {
                    write_csv(&rows)?;
                } else {
                    for r in rows {
                        println!("{}  {}  {}", r.start_date, r.end_date, r.value);
                    }
                }
            } else {
                let rows = client.search_frequency(&term).await?;
                if csv {
                    write_csv(&rows)?;
                } else {
                    for p in rows {
                        println!("{:<16} {}", p.label, p.value);
                    }
                }
            }
        }
        Commands::Tones { text } => {
            let Some(credentials) = config.tone.clone() else {
                bail!("no [tone] credentials configured");
            };
            let analyzer = ToneAnalyzer::new(credentials, &config)?;
            let response = analyzer.analyze(&text).await?;
            for row in flatten_tones(&response)? {
                println!("{:<16} {:<12} {:.4}", row.category_name, row.tone_name, row.score);
            }
        }
    }

    Ok(())
}

fn build_client(config: &ScraperConfig, lexicon: WordList) -> Result<GoogleClient<HttpFetcher, WordList>> {
    let fetcher = HttpFetcher::new(config).context("Failed to build HTTP client")?;
    Ok(GoogleClient::new(fetcher, lexicon, config))
}

fn write_csv<T: Serialize>(rows: &[T]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(io::stdout());
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
