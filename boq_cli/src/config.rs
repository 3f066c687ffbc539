use std::env;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use boq_core::pricing::PriceBook;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => bail!("unknown log format '{}'", other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    /// TOML price book overriding the built-in prices
    pub price_book: Option<PathBuf>,

    /// Location used when a command is given none
    pub default_location: String,

    /// Owner recorded in saved documents and lock files
    pub owner: String,

    pub log_format: LogFormat,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let price_book = env::var("BOQ_PRICE_BOOK")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        let default_location =
            env::var("BOQ_DEFAULT_LOCATION").unwrap_or_else(|_| "douala".to_string());

        let owner = env::var("BOQ_OWNER").unwrap_or_else(|_| "local".to_string());

        let log_format = LogFormat::parse(&env::var("BOQ_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string()))
            .context("BOQ_LOG_FORMAT must be 'pretty' or 'json'")?;

        Ok(Self {
            price_book,
            default_location,
            owner,
            log_format,
        })
    }

    /// Price book from `BOQ_PRICE_BOOK`, or the built-in one.
    pub fn load_price_book(&self) -> Result<PriceBook> {
        match &self.price_book {
            Some(path) => PriceBook::load(path)
                .with_context(|| format!("loading price book from {}", path.display())),
            None => Ok(PriceBook::standard().clone()),
        }
    }
}
