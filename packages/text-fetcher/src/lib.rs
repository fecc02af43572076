//! Plain-text web page fetcher.
//!
//! Downloads a page over HTTP or HTTPS, follows redirects up to a fixed
//! number of hops, and reduces the HTML body to whitespace-collapsed text.
//!
//! # Example
//!
//! ```rust,ignore
//! use text_fetcher::{FetcherConfig, TextFetcher};
//!
//! let fetcher = TextFetcher::with_config(FetcherConfig::default())?;
//! let text = fetcher.fetch_text("https://example.com", None).await?;
//! println!("{}", text);
//! ```

pub mod config;
pub mod error;
pub mod fetcher;
pub mod html;

pub use config::FetcherConfig;
pub use error::{FetchError, Result};
pub use fetcher::{fetch_text, TextFetcher};
pub use html::html_to_text;
