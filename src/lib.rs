//! Scrapes public SteamDB calculator pages into flat profile records.
//!
//! ```no_run
//! use steamdb_profile::{Config, SteamDbParser};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let parser = SteamDbParser::new(Config::default())?;
//! if parser.can_connect().await {
//!     let profile = parser.get_profile("76561198287455504").await?;
//!     println!("{:?}", profile.display_name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod extractor;
pub mod fetcher;
pub mod health;
pub mod parser;
pub mod steam_id;

pub use config::Config;
pub use extractor::{Field, ProfileRecord};
pub use parser::{ProfileError, SteamDbParser};
pub use steam_id::{SteamId, is_steam_id};
