//! Core library for the `cityscope` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Clients for the remote city-directory and forecast endpoints
//! - The paginated directory loader and the per-location forecast session
//! - Display-unit conversions shared by every presentation layer
//!
//! It is used by `cityscope-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod loader;
pub mod model;
pub mod remote;
pub mod session;
pub mod units;

pub use config::Config;
pub use loader::{CityLoader, FetchState, PAGE_SIZE};
pub use model::{CityRecord, ForecastEntry, SortColumn, SortDirection, SortSpec};
pub use remote::{DirectoryApi, DirectoryClient, FetchError, ForecastApi, ForecastClient};
pub use session::{ForecastSession, SNAPSHOT_INDICES, SessionStatus};
pub use units::{convert_hpa_to_mm_hg, convert_kelvin_to_celsius};
