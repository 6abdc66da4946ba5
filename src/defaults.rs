//! Default values for stage presentation and manifest fetching.

pub const ENV_PRESET: &str = "studio";
pub const FETCH_TIMEOUT_SECS: u64 = 30;
pub const MAX_REDIRECTS: usize = 10;
pub const USER_AGENT: &str = concat!("iiif-stage/", env!("CARGO_PKG_VERSION"));
pub const ACCEPT: &str = "application/ld+json, application/json;q=0.9, */*;q=0.1";

pub const TIMEOUT_ENV: &str = "IIIF_STAGE_FETCH_TIMEOUT_SECS";
pub const BASE_URL_ENV: &str = "IIIF_STAGE_BASE_URL";

pub fn env_preset() -> String { ENV_PRESET.to_string() }
