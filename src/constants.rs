/// Page listing every SFC-licensed firm with its RO/OLI head counts
pub const DEFAULT_TARGET_URL: &str = "https://webb-site.com/dbpub/SFClicount.asp";

pub const FIRECRAWL_API_BASE: &str = "https://api.firecrawl.dev";
pub const FIRECRAWL_API_KEY_ENV: &str = "FIRECRAWL_API_KEY";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 120;

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";
pub const DEFAULT_REPORT_PATH: &str = "sfc_license_data_cleaned.json";
pub const DEFAULT_DEBUG_PATH: &str = "debug_response.json";
pub const LOG_DIR: &str = "logs";

/// Key under which the provider envelope carries the raw company list
pub const COMPANIES_KEY: &str = "companies";

/// How many companies the console summary lists
pub const SAMPLE_SIZE: usize = 5;
