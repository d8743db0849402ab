use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "redirect-log")]
#[command(version = "0.1.0")]
#[command(about = "Web redirector that logs visitor metadata to a CSV file", long_about = None)]
pub struct Args {
    /// Port to listen on (binds on all interfaces)
    #[arg(short = 'p', long, env = "PORT", default_value = "5000")]
    pub port: u16,

    /// URL visitors are forwarded to
    #[arg(short = 't', long, env = "TARGET_URL", default_value = "https://www.youtube.com")]
    pub target_url: String,

    /// CSV log file path
    #[arg(short = 'f', long, env = "LOG_FILE", default_value = "log.csv")]
    pub log_file: String,

    /// Disable the outbound IP geolocation lookup (geo columns log as "Unknown")
    #[arg(long, env = "NO_GEO")]
    pub no_geo: bool,

    /// Geolocation request timeout in milliseconds
    #[arg(long, env = "GEO_TIMEOUT_MS", default_value = "5000")]
    pub geo_timeout: u64,

    /// How long a first-phase visit stays correlatable, in seconds
    #[arg(long, env = "VISIT_TTL_SECS", default_value = "300")]
    pub visit_ttl: u64,

    /// Maximum number of pending first-phase visits kept in memory
    #[arg(long, env = "VISIT_CAPACITY", default_value = "4096")]
    pub visit_capacity: usize,

    /// Verbose output
    #[arg(short = 'v', long, env = "VERBOSE")]
    pub verbose: bool,
}

impl Args {
    pub fn validate(&self) -> Result<(), String> {
        if self.target_url.is_empty() {
            return Err("target URL must not be empty".to_string());
        }
        if self.visit_capacity == 0 {
            return Err("visit capacity must be at least 1".to_string());
        }
        Ok(())
    }
}
