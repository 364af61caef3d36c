use clap::Parser;
use leadgen::PipelineConfig;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "leadgen")]
#[command(about = "Finds and researches companies matching an Ideal Customer Profile")]
#[command(version)]
pub struct Args {
    /// Ideal Customer Profile, e.g. "Series B fintech startups in London"
    #[arg(required_unless_present = "health")]
    pub icp: Option<String>,

    /// Path to a JSON pipeline configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// WebDriver URL (overrides config and WEBDRIVER_URL)
    #[arg(long)]
    pub webdriver_url: Option<String>,

    /// Maximum number of leads kept after filtering
    #[arg(long)]
    pub max_leads: Option<usize>,

    /// Number of leads researched
    #[arg(long)]
    pub research_limit: Option<usize>,

    /// Page load timeout in seconds
    #[arg(long)]
    pub fetch_timeout: Option<u64>,

    /// Pretty-print the JSON output
    #[arg(short, long)]
    pub pretty: bool,

    /// Print the health payload and exit
    #[arg(long)]
    pub health: bool,
}

impl Args {
    /// Apply command-line overrides on top of a loaded configuration
    pub fn apply(&self, mut config: PipelineConfig) -> PipelineConfig {
        if let Some(url) = &self.webdriver_url {
            config.webdriver_url = url.clone();
        }
        if let Some(max_leads) = self.max_leads {
            config.max_leads = max_leads;
        }
        if let Some(limit) = self.research_limit {
            config.research_limit = limit;
        }
        if let Some(secs) = self.fetch_timeout {
            config.fetch_timeout_secs = secs;
        }
        config
    }
}
