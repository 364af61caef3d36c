use crate::error::{LeadgenError, Result};
use fantoccini::wd::Capabilities;
use fantoccini::{Client, ClientBuilder};
use serde_json::json;
use std::time::Duration;
use tokio::time::timeout;

/// Well-known local WebDriver endpoints tried when the configured one refuses
const FALLBACK_URLS: &[&str] = &[
    "http://localhost:9515", // ChromeDriver default
    "http://localhost:4444", // geckodriver / Selenium default
    "http://127.0.0.1:4444",
];

/// Default limit on opening one session
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Browser settings applied when a session is opened
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub webdriver_url: String,
    pub user_agent: Option<String>,
    pub headless: bool,
    /// Limit on each connection attempt, fallbacks included
    pub connect_timeout: Duration,
    /// Endpoints tried after `webdriver_url` fails
    pub fallback_urls: Vec<String>,
}

impl SessionOptions {
    /// Headless session options with no user agent override
    pub fn new(webdriver_url: &str) -> Self {
        Self {
            webdriver_url: webdriver_url.to_string(),
            user_agent: None,
            headless: true,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            fallback_urls: FALLBACK_URLS.iter().map(|url| url.to_string()).collect(),
        }
    }

    /// Present `user_agent` to websites
    pub fn with_user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = Some(user_agent.to_string());
        self
    }

    /// Show or hide the browser window
    pub fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Give up on a driver that has not answered within `limit`
    pub fn with_connect_timeout(mut self, limit: Duration) -> Self {
        self.connect_timeout = limit;
        self
    }

    /// Only try the configured WebDriver URL
    pub fn without_fallbacks(mut self) -> Self {
        self.fallback_urls.clear();
        self
    }
}

/// Builds the capabilities for both Chrome and Firefox drivers.
///
/// Each driver ignores the vendor block it does not understand.
pub fn capabilities(options: &SessionOptions) -> Capabilities {
    let mut chrome_args = vec!["--disable-gpu".to_string(), "--no-sandbox".to_string()];
    let mut firefox_args = Vec::new();
    let mut firefox_prefs = serde_json::Map::new();

    if options.headless {
        chrome_args.push("--headless=new".to_string());
        firefox_args.push("-headless".to_string());
    }

    if let Some(user_agent) = &options.user_agent {
        chrome_args.push(format!("--user-agent={}", user_agent));
        firefox_prefs.insert("general.useragent.override".to_string(), json!(user_agent));
    }

    let mut caps = Capabilities::new();
    caps.insert("goog:chromeOptions".to_string(), json!({ "args": chrome_args }));
    caps.insert(
        "moz:firefoxOptions".to_string(),
        json!({ "args": firefox_args, "prefs": firefox_prefs }),
    );
    caps
}

/// Opens a new WebDriver session.
///
/// Tries the configured URL first, then the fallback driver ports. Each
/// attempt is bounded by `connect_timeout`.
pub async fn connect(options: &SessionOptions) -> Result<Client> {
    let caps = capabilities(options);
    let limit = options.connect_timeout;

    let first_error = match try_connect(&options.webdriver_url, &caps, limit).await {
        Ok(client) => {
            ::log::debug!("Connected to WebDriver at {}", options.webdriver_url);
            return Ok(client);
        }
        Err(e) => {
            ::log::warn!(
                "Failed to connect to WebDriver at {}: {}",
                options.webdriver_url,
                e
            );
            e
        }
    };

    for url in &options.fallback_urls {
        if *url == options.webdriver_url {
            continue;
        }

        ::log::info!("Trying fallback WebDriver URL: {}", url);
        // Fallback failures are expected, only the first error is reported
        if let Ok(client) = try_connect(url, &caps, limit).await {
            ::log::debug!("Connected to fallback WebDriver at {}", url);
            return Ok(client);
        }
    }

    ::log::error!(
        "Make sure a WebDriver server is running or set the WEBDRIVER_URL environment variable"
    );
    Err(LeadgenError::Session(format!(
        "{}: {}",
        options.webdriver_url, first_error
    )))
}

async fn try_connect(
    url: &str,
    caps: &Capabilities,
    limit: Duration,
) -> std::result::Result<Client, String> {
    let mut builder = ClientBuilder::native();
    builder.capabilities(caps.clone());

    match timeout(limit, builder.connect(url)).await {
        Ok(Ok(client)) => Ok(client),
        Ok(Err(e)) => Err(e.to_string()),
        Err(_) => Err(format!("no answer within {}ms", limit.as_millis())),
    }
}

/// Ends a session, logging rather than failing if the driver is already gone
pub async fn close(client: Client) {
    if let Err(e) = client.close().await {
        ::log::warn!("Failed to close WebDriver session: {}", e);
    }
}
