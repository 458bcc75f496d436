use clap::builder::TypedValueParser as _;
use clap::Parser;
use dotenvy::dotenv;
use gateway_auth::providers::{
    GITHUB_AUTH_URL, GITHUB_TOKEN_URL, GITHUB_USERINFO_URL, GOOGLE_AUTH_URL, GOOGLE_TOKEN_URL,
    GOOGLE_USERINFO_URL,
};
use log::LevelFilter;
use std::time::Duration;

#[derive(Clone, Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// The host interface to listen for incoming connections
    #[arg(short, long, env, default_value = "127.0.0.1")]
    pub interface: Option<String>,

    /// The host TCP port to listen for incoming connections
    #[arg(short, long, env, default_value_t = 8000)]
    pub port: u16,

    /// Set the log level verbosity threshold (level) to control what gets displayed on console output
    #[arg(
        short,
        long,
        env,
        default_value_t = LevelFilter::Info,
        value_parser = clap::builder::PossibleValuesParser::new(["OFF", "ERROR", "WARN", "INFO", "DEBUG", "TRACE"])
            .map(|s| s.parse::<LevelFilter>().unwrap()),
        )]
    pub log_level_filter: LevelFilter,

    /// Timeout in seconds for each call made to an identity provider
    #[arg(long, env, default_value_t = 10)]
    pub http_timeout_secs: u64,

    /// The Google OAuth client ID. Google login is disabled when unset.
    #[arg(long, env)]
    google_client_id: Option<String>,

    /// The Google OAuth client secret.
    #[arg(long, env, hide_env_values = true)]
    google_client_secret: Option<String>,

    /// The callback URL registered with Google.
    #[arg(
        long,
        env,
        default_value = "http://localhost:8000/auth/google/callback"
    )]
    google_redirect_uri: String,

    /// Comma separated list of scopes requested from Google.
    #[arg(
        long,
        env,
        value_delimiter = ',',
        use_value_delimiter = true,
        default_value = "profile,email"
    )]
    pub google_scopes: Vec<String>,

    /// Google authorization endpoint. Override in tests to point at a mock server.
    #[arg(long, env, default_value = GOOGLE_AUTH_URL)]
    google_auth_url: String,

    /// Google token endpoint.
    #[arg(long, env, default_value = GOOGLE_TOKEN_URL)]
    google_token_url: String,

    /// Google user-info endpoint.
    #[arg(long, env, default_value = GOOGLE_USERINFO_URL)]
    google_userinfo_url: String,

    /// The GitHub OAuth app client ID. GitHub login is disabled when unset.
    #[arg(long, env)]
    github_client_id: Option<String>,

    /// The GitHub OAuth app client secret.
    #[arg(long, env, hide_env_values = true)]
    github_client_secret: Option<String>,

    /// The callback URL registered with GitHub.
    #[arg(
        long,
        env,
        default_value = "http://localhost:8000/auth/github/callback"
    )]
    github_redirect_uri: String,

    /// Comma separated list of scopes requested from GitHub.
    #[arg(
        long,
        env,
        value_delimiter = ',',
        use_value_delimiter = true,
        default_value = "user:email"
    )]
    pub github_scopes: Vec<String>,

    /// GitHub authorization endpoint.
    #[arg(long, env, default_value = GITHUB_AUTH_URL)]
    github_auth_url: String,

    /// GitHub token endpoint.
    #[arg(long, env, default_value = GITHUB_TOKEN_URL)]
    github_token_url: String,

    /// GitHub user-info endpoint.
    #[arg(long, env, default_value = GITHUB_USERINFO_URL)]
    github_userinfo_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        // Load .env file first
        dotenv().ok();
        // Then parse the command line parameters and flags
        Config::parse()
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn google_client_id(&self) -> Option<String> {
        self.google_client_id.clone()
    }

    pub fn google_client_secret(&self) -> Option<String> {
        self.google_client_secret.clone()
    }

    pub fn google_redirect_uri(&self) -> &str {
        &self.google_redirect_uri
    }

    pub fn google_auth_url(&self) -> &str {
        &self.google_auth_url
    }

    pub fn google_token_url(&self) -> &str {
        &self.google_token_url
    }

    pub fn google_userinfo_url(&self) -> &str {
        &self.google_userinfo_url
    }

    pub fn github_client_id(&self) -> Option<String> {
        self.github_client_id.clone()
    }

    pub fn github_client_secret(&self) -> Option<String> {
        self.github_client_secret.clone()
    }

    pub fn github_redirect_uri(&self) -> &str {
        &self.github_redirect_uri
    }

    pub fn github_auth_url(&self) -> &str {
        &self.github_auth_url
    }

    pub fn github_token_url(&self) -> &str {
        &self.github_token_url
    }

    pub fn github_userinfo_url(&self) -> &str {
        &self.github_userinfo_url
    }

    /// Point every provider endpoint at `base_url`, e.g. a mock server.
    ///
    /// Paths follow `/{provider}/auth`, `/{provider}/token` and `/{provider}/userinfo`.
    pub fn set_provider_base_url(mut self, base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/');
        self.google_auth_url = format!("{base_url}/google/auth");
        self.google_token_url = format!("{base_url}/google/token");
        self.google_userinfo_url = format!("{base_url}/google/userinfo");
        self.github_auth_url = format!("{base_url}/github/auth");
        self.github_token_url = format!("{base_url}/github/token");
        self.github_userinfo_url = format!("{base_url}/github/userinfo");
        self
    }
}
