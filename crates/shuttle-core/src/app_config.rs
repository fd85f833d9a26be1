/// Public CMU Transportation page listing shuttle routes and timetables.
pub const DEFAULT_SCHEDULE_URL: &str = "https://www.cmu.edu/transportation/transport/shuttle.html";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Page scraped for route descriptions and timetables.
    pub schedule_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
}
