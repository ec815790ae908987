use std::env;
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppEnv {
    Dev,
    Prod,
}

impl AppEnv {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "prod" | "production" => AppEnv::Prod,
            _ => AppEnv::Dev,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Platform {
    Ios,
    Android,
}

impl Platform {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "android" => Platform::Android,
            _ => Platform::Ios,
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub env: AppEnv,
    pub platform: Platform,
    pub api_host_ios: String,
    pub api_host_android: String,
    pub api_prod_host: String,
    pub session_file: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            env: AppEnv::parse(&env::var("APP_ENV").unwrap_or_default()),
            platform: Platform::parse(&env::var("PLATFORM").unwrap_or_default()),
            api_host_ios: env::var("API_HOST_IOS")
                .unwrap_or_else(|_| "http://localhost:3333".to_string()),
            api_host_android: env::var("API_HOST_ANDROID")
                .unwrap_or_else(|_| "http://10.0.2.2:3333".to_string()),
            api_prod_host: env::var("API_PROD_HOST")
                .unwrap_or_else(|_| "http://localhost:3333".to_string()),
            session_file: env::var("SESSION_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_session_file()),
        }
    }

    /// Host every API request is issued against.
    pub fn api_host(&self) -> &str {
        match (self.env, self.platform) {
            (AppEnv::Dev, Platform::Ios) => &self.api_host_ios,
            (AppEnv::Dev, Platform::Android) => &self.api_host_android,
            (AppEnv::Prod, _) => &self.api_prod_host,
        }
    }
}

fn default_session_file() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(env::temp_dir)
        .join("barbershop")
        .join("session.json")
}
