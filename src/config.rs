// src/config.rs

use std::env;
use dotenvy::dotenv;

/// Default location of the test module, relative to the working directory.
pub const DEFAULT_TEST_MODULE_PATH: &str = "../../MainModule/main";

#[derive(Debug, Clone)]
pub struct Config {
    pub jwt_secret: String,
    pub test_module_path: String,
    pub bind_addr: String,
    pub cors_origins: Vec<String>,
    pub rust_log: String,
    pub log_dir: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let jwt_secret = env::var("JWT_SECRET")
            .expect("JWT_SECRET must be set");

        let test_module_path = env::var("TEST_MODULE_PATH")
            .unwrap_or_else(|_| DEFAULT_TEST_MODULE_PATH.to_string());

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        let cors_origins = match env::var("CORS_ORIGINS") {
            Ok(raw) => parse_origins(&raw)
                .unwrap_or_else(|e| panic!("CORS_ORIGINS is invalid: {}", e)),
            Err(_) => vec!["http://localhost:3000".to_string()],
        };

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        let log_dir = env::var("LOG_DIR")
            .unwrap_or_else(|_| "logs".to_string());

        Self {
            jwt_secret,
            test_module_path,
            bind_addr,
            cors_origins,
            rust_log,
            log_dir,
        }
    }
}

/// Splits a comma-separated origin list, dropping blanks.
///
/// `*` is refused: the auth cookie needs credentialed CORS, which browsers
/// never allow with a wildcard origin.
fn parse_origins(raw: &str) -> Result<Vec<String>, String> {
    let origins: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    if origins.iter().any(|o| o == "*") {
        return Err("wildcard origin '*' cannot be combined with credentials; list explicit origins".to_string());
    }
    Ok(origins)
}
