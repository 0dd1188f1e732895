use std::net::SocketAddr;
use std::path::PathBuf;

use axum::http::HeaderValue;
use env_helpers::get_env_default;

pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// JSON file holding the waitlist. Relative paths resolve against the working directory.
    pub waitlist_path: PathBuf,
    /// Origin of the marketing site allowed to call the API from the browser.
    pub cors_origin: HeaderValue,
    /// Structured JSON log output.
    pub log_file: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let bind_addr: SocketAddr =
            get_env_default("BIND_ADDR", SocketAddr::from(([127, 0, 0, 1], 3001)));
        let waitlist_path: String =
            get_env_default("WAITLIST_PATH", "data/waitlist.json".to_string());
        let cors_origin: HeaderValue =
            get_env_default("CORS_ORIGIN", String::from("http://localhost:3000"))
                .parse()
                .expect("CORS_ORIGIN must be a valid header value");
        let log_file: String = get_env_default("LOG_FILE", "app.log".to_string());

        Self {
            bind_addr,
            waitlist_path: PathBuf::from(waitlist_path),
            cors_origin,
            log_file: PathBuf::from(log_file),
        }
    }
}
