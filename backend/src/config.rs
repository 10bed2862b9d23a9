use std::env;

/// Matches the original deployment's 5 MB upload cap.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

#[derive(Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub allowed_origin: String,
    pub max_upload_bytes: usize,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8000".to_string()),
            allowed_origin: env::var("FRONTEND_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            max_upload_bytes: parse_max_upload_bytes(env::var("MAX_UPLOAD_BYTES").ok()),
        }
    }
}

fn parse_max_upload_bytes(raw: Option<String>) -> usize {
    raw.and_then(|value| value.parse().ok())
        .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_cap_defaults_to_5mb() {
        assert_eq!(parse_max_upload_bytes(None), DEFAULT_MAX_UPLOAD_BYTES);
        assert_eq!(parse_max_upload_bytes(Some("garbage".into())), DEFAULT_MAX_UPLOAD_BYTES);
    }

    #[test]
    fn upload_cap_honors_override() {
        assert_eq!(parse_max_upload_bytes(Some("1024".into())), 1024);
    }
}
