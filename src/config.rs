use anyhow::{Context, Result};
use std::env;
use std::sync::Arc;

use crate::errors::trace::{BacktraceCapture, NoTrace, TraceCapture};

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub errors: ErrorConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub instance_id: String,
}

/// How errors built by the service capture and expose stack traces
#[derive(Debug, Clone)]
pub struct ErrorConfig {
    pub capture_trace: bool,
    pub trace_max_bytes: usize,
    /// Include traces in `/errors/preview` output instead of redacting them
    pub expose_trace: bool,
}

impl ErrorConfig {
    pub fn tracer(&self) -> Arc<dyn TraceCapture> {
        if self.capture_trace {
            Arc::new(BacktraceCapture::bounded(self.trace_max_bytes))
        } else {
            Arc::new(NoTrace)
        }
    }
}

impl Default for ErrorConfig {
    fn default() -> Self {
        Self {
            capture_trace: true,
            trace_max_bytes: 16 * 1024,
            expose_trace: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key lookup; `from_env` passes the process env
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Config {
            server: ServerConfig {
                host: var("API_HOST", "0.0.0.0"),
                port: var("API_PORT", "8080")
                    .parse()
                    .context("API_PORT must be a valid port number")?,
                // Used only for debugging/observability. Falls back to HOSTNAME
                // (Docker/Kubernetes), otherwise "unknown".
                instance_id: lookup("INSTANCE_ID")
                    .or_else(|| lookup("HOSTNAME"))
                    .unwrap_or_else(|| "unknown".to_string()),
            },
            errors: ErrorConfig {
                capture_trace: var("ERRORS_CAPTURE_TRACE", "true")
                    .parse()
                    .context("ERRORS_CAPTURE_TRACE must be true or false")?,
                trace_max_bytes: var("ERRORS_TRACE_MAX_BYTES", "16384")
                    .parse()
                    .context("ERRORS_TRACE_MAX_BYTES must be a valid number")?,
                expose_trace: var("ERRORS_EXPOSE_TRACE", "false")
                    .parse()
                    .context("ERRORS_EXPOSE_TRACE must be true or false")?,
            },
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_server_address() {
        let config = Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
                instance_id: "test-instance".to_string(),
            },
            errors: ErrorConfig::default(),
        };

        assert_eq!(config.server_address(), "127.0.0.1:3000");
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.server_address(), "0.0.0.0:8080");
        assert_eq!(config.server.instance_id, "unknown");
        assert!(config.errors.capture_trace);
        assert_eq!(config.errors.trace_max_bytes, 16384);
        assert!(!config.errors.expose_trace);
    }

    #[test]
    fn test_overrides_and_hostname_fallback() {
        let config = Config::from_lookup(lookup_from(&[
            ("API_HOST", "127.0.0.1"),
            ("API_PORT", "9090"),
            ("HOSTNAME", "pod-7"),
            ("ERRORS_CAPTURE_TRACE", "false"),
            ("ERRORS_TRACE_MAX_BYTES", "512"),
            ("ERRORS_EXPOSE_TRACE", "true"),
        ]))
        .unwrap();

        assert_eq!(config.server_address(), "127.0.0.1:9090");
        assert_eq!(config.server.instance_id, "pod-7");
        assert!(!config.errors.capture_trace);
        assert_eq!(config.errors.trace_max_bytes, 512);
        assert!(config.errors.expose_trace);
        assert_eq!(config.errors.tracer().capture(), "");
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[("API_PORT", "eighty")])).unwrap_err();
        assert!(err.to_string().contains("API_PORT"));
    }

    #[test]
    fn test_invalid_bool_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[("ERRORS_CAPTURE_TRACE", "maybe")])).unwrap_err();
        assert!(err.to_string().contains("ERRORS_CAPTURE_TRACE"));
    }
}
