use std::env;
use std::fmt::Display;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use orgreg_application::DEFAULT_MAX_MESSAGE_BYTES;
use orgreg_core::AppError;
use tracing_subscriber::EnvFilter;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditSinkConfig {
    Sqs { queue_url: String, region: String },
    Console,
}

#[derive(Debug, Clone)]
pub struct AuditConfig {
    pub sink: AuditSinkConfig,
    pub activity_type_prefix: String,
    pub queue_capacity: usize,
    pub enqueue_timeout: Duration,
    pub max_message_bytes: usize,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub database_url: String,
    pub frontend_url: String,
    pub api_host: String,
    pub api_port: u16,
    pub jwt_public_key: String,
    pub auth_api_url: String,
    pub auth_api_timeout: Duration,
    pub audit: AuditConfig,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let database_url = required_non_empty(&lookup, "DATABASE_URL")?;
        let frontend_url =
            lookup("FRONTEND_URL").unwrap_or_else(|| "http://localhost:3000".to_owned());

        let api_host = lookup("API_HOST").unwrap_or_else(|| "127.0.0.1".to_owned());
        let api_port = parse_or(&lookup, "API_PORT", 3001_u16)?;

        let jwt_public_key = required_non_empty(&lookup, "JWT_PUBLIC_KEY")?;

        let auth_api_url = required_non_empty(&lookup, "AUTH_API_URL")?;
        let parsed_auth_url = Url::parse(&auth_api_url)
            .map_err(|error| AppError::Validation(format!("invalid AUTH_API_URL: {error}")))?;
        if !matches!(parsed_auth_url.scheme(), "http" | "https") {
            return Err(AppError::Validation(
                "AUTH_API_URL must use http or https".to_owned(),
            ));
        }
        let auth_api_timeout =
            Duration::from_secs(parse_or(&lookup, "AUTH_API_TIMEOUT_SECONDS", 30_u64)?.max(1));

        let sink = match lookup("AUDIT_SINK")
            .unwrap_or_else(|| "sqs".to_owned())
            .to_ascii_lowercase()
            .as_str()
        {
            "sqs" => AuditSinkConfig::Sqs {
                queue_url: required_non_empty(&lookup, "AUDIT_QUEUE_URL")?,
                region: required_non_empty(&lookup, "AWS_REGION")?,
            },
            "console" => AuditSinkConfig::Console,
            other => {
                return Err(AppError::Validation(format!(
                    "AUDIT_SINK must be either 'sqs' or 'console', got '{other}'"
                )));
            }
        };

        let queue_capacity = parse_or(&lookup, "AUDIT_QUEUE_CAPACITY", 1024_usize)?;
        if queue_capacity == 0 {
            return Err(AppError::Validation(
                "AUDIT_QUEUE_CAPACITY must be greater than zero".to_owned(),
            ));
        }

        let max_message_bytes =
            parse_or(&lookup, "AUDIT_MAX_MESSAGE_BYTES", DEFAULT_MAX_MESSAGE_BYTES)?;
        if max_message_bytes == 0 {
            return Err(AppError::Validation(
                "AUDIT_MAX_MESSAGE_BYTES must be greater than zero".to_owned(),
            ));
        }

        let audit = AuditConfig {
            sink,
            activity_type_prefix: lookup("AUDIT_ACTIVITY_TYPE_PREFIX").unwrap_or_default(),
            queue_capacity,
            enqueue_timeout: Duration::from_millis(parse_or(
                &lookup,
                "AUDIT_ENQUEUE_TIMEOUT_MS",
                50_u64,
            )?),
            max_message_bytes,
        };

        Ok(Self {
            database_url,
            frontend_url,
            api_host,
            api_port,
            jwt_public_key,
            auth_api_url,
            auth_api_timeout,
            audit,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn required_non_empty(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
) -> Result<String, AppError> {
    let value = lookup(name).ok_or_else(|| AppError::Validation(format!("{name} is required")))?;
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{name} must not be empty")));
    }

    Ok(value)
}

fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: T,
) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: Display,
{
    match lookup(name).filter(|value| !value.trim().is_empty()) {
        Some(value) => value
            .trim()
            .parse::<T>()
            .map_err(|error| AppError::Validation(format!("invalid {name}: {error}"))),
        None => Ok(default),
    }
}
