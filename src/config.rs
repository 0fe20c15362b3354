use serde::Deserialize;
use std::str::FromStr;

/// How the intake pipeline treats optional fields that fail format validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatPolicy {
    /// Reject the lead with 400, naming every offending field.
    #[default]
    Strict,
    /// Log the offending fields and accept the lead anyway.
    Lenient,
}

impl FromStr for FormatPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(FormatPolicy::Strict),
            "lenient" => Ok(FormatPolicy::Lenient),
            other => anyhow::bail!(
                "LEAD_FORMAT_POLICY must be 'strict' or 'lenient', got '{}'",
                other
            ),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Admin capability credential, presented as `X-Admin-Token`.
    pub secret_key: String,
    pub format_policy: FormatPolicy,
    pub rate_limit_per_second: u64,
    pub rate_limit_burst: u32,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            database_url: std::env::var("DATABASE_URL")
                .or_else(|_| std::env::var("DB_URL"))
                .map_err(|_| {
                    anyhow::anyhow!("DATABASE_URL or DB_URL environment variable required")
                })
                .and_then(|url| {
                    if url.trim().is_empty() {
                        anyhow::bail!("DATABASE_URL cannot be empty");
                    }
                    if !url.starts_with("postgresql://") && !url.starts_with("postgres://") {
                        anyhow::bail!("DATABASE_URL must start with postgresql:// or postgres://");
                    }
                    Ok(url)
                })?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "5024".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            secret_key: std::env::var("SECRET_KEY")
                .or_else(|_| std::env::var("ADMIN_TOKEN"))
                .map_err(|_| {
                    anyhow::anyhow!("SECRET_KEY or ADMIN_TOKEN environment variable required")
                })
                .and_then(|key| {
                    if key.trim().is_empty() {
                        anyhow::bail!("SECRET_KEY cannot be empty");
                    }
                    Ok(key)
                })?,
            format_policy: match std::env::var("LEAD_FORMAT_POLICY") {
                Ok(raw) => raw.parse()?,
                Err(_) => FormatPolicy::default(),
            },
            rate_limit_per_second: std::env::var("RATE_LIMIT_PER_SECOND")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| anyhow::anyhow!("RATE_LIMIT_PER_SECOND must be a positive number"))?,
            rate_limit_burst: std::env::var("RATE_LIMIT_BURST")
                .unwrap_or_else(|_| "20".to_string())
                .parse()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| anyhow::anyhow!("RATE_LIMIT_BURST must be a positive number"))?,
        };

        // Never log the secret key itself
        tracing::info!("Configuration loaded successfully");
        tracing::debug!(
            "Database URL: {}...",
            config.database_url.chars().take(20).collect::<String>()
        );
        tracing::debug!("Lead format policy: {:?}", config.format_policy);
        tracing::debug!(
            "Rate limit: {}/s, burst {}",
            config.rate_limit_per_second,
            config.rate_limit_burst
        );
        tracing::debug!("Server Port: {}", config.port);

        Ok(config)
    }
}
