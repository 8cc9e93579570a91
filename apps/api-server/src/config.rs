//! Application configuration loaded from environment variables.

use std::env;

use staplab_infra::{CloudinaryConfig, DatabaseConfig};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub cloudinary: Option<CloudinaryConfig>,
    pub uploads: UploadConfig,
    /// Allowed CORS origins; empty means any origin.
    pub cors_origins: Vec<String>,
    /// Account created at start-up if missing, so a fresh deployment can log in.
    pub admin: Option<AdminAccount>,
}

#[derive(Debug, Clone)]
pub struct AdminAccount {
    pub fullname: String,
    pub email: String,
    pub password: String,
}

/// Limits applied to image uploads received in multipart bodies.
#[derive(Debug, Clone, Copy)]
pub struct UploadConfig {
    pub max_bytes: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

/// Body size limit for JSON requests.
pub const JSON_LIMIT_BYTES: usize = 25 * 1024 * 1024;

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: parse_var("DB_MAX_CONNECTIONS").unwrap_or(20),
            min_connections: parse_var("DB_MIN_CONNECTIONS").unwrap_or(2),
        });

        let cloudinary = match (
            env::var("CLOUDINARY_CLOUD_NAME"),
            env::var("CLOUDINARY_API_KEY"),
            env::var("CLOUDINARY_API_SECRET"),
        ) {
            (Ok(cloud_name), Ok(api_key), Ok(api_secret)) => {
                let mut config = CloudinaryConfig::new(cloud_name, api_key, api_secret);
                if let Ok(folder) = env::var("CLOUDINARY_FOLDER") {
                    config.folder = folder;
                }
                Some(config)
            }
            _ => None,
        };

        let uploads = UploadConfig {
            max_bytes: parse_var("MAX_UPLOAD_BYTES").unwrap_or(UploadConfig::default().max_bytes),
        };

        let admin = match (env::var("ADMIN_EMAIL"), env::var("ADMIN_PASSWORD")) {
            (Ok(email), Ok(password)) => Some(AdminAccount {
                fullname: env::var("ADMIN_FULLNAME").unwrap_or_else(|_| "Administrator".to_string()),
                email,
                password,
            }),
            _ => None,
        };

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_var("PORT").unwrap_or(8080),
            database,
            cloudinary,
            uploads,
            cors_origins: env::var("CORS_ALLOWED_ORIGINS")
                .map(|v| parse_origins(&v))
                .unwrap_or_default(),
            admin,
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|s| s.parse().ok())
}

/// Comma-separated origins; `*` (or nothing) allows any origin.
fn parse_origins(raw: &str) -> Vec<String> {
    let origins: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_owned)
        .collect();
    if origins.iter().any(|o| o == "*") {
        Vec::new()
    } else {
        origins
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins() {
        assert!(parse_origins("*").is_empty());
        assert!(parse_origins(" ").is_empty());
        assert_eq!(
            parse_origins("https://staplab.org, https://admin.staplab.org"),
            ["https://staplab.org", "https://admin.staplab.org"]
        );
        assert!(parse_origins("https://staplab.org,*").is_empty());
    }

    #[test]
    fn test_default_upload_limit_is_five_megabytes() {
        assert_eq!(UploadConfig::default().max_bytes, 5_242_880);
    }
}
