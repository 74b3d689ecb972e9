use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::models::Role;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub services: ServiceUrls,
    pub cache: CacheConfig,
    pub idle: IdleConfig,
    pub session_storage_key: String,
    pub enable_logging: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            services: ServiceUrls::default(),
            cache: CacheConfig::default(),
            idle: IdleConfig::default(),
            session_storage_key: "dubbing-dashboard:session".to_string(),
            enable_logging: true,
        }
    }
}

/// Base URLs of the four upstream services.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceUrls {
    pub user: String,
    pub project: String,
    pub task: String,
    pub notification: String,
}

impl Default for ServiceUrls {
    fn default() -> Self {
        Self {
            user: "http://localhost:5001/api".to_string(),
            project: "http://localhost:5002/api".to_string(),
            task: "http://localhost:5003/api".to_string(),
            notification: "http://localhost:5004/api".to_string(),
        }
    }
}

impl ServiceUrls {
    /// Strips trailing slashes so paths can be appended with `format!`.
    pub fn normalized(mut self) -> Self {
        for url in [
            &mut self.user,
            &mut self.project,
            &mut self.task,
            &mut self.notification,
        ] {
            while url.ends_with('/') {
                url.pop();
            }
        }
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheConfig {
    pub dedupe_interval_seconds: u64,
    /// Retries used by hooks that opt into error retry.
    pub error_retry_count: u32,
    pub error_retry_interval_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dedupe_interval_seconds: 60,
            error_retry_count: 3,
            error_retry_interval_seconds: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdleConfig {
    pub timeout_minutes: u32,
    /// Applies to Admin and Supervisor layouts.
    pub elevated_timeout_minutes: u32,
}

impl Default for IdleConfig {
    fn default() -> Self {
        Self {
            timeout_minutes: 20,
            elevated_timeout_minutes: 40,
        }
    }
}

impl IdleConfig {
    pub fn timeout_for(&self, role: Role) -> Duration {
        let minutes = match role {
            Role::Admin | Role::Supervisor => self.elevated_timeout_minutes,
            _ => self.timeout_minutes,
        };
        Duration::from_secs(u64::from(minutes) * 60)
    }
}

impl AppConfig {
    /// Loads the configuration from compile-time environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            services: ServiceUrls {
                user: option_env!("USER_SERVICE_URL")
                    .map(str::to_string)
                    .unwrap_or(defaults.services.user),
                project: option_env!("PROJECT_SERVICE_URL")
                    .map(str::to_string)
                    .unwrap_or(defaults.services.project),
                task: option_env!("TASK_SERVICE_URL")
                    .map(str::to_string)
                    .unwrap_or(defaults.services.task),
                notification: option_env!("NOTIFICATION_SERVICE_URL")
                    .map(str::to_string)
                    .unwrap_or(defaults.services.notification),
            }
            .normalized(),
            cache: CacheConfig {
                dedupe_interval_seconds: option_env!("DEDUPE_INTERVAL_SECONDS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.cache.dedupe_interval_seconds),
                error_retry_count: option_env!("ERROR_RETRY_COUNT")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.cache.error_retry_count),
                error_retry_interval_seconds: option_env!("ERROR_RETRY_INTERVAL_SECONDS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.cache.error_retry_interval_seconds),
            },
            idle: IdleConfig {
                timeout_minutes: option_env!("IDLE_TIMEOUT_MINUTES")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.idle.timeout_minutes),
                elevated_timeout_minutes: option_env!("ELEVATED_IDLE_TIMEOUT_MINUTES")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.idle.elevated_timeout_minutes),
            },
            session_storage_key: option_env!("SESSION_STORAGE_KEY")
                .map(str::to_string)
                .unwrap_or(defaults.session_storage_key),
            enable_logging: option_env!("ENABLE_LOGGING")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.enable_logging),
        }
    }

    pub fn is_logging_enabled(&self) -> bool {
        self.enable_logging
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elevated_roles_get_the_longer_idle_timeout() {
        let idle = IdleConfig::default();
        assert_eq!(idle.timeout_for(Role::Admin), Duration::from_secs(40 * 60));
        assert_eq!(idle.timeout_for(Role::Supervisor), Duration::from_secs(40 * 60));
        assert_eq!(idle.timeout_for(Role::Translator), Duration::from_secs(20 * 60));
        assert_eq!(idle.timeout_for(Role::SoundEngineer), Duration::from_secs(20 * 60));
    }

    #[test]
    fn normalized_urls_drop_trailing_slashes() {
        let urls = ServiceUrls {
            user: "https://users.example/api//".into(),
            project: "https://projects.example".into(),
            task: "https://tasks.example/".into(),
            notification: "https://notify.example/v1/".into(),
        }
        .normalized();
        assert_eq!(urls.user, "https://users.example/api");
        assert_eq!(urls.project, "https://projects.example");
        assert_eq!(urls.task, "https://tasks.example");
        assert_eq!(urls.notification, "https://notify.example/v1");
    }
}
