use std::env;
use std::fs;
use std::path::Path;

// Forwards `.env` entries to `option_env!` in `src/config.rs`.
// Variables already set in the build environment take precedence.
fn main() {
    let env_file = Path::new(".env");

    if env_file.exists() {
        println!("cargo:rerun-if-changed=.env");

        if let Ok(contents) = fs::read_to_string(env_file) {
            for line in contents.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }

                if let Some((key, value)) = line.split_once('=') {
                    let key = key.trim();
                    let value = value.trim().trim_matches('"');

                    if env::var(key).is_err() {
                        println!("cargo:rustc-env={}={}", key, value);
                    }
                }
            }
        }
    } else {
        println!("cargo:warning=No .env file found, using built-in service URLs. Copy .env.example to .env to override them.");
    }

    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=.env.example");
    // Every key `AppConfig::from_env` reads.
    for key in [
        "USER_SERVICE_URL",
        "PROJECT_SERVICE_URL",
        "TASK_SERVICE_URL",
        "NOTIFICATION_SERVICE_URL",
        "DEDUPE_INTERVAL_SECONDS",
        "ERROR_RETRY_COUNT",
        "ERROR_RETRY_INTERVAL_SECONDS",
        "IDLE_TIMEOUT_MINUTES",
        "ELEVATED_IDLE_TIMEOUT_MINUTES",
        "SESSION_STORAGE_KEY",
        "ENABLE_LOGGING",
    ] {
        println!("cargo:rerun-if-env-changed={}", key);
    }
}
