use admin_pro::{AppConfig, config::Env};
use serial_test::serial;
use std::{env, panic, time::Duration};

// --- Setup/Teardown Utilities ---

const CONFIG_VARS: [&str; 5] = [
    "APP_ENV",
    "API_URL",
    "NEXT_PUBLIC_API_URL",
    "BIND_ADDR",
    "REQUEST_TIMEOUT_SECS",
];

/// Utility to run a test function and restore environment variables afterward
fn run_with_env<T, R>(test: T, cleanup_vars: &[&'static str]) -> R
where
    T: FnOnce() -> R + panic::UnwindSafe,
{
    // Save current environment variables
    let originals: Vec<(String, Option<String>)> = cleanup_vars
        .iter()
        .map(|&var| (var.to_string(), env::var(var).ok()))
        .collect();

    let result = panic::catch_unwind(test);

    // Restore original environment variables
    for (key, original_value) in originals.into_iter().rev() {
        unsafe {
            if let Some(val) = original_value {
                env::set_var(&key, val);
            } else {
                env::remove_var(&key);
            }
        }
    }

    // Re-panic if the test failed
    match result {
        Ok(value) => value,
        Err(e) => panic::resume_unwind(e),
    }
}

fn clear_config_vars() {
    unsafe {
        for var in CONFIG_VARS {
            env::remove_var(var);
        }
    }
}

// --- Tests ---

#[test]
#[serial]
fn test_app_config_production_fail_fast() {
    // API_URL is missing, so production must refuse to start.
    let result = run_with_env(
        || {
            panic::catch_unwind(|| {
                clear_config_vars();
                unsafe {
                    env::set_var("APP_ENV", "production");
                }
                AppConfig::load()
            })
        },
        &CONFIG_VARS,
    );

    assert!(
        result.is_err(),
        "Production config loading should panic without API_URL"
    );
}

#[test]
#[serial]
fn test_app_config_production_uses_api_url() {
    let config = run_with_env(
        || {
            clear_config_vars();
            unsafe {
                env::set_var("APP_ENV", "production");
                env::set_var("API_URL", "https://api.example.com/api/");
            }
            AppConfig::load()
        },
        &CONFIG_VARS,
    );

    assert_eq!(config.env, Env::Production);
    // Trailing slash trimmed so endpoints can be appended.
    assert_eq!(config.api_base, "https://api.example.com/api");
    assert!(config.secure_cookies());
}

#[test]
#[serial]
fn test_app_config_local_env_defaults() {
    let config = run_with_env(
        || {
            clear_config_vars();
            AppConfig::load()
        },
        &CONFIG_VARS,
    );

    assert_eq!(config.env, Env::Local);
    assert_eq!(config.api_base, "http://localhost:8080/api");
    assert_eq!(config.bind_addr, "0.0.0.0:3000");
    assert_eq!(config.request_timeout, Duration::from_secs(30));
    assert!(!config.secure_cookies());
}

#[test]
#[serial]
fn test_app_config_local_falls_back_to_public_api_url() {
    let config = run_with_env(
        || {
            clear_config_vars();
            unsafe {
                env::set_var("APP_ENV", "local");
                env::set_var("NEXT_PUBLIC_API_URL", "http://127.0.0.1:9000/api");
                env::set_var("REQUEST_TIMEOUT_SECS", "5");
                env::set_var("BIND_ADDR", "127.0.0.1:4000");
            }
            AppConfig::load()
        },
        &CONFIG_VARS,
    );

    assert_eq!(config.api_base, "http://127.0.0.1:9000/api");
    assert_eq!(config.request_timeout, Duration::from_secs(5));
    assert_eq!(config.bind_addr, "127.0.0.1:4000");
}

#[test]
#[serial]
fn test_app_config_ignores_malformed_timeout() {
    let config = run_with_env(
        || {
            clear_config_vars();
            unsafe {
                env::set_var("REQUEST_TIMEOUT_SECS", "soon");
            }
            AppConfig::load()
        },
        &CONFIG_VARS,
    );

    assert_eq!(config.request_timeout, Duration::from_secs(30));
}

#[test]
fn test_default_config_is_local() {
    let config = AppConfig::default();
    assert_eq!(config.env, Env::Local);
    assert!(!config.secure_cookies());
}
