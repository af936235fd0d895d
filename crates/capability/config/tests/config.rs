use batiment_config::{ClientConfig, ConfigError};
use std::time::Duration;

// 环境变量是进程级共享状态，所有断言放在同一个测试里顺序执行。
#[test]
fn load_config_from_env() {
    // Rust 2024 中 set_var 需要显式标注 unsafe（测试进程内可控）。
    unsafe {
        std::env::set_var("BATIMENT_API_URL", "http://api.local:9000/api/");
        std::env::set_var("BATIMENT_HTTP_TIMEOUT_SECONDS", "15");
        std::env::set_var("BATIMENT_WIZARD_ROLLBACK", "on");
        std::env::remove_var("BATIMENT_AUTH_TOKEN_FILE");
        std::env::remove_var("BATIMENT_DEFAULT_PAGE_SIZE");
        std::env::set_var("BATIMENT_DEV_SERVER_TOKEN", "dev-secret");
    }

    let config = ClientConfig::from_env().expect("config");
    assert_eq!(config.api_url, "http://api.local:9000/api");
    assert_eq!(config.http_timeout, Some(Duration::from_secs(15)));
    assert!(config.wizard_rollback);
    assert!(config.auth_token_file.is_none());
    assert_eq!(config.default_page_size, 20);
    assert_eq!(config.dev_server_token.as_deref(), Some("dev-secret"));

    unsafe {
        std::env::set_var("BATIMENT_DEFAULT_PAGE_SIZE", "abc");
    }
    let err = ClientConfig::from_env().expect_err("invalid");
    assert!(matches!(err, ConfigError::Invalid(key, _) if key == "BATIMENT_DEFAULT_PAGE_SIZE"));

    unsafe {
        std::env::remove_var("BATIMENT_DEFAULT_PAGE_SIZE");
        std::env::remove_var("BATIMENT_HTTP_TIMEOUT_SECONDS");
    }
    let config = ClientConfig::from_env().expect("config");
    assert!(config.http_timeout.is_none());
}
