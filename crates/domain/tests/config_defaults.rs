//! Full-document config parsing tests: an empty file, a realistic
//! config.toml, and the interaction between defaults and overrides.

use nandi_domain::config::{Config, ConfigSeverity, Environment};

#[test]
fn empty_document_yields_full_defaults() {
    let config: Config = toml::from_str("").unwrap();
    assert_eq!(config.environment, Environment::Development);
    assert_eq!(config.server.port, 8000);
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.llm.default_model, "gpt-4");
    assert_eq!(config.llm.max_retries, 3);
    assert_eq!(config.cache.ttl_minutes, 30);
    assert_eq!(config.prompts.path.to_str(), Some("prompts.json"));
}

#[test]
fn realistic_document_parses() {
    let raw = r#"
        environment = "production"

        [server]
        host = "0.0.0.0"
        port = 8000

        [server.cors]
        allowed_origins = ["https://nandi.app"]

        [llm]
        default_model = "gpt-4"
        max_retries = 3

        [[llm.providers]]
        id = "openai"
        base_url = "https://api.openai.com/v1"
        auth = { env = "OPENAI_API_KEY" }

        [cache]
        ttl_minutes = 30

        [prompts]
        path = "config/prompts.json"
    "#;
    let config: Config = toml::from_str(raw).unwrap();
    assert_eq!(config.environment, Environment::Production);
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.llm.providers.len(), 1);
    assert_eq!(config.llm.providers[0].id, "openai");
    assert_eq!(config.prompts.path.to_str(), Some("config/prompts.json"));

    // A fully specified config has no validation errors.
    let issues = config.validate();
    assert!(issues.iter().all(|i| i.severity != ConfigSeverity::Error));
}

#[test]
fn partial_section_keeps_sibling_defaults() {
    let raw = r#"
        [server]
        port = 9999
    "#;
    let config: Config = toml::from_str(raw).unwrap();
    assert_eq!(config.server.port, 9999);
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.cache.ttl_minutes, 30);
}

#[test]
fn config_round_trips_through_toml() {
    let config = Config::default();
    let serialized = toml::to_string(&config).unwrap();
    let reparsed: Config = toml::from_str(&serialized).unwrap();
    assert_eq!(reparsed.server.port, config.server.port);
    assert_eq!(reparsed.llm.default_model, config.llm.default_model);
}
