//! Environment loading and validation of DeckConfig

use deck::{DebugLevel, DeckConfig};
use std::collections::HashMap;

fn load(vars: &[(&str, &str)]) -> Result<DeckConfig, deck::ValidationError> {
    let vars: HashMap<String, String> =
        vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    DeckConfig::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn empty_environment_uses_defaults() {
    let config = load(&[]).unwrap();
    assert_eq!(config, DeckConfig::default());
    assert_eq!(config.nasa.base_url, "https://images-api.nasa.gov");
    assert_eq!(config.workflow.max_iterations, 40);
    assert_eq!(config.workflow.max_search_results, 8);
    assert_eq!(config.workflow.max_candidates, 5);
}

#[test]
fn environment_overrides_every_section() {
    let config = load(&[
        ("DECK_APIM_ENDPOINT", "https://gateway.azure-api.net/openai/"),
        ("DECK_APIM_KEY", "secret"),
        ("DECK_DEPLOYMENT", "gpt-4o"),
        ("DECK_TEMPERATURE", "0.2"),
        ("DECK_MAX_ATTEMPTS", "4"),
        ("DECK_MAX_ITERATIONS", "20"),
        ("DECK_NASA_TIMEOUT_SECS", "10"),
        ("DECK_YEAR_START", "1990"),
        ("DECK_LOG_LEVEL", "debug"),
        ("DECK_DEBUG_LEVEL", "verbose"),
    ])
    .unwrap();

    assert_eq!(config.model.endpoint, "https://gateway.azure-api.net/openai");
    assert!(config.model.require_credentials().is_ok());
    assert_eq!(config.model.deployment, "gpt-4o");
    assert_eq!(config.model.temperature, Some(0.2));
    assert_eq!(config.workflow.max_attempts, 4);
    assert_eq!(config.workflow.max_iterations, 20);
    assert_eq!(config.nasa.timeout_secs, 10);
    assert_eq!(config.nasa.year_start, 1990);
    assert_eq!(config.telemetry.log_level, "debug");
    assert_eq!(config.debug_level, DebugLevel::Verbose);
}

#[test]
fn malformed_numbers_name_the_variable() {
    let err = load(&[("DECK_MAX_ATTEMPTS", "ten")]).unwrap_err();
    assert_eq!(err.field, "max_attempts");
    assert!(err.message.contains("DECK_MAX_ATTEMPTS"));
    assert!(err.suggestion.is_some());
}

#[test]
fn out_of_range_values_are_rejected() {
    assert_eq!(load(&[("DECK_MAX_ATTEMPTS", "0")]).unwrap_err().field, "max_attempts");
    assert_eq!(load(&[("DECK_MAX_ITERATIONS", "5000")]).unwrap_err().field, "max_iterations");
    assert_eq!(load(&[("DECK_TEMPERATURE", "3.5")]).unwrap_err().field, "temperature");
    assert_eq!(load(&[("DECK_YEAR_START", "2030")]).unwrap_err().field, "year_start");
    assert_eq!(load(&[("DECK_NASA_BASE_URL", "images-api.nasa.gov")]).unwrap_err().field, "nasa_base_url");
    assert_eq!(load(&[("DECK_LOG_LEVEL", "loud")]).unwrap_err().field, "log_level");
}

#[test]
fn builder_validates_on_build() {
    let config = DeckConfig::builder()
        .endpoint("https://gateway.azure-api.net/openai", "secret")
        .max_attempts(3)
        .max_iterations(11)
        .debug_level(DebugLevel::Minimal)
        .build()
        .unwrap();
    assert_eq!(config.workflow.recommended_iterations(), 11);

    assert!(DeckConfig::builder().max_attempts(500).build().is_err());
    assert_eq!(DeckConfig::builder().max_attempts(500).build_unchecked().workflow.max_attempts, 500);
}

#[test]
fn attempt_budget_raises_an_unset_ceiling() {
    let config = load(&[("DECK_MAX_ATTEMPTS", "20")]).unwrap();
    assert_eq!(config.workflow.max_attempts, 20);
    assert_eq!(config.workflow.max_iterations, 62);

    let small = load(&[("DECK_MAX_ATTEMPTS", "3")]).unwrap();
    assert_eq!(small.workflow.max_iterations, 40);
}

#[test]
fn explicit_ceiling_below_attempt_budget_is_rejected() {
    let err = load(&[("DECK_MAX_ATTEMPTS", "20"), ("DECK_MAX_ITERATIONS", "40")]).unwrap_err();
    assert_eq!(err.field, "max_iterations");
    assert!(err.suggestion.unwrap().contains("62"));

    assert!(load(&[("DECK_MAX_ATTEMPTS", "20"), ("DECK_MAX_ITERATIONS", "62")]).is_ok());
}

#[test]
fn builder_attempts_keep_the_judge_reachable() {
    let config = DeckConfig::builder().max_attempts(20).build().unwrap();
    assert_eq!(config.workflow.max_iterations, 62);
    assert!(DeckConfig::builder().max_attempts(20).max_iterations(40).build().is_err());
}
