use std::sync::{Mutex, MutexGuard, OnceLock};
use tempfile::TempDir;

use crate::config::environment::{env_parse, env_string};
use crate::config::{Config, LlmProvider};

const MANAGED_VARS: &[&str] = &[
    "LEARNKIT_PROVIDER",
    "LEARNKIT_LLM_BASE_URL",
    "OPENAI_API_KEY",
    "OPENROUTER_API_KEY",
    "LEARNKIT_TIMEOUT_SECS",
    "LEARNKIT_MAX_TOKENS",
    "LEARNKIT_CHAT_MODEL",
    "LEARNKIT_IMAGE_MODEL",
    "LEARNKIT_BIND",
    "LEARNKIT_PORT",
];

fn env_lock<'a>() -> MutexGuard<'a, ()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

struct EnvGuard {
    saved: Vec<(String, Option<String>)>,
}

impl EnvGuard {
    /// Clears every managed variable, then applies `vars`.
    fn new(vars: &[(&str, Option<&str>)]) -> Self {
        let mut keys: Vec<&str> = MANAGED_VARS.to_vec();
        keys.extend(vars.iter().map(|(key, _)| *key));
        let saved = keys
            .iter()
            .map(|key| (key.to_string(), std::env::var(key).ok()))
            .collect::<Vec<_>>();
        for key in MANAGED_VARS {
            unsafe { std::env::remove_var(key) };
        }
        for (key, value) in vars {
            match value {
                Some(val) => unsafe { std::env::set_var(key, val) },
                None => unsafe { std::env::remove_var(key) },
            }
        }
        Self { saved }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, value) in self.saved.iter().rev() {
            match value {
                Some(val) => unsafe { std::env::set_var(key, val) },
                None => unsafe { std::env::remove_var(key) },
            }
        }
    }
}

fn temp_home() -> (TempDir, String) {
    let dir = TempDir::new().unwrap();
    let home = dir.path().to_str().unwrap().to_string();
    (dir, home)
}

#[test]
fn load_from_env_only() {
    let _lock = env_lock();
    let (_dir, home) = temp_home();

    let _env = EnvGuard::new(&[
        ("HOME", Some(home.as_str())),
        ("OPENAI_API_KEY", Some("env-key")),
        ("LEARNKIT_TIMEOUT_SECS", Some("45")),
        ("LEARNKIT_MAX_TOKENS", Some("4096")),
        ("LEARNKIT_CHAT_MODEL", Some("env-chat")),
        ("LEARNKIT_PORT", Some("9100")),
    ]);

    let config = Config::load().unwrap();
    assert_eq!(config.llm.provider, LlmProvider::OpenAi);
    assert_eq!(config.llm.api_key, "env-key");
    assert_eq!(config.llm.timeout_secs, 45);
    assert_eq!(config.models.max_tokens, 4096);
    assert_eq!(config.models.chat, "env-chat");
    assert_eq!(config.models.image, "dall-e-3");
    assert_eq!(config.server.port, 9100);
    assert_eq!(config.plan.default_steps, 7);
    assert_eq!(config.plan.default_resources, 5);
}

#[test]
fn load_prefers_env_over_file() {
    let _lock = env_lock();
    let (dir, home) = temp_home();
    let config_dir = dir.path().join(".learnkit");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config"),
        r#"{
            "llm": { "api_key": "file-key", "timeout_secs": 20 },
            "models": { "chat": "file-chat", "max_tokens": 1024 },
            "plan": { "default_steps": 5 }
        }"#,
    )
    .unwrap();

    let _env = EnvGuard::new(&[
        ("HOME", Some(home.as_str())),
        ("OPENAI_API_KEY", Some("env-key")),
        ("LEARNKIT_TIMEOUT_SECS", Some("40")),
    ]);

    let config = Config::load().unwrap();
    assert_eq!(config.llm.api_key, "env-key");
    assert_eq!(config.llm.timeout_secs, 40);
    assert_eq!(config.models.max_tokens, 1024);
    assert_eq!(config.models.chat, "file-chat");
    assert_eq!(config.plan.default_steps, 5);
}

#[test]
fn load_errors_without_api_key() {
    let _lock = env_lock();
    let (_dir, home) = temp_home();

    let _env = EnvGuard::new(&[("HOME", Some(home.as_str()))]);

    let err = Config::load().unwrap_err();
    assert!(err.to_string().contains("OpenAI API key not found"));
    assert!(err.to_string().contains("OPENAI_API_KEY"));
}

#[test]
fn blank_api_key_counts_as_missing() {
    let _lock = env_lock();
    let (_dir, home) = temp_home();

    let _env = EnvGuard::new(&[("HOME", Some(home.as_str())), ("OPENAI_API_KEY", Some("  "))]);

    assert!(Config::load().is_err());
    assert!(Config::load_unvalidated().is_ok());
}

#[test]
fn load_supports_openrouter_provider() {
    let _lock = env_lock();
    let (_dir, home) = temp_home();

    let _env = EnvGuard::new(&[
        ("HOME", Some(home.as_str())),
        ("LEARNKIT_PROVIDER", Some("openrouter")),
        ("OPENAI_API_KEY", Some("ignored")),
        ("OPENROUTER_API_KEY", Some("or-key")),
    ]);

    let config = Config::load().unwrap();
    assert_eq!(config.llm.provider, LlmProvider::OpenRouter);
    assert_eq!(config.llm.api_key, "or-key");
    assert_eq!(config.llm.base_url, "https://openrouter.ai/api/v1");
}

#[test]
fn rejects_out_of_policy_plan_defaults() {
    let _lock = env_lock();
    let (_dir, home) = temp_home();
    let _env = EnvGuard::new(&[("HOME", Some(home.as_str()))]);

    let config = Config::builder()
        .with_llm(|llm| llm.api_key = "key".to_string())
        .with_plan(|plan| plan.default_steps = 40)
        .build()
        .unwrap();

    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("default_steps"));
}

#[test]
fn rejects_zero_token_ceiling_and_usable_minimum() {
    let _lock = env_lock();
    let (_dir, home) = temp_home();
    let _env = EnvGuard::new(&[("HOME", Some(home.as_str()))]);

    let config = Config::builder()
        .with_llm(|llm| llm.api_key = "key".to_string())
        .with_models(|models| models.max_tokens = 0)
        .build()
        .unwrap();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("max_tokens"));

    let config = Config::builder()
        .with_llm(|llm| llm.api_key = "key".to_string())
        .with_plan(|plan| plan.min_usable_resources = 0)
        .build()
        .unwrap();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("min_usable_resources"));
}

#[test]
fn save_persists_nested_structure() {
    let _lock = env_lock();
    let (_dir, home) = temp_home();

    let _env = EnvGuard::new(&[("HOME", Some(home.as_str()))]);

    let mut config = Config::builder().build().unwrap();
    config.llm.api_key = "test-key".to_string();
    config.llm.timeout_secs = 55;
    config.models.chat = "custom/chat".to_string();
    config.server.port = 8088;
    config.plan.default_resources = 3;
    config.save().unwrap();

    let persisted = std::fs::read_to_string(Config::config_path().unwrap()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&persisted).unwrap();
    assert_eq!(json["llm"]["provider"], "openai");
    assert_eq!(json["llm"]["api_key"], "test-key");
    assert_eq!(json["llm"]["timeout_secs"], 55);
    assert_eq!(json["models"]["chat"], "custom/chat");
    assert_eq!(json["server"]["port"], 8088);
    assert_eq!(json["plan"]["default_resources"], 3);

    let reloaded = Config::load_unvalidated().unwrap();
    assert_eq!(reloaded.llm.api_key, "test-key");
    assert_eq!(reloaded.plan.default_resources, 3);
}

#[test]
fn env_helpers_parse_and_skip_blank_values() {
    let _lock = env_lock();
    let _env = EnvGuard::new(&[
        ("LEARNKIT_TEST_STRING", Some("value")),
        ("LEARNKIT_TEST_NUMBER", Some("123")),
        ("LEARNKIT_TEST_BLANK", Some("  ")),
        ("LEARNKIT_TEST_BAD", Some("abc")),
    ]);

    assert_eq!(env_string("LEARNKIT_TEST_STRING").unwrap(), Some("value".to_string()));
    assert_eq!(env_string("LEARNKIT_TEST_BLANK").unwrap(), None);
    assert_eq!(env_string("LEARNKIT_TEST_MISSING").unwrap(), None);
    assert_eq!(env_parse::<u64>("LEARNKIT_TEST_NUMBER").unwrap(), Some(123));
    assert!(env_parse::<u16>("LEARNKIT_TEST_BAD").is_err());
}
