use std::env;
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use crate::error::{invalid_input_error, Error};

const DEFAULT_MOBILITY_API_BASE: &str = "https://apis-navi.kakaomobility.com";
const DEFAULT_LOCAL_API_BASE: &str = "https://dapi.kakao.com";
const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_UPSTREAM_TIMEOUT_MS: u64 = 5000;

#[derive(Clone)]
pub struct Config {
    pub rest_api_key: String,
    pub mobility_api_base: String,
    pub local_api_base: String,
    pub listen_addr: SocketAddr,
    /// Applied to every call the proxy makes to Kakao.
    pub upstream_timeout: Duration,
}

impl Config {
    /// Reads the proxy configuration from the environment. `.env` is expected
    /// to have been loaded by the caller.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| env::var(key))
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Result<String, env::VarError>,
    {
        let rest_api_key = lookup("KAKAO_REST_API_KEY")?;

        let mobility_api_base = lookup("KAKAO_MOBILITY_API_BASE")
            .unwrap_or_else(|_| DEFAULT_MOBILITY_API_BASE.into());
        let local_api_base =
            lookup("KAKAO_LOCAL_API_BASE").unwrap_or_else(|_| DEFAULT_LOCAL_API_BASE.into());

        let listen_addr = lookup("LISTEN_ADDR")
            .unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.into())
            .parse()
            .map_err(|_| invalid_input_error())?;

        let upstream_timeout = match lookup("UPSTREAM_TIMEOUT_MS") {
            Ok(ms) => Duration::from_millis(ms.parse().map_err(|_| invalid_input_error())?),
            Err(_) => Duration::from_millis(DEFAULT_UPSTREAM_TIMEOUT_MS),
        };

        Ok(Self {
            rest_api_key,
            mobility_api_base: trim_base(mobility_api_base),
            local_api_base: trim_base(local_api_base),
            listen_addr,
            upstream_timeout,
        })
    }

    pub fn new(rest_api_key: impl Into<String>) -> Self {
        Self {
            rest_api_key: rest_api_key.into(),
            mobility_api_base: DEFAULT_MOBILITY_API_BASE.into(),
            local_api_base: DEFAULT_LOCAL_API_BASE.into(),
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            upstream_timeout: Duration::from_millis(DEFAULT_UPSTREAM_TIMEOUT_MS),
        }
    }

    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        let base = trim_base(base.into());
        self.mobility_api_base = base.clone();
        self.local_api_base = base;
        self
    }

    pub fn authorization(&self) -> String {
        format!("KakaoAK {}", self.rest_api_key)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("rest_api_key", &"<redacted>")
            .field("mobility_api_base", &self.mobility_api_base)
            .field("local_api_base", &self.local_api_base)
            .field("listen_addr", &self.listen_addr)
            .field("upstream_timeout", &self.upstream_timeout)
            .finish()
    }
}

fn trim_base(base: String) -> String {
    base.trim_end_matches('/').to_string()
}

#[test]
fn authorization_header_uses_kakao_scheme() {
    let config = Config::new("secret");
    assert_eq!(config.authorization(), "KakaoAK secret");
}

#[test]
fn debug_output_hides_the_key() {
    let config = Config::new("secret");
    assert!(!format!("{:?}", config).contains("secret"));
}

#[test]
fn api_base_override_drops_trailing_slash() {
    let config = Config::new("secret").with_api_base("http://127.0.0.1:9000/");
    assert_eq!(config.mobility_api_base, "http://127.0.0.1:9000");
    assert_eq!(config.local_api_base, "http://127.0.0.1:9000");
}

#[cfg(test)]
fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Result<String, env::VarError> {
    let vars: std::collections::HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    move |key| vars.get(key).cloned().ok_or(env::VarError::NotPresent)
}

#[test]
fn defaults_apply_when_only_the_key_is_set() {
    let config = Config::from_lookup(lookup_from(&[("KAKAO_REST_API_KEY", "secret")]))
        .unwrap();

    assert_eq!(config.rest_api_key, "secret");
    assert_eq!(config.mobility_api_base, DEFAULT_MOBILITY_API_BASE);
    assert_eq!(config.local_api_base, DEFAULT_LOCAL_API_BASE);
    assert_eq!(config.listen_addr, SocketAddr::from(([127, 0, 0, 1], 3000)));
    assert_eq!(
        config.upstream_timeout,
        Duration::from_millis(DEFAULT_UPSTREAM_TIMEOUT_MS)
    );
}

#[test]
fn environment_overrides_defaults() {
    let config = Config::from_lookup(lookup_from(&[
        ("KAKAO_REST_API_KEY", "secret"),
        ("KAKAO_MOBILITY_API_BASE", "http://navi.test/"),
        ("KAKAO_LOCAL_API_BASE", "http://local.test"),
        ("LISTEN_ADDR", "0.0.0.0:8080"),
        ("UPSTREAM_TIMEOUT_MS", "250"),
    ]))
    .unwrap();

    assert_eq!(config.mobility_api_base, "http://navi.test");
    assert_eq!(config.local_api_base, "http://local.test");
    assert_eq!(config.listen_addr, SocketAddr::from(([0, 0, 0, 0], 8080)));
    assert_eq!(config.upstream_timeout, Duration::from_millis(250));
}

#[test]
fn missing_key_is_an_env_var_error() {
    let result = Config::from_lookup(lookup_from(&[]));
    assert_eq!(result.unwrap_err().code, 1);
}

#[test]
fn unparsable_values_are_rejected() {
    let result = Config::from_lookup(lookup_from(&[
        ("KAKAO_REST_API_KEY", "secret"),
        ("LISTEN_ADDR", "not-an-address"),
    ]));
    assert_eq!(result.unwrap_err(), invalid_input_error());

    let result = Config::from_lookup(lookup_from(&[
        ("KAKAO_REST_API_KEY", "secret"),
        ("UPSTREAM_TIMEOUT_MS", "five seconds"),
    ]));
    assert_eq!(result.unwrap_err(), invalid_input_error());
}
