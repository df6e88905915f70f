use anyhow::anyhow;
use std::{env, net::SocketAddr};

use crate::validation::FailurePolicy;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub max_body_bytes: usize,
    pub failure_policy: FailurePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            failure_policy: FailurePolicy::default(),
        }
    }
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr_raw =
            lookup("APP_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_addr_raw
            .parse()
            .map_err(|_| anyhow!("Invalid APP_BIND_ADDR value: {}", bind_addr_raw))?;

        let max_body_bytes = match lookup("MAX_BODY_BYTES") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| anyhow!("Invalid MAX_BODY_BYTES value: {}", raw))?,
            None => DEFAULT_MAX_BODY_BYTES,
        };

        let failure_policy = match lookup("VALIDATION_FAILURE_POLICY") {
            Some(raw) => raw
                .parse::<FailurePolicy>()
                .map_err(|err| anyhow!("Invalid VALIDATION_FAILURE_POLICY value: {}", err))?,
            None => FailurePolicy::default(),
        };

        Ok(Config {
            bind_addr,
            max_body_bytes,
            failure_policy,
        })
    }
}
