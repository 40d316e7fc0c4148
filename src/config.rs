use dotenvy::dotenv;
use std::env;

use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub database_path: String,
    pub latency_min_ms: u64,
    pub latency_max_ms: u64,
    pub error_rate: f64,
    pub seed_jobs: usize,
    pub seed_candidates: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_address: "127.0.0.1:3000".to_string(),
            database_path: "talentflow.db".to_string(),
            latency_min_ms: 200,
            latency_max_ms: 1200,
            error_rate: 0.07,
            seed_jobs: 25,
            seed_candidates: 1000,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        let defaults = Config::default();

        Ok(Self {
            server_address: get_env_or("SERVER_ADDRESS", defaults.server_address),
            database_path: get_env_or("DATABASE_PATH", defaults.database_path),
            latency_min_ms: get_env_parse("LATENCY_MIN_MS", defaults.latency_min_ms)?,
            latency_max_ms: get_env_parse("LATENCY_MAX_MS", defaults.latency_max_ms)?,
            error_rate: get_env_parse("ERROR_RATE", defaults.error_rate)?,
            seed_jobs: get_env_parse("SEED_JOBS", defaults.seed_jobs)?,
            seed_candidates: get_env_parse("SEED_CANDIDATES", defaults.seed_candidates)?,
        })
    }
}

fn get_env_or(name: &str, default: String) -> String {
    env::var(name).unwrap_or(default)
}

fn get_env_parse<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}
