use std::env;

use anyhow::{Context, Result};

use crate::ballast::{DEFAULT_SIZE_BYTES, MIB};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Velikost ballastu v MiB. Default 100, minimum 1.
    pub size_mib: usize,

    /// Jestli po naplnění ballastu zalogovat RSS procesu.
    /// Default: true.
    pub report_rss: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let size_mib = lookup("BALLAST_SIZE_MIB")
            .map(|s| s.trim().parse::<usize>())
            .transpose()
            .context("BALLAST_SIZE_MIB parse error")?
            .unwrap_or(DEFAULT_SIZE_BYTES / MIB)
            .max(1); // 0 → prázdný ballast nedává smysl

        let report_rss = lookup("BALLAST_REPORT_RSS")
            .map(|s| parse_flag(&s))
            .unwrap_or(true);

        Ok(Self {
            size_mib,
            report_rss,
        })
    }

    pub fn size_bytes(&self) -> usize {
        self.size_mib.saturating_mul(MIB)
    }
}

fn parse_flag(raw: &str) -> bool {
    !matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}
