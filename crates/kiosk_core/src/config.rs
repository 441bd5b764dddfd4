use std::{fs, io, path::Path, time::Duration};

use anyhow::{bail, Context};
use serde::Deserialize;
use url::Url;

pub const DEFAULT_LOOKUP_URL: &str = "http://127.0.0.1:5000/get-prescription";

/// Delays of the simulated payment, dispense and completion screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowTimings {
    pub payment_processing: Duration,
    pub payment_handoff: Duration,
    pub dispense_tick: Duration,
    pub dispense_finish: Duration,
    pub countdown_step: Duration,
    pub countdown_start: u32,
}

impl Default for FlowTimings {
    fn default() -> Self {
        Self {
            payment_processing: Duration::from_millis(2000),
            payment_handoff: Duration::from_millis(1500),
            dispense_tick: Duration::from_millis(500),
            dispense_finish: Duration::from_millis(2000),
            countdown_step: Duration::from_millis(1000),
            countdown_start: crate::completion::COUNTDOWN_START,
        }
    }
}

#[derive(Debug, Clone)]
pub struct KioskConfig {
    pub lookup_url: Url,
    pub request_timeout: Option<Duration>,
    pub timings: FlowTimings,
}

impl KioskConfig {
    pub fn new(lookup_url: Url) -> Self {
        Self {
            lookup_url,
            request_timeout: None,
            timings: FlowTimings::default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    lookup_url: Option<String>,
    request_timeout_ms: Option<u64>,
    payment_processing_ms: Option<u64>,
    payment_handoff_ms: Option<u64>,
    dispense_tick_ms: Option<u64>,
    dispense_finish_ms: Option<u64>,
    countdown_step_ms: Option<u64>,
    countdown_start: Option<u32>,
}

pub fn load_config() -> anyhow::Result<KioskConfig> {
    load_config_from(Path::new("kiosk.toml"))
}

/// Defaults, then `path` if it exists, then the process environment.
pub fn load_config_from(path: &Path) -> anyhow::Result<KioskConfig> {
    let mut raw = read_file_config(path)?;
    apply_env(&mut raw, |key| std::env::var(key).ok())?;
    build_config(raw)
}

fn read_file_config(path: &Path) -> anyhow::Result<FileConfig> {
    match fs::read_to_string(path) {
        Ok(text) => toml::from_str::<FileConfig>(&text)
            .with_context(|| format!("failed to parse '{}'", path.display())),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(FileConfig::default()),
        Err(err) => {
            Err(err).with_context(|| format!("failed to read config '{}'", path.display()))
        }
    }
}

fn apply_env(
    raw: &mut FileConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<()> {
    for key in ["KIOSK_LOOKUP_URL", "APP__LOOKUP_URL"] {
        if let Some(v) = lookup(key) {
            raw.lookup_url = Some(v);
        }
    }
    for key in ["KIOSK_REQUEST_TIMEOUT_MS", "APP__REQUEST_TIMEOUT_MS"] {
        if let Some(v) = lookup(key) {
            raw.request_timeout_ms = Some(parse_env(key, &v)?);
        }
    }

    let timings: [(&str, &mut Option<u64>); 5] = [
        ("APP__PAYMENT_PROCESSING_MS", &mut raw.payment_processing_ms),
        ("APP__PAYMENT_HANDOFF_MS", &mut raw.payment_handoff_ms),
        ("APP__DISPENSE_TICK_MS", &mut raw.dispense_tick_ms),
        ("APP__DISPENSE_FINISH_MS", &mut raw.dispense_finish_ms),
        ("APP__COUNTDOWN_STEP_MS", &mut raw.countdown_step_ms),
    ];
    for (key, slot) in timings {
        if let Some(v) = lookup(key) {
            *slot = Some(parse_env(key, &v)?);
        }
    }
    if let Some(v) = lookup("APP__COUNTDOWN_START") {
        raw.countdown_start = Some(parse_env("APP__COUNTDOWN_START", &v)?);
    }
    Ok(())
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> anyhow::Result<T> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| anyhow::anyhow!("{key} must be a non-negative integer, got '{value}'"))
}

fn build_config(raw: FileConfig) -> anyhow::Result<KioskConfig> {
    let url = raw.lookup_url.as_deref().unwrap_or(DEFAULT_LOOKUP_URL).trim();
    let lookup_url = Url::parse(url).with_context(|| format!("invalid lookup url '{url}'"))?;
    let mut config = KioskConfig::new(lookup_url);

    if !matches!(config.lookup_url.scheme(), "http" | "https") {
        bail!("lookup url must use http or https: {}", config.lookup_url);
    }
    config.request_timeout = raw
        .request_timeout_ms
        .filter(|ms| *ms > 0)
        .map(Duration::from_millis);

    let timings = &mut config.timings;
    let overrides = [
        (raw.payment_processing_ms, &mut timings.payment_processing),
        (raw.payment_handoff_ms, &mut timings.payment_handoff),
        (raw.dispense_tick_ms, &mut timings.dispense_tick),
        (raw.dispense_finish_ms, &mut timings.dispense_finish),
        (raw.countdown_step_ms, &mut timings.countdown_step),
    ];
    for (value, slot) in overrides {
        if let Some(ms) = value {
            *slot = Duration::from_millis(ms);
        }
    }
    if let Some(start) = raw.countdown_start {
        timings.countdown_start = start;
    }

    if timings.countdown_start == 0 {
        bail!("countdown_start must be at least 1");
    }
    if timings.dispense_tick.is_zero() || timings.countdown_step.is_zero() {
        bail!("dispense_tick_ms and countdown_step_ms must be greater than zero");
    }

    Ok(config)
}
