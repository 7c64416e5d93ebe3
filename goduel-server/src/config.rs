use std::str::FromStr;
use std::time::Duration;

use chrono::TimeDelta;
use goduel_engine::{DEFAULT_BOARD_SIZE, DEFAULT_KOMI, ScoringRules};

use crate::models::time_controls::TimeControls;

pub const DEFAULT_PORT: u16 = 5000;
pub const MIN_BOARD_SIZE: u8 = 2;
pub const MAX_BOARD_SIZE: u8 = 25;

/// Server settings, read once from the environment at start-up.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub board_size: u8,
    pub komi: f64,
    pub scoring_rules: ScoringRules,
    pub time_controls: Option<TimeControls>,
    /// Sessions with no sockets and no activity for this long are evicted.
    pub session_idle: TimeDelta,
    /// Finished sessions are kept this long after the last move.
    pub finished_retention: TimeDelta,
    pub sweep_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: DEFAULT_PORT,
            board_size: DEFAULT_BOARD_SIZE,
            komi: DEFAULT_KOMI,
            scoring_rules: ScoringRules::default(),
            time_controls: None,
            session_idle: TimeDelta::seconds(3600),
            finished_retention: TimeDelta::seconds(300),
            sweep_interval: Duration::from_secs(30),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Unparseable or
    /// out-of-range values are logged and replaced by the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Config::default();

        let board_size = parse_or(&lookup, "BOARD_SIZE", defaults.board_size);
        let board_size = if (MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&board_size) {
            board_size
        } else {
            tracing::warn!(
                "BOARD_SIZE={board_size} outside {MIN_BOARD_SIZE}..={MAX_BOARD_SIZE}, using {}",
                defaults.board_size
            );
            defaults.board_size
        };

        let komi = parse_or(&lookup, "KOMI", defaults.komi);
        let komi = if komi.is_finite() {
            komi
        } else {
            tracing::warn!("KOMI={komi} is not a finite number, using {}", defaults.komi);
            defaults.komi
        };

        let time_controls = lookup("TIME_CONTROLS").and_then(|raw| match raw.parse() {
            Ok(tc) => Some(tc),
            Err(e) => {
                tracing::warn!("Ignoring TIME_CONTROLS={raw:?}: {e}");
                None
            }
        });

        Config {
            port: parse_or(&lookup, "PORT", defaults.port),
            board_size,
            komi,
            scoring_rules: parse_or(&lookup, "SCORING_RULES", defaults.scoring_rules),
            time_controls,
            session_idle: seconds_or(&lookup, "SESSION_IDLE_SECS", defaults.session_idle),
            finished_retention: seconds_or(
                &lookup,
                "FINISHED_RETENTION_SECS",
                defaults.finished_retention,
            ),
            sweep_interval: Duration::from_secs(parse_or(
                &lookup,
                "SWEEP_INTERVAL_SECS",
                defaults.sweep_interval.as_secs().max(1),
            ))
            .max(Duration::from_secs(1)),
        }
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Debug,
{
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().parse() {
        Ok(v) => v,
        Err(_) => {
            tracing::warn!("Ignoring {key}={raw:?}, using {default:?}");
            default
        }
    }
}

fn seconds_or(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: TimeDelta,
) -> TimeDelta {
    let secs: u32 = parse_or(lookup, key, default.num_seconds() as u32);
    TimeDelta::seconds(i64::from(secs))
}
