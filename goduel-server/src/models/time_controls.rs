use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Byo-yomi clock settings advertised with an open session, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeControls {
    pub main_time: u32,
    pub byo_yomi: u32,
    pub periods: u32,
}

impl fmt::Display for TimeControls {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+{}/{}", self.main_time, self.byo_yomi, self.periods)
    }
}

/// Parses `main+byoyomi/periods`, e.g. `600+30/5`.
impl FromStr for TimeControls {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (main, rest) = s
            .trim()
            .split_once('+')
            .ok_or_else(|| format!("expected main+byoyomi/periods, got {s:?}"))?;
        let (byo_yomi, periods) = rest
            .split_once('/')
            .ok_or_else(|| format!("expected main+byoyomi/periods, got {s:?}"))?;

        let number = |part: &str| {
            part.parse::<u32>()
                .map_err(|_| format!("invalid number {part:?} in {s:?}"))
        };

        Ok(TimeControls {
            main_time: number(main)?,
            byo_yomi: number(byo_yomi)?,
            periods: number(periods)?,
        })
    }
}
