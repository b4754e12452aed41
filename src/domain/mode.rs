//! Overlay session modes

use std::fmt;
use std::str::FromStr;

/// What an overlay session captures. Fixed for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionMode {
    /// Drag a measurement line; nothing is exported unless requested
    #[default]
    Measure,
    /// Drag a measurement line, then drag the region to export with it
    MeasureThenRegion,
    /// Drag a region and export it
    Region,
}

impl SessionMode {
    /// Name used on the command line
    pub fn name(self) -> &'static str {
        match self {
            SessionMode::Measure => "measure",
            SessionMode::MeasureThenRegion => "measure-region",
            SessionMode::Region => "region",
        }
    }
}

impl fmt::Display for SessionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SessionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "measure" => Ok(SessionMode::Measure),
            "measure-region" | "measure-screenshot" => Ok(SessionMode::MeasureThenRegion),
            "region" | "region-screenshot" => Ok(SessionMode::Region),
            other => Err(format!(
                "unknown mode '{other}' (expected measure, measure-region or region)"
            )),
        }
    }
}
