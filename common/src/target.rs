//! # Probe Target List
//!
//! Destinations are kept as the text the user typed. They are not validated
//! here: an entry that is not an IP address is still probed and ends up as a
//! dial error on its own result line.

use std::str::FromStr;

use crate::error::ConfigError;

/// Ordered, non-empty list of destinations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetList {
    targets: Vec<String>,
}

impl TargetList {
    pub fn new<I, S>(targets: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let targets: Vec<String> = targets
            .into_iter()
            .map(Into::<String>::into)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();

        if targets.is_empty() {
            return Err(ConfigError::EmptyTargets);
        }
        Ok(Self { targets })
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.targets.iter().map(String::as_str)
    }
}

impl FromStr for TargetList {
    type Err = ConfigError;

    /// Parses a comma-separated list (e.g., "10.0.0.1, 10.0.0.2").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_commas(s)
    }
}

/// Splits on commas, trims every entry and drops the blank ones.
pub fn parse_commas(s: &str) -> Result<TargetList, ConfigError> {
    TargetList::new(s.split(','))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
