use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which flavour of the network the external client talks to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Legacy,
    Mainnet,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Legacy => "legacy",
            Mode::Mainnet => "mainnet",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is neither `legacy` nor `mainnet`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMode(pub String);

impl FromStr for Mode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "legacy" => Ok(Mode::Legacy),
            "mainnet" => Ok(Mode::Mainnet),
            other => Err(UnknownMode(other.to_string())),
        }
    }
}
