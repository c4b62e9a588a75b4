use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Hosting platform a recording comes from.
///
/// The platform decides which lifecycle state machine drives round detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DemoSource {
    #[serde(rename = "cevo")]
    Cevo,
    #[serde(rename = "challengermode")]
    Challengermode,
    #[serde(rename = "ebot")]
    Ebot,
    #[serde(rename = "esea")]
    Esea,
    #[serde(rename = "esl")]
    Esl,
    #[serde(rename = "esplay")]
    Esplay,
    #[serde(rename = "esportal")]
    Esportal,
    #[serde(rename = "faceit")]
    Faceit,
    #[serde(rename = "fastcup")]
    Fastcup,
    #[serde(rename = "5eplay")]
    FiveEPlay,
    #[serde(rename = "gamersclub")]
    Gamersclub,
    #[serde(rename = "matchzy")]
    MatchZy,
    /// "Perfect World" is the company operating the game in China.
    #[serde(rename = "perfectworld")]
    PerfectWorld,
    #[serde(rename = "popflash")]
    PopFlash,
    #[serde(rename = "renown")]
    Renown,
    #[serde(rename = "valve")]
    Valve,
    #[serde(rename = "unknown")]
    Unknown,
}

/// Sources with reliable round detection.
pub const SUPPORTED_SOURCES: &[DemoSource] = &[
    DemoSource::Challengermode,
    DemoSource::Ebot,
    DemoSource::Esea,
    DemoSource::Esl,
    DemoSource::Esplay,
    DemoSource::Esportal,
    DemoSource::Faceit,
    DemoSource::Fastcup,
    DemoSource::FiveEPlay,
    DemoSource::PerfectWorld,
    DemoSource::PopFlash,
    DemoSource::Renown,
    DemoSource::Valve,
    DemoSource::MatchZy,
];

impl DemoSource {
    pub fn is_supported(self) -> bool {
        SUPPORTED_SOURCES.contains(&self)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DemoSource::Cevo => "cevo",
            DemoSource::Challengermode => "challengermode",
            DemoSource::Ebot => "ebot",
            DemoSource::Esea => "esea",
            DemoSource::Esl => "esl",
            DemoSource::Esplay => "esplay",
            DemoSource::Esportal => "esportal",
            DemoSource::Faceit => "faceit",
            DemoSource::Fastcup => "fastcup",
            DemoSource::FiveEPlay => "5eplay",
            DemoSource::Gamersclub => "gamersclub",
            DemoSource::MatchZy => "matchzy",
            DemoSource::PerfectWorld => "perfectworld",
            DemoSource::PopFlash => "popflash",
            DemoSource::Renown => "renown",
            DemoSource::Valve => "valve",
            DemoSource::Unknown => "unknown",
        }
    }
}

impl fmt::Display for DemoSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DemoSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let source = match s {
            "cevo" => DemoSource::Cevo,
            "challengermode" => DemoSource::Challengermode,
            "ebot" => DemoSource::Ebot,
            "esea" => DemoSource::Esea,
            "esl" => DemoSource::Esl,
            "esplay" => DemoSource::Esplay,
            "esportal" => DemoSource::Esportal,
            "faceit" => DemoSource::Faceit,
            "fastcup" => DemoSource::Fastcup,
            "5eplay" => DemoSource::FiveEPlay,
            "gamersclub" => DemoSource::Gamersclub,
            "matchzy" => DemoSource::MatchZy,
            "perfectworld" => DemoSource::PerfectWorld,
            "popflash" => DemoSource::PopFlash,
            "renown" => DemoSource::Renown,
            "valve" => DemoSource::Valve,
            _ => return Err(format!("unknown demo source: {}", s)),
        };
        Ok(source)
    }
}
