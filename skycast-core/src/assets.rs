//! Background asset table
//!
//! Maps a weather condition key (`weather[0].main`) and the day/night flag
//! carried by the icon code to a background video. The lookup is total:
//! condition keys outside the table fall back to [`NEUTRAL_PAIR`].

use std::fmt;
use std::path::PathBuf;

/// Condition keys with a dedicated entry in the table
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ConditionKey {
    Clear,
    Rain,
    Clouds,
    Haze,
    Thunderstorm,
    Squall,
    Drizzle,
    Fog,
    Mist,
    Snow,
    Smoke,
    Dust,
    Ash,
    Sand,
    Tornado,
    /// Anything the service sends that the table does not know yet
    Other(String),
}

impl ConditionKey {
    /// Every key with a table entry, in table order
    pub const KNOWN: [ConditionKey; 15] = [
        ConditionKey::Clear,
        ConditionKey::Rain,
        ConditionKey::Clouds,
        ConditionKey::Haze,
        ConditionKey::Thunderstorm,
        ConditionKey::Squall,
        ConditionKey::Drizzle,
        ConditionKey::Fog,
        ConditionKey::Mist,
        ConditionKey::Snow,
        ConditionKey::Smoke,
        ConditionKey::Dust,
        ConditionKey::Ash,
        ConditionKey::Sand,
        ConditionKey::Tornado,
    ];

    /// Parse `weather[0].main`. Matching is exact, as the service capitalizes keys.
    pub fn parse(main: &str) -> Self {
        match main {
            "Clear" => Self::Clear,
            "Rain" => Self::Rain,
            "Clouds" => Self::Clouds,
            "Haze" => Self::Haze,
            "Thunderstorm" => Self::Thunderstorm,
            "Squall" => Self::Squall,
            "Drizzle" => Self::Drizzle,
            "Fog" => Self::Fog,
            "Mist" => Self::Mist,
            "Snow" => Self::Snow,
            "Smoke" => Self::Smoke,
            "Dust" => Self::Dust,
            "Ash" => Self::Ash,
            "Sand" => Self::Sand,
            "Tornado" => Self::Tornado,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Clear => "Clear",
            Self::Rain => "Rain",
            Self::Clouds => "Clouds",
            Self::Haze => "Haze",
            Self::Thunderstorm => "Thunderstorm",
            Self::Squall => "Squall",
            Self::Drizzle => "Drizzle",
            Self::Fog => "Fog",
            Self::Mist => "Mist",
            Self::Snow => "Snow",
            Self::Smoke => "Smoke",
            Self::Dust => "Dust",
            Self::Ash => "Ash",
            Self::Sand => "Sand",
            Self::Tornado => "Tornado",
            Self::Other(s) => s,
        }
    }

    /// Day/night asset pair for this key
    pub fn pair(&self) -> AssetPair {
        match self {
            Self::Clear => AssetPair::new("dayClear.mp4", "nightClear.mp4"),
            Self::Rain => AssetPair::new("rainLeaves.mp4", "rainPigeons.mp4"),
            Self::Clouds => AssetPair::new("dayCloud.mp4", "nightCloud.mp4"),
            Self::Haze => AssetPair::new("haze.mp4", "nightCloud.mp4"),
            Self::Thunderstorm => AssetPair::new("thunderDay.mp4", "thunderNight.mp4"),
            Self::Squall => AssetPair::same("windy.mp4"),
            Self::Drizzle => AssetPair::same("drizzle.mp4"),
            Self::Fog => AssetPair::same("fog.mp4"),
            Self::Mist => AssetPair::same("mist.mp4"),
            Self::Snow => AssetPair::same("snow.mp4"),
            Self::Smoke | Self::Dust | Self::Ash | Self::Sand => AssetPair::same("fog.mp4"),
            Self::Tornado => AssetPair::same("tornado.mp4"),
            Self::Other(_) => NEUTRAL_PAIR,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl fmt::Display for ConditionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Day or night, as encoded in the icon's trailing letter
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeOfDay {
    Day,
    Night,
}

impl TimeOfDay {
    /// `"01d"` is day; anything not ending in `d` is night.
    pub fn from_icon(icon: &str) -> Self {
        if icon.ends_with('d') {
            TimeOfDay::Day
        } else {
            TimeOfDay::Night
        }
    }

    /// Position in an asset pair: 0 for day, 1 for night
    pub fn index(self) -> usize {
        match self {
            TimeOfDay::Day => 0,
            TimeOfDay::Night => 1,
        }
    }
}

/// Background videos for one condition
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AssetPair {
    pub day: &'static str,
    pub night: &'static str,
}

impl AssetPair {
    pub const fn new(day: &'static str, night: &'static str) -> Self {
        Self { day, night }
    }

    pub const fn same(file: &'static str) -> Self {
        Self {
            day: file,
            night: file,
        }
    }

    pub fn get(&self, time: TimeOfDay) -> &'static str {
        match time {
            TimeOfDay::Day => self.day,
            TimeOfDay::Night => self.night,
        }
    }
}

/// Fallback for condition keys outside the table
pub const NEUTRAL_PAIR: AssetPair = AssetPair::new("dayCloud.mp4", "nightCloud.mp4");

/// A resolved background asset
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Asset {
    pub file: &'static str,
    pub condition: ConditionKey,
    pub time_of_day: TimeOfDay,
}

impl Asset {
    /// True when the condition had no table entry and the neutral pair was used
    pub fn is_fallback(&self) -> bool {
        !self.condition.is_known()
    }
}

/// Resolve the background asset for a condition key and icon code.
pub fn resolve_asset(main: &str, icon: &str) -> Asset {
    let condition = ConditionKey::parse(main);
    let time_of_day = TimeOfDay::from_icon(icon);
    if !condition.is_known() {
        tracing::warn!(condition = %condition, "Unknown weather condition, using neutral asset");
    }
    Asset {
        file: condition.pair().get(time_of_day),
        condition,
        time_of_day,
    }
}

/// Locates asset files on disk
#[derive(Clone, Debug, Default)]
pub struct AssetCatalog {
    base_dir: Option<PathBuf>,
}

impl AssetCatalog {
    pub fn new(base_dir: Option<PathBuf>) -> Self {
        Self { base_dir }
    }

    /// Full path of an asset; the bare file name when no directory is configured
    pub fn path_of(&self, asset: &Asset) -> PathBuf {
        match &self.base_dir {
            Some(dir) => dir.join(asset.file),
            None => PathBuf::from(asset.file),
        }
    }
}
