//! Daily context: the day's mood, energy, stress and available time.
//!
//! Values arrive pre-validated; the `TryFrom` parsers are for the input
//! boundary (console prompts, CLI flags, JSON files).

use chrono::{Duration, Local, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;

/// Minutes of capacity credited to each declared time block.
pub const BLOCK_CAPACITY_MINUTES: i64 = 120;

/// Upper bound on the hours [`TimeBlock::from_available_hours`] will lay out.
pub const MAX_AVAILABLE_HOURS: u32 = 24;

/// Self-reported mood on a 1-5 scale.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "u8", into = "u8")]
pub enum MoodLevel {
    VeryLow = 1,
    Low = 2,
    Neutral = 3,
    Good = 4,
    Excellent = 5,
}

impl MoodLevel {
    pub fn value(self) -> u8 {
        self as u8
    }

    /// Upper-case label used in the insight header.
    pub fn name(self) -> &'static str {
        match self {
            MoodLevel::VeryLow => "VERY_LOW",
            MoodLevel::Low => "LOW",
            MoodLevel::Neutral => "NEUTRAL",
            MoodLevel::Good => "GOOD",
            MoodLevel::Excellent => "EXCELLENT",
        }
    }
}

impl Default for MoodLevel {
    fn default() -> Self {
        MoodLevel::Neutral
    }
}

impl TryFrom<u8> for MoodLevel {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(MoodLevel::VeryLow),
            2 => Ok(MoodLevel::Low),
            3 => Ok(MoodLevel::Neutral),
            4 => Ok(MoodLevel::Good),
            5 => Ok(MoodLevel::Excellent),
            other => Err(ValidationError::invalid("mood", format!("expected 1-5, got {other}"))),
        }
    }
}

impl From<MoodLevel> for u8 {
    fn from(mood: MoodLevel) -> Self {
        mood.value()
    }
}

impl fmt::Display for MoodLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Self-reported energy on a 1-5 scale.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "u8", into = "u8")]
pub enum EnergyLevel {
    Exhausted = 1,
    Low = 2,
    Moderate = 3,
    High = 4,
    Peak = 5,
}

impl EnergyLevel {
    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            EnergyLevel::Exhausted => "EXHAUSTED",
            EnergyLevel::Low => "LOW",
            EnergyLevel::Moderate => "MODERATE",
            EnergyLevel::High => "HIGH",
            EnergyLevel::Peak => "PEAK",
        }
    }
}

impl Default for EnergyLevel {
    fn default() -> Self {
        EnergyLevel::Moderate
    }
}

impl TryFrom<u8> for EnergyLevel {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(EnergyLevel::Exhausted),
            2 => Ok(EnergyLevel::Low),
            3 => Ok(EnergyLevel::Moderate),
            4 => Ok(EnergyLevel::High),
            5 => Ok(EnergyLevel::Peak),
            other => Err(ValidationError::invalid("energy", format!("expected 1-5, got {other}"))),
        }
    }
}

impl From<EnergyLevel> for u8 {
    fn from(energy: EnergyLevel) -> Self {
        energy.value()
    }
}

impl fmt::Display for EnergyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Stress level on a 1-10 scale.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "u8", into = "u8")]
pub struct StressLevel(u8);

impl StressLevel {
    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for StressLevel {
    fn default() -> Self {
        StressLevel(5)
    }
}

impl TryFrom<u8> for StressLevel {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (1..=10).contains(&value) {
            Ok(StressLevel(value))
        } else {
            Err(ValidationError::invalid(
                "stress_level",
                format!("expected 1-10, got {value}"),
            ))
        }
    }
}

impl From<StressLevel> for u8 {
    fn from(stress: StressLevel) -> Self {
        stress.0
    }
}

impl fmt::Display for StressLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A window of free time. Blocks carry full date-times so a window that runs
/// past midnight still sorts after the one before it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeBlock {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeBlock {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        TimeBlock { start, end }
    }

    /// Split `hours` of availability starting at `start` into blocks of at
    /// most two hours. The last block is shorter when `hours` is odd.
    /// `hours` is capped at [`MAX_AVAILABLE_HOURS`].
    pub fn from_available_hours(start: NaiveDateTime, hours: u32) -> Vec<TimeBlock> {
        let hours = hours.min(MAX_AVAILABLE_HOURS);
        (0..hours)
            .step_by(2)
            .map(|offset| {
                let span = (hours - offset).min(2);
                let block_start = start + Duration::hours(i64::from(offset));
                let block_end = block_start + Duration::hours(i64::from(span));
                TimeBlock::new(block_start, block_end)
            })
            .collect()
    }

    /// Blocks for `hours` of availability starting at the top of the current
    /// local hour.
    pub fn starting_this_hour(hours: u32) -> Vec<TimeBlock> {
        let now = Local::now().naive_local();
        let start = now
            .date()
            .and_hms_opt(now.hour(), 0, 0)
            .unwrap_or(now);
        Self::from_available_hours(start, hours)
    }
}

impl fmt::Display for TimeBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            self.start.format("%I:%M %p"),
            self.end.format("%I:%M %p")
        )
    }
}

/// The day's signals fed into the planning pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyContext {
    pub date: NaiveDate,
    pub mood: MoodLevel,
    pub energy: EnergyLevel,
    /// Assumed non-overlapping and chronologically ordered
    #[serde(default)]
    pub available_time_blocks: Vec<TimeBlock>,
    pub stress_level: StressLevel,
    #[serde(default)]
    pub weather: Option<String>,
}

impl DailyContext {
    /// Context for today with no available time.
    pub fn today(mood: MoodLevel, energy: EnergyLevel, stress_level: StressLevel) -> Self {
        DailyContext {
            date: Local::now().date_naive(),
            mood,
            energy,
            available_time_blocks: Vec::new(),
            stress_level,
            weather: None,
        }
    }

    pub fn with_blocks(mut self, blocks: Vec<TimeBlock>) -> Self {
        self.available_time_blocks = blocks;
        self
    }

    pub fn with_weather(mut self, weather: impl Into<String>) -> Self {
        self.weather = Some(weather.into());
        self
    }

    /// Planning capacity: a flat two hours per declared block, whatever the
    /// block's actual span.
    pub fn available_minutes(&self) -> i64 {
        self.available_time_blocks.len() as i64 * BLOCK_CAPACITY_MINUTES
    }
}
