//! User profile used to personalize generated text.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// How the user prefers to be motivated.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MotivationStyle {
    Encouraging,
    Direct,
    Analytical,
}

impl Default for MotivationStyle {
    fn default() -> Self {
        MotivationStyle::Encouraging
    }
}

impl FromStr for MotivationStyle {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "encouraging" => Ok(MotivationStyle::Encouraging),
            "direct" => Ok(MotivationStyle::Direct),
            "analytical" => Ok(MotivationStyle::Analytical),
            _ => Err(ValidationError::invalid(
                "motivation_style",
                format!("expected encouraging/direct/analytical, got '{s}'"),
            )),
        }
    }
}

impl fmt::Display for MotivationStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MotivationStyle::Encouraging => "encouraging",
            MotivationStyle::Direct => "direct",
            MotivationStyle::Analytical => "analytical",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SleepSchedule {
    pub bedtime: String,
    pub wake_time: String,
}

impl Default for SleepSchedule {
    fn default() -> Self {
        Self {
            bedtime: "11:00 PM".to_string(),
            wake_time: "7:00 AM".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkSchedule {
    pub days: Vec<String>,
    pub hours: Vec<String>,
}

impl Default for WorkSchedule {
    fn default() -> Self {
        Self {
            days: ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"]
                .iter()
                .map(|d| d.to_string())
                .collect(),
            hours: vec!["9 AM".to_string(), "5 PM".to_string()],
        }
    }
}

/// Who the plan is for. Never validated against the daily context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub timezone: String,
    #[serde(default)]
    pub sleep_schedule: SleepSchedule,
    #[serde(default)]
    pub work_schedule: WorkSchedule,
    #[serde(default)]
    pub gym_schedule: Vec<String>,
    #[serde(default)]
    pub personality_traits: Vec<String>,
    #[serde(default)]
    pub motivation_style: MotivationStyle,
}

impl UserProfile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: "User".to_string(),
            timezone: "Local".to_string(),
            sleep_schedule: SleepSchedule::default(),
            work_schedule: WorkSchedule::default(),
            gym_schedule: vec![
                "Monday".to_string(),
                "Wednesday".to_string(),
                "Friday".to_string(),
            ],
            personality_traits: vec!["motivated".to_string(), "goal-oriented".to_string()],
            motivation_style: MotivationStyle::Encouraging,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_matches_session_defaults() {
        let profile = UserProfile::new("Ada");
        assert_eq!(profile.name, "Ada");
        assert_eq!(profile.timezone, "Local");
        assert_eq!(profile.sleep_schedule.bedtime, "11:00 PM");
        assert_eq!(profile.work_schedule.days.len(), 5);
        assert_eq!(profile.gym_schedule, vec!["Monday", "Wednesday", "Friday"]);
        assert_eq!(profile.motivation_style, MotivationStyle::Encouraging);
    }

    #[test]
    fn motivation_style_parsing() {
        assert_eq!("Direct".parse::<MotivationStyle>().unwrap(), MotivationStyle::Direct);
        assert!("loud".parse::<MotivationStyle>().is_err());
    }
}
