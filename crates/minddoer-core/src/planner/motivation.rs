//! Templated motivational message keyed on mood and task ownership.

use indoc::formatdoc;

use crate::context::MoodLevel;
use crate::task::Task;

/// Tone of the opening line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoodTier {
    /// Mood 4-5
    Upbeat,
    /// Mood 3
    Neutral,
    /// Mood 1-2
    Empathetic,
}

impl MoodTier {
    pub fn from_mood(mood: MoodLevel) -> Self {
        match mood.value() {
            4.. => MoodTier::Upbeat,
            ..=2 => MoodTier::Empathetic,
            _ => MoodTier::Neutral,
        }
    }

    fn opener(self, name: &str) -> String {
        match self {
            MoodTier::Upbeat => format!("🌟 Hey {name}! You're radiating positive energy today!"),
            MoodTier::Empathetic => format!(
                "💙 Hi {name}, I see you're having a tough day. That's completely okay."
            ),
            MoodTier::Neutral => format!("✨ Hello {name}! Ready to make today count?"),
        }
    }
}

/// Compose the message for `name`.
///
/// `user_tasks` is the user-authored subset of the current list; when it is
/// non-empty the body acknowledges the user's ownership of the plan.
pub fn compose_motivation(name: &str, mood: MoodLevel, user_tasks: &[&Task]) -> String {
    let opener = MoodTier::from_mood(mood).opener(name);

    if user_tasks.is_empty() {
        formatdoc! {"
            {opener}

            I've created a personalized plan based on your goals and energy level.

            🎯 Each task is designed to match your current state
            💪 You've got the energy to tackle these challenges
            🌱 Small steps today lead to big wins tomorrow

            You've got this, {name}!
        "}
    } else {
        formatdoc! {"
            {opener}

            I love that you've added {count} of your own tasks! That shows real ownership of your goals.

            🎯 Your personal tasks show you know what matters to you.
            💪 I've added a few suggestions to complement your plan.
            🌱 Remember: you're in control of your day!

            Let's make it happen together!
        ", count = user_tasks.len()}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskSpec;

    fn mood(value: u8) -> MoodLevel {
        MoodLevel::try_from(value).unwrap()
    }

    #[test]
    fn tiers_follow_mood_scale() {
        assert_eq!(MoodTier::from_mood(mood(1)), MoodTier::Empathetic);
        assert_eq!(MoodTier::from_mood(mood(2)), MoodTier::Empathetic);
        assert_eq!(MoodTier::from_mood(mood(3)), MoodTier::Neutral);
        assert_eq!(MoodTier::from_mood(mood(4)), MoodTier::Upbeat);
        assert_eq!(MoodTier::from_mood(mood(5)), MoodTier::Upbeat);
    }

    #[test]
    fn upbeat_without_user_tasks() {
        let message = compose_motivation("Ada", mood(5), &[]);
        assert!(message.starts_with("🌟 Hey Ada!"));
        assert!(message.contains("I've created a personalized plan"));
        assert!(message.trim_end().ends_with("You've got this, Ada!"));
    }

    #[test]
    fn empathetic_with_user_tasks() {
        let a = Task::from_spec(TaskSpec::new("Laundry"));
        let b = Task::from_spec(TaskSpec::new("Call the bank"));
        let message = compose_motivation("Ada", mood(1), &[&a, &b]);
        assert!(message.starts_with("💙 Hi Ada, I see you're having a tough day."));
        assert!(message.contains("you've added 2 of your own tasks"));
        assert!(message.contains("Let's make it happen together!"));
    }

    #[test]
    fn neutral_opener() {
        let message = compose_motivation("Ada", mood(3), &[]);
        assert!(message.starts_with("✨ Hello Ada! Ready to make today count?"));
    }

    #[test]
    fn message_is_multi_paragraph() {
        let message = compose_motivation("Ada", mood(3), &[]);
        assert!(message.matches("\n\n").count() >= 3);
    }
}
