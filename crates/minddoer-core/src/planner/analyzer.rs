//! Context analysis: a short human-readable reading of the day's signals.

use indoc::formatdoc;

use crate::context::DailyContext;

pub const HIGH_ENERGY_SIGNAL: &str = "✨ High energy day - great for challenging tasks!";
pub const LOW_ENERGY_SIGNAL: &str = "🌱 Low energy day - focus on gentle, nurturing activities";
pub const HIGH_STRESS_SIGNAL: &str = "🧘 High stress detected - prioritizing self-care";

/// Build the insight text for `context`.
///
/// The header lists the raw signals; each rule that fires appends one line.
/// Energy >= 4 and energy <= 2 cannot both hold, so at most one energy line
/// appears.
pub fn analyze_context(name: &str, context: &DailyContext) -> String {
    let mut insight = formatdoc! {"
        📊 Today's Context Analysis for {name}:
        - Mood: {mood}
        - Energy: {energy}
        - Available time: {blocks} blocks
        - Stress level: {stress}/10",
        name = name,
        mood = context.mood.name(),
        energy = context.energy.name(),
        blocks = context.available_time_blocks.len(),
        stress = context.stress_level,
    };

    let energy = context.energy.value();
    if energy >= 4 {
        push_signal(&mut insight, HIGH_ENERGY_SIGNAL);
    }
    if energy <= 2 {
        push_signal(&mut insight, LOW_ENERGY_SIGNAL);
    }
    if context.stress_level.value() >= 7 {
        push_signal(&mut insight, HIGH_STRESS_SIGNAL);
    }

    insight
}

fn push_signal(insight: &mut String, signal: &str) {
    insight.push('\n');
    insight.push_str(signal);
}
