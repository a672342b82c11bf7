//! Console rendering shared by `plan` and `session`.

use std::io::{self, Write};

use minddoer_core::{DaySummary, RunRecord, Task};

const RULE_WIDTH: usize = 50;

pub fn write_tasks<W: Write>(out: &mut W, tasks: &[Task]) -> io::Result<()> {
    if tasks.is_empty() {
        writeln!(out, "No tasks for today.")?;
        return Ok(());
    }

    writeln!(out, "\n📋 YOUR TASKS FOR TODAY:")?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    for (i, task) in tasks.iter().enumerate() {
        let author = if task.user_created { "👤" } else { "🤖" };
        writeln!(out, "{}. {} {}", i + 1, author, task.title)?;
        writeln!(out, "   📝 {}", task.description)?;
        writeln!(
            out,
            "   ⏱️  {} min | ⚡ {} energy",
            task.estimated_minutes, task.energy_required
        )?;
        writeln!(out, "   📊 {} priority | 📂 {}", task.priority, task.category)?;
        writeln!(out)?;
    }
    Ok(())
}

pub fn write_plan<W: Write>(out: &mut W, record: &RunRecord) -> io::Result<()> {
    writeln!(out, "\n🎯 YOUR PERSONALIZED DAILY PLAN")?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;

    writeln!(out, "\n💭 MOTIVATION MESSAGE:")?;
    writeln!(out, "{}", record.motivation_message)?;

    write_tasks(out, &record.current_tasks)?;

    writeln!(out, "\n🔍 INSIGHTS:")?;
    writeln!(out, "{}", record.insights)
}

pub fn write_summary<W: Write>(out: &mut W, summary: &DaySummary) -> io::Result<()> {
    writeln!(
        out,
        "Completed {} task(s) ({} min), {} still open ({} min), {} missed.",
        summary.completed,
        summary.completed_minutes,
        summary.open,
        summary.open_minutes,
        summary.missed
    )
}
