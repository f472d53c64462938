use chrono::Duration;
use colored::Colorize;

use crate::features::focus::{
    format_duration, format_mmss, render_progress_bar, CyclePlan, Stage,
};
use crate::tasks::Task;

/// Format a list of tasks as a pretty table
pub fn format_tasks_pretty(tasks: &[Task], title: &str) -> String {
    if tasks.is_empty() {
        return format!("{title} (0 items)\n  No items");
    }

    let mut output = format!("{title} ({} items)\n", tasks.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for task in tasks {
        output.push_str(&format_task_line(task));
        output.push('\n');
    }

    output
}

/// Format a single task as one line: status, ID and title.
pub fn format_task_line(task: &Task) -> String {
    let status_icon = if task.completed {
        "[x]".green()
    } else {
        "[ ]".white()
    };
    let id = format!("#{}", task.id);
    let title = if task.completed {
        task.title.dimmed().to_string()
    } else {
        task.title.bold().to_string()
    };

    format!("{status_icon} {:>5}  {title}", id.dimmed())
}

fn stage_label(stage: Stage) -> String {
    let name = format!("{:<12}", stage.display_name());
    match stage {
        Stage::Work => name.red().to_string(),
        Stage::ShortBreak => name.green().to_string(),
        Stage::LongBreak => name.blue().to_string(),
        Stage::Idle => name,
    }
}

/// Format a cycle plan as a table with totals.
pub fn format_plan_pretty(plan: &CyclePlan) -> String {
    let every = plan.settings.pomodoros_per_long_break.get();
    let mut output = Vec::new();

    output.push(
        format!(
            "Pomodoro plan ({} cycle{}, long break every {every})",
            plan.cycles,
            if plan.cycles == 1 { "" } else { "s" }
        )
        .bold()
        .to_string(),
    );
    output.push("─".repeat(40));
    output.push(format!(
        "{:>3}  {:<12} {:>8}  {:>4}  {}",
        "#", "Stage", "Length", "Done", "Cycle"
    ));

    let mut elapsed = 0_u64;
    for planned in &plan.stages {
        elapsed += u64::from(planned.duration_secs);
        output.push(format!(
            "{:>3}  {} {:>8}  {:>4}  {}",
            planned.index,
            stage_label(planned.stage),
            format_mmss(planned.duration_secs),
            planned.pomodoros_completed,
            render_progress_bar(share(elapsed, plan.total_secs), 12).dimmed()
        ));
    }

    output.push("─".repeat(40));
    output.push(format!(
        "Total: {} (focus {})",
        format_duration(seconds(plan.total_secs)),
        format_duration(seconds(plan.focus_secs))
    ));

    output.join("\n")
}

#[allow(clippy::cast_precision_loss)]
fn share(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64
}

fn seconds(secs: u64) -> Duration {
    Duration::seconds(i64::try_from(secs).unwrap_or(i64::MAX))
}
