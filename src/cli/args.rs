use std::num::NonZeroU32;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::features::focus::{parse_minutes, require_cycle_length, SettingsUpdate};

#[derive(Parser)]
#[command(name = "chronos")]
#[command(about = "A terminal task list with a Pomodoro focus timer")]
#[command(long_about = "chronos - Task Chronos in your terminal

Keep a small list of tasks and work through them in focused Pomodoro
stages: work, short break, and a long break after every few rounds.

QUICK START:
  chronos task add \"Write report\"   Add a task
  chronos task list                 Show open tasks
  chronos focus                     Pick a task and start the timer
  chronos focus --task 3            Focus on task 3 right away
  chronos focus plan                Preview a full Pomodoro cycle

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Defaults to `general.default_output` from the config file.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage the task list (add, list, done)
    ///
    /// # Examples
    ///
    ///   chronos task add "Write report"
    ///   chronos task list --all
    ///   chronos task done 3
    #[command(alias = "t")]
    Task(TaskArgs),

    /// Focus on a task with the Pomodoro timer
    ///
    /// Opens the full-screen timer. With --task or --title the session
    /// starts immediately; otherwise pick a task from the open list.
    ///
    /// # Keys
    ///
    ///   space   pause / resume (continues to the next stage when one ends)
    ///   n       skip to the next stage
    ///   r / R   restart the stage / restart into the next stage
    ///   + / -   lengthen or shorten work stages by a minute
    ///   s       stop the session
    ///   q       quit
    ///
    /// # Examples
    ///
    ///   chronos focus
    ///   chronos focus --task 3
    ///   chronos focus --title "Inbox zero" --work 50m --short-break 10
    ///   chronos focus plan --cycles 2
    #[command(alias = "f")]
    Focus(FocusArgs),

    /// Show or change configuration
    ///
    /// # Examples
    ///
    ///   chronos config show
    ///   chronos config set focus.work_minutes 50
    ///   chronos config path
    Config(ConfigArgs),
}

/// Arguments for task management.
#[derive(Args)]
pub struct TaskArgs {
    #[command(subcommand)]
    pub command: TaskCommands,
}

/// Task subcommands.
#[derive(Subcommand)]
pub enum TaskCommands {
    /// Add a task
    #[command(alias = "a")]
    Add {
        /// Task title
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,
    },

    /// List open tasks
    #[command(alias = "ls")]
    List {
        /// Include completed tasks
        #[arg(long, short = 'a')]
        all: bool,
    },

    /// Mark a task as done
    Done {
        /// Task ID
        id: i64,
    },
}

/// Arguments for focus mode.
#[derive(Args)]
#[command(args_conflicts_with_subcommands = true)]
pub struct FocusArgs {
    #[command(subcommand)]
    pub command: Option<FocusCommands>,

    #[command(flatten)]
    pub start: FocusStartArgs,
}

/// Focus subcommands.
#[derive(Subcommand)]
pub enum FocusCommands {
    /// Preview the stage sequence for whole Pomodoro cycles
    ///
    /// Examples:
    ///   chronos focus plan
    ///   chronos focus plan --cycles 2 --long-every 3
    Plan {
        /// Number of long-break cycles to show
        #[arg(long, short = 'n', default_value = "1", value_parser = clap::value_parser!(u32).range(1..=24))]
        cycles: u32,

        #[command(flatten)]
        timer: TimerOverrides,
    },
}

/// Options for starting the focus screen.
#[derive(Args, Default)]
pub struct FocusStartArgs {
    /// ID of the task to focus on
    #[arg(long, short = 't', conflicts_with = "title")]
    pub task: Option<i64>,

    /// Create a task with this title and focus on it
    #[arg(long)]
    pub title: Option<String>,

    #[command(flatten)]
    pub timer: TimerOverrides,
}

/// Per-run overrides of the configured timer durations.
#[derive(Args, Default, Clone, Copy)]
pub struct TimerOverrides {
    /// Work stage length (e.g. 25, 50m, 1h)
    #[arg(long, short = 'w', value_parser = minutes_arg)]
    pub work: Option<NonZeroU32>,

    /// Short break length
    #[arg(long, value_parser = minutes_arg)]
    pub short_break: Option<NonZeroU32>,

    /// Long break length
    #[arg(long, value_parser = minutes_arg)]
    pub long_break: Option<NonZeroU32>,

    /// Work stages before each long break (1-12)
    #[arg(long, value_parser = cycle_length_arg)]
    pub long_every: Option<NonZeroU32>,
}

impl TimerOverrides {
    /// The overrides as an engine settings update.
    #[must_use]
    pub const fn to_update(&self) -> SettingsUpdate {
        SettingsUpdate {
            work_minutes: self.work,
            short_break_minutes: self.short_break,
            long_break_minutes: self.long_break,
            pomodoros_per_long_break: self.long_every,
        }
    }
}

fn minutes_arg(s: &str) -> Result<NonZeroU32, String> {
    parse_minutes(s).ok_or_else(|| format!("invalid duration '{s}' (try 25, 25m, 1h30m)"))
}

fn cycle_length_arg(s: &str) -> Result<NonZeroU32, String> {
    let value: u32 = s
        .trim()
        .parse()
        .map_err(|_| format!("invalid number '{s}'"))?;
    require_cycle_length(value).map_err(|e| e.to_string())
}

/// Arguments for configuration.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,

    /// Set a configuration value
    ///
    /// Keys: general.default_output, general.color, focus.work_minutes,
    /// focus.short_break_minutes, focus.long_break_minutes,
    /// focus.pomodoros_per_long_break, focus.bell
    Set {
        /// Dotted key, e.g. focus.work_minutes
        key: String,
        /// New value
        value: String,
    },

    /// Print the config file location
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Global Flag Tests ====================

    #[test]
    fn test_cli_output_defaults_to_none() {
        let cli = Cli::try_parse_from(["chronos", "task", "list"]).unwrap();
        assert!(cli.output.is_none());
        assert!(!cli.no_color);
    }

    #[test]
    fn test_cli_output_json_after_subcommand() {
        let cli = Cli::try_parse_from(["chronos", "task", "list", "-o", "json"]).unwrap();
        assert_eq!(cli.output, Some(OutputFormat::Json));
    }

    // ==================== Task Subcommand Tests ====================

    #[test]
    fn test_cli_task_add_joins_words() {
        let cli = Cli::try_parse_from(["chronos", "task", "add", "Write", "report"]).unwrap();
        if let Commands::Task(args) = cli.command {
            if let TaskCommands::Add { title } = args.command {
                assert_eq!(title.join(" "), "Write report");
            } else {
                panic!("Expected Add subcommand");
            }
        } else {
            panic!("Expected Task command");
        }
    }

    #[test]
    fn test_cli_task_add_requires_title() {
        assert!(Cli::try_parse_from(["chronos", "task", "add"]).is_err());
    }

    #[test]
    fn test_cli_task_list_all() {
        let cli = Cli::try_parse_from(["chronos", "t", "ls", "--all"]).unwrap();
        if let Commands::Task(args) = cli.command {
            assert!(matches!(args.command, TaskCommands::List { all: true }));
        } else {
            panic!("Expected Task command");
        }
    }

    #[test]
    fn test_cli_task_done() {
        let cli = Cli::try_parse_from(["chronos", "task", "done", "7"]).unwrap();
        if let Commands::Task(args) = cli.command {
            assert!(matches!(args.command, TaskCommands::Done { id: 7 }));
        } else {
            panic!("Expected Task command");
        }
    }

    // ==================== Focus Subcommand Tests ====================

    #[test]
    fn test_cli_focus_bare() {
        let cli = Cli::try_parse_from(["chronos", "focus"]).unwrap();
        if let Commands::Focus(args) = cli.command {
            assert!(args.command.is_none());
            assert!(args.start.task.is_none());
            assert!(args.start.title.is_none());
            assert!(args.start.timer.to_update().is_empty());
        } else {
            panic!("Expected Focus command");
        }
    }

    #[test]
    fn test_cli_focus_with_task_and_overrides() {
        let cli = Cli::try_parse_from([
            "chronos",
            "focus",
            "--task",
            "3",
            "--work",
            "50m",
            "--short-break",
            "10",
            "--long-every",
            "3",
        ])
        .unwrap();
        if let Commands::Focus(args) = cli.command {
            assert_eq!(args.start.task, Some(3));
            let update = args.start.timer.to_update();
            assert_eq!(update.work_minutes.map(NonZeroU32::get), Some(50));
            assert_eq!(update.short_break_minutes.map(NonZeroU32::get), Some(10));
            assert!(update.long_break_minutes.is_none());
            assert_eq!(update.pomodoros_per_long_break.map(NonZeroU32::get), Some(3));
        } else {
            panic!("Expected Focus command");
        }
    }

    #[test]
    fn test_cli_focus_task_conflicts_with_title() {
        let result = Cli::try_parse_from(["chronos", "focus", "--task", "1", "--title", "x"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_focus_rejects_zero_durations() {
        assert!(Cli::try_parse_from(["chronos", "focus", "--work", "0"]).is_err());
        assert!(Cli::try_parse_from(["chronos", "focus", "--long-every", "0"]).is_err());
    }

    #[test]
    fn test_cli_focus_plan() {
        let cli = Cli::try_parse_from(["chronos", "focus", "plan", "-n", "2", "--long-break", "20"])
            .unwrap();
        if let Commands::Focus(args) = cli.command {
            if let Some(FocusCommands::Plan { cycles, timer }) = args.command {
                assert_eq!(cycles, 2);
                assert_eq!(timer.long_break.map(NonZeroU32::get), Some(20));
            } else {
                panic!("Expected Plan subcommand");
            }
        } else {
            panic!("Expected Focus command");
        }
    }

    #[test]
    fn test_cli_focus_plan_cycle_range() {
        assert!(Cli::try_parse_from(["chronos", "focus", "plan", "-n", "0"]).is_err());
        assert!(Cli::try_parse_from(["chronos", "focus", "plan", "-n", "25"]).is_err());
    }

    #[test]
    fn test_cli_focus_rejects_oversized_durations() {
        assert!(Cli::try_parse_from(["chronos", "focus", "--work", "99999999999999h"]).is_err());
        assert!(
            Cli::try_parse_from(["chronos", "focus", "--short-break", "9223372036854775807"])
                .is_err()
        );
    }

    #[test]
    fn test_cli_long_every_range() {
        assert!(Cli::try_parse_from(["chronos", "focus", "plan", "--long-every", "12"]).is_ok());
        assert!(Cli::try_parse_from(["chronos", "focus", "plan", "--long-every", "13"]).is_err());
        assert!(
            Cli::try_parse_from(["chronos", "focus", "plan", "--long-every", "4000000000"])
                .is_err()
        );
    }

    // ==================== Config Subcommand Tests ====================

    #[test]
    fn test_cli_config_set() {
        let cli =
            Cli::try_parse_from(["chronos", "config", "set", "focus.work_minutes", "45"]).unwrap();
        if let Commands::Config(args) = cli.command {
            if let ConfigCommands::Set { key, value } = args.command {
                assert_eq!(key, "focus.work_minutes");
                assert_eq!(value, "45");
            } else {
                panic!("Expected Set subcommand");
            }
        } else {
            panic!("Expected Config command");
        }
    }

    #[test]
    fn test_cli_verify() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
