use colored::Colorize;
use comfy_table::{Cell, Table};

use fetchdeck_core::{Alert, AlertKind, AlertSink};
use fetchdeck_models::TaskConfigRead;

/// Terminal rendering of the core's notifications.
pub struct TermSink;

impl AlertSink for TermSink {
    fn notify(&self, alert: Alert) {
        match alert.kind {
            AlertKind::Success => {
                let title = alert.title.unwrap_or_else(|| "Success".to_string());
                eprintln!("{} {}", title.green().bold(), alert.message);
            }
            AlertKind::Error => {
                let title = alert.title.unwrap_or_else(|| "Error".to_string());
                eprintln!("{} {}", title.red().bold(), alert.message);
                for (label, value) in &alert.detail {
                    eprintln!("  {}: {}", label.dimmed(), value);
                }
            }
        }
    }

    fn unauthorized(&self) {
        eprintln!(
            "{} Not signed in or session expired. Run `fetchdeck login <username>`.",
            "Unauthorized".red().bold()
        );
    }
}

pub fn task_table(tasks: &[TaskConfigRead]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "Type", "Interval (s)", "Scheduled", "Next Run"]);
    for task in tasks {
        table.add_row(vec![
            Cell::new(task.id.as_deref().unwrap_or("-")),
            Cell::new(&task.config.task_name),
            Cell::new(format!("{:?}", task.config.task_type).to_lowercase()),
            Cell::new(task.config.interval_secs),
            Cell::new(if task.is_scheduled { "yes" } else { "no" }),
            Cell::new(
                task.next_run_time
                    .map(|t| t.to_rfc3339())
                    .unwrap_or_else(|| "-".to_string()),
            ),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use fetchdeck_models::TaskConfig;

    #[test]
    fn table_renders_one_row_per_task() {
        let tasks = vec![
            TaskConfigRead {
                id: Some("abc".to_string()),
                config: TaskConfig::template(None),
                is_scheduled: false,
                next_run_time: None,
            },
            TaskConfigRead {
                id: None,
                config: TaskConfig::template(None),
                is_scheduled: true,
                next_run_time: None,
            },
        ];
        let rendered = task_table(&tasks).to_string();
        assert!(rendered.contains("abc"));
        assert!(rendered.contains("New task"));
    }
}
