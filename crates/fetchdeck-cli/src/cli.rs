use clap::{Args, Parser, Subcommand, ValueEnum};

use fetchdeck_models::{FetchDataType, FetchMethod, TaskType};

#[derive(Parser)]
#[command(name = "fetchdeck")]
#[command(version, about = "Fetchdeck - console for scheduled HTTP-fetch tasks")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Base URL of the task-admin service
    #[arg(long, global = true, env = "FETCHDECK_BASE_URL")]
    pub base_url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and persist the session token
    Login {
        username: String,
    },

    /// Task management
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },

    /// Trigger one immediate run of a task
    Run {
        id: String,
    },

    /// Register or deregister the recurring schedule of a task
    Schedule {
        id: String,
        /// Deregister instead of register
        #[arg(long)]
        off: bool,
    },

    /// Print the task's current log
    Logs {
        id: String,
        /// Keep polling and redraw the log as it grows
        #[arg(short, long)]
        follow: bool,
    },

    /// Change the account password
    ChangePassword,
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// List all tasks
    List,

    /// Show one task as JSON
    Get { id: String },

    /// Create a task from the template defaults, with optional overrides
    Create(TaskFieldArgs),

    /// Edit fields of an existing task
    Edit {
        id: String,
        #[command(flatten)]
        fields: TaskFieldArgs,
    },

    /// Delete a task
    Delete { id: String },
}

/// Field overrides shared by `task create` and `task edit`.
#[derive(Args, Default)]
pub struct TaskFieldArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// Task family; a templated family seeds the fetch config
    #[arg(long)]
    pub task_type: Option<TaskTypeArg>,
    #[arg(long)]
    pub url: Option<String>,
    #[arg(long)]
    pub method: Option<MethodArg>,
    #[arg(long)]
    pub data_type: Option<DataTypeArg>,
    #[arg(long)]
    pub success_code: Option<u16>,
    #[arg(long)]
    pub interval_secs: Option<u64>,
    #[arg(long)]
    pub tenant_id: Option<String>,
    #[arg(long)]
    pub project_id: Option<String>,
    #[arg(long)]
    pub bearer_token: Option<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum MethodArg {
    Get,
    Post,
}

impl From<MethodArg> for FetchMethod {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::Get => FetchMethod::Get,
            MethodArg::Post => FetchMethod::Post,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum DataTypeArg {
    Json,
    File,
    Html,
}

impl From<DataTypeArg> for FetchDataType {
    fn from(arg: DataTypeArg) -> Self {
        match arg {
            DataTypeArg::Json => FetchDataType::Json,
            DataTypeArg::File => FetchDataType::File,
            DataTypeArg::Html => FetchDataType::Html,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum TaskTypeArg {
    Normal,
    Rezponza,
}

impl From<TaskTypeArg> for TaskType {
    fn from(arg: TaskTypeArg) -> Self {
        match arg {
            TaskTypeArg::Normal => TaskType::Normal,
            TaskTypeArg::Rezponza => TaskType::Rezponza,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_task_create_with_overrides() {
        let cli = Cli::try_parse_from([
            "fetchdeck",
            "task",
            "create",
            "--name",
            "Prices",
            "--url",
            "https://x",
            "--interval-secs",
            "300",
        ])
        .unwrap();
        let Commands::Task {
            command: TaskCommands::Create(fields),
        } = cli.command
        else {
            panic!("expected task create");
        };
        assert_eq!(fields.name.as_deref(), Some("Prices"));
        assert_eq!(fields.interval_secs, Some(300));
    }

    #[test]
    fn parses_schedule_off() {
        let cli = Cli::try_parse_from(["fetchdeck", "schedule", "abc", "--off"]).unwrap();
        let Commands::Schedule { id, off } = cli.command else {
            panic!("expected schedule");
        };
        assert_eq!(id, "abc");
        assert!(off);
    }

    #[test]
    fn base_url_is_global() {
        let cli = Cli::try_parse_from([
            "fetchdeck",
            "task",
            "list",
            "--base-url",
            "https://admin.example.com",
        ])
        .unwrap();
        assert_eq!(cli.base_url.as_deref(), Some("https://admin.example.com"));
    }
}
