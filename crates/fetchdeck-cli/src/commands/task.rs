use std::process::ExitCode;

use anyhow::Result;

use fetchdeck_core::services::tasks;
use fetchdeck_core::{ApiClient, EditorMode, TaskEditor};

use crate::cli::{TaskCommands, TaskFieldArgs};
use crate::output::task_table;

pub async fn run(client: &ApiClient, command: TaskCommands) -> Result<ExitCode> {
    match command {
        TaskCommands::List => {
            let Some(tasks) = tasks::list(client).await else {
                return Ok(ExitCode::FAILURE);
            };
            println!("{}", task_table(&tasks));
            Ok(ExitCode::SUCCESS)
        }
        TaskCommands::Get { id } => {
            let Some(task) = tasks::get(client, &id).await else {
                return Ok(ExitCode::FAILURE);
            };
            println!("{}", serde_json::to_string_pretty(&task)?);
            Ok(ExitCode::SUCCESS)
        }
        TaskCommands::Create(fields) => {
            let mut editor = TaskEditor::create(None);
            apply_fields(&mut editor, fields);
            match editor.save(client).await {
                Some(_) => Ok(ExitCode::SUCCESS),
                None => Ok(ExitCode::FAILURE),
            }
        }
        TaskCommands::Edit { id, fields } => {
            let Some(mut editor) = TaskEditor::open(client, EditorMode::Edit, Some(&id)).await
            else {
                return Ok(ExitCode::FAILURE);
            };
            apply_fields(&mut editor, fields);
            match editor.save(client).await {
                Some(_) => Ok(ExitCode::SUCCESS),
                None => Ok(ExitCode::FAILURE),
            }
        }
        TaskCommands::Delete { id } => {
            let Some(ack) = tasks::delete(client, &id).await else {
                return Ok(ExitCode::FAILURE);
            };
            println!("{}", ack.message);
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Applies field overrides through the editor's mutation operations. The
/// task type goes first so that explicit flags win over a templated seed.
fn apply_fields(editor: &mut TaskEditor, fields: TaskFieldArgs) {
    if let Some(task_type) = fields.task_type {
        editor.set_task_type(task_type.into());
    }
    if let Some(name) = fields.name {
        editor.set_task_name(name);
    }
    if let Some(description) = fields.description {
        editor.set_description(description);
    }
    if let Some(url) = fields.url {
        editor.set_url(url);
    }
    if let Some(method) = fields.method {
        editor.set_method(method.into());
    }
    if let Some(data_type) = fields.data_type {
        editor.set_data_type(data_type.into());
    }
    if let Some(success_code) = fields.success_code {
        editor.set_success_code(success_code);
    }
    if let Some(interval_secs) = fields.interval_secs {
        editor.set_interval_secs(interval_secs);
    }
    if let Some(tenant_id) = fields.tenant_id {
        editor.set_tenant_id(tenant_id);
    }
    if let Some(project_id) = fields.project_id {
        editor.set_project_id(project_id);
    }
    if let Some(bearer_token) = fields.bearer_token {
        editor.set_bearer_token(bearer_token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::TaskTypeArg;
    use fetchdeck_models::{FetchMethod, TaskType};

    #[test]
    fn explicit_flags_win_over_a_templated_seed() {
        let mut editor = TaskEditor::create(None);
        apply_fields(
            &mut editor,
            TaskFieldArgs {
                task_type: Some(TaskTypeArg::Rezponza),
                url: Some("https://override.example.com".to_string()),
                ..Default::default()
            },
        );

        let task = editor.task();
        assert_eq!(task.task_type, TaskType::Rezponza);
        // Template sets POST; the explicit URL flag still lands on top.
        assert_eq!(task.fetch_config.method, FetchMethod::Post);
        assert_eq!(task.fetch_config.url, "https://override.example.com");
    }
}
