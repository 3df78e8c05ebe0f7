use fetchdeck_models::{
    FetchDataType, FetchMethod, FetchTokenType, TaskConfig, TaskType, TokenSetError,
    rezponza_fetch_template,
};
use tracing::debug;

use crate::alert::Alert;
use crate::client::ApiClient;
use crate::services::tasks;

/// Editing mode, derived from an external mode selector. Unrecognized input
/// falls back to `View`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit,
    #[default]
    View,
}

impl EditorMode {
    pub fn parse(mode: &str) -> Self {
        match mode {
            "create" => EditorMode::Create,
            "edit" => EditorMode::Edit,
            _ => EditorMode::View,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EditorMode::Create => "create",
            EditorMode::Edit => "edit",
            EditorMode::View => "view",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// A new task was persisted; the caller transitions to the listing view.
    Created,
    /// The existing task was updated; the caller stays on the page.
    Updated,
}

/// Owns the in-memory task model for one editor session.
///
/// Every mutation replaces the whole model rather than editing in place, so
/// an observing view layer can detect changes by comparing revisions (or the
/// models themselves) without tracking individual fields.
#[derive(Debug, Clone)]
pub struct TaskEditor {
    mode: EditorMode,
    task_id: Option<String>,
    task: TaskConfig,
    revision: u64,
}

impl TaskEditor {
    /// Seeds a create-mode editor with the fixed template defaults. No
    /// remote state is fetched.
    pub fn create(user_id: Option<String>) -> Self {
        Self {
            mode: EditorMode::Create,
            task_id: None,
            task: TaskConfig::template(user_id),
            revision: 0,
        }
    }

    /// Opens an editor session. `Edit`/`View` fetch the persisted task and
    /// replace the in-memory model wholesale; `Create` never fetches.
    pub async fn open(client: &ApiClient, mode: EditorMode, id: Option<&str>) -> Option<Self> {
        match mode {
            EditorMode::Create => Some(Self::create(None)),
            EditorMode::Edit | EditorMode::View => {
                let Some(id) = id else {
                    client.alert(Alert::error(
                        "Page Error",
                        format!("No task id supplied for {} mode", mode.as_str()),
                    ));
                    return None;
                };
                let read = tasks::get(client, id).await?;
                let task_id = read.id.clone().unwrap_or_else(|| id.to_string());
                Some(Self {
                    mode,
                    task_id: Some(task_id),
                    task: read.into_config(),
                    revision: 0,
                })
            }
        }
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn task(&self) -> &TaskConfig {
        &self.task
    }

    pub fn task_id(&self) -> Option<&str> {
        self.task_id.as_deref()
    }

    /// Bumped on every model replacement; cheap change detection for views.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn replace(&mut self, next: TaskConfig) {
        self.task = next;
        self.revision += 1;
    }

    pub fn set_task_name(&mut self, name: impl Into<String>) {
        let mut next = self.task.clone();
        next.task_name = name.into();
        self.replace(next);
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        let mut next = self.task.clone();
        next.description = description.into();
        self.replace(next);
    }

    pub fn set_url(&mut self, url: impl Into<String>) {
        let mut next = self.task.clone();
        next.fetch_config.url = url.into();
        self.replace(next);
    }

    pub fn set_method(&mut self, method: FetchMethod) {
        let mut next = self.task.clone();
        next.fetch_config.method = method;
        self.replace(next);
    }

    pub fn set_data_type(&mut self, data_type: FetchDataType) {
        let mut next = self.task.clone();
        next.fetch_config.data_type = data_type;
        self.replace(next);
    }

    pub fn set_success_code(&mut self, success_code: u16) {
        let mut next = self.task.clone();
        next.fetch_config.success_code = success_code;
        self.replace(next);
    }

    pub fn set_interval_secs(&mut self, interval_secs: u64) {
        let mut next = self.task.clone();
        next.interval_secs = interval_secs;
        self.replace(next);
    }

    pub fn set_tenant_id(&mut self, tenant_id: impl Into<String>) {
        let mut next = self.task.clone();
        next.enigx_config.tenant_id = tenant_id.into();
        self.replace(next);
    }

    pub fn set_project_id(&mut self, project_id: impl Into<String>) {
        let mut next = self.task.clone();
        next.enigx_config.project_id = project_id.into();
        self.replace(next);
    }

    pub fn set_bearer_token(&mut self, bearer_token: impl Into<String>) {
        let mut next = self.task.clone();
        next.enigx_config.bearer_token = bearer_token.into();
        self.replace(next);
    }

    /// Switches the token injection mechanism only; entries keep their
    /// meaning and stay untouched.
    pub fn set_token_type(&mut self, token_type: FetchTokenType) {
        let mut next = self.task.clone();
        next.fetch_config.auth_token.token_type = token_type;
        self.replace(next);
    }

    /// Records the new task type. Switching into a templated type overwrites
    /// the fetch config with that type's template; the fields remain freely
    /// editable afterwards.
    pub fn set_task_type(&mut self, task_type: TaskType) {
        let mut next = self.task.clone();
        next.task_type = task_type;
        if task_type == TaskType::Rezponza {
            next.fetch_config = rezponza_fetch_template();
        }
        self.replace(next);
    }

    /// Appends a token entry under a generated key, returning the key.
    pub fn add_token_entry(&mut self) -> String {
        let mut next = self.task.clone();
        let key = next.fetch_config.auth_token.token.add_generated();
        self.replace(next);
        key
    }

    pub fn rename_token_entry(
        &mut self,
        index: usize,
        key: impl Into<String>,
    ) -> Result<(), TokenSetError> {
        let mut next = self.task.clone();
        next.fetch_config.auth_token.token.rename(index, key)?;
        self.replace(next);
        Ok(())
    }

    pub fn set_token_value(
        &mut self,
        index: usize,
        value: impl Into<String>,
    ) -> Result<(), TokenSetError> {
        let mut next = self.task.clone();
        next.fetch_config.auth_token.token.set_value(index, value)?;
        self.replace(next);
        Ok(())
    }

    pub fn remove_token_entry(&mut self, index: usize) -> Result<(), TokenSetError> {
        let mut next = self.task.clone();
        next.fetch_config.auth_token.token.remove(index)?;
        self.replace(next);
        Ok(())
    }

    /// Re-fetches the persisted task and replaces the model wholesale.
    pub async fn reload(&mut self, client: &ApiClient) -> Option<()> {
        let id = self.task_id.clone()?;
        let read = tasks::get(client, &id).await?;
        self.replace(read.into_config());
        Some(())
    }

    /// Persists the model. Create issues a create call; edit updates the
    /// existing id. Saving in any other state is a programming error and is
    /// surfaced as a failure notification, never silently ignored.
    pub async fn save(&self, client: &ApiClient) -> Option<SaveOutcome> {
        match self.mode {
            EditorMode::Create => {
                debug!(task_name = %self.task.task_name, "creating task");
                tasks::create(client, &self.task).await?;
                client.alert(Alert::success("Created successfully."));
                Some(SaveOutcome::Created)
            }
            EditorMode::Edit => {
                let Some(id) = self.task_id.as_deref() else {
                    client.alert(Alert::error("Save Error", "No task id for update"));
                    return None;
                };
                debug!(task_id = %id, "updating task");
                tasks::update(client, id, &self.task).await?;
                client.alert(Alert::success("Updated successfully."));
                Some(SaveOutcome::Updated)
            }
            EditorMode::View => {
                client.alert(Alert::error(
                    "Save Error",
                    format!("Unhandled editor mode: {}", self.mode.as_str()),
                ));
                None
            }
        }
    }
}
