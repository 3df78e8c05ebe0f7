use fetchdeck_models::Ack;

use crate::client::ApiClient;

/// Triggers one immediate out-of-band execution. The ack confirms the
/// trigger, not completion.
pub async fn run(client: &ApiClient, id: &str) -> Option<Ack> {
    client.get(&format!("/task/run/{id}")).await
}

/// Registers a recurring job for the task.
pub async fn schedule(client: &ApiClient, id: &str) -> Option<Ack> {
    client.get(&format!("/scheduler/create/{id}")).await
}

/// Deregisters the task's recurring job.
pub async fn unschedule(client: &ApiClient, id: &str) -> Option<Ack> {
    client.delete(&format!("/scheduler/delete/{id}")).await
}

/// Current log text for the task. The server owns the full visible log;
/// callers replace what they display, never append.
pub async fn log(client: &ApiClient, id: &str) -> Option<String> {
    client.get(&format!("/logs/get/{id}")).await
}
