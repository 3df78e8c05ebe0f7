use fetchdeck_models::{Ack, TaskConfig, TaskConfigRead};

use crate::client::ApiClient;

pub async fn list(client: &ApiClient) -> Option<Vec<TaskConfigRead>> {
    client.get("/task/list").await
}

pub async fn get(client: &ApiClient, id: &str) -> Option<TaskConfigRead> {
    client.get(&format!("/task-config/get/{id}")).await
}

pub async fn create(client: &ApiClient, task: &TaskConfig) -> Option<Ack> {
    client.post("/task-config/create", task).await
}

pub async fn update(client: &ApiClient, id: &str, task: &TaskConfig) -> Option<Ack> {
    client.put(&format!("/task-config/update/{id}"), task).await
}

pub async fn delete(client: &ApiClient, id: &str) -> Option<Ack> {
    client.delete(&format!("/task-config/delete/{id}")).await
}
