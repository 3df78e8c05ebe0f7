use fetchdeck_models::{Ack, ChangePasswordRequest, LoginRequest, Token};

use crate::client::ApiClient;

/// Exchanges credentials for a bearer token and writes it through the
/// client's session, so subsequent calls are authenticated.
pub async fn login(client: &ApiClient, username: &str, password: &str) -> Option<Token> {
    let request = LoginRequest {
        username: username.to_string(),
        password: password.to_string(),
    };
    let token: Token = client.post_form("/task/login", &request).await?;
    client.session().refresh(token.access_token.clone());
    Some(token)
}

pub async fn change_password(client: &ApiClient, new_password: &str) -> Option<Ack> {
    let request = ChangePasswordRequest {
        new_password: new_password.to_string(),
    };
    client.post("/user/change-password", &request).await
}
