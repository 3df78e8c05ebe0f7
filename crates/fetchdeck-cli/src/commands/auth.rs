use std::process::ExitCode;

use anyhow::{Result, bail};

use fetchdeck_core::ApiClient;
use fetchdeck_core::services::auth;

use crate::config::Profile;

pub async fn login(client: &ApiClient, profile: &mut Profile, username: &str) -> Result<ExitCode> {
    let password = rpassword::prompt_password("Password: ")?;

    let Some(token) = auth::login(client, username, &password).await else {
        return Ok(ExitCode::FAILURE);
    };

    profile.access_token = Some(token.access_token);
    profile.save()?;
    println!("Signed in as {username}.");
    Ok(ExitCode::SUCCESS)
}

pub async fn change_password(client: &ApiClient) -> Result<ExitCode> {
    let new_password = rpassword::prompt_password("New password: ")?;
    let confirmation = rpassword::prompt_password("Repeat new password: ")?;
    if new_password != confirmation {
        bail!("passwords do not match");
    }

    let Some(ack) = auth::change_password(client, &new_password).await else {
        return Ok(ExitCode::FAILURE);
    };
    println!("{}", ack.message);
    Ok(ExitCode::SUCCESS)
}
