use std::process::ExitCode;

use anyhow::Result;

use fetchdeck_core::services::runs;
use fetchdeck_core::{ApiClient, DEFAULT_LOG_POLL_INTERVAL, RunController};

pub async fn trigger(client: &ApiClient, id: String) -> Result<ExitCode> {
    let controller = RunController::new(client.clone(), id);
    match controller.trigger().await {
        Some(_) => Ok(ExitCode::SUCCESS),
        None => Ok(ExitCode::FAILURE),
    }
}

pub async fn schedule(client: &ApiClient, id: String, off: bool) -> Result<ExitCode> {
    let controller = RunController::new(client.clone(), id);
    let Some(task) = controller.set_scheduled(!off).await else {
        return Ok(ExitCode::FAILURE);
    };

    // Confirmed server state, obtained by re-fetch.
    match task.next_run_time {
        Some(next) if task.is_scheduled => {
            println!("Scheduled every {} s, next run at {}", task.config.interval_secs, next)
        }
        _ if task.is_scheduled => {
            println!("Scheduled every {} s", task.config.interval_secs)
        }
        _ => println!("Not scheduled"),
    }
    Ok(ExitCode::SUCCESS)
}

pub async fn logs(client: &ApiClient, id: String, follow: bool) -> Result<ExitCode> {
    if !follow {
        let Some(text) = runs::log(client, &id).await else {
            return Ok(ExitCode::FAILURE);
        };
        println!("{text}");
        return Ok(ExitCode::SUCCESS);
    }

    let controller = RunController::new(client.clone(), id);
    let mut watch = controller.watch_logs(DEFAULT_LOG_POLL_INTERVAL);
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = watch.changed() => {
                if !changed {
                    break;
                }
                // Redraw the whole log; each snapshot replaces the last.
                print!("\x1B[2J\x1B[H{}", watch.current());
                use std::io::Write as _;
                std::io::stdout().flush().ok();
            }
        }
    }
    // Dropping the watch cancels the poll loop.
    Ok(ExitCode::SUCCESS)
}
