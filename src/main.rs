use log::{error, info, warn};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::oneshot;
use trusty_poll::api::HttpPollApi;
use trusty_poll::config::Config;
use trusty_poll::handlers::UserAction;
use trusty_poll::sync::PollSync;
use trusty_poll::tasks::refresher::{RefreshScheduler, SchedulerHandle};
use trusty_poll::terminal::TerminalView;

// Forward stdin commands to the scheduler. EOF only ends input; `quit` ends the session.
async fn read_commands(handle: SchedulerHandle, quit: oneshot::Sender<()>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                error!("Failed to read from stdin: {}", e);
                break;
            }
        };

        if line.trim() == "quit" {
            let _ = quit.send(());
            return;
        }

        match line.parse::<UserAction>() {
            Ok(action) => {
                if !handle.send(action).await {
                    break;
                }
            }
            Err(e) => warn!("{}", e),
        }
    }
    info!("Command input closed, still refreshing");
}

async fn shutdown_signal(quit: oneshot::Receiver<()>) {
    // a dropped sender means input closed without `quit`
    let quit_requested = async {
        if quit.await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    let interrupted = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        _ = interrupted => info!("Interrupted, shutting down"),
        _ = quit_requested => info!("Quit requested"),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize logging
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return;
        }
    };

    let api = match HttpPollApi::new(&config.server_url) {
        Ok(api) => api,
        Err(e) => {
            error!("Failed to build HTTP client: {}", e);
            return;
        }
    };

    info!(
        "Following poll {} on {} as user {}",
        config.poll_id, config.server_url, config.user_id
    );

    let view = TerminalView::new(std::io::stdout(), config.chart_width, config.chart_height);
    let mut sync = PollSync::new(api, view, config.poll_id.clone(), config.user_id.clone());

    let (scheduler, handle) = RefreshScheduler::new(config.refresh_interval);
    let (quit_tx, quit_rx) = oneshot::channel();
    tokio::spawn(read_commands(handle, quit_tx));

    scheduler.run(&mut sync, shutdown_signal(quit_rx)).await;

    // the stdin reader can still be parked in a blocking read
    std::process::exit(0);
}
