use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use log::{error, info};
use mattermost_video_preview::cli::{Cli, Commands};
use mattermost_video_preview::component::operation_dispatcher::CallbackRequest;
use mattermost_video_preview::component::preview_generator::PreviewRequest;
use mattermost_video_preview::component::{OperationDispatcher, PreviewGenerator, WebhookNotifier};
use mattermost_video_preview::config::{Config, resolve_config_path};
use mattermost_video_preview::init;
use mattermost_video_preview::tools::SystemRunner;
use std::process::ExitCode;

fn main() -> ExitCode {
    init::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            eprintln!("{} {e:#}", style("錯誤:").red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config_path = resolve_config_path(cli.config.as_deref());
    let config = Config::load(&config_path)?;
    let notifier = WebhookNotifier::from_config(&config).context("無法建立 webhook 客戶端")?;
    let runner = SystemRunner;

    match cli.command {
        Commands::Preview {
            file,
            grid,
            interval,
            height,
        } => {
            let request =
                PreviewRequest::from_config(&config, &file, grid.as_deref(), interval, height)?;
            let url = PreviewGenerator::new(&config, &notifier, &runner).run(&request)?;
            println!("{url}");
        }
        Commands::RunCommand { payload } => {
            let request = CallbackRequest::parse(&payload)?;
            let outcome = OperationDispatcher::new(&config, &notifier, &runner).run(&request.context);
            info!("操作結果: {}", outcome.message());
            println!("{}", outcome.message());
        }
    }

    Ok(())
}
