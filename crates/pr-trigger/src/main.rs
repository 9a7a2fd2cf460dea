use anyhow::{bail, Context, Result};
use clap::Parser;
use std::sync::Arc;
use trigger_client::{HttpTriggerClient, PagePath, TriggerApi};
use trigger_config::AppConfig;
use trigger_widget::{should_confirm, ClickEvent, ClickOutcome, TriggerWidget, WidgetOptions};

mod browser;
mod cli;
mod logger;
mod terminal;

use cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let log_file = logger::init();
    log::info!("Starting pr-trigger, logging to {}", log_file.display());

    let mut config = AppConfig::load();
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    log::debug!("Using admin resource {}", config.buttons_admin_url());

    let client = Arc::new(HttpTriggerClient::from_config(&config)?);

    let result = match cli.command {
        Command::List { page } => list(client.as_ref(), &PagePath::new(page)).await,
        Command::Press {
            page,
            trigger,
            values,
            yes,
        } => {
            let host = terminal::host(values, yes);
            let mut widget = TriggerWidget::new(
                client,
                host,
                WidgetOptions::from(&config),
                PagePath::new(page),
            );
            press(&mut widget, &trigger).await
        }
    };

    if let Err(e) = &result {
        log::error!("{:#}", e);
    }
    log::info!("Exiting pr-trigger");
    result
}

async fn list(api: &dyn TriggerApi, page: &PagePath) -> Result<()> {
    let buttons = api
        .fetch_buttons(page)
        .await
        .with_context(|| format!("Failed to load buttons of {}", page))?;

    if buttons.is_empty() {
        println!("No trigger buttons on {}", page);
        return Ok(());
    }

    for button in &buttons {
        let dialog = if should_confirm(button) { "dialog" } else { "direct" };
        match &button.redirect_url {
            Some(url) => println!("{}  {}  [{}] -> {}", button.uuid, button.name, dialog, url),
            None => println!("{}  {}  [{}]", button.uuid, button.name, dialog),
        }
    }
    Ok(())
}

async fn press(widget: &mut TriggerWidget, trigger: &str) -> Result<()> {
    if !widget.mount().await? {
        bail!("Nothing to attach the buttons to on {}", widget.page());
    }

    let Some(controller) = widget.find(trigger) else {
        bail!("No trigger button {:?} on {}", trigger, widget.page());
    };

    let outcome = widget
        .click(controller.uuid(), &mut ClickEvent::new())
        .await?;
    widget.unmount();

    match outcome {
        ClickOutcome::Submitted(response) if !response.confirmation_enabled() => {
            println!("Pressed {}", controller.button().name);
            Ok(())
        }
        ClickOutcome::Submitted(_) => Ok(()),
        ClickOutcome::Cancelled => {
            println!("Cancelled");
            Ok(())
        }
        ClickOutcome::Failed(e) => Err(e).context("Submission failed"),
        ClickOutcome::Ignored => bail!("Button is busy"),
    }
}
