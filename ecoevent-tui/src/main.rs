//! Terminal dashboard for event waste management: smart bins, the disposal
//! guide, attendee rewards, and collection agencies.

mod alerts;
mod app;
mod cli;
mod input;
mod settings;
mod ui;

use std::{
    fs::{self, OpenOptions},
    io,
    sync::{Arc, Mutex},
};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as CEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ecoevent_core::{
    model::{AttendeeId, EventId},
    plugin::PluginRegistry,
    service::EcoEventService,
};
use ecoevent_provider_demo as demo;
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{error, info};

use crate::alerts::AlertCenter;
use crate::app::App;
use crate::cli::Cli;
use crate::input::Action;
use crate::settings::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(event) = cli.event {
        settings.event = event;
    }
    if let Some(attendee) = cli.attendee {
        settings.attendee = attendee;
    }
    if cli.log_file.is_some() {
        settings.log_file = cli.log_file;
    }

    init_tracing(&settings)?;
    info!(event = %settings.event, attendee = %settings.attendee, "starting dashboard");

    // Provider + service setup
    let registry = Arc::new(PluginRegistry::new(vec![demo::plugin(Utc::now())]));
    let service = Arc::new(EcoEventService::new(registry));

    let mut app = App::new(
        service,
        EventId(settings.event.clone()),
        AttendeeId(settings.attendee.clone()),
        AlertCenter::new(settings.alert_timeout()),
    );
    load(&mut app).await;

    // Terminal init
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run event loop
    let res = run(&mut terminal, &mut app, &settings).await;
    app.alerts.dismiss_all();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = %err, "dashboard stopped");
    }
    res
}

/// Logs go to a file so they never overwrite the terminal UI.
fn init_tracing(settings: &Settings) -> Result<()> {
    let path = settings.log_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&settings.log_level)),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

async fn load(app: &mut App) {
    app.is_loading = true;
    app.refresh().await;
    app.is_loading = false;
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    settings: &Settings,
) -> Result<()> {
    loop {
        app.tick(Utc::now());

        // Draw current UI
        terminal.draw(|frame| ui::draw(frame, app))?;

        if !event::poll(settings.tick_rate())? {
            continue;
        }
        let CEvent::Key(key) = event::read()? else {
            continue;
        };

        match input::handle_key_event(key, app) {
            Action::Quit => break,
            Action::None => {}
            Action::Refresh => {
                app.info_message = None;
                terminal.draw(|frame| ui::draw(frame, app))?;
                load(app).await;
            }
            Action::SendMessage => {
                let Some(agency) = app.selected_agency().map(|agency| agency.id.clone()) else {
                    app.error_message = Some("Select an agency first".into());
                    continue;
                };
                let res = app
                    .service
                    .send_agency_message(&app.event, &agency, &app.message_input, Utc::now())
                    .await;
                match res {
                    Ok(notice) => {
                        app.error_message = None;
                        app.info_message = Some(notice.text.clone());
                        app.messages.record(notice);
                        app.message_input.clear();
                    }
                    Err(err) => {
                        app.info_message = None;
                        app.error_message = Some(format!("Message not sent: {err}"));
                    }
                }
            }
            Action::EmergencyPickup => {
                let Some(agency) = app.selected_agency().map(|agency| agency.id.clone()) else {
                    app.error_message = Some("Select an agency first".into());
                    continue;
                };
                let res = app
                    .service
                    .request_emergency_pickup(&app.event, &agency, Utc::now())
                    .await;
                match res {
                    Ok(notice) => {
                        app.error_message = None;
                        app.info_message = Some(notice.text.clone());
                        app.messages.record(notice);
                    }
                    Err(err) => {
                        app.info_message = None;
                        app.error_message = Some(format!("Pickup request failed: {err}"));
                    }
                }
            }
        }
    }

    Ok(())
}
