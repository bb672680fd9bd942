//! Interactive dashboard loop. One task owns the controller and the
//! terminal; fetches run as spawned tasks reporting back over a channel,
//! so a slow call never blocks input handling or the poll timer.

use std::io::{self, Write};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use crossterm::{
    cursor::MoveTo,
    event::{Event, EventStream, KeyCode, KeyEventKind},
    execute,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use tokio::sync::mpsc;

use crate::cli::controller::{Debouncer, RefreshController, RefreshTicket, RefreshTrigger};
use crate::cli::proxy_client::{FetchError, ProxyClient};
use crate::cli::view;
use crate::core::config::AppConfig;
use crate::core::market::MarketEnvelope;

struct Completion {
    ticket: RefreshTicket,
    result: Result<MarketEnvelope, FetchError>,
}

pub async fn run(config: &AppConfig) -> Result<()> {
    let client = Arc::new(ProxyClient::new(&config.watch.proxy_url)?);

    terminal::enable_raw_mode().context("Failed to enable raw terminal mode")?;
    execute!(io::stdout(), EnterAlternateScreen)?;

    let result = run_loop(config, client).await;

    // Restore the terminal even when the loop errored.
    execute!(io::stdout(), LeaveAlternateScreen).ok();
    terminal::disable_raw_mode().ok();

    result
}

struct Dashboard {
    controller: RefreshController,
    client: Arc<ProxyClient>,
    completions: mpsc::UnboundedSender<Completion>,
    last_updated: Option<DateTime<Local>>,
}

impl Dashboard {
    /// Shows the placeholder frame, then starts the fetch. Render-first
    /// ordering keeps stale data off the screen while a load is pending.
    fn refresh(&mut self, trigger: RefreshTrigger) -> Result<()> {
        let ticket = self.controller.begin_refresh(trigger);
        self.draw()?;

        let client = Arc::clone(&self.client);
        let tx = self.completions.clone();
        tokio::spawn(async move {
            let result = client.fetch_market(&ticket.currency).await;
            // Receiver gone means the dashboard is shutting down.
            let _ = tx.send(Completion { ticket, result });
        });
        Ok(())
    }

    fn settle(&mut self, completion: Completion) -> Result<()> {
        let committed = match completion.result {
            Ok(envelope) => {
                let committed = self.controller.commit_success(&completion.ticket, envelope);
                if committed {
                    self.last_updated = Some(Local::now());
                }
                committed
            }
            Err(err) => self.controller.commit_failure(&completion.ticket, err.message),
        };
        if committed {
            self.draw()?;
        }
        Ok(())
    }

    fn draw(&self) -> Result<()> {
        let (width, _) = terminal::size().unwrap_or((80, 24));
        let frame = view::render(self.controller.state(), width);

        let mut stdout = io::stdout();
        execute!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;
        // Raw mode needs explicit carriage returns.
        for line in frame.lines() {
            write!(stdout, "{line}\r\n")?;
        }
        write!(stdout, "\r\n{}\r\n", self.status_line())?;
        stdout.flush()?;
        Ok(())
    }

    fn status_line(&self) -> String {
        let updated = self
            .last_updated
            .map_or("never".to_string(), |t| t.format("%H:%M:%S").to_string());
        console::style(format!(
            "[{}] updated {} | r refresh  c currency  q quit",
            self.controller.currency().to_uppercase(),
            updated
        ))
        .dim()
        .to_string()
    }
}

async fn run_loop(config: &AppConfig, client: Arc<ProxyClient>) -> Result<()> {
    let (tx, mut completions) = mpsc::unbounded_channel();
    let mut dashboard = Dashboard {
        controller: RefreshController::new(config.watch.currencies.clone()),
        client,
        completions: tx,
        last_updated: None,
    };

    let mut events = EventStream::new();
    let period = Duration::from_secs(config.watch.refresh_interval_secs.max(1));
    let mut poll = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
    let mut debouncer = Debouncer::new(Duration::from_millis(config.watch.resize_debounce_ms));

    dashboard.refresh(RefreshTrigger::Startup)?;

    loop {
        let debounce_deadline = debouncer.deadline();
        tokio::select! {
            _ = poll.tick() => {
                dashboard.refresh(RefreshTrigger::Timer)?;
            }
            Some(completion) = completions.recv() => {
                dashboard.settle(completion)?;
            }
            _ = sleep_until(debounce_deadline), if debounce_deadline.is_some() => {
                if debouncer.fire(Instant::now()) {
                    dashboard.refresh(RefreshTrigger::Resize)?;
                }
            }
            maybe_event = events.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        match key.code {
                            KeyCode::Char('q') | KeyCode::Esc => break,
                            KeyCode::Char('r') => dashboard.refresh(RefreshTrigger::Manual)?,
                            KeyCode::Char('c') => {
                                dashboard.controller.cycle_currency();
                                dashboard.refresh(RefreshTrigger::CurrencyChange)?;
                            }
                            _ => {}
                        }
                    }
                    Some(Ok(Event::Resize(_, _))) => {
                        debouncer.record(Instant::now());
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                    None => break,
                }
            }
        }
    }

    Ok(())
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => {
            tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await;
        }
        // Unreachable while the select guard holds; pend forever just in case.
        None => std::future::pending::<()>().await,
    }
}
