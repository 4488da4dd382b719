//! TUI runtime - owns terminal, runs event loop, executes effects.
//!
//! This is the "Elm runtime" boundary: all side effects happen here.
//! The reducer stays pure and produces effects; this module executes them.
//!
//! Async handlers send their results to `inbox_tx`; the loop drains
//! `inbox_rx` every frame and feeds the events through the reducer.

mod handlers;

use std::future::Future;
use std::io::Stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use placeboard_core::api::ApiClient;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::common::{TaskCompleted, TaskId, TaskKind, TaskStarted};
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::{render, terminal, update};

/// Tick interval while tasks are running (spinner animation).
pub const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Tick interval when nothing is in flight.
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(100);

type UiEventSender = mpsc::UnboundedSender<UiEvent>;
type UiEventReceiver = mpsc::UnboundedReceiver<UiEvent>;

/// Full-screen TUI runtime.
///
/// Owns the terminal and state. Terminal state is restored on drop and panic.
pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
    client: ApiClient,
    inbox_tx: UiEventSender,
    inbox_rx: UiEventReceiver,
    last_tick: Instant,
}

impl TuiRuntime {
    /// Enters the alternate screen and builds the runtime around `state`.
    ///
    /// # Errors
    /// Returns an error if the terminal cannot be set up.
    pub fn new(state: AppState, client: ApiClient) -> Result<Self> {
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();

        Ok(Self {
            terminal,
            state,
            client,
            inbox_tx,
            inbox_rx,
            last_tick: Instant::now(),
        })
    }

    /// Runs the main event loop until the user quits.
    ///
    /// # Errors
    /// Returns an error if reading terminal events or drawing fails.
    pub fn run(&mut self) -> Result<()> {
        let effects = update::init(&mut self.state);
        self.execute_effects(effects);

        let mut dirty = true;
        while !self.state.should_quit {
            let events = self.collect_events()?;
            for event in events {
                let marks_dirty = !matches!(&event, UiEvent::TaskStarted { .. });
                let effects = update::update(&mut self.state, event);
                dirty |= marks_dirty;
                self.execute_effects(effects);
            }

            if dirty {
                self.terminal.draw(|frame| render::render(&self.state, frame))?;
                dirty = false;
            }
        }
        Ok(())
    }

    /// Collects inbox results, terminal input, and the tick.
    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        let tick_interval = if self.state.tasks.is_any_running() {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        let poll_duration = if events.is_empty() {
            tick_interval.saturating_sub(self.last_tick.elapsed())
        } else {
            Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    /// Spawns an async task with a uniform TaskStarted/TaskCompleted lifecycle.
    ///
    /// A cancelled task sends no completion.
    fn spawn_task<F, Fut>(&self, kind: TaskKind, id: TaskId, f: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        let cancel = CancellationToken::new();
        let started = TaskStarted {
            id,
            cancel: Some(cancel.clone()),
        };
        let _ = tx.send(UiEvent::TaskStarted { kind, started });
        tokio::spawn(async move {
            tokio::select! {
                () = cancel.cancelled() => {
                    debug!(?kind, id = id.0, "Task cancelled");
                }
                inner = f() => {
                    let completed = TaskCompleted {
                        id,
                        result: Box::new(inner),
                    };
                    let _ = tx.send(UiEvent::TaskCompleted { kind, completed });
                }
            }
        });
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        let client = self.client.clone();
        match effect {
            UiEffect::Quit => {
                self.state.should_quit = true;
            }
            UiEffect::CancelTask { kind, token } => {
                if let Some(cancel) = token {
                    debug!(?kind, "Cancelling superseded task");
                    cancel.cancel();
                }
            }
            UiEffect::FetchSeasons { task } => {
                self.spawn_task(TaskKind::Seasons, task, move || {
                    handlers::seasons_load(client)
                });
            }
            UiEffect::FetchStats { task, season_id } => {
                self.spawn_task(TaskKind::Stats, task, move || {
                    handlers::stats_load(client, season_id)
                });
            }
            UiEffect::FetchTrend { task, seasons } => {
                self.spawn_task(TaskKind::Trend, task, move || {
                    handlers::trend_load(client, seasons)
                });
            }
            UiEffect::FetchSalary { task, salary_id } => {
                self.spawn_task(TaskKind::Salary, task, move || {
                    handlers::salary_load(client, salary_id)
                });
            }
            UiEffect::FetchResumes { task } => {
                self.spawn_task(TaskKind::Resumes, task, move || {
                    handlers::resumes_load(client)
                });
            }
            UiEffect::SubmitApplication {
                task,
                salary_id,
                selected_resume,
                resumes,
            } => {
                self.spawn_task(TaskKind::Apply, task, move || {
                    handlers::apply_submit(client, salary_id, selected_resume, resumes)
                });
            }
            UiEffect::OpenResume { task, filepath } => {
                self.spawn_task(TaskKind::OpenResume, task, move || {
                    handlers::resume_open(client, filepath)
                });
            }
        }
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
