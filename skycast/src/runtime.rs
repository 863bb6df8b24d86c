//! Event/action/effect loop
//!
//! Terminal events and service results both arrive as actions on one
//! channel. Each action goes through the store; its effects are handed to
//! the task manager; the screen is redrawn only when the selection changed.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use ratatui::backend::Backend;
use ratatui::layout::Rect;
use ratatui::{Frame, Terminal};
use skycast_core::{Action, Effect, LoggingMiddleware, Selection, SelectionStoreWithMiddleware};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::tasks::TaskManager;

/// Terminal input the loop cares about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TermEvent {
    Key(KeyEvent),
    Resize(u16, u16),
}

/// Configuration for the event poller.
#[derive(Debug, Clone, Copy)]
pub struct PollerConfig {
    /// Timeout passed to each `crossterm::event::poll` call.
    pub poll_timeout: Duration,
    /// Sleep between poll cycles.
    pub loop_sleep: Duration,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            poll_timeout: Duration::from_millis(10),
            loop_sleep: Duration::from_millis(16),
        }
    }
}

/// Actions produced by one terminal event, plus whether to redraw regardless
#[derive(Debug, Clone, PartialEq)]
pub struct EventOutcome {
    pub actions: Vec<Action>,
    pub needs_render: bool,
}

impl EventOutcome {
    pub fn ignored() -> Self {
        Self {
            actions: Vec::new(),
            needs_render: false,
        }
    }

    pub fn needs_render() -> Self {
        Self {
            actions: Vec::new(),
            needs_render: true,
        }
    }

    pub fn action(action: Action) -> Self {
        Self {
            actions: vec![action],
            needs_render: false,
        }
    }

    /// Collect whatever a component's `handle_key` returned.
    ///
    /// Widget-local state (cursor, highlight) may have moved even when no
    /// action came out, so this always asks for a redraw.
    pub fn from_actions(iter: impl IntoIterator<Item = Action>) -> Self {
        Self {
            actions: iter.into_iter().collect(),
            needs_render: true,
        }
    }
}

impl Default for EventOutcome {
    fn default() -> Self {
        Self::ignored()
    }
}

/// Read crossterm events on a background task until cancelled.
pub fn spawn_event_poller(
    tx: mpsc::UnboundedSender<TermEvent>,
    config: PollerConfig,
    cancel_token: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        const MAX_EVENTS_PER_BATCH: usize = 20;

        loop {
            tokio::select! {
                _ = cancel_token.cancelled() => {
                    tracing::debug!("Event poller cancelled, draining buffer");
                    while event::poll(Duration::ZERO).unwrap_or(false) {
                        let _ = event::read();
                    }
                    break;
                }
                _ = tokio::time::sleep(config.loop_sleep) => {
                    let mut processed = 0;
                    while processed < MAX_EVENTS_PER_BATCH
                        && event::poll(config.poll_timeout).unwrap_or(false)
                    {
                        processed += 1;
                        let term_event = match event::read() {
                            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                                TermEvent::Key(key)
                            }
                            Ok(Event::Resize(w, h)) => TermEvent::Resize(w, h),
                            _ => continue,
                        };
                        if tx.send(term_event).is_err() {
                            tracing::debug!("Event channel closed, stopping poller");
                            return;
                        }
                    }
                }
            }
        }
    })
}

/// Owns the store, the action channel and the task manager.
pub struct Runtime {
    store: SelectionStoreWithMiddleware<LoggingMiddleware>,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    tasks: TaskManager<Action>,
    poller_config: PollerConfig,
    should_render: bool,
}

impl Runtime {
    pub fn new(selection: Selection) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        Self {
            store: SelectionStoreWithMiddleware::new(selection, LoggingMiddleware::new()),
            tasks: TaskManager::new(action_tx.clone()),
            action_tx,
            action_rx,
            poller_config: PollerConfig::default(),
            should_render: true,
        }
    }

    /// Send an action into the queue.
    pub fn enqueue(&self, action: Action) {
        let _ = self.action_tx.send(action);
    }

    pub fn state(&self) -> &Selection {
        self.store.state()
    }

    /// Dispatch one action and hand its effects over. Returns whether to redraw.
    pub fn process<FEffect>(&mut self, action: Action, handle_effect: &mut FEffect) -> bool
    where
        FEffect: FnMut(Effect, &mut TaskManager<Action>),
    {
        let result = self.store.dispatch(action);
        for effect in result.effects {
            handle_effect(effect, &mut self.tasks);
        }
        result.changed
    }

    /// Run until `Quit` arrives or every channel closes.
    pub async fn run<B, FRender, FEvent, FEffect>(
        &mut self,
        terminal: &mut Terminal<B>,
        mut render: FRender,
        mut map_event: FEvent,
        mut handle_effect: FEffect,
    ) -> io::Result<()>
    where
        B: Backend,
        FRender: FnMut(&mut Frame, Rect, &Selection),
        FEvent: FnMut(&TermEvent, &Selection) -> EventOutcome,
        FEffect: FnMut(Effect, &mut TaskManager<Action>),
    {
        let (event_tx, mut event_rx) = mpsc::unbounded_channel::<TermEvent>();
        let cancel_token = CancellationToken::new();
        let _poller = spawn_event_poller(event_tx, self.poller_config, cancel_token.clone());

        let result = loop {
            if self.should_render {
                let state = self.store.state();
                if let Err(e) = terminal.draw(|frame| render(frame, frame.area(), state)) {
                    break Err(e);
                }
                self.should_render = false;
            }

            tokio::select! {
                Some(term_event) = event_rx.recv() => {
                    let outcome = map_event(&term_event, self.store.state());
                    if outcome.needs_render {
                        self.should_render = true;
                    }
                    for action in outcome.actions {
                        let _ = self.action_tx.send(action);
                    }
                }

                Some(action) = self.action_rx.recv() => {
                    if matches!(action, Action::Quit) {
                        tracing::info!("Quit requested");
                        break Ok(());
                    }
                    if self.process(action, &mut handle_effect) {
                        self.should_render = true;
                    }
                }

                else => break Ok(()),
            }
        };

        cancel_token.cancel();
        self.tasks.cancel_all();
        result
    }
}
