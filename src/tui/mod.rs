//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! translates keyboard events into core::Action values and executes the
//! commands the router hands back.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Executor
//!
//! Every `Command` is spawned as its own tokio task. The task awaits
//! `Command::execute` and sends the single resulting `Action` down a
//! `std::sync::mpsc` channel. The loop drains that channel between input
//! events, so all view state is mutated on this one thread.
//!
//! ## Redraw Strategy
//!
//! - **Busy** (a load or send in flight): draws every ~100ms so the spinner turns.
//! - **Idle**: sleeps up to 500ms, only redraws on input or completions.

mod component;
mod components;
mod event;
mod theme;
mod ui;

pub use theme::Theme;

use log::{debug, info, warn};
use std::io::{self, stdout};
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::SetCursorStyle;
use crossterm::event::{
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::core::action::Action;
use crate::core::effect::Command;
use crate::core::router::Router;
use crate::mail::MailBackend;
use crate::tui::event::{poll_event_immediate, poll_event_timeout};
use crate::tui::ui::STATUS_BAR_HEIGHT;

const BUSY_POLL: Duration = Duration::from_millis(100);
const IDLE_POLL: Duration = Duration::from_millis(500);

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> io::Result<Self> {
        // Disambiguated escape codes let a bare Esc arrive without delay.
        // Terminals without the protocol ignore the request.
        execute!(
            stdout(),
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )?;
        info!("Terminal modes enabled (steady block cursor, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            SetCursorStyle::DefaultUserShape
        );
    }
}

/// Take over the terminal and run until the router asks to quit.
pub fn run(mut router: Router, backend: Arc<dyn MailBackend>, theme: Theme) -> io::Result<()> {
    let mut terminal = ratatui::try_init()?;
    let guard = TerminalModeGuard::new();
    if let Err(e) = &guard {
        warn!("Failed to enable terminal modes: {}", e);
    }

    let result = event_loop(&mut terminal, &mut router, backend, &theme);

    drop(guard);
    ratatui::restore();
    result
}

fn event_loop(
    terminal: &mut DefaultTerminal,
    router: &mut Router,
    backend: Arc<dyn MailBackend>,
    theme: &Theme,
) -> io::Result<()> {
    // Channel for completions from command tasks
    let (tx, rx) = mpsc::channel();

    let size = terminal.size()?;
    dispatch(
        router,
        Action::Resize {
            width: size.width,
            height: size.height.saturating_sub(STATUS_BAR_HEIGHT),
        },
        &backend,
        &tx,
    );
    for command in router.init() {
        spawn_command(command, backend.clone(), tx.clone());
    }

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        let busy = router.is_busy();
        if busy {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, router, theme, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if busy { BUSY_POLL } else { IDLE_POLL };

        // Process first event + drain ALL pending events before next draw
        let mut next = poll_event_timeout(timeout)?;
        while let Some(action) = next {
            needs_redraw = true;
            dispatch(router, action, &backend, &tx);
            if router.should_quit() {
                break;
            }
            next = poll_event_immediate()?;
        }

        if router.should_quit() {
            info!("Leaving event loop");
            break;
        }

        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            dispatch(router, action, &backend, &tx);
        }
    }

    Ok(())
}

/// Feed one action through the router and start whatever it asks for.
fn dispatch(
    router: &mut Router,
    action: Action,
    backend: &Arc<dyn MailBackend>,
    tx: &mpsc::Sender<Action>,
) {
    for command in router.update(action) {
        spawn_command(command, backend.clone(), tx.clone());
    }
}

fn spawn_command(command: Command, backend: Arc<dyn MailBackend>, tx: mpsc::Sender<Action>) {
    let label = command.label();
    debug!("Spawning {}", label);
    tokio::spawn(async move {
        let action = command.execute(backend).await;
        if tx.send(action).is_err() {
            warn!("Dropping {} completion: receiver closed", label);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mail::{BackendError, MessageId};
    use crate::test_support::ScriptedBackend;

    #[tokio::test(flavor = "multi_thread")]
    async fn test_spawned_command_reports_failure_as_action() {
        let backend = Arc::new(ScriptedBackend::failing(BackendError::Transport(
            "down".into(),
        )));
        let (tx, rx) = mpsc::channel();

        spawn_command(
            Command::FetchMessage {
                id: MessageId::from("1"),
                generation: 3,
            },
            backend.clone(),
            tx,
        );

        let action = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(
            action,
            Action::MessageLoaded {
                generation: 3,
                result: Err(BackendError::Transport("down".into())),
            }
        );
        assert_eq!(backend.calls(), vec!["get 1"]);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_dispatch_spawns_router_commands() {
        let backend: Arc<dyn MailBackend> = Arc::new(ScriptedBackend::new());
        let (tx, rx) = mpsc::channel();
        let mut router = Router::new();

        dispatch(&mut router, Action::ShowList, &backend, &tx);

        let action = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(matches!(
            action,
            Action::ListLoaded {
                generation: 1,
                result: Ok(ref items)
            } if items.len() == 2
        ));
    }
}
