use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyCode, KeyEvent, MouseEventKind};

/// How far one scroll step moves the page, in document units.
pub const SCROLL_STEP: f64 = 1.0;

/// How many steps one mouse wheel notch is worth.
pub const WHEEL_STEP: f64 = 3.0;

/// Unified event type consumed by the demo loop. Scroll intent (arrow
/// keys, mouse wheel) is translated at the source; remaining keys pass
/// through for the app to interpret.
#[derive(Clone, Debug, PartialEq)]
pub enum NavEvent {
    /// Signed scroll delta in document units.
    Scroll(f64),
    Resize(u16, u16),
    Key(KeyEvent),
    Tick,
}

/// Source of viewport events (scroll intent, resize, keys).
pub trait NavEventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    fn recv_timeout(&self, timeout: Duration) -> Result<NavEvent, RecvTimeoutError>;
}

/// Production event source reading crossterm input on a background thread.
pub struct CrosstermEventSource {
    rx: Receiver<NavEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let mapped = match event::read() {
                Ok(ev) => translate(ev),
                Err(_) => break,
            };
            if let Some(ev) = mapped {
                if tx.send(ev).is_err() {
                    break;
                }
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl NavEventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<NavEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

fn translate(ev: CtEvent) -> Option<NavEvent> {
    match ev {
        CtEvent::Key(key) => match key.code {
            KeyCode::Up => Some(NavEvent::Scroll(-SCROLL_STEP)),
            KeyCode::Down => Some(NavEvent::Scroll(SCROLL_STEP)),
            _ => Some(NavEvent::Key(key)),
        },
        CtEvent::Mouse(mouse) => match mouse.kind {
            MouseEventKind::ScrollUp => Some(NavEvent::Scroll(-WHEEL_STEP * SCROLL_STEP)),
            MouseEventKind::ScrollDown => Some(NavEvent::Scroll(WHEEL_STEP * SCROLL_STEP)),
            _ => None,
        },
        CtEvent::Resize(w, h) => Some(NavEvent::Resize(w, h)),
        _ => None,
    }
}

/// Test event source fed from an mpsc channel.
pub struct TestEventSource {
    rx: Receiver<NavEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<NavEvent>) -> Self {
        Self { rx }
    }
}

impl NavEventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<NavEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Advances the demo one event at a time. Scroll events arrive in bursts
/// (key repeat, wheel momentum), so consecutive deltas already queued are
/// folded into a single event before it is handed to the app.
pub struct Runner<E: NavEventSource> {
    event_source: E,
    tick_interval: Duration,
    pending: Option<NavEvent>,
}

impl<E: NavEventSource> Runner<E> {
    pub fn new(event_source: E, tick_interval: Duration) -> Self {
        Self {
            event_source,
            tick_interval,
            pending: None,
        }
    }

    /// Blocks up to the tick interval and returns the next event, or
    /// `Tick` on timeout.
    pub fn step(&mut self) -> NavEvent {
        let first = match self.pending.take() {
            Some(ev) => ev,
            None => match self.event_source.recv_timeout(self.tick_interval) {
                Ok(ev) => ev,
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                    return NavEvent::Tick
                }
            },
        };

        let mut delta = match first {
            NavEvent::Scroll(d) => d,
            other => return other,
        };
        while let Ok(next) = self.event_source.recv_timeout(Duration::ZERO) {
            match next {
                NavEvent::Scroll(d) => delta += d,
                other => {
                    self.pending = Some(other);
                    break;
                }
            }
        }
        NavEvent::Scroll(delta)
    }
}
