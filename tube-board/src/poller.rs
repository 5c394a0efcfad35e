//! Departure poller.
//!
//! The poller is a two-state machine:
//!
//! ```text
//!   Idle ──select(stop)──▶ Polling(stop) ──select(other)──▶ Polling(other)
//!    ▲                          │
//!    └──────────clear()─────────┘
//! ```
//!
//! While polling, one timer task ticks immediately and then every poll
//! interval. Each tick spawns a fetch-render cycle as its own task, so a
//! hung request only stalls its own cycle. Changing the selection aborts
//! the timer; cycles already in flight run to completion, but their result
//! is dropped if the selection has moved on since they were issued.
//!
//! Rendered frames are published on a `watch` channel.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::Local;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

use crate::board::{BoardFrame, BoardView, build_board};
use crate::config::BoardConfig;
use crate::domain::Stop;
use crate::selection::page_title;
use crate::tfl::TransitSource;

/// Poller state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollState {
    /// No station selected.
    Idle,
    /// Polling arrivals for a station.
    Polling(Stop),
}

/// Owns the single active poll timer and the published board frame.
pub struct Poller {
    source: Arc<dyn TransitSource>,
    period: Duration,
    max_rows: usize,
    frames: Arc<watch::Sender<BoardFrame>>,
    state: PollState,
    handle: Option<JoinHandle<()>>,
    /// Bumped on every selection change; cycles carry the value they were
    /// issued under.
    generation: Arc<AtomicU64>,
}

impl Poller {
    /// Create an idle poller showing the prompt frame.
    pub fn new(source: Arc<dyn TransitSource>, config: &BoardConfig) -> Self {
        let (frames, _) = watch::channel(BoardFrame::prompt());

        Self {
            source,
            period: config.poll_interval(),
            max_rows: config.max_rows_per_platform,
            frames: Arc::new(frames),
            state: PollState::Idle,
            handle: None,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Subscribe to published frames.
    pub fn subscribe(&self) -> watch::Receiver<BoardFrame> {
        self.frames.subscribe()
    }

    /// The most recently published frame.
    pub fn frame(&self) -> BoardFrame {
        self.frames.borrow().clone()
    }

    /// Current state.
    pub fn state(&self) -> &PollState {
        &self.state
    }

    /// The selected stop, if polling.
    pub fn selected(&self) -> Option<&Stop> {
        match &self.state {
            PollState::Polling(stop) => Some(stop),
            PollState::Idle => None,
        }
    }

    /// Apply a selection change. `None` clears the selection.
    pub fn apply(&mut self, stop: Option<Stop>) {
        match stop {
            Some(stop) => self.select(stop),
            None => self.clear(),
        }
    }

    /// Start polling `stop`, replacing any previous selection.
    ///
    /// Must be called from within a tokio runtime.
    pub fn select(&mut self, stop: Stop) {
        info!(stop = %stop.id, name = %stop.name, "station selected");

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.cancel();

        self.frames.send_replace(BoardFrame {
            stop: Some(stop.clone()),
            title: page_title(Some(&stop)),
            view: BoardView::Loading,
            updated_at: None,
        });

        let cycle = Arc::new(Cycle {
            source: self.source.clone(),
            stop: stop.clone(),
            max_rows: self.max_rows,
            generation,
            current: self.generation.clone(),
            frames: self.frames.clone(),
        });

        self.handle = Some(tokio::spawn(run_timer(cycle, self.period)));
        self.state = PollState::Polling(stop);
    }

    /// Stop polling and show the prompt. No fetch is made.
    pub fn clear(&mut self) {
        if let PollState::Polling(stop) = &self.state {
            info!(stop = %stop.id, "selection cleared");
        }

        self.generation.fetch_add(1, Ordering::SeqCst);
        self.cancel();
        self.state = PollState::Idle;
        self.frames.send_replace(BoardFrame::prompt());
    }

    /// Abort the active timer, if any.
    fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Everything a fetch-render cycle needs, shared by all ticks of one timer.
struct Cycle {
    source: Arc<dyn TransitSource>,
    stop: Stop,
    max_rows: usize,
    generation: u64,
    current: Arc<AtomicU64>,
    frames: Arc<watch::Sender<BoardFrame>>,
}

impl Cycle {
    /// Fetch arrivals, build the board and publish it.
    async fn run(&self) {
        debug!(stop = %self.stop.id, generation = self.generation, "poll cycle");

        let view = match self.source.arrivals(&self.stop.id).await {
            Ok(arrivals) => build_board(arrivals, self.max_rows),
            Err(e) => {
                error!(stop = %self.stop.id, error = %e, "failed to fetch arrivals");
                BoardView::Error
            }
        };

        let frame = BoardFrame {
            stop: Some(self.stop.clone()),
            title: page_title(Some(&self.stop)),
            view,
            updated_at: Some(Local::now().format("%H:%M:%S").to_string()),
        };

        // Checked under the channel lock, so a selection change that lands
        // after this check still overwrites the frame.
        let published = self.frames.send_if_modified(|current| {
            if self.current.load(Ordering::SeqCst) != self.generation {
                return false;
            }
            *current = frame;
            true
        });

        if !published {
            debug!(stop = %self.stop.id, generation = self.generation, "discarding stale arrivals");
        }
    }
}

/// Tick immediately, then every `period`, spawning one cycle per tick.
async fn run_timer(cycle: Arc<Cycle>, period: Duration) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;
        let cycle = cycle.clone();
        tokio::spawn(async move { cycle.run().await });
    }
}
