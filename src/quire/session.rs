//! # Editor Session and Autosave
//!
//! An [`EditorSession`] ties one [`QuireApi`] to one autosave timer for the
//! lifetime of an editing session.
//!
//! Everything runs on a single execution context: the API lives in an
//! `Rc<RefCell<_>>` and the timer is a `tokio` local task. UI callbacks get a
//! handle via [`EditorSession::handle`] and must not hold a borrow across an
//! `.await`. A tick that finds the API borrowed skips that round instead of
//! blocking.
//!
//! Lifecycle:
//! - [`EditorSession::start`] arms the timer. Arming again cancels the previous
//!   timer first, so there is never more than one.
//! - [`EditorSession::shutdown`] stops the timer and performs one last save.
//!
//! `start` spawns onto the current `tokio::task::LocalSet` and panics outside one.

use crate::api::QuireApi;
use crate::persistence::SaveReport;
use crate::store::{FileAccess, StorageBackend};
use crate::surface::EditorSurface;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

pub type SharedApi<B, F, S> = Rc<RefCell<QuireApi<B, F, S>>>;

/// A fixed-period repeating save. Not debounced by activity.
pub struct Autosave {
    period: Duration,
    task: Option<JoinHandle<()>>,
    ticks: Rc<Cell<u64>>,
}

impl Autosave {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            task: None,
            ticks: Rc::new(Cell::new(0)),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_armed(&self) -> bool {
        self.task.is_some()
    }

    /// Completed ticks since creation, across re-arms.
    pub fn ticks(&self) -> u64 {
        self.ticks.get()
    }

    pub fn arm<B, F, S>(&mut self, api: &SharedApi<B, F, S>)
    where
        B: StorageBackend + 'static,
        F: FileAccess + 'static,
        S: EditorSurface + 'static,
    {
        if self.stop() {
            tracing::debug!("re-arming autosave");
        }

        let api = Rc::downgrade(api);
        let ticks = Rc::clone(&self.ticks);
        let period = self.period;

        self.task = Some(tokio::task::spawn_local(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let Some(api) = api.upgrade() else {
                    tracing::debug!("autosave target dropped, stopping");
                    break;
                };
                let Ok(mut api) = api.try_borrow_mut() else {
                    tracing::debug!("autosave skipped, document busy");
                    continue;
                };
                let report = api.autosave();
                if !report.success {
                    tracing::warn!(
                        "autosave failed: {}",
                        report.message.as_deref().unwrap_or("unknown error")
                    );
                }
                ticks.set(ticks.get() + 1);
            }
        }));
        tracing::info!("autosave armed every {:?}", self.period);
    }

    /// Cancels the timer. Returns true if one was running.
    pub fn stop(&mut self) -> bool {
        match self.task.take() {
            Some(task) => {
                task.abort();
                true
            }
            None => false,
        }
    }
}

impl Drop for Autosave {
    fn drop(&mut self) {
        self.stop();
    }
}

pub struct EditorSession<B, F, S>
where
    B: StorageBackend + 'static,
    F: FileAccess + 'static,
    S: EditorSurface + 'static,
{
    api: SharedApi<B, F, S>,
    autosave: Option<Autosave>,
}

impl<B, F, S> EditorSession<B, F, S>
where
    B: StorageBackend + 'static,
    F: FileAccess + 'static,
    S: EditorSurface + 'static,
{
    /// `interval` of `None` runs the session without a timer.
    pub fn new(api: QuireApi<B, F, S>, interval: Option<Duration>) -> Self {
        Self {
            api: Rc::new(RefCell::new(api)),
            autosave: interval.map(Autosave::new),
        }
    }

    pub fn handle(&self) -> SharedApi<B, F, S> {
        Rc::clone(&self.api)
    }

    pub fn start(&mut self) {
        if let Some(autosave) = self.autosave.as_mut() {
            autosave.arm(&self.api);
        }
    }

    pub fn is_autosaving(&self) -> bool {
        self.autosave.as_ref().is_some_and(Autosave::is_armed)
    }

    pub fn autosave_ticks(&self) -> u64 {
        self.autosave.as_ref().map(Autosave::ticks).unwrap_or_default()
    }

    /// Stops the timer, then saves once more so the last edits are not lost.
    pub fn shutdown(mut self) -> SaveReport {
        if let Some(autosave) = self.autosave.as_mut() {
            autosave.stop();
        }
        let report = match self.api.try_borrow_mut() {
            Ok(mut api) => api.save(),
            Err(_) => {
                tracing::warn!("final save skipped, document still borrowed");
                SaveReport::failed("document is busy".to_string())
            }
        };
        tracing::info!("session closed, final save ok: {}", report.success);
        report
    }
}
