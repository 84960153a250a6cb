//! Tick scheduling
//!
//! The game never owns a timer directly. It asks a [`Scheduler`] to fire every
//! `period` and to stop again; whoever drives the game loop waits on the
//! scheduler and calls the controller's tick when it fires.
//!
//! - [`IntervalScheduler`] is backed by `tokio::time::Interval`
//! - [`ManualScheduler`] only records requests, so tests can step ticks by hand

use std::time::Duration;

use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

/// Arms and disarms a repeating tick
pub trait Scheduler {
    /// Start firing every `period`, replacing any running timer
    fn arm(&mut self, period: Duration);

    /// Stop firing
    fn disarm(&mut self);

    /// Period of the running timer, if armed
    fn period(&self) -> Option<Duration>;

    fn is_armed(&self) -> bool {
        self.period().is_some()
    }
}

/// Fixed-delay repeating timer on the tokio clock
#[derive(Debug, Default)]
pub struct IntervalScheduler {
    timer: Option<Interval>,
}

impl IntervalScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for the next tick. Never resolves while disarmed, which makes it
    /// safe to poll from a `select!` loop at all times.
    pub async fn tick(&mut self) {
        match self.timer.as_mut() {
            Some(timer) => {
                timer.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}

impl Scheduler for IntervalScheduler {
    fn arm(&mut self, period: Duration) {
        // First tick one full period from now, like a browser interval
        let mut timer = interval_at(Instant::now() + period, period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.timer = Some(timer);
    }

    fn disarm(&mut self) {
        self.timer = None;
    }

    fn period(&self) -> Option<Duration> {
        self.timer.as_ref().map(Interval::period)
    }
}

/// A request made to a [`ManualScheduler`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleEvent {
    Armed(Duration),
    Disarmed,
}

/// Scheduler that never fires on its own; it keeps a log of requests
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    period: Option<Duration>,
    history: Vec<ScheduleEvent>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> &[ScheduleEvent] {
        &self.history
    }
}

impl Scheduler for ManualScheduler {
    fn arm(&mut self, period: Duration) {
        self.period = Some(period);
        self.history.push(ScheduleEvent::Armed(period));
    }

    fn disarm(&mut self) {
        self.period = None;
        self.history.push(ScheduleEvent::Disarmed);
    }

    fn period(&self) -> Option<Duration> {
        self.period
    }
}
