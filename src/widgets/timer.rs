use crate::scheduler::{TickHandle, TickId, TickScheduler};
use crate::store::WidgetStore;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Default Pomodoro work period (25 minutes)
pub const DEFAULT_POMODORO_MS: u64 = 25 * 60 * 1000;

/// Which clock a [`TimerState`] drives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Counts down once per second and expires at zero
    Pomodoro,
    /// Counts up in hundredths of a second, forever
    Stopwatch,
}

impl TimerKind {
    /// Tick period, which is also the amount each tick moves the value by
    pub fn period(self) -> Duration {
        match self {
            TimerKind::Pomodoro => Duration::from_millis(1000),
            TimerKind::Stopwatch => Duration::from_millis(10),
        }
    }

    fn step_ms(self) -> u64 {
        self.period().as_millis() as u64
    }

    /// Key used when timer persistence is enabled
    pub fn store_key(self) -> &'static str {
        match self {
            TimerKind::Pomodoro => "pomodoroTimer",
            TimerKind::Stopwatch => "stopwatchTimer",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            TimerKind::Pomodoro => "Pomodoro Timer",
            TimerKind::Stopwatch => "Stopwatch",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerPhase {
    /// Never started, paused, or reset
    Idle,
    Running,
    /// Pomodoro reached zero; only `reset` leaves this phase
    Expired,
}

/// What a delivered tick did to the timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Tick did not belong to the live schedule
    Ignored,
    Advanced,
    /// Pomodoro hit zero on this tick and released its schedule
    Expired,
}

/// Minutes / seconds / hundredths split of a millisecond value (floor division)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockReading {
    pub minutes: u64,
    pub seconds: u64,
    pub hundredths: u64,
}

impl ClockReading {
    pub fn from_ms(ms: u64) -> Self {
        Self {
            minutes: ms / 60_000,
            seconds: (ms % 60_000) / 1000,
            hundredths: (ms % 1000) / 10,
        }
    }
}

/// `MM:SS`
pub fn format_minutes_seconds(ms: u64) -> String {
    let reading = ClockReading::from_ms(ms);
    format!("{:02}:{:02}", reading.minutes, reading.seconds)
}

/// `MM:SS.hh`
pub fn format_with_hundredths(ms: u64) -> String {
    let reading = ClockReading::from_ms(ms);
    format!(
        "{:02}:{:02}.{:02}",
        reading.minutes, reading.seconds, reading.hundredths
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SavedTimer {
    value_ms: u64,
    #[serde(default)]
    expired: bool,
}

/// Timer state machine shared by the Pomodoro and the stopwatch.
///
/// `running` is not stored separately: the timer is running exactly when it
/// holds a live [`TickHandle`]. Dropping the timer drops the handle, which
/// cancels the schedule.
pub struct TimerState {
    kind: TimerKind,
    default_ms: u64,
    value_ms: u64,
    expired: bool,
    handle: Option<TickHandle>,
    scheduler: TickScheduler,
    store: Option<WidgetStore>,
}

impl TimerState {
    /// Create an idle timer holding `default_ms`
    pub fn new(kind: TimerKind, default_ms: u64, scheduler: TickScheduler) -> Self {
        Self {
            kind,
            default_ms,
            value_ms: default_ms,
            expired: false,
            handle: None,
            scheduler,
            store: None,
        }
    }

    pub fn pomodoro(default_ms: u64, scheduler: TickScheduler) -> Self {
        Self::new(TimerKind::Pomodoro, default_ms, scheduler)
    }

    pub fn stopwatch(scheduler: TickScheduler) -> Self {
        Self::new(TimerKind::Stopwatch, 0, scheduler)
    }

    /// Enable persistence and restore any saved value.
    ///
    /// A restored timer is always idle (or expired); schedules do not
    /// survive a restart.
    pub fn with_store(mut self, store: WidgetStore) -> Self {
        if let Some(saved) = store.load_json::<SavedTimer>(self.kind.store_key()) {
            match self.kind {
                TimerKind::Pomodoro => {
                    self.value_ms = saved.value_ms.min(self.default_ms);
                    self.expired = saved.expired || self.value_ms == 0;
                }
                TimerKind::Stopwatch => {
                    self.value_ms = saved.value_ms;
                }
            }
            tracing::debug!(
                "Restored {} at {} ms",
                self.kind.title(),
                self.value_ms
            );
        }
        self.store = Some(store);
        self
    }

    pub fn kind(&self) -> TimerKind {
        self.kind
    }

    /// Remaining (Pomodoro) or elapsed (stopwatch) milliseconds
    pub fn value_ms(&self) -> u64 {
        self.value_ms
    }

    pub fn default_ms(&self) -> u64 {
        self.default_ms
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    pub fn phase(&self) -> TimerPhase {
        if self.handle.is_some() {
            TimerPhase::Running
        } else if self.expired {
            TimerPhase::Expired
        } else {
            TimerPhase::Idle
        }
    }

    /// Whether `id` is this timer's live schedule
    pub fn owns_tick(&self, id: TickId) -> bool {
        self.handle.as_ref().map(TickHandle::id) == Some(id)
    }

    /// Display text in the format of this timer's kind
    pub fn display(&self) -> String {
        match self.kind {
            TimerKind::Pomodoro => format_minutes_seconds(self.value_ms),
            TimerKind::Stopwatch => format_with_hundredths(self.value_ms),
        }
    }

    /// Idle -> Running. No-op while running or expired.
    ///
    /// Returns true if the timer started.
    pub fn start(&mut self, now: Instant) -> bool {
        if self.handle.is_some() || self.expired {
            return false;
        }
        if self.kind == TimerKind::Pomodoro && self.value_ms == 0 {
            self.expired = true;
            self.persist();
            return false;
        }

        self.handle = Some(self.scheduler.schedule(self.kind.period(), now));
        tracing::debug!("{} started at {}", self.kind.title(), self.display());
        self.persist();
        true
    }

    /// Running -> Idle, keeping the current value. No-op otherwise.
    pub fn pause(&mut self) -> bool {
        match self.handle.take() {
            Some(handle) => {
                handle.cancel();
                tracing::debug!("{} paused at {}", self.kind.title(), self.display());
                self.persist();
                true
            }
            None => false,
        }
    }

    /// Start when idle, pause when running
    pub fn toggle(&mut self, now: Instant) -> bool {
        if self.is_running() {
            self.pause()
        } else {
            self.start(now)
        }
    }

    /// Any phase -> Idle with the default value
    pub fn reset(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.cancel();
        }
        self.value_ms = self.default_ms;
        self.expired = false;
        tracing::debug!("{} reset to {}", self.kind.title(), self.display());
        self.persist();
    }

    /// Apply one scheduled tick.
    ///
    /// Ticks from any schedule other than the live one (for example one that
    /// was already queued when `pause` ran) are ignored.
    pub fn on_tick(&mut self, id: TickId) -> TickOutcome {
        if !self.owns_tick(id) {
            return TickOutcome::Ignored;
        }

        match self.kind {
            TimerKind::Stopwatch => {
                self.value_ms += self.kind.step_ms();
                TickOutcome::Advanced
            }
            TimerKind::Pomodoro => {
                self.value_ms = self.value_ms.saturating_sub(self.kind.step_ms());
                if self.value_ms > 0 {
                    return TickOutcome::Advanced;
                }

                if let Some(handle) = self.handle.take() {
                    handle.cancel();
                }
                self.expired = true;
                tracing::info!("{} expired", self.kind.title());
                self.persist();
                TickOutcome::Expired
            }
        }
    }

    fn persist(&self) {
        if let Some(store) = &self.store {
            store.save_json(
                self.kind.store_key(),
                &SavedTimer {
                    value_ms: self.value_ms,
                    expired: self.expired,
                },
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    /// Deliver every tick due at `now` to `timer`, returning how many it accepted
    fn drain(scheduler: &TickScheduler, timer: &mut TimerState, now: Instant) -> usize {
        let mut accepted = 0;
        while let Some(id) = scheduler.pop_due(now) {
            if timer.on_tick(id) != TickOutcome::Ignored {
                accepted += 1;
            }
        }
        accepted
    }

    #[test]
    fn test_defaults() {
        let scheduler = TickScheduler::new();
        let pomodoro = TimerState::pomodoro(DEFAULT_POMODORO_MS, scheduler.clone());
        let stopwatch = TimerState::stopwatch(scheduler);

        assert_eq!(pomodoro.value_ms(), 1_500_000);
        assert_eq!(pomodoro.display(), "25:00");
        assert_eq!(pomodoro.phase(), TimerPhase::Idle);
        assert_eq!(stopwatch.value_ms(), 0);
        assert_eq!(stopwatch.display(), "00:00.00");
    }

    #[test]
    fn test_start_is_idempotent() {
        let scheduler = TickScheduler::new();
        let mut timer = TimerState::stopwatch(scheduler.clone());
        let now = Instant::now();

        assert!(timer.start(now));
        assert!(!timer.start(now));
        assert!(!timer.start(now + ms(5)));
        assert_eq!(scheduler.active_count(), 1);
    }

    #[test]
    fn test_start_pause_sequences_never_double_schedule() {
        let scheduler = TickScheduler::new();
        let mut timer = TimerState::stopwatch(scheduler.clone());
        let now = Instant::now();

        let ops = [true, true, false, true, false, false, true, true, true, false, true];
        for (i, start) in ops.iter().enumerate() {
            if *start {
                timer.start(now + ms(i as u64));
            } else {
                timer.pause();
            }
            assert!(scheduler.active_count() <= 1);
            assert_eq!(scheduler.active_count() == 1, timer.is_running());
        }
    }

    #[test]
    fn test_stopwatch_counts_ten_ms_per_tick() {
        let scheduler = TickScheduler::new();
        let mut timer = TimerState::stopwatch(scheduler.clone());
        let start = Instant::now();
        timer.start(start);

        let ticks = drain(&scheduler, &mut timer, start + ms(10 * 6_234));
        assert_eq!(ticks, 6_234);
        assert_eq!(timer.value_ms(), 62_340);

        let reading = ClockReading::from_ms(timer.value_ms());
        let rebuilt =
            reading.minutes * 60_000 + reading.seconds * 1000 + reading.hundredths * 10;
        assert!(timer.value_ms() - rebuilt < 10);
        assert_eq!(timer.display(), "01:02.34");
    }

    #[test]
    fn test_pause_preserves_value_and_stops_ticks() {
        let scheduler = TickScheduler::new();
        let mut timer = TimerState::stopwatch(scheduler.clone());
        let start = Instant::now();
        timer.start(start);
        drain(&scheduler, &mut timer, start + ms(50));

        assert!(timer.pause());
        assert_eq!(timer.value_ms(), 50);
        assert_eq!(drain(&scheduler, &mut timer, start + ms(500)), 0);
        assert_eq!(timer.value_ms(), 50);
        assert!(!timer.pause());
    }

    #[test]
    fn test_pause_racing_a_queued_tick() {
        let scheduler = TickScheduler::new();
        let mut timer = TimerState::stopwatch(scheduler.clone());
        let start = Instant::now();
        timer.start(start);

        // Host pulled a tick, then the user paused before it was delivered
        let queued = scheduler.pop_due(start + ms(10)).unwrap();
        timer.pause();

        assert_eq!(timer.on_tick(queued), TickOutcome::Ignored);
        assert_eq!(timer.value_ms(), 0);
    }

    #[test]
    fn test_resume_continues_from_paused_value() {
        let scheduler = TickScheduler::new();
        let mut timer = TimerState::stopwatch(scheduler.clone());
        let start = Instant::now();
        timer.start(start);
        drain(&scheduler, &mut timer, start + ms(30));
        timer.pause();

        let resumed = start + ms(1000);
        timer.start(resumed);
        drain(&scheduler, &mut timer, resumed + ms(20));
        assert_eq!(timer.value_ms(), 50);
    }

    #[test]
    fn test_pomodoro_expires_after_1500_ticks() {
        let scheduler = TickScheduler::new();
        let mut timer = TimerState::pomodoro(DEFAULT_POMODORO_MS, scheduler.clone());
        let start = Instant::now();
        timer.start(start);

        let mut outcomes = Vec::new();
        for n in 1..=1500u64 {
            let id = scheduler.pop_due(start + ms(n * 1000)).unwrap();
            outcomes.push(timer.on_tick(id));
        }

        assert!(outcomes[..1499].iter().all(|o| *o == TickOutcome::Advanced));
        assert_eq!(outcomes[1499], TickOutcome::Expired);
        assert_eq!(timer.value_ms(), 0);
        assert_eq!(timer.phase(), TimerPhase::Expired);
        assert_eq!(timer.display(), "00:00");
        assert_eq!(scheduler.active_count(), 0);

        // No further decrements, and start stays a no-op until reset
        assert_eq!(drain(&scheduler, &mut timer, start + ms(2_000_000)), 0);
        assert!(!timer.start(start + ms(2_000_000)));
        assert_eq!(timer.value_ms(), 0);
    }

    #[test]
    fn test_pomodoro_display_uses_floor() {
        let scheduler = TickScheduler::new();
        let mut timer = TimerState::pomodoro(DEFAULT_POMODORO_MS, scheduler.clone());
        let start = Instant::now();
        timer.start(start);
        drain(&scheduler, &mut timer, start + ms(61_000));

        assert_eq!(timer.value_ms(), 1_439_000);
        assert_eq!(timer.display(), "23:59");
        assert_eq!(format_minutes_seconds(59_999), "00:59");
        assert_eq!(format_with_hundredths(59_999), "00:59.99");
    }

    #[test]
    fn test_reset_from_every_phase() {
        let scheduler = TickScheduler::new();
        let start = Instant::now();

        // Idle
        let mut timer = TimerState::pomodoro(3000, scheduler.clone());
        timer.reset();
        assert_eq!((timer.phase(), timer.value_ms()), (TimerPhase::Idle, 3000));

        // Running
        timer.start(start);
        drain(&scheduler, &mut timer, start + ms(1000));
        timer.reset();
        assert_eq!((timer.phase(), timer.value_ms()), (TimerPhase::Idle, 3000));
        assert_eq!(scheduler.active_count(), 0);

        // Expired
        timer.start(start);
        drain(&scheduler, &mut timer, start + ms(3000));
        assert_eq!(timer.phase(), TimerPhase::Expired);
        timer.reset();
        assert_eq!((timer.phase(), timer.value_ms()), (TimerPhase::Idle, 3000));
        assert!(timer.start(start));
    }

    #[test]
    fn test_toggle_switches_between_running_and_idle() {
        let scheduler = TickScheduler::new();
        let mut timer = TimerState::stopwatch(scheduler.clone());
        let now = Instant::now();

        timer.toggle(now);
        assert_eq!(timer.phase(), TimerPhase::Running);
        timer.toggle(now);
        assert_eq!(timer.phase(), TimerPhase::Idle);
        assert_eq!(scheduler.active_count(), 0);
    }

    #[test]
    fn test_dropping_timer_releases_schedule() {
        let scheduler = TickScheduler::new();
        {
            let mut timer = TimerState::stopwatch(scheduler.clone());
            timer.start(Instant::now());
            assert_eq!(scheduler.active_count(), 1);
        }
        assert_eq!(scheduler.active_count(), 0);
    }

    #[test]
    fn test_timers_ignore_each_others_ticks() {
        let scheduler = TickScheduler::new();
        let mut pomodoro = TimerState::pomodoro(DEFAULT_POMODORO_MS, scheduler.clone());
        let mut stopwatch = TimerState::stopwatch(scheduler.clone());
        let start = Instant::now();
        pomodoro.start(start);
        stopwatch.start(start);

        while let Some(id) = scheduler.pop_due(start + ms(1000)) {
            pomodoro.on_tick(id);
            stopwatch.on_tick(id);
        }
        assert_eq!(pomodoro.value_ms(), 1_499_000);
        assert_eq!(stopwatch.value_ms(), 1000);
    }

    #[test]
    fn test_persistence_restores_idle_value() {
        let store = WidgetStore::ephemeral();
        let scheduler = TickScheduler::new();
        let start = Instant::now();

        let mut timer = TimerState::stopwatch(scheduler.clone()).with_store(store.clone());
        timer.start(start);
        drain(&scheduler, &mut timer, start + ms(120));
        timer.pause();
        drop(timer);

        let restored = TimerState::stopwatch(scheduler).with_store(store);
        assert_eq!(restored.value_ms(), 120);
        assert_eq!(restored.phase(), TimerPhase::Idle);
    }

    #[test]
    fn test_persistence_restores_expired_pomodoro() {
        let store = WidgetStore::ephemeral();
        let scheduler = TickScheduler::new();
        let start = Instant::now();

        let mut timer = TimerState::pomodoro(2000, scheduler.clone()).with_store(store.clone());
        timer.start(start);
        drain(&scheduler, &mut timer, start + ms(2000));
        drop(timer);

        let restored = TimerState::pomodoro(2000, scheduler).with_store(store);
        assert_eq!(restored.phase(), TimerPhase::Expired);
    }

    #[test]
    fn test_ticks_alone_are_not_persisted() {
        let store = WidgetStore::ephemeral();
        let scheduler = TickScheduler::new();
        let start = Instant::now();

        let mut timer = TimerState::stopwatch(scheduler.clone()).with_store(store.clone());
        timer.start(start);
        drain(&scheduler, &mut timer, start + ms(100));

        let saved: SavedTimer = store.load_json(TimerKind::Stopwatch.store_key()).unwrap();
        assert_eq!(saved.value_ms, 0);
    }

    #[test]
    fn test_malformed_saved_timer_uses_default() {
        let store = WidgetStore::ephemeral();
        store.save_raw(TimerKind::Pomodoro.store_key(), "nonsense");

        let timer = TimerState::pomodoro(DEFAULT_POMODORO_MS, TickScheduler::new()).with_store(store);
        assert_eq!(timer.value_ms(), DEFAULT_POMODORO_MS);
        assert_eq!(timer.phase(), TimerPhase::Idle);
    }
}
