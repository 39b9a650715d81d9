use crate::config::Config;
use crate::core::InputResult;
use crate::scheduler::TickScheduler;
use crate::sound::AlertPlayer;
use crate::store::WidgetStore;
use crate::widgets::{
    MusicPlayerState, ScratchpadState, TicTacToeState, TickOutcome, TimerState, TodoListState,
};
use crossterm::event::{KeyCode, KeyModifiers};
use std::time::Instant;

/// Volume change per `+` / `-` press
const VOLUME_STEP: i16 = 5;

/// Widgets on the page, in reading order (left to right, top to bottom)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetId {
    Todo,
    Pomodoro,
    Stopwatch,
    TicTacToe,
    Music,
    Scratchpad,
}

impl WidgetId {
    pub const ALL: [WidgetId; 6] = [
        WidgetId::Todo,
        WidgetId::Pomodoro,
        WidgetId::Stopwatch,
        WidgetId::TicTacToe,
        WidgetId::Music,
        WidgetId::Scratchpad,
    ];

    fn position(self) -> usize {
        Self::ALL.iter().position(|id| *id == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        Self::ALL[(self.position() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn title(self) -> &'static str {
        match self {
            WidgetId::Todo => "TODO App",
            WidgetId::Pomodoro => "Pomodoro Timer",
            WidgetId::Stopwatch => "Stopwatch",
            WidgetId::TicTacToe => "Tic-Tac-Toe",
            WidgetId::Music => "Music Player",
            WidgetId::Scratchpad => "Scratchpad",
        }
    }

    /// Key help for the status bar
    pub fn key_hints(self) -> &'static str {
        match self {
            WidgetId::Todo => "Enter:Add  Up/Down:Select  Ctrl+T:Toggle  Ctrl+D:Remove",
            WidgetId::Pomodoro | WidgetId::Stopwatch => "Space:Start/Pause  r:Reset",
            WidgetId::TicTacToe => "Arrows:Move  Enter:Play  1-9:Square  r:Reset",
            WidgetId::Music => "Space:Play/Pause  +/-:Volume",
            WidgetId::Scratchpad => "Ctrl+Y:Copy all  Ctrl+V:Paste",
        }
    }
}

/// Core application state (frontend-agnostic)
///
/// AppCore owns every widget on the page plus the shared tick scheduler.
/// Each widget received its own namespaced view of the store at
/// construction.
pub struct AppCore {
    /// Application configuration
    pub config: Config,

    /// Recurring tick source shared by both timers
    pub scheduler: TickScheduler,

    pub todo: TodoListState,
    pub pomodoro: TimerState,
    pub stopwatch: TimerState,
    pub tic_tac_toe: TicTacToeState,
    pub music: MusicPlayerState,
    pub scratchpad: ScratchpadState,

    /// Widget receiving key input
    pub focus: WidgetId,

    /// Application running flag
    pub running: bool,

    /// Set whenever visible state changed since the last frame
    pub needs_render: bool,

    /// Transient message for the status bar
    pub status_text: String,

    alert: AlertPlayer,
}

impl AppCore {
    /// Mount every widget, loading persisted state from `store`
    pub fn new(config: Config, store: WidgetStore) -> Self {
        let scheduler = TickScheduler::new();

        let mut pomodoro = TimerState::pomodoro(config.pomodoro.duration_ms(), scheduler.clone());
        let mut stopwatch = TimerState::stopwatch(scheduler.clone());
        if config.store.persist_timers {
            pomodoro = pomodoro.with_store(store.clone());
            stopwatch = stopwatch.with_store(store.clone());
        }

        tracing::info!(
            "Mounting widgets (namespace {:?}, timer persistence {})",
            store.namespace(),
            config.store.persist_timers
        );

        Self {
            todo: TodoListState::load(store.clone()),
            tic_tac_toe: TicTacToeState::load(store.clone()),
            scratchpad: ScratchpadState::load(store),
            music: MusicPlayerState::new(config.music.volume),
            pomodoro,
            stopwatch,
            scheduler,
            config,
            focus: WidgetId::Todo,
            running: true,
            needs_render: true,
            status_text: String::new(),
            alert: AlertPlayer::silent(),
        }
    }

    /// Use `alert` for Pomodoro expiry
    pub fn with_alert(mut self, alert: AlertPlayer) -> Self {
        self.alert = alert;
        self
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
        self.needs_render = true;
    }

    pub fn focus_previous(&mut self) {
        self.focus = self.focus.previous();
        self.needs_render = true;
    }

    pub fn quit(&mut self) {
        tracing::info!("Quit requested");
        self.running = false;
    }

    /// Route one key press.
    ///
    /// Ticks already due at `now` are delivered first, so a pause never
    /// discards time that elapsed before the key arrived.
    ///
    /// Global keys (focus cycling, quit) win over widget keys. Keys the
    /// focused text widget should edit come back as `ForwardToEditor`.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers, now: Instant) -> InputResult {
        self.poll_ticks(now);
        let ctrl = modifiers.contains(KeyModifiers::CONTROL);

        let result = match code {
            KeyCode::Char('q') | KeyCode::Char('Q') if ctrl => {
                self.quit();
                InputResult::Quit
            }
            KeyCode::Tab => {
                self.focus_next();
                InputResult::Handled
            }
            KeyCode::BackTab => {
                self.focus_previous();
                InputResult::Handled
            }
            _ => match self.focus {
                WidgetId::Pomodoro => Self::timer_key(&mut self.pomodoro, code, ctrl, now),
                WidgetId::Stopwatch => Self::timer_key(&mut self.stopwatch, code, ctrl, now),
                WidgetId::TicTacToe => self.board_key(code, ctrl),
                WidgetId::Music => self.music_key(code, ctrl),
                WidgetId::Todo => self.todo_key(code, ctrl),
                WidgetId::Scratchpad => match code {
                    KeyCode::Char('y') if ctrl => InputResult::CopyScratchpad,
                    KeyCode::Char('v') if ctrl => InputResult::PasteScratchpad,
                    _ => InputResult::ForwardToEditor,
                },
            },
        };

        if result.needs_render() {
            self.needs_render = true;
        }
        result
    }

    fn timer_key(timer: &mut TimerState, code: KeyCode, ctrl: bool, now: Instant) -> InputResult {
        if ctrl {
            return InputResult::Ignored;
        }
        match code {
            KeyCode::Char(' ') | KeyCode::Enter => {
                timer.toggle(now);
                InputResult::Handled
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                timer.reset();
                InputResult::Handled
            }
            _ => InputResult::Ignored,
        }
    }

    fn board_key(&mut self, code: KeyCode, ctrl: bool) -> InputResult {
        if ctrl {
            return InputResult::Ignored;
        }
        let game = &mut self.tic_tac_toe;
        match code {
            KeyCode::Left => game.move_cursor(-1, 0),
            KeyCode::Right => game.move_cursor(1, 0),
            KeyCode::Up => game.move_cursor(0, -1),
            KeyCode::Down => game.move_cursor(0, 1),
            KeyCode::Enter | KeyCode::Char(' ') => {
                game.play_cursor();
            }
            KeyCode::Char(c @ '1'..='9') => {
                game.play_move(c as usize - '1' as usize);
            }
            KeyCode::Char('r') | KeyCode::Char('R') => game.reset(),
            _ => return InputResult::Ignored,
        }
        InputResult::Handled
    }

    fn music_key(&mut self, code: KeyCode, ctrl: bool) -> InputResult {
        if ctrl {
            return InputResult::Ignored;
        }
        match code {
            KeyCode::Char(' ') | KeyCode::Enter => self.music.toggle_play(),
            KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Right => {
                self.music.adjust_volume(VOLUME_STEP)
            }
            KeyCode::Char('-') | KeyCode::Left => self.music.adjust_volume(-VOLUME_STEP),
            _ => return InputResult::Ignored,
        }
        InputResult::Handled
    }

    fn todo_key(&mut self, code: KeyCode, ctrl: bool) -> InputResult {
        match code {
            KeyCode::Enter => InputResult::SubmitTodo,
            KeyCode::Up => {
                self.todo.select_previous();
                InputResult::Handled
            }
            KeyCode::Down => {
                self.todo.select_next();
                InputResult::Handled
            }
            KeyCode::Char('t') if ctrl => {
                self.todo.toggle_selected();
                InputResult::Handled
            }
            KeyCode::Char('d') if ctrl => {
                self.todo.remove_selected();
                InputResult::Handled
            }
            _ => InputResult::ForwardToEditor,
        }
    }

    /// Add a todo from submitted input text
    pub fn submit_todo(&mut self, text: &str) -> bool {
        let added = self.todo.add(text);
        if added {
            self.needs_render = true;
        }
        added
    }

    /// Store new scratchpad text coming from the editor
    pub fn update_scratchpad(&mut self, text: String) {
        if self.scratchpad.set_text(text) {
            self.needs_render = true;
        }
    }

    /// Deliver every tick due at `now`, one at a time, to the owning timer.
    ///
    /// Returns the number of ticks taken from the scheduler.
    pub fn poll_ticks(&mut self, now: Instant) -> usize {
        let mut delivered = 0;
        while let Some(id) = self.scheduler.pop_due(now) {
            delivered += 1;
            if self.pomodoro.owns_tick(id) {
                if self.pomodoro.on_tick(id) == TickOutcome::Expired {
                    self.status_text = "Pomodoro finished!".to_string();
                    self.alert.play_expiry();
                }
            } else if self.stopwatch.owns_tick(id) {
                self.stopwatch.on_tick(id);
            } else {
                tracing::debug!("Dropping tick for released schedule {:?}", id);
            }
        }

        if delivered > 0 {
            self.needs_render = true;
        }
        delivered
    }
}
