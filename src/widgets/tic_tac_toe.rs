use crate::store::WidgetStore;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const BOARD_KEY: &str = "ticTacToeBoard";
pub const PLAYER_KEY: &str = "ticTacToePlayer";

/// The 8 winning triples: rows, columns, diagonals
pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    pub fn other(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Player::X => "X",
            Player::O => "O",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "X" => Some(Player::X),
            "O" => Some(Player::O),
            _ => None,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One board square. Stored as `"X"`, `"O"` or `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<Player>", into = "Option<Player>")]
pub enum Cell {
    #[default]
    Empty,
    X,
    O,
}

impl Cell {
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::X => Some(Player::X),
            Cell::O => Some(Player::O),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    pub fn symbol(self) -> &'static str {
        self.player().map(Player::as_str).unwrap_or(" ")
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        match player {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }
}

impl From<Option<Player>> for Cell {
    fn from(player: Option<Player>) -> Self {
        player.map(Cell::from).unwrap_or(Cell::Empty)
    }
}

impl From<Cell> for Option<Player> {
    fn from(cell: Cell) -> Self {
        cell.player()
    }
}

/// Result of evaluating a board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    InProgress,
    /// Winner plus the triple that won
    Won(Player, [usize; 3]),
    Draw,
}

impl Outcome {
    pub fn is_over(self) -> bool {
        self != Outcome::InProgress
    }
}

/// Check the 8 triples for three equal marks; a full board without one is a draw
pub fn outcome(cells: &[Cell; 9]) -> Outcome {
    for line in LINES {
        if let Some(player) = cells[line[0]].player() {
            if cells[line[1]] == cells[line[0]] && cells[line[2]] == cells[line[0]] {
                return Outcome::Won(player, line);
            }
        }
    }
    if cells.iter().all(|cell| !cell.is_empty()) {
        Outcome::Draw
    } else {
        Outcome::InProgress
    }
}

/// Winning player, if any
pub fn winner(cells: &[Cell; 9]) -> Option<Player> {
    match outcome(cells) {
        Outcome::Won(player, _) => Some(player),
        _ => None,
    }
}

/// Board cells plus the player to move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub cells: [Cell; 9],
    pub current: Player,
}

impl Default for Board {
    fn default() -> Self {
        Self {
            cells: [Cell::Empty; 9],
            current: Player::X,
        }
    }
}

impl Board {
    fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|c| **c == cell).count()
    }

    /// X moves first and turns alternate, so X leads O by zero or one mark
    pub fn marks_alternate(&self) -> bool {
        let x = self.count(Cell::X);
        let o = self.count(Cell::O);
        x == o || x == o + 1
    }

    /// Player whose turn it is according to the marks on the board
    pub fn player_from_marks(&self) -> Player {
        if self.count(Cell::X) == self.count(Cell::O) {
            Player::X
        } else {
            Player::O
        }
    }

    pub fn outcome(&self) -> Outcome {
        outcome(&self.cells)
    }
}

/// Tic-tac-toe widget state; persisted after every move and reset
pub struct TicTacToeState {
    board: Board,
    /// Highlighted square for keyboard play
    cursor: usize,
    store: WidgetStore,
}

impl TicTacToeState {
    /// Load the saved board, or start a fresh game.
    ///
    /// A board that cannot be parsed or breaks turn alternation is discarded.
    /// A missing or inconsistent player marker is re-derived from the marks.
    pub fn load(store: WidgetStore) -> Self {
        let board = match store.load_json::<[Cell; 9]>(BOARD_KEY) {
            Some(cells) => {
                let mut board = Board {
                    cells,
                    current: Player::X,
                };
                if board.marks_alternate() {
                    let expected = board.player_from_marks();
                    match store.load_raw(PLAYER_KEY).as_deref().and_then(Player::parse) {
                        Some(saved) if saved == expected => board.current = saved,
                        saved => {
                            tracing::warn!(
                                "Stored player {:?} does not match the board, using {}",
                                saved,
                                expected
                            );
                            board.current = expected;
                        }
                    }
                    board
                } else {
                    tracing::warn!("Stored board breaks turn order, starting a new game");
                    Board::default()
                }
            }
            None => Board::default(),
        };

        Self {
            board,
            cursor: 4,
            store,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Player {
        self.board.current
    }

    pub fn outcome(&self) -> Outcome {
        self.board.outcome()
    }

    /// Place the current player's mark on `index`.
    ///
    /// Out-of-range indices, occupied squares and moves after the game ended
    /// are ignored. Returns true if the board changed.
    pub fn play_move(&mut self, index: usize) -> bool {
        if index >= self.board.cells.len()
            || !self.board.cells[index].is_empty()
            || self.outcome().is_over()
        {
            return false;
        }

        let player = self.board.current;
        self.board.cells[index] = player.into();
        self.board.current = player.other();
        tracing::debug!("{} played square {}", player, index);
        self.persist();
        true
    }

    /// Clear the board with X to move
    pub fn reset(&mut self) {
        self.board = Board::default();
        tracing::debug!("Tic-tac-toe reset");
        self.persist();
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the cursor by whole squares, clamped to the grid
    pub fn move_cursor(&mut self, dx: i8, dy: i8) {
        let col = (self.cursor % 3) as i8 + dx;
        let row = (self.cursor / 3) as i8 + dy;
        self.cursor = (row.clamp(0, 2) * 3 + col.clamp(0, 2)) as usize;
    }

    pub fn play_cursor(&mut self) -> bool {
        self.play_move(self.cursor)
    }

    fn persist(&self) {
        self.store.save_json(BOARD_KEY, &self.board.cells);
        self.store.save_raw(PLAYER_KEY, self.board.current.as_str());
    }
}
