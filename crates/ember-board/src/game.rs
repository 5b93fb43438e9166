//! Board sandbox state: marks, turn order and the menu/pause flow.
//! Nothing here decides a winner.

/// Contents of one board cell.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Cell {
    Cross,
    Circle,
    Empty,
}

impl Cell {
    /// Mark placed by player `index` (0 = cross, 1 = circle).
    #[inline]
    pub fn of_player(index: usize) -> Self {
        if index == 0 { Cell::Cross } else { Cell::Circle }
    }
}

pub const PAUSE_TEXT: &str = "Game Paused...";

/// Cells are indexed row-major from the bottom row: index `3 * row + col`,
/// row 0 at the bottom of the screen.
#[derive(Debug, Clone)]
pub struct Game {
    board: [Cell; 9],
    player: usize,
    in_menu: bool,
    paused: bool,
}

impl Game {
    /// Starts on the main menu.
    pub fn new() -> Self {
        Self {
            board: [Cell::Empty; 9],
            player: 0,
            in_menu: true,
            paused: false,
        }
    }

    /// Leaves the menu with an empty board.
    pub fn start(&mut self) {
        self.in_menu = false;
        self.reset();
        log::info!("board started");
    }

    /// Clears the board; cross moves first.
    pub fn reset(&mut self) {
        self.board = [Cell::Empty; 9];
        self.player = 0;
        self.paused = false;
    }

    pub fn open_menu(&mut self) {
        self.in_menu = true;
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Places the current player's mark on an empty cell and hands the
    /// turn over. Occupied cells and a paused board are ignored.
    pub fn place(&mut self, index: usize) {
        if self.paused || self.board[index] != Cell::Empty {
            return;
        }
        self.board[index] = Cell::of_player(self.player);
        self.player = 1 - self.player;
        log::debug!("mark placed on cell {index}");
    }

    #[inline]
    pub fn board(&self) -> &[Cell; 9] {
        &self.board
    }

    /// Index of the player to move (0 or 1).
    #[inline]
    pub fn player(&self) -> usize {
        self.player
    }

    /// Marks placed so far by each player.
    pub fn mark_counts(&self) -> [usize; 2] {
        let count = |mark| self.board.iter().filter(|&&c| c == mark).count();
        [count(Cell::Cross), count(Cell::Circle)]
    }

    #[inline]
    pub fn in_menu(&self) -> bool {
        self.in_menu
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
