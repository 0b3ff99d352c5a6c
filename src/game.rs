use crate::board::{FlagOutcome, RevealOutcome};
use crate::timer::{Clock, GameClock, SystemClock, Timer};
use crate::{Board, BoardConfig, GameError, Position, SessionOptions, Tile};
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Playing,
    Won,
    Lost,
}

impl Phase {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Discrete input, already mapped from mouse and keyboard by the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Reveal(Position),
    ToggleFlag(Position),
    ToggleDebug,
    TogglePause,
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    NoChange,
    Changed,
    Won,
    Lost,
}

/// Everything a renderer needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Tiles as the player sees them; with debug on, hidden and flagged
    /// mines show as [`Tile::RevealedMine`].
    pub tiles: Array2<Tile>,
    pub flags_remaining: i64,
    pub clock: GameClock,
    pub phase: Phase,
    pub paused: bool,
    pub debug: bool,
}

/// One game session: a board, its outcome, and the timer.
pub struct Game<C: Clock = SystemClock> {
    board: Board,
    phase: Phase,
    debug: bool,
    flags_remaining: i64,
    timer: Timer<C>,
    rng: StdRng,
    options: SessionOptions,
}

impl Game<SystemClock> {
    pub fn new(config: BoardConfig, options: SessionOptions) -> Result<Self, GameError> {
        Self::with_clock(config, options, SystemClock)
    }
}

impl<C: Clock> Game<C> {
    pub fn with_clock(
        config: BoardConfig,
        options: SessionOptions,
        clock: C,
    ) -> Result<Self, GameError> {
        let mut rng = seeded_rng(options.seed);
        let board = Board::with_rng(config, &mut rng)?;
        Ok(Self::assemble(board, rng, options, clock))
    }

    /// Starts a game on a prepared board. Later resets still place mines
    /// at random.
    pub fn from_board(board: Board, options: SessionOptions, clock: C) -> Self {
        let rng = seeded_rng(options.seed);
        Self::assemble(board, rng, options, clock)
    }

    fn assemble(board: Board, rng: StdRng, options: SessionOptions, clock: C) -> Self {
        let flags_remaining = board.mines_count() as i64;
        Self {
            board,
            phase: Phase::Playing,
            debug: false,
            flags_remaining,
            timer: Timer::start(clock),
            rng,
            options,
        }
    }

    pub fn handle(&mut self, event: Event) -> Outcome {
        match event {
            Event::Reveal(pos) => self.reveal(pos),
            Event::ToggleFlag(pos) => self.toggle_flag(pos),
            Event::ToggleDebug => changed(self.toggle_debug()),
            Event::TogglePause => changed(self.toggle_pause()),
            Event::Reset => {
                self.reset();
                Outcome::Changed
            }
        }
    }

    /// Opens a tile. Ignored once the game is over or while paused.
    pub fn reveal(&mut self, pos: Position) -> Outcome {
        if !self.accepts_moves() {
            return Outcome::NoChange;
        }

        match self.board.reveal_tile(pos) {
            RevealOutcome::NoChange => Outcome::NoChange,
            RevealOutcome::HitMine => {
                self.finish(Phase::Lost);
                Outcome::Lost
            }
            RevealOutcome::Revealed(_) if self.board.is_won() => {
                self.finish(Phase::Won);
                Outcome::Won
            }
            RevealOutcome::Revealed(_) => Outcome::Changed,
        }
    }

    /// Flags or unflags a hidden tile. The counter is not clamped and goes
    /// negative when more flags than mines are placed.
    pub fn toggle_flag(&mut self, pos: Position) -> Outcome {
        if !self.accepts_moves() {
            return Outcome::NoChange;
        }

        match self.board.toggle_flag(pos) {
            FlagOutcome::Flagged => {
                self.flags_remaining -= 1;
                Outcome::Changed
            }
            FlagOutcome::Unflagged => {
                self.flags_remaining += 1;
                Outcome::Changed
            }
            FlagOutcome::NoChange => Outcome::NoChange,
        }
    }

    /// Shows or hides every mine. Only allowed while the game is in play.
    pub fn toggle_debug(&mut self) -> bool {
        if self.phase.is_finished() {
            return false;
        }
        self.debug = !self.debug;
        log::debug!("Debug overlay {}", if self.debug { "on" } else { "off" });
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        if self.timer.is_paused() {
            self.resume()
        } else {
            self.pause()
        }
    }

    /// Pause and resume are no-ops once the game is over; the clock stays
    /// frozen at the finishing time until a reset.
    pub fn pause(&mut self) -> bool {
        if self.phase.is_finished() {
            return false;
        }
        let paused = self.timer.pause();
        if paused {
            log::info!("Game paused at {}", self.timer.game_clock());
        }
        paused
    }

    pub fn resume(&mut self) -> bool {
        if self.phase.is_finished() {
            return false;
        }
        self.timer.resume()
    }

    /// Starts a new game on the same dimensions. The leaderboard is not
    /// touched; the timer restarts only if the session is configured to.
    pub fn reset(&mut self) {
        self.board.reset(&mut self.rng);
        self.phase = Phase::Playing;
        self.debug = false;
        self.flags_remaining = self.board.mines_count() as i64;
        if self.options.reset_timer_on_new_game {
            self.timer.restart();
        } else {
            self.timer.resume();
        }
        log::info!("New game started");
    }

    fn accepts_moves(&self) -> bool {
        !self.phase.is_finished() && !self.timer.is_paused()
    }

    /// Ending the game freezes the clock at the finishing time.
    fn finish(&mut self, phase: Phase) {
        self.phase = phase;
        self.timer.pause();
        log::info!(
            "Game {} after {}s",
            if phase == Phase::Won { "won" } else { "lost" },
            self.timer.elapsed_secs()
        );
    }

    pub fn frame(&self) -> Frame {
        let mut tiles = self.board.tiles().clone();
        if self.debug {
            for pos in self.board.mine_positions() {
                if let Some(index) = pos.index(tiles.nrows(), tiles.ncols()) {
                    tiles[index] = Tile::RevealedMine;
                }
            }
        }
        Frame {
            tiles,
            flags_remaining: self.flags_remaining,
            clock: self.timer.game_clock(),
            phase: self.phase,
            paused: self.timer.is_paused(),
            debug: self.debug,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_paused(&self) -> bool {
        self.timer.is_paused()
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    pub fn flags_remaining(&self) -> i64 {
        self.flags_remaining
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.timer.elapsed_secs()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn tile(&self, pos: Position) -> Option<Tile> {
        self.board.tile(pos)
    }

    pub fn dimensions(&self) -> (usize, usize) {
        self.board.dimensions()
    }
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn changed(did_change: bool) -> Outcome {
    if did_change {
        Outcome::Changed
    } else {
        Outcome::NoChange
    }
}
