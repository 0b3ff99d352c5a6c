use crate::game::{Event, Game, Outcome};
use crate::leaderboard::{Entry, LeaderboardStore};
use crate::timer::Clock;
use crate::PlayerName;

/// A named player's run of games, recording wins on the leaderboard.
pub struct Session<C: Clock> {
    game: Game<C>,
    store: LeaderboardStore,
    player: PlayerName,
    /// Set while the leaderboard view holds the timer paused.
    leaderboard_pause: Option<bool>,
    last_rank: Option<usize>,
}

impl<C: Clock> Session<C> {
    pub fn new(game: Game<C>, store: LeaderboardStore, player: PlayerName) -> Self {
        Self {
            game,
            store,
            player,
            leaderboard_pause: None,
            last_rank: None,
        }
    }

    /// Applies an input event. A win is recorded exactly once; a failed
    /// leaderboard write is logged and play carries on.
    pub fn handle(&mut self, event: Event) -> Outcome {
        if event == Event::Reset {
            self.last_rank = None;
        }
        let outcome = self.game.handle(event);
        if outcome == Outcome::Won {
            self.record_win();
        }
        outcome
    }

    fn record_win(&mut self) {
        let seconds = self.game.elapsed_secs();
        match self.store.record(self.player.as_str(), seconds) {
            Ok(rank) => {
                if let Some(rank) = rank {
                    log::info!("{} placed #{} with {}s", self.player, rank, seconds);
                }
                self.last_rank = rank;
            }
            Err(e) => {
                log::warn!("Win by {} in {}s not saved: {}", self.player, seconds, e);
                self.last_rank = self.store.leaderboard().rank_of(self.player.as_str());
            }
        }
    }

    /// Shows the leaderboard, pausing the game for as long as it is open.
    pub fn open_leaderboard(&mut self) -> &[Entry] {
        if self.leaderboard_pause.is_none() {
            self.leaderboard_pause = Some(self.game.pause());
        }
        self.store.query()
    }

    /// Resumes the game, unless it was already paused when the view opened.
    pub fn close_leaderboard(&mut self) {
        if let Some(true) = self.leaderboard_pause.take() {
            self.game.resume();
        }
    }

    pub fn leaderboard_open(&self) -> bool {
        self.leaderboard_pause.is_some()
    }

    /// Rank earned by the most recent win of this game, if it made the board.
    pub fn last_rank(&self) -> Option<usize> {
        self.last_rank
    }

    pub fn game(&self) -> &Game<C> {
        &self.game
    }

    pub fn store(&self) -> &LeaderboardStore {
        &self.store
    }

    pub fn player(&self) -> &PlayerName {
        &self.player
    }
}
