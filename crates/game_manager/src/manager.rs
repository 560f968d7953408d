//! Registry of active games

use chess_rules::{Board, BoardView, Game, GameStatus, Square, notation};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use tracing::{debug, info, warn};

use crate::config::ManagerConfig;
use crate::error::ManagerError;
use crate::outcome::MoveOutcome;
use crate::record::{GameHandle, GameRecord, PlayerId};

/// One game together with its record
#[derive(Debug)]
struct ActiveGame {
    game: Game,
    record: GameRecord,
    /// Set by `end_game` once the record is archived.
    closed: bool,
}

impl ActiveGame {
    fn play(&mut self, from: Square, to: Square, config: &ManagerConfig) -> MoveOutcome {
        let played = match self.game.submit_move(from, to) {
            Ok(played) => played,
            Err(err) => {
                debug!(game = %self.record.id, %err, "move rejected");
                return MoveOutcome::from(&err);
            }
        };
        self.record.notes = notation::move_list(self.game.annotations());

        let to_move = self.game.side_to_move();
        let status = self.game.detect_status(config.mate_rule);
        if self.game.seal(status) {
            self.record.seal(status, to_move);
            info!(game = %self.record.id, %status, result = %self.record.summary(), "game over");
        }
        MoveOutcome::Accepted {
            new_status: status,
            annotation: played.annotation,
        }
    }
}

/// Owns every active game.
///
/// The map lock is only held to look up, insert or remove a game; each game
/// has its own mutex, so moves in different games never wait on each other
/// while moves in the same game are applied one at a time.
#[derive(Debug, Default)]
pub struct GameManager {
    config: ManagerConfig,
    games: RwLock<HashMap<GameHandle, Arc<Mutex<ActiveGame>>>>,
}

impl GameManager {
    pub fn new(config: ManagerConfig) -> Self {
        Self {
            config,
            games: RwLock::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    /// Standard layout, White to move.
    pub fn start_game(&self, white: PlayerId, black: PlayerId) -> Result<GameHandle, ManagerError> {
        self.start_game_at(white, black, Board::startpos())
    }

    /// Starts a game from an arbitrary position, e.g. one parsed from FEN.
    pub fn start_game_at(
        &self,
        white: PlayerId,
        black: PlayerId,
        board: Board,
    ) -> Result<GameHandle, ManagerError> {
        let mut games = self.games.write().unwrap_or_else(PoisonError::into_inner);
        if games.len() >= self.config.max_active_games {
            warn!(limit = self.config.max_active_games, "refusing new game");
            return Err(ManagerError::CapacityReached(self.config.max_active_games));
        }

        let handle = GameHandle::new();
        let record = GameRecord::new(handle, white, black);
        info!(game = %handle, white = %record.white, black = %record.black, "game started");
        games.insert(
            handle,
            Arc::new(Mutex::new(ActiveGame {
                game: Game::from_board(board),
                record,
                closed: false,
            })),
        );
        Ok(handle)
    }

    /// Validates and applies a move given in raw `(file, rank)` coordinates.
    ///
    /// After an accepted move the game is checked for mate and stalemate and
    /// sealed when finished.
    pub fn submit_move(
        &self,
        handle: GameHandle,
        from: (i8, i8),
        to: (i8, i8),
    ) -> Result<MoveOutcome, ManagerError> {
        self.with_game(handle, |active| {
            match (Square::new(from.0, from.1), Square::new(to.0, to.1)) {
                (Ok(from), Ok(to)) => active.play(from, to, &self.config),
                (Err(err), _) | (_, Err(err)) => {
                    debug!(game = %handle, %err, "move rejected");
                    MoveOutcome::from(&err)
                }
            }
        })
    }

    pub fn board_view(&self, handle: GameHandle) -> Result<BoardView, ManagerError> {
        self.with_game(handle, |active| active.game.board().view())
    }

    /// Legal destinations of the piece on `from`. Off-board or empty squares
    /// have none.
    pub fn legal_destinations(
        &self,
        handle: GameHandle,
        from: (i8, i8),
    ) -> Result<Vec<Square>, ManagerError> {
        self.with_game(handle, |active| {
            if active.game.status().is_terminal() {
                return Vec::new();
            }
            Square::new(from.0, from.1)
                .and_then(|sq| active.game.legal_destinations(sq))
                .unwrap_or_default()
        })
    }

    pub fn status(&self, handle: GameHandle) -> Result<GameStatus, ManagerError> {
        self.with_game(handle, |active| active.game.status())
    }

    /// Current record of a game that is still registered.
    pub fn record(&self, handle: GameHandle) -> Result<GameRecord, ManagerError> {
        self.with_game(handle, |active| active.record.clone())
    }

    pub fn active_games(&self) -> Vec<GameHandle> {
        let games = self.games.read().unwrap_or_else(PoisonError::into_inner);
        let mut handles: Vec<GameHandle> = games.keys().copied().collect();
        handles.sort();
        handles
    }

    /// Removes the game and returns its final record. A game that was not
    /// finished by checkmate or stalemate keeps its status and gets an end
    /// time now.
    pub fn end_game(&self, handle: GameHandle) -> Result<GameRecord, ManagerError> {
        let entry = self
            .games
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&handle)
            .ok_or(ManagerError::UnknownGame(handle))?;

        // Waits for a move that is still being applied
        let mut active = lock(&entry);
        active.closed = true;
        active.record.finish();
        info!(
            game = %handle,
            moves = active.game.history().len(),
            result = %active.record.summary(),
            "game ended"
        );
        Ok(active.record.clone())
    }

    fn lookup(&self, handle: GameHandle) -> Result<Arc<Mutex<ActiveGame>>, ManagerError> {
        let games = self.games.read().unwrap_or_else(PoisonError::into_inner);
        games
            .get(&handle)
            .cloned()
            .ok_or(ManagerError::UnknownGame(handle))
    }

    fn with_game<R>(
        &self,
        handle: GameHandle,
        f: impl FnOnce(&mut ActiveGame) -> R,
    ) -> Result<R, ManagerError> {
        let entry = self.lookup(handle)?;
        on_open_game(handle, &entry, f)
    }
}

/// Runs `f` under the game lock. A caller that looked the game up before
/// `end_game` removed it sees the game as unknown.
fn on_open_game<R>(
    handle: GameHandle,
    entry: &Mutex<ActiveGame>,
    f: impl FnOnce(&mut ActiveGame) -> R,
) -> Result<R, ManagerError> {
    let mut active = lock(entry);
    if active.closed {
        return Err(ManagerError::UnknownGame(handle));
    }
    Ok(f(&mut active))
}

/// No operation leaves a game half-updated, so a poisoned lock still guards
/// a consistent game.
fn lock(entry: &Mutex<ActiveGame>) -> MutexGuard<'_, ActiveGame> {
    entry.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
#[path = "manager_tests.rs"]
mod manager_tests;
