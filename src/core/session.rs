//! Session-wide outcome flags: game over and win.

use bevy::prelude::*;

use super::states::GameState;

/// Collaborator that owns the one-shot game-over flag.
///
/// Enemies read it at the top of every tick and raise it when they catch
/// the player.
pub trait GameOverSignal {
    fn is_game_over(&self) -> bool;
    /// Raise the flag. Returns false when it was already raised.
    fn trigger_game_over(&mut self) -> bool;
}

/// Outcome of the current run. Reset every time a level starts.
#[derive(Resource, Debug, Default)]
pub struct GameSession {
    game_over: bool,
    won: bool,
}

impl GameSession {
    /// Mark the run as won. Ignored once the run is over either way.
    pub fn trigger_win(&mut self) -> bool {
        if self.game_over || self.won {
            return false;
        }
        self.won = true;
        info!("Download complete, level won.");
        true
    }

    pub fn is_won(&self) -> bool {
        self.won
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl GameOverSignal for GameSession {
    fn is_game_over(&self) -> bool {
        self.game_over
    }

    fn trigger_game_over(&mut self) -> bool {
        if self.game_over || self.won {
            return false;
        }
        self.game_over = true;
        info!("Game over triggered.");
        true
    }
}

/// Clear the outcome flags when a level starts.
pub fn reset_session(mut session: ResMut<GameSession>) {
    session.reset();
}

/// Leave gameplay once the session has an outcome.
pub fn follow_session_outcome(
    session: Res<GameSession>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if !session.is_changed() {
        return;
    }

    if session.is_game_over() {
        next_state.set(GameState::GameOver);
    } else if session.is_won() {
        next_state.set(GameState::Won);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_over_is_one_shot() {
        let mut session = GameSession::default();
        assert!(!session.is_game_over());
        assert!(session.trigger_game_over());
        assert!(!session.trigger_game_over());
        assert!(session.is_game_over());
    }

    #[test]
    fn test_win_blocked_after_game_over() {
        let mut session = GameSession::default();
        session.trigger_game_over();
        assert!(!session.trigger_win());
        assert!(!session.is_won());

        session.reset();
        assert!(session.trigger_win());
        assert!(!session.trigger_game_over());
    }
}
