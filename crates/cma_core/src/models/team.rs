use serde::{Deserialize, Serialize};

use crate::constants::{Side, TeamLetter};

/// One of the two persistent team slots of a match.
///
/// The slot identity (letter) is stable for the whole match while the side it
/// occupies swaps at halftime. Sides only ever change through
/// [`crate::models::MatchData::swap_teams`] so the two slots stay exact
/// opposites.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub name: String,
    pub letter: TeamLetter,
    pub score: i32,
    pub score_first_half: i32,
    pub score_second_half: i32,
    pub current_side: Side,
}

impl Team {
    pub fn new(name: &str, letter: TeamLetter, side: Side) -> Team {
        Team {
            name: name.to_string(),
            letter,
            score: 0,
            score_first_half: 0,
            score_second_half: 0,
            current_side: side,
        }
    }

    pub(crate) fn swap_side(&mut self) {
        self.current_side = self.current_side.opposite();
    }
}
