//! Per-player summary statistics over the finalized ledgers.
//!
//! All functions are read-only and deterministic: computed twice on the same
//! finalized match, the results are bit-identical.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::WeaponName;
use crate::models::{Clutch, Kill, MatchData, Player};

/// Percentage of rounds in which the player either got a kill or an assist
/// against the opposing side, survived, or was traded.
pub fn kast(match_data: &MatchData, steam_id: u64) -> f32 {
    let mut kast_rounds = 0usize;
    for round in &match_data.rounds {
        let mut has_kast_event = false;
        let mut survived = true;

        for kill in &match_data.kills {
            if kill.round_number != round.number {
                continue;
            }

            if kill.is_team_kill() {
                continue;
            }

            if kill.assister_steam_id == steam_id {
                has_kast_event = true;
                continue;
            }

            if kill.killer_steam_id == steam_id && kill.victim_steam_id != steam_id {
                has_kast_event = true;
                continue;
            }

            if kill.victim_steam_id == steam_id {
                survived = false;
                if kill.is_trade_death {
                    has_kast_event = true;
                }
            }
        }

        if has_kast_event || survived {
            kast_rounds += 1;
        }
    }

    let round_count = match_data.rounds.len();
    if round_count > 0 {
        kast_rounds as f32 / round_count as f32 * 100.0
    } else {
        0.0
    }
}

/// Summary statistics for one player, computed once over the finalized match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    pub kill_count: i32,
    pub death_count: i32,
    pub assist_count: i32,
    pub kill_death_ratio: f32,
    pub kast: f32,
    pub bomb_planted_count: i32,
    pub bomb_defused_count: i32,
    pub health_damage: i32,
    pub armor_damage: i32,
    pub utility_damage: i32,
    pub headshot_count: i32,
    pub headshot_percent: i32,
    pub one_vs_one_count: i32,
    pub one_vs_one_won_count: i32,
    pub one_vs_one_lost_count: i32,
    pub one_vs_two_count: i32,
    pub one_vs_two_won_count: i32,
    pub one_vs_two_lost_count: i32,
    pub one_vs_three_count: i32,
    pub one_vs_three_won_count: i32,
    pub one_vs_three_lost_count: i32,
    pub one_vs_four_count: i32,
    pub one_vs_four_won_count: i32,
    pub one_vs_four_lost_count: i32,
    pub one_vs_five_count: i32,
    pub one_vs_five_won_count: i32,
    pub one_vs_five_lost_count: i32,
    pub hostage_rescued_count: i32,
    pub average_kill_per_round: f32,
    pub average_death_per_round: f32,
    pub average_damage_per_round: f32,
    pub utility_damage_per_round: f32,
    pub first_kill_count: i32,
    pub first_death_count: i32,
    pub trade_kill_count: i32,
    pub trade_death_count: i32,
    pub first_trade_kill_count: i32,
    pub first_trade_death_count: i32,
    pub one_kill_count: i32,
    pub two_kill_count: i32,
    pub three_kill_count: i32,
    pub four_kill_count: i32,
    pub five_kill_count: i32,
    pub hltv_rating: f32,
    pub hltv_rating2: f32,
}

impl PlayerStats {
    pub fn compute(match_data: &MatchData, player: &Player) -> PlayerStats {
        let ctx = StatsContext { match_data, steam_id: player.steam_id };

        let kill_count = ctx.kill_count();
        let headshot_count = ctx.headshot_count();
        let headshot_percent =
            if kill_count > 0 { 100 * headshot_count / kill_count } else { 0 };

        PlayerStats {
            kill_count,
            death_count: ctx.death_count(),
            assist_count: ctx.assist_count(),
            kill_death_ratio: ctx.kill_death_ratio(),
            kast: kast(match_data, player.steam_id),
            bomb_planted_count: ctx.bomb_planted_count(),
            bomb_defused_count: ctx.bomb_defused_count(),
            health_damage: ctx.health_damage(),
            armor_damage: ctx.armor_damage(),
            utility_damage: ctx.utility_damage(),
            headshot_count,
            headshot_percent,
            one_vs_one_count: ctx.one_vs_x_count(1),
            one_vs_one_won_count: ctx.one_vs_x_won_count(1),
            one_vs_one_lost_count: ctx.one_vs_x_lost_count(1),
            one_vs_two_count: ctx.one_vs_x_count(2),
            one_vs_two_won_count: ctx.one_vs_x_won_count(2),
            one_vs_two_lost_count: ctx.one_vs_x_lost_count(2),
            one_vs_three_count: ctx.one_vs_x_count(3),
            one_vs_three_won_count: ctx.one_vs_x_won_count(3),
            one_vs_three_lost_count: ctx.one_vs_x_lost_count(3),
            one_vs_four_count: ctx.one_vs_x_count(4),
            one_vs_four_won_count: ctx.one_vs_x_won_count(4),
            one_vs_four_lost_count: ctx.one_vs_x_lost_count(4),
            one_vs_five_count: ctx.one_vs_x_count(5),
            one_vs_five_won_count: ctx.one_vs_x_won_count(5),
            one_vs_five_lost_count: ctx.one_vs_x_lost_count(5),
            hostage_rescued_count: ctx.hostage_rescued_count(),
            average_kill_per_round: ctx.average_kill_per_round(),
            average_death_per_round: ctx.average_death_per_round(),
            average_damage_per_round: ctx.average_damage_per_round(),
            utility_damage_per_round: ctx.utility_damage_per_round(),
            first_kill_count: ctx.first_kill_count(),
            first_death_count: ctx.first_death_count(),
            trade_kill_count: ctx.trade_kill_count(),
            trade_death_count: ctx.trade_death_count(),
            first_trade_kill_count: ctx.first_trade_kill_count(),
            first_trade_death_count: ctx.first_trade_death_count(),
            one_kill_count: ctx.x_kill_round_count(1),
            two_kill_count: ctx.x_kill_round_count(2),
            three_kill_count: ctx.x_kill_round_count(3),
            four_kill_count: ctx.x_kill_round_count(4),
            five_kill_count: ctx.x_kill_round_count(5),
            hltv_rating: ctx.hltv_rating(),
            hltv_rating2: ctx.hltv_rating2(),
        }
    }
}

struct StatsContext<'a> {
    match_data: &'a MatchData,
    steam_id: u64,
}

impl StatsContext<'_> {
    fn kills(&self) -> Vec<&Kill> {
        self.match_data
            .kills
            .iter()
            .filter(|kill| kill.killer_steam_id == self.steam_id && !kill.is_killer_controlling_bot)
            .collect()
    }

    fn deaths(&self) -> Vec<&Kill> {
        self.match_data
            .kills
            .iter()
            .filter(|kill| kill.victim_steam_id == self.steam_id && !kill.is_victim_controlling_bot)
            .collect()
    }

    fn round_count(&self) -> i32 {
        self.match_data.rounds.len() as i32
    }

    fn kills_by_round(&self) -> BTreeMap<i32, Vec<&Kill>> {
        self.match_data.kills_by_round()
    }

    /// Kill count with the game's own corrections: suicides and team kills
    /// decrement, except disconnects which the game does not count against
    /// the player.
    fn kill_count(&self) -> i32 {
        let mut kill_count = 0;
        for kill in &self.match_data.kills {
            if kill.killer_steam_id == self.steam_id {
                if kill.is_killer_controlling_bot {
                    continue;
                }

                if kill.is_suicide() {
                    let is_client_disconnection = kill.weapon_name == WeaponName::World;
                    if !is_client_disconnection {
                        kill_count -= 1;
                    }
                    continue;
                }

                if kill.is_team_kill() {
                    kill_count -= 1;
                    continue;
                }

                kill_count += 1;
            } else if kill.victim_steam_id == self.steam_id {
                if kill.is_victim_controlling_bot {
                    continue;
                }

                let is_suicide =
                    kill.killer_steam_id == 0 && kill.weapon_name == WeaponName::World;
                if is_suicide {
                    kill_count -= 1;
                }
            }
        }

        kill_count
    }

    fn death_count(&self) -> i32 {
        let mut death_count = 0;
        for kill in self.deaths() {
            if kill.is_suicide() && kill.weapon_name == WeaponName::World {
                continue;
            }
            death_count += 1;
        }

        death_count
    }

    fn assist_count(&self) -> i32 {
        self.match_data
            .kills
            .iter()
            .filter(|kill| {
                kill.assister_steam_id == self.steam_id
                    && !kill.is_assister_controlling_bot
                    && kill.assister_side != kill.victim_side
            })
            .count() as i32
    }

    fn headshot_count(&self) -> i32 {
        self.kills()
            .iter()
            .filter(|kill| kill.is_headshot && !kill.is_suicide() && !kill.is_team_kill())
            .count() as i32
    }

    fn kill_death_ratio(&self) -> f32 {
        let kill_count = self.kill_count();
        if kill_count <= 0 {
            return 0.0;
        }

        let death_count = self.death_count();
        if death_count > 0 {
            kill_count as f32 / death_count as f32
        } else {
            kill_count as f32
        }
    }

    fn health_damage(&self) -> i32 {
        self.match_data
            .damages
            .iter()
            .filter(|damage| damage.counts_for(self.steam_id))
            .map(|damage| damage.health_damage)
            .sum()
    }

    fn armor_damage(&self) -> i32 {
        self.match_data
            .damages
            .iter()
            .filter(|damage| damage.counts_for(self.steam_id))
            .map(|damage| damage.armor_damage)
            .sum()
    }

    fn utility_damage(&self) -> i32 {
        self.match_data
            .damages
            .iter()
            .filter(|damage| damage.counts_for(self.steam_id) && damage.is_grenade_weapon())
            .map(|damage| damage.health_damage)
            .sum()
    }

    fn average_kill_per_round(&self) -> f32 {
        let kill_count = self.kill_count();
        let round_count = self.round_count();
        if kill_count <= 0 || round_count <= 0 {
            return 0.0;
        }
        kill_count as f32 / round_count as f32
    }

    fn average_assist_per_round(&self) -> f32 {
        let assist_count = self.assist_count();
        let round_count = self.round_count();
        if assist_count <= 0 || round_count <= 0 {
            return 0.0;
        }
        assist_count as f32 / round_count as f32
    }

    fn average_death_per_round(&self) -> f32 {
        let death_count = self.death_count();
        let round_count = self.round_count();
        if death_count <= 0 || round_count <= 0 {
            return 0.0;
        }
        death_count as f32 / round_count as f32
    }

    fn average_damage_per_round(&self) -> f32 {
        let round_count = self.round_count();
        if round_count > 0 {
            self.health_damage() as f32 / round_count as f32
        } else {
            0.0
        }
    }

    fn utility_damage_per_round(&self) -> f32 {
        let round_count = self.round_count();
        if round_count > 0 {
            self.utility_damage() as f32 / round_count as f32
        } else {
            0.0
        }
    }

    /// First kill of each round, suicides and team kills excluded.
    fn first_kill_count(&self) -> i32 {
        let mut first_kill_count = 0;
        for round in &self.match_data.rounds {
            for kill in self.match_data.kills.iter().filter(|k| k.round_number == round.number) {
                if kill.is_killer_controlling_bot || kill.is_suicide() || kill.is_team_kill() {
                    continue;
                }

                if kill.killer_steam_id == self.steam_id {
                    first_kill_count += 1;
                }
                break;
            }
        }

        first_kill_count
    }

    fn first_death_count(&self) -> i32 {
        let mut first_death_count = 0;
        for round in &self.match_data.rounds {
            for kill in self.match_data.kills.iter().filter(|k| k.round_number == round.number) {
                if kill.is_killer_controlling_bot || kill.is_suicide() || kill.is_team_kill() {
                    continue;
                }

                if kill.victim_steam_id == self.steam_id {
                    first_death_count += 1;
                }
                break;
            }
        }

        first_death_count
    }

    fn trade_kill_count(&self) -> i32 {
        self.kills()
            .iter()
            .filter(|kill| kill.is_trade_kill && !kill.is_suicide() && !kill.is_team_kill())
            .count() as i32
    }

    fn trade_death_count(&self) -> i32 {
        self.deaths()
            .iter()
            .filter(|kill| kill.is_trade_death && !kill.is_suicide() && !kill.is_team_kill())
            .count() as i32
    }

    fn first_trade_kill_count(&self) -> i32 {
        let mut count = 0;
        for kills in self.kills_by_round().values() {
            for kill in kills {
                if kill.is_killer_controlling_bot || kill.is_suicide() || kill.is_team_kill() {
                    continue;
                }

                if kill.killer_steam_id == self.steam_id && kill.is_trade_kill {
                    count += 1;
                }
                break;
            }
        }

        count
    }

    fn first_trade_death_count(&self) -> i32 {
        let mut count = 0;
        for kills in self.kills_by_round().values() {
            for kill in kills {
                if kill.is_victim_controlling_bot || kill.is_suicide() || kill.is_team_kill() {
                    continue;
                }

                if kill.victim_steam_id == self.steam_id && kill.is_trade_death {
                    count += 1;
                }
                break;
            }
        }

        count
    }

    /// Rounds in which the player got exactly `count` kills.
    fn x_kill_round_count(&self, count: usize) -> i32 {
        let mut x_kill_count = 0;
        for kills in self.kills_by_round().values() {
            let player_kills = kills
                .iter()
                .filter(|kill| {
                    kill.killer_steam_id == self.steam_id
                        && !kill.is_killer_controlling_bot
                        && !kill.is_suicide()
                        && !kill.is_team_kill()
                })
                .count();

            if player_kills == count {
                x_kill_count += 1;
            }
        }

        x_kill_count
    }

    fn clutches(&self) -> Vec<&Clutch> {
        self.match_data
            .clutches
            .iter()
            .filter(|clutch| clutch.clutcher_steam_id == self.steam_id)
            .collect()
    }

    fn one_vs_x_count(&self, opponent_count: i32) -> i32 {
        self.clutches().iter().filter(|clutch| clutch.opponent_count == opponent_count).count()
            as i32
    }

    fn one_vs_x_won_count(&self, opponent_count: i32) -> i32 {
        self.clutches()
            .iter()
            .filter(|clutch| clutch.opponent_count == opponent_count && clutch.has_won)
            .count() as i32
    }

    fn one_vs_x_lost_count(&self, opponent_count: i32) -> i32 {
        self.clutches()
            .iter()
            .filter(|clutch| clutch.opponent_count == opponent_count && !clutch.has_won)
            .count() as i32
    }

    fn bomb_planted_count(&self) -> i32 {
        self.match_data
            .bombs_planted
            .iter()
            .filter(|bomb| {
                bomb.planter_steam_id == self.steam_id && !bomb.is_player_controlling_bot
            })
            .count() as i32
    }

    fn bomb_defused_count(&self) -> i32 {
        self.match_data
            .bombs_defused
            .iter()
            .filter(|bomb| {
                bomb.defuser_steam_id == self.steam_id && !bomb.is_player_controlling_bot
            })
            .count() as i32
    }

    fn hostage_rescued_count(&self) -> i32 {
        self.match_data
            .hostage_rescued
            .iter()
            .filter(|hostage| {
                hostage.player_steam_id == self.steam_id && !hostage.is_player_controlling_bot
            })
            .count() as i32
    }

    /// Impact sub-score of the 2.0 rating.
    /// https://flashed.gg/posts/reverse-engineering-hltv-rating/
    fn impact(&self) -> f32 {
        2.13 * self.average_kill_per_round() + 0.42 * self.average_assist_per_round() - 0.41
    }

    /// HLTV rating 2.0 approximation, clamped at zero.
    /// https://flashed.gg/posts/reverse-engineering-hltv-rating/
    fn hltv_rating2(&self) -> f32 {
        let rating = 0.0073 * kast(self.match_data, self.steam_id)
            + 0.3591 * self.average_kill_per_round()
            - 0.5329 * self.average_death_per_round()
            + 0.2372 * self.impact()
            + 0.0032 * self.average_damage_per_round()
            + 0.1587;

        rating.max(0.0)
    }

    /// HLTV rating 1.0: kills, survival and multi-kill rounds against fixed
    /// baselines.
    /// https://web.archive.org/web/20170427062206/http://www.hltv.org/?pageid=242&eventid=0
    fn hltv_rating(&self) -> f32 {
        let round_count = self.round_count() as f32;
        if round_count == 0.0 {
            return 0.0;
        }

        let kill_rating = self.average_kill_per_round() / 0.679;
        let survival_rating = (round_count - self.death_count() as f32) / round_count / 0.317;
        let multi_kill_rating = (self.x_kill_round_count(1) as f32
            + 4.0 * self.x_kill_round_count(2) as f32
            + 9.0 * self.x_kill_round_count(3) as f32
            + 16.0 * self.x_kill_round_count(4) as f32
            + 25.0 * self.x_kill_round_count(5) as f32)
            / round_count
            / 1.277;

        (kill_rating + 0.7 * survival_rating + multi_kill_rating) / 2.7
    }
}
