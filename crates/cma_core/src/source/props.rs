//! Named-property adapter.
//!
//! The two protocol generations expose the same logical properties under
//! different string paths. The adapter is chosen once at startup from the
//! detected generation; core logic only ever sees the logical kinds below and
//! never branches on the generation elsewhere.

/// Logical properties of the game rules entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameRulesProp {
    GameRestart,
    RoundWinStatus,
    CtTimeoutRemaining,
    TerroristTimeoutRemaining,
    MatchAbortedEarlyReason,
    MatchAbortedDueToPlayerBan,
    MatchWaitingForResume,
    TechnicalTimeout,
    RoundEndReason,
    RoundEndWinnerTeam,
    TotalRoundsPlayed,
    TerroristsCantBuy,
}

/// Logical properties of a player controller entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerProp {
    SideNumber,
    StartAccount,
    CoachingTeam,
    Score,
}

/// Logical properties of a team entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamProp {
    ClanName,
    RosterSlot,
}

/// Logical properties of a planted bomb entity (first generation only, used
/// as a fallback for recordings missing bomb defused events).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlantedC4Prop {
    BombSite,
    DefuserHandle,
    IsDefused,
}

/// Logical properties of the player resource entity (first generation only).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerResourceProp {
    Score,
}

/// Translates generation-specific property paths to logical kinds.
pub trait PropertyMap: Send + Sync {
    fn game_rules_prop(&self, path: &str) -> Option<GameRulesProp>;
    fn player_prop(&self, path: &str) -> Option<PlayerProp>;
    fn team_prop(&self, path: &str) -> Option<TeamProp>;
    fn planted_c4_prop(&self, path: &str) -> Option<PlantedC4Prop>;
    fn player_resource_prop(&self, path: &str) -> Option<PlayerResourceProp>;
}

/// Property paths of the first protocol generation.
pub struct Source1PropertyMap;

impl PropertyMap for Source1PropertyMap {
    fn game_rules_prop(&self, path: &str) -> Option<GameRulesProp> {
        match path {
            "cs_gamerules_data.m_bGameRestart" => Some(GameRulesProp::GameRestart),
            "cs_gamerules_data.m_iRoundWinStatus" => Some(GameRulesProp::RoundWinStatus),
            "cs_gamerules_data.m_flCTTimeOutRemaining" => Some(GameRulesProp::CtTimeoutRemaining),
            "cs_gamerules_data.m_flTerroristTimeOutRemaining" => {
                Some(GameRulesProp::TerroristTimeoutRemaining)
            }
            "cs_gamerules_data.m_totalRoundsPlayed" => Some(GameRulesProp::TotalRoundsPlayed),
            "cs_gamerules_data.m_bTCantBuy" => Some(GameRulesProp::TerroristsCantBuy),
            _ => None,
        }
    }

    fn player_prop(&self, path: &str) -> Option<PlayerProp> {
        match path {
            "m_iTeamNum" => Some(PlayerProp::SideNumber),
            "m_iStartAccount" => Some(PlayerProp::StartAccount),
            "m_iCoachingTeam" => Some(PlayerProp::CoachingTeam),
            _ => None,
        }
    }

    fn team_prop(&self, path: &str) -> Option<TeamProp> {
        match path {
            "m_szTeamname" => Some(TeamProp::ClanName),
            "\"player_array\"" => Some(TeamProp::RosterSlot),
            _ => None,
        }
    }

    fn planted_c4_prop(&self, path: &str) -> Option<PlantedC4Prop> {
        match path {
            "m_nBombSite" => Some(PlantedC4Prop::BombSite),
            "m_hBombDefuser" => Some(PlantedC4Prop::DefuserHandle),
            "m_bBombDefused" => Some(PlantedC4Prop::IsDefused),
            _ => None,
        }
    }

    fn player_resource_prop(&self, path: &str) -> Option<PlayerResourceProp> {
        if path.starts_with("m_iScore.") {
            Some(PlayerResourceProp::Score)
        } else {
            None
        }
    }
}

/// Property paths of the second protocol generation.
pub struct Source2PropertyMap;

impl PropertyMap for Source2PropertyMap {
    fn game_rules_prop(&self, path: &str) -> Option<GameRulesProp> {
        match path {
            "m_pGameRules.m_bGameRestart" => Some(GameRulesProp::GameRestart),
            "m_pGameRules.m_iRoundWinStatus" => Some(GameRulesProp::RoundWinStatus),
            "m_pGameRules.m_flCTTimeOutRemaining" => Some(GameRulesProp::CtTimeoutRemaining),
            "m_pGameRules.m_flTerroristTimeOutRemaining" => {
                Some(GameRulesProp::TerroristTimeoutRemaining)
            }
            "m_pGameRules.m_nMatchAbortedEarlyReason" => {
                Some(GameRulesProp::MatchAbortedEarlyReason)
            }
            "m_pGameRules.m_bMatchAbortedDueToPlayerBan" => {
                Some(GameRulesProp::MatchAbortedDueToPlayerBan)
            }
            "m_pGameRules.m_bMatchWaitingForResume" => Some(GameRulesProp::MatchWaitingForResume),
            "m_pGameRules.m_bTechnicalTimeOut" => Some(GameRulesProp::TechnicalTimeout),
            "m_pGameRules.m_eRoundEndReason" => Some(GameRulesProp::RoundEndReason),
            "m_pGameRules.m_iRoundEndWinnerTeam" => Some(GameRulesProp::RoundEndWinnerTeam),
            "m_pGameRules.m_totalRoundsPlayed" => Some(GameRulesProp::TotalRoundsPlayed),
            "m_pGameRules.m_bTCantBuy" => Some(GameRulesProp::TerroristsCantBuy),
            _ => None,
        }
    }

    fn player_prop(&self, path: &str) -> Option<PlayerProp> {
        match path {
            "m_iTeamNum" => Some(PlayerProp::SideNumber),
            "m_pInGameMoneyServices.m_iStartAccount" => Some(PlayerProp::StartAccount),
            "m_iCoachingTeam" => Some(PlayerProp::CoachingTeam),
            "m_iScore" => Some(PlayerProp::Score),
            _ => None,
        }
    }

    fn team_prop(&self, path: &str) -> Option<TeamProp> {
        if path == "m_szClanTeamname" {
            Some(TeamProp::ClanName)
        } else if path.starts_with("m_aPlayers.") {
            // The roster array is split into one property per slot.
            Some(TeamProp::RosterSlot)
        } else {
            None
        }
    }

    fn planted_c4_prop(&self, _path: &str) -> Option<PlantedC4Prop> {
        // Bomb lifecycle is fully covered by events in this generation.
        None
    }

    fn player_resource_prop(&self, _path: &str) -> Option<PlayerResourceProp> {
        None
    }
}

/// The adapter for the detected protocol generation.
pub fn property_map(is_source2: bool) -> &'static dyn PropertyMap {
    if is_source2 {
        &Source2PropertyMap
    } else {
        &Source1PropertyMap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generations_map_the_same_logical_prop() {
        assert_eq!(
            Source1PropertyMap.game_rules_prop("cs_gamerules_data.m_bGameRestart"),
            Some(GameRulesProp::GameRestart)
        );
        assert_eq!(
            Source2PropertyMap.game_rules_prop("m_pGameRules.m_bGameRestart"),
            Some(GameRulesProp::GameRestart)
        );
    }

    #[test]
    fn split_roster_slots_resolve() {
        assert_eq!(Source2PropertyMap.team_prop("m_aPlayers.0002"), Some(TeamProp::RosterSlot));
        assert_eq!(Source1PropertyMap.team_prop("\"player_array\""), Some(TeamProp::RosterSlot));
    }
}
