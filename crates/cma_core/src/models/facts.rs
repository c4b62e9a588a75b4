//! Typed facts appended to the match ledgers.
//!
//! Every fact is stamped with the round/tick/frame it was recorded at and is
//! immutable once appended, with one exception: a kill is updated exactly
//! once, later, when a subsequent same-round kill is recognized as its trade.

use serde::{Deserialize, Serialize};

use crate::constants::{BombSite, HitGroup, Side, WeaponName, WeaponType};
use crate::spatial::Vec3;

/// A death notification. Suicides and bomb deaths are recorded too.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kill {
    pub frame: i32,
    pub tick: i32,
    pub round_number: i32,
    pub weapon_type: WeaponType,
    pub weapon_name: WeaponName,
    pub killer_name: String,
    #[serde(rename = "killerSteamId")]
    pub killer_steam_id: u64,
    pub killer_side: Side,
    pub killer_team_name: String,
    pub killer_position: Vec3,
    pub is_killer_airborne: bool,
    pub is_killer_blinded: bool,
    pub is_killer_controlling_bot: bool,
    pub victim_name: String,
    #[serde(rename = "victimSteamId")]
    pub victim_steam_id: u64,
    pub victim_side: Side,
    pub victim_team_name: String,
    pub victim_position: Vec3,
    pub is_victim_airborne: bool,
    pub is_victim_blinded: bool,
    pub is_victim_controlling_bot: bool,
    pub is_victim_inspecting_weapon: bool,
    pub assister_name: String,
    #[serde(rename = "assisterSteamId")]
    pub assister_steam_id: u64,
    pub assister_side: Side,
    pub assister_team_name: String,
    pub assister_position: Vec3,
    pub is_assister_controlling_bot: bool,
    pub is_headshot: bool,
    pub penetrated_objects: i32,
    pub is_assisted_flash: bool,
    pub is_through_smoke: bool,
    pub is_no_scope: bool,
    /// The killer avenged a teammate killed earlier this round.
    pub is_trade_kill: bool,
    /// The victim's own earlier kill was avenged by this kill.
    pub is_trade_death: bool,
    /// Meters.
    pub distance: f32,
}

impl Kill {
    pub fn is_suicide(&self) -> bool {
        self.killer_steam_id == self.victim_steam_id
    }

    pub fn is_team_kill(&self) -> bool {
        self.killer_side == self.victim_side
    }
}

/// A damage notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Damage {
    pub frame: i32,
    pub tick: i32,
    pub round_number: i32,
    pub health_damage: i32,
    pub armor_damage: i32,
    #[serde(rename = "attackerSteamId")]
    pub attacker_steam_id: u64,
    pub attacker_side: Side,
    pub attacker_team_name: String,
    pub is_attacker_controlling_bot: bool,
    pub victim_health: i32,
    pub victim_new_health: i32,
    pub victim_armor: i32,
    pub victim_new_armor: i32,
    #[serde(rename = "victimSteamId")]
    pub victim_steam_id: u64,
    pub victim_side: Side,
    pub victim_team_name: String,
    pub is_victim_controlling_bot: bool,
    #[serde(rename = "hitgroup")]
    pub hit_group: HitGroup,
    pub weapon_name: WeaponName,
    pub weapon_type: WeaponType,
    #[serde(rename = "weaponUniqueId")]
    pub weapon_unique_id: u64,
}

impl Damage {
    pub fn is_grenade_weapon(&self) -> bool {
        self.weapon_type == WeaponType::Grenade
    }

    /// Whether this damage counts toward the given player's totals: dealt by
    /// them, to an enemy, not to themselves, and not while on a bot.
    pub fn counts_for(&self, steam_id: u64) -> bool {
        self.attacker_steam_id == steam_id
            && self.attacker_steam_id != self.victim_steam_id
            && self.victim_steam_id != 0
            && !self.is_attacker_controlling_bot
            && self.attacker_side != self.victim_side
    }
}

/// A weapon fire notification, grenade throws included.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shot {
    pub frame: i32,
    pub tick: i32,
    pub round_number: i32,
    pub weapon_name: WeaponName,
    #[serde(rename = "weaponId")]
    pub weapon_id: u64,
    /// Only set for grenades, once the projectile entity appears.
    pub projectile_id: i64,
    pub position: Vec3,
    pub player_name: String,
    #[serde(rename = "playerSteamId")]
    pub player_steam_id: u64,
    pub player_team_name: String,
    pub player_side: Side,
    pub is_player_controlling_bot: bool,
    pub player_velocity: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub recoil_index: f32,
    pub aim_punch_angle: Vec3,
    pub view_punch_angle: Vec3,
}

/// A purchase inferred from an item pickup during buy time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerBuy {
    pub frame: i32,
    pub tick: i32,
    pub round_number: i32,
    #[serde(rename = "playerSteamId")]
    pub player_steam_id: u64,
    pub player_side: Side,
    pub player_name: String,
    pub weapon_name: WeaponName,
    pub weapon_type: WeaponType,
    #[serde(rename = "weaponUniqueId")]
    pub weapon_unique_id: u64,
    pub has_refunded: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BombPlantStart {
    pub frame: i32,
    pub tick: i32,
    pub round_number: i32,
    pub site: BombSite,
    #[serde(rename = "planterSteamId")]
    pub planter_steam_id: u64,
    pub planter_name: String,
    pub is_player_controlling_bot: bool,
    pub position: Vec3,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BombPlanted {
    pub frame: i32,
    pub tick: i32,
    pub round_number: i32,
    pub site: BombSite,
    #[serde(rename = "planterSteamId")]
    pub planter_steam_id: u64,
    pub planter_name: String,
    pub is_player_controlling_bot: bool,
    pub position: Vec3,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BombDefuseStart {
    pub frame: i32,
    pub tick: i32,
    pub round_number: i32,
    #[serde(rename = "defuserSteamId")]
    pub defuser_steam_id: u64,
    pub defuser_name: String,
    pub is_player_controlling_bot: bool,
    pub position: Vec3,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BombDefused {
    pub frame: i32,
    pub tick: i32,
    pub round_number: i32,
    pub site: BombSite,
    #[serde(rename = "defuserSteamId")]
    pub defuser_steam_id: u64,
    pub defuser_name: String,
    pub is_player_controlling_bot: bool,
    pub position: Vec3,
    pub counter_terrorist_alive_count: i32,
    pub terrorist_alive_count: i32,
}

/// The explode notification carries no position of its own; the position is
/// the one cached when the bomb was planted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BombExploded {
    pub frame: i32,
    pub tick: i32,
    pub round_number: i32,
    pub site: BombSite,
    #[serde(rename = "planterSteamId")]
    pub planter_steam_id: u64,
    pub planter_name: String,
    pub is_player_controlling_bot: bool,
    pub position: Vec3,
}

/// Detonation point of a smoke/decoy/HE/flashbang grenade.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrenadeDetonation {
    pub frame: i32,
    pub tick: i32,
    pub round_number: i32,
    pub grenade_id: u64,
    pub projectile_id: i64,
    pub position: Vec3,
    #[serde(rename = "throwerSteamId")]
    pub thrower_steam_id: u64,
    pub thrower_name: String,
    pub thrower_side: Side,
    pub thrower_team_name: String,
    pub thrower_velocity: Vec3,
    pub thrower_yaw: f32,
    pub thrower_pitch: f32,
}

/// A projectile bounce or destruction point.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrenadeProjectileEvent {
    pub frame: i32,
    pub tick: i32,
    pub round_number: i32,
    pub grenade_id: u64,
    pub projectile_id: i64,
    pub grenade_name: WeaponName,
    pub position: Vec3,
    #[serde(rename = "throwerSteamId")]
    pub thrower_steam_id: u64,
    pub thrower_name: String,
    pub thrower_side: Side,
    pub thrower_team_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerFlashed {
    pub frame: i32,
    pub tick: i32,
    pub round_number: i32,
    /// Seconds of blindness inflicted.
    pub duration: f32,
    #[serde(rename = "flashedSteamId")]
    pub flashed_steam_id: u64,
    pub flashed_name: String,
    pub flashed_side: Side,
    pub is_flashed_controlling_bot: bool,
    #[serde(rename = "flasherSteamId")]
    pub flasher_steam_id: u64,
    pub flasher_name: String,
    pub flasher_side: Side,
    pub is_flasher_controlling_bot: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub frame: i32,
    pub tick: i32,
    pub round_number: i32,
    pub message: String,
    #[serde(rename = "senderSteamId")]
    pub sender_steam_id: u64,
    pub sender_name: String,
    pub sender_side: Side,
    pub is_sender_alive: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChickenDeath {
    pub frame: i32,
    pub tick: i32,
    pub round_number: i32,
    #[serde(rename = "killerSteamId")]
    pub killer_steam_id: u64,
    pub weapon_name: WeaponName,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostagePickUpStart {
    pub frame: i32,
    pub tick: i32,
    pub round_number: i32,
    pub hostage_entity_id: i32,
    #[serde(rename = "playerSteamId")]
    pub player_steam_id: u64,
    pub is_player_controlling_bot: bool,
    pub position: Vec3,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostagePickedUp {
    pub frame: i32,
    pub tick: i32,
    pub round_number: i32,
    pub hostage_entity_id: i32,
    #[serde(rename = "playerSteamId")]
    pub player_steam_id: u64,
    pub is_player_controlling_bot: bool,
    pub position: Vec3,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostageRescued {
    pub frame: i32,
    pub tick: i32,
    pub round_number: i32,
    pub hostage_entity_id: i32,
    #[serde(rename = "playerSteamId")]
    pub player_steam_id: u64,
    pub is_player_controlling_bot: bool,
    pub position: Vec3,
}
