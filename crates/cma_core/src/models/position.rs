//! Per-frame position samples, recorded only when position tracking is
//! enabled in the analysis options.

use serde::{Deserialize, Serialize};

use crate::constants::{HostageState, Side, WeaponName};
use crate::spatial::Vec3;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerPosition {
    pub frame: i32,
    pub tick: i32,
    pub round_number: i32,
    pub is_alive: bool,
    pub name: String,
    #[serde(rename = "steamId")]
    pub steam_id: u64,
    pub position: Vec3,
    pub yaw: f32,
    pub flash_duration_remaining: f64,
    pub side: Side,
    pub money: i32,
    pub health: i32,
    pub armor: i32,
    pub has_helmet: bool,
    pub has_bomb: bool,
    pub has_defuse_kit: bool,
    pub is_ducking: bool,
    pub is_airborne: bool,
    pub is_scoping: bool,
    pub is_defusing: bool,
    pub is_planting: bool,
    pub is_grabbing_hostage: bool,
    pub active_weapon_name: WeaponName,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrenadePosition {
    pub frame: i32,
    pub tick: i32,
    pub round_number: i32,
    pub projectile_id: i64,
    pub grenade_name: WeaponName,
    #[serde(rename = "throwerSteamId")]
    pub thrower_steam_id: u64,
    pub thrower_name: String,
    pub position: Vec3,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfernoPosition {
    pub frame: i32,
    pub tick: i32,
    pub round_number: i32,
    pub unique_id: i64,
    #[serde(rename = "throwerSteamId")]
    pub thrower_steam_id: u64,
    pub thrower_name: String,
    pub position: Vec3,
    #[serde(rename = "convexHull2D")]
    pub convex_hull_2d: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostagePosition {
    pub frame: i32,
    pub tick: i32,
    pub round_number: i32,
    pub position: Vec3,
    pub state: HostageState,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChickenPosition {
    pub frame: i32,
    pub tick: i32,
    pub round_number: i32,
    pub position: Vec3,
}
