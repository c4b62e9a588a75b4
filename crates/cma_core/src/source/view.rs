use crate::constants::{EquipmentKind, HostageState, PlayerColor, Side};
use crate::spatial::Vec3;

/// Snapshot of one participant at the current point of the stream.
///
/// Snapshots are taken by value; they never alias the decoder's state.
#[derive(Debug, Clone)]
pub struct Participant {
    pub steam_id: u64,
    pub entity_id: i32,
    pub user_id: i32,
    pub name: String,
    pub side: Side,
    pub health: i32,
    pub armor: i32,
    pub money: i32,
    pub money_spent_this_round: i32,
    pub equipment_value: i32,
    pub score: i32,
    pub mvp_count: i32,
    pub rank_type: i32,
    pub rank: i32,
    pub win_count: i32,
    pub crosshair_code: String,
    pub color: PlayerColor,
    pub position: Vec3,
    pub last_alive_position: Vec3,
    pub velocity: Vec3,
    pub view_yaw: f32,
    pub view_pitch: f32,
    pub is_alive: bool,
    pub is_bot: bool,
    pub is_unknown: bool,
    pub is_coach: bool,
    pub is_connected: bool,
    pub is_controlling_bot: bool,
    pub is_airborne: bool,
    pub is_blinded: bool,
    pub is_scoped: bool,
    pub is_ducking: bool,
    pub is_defusing: bool,
    pub is_planting: bool,
    pub is_in_buy_zone: bool,
    pub is_grabbing_hostage: bool,
    pub is_inspecting_weapon: bool,
    pub has_helmet: bool,
    pub has_defuse_kit: bool,
    pub has_bomb: bool,
    pub flash_duration_remaining: f64,
    pub active_weapon: Option<EquipmentKind>,
    /// Unique ids of the weapons currently carried.
    pub weapon_ids: Vec<u64>,
}

impl Default for Participant {
    fn default() -> Self {
        Participant {
            steam_id: 0,
            entity_id: 0,
            user_id: 0,
            name: String::new(),
            side: Side::Unassigned,
            health: 100,
            armor: 0,
            money: 0,
            money_spent_this_round: 0,
            equipment_value: 0,
            score: 0,
            mvp_count: 0,
            rank_type: 0,
            rank: 0,
            win_count: 0,
            crosshair_code: String::new(),
            color: PlayerColor::Unknown,
            position: Vec3::zeros(),
            last_alive_position: Vec3::zeros(),
            velocity: Vec3::zeros(),
            view_yaw: 0.0,
            view_pitch: 0.0,
            is_alive: true,
            is_bot: false,
            is_unknown: false,
            is_coach: false,
            is_connected: true,
            is_controlling_bot: false,
            is_airborne: false,
            is_blinded: false,
            is_scoped: false,
            is_ducking: false,
            is_defusing: false,
            is_planting: false,
            is_in_buy_zone: false,
            is_grabbing_hostage: false,
            is_inspecting_weapon: false,
            has_helmet: false,
            has_defuse_kit: false,
            has_bomb: false,
            flash_duration_remaining: 0.0,
            active_weapon: None,
            weapon_ids: Vec::new(),
        }
    }
}

/// Aggregate state of the faction currently occupying one side.
#[derive(Debug, Clone, Default)]
pub struct TeamState {
    pub clan_name: String,
    pub equipment_value: i32,
    pub money_spent_this_round: i32,
}

/// An airborne grenade projectile.
#[derive(Debug, Clone)]
pub struct ProjectileInfo {
    pub unique_id: i64,
    /// Unique id of the grenade weapon the projectile was thrown from.
    pub grenade_id: u64,
    pub kind: EquipmentKind,
    pub thrower: Option<Participant>,
    pub position: Vec3,
}

/// An active molotov/incendiary fire area.
#[derive(Debug, Clone)]
pub struct InfernoInfo {
    pub unique_id: i64,
    pub thrower: Option<Participant>,
    pub position: Vec3,
    pub convex_hull_2d: Vec<[f64; 2]>,
}

/// A hostage entity.
#[derive(Debug, Clone)]
pub struct HostageInfo {
    pub entity_id: i32,
    pub leader: Option<Participant>,
    pub position: Vec3,
    pub state: HostageState,
}

/// A chicken entity. They die for nothing and we keep the record.
#[derive(Debug, Clone)]
pub struct ChickenInfo {
    pub entity_id: i32,
    pub position: Vec3,
}

/// Query interface over the reconstructed game state at the current point of
/// the stream. All accessors return value snapshots.
pub trait GameStateView {
    fn current_tick(&self) -> i32;
    fn current_frame(&self) -> i32;

    /// Simulation steps per second.
    fn tick_rate(&self) -> f64;

    /// Seconds covered by one simulation step.
    fn tick_interval(&self) -> f64 {
        let rate = self.tick_rate();
        if rate > 0.0 {
            1.0 / rate
        } else {
            0.0
        }
    }

    fn is_warmup_period(&self) -> bool;
    fn is_match_started(&self) -> bool;
    fn total_rounds_played(&self) -> i32;

    /// Every connected participant, spectators included.
    fn participants(&self) -> Vec<Participant>;

    /// Participants currently on one of the two playing sides.
    fn playing_participants(&self) -> Vec<Participant> {
        self.participants().into_iter().filter(|p| p.side.is_playing()).collect()
    }

    fn participant_by_handle(&self, _handle: u64) -> Option<Participant> {
        None
    }

    fn team_state(&self, side: Side) -> TeamState;

    fn grenade_projectiles(&self) -> Vec<ProjectileInfo> {
        Vec::new()
    }

    fn infernos(&self) -> Vec<InfernoInfo> {
        Vec::new()
    }

    fn hostages(&self) -> Vec<HostageInfo> {
        Vec::new()
    }

    fn chickens(&self) -> Vec<ChickenInfo> {
        Vec::new()
    }
}
