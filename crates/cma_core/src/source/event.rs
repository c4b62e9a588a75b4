use crate::constants::{BombSite, EquipmentKind, GamePhase, HitGroup, HostageState, RoundEndReason, Side};
use crate::spatial::Vec3;

use super::view::{HostageInfo, Participant, ProjectileInfo};

/// Reference to a weapon instance involved in an event.
#[derive(Debug, Clone, Copy)]
pub struct EquipmentRef {
    pub kind: EquipmentKind,
    pub unique_id: u64,
}

/// Payload of a kill notification.
#[derive(Debug, Clone)]
pub struct KillEvent {
    pub killer: Option<Participant>,
    pub victim: Option<Participant>,
    pub assister: Option<Participant>,
    pub weapon: Option<EquipmentRef>,
    pub is_headshot: bool,
    pub penetrated_objects: i32,
    pub is_assisted_flash: bool,
    pub is_through_smoke: bool,
    pub is_no_scope: bool,
    /// Distance reported by the decoder, 0 when unavailable.
    pub distance: f32,
}

/// Payload shared by grenade detonation notifications.
#[derive(Debug, Clone)]
pub struct GrenadeEvent {
    pub grenade_id: u64,
    pub kind: EquipmentKind,
    pub thrower: Option<Participant>,
    pub position: Vec3,
}

/// Entity a low-level property change belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropTarget {
    GameRules,
    Team { entity_id: i32 },
    PlayerController { entity_id: i32 },
    PlayerResource,
    PlantedC4 { entity_id: i32 },
}

/// Weakly-typed property value.
#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
    Nil,
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
}

impl PropValue {
    pub fn as_i64(&self) -> i64 {
        match self {
            PropValue::Int(v) => *v,
            PropValue::Bool(true) => 1,
            PropValue::Float(v) => *v as i64,
            _ => 0,
        }
    }

    pub fn as_f64(&self) -> f64 {
        match self {
            PropValue::Float(v) => *v,
            PropValue::Int(v) => *v as f64,
            _ => 0.0,
        }
    }

    pub fn as_bool(&self) -> bool {
        match self {
            PropValue::Bool(v) => *v,
            PropValue::Int(v) => *v != 0,
            _ => false,
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, PropValue::Nil)
    }
}

/// Upstream schema-integrity warning categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarnKind {
    /// A game event arrived before its descriptors; past a tolerance count
    /// the whole stream is presumed unreliable.
    GameEventBeforeDescriptors,
    Other,
}

/// One discrete notification from the recording, delivered in timeline order.
#[derive(Debug, Clone)]
pub enum GameEvent {
    TickRateInfoAvailable,
    PovRecordingDetected,
    MatchStart,
    MatchStartedChanged { old_is_started: bool, new_is_started: bool },
    IsWarmupPeriodChanged { old_is_warmup: bool, new_is_warmup: bool },
    GamePhaseChanged { new_phase: GamePhase },
    GameHalfEnded,
    OvertimeNumberChanged { new_count: i32 },
    AnnouncementWinPanelMatch,
    RoundStart,
    RoundFreezetimeChanged { new_is_freezetime: bool },
    RoundEnd { winner: Side, reason: RoundEndReason, message: String },
    RoundEndOfficial,
    RoundMvpAnnouncement,
    ScoreUpdated,
    RankUpdate { steam_id: u64, rank_old: i32, rank_new: i32, win_count: i32 },
    PlayerConnect { player: Participant },
    PlayerTeamChange { player: Participant },
    Kill(Box<KillEvent>),
    PlayerHurt {
        player: Participant,
        attacker: Option<Participant>,
        weapon: Option<EquipmentRef>,
        health_damage_taken: i32,
        armor_damage_taken: i32,
        new_health: i32,
        new_armor: i32,
        hit_group: HitGroup,
    },
    WeaponFire {
        shooter: Option<Participant>,
        weapon: EquipmentRef,
        recoil_index: f32,
        aim_punch_angle: Vec3,
        view_punch_angle: Vec3,
    },
    ItemPickup { player: Participant, weapon: EquipmentRef },
    ItemRefund { player: Participant, weapon: EquipmentRef },
    BombPlantBegin { player: Participant, site: BombSite },
    BombPlanted { player: Participant, site: BombSite },
    BombDefuseStart { player: Participant },
    BombDefused { player: Participant, site: BombSite },
    BombExplode { player: Participant, site: BombSite },
    PlayerFlashed { player: Participant, attacker: Option<Participant>, flash_duration: f32 },
    HeGrenadeExplode(GrenadeEvent),
    FlashbangExplode(GrenadeEvent),
    SmokeStart(GrenadeEvent),
    DecoyStart(GrenadeEvent),
    GrenadeProjectileThrow { projectile: ProjectileInfo },
    GrenadeProjectileBounce { projectile: ProjectileInfo },
    GrenadeProjectileDestroy { projectile: ProjectileInfo },
    HostageStateChanged { new_state: HostageState, hostage: HostageInfo },
    HostageRescued { hostage: HostageInfo },
    OtherDeath { other_type: String, killer: Option<Participant>, weapon: Option<EquipmentRef> },
    ChatMessage { sender: Participant, text: String },
    SayText { text: String },
    ConVarsUpdated { con_vars: Vec<(String, String)> },
    FrameDone,
    ParserWarn { kind: WarnKind },
    PropertyChanged { target: PropTarget, path: String, value: PropValue },
}
