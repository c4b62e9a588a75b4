//! Scripted fake of the replay-decoding collaborator, used to drive the
//! analyzer through hand-written match scenarios.

#![allow(dead_code)]

use cma_core::constants::{DemoSource, DemoType, EquipmentKind, RoundEndReason, Side};
use cma_core::source::{
    DemoHeader, EquipmentRef, EventSource, GameEvent, GameStateView, KillEvent, Participant,
    SourceError, TeamState,
};

pub const TICK_RATE: f64 = 64.0;

/// Mutable game state snapshot the tests drive by hand.
pub struct FakeState {
    pub tick: i32,
    pub frame: i32,
    pub warmup: bool,
    pub match_started: bool,
    pub total_rounds_played: i32,
    pub participants: Vec<Participant>,
    pub ct_clan_name: String,
    pub t_clan_name: String,
    pub ct_equipment_value: i32,
    pub t_equipment_value: i32,
    pub ct_money_spent: i32,
    pub t_money_spent: i32,
}

impl FakeState {
    pub fn new() -> FakeState {
        FakeState {
            tick: 1,
            frame: 1,
            warmup: false,
            match_started: false,
            total_rounds_played: 0,
            participants: Vec::new(),
            ct_clan_name: String::new(),
            t_clan_name: String::new(),
            ct_equipment_value: 0,
            t_equipment_value: 0,
            ct_money_spent: 0,
            t_money_spent: 0,
        }
    }

    pub fn advance_ticks(&mut self, ticks: i32) {
        self.tick += ticks;
        self.frame += ticks;
    }

    pub fn advance_seconds(&mut self, seconds: f64) {
        self.advance_ticks((seconds * TICK_RATE).round() as i32);
    }

    pub fn player_mut(&mut self, steam_id: u64) -> &mut Participant {
        self.participants
            .iter_mut()
            .find(|p| p.steam_id == steam_id)
            .expect("unknown fake participant")
    }

    pub fn player(&self, steam_id: u64) -> Participant {
        self.participants
            .iter()
            .find(|p| p.steam_id == steam_id)
            .cloned()
            .expect("unknown fake participant")
    }

    pub fn set_all_money(&mut self, money: i32) {
        for participant in &mut self.participants {
            participant.money = money;
        }
    }

    pub fn kill(&mut self, killer_id: u64, victim_id: u64, weapon: EquipmentKind) -> GameEvent {
        let event = kill_event(&self.player(killer_id), &self.player(victim_id), weapon);
        // The decoder applies the death before dispatching further events.
        self.player_mut(victim_id).is_alive = false;
        event
    }
}

impl GameStateView for FakeState {
    fn current_tick(&self) -> i32 {
        self.tick
    }

    fn current_frame(&self) -> i32 {
        self.frame
    }

    fn tick_rate(&self) -> f64 {
        TICK_RATE
    }

    fn is_warmup_period(&self) -> bool {
        self.warmup
    }

    fn is_match_started(&self) -> bool {
        self.match_started
    }

    fn total_rounds_played(&self) -> i32 {
        self.total_rounds_played
    }

    fn participants(&self) -> Vec<Participant> {
        self.participants.clone()
    }

    fn team_state(&self, side: Side) -> TeamState {
        match side {
            Side::CounterTerrorist => TeamState {
                clan_name: self.ct_clan_name.clone(),
                equipment_value: self.ct_equipment_value,
                money_spent_this_round: self.ct_money_spent,
            },
            Side::Terrorist => TeamState {
                clan_name: self.t_clan_name.clone(),
                equipment_value: self.t_equipment_value,
                money_spent_this_round: self.t_money_spent,
            },
            _ => TeamState::default(),
        }
    }
}

pub fn header(source: DemoSource) -> DemoHeader {
    DemoHeader {
        file_path: "/demos/test.dem".to_string(),
        file_name: "test.dem".to_string(),
        map_name: "de_dust2".to_string(),
        tick_rate: TICK_RATE,
        frame_rate: TICK_RATE,
        is_source2: true,
        demo_type: DemoType::Gotv,
        detected_source: Some(source),
        ..DemoHeader::default()
    }
}

pub fn participant(steam_id: u64, name: &str, side: Side) -> Participant {
    Participant {
        steam_id,
        entity_id: steam_id as i32,
        name: name.to_string(),
        side,
        money: 800,
        ..Participant::default()
    }
}

/// Standard 2v2 roster: CTs 1 and 2, Ts 3 and 4.
pub fn two_on_two() -> Vec<Participant> {
    vec![
        participant(1, "ct_one", Side::CounterTerrorist),
        participant(2, "ct_two", Side::CounterTerrorist),
        participant(3, "t_one", Side::Terrorist),
        participant(4, "t_two", Side::Terrorist),
    ]
}

/// Roster with the given side sizes. CT ids start at 1, T ids at 101.
pub fn roster(ct_count: u64, t_count: u64) -> Vec<Participant> {
    let mut participants = Vec::new();
    for i in 1..=ct_count {
        participants.push(participant(i, &format!("ct_{}", i), Side::CounterTerrorist));
    }
    for i in 1..=t_count {
        participants.push(participant(100 + i, &format!("t_{}", i), Side::Terrorist));
    }
    participants
}

pub fn kill_event(killer: &Participant, victim: &Participant, weapon: EquipmentKind) -> GameEvent {
    GameEvent::Kill(Box::new(KillEvent {
        killer: Some(killer.clone()),
        victim: Some(victim.clone()),
        assister: None,
        weapon: Some(EquipmentRef { kind: weapon, unique_id: 0 }),
        is_headshot: false,
        penetrated_objects: 0,
        is_assisted_flash: false,
        is_through_smoke: false,
        is_no_scope: false,
        distance: 5.0,
    }))
}

pub fn round_end(winner: Side) -> GameEvent {
    GameEvent::RoundEnd {
        winner,
        reason: match winner {
            Side::CounterTerrorist => RoundEndReason::CtWin,
            _ => RoundEndReason::TerroristsWin,
        },
        message: String::new(),
    }
}

pub fn game_restart_prop(value: bool) -> GameEvent {
    GameEvent::PropertyChanged {
        target: cma_core::source::PropTarget::GameRules,
        path: "m_pGameRules.m_bGameRestart".to_string(),
        value: cma_core::source::PropValue::Bool(value),
    }
}

/// Minimal [`EventSource`] over a pre-recorded script, for exercising the
/// top-level entry point. State mutations between events are not supported;
/// scenario tests drive an [`cma_core::Analyzer`] directly instead.
pub struct ScriptedSource {
    header: DemoHeader,
    state: FakeState,
    events: std::collections::VecDeque<GameEvent>,
    truncate: bool,
}

impl ScriptedSource {
    pub fn new(header: DemoHeader, state: FakeState, events: Vec<GameEvent>) -> ScriptedSource {
        ScriptedSource { header, state, events: events.into(), truncate: false }
    }

    /// Ends the stream with a truncation error instead of a clean stop.
    pub fn truncated(mut self) -> ScriptedSource {
        self.truncate = true;
        self
    }
}

impl EventSource for ScriptedSource {
    fn header(&self) -> &DemoHeader {
        &self.header
    }

    fn next_event(&mut self) -> Result<Option<GameEvent>, SourceError> {
        self.state.advance_ticks(8);
        match self.events.pop_front() {
            Some(event) => Ok(Some(event)),
            None if self.truncate => Err(SourceError::UnexpectedEndOfStream),
            None => Ok(None),
        }
    }

    fn view(&self) -> &dyn GameStateView {
        &self.state
    }
}
