//! Fact ingestion: turns notifications into ledger entries stamped with the
//! current frame/tick/round, and runs the synchronous per-kill analysis
//! (trade flagging, clutch tracking).

use tracing::warn;

use crate::constants::{
    weapon_name, weapon_type, BombSite, EquipmentClass, HitGroup, HostageState, Side, WeaponName,
};
use crate::models::{
    BombDefuseStart, BombDefused, BombExploded, BombPlantStart, BombPlanted, ChickenPosition,
    Clutch, Damage, GrenadeDetonation, GrenadePosition, GrenadeProjectileEvent, HostagePosition,
    InfernoPosition, Kill, PlayerBuy, PlayerPosition, Shot,
};
use crate::source::{
    EquipmentRef, GameStateView, GrenadeEvent, HostageInfo, KillEvent, Participant, ProjectileInfo,
};
use crate::spatial::{distance_meters, Vec3};

use super::core::{Core, TRADE_KILL_DELAY_SECONDS};

impl Core {
    /// Handles a kill notification: appends the fact, flags trades, updates
    /// open clutches and opens new ones from the post-kill living counts.
    pub(crate) fn on_kill(&mut self, view: &dyn GameStateView, event: &KillEvent) {
        let killer_steam_id = event.killer.as_ref().map_or(0, |p| p.steam_id);
        let victim_steam_id = event.victim.as_ref().map_or(0, |p| p.steam_id);

        if let Some(kill) = self.new_kill(view, event) {
            self.match_data.kills.push(kill);
        }

        for clutch_index in [self.clutch1, self.clutch2].into_iter().flatten() {
            let clutch = &mut self.match_data.clutches[clutch_index];
            if clutch.clutcher_steam_id == victim_steam_id {
                clutch.clutcher_survived = false;
            } else if clutch.clutcher_steam_id == killer_steam_id {
                clutch.clutcher_kill_count += 1;
            }
        }

        // Living counts per side, the victim excluded: the death may not have
        // been applied to the view yet.
        let mut counter_terrorists_alive: Vec<Participant> = Vec::new();
        let mut terrorists_alive: Vec<Participant> = Vec::new();
        for participant in view.playing_participants() {
            if !participant.is_alive || participant.steam_id == victim_steam_id {
                continue;
            }
            match participant.side {
                Side::CounterTerrorist => counter_terrorists_alive.push(participant),
                Side::Terrorist => terrorists_alive.push(participant),
                _ => {}
            }
        }

        // 1vX detection.
        if self.clutch1.is_none()
            && (counter_terrorists_alive.len() == 1 || terrorists_alive.len() == 1)
        {
            let (side, opponent_count, clutcher) = if counter_terrorists_alive.len() == 1 {
                (Side::CounterTerrorist, terrorists_alive.len(), &counter_terrorists_alive[0])
            } else {
                (Side::Terrorist, counter_terrorists_alive.len(), &terrorists_alive[0])
            };

            let clutch = self.new_clutch(view, clutcher, side, opponent_count as i32);
            self.match_data.clutches.push(clutch);
            self.clutch1 = Some(self.match_data.clutches.len() - 1);
        }

        // A tighter 1v1 opens a second clutch for the other side's survivor.
        if let Some(clutch1_index) = self.clutch1 {
            if counter_terrorists_alive.len() == 1 && terrorists_alive.len() == 1 {
                let clutch1_side = self.match_data.clutches[clutch1_index].side;
                let clutcher = if clutch1_side == Side::CounterTerrorist {
                    &terrorists_alive[0]
                } else {
                    &counter_terrorists_alive[0]
                };
                let side = clutch1_side.opposite();

                let clutch = self.new_clutch(view, clutcher, side, 1);
                self.match_data.clutches.push(clutch);
                self.clutch2 = Some(self.match_data.clutches.len() - 1);
            }
        }
    }

    fn new_clutch(
        &self,
        view: &dyn GameStateView,
        clutcher: &Participant,
        side: Side,
        opponent_count: i32,
    ) -> Clutch {
        Clutch {
            frame: view.current_frame(),
            tick: view.current_tick(),
            round_number: self.current_round.number,
            opponent_count,
            side,
            has_won: false,
            clutcher_steam_id: clutcher.steam_id,
            clutcher_name: clutcher.name.clone(),
            clutcher_survived: true,
            clutcher_kill_count: 0,
        }
    }

    fn new_kill(&mut self, view: &dyn GameStateView, event: &KillEvent) -> Option<Kill> {
        let weapon = match &event.weapon {
            Some(weapon) => *weapon,
            None => {
                warn!("kill event without weapon occurred");
                return None;
            }
        };
        let victim = match &event.victim {
            Some(victim) => victim,
            None => {
                warn!("kill event without victim occurred");
                return None;
            }
        };

        let killer_steam_id = event.killer.as_ref().map_or(0, |p| p.steam_id);

        // Trade flagging: an earlier same-round kill whose killer is this
        // victim becomes a trade death once at least the delay has elapsed
        // since it.
        let mut is_trade_kill = false;
        let current_tick = view.current_tick();
        let tick_interval = view.tick_interval();
        let round_number = self.current_round.number;
        for kill in self.match_data.kills.iter_mut() {
            if kill.round_number == round_number
                && killer_steam_id != 0
                && kill.killer_steam_id == victim.steam_id
                && f64::from(current_tick - kill.tick) * tick_interval >= TRADE_KILL_DELAY_SECONDS
            {
                is_trade_kill = true;
                kill.is_trade_death = true;
            }
        }

        let mut kill = Kill {
            frame: view.current_frame(),
            tick: current_tick,
            round_number,
            weapon_type: weapon_type(weapon.kind),
            weapon_name: weapon_name(weapon.kind),
            killer_name: "World".to_string(),
            killer_steam_id: 0,
            killer_side: Side::Unassigned,
            killer_team_name: String::new(),
            killer_position: Vec3::zeros(),
            is_killer_airborne: false,
            is_killer_blinded: false,
            is_killer_controlling_bot: false,
            victim_name: victim.name.clone(),
            victim_steam_id: victim.steam_id,
            victim_side: victim.side,
            victim_team_name: self.match_data.team(victim.side).name.clone(),
            victim_position: victim.position,
            is_victim_airborne: victim.is_airborne,
            is_victim_blinded: victim.is_blinded,
            is_victim_controlling_bot: victim.is_controlling_bot,
            is_victim_inspecting_weapon: victim.is_inspecting_weapon,
            assister_name: String::new(),
            assister_steam_id: 0,
            assister_side: Side::Unassigned,
            assister_team_name: String::new(),
            assister_position: Vec3::zeros(),
            is_assister_controlling_bot: false,
            is_headshot: event.is_headshot,
            penetrated_objects: event.penetrated_objects,
            is_assisted_flash: event.is_assisted_flash,
            is_through_smoke: event.is_through_smoke,
            is_no_scope: event.is_no_scope,
            is_trade_kill,
            is_trade_death: false,
            distance: event.distance,
        };

        if let Some(killer) = &event.killer {
            kill.killer_name = killer.name.clone();
            kill.killer_steam_id = killer.steam_id;
            kill.killer_side = killer.side;
            kill.killer_team_name = self.match_data.team(killer.side).name.clone();
            kill.killer_position = killer.position;
            kill.is_killer_airborne = killer.is_airborne;
            kill.is_killer_blinded = killer.is_blinded;
            kill.is_killer_controlling_bot = killer.is_controlling_bot;
        }

        if let Some(assister) = &event.assister {
            kill.assister_name = assister.name.clone();
            kill.assister_steam_id = assister.steam_id;
            kill.assister_side = assister.side;
            kill.assister_team_name = self.match_data.team(assister.side).name.clone();
            kill.assister_position = assister.position;
            kill.is_assister_controlling_bot = assister.is_controlling_bot;
        }

        if kill.distance == 0.0 {
            if let Some(killer) = &event.killer {
                kill.distance = distance_meters(&killer.position, &victim.position) as f32;
            }
        }

        Some(kill)
    }

    pub(crate) fn on_player_hurt(
        &mut self,
        view: &dyn GameStateView,
        player: &Participant,
        attacker: Option<&Participant>,
        weapon: Option<EquipmentRef>,
        health_damage_taken: i32,
        armor_damage_taken: i32,
        new_health: i32,
        new_armor: i32,
        hit_group: HitGroup,
    ) {
        let weapon = match weapon {
            Some(weapon) => weapon,
            None => {
                warn!("player hurt event without weapon occurred");
                return;
            }
        };

        let (attacker_steam_id, attacker_side, attacker_team_name, is_attacker_controlling_bot) =
            match attacker {
                Some(attacker) => (
                    attacker.steam_id,
                    attacker.side,
                    self.match_data.team(attacker.side).name.clone(),
                    attacker.is_controlling_bot,
                ),
                None => (0, Side::Unassigned, "World".to_string(), false),
            };

        let damage = Damage {
            frame: view.current_frame(),
            tick: view.current_tick(),
            round_number: self.current_round.number,
            health_damage: health_damage_taken.max(0),
            armor_damage: armor_damage_taken.max(0),
            attacker_steam_id,
            attacker_side,
            attacker_team_name,
            is_attacker_controlling_bot,
            victim_health: player.health.max(0),
            victim_new_health: new_health.max(0),
            victim_armor: player.armor.max(0),
            victim_new_armor: new_armor.max(0),
            victim_steam_id: player.steam_id,
            victim_side: player.side,
            victim_team_name: self.match_data.team(player.side).name.clone(),
            is_victim_controlling_bot: player.is_controlling_bot,
            hit_group,
            weapon_name: weapon_name(weapon.kind),
            weapon_type: weapon_type(weapon.kind),
            weapon_unique_id: weapon.unique_id,
        };
        self.match_data.damages.push(damage);
    }

    pub(crate) fn on_weapon_fire(
        &mut self,
        view: &dyn GameStateView,
        shooter: Option<&Participant>,
        weapon: EquipmentRef,
        recoil_index: f32,
        aim_punch_angle: Vec3,
        view_punch_angle: Vec3,
    ) {
        let shooter = match shooter {
            Some(shooter) => shooter,
            None => return,
        };

        let shot = Shot {
            frame: view.current_frame(),
            tick: view.current_tick(),
            round_number: self.current_round.number,
            weapon_name: weapon_name(weapon.kind),
            weapon_id: weapon.unique_id,
            projectile_id: 0,
            position: shooter.position,
            player_name: shooter.name.clone(),
            player_steam_id: shooter.steam_id,
            player_team_name: self.match_data.team(shooter.side).name.clone(),
            player_side: shooter.side,
            is_player_controlling_bot: shooter.is_controlling_bot,
            player_velocity: shooter.velocity,
            yaw: shooter.view_yaw,
            pitch: shooter.view_pitch,
            recoil_index,
            aim_punch_angle,
            view_punch_angle,
        };

        self.match_data.shots.push(shot);

        if weapon.kind.class() == EquipmentClass::Grenade {
            // Remember the shot so its projectile id can be linked once the
            // projectile entity appears, a few ticks later.
            self.last_grenade_thrown_by_player
                .insert(shooter.steam_id, self.match_data.shots.len() - 1);
        }
    }

    pub(crate) fn on_grenade_projectile_throw(&mut self, projectile: &ProjectileInfo) {
        let thrower = match &projectile.thrower {
            Some(thrower) => thrower,
            None => {
                warn!("thrower missing in grenade projectile throw event");
                return;
            }
        };

        match self.last_grenade_thrown_by_player.remove(&thrower.steam_id) {
            Some(shot_index) => {
                if let Some(shot) = self.match_data.shots.get_mut(shot_index) {
                    shot.projectile_id = projectile.unique_id;
                }
            }
            None => {
                warn!("projectile throw without a matching weapon fire event");
            }
        }
    }

    pub(crate) fn new_grenade_detonation(
        &self,
        view: &dyn GameStateView,
        event: &GrenadeEvent,
    ) -> Option<GrenadeDetonation> {
        let thrower = match &event.thrower {
            Some(thrower) => thrower,
            None => {
                warn!("thrower missing in grenade detonation event");
                return None;
            }
        };

        let projectile_id = view
            .grenade_projectiles()
            .iter()
            .find(|projectile| projectile.grenade_id == event.grenade_id)
            .map_or(0, |projectile| projectile.unique_id);

        Some(GrenadeDetonation {
            frame: view.current_frame(),
            tick: view.current_tick(),
            round_number: self.current_round.number,
            grenade_id: event.grenade_id,
            projectile_id,
            position: event.position,
            thrower_steam_id: thrower.steam_id,
            thrower_name: thrower.name.clone(),
            thrower_side: thrower.side,
            thrower_team_name: self.match_data.team(thrower.side).name.clone(),
            thrower_velocity: thrower.velocity,
            thrower_yaw: thrower.view_yaw,
            thrower_pitch: thrower.view_pitch,
        })
    }

    pub(crate) fn new_grenade_projectile_event(
        &self,
        view: &dyn GameStateView,
        projectile: &ProjectileInfo,
    ) -> Option<GrenadeProjectileEvent> {
        let thrower = match &projectile.thrower {
            Some(thrower) => thrower,
            None => {
                warn!("thrower missing in grenade projectile event");
                return None;
            }
        };

        Some(GrenadeProjectileEvent {
            frame: view.current_frame(),
            tick: view.current_tick(),
            round_number: self.current_round.number,
            grenade_id: projectile.grenade_id,
            projectile_id: projectile.unique_id,
            grenade_name: weapon_name(projectile.kind),
            position: projectile.position,
            thrower_steam_id: thrower.steam_id,
            thrower_name: thrower.name.clone(),
            thrower_side: thrower.side,
            thrower_team_name: self.match_data.team(thrower.side).name.clone(),
        })
    }

    pub(crate) fn on_item_pickup(
        &mut self,
        view: &dyn GameStateView,
        player: &Participant,
        weapon: EquipmentRef,
    ) {
        if player.is_bot || !player.is_in_buy_zone {
            return;
        }

        let kind = weapon.kind;
        let is_not_buyable = matches!(
            kind,
            crate::constants::EquipmentKind::Knife
                | crate::constants::EquipmentKind::Bomb
                | crate::constants::EquipmentKind::Unknown
                | crate::constants::EquipmentKind::World
        );
        if is_not_buyable {
            return;
        }

        let is_default_terrorist_pistol =
            player.side == Side::Terrorist && kind == crate::constants::EquipmentKind::Glock;
        if is_default_terrorist_pistol {
            return;
        }

        let is_default_counter_terrorist_pistol = player.side == Side::CounterTerrorist
            && matches!(
                kind,
                crate::constants::EquipmentKind::Usp | crate::constants::EquipmentKind::P2000
            );
        if is_default_counter_terrorist_pistol {
            return;
        }

        let is_dropped_weapon =
            self.current_round.weapons_bought_unique_ids.contains(&weapon.unique_id);
        if is_dropped_weapon {
            return;
        }

        let is_buy_time_ended = self.current_round.seconds_passed_since_start(
            view.current_tick(),
            view.tick_interval(),
            f64::from(self.buy_time_seconds),
        );
        if is_buy_time_ended {
            return;
        }

        self.current_round.weapons_bought_unique_ids.push(weapon.unique_id);
        self.match_data.players_buy.push(PlayerBuy {
            frame: view.current_frame(),
            tick: view.current_tick(),
            round_number: self.current_round.number,
            player_steam_id: player.steam_id,
            player_side: player.side,
            player_name: player.name.clone(),
            weapon_name: weapon_name(kind),
            weapon_type: weapon_type(kind),
            weapon_unique_id: weapon.unique_id,
            has_refunded: false,
        });
    }

    pub(crate) fn on_bomb_planted(
        &mut self,
        view: &dyn GameStateView,
        player: &Participant,
        site: BombSite,
    ) {
        self.bomb_plant_position = player.last_alive_position;
        self.match_data.bombs_planted.push(BombPlanted {
            frame: view.current_frame(),
            tick: view.current_tick(),
            round_number: self.current_round.number,
            site,
            planter_steam_id: player.steam_id,
            planter_name: player.name.clone(),
            is_player_controlling_bot: player.is_controlling_bot,
            position: player.last_alive_position,
        });
    }

    pub(crate) fn on_bomb_plant_begin(
        &mut self,
        view: &dyn GameStateView,
        player: &Participant,
        site: BombSite,
    ) {
        self.match_data.bombs_plant_start.push(BombPlantStart {
            frame: view.current_frame(),
            tick: view.current_tick(),
            round_number: self.current_round.number,
            site,
            planter_steam_id: player.steam_id,
            planter_name: player.name.clone(),
            is_player_controlling_bot: player.is_controlling_bot,
            position: player.last_alive_position,
        });
    }

    pub(crate) fn on_bomb_defuse_start(&mut self, view: &dyn GameStateView, player: &Participant) {
        self.match_data.bombs_defuse_start.push(BombDefuseStart {
            frame: view.current_frame(),
            tick: view.current_tick(),
            round_number: self.current_round.number,
            defuser_steam_id: player.steam_id,
            defuser_name: player.name.clone(),
            is_player_controlling_bot: player.is_controlling_bot,
            position: player.last_alive_position,
        });
    }

    pub(crate) fn new_bomb_defused(
        &self,
        view: &dyn GameStateView,
        player: &Participant,
        site: BombSite,
    ) -> BombDefused {
        let mut counter_terrorist_alive_count = 0;
        let mut terrorist_alive_count = 0;
        for participant in view.playing_participants() {
            if !participant.is_alive {
                continue;
            }
            match participant.side {
                Side::CounterTerrorist => counter_terrorist_alive_count += 1,
                Side::Terrorist => terrorist_alive_count += 1,
                _ => {}
            }
        }

        BombDefused {
            frame: view.current_frame(),
            tick: view.current_tick(),
            round_number: self.current_round.number,
            site,
            defuser_steam_id: player.steam_id,
            defuser_name: player.name.clone(),
            is_player_controlling_bot: player.is_controlling_bot,
            position: player.last_alive_position,
            counter_terrorist_alive_count,
            terrorist_alive_count,
        }
    }

    pub(crate) fn on_bomb_exploded(
        &mut self,
        view: &dyn GameStateView,
        player: &Participant,
        site: BombSite,
    ) {
        self.match_data.bombs_exploded.push(BombExploded {
            frame: view.current_frame(),
            tick: view.current_tick(),
            round_number: self.current_round.number,
            site,
            planter_steam_id: player.steam_id,
            planter_name: player.name.clone(),
            is_player_controlling_bot: player.is_controlling_bot,
            // The explode notification carries no position; use the one
            // cached at plant time.
            position: self.bomb_plant_position,
        });
    }

    /// The last bomb defused fact of the current round, if any.
    pub(crate) fn current_round_bomb_defused_exists(&self) -> bool {
        self.match_data
            .bombs_defused
            .last()
            .is_some_and(|defused| defused.round_number == self.current_round.number)
    }

    pub(crate) fn on_hostage_state_changed(
        &mut self,
        view: &dyn GameStateView,
        new_state: HostageState,
        hostage: &HostageInfo,
    ) {
        match new_state {
            HostageState::BeingUntied => {
                for participant in view.playing_participants() {
                    let has_no_untying_in_progress =
                        !self.players_untying_hostage.contains_key(&participant.steam_id);
                    if participant.is_grabbing_hostage && has_no_untying_in_progress {
                        self.players_untying_hostage
                            .insert(participant.steam_id, hostage.entity_id);
                        self.match_data.hostage_pick_up_start.push(
                            crate::models::HostagePickUpStart {
                                frame: view.current_frame(),
                                tick: view.current_tick(),
                                round_number: self.current_round.number,
                                hostage_entity_id: hostage.entity_id,
                                player_steam_id: participant.steam_id,
                                is_player_controlling_bot: participant.is_controlling_bot,
                                position: hostage.position,
                            },
                        );
                        break;
                    }
                }
            }
            HostageState::GettingPickedUp => {
                if let Some(leader) = &hostage.leader {
                    self.players_untying_hostage.remove(&leader.steam_id);
                    self.match_data.hostage_picked_up.push(crate::models::HostagePickedUp {
                        frame: view.current_frame(),
                        tick: view.current_tick(),
                        round_number: self.current_round.number,
                        hostage_entity_id: hostage.entity_id,
                        player_steam_id: leader.steam_id,
                        is_player_controlling_bot: leader.is_controlling_bot,
                        position: hostage.position,
                    });
                }
            }
            HostageState::Idle => {
                // A player started untying and cancelled.
                for participant in view.playing_participants() {
                    let was_untying = self.players_untying_hostage.get(&participant.steam_id)
                        == Some(&hostage.entity_id);
                    if !participant.is_grabbing_hostage && was_untying {
                        self.players_untying_hostage.remove(&participant.steam_id);
                        break;
                    }
                }
            }
            HostageState::BeingCarried => {
                if let Some(leader) = &hostage.leader {
                    self.players_untying_hostage.remove(&leader.steam_id);
                }
            }
            _ => {}
        }
    }

    pub(crate) fn on_hostage_rescued(&mut self, view: &dyn GameStateView, hostage: &HostageInfo) {
        let leader = match &hostage.leader {
            Some(leader) => leader,
            None => return,
        };

        self.match_data.hostage_rescued.push(crate::models::HostageRescued {
            frame: view.current_frame(),
            tick: view.current_tick(),
            round_number: self.current_round.number,
            hostage_entity_id: hostage.entity_id,
            player_steam_id: leader.steam_id,
            is_player_controlling_bot: leader.is_controlling_bot,
            position: hostage.position,
        });
    }

    /// Samples entity positions at the end of a frame.
    pub(crate) fn sample_positions(&mut self, view: &dyn GameStateView) {
        let frame = view.current_frame();
        let tick = view.current_tick();
        let round_number = self.current_round.number;

        for chicken in view.chickens() {
            self.match_data.chicken_positions.push(ChickenPosition {
                frame,
                tick,
                round_number,
                position: chicken.position,
            });
        }

        for projectile in view.grenade_projectiles() {
            if let Some(thrower) = &projectile.thrower {
                self.match_data.grenade_positions.push(GrenadePosition {
                    frame,
                    tick,
                    round_number,
                    projectile_id: projectile.unique_id,
                    grenade_name: weapon_name(projectile.kind),
                    thrower_steam_id: thrower.steam_id,
                    thrower_name: thrower.name.clone(),
                    position: projectile.position,
                });
            }
        }

        for inferno in view.infernos() {
            if let Some(thrower) = &inferno.thrower {
                self.match_data.inferno_positions.push(InfernoPosition {
                    frame,
                    tick,
                    round_number,
                    unique_id: inferno.unique_id,
                    thrower_steam_id: thrower.steam_id,
                    thrower_name: thrower.name.clone(),
                    position: inferno.position,
                    convex_hull_2d: inferno.convex_hull_2d.clone(),
                });
            }
        }

        for participant in view.playing_participants() {
            let active_weapon_name =
                participant.active_weapon.map_or(WeaponName::Unknown, weapon_name);
            self.match_data.player_positions.push(PlayerPosition {
                frame,
                tick,
                round_number,
                is_alive: participant.is_alive,
                name: participant.name.clone(),
                steam_id: participant.steam_id,
                position: participant.position,
                yaw: participant.view_yaw,
                flash_duration_remaining: participant.flash_duration_remaining,
                side: participant.side,
                money: participant.money,
                health: participant.health,
                armor: participant.armor,
                has_helmet: participant.has_helmet,
                has_bomb: participant.has_bomb,
                has_defuse_kit: participant.has_defuse_kit,
                is_ducking: participant.is_ducking,
                is_airborne: participant.is_airborne,
                is_scoping: participant.is_scoped,
                is_defusing: participant.is_defusing,
                is_planting: participant.is_planting,
                is_grabbing_hostage: participant.is_grabbing_hostage,
                active_weapon_name,
            });
        }

        for hostage in view.hostages() {
            self.match_data.hostage_positions.push(HostagePosition {
                frame,
                tick,
                round_number,
                position: hostage.position,
                state: hostage.state,
            });
        }
    }
}
