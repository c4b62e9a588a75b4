//! Weapon catalogue: raw equipment identifiers reported by the decoder and
//! their human-readable names and coarse categories.

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Raw equipment identifier reported by the replay decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipmentKind {
    Unknown,
    // Pistols
    P2000,
    Glock,
    P250,
    Deagle,
    FiveSeven,
    DualBerettas,
    Tec9,
    Cz75,
    Usp,
    Revolver,
    // SMGs
    Mp7,
    Mp9,
    Bizon,
    Mac10,
    Ump45,
    P90,
    Mp5,
    // Heavy
    SawedOff,
    Nova,
    Mag7,
    Xm1014,
    M249,
    Negev,
    // Rifles
    Galil,
    Famas,
    Ak47,
    M4A4,
    M4A1,
    Sg553,
    Aug,
    Ssg08,
    Awp,
    Scar20,
    G3Sg1,
    // Grenades
    Decoy,
    Molotov,
    Incendiary,
    Flash,
    Smoke,
    He,
    // Equipment and misc
    Zeus,
    Kevlar,
    Helmet,
    Bomb,
    Knife,
    DefuseKit,
    World,
}

/// Coarse equipment class, mirroring the decoder's grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquipmentClass {
    Unknown,
    Pistols,
    Smg,
    Heavy,
    Rifle,
    Equipment,
    Grenade,
}

impl EquipmentKind {
    pub fn class(self) -> EquipmentClass {
        use EquipmentKind::*;
        match self {
            P2000 | Glock | P250 | Deagle | FiveSeven | DualBerettas | Tec9 | Cz75 | Usp
            | Revolver => EquipmentClass::Pistols,
            Mp7 | Mp9 | Bizon | Mac10 | Ump45 | P90 | Mp5 => EquipmentClass::Smg,
            SawedOff | Nova | Mag7 | Xm1014 | M249 | Negev => EquipmentClass::Heavy,
            Galil | Famas | Ak47 | M4A4 | M4A1 | Sg553 | Aug | Ssg08 | Awp | Scar20 | G3Sg1 => {
                EquipmentClass::Rifle
            }
            Decoy | Molotov | Incendiary | Flash | Smoke | He => EquipmentClass::Grenade,
            Zeus | Kevlar | Helmet | Bomb | Knife | DefuseKit => EquipmentClass::Equipment,
            Unknown | World => EquipmentClass::Unknown,
        }
    }
}

/// Display name of a weapon, matching the names used by the game UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponName {
    #[serde(rename = "AK-47")]
    Ak47,
    #[serde(rename = "AUG")]
    Aug,
    #[serde(rename = "AWP")]
    Awp,
    #[serde(rename = "C4")]
    Bomb,
    #[serde(rename = "CZ75 Auto")]
    Cz75,
    #[serde(rename = "Decoy Grenade")]
    Decoy,
    #[serde(rename = "Desert Eagle")]
    Deagle,
    #[serde(rename = "Defuse Kit")]
    DefuseKit,
    #[serde(rename = "Dual Berettas")]
    DualBerettas,
    #[serde(rename = "FAMAS")]
    Famas,
    #[serde(rename = "Five-SeveN")]
    FiveSeven,
    #[serde(rename = "Flashbang")]
    Flashbang,
    #[serde(rename = "G3SG1")]
    G3Sg1,
    #[serde(rename = "Galil AR")]
    GalilAr,
    #[serde(rename = "Glock-18")]
    Glock,
    #[serde(rename = "HE Grenade")]
    HeGrenade,
    #[serde(rename = "Kevlar + Helmet")]
    Helmet,
    #[serde(rename = "Kevlar Vest")]
    Kevlar,
    #[serde(rename = "Incendiary Grenade")]
    Incendiary,
    #[serde(rename = "Knife")]
    Knife,
    #[serde(rename = "M249")]
    M249,
    #[serde(rename = "M4A1")]
    M4A1,
    #[serde(rename = "M4A4")]
    M4A4,
    #[serde(rename = "MAC-10")]
    Mac10,
    #[serde(rename = "MAG-7")]
    Mag7,
    #[serde(rename = "Molotov")]
    Molotov,
    #[serde(rename = "MP5-SD")]
    Mp5,
    #[serde(rename = "MP7")]
    Mp7,
    #[serde(rename = "MP9")]
    Mp9,
    #[serde(rename = "Negev")]
    Negev,
    #[serde(rename = "Nova")]
    Nova,
    #[serde(rename = "P2000")]
    P2000,
    #[serde(rename = "P250")]
    P250,
    #[serde(rename = "P90")]
    P90,
    #[serde(rename = "PP-Bizon")]
    PpBizon,
    #[serde(rename = "R8 Revolver")]
    Revolver,
    #[serde(rename = "Sawed-Off")]
    SawedOff,
    #[serde(rename = "SCAR-20")]
    Scar20,
    #[serde(rename = "SSG 08")]
    Scout,
    #[serde(rename = "SG 553")]
    Sg553,
    #[serde(rename = "Smoke Grenade")]
    Smoke,
    #[serde(rename = "Tec-9")]
    Tec9,
    #[serde(rename = "UMP-45")]
    Ump45,
    #[serde(rename = "Unknown")]
    Unknown,
    #[serde(rename = "USP-S")]
    Usp,
    #[serde(rename = "World")]
    World,
    #[serde(rename = "XM1014")]
    Xm1014,
    #[serde(rename = "Zeus x27")]
    Zeus,
}

impl WeaponName {
    pub fn as_str(self) -> &'static str {
        match self {
            WeaponName::Ak47 => "AK-47",
            WeaponName::Aug => "AUG",
            WeaponName::Awp => "AWP",
            WeaponName::Bomb => "C4",
            WeaponName::Cz75 => "CZ75 Auto",
            WeaponName::Decoy => "Decoy Grenade",
            WeaponName::Deagle => "Desert Eagle",
            WeaponName::DefuseKit => "Defuse Kit",
            WeaponName::DualBerettas => "Dual Berettas",
            WeaponName::Famas => "FAMAS",
            WeaponName::FiveSeven => "Five-SeveN",
            WeaponName::Flashbang => "Flashbang",
            WeaponName::G3Sg1 => "G3SG1",
            WeaponName::GalilAr => "Galil AR",
            WeaponName::Glock => "Glock-18",
            WeaponName::HeGrenade => "HE Grenade",
            WeaponName::Helmet => "Kevlar + Helmet",
            WeaponName::Kevlar => "Kevlar Vest",
            WeaponName::Incendiary => "Incendiary Grenade",
            WeaponName::Knife => "Knife",
            WeaponName::M249 => "M249",
            WeaponName::M4A1 => "M4A1",
            WeaponName::M4A4 => "M4A4",
            WeaponName::Mac10 => "MAC-10",
            WeaponName::Mag7 => "MAG-7",
            WeaponName::Molotov => "Molotov",
            WeaponName::Mp5 => "MP5-SD",
            WeaponName::Mp7 => "MP7",
            WeaponName::Mp9 => "MP9",
            WeaponName::Negev => "Negev",
            WeaponName::Nova => "Nova",
            WeaponName::P2000 => "P2000",
            WeaponName::P250 => "P250",
            WeaponName::P90 => "P90",
            WeaponName::PpBizon => "PP-Bizon",
            WeaponName::Revolver => "R8 Revolver",
            WeaponName::SawedOff => "Sawed-Off",
            WeaponName::Scar20 => "SCAR-20",
            WeaponName::Scout => "SSG 08",
            WeaponName::Sg553 => "SG 553",
            WeaponName::Smoke => "Smoke Grenade",
            WeaponName::Tec9 => "Tec-9",
            WeaponName::Ump45 => "UMP-45",
            WeaponName::Unknown => "Unknown",
            WeaponName::Usp => "USP-S",
            WeaponName::World => "World",
            WeaponName::Xm1014 => "XM1014",
            WeaponName::Zeus => "Zeus x27",
        }
    }
}

impl fmt::Display for WeaponName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Coarse weapon category used by the statistics layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeaponType {
    #[serde(rename = "unknown")]
    Unknown,
    #[serde(rename = "pistol")]
    Pistol,
    #[serde(rename = "smg")]
    Smg,
    #[serde(rename = "shotgun")]
    Shotgun,
    #[serde(rename = "rifle")]
    Rifle,
    #[serde(rename = "sniper")]
    Sniper,
    #[serde(rename = "machine_gun")]
    MachineGun,
    #[serde(rename = "grenade")]
    Grenade,
    #[serde(rename = "equipment")]
    Equipment,
    #[serde(rename = "melee")]
    Melee,
    #[serde(rename = "world")]
    World,
}

static EQUIPMENT_NAMES: Lazy<HashMap<EquipmentKind, WeaponName>> = Lazy::new(|| {
    use EquipmentKind as K;
    use WeaponName as W;
    HashMap::from([
        (K::Ak47, W::Ak47),
        (K::Aug, W::Aug),
        (K::Awp, W::Awp),
        (K::Bomb, W::Bomb),
        (K::Cz75, W::Cz75),
        (K::Decoy, W::Decoy),
        (K::DefuseKit, W::DefuseKit),
        (K::Deagle, W::Deagle),
        (K::DualBerettas, W::DualBerettas),
        (K::Famas, W::Famas),
        (K::FiveSeven, W::FiveSeven),
        (K::Flash, W::Flashbang),
        (K::G3Sg1, W::G3Sg1),
        (K::Galil, W::GalilAr),
        (K::Glock, W::Glock),
        (K::He, W::HeGrenade),
        (K::Kevlar, W::Kevlar),
        (K::Helmet, W::Helmet),
        (K::Knife, W::Knife),
        (K::Incendiary, W::Incendiary),
        (K::M249, W::M249),
        (K::M4A1, W::M4A1),
        (K::M4A4, W::M4A4),
        (K::Mac10, W::Mac10),
        (K::Mag7, W::Mag7),
        (K::Molotov, W::Molotov),
        (K::Mp5, W::Mp5),
        (K::Mp7, W::Mp7),
        (K::Mp9, W::Mp9),
        (K::Negev, W::Negev),
        (K::Nova, W::Nova),
        (K::P2000, W::P2000),
        (K::P250, W::P250),
        (K::P90, W::P90),
        (K::Bizon, W::PpBizon),
        (K::Revolver, W::Revolver),
        (K::SawedOff, W::SawedOff),
        (K::Scar20, W::Scar20),
        (K::Sg553, W::Sg553),
        (K::Smoke, W::Smoke),
        (K::Ssg08, W::Scout),
        (K::Tec9, W::Tec9),
        (K::Ump45, W::Ump45),
        (K::Unknown, W::Unknown),
        (K::Usp, W::Usp),
        (K::World, W::World),
        (K::Xm1014, W::Xm1014),
        (K::Zeus, W::Zeus),
    ])
});

/// Display name of an equipment identifier.
pub fn weapon_name(kind: EquipmentKind) -> WeaponName {
    EQUIPMENT_NAMES.get(&kind).copied().unwrap_or(WeaponName::Unknown)
}

/// Coarse category of an equipment identifier.
pub fn weapon_type(kind: EquipmentKind) -> WeaponType {
    use EquipmentKind::*;
    match kind {
        Cz75 | Deagle | DualBerettas | FiveSeven | Glock | P2000 | P250 | Revolver | Tec9
        | Usp => WeaponType::Pistol,
        Ak47 | Aug | Famas | Galil | M4A1 | M4A4 | Sg553 => WeaponType::Rifle,
        Awp | G3Sg1 | Scar20 | Ssg08 => WeaponType::Sniper,
        Mac10 | Mp5 | Mp7 | Mp9 | P90 | Bizon | Ump45 => WeaponType::Smg,
        Mag7 | Nova | SawedOff | Xm1014 => WeaponType::Shotgun,
        M249 | Negev => WeaponType::MachineGun,
        Decoy | Flash | He | Incendiary | Molotov | Smoke => WeaponType::Grenade,
        Bomb | DefuseKit | Kevlar | Helmet => WeaponType::Equipment,
        Knife | Zeus => WeaponType::Melee,
        World => WeaponType::World,
        Unknown => WeaponType::Unknown,
    }
}

/// Bomb site identifier carried by bomb lifecycle events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BombSite {
    #[serde(rename = "")]
    Unknown,
    A,
    B,
}

impl fmt::Display for BombSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BombSite::Unknown => Ok(()),
            BombSite::A => write!(f, "A"),
            BombSite::B => write!(f, "B"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_equipment_kind_has_a_name() {
        assert_eq!(weapon_name(EquipmentKind::Ak47), WeaponName::Ak47);
        assert_eq!(weapon_name(EquipmentKind::Ssg08), WeaponName::Scout);
        assert_eq!(weapon_name(EquipmentKind::Mag7), WeaponName::Mag7);
        assert_eq!(weapon_name(EquipmentKind::Unknown), WeaponName::Unknown);
    }

    #[test]
    fn weapon_types_follow_the_catalogue() {
        assert_eq!(weapon_type(EquipmentKind::Awp), WeaponType::Sniper);
        assert_eq!(weapon_type(EquipmentKind::He), WeaponType::Grenade);
        assert_eq!(weapon_type(EquipmentKind::Zeus), WeaponType::Melee);
        assert_eq!(weapon_type(EquipmentKind::Kevlar), WeaponType::Equipment);
    }

    #[test]
    fn grenades_share_the_grenade_class() {
        for kind in [
            EquipmentKind::Decoy,
            EquipmentKind::Molotov,
            EquipmentKind::Incendiary,
            EquipmentKind::Flash,
            EquipmentKind::Smoke,
            EquipmentKind::He,
        ] {
            assert_eq!(kind.class(), EquipmentClass::Grenade);
        }
    }
}
