//! Name Pools
//!
//! Given names, dynasty names, role honorifics and natural causes of death.

use crate::components::Role;

pub const GIVEN_NAMES: &[&str] = &[
    "Ada", "Aldric", "Alys", "Bertram", "Bram", "Cassia", "Cedric", "Corin", "Dagny", "Edric",
    "Elena", "Elspeth", "Feyd", "Gareth", "Giselle", "Halvard", "Helena", "Ingram", "Isolde", "Jorund",
    "Kestrel", "Leofric", "Livia", "Magnus", "Maren", "Matthias", "Nerissa", "Osric", "Octavia", "Perrin",
    "Rowena", "Roland", "Sabine", "Sigrid", "Talia", "Theobald", "Ulric", "Valdis", "Wilhelm", "Ysolde",
];

pub const DYNASTY_NAMES: &[&str] = &[
    "Ashcombe", "Blackthorn", "Corvane", "Dunmere", "Eastwold", "Falkrest", "Greymantle", "Harrow",
    "Ironvale", "Kingsley", "Lothmere", "Marrowind", "Northam", "Ostrava", "Ravencourt", "Stormhold",
    "Thornfield", "Valen", "Westerling", "Wyvernholt",
];

const RULER_TITLES: &[&str] = &["King", "Queen", "High Lord", "Sovereign"];
const HEIR_TITLES: &[&str] = &["Prince", "Princess", "Heir Apparent"];
const GENERAL_TITLES: &[&str] = &["General", "Marshal", "Warlord", "Commander"];
const ADVISOR_TITLES: &[&str] = &["Chancellor", "Vizier", "Counselor", "Steward"];
const RIVAL_TITLES: &[&str] = &["Duke", "Baron", "Count", "Lady"];
const REBEL_TITLES: &[&str] = &["Rebel Leader"];

/// Honorifics a character of this role may carry
pub fn titles_for(role: Role) -> &'static [&'static str] {
    match role {
        Role::Ruler => RULER_TITLES,
        Role::Heir => HEIR_TITLES,
        Role::General => GENERAL_TITLES,
        Role::Advisor => ADVISOR_TITLES,
        Role::Rival => RIVAL_TITLES,
        Role::RebelLeader => REBEL_TITLES,
    }
}

/// Natural causes of death, phrased to follow "died of"
pub const NATURAL_CAUSES: &[&str] = &[
    "old age",
    "a wasting fever",
    "the winter cough",
    "a seizure at a feast",
    "a failing heart",
    "a fall from a horse",
];
