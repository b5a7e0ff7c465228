//! Keyboard zone classification
//!
//! Maps a key to a coarse region of the QWERTY keyboard so the interface
//! can light up a whole row or half of the board instead of a single key.
//! Row membership always wins over the hand table: `a` is `Home`, never `Left`.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

/// A named keyboard region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Zone {
    /// Keys typed with the left hand
    Left,
    /// Keys typed with the right hand
    Right,
    /// a s d f j k l ;
    Home,
    /// q w e r t y u i o p
    Top,
    /// z x c v b n m
    Bottom,
}

impl Zone {
    /// Display name for the zone
    pub fn name(&self) -> &'static str {
        match self {
            Self::Left => "Left hand",
            Self::Right => "Right hand",
            Self::Home => "Home row",
            Self::Top => "Top row",
            Self::Bottom => "Bottom row",
        }
    }
}

pub const HOME_ROW: [char; 8] = ['a', 's', 'd', 'f', 'j', 'k', 'l', ';'];
pub const TOP_ROW: [char; 10] = ['q', 'w', 'e', 'r', 't', 'y', 'u', 'i', 'o', 'p'];
pub const BOTTOM_ROW: [char; 7] = ['z', 'x', 'c', 'v', 'b', 'n', 'm'];

pub const LEFT_HAND: [char; 15] = [
    'q', 'w', 'e', 'r', 't', 'a', 's', 'd', 'f', 'g', 'z', 'x', 'c', 'v', 'b',
];
pub const RIGHT_HAND: [char; 11] = ['y', 'u', 'i', 'o', 'p', 'h', 'j', 'k', 'l', 'n', 'm'];

static HOME_SET: LazyLock<HashSet<char>> = LazyLock::new(|| HOME_ROW.into_iter().collect());
static TOP_SET: LazyLock<HashSet<char>> = LazyLock::new(|| TOP_ROW.into_iter().collect());
static BOTTOM_SET: LazyLock<HashSet<char>> = LazyLock::new(|| BOTTOM_ROW.into_iter().collect());

/// Letter to hand lookup
pub static HAND_ZONES: LazyLock<HashMap<char, Zone>> = LazyLock::new(|| {
    let mut map = HashMap::new();
    for c in LEFT_HAND {
        map.insert(c, Zone::Left);
    }
    for c in RIGHT_HAND {
        map.insert(c, Zone::Right);
    }
    map
});

fn fold(key: char) -> char {
    key.to_ascii_lowercase()
}

/// Classify a key, rows first, then hands. Unknown keys have no zone.
pub fn zone_of(key: char) -> Option<Zone> {
    let key = fold(key);
    if HOME_SET.contains(&key) {
        Some(Zone::Home)
    } else if TOP_SET.contains(&key) {
        Some(Zone::Top)
    } else if BOTTOM_SET.contains(&key) {
        Some(Zone::Bottom)
    } else {
        HAND_ZONES.get(&key).copied()
    }
}

/// Whether `key` belongs to `zone`.
///
/// Rows check row membership; hands check the hand table directly, so `a`
/// is in both `Home` and `Left` even though `zone_of('a')` is `Home`.
pub fn is_key_in_zone(key: char, zone: Zone) -> bool {
    let key = fold(key);
    match zone {
        Zone::Home => HOME_SET.contains(&key),
        Zone::Top => TOP_SET.contains(&key),
        Zone::Bottom => BOTTOM_SET.contains(&key),
        Zone::Left | Zone::Right => HAND_ZONES.get(&key) == Some(&zone),
    }
}

/// Tracks which zone is currently lit
#[derive(Debug, Clone, Default)]
pub struct ZoneClassifier {
    active_zone: Option<Zone>,
}

impl ZoneClassifier {
    pub fn new() -> Self {
        Self { active_zone: None }
    }

    /// Light the zone `key` belongs to. Keys outside every table clear it.
    pub fn highlight_zone(&mut self, key: char) -> Option<Zone> {
        self.active_zone = zone_of(key);
        log::debug!("zone for {:?}: {:?}", key, self.active_zone);
        self.active_zone
    }

    pub fn clear_zone(&mut self) {
        self.active_zone = None;
    }

    pub fn active_zone(&self) -> Option<Zone> {
        self.active_zone
    }

    /// Whether `key` sits inside the active zone. False when nothing is lit.
    pub fn is_key_active(&self, key: char) -> bool {
        self.active_zone
            .is_some_and(|zone| is_key_in_zone(key, zone))
    }

    pub fn is_key_in_zone(&self, key: char, zone: Option<Zone>) -> bool {
        zone.is_some_and(|zone| is_key_in_zone(key, zone))
    }
}
