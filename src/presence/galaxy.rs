//! Sector warp graph
//!
//! The galaxy itself is owned elsewhere; presence queries only need to read
//! sectors through [`SectorGraph`]. [`Galaxy`] is a plain in-memory graph
//! for callers (and tests) that do not have their own.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::types::SectorId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StationClass {
    Mining,
    Agricultural,
    Industrial,
    Commercial,
    #[serde(rename = "Black Market")]
    BlackMarket,
    Military,
    Diplomatic,
    Shipyard,
}

/// Something a sector contains
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SectorContent {
    Planet { name: String },
    Station { name: String, class: StationClass },
    Debris { name: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sector {
    pub id: SectorId,
    pub warps: Vec<SectorId>,
    pub contents: Vec<SectorContent>,
}

impl Sector {
    pub fn new(id: SectorId) -> Self {
        Self {
            id,
            warps: Vec::new(),
            contents: Vec::new(),
        }
    }

    pub fn has_station(&self, class: StationClass) -> bool {
        self.contents
            .iter()
            .any(|c| matches!(c, SectorContent::Station { class: sc, .. } if *sc == class))
    }
}

/// Read access to sectors by id
pub trait SectorGraph {
    fn sector(&self, id: SectorId) -> Option<&Sector>;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Galaxy {
    sectors: AHashMap<SectorId, Sector>,
}

impl Galaxy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a sector, replacing any previous one with the same id
    pub fn add_sector(&mut self, sector: Sector) {
        self.sectors.insert(sector.id, sector);
    }

    /// Add a two-way warp, creating missing sectors
    pub fn connect(&mut self, a: SectorId, b: SectorId) {
        if a == b {
            return;
        }
        for (from, to) in [(a, b), (b, a)] {
            let sector = self.sectors.entry(from).or_insert_with(|| Sector::new(from));
            if !sector.warps.contains(&to) {
                sector.warps.push(to);
            }
        }
    }

    pub fn add_content(&mut self, id: SectorId, content: SectorContent) {
        self.sectors
            .entry(id)
            .or_insert_with(|| Sector::new(id))
            .contents
            .push(content);
    }

    pub fn len(&self) -> usize {
        self.sectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sectors.is_empty()
    }
}

impl SectorGraph for Galaxy {
    fn sector(&self, id: SectorId) -> Option<&Sector> {
        self.sectors.get(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_is_bidirectional_and_deduplicated() {
        let mut galaxy = Galaxy::new();
        galaxy.connect(SectorId(1), SectorId(2));
        galaxy.connect(SectorId(2), SectorId(1));
        galaxy.connect(SectorId(1), SectorId(1));

        assert_eq!(galaxy.sector(SectorId(1)).unwrap().warps, vec![SectorId(2)]);
        assert_eq!(galaxy.sector(SectorId(2)).unwrap().warps, vec![SectorId(1)]);
        assert_eq!(galaxy.len(), 2);
    }

    #[test]
    fn test_military_station_lookup() {
        let mut galaxy = Galaxy::new();
        galaxy.add_content(
            SectorId(9),
            SectorContent::Station {
                name: "Fort Kessel".into(),
                class: StationClass::Military,
            },
        );
        galaxy.add_content(SectorId(10), SectorContent::Planet { name: "Dune".into() });

        assert!(galaxy.sector(SectorId(9)).unwrap().has_station(StationClass::Military));
        assert!(!galaxy.sector(SectorId(10)).unwrap().has_station(StationClass::Military));
    }

    #[test]
    fn test_content_json_shape() {
        let json = r#"{"type": "station", "name": "Bazaar", "class": "Black Market"}"#;
        let content: SectorContent = serde_json::from_str(json).unwrap();
        assert_eq!(
            content,
            SectorContent::Station {
                name: "Bazaar".into(),
                class: StationClass::BlackMarket
            }
        );
    }
}
