//! Torch ledger
//!
//! The host owns the torches themselves; the session keeps a mirror of each
//! torch's lit flag, fed by lit/unlit events, so it can count and re-verify.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Torch identifier assigned by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TorchId(pub u32);

/// Mirrored torch state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Torch {
    pub id: TorchId,
    pub position: Vec2,
    /// Lit state restored on reset
    pub start_lit: bool,
    pub lit: bool,
}

/// Outcome of a lit/unlit update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LitChange {
    Changed,
    /// Torch was already in the requested state
    Unchanged,
    /// No torch with that id has been registered
    Unknown,
}

/// All registered torches (sorted by id for determinism)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TorchLedger {
    torches: Vec<Torch>,
}

impl TorchLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a torch, replacing any previous entry with the same id
    pub fn register(&mut self, torch: Torch) {
        match self.torches.binary_search_by_key(&torch.id, |t| t.id) {
            Ok(i) => self.torches[i] = torch,
            Err(i) => self.torches.insert(i, torch),
        }
    }

    pub fn get(&self, id: TorchId) -> Option<&Torch> {
        self.torches
            .binary_search_by_key(&id, |t| t.id)
            .ok()
            .map(|i| &self.torches[i])
    }

    pub fn set_lit(&mut self, id: TorchId, lit: bool) -> LitChange {
        match self.torches.binary_search_by_key(&id, |t| t.id) {
            Ok(i) if self.torches[i].lit == lit => LitChange::Unchanged,
            Ok(i) => {
                self.torches[i].lit = lit;
                LitChange::Changed
            }
            Err(_) => LitChange::Unknown,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Torch> {
        self.torches.iter()
    }

    pub fn total(&self) -> u32 {
        self.torches.len() as u32
    }

    pub fn lit_count(&self) -> u32 {
        self.torches.iter().filter(|t| t.lit).count() as u32
    }

    /// True when at least one torch exists and every torch is lit
    pub fn all_lit(&self) -> bool {
        !self.torches.is_empty() && self.torches.iter().all(|t| t.lit)
    }

    /// Put every torch back into its starting state
    pub fn reset_to_start(&mut self) {
        for torch in &mut self.torches {
            torch.lit = torch.start_lit;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn torch(id: u32, start_lit: bool) -> Torch {
        Torch {
            id: TorchId(id),
            position: Vec2::new(id as f32, 0.0),
            start_lit,
            lit: start_lit,
        }
    }

    #[test]
    fn test_register_keeps_id_order_and_replaces() {
        let mut ledger = TorchLedger::new();
        ledger.register(torch(3, false));
        ledger.register(torch(1, false));
        ledger.register(torch(2, true));
        ledger.register(torch(1, true));

        let ids: Vec<u32> = ledger.iter().map(|t| t.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(ledger.total(), 3);
        assert_eq!(ledger.lit_count(), 2);
    }

    #[test]
    fn test_set_lit_reports_changes() {
        let mut ledger = TorchLedger::new();
        ledger.register(torch(1, false));

        assert_eq!(ledger.set_lit(TorchId(1), true), LitChange::Changed);
        assert_eq!(ledger.set_lit(TorchId(1), true), LitChange::Unchanged);
        assert_eq!(ledger.set_lit(TorchId(9), true), LitChange::Unknown);
        assert!(ledger.all_lit());
    }

    #[test]
    fn test_empty_ledger_is_never_all_lit() {
        assert!(!TorchLedger::new().all_lit());
    }

    #[test]
    fn test_reset_to_start() {
        let mut ledger = TorchLedger::new();
        ledger.register(torch(1, false));
        ledger.register(torch(2, true));
        ledger.set_lit(TorchId(1), true);
        ledger.set_lit(TorchId(2), false);

        ledger.reset_to_start();
        assert!(!ledger.get(TorchId(1)).map(|t| t.lit).unwrap_or(true));
        assert!(ledger.get(TorchId(2)).map(|t| t.lit).unwrap_or(false));
    }
}
