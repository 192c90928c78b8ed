//! City layer - buildings, the building store, and the resource ledger

pub mod building;
pub mod ledger;
pub mod store;

pub use building::{Building, BuildingCatalog, BuildingType};
pub use ledger::{Ledger, LedgerDelta};
pub use store::BuildingStore;
