//! Content model: chemicals, vessels and the action log

pub mod chemical;
pub mod log;
pub mod vessel;

pub use chemical::{Amount, Chemical, ChemicalCatalog, ChemicalContent, Phase};
pub use log::{ActionLog, ActionLogEntry, LabAction, LogSnapshot};
pub use vessel::Vessel;
