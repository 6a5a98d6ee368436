//! Lumped elements of the corrected load and their admittances.

/// Lumped component definitions and traits.
pub mod component;
/// Series resistive-inductive load.
pub mod load;
/// Load plus shunt correction capacitor.
pub mod network;

pub use component::{Capacitor, Component, Inductor, Resistor};
pub use load::{load_admittance, RlLoad};
pub use network::{AdmittanceBreakdown, CorrectedLoad};
