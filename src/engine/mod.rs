//! Per-event weight computation.
//!
//! [`WeightEngine`] runs each event through a fixed sequence:
//!
//! 1. **Reset** every rule weight to 1.0 and drop recorded diagnostics.
//! 2. If the event carries no generator history, skip to step 5.
//! 3. **Accumulate**: for every rule, select particles with the
//!    [`SelectionPolicy`], measure their cTau, and multiply the rule weight
//!    by the destination/source density ratio.
//! 4. **Pad** each species slot's diagnostics to [`DIAGNOSTIC_CAPACITY`]
//!    entries with [`INVALID_VALUE`].
//! 5. **Emit** every weight, plus the default rule's weight under
//!    `lifetimeWeight`.
//!
//! All mutable state lives in an [`EventAccumulator`] owned by the caller, so
//! one engine can serve many threads at once.

mod accumulator;
mod selection;
mod variables;
mod weight_engine;

pub use accumulator::{EventAccumulator, DIAGNOSTIC_CAPACITY, INVALID_VALUE};
pub use selection::{is_original_particle, SelectionPolicy};
pub use variables::{EventVariableProducer, EventVariables};
pub use weight_engine::WeightEngine;
