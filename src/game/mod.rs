//! Game engine: selection state machine, dealing and bonus projections.
//!
//! ## Key Types
//!
//! - `SetGame`: owns one game and handles `choose`, `deal_more`, `shuffle`, `reset`
//! - `ChooseOutcome`: what a `choose` intent did
//! - `Selection`: up to three chosen card ids
//! - `GameView`: serializable snapshot for a presentation layer

pub mod engine;
pub mod selection;
pub mod view;

pub use engine::{ChooseOutcome, IgnoreReason, SetGame};
pub use selection::Selection;
pub use view::{CardView, GameView};
