//! Activity playback: the drag-drop matching loop, scoring, and completion.

mod session;
mod traits;

pub use session::{DropOutcome, PlayerSession};
pub use traits::{EffectSink, Narrator, NullEffects, SilentNarrator};
