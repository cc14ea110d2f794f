//! Collaborator seams for playback side effects.
//!
//! The session drives game logic; anything sensory (sound, confetti,
//! speech) goes through these traits so a headless host can run the same
//! session with the defaults below.

/// Receives celebratory effects as the session progresses.
pub trait EffectSink {
    /// A draggable landed in a zone.
    fn drop_succeeded(&mut self);

    /// Every zone is satisfied. Fired at most once per run.
    fn activity_completed(&mut self);
}

/// Discards all effects.
#[derive(Default)]
pub struct NullEffects;

impl EffectSink for NullEffects {
    fn drop_succeeded(&mut self) {}

    fn activity_completed(&mut self) {}
}

/// Speaks text aloud in the activity's language.
pub trait Narrator {
    /// `lang_tag` is a BCP 47 tag such as `hi-IN`.
    fn speak(&mut self, text: &str, lang_tag: &str);
}

/// Swallows narration requests.
#[derive(Default)]
pub struct SilentNarrator;

impl Narrator for SilentNarrator {
    fn speak(&mut self, _text: &str, _lang_tag: &str) {}
}
