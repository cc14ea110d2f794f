use crate::traits::{EffectSink, Narrator, NullEffects, SilentNarrator};
use model::{Activity, CanvasElement, ElementId, ElementKind, Language};
use std::collections::HashSet;

/// What came of a drop gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropOutcome {
    /// Nothing happened: no active drag, an unknown or already-satisfied
    /// zone, or the target was not a drop zone.
    Ignored,
    /// The item snapped into the zone and the score went up.
    Placed,
    /// This placement satisfied the last remaining zone.
    Completed,
}

/// One run of an activity by a learner.
///
/// The session plays against its own copy of the element list; the
/// authored activity is never mutated. Zones satisfy one way only: a
/// placed item stays placed until [`PlayerSession::reset`].
pub struct PlayerSession {
    title: String,
    language: Language,

    /// Pristine element list for reset.
    baseline: Vec<CanvasElement>,

    /// Working copy; placed items get repositioned in here.
    pub elements: Vec<CanvasElement>,

    drop_zone_ids: Vec<ElementId>,
    satisfied: HashSet<ElementId>,
    placed: HashSet<ElementId>,
    dragging: Option<ElementId>,
    score: u32,
    completion_fired: bool,

    effects: Box<dyn EffectSink>,
    narrator: Box<dyn Narrator>,
    on_complete: Option<Box<dyn FnMut()>>,
}

impl PlayerSession {
    pub fn new(activity: &Activity) -> Self {
        let drop_zone_ids = activity
            .elements
            .iter()
            .filter(|el| el.is_drop_zone)
            .map(|el| el.id)
            .collect();
        Self {
            title: activity.title.clone(),
            language: activity.language,
            baseline: activity.elements.clone(),
            elements: activity.elements.clone(),
            drop_zone_ids,
            satisfied: HashSet::new(),
            placed: HashSet::new(),
            dragging: None,
            score: 0,
            completion_fired: false,
            effects: Box::new(NullEffects),
            narrator: Box::new(SilentNarrator),
            on_complete: None,
        }
    }

    pub fn with_effects(mut self, effects: Box<dyn EffectSink>) -> Self {
        self.effects = effects;
        self
    }

    pub fn with_narrator(mut self, narrator: Box<dyn Narrator>) -> Self {
        self.narrator = narrator;
        self
    }

    /// Run a callback when the activity completes (in addition to the
    /// effect sink).
    pub fn on_complete(mut self, callback: Box<dyn FnMut()>) -> Self {
        self.on_complete = Some(callback);
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_complete(&self) -> bool {
        self.completion_fired
    }

    pub fn dragging(&self) -> Option<ElementId> {
        self.dragging
    }

    /// Ids of draggable items: image elements that are not drop zones.
    /// Text and shape elements are decoration during playback.
    pub fn item_ids(&self) -> Vec<ElementId> {
        self.elements
            .iter()
            .filter(|el| Self::is_draggable(el))
            .map(|el| el.id)
            .collect()
    }

    fn is_draggable(element: &CanvasElement) -> bool {
        element.kind == ElementKind::Image && !element.is_drop_zone
    }

    /// Ids of drop zones, in authored order.
    pub fn zone_ids(&self) -> &[ElementId] {
        &self.drop_zone_ids
    }

    pub fn is_zone_satisfied(&self, zone: ElementId) -> bool {
        self.satisfied.contains(&zone)
    }

    pub fn is_item_placed(&self, item: ElementId) -> bool {
        self.placed.contains(&item)
    }

    /// (satisfied, total) progress. With no zones authored, falls back to
    /// placed items over total items so the surface can still show
    /// something meaningful.
    pub fn progress(&self) -> (usize, usize) {
        if self.drop_zone_ids.is_empty() {
            (self.placed.len(), self.item_ids().len())
        } else {
            (self.satisfied.len(), self.drop_zone_ids.len())
        }
    }

    /// Pick up an item. Only unplaced draggable items can be picked up;
    /// an unknown id is a no-op.
    pub fn begin_drag_item(&mut self, item: ElementId) {
        let Some(element) = self.elements.iter().find(|el| el.id == item) else {
            return;
        };
        if !Self::is_draggable(element) || self.placed.contains(&item) {
            return;
        }
        self.dragging = Some(item);
    }

    /// Put the dragged item down outside any zone.
    pub fn cancel_drag(&mut self) {
        self.dragging = None;
    }

    /// Release a dragged item over a zone.
    ///
    /// Any item satisfies any zone. A satisfied zone never reverts, and
    /// dropping on it again changes nothing. Completion fires exactly once
    /// per run, when the final zone is satisfied.
    pub fn drop_on_zone(&mut self, zone: ElementId, item: ElementId) -> DropOutcome {
        if self.dragging != Some(item) {
            return DropOutcome::Ignored;
        }
        if !self.drop_zone_ids.contains(&zone) || self.satisfied.contains(&zone) {
            return DropOutcome::Ignored;
        }

        let Some(dragged) = self.elements.iter().position(|el| el.id == item) else {
            self.dragging = None;
            return DropOutcome::Ignored;
        };
        let new_position = {
            let Some(target) = self.elements.iter().find(|el| el.id == zone) else {
                return DropOutcome::Ignored;
            };
            target.centered_position_for(self.elements[dragged].size)
        };
        self.elements[dragged].position = new_position;

        self.dragging = None;
        self.satisfied.insert(zone);
        self.placed.insert(item);
        self.score += 1;
        self.effects.drop_succeeded();
        log::debug!("item {item} placed in zone {zone}, score {}", self.score);

        if self.satisfied.len() == self.drop_zone_ids.len() && !self.completion_fired {
            self.completion_fired = true;
            self.effects.activity_completed();
            if let Some(callback) = self.on_complete.as_mut() {
                callback();
            }
            log::info!("activity '{}' completed, score {}", self.title, self.score);
            return DropOutcome::Completed;
        }
        DropOutcome::Placed
    }

    /// Start the run over: elements back to the authored layout, zones
    /// unsatisfied, score zero, completion re-armed.
    pub fn reset(&mut self) {
        self.elements = self.baseline.clone();
        self.satisfied.clear();
        self.placed.clear();
        self.dragging = None;
        self.score = 0;
        self.completion_fired = false;
        log::debug!("session '{}' reset", self.title);
    }

    /// Narrate text in the activity's language.
    pub fn speak(&mut self, text: &str) {
        self.narrator.speak(text, self.language.narration_tag());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::{ActivityKind, CanvasPoint, CanvasSize, ElementKind};
    use std::cell::Cell;
    use std::rc::Rc;

    fn item(x: f32, y: f32) -> CanvasElement {
        CanvasElement::new(
            ElementKind::Image,
            CanvasPoint::new(x, y),
            CanvasSize::new(80.0, 80.0),
            "🍎",
        )
    }

    fn zone(x: f32, y: f32) -> CanvasElement {
        CanvasElement::new(
            ElementKind::Shape,
            CanvasPoint::new(x, y),
            CanvasSize::new(120.0, 120.0),
            "rectangle",
        )
        .as_drop_zone()
    }

    fn matching_activity(zones: usize, items: usize) -> Activity {
        let mut elements = Vec::new();
        for i in 0..zones {
            elements.push(zone(400.0, 50.0 + 140.0 * i as f32));
        }
        for i in 0..items {
            elements.push(item(50.0, 50.0 + 100.0 * i as f32));
        }
        Activity::new(
            "Match",
            ActivityKind::Matching,
            Language::Hindi,
            "tutor-1",
            elements,
        )
    }

    struct CountingEffects {
        drops: Rc<Cell<u32>>,
        completions: Rc<Cell<u32>>,
    }

    impl EffectSink for CountingEffects {
        fn drop_succeeded(&mut self) {
            self.drops.set(self.drops.get() + 1);
        }

        fn activity_completed(&mut self) {
            self.completions.set(self.completions.get() + 1);
        }
    }

    #[test]
    fn drop_centers_item_in_zone_and_scores() {
        let activity = matching_activity(1, 1);
        let mut session = PlayerSession::new(&activity);
        let zone_id = session.zone_ids()[0];
        let item_id = session.item_ids()[0];

        session.begin_drag_item(item_id);
        assert_eq!(session.drop_on_zone(zone_id, item_id), DropOutcome::Completed);
        assert_eq!(session.score(), 1);

        let placed = session.elements.iter().find(|el| el.id == item_id).unwrap();
        // 80x80 item centered in a 120x120 zone at (400, 50).
        assert_eq!(placed.position, CanvasPoint::new(420.0, 70.0));
    }

    #[test]
    fn satisfied_zone_ignores_further_drops() {
        let activity = matching_activity(1, 2);
        let mut session = PlayerSession::new(&activity);
        let zone_id = session.zone_ids()[0];
        let items = session.item_ids();

        session.begin_drag_item(items[0]);
        session.drop_on_zone(zone_id, items[0]);

        session.begin_drag_item(items[1]);
        assert_eq!(session.drop_on_zone(zone_id, items[1]), DropOutcome::Ignored);
        assert_eq!(session.score(), 1);
    }

    #[test]
    fn placed_items_cannot_be_picked_up_again() {
        let activity = matching_activity(2, 1);
        let mut session = PlayerSession::new(&activity);
        let item_id = session.item_ids()[0];

        session.begin_drag_item(item_id);
        session.drop_on_zone(session.zone_ids()[0], item_id);

        session.begin_drag_item(item_id);
        assert_eq!(session.dragging(), None);
    }

    #[test]
    fn drop_without_drag_is_ignored() {
        let activity = matching_activity(1, 1);
        let mut session = PlayerSession::new(&activity);
        let item_id = session.item_ids()[0];
        assert_eq!(
            session.drop_on_zone(session.zone_ids()[0], item_id),
            DropOutcome::Ignored
        );
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn any_item_satisfies_any_zone_in_any_order() {
        let activity = matching_activity(3, 3);
        let mut session = PlayerSession::new(&activity);
        let zones: Vec<_> = session.zone_ids().to_vec();
        let items = session.item_ids();

        session.begin_drag_item(items[2]);
        assert_eq!(session.drop_on_zone(zones[0], items[2]), DropOutcome::Placed);
        session.begin_drag_item(items[0]);
        assert_eq!(session.drop_on_zone(zones[2], items[0]), DropOutcome::Placed);
        session.begin_drag_item(items[1]);
        assert_eq!(session.drop_on_zone(zones[1], items[1]), DropOutcome::Completed);

        assert_eq!(session.progress(), (3, 3));
        assert!(session.is_complete());
    }

    #[test]
    fn completion_fires_exactly_once_per_run() {
        let drops = Rc::new(Cell::new(0));
        let completions = Rc::new(Cell::new(0));
        let activity = matching_activity(1, 2);
        let mut session = PlayerSession::new(&activity).with_effects(Box::new(CountingEffects {
            drops: drops.clone(),
            completions: completions.clone(),
        }));

        let zone_id = session.zone_ids()[0];
        let items = session.item_ids();
        session.begin_drag_item(items[0]);
        session.drop_on_zone(zone_id, items[0]);
        session.begin_drag_item(items[1]);
        session.drop_on_zone(zone_id, items[1]);

        assert_eq!(drops.get(), 1);
        assert_eq!(completions.get(), 1);
    }

    #[test]
    fn reset_restores_baseline_and_rearms_completion() {
        let completions = Rc::new(Cell::new(0));
        let activity = matching_activity(1, 1);
        let mut session = PlayerSession::new(&activity).with_effects(Box::new(CountingEffects {
            drops: Rc::new(Cell::new(0)),
            completions: completions.clone(),
        }));
        let zone_id = session.zone_ids()[0];
        let item_id = session.item_ids()[0];

        session.begin_drag_item(item_id);
        session.drop_on_zone(zone_id, item_id);
        assert!(session.is_complete());

        session.reset();
        assert_eq!(session.elements, activity.elements);
        assert_eq!(session.score(), 0);
        assert!(!session.is_complete());
        assert_eq!(session.progress(), (0, 1));

        // A second run completes again.
        session.begin_drag_item(item_id);
        assert_eq!(session.drop_on_zone(zone_id, item_id), DropOutcome::Completed);
        assert_eq!(completions.get(), 2);
    }

    #[test]
    fn zero_zone_activity_never_completes() {
        let activity = matching_activity(0, 2);
        let mut session = PlayerSession::new(&activity);
        assert!(!session.is_complete());
        assert_eq!(session.progress(), (0, 2));

        let items = session.item_ids();
        session.begin_drag_item(items[0]);
        assert_eq!(session.drop_on_zone(items[1], items[0]), DropOutcome::Ignored);
        assert!(!session.is_complete());
    }

    #[test]
    fn drop_zones_cannot_be_dragged() {
        let activity = matching_activity(2, 1);
        let mut session = PlayerSession::new(&activity);
        session.begin_drag_item(session.zone_ids()[0]);
        assert_eq!(session.dragging(), None);
    }

    #[test]
    fn completion_callback_runs() {
        let fired = Rc::new(Cell::new(false));
        let flag = fired.clone();
        let activity = matching_activity(1, 1);
        let mut session =
            PlayerSession::new(&activity).on_complete(Box::new(move || flag.set(true)));

        let item_id = session.item_ids()[0];
        session.begin_drag_item(item_id);
        session.drop_on_zone(session.zone_ids()[0], item_id);
        assert!(fired.get());
    }

    #[test]
    fn speak_uses_the_activity_language_tag() {
        struct RecordingNarrator(Rc<std::cell::RefCell<Vec<(String, String)>>>);
        impl Narrator for RecordingNarrator {
            fn speak(&mut self, text: &str, lang_tag: &str) {
                self.0.borrow_mut().push((text.into(), lang_tag.into()));
            }
        }

        let spoken = Rc::new(std::cell::RefCell::new(Vec::new()));
        let activity = matching_activity(1, 1);
        let mut session = PlayerSession::new(&activity)
            .with_narrator(Box::new(RecordingNarrator(spoken.clone())));

        session.speak("आम");
        assert_eq!(
            spoken.borrow().as_slice(),
            &[("आम".to_string(), "hi-IN".to_string())]
        );
    }

    #[test]
    fn session_does_not_mutate_the_authored_activity() {
        let activity = matching_activity(1, 1);
        let before = activity.clone();
        let mut session = PlayerSession::new(&activity);

        let item_id = session.item_ids()[0];
        session.begin_drag_item(item_id);
        session.drop_on_zone(session.zone_ids()[0], item_id);

        assert_eq!(activity, before);
    }
}
