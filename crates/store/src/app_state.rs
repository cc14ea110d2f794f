use crate::backend::Backend;
use crate::local_store::{LocalStore, PurchaseRecord, SessionRecord};
use anyhow::Result;
use model::{Activity, ActivityId};

/// Everything a surface needs, loaded once and passed by reference.
///
/// Mutations go through methods that persist immediately, so the records
/// on disk always reflect the state handed out.
pub struct AppState {
    store: LocalStore,
    session: Option<SessionRecord>,
    activities: Vec<Activity>,
    purchases: Vec<PurchaseRecord>,
    current_activity: Option<ActivityId>,
}

impl AppState {
    pub fn load(store: LocalStore) -> Result<Self> {
        let session = store.load_session()?;
        let activities = store.load_activities()?;
        let purchases = store.load_purchases()?;
        log::info!(
            "loaded {} activities, {} purchases",
            activities.len(),
            purchases.len()
        );
        Ok(Self {
            store,
            session,
            activities,
            purchases,
            current_activity: None,
        })
    }

    pub fn session(&self) -> Option<&SessionRecord> {
        self.session.as_ref()
    }

    pub fn set_session(&mut self, session: SessionRecord) -> Result<()> {
        self.store.save_session(&session)?;
        self.session = Some(session);
        Ok(())
    }

    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    pub fn activity(&self, id: ActivityId) -> Option<&Activity> {
        self.activities.iter().find(|a| a.id == id)
    }

    /// Insert or replace by id, persisting the whole list.
    pub fn save_activity(&mut self, activity: Activity) -> Result<()> {
        self.store.save_activity(activity.clone())?;
        match self.activities.iter_mut().find(|a| a.id == activity.id) {
            Some(existing) => *existing = activity,
            None => self.activities.push(activity),
        }
        Ok(())
    }

    pub fn delete_activity(&mut self, id: ActivityId) -> Result<()> {
        self.activities.retain(|a| a.id != id);
        if self.current_activity == Some(id) {
            self.current_activity = None;
        }
        self.store.save_activities(&self.activities)
    }

    pub fn current_activity(&self) -> Option<&Activity> {
        self.current_activity.and_then(|id| self.activity(id))
    }

    /// Selecting an unknown id clears the current activity.
    pub fn set_current_activity(&mut self, id: Option<ActivityId>) {
        self.current_activity = id.filter(|id| self.activity(*id).is_some());
    }

    pub fn purchases(&self) -> &[PurchaseRecord] {
        &self.purchases
    }

    pub fn record_purchase(&mut self, purchase: PurchaseRecord) -> Result<()> {
        self.store.record_purchase(purchase.clone())?;
        self.purchases.push(purchase);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::{ActivityKind, Language, UserRole};

    fn temp_state() -> AppState {
        let root = std::env::temp_dir().join(format!("chitra-state-{}", uuid::Uuid::new_v4()));
        AppState::load(LocalStore::open(root).unwrap()).unwrap()
    }

    #[test]
    fn mutations_persist_across_reload() {
        let mut state = temp_state();
        let root = state.store.root().to_path_buf();

        state
            .set_session(SessionRecord {
                user_id: "tutor-1".into(),
                name: "Meera".into(),
                role: UserRole::Tutor,
                language: Language::Hindi,
            })
            .unwrap();
        let activity =
            Activity::new("Fruits", ActivityKind::Matching, Language::Hindi, "tutor-1", vec![]);
        let id = activity.id;
        state.save_activity(activity).unwrap();

        let reloaded = AppState::load(LocalStore::open(&root).unwrap()).unwrap();
        assert_eq!(reloaded.session().unwrap().name, "Meera");
        assert_eq!(reloaded.activities().len(), 1);
        assert!(reloaded.activity(id).is_some());
        std::fs::remove_dir_all(root).ok();
    }

    #[test]
    fn current_activity_follows_the_list() {
        let mut state = temp_state();
        let root = state.store.root().to_path_buf();
        let activity =
            Activity::new("One", ActivityKind::Phonics, Language::English, "t", vec![]);
        let id = activity.id;
        state.save_activity(activity).unwrap();

        state.set_current_activity(Some(id));
        assert_eq!(state.current_activity().unwrap().id, id);

        state.delete_activity(id).unwrap();
        assert!(state.current_activity().is_none());

        state.set_current_activity(Some(ActivityId::new()));
        assert!(state.current_activity().is_none());
        std::fs::remove_dir_all(root).ok();
    }
}
