use crate::local_store::{LocalStore, PurchaseRecord};
use anyhow::{bail, Result};
use model::{Activity, ActivityId};

/// Activity storage seam.
///
/// The local store implements it against the three JSON records; a remote
/// implementation would speak to a service instead. No retries here,
/// callers decide what a failure means.
pub trait Backend {
    fn list_activities(&self) -> Result<Vec<Activity>>;

    fn fetch_activity(&self, id: ActivityId) -> Result<Option<Activity>>;

    /// Insert or replace by id.
    fn save_activity(&self, activity: Activity) -> Result<()>;

    /// Mark an activity published so it shows up for families.
    fn publish_activity(&self, id: ActivityId) -> Result<()>;

    fn record_purchase(&self, purchase: PurchaseRecord) -> Result<()>;
}

impl Backend for LocalStore {
    fn list_activities(&self) -> Result<Vec<Activity>> {
        self.load_activities()
    }

    fn fetch_activity(&self, id: ActivityId) -> Result<Option<Activity>> {
        Ok(self.load_activities()?.into_iter().find(|a| a.id == id))
    }

    fn save_activity(&self, activity: Activity) -> Result<()> {
        let mut activities = self.load_activities()?;
        match activities.iter_mut().find(|a| a.id == activity.id) {
            Some(existing) => *existing = activity,
            None => activities.push(activity),
        }
        self.save_activities(&activities)
    }

    fn publish_activity(&self, id: ActivityId) -> Result<()> {
        let mut activities = self.load_activities()?;
        let Some(activity) = activities.iter_mut().find(|a| a.id == id) else {
            bail!("no activity with id {id}");
        };
        activity.is_published = true;
        activity.touch();
        self.save_activities(&activities)
    }

    fn record_purchase(&self, purchase: PurchaseRecord) -> Result<()> {
        let mut purchases = self.load_purchases()?;
        purchases.push(purchase);
        self.save_purchases(&purchases)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::{ActivityKind, Language};

    fn temp_store() -> LocalStore {
        let root = std::env::temp_dir().join(format!("chitra-backend-{}", uuid::Uuid::new_v4()));
        LocalStore::open(root).unwrap()
    }

    #[test]
    fn save_upserts_by_id() {
        let store = temp_store();
        let mut activity =
            Activity::new("Fruits", ActivityKind::Matching, Language::Hindi, "t", vec![]);
        store.save_activity(activity.clone()).unwrap();

        activity.title = "Fruits v2".into();
        store.save_activity(activity.clone()).unwrap();

        let listed = store.list_activities().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].title, "Fruits v2");
        std::fs::remove_dir_all(store.root()).ok();
    }

    #[test]
    fn publish_flips_the_flag() {
        let store = temp_store();
        let activity =
            Activity::new("Routine", ActivityKind::VisualSchedule, Language::English, "t", vec![]);
        let id = activity.id;
        store.save_activity(activity).unwrap();

        store.publish_activity(id).unwrap();
        assert!(store.fetch_activity(id).unwrap().unwrap().is_published);

        assert!(store.publish_activity(ActivityId::new()).is_err());
        std::fs::remove_dir_all(store.root()).ok();
    }
}
