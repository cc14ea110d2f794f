//! Local persistence: three JSON records under one root directory, plus
//! the application state that loads from and saves through them.

mod app_state;
mod backend;
mod local_store;

pub use app_state::AppState;
pub use backend::Backend;
pub use local_store::{LocalStore, PurchaseRecord, SessionRecord};
