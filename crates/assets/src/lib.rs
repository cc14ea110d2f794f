//! Built-in asset catalog and activity templates.
//!
//! Assets are emoji-token pictographs curated for Indian therapy contexts;
//! the editor consumes them only through drag sessions, so this crate is
//! pure data plus lookup helpers.

mod catalog;
mod templates;

pub use catalog::{by_category, catalog, find, search, Asset, AssetCategory};
pub use templates::{starter_templates, template_by_id, Template};
