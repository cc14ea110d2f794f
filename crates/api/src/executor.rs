//! Command and query execution against an `EditorCanvas`.

use crate::{Command, CommandResult, ElementInfo, NewElementKind, Query, QueryResult, Target};
use canvas::{AssetDrop, EditorCanvas, ShapeToken};
use model::{CanvasPoint, ElementId, ElementKind, ScreenPoint};

/// Execute a command against a canvas.
pub fn execute_command(canvas: &mut EditorCanvas, command: Command) -> CommandResult {
    match command {
        Command::AddElement { kind } => {
            let id = match kind {
                NewElementKind::Text => canvas.add_text(),
                NewElementKind::Rectangle => canvas.add_shape(ShapeToken::Rectangle),
                NewElementKind::Circle => canvas.add_shape(ShapeToken::Circle),
                NewElementKind::DropZone => canvas.add_drop_zone(),
            };
            CommandResult::created(vec![id])
        }

        Command::AddAsset { asset_id, position } => {
            let Some(asset) = assets::find(&asset_id) else {
                return CommandResult::error(format!("unknown asset '{asset_id}'"));
            };
            let drop = AssetDrop::new(asset.id, asset.visual_token, asset.name);
            let id = canvas.accept_asset_drop(&drop, ScreenPoint(position));
            CommandResult::created(vec![id])
        }

        Command::Select { target } => {
            let ids = resolve_target(canvas, &target);
            canvas.select(ids.first().copied());
            CommandResult::success()
        }

        Command::ClearSelection => {
            canvas.select(None);
            CommandResult::success()
        }

        Command::Delete { target } => {
            let ids = resolve_target(canvas, &target);
            for id in &ids {
                canvas.delete(*id);
            }
            CommandResult::deleted(ids)
        }

        Command::Duplicate { target } => {
            let ids = resolve_target(canvas, &target);
            let created: Vec<_> = ids.iter().filter_map(|id| canvas.duplicate(*id)).collect();
            CommandResult::created(created)
        }

        Command::SetPosition { target, position } => {
            let ids = resolve_target(canvas, &target);
            for id in &ids {
                canvas.set_position(*id, CanvasPoint(position));
            }
            CommandResult::modified(ids)
        }

        Command::SetSize { target, size } => {
            let ids = resolve_target(canvas, &target);
            for id in &ids {
                if let Err(err) = canvas.resize(*id, size.x, size.y) {
                    return CommandResult::error(err.to_string());
                }
            }
            CommandResult::modified(ids)
        }

        Command::SetText { target, text } => {
            let ids = resolve_target(canvas, &target);
            for id in &ids {
                match canvas.get_element(*id) {
                    Some(el) if el.kind == ElementKind::Text => {}
                    Some(_) => {
                        return CommandResult::error("set_text targets must be text elements")
                    }
                    None => continue,
                }
                canvas.edit_text(*id, text.clone());
            }
            CommandResult::modified(ids)
        }

        Command::SetZoom { factor } => {
            canvas.set_zoom(factor);
            CommandResult::success()
        }

        Command::ResetZoom => {
            canvas.reset_zoom();
            CommandResult::success()
        }

        Command::Batch { commands } => {
            let mut all_created = Vec::new();
            let mut all_modified = Vec::new();
            let mut all_deleted = Vec::new();
            for command in commands {
                match execute_command(canvas, command) {
                    CommandResult::Success {
                        created,
                        modified,
                        deleted,
                    } => {
                        all_created.extend(created);
                        all_modified.extend(modified);
                        all_deleted.extend(deleted);
                    }
                    error @ CommandResult::Error { .. } => return error,
                }
            }
            CommandResult::Success {
                created: all_created,
                modified: all_modified,
                deleted: all_deleted,
            }
        }
    }
}

/// Execute a read-only query against a canvas.
pub fn execute_query(canvas: &EditorCanvas, query: Query) -> QueryResult {
    match query {
        Query::Elements => QueryResult::Elements {
            elements: canvas.elements.iter().map(ElementInfo::from).collect(),
        },
        Query::Selection => QueryResult::Selection {
            id: canvas.selection(),
        },
        Query::Count => QueryResult::Count {
            count: canvas.elements.len(),
        },
        Query::DropZones => QueryResult::DropZones {
            ids: canvas
                .elements
                .iter()
                .filter(|el| el.is_drop_zone)
                .map(|el| el.id)
                .collect(),
        },
    }
}

fn resolve_target(canvas: &EditorCanvas, target: &Target) -> Vec<ElementId> {
    match target {
        Target::Selection => canvas.selection().into_iter().collect(),
        Target::Element(id) => vec![*id],
        Target::Elements(ids) => ids.clone(),
        Target::All => canvas.elements.iter().map(|el| el.id).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn created_id(result: &CommandResult) -> ElementId {
        match result {
            CommandResult::Success { created, .. } => created[0],
            CommandResult::Error { message } => panic!("command failed: {message}"),
        }
    }

    #[test]
    fn add_element_creates_and_selects() {
        let mut canvas = EditorCanvas::new();
        let result = execute_command(
            &mut canvas,
            Command::AddElement {
                kind: NewElementKind::Text,
            },
        );
        let id = created_id(&result);
        assert_eq!(canvas.selection(), Some(id));
        assert_eq!(canvas.get_element(id).unwrap().kind, ElementKind::Text);
    }

    #[test]
    fn add_asset_resolves_catalog_entry() {
        let mut canvas = EditorCanvas::new();
        let result = execute_command(
            &mut canvas,
            Command::AddAsset {
                asset_id: "food-8".into(),
                position: Vec2::new(300.0, 200.0),
            },
        );
        let id = created_id(&result);
        let el = canvas.get_element(id).unwrap();
        assert_eq!(el.kind, ElementKind::Image);
        assert_eq!(el.content, "🥭");
    }

    #[test]
    fn unknown_asset_is_an_error() {
        let mut canvas = EditorCanvas::new();
        let result = execute_command(
            &mut canvas,
            Command::AddAsset {
                asset_id: "nope-1".into(),
                position: Vec2::ZERO,
            },
        );
        assert!(result.is_error());
    }

    #[test]
    fn delete_defaulting_to_selection() {
        let mut canvas = EditorCanvas::new();
        canvas.add_text();
        let result = execute_command(
            &mut canvas,
            Command::Delete {
                target: Target::Selection,
            },
        );
        assert!(!result.is_error());
        assert!(canvas.elements.is_empty());
    }

    #[test]
    fn set_size_below_minimum_is_an_error() {
        let mut canvas = EditorCanvas::new();
        canvas.add_text();
        let result = execute_command(
            &mut canvas,
            Command::SetSize {
                target: Target::Selection,
                size: Vec2::new(0.0, 40.0),
            },
        );
        assert!(result.is_error());
    }

    #[test]
    fn set_text_on_shape_is_an_error() {
        let mut canvas = EditorCanvas::new();
        canvas.add_shape(ShapeToken::Circle);
        let result = execute_command(
            &mut canvas,
            Command::SetText {
                target: Target::Selection,
                text: "hello".into(),
            },
        );
        assert!(result.is_error());
    }

    #[test]
    fn batch_stops_at_first_error() {
        let mut canvas = EditorCanvas::new();
        let result = execute_command(
            &mut canvas,
            Command::Batch {
                commands: vec![
                    Command::AddElement {
                        kind: NewElementKind::Rectangle,
                    },
                    Command::AddAsset {
                        asset_id: "missing".into(),
                        position: Vec2::ZERO,
                    },
                    Command::AddElement {
                        kind: NewElementKind::Circle,
                    },
                ],
            },
        );
        assert!(result.is_error());
        // The rectangle landed before the failure; the circle never ran.
        assert_eq!(canvas.elements.len(), 1);
    }

    #[test]
    fn queries_report_state() {
        let mut canvas = EditorCanvas::new();
        execute_command(
            &mut canvas,
            Command::AddElement {
                kind: NewElementKind::DropZone,
            },
        );
        execute_command(
            &mut canvas,
            Command::AddElement {
                kind: NewElementKind::Text,
            },
        );

        match execute_query(&canvas, Query::Count) {
            QueryResult::Count { count } => assert_eq!(count, 2),
            other => panic!("unexpected result: {other:?}"),
        }
        match execute_query(&canvas, Query::DropZones) {
            QueryResult::DropZones { ids } => assert_eq!(ids.len(), 1),
            other => panic!("unexpected result: {other:?}"),
        }
        match execute_query(&canvas, Query::Selection) {
            QueryResult::Selection { id } => assert!(id.is_some()),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn command_json_drives_the_canvas() {
        let mut canvas = EditorCanvas::new();
        let cmd: Command = serde_json::from_str(
            r#"{"type": "batch", "commands": [
                {"type": "add_element", "kind": "rectangle"},
                {"type": "set_position", "position": [40, 60]},
                {"type": "set_size", "size": [64, 48]}
            ]}"#,
        )
        .unwrap();
        let result = execute_command(&mut canvas, cmd);
        assert!(!result.is_error());

        let el = &canvas.elements[0];
        assert_eq!(el.position, CanvasPoint::new(40.0, 60.0));
        assert_eq!(el.size.width(), 64.0);
    }
}
