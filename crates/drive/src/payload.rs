//! Drop gesture payloads
//!
//! Drag sources and drop areas carry a small JSON object, `{"id": "<id>"}` for
//! an item and `{"id": null}` for the top level drop area. Payloads are checked
//! here before anything reaches the move engine.

use derive_more::{Display, From};
use drive_tree::prelude::*;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Data attached to a draggable item or a drop area
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropArea {
    /// The item, `None` for the top level area
    pub id: Option<ItemId>,
}

impl DropArea {
    /// The top level drop area
    pub fn root() -> Self {
        Self { id: None }
    }

    /// The drop area of a single item
    pub fn item(id: impl Into<ItemId>) -> Self {
        Self {
            id: Some(id.into()),
        }
    }

    /// Check a raw payload
    ///
    /// The `id` key has to be present; it must be a string or `null`. Other
    /// keys are ignored.
    pub fn from_value(value: &Value) -> Result<Self, DropError> {
        let object = value
            .as_object()
            .ok_or_else(|| DropError::Validation(format!("expected an object, got {}", value)))?;
        if !object.contains_key("id") {
            return Err(DropError::Validation(format!(
                "missing \"id\" in payload {}",
                value
            )));
        }
        serde_json::from_value(value.clone())
            .map_err(|e| DropError::Validation(format!("bad payload {}: {}", value, e)))
    }

    /// The payload as JSON
    pub fn to_value(&self) -> Value {
        serde_json::json!({ "id": self.id.as_ref().map(ItemId::as_str) })
    }
}

/// A finished drag gesture
#[derive(Debug, Clone, PartialEq)]
pub struct DropEvent {
    /// Payload of the dragged item
    pub source: Value,
    /// Payloads of the drop areas under the pointer, innermost first
    pub targets: Vec<Value>,
}

impl DropEvent {
    /// A drop of `source` onto `target`
    pub fn new(source: DropArea, target: DropArea) -> Self {
        Self {
            source: source.to_value(),
            targets: vec![target.to_value()],
        }
    }

    /// A drop that landed outside every drop area
    pub fn nowhere(source: DropArea) -> Self {
        Self {
            source: source.to_value(),
            targets: Vec::new(),
        }
    }
}

/// What a drop did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// The drop missed every drop area; nothing changed
    NoTarget,
    /// Items were moved
    Moved {
        /// The engine's report
        outcome: MoveOutcome,
        /// Row of the dragged item in the new layout, for the highlight
        flash: Option<usize>,
    },
}

/// Why a drop was refused
#[derive(Debug, Clone, PartialEq, Eq, Display, From)]
pub enum DropError {
    /// A payload did not have the expected shape
    #[display(fmt = "invalid drop payload: {}", _0)]
    #[from(ignore)]
    Validation(String),
    /// The move engine rejected the move
    #[display(fmt = "move rejected: {}", _0)]
    Move(MoveError),
}

impl std::error::Error for DropError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DropError::Validation(_) => None,
            DropError::Move(err) => Some(err),
        }
    }
}

/// Apply a drop to the drive
///
/// Only the innermost drop area counts. When this returns, the drive's
/// layout already reflects the move, so `flash` points at the final row.
pub fn handle_drop(drive: &mut Drive, event: &DropEvent) -> Result<DropOutcome, DropError> {
    let Some(target) = event.targets.first() else {
        debug!("Drop landed outside every drop area");
        return Ok(DropOutcome::NoTarget);
    };

    let source = DropArea::from_value(&event.source)?;
    let target = DropArea::from_value(target)?;
    let source_id = source
        .id
        .ok_or_else(|| DropError::Validation("the dragged payload has no item id".to_string()))?;

    if target.id.is_none() {
        info!("Item {} dropped on the top level", source_id);
    }

    let outcome = drive.apply_move(target.id, source_id.clone())?;
    let flash = drive.position_of(&source_id);
    debug!("Flashing item {} at row {:?}", source_id, flash);

    Ok(DropOutcome::Moved { outcome, flash })
}
