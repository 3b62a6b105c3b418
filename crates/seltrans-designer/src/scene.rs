//! Scripted drags against an in-memory drawing.
//!
//! A scene file (JSON) holds the items, the selection, extra snap targets
//! and a list of steps. [`Scene::replay`] drives a [`SelectionTransformer`]
//! through the steps and reports where the items ended up.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::drawing::{Drawing, DrawingItem};
use crate::handles::{self, Handle};
use crate::history::UndoHistory;
use crate::messages::StatusLog;
use crate::modifiers::Modifiers;
use crate::selection::SharedItem;
use crate::snapping::{PointSnapper, SnapTarget};
use crate::transform::{Desktop, SelectionTransformer};
use seltrans_core::{shared, Point};
use seltrans_settings::Config;

/// One scripted user action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    /// Press on a handle (by name), or on the selection body without one
    Grab {
        point: Point,
        #[serde(default)]
        handle: Option<String>,
    },
    /// Move the pointer while grabbed
    Drag {
        point: Point,
        #[serde(default)]
        modifiers: Modifiers,
    },
    /// Release the pointer
    Release,
    /// Leave a copy behind
    Stamp,
    /// Click a handle without dragging
    Click {
        handle: String,
        #[serde(default)]
        modifiers: Modifiers,
    },
    /// Switch between scale and rotate handles
    ToggleHandles,
}

/// A drawing plus the steps to replay on it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scene {
    /// Overrides the configuration passed to [`Scene::replay`]
    #[serde(default)]
    pub config: Option<Config>,
    pub items: Vec<DrawingItem>,
    /// Ids of the selected items; empty selects everything
    #[serde(default)]
    pub selection: Vec<String>,
    /// Snap targets besides the nodes of the items
    #[serde(default)]
    pub targets: Vec<SnapTarget>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// Final state of one item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemReport {
    pub id: String,
    pub affine: [f64; 6],
    pub center: Option<Point>,
}

/// Outcome of a replay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayReport {
    /// Items in document order, stamped copies included
    pub items: Vec<ItemReport>,
    /// Undo labels in commit order
    pub undo: Vec<String>,
    /// Last status message shown
    pub status: Option<String>,
}

impl Scene {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse scene")
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scene file {}", path.display()))?;
        Self::from_json(&content)
    }

    /// Runs the steps and reports the resulting drawing.
    pub fn replay(&self, config: &Config) -> Result<ReplayReport> {
        let config = self.config.clone().unwrap_or_else(|| config.clone());
        config.validate()?;

        let drawing = shared(Drawing::new());
        let items: Vec<SharedItem> = self
            .items
            .iter()
            .map(|item| drawing.borrow_mut().add(item.clone()))
            .collect();

        let selected = if self.selection.is_empty() {
            items.clone()
        } else {
            self.selection
                .iter()
                .map(|id| {
                    drawing
                        .borrow()
                        .get(id)
                        .ok_or_else(|| anyhow!("Selected item {id} is not in the scene"))
                })
                .collect::<Result<Vec<_>>>()?
        };

        let mut snapper = PointSnapper::new(config.snapping.clone());
        for target in &self.targets {
            snapper.add_target(target.clone());
        }
        for item in &items {
            snapper.add_item_targets(item);
        }

        let undo = shared(UndoHistory::new());
        let status = shared(StatusLog::default());
        let desktop = Desktop::new(config, drawing.clone())
            .with_selection(selected)
            .with_snapper(snapper)
            .with_undo(undo.clone())
            .with_status(status.clone());
        let mut transformer = SelectionTransformer::new(desktop);

        let mut grabbed: Option<&'static Handle> = None;
        for (index, step) in self.steps.iter().enumerate() {
            tracing::debug!(index, ?step, "replaying step");
            self.run_step(&mut transformer, &mut grabbed, step)
                .with_context(|| format!("Step {index} failed"))?;
        }

        let items = drawing
            .borrow()
            .items()
            .iter()
            .map(|item| {
                let item = item.borrow();
                ItemReport {
                    id: item.id().to_string(),
                    affine: item.affine().coefficients(),
                    center: item.center(),
                }
            })
            .collect();
        let undo = undo
            .borrow()
            .entries()
            .iter()
            .map(|label| label.to_string())
            .collect();
        let status = status.borrow().current().map(str::to_string);

        Ok(ReplayReport {
            items,
            undo,
            status,
        })
    }

    fn run_step(
        &self,
        transformer: &mut SelectionTransformer,
        grabbed: &mut Option<&'static Handle>,
        step: &Step,
    ) -> Result<()> {
        match step {
            Step::Grab { point, handle } => match handle {
                Some(name) => {
                    let handle = find_handle(name)?;
                    transformer.handle_grab(handle)?;
                    *grabbed = Some(handle);
                }
                None => {
                    transformer.grab(*point, None, true, true)?;
                    *grabbed = None;
                }
            },
            Step::Drag { point, modifiers } => match *grabbed {
                Some(handle) => {
                    if transformer.drag_handle(handle, *point, *modifiers).is_none() {
                        tracing::debug!(handle = handle.name, "drag rejected");
                    }
                }
                None => {
                    transformer.move_to(*point, *modifiers)?;
                }
            },
            Step::Release => {
                match grabbed.take() {
                    Some(handle) => transformer.handle_ungrab(handle)?,
                    None => transformer.ungrab()?,
                };
            }
            Step::Stamp => {
                transformer.stamp()?;
            }
            Step::Click { handle, modifiers } => {
                transformer.handle_click(find_handle(handle)?, *modifiers);
            }
            Step::ToggleHandles => transformer.increase_state(),
        }
        Ok(())
    }
}

fn find_handle(name: &str) -> Result<&'static Handle> {
    handles::find(name).ok_or_else(|| anyhow!("Unknown handle {name}"))
}
