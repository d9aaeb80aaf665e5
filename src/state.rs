//! Map view state and its transitions.
//!
//! The prototype screen kept a pile of independent `useState` toggles;
//! here the same UI state is one serializable structure updated by
//! discrete, named events. The host app owns rendering and simply
//! replays events into [`MapViewState::apply`].

use crate::{GeoPoint, RoutePath, Task, TaskStatus};
use serde::{Deserialize, Serialize};

/// Serializable state of the map screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct MapViewState {
    /// Draggable pin position
    pub pin: GeoPoint,
    /// Hotspot overlay visibility
    pub show_hotspots: bool,
    /// Safe-meeting-point overlay visibility
    pub show_safe_points: bool,
    /// Whether the task detail panel is collapsed
    pub panel_collapsed: bool,
    /// Id of the task whose detail panel is open
    pub selected_task: Option<String>,
    /// Ids of tasks the user has accepted, sorted and deduplicated
    pub accepted: Vec<String>,
    /// Route currently drawn on the map, if any
    pub route: Option<RoutePath>,
}

/// A discrete change to the map screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
#[cfg_attr(feature = "ffi", derive(uniffi::Enum))]
pub enum ViewEvent {
    /// The user dragged the pin to a new position
    PinDragged { to: GeoPoint },
    /// Hotspot overlay toggled
    HotspotsToggled,
    /// Safe-meeting-point overlay toggled
    SafePointsToggled,
    /// Detail panel collapsed or expanded
    PanelToggled,
    /// A task marker was tapped
    TaskSelected { task_id: String },
    /// The detail panel was dismissed
    SelectionCleared,
    /// Accept (or un-accept) a task
    AcceptToggled { task_id: String },
    /// A fetched route is ready to draw
    RouteReady { route: RoutePath },
    /// The route fetch failed; in-flight routing state is dropped
    RouteFailed,
    /// The drawn route was dismissed
    RouteCleared,
}

impl MapViewState {
    /// Fresh state for a newly mounted map screen: overlays on, nothing
    /// selected, pin at the given position.
    pub fn new(pin: GeoPoint) -> Self {
        Self {
            pin,
            show_hotspots: true,
            show_safe_points: true,
            panel_collapsed: false,
            selected_task: None,
            accepted: Vec::new(),
            route: None,
        }
    }

    /// Apply one event. Total - every event has a defined effect in
    /// every state, and no event can fail.
    pub fn apply(&mut self, event: ViewEvent) {
        match event {
            ViewEvent::PinDragged { to } => {
                self.pin = to;
            }
            ViewEvent::HotspotsToggled => {
                self.show_hotspots = !self.show_hotspots;
            }
            ViewEvent::SafePointsToggled => {
                self.show_safe_points = !self.show_safe_points;
            }
            ViewEvent::PanelToggled => {
                self.panel_collapsed = !self.panel_collapsed;
            }
            ViewEvent::TaskSelected { task_id } => {
                self.selected_task = Some(task_id);
                // Tapping a marker always brings the panel up
                self.panel_collapsed = false;
            }
            ViewEvent::SelectionCleared => {
                self.selected_task = None;
                self.route = None;
            }
            ViewEvent::AcceptToggled { task_id } => {
                match self.accepted.binary_search(&task_id) {
                    Ok(pos) => {
                        self.accepted.remove(pos);
                    }
                    Err(pos) => {
                        self.accepted.insert(pos, task_id);
                    }
                }
            }
            ViewEvent::RouteReady { route } => {
                self.route = Some(route);
            }
            ViewEvent::RouteFailed | ViewEvent::RouteCleared => {
                self.route = None;
            }
        }
    }

    /// Whether the user has accepted the given task.
    pub fn is_accepted(&self, task_id: &str) -> bool {
        self.accepted.binary_search_by(|id| id.as_str().cmp(task_id)).is_ok()
    }

    /// Effective status of a task on this screen: the posted status,
    /// overridden to Accepted while the task is in the accepted set.
    pub fn effective_status(&self, task: &Task) -> TaskStatus {
        if self.is_accepted(&task.id) {
            TaskStatus::Accepted
        } else {
            task.status
        }
    }
}
