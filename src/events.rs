//! Notifications emitted by the plot widget and the replies handlers give.

use std::time::Duration;

use crate::axis::{AxisPart, AxisType};
use crate::geom::ScreenPoint;
use crate::graph::GraphId;
use crate::legend::LegendAlignment;

/// Something the user did to the plot widget.
#[derive(Debug, Clone, PartialEq)]
pub enum PlotEvent {
    /// A click changed the selection.
    SelectionChangedByUser,
    /// A mouse button went down inside the widget.
    MousePress {
        /// Pointer position.
        position: ScreenPoint,
    },
    /// The wheel turned inside the widget.
    MouseWheel {
        /// Pointer position.
        position: ScreenPoint,
        /// Vertical pixel delta.
        delta: f32,
    },
    /// Double-click on an axis.
    AxisDoubleClick {
        /// The axis.
        axis: AxisType,
        /// The part under the pointer.
        part: AxisPart,
    },
    /// Double-click on the legend, on an item or on its padding.
    LegendDoubleClick {
        /// The item, if one was hit.
        item: Option<GraphId>,
    },
    /// Double-click on the title.
    TitleDoubleClick,
    /// Single click on a graph.
    PlottableClick {
        /// The graph.
        graph: GraphId,
        /// Nearest data index.
        index: usize,
    },
    /// Right-click asking for a context menu.
    ContextMenuRequested {
        /// Pointer position, where the menu opens.
        position: ScreenPoint,
        /// Whether the pointer is over the legend box.
        over_legend: bool,
    },
    /// A context menu entry was chosen.
    MenuActionTriggered(MenuAction),
    /// A text prompt closed.
    PromptFinished {
        /// The prompt that closed.
        request: PromptRequest,
        /// Entered text, `None` when cancelled.
        text: Option<String>,
    },
}

/// Context menu command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// Move the legend to a placement.
    MoveLegend(LegendAlignment),
    /// Append a random graph.
    AddRandomGraph,
    /// Remove the first selected graph.
    RemoveSelectedGraph,
    /// Remove every graph.
    RemoveAllGraphs,
}

/// A labelled context menu entry.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuEntry {
    /// Entry text.
    pub label: String,
    /// Command run when chosen.
    pub action: MenuAction,
}

impl MenuEntry {
    /// Create a menu entry.
    pub fn new(label: impl Into<String>, action: MenuAction) -> Self {
        Self {
            label: label.into(),
            action,
        }
    }
}

/// Popup menu opened at a screen position.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextMenu {
    /// Top-left corner of the popup.
    pub position: ScreenPoint,
    /// Entries in display order.
    pub entries: Vec<MenuEntry>,
}

/// What a text prompt edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    /// The plot title.
    Title,
    /// An axis label.
    AxisLabel(AxisType),
    /// A graph name.
    GraphName(GraphId),
}

/// Request to ask the user for a line of text.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptRequest {
    /// What the text is applied to.
    pub target: EditTarget,
    /// Dialog caption.
    pub label: String,
    /// Text the editor starts with.
    pub initial: String,
}

/// Transient message for the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    /// Message text.
    pub text: String,
    /// How long the message stays visible.
    pub duration: Duration,
}

/// Reply of an event handler.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Response {
    /// The plot changed and must be repainted.
    pub replot: bool,
    /// Ask the user for text.
    pub prompt: Option<PromptRequest>,
    /// Open a context menu.
    pub menu: Option<ContextMenu>,
    /// Show a status message.
    pub status: Option<StatusMessage>,
}

impl Response {
    /// Nothing to do.
    pub fn none() -> Self {
        Self::default()
    }

    /// Repaint only.
    pub fn replot() -> Self {
        Self {
            replot: true,
            ..Self::default()
        }
    }

    /// Ask for text.
    pub fn prompt(request: PromptRequest) -> Self {
        Self {
            prompt: Some(request),
            ..Self::default()
        }
    }

    /// Open a menu.
    pub fn menu(menu: ContextMenu) -> Self {
        Self {
            menu: Some(menu),
            ..Self::default()
        }
    }

    /// Show a status message.
    pub fn status(status: StatusMessage) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}
