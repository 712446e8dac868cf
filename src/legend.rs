//! Legend placement and per-graph legend items.

use crate::graph::GraphId;
use crate::render::Color;

/// Where the legend sits inside the axis rect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LegendAlignment {
    TopLeft,
    TopCenter,
    TopRight,
    #[default]
    BottomRight,
    BottomLeft,
}

impl LegendAlignment {
    /// Placements offered by the legend context menu, in menu order.
    pub const MENU: [LegendAlignment; 5] = [
        Self::TopLeft,
        Self::TopCenter,
        Self::TopRight,
        Self::BottomRight,
        Self::BottomLeft,
    ];

    /// Context menu text for the placement.
    pub fn menu_label(self) -> &'static str {
        match self {
            Self::TopLeft => "Move to top left",
            Self::TopCenter => "Move to top center",
            Self::TopRight => "Move to top right",
            Self::BottomRight => "Move to bottom right",
            Self::BottomLeft => "Move to bottom left",
        }
    }

    pub(crate) fn is_top(self) -> bool {
        matches!(self, Self::TopLeft | Self::TopCenter | Self::TopRight)
    }
}

/// Legend entry bound to one graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegendItem {
    graph: GraphId,
    selected: bool,
}

impl LegendItem {
    pub(crate) fn new(graph: GraphId) -> Self {
        Self {
            graph,
            selected: false,
        }
    }

    /// The graph this item describes.
    pub fn graph(&self) -> GraphId {
        self.graph
    }

    /// Check the selection flag.
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Set the selection flag.
    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }
}

/// The plot legend.
///
/// Items are added and removed by [`Plot`](crate::plot::Plot) together with
/// their graphs, so there is no public way to insert or drop one directly.
#[derive(Debug, Clone)]
pub struct Legend {
    visible: bool,
    font_size: f32,
    fill: Color,
    alignment: LegendAlignment,
    items: Vec<LegendItem>,
}

impl Legend {
    pub(crate) fn new() -> Self {
        Self {
            visible: false,
            font_size: 12.0,
            fill: Color::WHITE,
            alignment: LegendAlignment::default(),
            items: Vec::new(),
        }
    }

    /// Check legend visibility.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show or hide the legend.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Item font size in pixels.
    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// Set the item font size.
    pub fn set_font_size(&mut self, size: f32) {
        self.font_size = size;
    }

    /// Background fill.
    pub fn fill(&self) -> Color {
        self.fill
    }

    /// Set the background fill.
    pub fn set_fill(&mut self, fill: Color) {
        self.fill = fill;
    }

    /// Anchor alignment inside the axis rect.
    pub fn alignment(&self) -> LegendAlignment {
        self.alignment
    }

    /// Move the legend.
    pub fn set_alignment(&mut self, alignment: LegendAlignment) {
        self.alignment = alignment;
    }

    /// Items in graph creation order.
    pub fn items(&self) -> &[LegendItem] {
        &self.items
    }

    /// Item describing `graph`.
    pub fn item_for(&self, graph: GraphId) -> Option<&LegendItem> {
        self.items.iter().find(|item| item.graph == graph)
    }

    /// Mutable item describing `graph`.
    pub fn item_for_mut(&mut self, graph: GraphId) -> Option<&mut LegendItem> {
        self.items.iter_mut().find(|item| item.graph == graph)
    }

    pub(crate) fn items_mut(&mut self) -> &mut [LegendItem] {
        &mut self.items
    }

    pub(crate) fn push(&mut self, graph: GraphId) {
        self.items.push(LegendItem::new(graph));
    }

    pub(crate) fn remove(&mut self, graph: GraphId) {
        self.items.retain(|item| item.graph != graph);
    }

    pub(crate) fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_lists_five_placements_in_order() {
        let labels: Vec<_> = LegendAlignment::MENU
            .iter()
            .map(|alignment| alignment.menu_label())
            .collect();
        assert_eq!(
            labels,
            [
                "Move to top left",
                "Move to top center",
                "Move to top right",
                "Move to bottom right",
                "Move to bottom left",
            ]
        );
    }

    #[test]
    fn default_alignment_is_bottom_right() {
        assert_eq!(Legend::new().alignment(), LegendAlignment::BottomRight);
    }
}
