/// Configuration for the GPUI plot view.
#[derive(Debug, Clone)]
pub struct PlotViewConfig {
    /// Pixel distance the pointer must travel before a press becomes a drag.
    pub drag_threshold_px: f32,
    /// Pixel distance within which a click hits a graph.
    pub graph_hit_threshold_px: f32,
    /// Range factor applied per wheel step; below one zooms in on scroll up.
    pub zoom_factor: f64,
    /// Show status messages in a bar along the bottom edge.
    pub show_status_bar: bool,
}

impl Default for PlotViewConfig {
    fn default() -> Self {
        Self {
            drag_threshold_px: 4.0,
            graph_hit_threshold_px: 8.0,
            zoom_factor: 0.85,
            show_status_bar: true,
        }
    }
}
