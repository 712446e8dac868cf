use std::time::Instant;

use crate::events::{ContextMenu, PromptRequest, StatusMessage};
use crate::geom::ScreenPoint;
use crate::interaction::AxisSet;
use crate::layout::{HitTarget, PlotLayout};
use crate::plot::Plot;

#[derive(Debug, Clone)]
pub(crate) struct DragState {
    pub(crate) start: ScreenPoint,
    pub(crate) last: ScreenPoint,
    pub(crate) active: bool,
    pub(crate) axes: AxisSet,
}

impl DragState {
    pub(crate) fn new(start: ScreenPoint, axes: AxisSet) -> Self {
        Self {
            start,
            last: start,
            active: false,
            axes,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct PendingClick {
    pub(crate) target: HitTarget,
    pub(crate) additive: bool,
}

#[derive(Debug, Clone)]
pub(crate) struct PromptState {
    pub(crate) request: PromptRequest,
    pub(crate) text: String,
}

impl PromptState {
    pub(crate) fn new(request: PromptRequest) -> Self {
        let text = request.initial.clone();
        Self { request, text }
    }

    pub(crate) fn insert(&mut self, text: &str) {
        self.text.extend(text.chars().filter(|c| !c.is_control()));
    }

    pub(crate) fn backspace(&mut self) {
        self.text.pop();
    }
}

#[derive(Debug, Clone)]
pub(crate) struct StatusState {
    pub(crate) text: String,
    pub(crate) until: Instant,
}

impl StatusState {
    pub(crate) fn new(message: StatusMessage, now: Instant) -> Self {
        Self {
            text: message.text,
            until: now + message.duration,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PlotUiState {
    pub(crate) layout: Option<PlotLayout>,
    pub(crate) drag: Option<DragState>,
    pub(crate) pending_click: Option<PendingClick>,
    pub(crate) menu: Option<ContextMenu>,
    pub(crate) prompt: Option<PromptState>,
    pub(crate) status: Option<StatusState>,
}

impl PlotUiState {
    pub(crate) fn clear_interaction(&mut self) {
        self.drag = None;
        self.pending_click = None;
    }

    pub(crate) fn hit_test(&self, plot: &Plot, point: ScreenPoint, threshold: f32) -> HitTarget {
        self.layout
            .as_ref()
            .map_or(HitTarget::Outside, |layout| {
                layout.hit_test(plot, point, threshold)
            })
    }

    /// Status text still within its display time.
    pub(crate) fn active_status(&self, now: Instant) -> Option<&str> {
        self.status
            .as_ref()
            .filter(|status| status.until > now)
            .map(|status| status.text.as_str())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::events::EditTarget;

    #[test]
    fn prompt_editing_skips_control_characters() {
        let mut prompt = PromptState::new(PromptRequest {
            target: EditTarget::Title,
            label: "New plot title:".to_string(),
            initial: "ab".to_string(),
        });
        prompt.insert("c\r");
        prompt.backspace();
        prompt.insert("d");
        assert_eq!(prompt.text, "abd");
    }

    #[test]
    fn status_expires() {
        let now = Instant::now();
        let state = PlotUiState {
            status: Some(StatusState::new(
                StatusMessage {
                    text: "hi".to_string(),
                    duration: Duration::from_millis(10),
                },
                now,
            )),
            ..PlotUiState::default()
        };
        assert_eq!(state.active_status(now), Some("hi"));
        assert_eq!(state.active_status(now + Duration::from_millis(11)), None);
    }
}
