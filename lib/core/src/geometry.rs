use crate::constants::{
    COLLAPSED_LINE_OFFSET, COLLAPSED_TOGGLE_TOP, CURVE_OFFSET_ADJUSTMENT, EXPANDED_LINE_OFFSET,
    EXPANDED_TOGGLE_TOP, THREAD_LINE_TOP, THREAD_OVERLAY_TOP,
};

/// Position of the lines linking a comment's anchor to the anchors of its replies, in pixels
/// relative to the top of the comment's container.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConnectorGeometry {
    pub overlay_top: f64,
    pub line_top: f64,
    pub line_height: f64,
    /// Top of the curve joining the vertical line to each reply, in the order of the replies
    pub curve_tops: Vec<f64>,
    pub toggle_top: f64,
}

/// Vertical space taken by a comment's header and body before its replies start
pub fn get_line_offset(is_collapsed: bool) -> f64 {
    match is_collapsed {
        true => COLLAPSED_LINE_OFFSET,
        false => EXPANDED_LINE_OFFSET,
    }
}

/// Computes the connectors of a comment from the measured offsets of its replies' anchors
pub fn compute_connector_geometry(
    child_offsets: &[f64],
    is_collapsed: bool,
) -> ConnectorGeometry {
    let line_offset = get_line_offset(is_collapsed);
    if is_collapsed {
        return ConnectorGeometry {
            overlay_top: THREAD_OVERLAY_TOP,
            line_top: THREAD_LINE_TOP,
            line_height: 0.0,
            curve_tops: Vec::new(),
            toggle_top: COLLAPSED_TOGGLE_TOP,
        };
    }

    let line_height = child_offsets
        .last()
        .map(|last_offset| (last_offset - line_offset).max(0.0))
        .unwrap_or_default();

    ConnectorGeometry {
        overlay_top: THREAD_OVERLAY_TOP,
        line_top: THREAD_LINE_TOP,
        line_height,
        curve_tops: child_offsets
            .iter()
            .map(|offset| offset - (line_offset + CURVE_OFFSET_ADJUSTMENT))
            .collect(),
        toggle_top: EXPANDED_TOGGLE_TOP,
    }
}
