use crate::geometry::Rect;
use serde::{Deserialize, Serialize};

/// Per-artifact metrics and layout state.
///
/// Every artifact carries one of these. It starts at `Metrics::default()`
/// when the Builder creates the artifact and is filled in progressively by
/// later stages: `linesOfCode` by the Pruner's top-down pass, the SCC/rank
/// fields by the Pruner's post-order pass, and the two frame fields by the
/// Layouter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub lines_of_code: u64,
    pub component_rank: Option<u32>,
    pub scc_index_topologically_sorted: Option<u32>,
    pub is_in_a_cycle: bool,
    pub frame_in_scope_content: Rect,
    pub content_frame: Rect,
    pub shows_parts: bool,
}

impl Default for Metrics {
    fn default() -> Self {
        Self {
            lines_of_code: 0,
            component_rank: None,
            scc_index_topologically_sorted: None,
            is_in_a_cycle: false,
            frame_in_scope_content: Rect::ZERO,
            content_frame: Rect::ZERO,
            shows_parts: false,
        }
    }
}
