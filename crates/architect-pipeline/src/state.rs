use architect_core::ArtifactId;
use architect_model::ArtifactArena;
use std::sync::Arc;

/// The Pipeline Controller's numbered sub-steps within `RetrievingData` and
/// `Analyzing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    ReadFolder,
    ConnectServer,
    RetrieveSymbols,
    RetrieveReferences,
    BuildArchitecture,
    LiftCrossScope,
    ComputeMetrics,
    Sort,
    Layout,
    BuildViewModels,
}

/// The observable pipeline state, published to observers over a
/// `tokio::sync::watch` channel by `PipelineController`. Every transition
/// is atomic: a reader never sees a torn or partially-applied variant.
#[derive(Debug, Clone)]
pub enum State {
    /// The project has been located (a `ProjectLocation` is known) but
    /// nothing has been read yet.
    Located,
    RetrievingData(Step),
    /// Folder contents and symbol/reference data have been retrieved (the
    /// external `SymbolServer` may have degraded along the way).
    DataReady,
    Analyzing(Step),
    /// Terminal success state: `data` is the fully built, lifted, pruned,
    /// sorted, and laid-out artifact tree; `root_view_model` names its root.
    Ready {
        data: Arc<ArtifactArena>,
        root_view_model: ArtifactId,
    },
    /// Terminal failure state carrying a human-readable message. A new
    /// `PipelineController` must be constructed to retry — there is no
    /// in-place restart.
    Failed(String),
}

impl State {
    pub fn is_terminal(&self) -> bool {
        matches!(self, State::Ready { .. } | State::Failed(_))
    }
}
