use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use architect_core::{AnalyzerError, ProjectLocation, Rect, Result};
use architect_layout::ArtifactFilter;
use architect_model::ArtifactArena;
use tokio::sync::watch;

use crate::collaborators::{ProjectReader, SymbolServer};
use crate::retrieval::{retrieve_references, retrieve_symbols};
use crate::state::{State, Step};

/// A cooperative cancellation flag checked at every suspension point: I/O
/// for folder reading, network calls to the language-protocol server, and
/// the optional yield between stages. Cheap, `Clone`-able, and shareable
/// across the task that runs the pipeline and whatever triggers
/// cancellation.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Owns the observable `State` and sequences the analyzer's stages in
/// order. A single logical task, cooperatively scheduled — it does not fan
/// out across cores internally: every stage consumes the previous stage's
/// complete output, so there is nothing to parallelize at this level even
/// if the caller runs `run` on a background executor.
pub struct PipelineController {
    state_tx: watch::Sender<State>,
}

impl PipelineController {
    /// Creates a controller in the initial `Located` state, along with a
    /// receiver observers can clone freely and read from a different
    /// thread.
    pub fn new() -> (Self, watch::Receiver<State>) {
        let (state_tx, state_rx) = watch::channel(State::Located);
        (Self { state_tx }, state_rx)
    }

    pub fn subscribe(&self) -> watch::Receiver<State> {
        self.state_tx.subscribe()
    }

    pub fn state(&self) -> State {
        self.state_tx.borrow().clone()
    }

    fn publish(&self, state: State) {
        // A closed receiver set (no observers left) is not a pipeline error;
        // the analysis still runs to completion for whoever reads `state()`
        // at the end.
        let _ = self.state_tx.send(state);
    }

    fn fail(&self, message: impl Into<String>) -> AnalyzerError {
        let message = message.into();
        tracing::error!(%message, "pipeline failed");
        self.publish(State::Failed(message.clone()));
        AnalyzerError::InternalInvariantViolation(message)
    }

    fn check_cancelled(&self, cancel: &CancelToken) -> Result<()> {
        if cancel.is_cancelled() {
            tracing::info!("pipeline cancelled");
            self.publish(State::Failed("cancelled".into()));
            return Err(AnalyzerError::Cancelled);
        }
        Ok(())
    }

    /// Runs the whole pipeline to completion (or to `Failed`), publishing
    /// every state transition in order. `root_rect` and `filter` are handed
    /// to the Treemap Layouter; `filter` stays a caller-supplied predicate —
    /// the core only ever consumes it, it never implements search/filter
    /// UX itself.
    pub async fn run(
        &self,
        location: ProjectLocation,
        reader: &dyn ProjectReader,
        symbol_server: &dyn SymbolServer,
        constants: &architect_core::LayoutConstants,
        root_rect: Rect,
        filter: &dyn ArtifactFilter,
        cancel: &CancelToken,
    ) -> Result<()> {
        self.publish(State::Located);
        self.check_cancelled(cancel)?;

        self.publish(State::RetrievingData(Step::ReadFolder));
        let mut folder = reader.read(&location).await.map_err(|err| {
            let message = format!("project folder missing: {err}");
            tracing::error!(%message);
            self.publish(State::Failed(message.clone()));
            AnalyzerError::ProjectFolderMissing(message)
        })?;
        self.check_cancelled(cancel)?;

        if folder.is_empty() {
            let message = format!("no code files found under {}", location.folder_path);
            tracing::error!(%message);
            self.publish(State::Failed(message.clone()));
            return Err(AnalyzerError::NoCodeFilesFound(location.folder_path.clone()));
        }

        self.publish(State::RetrievingData(Step::ConnectServer));
        self.check_cancelled(cancel)?;
        if !symbol_server.is_working() {
            tracing::warn!(
                stage = "connectServer",
                "language server already marked not working; continuing with whatever folder data was read"
            );
        }

        let root_name = folder.name.clone();

        self.publish(State::RetrievingData(Step::RetrieveSymbols));
        retrieve_symbols(&mut folder, &root_name, symbol_server).await;
        self.check_cancelled(cancel)?;

        self.publish(State::RetrievingData(Step::RetrieveReferences));
        retrieve_references(&mut folder, &root_name, symbol_server).await;
        self.check_cancelled(cancel)?;

        self.publish(State::DataReady);
        self.check_cancelled(cancel)?;

        self.publish(State::Analyzing(Step::BuildArchitecture));
        let mut build_output = architect_builder::build_artifact_tree(&folder)?;
        self.check_cancelled(cancel)?;

        self.publish(State::Analyzing(Step::LiftCrossScope));
        architect_builder::lift_references(
            &mut build_output.arena,
            &build_output.side_table,
            &build_output.file_index,
            &build_output.pending_references,
        )?;
        self.check_cancelled(cancel)?;

        self.publish(State::Analyzing(Step::ComputeMetrics));
        architect_analysis::compute_metrics_and_prune(&mut build_output.arena)?;
        self.check_cancelled(cancel)?;

        self.publish(State::Analyzing(Step::Sort));
        architect_analysis::sort_children(&mut build_output.arena)?;
        self.check_cancelled(cancel)?;

        self.publish(State::Analyzing(Step::Layout));
        architect_layout::layout_tree(&mut build_output.arena, root_rect, constants, filter)?;
        self.check_cancelled(cancel)?;

        self.publish(State::Analyzing(Step::BuildViewModels));
        let root_view_model = build_output.arena.root_id().ok_or_else(|| {
            self.fail("arena has no root after a successful build".to_string())
        })?;
        self.check_cancelled(cancel)?;

        self.finish(build_output.arena, root_view_model);
        Ok(())
    }

    fn finish(&self, arena: ArtifactArena, root_view_model: architect_core::ArtifactId) {
        self.publish(State::Ready {
            data: Arc::new(arena),
            root_view_model,
        });
    }
}

impl Default for PipelineController {
    fn default() -> Self {
        Self::new().0
    }
}
