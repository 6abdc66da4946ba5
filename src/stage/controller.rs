//! Stage controller: drives one manifest through Loading to Error or Ready.
//!
//! Each newly observed manifest opens a cycle tagged with a generation.
//! A cycle may only commit while its generation is still the current one,
//! so results of superseded cycles are dropped no matter when they finish.

use tokio::sync::watch;

use crate::config::StageOptions;
use crate::fetch::ManifestSource;
use crate::manifest::{extract, ManifestReference, ModelReference};
use crate::stage::state::{Cycle, PresentationState, Resolution, ResolveFailure, StageSnapshot};
use crate::stage::view::StageView;

/// Owns the presentation state of one 3D stage.
///
/// The snapshot is published through a watch channel; the controller is
/// its only writer.
pub struct StageController<S> {
    source: S,
    options: StageOptions,
    snapshot: watch::Sender<StageSnapshot>,
}

impl<S: ManifestSource> StageController<S> {
    /// Create a controller fetching manifests through `source`.
    pub fn new(source: S, options: StageOptions) -> Self {
        let (snapshot, _) = watch::channel(StageSnapshot::default());
        Self {
            source,
            options,
            snapshot,
        }
    }

    /// Observe, and if it differs from the active one, resolve `manifest`.
    ///
    /// Returns the state visible afterwards. Re-presenting the active
    /// manifest starts nothing and returns the current state.
    pub async fn present(&self, manifest: impl Into<ManifestReference>) -> PresentationState {
        if let Some(cycle) = self.observe(manifest.into()) {
            self.resolve(cycle).await;
        }
        self.state()
    }

    /// Start a new cycle if `manifest` differs from the active one.
    ///
    /// A new cycle resets the stage to Loading and clears the asset-loaded
    /// flag before any work happens.
    pub fn observe(&self, manifest: ManifestReference) -> Option<Cycle> {
        let key = manifest.identity_key();
        let mut generation = None;

        self.snapshot.send_if_modified(|snapshot| {
            if snapshot.manifest_key.as_deref() == Some(key.as_str()) {
                return false;
            }
            snapshot.generation += 1;
            snapshot.manifest_key = Some(key);
            snapshot.state = PresentationState::Loading;
            snapshot.asset_loaded = false;
            snapshot.failure = None;
            generation = Some(snapshot.generation);
            true
        });

        let generation = generation?;
        log::debug!("Stage cycle {} started", generation);
        Some(Cycle {
            generation,
            manifest,
        })
    }

    /// Resolve a cycle and commit its outcome if it is still current.
    pub async fn resolve(&self, cycle: Cycle) -> Resolution {
        let Cycle {
            generation,
            manifest,
        } = cycle;

        if !self.is_current(generation) {
            log::debug!("Stage cycle {} superseded before it ran", generation);
            return Resolution::Superseded;
        }

        let outcome = self.locate_model(manifest).await;
        self.commit(generation, outcome)
    }

    async fn locate_model(
        &self,
        manifest: ManifestReference,
    ) -> std::result::Result<ModelReference, ResolveFailure> {
        let location = match manifest {
            ManifestReference::Inline(document) => {
                return extract(&document).ok_or(ResolveFailure::NotFound);
            }
            ManifestReference::Location(location) => location,
        };

        if let Some(model) = ModelReference::parse(&location) {
            log::debug!("{} is a model file, skipping manifest fetch", location);
            return Ok(model);
        }

        let document = self.source.fetch(&location).await.map_err(|e| {
            log::warn!("Failed to load manifest {}: {}", location, e);
            ResolveFailure::from(e)
        })?;

        extract(&document).ok_or_else(|| {
            log::warn!("Manifest {} has no glTF/GLB reference", location);
            ResolveFailure::NotFound
        })
    }

    fn commit(
        &self,
        generation: u64,
        outcome: std::result::Result<ModelReference, ResolveFailure>,
    ) -> Resolution {
        let (state, failure) = match outcome {
            Ok(model) => (PresentationState::Ready(model), None),
            Err(failure) => {
                let message = failure.message(&self.options.messages).to_string();
                (PresentationState::Error(message), Some(failure))
            }
        };

        let applied = self.snapshot.send_if_modified(|snapshot| {
            if snapshot.generation != generation {
                return false;
            }
            snapshot.state = state.clone();
            snapshot.failure = failure;
            true
        });

        if !applied {
            log::debug!("Discarding result of superseded stage cycle {}", generation);
            return Resolution::Superseded;
        }

        log::info!("Stage cycle {}: {}", generation, state);
        Resolution::Applied(state)
    }

    /// Record that the renderer finished loading the asset of `generation`.
    ///
    /// Ignored unless that cycle is current and ready. Returns whether the
    /// flag changed.
    pub fn mark_asset_loaded(&self, generation: u64) -> bool {
        self.snapshot.send_if_modified(|snapshot| {
            if snapshot.generation != generation
                || snapshot.asset_loaded
                || snapshot.state.model().is_none()
            {
                return false;
            }
            snapshot.asset_loaded = true;
            true
        })
    }

    /// Tear the stage down. In-flight cycles can no longer commit.
    pub fn dismiss(&self) {
        self.snapshot.send_modify(|snapshot| {
            snapshot.generation += 1;
            snapshot.manifest_key = None;
            snapshot.state = PresentationState::Loading;
            snapshot.asset_loaded = false;
            snapshot.failure = None;
        });
        log::debug!("Stage dismissed");
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.snapshot.borrow().generation == generation
    }

    pub fn state(&self) -> PresentationState {
        self.snapshot.borrow().state.clone()
    }

    pub fn snapshot(&self) -> StageSnapshot {
        self.snapshot.borrow().clone()
    }

    /// Receive every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<StageSnapshot> {
        self.snapshot.subscribe()
    }

    /// What the renderer should show right now.
    pub fn view(&self) -> StageView {
        StageView::from_snapshot(&self.snapshot.borrow(), &self.options)
    }

    pub fn options(&self) -> &StageOptions {
        &self.options
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}
