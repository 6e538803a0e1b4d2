use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::backend::{ImageStore, ImageType, PatientImage};

/// What the image gallery currently shows
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImageListState {
    pub patient_id: Option<String>,
    pub image_type: Option<ImageType>,
    pub images: Vec<PatientImage>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// The state now holds this many images
    Loaded(usize),
    /// The fetch failed; the error is recorded in the state
    Failed(String),
    /// A newer load started before this one finished; result dropped
    Superseded,
}

pub struct PatientImageLoader {
    store: Arc<dyn ImageStore>,
    generation: AtomicU64,
    state: RwLock<ImageListState>,
}

impl PatientImageLoader {
    pub fn new(store: Arc<dyn ImageStore>) -> Self {
        Self {
            store,
            generation: AtomicU64::new(0),
            state: RwLock::new(ImageListState::default()),
        }
    }

    pub async fn state(&self) -> ImageListState {
        self.state.read().await.clone()
    }

    /// Fetch images of `image_type` for `patient_id` and publish them unless
    /// a newer load has started meanwhile
    pub async fn load(&self, patient_id: &str, image_type: ImageType) -> LoadOutcome {
        // Token and metadata are taken under one lock so the newest token
        // always belongs to the newest patient/type pair
        let generation = {
            let mut state = self.state.write().await;
            let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            state.patient_id = Some(patient_id.to_string());
            state.image_type = Some(image_type);
            state.loading = true;
            state.error = None;
            generation
        };

        let result = self.store.list_patient_images(patient_id, image_type).await;

        let mut state = self.state.write().await;
        // Checked under the write lock so a newer load cannot publish in between
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(
                patient_id = %patient_id,
                image_type = %image_type,
                "Discarding stale image response"
            );
            return LoadOutcome::Superseded;
        }

        state.loading = false;
        match result {
            Ok(images) => {
                let count = images.len();
                state.images = images;
                LoadOutcome::Loaded(count)
            }
            Err(e) => {
                tracing::warn!(patient_id = %patient_id, error = %e, "Failed to load patient images");
                let message = e.to_string();
                state.images.clear();
                state.error = Some(message.clone());
                LoadOutcome::Failed(message)
            }
        }
    }
}
