// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Background formatting — runs the synchronous pipeline on tokio's blocking
// pool so a front end never stalls on a large manuscript.
//
// `submit` returns a `FormatTask` handle immediately. The outcome is available
// by awaiting the handle, and every completion is also published as a
// `FormatEvent` for observers that did not submit the work.

use std::path::PathBuf;
use std::sync::Arc;

use folio_core::error::{FolioError, Result};
use folio_core::{DocumentId, FolioConfig};
use folio_document::{Document, load_cover};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// One formatting job: raw text plus optional platform and cover.
#[derive(Debug, Clone, Default)]
pub struct FormatRequest {
    pub source: String,
    /// Platform id to reflow for. `None` assembles the segmented chapters for
    /// the configured default platform.
    pub platform: Option<String>,
    /// Cover path and its encoded bytes.
    pub cover: Option<(PathBuf, Vec<u8>)>,
}

/// Completion notice published on the service's event channel.
#[derive(Debug, Clone, PartialEq)]
pub enum FormatEvent {
    Completed {
        task: Uuid,
        document: DocumentId,
        blocks: usize,
    },
    Failed {
        task: Uuid,
        error: String,
    },
}

impl FormatEvent {
    pub fn task(&self) -> Uuid {
        match self {
            Self::Completed { task, .. } | Self::Failed { task, .. } => *task,
        }
    }
}

/// Handle to a submitted job.
#[derive(Debug)]
pub struct FormatTask {
    pub id: Uuid,
    handle: JoinHandle<Result<Document>>,
}

impl FormatTask {
    /// Wait for the job and return the assembled document.
    pub async fn wait(self) -> Result<Document> {
        self.handle
            .await
            .map_err(|e| {
                FolioError::Io(std::io::Error::other(format!(
                    "format task {} aborted: {e}",
                    self.id
                )))
            })?
    }
}

/// Events buffered for a receiver that is not keeping up.
pub const EVENT_CAPACITY: usize = 64;

/// Submits formatting jobs to the blocking pool.
#[derive(Clone)]
pub struct FormatService {
    config: Arc<FolioConfig>,
    events: mpsc::Sender<FormatEvent>,
}

impl FormatService {
    /// Create the service and the receiving end of its event channel.
    ///
    /// The channel holds at most [`EVENT_CAPACITY`] undelivered events; when
    /// it is full, further events are dropped (and logged) rather than
    /// queued, so a receiver that is never drained costs bounded memory.
    /// Task outcomes are always available through [`FormatTask::wait`].
    pub fn new(config: FolioConfig) -> (Self, mpsc::Receiver<FormatEvent>) {
        Self::with_event_capacity(config, EVENT_CAPACITY)
    }

    /// As [`FormatService::new`] with a custom event buffer (at least 1).
    pub fn with_event_capacity(
        config: FolioConfig,
        capacity: usize,
    ) -> (Self, mpsc::Receiver<FormatEvent>) {
        let (events, rx) = mpsc::channel(capacity.max(1));
        let service = Self {
            config: Arc::new(config),
            events,
        };
        (service, rx)
    }

    pub fn config(&self) -> &FolioConfig {
        &self.config
    }

    /// Queue `request` and return its handle. Must be called from within a
    /// tokio runtime.
    pub fn submit(&self, request: FormatRequest) -> FormatTask {
        let id = Uuid::new_v4();
        let config = Arc::clone(&self.config);
        let events = self.events.clone();
        debug!(task = %id, source_len = request.source.len(), "format task submitted");

        let handle = tokio::task::spawn_blocking(move || {
            let outcome = format_document(&request, &config);
            let event = match &outcome {
                Ok(doc) => {
                    info!(
                        task = %id,
                        document = %doc.id(),
                        blocks = doc.blocks().len(),
                        "format task completed"
                    );
                    FormatEvent::Completed {
                        task: id,
                        document: doc.id(),
                        blocks: doc.blocks().len(),
                    }
                }
                Err(err) => {
                    warn!(task = %id, error = %err, "format task failed");
                    FormatEvent::Failed {
                        task: id,
                        error: err.to_string(),
                    }
                }
            };
            match events.try_send(event) {
                Ok(()) => {}
                Err(mpsc::error::TrySendError::Full(_)) => {
                    warn!(task = %id, "event channel full, completion event dropped");
                }
                // Nobody listening is fine.
                Err(mpsc::error::TrySendError::Closed(_)) => {}
            }
            outcome
        });

        FormatTask { id, handle }
    }
}

/// The whole pipeline, synchronously: cover, segment, optional reflow,
/// assemble.
pub fn format_document(request: &FormatRequest, config: &FolioConfig) -> Result<Document> {
    let cover = request
        .cover
        .as_ref()
        .map(|(path, bytes)| load_cover(path, bytes))
        .transpose()?;

    let mut document = Document::from_source(&request.source)?.with_cover(cover)?;
    if let Some(platform) = request.platform.as_deref() {
        document = document.reflow(platform)?;
    }
    document.assemble(config)
}
