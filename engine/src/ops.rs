//! Asynchronous page operations.
//!
//! Each operation is one page request: it runs on the runtime, does its
//! vault IO off the frame loop, and reports back exactly once over the op
//! channel. Spawning emits `request-started`; the app settles the busy
//! period when the completion event is drained. Events carry the epoch
//! they were spawned under so completions that outlive a history restore
//! can be recognized and dropped.

use slurp_types::{FileEntry, PreviewStyle, RelPath};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::listing::ListingPage;
use crate::preview::PreviewPane;
use crate::vault::{Vault, VaultError};

pub type OpId = u64;

#[derive(Debug, Clone)]
pub enum OpKind {
    LoadListing { path: RelPath, push_history: bool },
    LoadPreview { entry: FileEntry, max_bytes: usize },
    DeleteEntry { path: RelPath, name: String },
}

impl OpKind {
    /// Label used in "Could not {action}" notices.
    #[must_use]
    pub fn action(&self) -> &'static str {
        match self {
            Self::LoadListing { .. } => "load listing",
            Self::LoadPreview { .. } => "load preview",
            Self::DeleteEntry { .. } => "delete",
        }
    }
}

#[derive(Debug)]
pub enum OpOutcome {
    ListingLoaded { page: ListingPage, push_history: bool },
    PreviewLoaded(PreviewPane),
    EntryDeleted { name: String },
    Failed { action: &'static str, message: String },
}

#[derive(Debug)]
pub struct OpEvent {
    pub id: OpId,
    pub epoch: u64,
    pub outcome: OpOutcome,
}

/// Run one operation to completion and post its event. The send result is
/// ignored: the receiver only closes when the app is shutting down.
pub fn spawn(
    vault: Vault,
    kind: OpKind,
    id: OpId,
    epoch: u64,
    tx: mpsc::UnboundedSender<OpEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let outcome = run(vault, kind).await;
        let _ = tx.send(OpEvent { id, epoch, outcome });
    })
}

async fn run(vault: Vault, kind: OpKind) -> OpOutcome {
    let action = kind.action();
    let result = match kind {
        OpKind::LoadListing { path, push_history } => {
            blocking(action, move || {
                let entries = vault.list(&path)?;
                Ok(OpOutcome::ListingLoaded {
                    page: ListingPage::new(path, entries),
                    push_history,
                })
            })
            .await
        }
        OpKind::LoadPreview { entry, max_bytes } => {
            blocking(action, move || load_preview(&vault, &entry, max_bytes)).await
        }
        OpKind::DeleteEntry { path, name } => {
            blocking(action, move || {
                vault.delete(&path)?;
                Ok(OpOutcome::EntryDeleted { name })
            })
            .await
        }
    };
    result.unwrap_or_else(|message| OpOutcome::Failed { action, message })
}

fn load_preview(
    vault: &Vault,
    entry: &FileEntry,
    max_bytes: usize,
) -> Result<OpOutcome, VaultError> {
    let pane = match entry.kind.preview_style() {
        PreviewStyle::InlineText => {
            let (content, truncated) = vault.read_text_head(&entry.path, max_bytes)?;
            PreviewPane::text(entry.name.clone(), content, truncated)
        }
        PreviewStyle::InfoCard => {
            let size = vault.file_size(&entry.path)?;
            PreviewPane::info_card(entry.name.clone(), entry.kind, size)
        }
        PreviewStyle::Unavailable => {
            let label = entry.kind.label();
            return Ok(OpOutcome::Failed {
                action: "load preview",
                message: format!("no preview for {label} files"),
            });
        }
    };
    Ok(OpOutcome::PreviewLoaded(pane))
}

/// Vault IO is synchronous; run it on the blocking pool and fold every
/// failure into a display message.
async fn blocking<F>(action: &'static str, work: F) -> Result<OpOutcome, String>
where
    F: FnOnce() -> Result<OpOutcome, VaultError> + Send + 'static,
{
    match tokio::task::spawn_blocking(work).await {
        Ok(Ok(outcome)) => Ok(outcome),
        Ok(Err(err)) => Err(err.to_string()),
        Err(join_err) => {
            tracing::warn!(action, error = %join_err, "operation task failed");
            Err("operation interrupted".to_string())
        }
    }
}
