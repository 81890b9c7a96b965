//! Application state machine.
//!
//! `App` owns the vault, the current page, the history stack, and the busy
//! coordinator, and turns input intents into page operations. Spawning an
//! operation emits `request-started`; draining its completion emits
//! `request-settled`; restoring from history emits `history-restore`. The
//! TUI layer only calls intent methods and reads state.

use std::collections::HashMap;
use std::mem;
use std::path::Path;
use std::time::{Duration, Instant};

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use slurp_types::{FileEntry, PageSignal, RelPath};

use crate::busy::BusyCoordinator;
use crate::config::SlurpConfig;
use crate::history::PageHistory;
use crate::listing::{ListingPage, Row};
use crate::ops::{self, OpEvent, OpId, OpKind, OpOutcome};
use crate::vault::Vault;
use crate::view::{ConfirmPrompt, ViewState};

pub struct App {
    vault: Vault,
    page: ListingPage,
    history: PageHistory,
    view: ViewState,
    busy: BusyCoordinator,
    preview_max_bytes: usize,
    op_tx: mpsc::UnboundedSender<OpEvent>,
    op_rx: mpsc::UnboundedReceiver<OpEvent>,
    tasks: HashMap<OpId, JoinHandle<()>>,
    next_op_id: OpId,
    /// Bumped on history restores; completions from older epochs are
    /// dropped unprocessed.
    epoch: u64,
    tick: usize,
    last_ui_tick: Instant,
    should_quit: bool,
}

impl App {
    #[must_use]
    pub fn new(vault: Vault, config: &SlurpConfig) -> Self {
        let (op_tx, op_rx) = mpsc::unbounded_channel();
        Self {
            vault,
            page: ListingPage::empty(),
            history: PageHistory::new(),
            view: ViewState::new(),
            busy: BusyCoordinator::new(config.activation_delay()),
            preview_max_bytes: config.preview_max_bytes(),
            op_tx,
            op_rx,
            tasks: HashMap::new(),
            next_op_id: 0,
            epoch: 0,
            tick: 0,
            last_ui_tick: Instant::now(),
            should_quit: false,
        }
    }

    #[must_use]
    pub fn page(&self) -> &ListingPage {
        &self.page
    }

    #[must_use]
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    #[must_use]
    pub fn vault_root(&self) -> &Path {
        self.vault.root()
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy.is_busy()
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    // ------------------------------------------------------------------
    // Input intents
    // ------------------------------------------------------------------

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn select_up(&mut self) {
        self.page.select_up();
    }

    pub fn select_down(&mut self) {
        self.page.select_down();
    }

    pub fn select_top(&mut self) {
        self.page.select_top();
    }

    pub fn select_bottom(&mut self) {
        self.page.select_bottom();
    }

    /// Enter on the selected row: directories navigate, previewable files
    /// open the preview pane, anything else gets a notice.
    pub fn activate_selected(&mut self) {
        enum Activate {
            Navigate(RelPath),
            Preview(FileEntry),
            Notice(&'static str),
        }

        let action = match self.page.selected_row() {
            Some(Row::Parent(target)) => Activate::Navigate(target.clone()),
            Some(Row::Entry(entry)) if entry.is_dir => Activate::Navigate(entry.path.clone()),
            Some(Row::Entry(entry)) if entry.previewable() => Activate::Preview(entry.clone()),
            Some(Row::Entry(entry)) => Activate::Notice(entry.kind.label()),
            None => return,
        };
        match action {
            Activate::Navigate(target) => self.navigate(target),
            Activate::Preview(entry) => {
                let max_bytes = self.preview_max_bytes;
                self.start_op(OpKind::LoadPreview { entry, max_bytes });
            }
            Activate::Notice(label) => {
                self.view
                    .post_status(format!("No preview for {label} files"), Instant::now());
            }
        }
    }

    pub fn go_to_parent(&mut self) {
        if let Some(parent) = self.page.path().parent() {
            self.navigate(parent);
        }
    }

    /// Reload the current path without touching history.
    pub fn refresh(&mut self) {
        let path = self.page.path().clone();
        self.start_op(OpKind::LoadListing {
            path,
            push_history: false,
        });
    }

    /// Restore the most recent snapshot. No fresh operation runs; work
    /// still in flight belongs to the page being left and is abandoned.
    pub fn back(&mut self) {
        let now = Instant::now();
        let Some(snapshot) = self.history.pop() else {
            self.view.post_status("No earlier page", now);
            return;
        };
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
        self.epoch += 1;
        self.page = snapshot;
        self.view.preview = None;
        self.view.confirm = None;
        self.busy
            .observe(PageSignal::HistoryRestored, now, &mut self.view.indicator);
        info!(path = %self.page.path(), "history restore");
    }

    pub fn request_delete(&mut self) {
        let Some(Row::Entry(entry)) = self.page.selected_row() else {
            return;
        };
        self.view.confirm = Some(ConfirmPrompt {
            name: entry.name.clone(),
            path: entry.path.clone(),
            is_dir: entry.is_dir,
        });
    }

    pub fn confirm_delete(&mut self) {
        if let Some(confirm) = self.view.confirm.take() {
            self.start_op(OpKind::DeleteEntry {
                path: confirm.path,
                name: confirm.name,
            });
        }
    }

    pub fn dismiss_confirm(&mut self) {
        self.view.confirm = None;
    }

    /// Esc: close the topmost surface.
    pub fn close_overlay(&mut self) {
        if self.view.confirm.is_some() {
            self.view.confirm = None;
        } else if self.view.preview.is_some() {
            self.view.preview = None;
        }
    }

    pub fn preview_scroll_up(&mut self, lines: usize) {
        if let Some(pane) = &mut self.view.preview {
            pane.scroll_up(lines);
        }
    }

    pub fn preview_scroll_down(&mut self, lines: usize) {
        if let Some(pane) = &mut self.view.preview {
            pane.scroll_down(lines);
        }
    }

    // ------------------------------------------------------------------
    // Frame hooks
    // ------------------------------------------------------------------

    /// UI tick counter driving spinner animation, ~10Hz independent of
    /// render FPS.
    #[must_use]
    pub fn tick_count(&self) -> usize {
        self.tick
    }

    /// Per-frame upkeep: deferred activation, spinner cadence, status TTL.
    /// The frame loop passes the real clock; tests pass explicit instants.
    pub fn tick(&mut self, now: Instant) {
        if now.duration_since(self.last_ui_tick) >= Duration::from_millis(100) {
            self.last_ui_tick = now;
            self.tick = self.tick.wrapping_add(1);
        }
        self.busy.poll(now, &mut self.view.indicator);
        self.view.indicator.advance_frame(now);
        self.view.expire_status(now);
    }

    /// Drain completed operations. Each drained event settles the busy
    /// period; events from a superseded epoch are dropped without
    /// settling, since the restore already reset the coordinator.
    pub fn process_op_events(&mut self) {
        while let Ok(event) = self.op_rx.try_recv() {
            self.tasks.remove(&event.id);
            if event.epoch != self.epoch {
                debug!(id = event.id, "dropping completion from a superseded page");
                continue;
            }
            let now = Instant::now();
            self.apply_outcome(event.outcome, now);
            self.busy
                .observe(PageSignal::RequestSettled, now, &mut self.view.indicator);
        }
    }

    fn navigate(&mut self, path: RelPath) {
        info!(path = %path, "navigate");
        self.start_op(OpKind::LoadListing {
            path,
            push_history: true,
        });
    }

    fn start_op(&mut self, kind: OpKind) {
        let id = self.next_op_id;
        self.next_op_id += 1;
        debug!(id, epoch = self.epoch, action = kind.action(), "request started");
        let task = ops::spawn(self.vault.clone(), kind, id, self.epoch, self.op_tx.clone());
        self.tasks.insert(id, task);
        self.busy
            .observe(PageSignal::RequestStarted, Instant::now(), &mut self.view.indicator);
    }

    fn apply_outcome(&mut self, outcome: OpOutcome, now: Instant) {
        match outcome {
            OpOutcome::ListingLoaded { page, push_history } => {
                debug!(path = %page.path(), rows = page.len(), "listing loaded");
                if push_history {
                    let outgoing = mem::replace(&mut self.page, page);
                    self.history.push(outgoing);
                } else {
                    self.page = page;
                }
                // The confirm prompt's target row may be gone; the mount
                // comes back with the fresh page.
                self.view.confirm = None;
                self.view.indicator.install();
            }
            OpOutcome::PreviewLoaded(pane) => {
                self.view.preview = Some(pane);
            }
            OpOutcome::EntryDeleted { name } => {
                self.view.post_status(format!("Deleted {name}"), now);
                self.refresh();
            }
            OpOutcome::Failed { action, message } => {
                warn!(action, message, "operation failed");
                self.view
                    .post_error(format!("Could not {action}: {message}"), now);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::App;
    use crate::config::SlurpConfig;
    use crate::listing::Row;
    use crate::vault::Vault;
    use std::fs;
    use std::time::{Duration, Instant};

    fn fixture() -> (tempfile::TempDir, App) {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("inbox")).unwrap();
        fs::write(dir.path().join("inbox/letter.txt"), "dear\n").unwrap();
        fs::write(dir.path().join("junk.txt"), "x").unwrap();
        fs::write(dir.path().join("report.pdf"), [0u8; 8]).unwrap();
        let vault = Vault::open(dir.path()).unwrap();
        let app = App::new(vault, &SlurpConfig::default());
        (dir, app)
    }

    /// Pump the op channel until the busy period closes.
    async fn drain(app: &mut App) {
        for _ in 0..500 {
            app.process_op_events();
            if !app.is_busy() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
        panic!("operation never settled");
    }

    fn select_named(app: &mut App, name: &str) {
        app.select_top();
        let position = app
            .page()
            .rows()
            .iter()
            .position(|row| matches!(row, Row::Entry(e) if e.name == name))
            .unwrap_or_else(|| panic!("no row named {name}"));
        for _ in 0..position {
            app.select_down();
        }
    }

    #[tokio::test]
    async fn refresh_loads_the_root_listing() {
        let (_dir, mut app) = fixture();
        assert!(app.page().is_empty());

        app.refresh();
        assert!(app.is_busy());
        drain(&mut app).await;

        assert!(!app.is_busy());
        assert_eq!(app.page().len(), 3);
        assert!(app.view().indicator.is_present());
        assert!(!app.view().indicator.is_visible());
    }

    #[tokio::test]
    async fn deferred_activation_surfaces_through_tick() {
        let (_dir, mut app) = fixture();
        let t0 = Instant::now();
        app.refresh();
        assert!(app.is_busy());

        app.tick(t0);
        assert!(!app.view().indicator.is_visible());

        // The deadline sits 800ms after the spawn instant, which trails t0
        // by microseconds; a full second past t0 is safely beyond it. The
        // operation itself has long finished, but its completion has not
        // been drained, so the busy period is still open.
        app.tick(t0 + Duration::from_secs(1));
        assert!(app.view().indicator.is_visible());

        drain(&mut app).await;
        assert!(!app.view().indicator.is_visible());
    }

    #[tokio::test]
    async fn navigation_replaces_the_page_and_back_restores_it() {
        let (_dir, mut app) = fixture();
        app.refresh();
        drain(&mut app).await;

        select_named(&mut app, "inbox");
        app.activate_selected();
        drain(&mut app).await;
        assert_eq!(app.page().path().to_string(), "/inbox");
        assert!(matches!(app.page().rows()[0], Row::Parent(_)));

        app.back();
        // Restoration is synchronous: no settle needed, the node is gone.
        assert!(app.page().path().is_root());
        assert!(!app.is_busy());
        assert!(!app.view().indicator.is_present());
    }

    #[tokio::test]
    async fn back_at_the_start_posts_a_notice() {
        let (_dir, mut app) = fixture();
        app.refresh();
        drain(&mut app).await;

        app.back();
        assert!(app.page().path().is_root());
        assert_eq!(app.view().status(), Some(("No earlier page", false)));
        assert!(app.view().indicator.is_present());
    }

    #[tokio::test]
    async fn stale_completions_are_dropped_after_back() {
        let (_dir, mut app) = fixture();
        app.refresh();
        drain(&mut app).await;
        select_named(&mut app, "inbox");
        app.activate_selected();
        drain(&mut app).await;

        // A reload of /inbox is in flight when the user goes back.
        app.refresh();
        assert!(app.is_busy());
        app.back();
        assert!(!app.is_busy());
        assert!(app.page().path().is_root());

        // Give the aborted operation time to have posted its event anyway.
        tokio::time::sleep(Duration::from_millis(20)).await;
        app.process_op_events();
        assert!(app.page().path().is_root());
        assert!(!app.is_busy());
    }

    #[tokio::test]
    async fn fresh_listing_reinstalls_the_indicator_mount() {
        let (_dir, mut app) = fixture();
        app.refresh();
        drain(&mut app).await;
        select_named(&mut app, "inbox");
        app.activate_selected();
        drain(&mut app).await;

        app.back();
        assert!(!app.view().indicator.is_present());

        select_named(&mut app, "inbox");
        app.activate_selected();
        drain(&mut app).await;
        assert!(app.view().indicator.is_present());
    }

    #[tokio::test]
    async fn delete_flow_confirms_removes_and_refreshes() {
        let (dir, mut app) = fixture();
        app.refresh();
        drain(&mut app).await;

        select_named(&mut app, "junk.txt");
        app.request_delete();
        let confirm = app.view().confirm.clone().unwrap();
        assert_eq!(confirm.name, "junk.txt");
        assert!(!confirm.is_dir);

        app.confirm_delete();
        drain(&mut app).await;

        assert!(!dir.path().join("junk.txt").exists());
        assert_eq!(app.page().len(), 2);
        let (status, is_error) = app.view().status().unwrap();
        assert_eq!(status, "Deleted junk.txt");
        assert!(!is_error);
    }

    #[tokio::test]
    async fn declined_delete_keeps_the_file() {
        let (dir, mut app) = fixture();
        app.refresh();
        drain(&mut app).await;

        select_named(&mut app, "junk.txt");
        app.request_delete();
        app.dismiss_confirm();

        assert!(app.view().confirm.is_none());
        assert!(!app.is_busy());
        assert!(dir.path().join("junk.txt").exists());
    }

    #[tokio::test]
    async fn parent_row_is_not_a_delete_target() {
        let (_dir, mut app) = fixture();
        app.refresh();
        drain(&mut app).await;
        select_named(&mut app, "inbox");
        app.activate_selected();
        drain(&mut app).await;

        app.select_top();
        app.request_delete();
        assert!(app.view().confirm.is_none());
    }

    #[tokio::test]
    async fn preview_opens_for_text_files() {
        let (_dir, mut app) = fixture();
        app.refresh();
        drain(&mut app).await;

        select_named(&mut app, "junk.txt");
        app.activate_selected();
        assert!(app.is_busy());
        drain(&mut app).await;

        let pane = app.view().preview.as_ref().unwrap();
        assert_eq!(pane.title(), "junk.txt");
    }

    #[tokio::test]
    async fn nonpreviewable_files_post_a_notice_without_an_operation() {
        let (_dir, mut app) = fixture();
        app.refresh();
        drain(&mut app).await;

        select_named(&mut app, "report.pdf");
        app.activate_selected();

        assert!(!app.is_busy());
        let (status, _) = app.view().status().unwrap();
        assert!(status.contains("No preview"));
    }

    #[tokio::test]
    async fn failures_settle_and_surface_on_the_status_line() {
        let (dir, mut app) = fixture();
        app.refresh();
        drain(&mut app).await;
        select_named(&mut app, "inbox");
        app.activate_selected();
        drain(&mut app).await;

        // The directory vanishes behind the app's back; the reload fails.
        fs::remove_dir_all(dir.path().join("inbox")).unwrap();
        app.refresh();
        drain(&mut app).await;

        assert!(!app.is_busy());
        let (status, is_error) = app.view().status().unwrap();
        assert!(status.starts_with("Could not load listing"));
        assert!(is_error);
    }

    #[tokio::test]
    async fn go_to_parent_matches_the_parent_row() {
        let (_dir, mut app) = fixture();
        app.refresh();
        drain(&mut app).await;
        select_named(&mut app, "inbox");
        app.activate_selected();
        drain(&mut app).await;

        app.go_to_parent();
        drain(&mut app).await;
        assert!(app.page().path().is_root());
    }
}
