use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tempfile::TempDir;
use tokio::sync::mpsc;

use fileferry_core::{
    ConfirmationPolicy, HistoryEntry, ItemKind, OperationKind, OperationRequest, ProgressStatus,
    RecycleBinEntry, StorageItemRef, TransferPair,
};
use fileferry_ops::{
    can_empty_recycle_bin, BannerHandle, ConflictItem, ConfirmationDialog, DeletePrompt,
    DeleteVerdict, HistoryLog, ItemDecision, OperationContext, OperationExecutor, OpsError,
    ProgressEvent, RecycleBinService, Resolution, StatusSink, StdFilesystem,
    OPERATION_CHANNEL_SIZE,
};

/// Status sink that keeps every banner's event stream for inspection.
#[derive(Default)]
struct CollectingStatusSink {
    next_id: AtomicU64,
    receivers: Mutex<Vec<mpsc::Receiver<ProgressEvent>>>,
    removed: AtomicUsize,
    precancel: AtomicBool,
}

impl CollectingStatusSink {
    fn precancelled() -> Self {
        let sink = Self::default();
        sink.precancel.store(true, Ordering::Relaxed);
        sink
    }

    /// Drain all buffered events of the first banner.
    fn events(&self) -> Vec<ProgressEvent> {
        let mut receivers = self.receivers.lock().unwrap();
        let mut events = Vec::new();
        for rx in receivers.iter_mut() {
            while let Ok(event) = rx.try_recv() {
                events.push(event);
            }
        }
        events
    }
}

#[async_trait]
impl StatusSink for CollectingStatusSink {
    async fn add_banner(
        &self,
        _kind: OperationKind,
        _source: Option<&Path>,
        _destination: Option<&Path>,
        total_items: usize,
    ) -> BannerHandle {
        let (tx, rx) = mpsc::channel(OPERATION_CHANNEL_SIZE);
        self.receivers.lock().unwrap().push(rx);
        let handle = BannerHandle {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            events: tx,
            cancellation: tokio_util::sync::CancellationToken::new(),
            total_items,
        };
        if self.precancel.load(Ordering::Relaxed) {
            handle.cancellation.cancel();
        }
        handle
    }

    async fn remove_banner(&self, _id: u64) {
        self.removed.fetch_add(1, Ordering::Relaxed);
    }
}

/// What the scripted dialog answers to a conflict set.
#[derive(Clone)]
enum ConflictScript {
    Cancel,
    AcceptDefaults,
    Accept(Vec<ItemDecision>),
}

struct ScriptedDialog {
    conflicts: Mutex<ConflictScript>,
    conflict_calls: AtomicUsize,
    last_partition: Mutex<Option<(Vec<PathBuf>, Vec<PathBuf>)>>,
    delete_accept: AtomicBool,
    delete_permanently: AtomicBool,
    delete_calls: AtomicUsize,
    last_delete_names: Mutex<Vec<String>>,
    extension_accept: AtomicBool,
}

impl Default for ScriptedDialog {
    fn default() -> Self {
        Self {
            conflicts: Mutex::new(ConflictScript::AcceptDefaults),
            conflict_calls: AtomicUsize::new(0),
            last_partition: Mutex::new(None),
            delete_accept: AtomicBool::new(true),
            delete_permanently: AtomicBool::new(false),
            delete_calls: AtomicUsize::new(0),
            last_delete_names: Mutex::new(Vec::new()),
            extension_accept: AtomicBool::new(true),
        }
    }
}

impl ScriptedDialog {
    fn script_conflicts(&self, script: ConflictScript) {
        *self.conflicts.lock().unwrap() = script;
    }
}

#[async_trait]
impl ConfirmationDialog for ScriptedDialog {
    async fn show_conflicts(
        &self,
        incoming: &[ConflictItem],
        conflicting: &[ConflictItem],
        _kind: OperationKind,
        _forced: bool,
    ) -> Resolution {
        self.conflict_calls.fetch_add(1, Ordering::Relaxed);
        *self.last_partition.lock().unwrap() = Some((
            incoming.iter().map(|i| i.destination.clone()).collect(),
            conflicting.iter().map(|i| i.destination.clone()).collect(),
        ));
        match self.conflicts.lock().unwrap().clone() {
            ConflictScript::Cancel => Resolution::Cancelled,
            ConflictScript::AcceptDefaults => Resolution::Decided(vec![
                ItemDecision::generate_new_name();
                incoming.len() + conflicting.len()
            ]),
            ConflictScript::Accept(decisions) => Resolution::Decided(decisions),
        }
    }

    async fn confirm_delete(&self, items: &[DeletePrompt], _permanently: bool) -> DeleteVerdict {
        self.delete_calls.fetch_add(1, Ordering::Relaxed);
        *self.last_delete_names.lock().unwrap() = items
            .iter()
            .map(|p| p.display_name.to_string())
            .collect();
        DeleteVerdict {
            accepted: self.delete_accept.load(Ordering::Relaxed),
            permanently: self.delete_permanently.load(Ordering::Relaxed),
        }
    }

    async fn confirm_extension_change(&self, _old_name: &str, _new_name: &str) -> bool {
        self.extension_accept.load(Ordering::Relaxed)
    }
}

/// Recycle bin backed by a directory inside the test's tempdir.
struct FakeRecycleBin {
    root: PathBuf,
    supported: bool,
    entries: Mutex<Vec<RecycleBinEntry>>,
    counter: AtomicUsize,
}

impl FakeRecycleBin {
    fn new(root: PathBuf, supported: bool) -> Self {
        fs::create_dir_all(&root).unwrap();
        Self {
            root,
            supported,
            entries: Mutex::new(Vec::new()),
            counter: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl RecycleBinService for FakeRecycleBin {
    async fn is_path_under_recycle_bin(&self, path: &Path) -> bool {
        path.starts_with(&self.root)
    }

    async fn has_recycle_bin(&self, _path: &Path) -> bool {
        self.supported
    }

    async fn enumerate(&self) -> Result<Vec<RecycleBinEntry>, OpsError> {
        Ok(self.entries.lock().unwrap().clone())
    }

    async fn soft_delete(&self, path: &Path) -> Result<Option<PathBuf>, OpsError> {
        let id = self.counter.fetch_add(1, Ordering::Relaxed);
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let recycled = self.root.join(format!("{id}.{name}"));
        fs::rename(path, &recycled).map_err(|e| OpsError::RecycleBin(e.to_string()))?;
        self.entries
            .lock()
            .unwrap()
            .push(RecycleBinEntry::new(recycled.clone(), path));
        Ok(Some(recycled))
    }

    async fn empty_recycle_bin(&self) -> Result<usize, OpsError> {
        let mut entries = self.entries.lock().unwrap();
        for entry in entries.iter() {
            let _ = fs::remove_file(&entry.recycle_path);
        }
        let count = entries.len();
        entries.clear();
        Ok(count)
    }

    async fn restore_all(&self) -> Result<usize, OpsError> {
        let mut entries = self.entries.lock().unwrap();
        for entry in entries.iter() {
            fs::rename(&entry.recycle_path, &entry.original_path)
                .map_err(|e| OpsError::RecycleBin(e.to_string()))?;
        }
        let count = entries.len();
        entries.clear();
        Ok(count)
    }
}

struct TestEnv {
    _tmp: TempDir,
    root: PathBuf,
    sink: Arc<CollectingStatusSink>,
    dialog: Arc<ScriptedDialog>,
    history: Arc<HistoryLog>,
    recycle: Arc<FakeRecycleBin>,
    executor: OperationExecutor,
}

fn env_with(sink: CollectingStatusSink, bin_supported: bool) -> TestEnv {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();
    let sink = Arc::new(sink);
    let dialog = Arc::new(ScriptedDialog::default());
    let history = Arc::new(HistoryLog::default());
    let recycle = Arc::new(FakeRecycleBin::new(root.join("bin"), bin_supported));
    let ctx = OperationContext::new(
        Arc::new(StdFilesystem),
        sink.clone(),
        dialog.clone(),
        history.clone(),
        recycle.clone(),
    );
    TestEnv {
        _tmp: tmp,
        root,
        sink,
        dialog,
        history,
        recycle,
        executor: OperationExecutor::new(ctx),
    }
}

fn env() -> TestEnv {
    env_with(CollectingStatusSink::default(), true)
}

fn write_file(path: &Path, contents: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

fn copy_request(env: &TestEnv, names: &[&str]) -> OperationRequest {
    let dest_dir = env.root.join("dest");
    fs::create_dir_all(&dest_dir).unwrap();
    let pairs = names
        .iter()
        .map(|name| {
            TransferPair::new(
                StorageItemRef::file(env.root.join("src").join(name)),
                dest_dir.join(name),
            )
        })
        .collect();
    OperationRequest::copy(pairs, false)
}

#[tokio::test]
async fn test_collision_free_copy_skips_dialog() {
    let env = env();
    write_file(&env.root.join("src/a.txt"), b"alpha");
    write_file(&env.root.join("src/b.txt"), b"beta");

    let outcome = env
        .executor
        .execute(copy_request(&env, &["a.txt", "b.txt"]))
        .await
        .unwrap();

    assert_eq!(outcome.status, ProgressStatus::Success);
    assert_eq!(outcome.succeeded, 2);
    assert_eq!(env.dialog.conflict_calls.load(Ordering::Relaxed), 0);
    assert_eq!(fs::read(env.root.join("dest/a.txt")).unwrap(), b"alpha");
    assert_eq!(fs::read(env.root.join("dest/b.txt")).unwrap(), b"beta");

    // One history entry covering both completed pairs.
    assert_eq!(env.history.len(), 1);
    let entry = env.history.peek().unwrap();
    assert_eq!(entry.kind, OperationKind::Copy);
    assert_eq!(entry.len(), 2);
}

#[tokio::test]
async fn test_conflicting_copy_invokes_dialog_once_with_partition() {
    let env = env();
    write_file(&env.root.join("src/a.txt"), b"alpha");
    write_file(&env.root.join("src/b.txt"), b"beta");
    // Pre-existing destination for b.txt only.
    write_file(&env.root.join("dest/b.txt"), b"old");

    let outcome = env
        .executor
        .execute(copy_request(&env, &["a.txt", "b.txt"]))
        .await
        .unwrap();

    assert_eq!(outcome.status, ProgressStatus::Success);
    assert_eq!(env.dialog.conflict_calls.load(Ordering::Relaxed), 1);

    let partition = env.dialog.last_partition.lock().unwrap().clone().unwrap();
    assert_eq!(partition.0, vec![env.root.join("dest/a.txt")]);
    assert_eq!(partition.1, vec![env.root.join("dest/b.txt")]);

    // Default decisions generate a new name for the colliding item.
    assert_eq!(fs::read(env.root.join("dest/b.txt")).unwrap(), b"old");
    assert_eq!(fs::read(env.root.join("dest/b (1).txt")).unwrap(), b"beta");
}

#[tokio::test]
async fn test_cancel_at_dialog_leaves_zero_mutations() {
    let env = env();
    write_file(&env.root.join("src/a.txt"), b"alpha");
    write_file(&env.root.join("dest/a.txt"), b"old");
    env.dialog.script_conflicts(ConflictScript::Cancel);

    let outcome = env
        .executor
        .execute(copy_request(&env, &["a.txt"]))
        .await
        .unwrap();

    assert_eq!(outcome.status, ProgressStatus::Cancelled);
    assert_eq!(outcome.succeeded, 0);
    assert_eq!(fs::read(env.root.join("dest/a.txt")).unwrap(), b"old");
    assert!(!env.root.join("dest/a (1).txt").exists());
    assert_eq!(env.history.len(), 0);
    // The in-flight banner was removed.
    assert_eq!(env.sink.removed.load(Ordering::Relaxed), 1);
}

#[tokio::test]
async fn test_custom_name_applied_after_transfer() {
    let env = env();
    write_file(&env.root.join("src/a.txt"), b"alpha");
    write_file(&env.root.join("dest/a.txt"), b"old");
    env.dialog
        .script_conflicts(ConflictScript::Accept(vec![ItemDecision::renamed(
            fileferry_core::CollisionDecision::GenerateNewName,
            "chosen.txt",
        )]));

    let outcome = env
        .executor
        .execute(copy_request(&env, &["a.txt"]))
        .await
        .unwrap();

    assert_eq!(outcome.status, ProgressStatus::Success);
    assert_eq!(fs::read(env.root.join("dest/chosen.txt")).unwrap(), b"alpha");

    // History points at the post-rename destination.
    let entry = env.history.peek().unwrap();
    assert_eq!(entry.destinations[0], env.root.join("dest/chosen.txt"));
}

#[tokio::test]
async fn test_copy_delete_restore_round_trip() {
    let env = env();
    let original = env.root.join("src/a.txt");
    write_file(&original, b"round trip payload");

    env.executor
        .execute(copy_request(&env, &["a.txt"]))
        .await
        .unwrap();
    let copied = env.root.join("dest/a.txt");
    assert!(copied.exists());

    let outcome = env
        .executor
        .execute(OperationRequest::delete(
            vec![StorageItemRef::file(&copied)],
            false,
            ConfirmationPolicy::Never,
        ))
        .await
        .unwrap();
    assert_eq!(outcome.status, ProgressStatus::Success);
    assert!(!copied.exists());

    // Undo the delete through its history entry.
    let delete_entry = env.history.pop().unwrap();
    assert_eq!(delete_entry.kind, OperationKind::Delete);
    let restore = delete_entry.undo_request().unwrap();
    let outcome = env.executor.execute(restore).await.unwrap();

    assert_eq!(outcome.status, ProgressStatus::Success);
    assert_eq!(fs::read(&copied).unwrap(), b"round trip payload");
    assert_eq!(fs::read(&original).unwrap(), b"round trip payload");
}

#[tokio::test]
async fn test_rename_to_current_name_is_noop() {
    let env = env();
    let path = env.root.join("src/a.txt");
    write_file(&path, b"alpha");

    let outcome = env
        .executor
        .execute(OperationRequest::rename(StorageItemRef::file(&path), "a.txt"))
        .await
        .unwrap();

    assert_eq!(outcome.status, ProgressStatus::Success);
    assert_eq!(fs::read(&path).unwrap(), b"alpha");
    assert_eq!(env.dialog.conflict_calls.load(Ordering::Relaxed), 0);
}

#[tokio::test]
async fn test_rename_rejects_reserved_name_before_io() {
    let env = env();
    let path = env.root.join("src/a.txt");
    write_file(&path, b"alpha");

    let result = env
        .executor
        .execute(OperationRequest::rename(StorageItemRef::file(&path), "con.txt"))
        .await;

    assert!(matches!(result, Err(OpsError::NameNotAllowed(_))));
    assert!(path.exists());
}

#[tokio::test]
async fn test_extension_change_declined_keeps_name() {
    let env = env();
    let path = env.root.join("src/a.txt");
    write_file(&path, b"alpha");
    env.dialog.extension_accept.store(false, Ordering::Relaxed);

    let outcome = env
        .executor
        .execute(OperationRequest::rename(StorageItemRef::file(&path), "a.md"))
        .await
        .unwrap();

    assert_eq!(outcome.status, ProgressStatus::Cancelled);
    assert!(path.exists());
    assert!(!env.root.join("src/a.md").exists());
}

#[tokio::test]
async fn test_extension_change_accepted_renames() {
    let env = env();
    let path = env.root.join("src/a.txt");
    write_file(&path, b"alpha");

    let outcome = env
        .executor
        .execute(OperationRequest::rename(StorageItemRef::file(&path), "a.md"))
        .await
        .unwrap();

    assert_eq!(outcome.status, ProgressStatus::Success);
    assert!(env.root.join("src/a.md").exists());
    assert_eq!(env.history.len(), 1);
}

#[tokio::test]
async fn test_delete_with_always_policy_confirms_and_recycles() {
    let env = env();
    let path = env.root.join("src/a.txt");
    write_file(&path, b"alpha");

    let outcome = env
        .executor
        .execute(OperationRequest::delete(
            vec![StorageItemRef::file(&path)],
            false,
            ConfirmationPolicy::Always,
        ))
        .await
        .unwrap();

    // One confirmation, the item reaches the bin, one history entry.
    assert_eq!(env.dialog.delete_calls.load(Ordering::Relaxed), 1);
    assert_eq!(outcome.status, ProgressStatus::Success);
    assert!(!path.exists());
    assert_eq!(env.recycle.entries.lock().unwrap().len(), 1);
    assert_eq!(env.history.len(), 1);
    let entry = env.history.peek().unwrap();
    assert_eq!(entry.sources[0].path, path);

    // The batch transitioned InProgress -> Success and finished.
    let events = env.sink.events();
    let item_statuses: Vec<ProgressStatus> = events
        .iter()
        .filter_map(|e| match e {
            ProgressEvent::Item { status, .. } => Some(*status),
            ProgressEvent::Finished(_) => None,
        })
        .collect();
    assert_eq!(
        item_statuses,
        vec![ProgressStatus::InProgress, ProgressStatus::Success]
    );
    assert!(matches!(
        events.last(),
        Some(ProgressEvent::Finished(outcome)) if outcome.status == ProgressStatus::Success
    ));
}

#[tokio::test]
async fn test_declined_delete_confirmation_cancels() {
    let env = env();
    let path = env.root.join("src/a.txt");
    write_file(&path, b"alpha");
    env.dialog.delete_accept.store(false, Ordering::Relaxed);

    let outcome = env
        .executor
        .execute(OperationRequest::delete(
            vec![StorageItemRef::file(&path)],
            false,
            ConfirmationPolicy::Always,
        ))
        .await
        .unwrap();

    assert_eq!(outcome.status, ProgressStatus::Cancelled);
    assert!(path.exists());
    assert_eq!(env.history.len(), 0);
}

#[tokio::test]
async fn test_unsupported_bin_forces_permanent_delete() {
    let env = env_with(CollectingStatusSink::default(), false);
    let path = env.root.join("src/a.txt");
    write_file(&path, b"alpha");

    let outcome = env
        .executor
        .execute(OperationRequest::delete(
            vec![StorageItemRef::file(&path)],
            false,
            ConfirmationPolicy::Never,
        ))
        .await
        .unwrap();

    assert_eq!(outcome.status, ProgressStatus::Success);
    assert!(!path.exists());
    // Nothing went through the bin and nothing is undoable.
    assert_eq!(env.recycle.entries.lock().unwrap().len(), 0);
    assert_eq!(env.history.len(), 0);
}

#[tokio::test]
async fn test_items_already_in_bin_show_recovered_names() {
    let env = env();
    let path = env.root.join("src/report.pdf");
    write_file(&path, b"pdf");

    // Soft-delete first so the item sits inside the bin.
    env.executor
        .execute(OperationRequest::delete(
            vec![StorageItemRef::file(&path)],
            false,
            ConfirmationPolicy::Never,
        ))
        .await
        .unwrap();
    let recycled = env.recycle.entries.lock().unwrap()[0].recycle_path.clone();

    // Deleting the recycled item again lists its original name.
    env.executor
        .execute(OperationRequest::delete(
            vec![StorageItemRef::file(&recycled)],
            false,
            ConfirmationPolicy::Always,
        ))
        .await
        .unwrap();

    let names = env.dialog.last_delete_names.lock().unwrap().clone();
    assert_eq!(names, vec!["report.pdf".to_string()]);
    assert!(!recycled.exists());
}

#[tokio::test]
async fn test_partial_failure_marks_batch_failed() {
    let env = env();
    write_file(&env.root.join("src/a.txt"), b"alpha");
    // b.txt never created.

    let outcome = env
        .executor
        .execute(copy_request(&env, &["a.txt", "b.txt"]))
        .await
        .unwrap();

    assert_eq!(outcome.status, ProgressStatus::Failed);
    assert_eq!(outcome.succeeded, 1);
    assert_eq!(outcome.failed, 1);
    assert_eq!(outcome.failures.len(), 1);

    // The partial history entry reflects only the completed sub-item.
    assert_eq!(env.history.len(), 1);
    let entry = env.history.peek().unwrap();
    assert_eq!(entry.len(), 1);
    assert_eq!(entry.sources[0].path, env.root.join("src/a.txt"));
}

#[tokio::test]
async fn test_cancelled_token_stops_batch_before_items() {
    let env = env_with(CollectingStatusSink::precancelled(), true);
    write_file(&env.root.join("src/a.txt"), b"alpha");

    let outcome = env
        .executor
        .execute(copy_request(&env, &["a.txt"]))
        .await
        .unwrap();

    assert_eq!(outcome.status, ProgressStatus::Cancelled);
    assert_eq!(outcome.succeeded, 0);
    assert!(!env.root.join("dest/a.txt").exists());
    assert_eq!(env.history.len(), 0);
}

#[tokio::test]
async fn test_move_clears_selection_and_relocates() {
    let env = env();
    write_file(&env.root.join("src/a.txt"), b"alpha");
    let cleared = Arc::new(AtomicBool::new(false));
    let flag = cleared.clone();

    let ctx = env
        .executor
        .context()
        .clone()
        .with_selection_reset(Arc::new(move || flag.store(true, Ordering::Relaxed)));
    let executor = OperationExecutor::new(ctx);

    let dest = env.root.join("dest/a.txt");
    fs::create_dir_all(dest.parent().unwrap()).unwrap();
    let outcome = executor
        .execute(OperationRequest::move_to(
            vec![TransferPair::new(
                StorageItemRef::file(env.root.join("src/a.txt")),
                dest.clone(),
            )],
            false,
        ))
        .await
        .unwrap();

    assert_eq!(outcome.status, ProgressStatus::Success);
    assert!(cleared.load(Ordering::Relaxed));
    assert!(!env.root.join("src/a.txt").exists());
    assert_eq!(fs::read(&dest).unwrap(), b"alpha");

    let entry = env.history.peek().unwrap();
    assert_eq!(entry.kind, OperationKind::Move);
}

#[cfg(unix)]
#[tokio::test]
async fn test_shortcut_uses_fallback_suffix() {
    let env = env();
    let target = env.root.join("src/a.txt");
    write_file(&target, b"alpha");
    let dest_dir = env.root.join("dest");
    fs::create_dir_all(&dest_dir).unwrap();

    let outcome = env
        .executor
        .execute(OperationRequest::CreateShortcut {
            sources: vec![
                StorageItemRef::file(&target),
                StorageItemRef::virtual_item("ghost.txt", ItemKind::File),
            ],
            destination_dir: dest_dir.clone(),
            show_dialog: false,
        })
        .await
        .unwrap();

    // The virtual source was filtered out before the batch started.
    assert_eq!(outcome.total, 1);
    assert_eq!(outcome.succeeded, 1);
    let link = dest_dir.join("a.txt - Shortcut");
    assert_eq!(fs::read_link(&link).unwrap(), target);
}

#[tokio::test]
async fn test_create_validates_then_creates() {
    let env = env();
    let dir = env.root.join("src/newdir");

    let outcome = env
        .executor
        .execute(OperationRequest::Create {
            item: StorageItemRef::directory(&dir),
        })
        .await
        .unwrap();
    assert_eq!(outcome.status, ProgressStatus::Success);
    assert!(dir.is_dir());

    let result = env
        .executor
        .execute(OperationRequest::Create {
            item: StorageItemRef::file(env.root.join("src/NUL")),
        })
        .await;
    assert!(matches!(result, Err(OpsError::NameNotAllowed(_))));
    assert!(!env.root.join("src/NUL").exists());
}

#[tokio::test]
async fn test_empty_recycle_bin_gating() {
    let env = env();

    assert!(!can_empty_recycle_bin(env.recycle.as_ref(), false).await);
    assert!(can_empty_recycle_bin(env.recycle.as_ref(), true).await);

    let path = env.root.join("src/a.txt");
    write_file(&path, b"alpha");
    env.recycle.soft_delete(&path).await.unwrap();

    assert!(can_empty_recycle_bin(env.recycle.as_ref(), false).await);
    assert_eq!(env.recycle.empty_recycle_bin().await.unwrap(), 1);
    assert!(!can_empty_recycle_bin(env.recycle.as_ref(), false).await);
}

#[tokio::test]
async fn test_restore_all_returns_entries_home() {
    let env = env();
    let a = env.root.join("src/a.txt");
    let b = env.root.join("src/b.txt");
    write_file(&a, b"alpha");
    write_file(&b, b"beta");
    env.recycle.soft_delete(&a).await.unwrap();
    env.recycle.soft_delete(&b).await.unwrap();
    assert!(!a.exists());

    assert_eq!(env.recycle.restore_all().await.unwrap(), 2);
    assert!(a.exists());
    assert!(b.exists());
}

#[tokio::test]
async fn test_history_undo_request_reverses_move() {
    let env = env();
    write_file(&env.root.join("src/a.txt"), b"alpha");
    let dest = env.root.join("dest/a.txt");
    fs::create_dir_all(dest.parent().unwrap()).unwrap();

    env.executor
        .execute(OperationRequest::move_to(
            vec![TransferPair::new(
                StorageItemRef::file(env.root.join("src/a.txt")),
                dest.clone(),
            )],
            false,
        ))
        .await
        .unwrap();

    let entry: HistoryEntry = env.history.pop().unwrap();
    let undo = entry.undo_request().unwrap();
    env.executor.execute(undo).await.unwrap();

    assert!(env.root.join("src/a.txt").exists());
    assert!(!dest.exists());
}
