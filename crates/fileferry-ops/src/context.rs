//! Collaborator contracts and the per-session operation context.

use std::io;
use std::path::Path;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use compact_str::CompactString;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use fileferry_core::{Filesystem, HistoryEntry, NamingPolicy, OperationKind, StorageItemRef};

use crate::collision::{ConflictItem, Resolution};
use crate::recycle::RecycleBinService;
use crate::status::StatusSink;

/// Callback that clears the active item selection in the frontend.
pub type SelectionHook = Arc<dyn Fn() + Send + Sync>;

/// One item of a consolidated delete confirmation.
#[derive(Debug, Clone)]
pub struct DeletePrompt {
    /// The item to be deleted.
    pub item: StorageItemRef,
    /// Name shown to the user; for items already inside the recycle bin
    /// this is the recovered original display name.
    pub display_name: CompactString,
    /// Whether the item already lives inside the recycle bin.
    pub already_recycled: bool,
}

/// Result of a delete confirmation.
#[derive(Debug, Clone, Copy)]
pub struct DeleteVerdict {
    /// Whether the user accepted the deletion.
    pub accepted: bool,
    /// Possibly adjusted permanence flag.
    pub permanently: bool,
}

/// User-facing confirmation collaborator.
#[async_trait]
pub trait ConfirmationDialog: Send + Sync {
    /// Present a batch's collision set, partitioned into non-conflicting
    /// (`incoming`) and conflicting items. The returned resolution either
    /// cancels the batch or carries one decision per source item,
    /// index-aligned with the source list.
    async fn show_conflicts(
        &self,
        incoming: &[ConflictItem],
        conflicting: &[ConflictItem],
        kind: OperationKind,
        forced: bool,
    ) -> Resolution;

    /// Present a consolidated delete confirmation listing every item.
    async fn confirm_delete(&self, items: &[DeletePrompt], permanently: bool) -> DeleteVerdict;

    /// Ask whether a file's extension change is intended. Returning
    /// `false` keeps the old extension by not renaming at all.
    async fn confirm_extension_change(&self, old_name: &str, new_name: &str) -> bool;
}

/// Undo history collaborator. Appends are fire-and-forget.
pub trait HistoryStore: Send + Sync {
    fn add_history(&self, entry: HistoryEntry);
}

/// OS jump-list collaborator. Calls are best-effort; the engine logs and
/// ignores failures.
pub trait JumpListService: Send + Sync {
    fn remove_folder(&self, path: &Path) -> io::Result<()>;
}

/// Jump-list service for platforms without one.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopJumpList;

impl JumpListService for NoopJumpList {
    fn remove_folder(&self, _path: &Path) -> io::Result<()> {
        Ok(())
    }
}

/// Live naming settings.
///
/// The policy may change while operations are running; each validation
/// call takes a [`NamingPolicy`] snapshot so one batch sees one value.
#[derive(Debug, Default)]
pub struct NamingSettings {
    policy: RwLock<NamingPolicy>,
}

impl NamingSettings {
    /// Create settings with an initial policy.
    pub fn new(policy: NamingPolicy) -> Self {
        Self {
            policy: RwLock::new(policy),
        }
    }

    /// Snapshot the current policy.
    pub fn snapshot(&self) -> NamingPolicy {
        self.policy
            .read()
            .map(|p| p.clone())
            .unwrap_or_default()
    }

    /// Replace the policy.
    pub fn replace(&self, policy: NamingPolicy) {
        if let Ok(mut guard) = self.policy.write() {
            *guard = policy;
        }
    }
}

/// Engine settings that do not change per request.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into))]
pub struct ExecutorSettings {
    /// Ask before changing a file's extension during rename.
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub confirm_extension_change: bool,

    /// Shortcut naming template with a `{}` placeholder for the source
    /// name. When unset, "<name> - Shortcut" is used.
    #[builder(default)]
    #[serde(default)]
    pub shortcut_name_template: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Default for ExecutorSettings {
    fn default() -> Self {
        Self {
            confirm_extension_change: true,
            shortcut_name_template: None,
        }
    }
}

impl ExecutorSettings {
    /// Create a settings builder.
    pub fn builder() -> ExecutorSettingsBuilder {
        ExecutorSettingsBuilder::default()
    }
}

/// Everything one batch needs, owned by the caller's scope and passed
/// into each operation call. There is no global state; two windows with
/// two contexts cannot observe each other.
#[derive(Clone)]
pub struct OperationContext {
    /// Host filesystem capability.
    pub fs: Arc<dyn Filesystem>,
    /// Status-center sink.
    pub status: Arc<dyn StatusSink>,
    /// Confirmation dialogs.
    pub dialog: Arc<dyn ConfirmationDialog>,
    /// Undo history.
    pub history: Arc<dyn HistoryStore>,
    /// Recycle bin.
    pub recycle: Arc<dyn RecycleBinService>,
    /// OS jump list.
    pub jump_list: Arc<dyn JumpListService>,
    /// Live naming settings.
    pub naming: Arc<NamingSettings>,
    /// Optional selection-clear hook, invoked before a move starts.
    pub selection_reset: Option<SelectionHook>,
    /// Engine settings.
    pub settings: ExecutorSettings,
}

impl OperationContext {
    /// Create a context with default jump list, naming and settings.
    pub fn new(
        fs: Arc<dyn Filesystem>,
        status: Arc<dyn StatusSink>,
        dialog: Arc<dyn ConfirmationDialog>,
        history: Arc<dyn HistoryStore>,
        recycle: Arc<dyn RecycleBinService>,
    ) -> Self {
        Self {
            fs,
            status,
            dialog,
            history,
            recycle,
            jump_list: Arc::new(NoopJumpList),
            naming: Arc::new(NamingSettings::default()),
            selection_reset: None,
            settings: ExecutorSettings::default(),
        }
    }

    /// Use a specific jump-list service.
    pub fn with_jump_list(mut self, jump_list: Arc<dyn JumpListService>) -> Self {
        self.jump_list = jump_list;
        self
    }

    /// Use specific naming settings.
    pub fn with_naming(mut self, naming: Arc<NamingSettings>) -> Self {
        self.naming = naming;
        self
    }

    /// Install a selection-clear hook.
    pub fn with_selection_reset(mut self, hook: SelectionHook) -> Self {
        self.selection_reset = Some(hook);
        self
    }

    /// Use specific engine settings.
    pub fn with_settings(mut self, settings: ExecutorSettings) -> Self {
        self.settings = settings;
        self
    }
}
