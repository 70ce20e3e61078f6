//! Recently opened editor workspaces

pub mod catalog;
pub mod folder_uri;
pub mod project;
pub mod record;

pub use catalog::{scan_workspace_storage, SkipReason, WorkspaceCatalog, WorkspaceScan};
pub use folder_uri::{FolderRef, RemoteInfo, RemoteKind};
pub use project::ProjectEntry;
