//! code-launcher library
//!
//! Discovers recently opened editor workspaces and SSH host aliases so a
//! launcher front end can search them and open the chosen one.
//!
//! Both sources sit behind a five-minute read-through cache:
//! - [`WorkspaceCatalog`] scans the editor's `workspaceStorage` directory.
//! - [`HostConfigCatalog`] parses the user's `~/.ssh/config`.

pub mod cache;
pub mod config;
pub mod ssh;
pub mod workspace;

pub use cache::{Clock, SystemClock, TimedCache, CACHE_TTL};
pub use ssh::{HostConfigCatalog, HostEntry};
pub use workspace::{ProjectEntry, RemoteInfo, RemoteKind, SkipReason, WorkspaceCatalog};
