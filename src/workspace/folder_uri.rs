//! Folder reference classification
//!
//! `workspace.json` stores the opened folder as a URI:
//! - `file:///home/me/project` or `file:///c%3A/Users/me/project` for local folders
//! - `vscode-remote://ssh-remote%2Bhost/home/me/project` for remote ones

use percent_encoding::percent_decode_str;
use std::path::{Component, Path, PathBuf};
use url::Url;

use super::SkipReason;

const LOCAL_SCHEME: &str = "file://";
const REMOTE_SCHEME: &str = "vscode-remote://";

/// Remote connection type for vscode-remote:// URLs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteKind {
    Tunnel,
    SshRemote,
    DevContainer,
    Wsl,
    Unknown(String),
}

impl RemoteKind {
    fn parse(s: &str) -> Self {
        match s {
            "tunnel" => Self::Tunnel,
            "ssh-remote" => Self::SshRemote,
            "dev-container" => Self::DevContainer,
            "wsl" => Self::Wsl,
            other => Self::Unknown(other.to_string()),
        }
    }
}

/// Which remote a vscode-remote:// folder lives on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteInfo {
    pub kind: RemoteKind,
    /// Remote host, tunnel or distro name
    pub host: String,
    /// Decoded URI authority, e.g. `ssh-remote+buildbox`
    pub authority: String,
}

impl RemoteInfo {
    /// Value for the editor's `--remote` flag
    ///
    /// This is the full authority, so a dev container reached over SSH keeps
    /// its `dev-container+{config}@ssh-remote+host` form.
    pub fn launch_arg(&self) -> &str {
        &self.authority
    }
}

/// A classified folder reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FolderRef {
    /// Local directory in platform path form (not yet checked for existence)
    Local(PathBuf),
    /// Remote folder, kept as the fully percent-decoded URI
    Remote {
        uri: String,
        remote: Option<RemoteInfo>,
    },
}

impl FolderRef {
    /// Classify a raw folder reference from a workspace record
    pub fn parse(folder: &str) -> Result<Self, SkipReason> {
        let folder = folder.trim();

        if let Some(rest) = strip_prefix_ignore_case(folder, LOCAL_SCHEME) {
            return local_path(rest).map(Self::Local);
        }

        if strip_prefix_ignore_case(folder, REMOTE_SCHEME).is_some() {
            let uri = percent_decode_str(folder).decode_utf8_lossy().into_owned();
            return Ok(Self::Remote {
                uri,
                remote: remote_info(folder),
            });
        }

        Err(SkipReason::UnsupportedScheme(folder.to_string()))
    }
}

/// Last `/`-delimited segment of a decoded remote URI
pub fn remote_name(uri: &str) -> &str {
    uri.trim_end_matches('/').rsplit('/').next().unwrap_or(uri)
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    s.get(..prefix.len())
        .filter(|head| head.eq_ignore_ascii_case(prefix))
        .map(|_| &s[prefix.len()..])
}

/// Convert the part after `file://` into a local path
fn local_path(rest: &str) -> Result<PathBuf, SkipReason> {
    let (authority, path) = match rest.find('/') {
        Some(0) => ("", rest),
        Some(idx) => rest.split_at(idx),
        None => (rest, ""),
    };
    let path = percent_decode_str(path).decode_utf8_lossy();
    let authority = percent_decode_str(authority).decode_utf8_lossy();

    if path.is_empty() {
        return Err(SkipReason::InvalidLocalPath(rest.to_string()));
    }

    #[cfg(windows)]
    {
        Ok(PathBuf::from(windows_path(&authority, &path)))
    }

    #[cfg(not(windows))]
    {
        if !authority.is_empty() && !authority.eq_ignore_ascii_case("localhost") {
            // UNC-style share; no local equivalent off Windows
            return Err(SkipReason::InvalidLocalPath(rest.to_string()));
        }
        Ok(normalize_lexically(Path::new(&*path)))
    }
}

/// Build a Windows path from a decoded file URI authority and path
///
/// `/c:/Users/./me//` becomes `C:\Users\me`; a non-local authority becomes
/// a UNC share (`\\server\share\dir`).
#[cfg_attr(not(windows), allow(dead_code))]
fn windows_path(authority: &str, path: &str) -> String {
    let path = path.replace('/', "\\");

    if !authority.is_empty() && !authority.eq_ignore_ascii_case("localhost") {
        let segments = collapse_segments(&path, '\\');
        return format!("\\\\{}\\{}", authority, segments.join("\\"))
            .trim_end_matches('\\')
            .to_string();
    }

    let path = normalize_drive_letter(path.trim_start_matches('\\'));
    let (drive, rest) = match path.as_bytes() {
        [letter, b':', ..] if letter.is_ascii_alphabetic() => path.split_at(2),
        _ => ("", path.as_str()),
    };
    // Drive roots keep their separator (`C:\`)
    format!("{}\\{}", drive, collapse_segments(rest, '\\').join("\\"))
}

/// Rebuild a path from its components, resolving `.` and `..` lexically
///
/// Repeated and trailing separators disappear along the way. `..` at the root
/// stays at the root. Symlinks are not followed.
#[cfg_attr(windows, allow(dead_code))]
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// Split on `sep`, dropping empty and `.` segments and resolving `..`
#[cfg_attr(not(windows), allow(dead_code))]
fn collapse_segments(path: &str, sep: char) -> Vec<&str> {
    let mut segments = Vec::new();
    for segment in path.split(sep) {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            segment => segments.push(segment),
        }
    }
    segments
}

/// Uppercase the drive letter of a Windows path (c:\foo -> C:\foo)
#[cfg_attr(not(windows), allow(dead_code))]
fn normalize_drive_letter(path: &str) -> String {
    let bytes = path.as_bytes();
    if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
        let mut normalized = String::with_capacity(path.len());
        normalized.push(bytes[0].to_ascii_uppercase() as char);
        normalized.push_str(&path[1..]);
        normalized
    } else {
        path.to_string()
    }
}

/// Decode the remote type and host from a vscode-remote:// authority
///
/// Complex format: dev-container+{config}@ssh-remote+host/path
///   - username = dev-container+{config}
///   - host = ssh-remote+host
fn remote_info(folder: &str) -> Option<RemoteInfo> {
    let url = Url::parse(folder).ok()?;

    let username = percent_decode_str(url.username()).decode_utf8_lossy();
    let host = percent_decode_str(url.host_str()?).decode_utf8_lossy();
    let authority = if username.is_empty() {
        host.to_string()
    } else {
        format!("{}@{}", username, host)
    };

    if username.starts_with("dev-container+") {
        let host = host.split('+').nth(1).unwrap_or("container").to_string();
        return Some(RemoteInfo {
            kind: RemoteKind::DevContainer,
            host,
            authority,
        });
    }

    let (kind, name) = host.split_once('+')?;
    Some(RemoteInfo {
        kind: RemoteKind::parse(kind),
        host: name.to_string(),
        authority,
    })
}
