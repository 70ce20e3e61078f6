//! OpenSSH client config parsing
//!
//! Only the keywords a launcher needs are read: `Host`, `HostName`, `User`,
//! `Port` and `IdentityFile`. Everything else, including `Match` blocks, is
//! ignored.

/// One `Host` block from the SSH config
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostEntry {
    /// The name used to connect: `ssh <alias>`
    pub alias: String,
    pub host_name: Option<String>,
    pub user: Option<String>,
    /// Any integer is kept as written; range checks are left to `ssh`
    pub port: Option<i32>,
    pub identity_file: Option<String>,
}

impl HostEntry {
    fn new(alias: String) -> Self {
        Self {
            alias,
            ..Default::default()
        }
    }

    /// `user@hostname`, or just the hostname, falling back to the alias
    pub fn display_label(&self) -> String {
        let host = self.host_name.as_deref().unwrap_or(&self.alias);
        match &self.user {
            Some(user) => format!("{}@{}", user, host),
            None => host.to_string(),
        }
    }

    /// Whether the alias is a wildcard pattern rather than a connectable host
    pub fn is_pattern(&self) -> bool {
        self.alias.contains(['*', '?', '!'])
    }

    /// Case-insensitive substring match on alias or hostname
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        query.is_empty()
            || self.alias.to_lowercase().contains(&query)
            || self
                .host_name
                .as_ref()
                .is_some_and(|h| h.to_lowercase().contains(&query))
    }
}

/// Parse SSH config text into host entries, in file order
pub fn parse_config(content: &str) -> Vec<HostEntry> {
    let mut entries = Vec::new();
    let mut current: Option<HostEntry> = None;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((keyword, value)) = split_keyword(line) else {
            continue;
        };

        if keyword.eq_ignore_ascii_case("host") {
            if let Some(entry) = current.take() {
                entries.push(entry);
            }
            current = Some(HostEntry::new(value));
            continue;
        }

        // Values before the first Host line have nothing to attach to
        let Some(entry) = current.as_mut() else {
            continue;
        };

        match keyword.to_ascii_lowercase().as_str() {
            "hostname" => entry.host_name = Some(value),
            "user" => entry.user = Some(value),
            "port" => {
                if let Ok(port) = value.parse::<i32>() {
                    entry.port = Some(port);
                } else {
                    tracing::debug!("Ignoring invalid port {:?} for host {}", value, entry.alias);
                }
            }
            "identityfile" => entry.identity_file = Some(value),
            _ => {}
        }
    }

    if let Some(entry) = current {
        entries.push(entry);
    }

    entries
}

/// Split `Keyword value words` or `Keyword=value` into keyword and value
///
/// Value words are rejoined with single spaces and surrounding double quotes
/// are removed. Lines without a value yield `None`.
fn split_keyword(line: &str) -> Option<(&str, String)> {
    let end = line.find(|c: char| c.is_whitespace() || c == '=')?;
    let (keyword, rest) = line.split_at(end);

    let rest = rest.trim_start();
    let rest = rest.strip_prefix('=').unwrap_or(rest);
    let value = rest.split_whitespace().collect::<Vec<_>>().join(" ");
    let value = unquote(&value).to_string();

    if keyword.is_empty() || value.is_empty() {
        return None;
    }
    Some((keyword, value))
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiple_hosts() {
        let entries = parse_config(
            "Host build\n  HostName 10.0.0.5\n  User ci\nHost home\n  HostName 192.168.1.2\n",
        );
        assert_eq!(entries.len(), 2);

        assert_eq!(entries[0].alias, "build");
        assert_eq!(entries[0].host_name.as_deref(), Some("10.0.0.5"));
        assert_eq!(entries[0].user.as_deref(), Some("ci"));
        assert_eq!(entries[0].display_label(), "ci@10.0.0.5");

        assert_eq!(entries[1].alias, "home");
        assert_eq!(entries[1].host_name.as_deref(), Some("192.168.1.2"));
        assert!(entries[1].user.is_none());
        assert_eq!(entries[1].display_label(), "192.168.1.2");
    }

    #[test]
    fn test_all_fields() {
        let entries = parse_config(
            r#"
# work box
Host work
    HostName work.example.com
    User alice
    Port 2222
    IdentityFile ~/.ssh/id_ed25519
"#,
        );
        assert_eq!(
            entries,
            vec![HostEntry {
                alias: "work".to_string(),
                host_name: Some("work.example.com".to_string()),
                user: Some("alice".to_string()),
                port: Some(2222),
                identity_file: Some("~/.ssh/id_ed25519".to_string()),
            }]
        );
    }

    #[test]
    fn test_malformed_port_is_ignored() {
        let entries = parse_config("Host a\n  Port abc\n  User bob\n");
        assert_eq!(entries.len(), 1);
        assert!(entries[0].port.is_none());
        assert_eq!(entries[0].user.as_deref(), Some("bob"));

        let entries = parse_config("Host a\n  Port 22.5\n");
        assert!(entries[0].port.is_none());
    }

    #[test]
    fn test_port_outside_tcp_range_is_kept() {
        let entries = parse_config("Host a\n  Port 70000\nHost b\n  Port -1\n");
        assert_eq!(entries[0].port, Some(70000));
        assert_eq!(entries[1].port, Some(-1));
    }

    #[test]
    fn test_keywords_case_insensitive() {
        let entries = parse_config("HOST a\n  hostname A.example\n  USER root\n  pOrT 22\n");
        assert_eq!(entries[0].host_name.as_deref(), Some("A.example"));
        assert_eq!(entries[0].user.as_deref(), Some("root"));
        assert_eq!(entries[0].port, Some(22));
    }

    #[test]
    fn test_values_before_first_host_are_ignored() {
        let entries = parse_config("User nobody\nHostName orphan\nHost a\n");
        assert_eq!(entries, vec![HostEntry::new("a".to_string())]);
    }

    #[test]
    fn test_multi_word_values() {
        let entries = parse_config(
            "Host a b\n  IdentityFile   C:\\Users\\Me\\My Keys\\id_rsa\n",
        );
        assert_eq!(entries[0].alias, "a b");
        assert_eq!(
            entries[0].identity_file.as_deref(),
            Some("C:\\Users\\Me\\My Keys\\id_rsa")
        );
    }

    #[test]
    fn test_equals_syntax_and_quotes() {
        let entries =
            parse_config("Host=a\n  HostName = a.example\n  IdentityFile \"~/my key\"\n");
        assert_eq!(entries[0].alias, "a");
        assert_eq!(entries[0].host_name.as_deref(), Some("a.example"));
        assert_eq!(entries[0].identity_file.as_deref(), Some("~/my key"));
    }

    #[test]
    fn test_comments_blank_and_unknown_lines() {
        let entries = parse_config(
            "\n   # comment\nHost a\n\n  ForwardAgent yes\n  # HostName nope\n  Host\n",
        );
        assert_eq!(entries, vec![HostEntry::new("a".to_string())]);
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_config("").is_empty());
        assert!(parse_config("# only comments\n").is_empty());
    }

    #[test]
    fn test_display_label_fallbacks() {
        let mut entry = HostEntry::new("alias".to_string());
        assert_eq!(entry.display_label(), "alias");

        entry.user = Some("me".to_string());
        assert_eq!(entry.display_label(), "me@alias");

        entry.host_name = Some("h.example".to_string());
        assert_eq!(entry.display_label(), "me@h.example");
    }

    #[test]
    fn test_is_pattern() {
        assert!(HostEntry::new("*".to_string()).is_pattern());
        assert!(HostEntry::new("*.internal".to_string()).is_pattern());
        assert!(HostEntry::new("web? !web3".to_string()).is_pattern());
        assert!(!HostEntry::new("web1".to_string()).is_pattern());
    }

    #[test]
    fn test_matches() {
        let mut entry = HostEntry::new("build".to_string());
        entry.host_name = Some("CI.Example.com".to_string());
        assert!(entry.matches(""));
        assert!(entry.matches("BUI"));
        assert!(entry.matches("example"));
        assert!(!entry.matches("prod"));
    }
}
