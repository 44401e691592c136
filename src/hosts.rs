//! Managed block in the hosts file: build, detect, add, remove.

use anyhow::Result;

use crate::platform::HostsEditor;

/// Hosts served by WhatsApp. Each is also blocked with a "www." prefix.
pub const DOMAINS: &[&str] = &[
    "whatsapp.com",
    "www.whatsapp.com",
    "web.whatsapp.com",
    "static.whatsapp.net",
    "whatsapp.net",
    "mmg.whatsapp.net",
    "whatsapp-cdn.net",
    "whatsapp.net.edgesuite.net",
];

pub const START_MARKER: &str = "# >>> BLOQUEO_WHATSAPP_INICIO >>>";
pub const END_MARKER: &str = "# <<< BLOQUEO_WHATSAPP_FIN <<<";

/// Non-routable address every blocked host is mapped to.
pub const BLOCK_ADDRESS: &str = "0.0.0.0";

/// Outcome of activate/deactivate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockChange {
    /// File was rewritten.
    Applied,
    /// Nothing to do; file untouched.
    Unchanged,
}

/// Block is present when both markers are.
pub fn is_blocked(content: &str) -> bool {
    content.contains(START_MARKER) && content.contains(END_MARKER)
}

/// Managed block text, newline-terminated.
pub fn build_block() -> String {
    let mut lines = Vec::with_capacity(DOMAINS.len() * 2 + 2);
    lines.push(START_MARKER.to_string());
    for domain in DOMAINS {
        lines.push(format!("{BLOCK_ADDRESS} {domain}"));
        lines.push(format!("{BLOCK_ADDRESS} www.{domain}"));
    }
    lines.push(END_MARKER.to_string());
    format!("{}\n", lines.join("\n"))
}

/// Content with the block appended, or None if already blocked.
///
/// A newline is inserted first only when non-empty content lacks one, so an
/// empty file becomes exactly [`build_block`] with no leading blank line.
pub fn with_block(content: &str) -> Option<String> {
    if is_blocked(content) {
        return None;
    }
    let mut out = String::with_capacity(content.len() + 512);
    out.push_str(content);
    if !content.is_empty() && !content.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(&build_block());
    Some(out)
}

/// Content with every line between and including the markers dropped,
/// or None if there is no block.
pub fn without_block(content: &str) -> Option<String> {
    if !is_blocked(content) {
        return None;
    }
    let mut kept = Vec::new();
    let mut inside = false;
    for line in content.lines() {
        match line.trim() {
            START_MARKER => inside = true,
            END_MARKER => inside = false,
            _ if !inside => kept.push(line),
            _ => {}
        }
    }
    if kept.is_empty() {
        return Some(String::new());
    }
    Some(format!("{}\n", kept.join("\n")))
}

/// Append the managed block unless it is already there.
pub fn activate(editor: &dyn HostsEditor) -> Result<BlockChange> {
    let content = editor.read()?;
    match with_block(&content) {
        Some(updated) => {
            editor.write(&updated)?;
            tracing::info!(path = %editor.path().display(), "block added");
            Ok(BlockChange::Applied)
        }
        None => {
            tracing::debug!(path = %editor.path().display(), "block already present");
            Ok(BlockChange::Unchanged)
        }
    }
}

/// Remove the managed block if present.
pub fn deactivate(editor: &dyn HostsEditor) -> Result<BlockChange> {
    let content = editor.read()?;
    match without_block(&content) {
        Some(updated) => {
            editor.write(&updated)?;
            tracing::info!(path = %editor.path().display(), "block removed");
            Ok(BlockChange::Applied)
        }
        None => {
            tracing::debug!(path = %editor.path().display(), "no block to remove");
            Ok(BlockChange::Unchanged)
        }
    }
}

/// Check whether the hosts file currently carries the block.
pub fn block_active(editor: &dyn HostsEditor) -> Result<bool> {
    Ok(is_blocked(&editor.read()?))
}
