//! In-page instrumentation and CDP error mapping.
//!
//! The script only measures; ranking and de-duplication happen in
//! [`crate::analysis::website`] so they can run against fixtures.

use crate::ScanError;
use std::time::Duration;

/// Hard ceiling on visited elements per page.
pub const MAX_VISITED_NODES: usize = 2000;

/// Walks `document.body` in document order and reports one computed-style
/// record per element, stopping after `MAX_VISITED_NODES`.
pub(crate) const SAMPLE_PAGE_SCRIPT: &str = r#"
(() => {
  const MAX_NODES = 2000;
  const elements = [];
  const root = document.body;
  if (!root) {
    return { elements, truncated: false };
  }

  const walker = document.createTreeWalker(root, NodeFilter.SHOW_ELEMENT);
  let current = walker.currentNode;
  let count = 0;

  while (current && count < MAX_NODES) {
    const style = window.getComputedStyle(current);
    const text = current.textContent;
    elements.push({
      tag: current.tagName.toLowerCase(),
      hasText: !!(text && text.trim().length > 0),
      display: style.display || '',
      visibility: style.visibility || '',
      fontFamily: style.fontFamily || '',
      fontWeight: style.fontWeight || '',
      fontSize: style.fontSize || '',
      lineHeight: style.lineHeight || '',
      letterSpacing: style.letterSpacing || '',
      textTransform: style.textTransform || '',
      color: style.color || '',
      backgroundColor: style.backgroundColor || ''
    });
    current = walker.nextNode();
    count++;
  }

  return { elements, truncated: !!current };
})()
"#;

/// Maps a CDP failure during navigation to a `ScanError`.
pub(crate) fn map_navigation_error(url: &str, message: &str) -> ScanError {
    let lower = message.to_ascii_lowercase();
    if lower.contains("err_name_not_resolved") {
        ScanError::navigation(format!("Could not resolve host for {url}: {message}"))
    } else if lower.contains("err_connection_refused") {
        ScanError::navigation(format!("Connection refused by {url}: {message}"))
    } else if lower.contains("timeout") {
        ScanError::navigation(format!("Navigation to {url} timed out: {message}"))
    } else {
        ScanError::navigation(format!("Failed to load {url}: {message}"))
    }
}

pub(crate) fn navigation_timeout_error(url: &str, limit: Duration) -> ScanError {
    ScanError::navigation(format!(
        "Navigation to {url} timed out after {}s",
        limit.as_secs()
    ))
}

/// Maps a launch failure to a `ScanError`, naming the executable when known.
pub(crate) fn map_launch_error(message: &str, executable: Option<&std::path::Path>) -> ScanError {
    match executable {
        Some(path) => ScanError::browser(format!(
            "Failed to launch browser executable {}: {}",
            path.display(),
            message
        )),
        None => ScanError::browser(format!("Failed to launch browser: {}", message)),
    }
}
