//! Output model and the key conventions tasks use for client-facing output.
//!
//! | Key / prefix | Meaning |
//! |---|---|
//! | `output` | plain-text templated output group |
//! | `output:html` | HTML-mode templated output group |
//! | `quickReplies` | quick-reply choice group |
//! | `<key>:preTemplated` / `<key>:postTemplated` | snapshots written by the templating task |

mod model;

pub use model::{OutputItem, QuickReply};

/// Plain-text output group.
pub const KEY_OUTPUT: &str = "output";
/// HTML output prefix.
pub const KEY_OUTPUT_HTML: &str = "output:html";
/// Quick-reply group.
pub const KEY_QUICK_REPLIES: &str = "quickReplies";
/// Suffix of the snapshot taken before templating.
pub const PRE_TEMPLATED: &str = "preTemplated";
/// Suffix of the snapshot taken after templating.
pub const POST_TEMPLATED: &str = "postTemplated";

/// Returns true for `<key>:preTemplated` and `<key>:postTemplated`.
pub fn is_template_snapshot_key(key: &str) -> bool {
    key.rsplit_once(crate::memory::KEY_SEPARATOR)
        .is_some_and(|(_, suffix)| suffix == PRE_TEMPLATED || suffix == POST_TEMPLATED)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_keys() {
        assert!(is_template_snapshot_key("output:preTemplated"));
        assert!(is_template_snapshot_key("output:html:postTemplated"));
        assert!(!is_template_snapshot_key("output"));
        assert!(!is_template_snapshot_key("output:html"));
    }
}
