//! Embedded-markup adapter for template files with fenced script sections.
//!
//! Rather than parsing the markup grammar, the adapter textually neutralizes
//! everything outside the script fences: the whole document becomes one block
//! comment and the fence delimiters become partial comment tokens, so the
//! script grammar accepts the file as-is. Every replacement is
//! length-preserving, which keeps node offsets valid against the original
//! file with no re-indexing.
//!
//! This is lexical surgery, not markup parsing. Known limitation: more than
//! one script block, or malformed fences, degrade silently to fewer (or no)
//! reported constructs.

use regex::Regex;
use std::sync::OnceLock;
use tokio_util::sync::CancellationToken;

use crate::config::MetricsConfig;
use crate::error::MetricsResult;
use crate::model::MetricsNode;
use crate::parsing::script::ScriptAdapter;
use crate::parsing::Language;

pub struct MarkupAdapter {
    inner: ScriptAdapter,
}

impl MarkupAdapter {
    pub fn new(config: &MetricsConfig) -> MetricsResult<Self> {
        // The TypeScript grammar accepts plain JavaScript too, so one inner
        // adapter serves every fence flavor.
        Ok(Self {
            inner: ScriptAdapter::new(Language::TypeScript, config)?,
        })
    }

    pub fn metrics(&mut self, source: &str, cancel: &CancellationToken) -> MetricsNode {
        let neutralized = neutralize(source);
        self.inner.metrics(&neutralized, cancel)
    }
}

/// Comment out the markup while leaving script fences live.
///
/// Each fence tag is replaced by an equal-length partial comment token, then
/// the first and last two characters of the document become `/*` and `*/`.
/// Output length always equals input length.
pub fn neutralize(source: &str) -> String {
    static TS_OPEN: OnceLock<Regex> = OnceLock::new();
    static JS_OPEN: OnceLock<Regex> = OnceLock::new();
    static PLAIN_OPEN: OnceLock<Regex> = OnceLock::new();
    static CLOSE: OnceLock<Regex> = OnceLock::new();

    let ts_open = TS_OPEN.get_or_init(|| Regex::new(r#"(?i)<script lang="ts">"#).expect("valid regex"));
    let js_open = JS_OPEN.get_or_init(|| Regex::new(r#"(?i)<script lang="js">"#).expect("valid regex"));
    let plain_open = PLAIN_OPEN.get_or_init(|| Regex::new(r"(?i)<script>").expect("valid regex"));
    let close = CLOSE.get_or_init(|| Regex::new(r"(?i)</script>").expect("valid regex"));

    let mut text = source.to_string();
    // Same length as `<script lang="ts">` / `<script lang="js">` (18 chars).
    text = ts_open.replace_all(&text, "<script --------*/").into_owned();
    text = js_open.replace_all(&text, "<script --------*/").into_owned();
    // Same length as `<script>` (8) and `</script>` (9).
    text = plain_open.replace_all(&text, "<scrip*/").into_owned();
    text = close.replace_all(&text, "/*script>").into_owned();

    wrap_in_comment(text)
}

fn wrap_in_comment(mut text: String) -> String {
    let len = text.len();
    if len < 4 || !text.is_char_boundary(2) || !text.is_char_boundary(len - 2) {
        // Too short, or multi-byte characters straddle the splice points;
        // leave the text alone rather than corrupt offsets.
        return text;
    }
    text.replace_range(..2, "/*");
    text.replace_range(len - 2.., "*/");
    text
}
