//! End-to-end metrics for markup files with embedded script fences.

use metrist::analysis::Analyzer;
use metrist::config::MetricsConfig;
use metrist::model::collected_complexity;
use metrist::parsing::{Language, MarkupAdapter};
use tokio_util::sync::CancellationToken;

const VUE_SINGLE_FENCE: &str = r#"<template>
  <p>{{ label }}</p>
</template>
<script lang="ts">
function pick(flag) {
  if (flag) { return 1; }
}
</script>
"#;

#[test]
fn single_fence_function_is_reported_with_original_offsets() {
    let config = MetricsConfig::default();
    let mut adapter = MarkupAdapter::new(&config).expect("grammar loads");
    let root = adapter.metrics(VUE_SINGLE_FENCE, &CancellationToken::new());

    assert_eq!(root.children.len(), 1);
    let function = &root.children[0];
    assert_eq!(function.description, "Function declaration");
    assert!(function.visible);
    // function(1) + if(1) + return(1)
    assert_eq!(collected_complexity(function), 3);

    // Offsets stay valid against the untouched original document.
    let expected_start = VUE_SINGLE_FENCE.find("function pick").expect("present");
    assert_eq!(function.start, expected_start);
    let expected_line = VUE_SINGLE_FENCE[..expected_start].matches('\n').count() + 1;
    assert_eq!(function.line, expected_line);
    assert_eq!(function.column, 1);
    assert!(VUE_SINGLE_FENCE[function.start..].starts_with("function pick"));
}

#[test]
fn vue_documents_route_through_the_markup_adapter() {
    let outcome = Analyzer::new(&MetricsConfig::default())
        .analyze(
            "file:///app.vue",
            Language::Vue,
            VUE_SINGLE_FENCE,
            &CancellationToken::new(),
        )
        .expect("analysis succeeds");
    assert_eq!(outcome.results.len(), 1);
    assert_eq!(collected_complexity(&outcome.results[0]), 3);
}

#[test]
fn html_with_a_plain_script_tag_is_analyzed() {
    let html = "<html>\n<body></body>\n<script>\nfunction go(a) { return a; }\n</script>\n</html>\n";
    let outcome = Analyzer::new(&MetricsConfig::default())
        .analyze("file:///index.html", Language::Html, html, &CancellationToken::new())
        .expect("analysis succeeds");
    assert_eq!(outcome.results.len(), 1);
    let function = &outcome.results[0];
    assert_eq!(function.start, html.find("function go").expect("present"));
    assert_eq!(collected_complexity(function), 2);
}

#[test]
fn markup_outside_any_fence_contributes_nothing() {
    let html = "<html>\n<body>\n<p>if (x) { return 1; }</p>\n</body>\n</html>\n";
    let outcome = Analyzer::new(&MetricsConfig::default())
        .analyze("file:///plain.html", Language::Html, html, &CancellationToken::new())
        .expect("analysis succeeds");
    assert!(outcome.results.is_empty());
}
