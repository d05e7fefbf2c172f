//! Lua statement weights and function-only visibility.

use metrist::analysis::Analyzer;
use metrist::config::MetricsConfig;
use metrist::model::{MetricsNode, collected_complexity};
use metrist::parsing::Language;
use tokio_util::sync::CancellationToken;

fn analyze(config: &MetricsConfig, source: &str) -> metrist::FileMetrics {
    Analyzer::new(config)
        .analyze("file:///input.lua", Language::Lua, source, &CancellationToken::new())
        .expect("analysis succeeds")
}

const BRANCHY: &str = "\
local function choose(n)
  if n > 1 then
    return 1
  elseif n < 0 then
    return 2
  else
    return 3
  end
end
";

#[test]
fn only_function_declarations_surface_in_results() {
    let source = "\
local function outer()
  while true do
    break
  end
end

for i = 1, 10 do
  print(i)
end
";
    let outcome = analyze(&MetricsConfig::default(), source);
    // The top-level for loop weighs in but is not independently reported.
    assert_eq!(outcome.results.len(), 1);
    assert_eq!(outcome.results[0].description, "Function declaration");

    fn assert_invisible_below(node: &MetricsNode) {
        for child in &node.children {
            assert!(!child.visible, "unexpected visible {}", child.description);
            assert_invisible_below(child);
        }
    }
    assert_invisible_below(&outcome.results[0]);
}

#[test]
fn branch_statements_accumulate_into_the_enclosing_function() {
    let outcome = analyze(&MetricsConfig::default(), BRANCHY);
    assert_eq!(outcome.results.len(), 1);
    // function(1) + if(1) + elseif(1) + else(1) + returns(3) + comparisons(2)
    assert_eq!(collected_complexity(&outcome.results[0]), 9);
}

#[test]
fn anonymous_function_definitions_are_visible_too() {
    let source = "local handler = function(a)\n  return a\nend\n";
    let outcome = analyze(&MetricsConfig::default(), source);
    assert_eq!(outcome.results.len(), 1);
    assert_eq!(outcome.results[0].description, "Function definition");
    assert_eq!(collected_complexity(&outcome.results[0]), 2);
}

#[test]
fn lua_weight_overrides_apply() {
    let mut config = MetricsConfig::default();
    config.lua_weights.insert("return_statement".to_string(), 0);
    let outcome = analyze(&config, BRANCHY);
    assert_eq!(collected_complexity(&outcome.results[0]), 6);
}

#[test]
fn empty_source_yields_no_results() {
    let outcome = analyze(&MetricsConfig::default(), "");
    assert!(outcome.results.is_empty());
}
