//! Weight tables mapping syntax-node kinds to complexity contributions.
//!
//! Each grammar carries its own built-in default table; caller-supplied
//! overrides replace weights for any subset of keys, while descriptions and
//! visibility stay built-in. Keys are tree-sitter node kinds plus a few
//! synthetic rule ids (`if_else_statement`, `any_keyword`) for structural
//! rules that cannot be expressed as a plain kind lookup.

use std::collections::HashMap;

use crate::parsing::walker::Resolved;

/// Resolved entry for one node kind: weight, label, and whether the node is
/// eligible as a top-level reported unit.
#[derive(Debug, Clone, Copy)]
pub struct KindSpec {
    pub weight: u32,
    pub description: &'static str,
    pub visible: bool,
}

/// A merged kind-to-spec mapping for one grammar.
#[derive(Debug, Clone)]
pub struct WeightTable {
    entries: HashMap<&'static str, KindSpec>,
}

impl WeightTable {
    /// Default script-grammar table with caller overrides applied.
    pub fn script(overrides: &HashMap<String, u32>) -> Self {
        Self::merged(SCRIPT_DEFAULTS, overrides)
    }

    /// Default Lua statement table with caller overrides applied.
    pub fn lua(overrides: &HashMap<String, u32>) -> Self {
        Self::merged(LUA_DEFAULTS, overrides)
    }

    fn merged(defaults: &[(&'static str, u32, &'static str, bool)], overrides: &HashMap<String, u32>) -> Self {
        let mut entries = HashMap::with_capacity(defaults.len());
        for &(kind, weight, description, visible) in defaults {
            let weight = overrides.get(kind).copied().unwrap_or(weight);
            entries.insert(kind, KindSpec { weight, description, visible });
        }
        Self { entries }
    }

    pub fn get(&self, kind: &str) -> Option<&KindSpec> {
        self.entries.get(kind)
    }

    /// Resolve a kind into a walker contribution, `None` for unrecognized kinds.
    pub fn resolved(&self, kind: &str) -> Option<Resolved> {
        self.get(kind).map(|spec| Resolved {
            weight: spec.weight,
            description: spec.description,
            visible: spec.visible,
        })
    }
}

/// Default weights for the script grammar (tree-sitter-typescript /
/// tree-sitter-javascript node kinds). Zero-weight entries mark kinds the
/// walker recognizes but elides from the tree.
const SCRIPT_DEFAULTS: &[(&str, u32, &str, bool)] = &[
    // Function-like constructs: always visible so they can be reported as
    // top-level units even at default weight.
    ("function_declaration", 1, "Function declaration", true),
    ("generator_function_declaration", 1, "Generator function declaration", true),
    ("function_expression", 1, "Function expression", true),
    ("generator_function", 1, "Generator function", true),
    ("arrow_function", 1, "Arrow function", true),
    ("method_definition", 1, "Method declaration", true),
    ("enum_declaration", 1, "Enum declaration", true),
    ("internal_module", 1, "Module declaration", true),
    ("module", 1, "Module declaration", true),
    // Branching and flow control
    ("if_statement", 1, "If statement", false),
    ("if_else_statement", 2, "If with else statement", false),
    ("ternary_expression", 1, "Conditional expression", false),
    ("switch_statement", 1, "Switch statement", false),
    ("switch_case", 1, "Case clause", false),
    ("switch_default", 1, "Default case", false),
    ("for_statement", 1, "For statement", false),
    ("for_in_statement", 1, "For in statement", false),
    ("while_statement", 1, "While statement", false),
    ("do_statement", 1, "Do statement", false),
    ("break_statement", 1, "Break statement", false),
    ("continue_statement", 1, "Continue statement", false),
    ("return_statement", 1, "Return statement", false),
    ("labeled_statement", 1, "Labeled statement", false),
    ("with_statement", 1, "With statement", false),
    ("try_statement", 1, "Try statement", false),
    ("catch_clause", 1, "Catch clause", false),
    ("throw_statement", 1, "Throw statement", false),
    // Expressions with structural rules; the resolver gates these.
    ("binary_expression", 1, "Binary expression", false),
    ("any_keyword", 1, "Any keyword", false),
    // Other weighted constructs
    ("object", 1, "Object literal expression", false),
    ("jsx_element", 1, "Jsx element", false),
    ("jsx_self_closing_element", 1, "Jsx self closing element", false),
    // Recognized but weightless structural kinds
    ("program", 0, "", false),
    ("statement_block", 0, "", false),
    ("else_clause", 0, "", false),
    ("expression_statement", 0, "", false),
    ("call_expression", 0, "", false),
    ("new_expression", 0, "", false),
    ("member_expression", 0, "", false),
    ("subscript_expression", 0, "", false),
    ("parenthesized_expression", 0, "", false),
    ("assignment_expression", 0, "", false),
    ("augmented_assignment_expression", 0, "", false),
    ("unary_expression", 0, "", false),
    ("update_expression", 0, "", false),
    ("await_expression", 0, "", false),
    ("yield_expression", 0, "", false),
    ("sequence_expression", 0, "", false),
    ("spread_element", 0, "", false),
    ("identifier", 0, "", false),
    ("property_identifier", 0, "", false),
    ("shorthand_property_identifier", 0, "", false),
    ("string", 0, "", false),
    ("template_string", 0, "", false),
    ("template_substitution", 0, "", false),
    ("number", 0, "", false),
    ("regex", 0, "", false),
    ("array", 0, "", false),
    ("pair", 0, "", false),
    ("arguments", 0, "", false),
    ("formal_parameters", 0, "", false),
    ("required_parameter", 0, "", false),
    ("optional_parameter", 0, "", false),
    ("variable_declaration", 0, "", false),
    ("lexical_declaration", 0, "", false),
    ("variable_declarator", 0, "", false),
    ("class_declaration", 0, "", false),
    ("abstract_class_declaration", 0, "", false),
    ("class_body", 0, "", false),
    ("class", 0, "", false),
    ("public_field_definition", 0, "", false),
    ("interface_declaration", 0, "", false),
    ("type_alias_declaration", 0, "", false),
    ("type_annotation", 0, "", false),
    ("predefined_type", 0, "", false),
    ("property_signature", 0, "", false),
    ("method_signature", 0, "", false),
    ("index_signature", 0, "", false),
    ("import_statement", 0, "", false),
    ("export_statement", 0, "", false),
    ("named_imports", 0, "", false),
    ("namespace_import", 0, "", false),
    ("as_expression", 0, "", false),
    ("non_null_expression", 0, "", false),
    ("decorator", 0, "", false),
    ("comment", 0, "", false),
];

/// Default weights for the Lua grammar (tree-sitter-lua statement kinds).
/// Only function-declaration-equivalent kinds are visible; every other kind
/// contributes weight per table but is never independently reported.
const LUA_DEFAULTS: &[(&str, u32, &str, bool)] = &[
    ("function_declaration", 1, "Function declaration", true),
    ("function_definition", 1, "Function definition", true),
    ("if_statement", 1, "If statement", false),
    ("elseif_statement", 1, "Elseif clause", false),
    ("else_statement", 1, "Else clause", false),
    ("while_statement", 1, "While statement", false),
    ("repeat_statement", 1, "Repeat statement", false),
    ("do_statement", 1, "Do statement", false),
    ("for_statement", 1, "For statement", false),
    ("goto_statement", 1, "Goto statement", false),
    ("label_statement", 1, "Label statement", false),
    ("break_statement", 1, "Break statement", false),
    ("return_statement", 1, "Return statement", false),
    ("binary_expression", 1, "Binary expression", false),
    ("dot_index_expression", 1, "Member expression", false),
    ("method_index_expression", 1, "Member expression", false),
    ("chunk", 0, "", false),
    ("block", 0, "", false),
    ("assignment_statement", 0, "", false),
    ("variable_declaration", 0, "", false),
    ("function_call", 0, "", false),
    ("expression_list", 0, "", false),
    ("variable_list", 0, "", false),
    ("table_constructor", 0, "", false),
    ("field", 0, "", false),
    ("bracket_index_expression", 0, "", false),
    ("parenthesized_expression", 0, "", false),
    ("unary_expression", 0, "", false),
    ("identifier", 0, "", false),
    ("string", 0, "", false),
    ("number", 0, "", false),
    ("nil", 0, "", false),
    ("true", 0, "", false),
    ("false", 0, "", false),
    ("vararg_expression", 0, "", false),
    ("comment", 0, "", false),
    ("hash_bang_line", 0, "", false),
];
