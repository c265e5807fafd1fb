//! Generate Markdown reference docs from `cand_core::lang` registries.
//!
//! This binary renders the vocabulary registries (directives, special objects, operators, punctuation) into a single
//! Markdown page at `docs/language/reference.md`.
//!
//! ## Notes
//! - The generated file is a derived artifact; update the registries instead of editing it by hand.
//!
//! ## Examples
//! Run from the workspace root:
//! ```bash
//! cargo run -p cand_core --bin generate_lang_reference
//! ```
//!
//! ## Panics
//! - If the workspace root cannot be resolved.
//! - If the output file cannot be written.

use std::fs;
use std::path::{Path, PathBuf};

use cand_core::lang::{directives, operators, punctuation, special_objects};

fn start_section(out: &mut String, heading: &str) {
    while out.ends_with("\n\n\n") {
        out.pop();
    }
    if !out.is_empty() && !out.ends_with("\n\n") {
        out.push('\n');
    }
    out.push_str(heading);
    out.push_str("\n\n");
}

fn main() {
    let root = workspace_root();

    let out_dir = root.join("docs/language");
    fs::create_dir_all(&out_dir).expect("create docs/language/");

    write_language_reference(&out_dir.join("reference.md"));
}

/// Write `docs/language/reference.md`.
fn write_language_reference(path: &Path) {
    let mut out = String::new();
    out.push_str("# Cand language reference\n\n");
    out.push_str("> Generated file. Regenerate with `cargo run -p cand_core --bin generate_lang_reference`.\n\n");

    out.push_str("## Contents\n\n");
    out.push_str("- [Directives](#directives)\n");
    out.push_str("- [Special objects](#special-objects)\n");
    out.push_str("- [Operators](#operators)\n");
    out.push_str("- [Operations](#operations)\n");
    out.push_str("- [Punctuation](#punctuation)\n\n");

    render_directives_section(&mut out);
    render_special_objects_section(&mut out);
    render_operators_section(&mut out);
    render_operations_section(&mut out);
    render_punctuation_section(&mut out);

    while out.ends_with("\n\n") {
        out.pop();
    }
    fs::write(path, out).expect("write reference.md");
}

fn render_directives_section(out: &mut String) {
    start_section(out, "## Directives");

    out.push_str("| Id | Spelling | Category | Description | Since | Stability |\n");
    out.push_str("|----|---|---|---|---|---|\n");
    for d in directives::DIRECTIVES {
        out.push_str(&format!(
            "| {:?} | `#{}` | {:?} | {} | {} | {:?} |\n",
            d.id, d.canonical, d.category, d.description, d.since, d.stability
        ));
    }
}

fn render_special_objects_section(out: &mut String) {
    start_section(out, "## Special objects");

    out.push_str("| Id | Spelling | Type | Since |\n");
    out.push_str("|----|---|---|---|\n");
    for o in special_objects::SPECIAL_OBJECTS {
        let is_type = if o.is_type { "yes" } else { "" };
        out.push_str(&format!("| {:?} | `@{}` | {is_type} | {} |\n", o.id, o.canonical, o.since));
    }
}

fn render_operators_section(out: &mut String) {
    start_section(out, "## Operators");

    out.push_str("| Id | Spelling | Category | Prefix | Binary | Postfix | Since |\n");
    out.push_str("|----|---|---|---|---|---|---|\n");
    let role = |op: Option<operators::OperationId>| {
        op.map(|op| format!("`{}`", operators::operation_info(op).name))
            .unwrap_or_default()
    };
    for o in operators::OPERATORS {
        out.push_str(&format!(
            "| {:?} | `{}` | {:?} | {} | {} | {} | {} |\n",
            o.id,
            o.spelling,
            o.category,
            role(o.prefix),
            role(o.binary),
            role(o.postfix),
            o.since
        ));
    }
}

fn render_operations_section(out: &mut String) {
    start_section(out, "## Operations");

    out.push_str("Higher priority binds tighter. Rows are sorted from tightest to loosest.\n\n");
    out.push_str("| Name | Symbol | Priority | Associativity | Fixity | Arity |\n");
    out.push_str("|---|---|---:|---|---|---|\n");

    let mut rows: Vec<_> = operators::OPERATIONS.iter().collect();
    rows.sort_by(|a, b| b.priority.cmp(&a.priority).then((a.id as usize).cmp(&(b.id as usize))));
    for o in rows {
        out.push_str(&format!(
            "| `{}` | `{}` | {} | {:?} | {:?} | {:?} |\n",
            o.name, o.symbol, o.priority, o.associativity, o.fixity, o.arity
        ));
    }
}

fn render_punctuation_section(out: &mut String) {
    start_section(out, "## Punctuation");

    out.push_str("| Id | Canonical | Category | Since | Stability |\n");
    out.push_str("|---|---|---|---|---|\n");
    for p in punctuation::PUNCTUATION {
        out.push_str(&format!(
            "| {:?} | `{}` | {:?} | {} | {:?} |\n",
            p.id, p.canonical, p.category, p.since, p.stability
        ));
    }
}

fn workspace_root() -> PathBuf {
    // crates/cand_core -> crates -> workspace root
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .map(|p| p.to_path_buf())
        .expect("workspace root (two levels above crates/cand_core)")
}
