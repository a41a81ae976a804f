use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use sable::lang::keywords;
use sable::lang::types as builtin_types;

/// Guardrail against reintroducing stringly-typed vocabulary checks.
///
/// This is a **coarse** safety net. It looks for patterns like `== "Int32"` or `"class" => ...` in Rust
/// source files where callers should go through the `sable_core::lang` registries instead.
///
/// Notes:
/// - Occurrences in `crates/sable_core/src/lang/**` (the registries themselves) and in tests are allowed.
/// - It only has to catch “oops I added a string match”.
#[test]
fn no_new_stringly_vocab_checks_in_rust_sources() {
    let root = repo_root();
    let spellings = registry_spellings();
    let mut offenders: Vec<(PathBuf, usize, String)> = Vec::new();

    let targets = [root.join("src"), root.join("crates")];
    for dir in targets {
        if dir.exists() {
            scan_dir(&root, &dir, &spellings, &mut offenders);
        }
    }

    if !offenders.is_empty() {
        let mut msg = String::new();
        msg.push_str("Found potential stringly-typed vocabulary checks. Prefer sable_core registries.\n\n");
        for (path, line_no, line) in offenders.into_iter().take(80) {
            msg.push_str(&format!(
                "- {}:{}: {}\n",
                path.strip_prefix(&root).unwrap_or(&path).display(),
                line_no,
                line.trim()
            ));
        }
        panic!("{msg}");
    }
}

#[test]
fn registry_spellings_are_unique() {
    let mut seen = BTreeSet::new();
    for k in keywords::KEYWORDS {
        assert!(seen.insert(k.canonical), "duplicate keyword spelling {}", k.canonical);
        for &alias in k.aliases {
            assert!(seen.insert(alias), "duplicate keyword alias {alias}");
        }
    }

    // `none` is both a keyword and the builtin unit type.
    let mut types = BTreeSet::new();
    for t in builtin_types::BUILTIN_TYPES {
        assert!(types.insert(t.canonical), "duplicate builtin type {}", t.canonical);
        if t.canonical != "none" {
            assert!(!seen.contains(t.canonical), "builtin type {} shadows a keyword", t.canonical);
        }
    }
}

fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

fn registry_spellings() -> Vec<&'static str> {
    // Keywords (with aliases) and builtin type names drift the most; operators and punctuation are
    // single characters that would flood the scan with false positives.
    let mut set: BTreeSet<&'static str> = BTreeSet::new();

    for k in keywords::KEYWORDS {
        set.insert(k.canonical);
        for &a in k.aliases {
            set.insert(a);
        }
    }

    for t in builtin_types::BUILTIN_TYPES {
        set.insert(t.canonical);
    }

    set.into_iter().collect()
}

fn is_allowed_file(root: &Path, path: &Path) -> bool {
    let rel = path.strip_prefix(root).unwrap_or(path).to_string_lossy();
    if !rel.ends_with(".rs") {
        return true;
    }
    // Registries define the spellings.
    if rel.starts_with("crates/sable_core/src/lang/") {
        return true;
    }
    if rel.starts_with("tests/") {
        return true;
    }
    false
}

fn scan_dir(root: &Path, dir: &Path, spellings: &[&'static str], offenders: &mut Vec<(PathBuf, usize, String)>) {
    let Ok(entries) = fs::read_dir(dir) else { return };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            scan_dir(root, &path, spellings, offenders);
            continue;
        }
        if is_allowed_file(root, &path) {
            continue;
        }
        let Ok(contents) = fs::read_to_string(&path) else {
            continue;
        };
        for (idx, line) in contents.lines().enumerate() {
            if is_suspicious_line(line, spellings) {
                offenders.push((path.clone(), idx + 1, line.to_string()));
            }
        }
    }
}

fn is_suspicious_line(line: &str, spellings: &[&'static str]) -> bool {
    // Comments and doc comments may name vocabulary freely.
    let trimmed = line.trim_start();
    if trimmed.starts_with("//") {
        return false;
    }

    // - `... == "Spelling"`
    // - `"Spelling" => ...`
    for s in spellings {
        let eq = format!("== \"{s}\"");
        let arm = format!("\"{s}\" =>");
        if line.contains(&eq) || line.contains(&arm) {
            return true;
        }
    }

    false
}
