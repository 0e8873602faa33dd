//! Property-based and end-to-end tests for urlfix
//!
//! Uses proptest to check the rewrite invariants over generated file
//! contents, and runs the whole pipeline against temporary source trees.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use urlfix::{ImportRule, ReplacementTable, RunSummary, Settings, load_settings, rewrite};

// Import proptest macro
use proptest::prelude::*;

const IMPORT: &str = "import { API_ENDPOINTS } from '../../config/api.config';";

fn builtin() -> (ReplacementTable, ImportRule) {
    let settings = load_settings().unwrap();
    (settings.replacement_table().unwrap(), settings.import_rule())
}

fn settings_for(root: &Path) -> Settings {
    let mut settings = load_settings().unwrap();
    settings.scan.root = root.to_path_buf();
    settings.logging.enabled = false;
    settings
}

fn write_file(root: &Path, rel: &str, content: &[u8]) -> PathBuf {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    path
}

fn run_tree(root: &Path) -> (RunSummary, String) {
    let mut out = Vec::new();
    let summary = urlfix::run(&settings_for(root), &mut out).unwrap();
    (summary, String::from_utf8(out).unwrap())
}

/// Plain (unquoted) URLs from the built-in table
fn plain_urls() -> Vec<String> {
    let (table, _) = builtin();
    table
        .iter()
        .filter(|e| !e.from.starts_with('\''))
        .map(|e| e.from.clone())
        .collect()
}

fn fragment() -> impl Strategy<Value = String> {
    let urls = plain_urls();
    let url = proptest::sample::select(urls);
    prop_oneof![
        "[a-zA-Z0-9 (){};=.]{0,30}",
        url.clone().prop_map(|u| format!("fetch('{}');", u)),
        url.clone().prop_map(|u| format!("axios.post(\"{}\", body);", u)),
        url.clone().prop_map(|u| format!("const url = `{}`;", u)),
        url.prop_map(|u| format!("// docs: {}", u)),
        Just("import { API_ENDPOINTS } from '../config/api.config';".to_string()),
        Just("import { API_ENDPOINTS } from '../../../config/api.config';".to_string()),
        Just("use(API_ENDPOINTS.ADMIN.GET_CLASSES);".to_string()),
    ]
}

// ============================================================================
// Property 1: content without quoted URLs is left alone
// ============================================================================

proptest! {
    #[test]
    fn prop_no_quoted_url_means_no_change(text in "[a-zA-Z0-9 (){};=.:/\n_-]{0,200}") {
        let (table, rule) = builtin();
        let out = rewrite(&text, &table, &rule);
        prop_assert!(!out.modified);
        prop_assert!(!out.import_added);
        prop_assert_eq!(out.content, text);
    }

    // ========================================================================
    // Property 2: a second pass is a no-op
    // ========================================================================
    #[test]
    fn prop_rewrite_is_idempotent(fragments in prop::collection::vec(fragment(), 0..20)) {
        let (table, rule) = builtin();
        let input = fragments.join("\n");

        let first = rewrite(&input, &table, &rule);
        let second = rewrite(&first.content, &table, &rule);

        prop_assert!(!second.modified);
        prop_assert!(!second.import_added);
        prop_assert_eq!(second.content, first.content);
    }

    // ========================================================================
    // Property 3: each quote style becomes the bare reference
    // ========================================================================
    #[test]
    fn prop_quoted_url_replaced_in_place(
        index in any::<prop::sample::Index>(),
        quote in prop::sample::select(vec!['\'', '"', '`']),
        prefix in "[a-z ]{0,20}",
        suffix in "[a-z ]{0,20}",
    ) {
        let (table, rule) = builtin();
        let urls = plain_urls();
        let url = index.get(&urls);
        let reference = table.get(url).unwrap();

        let input = format!("{}({q}{}{q}){}", prefix, url, suffix, q = quote);
        let out = rewrite(&input, &table, &rule);

        let body = format!("{}({}){}", prefix, reference, suffix);
        prop_assert!(out.modified);
        prop_assert_eq!(out.content, format!("{}\n{}", IMPORT, body));
    }
}

// ============================================================================
// End-to-end runs over a temporary source tree
// ============================================================================

#[test]
fn test_end_to_end_fetch_rewrite() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let path = write_file(
        root,
        "pages/admin/Students.jsx",
        b"const load = async () => {\n  const res = await fetch('http://localhost:8000/api/v1/admin/get-students');\n  return res.json();\n};\n",
    );

    let (summary, output) = run_tree(root);
    assert_eq!(summary.updated, 1);
    assert_eq!(
        output,
        format!("Starting URL replacement...\nUpdated: {}\nDone!\n", path.display())
    );

    let content = fs::read_to_string(&path).unwrap();
    let mut lines = content.lines();
    assert_eq!(lines.next(), Some(IMPORT));
    assert!(content.contains("fetch(API_ENDPOINTS.ADMIN.GET_STUDENTS)"));
    assert!(!content.contains("localhost"));
}

#[test]
fn test_second_run_is_silent() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let path = write_file(
        root,
        "components/Faculty.js",
        b"axios.get(\"http://localhost:8000/api/v1/faculty/my-classes\")\n",
    );

    run_tree(root);
    let after_first = fs::read_to_string(&path).unwrap();
    let (summary, output) = run_tree(root);

    assert_eq!(summary.updated, 0);
    assert_eq!(output, "Starting URL replacement...\nDone!\n");
    assert_eq!(fs::read_to_string(&path).unwrap(), after_first);
}

#[test]
fn test_unrecognized_import_spelling_duplicates_import() {
    // Known gap: only two relative spellings count as an existing import.
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let existing = "import { API_ENDPOINTS } from '../../../config/api.config';";
    let path = write_file(
        root,
        "pages/admin/components/Classes.jsx",
        format!(
            "{}\nfetch('http://localhost:8000/api/v1/admin/get-classes');\n",
            existing
        )
        .as_bytes(),
    );

    run_tree(root);
    let content = fs::read_to_string(&path).unwrap();

    assert!(content.starts_with(&format!("{}\n{}\n", IMPORT, existing)));
    assert_eq!(content.matches("import { API_ENDPOINTS }").count(), 2);
}

#[test]
fn test_bad_file_does_not_stop_run() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let bad = write_file(root, "a/logo.js", &[0x89, 0x50, 0x4e, 0x47, 0xff, 0x00]);
    let good = write_file(
        root,
        "b/Stats.jsx",
        b"fetch(`http://localhost:8000/api/v1/authority/stats`)\n",
    );
    let other = write_file(root, "c/README.md", &[0xff, 0xff]);

    let (summary, output) = run_tree(root);

    assert_eq!(summary.scanned, 2);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.updated, 1);
    assert!(output.contains(&format!("Error processing {}: ", bad.display())));
    assert!(output.contains(&format!("Updated: {}", good.display())));
    assert!(!output.contains(&other.display().to_string()));
    assert!(output.ends_with("Done!\n"));

    assert!(fs::read_to_string(&good).unwrap().contains("fetch(API_ENDPOINTS.AUTHORITY.STATS)"));
}

#[test]
fn test_missing_root_fails_run() {
    let temp_dir = TempDir::new().unwrap();
    let mut out = Vec::new();
    let result = urlfix::run(&settings_for(&temp_dir.path().join("missing")), &mut out);

    assert!(result.is_err());
    let output = String::from_utf8(out).unwrap();
    assert!(!output.contains("Done!"));
}

#[test]
fn test_untouched_files_keep_content() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let content = "export const API = 'http://localhost:8000/api/v1/admin/get-students/extra';\n";
    let path = write_file(root, "utils/api.js", content.as_bytes());

    let (summary, _) = run_tree(root);
    assert_eq!(summary.updated, 0);
    assert_eq!(fs::read_to_string(&path).unwrap(), content);
}

#[cfg(unix)]
#[test]
fn test_symlinked_source_rewrites_target() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("src");
    fs::create_dir_all(&root).unwrap();
    let shared = write_file(
        temp_dir.path(),
        "shared.js",
        b"fetch('http://localhost:8000/api/v1/admin/get-students');\n",
    );
    let link = root.join("linked.js");
    std::os::unix::fs::symlink(&shared, &link).unwrap();

    let (summary, output) = run_tree(&root);

    assert_eq!(summary.updated, 1);
    assert!(output.contains(&format!("Updated: {}", link.display())));
    assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
    assert_eq!(
        fs::read_to_string(&shared).unwrap(),
        format!("{}\nfetch(API_ENDPOINTS.ADMIN.GET_STUDENTS);\n", IMPORT)
    );
}

#[cfg(unix)]
#[test]
fn test_dangling_symlink_reported() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("src");
    fs::create_dir_all(&root).unwrap();
    let dangling = root.join("dangling.js");
    std::os::unix::fs::symlink(temp_dir.path().join("missing.js"), &dangling).unwrap();

    let (summary, output) = run_tree(&root);

    assert_eq!(
        summary,
        RunSummary {
            scanned: 1,
            updated: 0,
            failed: 1
        }
    );
    assert!(output.contains(&format!("Error processing {}: File not found", dangling.display())));
    assert!(output.ends_with("Done!\n"));
}
