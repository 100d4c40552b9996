use covsum::report::render;
use covsum::summarize::summarize;
use serde_json::Value;

fn fixture_summary() -> covsum::model::RunSummary {
    let raw: Value =
        serde_json::from_slice(include_bytes!("fixtures/sample_coverage.json")).unwrap();
    summarize(&raw, "/work/project")
}

#[test]
fn report_summary_section() {
    let out = render(&fixture_summary(), "📊 Coverage Report", false, 80.0);

    assert!(out.starts_with("## 📊 Coverage Report\n"));
    assert!(out.contains("### 📈 Coverage Summary"));
    assert!(out.contains("| **Statements** | 85.7% | 🟢 |"));
    assert!(out.contains("| **Branches** | 50.0% | 🔴 |"));
    assert!(out.contains("| **Functions** | 50.0% | 🔴 |"));
    assert!(out.contains("| **Lines** | 85.7% | 🟢 |"));
    // Mean of 85.71, 50, 50, 85.71 is 67.855 — warning band at threshold 80.
    assert!(out.contains("**Overall Coverage: 67.9% 🟡**"));
    assert!(!out.contains("File Details"));
}

#[test]
fn report_file_table() {
    let out = render(&fixture_summary(), "Coverage", true, 80.0);

    assert!(out.contains("### 📁 File Details"));
    assert!(out.contains("| `src/lib.js` | 80.0% | 50.0% | 50.0% | 80.0% |"));
    assert!(out.contains("| `src/util.js` | 100.0% | 100.0% | 100.0% | 100.0% |"));

    // File rows appear in summary order.
    let lib_pos = out.find("src/lib.js").unwrap();
    let util_pos = out.find("src/util.js").unwrap();
    assert!(lib_pos < util_pos);
}

#[test]
fn report_threshold_moves_glyphs() {
    let out = render(&fixture_summary(), "Coverage", false, 50.0);
    // At threshold 50 every metric clears the bar.
    assert!(out.contains("| **Branches** | 50.0% | 🟢 |"));
    assert!(out.contains("**Overall Coverage: 67.9% 🟢**"));
}
