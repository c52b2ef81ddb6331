use clipsel::output::{self, Clipboard};
use clipsel::{
    ArgKind, ArgumentSet, Candidate, ClipError, IgnoreRules, Rule, SelectBuilder, Selector,
    candidates, select,
};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::tempdir;
#[derive(Default)]
struct RecordingClipboard {
    text: Option<String>,
}
impl Clipboard for RecordingClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipError> {
        self.text = Some(text.to_string());
        Ok(())
    }
}
struct BrokenClipboard;
impl Clipboard for BrokenClipboard {
    fn set_text(&mut self, _text: &str) -> Result<(), ClipError> {
        Err(ClipError::Clipboard("no display".into()))
    }
}
fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}
fn rels(files: &[Candidate]) -> Vec<&str> {
    files.iter().map(|c| c.rel.as_str()).collect()
}
#[test]
fn integration_patterns_with_headers() {
    let dir = tempdir().unwrap();
    write(dir.path(), "a.py", "print('a')\n");
    write(dir.path(), "b.md", "# B\n");
    write(dir.path(), "c.txt", "c\n");
    let options = SelectBuilder::new(dir.path()).build();
    let found = candidates(&options).unwrap();
    let selection = select(&["*.py", "*.md"], &found, options.header_lines).unwrap();
    assert_eq!(rels(&selection.files), vec!["a.py", "b.md"]);
    assert!(selection.unmatched.is_empty());
    let mut seen = Vec::new();
    let aggregate = output::aggregate(&selection.files, true, |c| seen.push(c.display()));
    assert_eq!(seen, vec!["./a.py", "./b.md"]);
    assert_eq!(
        aggregate.text,
        "===== ./a.py =====\nprint('a')\n\n===== ./b.md =====\n# B\n\n"
    );
    assert_eq!(aggregate.file_count, 2);
    assert_eq!(aggregate.char_count, aggregate.text.chars().count());
    let mut clipboard = RecordingClipboard::default();
    output::deliver(&aggregate, &mut clipboard).unwrap();
    assert_eq!(clipboard.text.as_deref(), Some(aggregate.text.as_str()));
}
#[test]
fn integration_tag_only_selection() {
    let dir = tempdir().unwrap();
    write(dir.path(), "server.py", "#!/usr/bin/env python3\n# tags: #backend\n");
    write(dir.path(), "client.js", "// tags: #frontend\n");
    let options = SelectBuilder::new(dir.path()).build();
    let found = candidates(&options).unwrap();
    let selection = select(&["+backend"], &found, options.header_lines).unwrap();
    assert_eq!(rels(&selection.files), vec!["server.py"]);
}
#[test]
fn integration_inclusion_and_exclusion() {
    let dir = tempdir().unwrap();
    write(dir.path(), "server.py", "# tags: #backend\n");
    write(dir.path(), "exp.py", "# tags: #backend #experimental\n");
    write(dir.path(), "config.json", "{}\n");
    write(dir.path(), "config.test.json", "{}\n");
    write(dir.path(), "readme.md", "# tags: #backend\n");
    let options = SelectBuilder::new(dir.path()).build();
    let found = candidates(&options).unwrap();
    let args = ArgumentSet::classify(["+backend", "*.json", "-*.test.json", "-+experimental"]);
    let selector = Selector::new(&args).unwrap();
    let selection = selector.select(&found);
    assert_eq!(rels(&selection.files), vec!["config.json", "readme.md", "server.py"]);
    assert!(selection.unmatched.is_empty());

    let mut unmatched = args.unmatched();
    let by_rel = |rel: &str| found.iter().find(|c| c.rel == rel).unwrap();
    let test_json = selector.match_candidate(by_rel("config.test.json"), &mut unmatched);
    assert!(test_json.included);
    assert_eq!(test_json.matched_by, Some(Rule::Pattern("*.json".into())));
    assert_eq!(
        test_json.excluded_by,
        Some(Rule::Pattern("*.test.json".into()))
    );
    let exp = selector.match_candidate(by_rel("exp.py"), &mut unmatched);
    assert_eq!(exp.matched_by, Some(Rule::Tag("backend".into())));
    assert_eq!(exp.excluded_by, Some(Rule::Tag("experimental".into())));
    assert!(!exp.is_selected());
}
#[test]
fn integration_unmatched_arguments_are_reported() {
    let dir = tempdir().unwrap();
    write(dir.path(), "a.py", "# tags: #backend\n");
    let options = SelectBuilder::new(dir.path()).build();
    let found = candidates(&options).unwrap();
    let selection = select(&["*.py", "+nonexistent"], &found, options.header_lines).unwrap();
    assert_eq!(rels(&selection.files), vec!["a.py"]);
    assert_eq!(
        selection.unmatched.warnings(),
        vec!["Unmatched inclusion tag: +nonexistent".to_string()]
    );
}
#[test]
fn integration_pattern_preferred_over_tag() {
    let dir = tempdir().unwrap();
    write(dir.path(), "a.py", "# tags: #backend\n");
    let options = SelectBuilder::new(dir.path()).build();
    let found = candidates(&options).unwrap();
    let args = ArgumentSet::classify(["*.py", "+backend"]);
    let selector = Selector::new(&args).unwrap();
    let mut unmatched = args.unmatched();
    let result = selector.match_candidate(&found[0], &mut unmatched);
    assert_eq!(result.matched_by, Some(Rule::Pattern("*.py".into())));
    assert_eq!(unmatched.get(ArgKind::IncludeTag), ["backend".to_string()]);
    assert!(unmatched.get(ArgKind::IncludePattern).is_empty());
}
#[test]
fn integration_matching_is_idempotent() {
    let dir = tempdir().unwrap();
    write(dir.path(), "a.py", "# tags: #x\n");
    write(dir.path(), "b.rs", "fn main() {}\n");
    let options = SelectBuilder::new(dir.path()).build();
    let found = candidates(&options).unwrap();
    let args = ArgumentSet::classify(["*.py", "+nope", "-*.rs"]);
    let selector = Selector::new(&args).unwrap();
    let first = selector.select(&found);
    let second = selector.select(&found);
    assert_eq!(first.files, second.files);
    assert_eq!(first.unmatched, second.unmatched);
    assert_eq!(
        first.unmatched.warnings(),
        vec![
            "Unmatched inclusion tag: +nope".to_string(),
            "Unmatched exclusion pattern: *.rs".to_string(),
        ]
    );
}
#[test]
fn integration_gitignore_toggle() {
    let dir = tempdir().unwrap();
    write(dir.path(), ".gitignore", "secret.txt\n");
    write(dir.path(), "a.txt", "a");
    write(dir.path(), "secret.txt", "s");
    let respected = candidates(&SelectBuilder::new(dir.path()).build()).unwrap();
    assert_eq!(rels(&respected), vec![".gitignore", "a.txt"]);
    let disabled = candidates(
        &SelectBuilder::new(dir.path())
            .respect_gitignore(false)
            .build(),
    )
    .unwrap();
    assert_eq!(rels(&disabled), vec![".gitignore", "a.txt", "secret.txt"]);
}
#[test]
fn integration_ignored_directories_are_pruned() {
    let dir = tempdir().unwrap();
    write(dir.path(), ".gitignore", "# build output\nbuild/\n*.log\n!keep.log\n");
    write(dir.path(), "build/out.o", "");
    write(dir.path(), "build/deep/x.o", "");
    write(dir.path(), "src/build/y.o", "");
    write(dir.path(), "src/main.rs", "");
    write(dir.path(), "a.log", "");
    write(dir.path(), "keep.log", "");
    write(dir.path(), "src/b.log", "");
    let found = candidates(&SelectBuilder::new(dir.path()).build()).unwrap();
    assert_eq!(rels(&found), vec![".gitignore", "keep.log", "src/main.rs"]);
}
#[test]
fn integration_hidden_files() {
    let dir = tempdir().unwrap();
    write(dir.path(), ".env", "x");
    write(dir.path(), "a.txt", "a");
    let all = candidates(&SelectBuilder::new(dir.path()).build()).unwrap();
    assert_eq!(rels(&all), vec![".env", "a.txt"]);
    let visible = candidates(&SelectBuilder::new(dir.path()).include_hidden(false).build()).unwrap();
    assert_eq!(rels(&visible), vec!["a.txt"]);
}
#[test]
fn integration_output_file_is_never_a_candidate() {
    let dir = tempdir().unwrap();
    write(dir.path(), "a.txt", "a");
    write(dir.path(), "out.zip", "PK");
    let options = SelectBuilder::new(dir.path())
        .exclude_path(Some(dir.path().join("out.zip")))
        .build();
    let found = candidates(&options).unwrap();
    assert_eq!(rels(&found), vec!["a.txt"]);
}
#[test]
fn integration_empty_arguments_are_an_error() {
    let empty: [&str; 0] = [];
    assert!(matches!(
        select(&empty, &[], 10),
        Err(ClipError::EmptyArguments)
    ));
}
#[test]
fn integration_aggregate_without_headers_and_unreadable_file() {
    let dir = tempdir().unwrap();
    write(dir.path(), "h.txt", "héllo");
    let files = vec![
        Candidate {
            path: dir.path().join("h.txt"),
            rel: "h.txt".into(),
        },
        Candidate {
            path: dir.path().join("gone.txt"),
            rel: "gone.txt".into(),
        },
    ];
    let aggregate = output::aggregate(&files, false, |_| {});
    assert_eq!(aggregate.text, "héllo\n");
    assert_eq!(aggregate.char_count, 6);
    assert_eq!(aggregate.file_count, 2);
    assert_eq!(aggregate.entries.len(), 1);
}
#[test]
fn integration_clipboard_failure_is_returned() {
    let aggregate = output::aggregate(&[], true, |_| {});
    assert!(output::deliver(&aggregate, &mut BrokenClipboard).is_err());
}
#[test]
fn integration_dry_run_json() {
    let dir = tempdir().unwrap();
    write(dir.path(), "a.py", "");
    let found = candidates(&SelectBuilder::new(dir.path()).build()).unwrap();
    let selection = select(&["*.py", "-+wip"], &found, 10).unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&output::format_json(&selection, false).unwrap()).unwrap();
    assert_eq!(json["files"][0]["rel"], "a.py");
    assert_eq!(json["unmatched"]["exclude_tags"][0], "wip");
}
#[test]
fn integration_glob_included_file_excluded_by_tag() {
    let dir = tempdir().unwrap();
    write(dir.path(), "a.py", "# tags: #wip\n");
    write(dir.path(), "b.py", "print('b')\n");
    let found = candidates(&SelectBuilder::new(dir.path()).build()).unwrap();
    let args = ArgumentSet::classify(["*.py", "-+wip"]);
    let selector = Selector::new(&args).unwrap();
    let selection = selector.select(&found);
    assert_eq!(rels(&selection.files), vec!["b.py"]);
    assert!(selection.unmatched.is_empty());
    let mut unmatched = args.unmatched();
    let wip = selector.match_candidate(&found[0], &mut unmatched);
    assert_eq!(wip.matched_by, Some(Rule::Pattern("*.py".into())));
    assert_eq!(wip.excluded_by, Some(Rule::Tag("wip".into())));
}
#[test]
fn integration_unreadable_header_keeps_file_during_exclusion() {
    let dir = tempdir().unwrap();
    let selector = Selector::new(&ArgumentSet::classify(["*.py", "-+wip"])).unwrap();
    let mut unmatched = ArgumentSet::default().unmatched();
    let gone = Candidate {
        path: dir.path().join("gone.py"),
        rel: "gone.py".into(),
    };
    let result = selector.match_candidate(&gone, &mut unmatched);
    assert!(result.included);
    assert_eq!(result.excluded_by, None);
    assert!(result.is_selected());
}
#[test]
fn integration_unreadable_gitignore_aborts() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join(".gitignore")).unwrap();
    write(dir.path(), "a.txt", "a");
    assert!(matches!(
        IgnoreRules::load(dir.path()),
        Err(ClipError::IgnoreFile { .. })
    ));
    assert!(matches!(
        candidates(&SelectBuilder::new(dir.path()).build()),
        Err(ClipError::IgnoreFile { .. })
    ));
    let unfiltered = candidates(
        &SelectBuilder::new(dir.path())
            .respect_gitignore(false)
            .build(),
    )
    .unwrap();
    assert_eq!(rels(&unfiltered), vec!["a.txt"]);
}
#[test]
fn integration_clipboard_holder_not_requested() {
    assert!(!output::run_clipboard_daemon_if_requested().unwrap());
}
