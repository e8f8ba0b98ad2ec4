use assert_cmd::Command;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn temp_workspace() -> TempDir {
    tempfile::tempdir().expect("create tempdir")
}

fn charfreq() -> Command {
    Command::cargo_bin("charfreq").expect("binary exists")
}

fn stdout_lines(cmd: &mut Command) -> Vec<String> {
    let output = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(output)
        .expect("utf-8 output")
        .lines()
        .map(str::to_string)
        .collect()
}

fn write(dir: &Path, name: &str, content: &[u8]) -> String {
    let path = dir.join(name);
    fs::write(&path, content).expect("write input");
    path.to_string_lossy().into_owned()
}

#[test]
fn plain_output_is_ascending_by_count() {
    let workspace = temp_workspace();
    let file = write(workspace.path(), "a.txt", b"zzzyyx\n");

    let lines = stdout_lines(charfreq().args(["--quiet", file.as_str()]));

    assert_eq!(lines, vec!["x", "y", "z"]);
}

#[test]
fn counts_merge_across_files() {
    let workspace = temp_workspace();
    let first = write(workspace.path(), "a.txt", b"aaabbc\nabc\n");
    let second = write(workspace.path(), "b.txt", b"c!c!");

    let lines = stdout_lines(charfreq().args([
        "--quiet",
        "--format",
        "counts",
        "--symbols",
        first.as_str(),
        second.as_str(),
    ]));

    assert_eq!(lines, vec!["!\t2"]);

    let lines =
        stdout_lines(charfreq().args(["--quiet", "-f", "counts", "-a", first.as_str(), second.as_str()]));
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "b\t3");
    assert!(lines.contains(&"a\t4".to_string()));
    assert!(lines.contains(&"c\t4".to_string()));
}

#[test]
fn bigram_symbols() {
    let workspace = temp_workspace();
    let file = write(workspace.path(), "code.rs", b"a != b\nx -> y\n!=\n");

    let lines = stdout_lines(charfreq().args(["-q", "-b", "-s", "-f", "counts", file.as_str()]));

    assert_eq!(lines, vec!["->\t1", "!=\t2"]);
}

#[test]
fn missing_directory_and_undecodable_inputs_are_skipped() {
    let workspace = temp_workspace();
    let good = write(workspace.path(), "good.txt", b"qq");
    let bad = write(workspace.path(), "bad.bin", &[0xC3, 0x28, 0xFF]);
    let missing = workspace.path().join("missing.txt").to_string_lossy().into_owned();
    let dir = workspace.path().to_string_lossy().into_owned();

    let lines = stdout_lines(charfreq().args([
        "-q",
        "-f",
        "counts",
        bad.as_str(),
        missing.as_str(),
        dir.as_str(),
        good.as_str(),
    ]));

    assert_eq!(lines, vec!["q\t2"]);
}

#[test]
fn parallel_matches_sequential() {
    let workspace = temp_workspace();
    let files: Vec<String> = (0..9)
        .map(|i| {
            let content = format!("{}\n{}\n", "aab".repeat(i + 1), "c".repeat(i * 10 + 3));
            write(workspace.path(), &format!("f{}.txt", i), content.as_bytes())
        })
        .collect();

    let mut sequential_args = vec!["-q".to_string(), "-f".to_string(), "counts".to_string()];
    sequential_args.extend(files.iter().cloned());
    let mut parallel_args = sequential_args.clone();
    parallel_args.extend(["--threads".to_string(), "4".to_string()]);

    let sequential = stdout_lines(charfreq().args(&sequential_args));
    let parallel = stdout_lines(charfreq().args(&parallel_args));

    // Counts are all distinct here, so the order is fully determined
    assert_eq!(sequential, vec!["b\t45", "a\t90", "c\t387"]);
    assert_eq!(parallel, sequential);
}

#[test]
fn pattern_filters() {
    let workspace = temp_workspace();
    let file = write(workspace.path(), "s.txt", b"!@#@##");

    let only = stdout_lines(charfreq().args(["-q", "-f", "counts", "--only", "[@]", file.as_str()]));
    assert_eq!(only, vec!["@\t2"]);

    let excluded =
        stdout_lines(charfreq().args(["-q", "-f", "counts", "--exclude", "[@]", "-p", file.as_str()]));
    assert_eq!(excluded, vec!["!\t1", "#\t3"]);
}

#[test]
fn json_output_with_clean() {
    let workspace = temp_workspace();
    let file = write(workspace.path(), "j.txt", b"$$\x01");

    let lines = stdout_lines(charfreq().args(["-q", "--format", "json", file.as_str()]));
    assert_eq!(lines, vec!["{", "    \"\\u0001\": 1,", "    \"$\": 2", "}"]);

    let lines = stdout_lines(charfreq().args(["-q", "--format", "json", "--clean", file.as_str()]));
    assert_eq!(lines, vec!["{", "    \"$\": 2", "}"]);
}

#[test]
fn output_file() {
    let workspace = temp_workspace();
    let file = write(workspace.path(), "o.txt", b"kkm");
    let out = workspace.path().join("result.txt");

    charfreq()
        .args(["-q", "-f", "counts", "-o", out.to_str().unwrap(), file.as_str()])
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&out).unwrap(), "m\t1\nk\t2\n");
}

#[test]
fn invalid_pattern_fails() {
    let workspace = temp_workspace();
    let file = write(workspace.path(), "p.txt", b"abc");

    charfreq().args(["-q", "--only", "(", file.as_str()]).assert().failure();
}

#[test]
fn files_are_required() {
    charfreq().arg("--symbols").assert().failure();
}
