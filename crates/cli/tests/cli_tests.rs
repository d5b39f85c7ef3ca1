// Integration tests for the vdeck binary: exit codes, output files, and
// the --json stdout contract.
//
// Each test runs in its own temp directory with HOME/XDG_CONFIG_HOME
// pointed inside it, so a developer's real settings never leak in.
//
// Run with: cargo test -p vocabdeck-cli --test cli_tests -- --nocapture

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

const NOTES: &str = "\
FRENCH WORDS - WEEK 1
1. apple - pomme
2. dog -> chien
• cat => chat
Subject + verb + object - word order
This line is just a sentence.
house: maison
";

struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self { dir: TempDir::new().unwrap() }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn write(&self, name: &str, content: &str) -> PathBuf {
        let p = self.path(name);
        fs::write(&p, content).unwrap();
        p
    }

    fn config_dir(&self) -> PathBuf {
        self.dir.path().join("xdg")
    }

    fn vdeck(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_vdeck"));
        cmd.current_dir(self.dir.path())
            .env("HOME", self.dir.path())
            .env("XDG_CONFIG_HOME", self.config_dir())
            .env_remove("VDECK_CONFIG")
            .env_remove("VDECK_LOG");
        cmd
    }

    fn run(&self, args: &[&str]) -> Output {
        self.vdeck().args(args).output().expect("run vdeck")
    }
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

/// Assert stdout is a single, parseable JSON value.
fn assert_single_json(out: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&out.stdout);
    let trimmed = stdout.trim();
    assert!(!trimmed.is_empty(), "stdout should not be empty");
    serde_json::from_str(trimmed)
        .unwrap_or_else(|e| panic!("stdout must be one JSON value.\nParse error: {e}\nstdout:\n{trimmed}"))
}

/// Unpack collection.anki2 from an .apkg into `scratch` and open it.
fn open_collection(apkg: &Path, scratch: &Path) -> rusqlite::Connection {
    let mut archive = zip::ZipArchive::new(File::open(apkg).unwrap()).unwrap();
    let mut bytes = Vec::new();
    archive.by_name("collection.anki2").unwrap().read_to_end(&mut bytes).unwrap();
    let db = scratch.join("check.anki2");
    fs::write(&db, bytes).unwrap();
    rusqlite::Connection::open(&db).unwrap()
}

fn note_fields(apkg: &Path, scratch: &Path) -> Vec<String> {
    let conn = open_collection(apkg, scratch);
    let mut stmt = conn.prepare("SELECT flds FROM notes ORDER BY id").unwrap();
    let rows = stmt
        .query_map([], |r| r.get::<_, String>(0))
        .unwrap()
        .map(|r| r.unwrap())
        .collect();
    rows
}

// ===========================================================================
// convert
// ===========================================================================

#[test]
fn convert_writes_apkg_next_to_cwd() {
    let sb = Sandbox::new();
    sb.write("french.txt", NOTES);

    let out = sb.run(&["convert", "french.txt"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));

    let apkg = sb.path("french.apkg");
    assert!(apkg.exists());
    assert_eq!(
        note_fields(&apkg, sb.dir.path()),
        vec!["apple\x1fpomme", "dog\x1fchien", "cat\x1fchat"]
    );

    let err = stderr(&out);
    assert!(err.contains("--- PARSING REPORT ---"), "stderr: {err}");
    assert!(err.contains("Cards created:    3"));
    assert!(err.contains("Lines rejected:   4"));
    assert!(err.contains("All Caps Header"));
    assert!(err.contains("Grammar Pattern (S+Verb)"));
    assert!(err.contains("wrote 3 card(s)"));
}

#[test]
fn deck_id_flag_fixes_the_card_deck() {
    let sb = Sandbox::new();
    sb.write("french.txt", NOTES);

    let out = sb.run(&["convert", "french.txt", "--deck", "French", "--deck-id", "1234567890", "-q"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));

    let conn = open_collection(&sb.path("french.apkg"), sb.dir.path());
    let did: i64 = conn.query_row("SELECT DISTINCT did FROM cards", [], |r| r.get(0)).unwrap();
    assert_eq!(did, 1_234_567_890);
    let decks: String = conn.query_row("SELECT decks FROM col", [], |r| r.get(0)).unwrap();
    let decks: serde_json::Value = serde_json::from_str(&decks).unwrap();
    assert_eq!(decks["1234567890"]["name"], "French");
}

#[test]
fn convert_to_tsv_with_explicit_output() {
    let sb = Sandbox::new();
    sb.write("words.md", "Hund - dog\nKatze\tcat\n");

    let out = sb.run(&["convert", "words.md", "-t", "tsv", "-o", "clean.tsv", "-q"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert!(stderr(&out).is_empty(), "quiet run printed: {}", stderr(&out));
    assert_eq!(fs::read_to_string(sb.path("clean.tsv")).unwrap(), "Hund\tdog\nKatze\tcat\n");
}

#[test]
fn convert_csv_input_rows() {
    let sb = Sandbox::new();
    sb.write("list.csv", "gato,cat\nperro,dog\n");

    let out = sb.run(&["convert", "list.csv", "-t", "csv", "-o", "out.csv"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(fs::read_to_string(sb.path("out.csv")).unwrap(), "gato,cat\nperro,dog\n");
}

#[test]
fn convert_json_summary_is_single_value() {
    let sb = Sandbox::new();
    sb.write("french.txt", NOTES);

    let out = sb.run(&["convert", "french.txt", "--deck", "French::Week 1", "--json"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));

    let val = assert_single_json(&out);
    assert_eq!(val["input"], "french.txt");
    assert_eq!(val["output"], "french.apkg");
    assert_eq!(val["target"], "apkg");
    assert_eq!(val["deck"], "French::Week 1");
    assert_eq!(val["stats"]["total"], 7);
    assert_eq!(val["stats"]["accepted"], 3);
    assert_eq!(val["stats"]["rejected"], 4);
    assert_eq!(val["rejections"]["NoSeparator"], 2);
}

#[test]
fn convert_from_stdin_uses_pasted_text_stem() {
    let sb = Sandbox::new();
    let mut child = sb
        .vdeck()
        .args(["convert", "-", "-q"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(b"un - one\ndeux - two\n").unwrap();
    let out = child.wait_with_output().unwrap();

    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let apkg = sb.path("pasted_text.apkg");
    assert_eq!(note_fields(&apkg, sb.dir.path()).len(), 2);
}

#[test]
fn max_term_words_flag_tightens_the_rule() {
    let sb = Sandbox::new();
    sb.write("w.txt", "to look forward to - attendre avec impatience\nchat - cat\n");

    let out = sb.run(&["convert", "w.txt", "--max-term-words", "3", "--json", "-q"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let val = assert_single_json(&out);
    assert_eq!(val["stats"]["accepted"], 1);
    assert_eq!(val["rejections"]["TermTooLong"], 1);
}

// ===========================================================================
// failure exit codes
// ===========================================================================

#[test]
fn no_cards_exits_5_and_writes_nothing() {
    let sb = Sandbox::new();
    sb.write("prose.txt", "Just some prose.\nNothing to learn here.\n");

    let out = sb.run(&["convert", "prose.txt"]);
    assert_eq!(out.status.code(), Some(5));
    assert!(!sb.path("prose.apkg").exists());
    let err = stderr(&out);
    assert!(err.contains("error: no cards created"), "stderr: {err}");
    assert!(err.contains("hint:"));
    assert!(err.contains("No Separator"));
}

#[test]
fn missing_input_exits_3() {
    let sb = Sandbox::new();
    let out = sb.run(&["convert", "nope.txt"]);
    assert_eq!(out.status.code(), Some(3));
    assert!(stderr(&out).contains("file not found"));
}

#[test]
fn unsupported_extension_exits_4_with_hint() {
    let sb = Sandbox::new();
    sb.write("scan.pdf", "%PDF-1.4");
    let out = sb.run(&["convert", "scan.pdf"]);
    assert_eq!(out.status.code(), Some(4));
    let err = stderr(&out);
    assert!(err.contains("unsupported file format: .pdf"));
    assert!(err.contains("--from"));
}

#[test]
fn from_flag_overrides_extension() {
    let sb = Sandbox::new();
    sb.write("notes.dat", "uno - one\n");
    let out = sb.run(&["convert", "notes.dat", "--from", "text", "-q"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert!(sb.path("notes.apkg").exists());
}

#[test]
fn bad_arguments_exit_2() {
    let sb = Sandbox::new();
    let out = sb.run(&["convert", "x.txt", "--max-term-words", "0"]);
    assert_eq!(out.status.code(), Some(2));
    let out = sb.run(&["convert"]);
    assert_eq!(out.status.code(), Some(2));
}

// ===========================================================================
// check
// ===========================================================================

#[test]
fn check_json_is_full_classification() {
    let sb = Sandbox::new();
    sb.write("french.txt", NOTES);

    let out = sb.run(&["check", "french.txt", "--json"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let val = assert_single_json(&out);
    assert_eq!(val["accepted"].as_array().unwrap().len(), 3);
    assert_eq!(val["accepted"][1]["term"], "dog");
    assert_eq!(val["rejected"][0]["reason"], "AllCapsHeader");
    assert_eq!(val["rejected"][0]["index"], 0);
    assert_eq!(val["rejected"][1]["reason"], "GrammarPattern");
    assert!(!sb.path("french.apkg").exists());
}

#[test]
fn check_all_lists_every_line() {
    let sb = Sandbox::new();
    sb.write("french.txt", NOTES);

    let out = sb.run(&["check", "french.txt", "--all"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    let rows: Vec<&str> = stdout.lines().skip_while(|l| !l.starts_with("--- All")).skip(1).collect();
    assert_eq!(rows.len(), 7);
    assert!(rows[1].contains("apple = pomme"));
    assert!(rows[6].contains("house: maison"));
}

#[test]
fn check_with_zero_cards_still_succeeds() {
    let sb = Sandbox::new();
    sb.write("prose.txt", "Only prose.\n");
    let out = sb.run(&["check", "prose.txt"]);
    assert!(out.status.success());
}

// ===========================================================================
// settings
// ===========================================================================

fn write_user_settings(sb: &Sandbox, content: &str) -> PathBuf {
    let dir = sb.config_dir().join("vocabdeck");
    fs::create_dir_all(&dir).unwrap();
    let p = dir.join("settings.toml");
    fs::write(&p, content).unwrap();
    p
}

#[test]
fn user_settings_supply_deck_and_report_limits() {
    let sb = Sandbox::new();
    write_user_settings(&sb, "[deck]\nname = \"Français\"\n\n[report]\nmax_rejections = 1\n");
    sb.write("french.txt", NOTES);

    let out = sb.run(&["convert", "french.txt", "--json"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(assert_single_json(&out)["deck"], "Français");
    let err = stderr(&out);
    assert!(err.contains("(first 1)"));
    assert!(err.contains("... and 3 more"));
}

#[test]
fn malformed_user_settings_fall_back_to_defaults() {
    let sb = Sandbox::new();
    write_user_settings(&sb, "[deck\nname = ");
    sb.write("w.txt", "uno - one\n");

    let out = sb.run(&["convert", "w.txt", "--json", "-q"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(assert_single_json(&out)["deck"], "Imported Vocabulary");
    assert!(stderr(&out).contains("using default settings"));
}

#[test]
fn malformed_explicit_config_exits_7() {
    let sb = Sandbox::new();
    sb.write("bad.toml", "[classifier]\nmax_term_words = 0\n");
    sb.write("w.txt", "uno - one\n");

    let out = sb.run(&["--config", "bad.toml", "convert", "w.txt"]);
    assert_eq!(out.status.code(), Some(7));
    assert!(stderr(&out).contains("max_term_words"));
}

#[test]
fn config_path_and_show() {
    let sb = Sandbox::new();
    write_user_settings(&sb, "[classifier]\nmax_term_words = 4\n");

    let out = sb.run(&["config", "path"]);
    assert!(out.status.success());
    let path = String::from_utf8_lossy(&out.stdout).trim().to_string();
    assert!(path.ends_with("settings.toml"), "path: {path}");

    let out = sb.run(&["config", "show"]);
    assert!(out.status.success());
    let shown = String::from_utf8_lossy(&out.stdout);
    assert!(shown.contains("max_term_words = 4"), "shown: {shown}");
    assert!(shown.contains("name = \"Imported Vocabulary\""));
}
