//! End-to-end conversion of legacy trees.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use rstest::rstest;
use testset_core::TestSet;
use testset_legacy::{CONVERTED_VERSION, ConvertError, convert};
use tracing_subscriber::fmt::MakeWriter;

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/legacy")
}

/// Log sink shared with a scoped subscriber.
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Captured {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn question_files(area: &Path) -> Vec<String> {
    let mut names: Vec<_> = fs::read_dir(area)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name != "metadata.yaml")
        .collect();
    names.sort();
    names
}

#[test]
fn unsupported_question_is_skipped_with_warning() {
    let tmp = tempfile::tempdir().unwrap();
    let target = tmp.path().join("converted");
    let logs = Captured::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_ansi(false)
        .finish();

    let conversion =
        tracing::subscriber::with_default(subscriber, || convert(&fixture(), &target)).unwrap();

    assert_eq!(question_files(&target.join("01_first")), vec!["1.yaml"]);
    assert_eq!(conversion.skipped.len(), 1);
    assert!(conversion.skipped[0].source.ends_with("01_first/2"));
    assert!(conversion.skipped[0]
        .reason
        .contains("unsupported question type 'open'"));

    let logs = logs.text();
    assert!(logs.contains("WARN"));
    assert!(logs.contains("skipping legacy entry"));
}

#[test]
fn converted_graph_is_loaded_and_lints() {
    let tmp = tempfile::tempdir().unwrap();
    let target = tmp.path().join("converted");
    let conversion = convert(&fixture(), &target).unwrap();
    let testset = &conversion.testset;

    assert!(testset.is_loaded());
    assert_eq!(testset.description().unwrap(), "Demo testset for SelfTest");
    assert_eq!(testset.version().unwrap(), CONVERTED_VERSION);
    let areas: Vec<_> = testset.areas().keys().unwrap().cloned().collect();
    assert_eq!(areas, vec!["01_first".to_string(), "02_second".to_string()]);

    let question = testset.area("01_first").unwrap().question("1").unwrap();
    assert!(question.is_loaded());
    assert_eq!(question.identity(), "converted/01_first/1");
    assert_eq!(
        question.prompt().unwrap(),
        "<p>From following possibilities choose <strong>first</strong> possibility.</p>"
    );

    testset.lint().unwrap();
}

#[test]
fn converted_graph_mirrors_disk() {
    let tmp = tempfile::tempdir().unwrap();
    let target = tmp.path().join("converted");
    let conversion = convert(&fixture(), &target).unwrap();

    let reopened = TestSet::open(&target);
    assert_eq!(reopened.render().unwrap(), conversion.testset.render().unwrap());
    assert_eq!(reopened.snapshot().unwrap(), conversion.testset.snapshot().unwrap());
    reopened.lint().unwrap();
}

#[test]
fn answers_keep_file_order() {
    let tmp = tempfile::tempdir().unwrap();
    let conversion = convert(&fixture(), &tmp.path().join("converted")).unwrap();

    let question = conversion
        .testset
        .area("02_second")
        .unwrap()
        .question("1")
        .unwrap();
    let answers: Vec<_> = question
        .answers()
        .unwrap()
        .iter()
        .map(|(id, text)| format!("{id}) {text}"))
        .collect();
    assert_eq!(answers, vec!["a) Venus", "b) Mercury", "c) Mars"]);
    assert_eq!(question.correct().unwrap(), "b");
}

#[test]
fn directories_without_quota_are_not_areas() {
    let tmp = tempfile::tempdir().unwrap();
    let target = tmp.path().join("converted");
    convert(&fixture(), &target).unwrap();
    assert!(!target.join("notes").exists());
}

#[test]
fn second_conversion_into_same_target_collides() {
    let tmp = tempfile::tempdir().unwrap();
    let target = tmp.path().join("converted");
    convert(&fixture(), &target).unwrap();

    assert!(matches!(
        convert(&fixture(), &target),
        Err(ConvertError::TargetCollision { .. })
    ));
}

#[test]
fn broken_area_does_not_stop_siblings() {
    let tmp = tempfile::tempdir().unwrap();
    let legacy = tmp.path().join("legacy");
    fs::create_dir_all(legacy.join("a_broken")).unwrap();
    fs::create_dir_all(legacy.join("b_fine/1")).unwrap();
    fs::write(legacy.join("description"), "Mixed").unwrap();
    fs::write(legacy.join("a_broken/questions_to_test.txt"), "many").unwrap();
    fs::write(legacy.join("b_fine/questions_to_test.txt"), "1").unwrap();
    fs::write(
        legacy.join("b_fine/1/config"),
        "[question]\ntype = abc\ntimeout = 5\nquestion = Yes?\nanswers = @answers\ncorrect = y\n",
    )
    .unwrap();
    fs::write(legacy.join("b_fine/1/answers"), "y) yes\nn) no\n").unwrap();

    let target = tmp.path().join("new");
    let conversion = convert(&legacy, &target).unwrap();

    assert_eq!(conversion.skipped.len(), 1);
    assert!(conversion.skipped[0].source.ends_with("a_broken"));
    assert!(!target.join("a_broken").exists());
    let areas: Vec<_> = conversion.testset.areas().keys().unwrap().cloned().collect();
    assert_eq!(areas, vec!["b_fine".to_string()]);
    conversion.testset.lint().unwrap();
}

#[rstest]
#[case::bad_timeout("[question]\ntype = abc\ntimeout = soon\nquestion = Q\nanswers = @answers\ncorrect = a\n")]
#[case::missing_correct("[question]\ntype = abc\ntimeout = 5\nquestion = Q\nanswers = @answers\n")]
#[case::missing_prompt_file("[question]\ntype = abc\ntimeout = 5\nquestion = @nowhere.html\nanswers = @answers\ncorrect = a\n")]
#[case::wrong_section("[questions]\ntype = abc\n")]
#[case::not_ini("type abc\n")]
fn broken_question_is_skipped(#[case] config: &str) {
    let tmp = tempfile::tempdir().unwrap();
    let legacy = tmp.path().join("legacy");
    for question in ["1", "2"] {
        fs::create_dir_all(legacy.join("area").join(question)).unwrap();
        fs::write(legacy.join("area").join(question).join("answers"), "a) A\n").unwrap();
    }
    fs::write(legacy.join("description"), "Broken").unwrap();
    fs::write(legacy.join("area/questions_to_test.txt"), "1").unwrap();
    fs::write(legacy.join("area/1/config"), config).unwrap();
    fs::write(
        legacy.join("area/2/config"),
        "[question]\ntype = abc\ntimeout = 5\nquestion = Fine\nanswers = @answers\ncorrect = a\n",
    )
    .unwrap();

    let target = tmp.path().join("new");
    let conversion = convert(&legacy, &target).unwrap();

    assert_eq!(conversion.skipped.len(), 1);
    assert!(conversion.skipped[0].source.ends_with("area/1"));
    assert_eq!(question_files(&target.join("area")), vec!["2.yaml"]);
}

#[test]
fn question_named_like_area_metadata_is_skipped() {
    let tmp = tempfile::tempdir().unwrap();
    let legacy = tmp.path().join("legacy");
    fs::create_dir_all(&legacy).unwrap();
    fs::write(legacy.join("description"), "Clash").unwrap();
    fs::create_dir_all(legacy.join("area")).unwrap();
    fs::write(legacy.join("area/questions_to_test.txt"), "1").unwrap();
    for question in ["1", "metadata"] {
        let dir = legacy.join("area").join(question);
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("config"),
            "[question]\ntype = abc\ntimeout = 5\nquestion = Q\nanswers = @answers\ncorrect = a\n",
        )
        .unwrap();
        fs::write(dir.join("answers"), "a) A\nb) B\n").unwrap();
    }

    let target = tmp.path().join("new");
    let conversion = convert(&legacy, &target).unwrap();

    assert_eq!(conversion.skipped.len(), 1);
    assert!(conversion.skipped[0].source.ends_with("area/metadata"));
    assert!(conversion.skipped[0].reason.contains("metadata.yaml"));
    let ids: Vec<_> = conversion
        .testset
        .area("area")
        .unwrap()
        .questions()
        .keys()
        .unwrap()
        .cloned()
        .collect();
    assert_eq!(ids, vec!["1".to_string()]);

    let reopened = TestSet::open(&target);
    assert_eq!(reopened.snapshot().unwrap(), conversion.testset.snapshot().unwrap());
    reopened.lint().unwrap();
    conversion.testset.lint().unwrap();
}
