//! Reading nodes of a legacy tree.
//!
//! ```text
//! root/description                       plain text
//! root/<area>/questions_to_test.txt      plain text integer
//! root/<area>/<question>/config          INI, section [question]
//! root/<area>/<question>/<referenced>    prompt and answer list files
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use testset_core::lint::SUPPORTED_KIND;
use testset_core::{LegacyLayout, QuestionMeta};

use crate::error::ConvertError;
use crate::ini::Ini;

/// Marker that turns a `question` value into a file reference.
const FILE_REFERENCE: char = '@';

fn read_text(path: &Path) -> Result<String, ConvertError> {
    fs::read_to_string(path).map_err(|error| ConvertError::from_read(path, error))
}

fn parse_number(path: &Path, value: &str) -> Result<i64, ConvertError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConvertError::InvalidNumber {
            path: path.to_path_buf(),
            value: value.trim().to_string(),
        })
}

/// Trimmed test set description from the root description file.
pub fn read_description(root: &Path, legacy: &LegacyLayout) -> Result<String, ConvertError> {
    Ok(read_text(&root.join(&legacy.description_file))?.trim().to_string())
}

/// Whether `dir` is a legacy area, i.e. holds the quota file.
#[must_use]
pub fn is_area(dir: &Path, legacy: &LegacyLayout) -> bool {
    dir.join(&legacy.quota_file).is_file()
}

/// Whether `dir` is a legacy question, i.e. holds the INI config.
#[must_use]
pub fn is_question(dir: &Path, legacy: &LegacyLayout) -> bool {
    dir.join(&legacy.question_config).is_file()
}

/// Number of questions to ask, from the area quota file.
pub fn read_quota(area: &Path, legacy: &LegacyLayout) -> Result<i64, ConvertError> {
    let path = area.join(&legacy.quota_file);
    let text = read_text(&path)?;
    parse_number(&path, &text)
}

/// Parse an answer list: one answer per line, id in the first character and
/// text from the third character on.
#[must_use]
pub fn parse_answers(text: &str) -> IndexMap<String, String> {
    let mut answers = IndexMap::new();
    for line in text.lines().filter(|line| !line.trim().is_empty()) {
        let mut chars = line.chars();
        let Some(id) = chars.next() else {
            continue;
        };
        chars.next();
        answers.insert(id.to_string(), chars.as_str().trim().to_string());
    }
    answers
}

/// Resolve a referenced file relative to the question directory.
fn referenced_file(
    question: &Path,
    config: &Path,
    reference: &str,
) -> Result<PathBuf, ConvertError> {
    if reference.trim().is_empty() {
        return Err(ConvertError::InvalidReference {
            path: config.to_path_buf(),
            value: reference.to_string(),
        });
    }
    Ok(question.join(reference.trim()))
}

/// Read a legacy question directory into question metadata.
///
/// Fails with [`ConvertError::UnsupportedQuestionType`] before reading
/// anything else when the type is not `abc`.
pub fn read_question(question: &Path, legacy: &LegacyLayout) -> Result<QuestionMeta, ConvertError> {
    let config_path = question.join(&legacy.question_config);
    let config = Ini::read(&config_path)?;
    let section = legacy.question_section.as_str();
    let value = |key: &str| {
        config
            .get(section, key)
            .ok_or_else(|| ConvertError::MissingKey {
                path: config_path.clone(),
                section: section.to_string(),
                key: key.to_string(),
            })
    };

    let kind = value("type")?;
    if kind != SUPPORTED_KIND {
        return Err(ConvertError::UnsupportedQuestionType {
            path: question.to_path_buf(),
            kind: kind.to_string(),
        });
    }

    let timeout = parse_number(&config_path, value("timeout")?)?;

    let prompt = value("question")?;
    let prompt = match prompt.strip_prefix(FILE_REFERENCE) {
        Some(reference) => read_text(&referenced_file(question, &config_path, reference)?)?
            .trim()
            .to_string(),
        None => prompt.to_string(),
    };

    // The answers value always carries a one-character marker before the file name.
    let answers_ref = value("answers")?;
    let mut marker = answers_ref.chars();
    marker.next();
    let answers_path = referenced_file(question, &config_path, marker.as_str())?;
    let answers = parse_answers(&read_text(&answers_path)?);

    Ok(QuestionMeta {
        kind: kind.to_string(),
        timeout,
        prompt,
        answers,
        correct: value("correct")?.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn write_question(dir: &Path, config: &str) {
        fs::create_dir_all(dir).unwrap();
        fs::write(dir.join("config"), config).unwrap();
        fs::write(dir.join("question.html"), "\n  <p>Pick one</p>\n").unwrap();
        fs::write(dir.join("answers"), "a) Apple\nb) Banana \n\nc)  Cherry\n").unwrap();
    }

    #[test]
    fn answers_use_first_char_and_text_after_separator() {
        let answers = parse_answers("a) one\nb two\r\nc)\n\n");
        let pairs: Vec<_> = answers
            .iter()
            .map(|(id, text)| (id.as_str(), text.as_str()))
            .collect();
        assert_eq!(pairs, vec![("a", "one"), ("b", "two"), ("c", "")]);
    }

    #[test]
    fn reads_question_with_file_references() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("q1");
        write_question(
            &dir,
            "[question]\ntype = abc\ntimeout = 20\nquestion = @question.html\nanswers = @answers\ncorrect = b\n",
        );

        let meta = read_question(&dir, &LegacyLayout::default()).unwrap();
        assert_eq!(meta.kind, "abc");
        assert_eq!(meta.timeout, 20);
        assert_eq!(meta.prompt, "<p>Pick one</p>");
        assert_eq!(meta.correct, "b");
        assert_eq!(meta.answers["c"], "Cherry");
        assert_eq!(meta.answers.len(), 3);
    }

    #[test]
    fn inline_prompt_is_kept_verbatim() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("q1");
        write_question(
            &dir,
            "[question]\ntype = abc\ntimeout = 20\nquestion = What is 1:2?\nanswers = @answers\ncorrect = a\n",
        );

        let meta = read_question(&dir, &LegacyLayout::default()).unwrap();
        assert_eq!(meta.prompt, "What is 1:2?");
    }

    #[test]
    fn unsupported_type_is_reported_first() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("q2");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config"), "[question]\ntype = open\n").unwrap();

        match read_question(&dir, &LegacyLayout::default()) {
            Err(ConvertError::UnsupportedQuestionType { kind, .. }) => assert_eq!(kind, "open"),
            other => panic!("expected unsupported type, got {other:?}"),
        }
    }

    #[test]
    fn missing_key_names_section_and_key() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("q3");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config"), "[question]\ntype = abc\n").unwrap();

        let error = read_question(&dir, &LegacyLayout::default()).unwrap_err();
        assert!(matches!(error, ConvertError::MissingKey { ref key, .. } if key == "timeout"));
    }

    #[test]
    fn quota_must_be_an_integer() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("questions_to_test.txt"), "3\n").unwrap();
        assert_eq!(read_quota(tmp.path(), &LegacyLayout::default()).unwrap(), 3);

        fs::write(tmp.path().join("questions_to_test.txt"), "three").unwrap();
        assert!(matches!(
            read_quota(tmp.path(), &LegacyLayout::default()),
            Err(ConvertError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn description_is_trimmed() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("description"), "  Old set \n").unwrap();
        assert_eq!(
            read_description(tmp.path(), &LegacyLayout::default()).unwrap(),
            "Old set"
        );
    }
}
