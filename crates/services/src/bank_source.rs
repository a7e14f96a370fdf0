use std::path::Path;

use serde::Deserialize;

use quiz_core::model::{Question, QuestionBank, QuestionId, TopicName};

use crate::error::BankLoadError;

const BUILTIN_BANK: &str = include_str!("../data/questions.json");

/// One question as stored in bank files.
#[derive(Debug, Deserialize)]
struct QuestionRecord {
    #[serde(rename = "Type")]
    topic: String,
    #[serde(rename = "Q_Num")]
    number: u32,
    #[serde(rename = "Question")]
    prompt: String,
    #[serde(rename = "Options")]
    options: Vec<String>,
    #[serde(rename = "Answer", default)]
    answer: Option<String>,
}

/// Parse a JSON array of question records, keeping file order.
///
/// # Errors
///
/// Returns `BankLoadError` for malformed JSON or records that fail validation.
pub fn parse_bank(json: &str) -> Result<QuestionBank, BankLoadError> {
    let records: Vec<QuestionRecord> = serde_json::from_str(json)?;
    let questions = records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            let topic = TopicName::new(record.topic)
                .map_err(|source| BankLoadError::Topic { index, source })?;
            Ok(Question::new(
                QuestionId::new(record.number),
                topic,
                record.prompt,
                record.options,
                record.answer,
            )?)
        })
        .collect::<Result<Vec<_>, BankLoadError>>()?;
    Ok(QuestionBank::new(questions)?)
}

/// # Errors
///
/// Returns `BankLoadError::Io` if the file cannot be read, otherwise as [`parse_bank`].
pub fn load_bank_file(path: &Path) -> Result<QuestionBank, BankLoadError> {
    let json = std::fs::read_to_string(path)?;
    let bank = parse_bank(&json)?;
    log::info!("loaded {} questions from {}", bank.len(), path.display());
    Ok(bank)
}

/// The question bank compiled into the binary.
///
/// # Errors
///
/// Only fails if the embedded data is invalid.
pub fn builtin_bank() -> Result<QuestionBank, BankLoadError> {
    parse_bank(BUILTIN_BANK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_bank_has_four_sections() {
        let bank = builtin_bank().unwrap();
        let topics: Vec<_> = bank
            .topics()
            .iter()
            .map(|t| t.as_str().to_string())
            .collect();
        assert_eq!(
            topics,
            vec!["Maths", "Logical Reasoning", "English", "Personality"]
        );
        assert_eq!(bank.len(), 8);

        let personality = bank.get(QuestionId::new(21)).unwrap();
        assert!(!personality.is_gradable());
    }

    #[test]
    fn reports_bad_records() {
        let missing_options = r#"[{"Type": "Maths", "Q_Num": 1, "Question": "Q", "Options": ["1"], "Answer": "1"}]"#;
        assert!(matches!(
            parse_bank(missing_options),
            Err(BankLoadError::Question(_))
        ));

        let blank_topic = r#"[{"Type": " ", "Q_Num": 1, "Question": "Q", "Options": ["1", "2"]}]"#;
        assert!(matches!(
            parse_bank(blank_topic),
            Err(BankLoadError::Topic { index: 0, .. })
        ));

        assert!(matches!(parse_bank("{"), Err(BankLoadError::Json(_))));
        assert!(matches!(parse_bank("[]"), Err(BankLoadError::Bank(_))));
    }
}
