use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;
use validator::Validate;

use crate::config::SurveySettings;
use crate::models::{Gender, SurveyRow};

/// Errors that can occur while reading the survey export
#[derive(Debug, Error)]
pub enum SurveyError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("Unknown answer {value:?} in column {column:?} on line {line}")]
    UnknownAnswer {
        column: String,
        value: String,
        line: u64,
    },

    #[error("Invalid row on line {line}: {source}")]
    InvalidRow {
        line: u64,
        #[source]
        source: validator::ValidationErrors,
    },
}

/// Column positions resolved from the header row
struct Layout {
    name: usize,
    social: usize,
    gender: usize,
    /// (primary, dotted twin) per ranked wish column
    wishes: Vec<(usize, Option<usize>)>,
    partner: (usize, Option<usize>),
}

/// Reads survey form exports into [`SurveyRow`]s
///
/// Forms that were edited while collecting answers export a second copy of
/// a question with a trailing `.` in its header; a blank answer in the
/// original column is filled from that copy.
#[derive(Debug, Clone)]
pub struct SurveyReader {
    settings: SurveySettings,
}

impl SurveyReader {
    pub fn new(settings: SurveySettings) -> Self {
        Self { settings }
    }

    pub fn read_path<P: AsRef<Path>>(&self, path: P) -> Result<Vec<SurveyRow>, SurveyError> {
        let file = File::open(path.as_ref())?;
        let rows = self.read(file)?;
        tracing::info!("Read {} survey answers from {}", rows.len(), path.as_ref().display());
        Ok(rows)
    }

    pub fn read<R: Read>(&self, reader: R) -> Result<Vec<SurveyRow>, SurveyError> {
        let mut csv = ReaderBuilder::new().has_headers(true).from_reader(reader);
        let layout = self.layout(csv.headers()?)?;

        let mut rows = Vec::new();
        for record in csv.records() {
            let record = record?;
            rows.push(self.row(&layout, &record)?);
        }
        Ok(rows)
    }

    fn layout(&self, headers: &StringRecord) -> Result<Layout, SurveyError> {
        let find = |column: &str| headers.iter().position(|h| h.trim() == column);
        let require = |column: &str| {
            find(column).ok_or_else(|| SurveyError::MissingColumn(column.to_string()))
        };
        let with_twin = |column: &str| -> Result<(usize, Option<usize>), SurveyError> {
            Ok((require(column)?, find(&format!("{}.", column))))
        };

        let s = &self.settings;
        Ok(Layout {
            name: require(&s.name_column)?,
            social: require(&s.social_column)?,
            gender: require(&s.gender_column)?,
            wishes: s
                .wish_columns
                .iter()
                .map(|c| with_twin(c))
                .collect::<Result<_, _>>()?,
            partner: with_twin(&s.partner_column)?,
        })
    }

    fn row(&self, layout: &Layout, record: &StringRecord) -> Result<SurveyRow, SurveyError> {
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let s = &self.settings;

        let social = cell(record, layout.social).unwrap_or_default();
        let opted_in = match answer_index(&s.social_answers, &social) {
            Some(i) => i == 0,
            None => {
                return Err(SurveyError::UnknownAnswer {
                    column: s.social_column.clone(),
                    value: social,
                    line,
                })
            }
        };

        let gender_label = cell(record, layout.gender).unwrap_or_default();
        let gender = match answer_index(&s.genders, &gender_label) {
            Some(0) => Gender::Female,
            Some(_) => Gender::Male,
            None => {
                return Err(SurveyError::UnknownAnswer {
                    column: s.gender_column.clone(),
                    value: gender_label,
                    line,
                })
            }
        };

        let row = SurveyRow {
            name: cell(record, layout.name).unwrap_or_default(),
            gender,
            opted_in,
            wishes: layout
                .wishes
                .iter()
                .filter_map(|&column| twin_cell(record, column))
                .collect(),
            partner: twin_cell(record, layout.partner),
        };

        row.validate()
            .map_err(|source| SurveyError::InvalidRow { line, source })?;
        Ok(row)
    }
}

fn answer_index(answers: &[String; 2], value: &str) -> Option<usize> {
    answers.iter().position(|a| a == value)
}

/// Trimmed cell content, `None` when blank
fn cell(record: &StringRecord, index: usize) -> Option<String> {
    record
        .get(index)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn twin_cell(record: &StringRecord, (primary, twin): (usize, Option<usize>)) -> Option<String> {
    cell(record, primary).or_else(|| twin.and_then(|t| cell(record, t)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Hva er ditt navn?,Skal du delta på sosial del?,Hvilket kjønn er du?,Førstevalg,Andrevalg,Tredjevalg,Sosialt ønske";

    fn read(body: &str) -> Result<Vec<SurveyRow>, SurveyError> {
        let data = format!("{}\n{}", HEADER, body);
        SurveyReader::new(SurveySettings::default()).read(data.as_bytes())
    }

    #[test]
    fn test_reads_rows() {
        let rows = read("Anna,Ja,Jente,Kaja, Maja ,,Jakob\nJakob,Nei,Gutt,,,,\n").unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Anna");
        assert!(rows[0].opted_in);
        assert_eq!(rows[0].gender, Gender::Female);
        assert_eq!(rows[0].wishes, vec!["Kaja", "Maja"]);
        assert_eq!(rows[0].partner.as_deref(), Some("Jakob"));
        assert!(!rows[1].opted_in);
        assert_eq!(rows[1].gender, Gender::Male);
        assert!(rows[1].wishes.is_empty());
        assert_eq!(rows[1].partner, None);
    }

    #[test]
    fn test_duplicate_wishes_are_kept_for_the_registry() {
        let rows = read("Anna,Ja,Jente,Kaja,Kaja,,\n").unwrap();
        assert_eq!(rows[0].wishes, vec!["Kaja", "Kaja"]);
    }

    #[test]
    fn test_dotted_twin_fills_blanks() {
        let data = format!(
            "{},Førstevalg.,Sosialt ønske.\nAnna,Ja,Jente,,Maja,,,Kaja,Jo\nMaja,Ja,Jente,Anna,,,,Kaja,\n",
            HEADER
        );
        let rows = SurveyReader::new(SurveySettings::default())
            .read(data.as_bytes())
            .unwrap();

        assert_eq!(rows[0].wishes, vec!["Kaja", "Maja"]);
        assert_eq!(rows[0].partner.as_deref(), Some("Jo"));
        // primary column wins when both are filled
        assert_eq!(rows[1].wishes, vec!["Anna"]);
    }

    #[test]
    fn test_unknown_answer() {
        let err = read("Anna,Kanskje,Jente,,,,\n").unwrap_err();
        assert!(matches!(err, SurveyError::UnknownAnswer { line: 2, .. }));
    }

    #[test]
    fn test_blank_name_rejected() {
        let err = read(" ,Ja,Jente,,,,\n").unwrap_err();
        assert!(matches!(err, SurveyError::InvalidRow { .. }));
    }

    #[test]
    fn test_missing_column() {
        let err = SurveyReader::new(SurveySettings::default())
            .read("Hva er ditt navn?\nAnna\n".as_bytes())
            .unwrap_err();
        assert!(matches!(err, SurveyError::MissingColumn(_)));
    }
}
