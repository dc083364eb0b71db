use serde::{Deserialize, Deserializer};
use std::io::Read;

use super::TranscriptImportError;

/// One CSV row, typed. A row without a component only declares the course.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TranscriptLine {
    pub(crate) line: usize,
    pub(crate) semester: String,
    pub(crate) order: Option<i32>,
    pub(crate) course: String,
    pub(crate) credit: u32,
    pub(crate) bonus: Option<f64>,
    pub(crate) is_gpa: Option<bool>,
    pub(crate) component: Option<ComponentLine>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ComponentLine {
    pub(crate) name: String,
    pub(crate) weight: f64,
    pub(crate) score: f64,
}

pub(crate) fn parse_lines<R: Read>(reader: R) -> Result<Vec<TranscriptLine>, TranscriptImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut lines = Vec::new();

    for (index, record) in csv_reader.deserialize::<TranscriptRow>().enumerate() {
        // Header is line 1.
        let line = index + 2;
        let row = record?;
        lines.push(row.into_line(line)?);
    }

    Ok(lines)
}

#[derive(Debug, Deserialize)]
struct TranscriptRow {
    #[serde(rename = "Semester")]
    semester: String,
    #[serde(rename = "Order", default, deserialize_with = "empty_string_as_none")]
    order: Option<String>,
    #[serde(rename = "Course")]
    course: String,
    #[serde(rename = "Credit")]
    credit: String,
    #[serde(rename = "Bonus", default, deserialize_with = "empty_string_as_none")]
    bonus: Option<String>,
    #[serde(
        rename = "Counts Toward GPA",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    counts_toward_gpa: Option<String>,
    #[serde(rename = "Component", default, deserialize_with = "empty_string_as_none")]
    component: Option<String>,
    #[serde(rename = "Weight", default, deserialize_with = "empty_string_as_none")]
    weight: Option<String>,
    #[serde(rename = "Score", default, deserialize_with = "empty_string_as_none")]
    score: Option<String>,
}

impl TranscriptRow {
    fn into_line(self, line: usize) -> Result<TranscriptLine, TranscriptImportError> {
        let invalid = |message: String| TranscriptImportError::InvalidRow { line, message };

        if self.semester.is_empty() {
            return Err(invalid("semester name is empty".to_string()));
        }
        if self.course.is_empty() {
            return Err(invalid("course name is empty".to_string()));
        }

        let credit = self
            .credit
            .parse::<u32>()
            .map_err(|_| invalid(format!("credit '{}' is not a whole number", self.credit)))?;
        let order = self
            .order
            .as_deref()
            .map(|raw| {
                raw.parse::<i32>()
                    .map_err(|_| invalid(format!("order '{raw}' is not an integer")))
            })
            .transpose()?;
        let bonus = self
            .bonus
            .as_deref()
            .map(|raw| parse_number("bonus", raw).map_err(invalid))
            .transpose()?;
        let is_gpa = self
            .counts_toward_gpa
            .as_deref()
            .map(|raw| parse_flag(raw).map_err(invalid))
            .transpose()?;

        let component = match (self.component, self.weight, self.score) {
            (None, None, None) => None,
            (Some(name), Some(weight), Some(score)) => Some(ComponentLine {
                name,
                weight: parse_number("weight", &weight).map_err(invalid)?,
                score: parse_number("score", &score).map_err(invalid)?,
            }),
            (None, _, _) => {
                return Err(invalid(
                    "weight or score given without a component name".to_string(),
                ))
            }
            (Some(name), _, _) => {
                return Err(invalid(format!(
                    "component '{name}' needs both a weight and a score"
                )))
            }
        };

        Ok(TranscriptLine {
            line,
            semester: self.semester,
            order,
            course: self.course,
            credit,
            bonus,
            is_gpa,
            component,
        })
    }
}

fn parse_number(field: &str, raw: &str) -> Result<f64, String> {
    raw.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| format!("{field} '{raw}' is not a number"))
}

fn parse_flag(raw: &str) -> Result<bool, String> {
    match raw.to_ascii_lowercase().as_str() {
        "yes" | "y" | "true" | "1" => Ok(true),
        "no" | "n" | "false" | "0" => Ok(false),
        _ => Err(format!("'{raw}' is not a yes/no value")),
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Semester,Order,Course,Credit,Bonus,Counts Toward GPA,Component,Weight,Score\n";

    #[test]
    fn parses_typed_lines() {
        let csv = format!("{HEADER}Fall 2024,1,Calculus,4,0.5,yes,Midterm,40,7.5\n");
        let lines = parse_lines(csv.as_bytes()).expect("parses");

        assert_eq!(
            lines,
            vec![TranscriptLine {
                line: 2,
                semester: "Fall 2024".to_string(),
                order: Some(1),
                course: "Calculus".to_string(),
                credit: 4,
                bonus: Some(0.5),
                is_gpa: Some(true),
                component: Some(ComponentLine {
                    name: "Midterm".to_string(),
                    weight: 40.0,
                    score: 7.5,
                }),
            }]
        );
    }

    #[test]
    fn blank_optional_cells_become_none() {
        let csv = format!("{HEADER}Fall 2024,,Physical Education,2,,,,,\n");
        let lines = parse_lines(csv.as_bytes()).expect("parses");

        assert_eq!(lines[0].order, None);
        assert_eq!(lines[0].bonus, None);
        assert_eq!(lines[0].is_gpa, None);
        assert!(lines[0].component.is_none());
    }

    #[test]
    fn optional_columns_may_be_missing() {
        let csv = "Semester,Course,Credit,Component,Weight,Score\nSpring 2025,Physics,3,Lab,30,9\n";
        let lines = parse_lines(csv.as_bytes()).expect("parses");

        assert_eq!(lines[0].order, None);
        assert_eq!(lines[0].component.as_ref().map(|c| c.score), Some(9.0));
    }

    #[test]
    fn reports_line_numbers_for_bad_values() {
        let csv = format!(
            "{HEADER}Fall 2024,1,Calculus,4,,,Midterm,40,7.5\nFall 2024,1,Calculus,four,,,Final,60,8\n"
        );

        match parse_lines(csv.as_bytes()) {
            Err(TranscriptImportError::InvalidRow { line, message }) => {
                assert_eq!(line, 3);
                assert!(message.contains("credit"));
            }
            other => panic!("expected invalid row, got {other:?}"),
        }
    }

    #[test]
    fn rejects_half_specified_components() {
        let csv = format!("{HEADER}Fall 2024,1,Calculus,4,,,Midterm,40,\n");
        assert!(matches!(
            parse_lines(csv.as_bytes()),
            Err(TranscriptImportError::InvalidRow { line: 2, .. })
        ));
    }

    #[test]
    fn parses_flag_spellings() {
        assert_eq!(parse_flag("No"), Ok(false));
        assert_eq!(parse_flag("TRUE"), Ok(true));
        assert!(parse_flag("maybe").is_err());
    }
}
