//! Plain-text tables.
//!
//! ```text
//! Isle of Anglesey / Ynys Môn (W06000001)
//! Population (pop)
//!       1991        1992     Average       Diff.     % Diff.
//! 100.000000  110.000000  105.000000   10.000000   10.000000
//!
//! ```

use std::fmt;

use crate::model::area::{LANG_CYM, LANG_ENG};
use crate::model::{Area, AreaStore, Measure};

/// Digits after the decimal point for every value.
const DECIMAL_PRECISION: usize = 6;
/// Minimum column width.
const MIN_COLUMN_WIDTH: usize = 7;
const COLUMN_SEPARATOR: &str = "  ";
const STAT_HEADINGS: [&str; 3] = ["Average", "Diff.", "% Diff."];

fn format_value(value: f64) -> String {
    format!("{value:.DECIMAL_PRECISION$}")
}

fn write_row<I, S>(f: &mut fmt::Formatter<'_>, width: usize, cells: I) -> fmt::Result
where
    I: IntoIterator<Item = S>,
    S: fmt::Display,
{
    for (idx, cell) in cells.into_iter().enumerate() {
        if idx > 0 {
            f.write_str(COLUMN_SEPARATOR)?;
        }
        write!(f, "{cell:>width$}")?;
    }
    writeln!(f)
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({})", self.label(), self.code())?;
        if self.is_empty() {
            return writeln!(f, "<no data>");
        }

        let stats = [
            self.average(),
            self.difference(),
            self.difference_as_percentage(),
        ];
        let values: Vec<String> = self
            .values()
            .values()
            .chain(stats.iter())
            .map(|v| format_value(*v))
            .collect();
        let headings: Vec<String> = self
            .values()
            .keys()
            .map(|year| year.to_string())
            .chain(STAT_HEADINGS.iter().map(|h| h.to_string()))
            .collect();
        let width = values
            .iter()
            .chain(&headings)
            .map(|cell| cell.chars().count())
            .fold(MIN_COLUMN_WIDTH, usize::max);

        write_row(f, width, &headings)?;
        write_row(f, width, &values)
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let eng = self.name_or_empty(LANG_ENG);
        let cym = self.name_or_empty(LANG_CYM);
        match (eng.is_empty(), cym.is_empty()) {
            (false, false) => writeln!(f, "{eng} / {cym} ({})", self.code())?,
            (true, true) => writeln!(f, "Unnamed ({})", self.code())?,
            _ => writeln!(f, "{eng}{cym} ({})", self.code())?,
        }

        if self.is_empty() {
            return writeln!(f, "<no measures>");
        }
        for measure in self.measures().values() {
            writeln!(f, "{measure}")?;
        }
        Ok(())
    }
}

impl fmt::Display for AreaStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for area in self.iter() {
            writeln!(f, "{area}")?;
        }
        Ok(())
    }
}
