use ::csv::{QuoteStyle, Terminator, WriterBuilder};

use super::{COLUMNS, cells};
use crate::error::{ConsoleError, Result};
use crate::model::Student;

/// Renders the report as CSV text.
///
/// Fields are written as-is, joined with `,`: nothing is quoted or
/// escaped, so a comma inside a name splits it into two columns.
pub fn to_csv(students: &[Student]) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(COLUMNS)?;
    for student in students {
        writer.write_record(cells(student, ""))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ConsoleError::Export(format!("csv: {e}")))?;
    String::from_utf8(bytes).map_err(|e| ConsoleError::Export(format!("csv: {e}")))
}
