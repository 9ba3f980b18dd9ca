//! Tabular PDF rendering of the vaccination report with `genpdf`.

use std::path::PathBuf;

use genpdf::Element as _;
use genpdf::elements::{Break, FrameCellDecorator, Paragraph, TableLayout};
use genpdf::style::Style;
use tracing::debug;

use super::{COLUMNS, cells};
use crate::error::Result;
use crate::model::Student;

pub const TITLE: &str = "Vaccination Report";
pub const MISSING: &str = "—";

const FONT_SIZE: u8 = 10;
const TITLE_FONT_SIZE: u8 = 14;
const MARGIN_MM: i32 = 10;
const COLUMN_WEIGHTS: [usize; 5] = [3, 1, 1, 2, 2];

/// TrueType font family used for rendering, e.g. `LiberationSans` in
/// `./fonts` (`LiberationSans-Regular.ttf`, `-Bold`, `-Italic`,
/// `-BoldItalic`).
#[derive(Debug, Clone)]
pub struct PdfFonts {
    pub dir: PathBuf,
    pub family: String,
}

/// Everything that ends up on the page, independent of fonts and layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportTable {
    pub title: String,
    pub head: [&'static str; 5],
    pub body: Vec<[String; 5]>,
}

impl ReportTable {
    pub fn from_students(students: &[Student]) -> Self {
        ReportTable {
            title: TITLE.to_string(),
            head: COLUMNS,
            body: students.iter().map(|s| cells(s, MISSING)).collect(),
        }
    }
}

/// Renders `table` to PDF bytes. Rows flow onto new pages as needed.
///
/// # Errors
///
/// Returns [`ConsoleError::Export`](crate::error::ConsoleError::Export) if
/// the font family cannot be loaded or rendering fails.
pub fn render_pdf(table: &ReportTable, fonts: &PdfFonts) -> Result<Vec<u8>> {
    let family = genpdf::fonts::from_files(&fonts.dir, &fonts.family, None)?;

    let mut doc = genpdf::Document::new(family);
    doc.set_title(table.title.clone());
    doc.set_font_size(FONT_SIZE);

    let mut decorator = genpdf::SimplePageDecorator::new();
    decorator.set_margins(MARGIN_MM);
    doc.set_page_decorator(decorator);

    doc.push(
        Paragraph::new(table.title.clone())
            .styled(Style::new().bold().with_font_size(TITLE_FONT_SIZE)),
    );
    doc.push(Break::new(1));

    let mut layout = TableLayout::new(COLUMN_WEIGHTS.to_vec());
    layout.set_cell_decorator(FrameCellDecorator::new(true, true, false));

    let mut head = layout.row();
    for title in table.head {
        head = head.element(Paragraph::new(title).styled(Style::new().bold()).padded(1));
    }
    head.push()?;

    for row in &table.body {
        let mut line = layout.row();
        for cell in row {
            line = line.element(Paragraph::new(cell.clone()).padded(1));
        }
        line.push()?;
    }
    doc.push(layout);

    let mut out = Vec::new();
    doc.render(&mut out)?;
    debug!(rows = table.body.len(), bytes = out.len(), "PDF rendered");
    Ok(out)
}
