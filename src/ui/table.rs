use tabled::builder::Builder;
use tabled::settings::{Padding, Style};

/// Borderless grid: no separators, no header emphasis, three spaces after
/// each cell.
pub fn render_table(rows: &[Vec<String>]) -> String {
    let mut builder = Builder::default();
    for row in rows {
        builder.push_record(row.iter().map(String::as_str));
    }
    let mut table = builder.build();
    table.with(Style::empty());
    table.with(Padding::new(0, 3, 0, 0));
    table.to_string()
}
