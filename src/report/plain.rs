//! Plain-text report printer
//!
//! Sections are computed and written one at a time, so a failing section
//! stops the report right there.

use std::io::Write;

use anyhow::Result;
use console::{style, Emoji};
use ratatui::{buffer::Buffer, layout::Rect, style::Color};

use crate::pipeline::AttritionTable;
use crate::report::tables::{preview_tables, rate_table};
use crate::report::widgets::{preferred_height, render_panel};
use crate::report::{
    compute_panel, Panel, Preview, KEY_TAKEAWAYS, PREVIEW_HEADING, REPORT_BLOCKS,
    TAKEAWAYS_HEADING, TITLE,
};

static CHART: Emoji<'_, '_> = Emoji("📊 ", "");
static PIN: Emoji<'_, '_> = Emoji("📌 ", "# ");
static SEARCH: Emoji<'_, '_> = Emoji("🔍 ", "## ");

/// Indentation of every report line
const INDENT: &str = "  ";

/// Write the whole report to `out` at the given chart width
pub fn write_report<W: Write>(
    out: &mut W,
    table: &AttritionTable,
    preview: &Preview,
    width: u16,
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}{}{}", INDENT, CHART, style(TITLE).cyan().bold())?;
    writeln!(out, "{}{}", INDENT, style("━".repeat(width.saturating_sub(4) as usize)).dim())?;

    write_preview(out, preview, width)?;

    for spec in REPORT_BLOCKS.iter() {
        let panel = compute_panel(table, spec)?;
        write_panel(out, &panel, width)?;
    }

    write_takeaways(out)?;
    out.flush()?;
    Ok(())
}

fn write_section_heading<W: Write>(out: &mut W, heading: &str) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}{}{}", INDENT, PIN, style(heading).white().bold())?;
    writeln!(out)?;
    Ok(())
}

fn write_preview<W: Write>(out: &mut W, preview: &Preview, width: u16) -> Result<()> {
    write_section_heading(out, PREVIEW_HEADING)?;

    for table in preview_tables(preview, width.saturating_sub(INDENT.len() as u16) as usize) {
        for line in table.to_string().lines() {
            writeln!(out, "{}{}", INDENT, line)?;
        }
    }
    writeln!(
        out,
        "{}{}",
        INDENT,
        style(format!(
            "Showing {} of {} rows, {} columns",
            preview.rows.len(),
            preview.total_rows,
            preview.columns.len()
        ))
        .dim()
    )?;
    Ok(())
}

/// Write one computed section: heading, chart, and for rate charts a table
pub fn write_panel<W: Write>(out: &mut W, panel: &Panel, width: u16) -> Result<()> {
    write_section_heading(out, panel.heading())?;

    let chart_width = width.saturating_sub(INDENT.len() as u16);
    for line in render_lines(panel, chart_width) {
        writeln!(out, "{}{}", INDENT, line)?;
    }

    if let Panel::Rate(rate) = panel {
        writeln!(out)?;
        for line in rate_table(rate.spec.x_label, &rate.groups).to_string().lines() {
            writeln!(out, "{}{}", INDENT, line)?;
        }
    }
    Ok(())
}

fn write_takeaways<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}{}{}", INDENT, SEARCH, style(TAKEAWAYS_HEADING).cyan().bold())?;
    writeln!(out)?;
    for takeaway in KEY_TAKEAWAYS {
        writeln!(out, "{}{} {}", INDENT, style("•").dim(), style(takeaway).bold())?;
    }
    writeln!(out)?;
    Ok(())
}

/// Render a panel off-screen and return its rows as terminal text
pub fn render_lines(panel: &Panel, width: u16) -> Vec<String> {
    let area = Rect::new(0, 0, width, preferred_height(panel, width));
    let mut buf = Buffer::empty(area);
    render_panel(panel, area, &mut buf);

    (area.top()..area.bottom())
        .map(|y| styled_row(&buf, y))
        .collect()
}

/// Buffer contents as plain text, trailing spaces trimmed
pub fn buffer_to_text(buf: &Buffer) -> String {
    let area = buf.area;
    (area.top()..area.bottom())
        .map(|y| {
            let row: String = (area.left()..area.right())
                .map(|x| buf[(x, y)].symbol())
                .collect();
            row.trim_end().to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn styled_row(buf: &Buffer, y: u16) -> String {
    let area = buf.area;
    let Some(last) = (area.left()..area.right())
        .rev()
        .find(|&x| {
            let cell = &buf[(x, y)];
            cell.symbol() != " " || cell.bg != Color::Reset
        })
    else {
        return String::new();
    };

    let mut line = String::new();
    let mut run = String::new();
    let mut run_colors = (Color::Reset, Color::Reset);

    for x in area.left()..=last {
        let cell = &buf[(x, y)];
        let colors = (cell.fg, cell.bg);
        if colors != run_colors && !run.is_empty() {
            line.push_str(&paint(&run, run_colors));
            run.clear();
        }
        run_colors = colors;
        run.push_str(cell.symbol());
    }
    line.push_str(&paint(&run, run_colors));
    line
}

fn paint(text: &str, (fg, bg): (Color, Color)) -> String {
    let mut styled = style(text);
    if let Some(c) = console_color(fg) {
        styled = styled.fg(c);
    }
    if let Some(c) = console_color(bg) {
        styled = styled.bg(c);
    }
    styled.to_string()
}

/// Map a ratatui color onto the closest console color
fn console_color(color: Color) -> Option<console::Color> {
    use console::Color as C;

    let mapped = match color {
        Color::Reset => return None,
        Color::Black => C::Black,
        Color::Red | Color::LightRed => C::Red,
        Color::Green | Color::LightGreen => C::Green,
        Color::Yellow | Color::LightYellow => C::Yellow,
        Color::Blue | Color::LightBlue => C::Blue,
        Color::Magenta | Color::LightMagenta => C::Magenta,
        Color::Cyan | Color::LightCyan => C::Cyan,
        Color::Gray | Color::White => C::White,
        Color::DarkGray => C::Color256(8),
        Color::Indexed(i) => C::Color256(i),
        Color::Rgb(r, g, b) => C::Color256(rgb_to_ansi256(r, g, b)),
    };
    Some(mapped)
}

/// Nearest entry of the 6x6x6 color cube in the 256-color palette
fn rgb_to_ansi256(r: u8, g: u8, b: u8) -> u8 {
    let level = |c: u8| ((c as u16 * 5 + 127) / 255) as u8;
    16 + 36 * level(r) + 6 * level(g) + level(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_to_ansi256_corners() {
        assert_eq!(rgb_to_ansi256(0, 0, 0), 16);
        assert_eq!(rgb_to_ansi256(255, 255, 255), 231);
        assert_eq!(rgb_to_ansi256(255, 0, 0), 196);
    }

    #[test]
    fn test_buffer_to_text_trims() {
        let area = Rect::new(0, 0, 6, 2);
        let mut buf = Buffer::empty(area);
        buf.set_string(0, 0, "ab", ratatui::style::Style::default());
        assert_eq!(buffer_to_text(&buf), "ab\n");
    }

    #[test]
    fn test_styled_row_keeps_text() {
        let area = Rect::new(0, 0, 10, 1);
        let mut buf = Buffer::empty(area);
        buf.set_string(1, 0, "hi", ratatui::style::Style::default().fg(Color::Red));
        let row = console::strip_ansi_codes(&styled_row(&buf, 0)).to_string();
        assert_eq!(row, " hi");
    }
}
