/// Terminal output for a finished canvas.
///
/// `present` receives a mutable writer and a finished `Canvas`. No game logic
/// is performed; this module only translates pixels and text into terminal
/// commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Attribute, Color, Print},
    QueueableCommand,
};
use space_invader::canvas::Canvas;
use space_invader::render::Rgb;

/// Upper half block: foreground paints the upper pixel, background the lower.
const HALF_BLOCK: char = '▀';

fn to_color([r, g, b]: Rgb) -> Color {
    Color::Rgb { r, g, b }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Draw one complete frame.
pub fn present<W: Write>(out: &mut W, canvas: &Canvas) -> std::io::Result<()> {
    draw_pixels(out, canvas)?;
    draw_text(out, canvas)?;

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, canvas.rows().saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Pixels ────────────────────────────────────────────────────────────────────

fn draw_pixels<W: Write>(out: &mut W, canvas: &Canvas) -> std::io::Result<()> {
    for row in 0..canvas.rows() {
        out.queue(cursor::MoveTo(0, row))?;
        // Only emit colour changes; most neighbouring cells share colours.
        let mut current: Option<(Rgb, Rgb)> = None;
        let mut line = String::with_capacity(canvas.cols() as usize * 3);
        for col in 0..canvas.cols() {
            let cell = canvas.cell(col, row);
            if current != Some(cell) {
                if !line.is_empty() {
                    out.queue(Print(&line))?;
                    line.clear();
                }
                out.queue(style::SetForegroundColor(to_color(cell.0)))?;
                out.queue(style::SetBackgroundColor(to_color(cell.1)))?;
                current = Some(cell);
            }
            line.push(HALF_BLOCK);
        }
        out.queue(Print(&line))?;
    }
    Ok(())
}

// ── Text layer ────────────────────────────────────────────────────────────────

fn draw_text<W: Write>(out: &mut W, canvas: &Canvas) -> std::io::Result<()> {
    for span in canvas.spans() {
        let room = canvas.cols().saturating_sub(span.col) as usize;
        let text: String = span.text.chars().take(room).collect();
        out.queue(cursor::MoveTo(span.col, span.row))?;
        out.queue(style::SetBackgroundColor(Color::Black))?;
        out.queue(style::SetForegroundColor(to_color(span.color)))?;
        if span.bold {
            out.queue(style::SetAttribute(Attribute::Bold))?;
        }
        out.queue(Print(text))?;
        if span.bold {
            out.queue(style::SetAttribute(Attribute::NormalIntensity))?;
        }
    }
    Ok(())
}
