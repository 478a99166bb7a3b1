//! Printing finished frames to a terminal
use crate::{
    rasterizer::{PaletteRasterizer, Rasterizer},
    render::Canvas,
};
use crossterm::{
    cursor::MoveTo,
    queue,
    terminal::{Clear, ClearType},
};
use std::io::{Result, Write};

/// Writes whole frames, clearing the screen before each one
pub struct FramePrinter<W: Write, R: Rasterizer = PaletteRasterizer> {
    out: W,
    rasterizer: R,
    clear: bool,
}

impl<W: Write> FramePrinter<W> {
    pub fn new(out: W) -> Self {
        Self::with_rasterizer(out, PaletteRasterizer::default())
    }
}

impl<W: Write, R: Rasterizer> FramePrinter<W, R> {
    pub fn with_rasterizer(out: W, rasterizer: R) -> Self {
        Self {
            out,
            rasterizer,
            clear: true,
        }
    }
    /// Keep previous frames on screen instead of clearing
    pub fn without_clearing(mut self) -> Self {
        self.clear = false;
        self
    }
    /// One row per line, each row followed by a blank line so cells come out roughly square
    pub fn print(&mut self, canvas: &Canvas) -> Result<()> {
        if self.clear {
            queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        for line in self.rasterizer.canvas_to_lines(canvas) {
            write!(self.out, "{line}\r\n\r\n")?;
        }
        self.out.flush()
    }
    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_without_clearing() {
        let canvas = Canvas::new(3, 2);
        let mut printer = FramePrinter::new(Vec::new()).without_clearing();
        printer.print(&canvas).unwrap();
        let text = String::from_utf8(printer.into_inner()).unwrap();
        assert_eq!(text, ". . .\r\n\r\n. . .\r\n\r\n");
    }

    #[test]
    fn test_print_clears_first() {
        let canvas = Canvas::new(1, 1);
        let mut printer = FramePrinter::new(Vec::new());
        printer.print(&canvas).unwrap();
        let text = String::from_utf8(printer.into_inner()).unwrap();
        assert!(text.starts_with("\x1b[2J"));
        assert!(text.ends_with(".\r\n\r\n"));
    }
}
