use std::io;
use tui::backend::CrosstermBackend;
use tui::layout::Rect;
use tui::style::{Color, Style};
use tui::symbols::Marker;
use tui::widgets::canvas::{Canvas, Points};
use tui::widgets::{Block, Borders};
use tui::Terminal;

pub const WIDTH: usize = 64;
pub const HEIGHT: usize = 32;

/// The 64x32 monochrome screen. Only CLS and DRW change it; hosts read it
/// once a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    pixels: [[bool; WIDTH]; HEIGHT],
}

impl Framebuffer {
    pub fn new() -> Self {
        Framebuffer {
            pixels: [[false; WIDTH]; HEIGHT],
        }
    }

    pub fn clear(&mut self) {
        self.pixels = [[false; WIDTH]; HEIGHT];
    }

    /// anything off the screen reads as dark
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        self.pixels
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or(false)
    }

    pub fn rows(&self) -> &[[bool; WIDTH]; HEIGHT] {
        &self.pixels
    }

    /// (x, y) of every pixel that's on
    pub fn lit_pixels(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.pixels.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|&(_, &on)| on)
                .map(move |(x, _)| (x, y))
        })
    }

    /// XOR a sprite on at (x, y), one byte per row, MSB leftmost. anything
    /// falling off the right or bottom wraps round to the other side.
    /// returns true if any pixel got switched off
    pub fn draw_sprite(&mut self, x: u8, y: u8, sprite: &[u8]) -> bool {
        let mut collision = false;
        for (row, bits) in sprite.iter().enumerate() {
            let py = (y as usize + row) % HEIGHT;
            for col in 0..8 {
                if bits & (0x80 >> col) == 0 {
                    continue;
                }
                let px = (x as usize + col) % WIDTH;
                let pixel = &mut self.pixels[py][px];
                collision |= *pixel;
                *pixel = !*pixel;
            }
        }
        collision
    }
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Display is used by the host to put the framebuffer on a screen. It
/// should abstract the implementation details, so a variety of kinds of
/// screen would work.
pub trait Display {
    fn draw(&mut self, frame: &Framebuffer) -> Result<(), io::Error>;
}

/// monochrome display in a terminal, rendered using TUI and crossterm
pub struct MonoTermDisplay {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl MonoTermDisplay {
    pub fn new() -> Result<MonoTermDisplay, io::Error> {
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;
        terminal.hide_cursor()?;
        Ok(MonoTermDisplay { terminal })
    }
}

impl Drop for MonoTermDisplay {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
    }
}

/// canvas x runs left to right
fn x_bounds() -> [f64; 2] {
    [0.0, (WIDTH - 1) as f64]
}

/// canvas y runs bottom to top, so rows go in upside down
fn y_bounds() -> [f64; 2] {
    [-1.0 * (HEIGHT - 1) as f64, 0.0]
}

fn canvas_points(frame: &Framebuffer) -> Vec<(f64, f64)> {
    frame
        .lit_pixels()
        .map(|(x, y)| (x as f64, -1.0 * y as f64))
        .collect()
}

impl Display for MonoTermDisplay {
    fn draw(&mut self, frame: &Framebuffer) -> Result<(), io::Error> {
        let coords = canvas_points(frame);

        // for now this assumes a 1:1 ratio between terminal cells, chip8
        // pixels and the internal TUI canvas
        self.terminal.draw(|f| {
            let size = Rect::new(0, 0, 2 + WIDTH as u16, 2 + HEIGHT as u16);

            let canvas = Canvas::default()
                .block(
                    Block::default()
                        .title("CHIP-8")
                        .borders(Borders::ALL)
                        .style(Style::default().bg(Color::Black)),
                )
                .x_bounds(x_bounds())
                .y_bounds(y_bounds())
                .marker(Marker::Block)
                .paint(|ctx| {
                    ctx.draw(&Points {
                        coords: &coords,
                        color: Color::White,
                    });
                });
            f.render_widget(canvas, size);
        })?;
        Ok(())
    }
}

/// useful for testing hosts without a terminal; just counts frames
#[derive(Default)]
pub struct DummyDisplay {
    pub frames: usize,
}

impl Display for DummyDisplay {
    fn draw(&mut self, _frame: &Framebuffer) -> Result<(), io::Error> {
        self.frames += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_off_screen() {
        let mut fb = Framebuffer::new();
        fb.draw_sprite(0, 0, &[0xff; 15]);
        assert!(fb.pixel(7, 14));
        assert!(!fb.pixel(WIDTH, 0));
        assert!(!fb.pixel(0, HEIGHT));
        assert!(!fb.pixel(usize::MAX, usize::MAX));
    }

    #[test]
    fn test_starts_blank() {
        let fb = Framebuffer::new();
        assert_eq!(fb.lit_pixels().count(), 0);
    }

    #[test]
    fn test_sprite_msb_leftmost() {
        let mut fb = Framebuffer::new();
        assert!(!fb.draw_sprite(10, 4, &[0b1000_0001]));
        assert_eq!(fb.lit_pixels().collect::<Vec<_>>(), vec![(10, 4), (17, 4)]);
    }

    #[test]
    fn test_sprite_wraps_both_ways() {
        let mut fb = Framebuffer::new();
        fb.draw_sprite(63, 31, &[0b1100_0000, 0b1100_0000]);
        assert!(fb.pixel(63, 31));
        assert!(fb.pixel(0, 31));
        assert!(fb.pixel(63, 0));
        assert!(fb.pixel(0, 0));
        assert_eq!(fb.lit_pixels().count(), 4);
    }

    #[test]
    fn test_start_coordinate_wraps() {
        let mut fb = Framebuffer::new();
        fb.draw_sprite(64 + 3, 32 + 2, &[0x80]);
        assert!(fb.pixel(3, 2));
    }

    #[test]
    fn test_redraw_erases_and_collides() {
        let mut fb = Framebuffer::new();
        let sprite = [0xf0, 0x90, 0xf0];
        assert!(!fb.draw_sprite(5, 5, &sprite));
        assert!(fb.draw_sprite(5, 5, &sprite));
        assert_eq!(fb, Framebuffer::new());
    }

    #[test]
    fn test_overlap_without_erase_is_no_collision() {
        let mut fb = Framebuffer::new();
        fb.draw_sprite(0, 0, &[0x80]);
        // a zero bit over a lit pixel leaves it alone
        assert!(!fb.draw_sprite(0, 0, &[0x40]));
        assert!(fb.pixel(0, 0));
        assert!(fb.pixel(1, 0));
    }

    #[test]
    fn test_clear() {
        let mut fb = Framebuffer::new();
        fb.draw_sprite(0, 0, &[0xff; 15]);
        fb.clear();
        assert!(fb.rows().iter().all(|row| row.iter().all(|&p| !p)));
    }

    #[test]
    fn test_canvas_bounds() {
        assert_eq!(x_bounds(), [0.0, 63.0]);
        assert_eq!(y_bounds(), [-31.0, 0.0]);
    }

    #[test]
    fn test_canvas_points_flip_y() {
        let mut fb = Framebuffer::new();
        fb.draw_sprite(2, 7, &[0x80]);
        assert_eq!(canvas_points(&fb), vec![(2.0, -7.0)]);
    }

    #[test]
    fn test_dummy_counts_frames() -> Result<(), io::Error> {
        let mut d = DummyDisplay::default();
        d.draw(&Framebuffer::new())?;
        d.draw(&Framebuffer::new())?;
        assert_eq!(d.frames, 2);
        Ok(())
    }

    #[test]
    #[ignore]
    // NB. figure out how to stop rendering during tests
    fn test_draw_to_terminal() -> Result<(), io::Error> {
        let mut d = MonoTermDisplay::new()?;
        let mut fb = Framebuffer::new();
        fb.draw_sprite(0, 0, &[0xff; 8]);
        d.draw(&fb)
    }
}
