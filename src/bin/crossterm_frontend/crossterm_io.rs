use chip8_vm::emulator::output::EmulatorOutput;
use chip8_vm::emulator::state::{SCREEN_HEIGHT, SCREEN_WIDTH};

use crossterm::style::Print;
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue};
use std::io::{stdout, Stdout, Write};

/// Draws the CHIP-8 screen inside a frame on the terminal,
/// each pixel as two character cells.
pub struct CrosstermOutput {
    out: Stdout,
    cells: [[bool; SCREEN_WIDTH]; SCREEN_HEIGHT],
    buzzing: bool,
}

impl CrosstermOutput {
    pub fn new() -> crossterm::Result<CrosstermOutput> {
        let mut out = stdout();
        terminal::enable_raw_mode()?;
        execute!(out, EnterAlternateScreen, cursor::Hide, Clear(ClearType::All))?;

        let bottom = SCREEN_HEIGHT as u16 + 1;
        let right = 2 * SCREEN_WIDTH as u16 + 1;
        for y in 0..=bottom {
            for x in 0..=right {
                let c = match (x, y) {
                    (0, 0) => '┏',
                    (x, 0) if x == right => '┓',
                    (0, y) if y == bottom => '┗',
                    (x, y) if x == right && y == bottom => '┛',
                    (_, 0) => '━',
                    (_, y) if y == bottom => '━',
                    (0, _) => '┃',
                    (x, _) if x == right => '┃',
                    _ => continue,
                };
                queue!(out, cursor::MoveTo(x, y), Print(c))?;
            }
        }
        out.flush()?;

        Ok(CrosstermOutput {
            out,
            cells: [[false; SCREEN_WIDTH]; SCREEN_HEIGHT],
            buzzing: false,
        })
    }

    fn draw(&mut self, x: usize, y: usize, state: bool) {
        let result = queue!(
            self.out,
            cursor::MoveTo(2 * x as u16 + 1, y as u16 + 1),
            Print(if state { "██" } else { "  " })
        );
        if let Err(err) = result {
            log::error!("Could not draw pixel ({}, {}): {}", x, y, err);
        }
    }
}

impl Drop for CrosstermOutput {
    fn drop(&mut self) {
        let _ = execute!(self.out, cursor::Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

impl EmulatorOutput for CrosstermOutput {
    fn set(&mut self, x: usize, y: usize, state: bool) {
        let old_state = &mut self.cells[y][x];
        if *old_state != state {
            *old_state = state;
            self.draw(x, y, state);
        }
    }

    fn refresh(&mut self) {
        if let Err(err) = self.out.flush() {
            log::error!("Could not flush terminal: {}", err);
        }
    }

    // Ring the terminal bell once each time the sound gate opens
    fn buzz(&mut self, on: bool) {
        if on && !self.buzzing {
            let _ = queue!(self.out, Print('\u{7}'));
        }
        self.buzzing = on;
    }
}
