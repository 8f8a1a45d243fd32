//! The terminal user interface.

use crate::error::AppError;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEventKind},
    execute, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::debug;
use rlifesim_lib::{Cancel, Command, Grid, Playback, PlaybackState, Rule, Simulator, State};
use std::{
    io::{self, Stdout, Write},
    thread,
    time::{Duration, Instant},
};

/// How long to wait for a key when there is nothing else to do.
const IDLE: Duration = Duration::from_millis(100);

/// Colors of the dying states, from the youngest.
const PALETTE: [Color; 6] = [
    Color::Red,
    Color::Yellow,
    Color::Green,
    Color::Cyan,
    Color::Blue,
    Color::Magenta,
];

/// What a key asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Input {
    Quit,
    Command(Command),
}

fn input(code: KeyCode) -> Option<Input> {
    let command = match code {
        KeyCode::Char('q') | KeyCode::Esc => return Some(Input::Quit),
        KeyCode::Char(' ') | KeyCode::Enter => Command::ToggleRun,
        KeyCode::Char('j') | KeyCode::Right | KeyCode::PageDown => Command::Step(1),
        KeyCode::Char('k') | KeyCode::Left | KeyCode::PageUp => Command::Step(-1),
        KeyCode::Char('f') => Command::SetDirection(1),
        KeyCode::Char('b') => Command::SetDirection(-1),
        KeyCode::Char('r') => Command::Reverse,
        KeyCode::Char('+' | '=') | KeyCode::Up => Command::Faster,
        KeyCode::Char('-') | KeyCode::Down => Command::Slower,
        KeyCode::Char(c @ '0'..='9') => Command::JumpToFraction(c as u8 - b'0'),
        _ => return None,
    };
    Some(Input::Command(command))
}

fn color(state: State) -> Color {
    match state.0 {
        0 | 1 => Color::White,
        i => PALETTE[(i - 2) % PALETTE.len()],
    }
}

/// Raw mode on the alternate screen, until dropped.
struct Screen {
    out: Stdout,
    width: u16,
    height: u16,
}

impl Screen {
    fn new() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        execute!(out, EnterAlternateScreen, Hide)?;
        let (width, height) = terminal::size()?;
        Ok(Screen { out, width, height })
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    /// A line in reverse video, cut or padded to the width of the screen.
    fn bar(&mut self, y: u16, text: &str) -> io::Result<()> {
        let width = self.width as usize;
        let text = text.chars().take(width).collect::<String>();
        queue!(
            self.out,
            MoveTo(0, y),
            SetAttribute(Attribute::Reverse),
            Print(format!("{:<width$}", text, width = width)),
            SetAttribute(Attribute::Reset)
        )
    }

    fn top_bar(&mut self, text: &str) -> io::Result<()> {
        self.bar(0, text)
    }

    fn bottom_bar(&mut self, text: &str) -> io::Result<()> {
        self.bar(self.height.saturating_sub(1), text)
    }

    /// Draws the part of the grid that fits between the two bars.
    fn world(&mut self, grid: &Grid, rule: &Rule) -> io::Result<()> {
        let rows = grid.rows().min(self.height.saturating_sub(2) as usize);
        let columns = grid.columns().min(self.width as usize);
        for (row, column, state) in grid.cells() {
            if row >= rows || column >= columns {
                continue;
            }
            if column == 0 {
                queue!(self.out, MoveTo(0, row as u16 + 1))?;
            }
            queue!(
                self.out,
                SetForegroundColor(color(state)),
                Print(state.symbol(rule.is_gen()))
            )?;
        }
        queue!(self.out, ResetColor)
    }

    fn update(&mut self, playback: &Playback, rule: &Rule) -> io::Result<()> {
        let frame = playback.frame();
        queue!(self.out, Clear(ClearType::All))?;
        self.world(frame, rule)?;
        self.top_bar(&format!(
            "Frame: {} / {}  Cells: {}  Direction: {}  Delay: {:?}",
            playback.cursor(),
            playback.len(),
            frame.live_count(),
            if playback.direction() > 0 {
                "forward"
            } else {
                "backward"
            },
            playback.speed(),
        ))?;
        self.bottom_bar(match playback.state() {
            PlaybackState::Paused => {
                "Paused. [space] run  [j/k] step  [r] reverse  [0-9] jump  [+/-] speed  [q] quit"
            }
            PlaybackState::Running => {
                "Running. [space] pause  [r] reverse  [0-9] jump  [+/-] speed  [q] quit"
            }
            PlaybackState::Stopped => "Reached the last frame. Press [q] to quit.",
        })?;
        self.out.flush()
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        execute!(self.out, Show, LeaveAlternateScreen).ok();
        terminal::disable_raw_mode().ok();
    }
}

/// Runs the simulation in another thread,
/// so that it can be stopped from the keyboard.
pub(crate) fn simulate(
    mut simulator: Simulator,
    steps: i64,
    record: bool,
) -> Result<Simulator, AppError> {
    let cancel = Cancel::new();
    let handle = {
        let cancel = cancel.clone();
        thread::spawn(move || {
            let result = simulator.run(steps, record, &cancel).map(|_| ());
            (simulator, result)
        })
    };

    let start = Instant::now();
    {
        let mut screen = Screen::new()?;
        while !handle.is_finished() {
            queue!(screen.out, Clear(ClearType::All))?;
            screen.top_bar(&format!("Simulating...  Time: {:.2?}", start.elapsed()))?;
            screen.bottom_bar(if cancel.is_cancelled() {
                "Stopping..."
            } else {
                "Press [space] or [q] to stop."
            })?;
            screen.out.flush()?;

            if event::poll(IDLE)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        if let Some(Input::Quit | Input::Command(Command::ToggleRun)) =
                            input(key.code)
                        {
                            cancel.cancel();
                        }
                    }
                    Event::Resize(width, height) => screen.resize(width, height),
                    _ => (),
                }
            }
        }
    }

    let (simulator, result) = handle.join().map_err(|_| AppError::Panicked)?;
    result?;
    debug!(
        "Simulated {} generations in {:.2?}.",
        simulator.generation(),
        start.elapsed()
    );
    Ok(simulator)
}

/// Replays the history until [q] is pressed.
pub(crate) fn replay(playback: &mut Playback, rule: &Rule) -> Result<(), AppError> {
    let mut screen = Screen::new()?;
    let mut last_tick = Instant::now();
    loop {
        screen.update(playback, rule)?;
        let timeout = match playback.state() {
            PlaybackState::Running => playback.speed().saturating_sub(last_tick.elapsed()),
            _ => IDLE,
        };
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match input(key.code) {
                    Some(Input::Quit) => break,
                    Some(Input::Command(command)) => playback.apply(command)?,
                    None => (),
                },
                Event::Resize(width, height) => screen.resize(width, height),
                _ => (),
            }
        } else if playback.state() == PlaybackState::Running {
            playback.tick();
            last_tick = Instant::now();
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys() {
        assert_eq!(input(KeyCode::Char('q')), Some(Input::Quit));
        assert_eq!(
            input(KeyCode::Char(' ')),
            Some(Input::Command(Command::ToggleRun))
        );
        assert_eq!(
            input(KeyCode::Left),
            Some(Input::Command(Command::Step(-1)))
        );
        assert_eq!(
            input(KeyCode::Char('7')),
            Some(Input::Command(Command::JumpToFraction(7)))
        );
        assert_eq!(input(KeyCode::Char('x')), None);
    }

    #[test]
    fn colors() {
        assert_eq!(color(State(1)), Color::White);
        assert_eq!(color(State(2)), Color::Red);
        assert_eq!(color(State(8)), Color::Red);
    }
}
