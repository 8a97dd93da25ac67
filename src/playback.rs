//! Real-time terminal playback of an assembled document.
//!
//! Playback runs Idle -> Playing -> {Idle, Cancelled}: the screen is
//! cleared, each frame overwrites the previous one from the origin at a
//! fixed rate, and a key press (q / Esc / Ctrl-C) polled between ticks
//! cancels. The screen is cleared again before returning either way.

use std::io::{self, Write};
use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{self, disable_raw_mode, enable_raw_mode, ClearType};
use crossterm::{cursor, execute, queue};

/// How a playback run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackOutcome {
    /// All frames were shown.
    Completed,
    /// A cancellation key was pressed mid-run.
    Cancelled,
}

/// Inter-frame delay for a configured rate.
pub fn frame_delay(fps: u32) -> Duration {
    Duration::from_secs(1) / fps.max(1)
}

/// Whether a key event should cancel playback.
pub fn is_cancel_key(key: &KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Play a sequence of pre-rendered frames on stdout.
///
/// Raw mode is held for the duration so cancellation keys arrive without a
/// newline; the guard restores the terminal on every exit path, panics
/// included.
pub fn play_frames(frames: &[&str], fps: u32) -> io::Result<PlaybackOutcome> {
    let mut stdout = io::stdout();
    let _guard = RawModeGuard::enter()?;

    execute!(
        stdout,
        terminal::Clear(ClearType::All),
        cursor::MoveTo(0, 0),
        cursor::Hide
    )?;

    let delay = frame_delay(fps);
    let mut outcome = PlaybackOutcome::Completed;

    'frames: for frame in frames {
        let tick = Instant::now();

        queue!(stdout, cursor::MoveTo(0, 0))?;
        // Raw mode disables output post-processing, so emit explicit CRLF.
        for line in frame.lines() {
            stdout.write_all(line.as_bytes())?;
            stdout.write_all(b"\r\n")?;
        }
        stdout.flush()?;

        // Spend the rest of the tick polling for a cancellation key.
        while let Some(remaining) = delay.checked_sub(tick.elapsed()) {
            if !event::poll(remaining)? {
                break;
            }
            if let Event::Key(key) = event::read()? {
                if is_cancel_key(&key) {
                    outcome = PlaybackOutcome::Cancelled;
                    break 'frames;
                }
            }
        }
    }

    execute!(
        stdout,
        terminal::Clear(ClearType::All),
        cursor::MoveTo(0, 0),
        cursor::Show
    )?;

    Ok(outcome)
}

/// Static flag tracking raw mode for the panic hook.
static RAW_MODE_ACTIVE: AtomicBool = AtomicBool::new(false);

/// Guard that restores the terminal to cooked mode on drop, including on
/// panic.
pub struct RawModeGuard {
    active: bool,
}

impl RawModeGuard {
    pub fn enter() -> io::Result<Self> {
        install_panic_hook();
        enable_raw_mode()?;
        RAW_MODE_ACTIVE.store(true, Ordering::SeqCst);
        Ok(RawModeGuard { active: true })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if self.active {
            RAW_MODE_ACTIVE.store(false, Ordering::SeqCst);
            let _ = disable_raw_mode();
        }
    }
}

fn install_panic_hook() {
    static HOOK_INSTALLED: AtomicBool = AtomicBool::new(false);
    if HOOK_INSTALLED.swap(true, Ordering::SeqCst) {
        return;
    }

    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        if RAW_MODE_ACTIVE.load(Ordering::SeqCst) {
            let _ = execute!(io::stdout(), cursor::Show);
            let _ = disable_raw_mode();
            RAW_MODE_ACTIVE.store(false, Ordering::SeqCst);
        }
        original_hook(panic_info);
    }));
}
