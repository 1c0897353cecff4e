// terminal/mod.rs - Raw mode lifecycle, window size, and the terminal seam used by the editor

pub mod input;

pub use input::{ByteSource, ScriptedSource, StdinSource, read_key};

use crate::error::TerminalError;
use crate::key::Key;
use crossterm::{cursor, queue, terminal};
use log::{debug, info, warn};
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

static RAW_MODE_ACTIVE: AtomicBool = AtomicBool::new(false);

/// What the editor controller needs from a terminal.
pub trait Terminal {
    fn read_key(&mut self) -> Result<Key, TerminalError>;
    /// Current size as (rows, cols).
    fn window_size(&mut self) -> Result<(usize, usize), TerminalError>;
    /// Write one complete frame.
    fn write_frame(&mut self, bytes: &[u8]) -> Result<(), TerminalError>;
}

pub fn enable_raw_mode() -> Result<(), TerminalError> {
    if RAW_MODE_ACTIVE.load(Ordering::SeqCst) {
        return Ok(());
    }
    terminal::enable_raw_mode().map_err(TerminalError::RawMode)?;
    RAW_MODE_ACTIVE.store(true, Ordering::SeqCst);
    info!("Raw mode enabled");
    Ok(())
}

/// Restore the original terminal settings. Safe to call repeatedly.
pub fn disable_raw_mode() -> Result<(), TerminalError> {
    if !RAW_MODE_ACTIVE.swap(false, Ordering::SeqCst) {
        return Ok(());
    }
    terminal::disable_raw_mode().map_err(TerminalError::Restore)?;
    info!("Raw mode disabled");
    Ok(())
}

/// Best-effort restore used on every exit path: raw mode off, cursor visible.
pub fn restore_terminal() {
    let mut stdout = io::stdout();
    let _ = queue!(stdout, cursor::Show);
    let _ = stdout.flush();
    if let Err(e) = disable_raw_mode() {
        warn!("{}", e);
    }
}

/// Make sure a panic leaves the terminal usable before the message is printed.
pub fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore_terminal();
        previous(info);
    }));
}

#[cfg(unix)]
extern "C" fn on_terminate_signal(_signal: libc::c_int) {
    input::request_terminate();
}

/// Route SIGTERM and SIGHUP into a flag the input loop checks, so the normal
/// cleanup path runs instead of the process dying in raw mode.
#[cfg(unix)]
pub fn install_signal_handlers() {
    let handler = on_terminate_signal as extern "C" fn(libc::c_int) as libc::sighandler_t;
    unsafe {
        libc::signal(libc::SIGTERM, handler);
        libc::signal(libc::SIGHUP, handler);
    }
}

#[cfg(not(unix))]
pub fn install_signal_handlers() {}

/// Fallback size query: push the cursor to the bottom-right corner and ask
/// the terminal where it ended up.
pub fn probe_window_size<S, W>(source: &mut S, out: &mut W) -> Result<(usize, usize), TerminalError>
where
    S: ByteSource + ?Sized,
    W: Write + ?Sized,
{
    out.write_all(b"\x1b[999C\x1b[999B\x1b[6n")?;
    out.flush()?;

    let mut reply = Vec::with_capacity(32);
    while reply.len() < 32 {
        match source.read_byte(Some(Duration::from_millis(500)))? {
            Some(b'R') => break,
            Some(byte) => reply.push(byte),
            None => break,
        }
    }

    match input::parse_cursor_report(&reply) {
        Some((rows, cols)) if rows > 0 && cols > 0 => Ok((rows, cols)),
        _ => Err(TerminalError::WindowSize),
    }
}

fn direct_window_size() -> Option<(usize, usize)> {
    match terminal::size() {
        Ok((cols, rows)) if cols > 0 && rows > 0 => Some((rows as usize, cols as usize)),
        result => {
            debug!("Direct window size query failed: {:?}", result);
            None
        }
    }
}

/// Window size as (rows, cols): direct query first, cursor probing second.
pub fn get_window_size<S, W>(source: &mut S, out: &mut W) -> Result<(usize, usize), TerminalError>
where
    S: ByteSource + ?Sized,
    W: Write + ?Sized,
{
    match direct_window_size() {
        Some(size) => Ok(size),
        None => probe_window_size(source, out),
    }
}

/// The real terminal: stdin in raw mode, stdout for frames.
///
/// Dropping it restores the terminal, so every exit route is covered.
pub struct RawTerminal {
    source: StdinSource,
    stdout: io::Stdout,
    /// Size found by probing; the probe is not repeated every frame
    probed_size: Option<(usize, usize)>,
}

impl RawTerminal {
    pub fn new() -> Result<Self, TerminalError> {
        enable_raw_mode()?;
        Ok(Self {
            source: StdinSource,
            stdout: io::stdout(),
            probed_size: None,
        })
    }

    /// Clear the screen on a clean quit.
    pub fn clear(&mut self) -> Result<(), TerminalError> {
        queue!(
            self.stdout,
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0)
        )?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Terminal for RawTerminal {
    fn read_key(&mut self) -> Result<Key, TerminalError> {
        Ok(read_key(&mut self.source)?)
    }

    fn window_size(&mut self) -> Result<(usize, usize), TerminalError> {
        if let Some(size) = direct_window_size() {
            return Ok(size);
        }
        if let Some(size) = self.probed_size {
            return Ok(size);
        }
        let size = get_window_size(&mut self.source, &mut self.stdout)?;
        self.probed_size = Some(size);
        Ok(size)
    }

    fn write_frame(&mut self, bytes: &[u8]) -> Result<(), TerminalError> {
        self.stdout.write_all(bytes)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Drop for RawTerminal {
    fn drop(&mut self) {
        restore_terminal();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_window_size_parses_report() {
        let mut source = ScriptedSource::new(b"\x1b[40;120R");
        let mut out = Vec::new();
        let size = probe_window_size(&mut source, &mut out).unwrap();
        assert_eq!(size, (40, 120));
        assert_eq!(out, b"\x1b[999C\x1b[999B\x1b[6n");
    }

    #[test]
    fn test_probe_window_size_fails_without_reply() {
        let mut source = ScriptedSource::new(b"");
        let mut out = Vec::new();
        assert!(matches!(
            probe_window_size(&mut source, &mut out),
            Err(TerminalError::WindowSize)
        ));
    }

    #[test]
    fn test_probe_window_size_rejects_garbage() {
        let mut source = ScriptedSource::new(b"garbageR");
        let mut out = Vec::new();
        assert!(probe_window_size(&mut source, &mut out).is_err());
    }

    #[test]
    fn test_disable_raw_mode_is_idempotent_when_inactive() {
        assert!(disable_raw_mode().is_ok());
        assert!(disable_raw_mode().is_ok());
    }
}
