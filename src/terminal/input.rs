// terminal/input.rs - Byte source and key decoding

use crate::key::{ESC, Key, KeyAction, control_action};
use std::collections::VecDeque;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// How long to wait for the rest of an escape sequence before treating ESC as Cancel.
pub const ESCAPE_TIMEOUT: Duration = Duration::from_millis(100);

static TERMINATE_REQUESTED: AtomicBool = AtomicBool::new(false);

/// A stream of raw input bytes.
pub trait ByteSource {
    /// Read the next byte. With `Some(timeout)`, returns `Ok(None)` if nothing
    /// arrived in time; with `None`, blocks. End of input is an error.
    fn read_byte(&mut self, timeout: Option<Duration>) -> io::Result<Option<u8>>;
}

/// Blocking read of the next logical key.
pub fn read_key<S: ByteSource + ?Sized>(source: &mut S) -> io::Result<Key> {
    let byte = loop {
        if let Some(byte) = source.read_byte(None)? {
            break byte;
        }
    };

    if byte != ESC {
        return Ok(control_action(byte)
            .map(Key::Action)
            .unwrap_or(Key::Literal(byte)));
    }

    let cancel = Key::Action(KeyAction::Cancel);
    let Some(first) = source.read_byte(Some(ESCAPE_TIMEOUT))? else {
        return Ok(cancel);
    };
    let Some(second) = source.read_byte(Some(ESCAPE_TIMEOUT))? else {
        return Ok(cancel);
    };

    let action = match (first, second) {
        (b'[', digit @ b'0'..=b'9') => {
            if source.read_byte(Some(ESCAPE_TIMEOUT))? != Some(b'~') {
                return Ok(cancel);
            }
            match digit {
                b'1' | b'7' => KeyAction::Home,
                b'3' => KeyAction::Delete,
                b'4' | b'8' => KeyAction::End,
                b'5' => KeyAction::PageUp,
                b'6' => KeyAction::PageDown,
                _ => KeyAction::Cancel,
            }
        }
        (b'[', b'A') => KeyAction::ArrowUp,
        (b'[', b'B') => KeyAction::ArrowDown,
        (b'[', b'C') => KeyAction::ArrowRight,
        (b'[', b'D') => KeyAction::ArrowLeft,
        (b'[', b'H') | (b'O', b'H') => KeyAction::Home,
        (b'[', b'F') | (b'O', b'F') => KeyAction::End,
        _ => KeyAction::Cancel,
    };
    Ok(Key::Action(action))
}

/// Parse a cursor position report of the form `ESC [ rows ; cols R`.
pub fn parse_cursor_report(reply: &[u8]) -> Option<(usize, usize)> {
    let body = reply.strip_prefix(&[ESC, b'['])?;
    let body = body.strip_suffix(b"R").unwrap_or(body);
    let text = std::str::from_utf8(body).ok()?;
    let (rows, cols) = text.split_once(';')?;
    Some((rows.parse().ok()?, cols.parse().ok()?))
}

/// Ask blocked reads to give up; called from the SIGTERM/SIGHUP handler.
pub fn request_terminate() {
    TERMINATE_REQUESTED.store(true, Ordering::SeqCst);
}

pub fn terminate_requested() -> bool {
    TERMINATE_REQUESTED.load(Ordering::SeqCst)
}

/// Reads stdin one byte at a time, bypassing std's buffered reader so `poll`
/// sees every pending byte.
#[derive(Debug, Default)]
pub struct StdinSource;

#[cfg(unix)]
impl ByteSource for StdinSource {
    fn read_byte(&mut self, timeout: Option<Duration>) -> io::Result<Option<u8>> {
        let timeout_ms = timeout
            .map(|t| t.as_millis().min(libc::c_int::MAX as u128) as libc::c_int)
            .unwrap_or(-1);
        let mut pollfd = libc::pollfd {
            fd: libc::STDIN_FILENO,
            events: libc::POLLIN,
            revents: 0,
        };

        loop {
            // A signal delivered outside poll leaves no EINTR behind
            if terminate_requested() {
                return Err(io::Error::from(io::ErrorKind::Interrupted));
            }
            let ready = unsafe { libc::poll(&mut pollfd, 1, timeout_ms) };
            if ready < 0 {
                let err = io::Error::last_os_error();
                if err.kind() == io::ErrorKind::Interrupted && !terminate_requested() {
                    continue;
                }
                return Err(err);
            }
            if ready == 0 {
                return Ok(None);
            }

            let mut byte = 0u8;
            let n = unsafe {
                libc::read(
                    libc::STDIN_FILENO,
                    &mut byte as *mut u8 as *mut libc::c_void,
                    1,
                )
            };
            match n {
                1 => return Ok(Some(byte)),
                0 => return Err(io::Error::from(io::ErrorKind::UnexpectedEof)),
                _ => {
                    let err = io::Error::last_os_error();
                    match err.kind() {
                        io::ErrorKind::Interrupted if !terminate_requested() => continue,
                        io::ErrorKind::WouldBlock => continue,
                        _ => return Err(err),
                    }
                }
            }
        }
    }
}

#[cfg(not(unix))]
impl ByteSource for StdinSource {
    // No poll here: escape sequences arrive in one burst, so blocking is acceptable.
    fn read_byte(&mut self, _timeout: Option<Duration>) -> io::Result<Option<u8>> {
        use std::io::Read;
        let mut byte = [0u8; 1];
        match io::stdin().read(&mut byte)? {
            0 => Err(io::Error::from(io::ErrorKind::UnexpectedEof)),
            _ => Ok(Some(byte[0])),
        }
    }
}

/// Pre-recorded input. A `None` entry simulates a read timeout.
#[derive(Debug, Default, Clone)]
pub struct ScriptedSource {
    bytes: VecDeque<Option<u8>>,
}

impl ScriptedSource {
    pub fn new(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.iter().copied().map(Some).collect(),
        }
    }

    pub fn push_bytes(&mut self, bytes: &[u8]) {
        self.bytes.extend(bytes.iter().copied().map(Some));
    }

    pub fn push_pause(&mut self) {
        self.bytes.push_back(None);
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl ByteSource for ScriptedSource {
    fn read_byte(&mut self, timeout: Option<Duration>) -> io::Result<Option<u8>> {
        match self.bytes.pop_front() {
            Some(Some(byte)) => Ok(Some(byte)),
            // A pause only means something to a read that is willing to time out.
            Some(None) if timeout.is_some() => Ok(None),
            Some(None) => self.read_byte(None),
            None if timeout.is_some() => Ok(None),
            None => Err(io::Error::from(io::ErrorKind::UnexpectedEof)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(bytes: &[u8]) -> Key {
        read_key(&mut ScriptedSource::new(bytes)).unwrap()
    }

    #[test]
    fn test_literal_and_control_bytes() {
        assert_eq!(decode(b"a"), Key::Literal(b'a'));
        assert_eq!(decode(b"\t"), Key::Literal(b'\t'));
        assert_eq!(decode(&[3]), Key::Action(KeyAction::Interrupt));
        assert_eq!(decode(&[13]), Key::Action(KeyAction::Enter));
        assert_eq!(decode(&[17]), Key::Action(KeyAction::Quit));
    }

    #[test]
    fn test_arrow_sequences() {
        assert_eq!(decode(b"\x1b[A"), Key::Action(KeyAction::ArrowUp));
        assert_eq!(decode(b"\x1b[B"), Key::Action(KeyAction::ArrowDown));
        assert_eq!(decode(b"\x1b[C"), Key::Action(KeyAction::ArrowRight));
        assert_eq!(decode(b"\x1b[D"), Key::Action(KeyAction::ArrowLeft));
    }

    #[test]
    fn test_tilde_sequences() {
        assert_eq!(decode(b"\x1b[3~"), Key::Action(KeyAction::Delete));
        assert_eq!(decode(b"\x1b[5~"), Key::Action(KeyAction::PageUp));
        assert_eq!(decode(b"\x1b[6~"), Key::Action(KeyAction::PageDown));
        assert_eq!(decode(b"\x1b[1~"), Key::Action(KeyAction::Home));
        assert_eq!(decode(b"\x1b[8~"), Key::Action(KeyAction::End));
    }

    #[test]
    fn test_home_end_variants() {
        assert_eq!(decode(b"\x1b[H"), Key::Action(KeyAction::Home));
        assert_eq!(decode(b"\x1b[F"), Key::Action(KeyAction::End));
        assert_eq!(decode(b"\x1bOH"), Key::Action(KeyAction::Home));
        assert_eq!(decode(b"\x1bOF"), Key::Action(KeyAction::End));
    }

    #[test]
    fn test_bare_escape_times_out_to_cancel() {
        let mut source = ScriptedSource::new(b"\x1b");
        source.push_pause();
        source.push_bytes(b"x");
        assert_eq!(read_key(&mut source).unwrap(), Key::Action(KeyAction::Cancel));
        // The byte after the pause is not swallowed by the escape decoder
        assert_eq!(read_key(&mut source).unwrap(), Key::Literal(b'x'));
    }

    #[test]
    fn test_truncated_sequence_is_cancel() {
        let mut source = ScriptedSource::new(b"\x1b[");
        source.push_pause();
        assert_eq!(read_key(&mut source).unwrap(), Key::Action(KeyAction::Cancel));

        assert_eq!(decode(b"\x1b[5x"), Key::Action(KeyAction::Cancel));
        assert_eq!(decode(b"\x1b[Z"), Key::Action(KeyAction::Cancel));
    }

    #[test]
    fn test_end_of_input_is_error() {
        let err = read_key(&mut ScriptedSource::new(b"")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_parse_cursor_report() {
        assert_eq!(parse_cursor_report(b"\x1b[24;80R"), Some((24, 80)));
        assert_eq!(parse_cursor_report(b"\x1b[24;80"), Some((24, 80)));
        assert_eq!(parse_cursor_report(b"24;80R"), None);
        assert_eq!(parse_cursor_report(b"\x1b[24R"), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_pending_terminate_fails_stdin_reads() {
        // Set before any read, as when the signal lands between polls
        request_terminate();
        let err = StdinSource.read_byte(Some(Duration::from_millis(300))).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Interrupted);
        let err = read_key(&mut StdinSource).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Interrupted);
    }
}
