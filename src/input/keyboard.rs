use std::{
    io::{self, BufRead},
    sync::mpsc::Sender,
    thread,
    time::Instant,
};

use log::{error, warn};

use super::ControlMessage;
use crate::config::KeyConfig;
use crate::error::InputError;

const THREAD_NAME: &str = "tap-histogram-stdin";

/// Read taps from stdin on a detached thread: Enter taps, the reset key resets,
/// the quit key or EOF quits.
pub fn spawn_keyboard(
    tx: Sender<ControlMessage>,
    keys: KeyConfig,
) -> Result<thread::JoinHandle<()>, InputError> {
    thread::Builder::new()
        .name(THREAD_NAME.into())
        .spawn(move || {
            let stdin = io::stdin();
            if let Err(err) = pump(stdin.lock(), &tx, &keys) {
                error!("stdin: {err}");
                let _ = tx.send(ControlMessage::Quit);
            }
        })
        .map_err(|err| InputError::Thread(err.to_string()))
}

/// Translate one input line; `None` for lines that mean nothing.
pub fn parse_line(line: &str, keys: &KeyConfig, now: Instant) -> Option<ControlMessage> {
    let line = line.trim();
    if line.is_empty() {
        Some(ControlMessage::Tap { timestamp: now })
    } else if line.eq_ignore_ascii_case(keys.reset.trim()) {
        Some(ControlMessage::Reset)
    } else if line.eq_ignore_ascii_case(keys.quit.trim()) {
        Some(ControlMessage::Quit)
    } else {
        None
    }
}

fn pump<R: BufRead>(
    mut reader: R,
    tx: &Sender<ControlMessage>,
    keys: &KeyConfig,
) -> io::Result<()> {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let now = Instant::now();
        // undecodable bytes become U+FFFD and fall through to "ignored"
        let line = String::from_utf8_lossy(&buf);

        let Some(message) = parse_line(&line, keys, now) else {
            warn!("ignoring input {:?}", line.trim());
            continue;
        };
        if tx.send(message).is_err() || message == ControlMessage::Quit {
            return Ok(());
        }
    }

    let _ = tx.send(ControlMessage::Quit);
    Ok(())
}
