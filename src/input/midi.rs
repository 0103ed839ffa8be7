use std::{sync::mpsc::Sender, time::Instant};

use midir::{Ignore, MidiInput, MidiInputConnection, MidiInputPort};

use super::ControlMessage;
use crate::error::InputError;

const CLIENT_NAME: &str = "tap-histogram";
const PORT_NAME: &str = "tap-histogram-in";
const NOTE_ON: u8 = 0x90;

/// Taps from note-on messages on a MIDI input port.
///
/// The connection stays open until the value is dropped.
pub struct MidiTapInput {
    _connection: MidiInputConnection<Sender<ControlMessage>>,
    port_name: String,
}

impl MidiTapInput {
    pub fn connect(
        port_hint: &str,
        reset_note: Option<u8>,
        tx: Sender<ControlMessage>,
    ) -> Result<Self, InputError> {
        let mut midi_in =
            MidiInput::new(CLIENT_NAME).map_err(|err| InputError::MidiInit(err.to_string()))?;
        midi_in.ignore(Ignore::All);
        let (target_port, port_name) = select_port(&midi_in, port_hint)?;

        let connection = midi_in
            .connect(
                &target_port,
                PORT_NAME,
                move |_stamp, bytes, tx| {
                    if let Some(message) = parse_message(bytes, reset_note, Instant::now()) {
                        let _ = tx.send(message);
                    }
                },
                tx,
            )
            .map_err(|err| InputError::Connection(err.to_string()))?;

        Ok(Self {
            _connection: connection,
            port_name,
        })
    }

    pub fn port_name(&self) -> &str {
        &self.port_name
    }
}

/// First input port whose name contains `hint`, with its name.
fn select_port(midi_in: &MidiInput, hint: &str) -> Result<(MidiInputPort, String), InputError> {
    midi_in
        .ports()
        .into_iter()
        .filter_map(|port| {
            let name = midi_in.port_name(&port).ok()?;
            Some((port, name))
        })
        .find(|(_, name)| name_matches(name, hint))
        .ok_or_else(|| InputError::PortNotFound(hint.to_string()))
}

/// Case-insensitive substring match; a blank hint takes any port.
fn name_matches(name: &str, hint: &str) -> bool {
    let hint = hint.trim();
    hint.is_empty() || name.to_lowercase().contains(&hint.to_lowercase())
}

/// Note-on with non-zero velocity on any channel taps, or resets for `reset_note`.
fn parse_message(bytes: &[u8], reset_note: Option<u8>, now: Instant) -> Option<ControlMessage> {
    let &[status, note, velocity, ..] = bytes else {
        return None;
    };
    if status & 0xF0 != NOTE_ON || velocity == 0 {
        return None;
    }

    if Some(note) == reset_note {
        Some(ControlMessage::Reset)
    } else {
        Some(ControlMessage::Tap { timestamp: now })
    }
}
