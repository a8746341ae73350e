//! Console command parsing.
//!
//! One line per command: session words (`start`, `next`, `restart`,
//! `surrender`, `status`, `quit`) or `<CALLSIGN> <instruction> [value]`.

use thiserror::Error;

use approach_core::commands::{AircraftCommand, PlayerCommand};

/// What the player typed.
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleInput {
    Command(PlayerCommand),
    Status,
    Quit,
}

#[derive(Error, Debug, PartialEq)]
pub enum ParseError {
    #[error("empty line")]
    Empty,
    #[error("unknown instruction `{0}`")]
    UnknownInstruction(String),
    #[error("`{0}` needs a value")]
    MissingValue(String),
    #[error("`{0}` is not a number")]
    BadValue(String),
}

pub fn parse_line(line: &str) -> Result<ConsoleInput, ParseError> {
    let mut words = line.split_whitespace();
    let first = words.next().ok_or(ParseError::Empty)?;

    let session = match first.to_ascii_lowercase().as_str() {
        "start" => Some(ConsoleInput::Command(PlayerCommand::StartGame)),
        "next" => Some(ConsoleInput::Command(PlayerCommand::NextLevel)),
        "restart" => Some(ConsoleInput::Command(PlayerCommand::Restart)),
        "surrender" => Some(ConsoleInput::Command(PlayerCommand::Surrender)),
        "status" => Some(ConsoleInput::Status),
        "quit" | "exit" => Some(ConsoleInput::Quit),
        _ => None,
    };
    if let Some(input) = session {
        return Ok(input);
    }

    let callsign = first.to_ascii_uppercase();
    let instruction = words
        .next()
        .ok_or_else(|| ParseError::MissingValue(callsign.clone()))?
        .to_ascii_lowercase();

    let command = match instruction.as_str() {
        "heading" | "hdg" => AircraftCommand::Heading(value(&instruction, words.next())?),
        "altitude" | "alt" => AircraftCommand::Altitude(value(&instruction, words.next())?),
        "speed" | "spd" => AircraftCommand::Speed(value(&instruction, words.next())?),
        "hold" => AircraftCommand::Hold,
        "land" => AircraftCommand::Land,
        _ => return Err(ParseError::UnknownInstruction(instruction)),
    };

    Ok(ConsoleInput::Command(PlayerCommand::Aircraft { callsign, command }))
}

fn value(instruction: &str, word: Option<&str>) -> Result<f64, ParseError> {
    let word = word.ok_or_else(|| ParseError::MissingValue(instruction.to_string()))?;
    word.parse()
        .map_err(|_| ParseError::BadValue(word.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_words() {
        assert_eq!(
            parse_line("start"),
            Ok(ConsoleInput::Command(PlayerCommand::StartGame))
        );
        assert_eq!(
            parse_line("  NEXT "),
            Ok(ConsoleInput::Command(PlayerCommand::NextLevel))
        );
        assert_eq!(parse_line("status"), Ok(ConsoleInput::Status));
        assert_eq!(parse_line("exit"), Ok(ConsoleInput::Quit));
    }

    #[test]
    fn test_aircraft_instructions() {
        assert_eq!(
            parse_line("af001 heading 270"),
            Ok(ConsoleInput::Command(PlayerCommand::Aircraft {
                callsign: "AF001".into(),
                command: AircraftCommand::Heading(270.0),
            }))
        );
        assert_eq!(
            parse_line("MIL012 alt -500"),
            Ok(ConsoleInput::Command(PlayerCommand::Aircraft {
                callsign: "MIL012".into(),
                command: AircraftCommand::Altitude(-500.0),
            }))
        );
        assert_eq!(
            parse_line("PJ003 land"),
            Ok(ConsoleInput::Command(PlayerCommand::Aircraft {
                callsign: "PJ003".into(),
                command: AircraftCommand::Land,
            }))
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_line("   "), Err(ParseError::Empty));
        assert_eq!(
            parse_line("AF001"),
            Err(ParseError::MissingValue("AF001".into()))
        );
        assert_eq!(
            parse_line("AF001 speed"),
            Err(ParseError::MissingValue("speed".into()))
        );
        assert_eq!(
            parse_line("AF001 speed fast"),
            Err(ParseError::BadValue("fast".into()))
        );
        assert_eq!(
            parse_line("AF001 loop"),
            Err(ParseError::UnknownInstruction("loop".into()))
        );
    }
}
