//! Line-oriented command console.

use orrery::aspects::PairKey;
use orrery::events::parse_event_date;
use orrery::observatory::Command;
use orrery::selection::Selection;
use orrery::timeline::SpeedMode;

/// A parsed console line
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleInput {
    /// Forwarded to the observatory
    Observatory(Command),
    Status,
    Events,
    /// Ask the advisory service; blank text asks about the current selection
    Ask(String),
    /// Print the current chart spec as JSON
    Dump,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  select body <name> | segment <0-11> | aspect <a-b> | event <id>
  clear | hover [name]
  zoom in | zoom out | recenter | pan <dx> <dy> | zoom-at <factor> <x> <y>
  click <x> <y> | resize <width_px>
  play | pause | toggle | speed <super-slow|slow|standard|fast>
  scrub <date> | jump <event id>
  ask [question] | status | events | dump | help | quit";

fn number(token: Option<&str>, what: &str) -> Result<f64, String> {
    let token = token.ok_or_else(|| format!("missing {}", what))?;
    token
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| format!("invalid {}: {}", what, token))
}

fn rest(tokens: &[&str], from: usize, what: &str) -> Result<String, String> {
    let text = tokens.get(from..).unwrap_or(&[]).join(" ");
    if text.is_empty() {
        Err(format!("missing {}", what))
    } else {
        Ok(text)
    }
}

fn parse_selection(tokens: &[&str]) -> Result<Selection, String> {
    match tokens.first().copied() {
        Some("body") => rest(tokens, 1, "body name").map(Selection::Body),
        Some("segment") => {
            let index = tokens
                .get(1)
                .and_then(|t| t.parse::<u8>().ok())
                .ok_or_else(|| "segment index must be 0-11".to_string())?;
            Ok(Selection::ZodiacSegment(index))
        }
        Some("aspect") => {
            let text = rest(tokens, 1, "pair")?;
            PairKey::parse(&text)
                .map(Selection::Aspect)
                .ok_or_else(|| format!("invalid pair: {}", text))
        }
        Some("event") => rest(tokens, 1, "event id").map(Selection::Event),
        Some(other) => Err(format!("unknown selection kind: {}", other)),
        None => Err("missing selection kind".to_string()),
    }
}

/// Parse one console line. Blank lines give `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<ConsoleInput>, String> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some(head) = tokens.first() else {
        return Ok(None);
    };

    let command = match head.to_lowercase().as_str() {
        "select" => Command::Select(parse_selection(&tokens[1..])?),
        "clear" => Command::Clear,
        "hover" => Command::Hover(rest(&tokens, 1, "body").ok()),
        "zoom" => match tokens.get(1).copied() {
            Some("in") => Command::ZoomIn,
            Some("out") => Command::ZoomOut,
            _ => return Err("usage: zoom in | zoom out".to_string()),
        },
        "recenter" => Command::Recenter,
        "play" => Command::Play,
        "pause" => Command::Pause,
        "toggle" => Command::TogglePlay,
        "speed" => Command::SetSpeed(rest(&tokens, 1, "speed")?.parse::<SpeedMode>()?),
        "scrub" => {
            let text = rest(&tokens, 1, "date")?;
            let time = parse_event_date(&text).ok_or_else(|| format!("invalid date: {}", text))?;
            Command::ScrubTo(time)
        }
        "jump" => Command::JumpToEvent(rest(&tokens, 1, "event id")?),
        "pan" => Command::Pan {
            dx: number(tokens.get(1).copied(), "dx")?,
            dy: number(tokens.get(2).copied(), "dy")?,
        },
        "zoom-at" => Command::ZoomAt {
            factor: number(tokens.get(1).copied(), "factor")?,
            x: number(tokens.get(2).copied(), "x")?,
            y: number(tokens.get(3).copied(), "y")?,
        },
        "click" => Command::Click {
            x: number(tokens.get(1).copied(), "x")?,
            y: number(tokens.get(2).copied(), "y")?,
        },
        "resize" => Command::Resize {
            width_px: number(tokens.get(1).copied(), "width")?,
        },
        "status" => return Ok(Some(ConsoleInput::Status)),
        "events" => return Ok(Some(ConsoleInput::Events)),
        "ask" => return Ok(Some(ConsoleInput::Ask(tokens[1..].join(" ")))),
        "dump" => return Ok(Some(ConsoleInput::Dump)),
        "help" | "?" => return Ok(Some(ConsoleInput::Help)),
        "quit" | "exit" => return Ok(Some(ConsoleInput::Quit)),
        other => return Err(format!("unknown command: {} (try help)", other)),
    };
    Ok(Some(ConsoleInput::Observatory(command)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(line: &str) -> Command {
        match parse_line(line) {
            Ok(Some(ConsoleInput::Observatory(command))) => command,
            other => panic!("{:?} parsed to {:?}", line, other),
        }
    }

    #[test]
    fn test_selection_commands() {
        assert_eq!(
            command("select body Sun"),
            Command::Select(Selection::Body("Sun".into()))
        );
        assert_eq!(
            command("select segment 11"),
            Command::Select(Selection::ZodiacSegment(11))
        );
        assert_eq!(
            command("select aspect Sun-Moon"),
            Command::Select(Selection::Aspect(PairKey::new("Moon", "Sun")))
        );
        assert_eq!(
            command("select event great-align"),
            Command::Select(Selection::Event("great-align".into()))
        );
        assert!(parse_line("select segment x").is_err());
        assert!(parse_line("select planet Sun").is_err());
    }

    #[test]
    fn test_camera_and_clock_commands() {
        assert_eq!(command("zoom in"), Command::ZoomIn);
        assert_eq!(command("pan 10 -5.5"), Command::Pan { dx: 10.0, dy: -5.5 });
        assert_eq!(
            command("zoom-at 1.5 500 250"),
            Command::ZoomAt { factor: 1.5, x: 500.0, y: 250.0 }
        );
        assert_eq!(command("speed super-slow"), Command::SetSpeed(SpeedMode::SuperSlow));
        assert_eq!(command("hover"), Command::Hover(None));
        assert_eq!(command("hover Mars"), Command::Hover(Some("Mars".into())));
        assert!(matches!(command("scrub 2026-06-01"), Command::ScrubTo(_)));
        assert!(parse_line("pan 1").is_err());
        assert!(parse_line("speed warp").is_err());
        assert!(parse_line("click NaN 3").is_err());
    }

    #[test]
    fn test_console_only_inputs() {
        assert_eq!(parse_line("   "), Ok(None));
        assert_eq!(parse_line("status"), Ok(Some(ConsoleInput::Status)));
        assert_eq!(parse_line("QUIT"), Ok(Some(ConsoleInput::Quit)));
        assert_eq!(parse_line("ask"), Ok(Some(ConsoleInput::Ask(String::new()))));
        assert!(parse_line("launch").is_err());
    }

    #[test]
    fn test_ask_keeps_question_text() {
        assert_eq!(
            parse_line("ask what did Saturn at 0 Aries mean in 1996?"),
            Ok(Some(ConsoleInput::Ask(
                "what did Saturn at 0 Aries mean in 1996?".to_string()
            )))
        );
    }
}
