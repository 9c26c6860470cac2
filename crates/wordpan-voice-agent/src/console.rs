use async_trait::async_trait;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use wordpan_voice::{run_session, QuizAgent, RoomEvent, SpeechSink, VoiceError, START_GAME_RPC};

const EVENT_BUFFER: usize = 16;

/// Speaks by printing to stdout.
pub struct PrintedSpeech;

#[async_trait]
impl SpeechSink for PrintedSpeech {
    async fn say(&self, text: &str) -> Result<(), VoiceError> {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "agent> {text}").map_err(|e| VoiceError::Speech(e.to_string()))?;
        stdout.flush().map_err(|e| VoiceError::Speech(e.to_string()))
    }
}

#[derive(Debug, PartialEq, Eq)]
enum ConsoleInput {
    Event(RoomEvent),
    Quit,
    Skip,
}

fn parse_line(line: &str, participant: &str) -> ConsoleInput {
    match line.trim() {
        "/quit" => ConsoleInput::Quit,
        "/start" => ConsoleInput::Event(RoomEvent::Rpc {
            method: START_GAME_RPC.to_string(),
            payload: String::new(),
        }),
        "" => ConsoleInput::Skip,
        text => ConsoleInput::Event(RoomEvent::Transcript {
            participant: participant.to_string(),
            text: text.to_string(),
        }),
    }
}

/// Runs a session fed from stdin until `/quit` or end of input.
pub async fn run(agent: &mut QuizAgent, participant: &str) -> Result<(), VoiceError> {
    let (tx, rx) = mpsc::channel(EVENT_BUFFER);
    let identity = participant.to_string();

    let reader = tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            match parse_line(&line, &identity) {
                ConsoleInput::Quit => break,
                ConsoleInput::Skip => continue,
                ConsoleInput::Event(event) => {
                    if tx.send(event).await.is_err() {
                        break;
                    }
                }
            }
        }
    });

    let result = run_session(agent, &[participant.to_string()], rx).await;
    reader.abort();
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_and_transcripts() {
        assert_eq!(parse_line(" /quit ", "me"), ConsoleInput::Quit);
        assert_eq!(parse_line("   ", "me"), ConsoleInput::Skip);
        assert_eq!(
            parse_line("/start", "me"),
            ConsoleInput::Event(RoomEvent::Rpc {
                method: "start_game".into(),
                payload: String::new(),
            })
        );
        assert_eq!(
            parse_line(" gato ", "me"),
            ConsoleInput::Event(RoomEvent::Transcript {
                participant: "me".into(),
                text: "gato".into(),
            })
        );
    }
}
