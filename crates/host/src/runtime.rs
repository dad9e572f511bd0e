//! Room runtime.
//!
//! Drives one [`Room`] on a fixed interval while reading client lines from an
//! async reader and writing snapshots to an async writer.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::{self, MissedTickBehavior};
use tracing::{info, warn};

use tetris_arena_core::{Clock, PieceQueue, PieceSource, RandomSource, StdRandom, SystemClock};
use tetris_arena_room::Room;

use crate::config::HostConfig;
use crate::protocol::{encode_line, parse_message, ClientMessage, ErrorCode, ServerMessage};

/// Build a room from `config` and serve it until it finishes, the tick limit is
/// reached, or input closes with nobody left in the room.
pub async fn run_room<Rd, W>(config: HostConfig, reader: Rd, writer: W) -> anyhow::Result<()>
where
    Rd: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let (rng, piece_seed) = match config.seed {
        Some(seed) => (StdRandom::seeded(seed), seed as u32),
        None => (StdRandom::from_entropy(), SystemClock.now_ms() as u32),
    };

    let room = Room::new(
        config.room_id.clone(),
        config.rules.clone(),
        config.max_players,
        rng,
        SystemClock,
        PieceQueue::new(piece_seed),
    );

    serve_room(room, &config, reader, writer).await?;
    Ok(())
}

/// Serve an already-built room. Returns the room in its final state.
pub async fn serve_room<R, C, P, Rd, W>(
    mut room: Room<R, C, P>,
    config: &HostConfig,
    reader: Rd,
    mut writer: W,
) -> anyhow::Result<Room<R, C, P>>
where
    R: RandomSource,
    C: Clock,
    P: PieceSource,
    Rd: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    info!(room = room.id(), tick_ms = config.tick_ms, "room started");

    let mut lines = reader.lines();
    let mut interval = time::interval(config.tick_interval());
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut input_closed = false;

    loop {
        tokio::select! {
            biased;

            line = lines.next_line(), if !input_closed => {
                match line? {
                    Some(line) => {
                        let trimmed = line.trim();
                        if trimmed.is_empty() {
                            continue;
                        }
                        if let Some(reply) = handle_line(&mut room, trimmed) {
                            send(&mut writer, &reply).await?;
                        }
                    }
                    None => {
                        input_closed = true;
                        info!(room = room.id(), "input closed");
                    }
                }
            }

            _ = interval.tick() => {
                if input_closed && room.is_empty() {
                    break;
                }

                let report = room.tick();
                let finished = report.finished;
                let tick = report.tick;
                send(&mut writer, &ServerMessage::Tick(report)).await?;

                if finished {
                    break;
                }
                if config.max_ticks.is_some_and(|max| tick >= max) {
                    info!(room = room.id(), tick, "tick limit reached");
                    break;
                }
            }
        }
    }

    info!(room = room.id(), ticks = room.tick_count(), winner = ?room.winner(), "room stopped");
    Ok(room)
}

/// Apply one client line to the room and return the reply, if any.
pub fn handle_line<R, C, P>(room: &mut Room<R, C, P>, line: &str) -> Option<ServerMessage>
where
    R: RandomSource,
    C: Clock,
    P: PieceSource,
{
    let msg = match parse_message(line) {
        Ok(msg) => msg,
        Err(e) => {
            warn!(error = %e, "rejected client line");
            return Some(ServerMessage::error(ErrorCode::InvalidMessage, e.to_string()));
        }
    };

    let result = match msg {
        ClientMessage::Join { user_name, who } => {
            let who = who.unwrap_or_else(|| format!("player{}", room.players().len() + 1));
            room.join(&user_name, &who).map(|p| {
                Some(ServerMessage::Joined {
                    user_name: p.user_name.clone(),
                    who: p.who.clone(),
                })
            })
        }
        ClientMessage::Input { user_name, command } => {
            room.apply_input(&user_name, command).map(|_| None)
        }
        ClientMessage::Leave { user_name } => room
            .leave(&user_name)
            .map(|p| Some(ServerMessage::Left { user_name: p.user_name })),
    };

    match result {
        Ok(reply) => reply,
        Err(e) => {
            warn!(room = room.id(), error = %e, "request failed");
            Some(ServerMessage::from(&e))
        }
    }
}

async fn send<W>(writer: &mut W, msg: &ServerMessage) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let buf = encode_line(msg)?;
    writer.write_all(&buf).await?;
    writer.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tetris_arena_core::rng::ManualClock;
    use tetris_arena_core::{RulesConfig, SimpleRng};

    fn room() -> Room<SimpleRng, ManualClock, PieceQueue> {
        Room::new(
            "t",
            RulesConfig::default(),
            2,
            SimpleRng::new(1),
            ManualClock::new(0),
            PieceQueue::new(1),
        )
    }

    #[test]
    fn test_join_assigns_role() {
        let mut room = room();
        let reply = handle_line(&mut room, r#"{"type":"join","user_name":"a"}"#);
        assert_eq!(
            reply,
            Some(ServerMessage::Joined {
                user_name: "a".into(),
                who: "player1".into()
            })
        );
    }

    #[test]
    fn test_input_has_no_reply() {
        let mut room = room();
        handle_line(&mut room, r#"{"type":"join","user_name":"a","who":"host"}"#);
        assert_eq!(
            handle_line(&mut room, r#"{"type":"input","user_name":"a","command":"left"}"#),
            None
        );
    }

    #[test]
    fn test_bad_line_yields_error() {
        let mut room = room();
        match handle_line(&mut room, "{") {
            Some(ServerMessage::Error { code, .. }) => assert_eq!(code, ErrorCode::InvalidMessage),
            other => panic!("unexpected reply: {other:?}"),
        }
    }
}
