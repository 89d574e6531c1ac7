// Line-oriented chat loop over a ChatSession.
//
// Interactive: lines typed while a reply is pending go through the reducer
// (which ignores them) and EOF cancels the pending reply.
// Batch (piped stdin): each line waits for the previous answer.

use std::io::{self, BufRead, Write};

use grantime_chat::{ChatError, ChatSession, PendingReply};
use grantime_core::DecisionResult;
use smol::channel::{self, Receiver};

use crate::render;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Interactive,
    Batch,
}

/// Read stdin on a background thread, one message per line.
///
/// The channel closes at EOF or on a read error.
pub fn stdin_lines() -> Receiver<String> {
    let (tx, rx) = channel::unbounded();
    std::thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send_blocking(line).is_err() {
                break;
            }
        }
    });
    rx
}

enum Event {
    Reply(Result<DecisionResult, ChatError>),
    Line(Option<String>),
}

/// Wait for `pending` while still draining input.
///
/// Returns the outcome and whether input hit EOF.
async fn await_reply<W: Write>(
    session: &mut ChatSession,
    pending: PendingReply,
    lines: &Receiver<String>,
    out: &mut W,
) -> io::Result<(Result<DecisionResult, ChatError>, bool)> {
    let mut reply = Box::pin(pending.finish());
    loop {
        let event = smol::future::or(
            async { Event::Reply((&mut reply).await) },
            async { Event::Line(lines.recv().await.ok()) },
        )
        .await;

        match event {
            Event::Reply(outcome) => return Ok((outcome, false)),
            Event::Line(Some(line)) => {
                log::debug!("input while waiting dropped ({} chars)", line.len());
                session.set_input(line);
                writeln!(out, "(still working on the last question; input ignored)")?;
                out.flush()?;
            }
            Event::Line(None) => {
                log::info!("input closed with a reply pending");
                session.cancel_pending();
                return Ok((reply.await, true));
            }
        }
    }
}

/// Run the chat loop until input closes.
pub fn run<W: Write>(
    session: &mut ChatSession,
    lines: Receiver<String>,
    mode: InputMode,
    out: &mut W,
) -> io::Result<()> {
    smol::block_on(async {
        for msg in session.messages() {
            writeln!(out, "{}", render::message(msg))?;
        }

        loop {
            if mode == InputMode::Interactive {
                write!(out, "> ")?;
                out.flush()?;
            }
            let Ok(line) = lines.recv().await else { break };

            session.set_input(line);
            let Some(pending) = session.submit() else { continue };

            let (outcome, closed) = match mode {
                InputMode::Batch => {
                    if let Some(question) = session.messages().last() {
                        writeln!(out, "{}", render::message(question))?;
                    }
                    (pending.finish().await, false)
                }
                InputMode::Interactive => {
                    writeln!(out, "Assistant is typing...")?;
                    out.flush()?;
                    await_reply(session, pending, &lines, out).await?
                }
            };

            let replied = outcome.is_ok();
            session.resolve(outcome);
            if replied {
                if let Some(answer) = session.messages().last() {
                    writeln!(out, "{}", render::message(answer))?;
                }
            }
            out.flush()?;

            if closed {
                break;
            }
        }
        Ok::<(), io::Error>(())
    })
}
