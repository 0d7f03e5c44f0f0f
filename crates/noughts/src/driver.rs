//! Event loop that runs a session against its inputs and timers.

use crate::input::Input;
use noughts_engine::{Session, Snapshot, TimerToken};
use tokio::sync::mpsc;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, info, instrument};

/// Drives `session` until the player quits or either channel closes.
///
/// A frame is sent whenever the snapshot changes. The session's pending
/// timer is armed once, when it first appears, so inputs that change
/// nothing do not push its deadline back. Returns the session as left.
#[instrument(skip_all, fields(human = %session.seats().human()))]
pub async fn drive(
    mut session: Session,
    mut inputs: mpsc::UnboundedReceiver<Input>,
    frames: mpsc::UnboundedSender<Snapshot>,
) -> Session {
    info!("Session started");
    let mut last_frame: Option<Snapshot> = None;
    let mut armed: Option<(TimerToken, Instant)> = None;

    loop {
        let frame = session.snapshot();
        if last_frame.as_ref() != Some(&frame) {
            if frames.send(frame.clone()).is_err() {
                info!("Frame receiver closed");
                break;
            }
            last_frame = Some(frame);
        }

        armed = match (session.pending_timer(), armed) {
            (Some(token), Some((current, deadline))) if current == token => Some((token, deadline)),
            (Some(token), _) => {
                debug!(timer_id = token.id(), kind = %token.kind(), "Timer armed");
                Some((token, Instant::now() + token.delay()))
            }
            (None, _) => None,
        };
        let deadline = armed.map_or_else(Instant::now, |(_, deadline)| deadline);

        tokio::select! {
            biased;

            input = inputs.recv() => match input {
                Some(Input::Quit) | None => {
                    info!("Player left");
                    break;
                }
                Some(input) => apply(&mut session, input),
            },
            () = sleep_until(deadline), if armed.is_some() => {
                if let Some((token, _)) = armed.take() {
                    session.fire(token);
                }
            }
        }
    }

    info!(
        x = session.scores().x(),
        o = session.scores().o(),
        "Session ended"
    );
    session
}

fn apply(session: &mut Session, input: Input) {
    match input {
        Input::Click(index) => {
            session.cell_clicked(index);
        }
        Input::Reset => session.reset(),
        Input::Restart => session.restart(),
        Input::Quit => {}
    }
}
