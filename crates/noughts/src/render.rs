//! Plain-text and JSON frames for the terminal.

use noughts_engine::{Phase, Position, Snapshot};

/// How frames are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrameFormat {
    /// Board grid with score and status lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

impl FrameFormat {
    /// Renders one frame.
    pub fn render(self, snapshot: &Snapshot) -> serde_json::Result<String> {
        match self {
            FrameFormat::Text => Ok(text_frame(snapshot)),
            FrameFormat::Json => serde_json::to_string(snapshot),
        }
    }
}

/// Renders the snapshot as the terminal shows it.
pub fn text_frame(snapshot: &Snapshot) -> String {
    let seats = snapshot.seats();
    let mut frame = format!(
        "You {}   {}   AI {}\n\n{}\n",
        seats.human(),
        snapshot.scoreline(),
        seats.adversary(),
        snapshot.board().display()
    );

    let status = snapshot.status_line();
    if !status.is_empty() {
        frame.push('\n');
        frame.push_str(&status);
        frame.push('\n');
    }

    let hint = match snapshot.phase() {
        Phase::AwaitingHumanMove => format!(
            "Your move ({}), r to reset, restart, q to quit",
            open_squares(snapshot)
        ),
        Phase::AwaitingAdversaryMove => "AI is thinking...".to_string(),
        Phase::RoundResolved => "Next round starting...".to_string(),
    };
    frame.push_str(&hint);
    frame
}

/// 1-based keys of the squares a click would land on.
fn open_squares(snapshot: &Snapshot) -> String {
    Position::ALL
        .iter()
        .filter(|pos| snapshot.accepts_click(**pos))
        .map(|pos| (pos.to_index() + 1).to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use noughts_engine::{Delays, Mark, Seats, Session};

    #[test]
    fn test_text_frame_shows_seats_and_board() {
        let mut session = Session::new(Seats::new(Mark::X), Delays::default());
        session.cell_clicked(0);
        let frame = text_frame(&session.snapshot());
        assert!(frame.starts_with("You X   0 - 0   AI O"));
        assert!(frame.contains("X|2|3"));
        assert!(frame.ends_with("AI is thinking..."));
    }

    #[test]
    fn test_hint_lists_open_squares() {
        let mut session = Session::new(Seats::new(Mark::X), Delays::default());
        let frame = text_frame(&session.snapshot());
        assert!(frame.ends_with("Your move (1 2 3 4 5 6 7 8 9), r to reset, restart, q to quit"));

        // The only drawing reply to a corner opening is the centre.
        session.cell_clicked(0);
        let token = session.pending_timer().expect("adversary scheduled");
        assert!(session.fire(token));
        let frame = text_frame(&session.snapshot());
        assert!(frame.contains("Your move (2 3 4 6 7 8 9)"));
    }

    #[test]
    fn test_json_frame_is_single_line() {
        let session = Session::new(Seats::new(Mark::O), Delays::default());
        let frame = FrameFormat::Json
            .render(&session.snapshot())
            .expect("serializable");
        assert!(!frame.contains('\n'));
        let value: serde_json::Value = serde_json::from_str(&frame).expect("valid json");
        assert_eq!(value["seats"]["human"], "O");
        assert_eq!(value["phase"], "AwaitingAdversaryMove");
    }
}
