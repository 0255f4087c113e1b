//! # Command Script Adapter
//!
//! Drives a `Canvas` from a JSON list of commands and reports one outcome
//! per command. Commands are applied in order; a rejected command leaves the
//! canvas untouched and the script carries on.
//!
//! ```text
//! [
//!   {"op": "create_frame", "frame": {"x": 10, "y": 10, "width": 10, "height": 10},
//!    "circle": {"x": 8, "y": 8, "diameter": 2}},
//!   {"op": "create_circle", "frame_id": 1, "circle": {"x": 12, "y": 12, "diameter": 2}},
//!   {"op": "update_circle", "id": 2, "circle": {"diameter": 1.5}},
//!   {"op": "query_circles", "query": {"center_x": 10, "center_y": 10, "radius": 5}},
//!   {"op": "show_frame", "id": 1}
//! ]
//! ```

use serde::{Deserialize, Serialize};

use crate::core::query::{CircleQuery, QueryResult};
use crate::core::{Circle, CircleParams, Frame, FrameParams, Id};
use crate::engine::{Canvas, CanvasError, Created, FrameDetails};

/// One canvas operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    CreateFrame {
        frame: FrameParams,
        #[serde(default)]
        circle: Option<CircleParams>,
    },
    CreateCircle {
        frame_id: Id,
        circle: CircleParams,
    },
    UpdateCircle {
        id: Id,
        circle: CircleParams,
    },
    DeleteFrame {
        id: Id,
    },
    DeleteCircle {
        id: Id,
    },
    ShowFrame {
        id: Id,
    },
    QueryCircles {
        #[serde(default)]
        query: CircleQuery,
    },
}

/// An ordered batch of commands
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Script {
    pub commands: Vec<Command>,
}

impl Script {
    /// Parse a script from a JSON array of commands
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Result of applying one command
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Created(Created),
    Circle(Circle),
    Frame(FrameDetails),
    Circles(QueryResult),
    DeletedFrame(Frame),
    DeletedCircle(Circle),

    /// Validation failed; nothing was written
    Rejected { errors: Vec<String> },
    NotFound { error: String },
    Conflict { error: String },
    Failed { error: String },
}

impl Outcome {
    /// Check if the command took effect (or, for reads, answered)
    pub fn is_success(&self) -> bool {
        !matches!(
            self,
            Outcome::Rejected { .. }
                | Outcome::NotFound { .. }
                | Outcome::Conflict { .. }
                | Outcome::Failed { .. }
        )
    }
}

impl From<CanvasError> for Outcome {
    fn from(err: CanvasError) -> Self {
        match err {
            CanvasError::Invalid(errors) | CanvasError::RolledBack(errors) => Outcome::Rejected {
                errors: errors.full_messages(),
            },
            err @ CanvasError::NotFound { .. } => Outcome::NotFound {
                error: err.to_string(),
            },
            err @ CanvasError::FrameHasCircles { .. } => Outcome::Conflict {
                error: err.to_string(),
            },
            err @ CanvasError::Store(_) => Outcome::Failed {
                error: err.to_string(),
            },
        }
    }
}

fn outcome<T>(result: Result<T, CanvasError>, wrap: impl FnOnce(T) -> Outcome) -> Outcome {
    match result {
        Ok(value) => wrap(value),
        Err(err) => err.into(),
    }
}

/// Apply a single command
pub fn apply(canvas: &mut Canvas, command: &Command) -> Outcome {
    log::debug!("applying {:?}", command);

    match command {
        Command::CreateFrame { frame, circle } => {
            outcome(canvas.create_frame(frame, circle.as_ref()), Outcome::Created)
        }
        Command::CreateCircle { frame_id, circle } => {
            outcome(canvas.create_circle(*frame_id, circle), Outcome::Circle)
        }
        Command::UpdateCircle { id, circle } => {
            outcome(canvas.update_circle(*id, circle), Outcome::Circle)
        }
        Command::DeleteFrame { id } => outcome(canvas.delete_frame(*id), Outcome::DeletedFrame),
        Command::DeleteCircle { id } => outcome(canvas.delete_circle(*id), Outcome::DeletedCircle),
        Command::ShowFrame { id } => outcome(canvas.show_frame(*id), Outcome::Frame),
        Command::QueryCircles { query } => Outcome::Circles(canvas.query_circles(query)),
    }
}

/// Apply every command of `script` in order
pub fn run(canvas: &mut Canvas, script: &Script) -> Vec<Outcome> {
    let outcomes: Vec<Outcome> = script.commands.iter().map(|c| apply(canvas, c)).collect();

    let failed = outcomes.iter().filter(|o| !o.is_success()).count();
    log::info!(
        "script finished: {} commands, {} failed, {} frames, {} circles",
        outcomes.len(),
        failed,
        canvas.frame_count(),
        canvas.circle_count()
    );

    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::AttrValue;
    use pretty_assertions::assert_eq;

    const SCRIPT: &str = r#"[
        {"op": "create_frame", "frame": {"x": 10, "y": 10, "width": 10, "height": 10},
         "circle": {"x": 8, "y": 8, "diameter": 2}},
        {"op": "create_circle", "frame_id": 1, "circle": {"x": 12, "y": 12, "diameter": 2}},
        {"op": "create_circle", "frame_id": 1, "circle": {"x": 8.5, "y": 8, "diameter": 2}},
        {"op": "create_frame", "frame": {"x": 10, "y": 10, "width": 5, "height": 5}},
        {"op": "update_circle", "id": 2, "circle": {"diameter": 1.5}},
        {"op": "query_circles", "query": {"center_x": 10, "center_y": 10, "radius": 5}},
        {"op": "delete_frame", "id": 1},
        {"op": "show_frame", "id": 1},
        {"op": "delete_circle", "id": 7}
    ]"#;

    #[test]
    fn test_parse_script() {
        let script = Script::from_json(SCRIPT).unwrap();

        assert_eq!(script.len(), 9);
        assert_eq!(
            script.commands[4],
            Command::UpdateCircle {
                id: Id::new(2),
                circle: CircleParams {
                    diameter: Some(AttrValue::Number(1.5)),
                    ..CircleParams::default()
                },
            }
        );
        assert_eq!(
            script.commands[5],
            Command::QueryCircles {
                query: CircleQuery::new().within(10.0, 10.0, 5.0)
            }
        );
    }

    #[test]
    fn test_parse_keeps_explicit_null() {
        let script =
            Script::from_json(r#"[{"op": "update_circle", "id": 1, "circle": {"x": null}}]"#)
                .unwrap();

        match &script.commands[0] {
            Command::UpdateCircle { circle, .. } => {
                assert_eq!(circle.x, Some(AttrValue::Null));
                assert_eq!(circle.y, None);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_run_script() {
        let script = Script::from_json(SCRIPT).unwrap();
        let mut canvas = Canvas::default();

        let outcomes = run(&mut canvas, &script);

        let success: Vec<bool> = outcomes.iter().map(Outcome::is_success).collect();
        assert_eq!(
            success,
            vec![true, true, false, false, true, true, false, true, false]
        );

        assert_eq!(
            outcomes[2],
            Outcome::Rejected {
                errors: vec!["Circle collides with another circle within the same frame".into()]
            }
        );
        assert_eq!(
            outcomes[6],
            Outcome::Conflict {
                error: "Cannot delete frame with associated circles".into()
            }
        );
        assert_eq!(
            outcomes[8],
            Outcome::NotFound {
                error: "Circle not found".into()
            }
        );

        match &outcomes[5] {
            Outcome::Circles(result) => assert_eq!(result.total_count, 2),
            other => panic!("unexpected outcome {:?}", other),
        }
        match &outcomes[7] {
            Outcome::Frame(details) => assert_eq!(details.frame.circles_count, 2),
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_outcome_serialization() {
        let mut canvas = Canvas::default();
        let command = Command::CreateFrame {
            frame: FrameParams::new(10.0, 10.0, 5.0, 5.0),
            circle: None,
        };

        let json = serde_json::to_value(apply(&mut canvas, &command)).unwrap();

        assert_eq!(json["created"]["frame"]["id"], 1);
        assert_eq!(json["created"]["frame"]["circles_count"], 0);
        assert!(json["created"]["circle"].is_null());
    }
}
