use crate::error::GrammarError;
use crate::event::{BatterEvent, Event, ModifierKind, RunnerEvent, decode_event};
use crate::types::Side;

// One play line in the published corpus lost its event separator to an
// encoding error; rewritten verbatim before splitting.
const PLAY_CORRECTIONS: [(&str, &str); 1] = [(
    "play,3,1,smitj106,??,,43,2-3",
    "play,3,1,smitj106,??,?,43.2-3",
)];

/// One plate appearance (or mid-appearance runner event):
/// `play,<inning>,<side>,<batter>,<count>,<pitches>,<event>`.
#[derive(Debug, Clone, PartialEq)]
pub struct Play {
    pub inning: u32,
    pub side: Side,
    pub batter_id: String,
    pub count: String,
    pub pitches: String,
    pub comments: Vec<String>,
    pub event: Event,
    pub raw: String,
}

impl Play {
    /// Decode a play line together with the `com` lines that follow it.
    pub fn from_play_line(
        play_line: &str,
        comment_lines: &[impl AsRef<str>],
    ) -> Result<Self, GrammarError> {
        let mut line = play_line;
        for (corrupt, corrected) in PLAY_CORRECTIONS {
            if line == corrupt {
                line = corrected;
            }
        }

        let parts: Vec<&str> = line.split(',').collect();
        let [_, inning, side, batter_id, count, pitches, event_field] = parts[..] else {
            return Err(GrammarError::new("play", play_line));
        };

        let inning = inning
            .parse::<u32>()
            .map_err(|_| GrammarError::new("inning", inning).with_line(play_line))?;
        let side = Side::from_field(side, play_line)?;
        let event = decode_event(event_field).map_err(|e| e.with_line(play_line))?;

        let comments = comment_lines
            .iter()
            .map(|comment_line| {
                comment_line
                    .as_ref()
                    .split_once(',')
                    .map(|(_, text)| text.to_string())
                    .unwrap_or_default()
            })
            .collect();

        Ok(Self {
            inning,
            side,
            batter_id: batter_id.to_string(),
            count: count.to_string(),
            pitches: pitches.to_string(),
            comments,
            event,
            raw: play_line.to_string(),
        })
    }

    pub fn is_walk(&self) -> bool {
        matches!(
            self.event.description.batter_event,
            Some(BatterEvent::Walk | BatterEvent::IntentionalWalk)
        )
    }

    pub fn is_hit_by_pitch(&self) -> bool {
        self.event.description.batter_event == Some(BatterEvent::HitByPitch)
    }

    pub fn is_sacrifice_fly(&self) -> bool {
        self.event
            .modifiers
            .iter()
            .any(|modifier| modifier.kind == ModifierKind::SacrificeFly)
    }

    /// Whether the play counts as an official at bat.
    pub fn is_an_at_bat(&self) -> bool {
        let batter_event_counts = !matches!(
            self.event.description.batter_event,
            Some(
                BatterEvent::NoPlay
                    | BatterEvent::CatcherInterference
                    | BatterEvent::ErrorOnFoulFlyBall
            )
        );
        let runner_event_counts = !matches!(
            self.event.description.runner_event,
            Some(
                RunnerEvent::WildPitch
                    | RunnerEvent::CaughtStealing
                    | RunnerEvent::StolenBase
                    | RunnerEvent::OtherAdvance
                    | RunnerEvent::PassedBall
                    | RunnerEvent::Balk
                    | RunnerEvent::PickedOff
            )
        );

        batter_event_counts
            && runner_event_counts
            && !self.is_walk()
            && !self.is_hit_by_pitch()
            && !self.is_sacrifice_fly()
    }

    pub fn is_single(&self) -> bool {
        self.event.description.batter_event == Some(BatterEvent::Single)
    }

    pub fn is_double(&self) -> bool {
        self.event.description.batter_event == Some(BatterEvent::Double)
    }

    pub fn is_triple(&self) -> bool {
        self.event.description.batter_event == Some(BatterEvent::Triple)
    }

    pub fn is_home_run(&self) -> bool {
        matches!(
            self.event.description.batter_event,
            Some(BatterEvent::HomeRunInsidePark | BatterEvent::HomeRunLeavingPark)
        )
    }

    pub fn is_hit(&self) -> bool {
        self.is_single() || self.is_double() || self.is_triple() || self.is_home_run()
    }

    pub fn batter_gets_on_base(&self) -> bool {
        self.is_hit() || self.is_walk() || self.is_hit_by_pitch()
    }
}
