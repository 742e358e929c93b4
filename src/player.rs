use crate::error::GrammarError;
use crate::types::Side;

// Lineup lines whose player name carries an unescaped comma, rewritten
// verbatim so the comma split stays at six fields.
const PLAYER_CORRECTIONS: [(&str, &str); 3] = [
    (
        r#"sub,barfc101,"Clyde,Barfoot",0,9,1"#,
        r#"sub,barfc101,"Clyde Barfoot",0,9,1"#,
    ),
    (
        r#"sub,watkg101,"George Watkins,",0,2,7"#,
        r#"sub,watkg101,"George Watkins",0,2,7"#,
    ),
    (
        r#"sub,burgs101,"Burgess,Smoky",0,9,11"#,
        r#"sub,burgs101,"Burgess Smoky",0,9,11"#,
    ),
];

/// A lineup entry from a `start` or `sub` record:
/// `start,<id>,<name>,<side>,<batting slot>,<fielding position>`.
///
/// Batting slot 0 marks a non-batting entry such as a pitcher under the
/// designated-hitter rule or a courtesy runner.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub side: Side,
    pub batting_order_position: u8,
    pub fielding_position: u8,
    pub is_sub: bool,
    pub raw: String,
}

impl Player {
    pub fn from_start_or_sub_line(
        start_or_sub_line: &str,
        is_sub: bool,
    ) -> Result<Self, GrammarError> {
        let mut line = start_or_sub_line;
        for (corrupt, corrected) in PLAYER_CORRECTIONS {
            if line == corrupt {
                line = corrected;
            }
        }

        let parts: Vec<&str> = line.split(',').collect();
        let [_, id, name, side, batting_order, fielding_position] = parts[..] else {
            return Err(GrammarError::new("player", start_or_sub_line));
        };

        let side = Side::from_field(side, start_or_sub_line)?;
        let batting_order_position = batting_order.parse::<u8>().map_err(|_| {
            GrammarError::new("batting_order_position", batting_order).with_line(start_or_sub_line)
        })?;
        let fielding_position = fielding_position.parse::<u8>().map_err(|_| {
            GrammarError::new("fielding_position", fielding_position).with_line(start_or_sub_line)
        })?;

        Ok(Self {
            id: id.to_string(),
            name: name.trim_matches('"').to_string(),
            side,
            batting_order_position,
            fielding_position,
            is_sub,
            raw: start_or_sub_line.to_string(),
        })
    }
}
