use std::fmt;

use serde::Serialize;

/// One of the eight compass points used to describe a street segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CompassDirection {
    East,
    Northeast,
    North,
    Northwest,
    West,
    Southwest,
    South,
    Southeast,
}

impl CompassDirection {
    /// Bucket a bearing (degrees counter-clockwise from east) into one of
    /// eight 45° sectors centred on the compass points.
    pub fn from_bearing(bearing: f64) -> Self {
        const SECTORS: [CompassDirection; 8] = [
            CompassDirection::East,
            CompassDirection::Northeast,
            CompassDirection::North,
            CompassDirection::Northwest,
            CompassDirection::West,
            CompassDirection::Southwest,
            CompassDirection::South,
            CompassDirection::Southeast,
        ];
        let shifted = (bearing + 22.5).rem_euclid(360.0);
        let index = (shifted / 45.0) as usize % SECTORS.len();
        SECTORS[index]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CompassDirection::East => "east",
            CompassDirection::Northeast => "northeast",
            CompassDirection::North => "north",
            CompassDirection::Northwest => "northwest",
            CompassDirection::West => "west",
            CompassDirection::Southwest => "southwest",
            CompassDirection::South => "south",
            CompassDirection::Southeast => "southeast",
        }
    }
}

impl fmt::Display for CompassDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Side of a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnDirection {
    Left,
    Right,
}

impl fmt::Display for TurnDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TurnDirection::Left => "left",
            TurnDirection::Right => "right",
        })
    }
}

/// What a change of bearing between two consecutive segments means to a
/// driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Manoeuvre {
    Continue,
    Turn(TurnDirection),
}

impl Manoeuvre {
    /// Classify a turn angle in `[0, 360)` degrees.
    ///
    /// Within one degree of straight ahead is a continuation, `[1, 180)` a
    /// left turn and `[180, 359]` a right turn.
    pub fn from_turn_angle(angle: f64) -> Self {
        if angle < 1.0 || angle > 359.0 {
            Manoeuvre::Continue
        } else if angle < 180.0 {
            Manoeuvre::Turn(TurnDirection::Left)
        } else {
            Manoeuvre::Turn(TurnDirection::Right)
        }
    }
}

/// A single driving instruction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum DeliveryCommand {
    Deliver {
        item: String,
    },
    Proceed {
        direction: CompassDirection,
        street: String,
        /// Miles.
        distance: f64,
    },
    Turn {
        direction: TurnDirection,
        street: String,
    },
}

impl DeliveryCommand {
    pub fn deliver(item: impl Into<String>) -> Self {
        DeliveryCommand::Deliver { item: item.into() }
    }

    pub fn proceed(direction: CompassDirection, street: impl Into<String>, distance: f64) -> Self {
        DeliveryCommand::Proceed {
            direction,
            street: street.into(),
            distance,
        }
    }

    pub fn turn(direction: TurnDirection, street: impl Into<String>) -> Self {
        DeliveryCommand::Turn {
            direction,
            street: street.into(),
        }
    }

    /// Street named by a proceed or turn command.
    pub fn street(&self) -> Option<&str> {
        match self {
            DeliveryCommand::Deliver { .. } => None,
            DeliveryCommand::Proceed { street, .. } | DeliveryCommand::Turn { street, .. } => {
                Some(street)
            }
        }
    }
}

impl fmt::Display for DeliveryCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryCommand::Deliver { item } => write!(f, "Deliver {item}"),
            DeliveryCommand::Proceed {
                direction,
                street,
                distance,
            } => write!(f, "Proceed {direction} on {street} for {distance:.2} miles"),
            DeliveryCommand::Turn { direction, street } => write!(f, "Turn {direction} on {street}"),
        }
    }
}
