use crate::bearing::Bearing;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("'{bearing}' is not a recognised compass bearing. Options are {options}")]
    UnrecognizedBearing { bearing: String, options: String },

    #[error("No compass bearing matches vector {x},{y}. Only 45 deg angles are supported.")]
    UnsupportedAngle { x: f64, y: f64 },

    #[error("Repeated coordinates {x},{y} on line '{line}'")]
    RepeatedCoordinates { line: String, x: f64, y: f64 },

    #[error(
        "Direction discontinuity on line '{line}': {x},{y} is marked {found} but the geometry implies {expected}"
    )]
    DirectionDiscontinuity {
        line: String,
        x: f64,
        y: f64,
        expected: Bearing,
        found: Bearing,
    },

    #[error(
        "Cannot draw a corner on line '{line}' between coordinates {},{} and {},{}",
        .from.0, .from.1, .to.0, .to.1
    )]
    UnrealizableCorner {
        line: String,
        from: (f64, f64),
        to: (f64, f64),
    },

    #[error("Line '{line}' needs at least 2 nodes, found {count}")]
    TooFewNodes { line: String, count: usize },

    #[error("Cannot find station with key: {name}")]
    UnknownStation { name: String },

    #[error("Station '{station}' has no label position")]
    MissingLabelPosition { station: String },

    #[error("map description JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
