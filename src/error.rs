//! Error types.
//!
//! Rejecting a partial solution is not an error: specs prune branches by
//! returning the reject terminal. Errors here are configuration mistakes,
//! violated algebra preconditions, resource exhaustion, and dump/load failures.

use std::fmt;
use std::io;

#[derive(Debug)]
pub enum Error {
    /// The universe has more vertices than the `u16` slot labels can address.
    TooManyVertices { count: usize, max: usize },
    /// An edge endpoint is not a vertex of the graph.
    VertexOutOfRange { vertex: usize, num_vertices: usize },
    /// An edge connects a vertex to itself.
    SelfLoop { vertex: usize },
    /// A per-vertex degree range admits no value.
    EmptyDegreeRange { vertex: usize },
    /// A per-degree vertex-count range admits no value.
    EmptyCountRange { degree: usize },
    /// Some other constraint range admits no value.
    EmptyRange { what: &'static str },
    /// Both path terminals are the same vertex.
    SameTerminals { vertex: usize },
    /// The number of weights does not cover the universe.
    WeightCount { expected: usize, actual: usize },
    /// The number of probabilities does not cover the universe.
    ProbabilityCount { expected: usize, actual: usize },
    /// A probability outside `[0, 1]`.
    InvalidProbability { var: u32, value: f64 },
    /// Quotient or remainder by the empty family.
    EmptyDivisor,
    /// A spec moved to a position that is not strictly below the current one.
    InvalidTransition { position: usize, next: usize },
    /// The node store grew beyond its configured limit.
    OutOfMemory { nodes: usize, limit: usize },
    /// The builder held more live states than its configured limit.
    StateLimit { states: usize, limit: usize },
    /// I/O failure while dumping or loading a diagram.
    Io(io::Error),
    /// Malformed diagram text.
    Parse { line: usize, message: String },
}

pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::TooManyVertices { count, max } => {
                write!(f, "universe has {} vertices, at most {} are supported", count, max)
            }
            Error::VertexOutOfRange { vertex, num_vertices } => {
                write!(f, "vertex {} is out of range (graph has {} vertices)", vertex, num_vertices)
            }
            Error::SelfLoop { vertex } => write!(f, "self-loop at vertex {}", vertex),
            Error::EmptyDegreeRange { vertex } => {
                write!(f, "degree range for vertex {} is empty", vertex)
            }
            Error::EmptyCountRange { degree } => {
                write!(f, "vertex-count range for degree {} is empty", degree)
            }
            Error::EmptyRange { what } => write!(f, "{} range is empty", what),
            Error::SameTerminals { vertex } => {
                write!(f, "path terminals must differ (both are vertex {})", vertex)
            }
            Error::WeightCount { expected, actual } => {
                write!(f, "expected {} weights, got {}", expected, actual)
            }
            Error::ProbabilityCount { expected, actual } => {
                write!(f, "expected {} probabilities, got {}", expected, actual)
            }
            Error::InvalidProbability { var, value } => {
                write!(f, "probability {} of element x{} is outside [0, 1]", value, var)
            }
            Error::EmptyDivisor => write!(f, "division by the empty family"),
            Error::InvalidTransition { position, next } => {
                write!(f, "spec moved from position {} to position {}", position, next)
            }
            Error::OutOfMemory { nodes, limit } => {
                write!(f, "decision diagram ran out of memory ({} nodes, limit {})", nodes, limit)
            }
            Error::StateLimit { states, limit } => {
                write!(f, "construction exceeded {} live states (limit {})", states, limit)
            }
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::Parse { line, message } => write!(f, "parse error at line {}: {}", line, message),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}
