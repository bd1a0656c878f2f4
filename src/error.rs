use std::io;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MazeError {
    #[error("invalid dimensions: {rows}x{cols} (both must be at least 1)")]
    InvalidDimensions { rows: usize, cols: usize },
    #[error("door probability {0} is outside [0, 1]")]
    InvalidProbability(f64),
    #[error("invalid degree bounds: min={min}, max={max}")]
    InvalidDegreeBounds { min: usize, max: usize },
    #[error("no valid start/exit pair after {attempts} attempts")]
    PlacementUnsatisfiable { attempts: usize },
}

pub type Result<T> = std::result::Result<T, MazeError>;

impl From<MazeError> for io::Error {
    fn from(err: MazeError) -> Self {
        io::Error::new(io::ErrorKind::InvalidInput, err)
    }
}
