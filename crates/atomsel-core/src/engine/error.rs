use nalgebra::Matrix3;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SelectionError {
    #[error("pbwithin does not support triclinic global cell (box vectors: {cell:?})")]
    TriclinicCell { cell: Matrix3<f64> },

    #[error("Nearest-neighbor search radius diverged to {radius} before enough atoms were found")]
    SearchDiverged { radius: f64 },
}
