pub mod grid;
pub mod hex;
pub mod terrain;

pub use grid::{HexCell, HexGrid, Passability};
pub use hex::HexCoord;
pub use terrain::Terrain;
