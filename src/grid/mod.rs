mod parser;
mod raster;

pub use parser::{ArchiveOutcome, ElevationGridParser, SkippedMember, FGD_NS, GML_NS};
pub use raster::{parse_order, Cells, Coordinate, Corner, Direction, RasterDescriptor};
