use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;
use std::str::FromStr;

use roxmltree::Node;
use zip::ZipArchive;

use super::raster::{parse_order, Corner, RasterDescriptor};
use crate::parser::{find, find_text, parse_f64, GridCell, ParseError, RecordParser};

pub const FGD_NS: &str = "http://fgd.gsi.go.jp/spec/2008/FGD_GMLSchema";
pub const GML_NS: &str = "http://www.opengis.net/gml/3.2";

/// A zip member that could not be decoded.
#[derive(Debug)]
pub struct SkippedMember {
    pub name: String,
    pub error: ParseError,
}

/// Result of decoding every member of a DEM archive.
#[derive(Debug, Default)]
pub struct ArchiveOutcome {
    pub records: Vec<GridCell>,
    pub decoded: usize,
    pub skipped: Vec<SkippedMember>,
}

/// Reads GSI fundamental geospatial data DEM documents, or zip archives of
/// them, into one record per grid cell in raster order.
#[derive(Debug, Clone, Default)]
pub struct ElevationGridParser;

impl ElevationGridParser {
    pub fn new() -> Self {
        Self
    }

    /// Decodes every member of the archive at `path`. Members that fail are
    /// reported in [`ArchiveOutcome::skipped`] and left out of the records.
    pub fn parse_archive(&self, path: &Path) -> Result<ArchiveOutcome, ParseError> {
        self.parse_archive_from(File::open(path)?)
    }

    pub fn parse_archive_from<R: Read + Seek>(
        &self,
        reader: R,
    ) -> Result<ArchiveOutcome, ParseError> {
        let mut archive = ZipArchive::new(reader)?;
        let mut outcome = ArchiveOutcome::default();

        for i in 0..archive.len() {
            let mut member = match archive.by_index(i) {
                Ok(member) => member,
                Err(e) => {
                    log::warn!("Failed to open archive member #{}: {}", i, e);
                    outcome.skipped.push(SkippedMember {
                        name: format!("#{i}"),
                        error: e.into(),
                    });
                    continue;
                }
            };
            if member.is_dir() {
                continue;
            }

            let name = member.name().to_string();
            match self.decode_reader(&mut member) {
                Ok(cells) => {
                    outcome.records.extend(cells);
                    outcome.decoded += 1;
                }
                Err(error) => {
                    log::warn!("Failed to decode archive member {}: {}", name, error);
                    outcome.skipped.push(SkippedMember { name, error });
                }
            }
        }

        log::debug!(
            "archive decoded: {} members, {} skipped, {} cells",
            outcome.decoded,
            outcome.skipped.len(),
            outcome.records.len()
        );
        Ok(outcome)
    }

    fn descriptor(&self, dem: Node<'_, '_>) -> Result<RasterDescriptor, ParseError> {
        let corner = |name: &'static str| -> Result<Corner, ParseError> {
            let (latitude, longitude) = pair::<f64>(name, find_text(dem, GML_NS, name)?)?;
            Ok(Corner {
                latitude,
                longitude,
            })
        };
        let index = |name: &'static str| -> Result<(i64, i64), ParseError> {
            pair(name, find_text(dem, GML_NS, name)?)
        };

        let order = find(dem, GML_NS, "sequenceRule")
            .ok_or(ParseError::MissingElement("sequenceRule"))?
            .attribute("order")
            .ok_or(ParseError::MissingAttribute {
                element: "sequenceRule",
                attribute: "order",
            })?;

        RasterDescriptor::new(
            corner("lowerCorner")?,
            corner("upperCorner")?,
            index("low")?,
            index("high")?,
            index("startPoint")?,
            parse_order(order)?,
        )
    }
}

impl RecordParser for ElevationGridParser {
    type Record = GridCell;

    fn fields(&self) -> &'static [&'static str] {
        &["latitude", "longitude", "altitude", "type"]
    }

    fn decode_node(&self, node: Node<'_, '_>) -> Result<Vec<GridCell>, ParseError> {
        let dem = find(node, FGD_NS, "DEM").ok_or(ParseError::MissingElement("DEM"))?;
        let raster = self.descriptor(dem)?;
        let tuples = parse_tuples(find_text(dem, GML_NS, "tupleList")?)?;

        log::debug!(
            "DEM raster {}x{}, {} tuples",
            raster.xlen(),
            raster.ylen(),
            tuples.len()
        );

        Ok(raster
            .cells()
            .zip(tuples)
            .map(|(cell, (kind, altitude))| GridCell {
                latitude: cell.latitude,
                longitude: cell.longitude,
                altitude,
                kind,
            })
            .collect())
    }

    fn decode_file(&self, path: &Path) -> Result<Vec<GridCell>, ParseError> {
        if is_zip(path)? {
            return Ok(self.parse_archive(path)?.records);
        }
        let mut file = File::open(path)?;
        self.decode_reader(&mut file)
    }
}

fn is_zip(path: &Path) -> Result<bool, ParseError> {
    let mut magic = [0u8; 4];
    let mut file = File::open(path)?;
    match file.read_exact(&mut magic) {
        Ok(()) => Ok(&magic == b"PK\x03\x04" || &magic == b"PK\x05\x06"),
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => Ok(false),
        Err(e) => Err(e.into()),
    }
}

fn pair<T: FromStr>(field: &'static str, text: &str) -> Result<(T, T), ParseError> {
    let mut parts = text.split_whitespace().map(str::parse::<T>);
    match (parts.next(), parts.next()) {
        (Some(Ok(a)), Some(Ok(b))) => Ok((a, b)),
        _ => Err(ParseError::number(field, text)),
    }
}

/// `type,altitude` rows, one per line. Blank lines are ignored.
fn parse_tuples(text: &str) -> Result<Vec<(String, f64)>, ParseError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut tuples = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| ParseError::InvalidRaster(e.to_string()))?;
        if row.iter().all(str::is_empty) {
            continue;
        }
        let kind = row.get(0).unwrap_or_default().to_string();
        let altitude = row.get(1).ok_or(ParseError::MissingField("altitude"))?;
        tuples.push((kind, parse_f64("altitude", altitude)?));
    }
    Ok(tuples)
}
