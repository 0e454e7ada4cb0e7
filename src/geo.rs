use crate::{Error, Result, Row};
use serde::Serialize;
use std::f64::consts::PI;

/// Mean earth radius in meters
const EARTH_RADIUS: f64 = 6_371_009.0;

/// Project lat/long degrees to x/y meters with a sinusoidal (equal-area)
/// projection.
fn reproject(latitudes: &[f64], longitudes: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let lat_dist = PI * EARTH_RADIUS / 180.0;

    let y: Vec<f64> = latitudes.iter().map(|lat| lat * lat_dist).collect();
    let x: Vec<f64> = latitudes
        .iter()
        .zip(longitudes)
        .map(|(lat, long)| long * lat_dist * lat.to_radians().cos())
        .collect();

    (x, y)
}

/// Area in m² of an arbitrary polygon given its vertices in degrees,
/// longitudes first.
///
/// The vertices are reprojected to an equal-area plane and the area is the
/// shoelace sum over them. Fewer than three vertices enclose nothing and
/// yield 0.
#[must_use]
pub fn polygon_area(longitudes: &[f64], latitudes: &[f64]) -> f64 {
    let n = longitudes.len().min(latitudes.len());
    if n < 3 {
        return 0.0;
    }

    let (x, y) = reproject(&latitudes[..n], &longitudes[..n]);

    let mut area = 0.0;
    for i in 0..n {
        let prev = (i + n - 1) % n;
        let next = (i + 1) % n;
        area += x[i] * (y[next] - y[prev]);
    }
    area.abs() / 2.0
}

/// Rectangular bounds of a named location, in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl BoundingBox {
    /// Read the bounds out of a locations export row.
    ///
    /// The export carries `north`, `south`, `east` and `west` columns; a
    /// missing or unparsable bound is an error.
    pub fn from_row(row: &Row<'_>) -> Result<Self> {
        let bound = |column: &str| {
            row.get_f64(column)
                .ok_or_else(|| Error::Parse(format!("location row has no usable `{column}` bound")))
        };

        Ok(Self {
            north: bound("north")?,
            south: bound("south")?,
            east: bound("east")?,
            west: bound("west")?,
        })
    }

    /// Corner vertices as (longitudes, latitudes), ordered NE, SE, SW, NW
    #[must_use]
    pub fn corners(&self) -> ([f64; 4], [f64; 4]) {
        let x = [self.east, self.east, self.west, self.west];
        let y = [self.north, self.south, self.south, self.north];
        (x, y)
    }

    /// Area of the box in m²
    #[must_use]
    pub fn area(&self) -> f64 {
        let (x, y) = self.corners();
        polygon_area(&x, &y)
    }
}
