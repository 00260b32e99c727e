use std::fmt;

use polars::prelude::*;
use skyview_common::PointSet;

pub trait Frame {
    type Error;
    fn frame(&self) -> Result<DataFrame, Self::Error>;
}

impl Frame for PointSet {
    type Error = PolarsError;

    fn frame(&self) -> Result<DataFrame, PolarsError> {
        df!(
            "x" => self.iter().map(|p| p.x).collect::<Vec<_>>(),
            "y" => self.iter().map(|p| p.y).collect::<Vec<_>>(),
        )
    }
}

/// Bounding box of a point frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Extent {
    pub x: (f64, f64),
    pub y: (f64, f64),
}

impl Extent {
    /// `None` when the frame holds no points.
    pub fn of(frame: &DataFrame) -> Result<Option<Self>, PolarsError> {
        let bounds = frame
            .clone()
            .lazy()
            .select([
                col("x").min().alias("x_min"),
                col("x").max().alias("x_max"),
                col("y").min().alias("y_min"),
                col("y").max().alias("y_max"),
            ])
            .collect()?;
        let value = |name: &str| -> Result<Option<f64>, PolarsError> {
            Ok(bounds.column(name)?.f64()?.get(0))
        };

        match (value("x_min")?, value("x_max")?, value("y_min")?, value("y_max")?) {
            (Some(x_min), Some(x_max), Some(y_min), Some(y_max)) => Ok(Some(Self {
                x: (x_min, x_max),
                y: (y_min, y_max),
            })),
            _ => Ok(None),
        }
    }
}

impl fmt::Display for Extent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "x in [{}, {}], y in [{}, {}]",
            self.x.0, self.x.1, self.y.0, self.y.1
        )
    }
}

/// One-line description of a layer for the log.
pub fn summary(points: &PointSet) -> Result<String, PolarsError> {
    let frame = points.frame()?;
    Ok(match Extent::of(&frame)? {
        Some(extent) => format!("{} points, {extent}", frame.height()),
        None => "no points".to_owned(),
    })
}
