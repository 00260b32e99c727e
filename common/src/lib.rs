pub mod point;
pub mod reader;

pub use point::{Change, Comparison, Highlight, ParseChangeError, ParsePointError, Point2D, PointSet};
pub use reader::{read_point_file, read_points, ReadError};
