use std::fmt;
use std::num::ParseFloatError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Error)]
pub enum ParsePointError {
    #[error("expected `x,y`, got `{0}`")]
    Shape(String),
    #[error("invalid coordinate `{token}`")]
    Number {
        token: String,
        #[source]
        source: ParseFloatError,
    },
}

impl FromStr for Point2D {
    type Err = ParsePointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s
            .split_once(',')
            .ok_or_else(|| ParsePointError::Shape(s.to_owned()))?;
        let coord = |token: &str| {
            let token = token.trim();
            token.parse::<f64>().map_err(|source| ParsePointError::Number {
                token: token.to_owned(),
                source,
            })
        };
        Ok(Self::new(coord(x)?, coord(y)?))
    }
}

/// Points in the order they were read. Duplicates are kept.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct PointSet(Vec<Point2D>);

impl PointSet {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, point: Point2D) {
        self.0.push(point);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point2D> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Point2D] {
        &self.0
    }
}

impl From<Vec<Point2D>> for PointSet {
    fn from(points: Vec<Point2D>) -> Self {
        Self(points)
    }
}

impl FromIterator<Point2D> for PointSet {
    fn from_iter<I: IntoIterator<Item = Point2D>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for PointSet {
    type Item = Point2D;
    type IntoIter = std::vec::IntoIter<Point2D>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a PointSet {
    type Item = &'a Point2D;
    type IntoIter = std::slice::Iter<'a, Point2D>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// How the highlighted point affected the skyline.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Change {
    Inserted,
    Removed,
}

#[derive(Debug, Error)]
#[error("unknown change `{0}`, expected `inserted` or `removed`")]
pub struct ParseChangeError(String);

impl FromStr for Change {
    type Err = ParseChangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inserted" | "insert" | "insertion" => Ok(Change::Inserted),
            "removed" | "remove" | "deleted" | "delete" | "deletion" => Ok(Change::Removed),
            _ => Err(ParseChangeError(s.to_owned())),
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct Highlight {
    pub point: Point2D,
    pub change: Change,
}

impl Highlight {
    pub fn new(point: Point2D, change: Change) -> Self {
        Self { point, change }
    }

    pub fn default_title(&self) -> String {
        let verb = match self.change {
            Change::Inserted => "Insertion",
            Change::Removed => "Deletion",
        };
        format!("{verb} of {} Causing Change in Skyline", self.point)
    }
}

/// Everything that ends up on one chart.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Comparison {
    pub full: PointSet,
    pub skyline: PointSet,
    pub highlight: Highlight,
}

impl Comparison {
    /// An inserted point is not part of the dataset file yet, so it is
    /// appended to the full set.
    pub fn new(mut full: PointSet, skyline: PointSet, highlight: Highlight) -> Self {
        if highlight.change == Change::Inserted {
            full.push(highlight.point);
        }
        Self {
            full,
            skyline,
            highlight,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_point() {
        assert_eq!("34.78,19.24".parse::<Point2D>().unwrap(), Point2D::new(34.78, 19.24));
        assert_eq!(" 1 , -2.5 ".parse::<Point2D>().unwrap(), Point2D::new(1.0, -2.5));
        assert!(matches!("1.0".parse::<Point2D>(), Err(ParsePointError::Shape(_))));
        assert!(matches!(
            "1.0,abc".parse::<Point2D>(),
            Err(ParsePointError::Number { token, .. }) if token == "abc"
        ));
    }

    #[test]
    fn parse_change() {
        assert_eq!("Removed".parse::<Change>().unwrap(), Change::Removed);
        assert_eq!("deletion".parse::<Change>().unwrap(), Change::Removed);
        assert_eq!("insert".parse::<Change>().unwrap(), Change::Inserted);
        assert!("moved".parse::<Change>().is_err());
    }

    #[test]
    fn default_titles() {
        let point = Point2D::new(34.78, 19.24);
        assert_eq!(
            Highlight::new(point, Change::Removed).default_title(),
            "Deletion of (34.78, 19.24) Causing Change in Skyline"
        );
        assert_eq!(
            Highlight::new(point, Change::Inserted).default_title(),
            "Insertion of (34.78, 19.24) Causing Change in Skyline"
        );
    }

    #[test]
    fn insertion_extends_full_set() {
        let full = PointSet::from(vec![Point2D::new(1.0, 1.0)]);
        let highlight = Highlight::new(Point2D::new(2.0, 3.0), Change::Inserted);

        let comparison = Comparison::new(full, PointSet::new(), highlight);

        assert_eq!(
            comparison.full.as_slice(),
            &[Point2D::new(1.0, 1.0), Point2D::new(2.0, 3.0)]
        );
    }

    #[test]
    fn removal_keeps_full_set() {
        let full = PointSet::from(vec![Point2D::new(1.0, 1.0)]);
        let highlight = Highlight::new(Point2D::new(2.0, 3.0), Change::Removed);

        let comparison = Comparison::new(full.clone(), PointSet::new(), highlight);

        assert_eq!(comparison.full, full);
    }

    #[test]
    fn point_set_serializes_as_array() {
        let set = PointSet::from(vec![Point2D::new(1.0, 2.0)]);
        assert_eq!(serde_json::to_string(&set).unwrap(), r#"[{"x":1.0,"y":2.0}]"#);
    }
}
