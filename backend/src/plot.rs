use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use charming::{
    component::{Axis, Legend, Title},
    element::{AxisType, ItemStyle, Symbol},
    series::Scatter,
    Chart, HtmlRenderer, ImageRenderer,
};
use skyview_common::{Comparison, PointSet};
use thiserror::Error;

pub const DATASET_SERIES: &str = "dataset";
pub const SKYLINE_SERIES: &str = "skyline";
pub const HIGHLIGHT_SERIES: &str = "highlight";

const SKYLINE_COLOR: &str = "red";
const HIGHLIGHT_COLOR: &str = "#e6c700";

/// Filled "x" glyph in a 10x10 box.
const CROSS: &str = "path://M2,0 L5,3 L8,0 L10,2 L7,5 L10,8 L8,10 L5,7 L2,10 L0,8 L3,5 L0,2 Z";

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("failed to render chart: {0}")]
    Render(String),
    #[error("cannot write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Scatter chart of a dataset, its skyline on top and the changed point on
/// top of both.
pub struct ComparisonPlot {
    comparison: Comparison,
    title: String,
}

impl ComparisonPlot {
    pub fn new(comparison: Comparison, title: impl Into<String>) -> Self {
        Self {
            comparison,
            title: title.into(),
        }
    }

    pub fn comparison(&self) -> &Comparison {
        &self.comparison
    }

    pub fn chart(&self) -> Chart {
        let highlight = self.comparison.highlight.point;

        Chart::new()
            .title(Title::new().text(self.title.as_str()).left("center"))
            .legend(Legend::new().bottom("2%"))
            .x_axis(Axis::new().type_(AxisType::Value).scale(true))
            .y_axis(Axis::new().type_(AxisType::Value).scale(true))
            .series(
                Scatter::new()
                    .name(DATASET_SERIES)
                    .symbol(Symbol::Circle)
                    .symbol_size(8.0)
                    .data(coordinates(&self.comparison.full)),
            )
            .series(
                Scatter::new()
                    .name(SKYLINE_SERIES)
                    .symbol(Symbol::Circle)
                    .symbol_size(8.0)
                    .item_style(ItemStyle::new().color(SKYLINE_COLOR))
                    .data(coordinates(&self.comparison.skyline)),
            )
            .series(
                Scatter::new()
                    .name(HIGHLIGHT_SERIES)
                    .symbol(Symbol::Custom(CROSS.to_owned()))
                    .symbol_size(14.0)
                    .item_style(ItemStyle::new().color(HIGHLIGHT_COLOR))
                    .data(vec![vec![highlight.x, highlight.y]]),
            )
    }

    pub fn html(&self, width: u32, height: u32) -> Result<String, PlotError> {
        HtmlRenderer::new(self.title.as_str(), width.into(), height.into())
            .render(&self.chart())
            .map_err(|e| PlotError::Render(format!("{e:?}")))
    }

    pub fn svg(&self, width: u32, height: u32) -> Result<String, PlotError> {
        ImageRenderer::new(width.into(), height.into())
            .render(&self.chart())
            .map_err(|e| PlotError::Render(format!("{e:?}")))
    }

    /// Writes SVG for a `.svg` path and a standalone HTML page otherwise.
    pub fn save(&self, path: &Path, width: u32, height: u32) -> Result<(), PlotError> {
        let is_svg = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));
        let rendered = if is_svg {
            self.svg(width, height)?
        } else {
            self.html(width, height)?
        };
        fs::write(path, rendered).map_err(|source| PlotError::Write {
            path: path.to_owned(),
            source,
        })
    }
}

fn coordinates(points: &PointSet) -> Vec<Vec<f64>> {
    points.iter().map(|p| vec![p.x, p.y]).collect()
}
