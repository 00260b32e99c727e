use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use rocket::figment::Figment;
use skyview_common::{Change, Highlight, Point2D};

use crate::viewer::DEFAULT_GRACE_MS;

/// Compare a dataset against its skyline and mark the point that changed it.
#[derive(Debug, Parser)]
#[command(name = "skyview", version)]
pub struct Config {
    /// Skyline engine output, one `x y` pair per line.
    #[arg(long, default_value = "target/skyline/skyline-1.txt")]
    pub skyline: PathBuf,

    /// Dataset generator output, one `x y` pair per line.
    #[arg(long, default_value = "src/test/java/db/dataset1.txt")]
    pub dataset: PathBuf,

    /// Point that was inserted or removed, as `x,y`.
    #[arg(long, default_value = "34.78,19.24", allow_hyphen_values = true)]
    pub highlight: Point2D,

    /// `inserted` or `removed`.
    #[arg(long, default_value = "removed")]
    pub change: Change,

    /// Chart caption. Derived from the highlight when omitted.
    #[arg(long)]
    pub title: Option<String>,

    #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    pub address: IpAddr,

    #[arg(short, long, default_value_t = 8000)]
    pub port: u16,

    #[arg(long, default_value_t = 900)]
    pub width: u32,

    #[arg(long, default_value_t = 600)]
    pub height: u32,

    /// Milliseconds to wait for the page to reconnect before treating the
    /// viewer as closed.
    #[arg(long, default_value_t = DEFAULT_GRACE_MS)]
    pub reconnect_grace: u64,

    /// Write the chart to this file (`.svg` or `.html`) instead of serving it.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl Config {
    pub fn highlight(&self) -> Highlight {
        Highlight::new(self.highlight, self.change)
    }

    pub fn title(&self) -> String {
        match &self.title {
            Some(title) => title.clone(),
            None => self.highlight().default_title(),
        }
    }

    pub fn reconnect_grace(&self) -> Duration {
        Duration::from_millis(self.reconnect_grace)
    }

    pub fn figment(&self) -> Figment {
        rocket::Config::figment()
            .merge(("address", self.address))
            .merge(("port", self.port))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::parse_from(["skyview"]);

        assert_eq!(config.skyline, PathBuf::from("target/skyline/skyline-1.txt"));
        assert_eq!(config.dataset, PathBuf::from("src/test/java/db/dataset1.txt"));
        assert_eq!(config.highlight(), Highlight::new(Point2D::new(34.78, 19.24), Change::Removed));
        assert_eq!(config.title(), "Deletion of (34.78, 19.24) Causing Change in Skyline");
        assert_eq!(config.port, 8000);
        assert!(config.output.is_none());
        assert_eq!(config.reconnect_grace(), Duration::from_millis(DEFAULT_GRACE_MS));
    }

    #[test]
    fn explicit_values() {
        let config = Config::parse_from([
            "skyview",
            "--skyline",
            "out/s.txt",
            "--dataset",
            "db/d.txt",
            "--highlight",
            "-1.5,2",
            "--change",
            "inserted",
            "--title",
            "Custom caption",
            "--port",
            "9001",
            "--output",
            "chart.svg",
        ]);

        assert_eq!(config.skyline, PathBuf::from("out/s.txt"));
        assert_eq!(config.dataset, PathBuf::from("db/d.txt"));
        assert_eq!(config.highlight(), Highlight::new(Point2D::new(-1.5, 2.0), Change::Inserted));
        assert_eq!(config.title(), "Custom caption");
        assert_eq!(config.port, 9001);
        assert_eq!(config.output, Some(PathBuf::from("chart.svg")));
    }

    #[test]
    fn bad_highlight_is_rejected() {
        assert!(Config::try_parse_from(["skyview", "--highlight", "1;2"]).is_err());
        assert!(Config::try_parse_from(["skyview", "--change", "moved"]).is_err());
    }

    #[test]
    fn figment_carries_address() {
        let config = Config::parse_from(["skyview", "--port", "9100"]);
        let rocket_config: rocket::Config = config.figment().extract().unwrap();
        assert_eq!(rocket_config.port, 9100);
        assert_eq!(rocket_config.address, IpAddr::V4(Ipv4Addr::LOCALHOST));
    }
}
