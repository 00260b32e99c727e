//! Serves the chart to a browser and keeps the process alive for as long as
//! the page stays open.
//!
//! The page holds a websocket to `/ws`. The first socket marks the chart as
//! displayed. Once the last socket goes away and nothing reconnects within
//! the grace period the viewer counts as released and the server shuts down.

use std::time::Duration;

use rocket::fairing::AdHoc;
use rocket::figment::Figment;
use rocket::futures::lock::Mutex;
use rocket::response::content::{RawHtml, RawJson};
use rocket::serde::json::Json;
use rocket::{get, routes, Build, Rocket, Shutdown, State};
use rocket_ws as ws;
use rocket_ws::WebSocket;
use serde::{Deserialize, Serialize};
use skyview_common::Comparison;
use thiserror::Error;

use crate::plot::{ComparisonPlot, PlotError};

const KEEP_ALIVE: &str = r#"<script>
(function () {
    const socket = new WebSocket(`ws://${location.host}/ws`);
    const ping = setInterval(() => {
        if (socket.readyState === WebSocket.OPEN) {
            socket.send("ping");
        }
    }, 10000);
    socket.onclose = () => {
        clearInterval(ping);
        document.title += " (released)";
    };
})();
</script>
"#;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewerState {
    Unrendered,
    Displayed,
    Released,
}

#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("viewer server failed")]
    Launch(#[from] rocket::Error),
}

/// Reconnect grace used unless the caller picks another one.
pub const DEFAULT_GRACE_MS: u64 = 2000;

struct Session {
    state: ViewerState,
    viewers: usize,
    /// Bumped on every attach so a pending release can tell whether anyone
    /// came back while it slept.
    generation: u64,
}

pub struct Viewer {
    page: String,
    chart: String,
    comparison: Comparison,
    grace: Duration,
    session: Mutex<Session>,
}

impl Viewer {
    pub fn new(plot: &ComparisonPlot, width: u32, height: u32) -> Result<Self, PlotError> {
        let page = with_keep_alive(plot.html(width, height)?);
        Ok(Self {
            page,
            chart: plot.chart().to_string(),
            comparison: plot.comparison().clone(),
            grace: Duration::from_millis(DEFAULT_GRACE_MS),
            session: Mutex::new(Session {
                state: ViewerState::Unrendered,
                viewers: 0,
                generation: 0,
            }),
        })
    }

    /// How long to wait for a reconnect (page reload) before releasing.
    pub fn grace(mut self, grace: Duration) -> Self {
        self.grace = grace;
        self
    }

    pub async fn state(&self) -> ViewerState {
        self.session.lock().await.state
    }

    async fn attach(&self) {
        let mut session = self.session.lock().await;
        session.viewers += 1;
        session.generation += 1;
        if session.state == ViewerState::Unrendered {
            log::info!("chart displayed");
            session.state = ViewerState::Displayed;
        }
    }

    async fn detach(&self, shutdown: Shutdown) {
        let generation = {
            let mut session = self.session.lock().await;
            session.viewers = session.viewers.saturating_sub(1);
            if session.viewers > 0 {
                return;
            }
            session.generation
        };

        rocket::tokio::time::sleep(self.grace).await;

        let mut session = self.session.lock().await;
        if session.generation == generation
            && session.viewers == 0
            && session.state == ViewerState::Displayed
        {
            log::info!("viewer closed");
            session.state = ViewerState::Released;
            shutdown.notify();
        }
    }
}

fn with_keep_alive(mut page: String) -> String {
    match page.rfind("</body>") {
        Some(at) => page.insert_str(at, KEEP_ALIVE),
        None => page.push_str(KEEP_ALIVE),
    }
    page
}

pub fn build(viewer: Viewer, figment: Figment) -> Rocket<Build> {
    rocket::custom(figment)
        .manage(viewer)
        .mount("/", routes![index, chart, points, state, ws_viewer])
        .attach(AdHoc::on_liftoff("Viewer URL", |rocket| {
            Box::pin(async move {
                let config = rocket.config();
                log::info!("chart at http://{}:{}/", config.address, config.port);
            })
        }))
}

/// Blocks until the viewer is released or the server is interrupted.
pub async fn present(viewer: Viewer, figment: Figment) -> Result<ViewerState, ViewerError> {
    let rocket = build(viewer, figment).launch().await?;
    let state = match rocket.state::<Viewer>() {
        Some(viewer) => viewer.state().await,
        None => ViewerState::Unrendered,
    };
    Ok(state)
}

#[get("/")]
fn index(viewer: &State<Viewer>) -> RawHtml<String> {
    RawHtml(viewer.page.clone())
}

#[get("/chart")]
fn chart(viewer: &State<Viewer>) -> RawJson<String> {
    RawJson(viewer.chart.clone())
}

#[get("/points")]
fn points(viewer: &State<Viewer>) -> Json<Comparison> {
    Json(viewer.comparison.clone())
}

#[get("/state")]
async fn state(viewer: &State<Viewer>) -> Json<ViewerState> {
    Json(viewer.state().await)
}

#[get("/ws")]
fn ws_viewer<'r>(ws: WebSocket, viewer: &'r State<Viewer>, shutdown: Shutdown) -> ws::Channel<'r> {
    use rocket::futures::{SinkExt, StreamExt};

    ws.channel(move |mut stream| Box::pin(async move {
        viewer.attach().await;
        while let Some(message) = stream.next().await {
            match message {
                Ok(text @ ws::Message::Text(_)) => {
                    if stream.send(text).await.is_err() {
                        break;
                    }
                }
                Ok(ws::Message::Close(_)) | Err(_) => break,
                _ => {}
            }
        }
        viewer.detach(shutdown).await;

        Ok(())
    }))
}
