//! Templated map pages. All data shown on these pages is fetched
//! client-side from `/api/v1.0/locations`.

use askama::Template;
use axum::response::IntoResponse;

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {}

#[derive(Template)]
#[template(path = "map.html")]
pub struct MapTemplate {}

#[derive(Template)]
#[template(path = "heatmap.html")]
pub struct HeatmapTemplate {}

#[derive(Template)]
#[template(path = "plots.html")]
pub struct PlotsTemplate {}

pub async fn home() -> impl IntoResponse {
    HomeTemplate {}
}

pub async fn map_page() -> impl IntoResponse {
    MapTemplate {}
}

pub async fn heatmap_page() -> impl IntoResponse {
    HeatmapTemplate {}
}

pub async fn plots_page() -> impl IntoResponse {
    PlotsTemplate {}
}
