//! Page handlers. The welcome page is an inline HTML fragment rather than
//! a template; only the map page is templated.

use askama::Template;
use axum::response::{Html, IntoResponse};

#[derive(Template)]
#[template(path = "map.html")]
pub struct MapTemplate {}

pub async fn home() -> impl IntoResponse {
    Html(
        r#"
    <h1>Welcome to the Group 1 Project!</h1>
    <p>The Socioeconomic Factors Behind Healthcare Deserts.</p>
    <p>Visit <a href='/api/v1.0/locations'>/api/v1.0/locations</a> for data in JSON format.</p>
    <p>Explore our interactive map to see how the different parameters are laid out across California. <a href='/map'>/map</a> to see the map of locations.</p>
    "#,
    )
}

pub async fn map_page() -> impl IntoResponse {
    MapTemplate {}
}
