#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Ward AQI dashboard server binary.

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    ward_aqi_server::run_server().await
}
