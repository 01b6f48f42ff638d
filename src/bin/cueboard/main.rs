//! cueboard - terminal soundboard built on cuepool
//!
//! Run with: cargo run

mod app;
mod ui;

use app::Cueboard;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    Cueboard::new().channels(6).master_volume(0.8).run()
}
