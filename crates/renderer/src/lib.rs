//! Rendering of the dashboard outputs.
//!
//! Implements two products:
//! - An interactive Leaflet map (`footprint.html`) of the ice chart layers,
//!   the forecast-region grid and reference overlays
//! - Per-region PNG time-series figures drawn with tiny-skia

pub mod error;
pub mod glyphs;
pub mod map;
pub mod plot;
pub mod style;
pub mod template;

pub use error::{RenderError, Result};
pub use map::{
    build_map_document, load_region_grid, write_map, MapDocument, MapSettings, MarkerSpec,
    Overlay, TileSource, WmsSource, MAP_FILE_NAME,
};
pub use plot::{plot_file_name, render_region_figure, save_region_figure};
pub use style::{concentration_style, grid_style, prediction_style, PathStyle};
