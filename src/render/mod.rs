// Presentation adapters. The layout core hands over placements; drawing
// them is done here.

pub mod svg;

pub use svg::render_svg;
