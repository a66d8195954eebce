use crate::domain::model::{Point, Zone};
use crate::domain::ports::{ConfigProvider, RandomSource};
use crate::utils::error::{LayoutError, Result};
use crate::utils::validation::{validate_non_negative, validate_positive};

pub const DEFAULT_CANVAS_WIDTH: f64 = 1320.0;
pub const DEFAULT_CANVAS_HEIGHT: f64 = 600.0;
pub const DEFAULT_MARGIN: f64 = 10.0;

/// Drawing surface and the margin kept free along every edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    width: f64,
    height: f64,
    margin: f64,
}

impl Canvas {
    pub fn new(width: f64, height: f64, margin: f64) -> Result<Self> {
        validate_positive("canvas.width", width)?;
        validate_positive("canvas.height", height)?;
        validate_non_negative("canvas.margin", margin)?;
        if width <= 2.0 * margin || height <= 2.0 * margin {
            return Err(LayoutError::InvalidConfigValueError {
                field: "canvas.margin".to_string(),
                value: margin.to_string(),
                reason: format!(
                    "Margin leaves no drawable area on a {}x{} canvas",
                    width, height
                ),
            });
        }
        Ok(Self {
            width,
            height,
            margin,
        })
    }

    pub fn from_config(config: &impl ConfigProvider) -> Result<Self> {
        Self::new(config.canvas_width(), config.canvas_height(), config.margin())
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn margin(&self) -> f64 {
        self.margin
    }

    /// Saturates both coordinates into the drawable rectangle.
    pub fn clamp(&self, point: Point) -> Point {
        Point {
            x: point.x.clamp(self.margin, self.width - self.margin),
            y: point.y.clamp(self.margin, self.height - self.margin),
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        (self.margin..=self.width - self.margin).contains(&point.x)
            && (self.margin..=self.height - self.margin).contains(&point.y)
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS_WIDTH,
            height: DEFAULT_CANVAS_HEIGHT,
            margin: DEFAULT_MARGIN,
        }
    }
}

/// A polar sample before clamping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarSample {
    pub angle: f64,
    pub distance: f64,
    pub raw: Point,
}

/// Places points inside zones. Holds no state between calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionGenerator {
    canvas: Canvas,
}

impl PositionGenerator {
    pub fn new(canvas: Canvas) -> Self {
        Self { canvas }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Draws an angle from the zone's policy and a distance between its radii.
    ///
    /// The distance is uniform in the radius, not in area, so points in wide
    /// annuli sit denser towards the inner edge.
    pub fn sample_polar<R: RandomSource + ?Sized>(&self, zone: &Zone, rng: &mut R) -> PolarSample {
        let (start, end) = zone.policy().range();
        let angle = start + rng.next_unit() * (end - start);

        let inner = zone.inner_radius();
        let distance = if inner > 0.0 {
            inner + rng.next_unit() * (zone.outer_radius() - inner)
        } else {
            rng.next_unit() * zone.outer_radius()
        };

        let center = zone.center();
        PolarSample {
            angle,
            distance,
            raw: Point {
                x: center.x + distance * angle.cos(),
                y: center.y + distance * angle.sin(),
            },
        }
    }

    /// A fresh point inside `zone`, clamped to the canvas.
    pub fn generate<R: RandomSource + ?Sized>(&self, zone: &Zone, rng: &mut R) -> Point {
        let sample = self.sample_polar(zone, rng);
        self.canvas.clamp(sample.raw)
    }
}
