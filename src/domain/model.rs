use crate::utils::error::{LayoutError, Result};
use crate::utils::validation::validate_non_empty_string;
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI, TAU};
use std::sync::Arc;

/// A position on the drawing surface, in plan units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Range of angles a zone samples from, in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AngularPolicy {
    FullCircle,
    Semicircle { start: f64, end: f64 },
    RightQuarterOnly,
}

impl AngularPolicy {
    /// Half-open `[start, end)` interval of the policy.
    pub fn range(&self) -> (f64, f64) {
        match *self {
            AngularPolicy::FullCircle => (0.0, TAU),
            AngularPolicy::Semicircle { start, end } => (start, end),
            AngularPolicy::RightQuarterOnly => (0.0, FRAC_PI_2),
        }
    }

    /// The lower half-plane, `[π, 2π)`.
    pub fn lower_semicircle() -> Self {
        AngularPolicy::Semicircle { start: PI, end: TAU }
    }
}

/// A named annular region of the floor plan.
///
/// Fields are private so that every zone in circulation went through
/// [`Zone::new`] and satisfies `outer_radius > inner_radius >= 0`.
#[derive(Debug, Clone, PartialEq)]
pub struct Zone {
    name: String,
    center: Point,
    outer_radius: f64,
    inner_radius: f64,
    policy: AngularPolicy,
    color: Option<String>,
}

impl Zone {
    pub fn new(
        name: impl Into<String>,
        center: Point,
        outer_radius: f64,
        inner_radius: Option<f64>,
        policy: AngularPolicy,
    ) -> Result<Self> {
        let name = name.into();
        let inner_radius = inner_radius.unwrap_or(0.0);
        let invalid = |reason: String| LayoutError::InvalidZoneError {
            zone: name.clone(),
            reason,
        };

        validate_non_empty_string("zone.name", &name)?;
        if !center.x.is_finite() || !center.y.is_finite() {
            return Err(invalid(format!(
                "center ({}, {}) is not finite",
                center.x, center.y
            )));
        }
        if !outer_radius.is_finite() || !inner_radius.is_finite() {
            return Err(invalid("radii must be finite".to_string()));
        }
        if inner_radius < 0.0 {
            return Err(invalid(format!("inner radius {} is negative", inner_radius)));
        }
        if outer_radius <= inner_radius {
            return Err(invalid(format!(
                "outer radius {} must exceed inner radius {}",
                outer_radius, inner_radius
            )));
        }
        if let AngularPolicy::Semicircle { start, end } = policy {
            if !start.is_finite() || !end.is_finite() || start >= end {
                return Err(invalid(format!(
                    "angular range [{}, {}) is empty or not finite",
                    start, end
                )));
            }
        }

        Ok(Self {
            name,
            center,
            outer_radius,
            inner_radius,
            policy,
            color: None,
        })
    }

    /// Unchecked constructor for compile-time zone tables.
    pub(crate) fn from_parts(
        name: &str,
        center: Point,
        outer_radius: f64,
        inner_radius: f64,
        policy: AngularPolicy,
    ) -> Self {
        debug_assert!(outer_radius > inner_radius && inner_radius >= 0.0);
        Self {
            name: name.to_string(),
            center,
            outer_radius,
            inner_radius,
            policy,
            color: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn outer_radius(&self) -> f64 {
        self.outer_radius
    }

    /// Zero when the zone is a full disc.
    pub fn inner_radius(&self) -> f64 {
        self.inner_radius
    }

    pub fn policy(&self) -> AngularPolicy {
        self.policy
    }

    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }
}

/// One employee record as supplied by the position lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    pub zone: String,
}

/// An ordered, immutable sequence of entities. Cloning shares the records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot(Arc<[Entity]>);

impl Snapshot {
    pub fn new(entities: Vec<Entity>) -> Self {
        Self(entities.into())
    }

    pub fn entities(&self) -> &[Entity] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when both handles point at the same underlying records.
    pub fn same_as(&self, other: &Snapshot) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl From<Vec<Entity>> for Snapshot {
    fn from(entities: Vec<Entity>) -> Self {
        Self::new(entities)
    }
}

/// What the presentation layer receives for each resolved entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub zone: String,
    pub point: Point,
}
