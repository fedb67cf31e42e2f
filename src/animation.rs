//! Per-frame hover animation and camera flight.
//!
//! Every frame the regions animate first and the camera rig follows:
//!
//! - the hovered region rises towards [`LIFT_HEIGHT`] and blends towards the
//!   hover colour; every other region sinks back to rest and blends towards
//!   the rest colour. Entering is deliberately slower than leaving (lift
//!   `0.01` vs. drop `0.03`, colour `0.1` vs. `0.2`) to settle in gently and
//!   snap back.
//! - the [`CameraRig`] either follows the hovered region (slow orbit above
//!   its bounds) or flies back to the overview above the origin.
//!
//! All rates are per frame. Nothing here is time-compensated: a skipped
//! frame is simply a frame that did not happen.

use cgmath::{
    Basis3, EuclideanSpace, Point3, Rad, Rotation, Rotation3, Vector3, VectorSpace,
};

use crate::{config::Palette, data_structures::bounds::Aabb};

/// Vertical offset of a fully lifted region.
pub const LIFT_HEIGHT: f32 = 0.25;
/// Per-frame rise of the hovered region.
pub const LIFT_STEP: f32 = 0.01;
/// Per-frame drop of every other region.
pub const DROP_STEP: f32 = 0.03;
pub const HOVER_COLOR_BLEND: f32 = 0.1;
pub const REST_COLOR_BLEND: f32 = 0.2;

/// Where the camera rests when nothing is hovered.
pub const OVERVIEW_EYE: Point3<f32> = Point3::new(0.0, 6.0, 0.0);
pub const OVERVIEW_BLEND: f32 = 0.5;
/// Blend of pivot and camera arm while following a region.
pub const FOLLOW_BLEND: f32 = 0.1;
/// Yaw added to the orbit every frame while following, in radians.
pub const ORBIT_STEP: f32 = 0.001;
/// Horizontal offset of the camera arm so the framing is not straight down.
pub const ARM_OFFSET: f32 = 0.45;

/// Lift and tint of one region.
#[derive(Clone, Debug, PartialEq)]
pub struct RegionAnimation {
    pub offset: f32,
    pub color: Vector3<f32>,
}

impl RegionAnimation {
    pub fn new(color: Vector3<f32>) -> Self {
        Self { offset: 0.0, color }
    }

    /// One frame towards the lifted, highlighted pose.
    pub fn raise(&mut self, hover: Vector3<f32>) {
        if self.offset < LIFT_HEIGHT {
            self.offset += LIFT_STEP;
        }
        if self.offset > LIFT_HEIGHT {
            self.offset = LIFT_HEIGHT;
        }
        self.color = self.color.lerp(hover, HOVER_COLOR_BLEND);
    }

    /// One frame towards rest.
    pub fn settle(&mut self, rest: Vector3<f32>) {
        if self.offset > 0.0 {
            self.offset -= DROP_STEP;
        }
        if self.offset < 0.0 {
            self.offset = 0.0;
        }
        self.color = self.color.lerp(rest, REST_COLOR_BLEND);
    }

    pub fn step(&mut self, hovered: bool, palette: &Palette) {
        if hovered {
            self.raise(palette.hover);
        } else {
            self.settle(palette.rest);
        }
    }
}

/// A loaded region as the controller sees it.
#[derive(Clone, Debug, PartialEq)]
pub struct RegionState {
    /// Bounds shifted up by [`LIFT_HEIGHT`], see
    /// [`RegionGeometry::framing_bounds`](crate::data_structures::model::RegionGeometry::framing_bounds).
    pub bounds: Aabb,
    pub anim: RegionAnimation,
}

impl RegionState {
    pub fn new(bounds: Aabb, color: Vector3<f32>) -> Self {
        Self {
            bounds,
            anim: RegionAnimation::new(color),
        }
    }

    /// Translation of the region mesh this frame.
    pub fn lift(&self) -> Vector3<f32> {
        Vector3::new(0.0, self.anim.offset, 0.0)
    }
}

/// Camera height that fits the region's horizontal footprint into view.
pub fn framing_height(bounds: &Aabb, fovy: Rad<f32>) -> f32 {
    (bounds.footprint() * (fovy.0 / 2.0).tan()).abs()
}

/// What the camera is anchored to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetMode {
    Overview,
    Following(usize),
}

/// The camera rig: a pivot the camera orbits and an arm holding the camera.
///
/// While following, the pivot is expressed relative to the followed region's
/// lift and the camera sits at `lift + pivot + R_y(yaw) * arm`. In the
/// overview the eye moves in world space. Switching modes re-expresses the
/// arm from the current eye so the camera never jumps.
#[derive(Clone, Debug)]
pub struct CameraRig {
    mode: TargetMode,
    pivot: Vector3<f32>,
    yaw: Rad<f32>,
    arm: Vector3<f32>,
    eye: Point3<f32>,
    target: Point3<f32>,
}

impl CameraRig {
    pub fn new() -> Self {
        Self {
            mode: TargetMode::Overview,
            pivot: Vector3::new(0.0, 0.0, 0.0),
            yaw: Rad(0.0),
            arm: OVERVIEW_EYE.to_vec(),
            eye: OVERVIEW_EYE,
            target: Point3::origin(),
        }
    }

    pub fn mode(&self) -> TargetMode {
        self.mode
    }

    pub fn eye(&self) -> Point3<f32> {
        self.eye
    }

    pub fn target(&self) -> Point3<f32> {
        self.target
    }

    pub fn pivot(&self) -> Vector3<f32> {
        self.pivot
    }

    pub fn yaw(&self) -> Rad<f32> {
        self.yaw
    }

    /// Advances the rig by one frame.
    ///
    /// `focus` is the hovered region if it is loaded; `None` flies back to the
    /// overview.
    pub fn update(&mut self, focus: Option<(usize, &RegionState)>, fovy: Rad<f32>) {
        match focus {
            Some((index, region)) => self.follow(index, region, fovy),
            None => self.overview(),
        }
    }

    fn follow(&mut self, index: usize, region: &RegionState, fovy: Rad<f32>) {
        let lift = region.lift();
        if self.mode != TargetMode::Following(index) {
            log::debug!("camera follows region {}", index);
            self.mode = TargetMode::Following(index);
            let unrotate = Basis3::from_angle_y(-self.yaw);
            self.arm = unrotate.rotate_vector(self.eye.to_vec() - lift - self.pivot);
        }

        let center = region.bounds.center();
        self.pivot = self.pivot.lerp(center.to_vec(), FOLLOW_BLEND);
        self.yaw = Rad(self.yaw.0 + ORBIT_STEP);

        let arm_target = Vector3::new(0.0, framing_height(&region.bounds, fovy), ARM_OFFSET);
        self.arm = self.arm.lerp(arm_target, FOLLOW_BLEND);

        let rotate = Basis3::from_angle_y(self.yaw);
        self.eye = Point3::from_vec(lift + self.pivot + rotate.rotate_vector(self.arm));
        self.target = center;
    }

    fn overview(&mut self) {
        if self.mode != TargetMode::Overview {
            log::debug!("camera returns to the overview");
            self.mode = TargetMode::Overview;
        }
        self.pivot = self.pivot.lerp(Vector3::new(0.0, 0.0, 0.0), FOLLOW_BLEND);
        self.eye = Point3::from_vec(self.eye.to_vec().lerp(OVERVIEW_EYE.to_vec(), OVERVIEW_BLEND));
        self.target = Point3::origin();
    }
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new()
    }
}
