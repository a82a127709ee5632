// Copyright 2025 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Local placement parameters and affine composition helpers.
//!
//! Scene math is plain [`kurbo::Affine`]. A [`Placement`] is the designer-facing
//! decomposition (position, scale, rotation, skew, registration point) and
//! [`Placement::to_affine`] builds the node's local matrix from it. [`AffineExt`] adds the
//! append/prepend vocabulary used when walking the hierarchy.

use kurbo::{Affine, Point, Vec2};

/// Decomposed local transform of a node.
///
/// Angles are in degrees. The registration point is a pivot in local space: rotation,
/// skew and scale happen around it, and it lands on (`x`, `y`) in the parent.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Placement {
    /// Horizontal position in parent space.
    pub x: f64,
    /// Vertical position in parent space.
    pub y: f64,
    /// Horizontal scale factor.
    pub scale_x: f64,
    /// Vertical scale factor.
    pub scale_y: f64,
    /// Clockwise rotation in degrees (y axis points down).
    pub rotation: f64,
    /// Horizontal skew in degrees.
    pub skew_x: f64,
    /// Vertical skew in degrees.
    pub skew_y: f64,
    /// Horizontal registration (pivot) offset in local space.
    pub reg_x: f64,
    /// Vertical registration (pivot) offset in local space.
    pub reg_y: f64,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            rotation: 0.0,
            skew_x: 0.0,
            skew_y: 0.0,
            reg_x: 0.0,
            reg_y: 0.0,
        }
    }
}

impl Placement {
    /// A placement that only translates.
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            ..Self::default()
        }
    }

    /// Returns true if either scale factor is exactly zero.
    ///
    /// Such a node covers no area and its matrix cannot be inverted.
    pub fn is_degenerate(&self) -> bool {
        self.scale_x == 0.0 || self.scale_y == 0.0
    }

    /// Build the local matrix.
    ///
    /// Rotation, skew and scale are applied first, then the translation to (`x`, `y`),
    /// and finally the registration offset is subtracted so it acts as a pivot.
    pub fn to_affine(&self) -> Affine {
        let (cos, sin) = if self.rotation % 360.0 != 0.0 {
            let v = Vec2::from_angle(self.rotation.to_radians());
            (v.x, v.y)
        } else {
            (1.0, 0.0)
        };
        let rotate_scale = [
            cos * self.scale_x,
            sin * self.scale_x,
            -sin * self.scale_y,
            cos * self.scale_y,
        ];
        let base = if self.skew_x != 0.0 || self.skew_y != 0.0 {
            let kx = Vec2::from_angle(self.skew_x.to_radians());
            let ky = Vec2::from_angle(self.skew_y.to_radians());
            Affine::new([ky.x, ky.y, -kx.y, kx.x, self.x, self.y]).append([
                rotate_scale[0],
                rotate_scale[1],
                rotate_scale[2],
                rotate_scale[3],
                0.0,
                0.0,
            ])
        } else {
            Affine::new([
                rotate_scale[0],
                rotate_scale[1],
                rotate_scale[2],
                rotate_scale[3],
                self.x,
                self.y,
            ])
        };
        if self.reg_x != 0.0 || self.reg_y != 0.0 {
            base.append_affine(Affine::translate((-self.reg_x, -self.reg_y)))
        } else {
            base
        }
    }
}

/// Composition helpers on [`Affine`].
///
/// `append` puts the other matrix on the right: it is applied to points *before* `self`.
/// Walking root→leaf, a parent's accumulated matrix appends each child's local matrix.
/// `prepend` is the opposite and is what a leaf→root walk uses.
pub trait AffineExt: Sized {
    /// `self * other`, with `other` given as raw `[a, b, c, d, tx, ty]` coefficients.
    fn append(self, coeffs: [f64; 6]) -> Affine;
    /// `other * self`, with `other` given as raw `[a, b, c, d, tx, ty]` coefficients.
    fn prepend(self, coeffs: [f64; 6]) -> Affine;
    /// `self * other`.
    fn append_affine(self, other: Affine) -> Affine;
    /// `other * self`.
    fn prepend_affine(self, other: Affine) -> Affine;
    /// Inverse matrix, or `None` when the determinant is zero or not finite.
    fn checked_invert(self) -> Option<Affine>;
    /// Map a point through the matrix.
    fn transform_point(self, p: Point) -> Point;
}

impl AffineExt for Affine {
    fn append(self, coeffs: [f64; 6]) -> Affine {
        self * Self::new(coeffs)
    }

    fn prepend(self, coeffs: [f64; 6]) -> Affine {
        Self::new(coeffs) * self
    }

    fn append_affine(self, other: Affine) -> Affine {
        self * other
    }

    fn prepend_affine(self, other: Affine) -> Affine {
        other * self
    }

    fn checked_invert(self) -> Option<Affine> {
        let det = self.determinant();
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        Some(self.inverse())
    }

    fn transform_point(self, p: Point) -> Point {
        self * p
    }
}
