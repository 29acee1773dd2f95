//! Mirror reflection and Snell refraction of direction vectors.

use crate::Vec3;

/// Reflect `v` about the normal `n`.
///
/// `n` must be unit length; `v` may have any length.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract the unit direction `incident` through a surface with unit normal
/// `n` separating vacuum (index 1) from a medium of `refractive_index`.
///
/// The side is picked from the sign of `incident · n`: a ray travelling
/// along the normal is leaving the medium, so the indices swap and the
/// normal flips. Under total internal reflection the result is the zero
/// vector, as is any non-finite result.
pub fn refract(incident: Vec3, n: Vec3, refractive_index: f64) -> Vec3 {
    let mut cos_i = -incident.dot(n).clamp(-1.0, 1.0);
    let (mut eta_i, mut eta_t) = (1.0, refractive_index);
    let mut normal = n;

    if cos_i < 0.0 {
        cos_i = -cos_i;
        std::mem::swap(&mut eta_i, &mut eta_t);
        normal = -n;
    }

    let eta = eta_i / eta_t;
    let k = 1.0 - eta * eta * (1.0 - cos_i * cos_i);
    if k < 0.0 {
        return Vec3::ZERO;
    }

    let refracted = incident * eta + normal * (eta * cos_i - k.sqrt());
    if refracted.is_finite() {
        refracted
    } else {
        Vec3::ZERO
    }
}
