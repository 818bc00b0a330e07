//! Mirror reflection and Snell refraction.

use glint_math::Vec3;

/// Reflect `incident` about the unit normal `normal`.
///
/// Unit inputs give a unit result.
#[inline]
pub fn reflect(incident: Vec3, normal: Vec3) -> Vec3 {
    let cos_i = -incident.dot(normal);
    incident + normal * 2.0 * cos_i
}

/// Refract `incident` through a surface with unit normal `normal`.
///
/// `eta_t` is the index on the far side, `eta_i` the index the ray travels
/// in. A ray arriving from behind the normal is treated as leaving the
/// medium: the normal is flipped and the indices swapped. Past the
/// critical angle the result contains NaN. The result is not normalized.
pub fn refract(incident: Vec3, normal: Vec3, eta_t: f32, eta_i: f32) -> Vec3 {
    let (normal, eta_t, eta_i, cos_i) = orient(incident, normal, eta_t, eta_i);
    let eta = eta_i / eta_t;
    let sin_t = eta * (1.0 - cos_i * cos_i).sqrt();
    let cos_t = (1.0 - sin_t * sin_t).sqrt();
    incident * eta + normal * (eta * cos_i - cos_t)
}

/// Like [`refract`], but returns `None` on total internal reflection.
pub fn try_refract(incident: Vec3, normal: Vec3, eta_t: f32, eta_i: f32) -> Option<Vec3> {
    let (normal, eta_t, eta_i, cos_i) = orient(incident, normal, eta_t, eta_i);
    let eta = eta_i / eta_t;
    let sin2_t = eta * eta * (1.0 - cos_i * cos_i);
    if sin2_t > 1.0 {
        return None;
    }
    let cos_t = (1.0 - sin2_t).sqrt();
    Some(incident * eta + normal * (eta * cos_i - cos_t))
}

/// Flip the normal and swap indices when the ray comes from inside.
#[inline]
fn orient(incident: Vec3, normal: Vec3, eta_t: f32, eta_i: f32) -> (Vec3, f32, f32, f32) {
    let cos_i = -incident.dot(normal);
    if cos_i < 0.0 {
        (-normal, eta_i, eta_t, -cos_i)
    } else {
        (normal, eta_t, eta_i, cos_i)
    }
}
