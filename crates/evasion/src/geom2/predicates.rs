use nalgebra::Vector2;

#[inline]
pub(crate) fn angle_of(v: Vector2<f64>) -> f64 {
    v.y.atan2(v.x)
}

/// Twice the signed area of triangle `abc`; positive when `abc` is counter-clockwise.
#[inline]
pub fn orient(a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>) -> f64 {
    let ab = b - a;
    let ac = c - a;
    ab.x * ac.y - ab.y * ac.x
}

/// In-circle determinant: positive iff `d` lies inside the circumcircle of the
/// counter-clockwise triangle `abc`.
pub fn incircle(a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>, d: Vector2<f64>) -> f64 {
    let (adx, ady) = (a.x - d.x, a.y - d.y);
    let (bdx, bdy) = (b.x - d.x, b.y - d.y);
    let (cdx, cdy) = (c.x - d.x, c.y - d.y);
    let alift = adx * adx + ady * ady;
    let blift = bdx * bdx + bdy * bdy;
    let clift = cdx * cdx + cdy * cdy;
    alift * (bdx * cdy - cdx * bdy) + blift * (cdx * ady - adx * cdy)
        + clift * (adx * bdy - bdx * ady)
}

/// Squared circumradius of `abc`; `None` for (near-)collinear triangles.
pub fn circumradius_sq(a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>) -> Option<f64> {
    let b1 = b - a;
    let c1 = c - a;
    let d = 2.0 * (b1.x * c1.y - b1.y * c1.x);
    if !d.is_finite() || d.abs() <= f64::EPSILON * (b1.norm_squared() + c1.norm_squared()) {
        return None;
    }
    let bb = b1.norm_squared();
    let cc = c1.norm_squared();
    let ux = (c1.y * bb - b1.y * cc) / d;
    let uy = (b1.x * cc - c1.x * bb) / d;
    Some(ux * ux + uy * uy)
}

/// For `p` collinear with `a`,`b`: true iff `p` lies strictly inside the segment.
#[inline]
pub fn strictly_between(p: Vector2<f64>, a: Vector2<f64>, b: Vector2<f64>) -> bool {
    (p - a).dot(&(b - a)) > 0.0 && (p - b).dot(&(a - b)) > 0.0
}

/// Shoelace signed area of a closed polygon given by its vertices in order.
pub fn signed_area<I>(vertices: I) -> f64
where
    I: IntoIterator<Item = Vector2<f64>>,
{
    let pts: Vec<Vector2<f64>> = vertices.into_iter().collect();
    if pts.len() < 3 {
        return 0.0;
    }
    let mut acc = 0.0;
    for k in 0..pts.len() {
        let p = pts[k];
        let q = pts[(k + 1) % pts.len()];
        acc += p.x * q.y - q.x * p.y;
    }
    0.5 * acc
}
