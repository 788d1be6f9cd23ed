//! Interpolation helpers for tabulated input fluxes and attenuation data.

/// Linear interpolation on a linear scale.
///
/// Given ascending x values and matching y values, interpolate to find y at
/// x_new. Outside the tabulated range the result is 0.0: input fluxes are
/// differential spectra and carry no support beyond their bins.
pub fn interpolate_flux(x: &[f64], y: &[f64], x_new: f64) -> f64 {
    if x.is_empty() || x.len() != y.len() {
        return 0.0;
    }
    if x_new < x[0] || x_new > x[x.len() - 1] {
        return 0.0;
    }
    if x.len() == 1 {
        return y[0];
    }

    // Binary search for interval: largest i with x[i] <= x_new
    let mut low = 0usize;
    let mut high = x.len() - 1;
    while high - low > 1 {
        let mid = (low + high) >> 1;
        if x[mid] <= x_new {
            low = mid;
        } else {
            high = mid;
        }
    }
    let (x1, x2) = (x[low], x[low + 1]);
    let (y1, y2) = (y[low], y[low + 1]);
    y1 + (x_new - x1) * (y2 - y1) / (x2 - x1)
}

/// Log-log interpolation for attenuation-style tables.
///
/// Cross-section grids span many decades; interpolating the logarithms keeps
/// power-law segments exact. Outside the range the end values are returned.
/// All x and y values must be positive.
pub fn interpolate_log_log(x: &[f64], y: &[f64], x_new: f64) -> f64 {
    if x.is_empty() {
        return f64::NAN;
    }
    if x.len() == 1 {
        return y[0];
    }
    if x_new <= x[0] {
        return y[0];
    }
    if x_new >= x[x.len() - 1] {
        return y[y.len() - 1];
    }

    let mut low = 0usize;
    let mut high = x.len() - 1;
    while high - low > 1 {
        let mid = (low + high) >> 1;
        if x[mid] <= x_new {
            low = mid;
        } else {
            high = mid;
        }
    }
    let (lx1, lx2) = (x[low].ln(), x[low + 1].ln());
    let (ly1, ly2) = (y[low].ln(), y[low + 1].ln());
    let ly = ly1 + (x_new.ln() - lx1) * (ly2 - ly1) / (lx2 - lx1);
    ly.exp()
}

/// Heaviside step function with a configurable value at zero.
pub fn heaviside(x: f64, at_zero: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        0.0
    } else {
        at_zero
    }
}
