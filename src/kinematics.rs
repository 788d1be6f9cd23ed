use crate::constants::HBARC_M;

/// Momentum of a particle of the given energy and mass [MeV].
/// Degenerate inputs (energy below mass) clamp to zero rather than NaN.
pub fn momentum(energy: f64, mass: f64) -> f64 {
    (energy * energy - mass * mass).max(0.0).sqrt()
}

/// Velocity in units of c.
pub fn velocity(energy: f64, mass: f64) -> f64 {
    if energy <= 0.0 {
        return 0.0;
    }
    momentum(energy, mass) / energy
}

/// Lorentz factor E/m.
pub fn gamma(energy: f64, mass: f64) -> f64 {
    energy / mass
}

/// Boost an (energy, longitudinal momentum) pair from a frame moving with
/// velocity `beta` along +z into the lab. Returns (e_lab, pz_lab).
pub fn boost_to_lab(e_cm: f64, pz_cm: f64, beta: f64) -> (f64, f64) {
    let gamma = 1.0 / (1.0 - beta * beta).sqrt();
    (
        gamma * (e_cm + beta * pz_cm),
        gamma * (pz_cm + beta * e_cm),
    )
}

/// Mean lab-frame decay length of a particle with momentum `p`, mass `m`
/// and total rest-frame width `width`, in meters. A non-positive width
/// means a stable particle and returns infinity.
pub fn lab_decay_length(p: f64, m: f64, width: f64) -> f64 {
    if width <= 0.0 {
        return f64::INFINITY;
    }
    HBARC_M * p / (width * m)
}

/// Decay position along the beam from the quantile `u` in [0, 1) for a
/// parent with mean lab decay length `decay_length` [m].
///
/// Inverts u = (1 - exp(-x/lambda))^2, so `max_decay_quantile` bounds
/// sampled positions at an absorber wall.
pub fn decay_position(u: f64, decay_length: f64) -> f64 {
    -decay_length * (1.0 - u.sqrt()).ln()
}

/// Upper quantile bound restricting sampled decay positions to the region
/// upstream of an absorber wall at `wall` meters.
pub fn max_decay_quantile(decay_length: f64, wall: f64) -> f64 {
    if decay_length > 1.0 {
        let cdf = 1.0 - (-wall / decay_length).exp();
        cdf * cdf
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn momentum_and_velocity() {
        assert_relative_eq!(momentum(5.0, 3.0), 4.0, max_relative = 1e-12);
        assert_relative_eq!(velocity(5.0, 3.0), 0.8, max_relative = 1e-12);
        // below-mass input clamps instead of producing NaN
        assert_eq!(momentum(1.0, 3.0), 0.0);
        assert_eq!(velocity(0.0, 3.0), 0.0);
    }

    #[test]
    fn boost_at_rest_is_identity() {
        let (e, pz) = boost_to_lab(10.0, 3.0, 0.0);
        assert_relative_eq!(e, 10.0, max_relative = 1e-12);
        assert_relative_eq!(pz, 3.0, max_relative = 1e-12);
    }

    #[test]
    fn boost_preserves_invariant_mass() {
        let (e_cm, pz_cm) = (10.0, 3.0);
        let m2 = e_cm * e_cm - pz_cm * pz_cm;
        let (e, pz) = boost_to_lab(e_cm, pz_cm, 0.6);
        assert_relative_eq!(e * e - pz * pz, m2, max_relative = 1e-10);
    }

    #[test]
    fn stable_particle_never_decays() {
        assert_eq!(lab_decay_length(1000.0, 139.57, 0.0), f64::INFINITY);
        assert!(lab_decay_length(1000.0, 139.57, 2.5284e-14).is_finite());
    }

    #[test]
    fn decay_position_inverts_squared_cdf() {
        let lambda = 25.0;
        let x = decay_position(0.49, lambda);
        // u = (1 - exp(-x/lambda))^2
        let u = (1.0 - (-x / lambda).exp()).powi(2);
        assert_relative_eq!(u, 0.49, max_relative = 1e-12);
    }

    #[test]
    fn quantile_bound_confines_to_wall() {
        let lambda = 50.0;
        let wall = 50.0;
        let umax = max_decay_quantile(lambda, wall);
        assert!(umax < 1.0);
        // sampling exactly at the bound lands on the wall
        let x = decay_position(umax, lambda);
        assert_relative_eq!(x, wall, max_relative = 1e-9);
        // short-lived parents keep the full quantile range
        assert_eq!(max_decay_quantile(0.5, wall), 1.0);
    }
}
