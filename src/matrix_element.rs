//! Squared matrix elements for the three-body decay M -> l nu a and the
//! shared Dalitz integration that turns them into differential widths.
//!
//! Each boson representation supplies one scalar function of the Dalitz
//! invariants (m2_12, m2_23); the representation tag selects it and a single
//! quadrature routine integrates over m2_23 at fixed boson energy. Dot
//! products of the decay four-vectors are named after the participating
//! momenta (k meson, l lepton, q boson, p neutrino).

use crate::constants::G_F;
use crate::meson::{BosonRep, MesonKind};
use quadrature::integrate;
use std::f64::consts::PI;

/// Absolute error target for the Dalitz quadrature.
const QUAD_TOL: f64 = 1.0e-18;

type MatrixElementFn = fn(&ThreeBodyDecay, f64, f64) -> f64;

impl BosonRep {
    /// Strategy entry: squared matrix element on the Dalitz plane.
    fn matrix_element(self) -> MatrixElementFn {
        match self {
            BosonRep::Pseudoscalar => msq_pseudoscalar,
            BosonRep::Scalar => msq_scalar,
            BosonRep::Vector => msq_vector,
            BosonRep::QuasiVector => msq_quasivector,
        }
    }
}

/// One (meson, lepton, boson) three-body decay configuration.
#[derive(Debug, Clone, Copy)]
pub struct ThreeBodyDecay {
    pub meson: MesonKind,
    pub rep: BosonRep,
    /// Charged lepton mass [MeV]
    pub m_lepton: f64,
    /// Boson mass [MeV]
    pub ma: f64,
    /// Boson-lepton coupling
    pub coupling: f64,
}

impl ThreeBodyDecay {
    pub fn new(meson: MesonKind, rep: BosonRep, m_lepton: f64, ma: f64, coupling: f64) -> Self {
        ThreeBodyDecay {
            meson,
            rep,
            m_lepton,
            ma,
            coupling,
        }
    }

    /// Kinematic endpoint of the boson energy in the meson rest frame [MeV].
    pub fn ea_max(&self) -> f64 {
        let mm = self.meson.mass();
        (mm * mm + self.ma * self.ma - self.m_lepton * self.m_lepton) / (2.0 * mm)
    }

    /// Whether the decay is kinematically open at all.
    pub fn is_open(&self) -> bool {
        self.ma < self.meson.mass() - self.m_lepton
    }

    /// Differential width d Gamma / d E_a at boson rest-frame energy `ea`
    /// [dimensionless per MeV], integrating the selected matrix element over
    /// the allowed m2_23 range.
    pub fn dgamma_dea(&self, ea: f64) -> f64 {
        let mm = self.meson.mass();
        let ml = self.m_lepton;
        let ma = self.ma;
        if ea < ma || ea > self.ea_max() {
            return 0.0;
        }
        let m212 = mm * mm + ma * ma - 2.0 * mm * ea;
        if m212 <= ml * ml {
            return 0.0;
        }
        let sqrt_m212 = m212.sqrt();
        let e2star = (m212 - ml * ml) / (2.0 * sqrt_m212);
        let e3star = (mm * mm - m212 - ma * ma) / (2.0 * sqrt_m212);
        if ma > e3star {
            return 0.0;
        }
        let p3star = (e3star * e3star - ma * ma).max(0.0).sqrt();
        let sum = e2star + e3star;
        let m223_max = sum * sum - (e2star.abs() - p3star).powi(2);
        let m223_min = sum * sum - (e2star.abs() + p3star).powi(2);

        let msq = self.rep.matrix_element();
        let dalitz = integrate(|m223| msq(self, m212, m223), m223_min, m223_max, QUAD_TOL);
        (2.0 * mm) / (32.0 * (2.0 * PI * mm).powi(3)) * dalitz.integral
    }

    /// Branching ratio of the new decay relative to the meson total width.
    pub fn total_branching(&self) -> f64 {
        let ea_min = self.ma;
        let ea_max = self.ea_max();
        if ea_max <= ea_min {
            return 0.0;
        }
        let width = integrate(|ea| self.dgamma_dea(ea), ea_min, ea_max, QUAD_TOL);
        width.integral / self.meson.total_width()
    }
}

/// Common pieces of the P and S matrix elements.
fn msq_weak_current(d: &ThreeBodyDecay, m212: f64, m223: f64) -> (f64, f64, f64) {
    let mm = d.meson.mass();
    let ml = d.m_lepton;
    let ma = d.ma;
    let ev = (m212 + m223 - ml * ml - ma * ma) / (2.0 * mm);
    let emu = (mm * mm - m223 + ml * ml) / (2.0 * mm);
    let q2 = mm * mm - 2.0 * mm * ev;
    let prefactor =
        (d.coupling * G_F * d.meson.decay_constant() * d.meson.ckm() / (q2 - ml * ml)).powi(2);
    let base = 2.0 * mm * emu * q2 * (q2 - ml * ml)
        - (q2 * q2 - (ml * mm) * (ml * mm)) * (q2 + ml * ml - ma * ma);
    let cross = 2.0 * q2 * ml * ml * (mm * mm - q2);
    (prefactor, base, cross)
}

fn msq_pseudoscalar(d: &ThreeBodyDecay, m212: f64, m223: f64) -> f64 {
    let (prefactor, base, cross) = msq_weak_current(d, m212, m223);
    prefactor * (base - cross)
}

fn msq_scalar(d: &ThreeBodyDecay, m212: f64, m223: f64) -> f64 {
    let (prefactor, base, cross) = msq_weak_current(d, m212, m223);
    prefactor * (base + cross)
}

fn msq_vector(d: &ThreeBodyDecay, m212: f64, m223: f64) -> f64 {
    let mm = d.meson.mass();
    let ml = d.m_lepton;
    let ma = d.ma;
    let q2 = mm * mm - (m212 + m223 - ml * ml - ma * ma);
    let prefactor = 8.0
        * (G_F * d.meson.decay_constant() * d.meson.ckm() / (q2 - ml * ml) / ma).powi(2);

    let lq = (m212 - ml * ml) / 2.0;
    let lp = (mm * mm - m212 - m223) / 2.0;
    let kq = (m212 + m223 - ml * ml - ma * ma) / 2.0;
    let pq = (m223 - ma * ma) / 2.0;
    let kl = (mm * mm + ml * ml - m223) / 2.0;
    let kp = (mm * mm + ma * ma - m212) / 2.0;

    let cr = d.coupling;
    let cl = d.coupling;

    -prefactor
        * (((cr * mm * ml).powi(2) - (cl * q2).powi(2)) * (lq * ma * ma + 2.0 * lp * pq)
            - 2.0 * cr * ml * ml * kq
                * (cr * ma * ma * kl + 2.0 * cr * kp * lp - 3.0 * cl * q2 * ma * ma))
}

/// Inner-bremsstrahlung contribution of the quasi-vector representation.
fn msq_quasivector(d: &ThreeBodyDecay, m212: f64, m223: f64) -> f64 {
    let mm = d.meson.mass();
    let ml = d.m_lepton;
    let ma = d.ma;
    let kl = (mm * mm - m212 - m223) / 2.0;
    let kq = (m223 - ma * ma) / 2.0;
    let lq = (m212 - ml * ml) / 2.0;

    2.0 * (d.coupling * G_F * d.meson.decay_constant()).powi(2)
        * (8.0 * lq + 16.0 * kl * kq / (ma * ma))
}
