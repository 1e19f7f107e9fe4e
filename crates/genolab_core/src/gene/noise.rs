use rand::Rng;

/// Draws one sample from `N(0, std_dev²)` using the Box-Muller transform.
pub fn gaussian<R: Rng>(std_dev: f32, rng: &mut R) -> f32 {
    if std_dev <= 0.0 {
        return 0.0;
    }
    let u1: f32 = rng.gen_range(f32::EPSILON..1.0);
    let u2: f32 = rng.gen();
    let z = (-2.0 * u1.ln()).sqrt() * (std::f32::consts::TAU * u2).cos();
    z * std_dev
}
