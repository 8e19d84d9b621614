use rand::Rng;

/// Warsaw city district prefix used for every plate the company issues.
pub const WARSAW_PREFIX: &str = "WI";

/// Generate a Warsaw-style registration like `WI KT4821`:
/// the prefix, two uppercase letters, then a number in 1000..=9998.
///
/// No uniqueness check is made; two cars may end up with the same plate.
pub fn generate_registration<R: Rng + ?Sized>(rng: &mut R) -> String {
    let first = char::from(rng.random_range(b'A'..=b'Z'));
    let second = char::from(rng.random_range(b'A'..=b'Z'));
    let number: u16 = rng.random_range(1000..9999);
    format!("{WARSAW_PREFIX} {first}{second}{number}")
}
