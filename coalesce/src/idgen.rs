//! Random identifier generation for untagged items.
//!
//! Identifier generation is an explicit, injectable generator rather than hidden
//! process-wide randomness: the alphabet and length are parameters, and sampling can be
//! driven by a caller-supplied rng so tests stay deterministic.

use rand::Rng;

/// Default length of generated identifiers.
pub const DEFAULT_ID_LENGTH: usize = 15;

/// Default identifier alphabet: ASCII letters and digits.
pub const ALPHANUMERIC: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Generator of opaque alphanumeric identifiers for untagged items.
///
/// A generated identifier tags an item that carries no strategy identifier; since no
/// strategy rule is registered under it, such items always resolve to the implicit
/// default rule. Identifiers only need to be unlikely to collide with configured
/// strategy ids, not unguessable.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    alphabet: &'static [u8],
    length: usize,
}

impl IdGenerator {
    /// Creates a generator with the default alphabet and length.
    pub fn new() -> Self {
        Self {
            alphabet: ALPHANUMERIC,
            length: DEFAULT_ID_LENGTH,
        }
    }

    /// Creates a generator producing identifiers of the requested length.
    ///
    /// A negative requested length clamps to zero, yielding empty identifiers rather
    /// than an error.
    pub fn with_length(length: isize) -> Self {
        Self {
            alphabet: ALPHANUMERIC,
            length: length.max(0) as usize,
        }
    }

    /// Replaces the alphabet identifiers are sampled from.
    pub fn with_alphabet(mut self, alphabet: &'static [u8]) -> Self {
        self.alphabet = alphabet;
        self
    }

    /// Returns the length of identifiers this generator produces.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Samples one identifier from the thread-local rng.
    pub fn sample(&self) -> String {
        self.sample_with(&mut rand::rng())
    }

    /// Samples one identifier from the supplied rng.
    ///
    /// Seeding the rng makes generation fully deterministic, which tests rely on.
    pub fn sample_with<R: Rng>(&self, rng: &mut R) -> String {
        (0..self.length)
            .map(|_| {
                let index = rng.random_range(0..self.alphabet.len());
                char::from(self.alphabet[index])
            })
            .collect()
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_default_length_is_fifteen() {
        let id = IdGenerator::new().sample();
        assert_eq!(id.len(), DEFAULT_ID_LENGTH);
    }

    #[test]
    fn test_explicit_length_is_honored() {
        let id = IdGenerator::with_length(32).sample();
        assert_eq!(id.len(), 32);
    }

    #[test]
    fn test_negative_length_clamps_to_zero() {
        let id = IdGenerator::with_length(-20).sample();
        assert!(id.is_empty());
    }

    #[test]
    fn test_identifiers_stay_in_alphabet() {
        let id = IdGenerator::new().sample();
        assert!(id.bytes().all(|byte| ALPHANUMERIC.contains(&byte)));
    }

    #[test]
    fn test_seeded_sampling_is_deterministic() {
        let generator = IdGenerator::new();

        let first = generator.sample_with(&mut StdRng::seed_from_u64(42));
        let second = generator.sample_with(&mut StdRng::seed_from_u64(42));

        assert_eq!(first, second);
    }

    #[test]
    fn test_custom_alphabet() {
        let generator = IdGenerator::with_length(64).with_alphabet(b"ab");
        let id = generator.sample();

        assert!(id.chars().all(|c| c == 'a' || c == 'b'));
    }
}
