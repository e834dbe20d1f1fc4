//! Short, human-scannable, not collision free
//! 26² × 10⁴ = 6,760,000 possible values

use super::IdGenerator;
use crate::id::{TAB_ID_DIGITS, TAB_ID_LETTERS};
use rand::Rng;

/// Generates tab ids of the form `ab-1234`.
///
/// Two lowercase letters and four digits, each drawn uniformly and
/// independently of any earlier call. Nothing is checked against previously
/// issued ids, so uniqueness is only probabilistic.
///
/// # Example
/// ```
/// use tab_id::{id_generator::TabIdGenerator, IdGenerator, TabId};
///
/// let generator = TabIdGenerator;
/// let id: TabId = generator.generate();
/// assert!(id.is_well_formed());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TabIdGenerator;

impl TabIdGenerator {
    /// Generates an id drawing from the given random source.
    pub fn generate_with<R: Rng>(rng: &mut R) -> String {
        let mut id = String::with_capacity(TAB_ID_LETTERS + 1 + TAB_ID_DIGITS);
        for _ in 0..TAB_ID_LETTERS {
            id.push(char::from(rng.random_range(b'a'..=b'z')));
        }
        id.push('-');
        for _ in 0..TAB_ID_DIGITS {
            id.push(char::from(rng.random_range(b'0'..=b'9')));
        }
        id
    }
}

impl<T> IdGenerator<T> for TabIdGenerator
where
    T: From<String>,
{
    fn generate(&self) -> T {
        T::from(Self::generate_with(&mut rand::rng()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TabId;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn generated_ids_are_canonical() {
        let generator = TabIdGenerator;
        for _ in 0..1000 {
            let id: TabId = generator.generate();
            assert!(id.is_well_formed(), "non-canonical id: {id}");
        }
    }

    #[test]
    fn consecutive_ids_differ() {
        // fails only if all three draws collide
        let generator = TabIdGenerator;
        let a: String = generator.generate();
        let b: String = generator.generate();
        let c: String = generator.generate();
        assert!(a != b || b != c);
    }

    #[test]
    fn same_seed_same_id() {
        let a = TabIdGenerator::generate_with(&mut StdRng::seed_from_u64(7));
        let b = TabIdGenerator::generate_with(&mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn covers_whole_alphabet() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut letters = std::collections::HashSet::new();
        let mut digits = std::collections::HashSet::new();
        for _ in 0..5000 {
            let id = TabIdGenerator::generate_with(&mut rng);
            letters.extend(id[..2].chars());
            digits.extend(id[3..].chars());
        }
        assert_eq!(letters.len(), 26);
        assert_eq!(digits.len(), 10);
    }
}
