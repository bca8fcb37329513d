use std::sync::atomic::{AtomicUsize, Ordering};

/// The shortest code length still worth trying for new entities.
///
/// Only ever grows: once collisions pushed one assignment to a longer code,
/// later assignments start at that length instead of walking the shorter,
/// denser ones again. Owned by one service instance, not by the process.
#[derive(Debug)]
pub struct LengthFloor(AtomicUsize);

impl LengthFloor {
    pub fn new(initial: usize) -> Self {
        Self(AtomicUsize::new(initial))
    }

    pub fn get(&self) -> usize {
        self.0.load(Ordering::Acquire)
    }

    /// Raises the floor to `length`; returns `true` if it moved.
    pub fn raise(&self, length: usize) -> bool {
        self.0.fetch_max(length, Ordering::AcqRel) < length
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raise_only_grows() {
        let floor = LengthFloor::new(3);

        assert!(!floor.raise(3));
        assert!(floor.raise(5));
        assert!(!floor.raise(4));
        assert_eq!(floor.get(), 5);
    }
}
