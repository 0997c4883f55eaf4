use crate::framework::Chopstick;

/// A diner at the table.
///
/// # Actor Framework
/// A `Philosopher` is pure data; the
/// [`PhilosopherActor`](crate::philosopher_actor::PhilosopherActor) drives it
/// through its rounds. The two chopsticks are shared handles: `right` of seat
/// `i` is the same lock as `left` of seat `i + 1` (mod the table size).
#[derive(Debug, Clone)]
pub struct Philosopher {
    pub seat: usize,
    pub name: String,
    pub times_eaten: usize,
    pub left: Chopstick,
    pub right: Chopstick,
}

impl Philosopher {
    /// Creates a philosopher for `seat` who has not eaten yet.
    ///
    /// The display name is one-based: seat 0 is "Philosopher 1".
    pub fn new(seat: usize, left: Chopstick, right: Chopstick) -> Self {
        Self {
            seat,
            name: format!("Philosopher {}", seat + 1),
            times_eaten: 0,
            left,
            right,
        }
    }
}
