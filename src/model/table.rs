use crate::framework::Chopstick;
use crate::model::Philosopher;

/// The ring of chopsticks.
///
/// Chopstick `i` lies between seat `i - 1` and seat `i`: it is the left
/// chopstick of seat `i` and the right chopstick of seat `i - 1` (mod the size).
/// The table owns the only list of chopsticks; philosophers get shared handles.
#[derive(Debug, Clone)]
pub struct Table {
    chopsticks: Vec<Chopstick>,
}

impl Table {
    pub fn new(seats: usize) -> Self {
        Self {
            chopsticks: (0..seats).map(Chopstick::new).collect(),
        }
    }

    pub fn seats(&self) -> usize {
        self.chopsticks.len()
    }

    pub fn chopsticks(&self) -> &[Chopstick] {
        &self.chopsticks
    }

    pub fn left_of(&self, seat: usize) -> Option<&Chopstick> {
        self.chopsticks.get(seat)
    }

    pub fn right_of(&self, seat: usize) -> Option<&Chopstick> {
        if seat >= self.seats() {
            return None;
        }
        self.chopsticks.get((seat + 1) % self.seats())
    }

    /// Seats a philosopher at `seat` with handles to its two neighbouring chopsticks.
    pub fn philosopher(&self, seat: usize) -> Option<Philosopher> {
        let left = self.left_of(seat)?.clone();
        let right = self.right_of(seat)?.clone();
        Some(Philosopher::new(seat, left, right))
    }

    /// One philosopher per seat, in seat order.
    pub fn philosophers(&self) -> Vec<Philosopher> {
        (0..self.seats())
            .filter_map(|seat| self.philosopher(seat))
            .collect()
    }

    pub fn all_free(&self) -> bool {
        self.chopsticks.iter().all(Chopstick::is_free)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbours_share_a_chopstick() {
        for seats in 2..=12 {
            let table = Table::new(seats);
            let philosophers = table.philosophers();
            assert_eq!(philosophers.len(), seats);

            for (seat, philosopher) in philosophers.iter().enumerate() {
                let next = &philosophers[(seat + 1) % seats];
                assert_eq!(philosopher.left.index(), seat);
                assert_eq!(philosopher.right.index(), next.left.index());
                assert_ne!(philosopher.left.index(), philosopher.right.index());
            }
        }
    }

    #[tokio::test]
    async fn test_handles_point_to_the_same_lock() {
        let table = Table::new(5);
        let last = table.philosopher(4).unwrap();
        let first = table.philosopher(0).unwrap();

        let _guard = last.right.acquire(4).await.unwrap();
        assert_eq!(first.left.holder(), Some(4));
        assert!(!table.all_free());
    }

    #[test]
    fn test_names_are_one_based() {
        let table = Table::new(3);
        let names: Vec<String> = table.philosophers().into_iter().map(|p| p.name).collect();
        assert_eq!(names, ["Philosopher 1", "Philosopher 2", "Philosopher 3"]);
    }

    #[test]
    fn test_seat_out_of_range() {
        let table = Table::new(2);
        assert!(table.philosopher(2).is_none());
        assert!(table.right_of(2).is_none());
    }
}
