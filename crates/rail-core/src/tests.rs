//! Unit tests for rail-core primitives.

#[cfg(test)]
mod ids {
    use crate::{StationId, TrainId};

    #[test]
    fn station_index_roundtrip() {
        let id = StationId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(StationId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn train_ids_are_one_based() {
        assert_eq!(TrainId::from_index(0), TrainId(1));
        assert_eq!(TrainId(3).index(), 2);
        let fleet: Vec<_> = TrainId::fleet(3).collect();
        assert_eq!(fleet, [TrainId(1), TrainId(2), TrainId(3)]);
    }

    #[test]
    fn ordering() {
        assert!(TrainId(1) < TrainId(2));
        assert!(StationId(100) > StationId(99));
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(StationId::INVALID.0, u32::MAX);
        assert_eq!(TrainId::default(), TrainId::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(TrainId(7).to_string(), "T7");
        assert_eq!(StationId(7).to_string(), "StationId(7)");
    }
}

#[cfg(test)]
mod geo {
    use crate::Coord;

    #[test]
    fn manhattan_is_symmetric() {
        let a = Coord::new(1, 5);
        let b = Coord::new(4, 1);
        assert_eq!(a.manhattan(b), 7);
        assert_eq!(b.manhattan(a), 7);
        assert_eq!(a.manhattan(a), 0);
    }

    #[test]
    fn point_conversion() {
        assert_eq!(Coord::new(3, 9).as_point(), [3, 9]);
    }

    #[test]
    fn display() {
        assert_eq!(Coord::new(2, 0).to_string(), "(2, 0)");
    }
}

#[cfg(test)]
mod time {
    use crate::Turn;

    #[test]
    fn arithmetic() {
        let t = Turn(5);
        assert_eq!(t + 3, Turn(8));
        assert_eq!(t.offset(2), Turn(7));
        assert_eq!(t.next(), Turn(6));
        assert_eq!(Turn(9) - t, 4);
        assert_eq!(Turn(9).since(t), 4);
    }

    #[test]
    fn zero_is_default() {
        assert_eq!(Turn::default(), Turn::ZERO);
        assert_eq!(Turn::ZERO.to_string(), "turn 0");
    }
}
