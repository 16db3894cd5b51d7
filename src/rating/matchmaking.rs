use super::model::RatingRecord;

/// Candidates within `window` rating points of the requester, closest
/// first; equally distant candidates are ordered by descending win ratio.
/// An empty pool or an empty window yields an empty list, never an error.
pub fn rank_opponents(
    requester_rating: i32,
    window: i32,
    pool: &[RatingRecord],
) -> Vec<RatingRecord> {
    let mut candidates: Vec<RatingRecord> = pool
        .iter()
        .filter(|record| rating_distance(requester_rating, record) <= window)
        .cloned()
        .collect();

    candidates.sort_by(|a, b| {
        rating_distance(requester_rating, a)
            .cmp(&rating_distance(requester_rating, b))
            .then_with(|| b.win_ratio().total_cmp(&a.win_ratio()))
    });

    candidates
}

fn rating_distance(requester_rating: i32, record: &RatingRecord) -> i32 {
    (record.rating - requester_rating).abs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rating::model::RatingRecord;

    fn record(player_id: i64, rating: i32) -> RatingRecord {
        RatingRecord::new(player_id, rating)
    }

    fn record_with_score(player_id: i64, rating: i32, wins: i32, losses: i32) -> RatingRecord {
        RatingRecord::from_parts(player_id, rating, wins, losses, 0, wins + losses).unwrap()
    }

    fn ids(records: &[RatingRecord]) -> Vec<i64> {
        records.iter().map(|r| r.player_id).collect()
    }

    #[test]
    fn empty_pool_yields_empty_list() {
        assert!(rank_opponents(1200, 300, &[]).is_empty());
    }

    #[test]
    fn filters_out_candidates_beyond_the_window() {
        let pool = vec![record(1, 1150), record(2, 1550), record(3, 1600)];
        let ranked = rank_opponents(1200, 300, &pool);
        assert_eq!(ids(&ranked), vec![1]);
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let pool = vec![record(1, 900), record(2, 1500), record(3, 1501), record(4, 899)];
        let ranked = rank_opponents(1200, 300, &pool);
        assert_eq!(ids(&ranked), vec![1, 2]);
    }

    #[test]
    fn closest_candidates_come_first() {
        let pool = vec![record(1, 1450), record(2, 1210), record(3, 1120)];
        let ranked = rank_opponents(1200, 300, &pool);
        assert_eq!(ids(&ranked), vec![2, 3, 1]);
    }

    #[test]
    fn equal_distance_prefers_the_stronger_performer() {
        // Both are 100 points away; the 8-2 player outranks the 2-8 one.
        let pool = vec![
            record_with_score(1, 1100, 2, 8),
            record_with_score(2, 1300, 8, 2),
        ];
        let ranked = rank_opponents(1200, 300, &pool);
        assert_eq!(ids(&ranked), vec![2, 1]);
    }

    #[test]
    fn unplayed_candidates_rank_as_zero_ratio() {
        let pool = vec![record(1, 1300), record_with_score(2, 1100, 1, 3)];
        let ranked = rank_opponents(1200, 300, &pool);
        assert_eq!(ids(&ranked), vec![2, 1]);
    }

    #[test]
    fn zero_window_keeps_exact_matches_only() {
        let pool = vec![record(1, 1200), record(2, 1201)];
        let ranked = rank_opponents(1200, 0, &pool);
        assert_eq!(ids(&ranked), vec![1]);
    }
}
