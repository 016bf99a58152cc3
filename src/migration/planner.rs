use super::types::{Direction, Migration, PlannedMigration, compare_ids};
use itertools::Either;
use std::collections::HashSet;

/// Compute which migrations to run, in order.
///
/// `migrations` must already be sorted (as returned by the resolver).
/// `applied` is the unordered set of versions the driver has recorded.
/// A `max` of 0 means no limit.
///
/// Migrations ordered before the highest applied version that were never
/// applied (typically introduced by a merge) are always planned first, in
/// the up direction, and don't count towards `max`.
///
/// When the highest applied version has no migration file, the split between
/// "already run" and "still to run" falls where that version would sort, so
/// later migrations are still planned for up and only earlier ones for down.
pub fn plan<'a>(
    migrations: &'a [Migration],
    applied: &[String],
    direction: Direction,
    max: usize,
) -> Vec<PlannedMigration<'a>> {
    let applied: HashSet<&str> = applied.iter().map(String::as_str).collect();
    let high_water_mark = applied
        .iter()
        .copied()
        .max_by(|a, b| compare_ids(a, b));

    let mut planned = Vec::new();

    let boundary = match high_water_mark {
        Some(mark) => {
            planned.extend(
                migrations
                    .iter()
                    .filter(|m| compare_ids(&m.id, mark).is_lt())
                    .filter(|m| !applied.contains(m.id.as_str()))
                    .map(|m| PlannedMigration::new(m, Direction::Up)),
            );

            // Everything up to and including the mark; an orphaned mark lands at its insertion point
            migrations.partition_point(|m| compare_ids(&m.id, mark).is_le())
        }
        None => 0,
    };

    let candidates = match direction {
        Direction::Up => Either::Left(migrations[boundary..].iter()),
        Direction::Down => Either::Right(migrations[..boundary].iter().rev()),
    };
    let limit = if max > 0 { max } else { usize::MAX };

    planned.extend(
        candidates
            .take(limit)
            .map(|m| PlannedMigration::new(m, direction)),
    );

    planned
}
