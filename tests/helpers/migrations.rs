use tidemark::{Direction, MemoryDriver, MemorySource, Migration, resolve};

/// Source with one up file per id, each creating a table named after it
pub fn numbered_source(ids: &[&str]) -> MemorySource {
    ids.iter()
        .flat_map(|id| {
            [
                (format!("{}.up.sql", id), format!("CREATE TABLE t_{};", id)),
                (format!("{}.down.sql", id), format!("DROP TABLE t_{};", id)),
            ]
        })
        .collect()
}

pub fn migrations(ids: &[&str]) -> Vec<Migration> {
    resolve(&numbered_source(ids)).expect("numbered source resolves")
}

/// Ids of the migrations a driver has run in the given direction, in order
pub fn runs(driver: &MemoryDriver, direction: Direction) -> Vec<String> {
    driver
        .migrations()
        .iter()
        .filter(|(_, d)| *d == direction)
        .map(|(id, _)| id.clone())
        .collect()
}
