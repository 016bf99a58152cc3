pub mod id_ordering;
pub mod migration_discovery;
pub mod statement_parsing;
