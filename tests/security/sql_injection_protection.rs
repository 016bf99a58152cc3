// Tests for SQL injection protection in version tracking

use anyhow::Result;
use rstest::rstest;
use tidemark::config::types::TrackingTable;
use tidemark::migration_tracking::format_tracking_table_name;

fn table(schema: &str, name: &str) -> TrackingTable {
    TrackingTable {
        schema: schema.to_string(),
        name: name.to_string(),
    }
}

#[rstest]
#[case::defaults("public", "schema_migration", r#""public"."schema_migration""#)]
#[case::underscores("_meta", "migration_history", r#""_meta"."migration_history""#)]
#[case::numbers_and_dollar("schema123", "table$1", r#""schema123"."table$1""#)]
fn test_format_tracking_table_name_accepts_identifiers(
    #[case] schema: &str,
    #[case] name: &str,
    #[case] expected: &str,
) -> Result<()> {
    assert_eq!(format_tracking_table_name(&table(schema, name))?, expected);
    Ok(())
}

#[rstest]
#[case::empty("")]
#[case::leading_digit("1table")]
#[case::leading_dollar("$table")]
#[case::quote(r#"table"; DROP TABLE users; --"#)]
#[case::statement_terminator("table; DELETE FROM x")]
#[case::comment("table--")]
#[case::dot("other.table")]
#[case::whitespace("my table")]
fn test_format_tracking_table_name_rejects_unsafe_names(#[case] unsafe_name: &str) {
    let schema_err = format_tracking_table_name(&table(unsafe_name, "schema_migration"))
        .unwrap_err()
        .to_string();
    assert!(schema_err.contains("Invalid tracking table schema"));

    let name_err = format_tracking_table_name(&table("public", unsafe_name))
        .unwrap_err()
        .to_string();
    assert!(name_err.contains("Invalid tracking table name"));
}
