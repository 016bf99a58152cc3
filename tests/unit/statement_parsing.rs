use tidemark::ParseError;
use tidemark::migration::parse_statements;

#[test]
fn test_plain_body_is_one_statement() {
    let sql = "\n  CREATE TABLE a (id INT);\nCREATE TABLE b (id INT);\n\n";

    let parsed = parse_statements(sql).unwrap();

    assert!(parsed.use_transaction);
    assert_eq!(parsed.statements, vec![sql.trim()]);
}

#[test]
fn test_no_transaction_splits_on_semicolons() {
    let sql = "-- +migration NoTransaction\nCREATE INDEX CONCURRENTLY a ON t (a);\nCREATE INDEX CONCURRENTLY b ON t (b);\n";

    let parsed = parse_statements(sql).unwrap();

    assert!(!parsed.use_transaction);
    assert_eq!(
        parsed.statements,
        vec![
            "CREATE INDEX CONCURRENTLY a ON t (a);",
            "CREATE INDEX CONCURRENTLY b ON t (b);",
        ]
    );
}

#[test]
fn test_block_is_never_split_under_no_transaction() {
    let function = "CREATE FUNCTION f() RETURNS int AS $$\nBEGIN\n  PERFORM 1;\n  RETURN 1;\nEND;\n$$ LANGUAGE plpgsql;";
    let sql = format!(
        "-- +migration NoTransaction\n-- +migration BeginStatement\n{}\n-- +migration EndStatement\nSELECT f();\n",
        function
    );

    let parsed = parse_statements(&sql).unwrap();

    assert!(!parsed.use_transaction);
    assert_eq!(parsed.statements, vec![function, "SELECT f();"]);
}

#[test]
fn test_block_is_kept_whole_in_transactional_body() {
    let sql = "CREATE TABLE a (id INT);\n-- +migration BeginStatement\nDO $$ BEGIN PERFORM 1; END $$;\n-- +migration EndStatement\n";

    let parsed = parse_statements(sql).unwrap();

    assert!(parsed.use_transaction);
    assert!(
        parsed
            .statements
            .contains(&"DO $$ BEGIN PERFORM 1; END $$;".to_string())
    );
}

#[test]
fn test_no_transaction_after_content_is_an_error() {
    let sql = "CREATE TABLE a (id INT);\n-- +migration NoTransaction\n";

    let err = parse_statements(sql).unwrap_err();

    assert_eq!(err, ParseError::MisplacedNoTransaction { line: 2 });
}

#[test]
fn test_no_transaction_inside_block_is_an_error() {
    let sql = "-- +migration BeginStatement\nSELECT 1;\n-- +migration NoTransaction\n-- +migration EndStatement\n";

    assert!(matches!(
        parse_statements(sql),
        Err(ParseError::NoTransactionInsideBlock { line: 3 })
    ));
}

#[test]
fn test_empty_body_has_no_statements() {
    let parsed = parse_statements("  \n\n").unwrap();

    assert!(parsed.statements.is_empty());
    assert!(parsed.use_transaction);
}
