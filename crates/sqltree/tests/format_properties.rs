//! Round-trip and dialect-gating behavior exercised through the public
//! facade, one test per concrete scenario plus the cross-cutting
//! invariants (idempotence, keyword case insensitivity, line-length
//! envelope, boolean layout).

use pretty_assertions::assert_eq;
use sqltree::{format, get_tables, sqltree, Dialect};

#[test]
fn star_select_normalizes_keyword_case_and_clause_layout() {
    let dialect = Dialect::mysql();
    assert_eq!(format("SELECT * from x", &dialect, 88, 0).unwrap(), "SELECT *\nFROM x\n");
}

#[test]
fn mysql_comma_limit_canonicalizes_to_offset_form() {
    let mysql = Dialect::mysql();
    assert_eq!(
        format("select x from y limit 1, 2", &mysql, 88, 0).unwrap(),
        "SELECT x\nFROM y\nLIMIT 2 OFFSET 1\n"
    );

    let redshift = Dialect::redshift();
    assert!(format("select x from y limit 1, 2", &redshift, 88, 0).is_err());
}

#[test]
fn redshift_limit_all_rejected_by_mysql() {
    let redshift = Dialect::redshift();
    assert_eq!(
        format("select y from x limit all", &redshift, 88, 0).unwrap(),
        "SELECT y\nFROM x\nLIMIT ALL\n"
    );

    let mysql = Dialect::mysql();
    assert!(format("select y from x limit all", &mysql, 88, 0).is_err());
}

#[test]
fn insert_values_with_on_duplicate_key_update() {
    let dialect = Dialect::mysql();
    let sql = "insert x(a,b,c) value(1,2,3),(4,5,6) on duplicate key update a=4";
    assert_eq!(
        format(sql, &dialect, 88, 0).unwrap(),
        "INSERT INTO x(a, b, c)\nVALUES (1, 2, 3), (4, 5, 6)\nON DUPLICATE KEY UPDATE a = 4\n"
    );
}

#[test]
fn nested_boolean_where_clause_splits_across_lines_under_base_indent() {
    let dialect = Dialect::mysql();
    let sql = "select x from y where (x=1 or y=2) and z=3";
    let i12 = " ".repeat(12);
    let i16 = " ".repeat(16);
    let i20 = " ".repeat(20);
    let trailing = " ".repeat(8);
    let expected = format!(
        "\n{i12}SELECT x\n{i12}FROM y\n{i12}WHERE\n{i16}(\n{i20}x = 1\n{i20}OR y = 2\n{i16})\n{i16}AND z = 3\n{trailing}"
    );
    assert_eq!(format(sql, &dialect, 88, 12).unwrap(), expected);
}

#[test]
fn insert_select_collects_both_targets_in_source_order() {
    let dialect = Dialect::mysql();
    assert_eq!(get_tables("INSERT INTO x(a,b) SELECT * FROM y", &dialect).unwrap(), vec!["x", "y"]);
}

#[test]
fn select_into_second_slot_does_not_duplicate_on_reformat() {
    let dialect = Dialect::mysql();
    let once = format("select x from y limit 5 into dest", &dialect, 88, 0).unwrap();
    assert_eq!(once, "SELECT x\nFROM y\nLIMIT 5\nINTO dest\n");
    assert_eq!(format(&once, &dialect, 88, 0).unwrap(), once);
    assert_eq!(get_tables("select x from y limit 5 into dest", &dialect).unwrap(), vec!["y", "dest"]);
}

#[test]
fn select_into_third_slot_after_lock_mode_round_trips() {
    let dialect = Dialect::mysql();
    let sql = "select x from y for update into dest";
    let formatted = format(sql, &dialect, 88, 0).unwrap();
    assert_eq!(formatted, "SELECT x\nFROM y\nFOR UPDATE\nINTO dest\n");
    assert_eq!(format(&formatted, &dialect, 88, 0).unwrap(), formatted);
}

#[test]
fn delete_order_by_and_limit_are_gated_by_update_limit_feature() {
    let mysql = Dialect::mysql();
    assert_eq!(
        format("delete from t order by x limit 5", &mysql, 88, 0).unwrap(),
        "DELETE FROM t\nORDER BY x\nLIMIT 5\n"
    );

    let redshift = Dialect::redshift();
    assert!(format("delete from t order by x", &redshift, 88, 0).is_err());
    assert!(format("delete from t limit 5", &redshift, 88, 0).is_err());
}

#[test]
fn format_is_idempotent_at_fixed_dialect() {
    let dialect = Dialect::mysql();
    let sql = "select a, b from t1 join t2 on t1.id = t2.id where a > 1 and b < 2 order by a limit 10";
    let once = format(sql, &dialect, 88, 0).unwrap();
    let twice = format(&once, &dialect, 88, 0).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn keyword_case_does_not_affect_canonical_output() {
    let dialect = Dialect::mysql();
    assert_eq!(
        format("select x from y", &dialect, 88, 0).unwrap(),
        format("SeLeCt x FrOm y", &dialect, 88, 0).unwrap()
    );
}

#[test]
fn every_boolean_node_spans_at_least_two_lines() {
    let dialect = Dialect::mysql();
    let out = format("select a from t where a = 1 and b = 2 or c = 3", &dialect, 88, 0).unwrap();
    let where_start = out.find("WHERE").expect("where clause present");
    let where_body = &out[where_start..];
    assert!(where_body.lines().count() >= 2, "boolean layout must not collapse onto one line:\n{where_body}");
}

#[test]
fn long_comma_list_splits_one_item_per_line() {
    let dialect = Dialect::mysql();
    let sql = "select aaaaaaaaaa, bbbbbbbbbb, cccccccccc, dddddddddd, eeeeeeeeee, ffffffffff from t";
    let out = format(sql, &dialect, 40, 0).unwrap();
    let select_exprs = out.lines().filter(|line| line.trim_end_matches(',').ends_with("ffffff") || line.contains("aaaaaaaaaa")).count();
    assert!(select_exprs >= 1, "expected the select list to split:\n{out}");
    for line in out.lines() {
        assert!(line.len() <= 40, "line exceeds the configured budget: {line:?}\nfull output:\n{out}");
    }
}

#[test]
fn dialect_gated_feature_raises_parse_error_not_panic() {
    let redshift = Dialect::redshift();
    let result = sqltree("select x from y limit 1, 2", &redshift);
    assert!(result.is_err());
}

#[test]
fn drop_table_keeps_if_exists_and_cascade() {
    let dialect = Dialect::mysql();
    assert_eq!(
        format("drop table if exists a, b cascade", &dialect, 88, 0).unwrap(),
        "DROP TABLE IF EXISTS a, b CASCADE\n"
    );
}

#[test]
fn malformed_input_never_panics_through_the_facade() {
    let dialect = Dialect::mysql();
    for sql in ["SELECT FROM", "INSERT INTO", "", "SELECT * FROM WHERE"] {
        let _ = format(sql, &dialect, 88, 0);
    }
}
