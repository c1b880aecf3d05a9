//! Unsupported constructs are refused with no output.

use pg2ora::{ConvertError, ConvertOptions, Converter, ErrorCategory, Unsupported, convert};
use proptest::prelude::*;

#[test]
fn unsupported_constructs() {
    let cases = [
        "insert into t (a) values (1), (2)",
        "select count(*) over (partition by a) from t",
        "select a from t group by a having count(*) > 1",
        "select a from s.t.c",
        "select s.t.c from t",
        "delete from t where id = 1 returning id",
        "select a from t where a = any($1)",
        "select a from t join u on t.id = u.id and t.k = u.k",
        "insert into t (id) values (1) returning id",
        "select lower(name) from t",
        "select a::int[] from t",
        "select a from t where not (a = 1)",
        "select a from t where a is true",
        "with x as (select 1) select * from x",
        "create table t (id int)",
    ];
    for sql in cases {
        let err = convert(sql).unwrap_err();
        assert_eq!(
            err.category(),
            ErrorCategory::UnsupportedConstruct,
            "{sql}: {err}"
        );
    }
}

#[test]
fn specific_unsupported_kinds() {
    let kind = |sql: &str| convert(sql).unwrap_err().as_unsupported().cloned();

    assert_eq!(
        kind("select lower(name) from t"),
        Some(Unsupported::Function("lower".to_string()))
    );
    assert!(matches!(kind("select a::interval from t"), Some(Unsupported::Type(_))));
    assert!(matches!(kind("select a from t where a is unknown"), Some(Unsupported::NullComparison(_))));
    assert!(matches!(kind("select a from t where a = all($1)"), Some(Unsupported::Predicate(_))));
    assert_eq!(
        kind("insert into t (id) values (1) on conflict do nothing"),
        Some(Unsupported::MissingConflictColumns)
    );
    assert_eq!(
        kind("insert into t (id) values (1) returning id"),
        Some(Unsupported::MissingOnConflict)
    );
    assert_eq!(
        kind("insert into t (id) values (1) on conflict (id) do nothing returning excluded.id"),
        Some(Unsupported::ExcludedTable)
    );
}

#[test]
fn malformed_input() {
    assert!(matches!(convert("").unwrap_err(), ConvertError::EmptyInput));
    assert!(matches!(
        convert("select 1; select 2").unwrap_err(),
        ConvertError::MultipleStatements(2)
    ));
    assert_eq!(
        convert("select from where").unwrap_err().category(),
        ErrorCategory::Parse
    );
}

#[test]
fn lenient_mode_only_relaxes_expressions() {
    let lenient = Converter::new(ConvertOptions::default().lenient());
    assert_eq!(
        lenient.convert("select a from t where a ~ '^x'").unwrap(),
        "SELECT a FROM t WHERE a ~ '^x'"
    );
    assert!(lenient.convert("select lower(name) from t").unwrap_err().is_unsupported());
    assert!(lenient.convert("insert into t (a) values (1), (2)").unwrap_err().is_unsupported());
}

fn column() -> impl Strategy<Value = String> {
    "c_[a-z]{1,6}"
}

proptest! {
    #[test]
    fn conflict_columns_must_be_inserted(
        columns in prop::collection::btree_set(column(), 1..5),
        pick in any::<prop::sample::Index>(),
        stranger in column(),
    ) {
        let columns: Vec<String> = columns.into_iter().collect();
        let values = vec!["1"; columns.len()].join(", ");
        let key = pick.get(&columns).clone();

        let sql = format!(
            "insert into t ({}) values ({values}) on conflict ({key}) do nothing",
            columns.join(", ")
        );
        prop_assert!(convert(&sql).is_ok(), "{}", sql);

        prop_assume!(!columns.contains(&stranger));
        let sql = format!(
            "insert into t ({}) values ({values}) on conflict ({stranger}) do nothing",
            columns.join(", ")
        );
        let err = convert(&sql).unwrap_err();
        prop_assert_eq!(err.category(), ErrorCategory::StructuralMismatch);
    }
}
