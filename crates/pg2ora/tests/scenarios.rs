//! End-to-end conversions through the public API.

use pg2ora::{ConvertOptions, Converter, convert};

const MERGE_VALUE2: &str = "MERGE INTO a t
USING (select 'value1' field1 FROM DUAL) s
ON ((SELECT t.field1 FROM DUAL) = s.field1)
WHEN MATCHED THEN
UPDATE SET b = 'value2'
WHEN NOT MATCHED THEN
INSERT (field1) VALUES(s.field1)";

#[test]
fn scenario_table() {
    let cases = [
        (
            "select '1'::int from b",
            "SELECT CAST('1' AS NUMBER) FROM b",
        ),
        (
            "select count(distinct $1) from b",
            "SELECT count(DISTINCT :1) FROM b",
        ),
        (
            "update a set b = b+'1'::int",
            "UPDATE a SET b=(b + CAST('1' AS NUMBER))",
        ),
        (
            "select title from a union select title from b",
            "(SELECT title FROM b) UNION (SELECT title FROM a)",
        ),
        (
            "select * from tasks where title ilike 'sdf%'",
            "SELECT * FROM tasks WHERE UPPER(title) LIKE UPPER('sdf%')",
        ),
        (
            "select (extract(year from now()) - extract(year from date_of_birth))::int from dual",
            "SELECT CAST(extract(year FROM SYSTIMESTAMP) - extract(year FROM date_of_birth) AS NUMBER) FROM dual",
        ),
        (
            "select a.id, b.title from a left join b on a.id = b.a_id where a.level > $1 order by title limit $2",
            "SELECT a.id,b.title FROM a LEFT JOIN b ON a.id=b.a_id WHERE a.\"LEVEL\">:1 ORDER BY title FETCH NEXT :2 ROWS ONLY",
        ),
        (
            "delete from sessions where expires_at < '2024-01-01 00:00:00'::timestamp",
            "DELETE FROM sessions WHERE expires_at<TIMESTAMP '2024-01-01 00:00:00'",
        ),
        (
            "insert into t (id, flag, note) values ($1, true, 'it''s')",
            "INSERT INTO t (id,flag,note) VALUES (:1,1,'it''s')",
        ),
    ];
    for (input, expected) in cases {
        assert_eq!(convert(input).unwrap(), expected, "{input}");
    }
}

#[test]
fn upsert_becomes_merge() {
    let sql = convert(
        "insert into a(field1) values('value1') on conflict (field1) do update set b = 'value2'",
    )
    .unwrap();
    assert_eq!(sql, MERGE_VALUE2);
}

#[test]
fn upsert_with_marker() {
    let sql = convert(
        "insert into a(field1) values('value1') on conflict (field1) do update set b = $1",
    )
    .unwrap();
    assert_eq!(sql, MERGE_VALUE2.replace("'value2'", ":1"));
}

#[test]
fn upsert_returning_is_framed() {
    let sql = convert(
        "insert into a(field1) values('value1') on conflict (field1) do update set b = 'value2' returning id",
    )
    .unwrap();
    assert_eq!(
        sql,
        format!("Savepoint a;\n{MERGE_VALUE2};\nSELECT id FROM a WHERE field1='value1';\ncommit;")
    );
}

#[test]
fn upsert_returning_inside_a_transaction() {
    let converter = Converter::new(ConvertOptions::default().in_transaction(true));
    let sql = converter
        .convert(
            "insert into a(field1) values('value1') on conflict (field1) do update set b = 'value2' returning id",
        )
        .unwrap();
    assert_eq!(
        sql,
        format!("{MERGE_VALUE2};\nSELECT id FROM a WHERE field1='value1'")
    );
}

#[test]
fn upsert_do_nothing() {
    let sql = convert("insert into users (email, name) values ($1, $2) on conflict (email) do nothing")
        .unwrap();
    assert_eq!(
        sql,
        "MERGE INTO users t
USING (select :1 email, :2 name FROM DUAL) s
ON ((SELECT t.email FROM DUAL) = s.email)
WHEN NOT MATCHED THEN
INSERT (email,name) VALUES(s.email, s.name)"
    );
}

#[test]
fn update_returning() {
    let sql = convert("update accounts set balance = balance - $1 where id = $2 returning balance")
        .unwrap();
    assert_eq!(
        sql,
        "Savepoint a;
UPDATE accounts SET balance=(balance - :1) WHERE id=:2;
SELECT balance FROM accounts WHERE id=:2;
commit;"
    );
}

#[test]
fn markers_keep_their_numbers() {
    let sql = convert("select a from t where b = $2 and c = $1 and d = $2").unwrap();
    assert_eq!(sql, "SELECT a FROM t WHERE b=:2 AND c=:1 AND d=:2");
}

#[test]
fn dollar_signs_in_literals_and_names_survive() {
    let sql = convert("select a$1 from t where note = 'costs $1'").unwrap();
    assert_eq!(sql, "SELECT a$1 FROM t WHERE note='costs $1'");
}
