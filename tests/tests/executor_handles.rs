use pretty_assertions::assert_eq;
use quarry::{sql, Db, QueryResult, Repo, Value};
use tests::{models::Image, LoggingExecutor};

#[tokio::test]
async fn db_runs_templates() {
    let exec = LoggingExecutor::stub();
    exec.respond(QueryResult::count(3));
    let db = Db::new(exec.clone());

    let res = db
        .run(&sql!("UPDATE images SET name = " {"x"} " WHERE name IN " {quarry::group_array(["a", "b"])}))
        .await
        .unwrap();

    assert_eq!(res.row_count, 3);

    let query = exec.log().pop().unwrap();
    assert_eq!(query.text, "UPDATE images SET name = $1 WHERE name IN ($2, $3)");
    assert_eq!(
        query.params,
        [Value::from("x"), Value::from("a"), Value::from("b")]
    );
}

#[tokio::test]
async fn clones_share_one_executor() {
    let exec = LoggingExecutor::stub();
    let db = Db::new(exec.clone());
    let other = db.clone();

    db.repo::<Image>().remove_by_id("a").await.unwrap();
    other.repo::<Image>().remove_by_id("b").await.unwrap();

    assert_eq!(exec.log().len(), 2);
}

#[tokio::test]
async fn repo_rebinds_to_a_transaction_handle() {
    let pool = LoggingExecutor::stub();
    let tx = LoggingExecutor::stub();
    let db = Db::new(pool.clone());

    let repo = db.repo::<Image>();
    repo.with(&tx).add_one(&Image::new("a", "s3://a")).await.unwrap();
    repo.remove_by_id("b").await.unwrap();

    assert_eq!(tx.log().count("INSERT"), 1);
    assert!(!tx.log().has("DELETE"));
    assert_eq!(pool.log().texts(), ["DELETE FROM images WHERE (id = $1);"]);
}

#[tokio::test]
async fn wrapped_executor_forwards() {
    let inner = LoggingExecutor::stub();
    inner.respond(QueryResult::count(1));
    let outer = LoggingExecutor::wrap(inner.clone());

    let removed = Repo::<Image>::new(&outer).remove_by_id("a").await;

    assert!(removed.is_ok());
    assert_eq!(inner.log().len(), 1);
    assert_eq!(
        outer.log().pop().unwrap().result,
        Some(QueryResult::count(1))
    );
}

#[tokio::test]
async fn connect_rejects_unknown_scheme() {
    let err = Db::connect("sqlite::memory:").await.unwrap_err();
    assert!(err.is_invalid_connection_url());
}
