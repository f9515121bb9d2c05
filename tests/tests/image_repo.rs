use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use quarry::{raw, record, PageOptions, QueryResult, Repo, Value};
use tests::{init_tracing, models::Image, LoggingExecutor};

fn image_row(image: &Image) -> quarry::Record {
    record! {
        "id" => image.id,
        "name" => image.name.as_str(),
        "image_url" => image.image_url.as_str(),
        "created_at" => Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
        "unmapped_column" => 7,
    }
}

#[tokio::test]
async fn add_one_writes_mapped_columns() {
    init_tracing();

    let exec = LoggingExecutor::stub();
    exec.respond(QueryResult::count(1));

    let image = Image::new("cat", "s3://cat.png");
    Repo::<Image>::new(&exec).add_one(&image).await.unwrap();

    let mut log = exec.log();
    let query = log.pop().unwrap();
    assert_eq!(
        query.text,
        "INSERT INTO images (id, name, image_url) VALUES ($1, $2, $3);"
    );
    assert_eq!(
        query.params,
        [
            Value::from(image.id.to_string()),
            Value::from("cat"),
            Value::from("s3://cat.png"),
        ]
    );
    assert!(log.is_empty());
}

#[tokio::test]
async fn add_many_in_one_statement() {
    let exec = LoggingExecutor::stub();
    exec.respond(QueryResult::count(2));

    let images = [Image::new("a", "s3://a"), Image::new("b", "s3://b")];
    let inserted = Repo::<Image>::new(&exec).add(&images).await.unwrap();

    assert_eq!(inserted, 2);
    assert_eq!(
        exec.log().texts(),
        ["INSERT INTO images (id, name, image_url) VALUES ($1, $2, $3), ($4, $5, $6);"]
    );
}

#[tokio::test]
async fn add_nothing_skips_the_database() {
    let exec = LoggingExecutor::stub();

    let inserted = Repo::<Image>::new(&exec).add(&[]).await.unwrap();

    assert_eq!(inserted, 0);
    assert!(exec.log().is_empty());
}

#[tokio::test]
async fn get_by_id_renames_row_fields() {
    let exec = LoggingExecutor::stub();
    let image = Image::new("cat", "s3://cat.png");
    exec.respond(QueryResult::from_rows(vec![image_row(&image)]));

    let loaded = Repo::<Image>::new(&exec)
        .get_by_id(image.id)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(
        loaded,
        Image {
            created_at: Some(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()),
            ..image.clone()
        }
    );

    let query = exec.log().pop().unwrap();
    assert_eq!(
        query.text,
        "SELECT x.* FROM images x WHERE (x.id = $1) LIMIT $2;"
    );
    assert_eq!(query.params, [Value::from(image.id), Value::I64(1)]);
}

#[tokio::test]
async fn get_by_id_missing_row() {
    let exec = LoggingExecutor::stub();
    let repo = Repo::<Image>::new(&exec);
    let id = uuid::Uuid::new_v4();

    assert_eq!(repo.get_by_id(id).await.unwrap(), None);

    let err = repo.find_by_id(id).await.unwrap_err();
    assert!(err.is_record_not_found());
}

#[tokio::test]
async fn get_many_by_ids() {
    let exec = LoggingExecutor::stub();
    let repo = Repo::<Image>::new(&exec);

    let a = Image::new("a", "s3://a");
    let b = Image::new("b", "s3://b");
    exec.respond(QueryResult::from_rows(vec![image_row(&a), image_row(&b)]));

    let loaded = repo.get_many_by_ids([a.id, b.id]).await.unwrap();
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[1].name, "b");
    assert_eq!(
        exec.log().texts(),
        ["SELECT * FROM images WHERE id IN ($1, $2);"]
    );

    let none = repo
        .get_many_by_ids(Vec::<uuid::Uuid>::new())
        .await
        .unwrap();
    assert!(none.is_empty());
    assert_eq!(exec.log().len(), 1);
}

#[tokio::test]
async fn list_pages_and_counts() {
    let exec = LoggingExecutor::stub();
    let a = Image::new("a", "s3://a");
    exec.respond(QueryResult::from_rows(vec![image_row(&a)]))
        .respond(QueryResult::from_rows(vec![record! { "count" => 41 }]));

    let page = Repo::<Image>::new(&exec)
        .list(PageOptions::default())
        .await
        .unwrap();

    assert_eq!(page.count, 41);
    assert_eq!(page.items.len(), 1);

    let log = exec.log();
    assert_eq!(
        log.texts(),
        [
            "SELECT x.* FROM images x LIMIT $1 OFFSET $2;",
            "SELECT COUNT(DISTINCT x.id) AS count FROM images x;",
        ]
    );
    log.with_queries(|queries| {
        assert_eq!(queries[0].params, [Value::I64(1000), Value::I64(0)]);
    });
}

#[tokio::test]
async fn list_ordered_newest_first() {
    let exec = LoggingExecutor::stub();
    exec.respond(QueryResult::default())
        .respond(QueryResult::from_rows(vec![record! { "count" => 0 }]));

    let page = Repo::<Image>::new(&exec)
        .list_ordered(raw("x.created_at DESC"), PageOptions::new(10, 20))
        .await
        .unwrap();

    assert!(page.items.is_empty());
    assert_eq!(
        exec.log().texts()[0],
        "SELECT x.* FROM images x ORDER BY x.created_at DESC LIMIT $1 OFFSET $2;"
    );
}

#[tokio::test]
async fn count_accepts_textual_numbers() {
    let exec = LoggingExecutor::stub();
    exec.respond(QueryResult::from_rows(vec![record! { "count" => "5" }]));

    assert_eq!(Repo::<Image>::new(&exec).count().await.unwrap(), 5);
}

#[tokio::test]
async fn update_renames_and_drops_read_only_fields() {
    let exec = LoggingExecutor::stub();
    let repo = Repo::<Image>::new(&exec);
    let id = uuid::Uuid::new_v4();

    repo.update_by_id(
        id,
        &record! { "name" => "dog", "createdAt" => "2024-01-01T00:00:00Z", "unknown" => 1 },
    )
    .await
    .unwrap();

    let query = exec.log().pop().unwrap();
    assert_eq!(query.text, "UPDATE images SET name = $1 WHERE id = $2;");
    assert_eq!(query.params, [Value::from("dog"), Value::from(id)]);
}

#[tokio::test]
async fn update_with_nothing_to_write_is_skipped() {
    let exec = LoggingExecutor::stub();

    Repo::<Image>::new(&exec)
        .update_by_id("id", &record! { "createdAt" => "2024-01-01T00:00:00Z" })
        .await
        .unwrap();

    assert!(exec.log().is_empty());
}

#[tokio::test]
async fn remove_by_id() {
    let exec = LoggingExecutor::stub();

    Repo::<Image>::new(&exec).remove_by_id("a").await.unwrap();

    let query = exec.log().pop().unwrap();
    assert_eq!(query.text, "DELETE FROM images WHERE (id = $1);");
    assert_eq!(query.params, [Value::from("a")]);
}

#[tokio::test]
async fn executor_errors_propagate() {
    let exec = LoggingExecutor::stub();
    exec.fail(quarry::err!("connection reset"));

    let err = Repo::<Image>::new(&exec)
        .add_one(&Image::new("a", "s3://a"))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "connection reset");

    let query = exec.log().pop().unwrap();
    assert_eq!(query.result, None);
}

#[tokio::test]
async fn malformed_rows_name_the_table() {
    let exec = LoggingExecutor::stub();
    exec.respond(QueryResult::from_rows(vec![record! { "id" => "not-a-uuid" }]));

    let err = Repo::<Image>::new(&exec)
        .get_by_id("not-a-uuid")
        .await
        .unwrap_err();

    assert!(err.to_string().starts_with("failed to load `images` row: "));
}
