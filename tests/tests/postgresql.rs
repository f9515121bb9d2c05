#![cfg(feature = "postgresql")]

use pretty_assertions::assert_eq;
use quarry::{raw, record, sql, Executor, PageOptions, Repo, Value};
use tests::{
    models::{Address, Image, User},
    postgresql::SetupPostgreSQL,
};

#[tokio::test]
async fn image_crud() {
    let setup = SetupPostgreSQL::new().await.unwrap();
    let repo = Repo::<Image>::new(&setup.pg);

    let cat = Image::new("cat", "s3://cat.png");
    let dog = Image::new("dog", "s3://dog.png");
    assert_eq!(repo.add(&[cat.clone(), dog.clone()]).await.unwrap(), 2);

    let loaded = repo.get_by_id(cat.id).await.unwrap().unwrap();
    assert_eq!(loaded.name, "cat");
    assert_eq!(loaded.image_url, "s3://cat.png");
    assert!(loaded.created_at.is_some());

    assert_eq!(repo.count().await.unwrap(), 2);

    repo.update_by_id(cat.id, &record! { "name" => "kitten" })
        .await
        .unwrap();
    assert_eq!(repo.find_by_id(cat.id).await.unwrap().name, "kitten");

    repo.remove_by_id(dog.id).await.unwrap();
    assert_eq!(repo.get_by_id(dog.id).await.unwrap(), None);

    setup.cleanup().await.unwrap();
}

#[tokio::test]
async fn list_and_fetch_many() {
    let setup = SetupPostgreSQL::new().await.unwrap();
    let repo = Repo::<Image>::new(&setup.pg);

    let images: Vec<Image> = (0..5)
        .map(|i| Image::new(&format!("img{i}"), &format!("s3://{i}")))
        .collect();
    repo.add(&images).await.unwrap();

    let page = repo
        .list_ordered(raw("x.name DESC"), PageOptions::new(2, 1))
        .await
        .unwrap();
    assert_eq!(page.count, 5);
    assert_eq!(
        page.items.iter().map(|i| i.name.as_str()).collect::<Vec<_>>(),
        ["img3", "img2"]
    );

    let many = repo
        .get_many_by_ids([images[0].id, images[4].id])
        .await
        .unwrap();
    assert_eq!(many.len(), 2);

    let found = repo
        .find(sql!("x.id = ANY(" {vec![images[1].id, images[2].id]} ")"))
        .await
        .unwrap();
    assert_eq!(found.len(), 2);

    setup.cleanup().await.unwrap();
}

#[tokio::test]
async fn embedded_user_round_trip() {
    let setup = SetupPostgreSQL::new().await.unwrap();
    let repo = Repo::<User>::new(&setup.pg);

    let user = User {
        id: "u1".to_string(),
        email: "alice@example.com".to_string(),
        address: Address {
            street: "Main St 1".to_string(),
            city: "Oslo".to_string(),
        },
        password_hash: Some("hash".to_string()),
    };
    repo.add_one(&user).await.unwrap();

    let loaded = repo.find_by_id("u1").await.unwrap();
    assert_eq!(loaded.address, user.address);
    assert_eq!(loaded.password_hash, None);

    let res = setup
        .pg
        .query(
            "SELECT password_hash FROM users WHERE id = $1",
            &[Value::from("u1")],
        )
        .await
        .unwrap();
    assert_eq!(res.rows[0].get("password_hash"), Some(&Value::from("hash")));

    setup.cleanup().await.unwrap();
}

#[tokio::test]
async fn rolled_back_transaction_leaves_no_rows() {
    let mut setup = SetupPostgreSQL::new().await.unwrap();
    let image = Image::new("cat", "s3://cat.png");

    let tx = setup.pg.transaction().await.unwrap();
    Repo::<Image>::new(&tx).add_one(&image).await.unwrap();
    assert!(Repo::<Image>::new(&tx)
        .get_by_id(image.id)
        .await
        .unwrap()
        .is_some());
    tx.rollback().await.unwrap();

    let repo = Repo::<Image>::new(&setup.pg);
    assert_eq!(repo.get_by_id(image.id).await.unwrap(), None);

    let tx = setup.pg.transaction().await.unwrap();
    Repo::<Image>::new(&tx).add_one(&image).await.unwrap();
    tx.commit().await.unwrap();

    let repo = Repo::<Image>::new(&setup.pg);
    assert!(repo.get_by_id(image.id).await.unwrap().is_some());

    setup.cleanup().await.unwrap();
}

#[tokio::test]
async fn null_and_typed_parameters() {
    let setup = SetupPostgreSQL::new().await.unwrap();

    setup
        .pg
        .query(
            "INSERT INTO users (id, email, address_city) VALUES ($1, $2, $3)",
            &[Value::from("u2"), Value::from("b@example.com"), Value::Null],
        )
        .await
        .unwrap();

    let res = setup
        .pg
        .query("SELECT address_city, 1::int4 AS one FROM users", &[])
        .await
        .unwrap();
    assert_eq!(
        res.rows[0],
        record! { "address_city" => Value::Null, "one" => 1 }
    );

    setup.cleanup().await.unwrap();
}

#[tokio::test]
async fn date_numeric_and_time_columns() {
    let setup = SetupPostgreSQL::new().await.unwrap();
    setup
        .pg
        .batch_execute(
            "CREATE TYPE mood AS ENUM ('calm', 'busy');
             CREATE TABLE readings (id INT4 PRIMARY KEY, day DATE, amount NUMERIC, at TIME, mood mood, levels INT2[])",
        )
        .await
        .unwrap();

    setup
        .pg
        .query(
            "INSERT INTO readings VALUES ($1, $2, $3, $4, $5, $6), ($7, $8, $9, $10, $11, $12)",
            &[
                Value::from(1),
                Value::from("2024-03-01"),
                Value::from("12.50"),
                Value::from("08:30:00"),
                Value::from("busy"),
                Value::from(vec![1, 2]),
                Value::from(2),
                Value::Null,
                Value::Null,
                Value::Null,
                Value::Null,
                Value::Null,
            ],
        )
        .await
        .unwrap();

    let res = setup
        .pg
        .query("SELECT x.* FROM readings x ORDER BY x.id", &[])
        .await
        .unwrap();

    assert_eq!(
        res.rows[0],
        record! {
            "id" => 1,
            "day" => "2024-03-01",
            "amount" => "12.50",
            "at" => "08:30:00",
            "mood" => "busy",
            "levels" => vec![1, 2],
        }
    );
    assert!(res.rows[1].values().skip(1).all(Value::is_null));

    setup.cleanup().await.unwrap();
}
