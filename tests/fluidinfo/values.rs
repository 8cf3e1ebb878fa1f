//! The values protocol end to end.

use fluidinfo::{
    block_on, Callbacks, CreateObjectOptions, DeleteOptions, ErrorKind, FluidinfoClient,
    GetObjectOptions, QueryObject, QueryOptions, TagOptions, TagValue,
};
use serde_json::json;
use tokio::sync::oneshot;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{init_tracing, session_config, values_client};

#[tokio::test]
async fn create_tag_and_read_back() {
    init_tracing();
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/about/book%3Adune"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "5ac1a6d3-2c28-4cf8-a4f7-1e3a0bdba7d0",
            "URI": "https://fluiddb.fluidinfo.com/objects/5ac1a6d3-2c28-4cf8-a4f7-1e3a0bdba7d0"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/values"))
        .and(body_json(json!({
            "queries": [["fluiddb/id=\"5ac1a6d3-2c28-4cf8-a4f7-1e3a0bdba7d0\"", {
                "ntoll/rating": {"value": 10}
            }]]
        })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/values"))
        .and(query_param("query", "fluiddb/id=\"5ac1a6d3-2c28-4cf8-a4f7-1e3a0bdba7d0\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": {"id": {"5ac1a6d3-2c28-4cf8-a4f7-1e3a0bdba7d0": {
                "ntoll/rating": {"value": 10},
                "fluiddb/about": {"value": "book:dune"}
            }}}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = values_client(&mock_server.uri());

    let created = client
        .create_object(&CreateObjectOptions::about("book:dune"))
        .unwrap()
        .await
        .unwrap()
        .into_data();
    assert_eq!(created.about.as_deref(), Some("book:dune"));

    client
        .tag(&TagOptions::id(&created.id).value("ntoll/rating", 10))
        .unwrap()
        .await
        .unwrap();

    let object = client
        .get_object(&GetObjectOptions::id(&created.id).select(["ntoll/rating", "fluiddb/about"]))
        .unwrap()
        .await
        .unwrap()
        .into_data()
        .expect("object should exist");

    assert_eq!(object.id, created.id);
    assert_eq!(object.get("ntoll/rating"), Some(&TagValue::Primitive(json!(10))));
}

#[tokio::test]
async fn get_object_ambiguity_reaches_on_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/values"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": {"id": {
                "a": {"fluiddb/about": {"value": "paris"}},
                "b": {"fluiddb/about": {"value": "paris"}}
            }}
        })))
        .mount(&mock_server)
        .await;

    let client = values_client(&mock_server.uri());
    let (tx, rx) = oneshot::channel();

    let call = client.get_object(&GetObjectOptions::about("paris")).unwrap();
    client
        .spawn(
            call,
            Callbacks::new()
                .on_success(|_| panic!("two objects share the about value"))
                .on_error(move |err| {
                    let _ = tx.send(err);
                }),
        )
        .await
        .unwrap();

    let err = rx.await.unwrap();
    assert!(matches!(err.kind, ErrorKind::NotUnique { matches: 2 }));
}

#[tokio::test]
async fn query_results_are_delivered_to_on_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/values"))
        .and(query_param("query", "has ntoll/rating > 7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": {"id": {
                "b": {"ntoll/rating": {"value": 8}},
                "a": {"ntoll/rating": {"value": 9}}
            }}
        })))
        .mount(&mock_server)
        .await;

    let client = values_client(&mock_server.uri());
    let (tx, rx) = oneshot::channel::<Vec<QueryObject>>();

    let call = client
        .query(&QueryOptions::new("has ntoll/rating > 7").select(["ntoll/rating"]))
        .unwrap();
    client
        .spawn(
            call,
            Callbacks::new().on_success(move |reply: fluidinfo::values::Reply<Vec<QueryObject>>| {
                let _ = tx.send(reply.data);
            }),
        )
        .await
        .unwrap();

    let objects = rx.await.unwrap();
    let ids: Vec<&str> = objects.iter().map(|o| o.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b"]);
}

#[test]
fn blocking_delete() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let mock_server = runtime.block_on(MockServer::start());

    runtime.block_on(
        Mock::given(method("DELETE"))
            .and(path("/values"))
            .and(query_param("tag", "ntoll/rating"))
            .and(query_param("query", "has ntoll/rating < 2"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server),
    );

    let client = FluidinfoClient::new(session_config(&mock_server.uri())).unwrap();
    let response = block_on(
        client
            .del(&DeleteOptions::new(["ntoll/rating"], "has ntoll/rating < 2"))
            .unwrap(),
    )
    .unwrap();
    assert_eq!(response.status, 204);

    runtime.block_on(mock_server.verify());
}
