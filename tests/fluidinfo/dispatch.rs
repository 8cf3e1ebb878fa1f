//! Callback, blocking and concurrent dispatch through a session.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use fluidinfo::{block_on, Callbacks, ErrorKind, RequestOptions, Session};
use futures::future::join_all;
use serde_json::json;
use tokio::sync::oneshot;
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{init_tracing, session, session_config};

#[tokio::test]
async fn callbacks_receive_exactly_one_outcome() {
    init_tracing();
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/namespaces/ntoll"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "ns"})))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/namespaces/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let session = session(&mock_server.uri());

    for (target, expect_success) in [("namespaces/ntoll", true), ("namespaces/missing", false)] {
        let calls = Arc::new(AtomicU32::new(0));
        let (tx, rx) = oneshot::channel::<bool>();
        let tx = Arc::new(Mutex::new(Some(tx)));

        let (ok_calls, err_calls) = (calls.clone(), calls.clone());
        let (ok_tx, err_tx) = (tx.clone(), tx);
        let callbacks = Callbacks::new()
            .on_success(move |response: fluidinfo::ApiResponse| {
                ok_calls.fetch_add(1, Ordering::SeqCst);
                assert_eq!(response.json().unwrap()["id"], "ns");
                if let Some(tx) = ok_tx.lock().unwrap().take() {
                    let _ = tx.send(true);
                }
            })
            .on_error(move |err| {
                err_calls.fetch_add(1, Ordering::SeqCst);
                assert_eq!(err.status_code(), Some(404));
                assert!(err.response().is_some());
                if let Some(tx) = err_tx.lock().unwrap().take() {
                    let _ = tx.send(false);
                }
            });

        let call = session.get(&RequestOptions::path(target)).unwrap();
        session.spawn(call, callbacks).await.unwrap();

        assert_eq!(rx.await.unwrap(), expect_success);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}

#[tokio::test]
async fn transport_failure_reaches_on_error() {
    let session = Session::new(session_config("http://127.0.0.1:9")).unwrap();

    let (tx, rx) = oneshot::channel();
    let call = session.get(&RequestOptions::path("users/ntoll")).unwrap();
    session
        .spawn(
            call,
            Callbacks::new()
                .on_success(|_| panic!("no server is listening"))
                .on_error(move |err| {
                    let _ = tx.send(err);
                }),
        )
        .await
        .unwrap();

    let err = rx.await.unwrap();
    assert!(matches!(
        err.kind,
        ErrorKind::Connection(_) | ErrorKind::Transport(_) | ErrorKind::Timeout
    ));
}

#[tokio::test]
async fn concurrent_calls_do_not_interfere() {
    let mock_server = MockServer::start().await;

    for n in 0..10 {
        Mock::given(method("PUT"))
            .and(path(format!("/objects/obj-{n}/ntoll/rating")))
            .and(header("Content-Type", "application/vnd.fluiddb.value+json"))
            .and(body_string(n.to_string()))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    let session = session(&mock_server.uri());
    let template = RequestOptions::default();

    let calls = (0..10).map(|n| {
        let mut options = template.clone();
        options.path = format!("objects/obj-{n}/ntoll/rating").into();
        session.put(&options.json(json!(n))).unwrap()
    });

    let results = join_all(calls).await;
    assert!(results.iter().all(|r| r.as_ref().is_ok_and(|resp| resp.status == 204)));
    assert!(template.body.is_none());
}

#[test]
fn blocking_mode_returns_the_result() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let mock_server = runtime.block_on(MockServer::start());

    runtime.block_on(
        Mock::given(method("GET"))
            .and(path("/objects/abc/ntoll/rating"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw("7", "application/vnd.fluiddb.value+json"),
            )
            .mount(&mock_server),
    );
    runtime.block_on(
        Mock::given(method("GET"))
            .and(path("/objects/missing/ntoll/rating"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server),
    );

    let session = Session::new(session_config(&mock_server.uri())).unwrap();
    let response = block_on(
        session
            .get(&RequestOptions::path("objects/abc/ntoll/rating"))
            .unwrap(),
    )
    .unwrap();
    assert_eq!(response.json(), Some(&json!(7)));

    let session = Session::new(session_config(&mock_server.uri())).unwrap();
    let err = block_on(
        session
            .get(&RequestOptions::path("objects/missing/ntoll/rating"))
            .unwrap(),
    )
    .unwrap_err();
    assert_eq!(err.status_code(), Some(404));
}

#[test]
fn validation_errors_are_synchronous() {
    let session = Session::new(session_config("http://127.0.0.1:9")).unwrap();
    let err = session
        .put(&RequestOptions::path("objects/abc/ntoll/profile").json(json!({"nested": true})))
        .err()
        .unwrap();
    assert!(err.is_value_error());
}
