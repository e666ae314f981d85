//! Recording an exchange and handing it back to a consumer.

use std::io::Read;
use std::panic::{catch_unwind, AssertUnwindSafe};

use super::common::fixtures::{full_request, full_response, CustomError};
use dvr::codec::{ConnectError, FallbackError, FallbackMessage};
use dvr::transport::Request;
use dvr::{Config, Interaction, QuerySnapshot, Recorder, ReplayFailure, RequestSnapshot};

#[derive(Debug, thiserror::Error)]
#[error("upstream handshake failed")]
struct HandshakeFailed(#[source] std::io::Error);

#[test]
fn consumer_reads_recorded_body_then_recorded_error() {
    let recorder = Recorder::default();
    let mut interaction =
        Interaction::completed(full_request(), full_response(), b"{\"items\":[1,".to_vec());
    interaction.response_body_error = Some(anyhow::Error::new(CustomError(
        "stream closed mid-body".to_string(),
    )));

    let mut replayed = recorder.replay(&recorder.record(&interaction).unwrap()).unwrap();
    let mut body = replayed.take_response_body();

    let mut out = Vec::new();
    let err = body.read_to_end(&mut out).unwrap_err();
    assert_eq!(out, b"{\"items\":[1,");
    assert_eq!(err.to_string(), "stream closed mid-body");
}

#[test]
fn transport_failure_replays_as_error_without_response() {
    let recorder = Recorder::default();
    let request = Request::new("GET", url::Url::parse("http://10.0.0.1:81/").unwrap());
    let io_err = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
    let interaction = Interaction::failed(
        request.clone(),
        anyhow::Error::new(ConnectError::from_io("dial", Some("10.0.0.1:81".to_string()), &io_err)),
    );

    let replayed = recorder.replay(&recorder.record(&interaction).unwrap()).unwrap();
    assert_eq!(replayed.request, Some(request));
    assert!(replayed.response.is_none());
    let err = replayed.error.unwrap();
    let connect = err.downcast_ref::<ConnectError>().unwrap();
    assert_eq!(connect.op, "dial");
    assert!(!connect.is_timeout);
}

#[test]
fn unregistered_error_with_source_replays_its_own_message() {
    let recorder = Recorder::default();
    let err = anyhow::Error::new(HandshakeFailed(std::io::Error::other("peer hung up")));
    let message = err.to_string();
    let interaction = Interaction::failed(full_request(), err);

    let replayed = recorder.replay(&recorder.record(&interaction).unwrap()).unwrap();
    let err = replayed.error.unwrap();
    assert_eq!(err.to_string(), message);
    assert_eq!(
        err.downcast_ref::<FallbackError>(),
        Some(&FallbackError::new("upstream handshake failed"))
    );
}

#[test]
fn context_added_by_the_transport_is_kept_as_text_when_chained() {
    let recorder = Recorder::new(&Config::default().with_fallback_message(FallbackMessage::Chain));
    let err = anyhow::Error::new(CustomError("tls: bad certificate".to_string()))
        .context("connecting to api.example.com");
    let interaction = Interaction::failed(full_request(), err);

    let replayed = recorder.replay(&recorder.record(&interaction).unwrap()).unwrap();
    assert_eq!(
        replayed.error.unwrap().downcast_ref::<FallbackError>(),
        Some(&FallbackError::new(
            "connecting to api.example.com: tls: bad certificate"
        ))
    );
}

#[test]
fn absent_parts_stay_absent() {
    let recorder = Recorder::default();
    let replayed = recorder
        .replay(&recorder.record(&Interaction::default()).unwrap())
        .unwrap();
    assert!(replayed.request.is_none());
    assert!(replayed.response.is_none());
    assert!(replayed.error.is_none());
    assert!(replayed.request_body_error.is_none());
}

#[test]
fn unparseable_request_url_aborts_replay() {
    let recorder = Recorder::default();
    let mut snapshot = recorder
        .snapshot(&Interaction::completed(
            full_request(),
            full_response(),
            Vec::new(),
        ))
        .unwrap();
    if let Some(request) = snapshot.request.as_mut() {
        request.url = "://".to_string();
    }
    let bytes = snapshot.to_bytes().unwrap();

    let payload = catch_unwind(AssertUnwindSafe(|| recorder.replay(&bytes).map(|_| ())))
        .unwrap_err();
    let failure = payload.downcast_ref::<ReplayFailure>().unwrap();
    assert_eq!(failure.value, "://");
}

#[test]
fn bare_request_snapshot_with_invalid_url_aborts() {
    let snapshot = QuerySnapshot {
        request: Some(RequestSnapshot {
            url: "://".to_string(),
            ..RequestSnapshot::capture(
                Some(&full_request()),
                b"",
                None,
                Recorder::default().codec(),
            )
            .unwrap()
            .unwrap()
        }),
        response: None,
        error: Default::default(),
    };

    let recorder = Recorder::default();
    let result = catch_unwind(AssertUnwindSafe(|| {
        snapshot.reconstruct(recorder.codec()).map(|_| ())
    }));
    assert!(result.is_err());
}
