//! Round-trip guarantees of the error codec.

use std::sync::Arc;

use super::common::fixtures::{CustomError, UpstreamRejected};
use dvr::codec::{
    is_plain_message, AddrError, ConnectError, DnsError, ErrorCodec, ErrorRegistry, FallbackError,
    ProtocolError, TimeoutError, UrlError,
};
use proptest::prelude::*;

fn codec() -> ErrorCodec {
    ErrorCodec::new(Arc::new(ErrorRegistry::new()))
}

fn round_trip(codec: &ErrorCodec, err: anyhow::Error) -> anyhow::Error {
    let bytes = codec.encode(Some(&err)).unwrap();
    codec.decode(&bytes).unwrap().unwrap()
}

#[test]
fn builtin_errors_keep_type_and_fields() {
    let codec = codec();

    let dns = DnsError {
        name: "db.internal".to_string(),
        server: None,
        message: "server misbehaving".to_string(),
        is_timeout: true,
        is_not_found: false,
    };
    let connect = ConnectError {
        op: "read".to_string(),
        network: "tcp".to_string(),
        addr: None,
        message: "connection reset by peer".to_string(),
        is_timeout: false,
    };
    let addr = AddrError {
        addr: "300.1.1.1".to_string(),
        message: "invalid IP address".to_string(),
    };
    let url_err = UrlError::parse("http://[::1", url::Url::parse("http://[::1").unwrap_err());
    let timeout = TimeoutError {
        op: "handshake".to_string(),
        after_ms: 10_000,
    };

    let decoded = round_trip(&codec, anyhow::Error::new(dns.clone()));
    assert_eq!(decoded.downcast_ref::<DnsError>(), Some(&dns));
    let decoded = round_trip(&codec, anyhow::Error::new(connect.clone()));
    assert_eq!(decoded.downcast_ref::<ConnectError>(), Some(&connect));
    let decoded = round_trip(&codec, anyhow::Error::new(addr.clone()));
    assert_eq!(decoded.downcast_ref::<AddrError>(), Some(&addr));
    let decoded = round_trip(&codec, anyhow::Error::new(url_err.clone()));
    assert_eq!(decoded.downcast_ref::<UrlError>(), Some(&url_err));
    let decoded = round_trip(&codec, anyhow::Error::new(timeout.clone()));
    assert_eq!(decoded.downcast_ref::<TimeoutError>(), Some(&timeout));
}

#[test]
fn application_error_registered_at_startup_round_trips() {
    let registry = ErrorRegistry::new();
    let sample = UpstreamRejected {
        service: "billing".to_string(),
        request_id: "r-77".to_string(),
        code: 3,
    };
    registry.register_sample(&sample);
    let codec = ErrorCodec::new(Arc::new(registry));

    let decoded = round_trip(&codec, anyhow::Error::new(sample.clone()));
    assert_eq!(decoded.downcast_ref::<UpstreamRejected>(), Some(&sample));
}

#[test]
fn recording_from_richer_process_is_rejected_not_misread() {
    let recording = ErrorRegistry::new();
    recording.register::<UpstreamRejected>();
    let recording = ErrorCodec::new(Arc::new(recording));

    let bytes = recording
        .encode(Some(&anyhow::Error::new(UpstreamRejected {
            service: "billing".to_string(),
            request_id: "r-1".to_string(),
            code: 1,
        })))
        .unwrap();

    assert!(codec().decode(&bytes).is_err());
}

#[test]
fn short_garbage_is_a_decode_error() {
    let codec = codec();
    assert!(codec.decode(&[0, 1, 2, 3]).is_err());
    assert!(codec.decode(&[0xff]).is_err());
}

proptest! {
    #[test]
    fn unregistered_errors_keep_their_message(message in ".*") {
        let codec = codec();
        let decoded = round_trip(&codec, anyhow::Error::new(CustomError(message.clone())));
        prop_assert!(decoded.downcast_ref::<CustomError>().is_none());
        prop_assert_eq!(
            decoded.downcast_ref::<FallbackError>().map(|e| e.message.clone()),
            Some(message)
        );
    }

    #[test]
    fn plain_messages_stay_plain(message in ".*") {
        let codec = codec();
        let decoded = round_trip(&codec, anyhow::Error::msg(message.clone()));
        prop_assert!(is_plain_message(&decoded));
        prop_assert_eq!(decoded.to_string(), message);
    }

    #[test]
    fn registered_errors_keep_their_fields(message in ".*") {
        let codec = codec();
        let original = ProtocolError::new(message);
        let decoded = round_trip(&codec, anyhow::Error::new(original.clone()));
        prop_assert_eq!(decoded.downcast_ref::<ProtocolError>(), Some(&original));
    }
}
