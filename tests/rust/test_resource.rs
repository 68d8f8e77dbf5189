use super::*;
use std::cell::Cell;

use futures::executor::block_on;
use pretty_assertions::assert_eq;

/// Serves canned responses and counts fetches.
struct MapFetcher {
    responses: HashMap<String, Result<FetchResponse, TransportError>>,
    calls: Rc<Cell<usize>>,
}

impl MapFetcher {
    fn new(entries: Vec<(&str, Result<FetchResponse, TransportError>)>) -> (Self, Rc<Cell<usize>>) {
        let calls = Rc::new(Cell::new(0));
        let fetcher = Self {
            responses: entries
                .into_iter()
                .map(|(uri, response)| (uri.to_string(), response))
                .collect(),
            calls: Rc::clone(&calls),
        };
        (fetcher, calls)
    }
}

#[async_trait(?Send)]
impl Fetcher for MapFetcher {
    async fn fetch(&self, uri: &str) -> Result<FetchResponse, TransportError> {
        self.calls.set(self.calls.get() + 1);
        self.responses.get(uri).cloned().unwrap_or_else(|| {
            Err(TransportError {
                message: format!("no route to {uri}"),
            })
        })
    }
}

const URI: &str = "https://example.org/graph/ce-1";

#[test]
fn test_get_parses_json() {
    let (fetcher, calls) = MapFetcher::new(vec![(URI, Ok(FetchResponse::ok(r#"{"@id": "x"}"#)))]);
    let cache = ResourceCache::new(fetcher);
    let value = block_on(cache.get(URI)).expect("loads");
    assert_eq!(value["@id"], "x");
    assert_eq!(calls.get(), 1);
    assert!(cache.contains(URI));
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_repeated_get_fetches_once() {
    let (fetcher, calls) = MapFetcher::new(vec![(URI, Ok(FetchResponse::ok("{}")))]);
    let cache = ResourceCache::new(fetcher);
    block_on(cache.get(URI)).expect("first");
    block_on(cache.get(URI)).expect("second");
    assert_eq!(calls.get(), 1);
}

#[test]
fn test_concurrent_gets_share_one_fetch() {
    let (fetcher, calls) = MapFetcher::new(vec![(URI, Ok(FetchResponse::ok(r#"{"n": 1}"#)))]);
    let cache = ResourceCache::new(fetcher);
    let first = cache.get(URI);
    let second = cache.clone().get(URI);
    let (a, b) = block_on(async { futures::join!(first, second) });
    let (a, b) = (a.expect("a"), b.expect("b"));
    assert!(Rc::ptr_eq(&a, &b));
    assert_eq!(calls.get(), 1);
}

#[test]
fn test_failures_are_cached_too() {
    let (fetcher, calls) = MapFetcher::new(vec![]);
    let cache = ResourceCache::new(fetcher);
    assert!(block_on(cache.get(URI)).is_err());
    assert!(block_on(cache.get(URI)).is_err());
    assert_eq!(calls.get(), 1);
}

#[test]
fn test_transport_error_is_fetch_error() {
    let (fetcher, _) = MapFetcher::new(vec![]);
    let cache = ResourceCache::new(fetcher);
    let err = block_on(cache.get(URI)).unwrap_err();
    assert!(matches!(err, ResourceError::Fetch { .. }));
    assert_eq!(
        err.main_error(),
        format!("Error loading data for Resource URI: {URI}")
    );
    assert_eq!(err.raw_error()["message"], format!("no route to {URI}"));
}

#[test]
fn test_invalid_json_is_parse_error() {
    let (fetcher, _) = MapFetcher::new(vec![(URI, Ok(FetchResponse::ok("<html>")))]);
    let cache = ResourceCache::new(fetcher);
    let err = block_on(cache.get(URI)).unwrap_err();
    assert!(matches!(err, ResourceError::Parse { .. }));
    assert_eq!(err.raw_error()["RawData"], "<html>");
}

#[test]
fn test_registry_error_field() {
    let (fetcher, _) = MapFetcher::new(vec![(
        URI,
        Ok(FetchResponse::ok(r#"{"errors": ["not found", "try again"]}"#)),
    )]);
    let cache = ResourceCache::new(fetcher);
    let err = block_on(cache.get(URI)).unwrap_err();
    assert!(matches!(err, ResourceError::Registry { .. }));
    assert_eq!(
        err.messages(),
        vec![
            format!("One or more errors encountered for Resource URI: {URI}"),
            "not found".to_string(),
            "try again".to_string(),
        ]
    );
}

#[test]
fn test_null_error_field_falls_through_to_errors() {
    let (fetcher, _) = MapFetcher::new(vec![(
        URI,
        Ok(FetchResponse::ok(r#"{"error": null, "errors": ["boom"]}"#)),
    )]);
    let cache = ResourceCache::new(fetcher);
    let err = block_on(cache.get(URI)).unwrap_err();
    assert!(matches!(err, ResourceError::Registry { .. }));
    assert_eq!(err.error_list().to_vec(), vec!["boom".to_string()]);
}

#[test]
fn test_blank_error_field_is_ignored() {
    let (fetcher, _) = MapFetcher::new(vec![(URI, Ok(FetchResponse::ok(r#"{"error": ""}"#)))]);
    let cache = ResourceCache::new(fetcher);
    assert!(block_on(cache.get(URI)).is_ok());
}

#[test]
fn test_non_ok_response_classification() {
    let non_json = FetchResponse {
        body: "Bad Gateway".into(),
        ok: false,
    };
    let plain_json = FetchResponse {
        body: r#"{"status": 500}"#.into(),
        ok: false,
    };
    let (fetcher, _) = MapFetcher::new(vec![
        ("https://example.org/a", Ok(non_json)),
        ("https://example.org/b", Ok(plain_json)),
    ]);
    let cache = ResourceCache::new(fetcher);
    let a = block_on(cache.get("https://example.org/a")).unwrap_err();
    let b = block_on(cache.get("https://example.org/b")).unwrap_err();
    assert!(matches!(a, ResourceError::Fetch { .. }));
    assert!(matches!(b, ResourceError::Fetch { .. }));
    assert_eq!(b.raw_error()["status"], 500);
}

#[test]
fn test_graph_uri() {
    assert_eq!(
        graph_uri("https://credentialengineregistry.org/resources/ce-123"),
        "https://credentialengineregistry.org/graph/ce-123"
    );
    assert_eq!(graph_uri("https://example.org/other/ce-1"), "https://example.org/other/ce-1");
}
