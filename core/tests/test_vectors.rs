//! Verify accessor requests and response handling against JSON test vectors
//! stored in `test-vectors/`.
//!
//! Each vector names an accessor operation and its arguments, the request the
//! client must send, a simulated response, and either the expected result or
//! the expected error. Comparing parsed JSON (not raw strings) avoids false
//! negatives from field-ordering differences.

use std::sync::{Arc, Mutex};

use megaphone_client::{
    ClientConfig, ConnectionError, HttpMethod, HttpRequest, HttpResponse, Megaphone, Transport,
    TransportError,
};
use serde_json::Value;

/// Replays one simulated response and keeps every request it receives.
struct VectorTransport {
    response: HttpResponse,
    requests: Mutex<Vec<HttpRequest>>,
}

impl Transport for VectorTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(self.response.clone())
    }
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "PATCH" => HttpMethod::Patch,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn arg<'a>(args: &'a Value, name: &str) -> &'a str {
    args[name]
        .as_str()
        .unwrap_or_else(|| panic!("missing string arg {name}"))
}

/// Runs the named accessor operation, flattening lists into a JSON array.
fn run(megaphone: &Megaphone, operation: &str, args: &Value) -> Result<Value, ConnectionError> {
    let params: Vec<(String, String)> = args
        .get("params")
        .map(|p| serde_json::from_value(p.clone()).unwrap())
        .unwrap_or_default();
    let params: Vec<(&str, &str)> = params.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
    let attributes = &args["attributes"];
    let list = |records: Vec<megaphone_client::Record>| {
        Value::Array(records.into_iter().map(Value::from).collect())
    };

    let result = match operation {
        "podcasts.list" => megaphone.podcasts().list_with(&params).map(list)?,
        "podcasts.create" => megaphone.podcasts().create(attributes)?.into_value(),
        "podcast.find" => megaphone.podcast(arg(args, "podcast_id")).find()?.into_value(),
        "podcast.update" => megaphone
            .podcast(arg(args, "podcast_id"))
            .update(attributes)?
            .into_value(),
        "podcast.delete" => megaphone.podcast(arg(args, "podcast_id")).delete()?.into_value(),
        "episodes.list" => megaphone
            .podcast(arg(args, "podcast_id"))
            .episodes()
            .list_with(&params)
            .map(list)?,
        "episodes.create" => megaphone
            .podcast(arg(args, "podcast_id"))
            .episodes()
            .create(attributes)?
            .into_value(),
        "episode.find" => megaphone
            .podcast(arg(args, "podcast_id"))
            .episode(arg(args, "episode_id"))
            .find()?
            .into_value(),
        "episode.update" => megaphone
            .podcast(arg(args, "podcast_id"))
            .episode(arg(args, "episode_id"))
            .update(attributes)?
            .into_value(),
        "episode.delete" => megaphone
            .podcast(arg(args, "podcast_id"))
            .episode(arg(args, "episode_id"))
            .delete()?
            .into_value(),
        "organization.search" => megaphone.episodes().search(&params).map(list)?,
        other => panic!("unknown operation: {other}"),
    };
    Ok(result)
}

fn run_vectors(raw: &str) {
    let vectors: Value = serde_json::from_str(raw).unwrap();
    let config: ClientConfig = serde_json::from_value(vectors["config"].clone()).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let sim = &case["simulated_response"];
        let transport = Arc::new(VectorTransport {
            response: HttpResponse {
                status: sim["status"].as_u64().unwrap() as u16,
                headers: Vec::new(),
                body: sim["body"].as_str().unwrap().to_string(),
            },
            requests: Mutex::new(Vec::new()),
        });
        let megaphone = Megaphone::with_transport(config.clone(), transport.clone());

        let result = run(&megaphone, case["operation"].as_str().unwrap(), &case["args"]);

        // Verify request
        let requests = transport.requests.lock().unwrap().clone();
        assert_eq!(requests.len(), 1, "{name}: exactly one request");
        let req = &requests[0];
        let expected_req = &case["expected_request"];
        assert_eq!(req.method, parse_method(expected_req["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(req.url, expected_req["url"].as_str().unwrap(), "{name}: url");

        let expected_headers: Vec<(String, String)> =
            serde_json::from_value(expected_req["headers"].clone()).unwrap();
        assert_eq!(req.headers, expected_headers, "{name}: headers");

        let req_body: Value = req
            .body
            .as_deref()
            .map(|body| serde_json::from_str(body).unwrap())
            .unwrap_or(Value::Null);
        assert_eq!(req_body, expected_req["body"], "{name}: body");

        // Verify result
        match case.get("expected_error") {
            Some(expected) => {
                let err = result.expect_err(name);
                assert_eq!(err.status().map(u64::from), expected["status"].as_u64(), "{name}: status");
                let message = err.to_string();
                for needle in expected["contains"].as_array().unwrap() {
                    let needle = needle.as_str().unwrap();
                    assert!(message.contains(needle), "{name}: {message:?} lacks {needle:?}");
                }
            }
            None => {
                let value = result.unwrap_or_else(|e| panic!("{name}: {e}"));
                assert_eq!(value, case["expected_result"], "{name}: parsed result");
            }
        }
    }
}

#[test]
fn podcast_test_vectors() {
    run_vectors(include_str!("../../test-vectors/podcasts.json"));
}

#[test]
fn episode_test_vectors() {
    run_vectors(include_str!("../../test-vectors/episodes.json"));
}
