//! Mock Transport
//!
//! For tests and demos. Replays canned responses and records every request.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use async_trait::async_trait;

use super::{HttpRequest, HttpResponse, HttpTransport, Method};
use crate::error::{ClientError, Result};

enum Scripted {
    Respond(HttpResponse),
    Fail(String),
}

impl Scripted {
    fn replay(&self) -> Result<HttpResponse> {
        match self {
            Self::Respond(response) => Ok(response.clone()),
            Self::Fail(reason) => Err(ClientError::Network(reason.clone())),
        }
    }
}

/// Scripted transport keyed by `(method, path)`
///
/// Responses queued for a route are consumed in order; the last one is
/// sticky and answers every later call. Unscripted routes get the API's
/// 404 body.
#[derive(Default)]
pub struct MockTransport {
    routes: RefCell<HashMap<(Method, String), VecDeque<Scripted>>>,
    requests: RefCell<Vec<HttpRequest>>,
    /// Suspend once before answering, so overlapping calls can be observed
    yield_first: bool,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transport whose calls stay pending for one poll
    pub fn with_latency() -> Self {
        Self {
            yield_first: true,
            ..Self::default()
        }
    }

    /// Queue a JSON response for a route
    #[must_use]
    pub fn respond(self, method: Method, path: &str, status: u16, body: serde_json::Value) -> Self {
        self.push(method, path, Scripted::Respond(HttpResponse::json(status, &body)));
        self
    }

    /// Queue a raw-text response (e.g. an HTML error page or empty body)
    #[must_use]
    pub fn respond_raw(self, method: Method, path: &str, status: u16, body: &str) -> Self {
        self.push(method, path, Scripted::Respond(HttpResponse::new(status, body)));
        self
    }

    /// Queue a transport-level failure
    #[must_use]
    pub fn fail(self, method: Method, path: &str, reason: &str) -> Self {
        self.push(method, path, Scripted::Fail(reason.into()));
        self
    }

    fn push(&self, method: Method, path: &str, scripted: Scripted) {
        self.routes
            .borrow_mut()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(scripted);
    }

    /// Every request seen so far, in order
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    /// Number of requests made to a route
    pub fn calls(&self, method: Method, path: &str) -> usize {
        self.requests
            .borrow()
            .iter()
            .filter(|r| r.method == method && r.path() == path)
            .count()
    }

    /// The most recent request made to a route
    pub fn last(&self, method: Method, path: &str) -> Option<HttpRequest> {
        self.requests
            .borrow()
            .iter()
            .rev()
            .find(|r| r.method == method && r.path() == path)
            .cloned()
    }

    fn answer(&self, request: &HttpRequest) -> Result<HttpResponse> {
        let mut routes = self.routes.borrow_mut();
        let key = (request.method, request.path().to_string());

        match routes.get_mut(&key) {
            Some(queue) if queue.len() > 1 => queue.pop_front().map_or_else(not_found, |s| s.replay()),
            Some(queue) => queue.front().map_or_else(not_found, Scripted::replay),
            None => not_found(),
        }
    }
}

fn not_found() -> Result<HttpResponse> {
    Ok(HttpResponse::json(404, &serde_json::json!({ "detail": "Not Found" })))
}

#[async_trait(?Send)]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        self.requests.borrow_mut().push(request.clone());

        if self.yield_first {
            YieldOnce(false).await;
        }

        self.answer(&request)
    }

    fn name(&self) -> &str {
        "MockTransport"
    }
}

/// Returns `Pending` once, waking itself so the executor polls again
struct YieldOnce(bool);

impl Future for YieldOnce {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.0 {
            Poll::Ready(())
        } else {
            self.0 = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    }
}
