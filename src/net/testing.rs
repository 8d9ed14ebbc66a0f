//! Scripted transport and log capture for gateway and resolver tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::Once;

use super::gateway::{HttpRequest, HttpResponse, Transport, TransportError};

/// Replays queued responses in order and records every request it sees.
#[derive(Clone, Default)]
pub(crate) struct ScriptedTransport {
    replies: Rc<RefCell<VecDeque<Result<HttpResponse, TransportError>>>>,
    sent: Rc<RefCell<Vec<HttpRequest>>>,
}

impl ScriptedTransport {
    pub(crate) fn reply(&self, status: u16, body: serde_json::Value) -> &Self {
        let body = if body.is_null() { String::new() } else { body.to_string() };
        self.replies.borrow_mut().push_back(Ok(HttpResponse { status, body }));
        self
    }

    pub(crate) fn reply_raw(&self, status: u16, body: &str) -> &Self {
        self.replies.borrow_mut().push_back(Ok(HttpResponse { status, body: body.to_owned() }));
        self
    }

    pub(crate) fn fail(&self, message: &str) -> &Self {
        self.replies.borrow_mut().push_back(Err(TransportError(message.to_owned())));
        self
    }

    pub(crate) fn sent(&self) -> Vec<HttpRequest> {
        self.sent.borrow().clone()
    }

    pub(crate) fn sent_count(&self) -> usize {
        self.sent.borrow().len()
    }
}

impl Transport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.sent.borrow_mut().push(request);
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError("no scripted reply".to_owned())))
    }
}

pub(crate) fn identity_json(id: &str, role: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "fullName": "Ann",
        "email": "a@x.com",
        "role": role
    })
}

// =============================================================================
// LOG CAPTURE
// =============================================================================

thread_local! {
    static CAPTURED: RefCell<Vec<(log::Level, String)>> = const { RefCell::new(Vec::new()) };
}

/// Records each log line on the thread that emitted it, so parallel tests
/// only see their own output.
struct CaptureLogger;

impl log::Log for CaptureLogger {
    fn enabled(&self, _metadata: &log::Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &log::Record<'_>) {
        CAPTURED.with(|lines| lines.borrow_mut().push((record.level(), record.args().to_string())));
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;
static INSTALL: Once = Once::new();

/// Install the capturing logger (once per process) and reset this thread's
/// buffer.
pub(crate) fn capture_logs() {
    INSTALL.call_once(|| {
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(log::LevelFilter::Trace);
        }
    });
    CAPTURED.with(|lines| lines.borrow_mut().clear());
}

/// Lines at `level` captured on this thread since [`capture_logs`].
pub(crate) fn captured(level: log::Level) -> Vec<String> {
    CAPTURED.with(|lines| {
        lines
            .borrow()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, line)| line.clone())
            .collect()
    })
}
