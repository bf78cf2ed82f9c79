//! Request logging middleware
//!
//! Framework-agnostic three-argument handler: the middleware logs one
//! info-level line per inbound request, then hands control to the next
//! handler. It reads nothing but the request method and URL; bodies,
//! headers, and response data are deliberately out of scope.

use crate::core::Logger;
use std::sync::Arc;

/// The two request fields the middleware reads.
///
/// Implement this for whatever request type the host pipeline uses.
pub trait HttpRequest {
    fn method(&self) -> &str;
    fn url(&self) -> &str;
}

/// Middleware wrapping a shared logger.
pub struct RequestLogger {
    logger: Arc<Logger>,
}

impl RequestLogger {
    #[must_use]
    pub fn new(logger: Arc<Logger>) -> Self {
        Self { logger }
    }

    /// Log the inbound request, then invoke `next` exactly once.
    ///
    /// `next` is called synchronously and unconditionally, whether or not
    /// the log write succeeded; the middleware never short-circuits the
    /// pipeline.
    pub fn handle<Req, Res, F>(&self, req: &Req, res: &mut Res, next: F)
    where
        Req: HttpRequest,
        F: FnOnce(&Req, &mut Res),
    {
        self.logger
            .info(format!("Incoming request: {} {}", req.method(), req.url()));
        next(req, res);
    }
}

/// Factory returning a `(request, response, next)` handler bound to `logger`.
pub fn request_logger<Req, Res>(
    logger: Arc<Logger>,
) -> impl Fn(&Req, &mut Res, &mut dyn FnMut(&Req, &mut Res))
where
    Req: HttpRequest,
{
    let middleware = RequestLogger::new(logger);
    move |req, res, next| middleware.handle(req, res, |req, res| next(req, res))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestRequest {
        method: &'static str,
        url: &'static str,
    }

    impl HttpRequest for TestRequest {
        fn method(&self) -> &str {
            self.method
        }

        fn url(&self) -> &str {
            self.url
        }
    }

    #[test]
    fn test_next_called_exactly_once() {
        let logger = Arc::new(Logger::new());
        let middleware = RequestLogger::new(logger);

        let req = TestRequest {
            method: "GET",
            url: "/test",
        };
        let mut calls = 0usize;
        middleware.handle(&req, &mut (), |_, _| calls += 1);

        assert_eq!(calls, 1);
    }

    #[test]
    fn test_factory_surface() {
        let logger = Arc::new(Logger::new());
        let handler = request_logger::<TestRequest, Vec<&'static str>>(logger);

        let req = TestRequest {
            method: "POST",
            url: "/submit",
        };
        let mut res = Vec::new();
        let mut next = |_req: &TestRequest, res: &mut Vec<&'static str>| res.push("handled");
        handler(&req, &mut res, &mut next);

        assert_eq!(res, vec!["handled"]);
    }
}
