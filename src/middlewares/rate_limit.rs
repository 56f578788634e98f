//! 登录类端点的限流中间件
//!
//! 固定窗口计数：每个 `{scope}:{client_ip}` 在窗口内最多放行 `max_requests` 次，
//! 超出后返回 429 并带上 `Retry-After`。计数存放在进程内的 moka 缓存中，
//! 多实例部署时各实例分别计数。

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    http::header::{CONTENT_TYPE, HeaderName, HeaderValue, RETRY_AFTER},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use moka::future::Cache;
use once_cell::sync::Lazy;
use std::rc::Rc;
use std::time::{Duration, Instant};
use tracing::warn;

use crate::models::{ApiResponse, ErrorCode};

// 条目最长保留时间，需不短于最长的窗口
const MAX_WINDOW: Duration = Duration::from_secs(3600);

static WINDOWS: Lazy<Cache<String, Window>> = Lazy::new(|| {
    Cache::builder()
        .time_to_live(MAX_WINDOW)
        .max_capacity(100_000)
        .build()
});

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

#[derive(Debug, PartialEq, Eq)]
enum Verdict {
    Allowed { remaining: u32 },
    Throttled { retry_after: u64 },
}

#[derive(Clone)]
pub struct RateLimit {
    max_requests: u32,
    window: Duration,
    scope: String,
}

impl RateLimit {
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window: Duration::from_secs(window_secs).min(MAX_WINDOW),
            scope: "default".to_string(),
        }
    }

    /// 不同端点使用不同的 scope 各自计数
    pub fn with_prefix(mut self, scope: &str) -> Self {
        self.scope = scope.to_string();
        self
    }

    /// POST /api/token/：5 次/分钟
    pub fn login() -> Self {
        Self::new(5, 60).with_prefix("login")
    }

    /// POST /users/：3 次/分钟
    pub fn register() -> Self {
        Self::new(3, 60).with_prefix("register")
    }

    pub fn refresh_token() -> Self {
        Self::new(10, 60).with_prefix("refresh")
    }

    pub fn oauth_token() -> Self {
        Self::new(10, 60).with_prefix("oauth")
    }

    fn key_for(&self, client: &str) -> String {
        format!("{}:{}", self.scope, client)
    }

    // 在 now 时刻记一次请求，返回是否放行
    fn advance(&self, previous: Option<Window>, now: Instant) -> (Window, Verdict) {
        let window = match previous {
            Some(w) if now.duration_since(w.started) < self.window => w,
            _ => Window {
                started: now,
                count: 0,
            },
        };

        if window.count >= self.max_requests {
            let elapsed = now.duration_since(window.started);
            let retry_after = self.window.saturating_sub(elapsed).as_secs().max(1);
            return (window, Verdict::Throttled { retry_after });
        }

        let next = Window {
            count: window.count + 1,
            ..window
        };
        let remaining = self.max_requests - next.count;
        (next, Verdict::Allowed { remaining })
    }
}

/// 客户端 IP，优先取 Forwarded / X-Forwarded-For，其次为连接地址
fn client_ip(req: &ServiceRequest) -> String {
    req.connection_info()
        .realip_remote_addr()
        .map(|addr| {
            addr.parse::<std::net::SocketAddr>()
                .map(|socket| socket.ip().to_string())
                .unwrap_or_else(|_| addr.to_string())
        })
        .unwrap_or_else(|| "unknown".to_string())
}

fn throttled_response(retry_after: u64) -> HttpResponse {
    HttpResponse::build(StatusCode::TOO_MANY_REQUESTS)
        .insert_header((CONTENT_TYPE, "application/json; charset=utf-8"))
        .insert_header((RETRY_AFTER, retry_after.to_string()))
        .json(ApiResponse::<()>::error_empty(
            ErrorCode::RateLimitExceeded,
            "Request was throttled. Please try again later.",
        ))
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service: Rc::new(service),
            policy: Rc::new(self.clone()),
        }))
    }
}

pub struct RateLimitMiddleware<S> {
    service: Rc<S>,
    policy: Rc<RateLimit>,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let policy = self.policy.clone();

        Box::pin(async move {
            let key = policy.key_for(&client_ip(&req));
            let (window, verdict) = policy.advance(WINDOWS.get(&key).await, Instant::now());
            WINDOWS.insert(key.clone(), window).await;

            let remaining = match verdict {
                Verdict::Allowed { remaining } => remaining,
                Verdict::Throttled { retry_after } => {
                    warn!("Rate limit exceeded for {} ({} requests)", key, window.count);
                    return Ok(req.into_response(throttled_response(retry_after).map_into_right_body()));
                }
            };

            let mut res = srv.call(req).await?;
            let headers = res.headers_mut();
            headers.insert(
                HeaderName::from_static("x-ratelimit-limit"),
                HeaderValue::from(policy.max_requests),
            );
            headers.insert(
                HeaderName::from_static("x-ratelimit-remaining"),
                HeaderValue::from(remaining),
            );
            Ok(res.map_into_left_body())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_presets() {
        let login = RateLimit::login();
        assert_eq!(login.max_requests, 5);
        assert_eq!(login.window, Duration::from_secs(60));
        assert_eq!(login.key_for("1.2.3.4"), "login:1.2.3.4");

        assert_eq!(RateLimit::register().max_requests, 3);
        assert_eq!(RateLimit::oauth_token().scope, "oauth");
    }

    #[test]
    fn test_window_resets_after_expiry() {
        let policy = RateLimit::new(2, 60);
        let start = Instant::now();

        let (w, v) = policy.advance(None, start);
        assert_eq!(v, Verdict::Allowed { remaining: 1 });
        let (w, v) = policy.advance(Some(w), start + Duration::from_secs(1));
        assert_eq!(v, Verdict::Allowed { remaining: 0 });
        let (w, v) = policy.advance(Some(w), start + Duration::from_secs(50));
        assert_eq!(v, Verdict::Throttled { retry_after: 10 });

        let (_, v) = policy.advance(Some(w), start + Duration::from_secs(61));
        assert_eq!(v, Verdict::Allowed { remaining: 1 });
    }

    #[actix_web::test]
    async fn test_requests_over_limit_are_rejected() {
        use actix_web::{App, test, web};

        let app = test::init_service(
            App::new().service(
                web::resource("/limited")
                    .wrap(RateLimit::new(2, 60).with_prefix("test-limited"))
                    .route(web::get().to(|| async { HttpResponse::Ok().finish() })),
            ),
        )
        .await;

        for _ in 0..2 {
            let req = test::TestRequest::get()
                .uri("/limited")
                .peer_addr("10.1.2.3:4000".parse().unwrap())
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert!(resp.status().is_success());
            assert!(resp.headers().contains_key("x-ratelimit-remaining"));
        }

        let req = test::TestRequest::get()
            .uri("/limited")
            .peer_addr("10.1.2.3:4000".parse().unwrap())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
        assert!(resp.headers().contains_key(RETRY_AFTER));

        // 其他客户端不受影响
        let req = test::TestRequest::get()
            .uri("/limited")
            .peer_addr("10.1.2.4:4000".parse().unwrap())
            .to_request();
        assert!(test::call_service(&app, req).await.status().is_success());
    }
}
