//! Bounded retry of chart page requests.



use std::time::Duration;

use tokio::time::sleep;
use tracing::warn;

use crate::{
    error::{
        AttemptFailure,
        FetchError,
    },
    transport::{
        RateRequest,
        Transport,
    },
};



/// Fixed-delay retry policy.
///
/// `attempts` - total number of requests made, including the first one.
/// `delay` - pause between two consecutive attempts. There is no pause after
/// the last attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub delay: Duration,
}



impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 2,
            delay: Duration::from_secs(5),
        }
    }
}



/// Post `request` until the endpoint answers with status 200 or the policy
/// runs out of attempts. Returns the body of the successful response.
///
/// Non-200 statuses and transport errors are treated alike.
pub async fn fetch_with_retry(transport: &(impl Transport + ?Sized), url: &str,
    request: &RateRequest, policy: &RetryPolicy
)
    -> Result<String, FetchError>
{
    let attempts = policy.attempts.max(1);
    let mut attempt = 1;

    loop {
        let failure = match transport.post_form(url, request).await {
            Ok(response) if response.is_ok() => return Ok(response.body),
            Ok(response) => AttemptFailure::Status(response.status),
            Err(e) => AttemptFailure::Transport(e),
        };

        warn!(attempt, attempts, currency = %request.currency, "attempt failed: {}", failure);

        if attempt >= attempts {
            return Err(FetchError::Exhausted { attempts, last: failure })
        }

        sleep(policy.delay).await;
        attempt += 1;
    }
}



#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        error::TransportError,
        transport::scripted::{
            status,
            ScriptedTransport as Scripted,
        },
    };

    fn request() -> RateRequest {
        RateRequest {
            currency: "usd".to_string(),
            stdate: "2024-01-01".to_string(),
            endate: "2024-01-08".to_string(),
        }
    }

    fn no_delay(attempts: u32) -> RetryPolicy {
        RetryPolicy { attempts, delay: Duration::ZERO }
    }


    #[tokio::test]
    async fn test_first_attempt_succeeds() {
        let transport = Scripted::new(vec![status(200, "page")]);

        let body = fetch_with_retry(&transport, "u", &request(), &no_delay(2)).await;

        assert_eq!(body, Ok("page".to_string()));
        assert_eq!(transport.calls(), 1);
    }


    #[tokio::test]
    async fn test_success_on_last_attempt() {
        let transport = Scripted::new(vec![status(503, ""), status(200, "page")]);

        let body = fetch_with_retry(&transport, "u", &request(), &no_delay(2)).await;

        assert_eq!(body, Ok("page".to_string()));
        assert_eq!(transport.calls(), 2);
    }


    #[tokio::test]
    async fn test_exhausted_budget() {
        let transport = Scripted::new(vec![status(500, ""), status(502, ""), status(200, "late")]);

        let err = fetch_with_retry(&transport, "u", &request(), &no_delay(2)).await
            .unwrap_err();

        assert_eq!(err, FetchError::Exhausted {
            attempts: 2,
            last: AttemptFailure::Status(502),
        });
        assert_eq!(transport.calls(), 2);
    }


    #[tokio::test]
    async fn test_transport_errors_are_retried() {
        let transport = Scripted::new(vec![
            Err(TransportError::Request("connection refused".to_string())),
            status(200, "page"),
        ]);

        let body = fetch_with_retry(&transport, "u", &request(), &no_delay(2)).await;

        assert_eq!(body, Ok("page".to_string()));
    }


    #[tokio::test]
    async fn test_only_status_200_counts() {
        let transport = Scripted::new(vec![status(204, ""), status(301, "")]);

        let err = fetch_with_retry(&transport, "u", &request(), &no_delay(2)).await;

        assert!(err.is_err());
    }


    #[tokio::test(start_paused = true)]
    async fn test_waits_between_attempts_only() {
        let transport = Scripted::new(vec![status(500, ""), status(500, ""), status(500, "")]);
        let policy = RetryPolicy { attempts: 3, delay: Duration::from_secs(5) };

        let started = tokio::time::Instant::now();
        let _ = fetch_with_retry(&transport, "u", &request(), &policy).await;

        assert_eq!(started.elapsed(), Duration::from_secs(10));
    }
}
