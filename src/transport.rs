use async_trait::async_trait;

use reqwest::Client;

use crate::{
    currency::Currency,
    error::TransportError,
    period::DateRange,
    rate_point::format_date,
};



/// Form payload sent to the charting endpoint for one series.
///
/// `currency` - always sent as the lowercase code.
/// `stdate`/`endate` - window bounds as `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateRequest {
    pub currency: String,
    pub stdate: String,
    pub endate: String,
}



impl RateRequest {
    pub fn new(currency: Currency, range: &DateRange) -> Self {
        Self {
            currency: currency.code().to_lowercase(),
            stdate: format_date(range.start),
            endate: format_date(range.end),
        }
    }


    pub fn form(&self) -> [(&'static str, &str); 3] {
        [
            ("currency", self.currency.as_str()),
            ("stdate", self.stdate.as_str()),
            ("endate", self.endate.as_str()),
        ]
    }
}



#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}



impl HttpResponse {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}



/// Anything that can deliver a chart page for a request.
///
/// The collector only talks to the network through this trait, which keeps
/// it runnable against canned responses.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post_form(&self, url: &str, request: &RateRequest)
        -> Result<HttpResponse, TransportError>;
}



/// Transport backed by a shared reqwest client.
pub struct ReqwestTransport {
    client: Client,
}



impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}



#[async_trait]
impl Transport for ReqwestTransport {
    async fn post_form(&self, url: &str, request: &RateRequest)
        -> Result<HttpResponse, TransportError>
    {
        let response = self.client.post(url)
            .form(&request.form())
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let status = response.status().as_u16();

        // Body of an error page is read too, it is only logged as status.
        let body = response.text()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))?;

        Ok(HttpResponse {
            status, body,
        })
    }
}
