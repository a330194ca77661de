use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

use stockpulse_core::{
    FailureKind, FetchCause, FixedClock, HttpClient, HttpError, HttpRequest, HttpResponse,
    PriceHistorySource, PriceQuery, PriceService, ProviderConfig, QualifiedSymbol, SeriesSummary,
    YahooChartAdapter,
};
use time::macros::date;

/// Transport double serving one canned response and recording requested URLs.
struct CannedTransport {
    response: Result<HttpResponse, HttpError>,
    urls: Mutex<Vec<String>>,
}

impl CannedTransport {
    fn new(response: Result<HttpResponse, HttpError>) -> Arc<Self> {
        Arc::new(Self {
            response,
            urls: Mutex::new(Vec::new()),
        })
    }

    fn urls(&self) -> Vec<String> {
        self.urls.lock().expect("url log should not be poisoned").clone()
    }
}

impl HttpClient for CannedTransport {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        self.urls
            .lock()
            .expect("url log should not be poisoned")
            .push(request.url);
        let response = self.response.clone();
        Box::pin(async move { response })
    }
}

// Three KOSDAQ sessions, 2024-05-02..=2024-05-07 with the 05-06 holiday missing.
const KAKAO_CHART: &str = r#"{
  "chart": {
    "result": [{
      "meta": {"currency": "KRW", "symbol": "035720.KQ", "exchangeName": "KOE", "gmtoffset": 32400, "timezone": "KST"},
      "timestamp": [1714608000, 1714694400, 1715040000],
      "indicators": {
        "quote": [{
          "open": [48000.0, 47650.0, 47000.0],
          "high": [48200.0, 48000.0, 47500.0],
          "low": [47300.0, 47000.0, 46100.0],
          "close": [47650.0, 47150.0, 46300.0],
          "volume": [1200345, 980112, 1633001]
        }],
        "adjclose": [{"adjclose": [47650.0, 47150.0, 46300.0]}]
      }
    }],
    "error": null
  }
}"#;

fn service(transport: Arc<CannedTransport>) -> PriceService {
    let config = ProviderConfig::default()
        .with_base_url("https://chart.example.test")
        .expect("valid base url");
    let adapter = YahooChartAdapter::new(transport, &config);
    PriceService::new(Arc::new(adapter), Arc::new(FixedClock(date!(2024 - 05 - 08))))
}

#[test]
fn adapter_reports_its_provider_id() {
    let adapter = YahooChartAdapter::new(
        CannedTransport::new(Ok(HttpResponse::ok_json(KAKAO_CHART))),
        &ProviderConfig::default(),
    );
    assert_eq!(adapter.id(), "yahoo");
}

#[test]
fn chart_payload_flows_through_to_summary() {
    let transport = CannedTransport::new(Ok(HttpResponse::ok_json(KAKAO_CHART)));
    let query = PriceQuery::new("035720.KQ", 30).expect("valid query");

    let outcome = block_on(service(transport.clone()).run(&query)).expect("valid lookback");

    let series = outcome.series().expect("chart should parse");
    let dates: Vec<_> = series.records().iter().map(|r| r.date).collect();
    assert_eq!(
        dates,
        vec![date!(2024 - 05 - 02), date!(2024 - 05 - 03), date!(2024 - 05 - 07)]
    );
    let changes: Vec<_> = series.records().iter().map(|r| r.change_pct).collect();
    assert_eq!(changes, vec![None, Some(-1.05), Some(-1.8)]);

    let summary = SeriesSummary::from_series(series).expect("non-empty");
    assert_eq!(summary.latest_close, 46_300.0);
    assert_eq!(summary.max_close, 47_650.0);
    assert_eq!(summary.min_close, 46_300.0);

    let urls = transport.urls();
    assert_eq!(urls.len(), 1);
    assert!(urls[0].contains("/v8/finance/chart/035720.KQ?"), "url: {}", urls[0]);
    assert!(urls[0].contains("interval=1d"));
}

// Same sessions after a dividend: the first adjusted close sits below the raw close.
const KAKAO_ADJUSTED_CHART: &str = r#"{
  "chart": {
    "result": [{
      "meta": {"symbol": "035720.KQ", "gmtoffset": 32400},
      "timestamp": [1714608000, 1714694400, 1715040000],
      "indicators": {
        "quote": [{
          "close": [47650.0, 47150.0, 46300.0],
          "volume": [1200345, 980112, 1633001]
        }],
        "adjclose": [{"adjclose": [46600.0, 47150.0, 46300.0]}]
      }
    }],
    "error": null
  }
}"#;

#[test]
fn adjusted_closes_drive_the_change_column() {
    let transport = CannedTransport::new(Ok(HttpResponse::ok_json(KAKAO_ADJUSTED_CHART)));
    let query = PriceQuery::new("035720.KQ", 30).expect("valid query");

    let outcome = block_on(service(transport).run(&query)).expect("valid lookback");

    let series = outcome.series().expect("chart should parse");
    let closes: Vec<_> = series.closes().collect();
    assert_eq!(closes, vec![46_600.0, 47_150.0, 46_300.0]);
    // 47150 / 46600 - 1 = 1.1802...%
    assert_eq!(series.records()[1].change_pct, Some(1.18));
}

#[test]
fn zero_lookback_is_data_unavailable_without_a_request() {
    let transport = CannedTransport::new(Ok(HttpResponse::ok_json(KAKAO_CHART)));
    let query = PriceQuery::new("035720.KQ", 0).expect("valid query");

    let outcome = block_on(service(transport.clone()).run(&query)).expect("valid lookback");

    let failure = outcome.failure().expect("empty window has no rows");
    assert_eq!(failure.kind, FailureKind::DataUnavailable);
    assert!(failure.message.contains("up to 2024-05-08 (exclusive)"), "{}", failure.message);
    assert!(transport.urls().is_empty());
}

#[test]
fn delisted_symbol_becomes_data_unavailable() {
    let body = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;
    let transport = CannedTransport::new(Ok(HttpResponse::new(404, body)));
    let query = PriceQuery::new("999999", 90).expect("valid query");

    let outcome = block_on(service(transport).run(&query)).expect("valid lookback");

    let failure = outcome.failure().expect("must fail");
    assert_eq!(failure.kind, FailureKind::DataUnavailable);
    assert!(failure.message.contains("999999.KS"));
}

#[test]
fn throttled_call_becomes_rate_limited_failure() {
    let transport = CannedTransport::new(Ok(HttpResponse::new(429, "Too Many Requests")));
    let query = PriceQuery::new("005930", 90).expect("valid query");

    let outcome = block_on(service(transport).run(&query)).expect("valid lookback");

    let failure = outcome.failure().expect("must fail");
    assert_eq!(failure.kind, FailureKind::FetchFailed(FetchCause::RateLimited));
}

#[test]
fn symbols_are_percent_encoded_in_the_path() {
    let config = ProviderConfig::default();
    let adapter = YahooChartAdapter::new(
        CannedTransport::new(Ok(HttpResponse::ok_json("{}"))),
        &config,
    );
    let range = stockpulse_core::DateRange::lookback(date!(2024 - 05 - 08), 1).expect("range");

    let url = adapter.chart_url(&QualifiedSymbol::normalize("A B"), range);

    assert!(url.starts_with("https://query1.finance.yahoo.com/v8/finance/chart/A%20B.KS?"));
}

fn block_on<F>(future: F) -> F::Output
where
    F: Future,
{
    let waker = noop_waker();
    let mut context = Context::from_waker(&waker);
    let mut future = std::pin::pin!(future);

    loop {
        match future.as_mut().poll(&mut context) {
            Poll::Ready(output) => return output,
            Poll::Pending => std::thread::yield_now(),
        }
    }
}

fn noop_waker() -> Waker {
    // SAFETY: The vtable functions never dereference the data pointer and are no-op operations.
    unsafe { Waker::from_raw(noop_raw_waker()) }
}

fn noop_raw_waker() -> RawWaker {
    RawWaker::new(std::ptr::null(), &NOOP_RAW_WAKER_VTABLE)
}

unsafe fn noop_raw_waker_clone(_: *const ()) -> RawWaker {
    noop_raw_waker()
}

unsafe fn noop_raw_waker_wake(_: *const ()) {}

unsafe fn noop_raw_waker_wake_by_ref(_: *const ()) {}

unsafe fn noop_raw_waker_drop(_: *const ()) {}

static NOOP_RAW_WAKER_VTABLE: RawWakerVTable = RawWakerVTable::new(
    noop_raw_waker_clone,
    noop_raw_waker_wake,
    noop_raw_waker_wake_by_ref,
    noop_raw_waker_drop,
);
