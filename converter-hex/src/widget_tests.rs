//! ConverterWidget unit tests.

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use approx::assert_relative_eq;
    use async_trait::async_trait;
    use tokio::sync::{mpsc, oneshot};

    use converter_types::{
        Conversion, CurrencyCode, RateError, RateProvider, RateTable, WidgetState,
    };
    use rates_client::ReferenceRateProvider;

    use crate::{ConverterWidget, convert_once};

    /// Returns the same quotes for every base and counts lookups.
    pub struct FixedRates {
        rates: HashMap<String, f64>,
        calls: AtomicUsize,
        failing: AtomicBool,
    }

    impl FixedRates {
        pub fn new(quotes: &[(&str, f64)]) -> Self {
            Self {
                rates: quotes.iter().map(|(c, r)| (c.to_string(), *r)).collect(),
                calls: AtomicUsize::new(0),
                failing: AtomicBool::new(false),
            }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        /// Makes subsequent lookups fail with a transport error.
        pub fn go_offline(&self) {
            self.failing.store(true, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl RateProvider for FixedRates {
        async fn latest(&self, base: CurrencyCode) -> Result<RateTable, RateError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.failing.load(Ordering::SeqCst) {
                return Err(RateError::Transport("network unreachable".into()));
            }
            Ok(RateTable::new(base, self.rates.clone()))
        }
    }

    /// A lookup parked until the test answers it.
    pub struct PendingCall {
        pub base: CurrencyCode,
        respond: oneshot::Sender<Result<RateTable, RateError>>,
    }

    impl PendingCall {
        pub fn respond(self, outcome: Result<RateTable, RateError>) {
            let _ = self.respond.send(outcome);
        }

        pub fn respond_with(self, quotes: &[(&str, f64)]) {
            let base = self.base;
            let rates = quotes.iter().map(|(c, r)| (c.to_string(), *r)).collect();
            self.respond(Ok(RateTable::new(base, rates)));
        }
    }

    /// Provider whose lookups complete only when the test says so, in any order.
    pub struct GatedProvider {
        calls: mpsc::UnboundedSender<PendingCall>,
    }

    impl GatedProvider {
        pub fn new() -> (Self, mpsc::UnboundedReceiver<PendingCall>) {
            let (tx, rx) = mpsc::unbounded_channel();
            (Self { calls: tx }, rx)
        }
    }

    #[async_trait]
    impl RateProvider for GatedProvider {
        async fn latest(&self, base: CurrencyCode) -> Result<RateTable, RateError> {
            let (tx, rx) = oneshot::channel();
            self.calls
                .send(PendingCall { base, respond: tx })
                .map_err(|_| RateError::Transport("test harness dropped".into()))?;
            rx.await
                .map_err(|_| RateError::Transport("lookup abandoned".into()))?
        }
    }

    const USD_QUOTES: &[(&str, f64)] = &[("USD", 1.0), ("EUR", 0.92), ("GBP", 0.79), ("JPY", 149.5)];

    // ─────────────────────────────────────────────────────────────────────────────
    // Lifecycle
    // ─────────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_mount_starts_initial_lookup() {
        let widget = ConverterWidget::mount(FixedRates::new(USD_QUOTES));
        assert!(widget.state().in_flight());

        let state = widget.settled().await;
        assert!(!state.in_flight());
        assert_eq!(state.amount(), "1");
        assert_eq!(state.result(), Some(0.92));
        assert_eq!(widget.provider().calls(), 1);
        assert_eq!(widget.view().display.as_deref(), Some("0.92 EUR"));
    }

    #[tokio::test]
    async fn test_every_input_change_triggers_lookup() {
        let widget = ConverterWidget::mount(FixedRates::new(USD_QUOTES));
        widget.settled().await;

        widget.set_amount("5").await.unwrap();
        widget.select_target(CurrencyCode::GBP).await.unwrap();
        widget.select_source(CurrencyCode::USD).await.unwrap();
        widget.swap().await.unwrap();

        assert_eq!(widget.provider().calls(), 5);
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Conversion
    // ─────────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_ten_dollars_to_euro() {
        let widget = ConverterWidget::mount(FixedRates::new(USD_QUOTES));
        widget.set_amount("10").await.unwrap();

        let view = widget.view();
        assert!(!view.loading);
        assert_eq!(view.display.as_deref(), Some("9.20 EUR"));
    }

    #[tokio::test]
    async fn test_result_is_amount_times_rate() {
        let widget = ConverterWidget::mount(FixedRates::new(USD_QUOTES));
        widget.select_target(CurrencyCode::JPY).await.unwrap();
        widget.set_amount("12.34").await.unwrap();

        assert_relative_eq!(widget.state().result().unwrap(), 12.34 * 149.5, epsilon = 1e-9);
    }

    #[tokio::test]
    async fn test_result_scales_with_amount() {
        let widget = ConverterWidget::mount(FixedRates::new(USD_QUOTES));

        widget.set_amount("3.3").await.unwrap();
        let single = widget.state().result().unwrap();
        widget.set_amount("6.6").await.unwrap();
        let double = widget.state().result().unwrap();

        assert_relative_eq!(double, 2.0 * single, epsilon = 1e-9);
    }

    #[tokio::test]
    async fn test_non_numeric_amount_shows_nan() {
        let widget = ConverterWidget::mount(FixedRates::new(USD_QUOTES));
        widget.set_amount("abc").await.unwrap();

        let state = widget.state();
        assert!(!state.in_flight());
        assert!(state.result().unwrap().is_nan());
        assert_eq!(widget.view().display.as_deref(), Some("NaN EUR"));
    }

    #[tokio::test]
    async fn test_swap_converts_in_reverse() {
        let widget = ConverterWidget::mount(ReferenceRateProvider);
        widget.settled().await;

        widget.swap().await.unwrap();
        let state = widget.state();
        assert_eq!(state.source(), CurrencyCode::EUR);
        assert_eq!(state.target(), CurrencyCode::USD);
        assert_relative_eq!(state.result().unwrap(), 1.087, epsilon = 1e-9);

        widget.swap().await.unwrap();
        let state = widget.state();
        assert_eq!(state.source(), CurrencyCode::USD);
        assert_eq!(state.target(), CurrencyCode::EUR);
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Failures
    // ─────────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_network_failure_keeps_previous_result() {
        let widget = ConverterWidget::mount(FixedRates::new(USD_QUOTES));
        widget.set_amount("10").await.unwrap();
        let before = widget.state().result();

        widget.provider().go_offline();
        widget.set_amount("20").await.unwrap();

        let state = widget.state();
        assert!(!state.in_flight());
        assert_eq!(state.result(), before);
        assert_eq!(
            state.conversion(),
            Some(Conversion::Failed {
                reason: "Transport error: network unreachable".into()
            })
        );
        let view = widget.view();
        assert_eq!(view.display.as_deref(), Some("9.20 EUR"));
        assert!(view.error.is_some());
    }

    #[tokio::test]
    async fn test_failure_before_any_result_leaves_result_absent() {
        let provider = FixedRates::new(USD_QUOTES);
        provider.go_offline();
        let widget = ConverterWidget::mount(provider);

        let state = widget.settled().await;
        assert_eq!(state.result(), None);
        assert_eq!(widget.view().display, None);
    }

    #[tokio::test]
    async fn test_missing_target_rate_is_failure() {
        let widget = ConverterWidget::mount(FixedRates::new(USD_QUOTES));
        widget.settled().await;

        widget.select_target(CurrencyCode::INR).await.unwrap();

        let state = widget.state();
        assert_eq!(state.result(), Some(0.92));
        assert_eq!(
            state.last_error(),
            Some("Rate not available for USD -> INR")
        );
        // The kept value is still labelled with the currency it was computed for
        assert_eq!(widget.view().display.as_deref(), Some("0.92 EUR"));
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Concurrency
    // ─────────────────────────────────────────────────────────────────────────────

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_updates_each_get_their_own_lookup() {
        let widget = ConverterWidget::mount(FixedRates::new(USD_QUOTES));
        widget.settled().await;

        let updates: Vec<_> = (1..=50)
            .map(|i| {
                let widget = widget.clone();
                tokio::spawn(async move { widget.set_amount(i.to_string()).await })
            })
            .collect();
        for update in updates {
            update.await.unwrap().unwrap();
        }

        let state = widget.settled().await;
        assert_eq!(state.latest_request(), 51);
        assert!(!state.in_flight());
    }

    #[tokio::test]
    async fn test_loading_while_lookup_outstanding() {
        let (provider, mut calls) = GatedProvider::new();
        let widget = ConverterWidget::mount(provider);

        let call = calls.recv().await.unwrap();
        assert_eq!(call.base, CurrencyCode::USD);
        assert!(widget.state().in_flight());
        assert!(widget.view().loading);
        assert_eq!(widget.view().display, None);

        call.respond_with(USD_QUOTES);
        let state = widget.settled().await;
        assert!(!state.in_flight());
        assert!(!widget.view().loading);
    }

    #[tokio::test]
    async fn test_loading_clears_after_failure() {
        let (provider, mut calls) = GatedProvider::new();
        let widget = ConverterWidget::mount(provider);

        let call = calls.recv().await.unwrap();
        assert!(widget.state().in_flight());
        call.respond(Err(RateError::Status {
            status: 503,
            message: "maintenance".into(),
        }));

        let state = widget.settled().await;
        assert!(!state.in_flight());
        assert!(matches!(state.conversion(), Some(Conversion::Failed { .. })));
    }

    #[tokio::test]
    async fn test_stale_response_does_not_overwrite_newer_result() {
        let (provider, mut calls) = GatedProvider::new();
        let widget = ConverterWidget::mount(provider);
        calls.recv().await.unwrap().respond_with(USD_QUOTES);
        widget.settled().await;

        let to_gbp = widget.select_target(CurrencyCode::GBP);
        let gbp_call = calls.recv().await.unwrap();
        let to_jpy = widget.select_target(CurrencyCode::JPY);
        let jpy_call = calls.recv().await.unwrap();

        // Newer lookup resolves first.
        jpy_call.respond_with(USD_QUOTES);
        to_jpy.await.unwrap();
        assert_eq!(widget.state().result(), Some(149.5));
        assert!(!widget.state().in_flight());

        // Older lookup resolves last and is ignored.
        gbp_call.respond_with(USD_QUOTES);
        to_gbp.await.unwrap();
        let state = widget.state();
        assert_eq!(state.target(), CurrencyCode::JPY);
        assert_eq!(state.result(), Some(149.5));
    }

    #[tokio::test]
    async fn test_in_flight_until_latest_lookup_settles() {
        let (provider, mut calls) = GatedProvider::new();
        let widget = ConverterWidget::mount(provider);
        let first = calls.recv().await.unwrap();

        let second_handle = widget.set_amount("2");
        let second = calls.recv().await.unwrap();

        first.respond_with(USD_QUOTES);
        tokio::task::yield_now().await;
        assert!(widget.state().in_flight());

        second.respond_with(USD_QUOTES);
        second_handle.await.unwrap();
        let state = widget.state();
        assert!(!state.in_flight());
        assert_eq!(state.result(), Some(1.84));
    }

    #[tokio::test]
    async fn test_subscribers_see_each_change() {
        let widget = ConverterWidget::mount(FixedRates::new(USD_QUOTES));
        widget.settled().await;
        let mut rx = widget.subscribe();

        widget.set_amount("4");
        rx.changed().await.unwrap();
        let seen: WidgetState = rx.borrow_and_update().clone();
        assert_eq!(seen.amount(), "4");

        let settled = rx.wait_for(|s| !s.in_flight()).await.unwrap().clone();
        assert_eq!(settled.result(), Some(3.68));
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // One-shot Conversion
    // ─────────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_convert_once() {
        let provider = FixedRates::new(USD_QUOTES);
        let resp = convert_once(&provider, "10", CurrencyCode::USD, CurrencyCode::EUR)
            .await
            .unwrap();
        assert_eq!(resp.rate, 0.92);
        assert_eq!(resp.display, "9.20 EUR");
    }

    #[tokio::test]
    async fn test_convert_once_missing_rate() {
        let provider = FixedRates::new(USD_QUOTES);
        let err = convert_once(&provider, "10", CurrencyCode::USD, CurrencyCode::CHF)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RateError::RateNotAvailable(CurrencyCode::USD, CurrencyCode::CHF)
        ));
    }

    #[tokio::test]
    async fn test_convert_once_nan_has_no_result() {
        let provider = FixedRates::new(USD_QUOTES);
        let resp = convert_once(&provider, "", CurrencyCode::USD, CurrencyCode::GBP)
            .await
            .unwrap();
        assert_eq!(resp.result, None);
        assert_eq!(resp.display, "NaN GBP");
    }
}
