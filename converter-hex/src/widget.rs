//! Converter Widget Service
//!
//! Owns the widget state and keeps the converted result in sync with the
//! inputs. Every input change starts a rate lookup on a background task; the
//! caller is never blocked on the network. Lookups are numbered and only the
//! most recently started one may update the state, so a slow response can
//! never overwrite the result for newer inputs.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::Instrument;

use converter_types::{
    ConversionResponse, CurrencyCode, LookupRequest, RateError, RateProvider, WidgetState,
    WidgetView, format_result, parse_amount,
};

/// Currency converter widget.
///
/// Generic over `P: RateProvider` - the adapter is injected at compile time.
/// Cloning is cheap and every clone drives the same widget instance.
pub struct ConverterWidget<P: RateProvider> {
    inner: Arc<Inner<P>>,
}

struct Inner<P> {
    provider: P,
    state: watch::Sender<WidgetState>,
}

impl<P: RateProvider> Clone for ConverterWidget<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<P: RateProvider + 'static> ConverterWidget<P> {
    /// Mounts a widget with default inputs and starts the first lookup.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn mount(provider: P) -> Self {
        Self::mount_with(provider, WidgetState::default())
    }

    /// Mounts a widget with the given inputs and starts the first lookup.
    pub fn mount_with(provider: P, initial: WidgetState) -> Self {
        let (state, _) = watch::channel(initial);
        let widget = Self {
            inner: Arc::new(Inner { provider, state }),
        };
        widget.recompute();
        widget
    }

    /// Returns a reference to the underlying rate provider.
    pub fn provider(&self) -> &P {
        &self.inner.provider
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // User Operations
    // ─────────────────────────────────────────────────────────────────────────────
    //
    // Each returns the handle of the lookup it started. Awaiting it is optional.

    /// Stores the amount text verbatim and recomputes.
    pub fn set_amount(&self, text: impl Into<String>) -> JoinHandle<()> {
        let text = text.into();
        self.dispatch(move |state| state.with_amount(text))
    }

    pub fn select_source(&self, currency: CurrencyCode) -> JoinHandle<()> {
        self.dispatch(|state| state.with_source(currency))
    }

    pub fn select_target(&self, currency: CurrencyCode) -> JoinHandle<()> {
        self.dispatch(|state| state.with_target(currency))
    }

    /// Exchanges source and target in one update and recomputes.
    pub fn swap(&self) -> JoinHandle<()> {
        self.dispatch(WidgetState::swapped)
    }

    /// Starts a lookup for the current inputs.
    pub fn recompute(&self) -> JoinHandle<()> {
        self.dispatch(WidgetState::clone)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Observation
    // ─────────────────────────────────────────────────────────────────────────────

    pub fn state(&self) -> WidgetState {
        self.inner.state.borrow().clone()
    }

    pub fn view(&self) -> WidgetView {
        WidgetView::from(&*self.inner.state.borrow())
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<WidgetState> {
        self.inner.state.subscribe()
    }

    /// Waits until no lookup for the current inputs is outstanding.
    pub async fn settled(&self) -> WidgetState {
        let mut rx = self.subscribe();
        match rx.wait_for(|state| !state.in_flight()).await {
            Ok(state) => state.clone(),
            // Sender dropped; report the last value.
            Err(_) => self.state(),
        }
    }

    /// Applies `update` and starts a lookup in the same state change, so
    /// observers never see new inputs without the matching in-flight flag.
    fn dispatch<F>(&self, update: F) -> JoinHandle<()>
    where
        F: FnOnce(&WidgetState) -> WidgetState,
    {
        let mut started = None;
        self.inner.state.send_modify(|state| {
            let (next, request) = update(state).begin_lookup();
            *state = next;
            started = Some(request);
        });

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            let Some(request) = started else { return };
            let span = tracing::info_span!(
                "rate_lookup",
                seq = request.seq,
                base = %request.source,
                target = %request.target,
            );
            inner.run_lookup(request).instrument(span).await;
        })
    }
}

impl<P: RateProvider> Inner<P> {
    async fn run_lookup(&self, request: LookupRequest) {
        let outcome = self
            .provider
            .latest(request.source)
            .await
            .and_then(|table| request.convert(&table));

        if let Err(err) = &outcome {
            tracing::warn!(error = %err, "rate lookup failed");
        }

        let applied = self
            .state
            .send_if_modified(|state| match state.settle(&request, outcome) {
                Some(next) => {
                    *state = next;
                    true
                }
                None => false,
            });

        if applied {
            tracing::debug!("rate lookup settled");
        } else {
            tracing::debug!("discarding stale rate lookup");
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// One-shot Conversion
// ─────────────────────────────────────────────────────────────────────────────

/// Converts `amount` without any widget state.
pub async fn convert_once<P: RateProvider + ?Sized>(
    provider: &P,
    amount: &str,
    from: CurrencyCode,
    to: CurrencyCode,
) -> Result<ConversionResponse, RateError> {
    let table = provider.latest(from).await?;
    let rate = table
        .rate_for(to)
        .ok_or(RateError::RateNotAvailable(from, to))?;
    let value = parse_amount(amount) * rate;

    Ok(ConversionResponse {
        amount: amount.to_string(),
        from,
        to,
        rate,
        result: value.is_finite().then_some(value),
        display: format_result(value, to),
        date: table.date,
    })
}
