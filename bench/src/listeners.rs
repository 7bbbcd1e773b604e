//! Listener types and emitter setups used across benchmarks.

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use rusty_emitter::{Callback, Emitter, Listener, Result};

/// A listener that accumulates every tick it receives.
#[derive(Listener, Debug, Default)]
pub struct Ticker {
    pub total: AtomicU64,
}

impl Ticker {
    pub fn on_tick(&self, n: &u64) {
        self.total.fetch_add(*n, Ordering::Relaxed);
    }
}

/// An emitter with `callbacks` unbound handlers on "tick".
pub fn unbound_emitter(callbacks: usize) -> (Emitter<u64>, Arc<AtomicU64>) {
    let emitter = Emitter::new();
    let total = Arc::new(AtomicU64::new(0));
    for _ in 0..callbacks {
        let total = Arc::clone(&total);
        emitter.on(
            "tick",
            Callback::unbound(move |n: &u64| {
                total.fetch_add(*n, Ordering::Relaxed);
            }),
        );
    }
    (emitter, total)
}

/// An emitter with `Ticker::on_tick` bound to "tick" and `instances` tickers.
pub fn bound_emitter(instances: usize) -> Result<(Emitter<u64>, Vec<Arc<Ticker>>)> {
    let emitter = Emitter::new();
    emitter.listener::<Ticker>();
    emitter.on("tick", Callback::method(Ticker::on_tick));
    let tickers = (0..instances)
        .map(|_| emitter.spawn(Ticker::default()))
        .collect::<Result<Vec<_>>>()?;
    Ok((emitter, tickers))
}
