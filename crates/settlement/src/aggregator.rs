//! The settle-all combinator
//!
//! `settle_all` maps every item to a future up front, then waits for all
//! of them to settle before classifying the batch. A rejection never stops
//! the remaining computations from being polled to completion.
//!
//! # Panics
//!
//! Panics raised by `map` escape `settle_all` itself. Panics raised by an
//! annotator escape the returned future's `poll`. Neither is converted into
//! a rejected record.

use std::future::Future;
use std::time::Instant;

use futures::future::join_all;
use tracing::{debug, debug_span, info, warn, Instrument};

use crate::annotate::Annotators;
use crate::failure::{classify, state_of, SettleResult};
use crate::metrics;
use crate::outcome::SettlementRecord;

/// Run `map` over `items` concurrently and classify every outcome.
///
/// `map` is called once per item, in order, before this function returns.
/// The returned future resolves once every computation has settled:
///
/// * `Ok(records)` when all of them resolved (including an empty input)
/// * `Err(AggregateFailure)` when at least one rejected
///
/// Records are in input order regardless of completion order.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use settlement::{settle_all, Annotators};
///
/// # tokio_test::block_on(async {
/// let result = settle_all(
///     vec![1, 2, 3],
///     |n| async move { if n % 2 == 0 { Err(n) } else { Ok(n * 10) } },
///     Annotators::none().on_rejected(|n| json!({ "even": n })),
/// )
/// .await;
///
/// let failure = result.unwrap_err();
/// assert_eq!(failure.resolved().len(), 2);
/// assert_eq!(failure.rejected()[0].annotation()["even"], 2);
/// # });
/// ```
pub fn settle_all<'a, I, F, Fut, T, E>(
    items: I,
    map: F,
    annotators: Annotators<'a, T, E>,
) -> impl Future<Output = SettleResult<T, E>> + 'a
where
    I: IntoIterator,
    F: FnMut(I::Item) -> Fut,
    Fut: Future<Output = Result<T, E>> + 'a,
    T: 'a,
    E: 'a,
{
    // Fan out before the first poll
    let pending: Vec<Fut> = items.into_iter().map(map).collect();

    let span = debug_span!("settle_all", items = pending.len());
    debug!(parent: &span, items = pending.len(), "Settlement batch fanned out");

    async move {
        let started = Instant::now();

        let records = join_all(
            pending
                .into_iter()
                .enumerate()
                .map(|(index, computation)| settle_one(index, computation, &annotators)),
        )
        .await;

        let result = classify(records);
        let state = state_of(&result);
        metrics::record_batch(state, started.elapsed());

        match &result {
            Ok(records) => {
                info!(resolved = records.len(), state = state.as_str(), "Settlement batch complete");
            }
            Err(failure) => {
                warn!(
                    total = failure.all().len(),
                    rejected = failure.rejected_indices().len(),
                    state = state.as_str(),
                    "Settlement batch complete with rejections"
                );
            }
        }

        result
    }
    .instrument(span)
}

/// [`settle_all`] without annotators
pub fn settle_all_plain<'a, I, F, Fut, T, E>(
    items: I,
    map: F,
) -> impl Future<Output = SettleResult<T, E>> + 'a
where
    I: IntoIterator,
    F: FnMut(I::Item) -> Fut,
    Fut: Future<Output = Result<T, E>> + 'a,
    T: 'a,
    E: 'a,
{
    settle_all(items, map, Annotators::none())
}

async fn settle_one<T, E, Fut>(
    index: usize,
    computation: Fut,
    annotators: &Annotators<'_, T, E>,
) -> SettlementRecord<T, E>
where
    Fut: Future<Output = Result<T, E>>,
{
    let record = match computation.await {
        Ok(value) => {
            let annotation = annotators.annotate_resolved(&value);
            SettlementRecord::resolved(value, annotation)
        }
        Err(error) => {
            let annotation = annotators.annotate_rejected(&error);
            SettlementRecord::rejected(error, annotation)
        }
    };

    debug!(index, kind = %record.kind(), "Computation settled");
    metrics::record_settled(record.kind());
    record
}
